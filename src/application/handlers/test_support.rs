//! Hand-written mock ports shared by handler tests.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::domain::applicant::{
    Applicant, ApplicantPayload, CoachPayload, EntrepreneurPayload, MentorPayload, ReviewAction,
};
use crate::domain::assignment::MentorAssignment;
use crate::domain::foundation::{
    ActorRole, ApplicantId, AssignmentId, AuthenticatedUser, DomainError, EmailAddress,
    ErrorCode, EventEnvelope, NoteId, Role, ThreadId, Timestamp,
};
use crate::domain::messaging::{
    AttachmentRef, AttachmentUpload, Message, MessageThread, MentorNote, NoteResponse, ReadState,
    ThreadEntry, ViewerKey,
};
use crate::ports::{
    AnswerRewriter, ApplicantRepository, AssignmentRepository, AttachmentStorage,
    CheckoutSession, CreateCheckoutRequest, EventPublisher, MessageRepository, NoteRepository,
    Notification, NotificationSender, PaymentConfirmation, PaymentError, PaymentProvider,
    ReadStateError, ReadStateStore, RewriteError, ThreadRepository, WebhookEvent,
};

fn simulated(code: ErrorCode, what: &str) -> DomainError {
    DomainError::new(code, format!("Simulated {} failure", what))
}

// ════════════════════════════════════════════════════════════════════════════
// Repositories
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct MockApplicantRepository {
    pub applicants: Mutex<Vec<Applicant>>,
    pub fail_update: bool,
    pub fail_reads: bool,
}

impl MockApplicantRepository {
    pub fn with(applicants: Vec<Applicant>) -> Self {
        Self {
            applicants: Mutex::new(applicants),
            ..Self::default()
        }
    }

    pub fn failing_update(applicants: Vec<Applicant>) -> Self {
        Self {
            applicants: Mutex::new(applicants),
            fail_update: true,
            ..Self::default()
        }
    }

    pub fn get(&self, id: &ApplicantId) -> Option<Applicant> {
        self.applicants
            .lock()
            .unwrap()
            .iter()
            .find(|a| &a.id == id)
            .cloned()
    }

    pub fn all(&self) -> Vec<Applicant> {
        self.applicants.lock().unwrap().clone()
    }
}

#[async_trait]
impl ApplicantRepository for MockApplicantRepository {
    async fn save(&self, applicant: &Applicant) -> Result<Applicant, DomainError> {
        self.applicants.lock().unwrap().push(applicant.clone());
        Ok(applicant.clone())
    }

    async fn update(&self, applicant: &Applicant) -> Result<Applicant, DomainError> {
        if self.fail_update {
            return Err(simulated(ErrorCode::DatabaseError, "update"));
        }
        let mut applicants = self.applicants.lock().unwrap();
        match applicants.iter_mut().find(|a| a.id == applicant.id) {
            Some(existing) => {
                *existing = applicant.clone();
                Ok(applicant.clone())
            }
            None => Err(DomainError::new(
                ErrorCode::ApplicantNotFound,
                "Applicant not found",
            )),
        }
    }

    async fn find_by_id(&self, id: &ApplicantId) -> Result<Option<Applicant>, DomainError> {
        if self.fail_reads {
            return Err(simulated(ErrorCode::DatabaseError, "read"));
        }
        Ok(self.get(id))
    }

    async fn find_by_email(
        &self,
        role: Role,
        email: &EmailAddress,
    ) -> Result<Option<Applicant>, DomainError> {
        if self.fail_reads {
            return Err(simulated(ErrorCode::DatabaseError, "read"));
        }
        Ok(self
            .applicants
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.role == role && &a.email == email)
            .cloned())
    }

    async fn list_by_role(&self, role: Option<Role>) -> Result<Vec<Applicant>, DomainError> {
        if self.fail_reads {
            return Err(simulated(ErrorCode::DatabaseError, "read"));
        }
        Ok(self
            .applicants
            .lock()
            .unwrap()
            .iter()
            .filter(|a| role.map_or(true, |r| a.role == r))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MockAssignmentRepository {
    pub assignments: Mutex<Vec<MentorAssignment>>,
    pub fail_upsert: bool,
}

impl MockAssignmentRepository {
    pub fn with(assignments: Vec<MentorAssignment>) -> Self {
        Self {
            assignments: Mutex::new(assignments),
            fail_upsert: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            assignments: Mutex::new(Vec::new()),
            fail_upsert: true,
        }
    }

    pub fn all(&self) -> Vec<MentorAssignment> {
        self.assignments.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssignmentRepository for MockAssignmentRepository {
    async fn upsert(&self, assignment: &MentorAssignment) -> Result<MentorAssignment, DomainError> {
        if self.fail_upsert {
            return Err(simulated(ErrorCode::DatabaseError, "upsert"));
        }
        let mut assignments = self.assignments.lock().unwrap();
        assignments.retain(|a| a.entrepreneur_id != assignment.entrepreneur_id);
        assignments.push(assignment.clone());
        Ok(assignment.clone())
    }

    async fn find_by_entrepreneur(
        &self,
        entrepreneur_id: &ApplicantId,
    ) -> Result<Option<MentorAssignment>, DomainError> {
        Ok(self
            .assignments
            .lock()
            .unwrap()
            .iter()
            .find(|a| &a.entrepreneur_id == entrepreneur_id)
            .cloned())
    }

    async fn find_by_id(&self, id: &AssignmentId) -> Result<Option<MentorAssignment>, DomainError> {
        Ok(self
            .assignments
            .lock()
            .unwrap()
            .iter()
            .find(|a| &a.id == id)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<MentorAssignment>, DomainError> {
        Ok(self.all())
    }
}

#[derive(Default)]
pub struct MockMessageRepository {
    pub messages: Mutex<Vec<Message>>,
    pub fail_save: bool,
    /// Saves addressed to this recipient fail; others succeed.
    pub fail_for: Option<EmailAddress>,
}

impl MockMessageRepository {
    pub fn with(messages: Vec<Message>) -> Self {
        Self {
            messages: Mutex::new(messages),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_save: true,
            ..Self::default()
        }
    }

    pub fn failing_for(recipient: EmailAddress) -> Self {
        Self {
            fail_for: Some(recipient),
            ..Self::default()
        }
    }

    pub fn all(&self) -> Vec<Message> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageRepository for MockMessageRepository {
    async fn save(&self, message: &Message) -> Result<Message, DomainError> {
        if self.fail_save || self.fail_for.as_ref() == Some(&message.to_email) {
            return Err(simulated(ErrorCode::DatabaseError, "save"));
        }
        self.messages.lock().unwrap().push(message.clone());
        Ok(message.clone())
    }

    async fn list_for(&self, email: &EmailAddress) -> Result<Vec<Message>, DomainError> {
        Ok(self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.involves(email))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MockThreadRepository {
    pub threads: Mutex<Vec<MessageThread>>,
    pub fail_writes: bool,
}

impl MockThreadRepository {
    pub fn with(threads: Vec<MessageThread>) -> Self {
        Self {
            threads: Mutex::new(threads),
            fail_writes: false,
        }
    }

    pub fn failing(threads: Vec<MessageThread>) -> Self {
        Self {
            threads: Mutex::new(threads),
            fail_writes: true,
        }
    }

    pub fn get(&self, id: &ThreadId) -> Option<MessageThread> {
        self.threads
            .lock()
            .unwrap()
            .iter()
            .find(|t| &t.id == id)
            .cloned()
    }
}

#[async_trait]
impl ThreadRepository for MockThreadRepository {
    async fn create(&self, thread: &MessageThread) -> Result<MessageThread, DomainError> {
        if self.fail_writes {
            return Err(simulated(ErrorCode::DatabaseError, "create"));
        }
        self.threads.lock().unwrap().push(thread.clone());
        Ok(thread.clone())
    }

    async fn append_entry(
        &self,
        id: &ThreadId,
        entry: &ThreadEntry,
    ) -> Result<MessageThread, DomainError> {
        if self.fail_writes {
            return Err(simulated(ErrorCode::DatabaseError, "append"));
        }
        let mut threads = self.threads.lock().unwrap();
        let thread = threads
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| simulated(ErrorCode::ThreadNotFound, "lookup"))?;
        thread.push_entry(entry.clone())?;
        Ok(thread.clone())
    }

    async fn close(
        &self,
        id: &ThreadId,
        closed_at: Timestamp,
    ) -> Result<MessageThread, DomainError> {
        if self.fail_writes {
            return Err(simulated(ErrorCode::DatabaseError, "close"));
        }
        let mut threads = self.threads.lock().unwrap();
        let thread = threads
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| simulated(ErrorCode::ThreadNotFound, "lookup"))?;
        thread.mark_closed(closed_at)?;
        Ok(thread.clone())
    }

    async fn find_by_id(&self, id: &ThreadId) -> Result<Option<MessageThread>, DomainError> {
        Ok(self.get(id))
    }

    async fn list_for(&self, email: &EmailAddress) -> Result<Vec<MessageThread>, DomainError> {
        Ok(self
            .threads
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.involves(email))
            .cloned()
            .collect())
    }
}

/// Serves a fixed snapshot from `find_by_id` and writes through to `inner`.
///
/// Stands in for a reader that loaded the thread just before another
/// request changed it.
pub struct StaleThreadRepository {
    pub inner: std::sync::Arc<MockThreadRepository>,
    pub snapshot: MessageThread,
}

#[async_trait]
impl ThreadRepository for StaleThreadRepository {
    async fn create(&self, thread: &MessageThread) -> Result<MessageThread, DomainError> {
        self.inner.create(thread).await
    }

    async fn append_entry(
        &self,
        id: &ThreadId,
        entry: &ThreadEntry,
    ) -> Result<MessageThread, DomainError> {
        self.inner.append_entry(id, entry).await
    }

    async fn close(
        &self,
        id: &ThreadId,
        closed_at: Timestamp,
    ) -> Result<MessageThread, DomainError> {
        self.inner.close(id, closed_at).await
    }

    async fn find_by_id(&self, id: &ThreadId) -> Result<Option<MessageThread>, DomainError> {
        Ok(Some(self.snapshot.clone()).filter(|t| &t.id == id))
    }

    async fn list_for(&self, email: &EmailAddress) -> Result<Vec<MessageThread>, DomainError> {
        self.inner.list_for(email).await
    }
}

#[derive(Default)]
pub struct MockNoteRepository {
    pub notes: Mutex<Vec<MentorNote>>,
    pub fail_save: bool,
}

impl MockNoteRepository {
    pub fn with(notes: Vec<MentorNote>) -> Self {
        Self {
            notes: Mutex::new(notes),
            fail_save: false,
        }
    }

    pub fn failing(notes: Vec<MentorNote>) -> Self {
        Self {
            notes: Mutex::new(notes),
            fail_save: true,
        }
    }

    pub fn all(&self) -> Vec<MentorNote> {
        self.notes.lock().unwrap().clone()
    }

    fn modify(
        &self,
        assignment_id: &AssignmentId,
        note_id: &NoteId,
        change: impl FnOnce(&mut MentorNote),
    ) -> Result<MentorNote, DomainError> {
        if self.fail_save {
            return Err(simulated(ErrorCode::DatabaseError, "save"));
        }
        let mut notes = self.notes.lock().unwrap();
        let note = notes
            .iter_mut()
            .find(|n| &n.assignment_id == assignment_id && &n.id == note_id)
            .ok_or_else(|| simulated(ErrorCode::NoteNotFound, "lookup"))?;
        change(note);
        Ok(note.clone())
    }
}

#[async_trait]
impl NoteRepository for MockNoteRepository {
    async fn create(&self, note: &MentorNote) -> Result<MentorNote, DomainError> {
        if self.fail_save {
            return Err(simulated(ErrorCode::DatabaseError, "save"));
        }
        self.notes.lock().unwrap().push(note.clone());
        Ok(note.clone())
    }

    async fn add_response(
        &self,
        assignment_id: &AssignmentId,
        note_id: &NoteId,
        response: &NoteResponse,
    ) -> Result<MentorNote, DomainError> {
        self.modify(assignment_id, note_id, |note| note.add_response(response.clone()))
    }

    async fn set_completed(
        &self,
        assignment_id: &AssignmentId,
        note_id: &NoteId,
        completed: bool,
    ) -> Result<MentorNote, DomainError> {
        self.modify(assignment_id, note_id, |note| note.set_completed(completed))
    }

    async fn find(
        &self,
        assignment_id: &AssignmentId,
        note_id: &NoteId,
    ) -> Result<Option<MentorNote>, DomainError> {
        Ok(self
            .notes
            .lock()
            .unwrap()
            .iter()
            .find(|n| &n.assignment_id == assignment_id && &n.id == note_id)
            .cloned())
    }

    async fn list_for_assignment(
        &self,
        assignment_id: &AssignmentId,
    ) -> Result<Vec<MentorNote>, DomainError> {
        Ok(self
            .notes
            .lock()
            .unwrap()
            .iter()
            .filter(|n| &n.assignment_id == assignment_id)
            .cloned()
            .collect())
    }
}

/// Serves a fixed snapshot from `find` and writes through to `inner`.
pub struct StaleNoteRepository {
    pub inner: std::sync::Arc<MockNoteRepository>,
    pub snapshot: MentorNote,
}

#[async_trait]
impl NoteRepository for StaleNoteRepository {
    async fn create(&self, note: &MentorNote) -> Result<MentorNote, DomainError> {
        self.inner.create(note).await
    }

    async fn add_response(
        &self,
        assignment_id: &AssignmentId,
        note_id: &NoteId,
        response: &NoteResponse,
    ) -> Result<MentorNote, DomainError> {
        self.inner.add_response(assignment_id, note_id, response).await
    }

    async fn set_completed(
        &self,
        assignment_id: &AssignmentId,
        note_id: &NoteId,
        completed: bool,
    ) -> Result<MentorNote, DomainError> {
        self.inner.set_completed(assignment_id, note_id, completed).await
    }

    async fn find(
        &self,
        assignment_id: &AssignmentId,
        note_id: &NoteId,
    ) -> Result<Option<MentorNote>, DomainError> {
        Ok(Some(self.snapshot.clone())
            .filter(|n| &n.assignment_id == assignment_id && &n.id == note_id))
    }

    async fn list_for_assignment(
        &self,
        assignment_id: &AssignmentId,
    ) -> Result<Vec<MentorNote>, DomainError> {
        self.inner.list_for_assignment(assignment_id).await
    }
}

#[derive(Default)]
pub struct MockReadStateStore {
    pub states: Mutex<BTreeMap<ViewerKey, ReadState>>,
    pub saves: Mutex<usize>,
    pub fail_save: bool,
}

impl MockReadStateStore {
    pub fn failing() -> Self {
        Self {
            fail_save: true,
            ..Self::default()
        }
    }

    pub fn state_of(&self, viewer: &ViewerKey) -> ReadState {
        self.states
            .lock()
            .unwrap()
            .get(viewer)
            .cloned()
            .unwrap_or_default()
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }
}

#[async_trait]
impl ReadStateStore for MockReadStateStore {
    async fn load(&self, viewer: &ViewerKey) -> Result<ReadState, ReadStateError> {
        Ok(self.state_of(viewer))
    }

    async fn save(&self, viewer: &ViewerKey, state: &ReadState) -> Result<(), ReadStateError> {
        if self.fail_save {
            return Err(ReadStateError::IoError("Simulated save failure".into()));
        }
        self.states
            .lock()
            .unwrap()
            .insert(viewer.clone(), state.clone());
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// External collaborators
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct MockEventPublisher {
    pub published: Mutex<Vec<EventEnvelope>>,
    pub fail_publish: bool,
}

impl MockEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
            fail_publish: true,
        }
    }

    pub fn event_types(&self) -> Vec<String> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.event_type.clone())
            .collect()
    }

    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventPublisher for MockEventPublisher {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        if self.fail_publish {
            return Err(simulated(ErrorCode::InternalError, "publish"));
        }
        self.published.lock().unwrap().push(event);
        Ok(())
    }
}

#[derive(Default)]
pub struct MockNotificationSender {
    pub sent: Mutex<Vec<Notification>>,
    pub fail_send: bool,
}

impl MockNotificationSender {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_send: true,
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send(&self, notification: &Notification) -> Result<(), DomainError> {
        if self.fail_send {
            return Err(simulated(ErrorCode::NotificationFailed, "send"));
        }
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

/// Payment provider with a scripted confirmation answer.
pub struct MockPaymentProvider {
    pub checkouts: Mutex<Vec<CreateCheckoutRequest>>,
    pub confirmation: PaymentConfirmation,
    pub confirm_calls: Mutex<usize>,
    pub webhook: Option<WebhookEvent>,
    pub fail: bool,
}

impl MockPaymentProvider {
    pub fn unpaid() -> Self {
        Self {
            checkouts: Mutex::new(Vec::new()),
            confirmation: PaymentConfirmation::unpaid(),
            confirm_calls: Mutex::new(0),
            webhook: None,
            fail: false,
        }
    }

    pub fn paid(session_id: &str) -> Self {
        Self {
            confirmation: PaymentConfirmation::paid(session_id),
            ..Self::unpaid()
        }
    }

    pub fn with_webhook(event: WebhookEvent) -> Self {
        Self {
            webhook: Some(event),
            ..Self::unpaid()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::unpaid()
        }
    }

    pub fn confirm_calls(&self) -> usize {
        *self.confirm_calls.lock().unwrap()
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        if self.fail {
            return Err(PaymentError::network("Simulated network failure"));
        }
        self.checkouts.lock().unwrap().push(request);
        Ok(CheckoutSession {
            id: "cs_test_123".into(),
            url: "https://checkout.example.com/cs_test_123".into(),
            expires_at: None,
        })
    }

    async fn confirm_payment(
        &self,
        _email: &EmailAddress,
    ) -> Result<PaymentConfirmation, PaymentError> {
        *self.confirm_calls.lock().unwrap() += 1;
        if self.fail {
            return Err(PaymentError::network("Simulated network failure"));
        }
        Ok(self.confirmation.clone())
    }

    async fn verify_webhook(
        &self,
        _payload: &[u8],
        _signature: &str,
    ) -> Result<WebhookEvent, PaymentError> {
        self.webhook
            .clone()
            .ok_or_else(|| PaymentError::invalid_webhook("Signature mismatch"))
    }
}

/// Rewriter that upper-cases answers, optionally dropping a key.
#[derive(Default)]
pub struct MockAnswerRewriter {
    pub drop_key: Option<String>,
    pub fail: bool,
    pub calls: Mutex<usize>,
}

#[async_trait]
impl AnswerRewriter for MockAnswerRewriter {
    async fn rewrite(
        &self,
        answers: &BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, String>, RewriteError> {
        *self.calls.lock().unwrap() += 1;
        if self.fail {
            return Err(RewriteError::provider("Simulated provider failure"));
        }
        Ok(answers
            .iter()
            .filter(|(k, _)| self.drop_key.as_deref() != Some(k.as_str()))
            .map(|(k, v)| (k.clone(), v.to_uppercase()))
            .collect())
    }
}

#[derive(Default)]
pub struct MockAttachmentStorage {
    pub stored: Mutex<Vec<(String, String)>>,
    pub fail: bool,
}

impl MockAttachmentStorage {
    pub fn failing() -> Self {
        Self {
            stored: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn store_count(&self) -> usize {
        self.stored.lock().unwrap().len()
    }
}

#[async_trait]
impl AttachmentStorage for MockAttachmentStorage {
    async fn store(
        &self,
        scope: &str,
        upload: &AttachmentUpload,
    ) -> Result<AttachmentRef, DomainError> {
        if self.fail {
            return Err(simulated(ErrorCode::StorageError, "storage"));
        }
        self.stored
            .lock()
            .unwrap()
            .push((scope.to_string(), upload.file_name.clone()));
        Ok(AttachmentRef {
            url: format!("https://files.example.com/{}/{}", scope, upload.file_name),
            name: upload.file_name.clone(),
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Fixtures
// ════════════════════════════════════════════════════════════════════════════

pub fn email(s: &str) -> EmailAddress {
    EmailAddress::new(s).unwrap()
}

pub fn user(address: &str, name: &str, role: ActorRole) -> AuthenticatedUser {
    AuthenticatedUser::new(email(address), name, role)
}

pub fn admin() -> AuthenticatedUser {
    user("admin@example.com", "Ada Admin", ActorRole::Admin)
}

pub fn entrepreneur(address: &str, name: &str) -> Applicant {
    Applicant::submit(
        email(address),
        name,
        ApplicantPayload::Entrepreneur(EntrepreneurPayload::default()),
    )
    .unwrap()
}

pub fn paid_entrepreneur(address: &str, name: &str) -> Applicant {
    let mut applicant = entrepreneur(address, name);
    applicant.mark_paid().unwrap();
    applicant
}

pub fn approved_mentor(address: &str, name: &str) -> Applicant {
    let mut mentor = Applicant::submit(
        email(address),
        name,
        ApplicantPayload::Mentor(MentorPayload {
            expertise: vec!["saas".into()],
            ..MentorPayload::default()
        }),
    )
    .unwrap();
    mentor.review(ReviewAction::Approve).unwrap();
    mentor
}

pub fn approved_coach(address: &str, name: &str) -> Applicant {
    let mut coach = Applicant::submit(
        email(address),
        name,
        ApplicantPayload::Coach(CoachPayload {
            specialties: vec!["fundraising".into()],
            ..CoachPayload::default()
        }),
    )
    .unwrap();
    coach.review(ReviewAction::Approve).unwrap();
    coach
}

pub fn assignment(entrepreneur: &Applicant, mentor: &Applicant, portfolio: i64) -> MentorAssignment {
    MentorAssignment::record(None, entrepreneur, mentor, portfolio).unwrap()
}

pub fn message(from: &str, to: &str, text: &str) -> Message {
    use crate::domain::messaging::Participant;
    Message::compose(
        Participant::new(email(from), "From"),
        Participant::new(email(to), "To"),
        text,
    )
    .unwrap()
}
