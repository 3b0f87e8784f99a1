//! Per-viewer application state.
//!
//! Holds one snapshot per aggregate and recomputes derived values (tiers,
//! badges, unread) from it on every read. Responses that arrive after the
//! view has been closed are dropped instead of applied.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::application::handlers::messaging::{
    MarkReadCommand, MarkReadHandler, ReadTarget, SendMessageCommand, SendMessageHandler,
};
use crate::domain::applicant::Applicant;
use crate::domain::assignment::{AssignmentBadge, AssignmentIndex};
use crate::domain::foundation::{ApplicantId, AuthenticatedUser, DomainError};
use crate::domain::messaging::{
    count_unread, Message, MessageThread, MessagingError, Participant, UnreadCount, ViewerKey,
};
use crate::domain::payment_gate::{compute_tier, Tier};
use crate::ports::{
    ApplicantRepository, AssignmentRepository, MessageRepository, ReadStateStore,
    ThreadRepository,
};

/// Ports a view reads from.
#[derive(Clone)]
pub struct ViewPorts {
    pub applicants: Arc<dyn ApplicantRepository>,
    pub assignments: Arc<dyn AssignmentRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub threads: Arc<dyn ThreadRepository>,
    pub read_state: Arc<dyn ReadStateStore>,
}

/// Unsent message text and recipients.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeDraft {
    pub recipients: Vec<Participant>,
    pub text: String,
}

impl ComposeDraft {
    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty() && self.text.trim().is_empty()
    }
}

/// Last applied fetch.
#[derive(Debug, Clone, Default)]
pub struct ViewSnapshot {
    pub applicants: Vec<Applicant>,
    pub assignments: AssignmentIndex,
    pub messages: Vec<Message>,
    pub threads: Vec<MessageThread>,
    pub unread: UnreadCount,
    pub draft: ComposeDraft,
}

impl ViewSnapshot {
    pub fn applicant(&self, id: &ApplicantId) -> Option<&Applicant> {
        self.applicants.iter().find(|a| &a.id == id)
    }

    pub fn tier_of(&self, id: &ApplicantId) -> Option<Tier> {
        self.applicant(id)
            .map(|a| compute_tier(a, self.assignments.has_mentor(&a.id)))
    }

    pub fn badge_for(&self, id: &ApplicantId) -> AssignmentBadge {
        self.assignments.badge_for(id)
    }
}

pub struct ViewState {
    viewer: AuthenticatedUser,
    ports: ViewPorts,
    live: Arc<AtomicBool>,
    snapshot: RwLock<ViewSnapshot>,
}

impl ViewState {
    pub fn new(viewer: AuthenticatedUser, ports: ViewPorts) -> Self {
        Self {
            viewer,
            ports,
            live: Arc::new(AtomicBool::new(true)),
            snapshot: RwLock::new(ViewSnapshot::default()),
        }
    }

    pub fn viewer(&self) -> &AuthenticatedUser {
        &self.viewer
    }

    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// Marks the view as gone. In-flight work completes but is not applied.
    pub fn close(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Shared flag for tasks that outlive a single call.
    pub fn liveness(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.live)
    }

    pub async fn snapshot(&self) -> ViewSnapshot {
        self.snapshot.read().await.clone()
    }

    /// Re-fetches every aggregate concurrently.
    ///
    /// Returns `Ok(false)` when the view closed while the fetch was in
    /// flight; the old snapshot is then left untouched.
    pub async fn refresh(&self) -> Result<bool, DomainError> {
        let viewer = ViewerKey::from(&self.viewer);
        let (applicants, assignments, messages, threads, state) = futures::try_join!(
            self.ports.applicants.list_by_role(None),
            self.ports.assignments.list_all(),
            self.ports.messages.list_for(&viewer.email),
            self.ports.threads.list_for(&viewer.email),
            async { self.ports.read_state.load(&viewer).await.map_err(DomainError::from) },
        )?;

        if !self.is_live() {
            tracing::debug!(viewer = %viewer.email, "View closed, dropping refresh");
            return Ok(false);
        }

        let unread = count_unread(&messages, &threads, &viewer, &state);
        let mut snapshot = self.snapshot.write().await;
        snapshot.applicants = applicants;
        snapshot.assignments = AssignmentIndex::from_assignments(assignments);
        snapshot.messages = messages;
        snapshot.threads = threads;
        snapshot.unread = unread;
        Ok(true)
    }

    pub async fn set_draft(&self, draft: ComposeDraft) {
        self.snapshot.write().await.draft = draft;
    }

    /// Sends the current draft. The draft is cleared only on success.
    pub async fn send_draft(&self) -> Result<Vec<Message>, MessagingError> {
        let draft = self.snapshot.read().await.draft.clone();
        let handler = SendMessageHandler::new(Arc::clone(&self.ports.messages));
        let result = handler
            .handle(SendMessageCommand {
                sender: self.viewer.clone(),
                recipients: draft.recipients,
                text: draft.text,
            })
            .await?;

        if self.is_live() {
            let mut snapshot = self.snapshot.write().await;
            snapshot.draft = ComposeDraft::default();
            snapshot.messages.extend(result.messages.iter().cloned());
        }
        Ok(result.messages)
    }

    /// Opening the inbox marks every message in it read.
    pub async fn open_inbox(&self) -> Result<UnreadCount, MessagingError> {
        let handler = MarkReadHandler::new(
            Arc::clone(&self.ports.messages),
            Arc::clone(&self.ports.threads),
            Arc::clone(&self.ports.read_state),
        );
        let result = handler
            .handle(MarkReadCommand {
                viewer: ViewerKey::from(&self.viewer),
                target: ReadTarget::Inbox,
            })
            .await?;

        if self.is_live() {
            self.snapshot.write().await.unread = result.unread;
        }
        Ok(result.unread)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::*;
    use crate::domain::foundation::ActorRole;

    fn ports(messages: MockMessageRepository, applicants: Vec<Applicant>) -> ViewPorts {
        ViewPorts {
            applicants: Arc::new(MockApplicantRepository::with(applicants)),
            assignments: Arc::new(MockAssignmentRepository::default()),
            messages: Arc::new(messages),
            threads: Arc::new(MockThreadRepository::default()),
            read_state: Arc::new(MockReadStateStore::default()),
        }
    }

    fn draft_to(address: &str) -> ComposeDraft {
        ComposeDraft {
            recipients: vec![Participant::new(email(address), "Erin")],
            text: "Welcome aboard".into(),
        }
    }

    #[tokio::test]
    async fn refresh_applies_snapshot_and_derives_tier() {
        let e = paid_entrepreneur("e1@example.com", "Erin");
        let id = e.id;
        let view = ViewState::new(admin(), ports(MockMessageRepository::default(), vec![e]));

        assert!(view.refresh().await.unwrap());

        let snapshot = view.snapshot().await;
        assert_eq!(snapshot.applicants.len(), 1);
        assert_eq!(snapshot.tier_of(&id), Some(Tier::FoundersCircle));
        assert_eq!(snapshot.badge_for(&id), AssignmentBadge::Unassigned);
    }

    #[tokio::test]
    async fn closed_view_drops_late_refresh() {
        let view = ViewState::new(
            admin(),
            ports(
                MockMessageRepository::default(),
                vec![entrepreneur("e1@example.com", "Erin")],
            ),
        );
        view.close();

        assert!(!view.refresh().await.unwrap());
        assert!(view.snapshot().await.applicants.is_empty());
    }

    #[tokio::test]
    async fn failed_send_keeps_draft() {
        let view = ViewState::new(admin(), ports(MockMessageRepository::failing(), vec![]));
        view.set_draft(draft_to("e1@example.com")).await;

        assert!(view.send_draft().await.is_err());

        assert_eq!(view.snapshot().await.draft, draft_to("e1@example.com"));
    }

    #[tokio::test]
    async fn successful_send_clears_draft() {
        let view = ViewState::new(admin(), ports(MockMessageRepository::default(), vec![]));
        view.set_draft(draft_to("e1@example.com")).await;

        let sent = view.send_draft().await.unwrap();

        assert_eq!(sent.len(), 1);
        let snapshot = view.snapshot().await;
        assert!(snapshot.draft.is_empty());
        assert_eq!(snapshot.messages.len(), 1);
    }

    #[tokio::test]
    async fn opening_inbox_clears_legacy_badge() {
        let messages = MockMessageRepository::with(vec![
            message("admin@example.com", "e1@example.com", "one"),
            message("admin@example.com", "e1@example.com", "two"),
        ]);
        let view = ViewState::new(
            user("e1@example.com", "Erin", ActorRole::Entrepreneur),
            ports(messages, vec![]),
        );
        view.refresh().await.unwrap();
        assert_eq!(view.snapshot().await.unread.legacy, 2);

        let unread = view.open_inbox().await.unwrap();

        assert_eq!(unread.total(), 0);
        assert_eq!(view.snapshot().await.unread.total(), 0);
    }
}
