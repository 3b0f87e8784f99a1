//! Shared HTTP application state.
//!
//! Holds every port behind an `Arc` and builds application handlers on
//! demand. Cloned per request.

use std::sync::Arc;

use crate::application::handlers::{
    AddNoteHandler, AppendThreadEntryHandler, AssignMentorHandler, CloseThreadHandler,
    ConfirmPaymentHandler, CreateCheckoutHandler, GetAdminDashboardHandler,
    GetEntrepreneurDashboardHandler, HandlePaymentWebhookHandler, ListApplicantsHandler,
    ListAssignmentsHandler, ListMessagesHandler, ListNotesHandler, ListThreadsHandler,
    MarkReadHandler, RespondToNoteHandler, ResubmitApplicationHandler, ReviewApplicantHandler,
    RewriteAnswersHandler, SendMessageHandler, SetApplicantAccessHandler,
    SetNoteCompletionHandler, StartThreadHandler, SubmitApplicationHandler, UnreadCountHandler,
};
use crate::ports::{
    AnswerRewriter, ApplicantRepository, AssignmentRepository, AttachmentStorage,
    EventPublisher, MessageRepository, NoteRepository, NotificationSender, PaymentProvider,
    ReadStateStore, SessionValidator, ThreadRepository,
};

/// Where the hosted checkout page sends the entrepreneur afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutUrls {
    pub success_url: String,
    pub cancel_url: String,
}

impl Default for CheckoutUrls {
    fn default() -> Self {
        Self {
            success_url: "http://localhost:5173/payment/success".to_string(),
            cancel_url: "http://localhost:5173/payment/cancel".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub applicants: Arc<dyn ApplicantRepository>,
    pub assignments: Arc<dyn AssignmentRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub threads: Arc<dyn ThreadRepository>,
    pub notes: Arc<dyn NoteRepository>,
    pub read_state: Arc<dyn ReadStateStore>,
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub notifier: Arc<dyn NotificationSender>,
    pub rewriter: Arc<dyn AnswerRewriter>,
    pub attachments: Arc<dyn AttachmentStorage>,
    pub event_publisher: Arc<dyn EventPublisher>,
    pub session_validator: Arc<dyn SessionValidator>,
    pub checkout_urls: CheckoutUrls,
}

impl AppState {
    // ─── Applicants ───────────────────────────────────────────────────────

    pub fn submit_application_handler(&self) -> SubmitApplicationHandler {
        SubmitApplicationHandler::new(self.applicants.clone(), self.event_publisher.clone())
    }

    pub fn resubmit_application_handler(&self) -> ResubmitApplicationHandler {
        ResubmitApplicationHandler::new(self.applicants.clone(), self.event_publisher.clone())
    }

    pub fn review_applicant_handler(&self) -> ReviewApplicantHandler {
        ReviewApplicantHandler::new(
            self.applicants.clone(),
            self.notifier.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn set_access_handler(&self) -> SetApplicantAccessHandler {
        SetApplicantAccessHandler::new(self.applicants.clone(), self.event_publisher.clone())
    }

    pub fn list_applicants_handler(&self) -> ListApplicantsHandler {
        ListApplicantsHandler::new(self.applicants.clone())
    }

    pub fn rewrite_answers_handler(&self) -> RewriteAnswersHandler {
        RewriteAnswersHandler::new(self.rewriter.clone())
    }

    // ─── Payments ─────────────────────────────────────────────────────────

    pub fn create_checkout_handler(&self) -> CreateCheckoutHandler {
        CreateCheckoutHandler::new(self.applicants.clone(), self.payment_provider.clone())
    }

    pub fn confirm_payment_handler(&self) -> ConfirmPaymentHandler {
        ConfirmPaymentHandler::new(
            self.applicants.clone(),
            self.payment_provider.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(
            self.applicants.clone(),
            self.payment_provider.clone(),
            self.event_publisher.clone(),
        )
    }

    // ─── Assignments ──────────────────────────────────────────────────────

    pub fn assign_mentor_handler(&self) -> AssignMentorHandler {
        AssignMentorHandler::new(
            self.applicants.clone(),
            self.assignments.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn list_assignments_handler(&self) -> ListAssignmentsHandler {
        ListAssignmentsHandler::new(self.assignments.clone())
    }

    // ─── Messaging ────────────────────────────────────────────────────────

    pub fn send_message_handler(&self) -> SendMessageHandler {
        SendMessageHandler::new(self.messages.clone())
    }

    pub fn list_messages_handler(&self) -> ListMessagesHandler {
        ListMessagesHandler::new(self.messages.clone(), self.read_state.clone())
    }

    pub fn mark_read_handler(&self) -> MarkReadHandler {
        MarkReadHandler::new(
            self.messages.clone(),
            self.threads.clone(),
            self.read_state.clone(),
        )
    }

    pub fn unread_count_handler(&self) -> UnreadCountHandler {
        UnreadCountHandler::new(
            self.messages.clone(),
            self.threads.clone(),
            self.read_state.clone(),
        )
    }

    pub fn start_thread_handler(&self) -> StartThreadHandler {
        StartThreadHandler::new(
            self.applicants.clone(),
            self.assignments.clone(),
            self.threads.clone(),
        )
    }

    pub fn append_thread_entry_handler(&self) -> AppendThreadEntryHandler {
        AppendThreadEntryHandler::new(self.threads.clone())
    }

    pub fn close_thread_handler(&self) -> CloseThreadHandler {
        CloseThreadHandler::new(self.threads.clone())
    }

    pub fn list_threads_handler(&self) -> ListThreadsHandler {
        ListThreadsHandler::new(self.threads.clone(), self.read_state.clone())
    }

    // ─── Notes ────────────────────────────────────────────────────────────

    pub fn add_note_handler(&self) -> AddNoteHandler {
        AddNoteHandler::new(
            self.applicants.clone(),
            self.assignments.clone(),
            self.notes.clone(),
        )
    }

    pub fn list_notes_handler(&self) -> ListNotesHandler {
        ListNotesHandler::new(
            self.applicants.clone(),
            self.assignments.clone(),
            self.notes.clone(),
        )
    }

    pub fn set_note_completion_handler(&self) -> SetNoteCompletionHandler {
        SetNoteCompletionHandler::new(
            self.applicants.clone(),
            self.assignments.clone(),
            self.notes.clone(),
        )
    }

    pub fn respond_to_note_handler(&self) -> RespondToNoteHandler {
        RespondToNoteHandler::new(
            self.applicants.clone(),
            self.assignments.clone(),
            self.notes.clone(),
            self.attachments.clone(),
        )
    }

    // ─── Dashboards ───────────────────────────────────────────────────────

    pub fn admin_dashboard_handler(&self) -> GetAdminDashboardHandler {
        GetAdminDashboardHandler::new(
            self.applicants.clone(),
            self.assignments.clone(),
            self.messages.clone(),
            self.threads.clone(),
            self.read_state.clone(),
        )
    }

    pub fn entrepreneur_dashboard_handler(&self) -> GetEntrepreneurDashboardHandler {
        GetEntrepreneurDashboardHandler::new(
            self.applicants.clone(),
            self.assignments.clone(),
            self.notes.clone(),
            self.messages.clone(),
            self.threads.clone(),
            self.read_state.clone(),
        )
    }
}
