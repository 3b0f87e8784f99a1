//! StartThreadHandler - Open an entrepreneur/mentor conversation.

use std::sync::Arc;

use crate::domain::assignment::AssignmentIndex;
use crate::domain::foundation::{AuthenticatedUser, EmailAddress, Role};
use crate::domain::messaging::{AttachmentRef, EntryDraft, MessageThread, MessagingError};
use crate::ports::{ApplicantRepository, AssignmentRepository, ThreadRepository};

use super::access::ensure_messaging_unlocked;

#[derive(Debug, Clone)]
pub struct StartThreadCommand {
    pub actor: AuthenticatedUser,
    pub entrepreneur_email: EmailAddress,
    pub mentor_email: EmailAddress,
    pub subject: String,
    pub message: String,
    pub attachments: Vec<AttachmentRef>,
}

/// Opens a thread with its first entry.
///
/// The actor must be one of the two parties, the mentor must be the
/// entrepreneur's assigned mentor, and the entrepreneur's tier must
/// unlock mentor messaging.
pub struct StartThreadHandler {
    applicants: Arc<dyn ApplicantRepository>,
    assignments: Arc<dyn AssignmentRepository>,
    threads: Arc<dyn ThreadRepository>,
}

impl StartThreadHandler {
    pub fn new(
        applicants: Arc<dyn ApplicantRepository>,
        assignments: Arc<dyn AssignmentRepository>,
        threads: Arc<dyn ThreadRepository>,
    ) -> Self {
        Self {
            applicants,
            assignments,
            threads,
        }
    }

    pub async fn handle(&self, cmd: StartThreadCommand) -> Result<MessageThread, MessagingError> {
        // Permission first: no lookups for outsiders.
        if cmd.actor.email != cmd.entrepreneur_email && cmd.actor.email != cmd.mentor_email {
            return Err(MessagingError::permission(
                "only the entrepreneur or mentor may start this thread",
            ));
        }

        let draft = EntryDraft::new(cmd.actor.display_name_or_email(), cmd.message)
            .with_attachments(cmd.attachments);
        let intended = MessageThread::start(
            cmd.entrepreneur_email.clone(),
            cmd.mentor_email.clone(),
            cmd.subject,
            &cmd.actor.email,
            draft,
        )?;

        let (entrepreneur, mentor) = futures::try_join!(
            self.applicants
                .find_by_email(Role::Entrepreneur, &cmd.entrepreneur_email),
            self.applicants.find_by_email(Role::Mentor, &cmd.mentor_email),
        )?;
        let (entrepreneur, mentor) = match (entrepreneur, mentor) {
            (Some(e), Some(m)) => (e, m),
            _ => {
                return Err(MessagingError::permission(
                    "both parties must be registered applicants",
                ))
            }
        };
        let assignment = self.assignments.find_by_entrepreneur(&entrepreneur.id).await?;
        let index = AssignmentIndex::from_assignments(assignment);
        ensure_messaging_unlocked(&entrepreneur, &mentor, &index)?;

        let thread = self.threads.create(&intended).await?;
        tracing::info!(thread_id = %thread.id, "Thread started");
        Ok(thread)
    }
}
