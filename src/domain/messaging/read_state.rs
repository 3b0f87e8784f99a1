//! Per-viewer read state and unread counting.
//!
//! Read state is keyed by (role, email): the same person viewing as admin
//! and as mentor has independent badges. Counting is pure and idempotent.

use crate::domain::foundation::{ActorRole, AuthenticatedUser, EmailAddress, MessageId, ThreadId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::{Message, MessageThread};

/// Whose read state this is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ViewerKey {
    pub role: ActorRole,
    pub email: EmailAddress,
}

impl ViewerKey {
    pub fn new(role: ActorRole, email: EmailAddress) -> Self {
        Self { role, email }
    }
}

impl From<&AuthenticatedUser> for ViewerKey {
    fn from(user: &AuthenticatedUser) -> Self {
        Self::new(user.role, user.email.clone())
    }
}

impl fmt::Display for ViewerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.role, self.email)
    }
}

/// Read-id set for one-shot messages plus per-thread watermarks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadState {
    #[serde(default)]
    pub read_message_ids: BTreeSet<MessageId>,
    /// Number of entries the viewer had seen in each thread.
    #[serde(default)]
    pub thread_seen: BTreeMap<ThreadId, usize>,
}

impl ReadState {
    pub fn is_read(&self, id: &MessageId) -> bool {
        self.read_message_ids.contains(id)
    }

    pub fn last_seen(&self, thread_id: &ThreadId) -> usize {
        self.thread_seen.get(thread_id).copied().unwrap_or(0)
    }

    /// Marks messages read. Returns how many were newly marked.
    pub fn mark_messages_read(&mut self, ids: impl IntoIterator<Item = MessageId>) -> usize {
        ids.into_iter()
            .filter(|id| self.read_message_ids.insert(*id))
            .count()
    }

    /// Marks every message addressed to the viewer read.
    pub fn mark_inbox_read(&mut self, messages: &[Message], viewer: &ViewerKey) -> usize {
        self.mark_messages_read(
            messages
                .iter()
                .filter(|m| m.is_addressed_to(&viewer.email))
                .map(|m| m.id),
        )
    }

    /// Advances the thread watermark to its current length. Never moves back.
    pub fn mark_thread_seen(&mut self, thread: &MessageThread) {
        let seen = self.thread_seen.entry(thread.id).or_insert(0);
        if thread.entries.len() > *seen {
            *seen = thread.entries.len();
        }
    }
}

/// Unread badge breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadCount {
    pub legacy: usize,
    pub threaded: usize,
}

impl UnreadCount {
    pub fn total(&self) -> usize {
        self.legacy + self.threaded
    }
}

/// Messages addressed to the viewer that are not in its read set.
pub fn legacy_unread(messages: &[Message], viewer: &ViewerKey, state: &ReadState) -> usize {
    messages
        .iter()
        .filter(|m| m.is_addressed_to(&viewer.email) && !state.is_read(&m.id))
        .count()
}

/// A thread is unread when it grew past the viewer's watermark and the
/// newest entry came from the other side.
pub fn thread_is_unread(thread: &MessageThread, viewer: &ViewerKey, state: &ReadState) -> bool {
    if !thread.involves(&viewer.email) {
        return false;
    }
    match thread.last_entry() {
        Some(last) => {
            thread.entries.len() > state.last_seen(&thread.id)
                && last.sender_role.as_actor_role() != viewer.role
        }
        None => false,
    }
}

pub fn count_unread(
    messages: &[Message],
    threads: &[MessageThread],
    viewer: &ViewerKey,
    state: &ReadState,
) -> UnreadCount {
    UnreadCount {
        legacy: legacy_unread(messages, viewer, state),
        threaded: threads
            .iter()
            .filter(|t| thread_is_unread(t, viewer, state))
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::messaging::{EntryDraft, Participant};

    fn email(s: &str) -> EmailAddress {
        EmailAddress::new(s).unwrap()
    }

    fn admin_to(to: &str, text: &str) -> Message {
        Message::compose(
            Participant::new(email("admin@x.io"), "Admin"),
            Participant::new(email(to), "Someone"),
            text,
        )
        .unwrap()
    }

    fn thread() -> MessageThread {
        MessageThread::start(
            email("e@x.io"),
            email("m@x.io"),
            "Go to market",
            &email("e@x.io"),
            EntryDraft::new("Erin", "Where do I start?"),
        )
        .unwrap()
    }

    fn entrepreneur() -> ViewerKey {
        ViewerKey::new(ActorRole::Entrepreneur, email("e@x.io"))
    }

    fn mentor() -> ViewerKey {
        ViewerKey::new(ActorRole::Mentor, email("m@x.io"))
    }

    #[test]
    fn legacy_unread_counts_only_unread_addressed_messages() {
        let messages = vec![
            admin_to("e@x.io", "one"),
            admin_to("e@x.io", "two"),
            admin_to("other@x.io", "three"),
        ];
        let mut state = ReadState::default();
        assert_eq!(legacy_unread(&messages, &entrepreneur(), &state), 2);

        state.mark_messages_read([messages[0].id]);
        assert_eq!(legacy_unread(&messages, &entrepreneur(), &state), 1);
    }

    #[test]
    fn marking_inbox_read_drops_badge_by_exactly_the_unread_count() {
        let messages: Vec<_> = (0..3).map(|i| admin_to("e@x.io", &format!("m{}", i))).collect();
        let threads = vec![thread()];
        let mut state = ReadState::default();

        let before = count_unread(&messages, &threads, &mentor(), &state);
        let before_e = count_unread(&messages, &threads, &entrepreneur(), &state);
        assert_eq!(before_e.legacy, 3);

        assert_eq!(state.mark_inbox_read(&messages, &entrepreneur()), 3);
        let after_e = count_unread(&messages, &threads, &entrepreneur(), &state);
        assert_eq!(before_e.total() - after_e.total(), 3);
        assert_eq!(count_unread(&messages, &threads, &mentor(), &state), before);
    }

    #[test]
    fn thread_unread_only_when_other_side_wrote_last() {
        let mut t = thread();
        let state = ReadState::default();
        assert!(thread_is_unread(&t, &mentor(), &state));
        assert!(!thread_is_unread(&t, &entrepreneur(), &state));

        t.append(&email("m@x.io"), EntryDraft::new("Max", "Talk to ten customers"))
            .unwrap();
        assert!(thread_is_unread(&t, &entrepreneur(), &state));
        assert!(!thread_is_unread(&t, &mentor(), &state));
    }

    #[test]
    fn watermark_clears_thread_until_it_grows() {
        let mut t = thread();
        let mut state = ReadState::default();
        state.mark_thread_seen(&t);
        assert!(!thread_is_unread(&t, &mentor(), &state));

        t.append(&email("e@x.io"), EntryDraft::new("Erin", "Also, hiring?"))
            .unwrap();
        assert!(thread_is_unread(&t, &mentor(), &state));
    }

    #[test]
    fn watermark_never_moves_back() {
        let t = thread();
        let mut state = ReadState::default();
        state.thread_seen.insert(t.id, 5);
        state.mark_thread_seen(&t);
        assert_eq!(state.last_seen(&t.id), 5);
    }

    #[test]
    fn outsiders_never_see_thread_unread() {
        let outsider = ViewerKey::new(ActorRole::Mentor, email("other@x.io"));
        assert!(!thread_is_unread(&thread(), &outsider, &ReadState::default()));
    }

    #[test]
    fn counting_is_idempotent() {
        let messages = vec![admin_to("e@x.io", "hi")];
        let threads = vec![thread()];
        let state = ReadState::default();
        let first = count_unread(&messages, &threads, &entrepreneur(), &state);
        let second = count_unread(&messages, &threads, &entrepreneur(), &state);
        assert_eq!(first, second);
    }

    #[test]
    fn read_state_round_trips_through_yaml() {
        let mut state = ReadState::default();
        state.mark_messages_read([MessageId::new(), MessageId::new()]);
        state.thread_seen.insert(ThreadId::new(), 4);

        let yaml = serde_yaml::to_string(&state).unwrap();
        let back: ReadState = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, state);
    }
}
