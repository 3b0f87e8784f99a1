//! File-based read-state store.
//!
//! Stores each viewer's read-id set and thread watermarks as YAML under
//! `{base}/{role}/{hex(email)}.yaml`. Emails are hex-encoded so any address
//! maps to a safe, collision-free file name.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::messaging::{ReadState, ViewerKey};
use crate::ports::{ReadStateError, ReadStateStore};

#[derive(Debug, Clone)]
pub struct FileReadStateStore {
    base_path: PathBuf,
}

impl FileReadStateStore {
    /// # Example
    /// ```ignore
    /// let store = FileReadStateStore::new("./data/read-state");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn role_dir(&self, viewer: &ViewerKey) -> PathBuf {
        self.base_path.join(viewer.role.as_str())
    }

    fn state_file_path(&self, viewer: &ViewerKey) -> PathBuf {
        self.role_dir(viewer)
            .join(format!("{}.yaml", hex::encode(viewer.email.as_str())))
    }
}

#[async_trait]
impl ReadStateStore for FileReadStateStore {
    async fn load(&self, viewer: &ViewerKey) -> Result<ReadState, ReadStateError> {
        let file_path = self.state_file_path(viewer);

        let yaml = match fs::read_to_string(&file_path).await {
            Ok(yaml) => yaml,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(ReadState::default()),
            Err(e) => return Err(ReadStateError::IoError(e.to_string())),
        };

        serde_yaml::from_str(&yaml)
            .map_err(|e| ReadStateError::DeserializationFailed(e.to_string()))
    }

    async fn save(&self, viewer: &ViewerKey, state: &ReadState) -> Result<(), ReadStateError> {
        fs::create_dir_all(self.role_dir(viewer))
            .await
            .map_err(|e| ReadStateError::IoError(e.to_string()))?;

        let yaml = serde_yaml::to_string(state)
            .map_err(|e| ReadStateError::SerializationFailed(e.to_string()))?;

        // Write then rename so a crash never leaves a half-written file.
        let file_path = self.state_file_path(viewer);
        let tmp_path = file_path.with_extension("yaml.tmp");
        fs::write(&tmp_path, yaml)
            .await
            .map_err(|e| ReadStateError::IoError(e.to_string()))?;
        fs::rename(&tmp_path, &file_path)
            .await
            .map_err(|e| ReadStateError::IoError(e.to_string()))?;

        tracing::debug!(viewer = %viewer, path = %file_path.display(), "Read state saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ActorRole, EmailAddress, MessageId, ThreadId};
    use tempfile::TempDir;

    fn viewer(role: ActorRole) -> ViewerKey {
        ViewerKey::new(role, EmailAddress::new("e1@example.com").unwrap())
    }

    fn state_with_reads(n: usize) -> ReadState {
        let mut state = ReadState::default();
        state.mark_messages_read((0..n).map(|_| MessageId::new()));
        state.thread_seen.insert(ThreadId::new(), 4);
        state
    }

    #[tokio::test]
    async fn missing_file_loads_default() {
        let dir = TempDir::new().unwrap();
        let store = FileReadStateStore::new(dir.path());

        let state = store.load(&viewer(ActorRole::Entrepreneur)).await.unwrap();

        assert_eq!(state, ReadState::default());
    }

    #[tokio::test]
    async fn saved_state_survives_a_new_store() {
        let dir = TempDir::new().unwrap();
        let key = viewer(ActorRole::Entrepreneur);
        let state = state_with_reads(3);

        FileReadStateStore::new(dir.path()).save(&key, &state).await.unwrap();
        let reloaded = FileReadStateStore::new(dir.path()).load(&key).await.unwrap();

        assert_eq!(reloaded, state);
    }

    #[tokio::test]
    async fn roles_are_stored_independently() {
        let dir = TempDir::new().unwrap();
        let store = FileReadStateStore::new(dir.path());

        store
            .save(&viewer(ActorRole::Mentor), &state_with_reads(2))
            .await
            .unwrap();

        let as_admin = store.load(&viewer(ActorRole::Admin)).await.unwrap();
        assert!(as_admin.read_message_ids.is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_is_a_deserialization_error() {
        let dir = TempDir::new().unwrap();
        let store = FileReadStateStore::new(dir.path());
        let key = viewer(ActorRole::Entrepreneur);
        fs::create_dir_all(store.role_dir(&key)).await.unwrap();
        fs::write(store.state_file_path(&key), "read_message_ids: [not, a, uuid")
            .await
            .unwrap();

        let err = store.load(&key).await.unwrap_err();

        assert!(matches!(err, ReadStateError::DeserializationFailed(_)));
    }
}
