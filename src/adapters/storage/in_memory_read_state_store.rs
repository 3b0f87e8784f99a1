//! In-memory read-state store for tests and local development.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::messaging::{ReadState, ViewerKey};
use crate::ports::{ReadStateError, ReadStateStore};

#[derive(Debug, Default)]
pub struct InMemoryReadStateStore {
    states: RwLock<HashMap<ViewerKey, ReadState>>,
}

impl InMemoryReadStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn viewer_count(&self) -> usize {
        self.states.read().await.len()
    }
}

#[async_trait]
impl ReadStateStore for InMemoryReadStateStore {
    async fn load(&self, viewer: &ViewerKey) -> Result<ReadState, ReadStateError> {
        Ok(self
            .states
            .read()
            .await
            .get(viewer)
            .cloned()
            .unwrap_or_default())
    }

    async fn save(&self, viewer: &ViewerKey, state: &ReadState) -> Result<(), ReadStateError> {
        self.states
            .write()
            .await
            .insert(viewer.clone(), state.clone());
        Ok(())
    }
}
