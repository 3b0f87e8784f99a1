//! File storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::{is_http_url, ValidationError};

/// Where attachments and file-backed read state live.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory for uploaded note-response attachments
    #[serde(default = "default_attachments_dir")]
    pub attachments_dir: PathBuf,

    /// Public URL prefix the attachments directory is served under
    #[serde(default = "default_attachments_public_url")]
    pub attachments_public_url: String,

    /// Directory for per-user read-state YAML files.
    /// Ignored when a database is configured.
    #[serde(default)]
    pub read_state_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_http_url(&self.attachments_public_url) {
            return Err(ValidationError::InvalidPublicUrl);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            attachments_dir: default_attachments_dir(),
            attachments_public_url: default_attachments_public_url(),
            read_state_dir: None,
        }
    }
}

fn default_attachments_dir() -> PathBuf {
    PathBuf::from("data/attachments")
}

fn default_attachments_public_url() -> String {
    "http://localhost:8080/files".to_string()
}
