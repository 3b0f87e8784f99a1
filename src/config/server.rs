//! HTTP server settings.

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use super::error::{is_http_url, ValidationError};

/// Deployment stage. Production tightens CORS, auth and log output.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,

    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_level: String,

    /// JSON log lines; defaults to on in production only.
    pub log_json: Option<bool>,

    /// Per-request timeout, 1..=300 seconds.
    pub request_timeout_secs: u64,

    /// Comma-separated browser origins allowed to call the API.
    /// Empty means any origin, which production refuses.
    pub cors_origins: Option<String>,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ValidationError::InvalidBindAddress)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn wants_json_logs(&self) -> bool {
        self.log_json.unwrap_or_else(|| self.is_production())
    }

    /// Configured origins with blanks dropped.
    pub fn cors_origins_list(&self) -> Vec<String> {
        self.cors_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=300).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        self.socket_addr()?;

        let origins = self.cors_origins_list();
        if let Some(bad) = origins.iter().find(|o| !is_http_url(o)) {
            return Err(ValidationError::InvalidCorsOrigin(bad.clone()));
        }
        if origins.is_empty() && self.is_production() {
            return Err(ValidationError::MissingRequired("SERVER__CORS_ORIGINS"));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::Development,
            log_level: "info,mentorhub=debug,sqlx=warn,tower_http=info".to_string(),
            log_json: None,
            request_timeout_secs: 30,
            cors_origins: None,
        }
    }
}
