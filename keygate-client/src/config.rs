//! Client construction configuration.

use crate::error::{ClientError, ClientResult};
use keygate_crypto::EncryptionScheme;
use std::time::Duration;

/// Default heartbeat interval between liveness calls.
pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

/// Configuration for a [`Client`](crate::Client).
///
/// Passed once at construction and never mutated afterwards; changing the
/// scheme or key means constructing a new client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the license server.
    pub server_url: String,
    /// Stable project identifier issued by the server.
    pub project_uuid: String,
    /// Key material for the payload cipher, in the scheme's accepted encoding.
    pub cipher_key: String,
    /// Payload encryption scheme. Defaults to AES-256-GCM.
    pub scheme: EncryptionScheme,
    /// Interval between automatic heartbeat calls.
    pub heartbeat_interval: Duration,
}

impl ClientConfig {
    /// Creates a configuration with the default scheme and heartbeat interval.
    pub fn new(
        server_url: impl Into<String>,
        project_uuid: impl Into<String>,
        cipher_key: impl Into<String>,
    ) -> Self {
        Self {
            server_url: server_url.into(),
            project_uuid: project_uuid.into(),
            cipher_key: cipher_key.into(),
            scheme: EncryptionScheme::default(),
            heartbeat_interval: DEFAULT_HEARTBEAT_INTERVAL,
        }
    }

    /// Selects the payload encryption scheme.
    #[must_use]
    pub fn with_scheme(mut self, scheme: EncryptionScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Overrides the automatic heartbeat interval.
    #[must_use]
    pub fn with_heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = interval;
        self
    }

    pub(crate) fn validate(&self) -> ClientResult<()> {
        if !self.server_url.starts_with("http://") && !self.server_url.starts_with("https://") {
            return Err(ClientError::configuration(format!(
                "server_url must be an http(s) endpoint, got {:?}",
                self.server_url
            )));
        }
        if self.project_uuid.trim().is_empty() {
            return Err(ClientError::configuration("project_uuid must not be empty"));
        }
        if self.cipher_key.is_empty() {
            return Err(ClientError::configuration("cipher_key must not be empty"));
        }
        if self.heartbeat_interval.is_zero() {
            return Err(ClientError::configuration(
                "heartbeat_interval must be greater than zero",
            ));
        }
        Ok(())
    }
}
