//! The client facade.
//!
//! The only component callers interact with directly. Owns the cipher, the
//! gateway handle, the session slot and the heartbeat supervisor; every
//! operation is one encrypted request/response returning a classified
//! result.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::heartbeat::{HeartbeatCallback, HeartbeatSupervisor};
use crate::models::{ApiEnvelope, CloudVariable, LoginOutcome, ProjectInfo};
use crate::session::{Session, SessionSlot};
use crate::transport::{Gateway, Operation};
use chrono::{DateTime, Utc};
use keygate_crypto::{Cipher, EncryptionScheme};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Serialize)]
struct LoginRequest<'a> {
    project_uuid: &'a str,
    card_key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    hwid: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ip: Option<&'a str>,
}

#[derive(Serialize)]
struct HeartbeatRequest<'a> {
    token: &'a str,
}

#[derive(Serialize)]
struct CloudVarRequest<'a> {
    token: &'a str,
    key: &'a str,
}

#[derive(Serialize)]
struct CustomDataRequest<'a> {
    token: &'a str,
    custom_data: &'a str,
}

#[derive(Serialize)]
struct ProjectInfoRequest<'a> {
    project_uuid: &'a str,
}

#[derive(Serialize)]
struct UnbindRequest<'a> {
    project_uuid: &'a str,
    card_key: &'a str,
    hwid: &'a str,
}

/// A card-key session client.
///
/// Move-only owned handle: acquiring a client acquires its heartbeat
/// supervisor, and dropping it stops the supervisor without blocking on
/// in-flight network I/O.
pub struct Client {
    core: Arc<ClientCore>,
    heartbeat: HeartbeatSupervisor,
    heartbeat_interval: Duration,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("server_url", &self.core.server_url)
            .field("project_uuid", &self.core.project_uuid)
            .field("scheme", &self.core.cipher.scheme())
            .field("heartbeat_interval", &self.heartbeat_interval)
            .finish()
    }
}

impl Client {
    /// Builds a client from configuration and a transport gateway.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a malformed endpoint or unusable
    /// key material; no partially-constructed client is ever returned.
    pub fn new(config: ClientConfig, gateway: Arc<dyn Gateway>) -> ClientResult<Self> {
        config.validate()?;

        let cipher = Cipher::new(config.scheme, &config.cipher_key)
            .map_err(|e| ClientError::configuration(e.to_string()))?;
        if config.scheme.is_deprecated() {
            warn!(scheme = %config.scheme, "configured with a deprecated encryption scheme");
        }

        Ok(Self {
            core: Arc::new(ClientCore {
                server_url: config.server_url.trim_end_matches('/').to_string(),
                project_uuid: config.project_uuid,
                cipher,
                gateway,
                session: SessionSlot::new(),
            }),
            heartbeat: HeartbeatSupervisor::new(),
            heartbeat_interval: config.heartbeat_interval,
        })
    }

    /// Authenticates a card key, optionally binding a device id and IP.
    ///
    /// `hwid`/`ip` given as `None` are omitted from the request entirely;
    /// the server treats a missing field and an empty string differently.
    /// On success the session token is installed on this handle; on failure
    /// the handle stays unauthenticated and login may simply be retried.
    pub async fn login(
        &self,
        card_key: &str,
        hwid: Option<&str>,
        ip: Option<&str>,
    ) -> ClientResult<LoginOutcome> {
        self.core.login(card_key, hwid, ip).await
    }

    /// Renews server-side liveness for the current session.
    pub async fn heartbeat(&self) -> ClientResult<()> {
        self.core.heartbeat().await
    }

    /// Looks up a project-scoped remote variable.
    pub async fn cloud_var(&self, key: &str) -> ClientResult<String> {
        self.core.cloud_var(key).await
    }

    /// Overwrites the custom payload stored on the authenticated card.
    /// Last write wins; there is no optimistic concurrency.
    pub async fn update_custom_data(&self, data: &str) -> ClientResult<()> {
        self.core.update_custom_data(data).await
    }

    /// Fetches project metadata. Needs only the project identifier and the
    /// cipher, so it works before login.
    pub async fn project_info(&self) -> ClientResult<ProjectInfo> {
        self.core.project_info().await
    }

    /// Releases a device binding from a card.
    pub async fn unbind_hwid(&self, card_key: &str, hwid: &str) -> ClientResult<()> {
        self.core.unbind_hwid(card_key, hwid).await
    }

    /// Starts the automatic heartbeat task at the configured interval.
    ///
    /// Fails if a task is already running. Every failure is routed to
    /// `on_error`; the task stops itself when authentication is lost and
    /// keeps retrying on anything else.
    pub fn start_heartbeat(&self, on_error: Option<HeartbeatCallback>) -> ClientResult<()> {
        self.heartbeat
            .start(self.core.clone(), self.heartbeat_interval, on_error)
    }

    /// Stops the automatic heartbeat task, if running. Idempotent and
    /// non-blocking.
    pub fn stop_heartbeat(&self) {
        self.heartbeat.stop();
    }

    /// Advisory snapshot of whether the heartbeat task is running.
    #[must_use]
    pub fn is_heartbeat_running(&self) -> bool {
        self.heartbeat.is_running()
    }

    /// Whether a login has succeeded and not been invalidated since.
    pub async fn is_authenticated(&self) -> bool {
        self.core.session.is_authenticated().await
    }

    /// The current session token, if authenticated.
    pub async fn session_token(&self) -> Option<String> {
        self.core.session.token().await
    }

    /// When the current session expires, if authenticated.
    pub async fn session_expires_at(&self) -> Option<DateTime<Utc>> {
        self.core.session.expires_at().await
    }

    /// The configured project identifier.
    #[must_use]
    pub fn project_uuid(&self) -> &str {
        &self.core.project_uuid
    }

    /// The configured server endpoint.
    #[must_use]
    pub fn server_url(&self) -> &str {
        &self.core.server_url
    }

    /// The payload encryption scheme this client was built with.
    #[must_use]
    pub fn scheme(&self) -> EncryptionScheme {
        self.core.cipher.scheme()
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        // Bounded teardown: signal the task and let it die at its next wake
        // point rather than joining it here.
        self.heartbeat.stop();
    }
}

/// Shared state behind the facade; the heartbeat task holds a second
/// reference so the client handle can be dropped while a cycle finishes.
pub(crate) struct ClientCore {
    pub(crate) server_url: String,
    pub(crate) project_uuid: String,
    pub(crate) cipher: Cipher,
    pub(crate) gateway: Arc<dyn Gateway>,
    pub(crate) session: SessionSlot,
}

impl ClientCore {
    pub(crate) async fn login(
        &self,
        card_key: &str,
        hwid: Option<&str>,
        ip: Option<&str>,
    ) -> ClientResult<LoginOutcome> {
        let request = LoginRequest {
            project_uuid: &self.project_uuid,
            card_key,
            hwid,
            ip,
        };
        let outcome: LoginOutcome = self.call(Operation::Login, &request).await?;

        self.session
            .set(Session {
                token: outcome.token.clone(),
                expires_at: outcome.expire_at,
            })
            .await;
        info!(card_id = outcome.card.id, "login ok");
        Ok(outcome)
    }

    pub(crate) async fn heartbeat(&self) -> ClientResult<()> {
        let token = self.require_token().await?;
        self.call_unit(Operation::Heartbeat, &HeartbeatRequest { token: &token })
            .await
    }

    pub(crate) async fn cloud_var(&self, key: &str) -> ClientResult<String> {
        let token = self.require_token().await?;
        let variable: CloudVariable = self
            .call(Operation::GetCloudVar, &CloudVarRequest { token: &token, key })
            .await?;
        Ok(variable.value)
    }

    pub(crate) async fn update_custom_data(&self, data: &str) -> ClientResult<()> {
        let token = self.require_token().await?;
        self.call_unit(
            Operation::UpdateCustomData,
            &CustomDataRequest {
                token: &token,
                custom_data: data,
            },
        )
        .await
    }

    pub(crate) async fn project_info(&self) -> ClientResult<ProjectInfo> {
        self.call(
            Operation::GetProjectInfo,
            &ProjectInfoRequest {
                project_uuid: &self.project_uuid,
            },
        )
        .await
    }

    pub(crate) async fn unbind_hwid(&self, card_key: &str, hwid: &str) -> ClientResult<()> {
        self.call_unit(
            Operation::UnbindDevice,
            &UnbindRequest {
                project_uuid: &self.project_uuid,
                card_key,
                hwid,
            },
        )
        .await
    }

    async fn require_token(&self) -> ClientResult<String> {
        self.session
            .token()
            .await
            .ok_or_else(|| ClientError::Authentication {
                message: "no active session, login first".to_string(),
                code: 401,
            })
    }

    /// One encrypted exchange: serialize, seal, send, open, parse.
    async fn exchange<T: DeserializeOwned>(
        &self,
        op: Operation,
        request: &impl Serialize,
    ) -> ClientResult<ApiEnvelope<T>> {
        let plaintext = serde_json::to_string(request)
            .map_err(|e| ClientError::protocol(format!("failed to encode request: {e}")))?;
        let ciphertext = self
            .cipher
            .encrypt(&plaintext)
            .map_err(|e| ClientError::protocol(format!("failed to seal request: {e}")))?;

        debug!(op = %op, "sending encrypted request");
        let reply = match self.gateway.send(op, &ciphertext).await {
            Ok(reply) => reply,
            Err(e) => return Err(self.reject(op, e.code, e.message).await),
        };

        let opened = self
            .cipher
            .decrypt(&reply)
            .map_err(|e| ClientError::protocol(format!("failed to open response: {e}")))?;
        serde_json::from_str(&opened)
            .map_err(|e| ClientError::protocol(format!("malformed response envelope: {e}")))
    }

    async fn call<T: DeserializeOwned>(
        &self,
        op: Operation,
        request: &impl Serialize,
    ) -> ClientResult<T> {
        let envelope: ApiEnvelope<T> = self.exchange(op, request).await?;
        if envelope.code != 0 {
            return Err(self.reject(op, envelope.code, envelope.message).await);
        }
        envelope
            .data
            .ok_or_else(|| ClientError::protocol("response envelope missing data"))
    }

    async fn call_unit(&self, op: Operation, request: &impl Serialize) -> ClientResult<()> {
        let envelope: ApiEnvelope<serde_json::Value> = self.exchange(op, request).await?;
        if envelope.code != 0 {
            return Err(self.reject(op, envelope.code, envelope.message).await);
        }
        Ok(())
    }

    /// Classifies a rejection and invalidates the session on auth loss.
    async fn reject(&self, op: Operation, code: i32, message: String) -> ClientError {
        let err = ClientError::classify(code, message);
        warn!(op = %op, code, "operation rejected: {err}");
        if err.is_authentication() {
            self.session.clear().await;
        }
        err
    }
}
