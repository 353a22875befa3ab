//! Card-key session client for the KeyGate license service.
//!
//! Authenticates a card key bound to a device identifier, keeps the session
//! alive with a background heartbeat task, and exposes the auxiliary
//! operations (cloud variables, custom data, device unbinding, project
//! metadata) over an encrypted channel.
//!
//! # Architecture
//!
//! - **[`Client`]**: the facade callers interact with. Owns the cipher, the
//!   session slot and the heartbeat supervisor.
//! - **[`Gateway`]**: the transport boundary. The core hands it encrypted
//!   payloads tagged with an [`Operation`]; framing, TLS and timeouts live
//!   behind it. A scripted [`transport::mock::MockGateway`] ships for tests,
//!   and the `http` feature adds a `reqwest`-backed implementation.
//! - **[`ClientError`]**: one variant per outcome kind. Transient failures
//!   are retryable; authentication loss is terminal for the session and
//!   stops the heartbeat task.
//!
//! # Example
//!
//! ```no_run
//! use keygate_client::{Client, ClientConfig, EncryptionScheme};
//! use keygate_client::transport::mock::MockGateway;
//! use keygate_client::Cipher;
//! use std::sync::Arc;
//!
//! # async fn run() -> keygate_client::ClientResult<()> {
//! let config = ClientConfig::new("https://license.example.com", "project-uuid", "k1")
//!     .with_scheme(EncryptionScheme::Xor);
//! let cipher = Cipher::new(config.scheme, &config.cipher_key).unwrap();
//! let client = Client::new(config, Arc::new(MockGateway::new(cipher)))?;
//!
//! let outcome = client.login("ABC-123", Some("device-1"), None).await?;
//! println!("expires {}", outcome.expire_at);
//!
//! client.start_heartbeat(Some(Arc::new(|err: &keygate_client::ClientError| {
//!     eprintln!("heartbeat error: {err}");
//! })))?;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod heartbeat;
mod models;
mod session;
pub mod transport;

#[cfg(feature = "http")]
mod http;

pub use client::Client;
pub use config::{ClientConfig, DEFAULT_HEARTBEAT_INTERVAL};
pub use error::{ClientError, ClientResult};
pub use heartbeat::HeartbeatCallback;
pub use models::{ApiEnvelope, CardRecord, CardStatus, CloudVariable, LoginOutcome, ProjectInfo};
pub use transport::{Gateway, GatewayError, Operation, CODE_NETWORK, CODE_PROTOCOL};

#[cfg(feature = "http")]
pub use http::HttpGateway;

// Re-exported so callers configure the cipher without importing the crypto
// crate directly.
pub use keygate_crypto::{Cipher, CryptoError, EncryptionScheme, SecurityLevel};
