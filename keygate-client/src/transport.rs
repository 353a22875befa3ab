//! Transport gateway abstraction.
//!
//! The client core never touches the network directly. It hands the gateway
//! an already-encrypted payload tagged with the operation kind and gets an
//! encrypted reply back; framing, TLS, timeouts and retries are entirely the
//! gateway's business.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Gateway-local outcome code: the server could not be reached.
pub const CODE_NETWORK: i32 = -2;

/// Gateway-local outcome code: the exchange violated the wire envelope.
pub const CODE_PROTOCOL: i32 = -3;

/// The operations the license service understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Login,
    Heartbeat,
    GetCloudVar,
    UpdateCustomData,
    GetProjectInfo,
    UnbindDevice,
}

impl Operation {
    /// Stable label used in logs and by gateway routing.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Heartbeat => "heartbeat",
            Self::GetCloudVar => "get-cloud-var",
            Self::UpdateCustomData => "update-custom-data",
            Self::GetProjectInfo => "get-project-info",
            Self::UnbindDevice => "unbind-device",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed exchange, as reported by the gateway.
///
/// `code` feeds the client's outcome classifier: HTTP-style codes pass
/// through verbatim, gateway-local conditions use the negative sentinels.
#[derive(Debug, Clone, Error)]
#[error("{message} (code {code})")]
pub struct GatewayError {
    pub code: i32,
    pub message: String,
}

impl GatewayError {
    /// The server could not be reached.
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            code: CODE_NETWORK,
            message: message.into(),
        }
    }

    /// The reply violated the wire envelope.
    pub fn bad_reply(message: impl Into<String>) -> Self {
        Self {
            code: CODE_PROTOCOL,
            message: message.into(),
        }
    }
}

/// An encrypted request/response channel to the license service.
///
/// Implementations must be safe for concurrent use: the foreground caller
/// and the heartbeat task may both be in `send` at the same time.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Performs one encrypted exchange and returns the reply ciphertext.
    async fn send(&self, op: Operation, ciphertext: &str) -> Result<String, GatewayError>;
}

/// A scripted in-memory gateway for tests.
pub mod mock {
    use super::*;
    use crate::models::ApiEnvelope;
    use keygate_crypto::Cipher;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays queued replies in FIFO order and records every request it
    /// sees, decrypted, so tests can assert on the exact payload shape.
    pub struct MockGateway {
        cipher: Cipher,
        replies: Mutex<VecDeque<Result<String, GatewayError>>>,
        requests: Mutex<Vec<(Operation, serde_json::Value)>>,
    }

    impl MockGateway {
        /// Creates a mock that shares the client's cipher so it can open
        /// requests and seal canned responses.
        pub fn new(cipher: Cipher) -> Self {
            Self {
                cipher,
                replies: Mutex::new(VecDeque::new()),
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Queues a successful envelope carrying `data`.
        pub fn enqueue_ok(&self, data: serde_json::Value) {
            self.enqueue_envelope(0, "ok", Some(data));
        }

        /// Queues a rejection envelope with the given outcome code.
        pub fn enqueue_rejection(&self, code: i32, message: &str) {
            self.enqueue_envelope(code, message, None);
        }

        /// Queues a transport-level failure.
        pub fn enqueue_failure(&self, code: i32, message: &str) {
            self.replies.lock().unwrap().push_back(Err(GatewayError {
                code,
                message: message.to_string(),
            }));
        }

        /// Queues a raw reply string, bypassing the cipher. Useful for
        /// simulating tampered or garbage ciphertext.
        pub fn enqueue_raw(&self, reply: &str) {
            self.replies
                .lock()
                .unwrap()
                .push_back(Ok(reply.to_string()));
        }

        fn enqueue_envelope(&self, code: i32, message: &str, data: Option<serde_json::Value>) {
            let envelope = ApiEnvelope {
                code,
                message: message.to_string(),
                data,
            };
            let plaintext = serde_json::to_string(&envelope).expect("envelope serializes");
            let sealed = self.cipher.encrypt(&plaintext).expect("mock cipher encrypts");
            self.replies.lock().unwrap().push_back(Ok(sealed));
        }

        /// Every request seen so far, decrypted and parsed.
        pub fn requests(&self) -> Vec<(Operation, serde_json::Value)> {
            self.requests.lock().unwrap().clone()
        }

        /// Number of exchanges performed.
        pub fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        /// The most recent request, if any.
        pub fn last_request(&self) -> Option<(Operation, serde_json::Value)> {
            self.requests.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl Gateway for MockGateway {
        async fn send(&self, op: Operation, ciphertext: &str) -> Result<String, GatewayError> {
            let plaintext = self
                .cipher
                .decrypt(ciphertext)
                .map_err(|e| GatewayError::bad_reply(format!("mock failed to open request: {e}")))?;
            let parsed = serde_json::from_str(&plaintext)
                .map_err(|e| GatewayError::bad_reply(format!("mock got non-JSON payload: {e}")))?;
            self.requests.lock().unwrap().push((op, parsed));

            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::network("no scripted reply")))
        }
    }
}
