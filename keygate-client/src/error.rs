//! Structured errors and outcome classification.
//!
//! Every public operation surfaces exactly one of these kinds. The
//! classifier is total over the numeric outcome space: recognized codes map
//! to their kind, everything else lands in `Unknown` instead of failing the
//! classifier itself.

use crate::transport::{CODE_NETWORK, CODE_PROTOCOL};
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced by client operations, one variant per outcome kind.
///
/// Callers branch on the variant; the embedded `code` preserves the raw
/// numeric outcome for diagnostics.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// Bad scheme identifier, malformed endpoint, unusable key. Fails fast
    /// at construction and is never retried.
    #[error("invalid configuration: {message}")]
    Configuration { message: String },

    /// Invalid or expired token, frozen or unbound card. Terminal for the
    /// current session; the heartbeat supervisor stops itself on this kind.
    #[error("authentication failed: {message} (code {code})")]
    Authentication { message: String, code: i32 },

    /// Encode/decode failure or a malformed envelope on either side.
    #[error("protocol error: {message} (code {code})")]
    Protocol { message: String, code: i32 },

    /// The project has the requested operation switched off.
    #[error("feature disabled: {message} (code {code})")]
    FeatureDisabled { message: String, code: i32 },

    /// The operation is rate-limited by a server-side cooldown.
    #[error("cooldown active: {message} (code {code})")]
    CooldownActive { message: String, code: i32 },

    /// The requested resource or device binding does not exist.
    #[error("not found: {message} (code {code})")]
    NotFound { message: String, code: i32 },

    /// Network or server-side hiccup; safe to retry.
    #[error("transient failure: {message} (code {code})")]
    Transient { message: String, code: i32 },

    /// Fallback for outcome codes the classifier does not recognize.
    #[error("unrecognized outcome: {message} (code {code})")]
    Unknown { message: String, code: i32 },
}

impl ClientError {
    /// Builds a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Builds a protocol error for a local codec failure.
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
            code: CODE_PROTOCOL,
        }
    }

    /// Classifies a numeric outcome code plus message into an error kind.
    ///
    /// Total: unrecognized codes become [`ClientError::Unknown`].
    pub fn classify(code: i32, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            400 => Self::Protocol { message, code },
            401 => Self::Authentication { message, code },
            403 => Self::FeatureDisabled { message, code },
            404 => Self::NotFound { message, code },
            429 => Self::CooldownActive { message, code },
            500 | 502 | 503 | 504 => Self::Transient { message, code },
            CODE_NETWORK => Self::Transient { message, code },
            CODE_PROTOCOL => Self::Protocol { message, code },
            _ => Self::Unknown { message, code },
        }
    }

    /// The raw numeric outcome code, or 0 for local configuration errors.
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Self::Configuration { .. } => 0,
            Self::Authentication { code, .. }
            | Self::Protocol { code, .. }
            | Self::FeatureDisabled { code, .. }
            | Self::CooldownActive { code, .. }
            | Self::NotFound { code, .. }
            | Self::Transient { code, .. }
            | Self::Unknown { code, .. } => *code,
        }
    }

    /// True when the session is unrecoverable without a fresh login.
    #[must_use]
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// True when retrying the same operation later may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }
}

impl From<crate::transport::GatewayError> for ClientError {
    fn from(err: crate::transport::GatewayError) -> Self {
        Self::classify(err.code, err.message)
    }
}
