//! Error types for the encryption layer.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur in cryptographic operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The scheme identifier is not part of the supported set.
    #[error("unsupported encryption scheme: {0}")]
    UnsupportedScheme(String),

    /// Key material could not be used with the selected scheme.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Invalid key length after decoding.
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// Encryption failed.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Decryption failed (wrong key or tampered data).
    #[error("decryption failed: {0}")]
    Decryption(String),
}
