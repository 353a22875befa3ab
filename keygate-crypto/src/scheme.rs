//! Encryption scheme identifiers and metadata.
//!
//! A scheme is selected once, at client construction. Switching schemes
//! means constructing a new client; an existing cipher never changes its
//! scheme mid-session.

use crate::error::CryptoError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The supported symmetric encryption schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EncryptionScheme {
    /// AES-256 in GCM mode (authenticated). The default.
    #[serde(rename = "aes-256-gcm")]
    Aes256Gcm,
    /// ChaCha20-Poly1305 (authenticated).
    #[serde(rename = "chacha20-poly1305")]
    ChaCha20Poly1305,
    /// RC4 stream cipher. Deprecated, kept for legacy deployments.
    Rc4,
    /// Repeating-key XOR. Deprecated, kept for legacy deployments.
    Xor,
    /// Base64 with a shuffled 64-character alphabet. Obfuscation only.
    CustomBase64,
}

/// How much protection a scheme actually provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityLevel {
    /// Authenticated encryption with a modern cipher.
    Secure,
    /// Confidentiality without integrity.
    Weak,
    /// Obfuscation only.
    Insecure,
}

impl EncryptionScheme {
    /// Every supported scheme, in registry order.
    pub const ALL: [EncryptionScheme; 5] = [
        EncryptionScheme::Aes256Gcm,
        EncryptionScheme::ChaCha20Poly1305,
        EncryptionScheme::Rc4,
        EncryptionScheme::Xor,
        EncryptionScheme::CustomBase64,
    ];

    /// The stable identifier used in configuration and on the wire.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aes256Gcm => "aes-256-gcm",
            Self::ChaCha20Poly1305 => "chacha20-poly1305",
            Self::Rc4 => "rc4",
            Self::Xor => "xor",
            Self::CustomBase64 => "custom-base64",
        }
    }

    /// The protection level this scheme provides.
    #[must_use]
    pub fn security_level(&self) -> SecurityLevel {
        match self {
            Self::Aes256Gcm | Self::ChaCha20Poly1305 => SecurityLevel::Secure,
            Self::Rc4 => SecurityLevel::Weak,
            Self::Xor | Self::CustomBase64 => SecurityLevel::Insecure,
        }
    }

    /// Returns true for schemes kept only for legacy deployments.
    #[must_use]
    pub fn is_deprecated(&self) -> bool {
        matches!(self, Self::Rc4 | Self::Xor)
    }
}

impl Default for EncryptionScheme {
    fn default() -> Self {
        Self::Aes256Gcm
    }
}

impl fmt::Display for EncryptionScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncryptionScheme {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aes-256-gcm" => Ok(Self::Aes256Gcm),
            "chacha20-poly1305" => Ok(Self::ChaCha20Poly1305),
            "rc4" => Ok(Self::Rc4),
            "xor" => Ok(Self::Xor),
            "custom-base64" => Ok(Self::CustomBase64),
            other => Err(CryptoError::UnsupportedScheme(other.to_string())),
        }
    }
}
