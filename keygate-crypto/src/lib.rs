//! Pluggable payload encryption for KeyGate.
//!
//! Every request and response the client exchanges with the license service
//! travels through one symmetric cipher, selected by a scheme identifier at
//! construction time and fixed for the life of the session.
//!
//! # Supported schemes
//!
//! - `aes-256-gcm` (default) and `chacha20-poly1305`: authenticated
//!   encryption
//! - `rc4` and `xor`: legacy, confidentiality-only
//! - `custom-base64`: obfuscation with a shuffled alphabet
//!
//! # Example
//!
//! ```
//! use keygate_crypto::{Cipher, EncryptionScheme};
//!
//! let key = keygate_crypto::generate_key(EncryptionScheme::Aes256Gcm);
//! let cipher = Cipher::new(EncryptionScheme::Aes256Gcm, &key).unwrap();
//!
//! let sealed = cipher.encrypt("{\"card_key\":\"ABC\"}").unwrap();
//! assert_eq!(cipher.decrypt(&sealed).unwrap(), "{\"card_key\":\"ABC\"}");
//! ```

mod cipher;
mod error;
mod key;
mod scheme;

pub use cipher::{Cipher, NONCE_SIZE};
pub use error::{CryptoError, CryptoResult};
pub use key::{generate_key, KEY_SIZE};
pub use scheme::{EncryptionScheme, SecurityLevel};
