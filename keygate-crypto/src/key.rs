//! Key material preparation and generation.
//!
//! Configuration hands us a key *string*; what it decodes to depends on the
//! scheme. The acceptance rules match the license service's key decoding so
//! a key issued by the server works unchanged here:
//!
//! - AES-256-GCM: standard base64 of 32 bytes, else the first 32 UTF-8
//!   bytes of a 64-character string, else exactly 32 raw UTF-8 bytes.
//! - ChaCha20-Poly1305: hex of 32 bytes, else base64 of 32 bytes, else
//!   exactly 32 raw UTF-8 bytes.
//! - RC4: hex when the string is valid hex, else raw UTF-8 bytes; must
//!   decode to exactly 32 bytes.
//! - XOR: hex when the string is valid hex, else raw UTF-8 bytes; must be
//!   non-empty.
//! - Custom base64: the key *is* the alphabet, 64 distinct characters.

use crate::error::{CryptoError, CryptoResult};
use crate::scheme::EncryptionScheme;
use base64::alphabet::Alphabet;
use base64::{engine::general_purpose::STANDARD, Engine};
use rand::seq::SliceRandom;
use rand::RngCore;
use zeroize::Zeroizing;

/// Key size in bytes for the AEAD schemes (AES-256-GCM, ChaCha20-Poly1305)
/// and RC4.
pub const KEY_SIZE: usize = 32;

/// Prepared key material, scheme-specific.
#[derive(Clone)]
pub(crate) enum KeyMaterial {
    Aes256Gcm(Zeroizing<[u8; KEY_SIZE]>),
    ChaCha20Poly1305(Zeroizing<[u8; KEY_SIZE]>),
    Rc4(Zeroizing<[u8; KEY_SIZE]>),
    Xor(Zeroizing<Vec<u8>>),
    CustomBase64(Alphabet),
}

pub(crate) fn prepare(scheme: EncryptionScheme, key: &str) -> CryptoResult<KeyMaterial> {
    match scheme {
        EncryptionScheme::Aes256Gcm => prepare_aes_key(key).map(KeyMaterial::Aes256Gcm),
        EncryptionScheme::ChaCha20Poly1305 => {
            prepare_chacha_key(key).map(KeyMaterial::ChaCha20Poly1305)
        }
        EncryptionScheme::Rc4 => prepare_rc4_key(key).map(KeyMaterial::Rc4),
        EncryptionScheme::Xor => prepare_xor_key(key).map(KeyMaterial::Xor),
        EncryptionScheme::CustomBase64 => prepare_alphabet(key).map(KeyMaterial::CustomBase64),
    }
}

fn fixed_from(bytes: &[u8]) -> CryptoResult<Zeroizing<[u8; KEY_SIZE]>> {
    let arr: [u8; KEY_SIZE] = bytes.try_into().map_err(|_| CryptoError::InvalidKeyLength {
        expected: KEY_SIZE,
        actual: bytes.len(),
    })?;
    Ok(Zeroizing::new(arr))
}

fn prepare_aes_key(key: &str) -> CryptoResult<Zeroizing<[u8; KEY_SIZE]>> {
    if let Ok(decoded) = STANDARD.decode(key) {
        if decoded.len() == KEY_SIZE {
            return fixed_from(&decoded);
        }
    }

    // A 64-character key contributes its first 32 UTF-8 bytes, matching the
    // server's key decoding.
    if key.len() == 64 {
        return fixed_from(&key.as_bytes()[..KEY_SIZE]);
    }

    fixed_from(key.as_bytes())
}

fn prepare_chacha_key(key: &str) -> CryptoResult<Zeroizing<[u8; KEY_SIZE]>> {
    if let Ok(decoded) = hex::decode(key) {
        if decoded.len() == KEY_SIZE {
            return fixed_from(&decoded);
        }
    }

    if let Ok(decoded) = STANDARD.decode(key) {
        if decoded.len() == KEY_SIZE {
            return fixed_from(&decoded);
        }
    }

    fixed_from(key.as_bytes())
}

fn prepare_rc4_key(key: &str) -> CryptoResult<Zeroizing<[u8; KEY_SIZE]>> {
    let bytes = hex::decode(key).unwrap_or_else(|_| key.as_bytes().to_vec());
    fixed_from(&bytes)
}

fn prepare_xor_key(key: &str) -> CryptoResult<Zeroizing<Vec<u8>>> {
    let bytes = hex::decode(key).unwrap_or_else(|_| key.as_bytes().to_vec());
    if bytes.is_empty() {
        return Err(CryptoError::InvalidKey("XOR key must not be empty".into()));
    }
    Ok(Zeroizing::new(bytes))
}

fn prepare_alphabet(key: &str) -> CryptoResult<Alphabet> {
    Alphabet::new(key).map_err(|e| CryptoError::InvalidKey(format!("invalid base64 alphabet: {e}")))
}

/// Generates a fresh random key string in the scheme's preferred encoding.
///
/// The returned string is accepted by [`Cipher::new`] for the same scheme.
///
/// [`Cipher::new`]: crate::Cipher::new
#[must_use]
pub fn generate_key(scheme: EncryptionScheme) -> String {
    let mut rng = rand::rngs::OsRng;
    match scheme {
        EncryptionScheme::Aes256Gcm => {
            let mut bytes = [0u8; KEY_SIZE];
            rng.fill_bytes(&mut bytes);
            STANDARD.encode(bytes)
        }
        EncryptionScheme::ChaCha20Poly1305 | EncryptionScheme::Rc4 | EncryptionScheme::Xor => {
            let mut bytes = [0u8; KEY_SIZE];
            rng.fill_bytes(&mut bytes);
            hex::encode(bytes)
        }
        EncryptionScheme::CustomBase64 => {
            let mut symbols: Vec<u8> =
                b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/".to_vec();
            symbols.shuffle(&mut rng);
            String::from_utf8(symbols).unwrap_or_default()
        }
    }
}
