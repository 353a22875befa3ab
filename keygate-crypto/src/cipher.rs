//! Cipher strategies for the supported schemes.
//!
//! A [`Cipher`] binds one scheme to prepared key material. Both are fixed at
//! construction; the same instance is used for every payload the session
//! exchanges. Ciphertext is standard base64 on the wire:
//!
//! - AEAD schemes: `base64(nonce || ciphertext+tag)` with a random 12-byte
//!   nonce per call.
//! - RC4 / XOR: `base64(transformed plaintext)`.
//! - Custom base64: encode with the custom alphabet, then wrap in standard
//!   base64.

use crate::error::{CryptoError, CryptoResult};
use crate::key::{self, KeyMaterial, KEY_SIZE};
use crate::scheme::EncryptionScheme;
use aes_gcm::aead::generic_array::typenum::U12;
use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{Aead, AeadCore, KeyInit};
use aes_gcm::Aes256Gcm;
use base64::engine::general_purpose::{PAD, STANDARD};
use base64::engine::GeneralPurpose;
use base64::Engine;
use chacha20poly1305::ChaCha20Poly1305;
use rand::RngCore;
use rc4::consts::U32;
use rc4::{Rc4, StreamCipher};

/// Size of the nonce in bytes for the AEAD schemes.
pub const NONCE_SIZE: usize = 12;

/// A symmetric cipher bound to one scheme and one key.
///
/// Immutable after construction and safe to share across concurrent calls;
/// every `encrypt`/`decrypt` works on its own buffers.
#[derive(Clone)]
pub struct Cipher {
    scheme: EncryptionScheme,
    key: KeyMaterial,
}

impl std::fmt::Debug for Cipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cipher")
            .field("scheme", &self.scheme)
            .field("key", &"<redacted>")
            .finish()
    }
}

impl Cipher {
    /// Prepares key material for `scheme` and returns the ready cipher.
    ///
    /// # Errors
    ///
    /// Fails when the key string cannot be used with the scheme. Nothing is
    /// validated lazily: a constructed cipher never fails for configuration
    /// reasons at call time.
    pub fn new(scheme: EncryptionScheme, key: &str) -> CryptoResult<Self> {
        let key = key::prepare(scheme, key)?;
        Ok(Self { scheme, key })
    }

    /// The scheme this cipher was constructed with.
    #[must_use]
    pub fn scheme(&self) -> EncryptionScheme {
        self.scheme
    }

    /// Encrypts a UTF-8 plaintext into base64 ciphertext.
    pub fn encrypt(&self, plaintext: &str) -> CryptoResult<String> {
        match &self.key {
            KeyMaterial::Aes256Gcm(key) => {
                seal_aead(&Aes256Gcm::new(key_array(key)), plaintext)
            }
            KeyMaterial::ChaCha20Poly1305(key) => {
                seal_aead(&ChaCha20Poly1305::new(key_array(key)), plaintext)
            }
            KeyMaterial::Rc4(key) => Ok(STANDARD.encode(rc4_apply(key, plaintext.as_bytes()))),
            KeyMaterial::Xor(key) => Ok(STANDARD.encode(xor_apply(key, plaintext.as_bytes()))),
            KeyMaterial::CustomBase64(alphabet) => {
                let engine = GeneralPurpose::new(alphabet, PAD);
                let custom = engine.encode(plaintext.as_bytes());
                Ok(STANDARD.encode(custom.as_bytes()))
            }
        }
    }

    /// Decrypts base64 ciphertext back into UTF-8 plaintext.
    pub fn decrypt(&self, ciphertext: &str) -> CryptoResult<String> {
        let data = STANDARD
            .decode(ciphertext)
            .map_err(|e| CryptoError::Decryption(format!("invalid base64: {e}")))?;

        let plaintext = match &self.key {
            KeyMaterial::Aes256Gcm(key) => open_aead(&Aes256Gcm::new(key_array(key)), &data)?,
            KeyMaterial::ChaCha20Poly1305(key) => {
                open_aead(&ChaCha20Poly1305::new(key_array(key)), &data)?
            }
            KeyMaterial::Rc4(key) => rc4_apply(key, &data),
            KeyMaterial::Xor(key) => xor_apply(key, &data),
            KeyMaterial::CustomBase64(alphabet) => {
                let engine = GeneralPurpose::new(alphabet, PAD);
                engine
                    .decode(&data)
                    .map_err(|e| CryptoError::Decryption(format!("invalid custom base64: {e}")))?
            }
        };

        String::from_utf8(plaintext)
            .map_err(|e| CryptoError::Decryption(format!("invalid UTF-8: {e}")))
    }
}

fn key_array(key: &[u8; KEY_SIZE]) -> &GenericArray<u8, U32> {
    GenericArray::from_slice(key)
}

fn seal_aead<C>(cipher: &C, plaintext: &str) -> CryptoResult<String>
where
    C: Aead + AeadCore<NonceSize = U12>,
{
    let mut nonce_bytes = [0u8; NONCE_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = GenericArray::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|e| CryptoError::Encryption(e.to_string()))?;

    let mut framed = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    framed.extend_from_slice(&nonce_bytes);
    framed.extend_from_slice(&ciphertext);
    Ok(STANDARD.encode(&framed))
}

fn open_aead<C>(cipher: &C, data: &[u8]) -> CryptoResult<Vec<u8>>
where
    C: Aead + AeadCore<NonceSize = U12>,
{
    if data.len() < NONCE_SIZE {
        return Err(CryptoError::Decryption("ciphertext too short".into()));
    }

    let (nonce, ciphertext) = data.split_at(NONCE_SIZE);
    cipher
        .decrypt(GenericArray::from_slice(nonce), ciphertext)
        .map_err(|_| CryptoError::Decryption("wrong key or tampered data".into()))
}

fn rc4_apply(key: &[u8; KEY_SIZE], data: &[u8]) -> Vec<u8> {
    let mut cipher = Rc4::<U32>::new(key_array(key));
    let mut buf = data.to_vec();
    cipher.apply_keystream(&mut buf);
    buf
}

fn xor_apply(key: &[u8], data: &[u8]) -> Vec<u8> {
    data.iter()
        .zip(key.iter().cycle())
        .map(|(b, k)| b ^ k)
        .collect()
}
