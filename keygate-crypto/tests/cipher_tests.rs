use base64::{engine::general_purpose::STANDARD, Engine};
use keygate_crypto::{generate_key, Cipher, CryptoError, EncryptionScheme};

fn cipher_for(scheme: EncryptionScheme) -> Cipher {
    Cipher::new(scheme, &generate_key(scheme)).unwrap()
}

// ── Round-trip law ───────────────────────────────────────────────

#[test]
fn round_trip_every_scheme() {
    let payload = r#"{"project_uuid":"p-1","card_key":"ABC-123"}"#;
    for scheme in EncryptionScheme::ALL {
        let cipher = cipher_for(scheme);
        let sealed = cipher.encrypt(payload).unwrap();
        assert_eq!(cipher.decrypt(&sealed).unwrap(), payload, "scheme {scheme}");
    }
}

#[test]
fn round_trip_empty_plaintext() {
    for scheme in EncryptionScheme::ALL {
        let cipher = cipher_for(scheme);
        let sealed = cipher.encrypt("").unwrap();
        assert_eq!(cipher.decrypt(&sealed).unwrap(), "", "scheme {scheme}");
    }
}

#[test]
fn round_trip_unicode() {
    let payload = "卡密验证 ключ 🔑";
    for scheme in EncryptionScheme::ALL {
        let cipher = cipher_for(scheme);
        let sealed = cipher.encrypt(payload).unwrap();
        assert_eq!(cipher.decrypt(&sealed).unwrap(), payload, "scheme {scheme}");
    }
}

#[test]
fn aead_encryption_is_randomized() {
    let cipher = cipher_for(EncryptionScheme::Aes256Gcm);
    let a = cipher.encrypt("same input").unwrap();
    let b = cipher.encrypt("same input").unwrap();
    assert_ne!(a, b);
}

#[test]
fn generated_keys_accepted_by_own_scheme() {
    for scheme in EncryptionScheme::ALL {
        let key = generate_key(scheme);
        assert!(Cipher::new(scheme, &key).is_ok(), "scheme {scheme}");
    }
}

// ── Key preparation ──────────────────────────────────────────────

#[test]
fn aes_accepts_base64_key() {
    let key = STANDARD.encode([7u8; 32]);
    assert!(Cipher::new(EncryptionScheme::Aes256Gcm, &key).is_ok());
}

#[test]
fn aes_accepts_raw_32_byte_key() {
    let key = "0123456789abcdef0123456789abcdef";
    assert!(Cipher::new(EncryptionScheme::Aes256Gcm, key).is_ok());
}

#[test]
fn aes_64_char_key_uses_first_32_bytes() {
    // A 64-char key and the raw key made of its first 32 chars must be
    // interoperable, matching the server's key decoding.
    let long = "632005a33ebb7619c1efd3853c7109f1c075c7bb86164e35da72916f9d4ef037";
    let short = &long[..32];

    let a = Cipher::new(EncryptionScheme::Aes256Gcm, long).unwrap();
    let b = Cipher::new(EncryptionScheme::Aes256Gcm, short).unwrap();

    let sealed = a.encrypt("cross-key").unwrap();
    assert_eq!(b.decrypt(&sealed).unwrap(), "cross-key");
}

#[test]
fn aes_rejects_short_key() {
    let err = Cipher::new(EncryptionScheme::Aes256Gcm, "too short").unwrap_err();
    assert!(matches!(err, CryptoError::InvalidKeyLength { expected: 32, .. }));
}

#[test]
fn chacha_accepts_hex_key() {
    let key = "632005a33ebb7619c1efd3853c7109f1c075c7bb86164e35da72916f9d4ef037";
    assert!(Cipher::new(EncryptionScheme::ChaCha20Poly1305, key).is_ok());
}

#[test]
fn chacha_hex_and_decoded_bytes_interoperate() {
    let hex_key = "00000000000000000000000000000000000000000000000000000000000000ff";
    let b64_key = STANDARD.encode(hex::decode(hex_key).unwrap());

    let a = Cipher::new(EncryptionScheme::ChaCha20Poly1305, hex_key).unwrap();
    let b = Cipher::new(EncryptionScheme::ChaCha20Poly1305, &b64_key).unwrap();

    let sealed = a.encrypt("cross-encoding").unwrap();
    assert_eq!(b.decrypt(&sealed).unwrap(), "cross-encoding");
}

#[test]
fn rc4_requires_32_byte_key() {
    let err = Cipher::new(EncryptionScheme::Rc4, "short").unwrap_err();
    assert!(matches!(err, CryptoError::InvalidKeyLength { expected: 32, .. }));
}

#[test]
fn xor_accepts_short_raw_key() {
    assert!(Cipher::new(EncryptionScheme::Xor, "k1").is_ok());
}

#[test]
fn xor_rejects_empty_key() {
    assert!(Cipher::new(EncryptionScheme::Xor, "").is_err());
}

#[test]
fn custom_base64_rejects_wrong_length() {
    let key = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789"; // 62 chars
    assert!(Cipher::new(EncryptionScheme::CustomBase64, key).is_err());
}

#[test]
fn custom_base64_rejects_duplicate_characters() {
    let key = "AACDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
    assert!(Cipher::new(EncryptionScheme::CustomBase64, key).is_err());
}

#[test]
fn custom_alphabet_differs_from_standard_base64() {
    let key = generate_key(EncryptionScheme::CustomBase64);
    let cipher = Cipher::new(EncryptionScheme::CustomBase64, &key).unwrap();

    let sealed = cipher.encrypt("obfuscated").unwrap();
    let inner = STANDARD.decode(&sealed).unwrap();
    assert_ne!(inner, STANDARD.encode(b"obfuscated").into_bytes());
}

// ── Tamper detection ─────────────────────────────────────────────

#[test]
fn aead_detects_tampering() {
    for scheme in [EncryptionScheme::Aes256Gcm, EncryptionScheme::ChaCha20Poly1305] {
        let cipher = cipher_for(scheme);
        let sealed = cipher.encrypt("integrity matters").unwrap();

        let mut raw = STANDARD.decode(&sealed).unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0x01;
        let tampered = STANDARD.encode(&raw);

        let err = cipher.decrypt(&tampered).unwrap_err();
        assert!(matches!(err, CryptoError::Decryption(_)), "scheme {scheme}");
    }
}

#[test]
fn aead_rejects_wrong_key() {
    let a = cipher_for(EncryptionScheme::Aes256Gcm);
    let b = cipher_for(EncryptionScheme::Aes256Gcm);

    let sealed = a.encrypt("secret").unwrap();
    assert!(b.decrypt(&sealed).is_err());
}

#[test]
fn aead_rejects_truncated_ciphertext() {
    let cipher = cipher_for(EncryptionScheme::Aes256Gcm);
    let short = STANDARD.encode([0u8; 4]);
    let err = cipher.decrypt(&short).unwrap_err();
    assert!(matches!(err, CryptoError::Decryption(_)));
}

#[test]
fn decrypt_rejects_invalid_base64() {
    for scheme in EncryptionScheme::ALL {
        let cipher = cipher_for(scheme);
        assert!(cipher.decrypt("%%not-base64%%").is_err(), "scheme {scheme}");
    }
}
