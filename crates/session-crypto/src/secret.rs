//! Process-wide secret material: one AES-128 key and one CBC IV.
//!
//! Generated once at startup and never persisted. Restarting the process
//! therefore invalidates every token issued by the previous instance.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::aes_cbc::{cbc_decrypt, cbc_encrypt};
use crate::error::CryptoError;
use crate::random::fill_random;
use crate::types::{AES_KEY_LENGTH, CBC_IV_LENGTH};

const SELF_TEST_PLAINTEXT: &[u8] = b"session-crypto self test";

/// Symmetric key and initialization vector shared by every encode/decode.
///
/// Immutable once built; share it behind an `Arc`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretMaterial {
    key: [u8; AES_KEY_LENGTH],
    iv: [u8; CBC_IV_LENGTH],
}

impl SecretMaterial {
    /// Generate fresh key material from the secure random source.
    ///
    /// Runs a one-block encrypt/decrypt probe so that an unusable cipher
    /// surfaces here, at startup, instead of on the first token.
    pub fn initialize() -> Result<Self, CryptoError> {
        let mut material = Self {
            key: [0u8; AES_KEY_LENGTH],
            iv: [0u8; CBC_IV_LENGTH],
        };
        fill_random(&mut material.key)?;
        fill_random(&mut material.iv)?;
        material.self_test()?;
        tracing::debug!("generated session secret material");
        Ok(material)
    }

    /// Build secret material from known bytes.
    pub fn from_parts(key: &[u8], iv: &[u8]) -> Result<Self, CryptoError> {
        let key: [u8; AES_KEY_LENGTH] =
            key.try_into().map_err(|_| CryptoError::InvalidKeyLength {
                expected: AES_KEY_LENGTH,
                got: key.len(),
            })?;
        let iv: [u8; CBC_IV_LENGTH] = iv.try_into().map_err(|_| CryptoError::InvalidIvLength {
            expected: CBC_IV_LENGTH,
            got: iv.len(),
        })?;
        Ok(Self { key, iv })
    }

    pub fn key(&self) -> &[u8; AES_KEY_LENGTH] {
        &self.key
    }

    /// The process-wide IV.
    pub fn iv(&self) -> &[u8; CBC_IV_LENGTH] {
        &self.iv
    }

    fn self_test(&self) -> Result<(), CryptoError> {
        let ct = cbc_encrypt(&self.key, &self.iv, SELF_TEST_PLAINTEXT)?;
        let pt = cbc_decrypt(&self.key, &self.iv, &ct)?;
        if pt != SELF_TEST_PLAINTEXT {
            return Err(CryptoError::DecryptionFailed(
                "cipher self test produced wrong plaintext".into(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for SecretMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretMaterial")
            .field("key", &"<redacted>")
            .field("iv", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_generates_distinct_material() {
        let a = SecretMaterial::initialize().unwrap();
        let b = SecretMaterial::initialize().unwrap();
        assert_ne!(a.key(), b.key());
        assert_ne!(a.iv(), b.iv());
        assert_ne!(a.key(), a.iv());
    }

    #[test]
    fn from_parts_keeps_bytes() {
        let m = SecretMaterial::from_parts(&[7u8; 16], &[9u8; 16]).unwrap();
        assert_eq!(m.key(), &[7u8; 16]);
        assert_eq!(m.iv(), &[9u8; 16]);
    }

    #[test]
    fn from_parts_rejects_wrong_lengths() {
        assert!(matches!(
            SecretMaterial::from_parts(&[0u8; 32], &[0u8; 16]),
            Err(CryptoError::InvalidKeyLength { .. })
        ));
        assert!(matches!(
            SecretMaterial::from_parts(&[0u8; 16], &[0u8; 8]),
            Err(CryptoError::InvalidIvLength { .. })
        ));
    }

    #[test]
    fn debug_does_not_leak_key() {
        let m = SecretMaterial::from_parts(&[0xAB; 16], &[0xCD; 16]).unwrap();
        let printed = format!("{:?}", m);
        assert!(printed.contains("redacted"));
        assert!(!printed.contains("171"));
    }

    #[test]
    fn self_test_passes_for_generated_material() {
        let m = SecretMaterial::initialize().unwrap();
        assert!(m.self_test().is_ok());
    }
}
