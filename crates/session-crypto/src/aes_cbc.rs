//! AES-128-CBC with PKCS#7 padding.
//!
//! PKCS#7 over a 16-byte block is byte-identical to what JCE names
//! `PKCS5Padding`, so tokens stay interchangeable with that provider.

use aes::Aes128;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::error::CryptoError;
use crate::types::{AES_BLOCK_LENGTH, AES_KEY_LENGTH, CBC_IV_LENGTH};

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;

fn check_lengths(key: &[u8], iv: &[u8]) -> Result<(), CryptoError> {
    if key.len() != AES_KEY_LENGTH {
        return Err(CryptoError::InvalidKeyLength {
            expected: AES_KEY_LENGTH,
            got: key.len(),
        });
    }
    if iv.len() != CBC_IV_LENGTH {
        return Err(CryptoError::InvalidIvLength {
            expected: CBC_IV_LENGTH,
            got: iv.len(),
        });
    }
    Ok(())
}

/// Encrypt `plaintext` under `key`/`iv`.
///
/// Output length is always the next multiple of 16 strictly greater than
/// the input length (a full padding block is added to aligned input).
pub fn cbc_encrypt(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    check_lengths(key, iv)?;
    let cipher = Aes128CbcEnc::new_from_slices(key, iv)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;
    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

/// Decrypt `ciphertext` under `key`/`iv` and strip the padding.
///
/// A padding failure means either tampering or the wrong key; the two are
/// indistinguishable here.
pub fn cbc_decrypt(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    check_lengths(key, iv)?;
    if ciphertext.is_empty() || ciphertext.len() % AES_BLOCK_LENGTH != 0 {
        return Err(CryptoError::DataTooShort(ciphertext.len()));
    }
    let cipher = Aes128CbcDec::new_from_slices(key, iv)
        .map_err(|e| CryptoError::DecryptionFailed(e.to_string()))?;
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CryptoError::DecryptionFailed("invalid padding".into()))
}
