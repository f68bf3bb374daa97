//! Secure random source.
//!
//! Every draw goes straight to the operating system CSPRNG, so there is no
//! shared generator state to guard between threads.

use crate::error::CryptoError;

/// Fill `buf` with cryptographically secure random bytes.
pub fn fill_random(buf: &mut [u8]) -> Result<(), CryptoError> {
    getrandom::getrandom(buf).map_err(|e| CryptoError::RngFailed(e.to_string()))
}

/// Draw a uniformly random signed 64-bit integer.
pub fn random_i64() -> Result<i64, CryptoError> {
    let mut bytes = [0u8; 8];
    fill_random(&mut bytes)?;
    Ok(i64::from_be_bytes(bytes))
}
