//! Cryptographic primitives behind the session token codec.
//!
//! - AES-128-CBC with PKCS#7 padding
//! - Process-wide secret material (key + IV) provisioning
//! - OS-backed secure random source
//! - Standard base64 transport encoding
//! - 32-bit string-hash checksum
//!
//! Token layout, freshness and the cookie-facing API live in `session-token`.

pub mod aes_cbc;
pub mod checksum;
pub mod encoding;
pub mod error;
pub mod random;
pub mod secret;
pub mod types;

pub use aes_cbc::{cbc_decrypt, cbc_encrypt};
pub use checksum::string_hash;
pub use encoding::{base64_decode, base64_encode};
pub use error::CryptoError;
pub use random::{fill_random, random_i64};
pub use secret::SecretMaterial;
pub use types::{AES_BLOCK_LENGTH, AES_KEY_LENGTH, CBC_IV_LENGTH};
