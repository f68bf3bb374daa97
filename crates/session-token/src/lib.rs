//! Session token codec.
//!
//! Turns a subject identity into a compact, opaque, cookie-safe token and
//! recovers it later, rejecting tokens that were tampered with, produced
//! under different secret material, or are older than the 15 minute
//! freshness window.
//!
//! ```text
//! token  = base64( [iv:16]? || AES-128-CBC/PKCS7( record ) )
//! record = "{session_id:i64}/{issued_at_ms:i64}/{form-urlencoded subject}/{checksum:i32}"
//! ```
//!
//! Cookie attributes (path, domain, secure, max-age) belong to the HTTP layer,
//! which should use [`COOKIE_MAX_AGE_SECS`] to stay consistent with the window.

mod clock;
mod codec;
mod config;
mod cookie;
mod error;
mod record;

pub use clock::{Clock, ManualClock, SystemClock};
pub use codec::TokenCodec;
pub use config::{
    freshness_window, IvMode, TokenConfig, COOKIE_MAX_AGE_SECS, FRESHNESS_WINDOW_MS,
};
pub use cookie::SessionCookie;
pub use error::{TokenError, TokenErrorKind};
pub use record::{decode_subject, encode_subject, PlaintextRecord};
pub use session_crypto::SecretMaterial;
