//! Subject/token pairs for call sites where authentication is optional.

use crate::codec::TokenCodec;

/// An authenticated subject together with the cookie value that proves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub subject: String,
    pub token: String,
}

impl TokenCodec {
    /// Issue a token for `subject`. Any failure yields `None`.
    pub fn from_subject(&self, subject: &str) -> Option<SessionCookie> {
        let token = self.encode(subject).ok()?;
        Some(SessionCookie {
            subject: subject.to_string(),
            token,
        })
    }

    /// Validate a raw cookie value. Any failure yields `None`.
    ///
    /// The returned `token` is the value exactly as received.
    pub fn from_token(&self, raw: &str) -> Option<SessionCookie> {
        let subject = self.decode(raw).ok()?;
        Some(SessionCookie {
            subject,
            token: raw.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::clock::ManualClock;
    use crate::codec::TokenCodec;
    use crate::config::{TokenConfig, FRESHNESS_WINDOW_MS};

    fn codec_at(now: i64) -> (TokenCodec, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(now));
        let codec = TokenCodec::initialize(TokenConfig::default())
            .unwrap()
            .with_clock(clock.clone());
        (codec, clock)
    }

    #[test]
    fn from_subject_pairs_subject_and_token() {
        let (codec, _) = codec_at(1_000_000);
        let cookie = codec.from_subject("alice").unwrap();
        assert_eq!(cookie.subject, "alice");
        assert_eq!(codec.decode(&cookie.token).unwrap(), "alice");
    }

    #[test]
    fn from_subject_swallows_errors() {
        let (codec, _) = codec_at(1_000_000);
        assert!(codec.from_subject("").is_none());
    }

    #[test]
    fn from_token_keeps_raw_value() {
        let (codec, _) = codec_at(1_000_000);
        let issued = codec.from_subject("alice").unwrap();
        let raw = format!(" {} ", issued.token);
        let cookie = codec.from_token(&raw).unwrap();
        assert_eq!(cookie.subject, "alice");
        assert_eq!(cookie.token, raw);
    }

    #[test]
    fn from_token_swallows_every_decode_failure() {
        let (codec, clock) = codec_at(1_000_000);
        assert!(codec.from_token("not-base64-!!").is_none());
        assert!(codec.from_token("").is_none());
        assert!(codec.from_token("AAAAAAAAAAAAAAAAAAAAAA==").is_none());

        let cookie = codec.from_subject("alice").unwrap();
        clock.advance(FRESHNESS_WINDOW_MS + 1);
        assert!(codec.from_token(&cookie.token).is_none());
    }
}
