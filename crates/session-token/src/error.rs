use session_crypto::CryptoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Cannot initialize session secret material: {0}")]
    Initialization(#[source] CryptoError),

    #[error("Cannot generate session token for subject {subject:?}: {reason}")]
    Encoding { subject: String, reason: String },

    #[error("Malformed session token: {0}")]
    Malformed(String),

    #[error("Invalid or forged session token")]
    Integrity,

    #[error("Session token has expired: issued {elapsed_ms} ms ago, window is {window_ms} ms")]
    Expired { elapsed_ms: i64, window_ms: i64 },
}

/// Coarse classification of a [`TokenError`], for diagnostics and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenErrorKind {
    Initialization,
    Encoding,
    Malformed,
    Integrity,
    Expired,
}

impl TokenError {
    pub fn kind(&self) -> TokenErrorKind {
        match self {
            TokenError::Initialization(_) => TokenErrorKind::Initialization,
            TokenError::Encoding { .. } => TokenErrorKind::Encoding,
            TokenError::Malformed(_) => TokenErrorKind::Malformed,
            TokenError::Integrity => TokenErrorKind::Integrity,
            TokenError::Expired { .. } => TokenErrorKind::Expired,
        }
    }

    /// True for every failure `decode` can report.
    pub fn is_decoding(&self) -> bool {
        matches!(
            self.kind(),
            TokenErrorKind::Malformed | TokenErrorKind::Integrity | TokenErrorKind::Expired
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn decode_kinds_are_grouped() {
        assert!(TokenError::Malformed("x".into()).is_decoding());
        assert!(TokenError::Integrity.is_decoding());
        assert!(TokenError::Expired {
            elapsed_ms: 1,
            window_ms: 0
        }
        .is_decoding());
        assert!(!TokenError::Encoding {
            subject: "a".into(),
            reason: "b".into()
        }
        .is_decoding());
    }

    #[test]
    fn initialization_keeps_cause() {
        let err = TokenError::Initialization(CryptoError::RngFailed("no entropy".into()));
        assert_eq!(err.kind(), TokenErrorKind::Initialization);
        assert!(err.source().is_some());
        assert!(err.to_string().contains("no entropy"));
    }

    #[test]
    fn expired_message_reports_age() {
        let err = TokenError::Expired {
            elapsed_ms: 900_001,
            window_ms: 900_000,
        };
        assert!(err.to_string().contains("900001 ms ago"));
    }
}
