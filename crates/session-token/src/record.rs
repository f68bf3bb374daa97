//! Plaintext token record and its canonical text form.
//!
//! Text layout: `{session_id}/{issued_at}/{subject}/{checksum}`, where the
//! checksum is the string hash of everything before the last `/`. The subject
//! is form-urlencoded so it can never contain the `/` delimiter.

use std::borrow::Cow;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use session_crypto::string_hash;

use crate::error::TokenError;

const DELIMITER: char = '/';
const FIELD_COUNT: usize = 4;

/// `application/x-www-form-urlencoded` unreserved set: alphanumerics and `.-*_`.
const FORM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'.')
    .remove(b'-')
    .remove(b'*')
    .remove(b'_');

/// Form-urlencode a subject: space becomes `+`, other reserved bytes `%XX`.
pub fn encode_subject(subject: &str) -> String {
    utf8_percent_encode(subject, FORM_ENCODE_SET)
        .map(|chunk| if chunk == "%20" { "+" } else { chunk })
        .collect()
}

/// Reverse [`encode_subject`].
pub fn decode_subject(encoded: &str) -> Result<String, TokenError> {
    let spaced: Cow<'_, str> = if encoded.contains('+') {
        Cow::Owned(encoded.replace('+', " "))
    } else {
        Cow::Borrowed(encoded)
    };
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|e| TokenError::Malformed(format!("subject is not valid UTF-8: {}", e)))
}

/// The four fields carried inside every token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaintextRecord {
    pub session_id: i64,
    /// Issue time, milliseconds since the Unix epoch.
    pub issued_at: i64,
    /// Subject in transport-encoded form.
    pub subject: String,
    pub checksum: i32,
}

impl PlaintextRecord {
    /// Build a record and compute its checksum. `subject` must already be
    /// transport-encoded.
    pub fn new(session_id: i64, issued_at: i64, subject: String) -> Self {
        let checksum = string_hash(&canonical(
            &session_id.to_string(),
            &issued_at.to_string(),
            &subject,
        ));
        Self {
            session_id,
            issued_at,
            subject,
            checksum,
        }
    }

    /// `{session_id}/{issued_at}/{subject}`, the checksum input.
    pub fn canonical(&self) -> String {
        canonical(
            &self.session_id.to_string(),
            &self.issued_at.to_string(),
            &self.subject,
        )
    }

    /// Canonical string with the checksum appended; this is what gets encrypted.
    pub fn to_text(&self) -> String {
        format!("{}{}{}", self.canonical(), DELIMITER, self.checksum)
    }

    /// Parse and integrity-check decrypted record text.
    ///
    /// The checksum is verified against the fields exactly as they appear in
    /// `text`, before the numeric fields are interpreted.
    pub fn parse(text: &str) -> Result<Self, TokenError> {
        let fields: Vec<&str> = text.split(DELIMITER).collect();
        if fields.len() != FIELD_COUNT {
            return Err(TokenError::Malformed(format!(
                "expected {} fields, found {}",
                FIELD_COUNT,
                fields.len()
            )));
        }
        let (session_id, issued_at, subject, checksum) =
            (fields[0], fields[1], fields[2], fields[3]);

        let checksum: i32 = checksum
            .parse()
            .map_err(|_| TokenError::Malformed(format!("invalid checksum field {:?}", checksum)))?;
        if checksum != string_hash(&canonical(session_id, issued_at, subject)) {
            return Err(TokenError::Integrity);
        }

        let session_id: i64 = session_id
            .parse()
            .map_err(|_| TokenError::Malformed("invalid session id field".into()))?;
        let issued_at: i64 = issued_at
            .parse()
            .map_err(|_| TokenError::Malformed("invalid timestamp field".into()))?;

        Ok(Self {
            session_id,
            issued_at,
            subject: subject.to_string(),
            checksum,
        })
    }

    pub fn verify_checksum(&self) -> bool {
        self.checksum == string_hash(&self.canonical())
    }
}

fn canonical(session_id: &str, issued_at: &str, subject: &str) -> String {
    format!(
        "{}{d}{}{d}{}",
        session_id,
        issued_at,
        subject,
        d = DELIMITER
    )
}
