//! Session token encoder and decoder.
//!
//! Token = base64([iv:16]? || AES-128-CBC(record text)), with the IV prefix
//! present only in [`IvMode::PerToken`].

use std::sync::Arc;

use session_crypto::{
    base64_decode, base64_encode, cbc_decrypt, cbc_encrypt, fill_random, random_i64,
    CryptoError, SecretMaterial, CBC_IV_LENGTH,
};

use crate::clock::{Clock, SystemClock};
use crate::config::{IvMode, TokenConfig, FRESHNESS_WINDOW_MS};
use crate::error::TokenError;
use crate::record::{decode_subject, encode_subject, PlaintextRecord};

/// Turns subjects into opaque cookie tokens and back.
///
/// Cheap to clone; all clones share the same secret material.
#[derive(Clone)]
pub struct TokenCodec {
    secret: Arc<SecretMaterial>,
    config: TokenConfig,
    clock: Arc<dyn Clock>,
}

impl TokenCodec {
    /// Generate fresh secret material and build a codec around it.
    ///
    /// Call once per process. Tokens issued by a codec are only readable by
    /// codecs sharing its secret material, so a restart invalidates them all.
    pub fn initialize(config: TokenConfig) -> Result<Self, TokenError> {
        let secret = SecretMaterial::initialize().map_err(|e| {
            tracing::error!(error = %e, "session token secret material unavailable");
            TokenError::Initialization(e)
        })?;
        tracing::info!(iv_mode = ?config.iv_mode, "session token codec initialized");
        Ok(Self::new(Arc::new(secret), config))
    }

    pub fn new(secret: Arc<SecretMaterial>, config: TokenConfig) -> Self {
        Self {
            secret,
            config,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the wall clock, e.g. with a [`crate::ManualClock`].
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn secret(&self) -> &Arc<SecretMaterial> {
        &self.secret
    }

    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    /// Issue a token for `subject`.
    pub fn encode(&self, subject: &str) -> Result<String, TokenError> {
        self.try_encode(subject).map_err(|reason| {
            tracing::debug!(reason = %reason, "session token encoding failed");
            TokenError::Encoding {
                subject: subject.to_string(),
                reason,
            }
        })
    }

    fn try_encode(&self, subject: &str) -> Result<String, String> {
        if subject.is_empty() {
            return Err("subject is empty".into());
        }
        let session_id = random_i64().map_err(|e| e.to_string())?;
        let issued_at = self.clock.now_millis();
        let record = PlaintextRecord::new(session_id, issued_at, encode_subject(subject));
        let payload = self
            .encrypt(record.to_text().as_bytes())
            .map_err(|e| e.to_string())?;
        Ok(base64_encode(&payload).trim().to_string())
    }

    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let key = self.secret.key();
        match self.config.iv_mode {
            IvMode::Fixed => cbc_encrypt(key, self.secret.iv(), plaintext),
            IvMode::PerToken => {
                let mut iv = [0u8; CBC_IV_LENGTH];
                fill_random(&mut iv)?;
                let ciphertext = cbc_encrypt(key, &iv, plaintext)?;
                let mut payload = Vec::with_capacity(iv.len() + ciphertext.len());
                payload.extend_from_slice(&iv);
                payload.extend_from_slice(&ciphertext);
                Ok(payload)
            }
        }
    }

    /// Recover the subject from an untrusted token.
    ///
    /// Fails with [`TokenError::Malformed`], [`TokenError::Integrity`] or
    /// [`TokenError::Expired`]; nothing is returned unless every check passes.
    pub fn decode(&self, token: &str) -> Result<String, TokenError> {
        self.try_decode(token).map_err(|e| {
            tracing::debug!(kind = ?e.kind(), error = %e, "session token rejected");
            e
        })
    }

    fn try_decode(&self, token: &str) -> Result<String, TokenError> {
        let payload = base64_decode(token).map_err(|e| TokenError::Malformed(e.to_string()))?;
        let plaintext = self
            .decrypt(&payload)
            .map_err(|e| TokenError::Malformed(e.to_string()))?;
        let text = String::from_utf8(plaintext)
            .map_err(|_| TokenError::Malformed("record is not valid UTF-8".into()))?;

        let record = PlaintextRecord::parse(&text)?;

        let elapsed_ms = self.clock.now_millis().saturating_sub(record.issued_at);
        if elapsed_ms > FRESHNESS_WINDOW_MS {
            return Err(TokenError::Expired {
                elapsed_ms,
                window_ms: FRESHNESS_WINDOW_MS,
            });
        }

        let subject = decode_subject(&record.subject)?;
        if subject.is_empty() {
            return Err(TokenError::Malformed("empty subject".into()));
        }
        Ok(subject)
    }

    fn decrypt(&self, payload: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let key = self.secret.key();
        match self.config.iv_mode {
            IvMode::Fixed => cbc_decrypt(key, self.secret.iv(), payload),
            IvMode::PerToken => {
                if payload.len() < CBC_IV_LENGTH {
                    return Err(CryptoError::DataTooShort(payload.len()));
                }
                let (iv, ciphertext) = payload.split_at(CBC_IV_LENGTH);
                cbc_decrypt(key, iv, ciphertext)
            }
        }
    }
}
