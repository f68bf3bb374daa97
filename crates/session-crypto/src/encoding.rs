use ::base64::engine::general_purpose::STANDARD;
use ::base64::Engine as _;

use crate::error::CryptoError;

/// Standard base64 (with padding) encode.
pub fn base64_encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Standard base64 decode; surrounding whitespace is ignored.
pub fn base64_decode(s: &str) -> Result<Vec<u8>, CryptoError> {
    STANDARD
        .decode(s.trim())
        .map_err(|e| CryptoError::Base64Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let data = [0xfbu8, 0xff, 0xfe, 0x00, 0x41];
        let encoded = base64_encode(&data);
        assert_eq!(base64_decode(&encoded).unwrap(), data);
    }

    #[test]
    fn padded_output() {
        assert_eq!(base64_encode(b"ab"), "YWI=");
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(base64_decode("  YWI=\n").unwrap(), b"ab");
    }

    #[test]
    fn rejects_garbage() {
        let err = base64_decode("not-base64-!!").unwrap_err();
        assert!(matches!(err, CryptoError::Base64Decode(_)));
    }
}
