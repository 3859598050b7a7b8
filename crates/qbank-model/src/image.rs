//! Base64 image payloads.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// Image bytes kept in their standard base64 form.
///
/// Decoding happens on demand, so a record with a damaged payload still loads
/// and can be edited; the failure only surfaces when the bytes are needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedImage(String);

impl EncodedImage {
    /// Encode raw image bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(STANDARD.encode(bytes))
    }

    /// Wrap text that is already base64 (not validated).
    pub fn from_base64(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The base64 text as stored.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode back to the original bytes.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.0)
    }

    /// Length of the decoded payload, estimated from the encoded length.
    pub fn approx_decoded_len(&self) -> usize {
        let padding = self.0.bytes().rev().take_while(|b| *b == b'=').count();
        (self.0.len() / 4 * 3).saturating_sub(padding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_encoding() {
        let image = EncodedImage::from_bytes(b"\x89PNG\r\n");
        assert_eq!(image.as_str(), "iVBORw0K");
        assert_eq!(image.decode().unwrap(), b"\x89PNG\r\n");
    }

    #[test]
    fn test_invalid_payload_fails_to_decode() {
        let image = EncodedImage::from_base64("not base64 at all!");
        assert!(image.decode().is_err());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let image = EncodedImage::from_bytes(b"abc");
        assert_eq!(serde_json::to_string(&image).unwrap(), "\"YWJj\"");
    }

    proptest! {
        #[test]
        fn prop_round_trip(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
            let image = EncodedImage::from_bytes(&bytes);
            prop_assert_eq!(image.decode().unwrap(), bytes.clone());
            prop_assert_eq!(image.approx_decoded_len(), bytes.len());
        }
    }
}
