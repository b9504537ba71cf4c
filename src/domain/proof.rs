//! Proof photos attached to journey transitions.
//!
//! A [`ProofPhoto`] is the base64 payload of one image, validated for size
//! and decodability but never interpreted. Photos travel inside JSON bodies
//! as plain strings, so the encoded form is the canonical one.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Default ceiling on the raw (decoded) photo size in bytes.
pub const DEFAULT_PHOTO_MAX_BYTES: usize = 5 * 1024 * 1024;

/// Reasons a proof photo is rejected before any transition is attempted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PhotoError {
    /// No image was captured or supplied.
    #[error("proof photo is required")]
    Missing,
    /// The image exceeds the configured size ceiling.
    #[error("proof photo is {size} bytes, above the {limit} byte limit")]
    TooLarge {
        /// Raw size of the rejected image in bytes.
        size: usize,
        /// Configured ceiling in bytes.
        limit: usize,
    },
    /// The image bytes or encoding could not be read.
    #[error("proof photo is unreadable: {0}")]
    Unreadable(String),
}

/// An opaque, validated reference to one proof image.
///
/// Holds the base64 text exactly as it travels on the wire. Content is
/// evidence for human review only; nothing in the system decodes it past
/// the size check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofPhoto(String);

impl ProofPhoto {
    /// Encodes raw image bytes captured from a device.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoError::Missing`] for an empty capture and
    /// [`PhotoError::TooLarge`] above `limit` raw bytes.
    pub fn from_bytes(bytes: &[u8], limit: usize) -> Result<Self, PhotoError> {
        if bytes.is_empty() {
            return Err(PhotoError::Missing);
        }
        if bytes.len() > limit {
            return Err(PhotoError::TooLarge {
                size: bytes.len(),
                limit,
            });
        }
        Ok(Self(STANDARD.encode(bytes)))
    }

    /// Validates an already-encoded payload received on the wire.
    ///
    /// The original text is kept verbatim; decoding happens only to verify
    /// readability and the size ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoError::Missing`] for an empty string,
    /// [`PhotoError::Unreadable`] when the payload is not valid base64, and
    /// [`PhotoError::TooLarge`] when the decoded size exceeds `limit`.
    pub fn from_encoded(encoded: &str, limit: usize) -> Result<Self, PhotoError> {
        if encoded.is_empty() {
            return Err(PhotoError::Missing);
        }
        let decoded = STANDARD
            .decode(encoded)
            .map_err(|e| PhotoError::Unreadable(e.to_string()))?;
        if decoded.is_empty() {
            return Err(PhotoError::Missing);
        }
        if decoded.len() > limit {
            return Err(PhotoError::TooLarge {
                size: decoded.len(),
                limit,
            });
        }
        Ok(Self(encoded.to_string()))
    }

    /// Returns the base64 payload.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the photo, returning the base64 payload.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn encodes_raw_bytes() {
        let Ok(photo) = ProofPhoto::from_bytes(b"jpeg-bytes", 1024) else {
            panic!("expected successful encode");
        };
        assert_eq!(photo.as_str(), STANDARD.encode(b"jpeg-bytes"));
    }

    #[test]
    fn empty_capture_is_missing() {
        assert_eq!(ProofPhoto::from_bytes(b"", 1024), Err(PhotoError::Missing));
        assert_eq!(ProofPhoto::from_encoded("", 1024), Err(PhotoError::Missing));
    }

    #[test]
    fn oversized_capture_is_rejected() {
        let bytes = vec![0u8; 64];
        let err = ProofPhoto::from_bytes(&bytes, 63);
        assert_eq!(
            err,
            Err(PhotoError::TooLarge {
                size: 64,
                limit: 63
            })
        );
    }

    #[test]
    fn oversized_encoded_payload_is_rejected() {
        let encoded = STANDARD.encode(vec![7u8; 128]);
        let err = ProofPhoto::from_encoded(&encoded, 100);
        assert!(matches!(err, Err(PhotoError::TooLarge { size: 128, .. })));
    }

    #[test]
    fn garbage_encoding_is_unreadable() {
        let err = ProofPhoto::from_encoded("not@base64!", 1024);
        assert!(matches!(err, Err(PhotoError::Unreadable(_))));
    }

    #[test]
    fn wire_payload_is_kept_verbatim() {
        let encoded = STANDARD.encode(b"proof");
        let Ok(photo) = ProofPhoto::from_encoded(&encoded, 1024) else {
            panic!("expected valid payload");
        };
        assert_eq!(photo.into_inner(), encoded);
    }
}
