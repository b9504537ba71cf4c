//! Proof photo acquisition.
//!
//! Bridges a [`ProofSource`] to the validated [`ProofPhoto`] payload,
//! applying the size ceiling before anything leaves the device.

use crate::domain::proof::{PhotoError, ProofPhoto};

use super::source::ProofSource;

/// Acquires one proof image and encodes it for transport.
///
/// # Errors
///
/// Returns [`PhotoError::Missing`] when the capture flow was dismissed or
/// produced no bytes, [`PhotoError::TooLarge`] above `limit` raw bytes,
/// and [`PhotoError::Unreadable`] on a device failure.
pub async fn capture_proof<S: ProofSource>(source: &S, limit: usize) -> Result<ProofPhoto, PhotoError> {
    let bytes = source
        .acquire()
        .await
        .map_err(|e| PhotoError::Unreadable(e.to_string()))?;
    match bytes {
        Some(bytes) if !bytes.is_empty() => ProofPhoto::from_bytes(&bytes, limit),
        _ => Err(PhotoError::Missing),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::super::source::ProofSourceError;
    use super::*;

    struct FixedCamera(Result<Option<Vec<u8>>, ProofSourceError>);

    impl ProofSource for FixedCamera {
        async fn acquire(&self) -> Result<Option<Vec<u8>>, ProofSourceError> {
            self.0.clone()
        }
    }

    #[tokio::test]
    async fn captured_image_is_encoded() {
        let camera = FixedCamera(Ok(Some(b"odometer.jpg".to_vec())));
        let result = capture_proof(&camera, 1024).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn dismissed_capture_is_missing() {
        let camera = FixedCamera(Ok(None));
        assert_eq!(capture_proof(&camera, 1024).await, Err(PhotoError::Missing));
    }

    #[tokio::test]
    async fn oversized_image_is_rejected_at_the_device() {
        let camera = FixedCamera(Ok(Some(vec![0u8; 2048])));
        let result = capture_proof(&camera, 1024).await;
        assert!(matches!(result, Err(PhotoError::TooLarge { .. })));
    }

    #[tokio::test]
    async fn device_failure_is_unreadable() {
        let camera = FixedCamera(Err(ProofSourceError("shutter fault".to_string())));
        let result = capture_proof(&camera, 1024).await;
        assert!(matches!(result, Err(PhotoError::Unreadable(_))));
    }
}
