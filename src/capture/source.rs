//! Device facility seams for location and camera capture.
//!
//! The validator never talks to hardware directly; it drives a
//! [`LocationSource`] so the retry/staleness policy stays a plain,
//! testable function.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};

/// Accuracy tier requested from the location facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccuracyTier {
    /// High-accuracy mode (GNSS), slower to first fix.
    High,
    /// Coarse mode (cell/wifi assisted), faster but less precise.
    Coarse,
}

/// Parameters for one acquisition attempt.
#[derive(Debug, Clone, Copy)]
pub struct FixRequest {
    /// Accuracy tier to request.
    pub tier: AccuracyTier,
    /// Bounded wait the facility should honor for this attempt.
    pub timeout: Duration,
}

/// A location reading exactly as the facility reported it, before any
/// freshness or range validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawFix {
    /// Reported latitude in degrees.
    pub latitude: f64,
    /// Reported longitude in degrees.
    pub longitude: f64,
    /// Reported horizontal accuracy in meters, when available.
    pub accuracy_m: Option<f64>,
    /// Device clock at acquisition. A reading much older than "now" is a
    /// cached value the facility replayed instead of a live read.
    pub captured_at: DateTime<Utc>,
}

/// Failure causes a location facility can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// The user or platform denied the location permission.
    #[error("location permission denied by the device")]
    PermissionDenied,
    /// The facility could not produce a position (no signal, airplane
    /// mode, hardware fault).
    #[error("position unavailable")]
    PositionUnavailable,
    /// The facility gave up within its own bounded wait.
    #[error("location request timed out in the device facility")]
    Timeout,
}

/// A device location facility.
///
/// Implementations wrap whatever platform API actually produces fixes.
/// `acquire` must resolve within roughly the requested timeout; the
/// validator additionally enforces the bound externally.
pub trait LocationSource: Send + Sync {
    /// Whether the facility exists and is enabled on this device.
    fn is_available(&self) -> bool;

    /// Requests a single reading at the given tier and bounded wait.
    fn acquire(
        &self,
        request: FixRequest,
    ) -> impl Future<Output = Result<RawFix, SourceError>> + Send;
}

/// A device camera or file-picker facility producing proof images.
pub trait ProofSource: Send + Sync {
    /// Acquires one image. Resolves to `None` when the user dismissed the
    /// capture flow without taking a picture.
    fn acquire(&self) -> impl Future<Output = Result<Option<Vec<u8>>, ProofSourceError>> + Send;
}

/// Failure reported by a proof capture facility.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("capture device failed: {0}")]
pub struct ProofSourceError(pub String);
