//! Capture layer: validated acquisition of location fixes and proof
//! photos.
//!
//! Everything here runs before a journey transition is requested; a
//! capture failure means no network call is made at all. The device
//! facilities are trait seams so the retry and freshness policies are
//! ordinary functions under test.

pub mod proof;
pub mod source;
pub mod validator;

pub use proof::capture_proof;
pub use source::{
    AccuracyTier, FixRequest, LocationSource, ProofSource, ProofSourceError, RawFix, SourceError,
};
pub use validator::{CapturePolicy, FixPurpose, GpsError, capture_fix};
