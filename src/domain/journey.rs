//! Journey lifecycle: one log per driver per calendar day.
//!
//! A [`JourneyLog`] is the operational record of a driver's workday. It is
//! created directly in `IN_PROGRESS` by the start action (the `PENDING`
//! state is the representation of "no row yet") and advances exactly once
//! to `COMPLETED`. Status never moves backward and no state is skipped.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::geofix::GeoFix;
use super::ids::{DriverId, JourneyId};
use super::proof::ProofPhoto;

/// Lifecycle state of a day's journey log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JourneyStatus {
    /// No journey recorded yet for the day.
    Pending,
    /// Start fix and photo captured; the driver is on the road.
    InProgress,
    /// End fix captured and distance derived. Terminal.
    Completed,
}

impl JourneyStatus {
    /// Whether the state machine permits advancing from `self` to `next`.
    ///
    /// Only single forward steps are legal; `Completed` is terminal.
    #[must_use]
    pub const fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::InProgress) | (Self::InProgress, Self::Completed)
        )
    }
}

impl fmt::Display for JourneyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
        };
        write!(f, "{s}")
    }
}

/// Error for an unrecognized status string from storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown journey status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for JourneyStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// One endpoint of a journey: the validated fix plus its proof photo.
#[derive(Debug, Clone, PartialEq)]
pub struct JourneyLeg {
    /// The validated location reading.
    pub fix: GeoFix,
    /// Proof image captured alongside the fix.
    pub photo: ProofPhoto,
}

/// Attempted transition that the state machine forbids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("illegal journey transition: {from} -> {to}")]
pub struct InvalidTransition {
    /// State the log was in.
    pub from: JourneyStatus,
    /// State the caller asked for.
    pub to: JourneyStatus,
}

/// The journey record for one (driver, calendar date) pair.
///
/// Append-only in normal operation: rows are never deleted and only the
/// owning driver's start/end actions mutate them. `total_km` is always
/// derived from the two fixes, never taken from a client.
#[derive(Debug, Clone, PartialEq)]
pub struct JourneyLog {
    /// Row identifier.
    pub id: JourneyId,
    /// Owning driver.
    pub driver_id: DriverId,
    /// Calendar date the journey belongs to. Unique together with
    /// `driver_id`.
    pub log_date: NaiveDate,
    /// Current lifecycle state.
    pub status: JourneyStatus,
    /// Start fix and photo; present once status ≥ `IN_PROGRESS`.
    pub start: Option<JourneyLeg>,
    /// End fix and photo; present only once status = `COMPLETED`.
    pub end: Option<JourneyLeg>,
    /// Derived distance in kilometers; present only once `COMPLETED`.
    pub total_km: Option<f64>,
    /// Free-text note attached by supervisory tooling.
    pub remarks: Option<String>,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl JourneyLog {
    /// Creates a log directly in `IN_PROGRESS` with the start leg recorded.
    #[must_use]
    pub fn started(driver_id: DriverId, log_date: NaiveDate, start: JourneyLeg) -> Self {
        let now = Utc::now();
        Self {
            id: JourneyId::new(),
            driver_id,
            log_date,
            status: JourneyStatus::InProgress,
            start: Some(start),
            end: None,
            total_km: None,
            remarks: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Records the end leg and derived distance, advancing to `COMPLETED`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] unless the log is exactly
    /// `IN_PROGRESS`.
    pub fn complete(&mut self, end: JourneyLeg, total_km: f64) -> Result<(), InvalidTransition> {
        if !self.status.can_advance_to(JourneyStatus::Completed) {
            return Err(InvalidTransition {
                from: self.status,
                to: JourneyStatus::Completed,
            });
        }
        self.status = JourneyStatus::Completed;
        self.end = Some(end);
        self.total_km = Some(total_km);
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::geofix::GeoFix;

    fn leg(latitude: f64, longitude: f64) -> JourneyLeg {
        let Ok(fix) = GeoFix::new(latitude, longitude, Some(8.0), Utc::now()) else {
            panic!("test coordinates must be in range");
        };
        let Ok(photo) = ProofPhoto::from_bytes(b"img", 1024) else {
            panic!("test photo must encode");
        };
        JourneyLeg { fix, photo }
    }

    #[test]
    fn status_advances_forward_only() {
        use JourneyStatus::{Completed, InProgress, Pending};
        assert!(Pending.can_advance_to(InProgress));
        assert!(InProgress.can_advance_to(Completed));
        assert!(!Pending.can_advance_to(Completed));
        assert!(!Completed.can_advance_to(InProgress));
        assert!(!InProgress.can_advance_to(Pending));
        assert!(!Completed.can_advance_to(Completed));
    }

    #[test]
    fn status_text_round_trips() {
        for status in [
            JourneyStatus::Pending,
            JourneyStatus::InProgress,
            JourneyStatus::Completed,
        ] {
            assert_eq!(status.to_string().parse(), Ok(status));
        }
        assert!("DONE".parse::<JourneyStatus>().is_err());
    }

    #[test]
    fn started_log_is_in_progress() {
        let log = JourneyLog::started(DriverId::new(), Utc::now().date_naive(), leg(28.6, 77.2));
        assert_eq!(log.status, JourneyStatus::InProgress);
        assert!(log.start.is_some());
        assert!(log.end.is_none());
        assert!(log.total_km.is_none());
    }

    #[test]
    fn complete_records_distance_and_is_terminal() {
        let mut log =
            JourneyLog::started(DriverId::new(), Utc::now().date_naive(), leg(28.6, 77.2));
        let Ok(()) = log.complete(leg(28.7, 77.1), 14.44) else {
            panic!("in-progress log must complete");
        };
        assert_eq!(log.status, JourneyStatus::Completed);
        assert_eq!(log.total_km, Some(14.44));

        let again = log.complete(leg(28.8, 77.0), 1.0);
        assert!(matches!(
            again,
            Err(InvalidTransition {
                from: JourneyStatus::Completed,
                ..
            })
        ));
    }
}
