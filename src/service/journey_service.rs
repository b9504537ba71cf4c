//! Journey service: orchestrates the daily start/end lifecycle.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::domain::distance::journey_distance_km;
use crate::domain::geofix::GeoFix;
use crate::domain::ids::DriverId;
use crate::domain::journey::{JourneyLeg, JourneyLog, JourneyStatus};
use crate::domain::proof::ProofPhoto;
use crate::error::GatewayError;
use crate::persistence::store::JourneyStore;

/// The calendar date new journey actions are recorded against.
///
/// Uniform UTC date; the original deployment keyed on the server's local
/// day and this keeps the same single-boundary behavior.
#[must_use]
pub fn current_log_date() -> NaiveDate {
    Utc::now().date_naive()
}

/// Orchestration layer for journey transitions.
///
/// Stateless coordinator over a [`JourneyStore`]. Inputs arrive as already
/// validated domain values (`GeoFix`, `ProofPhoto`), so every method here
/// is about sequencing: read state for a precise error, derive what must
/// be persisted, then let the store's atomic operation decide any race.
#[derive(Debug)]
pub struct JourneyService<S> {
    store: Arc<S>,
}

impl<S> Clone for JourneyService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: JourneyStore> JourneyService<S> {
    /// Creates a new `JourneyService`.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Today's log for the driver, if one exists. Pure read: a driver who
    /// has not started yet simply gets `None`, no row is created.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on storage failure.
    pub async fn today_log(&self, driver_id: DriverId) -> Result<Option<JourneyLog>, GatewayError> {
        self.store.find(driver_id, current_log_date()).await
    }

    /// Opens today's journey with the start fix and proof photo.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::JourneyConflict`] when a log already exists
    /// for today (including when a concurrent duplicate submission won the
    /// insert race), and a [`GatewayError`] on storage failure.
    pub async fn start_journey(
        &self,
        driver_id: DriverId,
        fix: GeoFix,
        photo: ProofPhoto,
    ) -> Result<JourneyLog, GatewayError> {
        let log_date = current_log_date();
        let start = JourneyLeg { fix, photo };

        match self.store.insert_started(driver_id, log_date, start).await? {
            Some(log) => {
                tracing::info!(%driver_id, %log_date, "journey started");
                Ok(log)
            }
            None => Err(GatewayError::JourneyConflict(format!(
                "journey already started for {log_date}"
            ))),
        }
    }

    /// Closes today's journey, deriving and persisting the distance.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::JourneyConflict`] unless today's log is
    /// exactly in progress, [`GatewayError::InvalidRequest`] when the end
    /// fix predates the stored start fix, and a [`GatewayError`] on
    /// storage failure.
    pub async fn end_journey(
        &self,
        driver_id: DriverId,
        fix: GeoFix,
        photo: ProofPhoto,
    ) -> Result<JourneyLog, GatewayError> {
        let log_date = current_log_date();

        let Some(current) = self.store.find(driver_id, log_date).await? else {
            return Err(GatewayError::JourneyConflict(format!(
                "no journey started for {log_date}"
            )));
        };
        let Some(start) = current.start.as_ref().filter(|_| {
            current.status == JourneyStatus::InProgress
        }) else {
            return Err(GatewayError::JourneyConflict(format!(
                "journey for {log_date} is {} and cannot be ended",
                current.status
            )));
        };

        if fix.captured_at < start.fix.captured_at {
            return Err(GatewayError::InvalidRequest(
                "end fix predates the journey start".to_string(),
            ));
        }

        let total_km = journey_distance_km(&start.fix, &fix);
        let end = JourneyLeg { fix, photo };

        match self
            .store
            .complete_in_progress(driver_id, log_date, end, total_km)
            .await?
        {
            Some(log) => {
                tracing::info!(%driver_id, %log_date, total_km, "journey completed");
                Ok(log)
            }
            // The status check above passed but the guarded update found
            // no IN_PROGRESS row: a concurrent submission got there first.
            None => Err(GatewayError::JourneyConflict(format!(
                "journey for {log_date} was completed by a concurrent request"
            ))),
        }
    }
}
