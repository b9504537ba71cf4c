//! Journey log storage seam.
//!
//! The two mutating operations are deliberately shaped so that the
//! one-journey-per-driver-per-day invariant lives in the store, not in the
//! caller: `insert_started` is an insert-or-nothing against the
//! (driver, date) uniqueness constraint and `complete_in_progress` is a
//! state-guarded update. Either returns `None` when it lost to the
//! existing state, which the service layer surfaces as a conflict. A
//! concurrent double-tap therefore resolves to exactly one winner.

use std::future::Future;

use chrono::NaiveDate;

use crate::domain::ids::DriverId;
use crate::domain::journey::{JourneyLeg, JourneyLog};
use crate::error::GatewayError;

/// Durable storage for [`JourneyLog`] rows.
pub trait JourneyStore: Send + Sync {
    /// Loads the log for one (driver, date), if any.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on storage failure.
    fn find(
        &self,
        driver_id: DriverId,
        log_date: NaiveDate,
    ) -> impl Future<Output = Result<Option<JourneyLog>, GatewayError>> + Send;

    /// Atomically creates the day's log in `IN_PROGRESS` with the start
    /// leg, or returns `None` when a log for (driver, date) already
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on storage failure.
    fn insert_started(
        &self,
        driver_id: DriverId,
        log_date: NaiveDate,
        start: JourneyLeg,
    ) -> impl Future<Output = Result<Option<JourneyLog>, GatewayError>> + Send;

    /// Atomically records the end leg and distance on the day's log,
    /// guarded on the row being exactly `IN_PROGRESS`. Returns `None`
    /// when no such row exists (nothing started, or already completed).
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on storage failure.
    fn complete_in_progress(
        &self,
        driver_id: DriverId,
        log_date: NaiveDate,
        end: JourneyLeg,
        total_km: f64,
    ) -> impl Future<Output = Result<Option<JourneyLog>, GatewayError>> + Send;

    /// Loads every log recorded for a calendar date, for fleet rollups.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on storage failure.
    fn logs_on(
        &self,
        log_date: NaiveDate,
    ) -> impl Future<Output = Result<Vec<JourneyLog>, GatewayError>> + Send;
}
