//! Read interface over collaborator-owned driver and assignment records.
//!
//! Driver, vehicle, and assignment CRUD live in the fleet administration
//! service. The summary aggregator only needs a few fields from them, so
//! this trait is the whole dependency surface; nothing here ever writes.

use std::future::Future;

use chrono::NaiveDate;

use crate::domain::ids::DriverId;
use crate::error::GatewayError;

/// The slice of a driver record the gateway cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverRecord {
    /// Driver identifier.
    pub id: DriverId,
    /// Display name.
    pub name: String,
    /// Contact phone, when on record.
    pub phone: Option<String>,
    /// Registration number of the assigned vehicle, if any.
    pub vehicle_number: Option<String>,
    /// Vehicle type label, if any.
    pub vehicle_type: Option<String>,
    /// Whether the record is active.
    pub is_active: bool,
}

/// Read-only lookups against the fleet service's records.
pub trait DriverDirectory: Send + Sync {
    /// Loads one driver record, or `None` when the account was never
    /// provisioned.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on lookup failure.
    fn driver(
        &self,
        driver_id: DriverId,
    ) -> impl Future<Output = Result<Option<DriverRecord>, GatewayError>> + Send;

    /// Number of active work assignments for a driver on a date.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on lookup failure.
    fn assignments_count(
        &self,
        driver_id: DriverId,
        date: NaiveDate,
    ) -> impl Future<Output = Result<u64, GatewayError>> + Send;

    /// Drivers with at least one active assignment on a date.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on lookup failure.
    fn drivers_with_assignments_on(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Vec<DriverId>, GatewayError>> + Send;
}
