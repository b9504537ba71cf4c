//! Summary service: supervisory rollups over journey logs and
//! collaborator records.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::ids::DriverId;
use crate::domain::journey::JourneyStatus;
use crate::domain::summary::DaySummary;
use crate::error::GatewayError;
use crate::persistence::directory::DriverDirectory;
use crate::persistence::store::JourneyStore;

/// Read-only projection builder.
///
/// Every call re-reads current state; nothing is cached past the request
/// and nothing here ever writes. Concurrent journey transitions may land
/// before or after a given read, either of which is a consistent answer.
#[derive(Debug)]
pub struct SummaryService<S, D> {
    store: Arc<S>,
    directory: Arc<D>,
}

impl<S, D> Clone for SummaryService<S, D> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            directory: Arc::clone(&self.directory),
        }
    }
}

impl<S: JourneyStore, D: DriverDirectory> SummaryService<S, D> {
    /// Creates a new `SummaryService`.
    #[must_use]
    pub fn new(store: Arc<S>, directory: Arc<D>) -> Self {
        Self { store, directory }
    }

    /// One driver's rollup for a date.
    ///
    /// A missing journey log is not an error: it reads as `PENDING` with
    /// zero kilometers.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::DriverNotFound`] when the driver record was
    /// never provisioned, and a [`GatewayError`] on storage failure.
    pub async fn daily_summary(
        &self,
        driver_id: DriverId,
        date: NaiveDate,
    ) -> Result<DaySummary, GatewayError> {
        let Some(record) = self.directory.driver(driver_id).await? else {
            return Err(GatewayError::DriverNotFound(driver_id));
        };

        let log = self.store.find(driver_id, date).await?;
        let (status, total_km) = log.map_or((JourneyStatus::Pending, 0.0), |log| {
            (log.status, log.total_km.unwrap_or(0.0))
        });

        let assignments_count = self.directory.assignments_count(driver_id, date).await?;

        Ok(DaySummary {
            driver_id,
            driver_name: record.name,
            driver_phone: record.phone,
            vehicle_number: record.vehicle_number,
            vehicle_type: record.vehicle_type,
            status,
            total_km,
            assignments_count,
            date,
            is_active: record.is_active,
        })
    }

    /// Fleet-wide rollup: every driver with activity on the date.
    ///
    /// Activity means a journey log or at least one assignment. Drivers
    /// whose record cannot be loaded are skipped with a warning so one
    /// provisioning gap does not blank the whole view.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on storage failure.
    pub async fn fleet_summary(&self, date: NaiveDate) -> Result<Vec<DaySummary>, GatewayError> {
        let mut active: BTreeSet<DriverId> = BTreeSet::new();
        for log in self.store.logs_on(date).await? {
            active.insert(log.driver_id);
        }
        for driver_id in self.directory.drivers_with_assignments_on(date).await? {
            active.insert(driver_id);
        }

        let mut summaries = Vec::with_capacity(active.len());
        for driver_id in active {
            match self.daily_summary(driver_id, date).await {
                Ok(summary) => summaries.push(summary),
                Err(GatewayError::DriverNotFound(_)) => {
                    tracing::warn!(%driver_id, %date, "skipping unprovisioned driver in fleet summary");
                }
                Err(other) => return Err(other),
            }
        }
        Ok(summaries)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::geofix::GeoFix;
    use crate::domain::journey::JourneyLeg;
    use crate::domain::proof::ProofPhoto;
    use crate::persistence::directory::DriverRecord;
    use crate::persistence::memory::{MemoryDriverDirectory, MemoryJourneyStore};

    fn record(id: DriverId, name: &str) -> DriverRecord {
        DriverRecord {
            id,
            name: name.to_string(),
            phone: Some("98100-00000".to_string()),
            vehicle_number: Some("DL1RT2026".to_string()),
            vehicle_type: Some("tempo".to_string()),
            is_active: true,
        }
    }

    fn leg() -> JourneyLeg {
        let Ok(fix) = GeoFix::new(28.6139, 77.2090, None, Utc::now()) else {
            panic!("test coordinates must be in range");
        };
        let Ok(photo) = ProofPhoto::from_bytes(b"img", 1024) else {
            panic!("test photo must encode");
        };
        JourneyLeg { fix, photo }
    }

    fn make_service() -> (
        SummaryService<MemoryJourneyStore, MemoryDriverDirectory>,
        Arc<MemoryJourneyStore>,
        Arc<MemoryDriverDirectory>,
    ) {
        let store = Arc::new(MemoryJourneyStore::new());
        let directory = Arc::new(MemoryDriverDirectory::new());
        let service = SummaryService::new(Arc::clone(&store), Arc::clone(&directory));
        (service, store, directory)
    }

    #[tokio::test]
    async fn missing_log_reads_as_pending() {
        let (service, _store, directory) = make_service();
        let driver = DriverId::new();
        let today = Utc::now().date_naive();
        directory.insert_driver(record(driver, "Asha")).await;
        directory.set_assignments(driver, today, 2).await;

        let Ok(summary) = service.daily_summary(driver, today).await else {
            panic!("summary must build");
        };
        assert_eq!(summary.status, JourneyStatus::Pending);
        assert_eq!(summary.total_km, 0.0);
        assert_eq!(summary.assignments_count, 2);
        assert_eq!(summary.driver_name, "Asha");
    }

    #[tokio::test]
    async fn unprovisioned_driver_is_not_found() {
        let (service, _store, _directory) = make_service();
        let result = service
            .daily_summary(DriverId::new(), Utc::now().date_naive())
            .await;
        assert!(matches!(result, Err(GatewayError::DriverNotFound(_))));
    }

    #[tokio::test]
    async fn completed_log_feeds_status_and_distance() {
        let (service, store, directory) = make_service();
        let driver = DriverId::new();
        let today = Utc::now().date_naive();
        directory.insert_driver(record(driver, "Ravi")).await;

        let _ = store.insert_started(driver, today, leg()).await;
        let _ = store.complete_in_progress(driver, today, leg(), 42.5).await;

        let Ok(summary) = service.daily_summary(driver, today).await else {
            panic!("summary must build");
        };
        assert_eq!(summary.status, JourneyStatus::Completed);
        assert_eq!(summary.total_km, 42.5);
    }

    #[tokio::test]
    async fn fleet_summary_unions_logs_and_assignments() {
        let (service, store, directory) = make_service();
        let today = Utc::now().date_naive();

        let with_log = DriverId::new();
        directory.insert_driver(record(with_log, "Asha")).await;
        let _ = store.insert_started(with_log, today, leg()).await;

        let with_assignment = DriverId::new();
        directory.insert_driver(record(with_assignment, "Ravi")).await;
        directory.set_assignments(with_assignment, today, 1).await;

        let idle = DriverId::new();
        directory.insert_driver(record(idle, "Meera")).await;

        let Ok(summaries) = service.fleet_summary(today).await else {
            panic!("fleet summary must build");
        };
        assert_eq!(summaries.len(), 2);
        let ids: Vec<DriverId> = summaries.iter().map(|s| s.driver_id).collect();
        assert!(ids.contains(&with_log));
        assert!(ids.contains(&with_assignment));
        assert!(!ids.contains(&idle));
    }

    #[tokio::test]
    async fn fleet_summary_skips_unprovisioned_drivers() {
        let (service, store, _directory) = make_service();
        let today = Utc::now().date_naive();

        // A log exists but the driver record was never created.
        let _ = store.insert_started(DriverId::new(), today, leg()).await;

        let Ok(summaries) = service.fleet_summary(today).await else {
            panic!("fleet summary must tolerate the gap");
        };
        assert!(summaries.is_empty());
    }
}
