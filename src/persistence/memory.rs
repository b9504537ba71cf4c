//! In-process implementations of the storage seams.
//!
//! [`MemoryJourneyStore`] keeps the whole journey table behind one
//! `tokio::sync::RwLock`, so the insert-or-nothing and guarded-update
//! semantics hold under concurrency exactly as they do against the
//! database constraint. Used by the test suite and by embedders that run
//! without PostgreSQL.

use std::collections::HashMap;

use chrono::NaiveDate;
use tokio::sync::RwLock;

use super::directory::{DriverDirectory, DriverRecord};
use super::store::JourneyStore;
use crate::domain::ids::DriverId;
use crate::domain::journey::{JourneyLeg, JourneyLog};
use crate::error::GatewayError;

/// In-memory journey store keyed by (driver, date).
#[derive(Debug, Default)]
pub struct MemoryJourneyStore {
    logs: RwLock<HashMap<(DriverId, NaiveDate), JourneyLog>>,
}

impl MemoryJourneyStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl JourneyStore for MemoryJourneyStore {
    async fn find(
        &self,
        driver_id: DriverId,
        log_date: NaiveDate,
    ) -> Result<Option<JourneyLog>, GatewayError> {
        let logs = self.logs.read().await;
        Ok(logs.get(&(driver_id, log_date)).cloned())
    }

    async fn insert_started(
        &self,
        driver_id: DriverId,
        log_date: NaiveDate,
        start: JourneyLeg,
    ) -> Result<Option<JourneyLog>, GatewayError> {
        let mut logs = self.logs.write().await;
        if logs.contains_key(&(driver_id, log_date)) {
            return Ok(None);
        }
        let log = JourneyLog::started(driver_id, log_date, start);
        logs.insert((driver_id, log_date), log.clone());
        Ok(Some(log))
    }

    async fn complete_in_progress(
        &self,
        driver_id: DriverId,
        log_date: NaiveDate,
        end: JourneyLeg,
        total_km: f64,
    ) -> Result<Option<JourneyLog>, GatewayError> {
        let mut logs = self.logs.write().await;
        let Some(log) = logs.get_mut(&(driver_id, log_date)) else {
            return Ok(None);
        };
        if log.complete(end, total_km).is_err() {
            return Ok(None);
        }
        Ok(Some(log.clone()))
    }

    async fn logs_on(&self, log_date: NaiveDate) -> Result<Vec<JourneyLog>, GatewayError> {
        let logs = self.logs.read().await;
        let mut matching: Vec<JourneyLog> = logs
            .values()
            .filter(|log| log.log_date == log_date)
            .cloned()
            .collect();
        matching.sort_by_key(|log| log.driver_id);
        Ok(matching)
    }
}

/// In-memory driver directory for tests and standalone deployments.
#[derive(Debug, Default)]
pub struct MemoryDriverDirectory {
    drivers: RwLock<HashMap<DriverId, DriverRecord>>,
    assignments: RwLock<HashMap<(DriverId, NaiveDate), u64>>,
}

impl MemoryDriverDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a driver record.
    pub async fn insert_driver(&self, record: DriverRecord) {
        self.drivers.write().await.insert(record.id, record);
    }

    /// Sets the assignment count for a (driver, date).
    pub async fn set_assignments(&self, driver_id: DriverId, date: NaiveDate, count: u64) {
        self.assignments
            .write()
            .await
            .insert((driver_id, date), count);
    }
}

impl DriverDirectory for MemoryDriverDirectory {
    async fn driver(&self, driver_id: DriverId) -> Result<Option<DriverRecord>, GatewayError> {
        Ok(self.drivers.read().await.get(&driver_id).cloned())
    }

    async fn assignments_count(
        &self,
        driver_id: DriverId,
        date: NaiveDate,
    ) -> Result<u64, GatewayError> {
        Ok(self
            .assignments
            .read()
            .await
            .get(&(driver_id, date))
            .copied()
            .unwrap_or(0))
    }

    async fn drivers_with_assignments_on(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<DriverId>, GatewayError> {
        let assignments = self.assignments.read().await;
        let mut ids: Vec<DriverId> = assignments
            .iter()
            .filter(|((_, d), count)| *d == date && **count > 0)
            .map(|((driver, _), _)| *driver)
            .collect();
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::geofix::GeoFix;
    use crate::domain::journey::JourneyStatus;
    use crate::domain::proof::ProofPhoto;

    fn leg() -> JourneyLeg {
        let Ok(fix) = GeoFix::new(28.6139, 77.2090, None, Utc::now()) else {
            panic!("test coordinates must be in range");
        };
        let Ok(photo) = ProofPhoto::from_bytes(b"img", 1024) else {
            panic!("test photo must encode");
        };
        JourneyLeg { fix, photo }
    }

    #[tokio::test]
    async fn second_insert_for_same_day_returns_none() {
        let store = MemoryJourneyStore::new();
        let driver = DriverId::new();
        let today = Utc::now().date_naive();

        let first = store.insert_started(driver, today, leg()).await;
        assert!(matches!(first, Ok(Some(_))));

        let second = store.insert_started(driver, today, leg()).await;
        assert!(matches!(second, Ok(None)));
    }

    #[tokio::test]
    async fn complete_requires_an_in_progress_row() {
        let store = MemoryJourneyStore::new();
        let driver = DriverId::new();
        let today = Utc::now().date_naive();

        let nothing = store.complete_in_progress(driver, today, leg(), 1.0).await;
        assert!(matches!(nothing, Ok(None)));

        let _ = store.insert_started(driver, today, leg()).await;
        let done = store.complete_in_progress(driver, today, leg(), 1.0).await;
        let Ok(Some(log)) = done else {
            panic!("in-progress row must complete");
        };
        assert_eq!(log.status, JourneyStatus::Completed);

        let again = store.complete_in_progress(driver, today, leg(), 1.0).await;
        assert!(matches!(again, Ok(None)));
    }

    #[tokio::test]
    async fn logs_on_filters_by_date() {
        let store = MemoryJourneyStore::new();
        let today = Utc::now().date_naive();
        let _ = store.insert_started(DriverId::new(), today, leg()).await;
        let _ = store.insert_started(DriverId::new(), today, leg()).await;

        let Ok(todays) = store.logs_on(today).await else {
            panic!("read must succeed");
        };
        assert_eq!(todays.len(), 2);

        let Some(other_day) = today.pred_opt() else {
            panic!("date arithmetic");
        };
        let Ok(others) = store.logs_on(other_day).await else {
            panic!("read must succeed");
        };
        assert!(others.is_empty());
    }
}
