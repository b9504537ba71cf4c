//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::persistence::postgres::{PostgresDriverDirectory, PostgresJourneyStore};
use crate::service::{JourneyService, SummaryService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Journey transition orchestration.
    pub journey_service: Arc<JourneyService<PostgresJourneyStore>>,
    /// Read-only summary projections.
    pub summary_service: Arc<SummaryService<PostgresJourneyStore, PostgresDriverDirectory>>,
    /// Ceiling on raw proof photo bytes for inbound payload validation.
    pub photo_max_bytes: usize,
}
