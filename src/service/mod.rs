//! Service layer: orchestration over storage and collaborator lookups.

pub mod journey_service;
pub mod summary_service;

pub use journey_service::JourneyService;
pub use summary_service::SummaryService;
