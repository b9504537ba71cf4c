//! Persistence layer: journey storage and collaborator record lookups.
//!
//! Provides the [`JourneyStore`] and [`DriverDirectory`] seams with a
//! PostgreSQL implementation for production (`sqlx::PgPool`) and an
//! in-process implementation for tests and embedding. The per-driver-day
//! uniqueness invariant is a property of the store, enforced at the
//! database by a unique constraint plus state-guarded updates.

pub mod directory;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use directory::{DriverDirectory, DriverRecord};
pub use memory::{MemoryDriverDirectory, MemoryJourneyStore};
pub use postgres::{PostgresDriverDirectory, PostgresJourneyStore};
pub use store::JourneyStore;
