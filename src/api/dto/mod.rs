//! Data Transfer Objects for REST request/response serialization.
//!
//! DTOs stay on primitive wire types (plain UUIDs, status strings);
//! conversion to and from the typed domain model happens at the handler
//! boundary.

pub mod journey_dto;
pub mod summary_dto;

pub use journey_dto::*;
pub use summary_dto::*;
