//! Service layer providing business-oriented operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in the `models` crate.
//! - The award workflow in `award` is the only multi-record mutation;
//!   everything else is routine CRUD.

pub mod errors;
pub mod pagination;
pub mod auth;
pub mod project_service;
pub mod bid_service;
pub mod award;
