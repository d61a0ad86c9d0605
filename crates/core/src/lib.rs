//! Domain logic for the resource service.
//!
//! Pure, I/O-free building blocks shared by the persistence and HTTP layers:
//! the error taxonomy, request validation, and search/pagination rules.

pub mod error;
pub mod resource;
pub mod search;
pub mod types;
pub mod validation;
