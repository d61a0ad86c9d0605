//! Repository layer.
//!
//! [`ResourceRepository`] is the storage contract the service layer depends
//! on. [`PgResourceRepo`] backs it with PostgreSQL; [`InMemoryResourceRepo`]
//! keeps everything in process for local runs and tests.

pub mod memory_repo;
pub mod resource_repo;

pub use memory_repo::InMemoryResourceRepo;
pub use resource_repo::{PgResourceRepo, ResourceRepository};
