//! Row models and their wire projections.

pub mod resource;
