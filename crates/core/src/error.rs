use crate::types::DbId;
use crate::validation::FieldViolation;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The request body or query failed schema validation.
    #[error("Validation error")]
    Validation(Vec<FieldViolation>),

    /// A path parameter could not be interpreted (e.g. a non-integer id).
    #[error("{0}")]
    InvalidInput(String),

    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: DbId },
}
