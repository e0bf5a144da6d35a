use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid query plan: {0}")]
    InvalidPlan(String),

    #[error("Unsupported page type: {0}")]
    UnsupportedPage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
