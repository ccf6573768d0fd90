use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self {
        Self::NotFound(format!("{} not found", entity))
    }
}

impl From<models::errors::ModelError> for ServiceError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Validation(m) => ServiceError::Validation(m),
            models::errors::ModelError::Db(m) => ServiceError::Db(m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_helper_names_entity() {
        let e = ServiceError::not_found("bid");
        assert_eq!(e.to_string(), "not found: bid not found");
    }

    #[test]
    fn model_validation_maps_to_validation() {
        let m = models::errors::ModelError::Validation("bad title".into());
        match ServiceError::from(m) {
            ServiceError::Validation(msg) => assert_eq!(msg, "bad title"),
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
