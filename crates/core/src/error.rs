use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl CoreError {
    /// Shorthand for a missing `Movie`.
    pub fn movie_not_found(id: DbId) -> Self {
        CoreError::NotFound {
            entity: "Movie",
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = CoreError::movie_not_found(7);
        assert_eq!(err.to_string(), "Entity not found: Movie with id 7");
    }

    #[test]
    fn validation_message_is_prefixed() {
        let err = CoreError::Validation("title must not be empty".into());
        assert_eq!(err.to_string(), "Validation failed: title must not be empty");
    }
}
