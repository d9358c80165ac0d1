use mongodb::bson;

/// Failures raised at the persistence boundary.
///
/// Handlers log these and answer with a static message; the cause never
/// reaches the client.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("failed to encode document: {0}")]
    Encode(#[from] bson::ser::Error),
    #[error("unexpected document shape: {0}")]
    Malformed(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_error_names_the_problem() {
        let err = StoreError::Malformed("inserted id is not an object id".to_string());
        assert_eq!(
            err.to_string(),
            "unexpected document shape: inserted id is not an object id"
        );
    }
}
