//! Client-facing error taxonomy for repository operations.

use thiserror::Error;

/// What a caller of the repository can observe when an operation fails.
///
/// `NotFound` and `DuplicateKey` carry descriptive, client-safe detail.
/// `StorageFault` is deliberately opaque: the underlying cause is logged
/// where it happens and never put in the message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// No lookup strategy matched the given key.
    #[error("pokemon with id, name or no \"{key}\" not found")]
    NotFound { key: String },

    /// Uniqueness violation on `no` or `name`.
    #[error("pokemon already exists in db: {field} \"{value}\"")]
    DuplicateKey { field: &'static str, value: String },

    /// Any other persistence failure. Cause is in the server logs.
    #[error("internal storage error - check server logs")]
    StorageFault,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_key() {
        let err = RepositoryError::NotFound {
            key: "missingno".to_string(),
        };
        assert!(err.to_string().contains("\"missingno\""));
    }

    #[test]
    fn duplicate_key_names_field_and_value() {
        let err = RepositoryError::DuplicateKey {
            field: "name",
            value: "pikachu".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("name"));
        assert!(msg.contains("pikachu"));
    }

    #[test]
    fn storage_fault_is_opaque() {
        let msg = RepositoryError::StorageFault.to_string();
        assert_eq!(msg, "internal storage error - check server logs");
    }
}
