//! Error types for VDRIVE.

use thiserror::Error;

/// Common error type for VDRIVE.
#[derive(Error, Debug)]
pub enum VdriveError {
    /// Database error.
    ///
    /// Generic database error wrapping failures from the sqlx backend.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Permission denied error.
    #[error("permission denied: {0}")]
    Permission(String),

    /// Validation error for user input (malformed name, path or field combination).
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    ///
    /// Also covers soft-deleted and foreign-owned resources, which must be
    /// indistinguishable from true absence.
    #[error("{0} not found")]
    NotFound(String),

    /// Naming or sharing uniqueness violation.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

// Conversion from sqlx errors.
//
// Unique-constraint violations are translated to Conflict here so that a race
// surviving a pre-check surfaces exactly like a pre-checked conflict.
impl From<sqlx::Error> for VdriveError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.kind() == sqlx::error::ErrorKind::UniqueViolation {
                return VdriveError::Conflict("unique constraint violated".to_string());
            }
        }
        VdriveError::Database(e.to_string())
    }
}

/// Result type alias for VDRIVE operations.
pub type Result<T> = std::result::Result<T, VdriveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_error_display() {
        let err = VdriveError::Permission("owner only".to_string());
        assert_eq!(err.to_string(), "permission denied: owner only");
    }

    #[test]
    fn test_validation_error_display() {
        let err = VdriveError::Validation("name too long".to_string());
        assert_eq!(err.to_string(), "validation error: name too long");
    }

    #[test]
    fn test_not_found_error_display() {
        let err = VdriveError::NotFound("node".to_string());
        assert_eq!(err.to_string(), "node not found");
    }

    #[test]
    fn test_conflict_error_display() {
        let err = VdriveError::Conflict("name taken".to_string());
        assert_eq!(err.to_string(), "conflict: name taken");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: VdriveError = io_err.into();
        assert!(matches!(err, VdriveError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_result_alias() {
        fn sample_ok() -> Result<i32> {
            Ok(42)
        }

        fn sample_err() -> Result<i32> {
            Err(VdriveError::Auth("test".to_string()))
        }

        assert_eq!(sample_ok().unwrap(), 42);
        assert!(sample_err().is_err());
    }
}
