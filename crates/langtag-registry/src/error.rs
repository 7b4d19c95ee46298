//! Registry loading errors.
//!
//! Every variant is a missing-data condition: the backing registry could
//! not be located, read, or parsed into consistent tables. Callers treat
//! these as fatal for the operation that triggered the load.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or querying the registry store.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A configured registry file was not found.
    #[error("registry file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// JSON bundle parsing failed.
    #[error("failed to parse JSON registry bundle at {path}: {source}")]
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The record-jar text is malformed.
    #[error("malformed registry text at line {line}: {reason}")]
    RecordJar { line: usize, reason: String },

    /// A record or index entry is inconsistent.
    #[error("invalid registry record at offset {offset}: {reason}")]
    InvalidRecord { offset: usize, reason: String },

    /// `File-Date` is not a `YYYY-MM-DD` date.
    #[error("invalid File-Date {value:?}: {source}")]
    InvalidFileDate {
        value: String,
        source: chrono::ParseError,
    },

    /// A table name other than index, registry, macrolanguage or meta.
    #[error("unknown registry table: {name:?}")]
    UnknownTable { name: String },

    /// The process-wide store failed to initialise earlier.
    #[error("language subtag registry unavailable: {reason}")]
    MissingData { reason: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic serde_json error (not file-specific).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_not_found_display() {
        let err = RegistryError::FileNotFound {
            path: PathBuf::from("/tmp/missing-registry.txt"),
        };
        assert!(format!("{err}").contains("/tmp/missing-registry.txt"));
    }

    #[test]
    fn record_jar_display() {
        let err = RegistryError::RecordJar {
            line: 12,
            reason: "expected 'Field: value'".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("line 12"));
        assert!(msg.contains("Field: value"));
    }

    #[test]
    fn invalid_record_display() {
        let err = RegistryError::InvalidRecord {
            offset: 3,
            reason: "record has neither Subtag nor Tag".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("offset 3"));
        assert!(msg.contains("neither"));
    }

    #[test]
    fn invalid_file_date_display() {
        let source = chrono::NaiveDate::parse_from_str("05/03/2021", "%Y-%m-%d").unwrap_err();
        let err = RegistryError::InvalidFileDate {
            value: "05/03/2021".to_string(),
            source,
        };
        assert!(format!("{err}").contains("05/03/2021"));
    }

    #[test]
    fn missing_data_display() {
        let err = RegistryError::MissingData {
            reason: "registry file not found: x".to_string(),
        };
        assert!(format!("{err}").contains("unavailable"));
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = RegistryError::from(io_err);
        assert!(format!("{err}").contains("access denied"));
    }

    #[test]
    fn registry_result_alias_works() {
        let ok: RegistryResult<i32> = Ok(42);
        assert_eq!(ok.unwrap(), 42);

        let err: RegistryResult<i32> = Err(RegistryError::UnknownTable {
            name: "tables".to_string(),
        });
        assert!(err.is_err());
    }
}
