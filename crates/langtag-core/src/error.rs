//! # Error Types: Subtag Lookup Failures
//!
//! Construction-time failures for explicit subtag and macrolanguage
//! lookups. These signal that the caller asked for a code, type, or
//! macrolanguage the registry does not contain. Validation findings on
//! arbitrary tag strings are never reported through this type; see
//! `langtag_tags::TagError`.
//!
//! Each variant carries the numeric code of its failure class:
//!
//! | Code | Variant |
//! |------|---------|
//! | 1 | `NonExistent`, `NonExistentType` |
//! | 2 | `WrongRecordKind` |
//! | 3 | `NotAMacrolanguage` |

use thiserror::Error;

use crate::kind::RecordType;

/// Numeric code for lookups of codes or types absent from the index.
pub const ERR_NONEXISTENT: u8 = 1;
/// Numeric code for codes that resolve to a whole-tag record.
pub const ERR_TAG: u8 = 2;
/// Numeric code for macrolanguage lookups of a non-macrolanguage code.
pub const ERR_NOT_MACROLANGUAGE: u8 = 3;

/// Failure to resolve a subtag against the registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubtagError {
    /// The code is not present in the registry index.
    #[error("Non-existent subtag {subtag}.")]
    NonExistent {
        /// Lowercased code that was looked up.
        subtag: String,
    },

    /// The code exists, but not with the requested type.
    #[error("Non-existent subtag {subtag} of type {subtag_type}.")]
    NonExistentType {
        /// Lowercased code that was looked up.
        subtag: String,
        /// Lowercased type name as requested.
        subtag_type: String,
    },

    /// The code and type resolve to a grandfathered or redundant tag record.
    #[error("{subtag} is a {record_type} tag")]
    WrongRecordKind {
        subtag: String,
        record_type: RecordType,
    },

    /// The code is not listed as a macrolanguage.
    #[error("'{code}' is not a macrolanguage.")]
    NotAMacrolanguage { code: String },
}

impl SubtagError {
    /// Numeric failure class.
    pub fn code(&self) -> u8 {
        match self {
            Self::NonExistent { .. } | Self::NonExistentType { .. } => ERR_NONEXISTENT,
            Self::WrongRecordKind { .. } => ERR_TAG,
            Self::NotAMacrolanguage { .. } => ERR_NOT_MACROLANGUAGE,
        }
    }
}

/// A type name that is not one of the registry's record types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown subtag type: {0:?}")]
pub struct KindParseError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_existent_display() {
        let err = SubtagError::NonExistent {
            subtag: "xyzzy".to_string(),
        };
        assert_eq!(err.to_string(), "Non-existent subtag xyzzy.");
        assert_eq!(err.code(), 1);
    }

    #[test]
    fn non_existent_type_display() {
        let err = SubtagError::NonExistentType {
            subtag: "en".to_string(),
            subtag_type: "script".to_string(),
        };
        assert_eq!(err.to_string(), "Non-existent subtag en of type script.");
        assert_eq!(err.code(), 1);
    }

    #[test]
    fn wrong_record_kind_display() {
        let err = SubtagError::WrongRecordKind {
            subtag: "en-gb-oed".to_string(),
            record_type: RecordType::Grandfathered,
        };
        assert_eq!(err.to_string(), "en-gb-oed is a grandfathered tag");
        assert_eq!(err.code(), 2);
    }

    #[test]
    fn not_a_macrolanguage_display() {
        let err = SubtagError::NotAMacrolanguage {
            code: "en".to_string(),
        };
        assert_eq!(err.to_string(), "'en' is not a macrolanguage.");
        assert_eq!(err.code(), 3);
    }

    #[test]
    fn kind_parse_error_display() {
        let err = KindParseError("dialect".to_string());
        assert!(err.to_string().contains("dialect"));
    }
}
