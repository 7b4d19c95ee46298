//! Errors from the query surface.
//!
//! Validation findings are not errors; see [`crate::validate::TagError`].

use langtag_core::SubtagError;
use langtag_registry::RegistryError;
use thiserror::Error;

/// Failure of an explicit lookup or of the registry behind it.
#[derive(Error, Debug)]
pub enum TagsError {
    /// A code, type or macrolanguage the registry does not contain.
    #[error(transparent)]
    Subtag(#[from] SubtagError),

    /// The registry could not be loaded.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Result type alias for query operations.
pub type TagsResult<T> = Result<T, TagsError>;
