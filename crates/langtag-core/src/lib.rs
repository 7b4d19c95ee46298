//! # langtag-core: Foundational Types for Language Tags
//!
//! This crate is the leaf of the langtag workspace. It defines the types
//! shared by the registry store, the tag decomposer and the validator.
//! It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed kind enums.** [`SubtagType`] covers the five composable
//!    subtag kinds; [`RecordType`] adds the two whole-tag kinds
//!    (`grandfathered`, `redundant`). Every `match` is exhaustive.
//!
//! 2. **Registry records mirror the IANA field names.** [`RegistryRecord`]
//!    serializes with `Subtag`, `Preferred-Value`, `Suppress-Script`, ...
//!    so a JSON bundle and the record-jar text produce the same value.
//!
//! 3. **Casing is derived, never stored.** Lookups are case-insensitive;
//!    display casing is recomputed from the subtag kind by [`canonical`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `langtag-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod error;
pub mod kind;
pub mod record;

// Re-export primary types for ergonomic imports.
pub use canonical::{format_subtag, format_tag, title_case};
pub use error::{KindParseError, SubtagError, ERR_NONEXISTENT, ERR_NOT_MACROLANGUAGE, ERR_TAG};
pub use kind::{RecordType, SubtagType, SUBTAG_TYPE_COUNT};
pub use record::{Meta, RegistryRecord};
