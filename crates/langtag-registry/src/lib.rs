//! # langtag-registry: Language Subtag Registry Store
//!
//! Read-only access to the IANA Language Subtag Registry, the data behind
//! every BCP 47 validity check:
//!
//! - **Loaders** (`record_jar.rs`, `store.rs`): IANA record-jar text or a
//!   JSON bundle of pre-built tables.
//! - **Store** (`store.rs`): the record arena, the lowercased lookup index,
//!   the macrolanguage table and the file date.
//! - **Config** (`config.rs`): embedded snapshot by default, overridable
//!   through `LANGTAG_REGISTRY_PATH`.
//! - **Global** (`global.rs`): one lazily loaded instance per process.
//!
//! ## Crate Policy
//!
//! - Depends only on `langtag-core` internally.
//! - Tables are built once and never mutated. Everything handed out borrows
//!   from the [`Registry`].
//! - Loading failures are typed [`RegistryError`]s. Nothing here panics on
//!   bad data.

pub mod config;
pub mod error;
pub mod global;
pub mod record_jar;
pub mod store;

pub use config::{RegistryConfig, RegistrySource, SourceFormat, REGISTRY_PATH_ENV};
pub use error::{RegistryError, RegistryResult};
pub use global::{get, global};
pub use store::{
    Index, Macrolanguages, Registry, RegistryBundle, Table, TableRef, TypeOffsets,
    EMBEDDED_REGISTRY, RANGE_SEPARATOR,
};
