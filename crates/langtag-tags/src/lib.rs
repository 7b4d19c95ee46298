//! # langtag-tags: BCP 47 Language Tags
//!
//! Decomposes and validates language tags such as `en-GB`, `zh-cmn-Hant`
//! or `sl-rozaj` against the IANA Language Subtag Registry:
//!
//! - **Subtag** (`subtag.rs`): one subtag resolved for a code and type,
//!   with its description, deprecation, preferred value and default script.
//! - **Tag** (`tag.rs`): a whole tag, classified as grandfathered,
//!   redundant or ordinary, and decomposed into typed subtags.
//! - **Validation** (`validate.rs`): the RFC 5646 well-formedness rules,
//!   reported as an ordered list of [`TagError`] findings.
//! - **Queries** (`query.rs`): description search, macrolanguage members,
//!   subtag lookup by code and type.
//!
//! ## Crate Policy
//!
//! - Everything borrows from a [`langtag_registry::Registry`]. Nothing is
//!   cached between calls.
//! - Checking an arbitrary string never returns `Err` and never panics.
//!   Only explicit lookups with a caller-asserted type fail.
//!
//! ```no_run
//! use langtag_tags::Tags;
//!
//! let tags = Tags::global()?;
//! let tag = tags.tag("en-latn-cyrl");
//! for error in tag.errors() {
//!     println!("{}: {}", error.code, error.message);
//! }
//! # Ok::<(), langtag_tags::TagsError>(())
//! ```

pub mod error;
pub mod query;
pub mod subtag;
pub mod tag;
pub mod validate;

pub use error::{TagsError, TagsResult};
pub use query::{DescriptionQuery, SearchHit, Tags};
pub use subtag::Subtag;
pub use tag::{Tag, TagType};
pub use validate::{ErrorCode, ErrorSubject, TagError};
