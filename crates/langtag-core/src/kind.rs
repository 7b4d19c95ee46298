//! # Subtag and Record Kinds
//!
//! The IANA Language Subtag Registry types every record. Five of those
//! types name composable subtags ([`SubtagType`]); two name complete tags
//! registered as a whole ([`RecordType::Grandfathered`] and
//! [`RecordType::Redundant`]).
//!
//! Both enums order their variants the way RFC 5646 §2.1 orders subtags in
//! a well-formed tag, so `Ord` doubles as the positional priority used by
//! the validator's ordering check.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::KindParseError;

/// A composable subtag kind.
///
/// | Kind | Priority | Example |
/// |------|----------|---------|
/// | Language | 4 | `en` |
/// | Extlang | 5 | `cmn` |
/// | Script | 6 | `Latn` |
/// | Region | 7 | `GB` |
/// | Variant | 8 | `1996` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtagType {
    /// Primary language subtag. Only valid in first position.
    Language,
    /// Extended language subtag, e.g. the `cmn` in `zh-cmn`.
    Extlang,
    /// ISO 15924 script code.
    Script,
    /// ISO 3166-1 or UN M.49 region code.
    Region,
    /// Registered variant.
    Variant,
}

/// Number of composable subtag kinds.
pub const SUBTAG_TYPE_COUNT: usize = 5;

impl SubtagType {
    /// Returns all subtag kinds in positional order.
    pub fn all() -> &'static [SubtagType] {
        &[
            Self::Language,
            Self::Extlang,
            Self::Script,
            Self::Region,
            Self::Variant,
        ]
    }

    /// Returns the registry `Type` value for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Language => "language",
            Self::Extlang => "extlang",
            Self::Script => "script",
            Self::Region => "region",
            Self::Variant => "variant",
        }
    }

    /// Ordering priority within a tag: language(4) < extlang(5) < script(6)
    /// < region(7) < variant(8).
    pub fn priority(&self) -> u8 {
        match self {
            Self::Language => 4,
            Self::Extlang => 5,
            Self::Script => 6,
            Self::Region => 7,
            Self::Variant => 8,
        }
    }
}

impl std::fmt::Display for SubtagType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubtagType {
    type Err = KindParseError;

    /// Parse a subtag kind. Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match RecordType::from_str(s)?.as_subtag_type() {
            Some(kind) => Ok(kind),
            None => Err(KindParseError(s.to_string())),
        }
    }
}

/// The `Type` of a registry record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Language,
    Extlang,
    Script,
    Region,
    Variant,
    /// A tag registered before RFC 4646 that cannot be composed from subtags.
    Grandfathered,
    /// A tag composed of valid subtags but registered as a whole.
    Redundant,
}

impl RecordType {
    /// Returns all record types in index order.
    pub fn all() -> &'static [RecordType] {
        &[
            Self::Language,
            Self::Extlang,
            Self::Script,
            Self::Region,
            Self::Variant,
            Self::Grandfathered,
            Self::Redundant,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Language => "language",
            Self::Extlang => "extlang",
            Self::Script => "script",
            Self::Region => "region",
            Self::Variant => "variant",
            Self::Grandfathered => "grandfathered",
            Self::Redundant => "redundant",
        }
    }

    /// True for record types that describe a whole tag.
    pub fn is_whole_tag(&self) -> bool {
        matches!(self, Self::Grandfathered | Self::Redundant)
    }

    /// The composable subtag kind, or `None` for whole-tag records.
    pub fn as_subtag_type(&self) -> Option<SubtagType> {
        match self {
            Self::Language => Some(SubtagType::Language),
            Self::Extlang => Some(SubtagType::Extlang),
            Self::Script => Some(SubtagType::Script),
            Self::Region => Some(SubtagType::Region),
            Self::Variant => Some(SubtagType::Variant),
            Self::Grandfathered | Self::Redundant => None,
        }
    }
}

impl From<SubtagType> for RecordType {
    fn from(kind: SubtagType) -> Self {
        match kind {
            SubtagType::Language => Self::Language,
            SubtagType::Extlang => Self::Extlang,
            SubtagType::Script => Self::Script,
            SubtagType::Region => Self::Region,
            SubtagType::Variant => Self::Variant,
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = KindParseError;

    /// Parse a record type. Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "language" => Ok(Self::Language),
            "extlang" => Ok(Self::Extlang),
            "script" => Ok(Self::Script),
            "region" => Ok(Self::Region),
            "variant" => Ok(Self::Variant),
            "grandfathered" => Ok(Self::Grandfathered),
            "redundant" => Ok(Self::Redundant),
            _ => Err(KindParseError(s.to_string())),
        }
    }
}
