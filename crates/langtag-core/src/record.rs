//! # Registry Records
//!
//! One [`RegistryRecord`] per entry of the IANA Language Subtag Registry.
//! A record either describes a single subtag (`Subtag` present) or a whole
//! grandfathered/redundant tag (`Tag` present), never both.
//!
//! Field names serialize exactly as they appear in the registry file so
//! that JSON bundles can be exchanged with other tooling built on the
//! same registry.

use serde::{Deserialize, Serialize};

use crate::kind::RecordType;

/// A single registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryRecord {
    #[serde(rename = "Type")]
    pub record_type: RecordType,

    /// Subtag code, or a range such as `qaa..qtz`.
    #[serde(rename = "Subtag", default, skip_serializing_if = "Option::is_none")]
    pub subtag: Option<String>,

    /// Full hyphenated tag for grandfathered and redundant records.
    #[serde(rename = "Tag", default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    #[serde(rename = "Description", default)]
    pub description: Vec<String>,

    #[serde(rename = "Added", default, skip_serializing_if = "Option::is_none")]
    pub added: Option<String>,

    #[serde(rename = "Deprecated", default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,

    #[serde(
        rename = "Preferred-Value",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub preferred_value: Option<String>,

    #[serde(
        rename = "Suppress-Script",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub suppress_script: Option<String>,

    #[serde(rename = "Scope", default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    #[serde(
        rename = "Macrolanguage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub macrolanguage: Option<String>,

    #[serde(rename = "Prefix", default, skip_serializing_if = "Vec::is_empty")]
    pub prefix: Vec<String>,

    #[serde(rename = "Comments", default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
}

impl RegistryRecord {
    /// An empty record of the given type. Used by loaders that fill fields
    /// one at a time.
    pub fn new(record_type: RecordType) -> Self {
        Self {
            record_type,
            subtag: None,
            tag: None,
            description: Vec::new(),
            added: None,
            deprecated: None,
            preferred_value: None,
            suppress_script: None,
            scope: None,
            macrolanguage: None,
            prefix: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// The `Subtag` or `Tag` value, whichever is present.
    pub fn key(&self) -> Option<&str> {
        self.subtag.as_deref().or(self.tag.as_deref())
    }

    /// True when this record describes a subtag rather than a whole tag.
    pub fn is_subtag_record(&self) -> bool {
        self.subtag.is_some()
    }

    /// Checks the record shape: exactly one of `Subtag` or `Tag`, and the
    /// field that matches the record type.
    ///
    /// Returns a human-readable reason on failure.
    pub fn check_shape(&self) -> Result<(), String> {
        match (&self.subtag, &self.tag) {
            (Some(_), Some(_)) => Err("record has both Subtag and Tag".to_string()),
            (None, None) => Err("record has neither Subtag nor Tag".to_string()),
            (Some(s), None) if self.record_type.is_whole_tag() => Err(format!(
                "{} record {s:?} must use Tag, not Subtag",
                self.record_type
            )),
            (None, Some(t)) if !self.record_type.is_whole_tag() => Err(format!(
                "{} record {t:?} must use Subtag, not Tag",
                self.record_type
            )),
            _ => Ok(()),
        }
    }
}

/// Registry file metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// Publication date of the registry file, `YYYY-MM-DD`.
    #[serde(rename = "File-Date")]
    pub file_date: String,
}
