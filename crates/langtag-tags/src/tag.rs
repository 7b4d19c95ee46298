//! # Tag Decomposer
//!
//! A [`Tag`] wraps a whole language tag. Construction never fails: unknown
//! or malformed tags are representable and simply report errors.
//!
//! ## Decomposition
//!
//! The normalized tag (trimmed, lower case) is split on `-` and each
//! segment is classified by position and length, using only the types the
//! index lists for that segment:
//!
//! | Segment | Classified as |
//! |---------|---------------|
//! | first, language listed | language |
//! | 2 characters | region, else language |
//! | 3 characters | region, else extlang, else language |
//! | 4 characters | variant, else script |
//! | 5–8 characters | variant |
//!
//! Segments absent from the index, or with no matching type, are skipped.
//! A singleton (one-character segment) ends decomposition; extensions and
//! private use are not parsed.
//!
//! Grandfathered tags never decompose. Redundant tags are built from valid
//! subtags and always decompose, while still reporting `redundant`.

use std::fmt;

use langtag_core::{format_tag, RecordType, RegistryRecord, SubtagType};
use langtag_registry::{Registry, TypeOffsets};
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use crate::subtag::Subtag;
use crate::validate::{self, TagError};

/// RFC 5646 §2.2.8 classification of a whole tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagType {
    /// Registered whole before RFC 4646; not composed of subtags.
    Grandfathered,
    /// Registered whole, but composed of valid subtags.
    Redundant,
    /// Any other tag.
    Tag,
}

impl TagType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grandfathered => "grandfathered",
            Self::Redundant => "redundant",
            Self::Tag => "tag",
        }
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A language tag decomposed against a registry.
#[derive(Clone)]
pub struct Tag<'r> {
    registry: &'r Registry,
    tag: String,
    record: Option<&'r RegistryRecord>,
    subtags: Vec<Subtag<'r>>,
}

impl<'r> Tag<'r> {
    pub fn new(registry: &'r Registry, tag: &str) -> Self {
        let tag = tag.trim().to_lowercase();
        let record = whole_tag_record(registry, &tag);
        let subtags = match record {
            Some(r) if r.record_type == RecordType::Grandfathered => Vec::new(),
            _ => decompose(registry, &tag),
        };
        Self {
            registry,
            tag,
            record,
            subtags,
        }
    }

    /// Normalized tag text: trimmed and lower case.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// The grandfathered or redundant record the whole tag matches.
    pub fn record(&self) -> Option<&'r RegistryRecord> {
        self.record
    }

    /// Conventional casing of the whole tag (RFC 5646 §2.1.1).
    pub fn format(&self) -> String {
        format_tag(&self.tag)
    }

    pub fn tag_type(&self) -> TagType {
        match self.record.map(|r| r.record_type) {
            Some(RecordType::Grandfathered) => TagType::Grandfathered,
            Some(_) => TagType::Redundant,
            None => TagType::Tag,
        }
    }

    /// Decomposed subtags in tag order. Empty for grandfathered tags.
    pub fn subtags(&self) -> &[Subtag<'r>] {
        &self.subtags
    }

    fn first_of(&self, subtag_type: SubtagType) -> Option<Subtag<'r>> {
        self.subtags
            .iter()
            .find(|s| s.subtag_type() == subtag_type)
            .copied()
    }

    pub fn language(&self) -> Option<Subtag<'r>> {
        self.first_of(SubtagType::Language)
    }

    pub fn region(&self) -> Option<Subtag<'r>> {
        self.first_of(SubtagType::Region)
    }

    pub fn script(&self) -> Option<Subtag<'r>> {
        self.first_of(SubtagType::Script)
    }

    /// Replacement for a deprecated grandfathered or redundant tag.
    pub fn preferred(&self) -> Option<Tag<'r>> {
        let value = self.record?.preferred_value.as_deref()?;
        Some(Tag::new(self.registry, value))
    }

    pub fn added(&self) -> Option<&'r str> {
        self.record?.added.as_deref()
    }

    pub fn deprecated(&self) -> Option<&'r str> {
        self.record?.deprecated.as_deref()
    }

    /// Descriptions of the whole-tag record; empty for ordinary tags.
    pub fn descriptions(&self) -> &'r [String] {
        match self.record {
            Some(record) => &record.description,
            None => &[],
        }
    }

    /// Validation findings, in rule order. Empty when the tag is valid.
    pub fn errors(&self) -> Vec<TagError<'r>> {
        validate::validate(self)
    }

    pub fn valid(&self) -> bool {
        self.errors().is_empty()
    }
}

fn whole_tag_record<'r>(registry: &'r Registry, tag: &str) -> Option<&'r RegistryRecord> {
    let offsets = registry.lookup(tag)?;
    let offset = offsets
        .get(&RecordType::Grandfathered)
        .or_else(|| offsets.get(&RecordType::Redundant))?;
    registry.record(*offset)
}

fn decompose<'r>(registry: &'r Registry, tag: &str) -> Vec<Subtag<'r>> {
    let mut subtags = Vec::new();
    for (position, code) in tag.split('-').enumerate() {
        if code.chars().count() == 1 {
            break;
        }
        let Some(offsets) = registry.lookup(code) else {
            continue;
        };
        let Some(subtag_type) = classify(position, code, offsets) else {
            continue;
        };
        match Subtag::new(registry, code, subtag_type) {
            Ok(subtag) => subtags.push(subtag),
            Err(e) => tracing::warn!(code, error = %e, "classified subtag did not resolve"),
        }
    }
    subtags
}

fn classify(position: usize, code: &str, offsets: &TypeOffsets) -> Option<SubtagType> {
    let has = |kind: &SubtagType| offsets.contains_key(&RecordType::from(*kind));

    if position == 0 && has(&SubtagType::Language) {
        return Some(SubtagType::Language);
    }
    match code.chars().count() {
        2 => [SubtagType::Region, SubtagType::Language].into_iter().find(has),
        3 => [SubtagType::Region, SubtagType::Extlang, SubtagType::Language]
            .into_iter()
            .find(has),
        4 => [SubtagType::Variant, SubtagType::Script].into_iter().find(has),
        _ => Some(SubtagType::Variant).filter(has),
    }
}

impl fmt::Debug for Tag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tag")
            .field("tag", &self.tag)
            .field("tag_type", &self.tag_type())
            .field("subtags", &self.subtags)
            .finish()
    }
}

impl fmt::Display for Tag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl Serialize for Tag<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Tag", 4)?;
        state.serialize_field("tag", &self.tag)?;
        state.serialize_field("format", &self.format())?;
        state.serialize_field("type", &self.tag_type())?;
        state.serialize_field("valid", &self.valid())?;
        state.end()
    }
}
