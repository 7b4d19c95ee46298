//! # Tag Validator
//!
//! Checks a decomposed [`Tag`] against the RFC 5646 well-formedness rules
//! and returns every finding as a [`TagError`] value. Validation never
//! fails: a tag with no recognisable parts is reported, not rejected.
//!
//! Rules run in this order:
//!
//! 1. A grandfathered or redundant tag is only checked for deprecation.
//!    Nothing else applies to it.
//! 2. Every segment before the first singleton must be in the registry.
//!    Segments after a singleton may be at most 8 characters.
//! 3. The first decomposed subtag must be a language. If it is not,
//!    validation stops here.
//! 4. Per subtag: deprecation, repeated language/extlang/script/region,
//!    duplicate variants, and a first script equal to the language's
//!    Suppress-Script.
//! 5. Adjacent subtags must follow language < extlang < script < region <
//!    variant. Equal kinds side by side are not an ordering error.

use std::fmt;

use langtag_core::SubtagType;
use serde::ser::{SerializeSeq, SerializeStruct, Serializer};
use serde::Serialize;
use thiserror::Error;

use crate::subtag::Subtag;
use crate::tag::Tag;

/// Longest permitted private-use or extension subtag.
pub const MAX_SUBTAG_LEN: usize = 8;

/// Class of a validation finding, with its registry-era numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Deprecated,
    NoLanguage,
    Unknown,
    TooLong,
    ExtraRegion,
    ExtraExtlang,
    ExtraScript,
    DuplicateVariant,
    WrongOrder,
    SuppressScript,
    SubtagDeprecated,
    ExtraLanguage,
}

impl ErrorCode {
    pub fn all() -> &'static [ErrorCode] {
        &[
            Self::Deprecated,
            Self::NoLanguage,
            Self::Unknown,
            Self::TooLong,
            Self::ExtraRegion,
            Self::ExtraExtlang,
            Self::ExtraScript,
            Self::DuplicateVariant,
            Self::WrongOrder,
            Self::SuppressScript,
            Self::SubtagDeprecated,
            Self::ExtraLanguage,
        ]
    }

    /// Numeric code, 1 through 12.
    pub fn code(&self) -> u8 {
        match self {
            Self::Deprecated => 1,
            Self::NoLanguage => 2,
            Self::Unknown => 3,
            Self::TooLong => 4,
            Self::ExtraRegion => 5,
            Self::ExtraExtlang => 6,
            Self::ExtraScript => 7,
            Self::DuplicateVariant => 8,
            Self::WrongOrder => 9,
            Self::SuppressScript => 10,
            Self::SubtagDeprecated => 11,
            Self::ExtraLanguage => 12,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Deprecated => "DEPRECATED",
            Self::NoLanguage => "NO_LANGUAGE",
            Self::Unknown => "UNKNOWN",
            Self::TooLong => "TOO_LONG",
            Self::ExtraRegion => "EXTRA_REGION",
            Self::ExtraExtlang => "EXTRA_EXTLANG",
            Self::ExtraScript => "EXTRA_SCRIPT",
            Self::DuplicateVariant => "DUPLICATE_VARIANT",
            Self::WrongOrder => "WRONG_ORDER",
            Self::SuppressScript => "SUPPRESS_SCRIPT",
            Self::SubtagDeprecated => "SUBTAG_DEPRECATED",
            Self::ExtraLanguage => "EXTRA_LANGUAGE",
        }
    }

    fn extra(subtag_type: SubtagType) -> Option<Self> {
        match subtag_type {
            SubtagType::Language => Some(Self::ExtraLanguage),
            SubtagType::Extlang => Some(Self::ExtraExtlang),
            SubtagType::Script => Some(Self::ExtraScript),
            SubtagType::Region => Some(Self::ExtraRegion),
            SubtagType::Variant => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a finding refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorSubject<'r> {
    /// The whole tag.
    None,
    /// A raw segment that did not resolve.
    Code(String),
    Subtag(Subtag<'r>),
    /// An out-of-order pair, earlier first.
    Pair(Subtag<'r>, Subtag<'r>),
}

impl Serialize for ErrorSubject<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::None => serializer.serialize_none(),
            Self::Code(code) => serializer.serialize_str(code),
            Self::Subtag(subtag) => serializer.serialize_str(&subtag.format()),
            Self::Pair(earlier, later) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(&earlier.format())?;
                seq.serialize_element(&later.format())?;
                seq.end()
            }
        }
    }
}

/// One validation finding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct TagError<'r> {
    pub code: ErrorCode,
    pub message: String,
    /// Normalized tag text.
    pub tag: String,
    pub subtag: ErrorSubject<'r>,
}

impl<'r> TagError<'r> {
    fn new(code: ErrorCode, tag: &Tag<'r>, subtag: ErrorSubject<'r>) -> Self {
        let message = message(code, tag, &subtag);
        Self {
            code,
            message,
            tag: tag.tag().to_string(),
            subtag,
        }
    }
}

impl Serialize for TagError<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TagError", 5)?;
        state.serialize_field("code", &self.code.code())?;
        state.serialize_field("name", self.code.name())?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("tag", &self.tag)?;
        state.serialize_field("subtag", &self.subtag)?;
        state.end()
    }
}

fn message(code: ErrorCode, tag: &Tag<'_>, subject: &ErrorSubject<'_>) -> String {
    let subject_format = match subject {
        ErrorSubject::None => String::new(),
        ErrorSubject::Code(code) => code.clone(),
        ErrorSubject::Subtag(subtag) => subtag.format(),
        ErrorSubject::Pair(earlier, _) => earlier.format(),
    };
    match code {
        ErrorCode::Deprecated => {
            let mut message = format!("The tag {} is deprecated.", tag.tag());
            if let Some(preferred) = tag.record().and_then(|r| r.preferred_value.as_deref()) {
                message.push_str(&format!(" Use '{preferred}' instead."));
            }
            message
        }
        ErrorCode::SubtagDeprecated => format!("The subtag '{subject_format}' is deprecated."),
        ErrorCode::NoLanguage if tag.tag().is_empty() => "Empty tag.".to_string(),
        ErrorCode::NoLanguage => format!("Missing language tag in '{}'.", tag.tag()),
        ErrorCode::Unknown => format!("Unknown code '{subject_format}'"),
        ErrorCode::TooLong => format!("The private-use subtag '{subject_format}' is too long."),
        ErrorCode::ExtraLanguage
        | ErrorCode::ExtraExtlang
        | ErrorCode::ExtraRegion
        | ErrorCode::ExtraScript => {
            let kind = match subject {
                ErrorSubject::Subtag(subtag) => subtag.subtag_type().as_str(),
                _ => "",
            };
            format!("Extra {kind} subtag '{subject_format}' found.")
        }
        ErrorCode::DuplicateVariant => {
            format!("Duplicate variant subtag '{subject_format}' found.")
        }
        ErrorCode::WrongOrder => {
            let later = match subject {
                ErrorSubject::Pair(_, later) => later.format(),
                _ => String::new(),
            };
            format!("The subtag '{subject_format}' should not appear before '{later}'.")
        }
        ErrorCode::SuppressScript => format!(
            "The script subtag '{subject_format}' is the same as the language suppress-script."
        ),
    }
}

/// Run every rule against `tag`, in order.
pub fn validate<'r>(tag: &Tag<'r>) -> Vec<TagError<'r>> {
    let mut errors = Vec::new();

    if let Some(record) = tag.record() {
        if record.deprecated.is_some() {
            errors.push(TagError::new(ErrorCode::Deprecated, tag, ErrorSubject::None));
        }
        return errors;
    }

    check_codes(tag, &mut errors);

    let subtags = tag.subtags();
    let language = match subtags.first() {
        Some(first) if first.subtag_type() == SubtagType::Language => *first,
        _ => {
            errors.push(TagError::new(ErrorCode::NoLanguage, tag, ErrorSubject::None));
            return errors;
        }
    };

    check_subtags(tag, language, &mut errors);
    check_order(tag, &mut errors);
    errors
}

fn check_codes<'r>(tag: &Tag<'r>, errors: &mut Vec<TagError<'r>>) {
    let registry = tag.registry();
    let mut codes = tag.tag().split('-');
    for code in codes.by_ref() {
        if code.chars().count() < 2 {
            break;
        }
        if !registry.contains(code) {
            errors.push(TagError::new(
                ErrorCode::Unknown,
                tag,
                ErrorSubject::Code(code.to_string()),
            ));
        }
    }
    for code in codes {
        if code.chars().count() > MAX_SUBTAG_LEN {
            errors.push(TagError::new(
                ErrorCode::TooLong,
                tag,
                ErrorSubject::Code(code.to_string()),
            ));
        }
    }
}

fn check_subtags<'r>(tag: &Tag<'r>, language: Subtag<'r>, errors: &mut Vec<TagError<'r>>) {
    let suppress_script = language.script();
    let mut seen: Vec<Subtag<'r>> = Vec::new();

    for subtag in tag.subtags().iter().copied() {
        let kind = subtag.subtag_type();
        if subtag.deprecated().is_some() {
            errors.push(TagError::new(
                ErrorCode::SubtagDeprecated,
                tag,
                ErrorSubject::Subtag(subtag),
            ));
        }

        let earlier: Vec<&Subtag<'r>> = seen.iter().filter(|s| s.subtag_type() == kind).collect();
        match kind {
            SubtagType::Variant => {
                let format = subtag.format();
                if earlier.iter().any(|v| v.format() == format) {
                    errors.push(TagError::new(
                        ErrorCode::DuplicateVariant,
                        tag,
                        ErrorSubject::Subtag(subtag),
                    ));
                }
            }
            _ if !earlier.is_empty() => {
                if let Some(code) = ErrorCode::extra(kind) {
                    errors.push(TagError::new(code, tag, ErrorSubject::Subtag(subtag)));
                }
            }
            SubtagType::Script => {
                if suppress_script.is_some_and(|s| s.format() == subtag.format()) {
                    errors.push(TagError::new(
                        ErrorCode::SuppressScript,
                        tag,
                        ErrorSubject::Subtag(subtag),
                    ));
                }
            }
            _ => {}
        }
        seen.push(subtag);
    }
}

fn check_order<'r>(tag: &Tag<'r>, errors: &mut Vec<TagError<'r>>) {
    for pair in tag.subtags().windows(2) {
        let (earlier, later) = (pair[0], pair[1]);
        if earlier.subtag_type().priority() > later.subtag_type().priority() {
            errors.push(TagError::new(
                ErrorCode::WrongOrder,
                tag,
                ErrorSubject::Pair(earlier, later),
            ));
        }
    }
}
