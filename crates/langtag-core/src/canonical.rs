//! # Canonical Casing: RFC 5646 §2.1.1
//!
//! Case carries no meaning in a language tag, but the registry recommends
//! a conventional form: language, extlang and variant subtags in lower
//! case, script subtags in title case, region subtags in upper case.
//!
//! Two entry points:
//!
//! - [`format_subtag`] when the subtag kind is known (resolved subtags).
//! - [`format_tag`] for a whole tag string, where the kind of each segment
//!   is inferred from its length and position alone.
//!
//! Both are idempotent: formatting already-formatted text is a no-op.

use crate::kind::SubtagType;

/// Upper-case the first character and lower-case the rest.
pub fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Conventional display form of a subtag code of the given kind.
pub fn format_subtag(code: &str, kind: SubtagType) -> String {
    match kind {
        SubtagType::Region => code.to_uppercase(),
        SubtagType::Script => title_case(code),
        SubtagType::Language | SubtagType::Extlang | SubtagType::Variant => code.to_lowercase(),
    }
}

/// Conventional display form of a whole tag.
///
/// The first segment is lower case. Every segment after a singleton
/// (extension or private use) is left lower case. Otherwise two-letter
/// segments are upper-cased (regions) and four-letter segments are
/// title-cased (scripts).
pub fn format_tag(tag: &str) -> String {
    let lowered = tag.trim().to_lowercase();
    let mut segments = lowered.split('-');
    let mut formatted = match segments.next() {
        Some(first) => first.to_string(),
        None => return String::new(),
    };

    // Lengths are in characters, matching decomposition and validation.
    let mut previous_len = formatted.chars().count();
    let mut private_use = false;
    for segment in segments {
        let len = segment.chars().count();
        formatted.push('-');
        if previous_len == 1 || private_use {
            private_use = true;
            formatted.push_str(segment);
        } else if len == 2 {
            formatted.push_str(&segment.to_uppercase());
        } else if len == 4 {
            formatted.push_str(&title_case(segment));
        } else {
            formatted.push_str(segment);
        }
        previous_len = len;
    }
    formatted
}
