//! # Query Surface
//!
//! [`Tags`] bundles the lookups callers need over one registry: tag
//! checks, subtag lookup by code or type, description search and
//! macrolanguage membership. Use [`Tags::global`] for the process-wide
//! registry or [`Tags::new`] for an explicitly loaded one.

use langtag_core::{RecordType, RegistryRecord, SubtagError, SubtagType};
use langtag_registry::Registry;
use regex::Regex;
use serde::{Serialize, Serializer};

use crate::error::TagsResult;
use crate::subtag::Subtag;
use crate::tag::Tag;

/// Separator used when matching against a record's descriptions as one
/// string.
const DESCRIPTION_SEPARATOR: &str = ", ";

/// A description search.
#[derive(Debug, Clone, Copy)]
pub enum DescriptionQuery<'q> {
    /// Substring match. Case-insensitive when the query is all lower case.
    Text(&'q str),
    /// Pattern match against the joined descriptions.
    Pattern(&'q Regex),
}

impl<'q> From<&'q str> for DescriptionQuery<'q> {
    fn from(text: &'q str) -> Self {
        Self::Text(text)
    }
}

impl<'q> From<&'q Regex> for DescriptionQuery<'q> {
    fn from(pattern: &'q Regex) -> Self {
        Self::Pattern(pattern)
    }
}

impl DescriptionQuery<'_> {
    fn matches(&self, record: &RegistryRecord) -> bool {
        let joined = record.description.join(DESCRIPTION_SEPARATOR);
        match self {
            Self::Text(text) if text.to_lowercase() == *text => {
                joined.to_lowercase().contains(text)
            }
            Self::Text(text) => joined.contains(text),
            Self::Pattern(pattern) => pattern.is_match(&joined),
        }
    }

    /// Closest description length to the query length; shorter distances
    /// rank first.
    fn distance(text: &str, record: &RegistryRecord) -> usize {
        let len = text.chars().count();
        record
            .description
            .iter()
            .map(|d| d.chars().count().abs_diff(len))
            .min()
            .unwrap_or(usize::MAX)
    }
}

/// One description search result.
///
/// Private-use range records (`qaa..qtz`, `Qaaa..Qabx`, `QM..QZ`,
/// `XA..XZ`) match as a single hit for the whole range. Their
/// [`Subtag::code`] is the raw range text and [`SearchHit::format`] prints
/// the range with both ends cased, e.g. `QM..QZ`.
#[derive(Debug, Clone)]
pub enum SearchHit<'r> {
    Subtag(Subtag<'r>),
    /// A grandfathered or redundant tag record.
    Tag(Tag<'r>),
}

impl SearchHit<'_> {
    /// Conventional display form of the hit.
    pub fn format(&self) -> String {
        match self {
            Self::Subtag(subtag) => subtag.format(),
            Self::Tag(tag) => tag.format(),
        }
    }

    /// Record type name: a subtag type, `grandfathered` or `redundant`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Subtag(subtag) => subtag.subtag_type().as_str(),
            Self::Tag(tag) => tag.tag_type().as_str(),
        }
    }

    pub fn description(&self) -> &[String] {
        match self {
            Self::Subtag(subtag) => subtag.description(),
            Self::Tag(tag) => tag.descriptions(),
        }
    }
}

impl Serialize for SearchHit<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Subtag(subtag) => subtag.serialize(serializer),
            Self::Tag(tag) => tag.serialize(serializer),
        }
    }
}

/// Queries over one registry.
#[derive(Debug, Clone, Copy)]
pub struct Tags<'r> {
    registry: &'r Registry,
}

impl<'r> Tags<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Decompose a tag.
    pub fn tag(&self, tag: &str) -> Tag<'r> {
        Tag::new(self.registry, tag)
    }

    /// True when the tag has no validation findings.
    pub fn check(&self, tag: &str) -> bool {
        self.tag(tag).valid()
    }

    /// Subtag types registered for `code`. Whole-tag types are excluded.
    pub fn types(&self, code: &str) -> Vec<SubtagType> {
        self.registry
            .types_of(code)
            .iter()
            .filter_map(RecordType::as_subtag_type)
            .collect()
    }

    /// Every subtag each code resolves to, one per registered type.
    /// Unknown codes are skipped.
    pub fn subtags<I, S>(&self, codes: I) -> Vec<Subtag<'r>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        codes
            .into_iter()
            .flat_map(|code| {
                let code = code.as_ref();
                self.types(code)
                    .into_iter()
                    .filter_map(move |kind| Subtag::new(self.registry, code, kind).ok())
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// The codes that resolve to no subtag at all.
    pub fn filter<I, S>(&self, codes: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        codes
            .into_iter()
            .filter(|code| self.types(code.as_ref()).is_empty())
            .map(|code| code.as_ref().to_string())
            .collect()
    }

    /// Records whose descriptions match `query`.
    ///
    /// Grandfathered and redundant records are included only when `all`
    /// is set. Text queries rank the closest description lengths first,
    /// keeping registry order among equals; pattern queries keep registry
    /// order.
    pub fn search<'q>(&self, query: impl Into<DescriptionQuery<'q>>, all: bool) -> Vec<SearchHit<'r>> {
        let query = query.into();
        let mut records: Vec<&'r RegistryRecord> = self
            .registry
            .records()
            .iter()
            .filter(|r| (all || r.is_subtag_record()) && query.matches(r))
            .collect();

        if let DescriptionQuery::Text(text) = query {
            records.sort_by_key(|r| DescriptionQuery::distance(text, r));
        }

        records
            .into_iter()
            .filter_map(|record| match (Subtag::from_record(self.registry, record), &record.tag) {
                (Some(subtag), _) => Some(SearchHit::Subtag(subtag)),
                (None, Some(tag)) => Some(SearchHit::Tag(Tag::new(self.registry, tag))),
                (None, None) => None,
            })
            .collect()
    }

    /// Whole-tag descriptions followed by each subtag's descriptions.
    pub fn description(&self, tag: &str) -> Vec<&'r str> {
        let tag = self.tag(tag);
        tag.descriptions()
            .iter()
            .chain(tag.subtags().iter().flat_map(|s| s.description().iter()))
            .map(String::as_str)
            .collect()
    }

    /// Languages and extlangs belonging to a macrolanguage.
    ///
    /// # Errors
    ///
    /// `NotAMacrolanguage` when `code` is not in the macrolanguage table.
    pub fn languages(&self, code: &str) -> Result<Vec<Subtag<'r>>, SubtagError> {
        let code = code.to_lowercase();
        if !self.registry.is_macrolanguage(&code) {
            return Err(SubtagError::NotAMacrolanguage { code });
        }
        Ok(self
            .registry
            .records()
            .iter()
            .filter(|r| {
                r.macrolanguage
                    .as_deref()
                    .is_some_and(|m| m.eq_ignore_ascii_case(&code))
            })
            .filter_map(|r| Subtag::from_record(self.registry, r))
            .collect())
    }

    /// The subtag for `code` with the given type, if registered.
    pub fn typed(&self, code: &str, subtag_type: SubtagType) -> Option<Subtag<'r>> {
        Subtag::new(self.registry, code, subtag_type).ok()
    }

    pub fn language(&self, code: &str) -> Option<Subtag<'r>> {
        self.typed(code, SubtagType::Language)
    }

    pub fn region(&self, code: &str) -> Option<Subtag<'r>> {
        self.typed(code, SubtagType::Region)
    }

    /// Registry `File-Date`, `YYYY-MM-DD`.
    pub fn date(&self) -> &'r str {
        self.registry.file_date()
    }
}

impl Tags<'static> {
    /// Queries over the process-wide registry.
    pub fn global() -> TagsResult<Self> {
        Ok(Self::new(langtag_registry::global()?))
    }
}
