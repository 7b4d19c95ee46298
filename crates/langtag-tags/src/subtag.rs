//! # Subtag Resolver
//!
//! A [`Subtag`] is one registry record resolved for a code and a subtag
//! type. It borrows the record from the [`Registry`] it was resolved
//! against, so it is cheap to build and lives no longer than the registry.
//!
//! Resolution lowercases the code before lookup. Input casing is not kept;
//! [`Subtag::format`] recomputes the conventional casing from the type.
//!
//! Resolution fails when:
//!
//! - the code is absent from the index (`NonExistent`),
//! - the code exists but not with the requested type (`NonExistentType`),
//! - the code and type name a grandfathered or redundant whole-tag record
//!   (`WrongRecordKind`).

use std::fmt;
use std::str::FromStr;

use langtag_core::{format_subtag, RecordType, RegistryRecord, SubtagError, SubtagType};
use langtag_registry::{Registry, RANGE_SEPARATOR};
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// A subtag resolved against a registry.
#[derive(Clone, Copy)]
pub struct Subtag<'r> {
    registry: &'r Registry,
    record: &'r RegistryRecord,
    code: &'r str,
    subtag_type: SubtagType,
}

impl<'r> Subtag<'r> {
    /// Resolve `code` as a subtag of the given type.
    ///
    /// # Errors
    ///
    /// `NonExistent` if the code is unknown, `NonExistentType` if it is
    /// known with other types only.
    pub fn new(
        registry: &'r Registry,
        code: &str,
        subtag_type: SubtagType,
    ) -> Result<Self, SubtagError> {
        Self::resolve(registry, code, RecordType::from(subtag_type))
    }

    /// Resolve `code` with a type given by name, case-insensitively.
    ///
    /// Accepts every registry type name. `grandfathered` and `redundant`
    /// always fail, with `WrongRecordKind` when the code names such a
    /// record.
    pub fn parse(registry: &'r Registry, code: &str, type_name: &str) -> Result<Self, SubtagError> {
        match RecordType::from_str(type_name) {
            Ok(record_type) => Self::resolve(registry, code, record_type),
            Err(_) => {
                let subtag = code.to_lowercase();
                if registry.contains(&subtag) {
                    Err(SubtagError::NonExistentType {
                        subtag,
                        subtag_type: type_name.trim().to_lowercase(),
                    })
                } else {
                    Err(SubtagError::NonExistent { subtag })
                }
            }
        }
    }

    fn resolve(
        registry: &'r Registry,
        code: &str,
        record_type: RecordType,
    ) -> Result<Self, SubtagError> {
        let subtag = code.to_lowercase();
        let (key, offsets) = registry
            .lookup_entry(&subtag)
            .ok_or_else(|| SubtagError::NonExistent {
                subtag: subtag.clone(),
            })?;
        let offset = *offsets
            .get(&record_type)
            .ok_or_else(|| SubtagError::NonExistentType {
                subtag: subtag.clone(),
                subtag_type: record_type.as_str().to_string(),
            })?;
        let record = registry
            .record(offset)
            .ok_or_else(|| SubtagError::NonExistent {
                subtag: subtag.clone(),
            })?;

        match (record.subtag.as_deref(), record_type.as_subtag_type()) {
            (Some(_), Some(subtag_type)) => Ok(Self {
                registry,
                record,
                code: key,
                subtag_type,
            }),
            _ => Err(SubtagError::WrongRecordKind {
                subtag,
                record_type,
            }),
        }
    }

    /// Wrap a record already known to be a subtag record, such as a
    /// private-use range, keeping its own `Subtag` value as the code.
    pub(crate) fn from_record(
        registry: &'r Registry,
        record: &'r RegistryRecord,
    ) -> Option<Self> {
        Some(Self {
            registry,
            record,
            code: record.subtag.as_deref()?,
            subtag_type: record.record_type.as_subtag_type()?,
        })
    }

    /// The code as looked up (lowercase for resolved codes).
    pub fn code(&self) -> &'r str {
        self.code
    }

    pub fn subtag_type(&self) -> SubtagType {
        self.subtag_type
    }

    pub fn record(&self) -> &'r RegistryRecord {
        self.record
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Conventional casing: regions upper case, scripts title case,
    /// everything else lower case. A private-use range record keeps its
    /// `start..end` form with both ends cased, e.g. `Qaaa..Qabx`.
    pub fn format(&self) -> String {
        match self.code.split_once(RANGE_SEPARATOR) {
            Some((start, end)) => format!(
                "{}{RANGE_SEPARATOR}{}",
                format_subtag(start, self.subtag_type),
                format_subtag(end, self.subtag_type)
            ),
            None => format_subtag(self.code, self.subtag_type),
        }
    }

    /// Descriptions in registry order.
    pub fn description(&self) -> &'r [String] {
        &self.record.description
    }

    /// The replacement for a deprecated subtag. An extlang's preferred
    /// value is a primary language subtag and resolves as a language.
    pub fn preferred(&self) -> Option<Subtag<'r>> {
        let value = self.record.preferred_value.as_deref()?;
        let subtag_type = match self.subtag_type {
            SubtagType::Extlang => SubtagType::Language,
            other => other,
        };
        self.resolve_related(value, subtag_type, "Preferred-Value")
    }

    /// The language's Suppress-Script, resolved as a script.
    pub fn script(&self) -> Option<Subtag<'r>> {
        let value = self.record.suppress_script.as_deref()?;
        self.resolve_related(value, SubtagType::Script, "Suppress-Script")
    }

    fn resolve_related(
        &self,
        value: &str,
        subtag_type: SubtagType,
        field: &'static str,
    ) -> Option<Subtag<'r>> {
        match Subtag::new(self.registry, value, subtag_type) {
            Ok(subtag) => Some(subtag),
            Err(e) => {
                tracing::warn!(
                    subtag = self.code,
                    field,
                    value,
                    error = %e,
                    "registry field does not resolve"
                );
                None
            }
        }
    }

    pub fn scope(&self) -> Option<&'r str> {
        self.record.scope.as_deref()
    }

    pub fn deprecated(&self) -> Option<&'r str> {
        self.record.deprecated.as_deref()
    }

    pub fn added(&self) -> Option<&'r str> {
        self.record.added.as_deref()
    }

    pub fn comments(&self) -> &'r [String] {
        &self.record.comments
    }

    /// The macrolanguage this subtag belongs to, if any.
    pub fn macrolanguage(&self) -> Option<&'r str> {
        self.record.macrolanguage.as_deref()
    }

    /// Prefixes an extlang or variant is recommended after.
    pub fn prefixes(&self) -> &'r [String] {
        &self.record.prefix
    }
}

impl PartialEq for Subtag<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.subtag_type == other.subtag_type && self.code.eq_ignore_ascii_case(other.code)
    }
}

impl Eq for Subtag<'_> {}

impl fmt::Debug for Subtag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subtag")
            .field("code", &self.code)
            .field("subtag_type", &self.subtag_type)
            .finish()
    }
}

impl fmt::Display for Subtag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl Serialize for Subtag<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Subtag", 2)?;
        state.serialize_field("subtag", &self.format())?;
        state.serialize_field("type", &self.subtag_type)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use langtag_core::ERR_TAG;

    fn registry() -> Registry {
        Registry::embedded().unwrap()
    }

    #[test]
    fn test_type_and_code() {
        let registry = registry();
        let zh = Subtag::new(&registry, "zh", SubtagType::Language).unwrap();
        assert_eq!(zh.subtag_type(), SubtagType::Language);
        assert_eq!(zh.code(), "zh");

        let iq = Subtag::parse(&registry, "IQ", "region").unwrap();
        assert_eq!(iq.subtag_type(), SubtagType::Region);
        assert_eq!(iq.code(), "iq");
    }

    #[test]
    fn test_type_name_is_case_insensitive() {
        let registry = registry();
        let latn = Subtag::parse(&registry, "latn", "SCRIPT").unwrap();
        assert_eq!(latn.format(), "Latn");
    }

    #[test]
    fn test_non_existent_code() {
        let registry = registry();
        let err = Subtag::new(&registry, "Whatever", SubtagType::Language).unwrap_err();
        assert_eq!(
            err,
            SubtagError::NonExistent {
                subtag: "whatever".to_string()
            }
        );
        assert_eq!(err.to_string(), "Non-existent subtag whatever.");
    }

    #[test]
    fn test_non_existent_type() {
        let registry = registry();
        let err = Subtag::new(&registry, "en", SubtagType::Script).unwrap_err();
        assert_eq!(err.to_string(), "Non-existent subtag en of type script.");
        assert_eq!(err.code(), 1);
    }

    #[test]
    fn test_unknown_type_name() {
        let registry = registry();
        let err = Subtag::parse(&registry, "en", "Dialect").unwrap_err();
        assert_eq!(err.to_string(), "Non-existent subtag en of type dialect.");

        let err = Subtag::parse(&registry, "zz-top", "dialect").unwrap_err();
        assert!(matches!(err, SubtagError::NonExistent { .. }));
    }

    #[test]
    fn test_whole_tag_record_is_wrong_kind() {
        let registry = registry();
        let err = Subtag::parse(&registry, "i-klingon", "grandfathered").unwrap_err();
        assert_eq!(err.code(), ERR_TAG);
        assert_eq!(err.to_string(), "i-klingon is a grandfathered tag");

        let err = Subtag::parse(&registry, "zh-Hant", "redundant").unwrap_err();
        assert_eq!(err.to_string(), "zh-hant is a redundant tag");
    }

    #[test]
    fn test_format() {
        let registry = registry();
        for (code, kind, expected) in [
            ("en", SubtagType::Language, "en"),
            ("EN", SubtagType::Language, "en"),
            ("GB", SubtagType::Region, "GB"),
            ("gb", SubtagType::Region, "GB"),
            ("Latn", SubtagType::Script, "Latn"),
            ("latn", SubtagType::Script, "Latn"),
            ("419", SubtagType::Region, "419"),
            ("ROZAJ", SubtagType::Variant, "rozaj"),
        ] {
            assert_eq!(Subtag::new(&registry, code, kind).unwrap().format(), expected);
        }
    }

    #[test]
    fn test_description() {
        let registry = registry();
        let iq = Subtag::new(&registry, "IQ", SubtagType::Region).unwrap();
        assert_eq!(iq.description(), ["Iraq".to_string()]);

        let vsv = Subtag::new(&registry, "vsv", SubtagType::Extlang).unwrap();
        assert_eq!(
            vsv.description(),
            [
                "Valencian Sign Language".to_string(),
                "Llengua de signes valenciana".to_string()
            ]
        );
    }

    #[test]
    fn test_preferred() {
        let registry = registry();
        let cases = [
            ("vsv", SubtagType::Extlang, SubtagType::Language, "vsv"),
            ("mo", SubtagType::Language, SubtagType::Language, "ro"),
            ("BU", SubtagType::Region, SubtagType::Region, "MM"),
            ("heploc", SubtagType::Variant, SubtagType::Variant, "alalc97"),
        ];
        for (code, kind, preferred_kind, preferred_format) in cases {
            let preferred = Subtag::new(&registry, code, kind)
                .unwrap()
                .preferred()
                .unwrap_or_else(|| panic!("{code} should have a preferred value"));
            assert_eq!(preferred.subtag_type(), preferred_kind);
            assert_eq!(preferred.format(), preferred_format);
        }

        let world = Subtag::new(&registry, "419", SubtagType::Region).unwrap();
        assert!(world.preferred().is_none());
    }

    #[test]
    fn test_script() {
        let registry = registry();
        let script = Subtag::new(&registry, "en", SubtagType::Language)
            .unwrap()
            .script()
            .unwrap();
        assert_eq!(script.subtag_type(), SubtagType::Script);
        assert_eq!(script.format(), "Latn");

        let zh = Subtag::new(&registry, "zh", SubtagType::Language).unwrap();
        assert!(zh.script().is_none());
    }

    #[test]
    fn test_scope() {
        let registry = registry();
        let scope = |code, kind| Subtag::new(&registry, code, kind).unwrap().scope();
        assert_eq!(scope("zh", SubtagType::Language), Some("macrolanguage"));
        assert_eq!(scope("nah", SubtagType::Language), Some("collection"));
        assert_eq!(scope("en", SubtagType::Language), None);
        assert_eq!(scope("IQ", SubtagType::Region), None);
    }

    #[test]
    fn test_dates_and_comments() {
        let registry = registry();
        let dd = Subtag::new(&registry, "DD", SubtagType::Region).unwrap();
        assert_eq!(dd.deprecated(), Some("1990-10-30"));
        assert_eq!(dd.added(), Some("2005-10-16"));

        let de = Subtag::new(&registry, "DE", SubtagType::Region).unwrap();
        assert_eq!(de.deprecated(), None);

        let dg = Subtag::new(&registry, "DG", SubtagType::Region).unwrap();
        assert_eq!(dg.added(), Some("2009-07-29"));

        let yu = Subtag::new(&registry, "YU", SubtagType::Region).unwrap();
        assert_eq!(yu.comments(), ["see BA, HR, ME, MK, RS, or SI".to_string()]);
        assert!(de.comments().is_empty());
    }

    #[test]
    fn test_macrolanguage_and_prefixes() {
        let registry = registry();
        let cmn = Subtag::new(&registry, "cmn", SubtagType::Extlang).unwrap();
        assert_eq!(cmn.macrolanguage(), Some("zh"));
        assert_eq!(cmn.prefixes(), ["zh".to_string()]);
    }

    #[test]
    fn test_private_use_range_member() {
        let registry = registry();
        let qm = Subtag::new(&registry, "qm", SubtagType::Region).unwrap();
        assert_eq!(qm.format(), "QM");
        assert_eq!(qm.description(), ["Private use".to_string()]);
    }

    #[test]
    fn test_display_and_serialize() {
        let registry = registry();
        let hant = Subtag::new(&registry, "HANT", SubtagType::Script).unwrap();
        assert_eq!(hant.to_string(), "Hant");
        assert_eq!(
            serde_json::to_value(hant).unwrap(),
            serde_json::json!({"subtag": "Hant", "type": "script"})
        );
    }
}
