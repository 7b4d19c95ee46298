//! # Registry Store
//!
//! Immutable in-memory tables built once from the registry source:
//!
//! - **registry**: the ordered record list. Records are stored once and
//!   referred to by offset everywhere else.
//! - **index**: lowercased subtag/tag text → `{record type → offset}`.
//! - **macrolanguage**: macrolanguage code → member codes.
//! - **meta**: the registry `File-Date`.
//!
//! ## Invariants
//!
//! - Every record has exactly one of `Subtag` or `Tag`, matching its type.
//! - Every index offset is in bounds and points at a record of the indexed
//!   type.
//! - Offsets are stable for the lifetime of the `Registry`; nothing is
//!   mutated after construction.
//!
//! Lookups lowercase their input, so callers may pass any casing.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use langtag_core::{Meta, RecordType, RegistryRecord};
use serde::{Deserialize, Serialize};

use crate::config::{RegistryConfig, RegistrySource, SourceFormat};
use crate::error::{RegistryError, RegistryResult};
use crate::record_jar;

/// Registry snapshot compiled into the crate.
pub const EMBEDDED_REGISTRY: &str = include_str!("../data/language-subtag-registry.txt");

/// Separator between the bounds of a private-use range (`qaa..qtz`).
pub const RANGE_SEPARATOR: &str = "..";

/// Record offsets for one index key, ordered by record type.
pub type TypeOffsets = BTreeMap<RecordType, usize>;

/// Lowercased key → type offsets.
pub type Index = HashMap<String, TypeOffsets>;

/// Macrolanguage code → member subtag codes, in registry order.
pub type Macrolanguages = BTreeMap<String, Vec<String>>;

/// The four registry tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Index,
    Registry,
    Macrolanguage,
    Meta,
}

impl Table {
    pub fn all() -> &'static [Table] {
        &[Self::Index, Self::Registry, Self::Macrolanguage, Self::Meta]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Registry => "registry",
            Self::Macrolanguage => "macrolanguage",
            Self::Meta => "meta",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Table {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "index" => Ok(Self::Index),
            "registry" => Ok(Self::Registry),
            "macrolanguage" => Ok(Self::Macrolanguage),
            "meta" => Ok(Self::Meta),
            other => Err(RegistryError::UnknownTable {
                name: other.to_string(),
            }),
        }
    }
}

/// Borrowed view of one table.
#[derive(Debug, Clone, Copy)]
pub enum TableRef<'a> {
    Index(&'a Index),
    Registry(&'a [RegistryRecord]),
    Macrolanguage(&'a Macrolanguages),
    Meta(&'a Meta),
}

impl TableRef<'_> {
    /// Number of entries in the table. `Meta` counts as one.
    pub fn len(&self) -> usize {
        match self {
            Self::Index(index) => index.len(),
            Self::Registry(records) => records.len(),
            Self::Macrolanguage(macros) => macros.len(),
            Self::Meta(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Serialized form of all four tables, as exchanged with other tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryBundle {
    pub index: BTreeMap<String, TypeOffsets>,
    pub registry: Vec<RegistryRecord>,
    #[serde(default)]
    pub macrolanguage: Macrolanguages,
    pub meta: Meta,
}

/// The loaded registry.
#[derive(Debug, Clone)]
pub struct Registry {
    records: Vec<RegistryRecord>,
    index: Index,
    macrolanguages: Macrolanguages,
    meta: Meta,
    file_date: NaiveDate,
}

impl Registry {
    /// Build the tables from parsed records.
    ///
    /// # Errors
    ///
    /// `InvalidRecord` for a malformed record, `InvalidFileDate` when the
    /// file date is not `YYYY-MM-DD`.
    pub fn from_records(meta: Meta, records: Vec<RegistryRecord>) -> RegistryResult<Self> {
        let file_date = parse_file_date(&meta.file_date)?;
        check_records(&records)?;
        let index = build_index(&records);
        let macrolanguages = build_macrolanguages(&records);
        Ok(Self {
            records,
            index,
            macrolanguages,
            meta,
            file_date,
        })
    }

    /// Parse IANA record-jar text.
    pub fn from_record_jar(text: &str) -> RegistryResult<Self> {
        let jar = record_jar::parse(text)?;
        Self::from_records(jar.meta, jar.records)
    }

    /// Parse a JSON bundle with `index`, `registry`, `macrolanguage` and
    /// `meta` keys. The supplied index is used as-is after checking that
    /// every offset refers to a record of the indexed type.
    pub fn from_json(text: &str) -> RegistryResult<Self> {
        let bundle: RegistryBundle = serde_json::from_str(text)?;
        Self::from_bundle(bundle)
    }

    /// Build from an already-deserialized bundle.
    pub fn from_bundle(bundle: RegistryBundle) -> RegistryResult<Self> {
        let file_date = parse_file_date(&bundle.meta.file_date)?;
        check_records(&bundle.registry)?;

        let mut index = Index::with_capacity(bundle.index.len());
        for (key, offsets) in bundle.index {
            for (record_type, offset) in &offsets {
                let record = bundle.registry.get(*offset).ok_or_else(|| {
                    RegistryError::InvalidRecord {
                        offset: *offset,
                        reason: format!("index entry {key:?} points past the registry"),
                    }
                })?;
                if record.record_type != *record_type {
                    return Err(RegistryError::InvalidRecord {
                        offset: *offset,
                        reason: format!(
                            "index entry {key:?} expects a {record_type} record, found {}",
                            record.record_type
                        ),
                    });
                }
            }
            index.insert(key.to_lowercase(), offsets);
        }

        let macrolanguages = if bundle.macrolanguage.is_empty() {
            build_macrolanguages(&bundle.registry)
        } else {
            bundle
                .macrolanguage
                .into_iter()
                .map(|(code, members)| (code.to_lowercase(), members))
                .collect()
        };

        Ok(Self {
            records: bundle.registry,
            index,
            macrolanguages,
            meta: bundle.meta,
            file_date,
        })
    }

    /// The registry snapshot compiled into this crate.
    pub fn embedded() -> RegistryResult<Self> {
        Self::from_record_jar(EMBEDDED_REGISTRY)
    }

    /// Load according to `config`.
    pub fn load(config: &RegistryConfig) -> RegistryResult<Self> {
        tracing::debug!(source = ?config.source, "loading language subtag registry");
        let registry = match &config.source {
            RegistrySource::Embedded => Self::embedded()?,
            RegistrySource::File(path) => match SourceFormat::of(path) {
                SourceFormat::JsonBundle => Self::from_json_file(path)?,
                SourceFormat::RecordJar => Self::from_record_jar(&read_source(path)?)?,
            },
        };
        tracing::info!(
            records = registry.len(),
            index_entries = registry.index.len(),
            macrolanguages = registry.macrolanguages.len(),
            file_date = %registry.meta.file_date,
            "loaded language subtag registry"
        );
        Ok(registry)
    }

    fn from_json_file(path: &Path) -> RegistryResult<Self> {
        let text = read_source(path)?;
        let bundle: RegistryBundle =
            serde_json::from_str(&text).map_err(|e| RegistryError::JsonParse {
                path: path.to_path_buf(),
                source: e,
            })?;
        Self::from_bundle(bundle)
    }

    /// Export all four tables.
    pub fn to_bundle(&self) -> RegistryBundle {
        RegistryBundle {
            index: self
                .index
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            registry: self.records.clone(),
            macrolanguage: self.macrolanguages.clone(),
            meta: self.meta.clone(),
        }
    }

    /// Borrow one table by name.
    pub fn get(&self, table: Table) -> TableRef<'_> {
        match table {
            Table::Index => TableRef::Index(&self.index),
            Table::Registry => TableRef::Registry(&self.records),
            Table::Macrolanguage => TableRef::Macrolanguage(&self.macrolanguages),
            Table::Meta => TableRef::Meta(&self.meta),
        }
    }

    /// All records in registry order.
    pub fn records(&self) -> &[RegistryRecord] {
        &self.records
    }

    pub fn record(&self, offset: usize) -> Option<&RegistryRecord> {
        self.records.get(offset)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Type offsets for `code`, case-insensitively.
    pub fn lookup(&self, code: &str) -> Option<&TypeOffsets> {
        self.index.get(&code.to_lowercase())
    }

    /// The stored index key and type offsets for `code`.
    pub fn lookup_entry(&self, code: &str) -> Option<(&str, &TypeOffsets)> {
        self.index
            .get_key_value(&code.to_lowercase())
            .map(|(key, offsets)| (key.as_str(), offsets))
    }

    /// Offset and record for `code` with the given type.
    pub fn lookup_typed(
        &self,
        code: &str,
        record_type: RecordType,
    ) -> Option<(usize, &RegistryRecord)> {
        let offset = *self.lookup(code)?.get(&record_type)?;
        self.records.get(offset).map(|record| (offset, record))
    }

    /// True when `code` appears in the index under any type.
    pub fn contains(&self, code: &str) -> bool {
        self.lookup(code).is_some()
    }

    /// Record types registered for `code`, in type order.
    pub fn types_of(&self, code: &str) -> Vec<RecordType> {
        self.lookup(code)
            .map(|offsets| offsets.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn macrolanguages(&self) -> &Macrolanguages {
        &self.macrolanguages
    }

    pub fn is_macrolanguage(&self, code: &str) -> bool {
        self.macrolanguages.contains_key(&code.to_lowercase())
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    /// `File-Date` as written in the source, `YYYY-MM-DD`.
    pub fn file_date(&self) -> &str {
        &self.meta.file_date
    }

    /// `File-Date` as a calendar date.
    pub fn file_date_parsed(&self) -> NaiveDate {
        self.file_date
    }
}

fn read_source(path: &Path) -> RegistryResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RegistryError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            RegistryError::Io(e)
        }
    })
}

fn parse_file_date(value: &str) -> RegistryResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|source| RegistryError::InvalidFileDate {
        value: value.to_string(),
        source,
    })
}

fn check_records(records: &[RegistryRecord]) -> RegistryResult<()> {
    for (offset, record) in records.iter().enumerate() {
        record
            .check_shape()
            .map_err(|reason| RegistryError::InvalidRecord { offset, reason })?;
    }
    Ok(())
}

fn build_index(records: &[RegistryRecord]) -> Index {
    let mut index = Index::new();
    for (offset, record) in records.iter().enumerate() {
        let Some(key) = record.key() else { continue };
        for code in index_keys(key) {
            index
                .entry(code)
                .or_default()
                .entry(record.record_type)
                .or_insert(offset);
        }
    }
    index
}

/// Index keys for a record key: the lowercased key itself, or every code
/// in a private-use range.
fn index_keys(key: &str) -> Vec<String> {
    if let Some((start, end)) = key.split_once(RANGE_SEPARATOR) {
        match expand_range(start, end) {
            Some(codes) => return codes,
            None => tracing::warn!(range = key, "unexpandable subtag range, indexing verbatim"),
        }
    }
    vec![key.to_lowercase()]
}

/// Expand an alphabetic range such as `qaa..qtz` into every code between
/// the bounds, inclusive. Bounds must be ASCII letters of equal length.
fn expand_range(start: &str, end: &str) -> Option<Vec<String>> {
    let start = start.to_ascii_lowercase();
    let end = end.to_ascii_lowercase();
    let alphabetic = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_lowercase());
    if start.len() != end.len() || !alphabetic(&start) || !alphabetic(&end) || start > end {
        return None;
    }

    let mut current = start.into_bytes();
    let mut codes = Vec::new();
    loop {
        let code: String = current.iter().map(|&b| char::from(b)).collect();
        let reached_end = code == end;
        codes.push(code);
        if reached_end {
            return Some(codes);
        }
        for byte in current.iter_mut().rev() {
            if *byte == b'z' {
                *byte = b'a';
            } else {
                *byte += 1;
                break;
            }
        }
    }
}

fn build_macrolanguages(records: &[RegistryRecord]) -> Macrolanguages {
    let mut macros = Macrolanguages::new();
    for record in records {
        if record.record_type == RecordType::Language
            && record.scope.as_deref() == Some("macrolanguage")
        {
            if let Some(code) = &record.subtag {
                macros.entry(code.to_lowercase()).or_default();
            }
        }
    }
    for record in records {
        if let (Some(macrolanguage), Some(member)) = (&record.macrolanguage, &record.subtag) {
            let members = macros.entry(macrolanguage.to_lowercase()).or_default();
            let member = member.to_lowercase();
            if !members.contains(&member) {
                members.push(member);
            }
        }
    }
    macros
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(record_type: RecordType, key: &str) -> RegistryRecord {
        let mut record = RegistryRecord::new(record_type);
        if record_type.is_whole_tag() {
            record.tag = Some(key.to_string());
        } else {
            record.subtag = Some(key.to_string());
        }
        record
    }

    fn meta() -> Meta {
        Meta {
            file_date: "2021-03-05".to_string(),
        }
    }

    #[test]
    fn table_names_roundtrip() {
        for table in Table::all() {
            assert_eq!(table.as_str().parse::<Table>().unwrap(), *table);
        }
        assert!(matches!(
            "tables".parse::<Table>(),
            Err(RegistryError::UnknownTable { .. })
        ));
    }

    #[test]
    fn index_is_case_insensitive_and_typed() {
        let registry = Registry::from_records(
            meta(),
            vec![
                record(RecordType::Language, "mt"),
                record(RecordType::Region, "MT"),
                record(RecordType::Script, "Latn"),
            ],
        )
        .unwrap();

        assert_eq!(
            registry.types_of("Mt"),
            vec![RecordType::Language, RecordType::Region]
        );
        assert_eq!(registry.lookup("mt").unwrap()[&RecordType::Region], 1);
        assert!(registry.lookup_typed("LATN", RecordType::Script).is_some());
        assert!(registry.lookup_typed("latn", RecordType::Region).is_none());
        assert!(registry.types_of("zz").is_empty());
    }

    #[test]
    fn expands_private_use_ranges() {
        assert_eq!(
            expand_range("QM", "QP").unwrap(),
            vec!["qm", "qn", "qo", "qp"]
        );
        let languages = expand_range("qaa", "qtz").unwrap();
        assert_eq!(languages.len(), 20 * 26);
        assert_eq!(languages.first().map(String::as_str), Some("qaa"));
        assert_eq!(languages.last().map(String::as_str), Some("qtz"));
        assert_eq!(expand_range("Qaaa", "Qabx").unwrap().len(), 26 + 24);

        assert!(expand_range("qtz", "qaa").is_none());
        assert!(expand_range("qa", "qtz").is_none());
        assert!(expand_range("001", "009").is_none());
    }

    #[test]
    fn range_records_are_indexed_per_code() {
        let registry =
            Registry::from_records(meta(), vec![record(RecordType::Region, "XA..XZ")]).unwrap();
        assert!(registry.contains("xq"));
        assert!(registry.contains("XZ"));
        assert!(!registry.contains("xa..xz"));
    }

    #[test]
    fn macrolanguage_table_collects_members_and_scopes() {
        let mut zh = record(RecordType::Language, "zh");
        zh.scope = Some("macrolanguage".to_string());
        let mut cmn = record(RecordType::Language, "cmn");
        cmn.macrolanguage = Some("zh".to_string());
        let mut cmn_ext = record(RecordType::Extlang, "cmn");
        cmn_ext.macrolanguage = Some("zh".to_string());
        let mut lonely = record(RecordType::Language, "ms");
        lonely.scope = Some("macrolanguage".to_string());

        let registry = Registry::from_records(meta(), vec![zh, cmn, cmn_ext, lonely]).unwrap();
        assert_eq!(registry.macrolanguages()["zh"], vec!["cmn".to_string()]);
        assert!(registry.is_macrolanguage("ZH"));
        assert!(registry.is_macrolanguage("ms"));
        assert!(!registry.is_macrolanguage("cmn"));
    }

    #[test]
    fn rejects_malformed_records() {
        let err = Registry::from_records(meta(), vec![RegistryRecord::new(RecordType::Language)])
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidRecord { offset: 0, .. }));
    }

    #[test]
    fn rejects_bad_file_date() {
        let err = Registry::from_records(
            Meta {
                file_date: "March 2021".to_string(),
            },
            Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidFileDate { .. }));
    }

    #[test]
    fn json_bundle_roundtrip() {
        let registry = Registry::from_records(
            meta(),
            vec![
                record(RecordType::Language, "en"),
                record(RecordType::Grandfathered, "i-klingon"),
            ],
        )
        .unwrap();
        let json = serde_json::to_string(&registry.to_bundle()).unwrap();
        let reloaded = Registry::from_json(&json).unwrap();

        assert_eq!(reloaded.records(), registry.records());
        assert_eq!(reloaded.types_of("i-klingon"), vec![RecordType::Grandfathered]);
        assert_eq!(reloaded.file_date(), "2021-03-05");
    }

    #[test]
    fn json_bundle_offsets_are_checked() {
        let out_of_bounds = r#"{
            "index": {"en": {"language": 3}},
            "registry": [{"Type": "language", "Subtag": "en", "Description": ["English"]}],
            "meta": {"File-Date": "2021-03-05"}
        }"#;
        assert!(matches!(
            Registry::from_json(out_of_bounds),
            Err(RegistryError::InvalidRecord { offset: 3, .. })
        ));

        let wrong_type = r#"{
            "index": {"en": {"region": 0}},
            "registry": [{"Type": "language", "Subtag": "en", "Description": ["English"]}],
            "meta": {"File-Date": "2021-03-05"}
        }"#;
        assert!(Registry::from_json(wrong_type)
            .unwrap_err()
            .to_string()
            .contains("expects a region record"));
    }

    #[test]
    fn get_returns_each_table() {
        let registry = Registry::from_records(meta(), vec![record(RecordType::Script, "Latn")])
            .unwrap();
        assert_eq!(registry.get(Table::Registry).len(), 1);
        assert_eq!(registry.get(Table::Index).len(), 1);
        assert!(registry.get(Table::Macrolanguage).is_empty());
        assert!(matches!(registry.get(Table::Meta), TableRef::Meta(m) if m.file_date == "2021-03-05"));
    }
}
