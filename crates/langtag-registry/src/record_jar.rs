//! Record-jar parsing for the IANA `language-subtag-registry` file.
//!
//! The registry is a sequence of records separated by `%%` lines. Each
//! record is a list of `Field-Name: value` lines; a line that begins with
//! whitespace continues the previous field. The first record carries only
//! the `File-Date`.
//!
//! ```text
//! File-Date: 2021-03-05
//! %%
//! Type: language
//! Subtag: en
//! Description: English
//! Added: 2005-10-16
//! Suppress-Script: Latn
//! ```
//!
//! `Description`, `Comments` and `Prefix` repeat; every other field is
//! single-valued. Field names the registry may add in the future are
//! ignored. Record shape (Subtag vs Tag) is checked by the store, not here.

use std::str::FromStr;

use langtag_core::{Meta, RecordType, RegistryRecord};

use crate::error::{RegistryError, RegistryResult};

/// Separator line between records.
const RECORD_SEPARATOR: &str = "%%";

/// A parsed registry file.
#[derive(Debug, Clone)]
pub struct RecordJar {
    pub meta: Meta,
    pub records: Vec<RegistryRecord>,
}

/// Raw fields of one record, before typing.
#[derive(Debug)]
struct Block {
    /// 1-based line number of the first line of the block.
    line: usize,
    fields: Vec<(String, String)>,
}

impl Block {
    fn new(line: usize) -> Self {
        Self {
            line,
            fields: Vec::new(),
        }
    }

    fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Parse registry text into its metadata and ordered records.
pub fn parse(text: &str) -> RegistryResult<RecordJar> {
    let blocks = split_blocks(text)?;
    let mut blocks = blocks.into_iter();

    let header = blocks.next().ok_or_else(|| RegistryError::RecordJar {
        line: 1,
        reason: "registry text is empty".to_string(),
    })?;
    let file_date = header
        .field("File-Date")
        .ok_or_else(|| RegistryError::RecordJar {
            line: header.line,
            reason: "first record must hold File-Date".to_string(),
        })?;
    let meta = Meta {
        file_date: file_date.to_string(),
    };

    let records = blocks
        .map(|block| build_record(&block))
        .collect::<RegistryResult<Vec<_>>>()?;

    Ok(RecordJar { meta, records })
}

/// Split text into non-empty field blocks, unfolding continuation lines.
fn split_blocks(text: &str) -> RegistryResult<Vec<Block>> {
    let mut blocks = Vec::new();
    let mut current = Block::new(1);

    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.trim_end_matches('\r');

        if line.trim_end() == RECORD_SEPARATOR {
            let finished = std::mem::replace(&mut current, Block::new(line_no + 1));
            if !finished.fields.is_empty() {
                blocks.push(finished);
            }
            continue;
        }

        if line.trim().is_empty() {
            continue;
        }

        if line.starts_with(char::is_whitespace) {
            let (_, value) = current
                .fields
                .last_mut()
                .ok_or_else(|| RegistryError::RecordJar {
                    line: line_no,
                    reason: "continuation line without a preceding field".to_string(),
                })?;
            value.push(' ');
            value.push_str(line.trim());
            continue;
        }

        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| RegistryError::RecordJar {
                line: line_no,
                reason: format!("expected 'Field: value', found {line:?}"),
            })?;
        if current.fields.is_empty() {
            current.line = line_no;
        }
        current
            .fields
            .push((name.trim().to_string(), value.trim().to_string()));
    }

    if !current.fields.is_empty() {
        blocks.push(current);
    }
    Ok(blocks)
}

fn build_record(block: &Block) -> RegistryResult<RegistryRecord> {
    let type_name = block.field("Type").ok_or_else(|| RegistryError::RecordJar {
        line: block.line,
        reason: "record has no Type".to_string(),
    })?;
    let record_type = RecordType::from_str(type_name).map_err(|e| RegistryError::RecordJar {
        line: block.line,
        reason: e.to_string(),
    })?;

    let mut record = RegistryRecord::new(record_type);
    for (name, value) in &block.fields {
        let value = value.clone();
        match name.as_str() {
            "Subtag" => record.subtag = Some(value),
            "Tag" => record.tag = Some(value),
            "Description" => record.description.push(value),
            "Added" => record.added = Some(value),
            "Deprecated" => record.deprecated = Some(value),
            "Preferred-Value" => record.preferred_value = Some(value),
            "Suppress-Script" => record.suppress_script = Some(value),
            "Scope" => record.scope = Some(value),
            "Macrolanguage" => record.macrolanguage = Some(value),
            "Prefix" => record.prefix.push(value),
            "Comments" => record.comments.push(value),
            _ => {}
        }
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = concat!(
        "File-Date: 2021-03-05\n",
        "%%\n",
        "Type: language\n",
        "Subtag: en\n",
        "Description: English\n",
        "Added: 2005-10-16\n",
        "Suppress-Script: Latn\n",
        "%%\n",
        "Type: region\n",
        "Subtag: GB\n",
        "Description: United Kingdom\n",
        "Added: 2005-10-16\n",
        "Comments: as of 2006-03-29 GB no longer includes the Channel Islands\n",
        "  and Isle of Man; see GG, JE, IM\n",
        "%%\n",
        "Type: grandfathered\n",
        "Tag: i-klingon\n",
        "Description: Klingon\n",
        "Added: 1999-05-26\n",
        "Deprecated: 2004-02-24\n",
        "Preferred-Value: tlh\n",
    );

    #[test]
    fn parses_header_and_records() {
        let jar = parse(SAMPLE).unwrap();
        assert_eq!(jar.meta.file_date, "2021-03-05");
        assert_eq!(jar.records.len(), 3);

        let en = &jar.records[0];
        assert_eq!(en.record_type, RecordType::Language);
        assert_eq!(en.subtag.as_deref(), Some("en"));
        assert_eq!(en.suppress_script.as_deref(), Some("Latn"));
        assert_eq!(en.description, vec!["English".to_string()]);

        let klingon = &jar.records[2];
        assert_eq!(klingon.record_type, RecordType::Grandfathered);
        assert_eq!(klingon.tag.as_deref(), Some("i-klingon"));
        assert_eq!(klingon.preferred_value.as_deref(), Some("tlh"));
    }

    #[test]
    fn unfolds_continuation_lines() {
        let jar = parse(SAMPLE).unwrap();
        assert_eq!(
            jar.records[1].comments,
            vec![
                "as of 2006-03-29 GB no longer includes the Channel Islands and Isle of Man; see GG, JE, IM"
                    .to_string()
            ]
        );
    }

    #[test]
    fn accumulates_repeated_fields() {
        let text = "File-Date: 2021-03-05\n%%\nType: language\nSubtag: mo\n\
Description: Moldavian\nDescription: Moldovan\nAdded: 2005-10-16\n";
        let jar = parse(text).unwrap();
        assert_eq!(
            jar.records[0].description,
            vec!["Moldavian".to_string(), "Moldovan".to_string()]
        );
    }

    #[test]
    fn accepts_crlf_and_trailing_separator() {
        let text = "File-Date: 2021-03-05\r\n%%\r\nType: script\r\nSubtag: Latn\r\nDescription: Latin\r\n%%\r\n";
        let jar = parse(text).unwrap();
        assert_eq!(jar.records.len(), 1);
        assert_eq!(jar.records[0].subtag.as_deref(), Some("Latn"));
    }

    #[test]
    fn ignores_unknown_fields() {
        let text = "File-Date: 2021-03-05\n%%\nType: language\nSubtag: xx\nFuture-Field: yes\n";
        let jar = parse(text).unwrap();
        assert_eq!(jar.records[0].subtag.as_deref(), Some("xx"));
    }

    #[test]
    fn rejects_empty_text() {
        assert!(matches!(
            parse(""),
            Err(RegistryError::RecordJar { line: 1, .. })
        ));
    }

    #[test]
    fn rejects_missing_file_date() {
        let err = parse("Type: language\nSubtag: en\n").unwrap_err();
        assert!(err.to_string().contains("File-Date"));
    }

    #[test]
    fn rejects_unknown_type() {
        let text = "File-Date: 2021-03-05\n%%\nType: dialect\nSubtag: xx\n";
        let err = parse(text).unwrap_err();
        assert!(matches!(err, RegistryError::RecordJar { line: 3, .. }));
        assert!(err.to_string().contains("dialect"));
    }

    #[test]
    fn rejects_record_without_type() {
        let text = "File-Date: 2021-03-05\n%%\nSubtag: xx\n";
        assert!(parse(text).unwrap_err().to_string().contains("no Type"));
    }

    #[test]
    fn rejects_line_without_colon() {
        let text = "File-Date: 2021-03-05\n%%\nType: language\nSubtag en\n";
        let err = parse(text).unwrap_err();
        assert!(matches!(err, RegistryError::RecordJar { line: 4, .. }));
    }

    #[test]
    fn rejects_leading_continuation() {
        let text = "File-Date: 2021-03-05\n%%\n  dangling\n";
        assert!(parse(text)
            .unwrap_err()
            .to_string()
            .contains("continuation"));
    }
}
