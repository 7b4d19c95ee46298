//! # Check Subcommand
//!
//! Validates each tag and prints its conventional format, type and
//! findings. Exits 1 when any tag is invalid.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use langtag_tags::{Tag, TagError};
use serde::Serialize;

use crate::{write_json, Context, EXIT_INVALID, EXIT_OK};

/// Arguments for the `langtag check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Tags to validate.
    #[arg(value_name = "TAG", required = true)]
    pub tags: Vec<String>,
}

#[derive(Serialize)]
struct Report<'a, 'r> {
    #[serde(flatten)]
    tag: &'a Tag<'r>,
    errors: &'a [TagError<'r>],
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs, ctx: &Context<'_>, out: &mut dyn Write) -> Result<u8> {
    let checked: Vec<(Tag<'_>, Vec<TagError<'_>>)> = args
        .tags
        .iter()
        .map(|text| {
            let tag = ctx.tags.tag(text);
            let errors = tag.errors();
            (tag, errors)
        })
        .collect();

    let invalid = checked.iter().filter(|(_, errors)| !errors.is_empty()).count();
    tracing::debug!(checked = checked.len(), invalid, "checked tags");

    if ctx.json {
        let reports: Vec<Report<'_, '_>> = checked
            .iter()
            .map(|(tag, errors)| Report { tag, errors })
            .collect();
        write_json(out, &reports)?;
    } else {
        for (tag, errors) in &checked {
            let verdict = if errors.is_empty() { "valid" } else { "invalid" };
            writeln!(out, "{}\t{}\t{verdict}", tag.format(), tag.tag_type())?;
            for error in errors {
                writeln!(
                    out,
                    "  {} ({}): {}",
                    error.code.name(),
                    error.code.code(),
                    error.message
                )?;
            }
        }
    }

    Ok(if invalid == 0 { EXIT_OK } else { EXIT_INVALID })
}
