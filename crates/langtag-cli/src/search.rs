//! # Search Subcommand
//!
//! Searches registry descriptions. A plain query is a substring match,
//! case-insensitive when written in lower case; `--regex` compiles the
//! query as a regular expression instead.

use std::io::Write;

use anyhow::{Context as _, Result};
use clap::Args;
use langtag_tags::{DescriptionQuery, SearchHit};
use regex::Regex;
use serde::Serialize;

use crate::{found, write_json, Context};

/// Arguments for the `langtag search` subcommand.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text or pattern to look for in descriptions.
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Include grandfathered and redundant tags.
    #[arg(long)]
    pub all: bool,

    /// Treat QUERY as a regular expression.
    #[arg(long)]
    pub regex: bool,
}

#[derive(Serialize)]
struct HitReport<'a, 'r> {
    #[serde(flatten)]
    hit: &'a SearchHit<'r>,
    description: &'a [String],
}

/// Execute the search subcommand.
pub fn run_search(args: &SearchArgs, ctx: &Context<'_>, out: &mut dyn Write) -> Result<u8> {
    let pattern = if args.regex {
        Some(
            Regex::new(&args.query)
                .with_context(|| format!("invalid search pattern: {}", args.query))?,
        )
    } else {
        None
    };
    let query = match &pattern {
        Some(pattern) => DescriptionQuery::Pattern(pattern),
        None => DescriptionQuery::Text(&args.query),
    };

    let hits = ctx.tags.search(query, args.all);
    tracing::debug!(query = %args.query, hits = hits.len(), "searched descriptions");

    if ctx.json {
        let reports: Vec<HitReport<'_, '_>> = hits
            .iter()
            .map(|hit| HitReport {
                hit,
                description: hit.description(),
            })
            .collect();
        write_json(out, &reports)?;
    } else {
        for hit in &hits {
            writeln!(
                out,
                "{}\t{}\t{}",
                hit.format(),
                hit.type_name(),
                hit.description().join("; ")
            )?;
        }
    }
    Ok(found(!hits.is_empty()))
}
