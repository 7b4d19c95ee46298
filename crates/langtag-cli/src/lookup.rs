//! # Lookup Subcommands
//!
//! Direct registry lookups: `types`, `subtags`, `macrolanguage` and
//! `date`.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use langtag_tags::Subtag;
use serde::Serialize;

use crate::{found, write_json, Context, EXIT_INVALID, EXIT_OK};

/// Arguments for the `langtag types` subcommand.
#[derive(Args, Debug)]
pub struct TypesArgs {
    /// Subtag code.
    #[arg(value_name = "CODE")]
    pub code: String,
}

/// Arguments for the `langtag subtags` subcommand.
#[derive(Args, Debug)]
pub struct SubtagsArgs {
    /// Subtag codes to resolve.
    #[arg(value_name = "CODE", required = true)]
    pub codes: Vec<String>,
}

/// Arguments for the `langtag macrolanguage` subcommand.
#[derive(Args, Debug)]
pub struct MacrolanguageArgs {
    /// Macrolanguage code, e.g. `zh`.
    #[arg(value_name = "CODE")]
    pub code: String,
}

fn write_subtag(out: &mut dyn Write, subtag: &Subtag<'_>) -> Result<()> {
    writeln!(
        out,
        "{}\t{}\t{}",
        subtag.format(),
        subtag.subtag_type(),
        subtag.description().join("; ")
    )?;
    Ok(())
}

/// Execute the types subcommand.
pub fn run_types(args: &TypesArgs, ctx: &Context<'_>, out: &mut dyn Write) -> Result<u8> {
    let types = ctx.tags.types(&args.code);
    if ctx.json {
        write_json(out, &types)?;
    } else {
        for kind in &types {
            writeln!(out, "{kind}")?;
        }
    }
    Ok(found(!types.is_empty()))
}

#[derive(Serialize)]
struct SubtagsReport<'a, 'r> {
    subtags: &'a [Subtag<'r>],
    nonexistent: &'a [String],
}

/// Execute the subtags subcommand. Unknown codes are reported and make the
/// exit code 1.
pub fn run_subtags(args: &SubtagsArgs, ctx: &Context<'_>, out: &mut dyn Write) -> Result<u8> {
    let subtags = ctx.tags.subtags(&args.codes);
    let nonexistent = ctx.tags.filter(&args.codes);

    if ctx.json {
        write_json(
            out,
            &SubtagsReport {
                subtags: &subtags,
                nonexistent: &nonexistent,
            },
        )?;
    } else {
        for subtag in &subtags {
            write_subtag(out, subtag)?;
        }
        for code in &nonexistent {
            writeln!(out, "{code}\tnon-existent")?;
        }
    }
    Ok(if nonexistent.is_empty() {
        EXIT_OK
    } else {
        EXIT_INVALID
    })
}

/// Execute the macrolanguage subcommand.
pub fn run_macrolanguage(
    args: &MacrolanguageArgs,
    ctx: &Context<'_>,
    out: &mut dyn Write,
) -> Result<u8> {
    let members = match ctx.tags.languages(&args.code) {
        Ok(members) => members,
        Err(e) => {
            tracing::error!(code = e.code(), "{e}");
            return Ok(EXIT_INVALID);
        }
    };
    if ctx.json {
        write_json(out, &members)?;
    } else {
        for member in &members {
            write_subtag(out, member)?;
        }
    }
    Ok(EXIT_OK)
}

/// Execute the date subcommand.
pub fn run_date(ctx: &Context<'_>, out: &mut dyn Write) -> Result<u8> {
    let date = ctx.tags.date();
    if ctx.json {
        write_json(out, &serde_json::json!({ "File-Date": date }))?;
    } else {
        writeln!(out, "{date}")?;
    }
    Ok(EXIT_OK)
}
