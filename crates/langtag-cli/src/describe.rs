//! # Describe Subcommand
//!
//! Prints the whole-tag descriptions of a tag followed by those of each of
//! its subtags.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use crate::{found, write_json, Context};

/// Arguments for the `langtag describe` subcommand.
#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Tag to describe.
    #[arg(value_name = "TAG")]
    pub tag: String,
}

/// Execute the describe subcommand.
pub fn run_describe(args: &DescribeArgs, ctx: &Context<'_>, out: &mut dyn Write) -> Result<u8> {
    let descriptions = ctx.tags.description(&args.tag);
    if ctx.json {
        write_json(out, &descriptions)?;
    } else {
        for description in &descriptions {
            writeln!(out, "{description}")?;
        }
    }
    Ok(found(!descriptions.is_empty()))
}
