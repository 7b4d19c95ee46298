//! # langtag-cli: Language Tag Command-Line Interface
//!
//! Provides the `langtag` binary over the `langtag-tags` query surface.
//!
//! ## Subcommands
//!
//! - `langtag check`: Validate tags and print their findings.
//! - `langtag describe`: Descriptions of a tag and its subtags.
//! - `langtag search`: Search registry descriptions by text or regex.
//! - `langtag types`: Subtag types registered for a code.
//! - `langtag subtags`: Resolve codes to subtags; report unknown codes.
//! - `langtag macrolanguage`: Members of a macrolanguage.
//! - `langtag date`: Registry file date.
//!
//! ```bash
//! langtag check en-GB zh-cmn-Hant mt-MT-Arab
//! langtag search --all Lojban
//! langtag --json subtags mt whatever
//! LANGTAG_REGISTRY_PATH=/usr/share/iana/language-subtag-registry langtag date
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; each handler takes its args, a
//!   [`Context`] and a writer, and returns the process exit code.
//! - Handlers delegate to `langtag-tags`. No tag logic here.

pub mod check;
pub mod describe;
pub mod lookup;
pub mod search;

use std::io::Write;

use anyhow::Result;
use langtag_tags::Tags;
use serde::Serialize;

/// Exit code for success.
pub const EXIT_OK: u8 = 0;
/// Exit code for an invalid tag or a lookup that found nothing.
pub const EXIT_INVALID: u8 = 1;
/// Exit code for a registry that could not be loaded.
pub const EXIT_REGISTRY: u8 = 2;

/// Shared state for every handler.
#[derive(Debug, Clone, Copy)]
pub struct Context<'r> {
    pub tags: Tags<'r>,
    /// Emit JSON instead of text.
    pub json: bool,
}

impl<'r> Context<'r> {
    pub fn new(tags: Tags<'r>, json: bool) -> Self {
        Self { tags, json }
    }
}

/// Write `value` as pretty JSON followed by a newline.
pub fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Exit code for a result set: success when anything was found.
pub fn found(any: bool) -> u8 {
    if any {
        EXIT_OK
    } else {
        EXIT_INVALID
    }
}

/// Run a handler against the embedded registry and capture its output.
#[cfg(test)]
pub(crate) fn capture(
    json: bool,
    run: impl FnOnce(&Context<'_>, &mut dyn Write) -> Result<u8>,
) -> (u8, String) {
    let registry = langtag_registry::Registry::embedded().unwrap();
    let ctx = Context::new(Tags::new(&registry), json);
    let mut out = Vec::new();
    let code = run(&ctx, &mut out).unwrap();
    (code, String::from_utf8(out).unwrap())
}
