//! # langtag CLI entry point
//!
//! Parses command-line arguments, selects the registry and dispatches to
//! subcommand handlers.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use langtag_cli::check::{run_check, CheckArgs};
use langtag_cli::describe::{run_describe, DescribeArgs};
use langtag_cli::lookup::{
    run_date, run_macrolanguage, run_subtags, run_types, MacrolanguageArgs, SubtagsArgs,
    TypesArgs,
};
use langtag_cli::search::{run_search, SearchArgs};
use langtag_cli::{Context, EXIT_INVALID, EXIT_REGISTRY};
use langtag_registry::{Registry, RegistryConfig};
use langtag_tags::Tags;

/// BCP 47 language tag toolkit.
///
/// Validates language tags against the IANA Language Subtag Registry and
/// looks up subtags, descriptions and macrolanguages.
#[derive(Parser, Debug)]
#[command(name = "langtag", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Registry file to use instead of the built-in snapshot. A `.json`
    /// path is read as a JSON bundle, anything else as IANA record-jar.
    #[arg(long, global = true, value_name = "PATH")]
    registry: Option<PathBuf>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate tags and list their findings.
    Check(CheckArgs),

    /// Print the descriptions of a tag and its subtags.
    Describe(DescribeArgs),

    /// Search registry descriptions.
    Search(SearchArgs),

    /// List the subtag types registered for a code.
    Types(TypesArgs),

    /// Resolve codes to subtags.
    Subtags(SubtagsArgs),

    /// List the members of a macrolanguage.
    Macrolanguage(MacrolanguageArgs),

    /// Print the registry file date.
    Date,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "langtag starting");

    let owned;
    let registry = match &cli.registry {
        Some(path) => match Registry::load(&RegistryConfig::from_file(path)) {
            Ok(registry) => {
                owned = registry;
                &owned
            }
            Err(e) => {
                tracing::error!(path = %path.display(), "{e}");
                return ExitCode::from(EXIT_REGISTRY);
            }
        },
        None => match langtag_registry::global() {
            Ok(registry) => registry,
            Err(e) => {
                tracing::error!("{e}");
                return ExitCode::from(EXIT_REGISTRY);
            }
        },
    };

    let ctx = Context::new(Tags::new(registry), cli.json);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let result = match &cli.command {
        Commands::Check(args) => run_check(args, &ctx, &mut out),
        Commands::Describe(args) => run_describe(args, &ctx, &mut out),
        Commands::Search(args) => run_search(args, &ctx, &mut out),
        Commands::Types(args) => run_types(args, &ctx, &mut out),
        Commands::Subtags(args) => run_subtags(args, &ctx, &mut out),
        Commands::Macrolanguage(args) => run_macrolanguage(args, &ctx, &mut out),
        Commands::Date => run_date(&ctx, &mut out),
    };
    let flushed = out.flush();

    match (result, flushed) {
        (Ok(code), Ok(())) => ExitCode::from(code),
        (Err(e), _) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_INVALID)
        }
        (Ok(_), Err(e)) => {
            tracing::error!("failed to write output: {e}");
            ExitCode::from(EXIT_INVALID)
        }
    }
}
