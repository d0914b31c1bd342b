mod logging;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ofx_consolidate::ConsolidateConfig;
use ofx_consolidate::config::{DEFAULT_INDENT, DEFAULT_OUTPUT};

/// Consolidate the transactions of a set of OFX statements into one JSON file
#[derive(Parser, Debug)]
#[command(name = "ofx-consolidate", version, about, long_about = None)]
struct Args {
    /// Statement directory, repeatable (default: the card directory only)
    #[arg(short, long = "source")]
    sources: Vec<PathBuf>,

    /// Ingest files whose name contains this text, repeatable (default: "19" and "20")
    #[arg(short, long = "pattern")]
    patterns: Vec<String>,

    /// Consolidated output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Spaces per indentation level in the output
    #[arg(long, default_value_t = DEFAULT_INDENT)]
    indent: usize,

    /// Write non-ASCII characters as-is instead of \uXXXX escapes
    #[arg(long)]
    no_ascii: bool,
}

impl From<Args> for ConsolidateConfig {
    fn from(args: Args) -> Self {
        let defaults = ConsolidateConfig::default();
        ConsolidateConfig {
            sources: if args.sources.is_empty() { defaults.sources } else { args.sources },
            patterns: if args.patterns.is_empty() { defaults.patterns } else { args.patterns },
            output: args.output,
            indent: args.indent,
            ensure_ascii: !args.no_ascii,
        }
    }
}

fn main() -> Result<()> {
    logging::setup_logging();

    let args = Args::parse();
    tracing::debug!(?args, "Parsed arguments");

    let config = ConsolidateConfig::from(args);
    let summary = ofx_consolidate::run(&config)
        .with_context(|| format!("Failed to consolidate into {}", config.output.display()))?;

    tracing::debug!(?summary, "Done");
    Ok(())
}
