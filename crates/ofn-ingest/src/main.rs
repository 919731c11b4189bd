//! OFN Ingest - offline payload replay tool

use anyhow::{Context, Result};
use clap::Parser;
use ofn_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use ofn_ingest::replay::{ReplaySummary, Replayer};
use ofn_ingest::{DedupeStore, Normalizer};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "ofn-ingest")]
#[command(author, version, about = "Replay provider offer payloads through the normalizer")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Parser, Debug)]
enum Command {
    /// Normalize and deduplicate payload files ("-" reads stdin)
    Normalize {
        /// Payload files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Treat every line of a file as a separate payload
        #[arg(short, long)]
        lines: bool,
    },

    /// List provider schemas in dispatch order
    Schemas,
}

/// Default logging for the CLI, before `LOG_*` overrides.
///
/// stdout carries results, diagnostics go to stderr.
fn log_config(verbose: bool) -> LogConfig {
    let level = if verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    LogConfig::builder()
        .level(level)
        .output(LogOutput::Stderr)
        .log_file_prefix("ofn-ingest")
        .include_targets(false)
        .build()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = log_config(cli.verbose).merge_env()?;
    let _guard = init_logging(&log_config)?;

    let normalizer = Normalizer::default();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Normalize { files, lines } => {
            let store = DedupeStore::default();
            let replayer = Replayer::new(&normalizer, &store);
            let mut summary = ReplaySummary::default();

            for path in &files {
                let outcomes = replayer
                    .replay_path(path, lines)
                    .with_context(|| format!("Failed to read payloads from {}", path.display()))?;
                for outcome in outcomes {
                    summary.record(&outcome);
                    serde_json::to_writer(&mut out, &outcome)
                        .context("Failed to write replay outcome")?;
                    writeln!(out)?;
                }
            }

            info!(
                files = files.len(),
                accepted = summary.accepted,
                duplicate = summary.duplicate,
                rejected = summary.rejected,
                "Replay complete"
            );
        },
        Command::Schemas => {
            for id in normalizer.schema_ids() {
                writeln!(out, "{}", id)?;
            }
        },
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_level_is_enabled_by_default() {
        let cli = Cli::try_parse_from(["ofn-ingest", "normalize", "a.json"]).unwrap();
        let config = log_config(cli.verbose);
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.output, LogOutput::Stderr);
    }

    #[test]
    fn test_verbose_flag_enables_debug() {
        let cli = Cli::try_parse_from(["ofn-ingest", "schemas", "-v"]).unwrap();
        assert!(matches!(cli.command, Command::Schemas));
        assert_eq!(log_config(cli.verbose).level, LogLevel::Debug);
    }

    #[test]
    fn test_normalize_requires_a_file() {
        assert!(Cli::try_parse_from(["ofn-ingest", "normalize"]).is_err());
    }
}
