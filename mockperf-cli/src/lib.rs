#![warn(missing_docs)]
//! mockperf CLI Library
//!
//! Inspection tool for mockperf runners. It builds a `Runner` from a
//! `mockperf.toml` and shows what a benchmark script would see: the resolved
//! settings, the runner metadata, and the timing value passed to timed calls.
//!
//! # Example
//!
//! ```ignore
//! fn main() -> anyhow::Result<()> {
//!     mockperf_cli::run()
//! }
//! ```

mod config;
mod format;

pub use config::*;
pub use format::{OutputFormat, format_metadata, format_settings};

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::io::Write;
use std::path::PathBuf;

/// mockperf CLI arguments
#[derive(Parser, Debug)]
#[command(name = "mockperf")]
#[command(author, version, about = "mockperf - stand-in benchmarking harness")]
pub struct Cli {
    /// Optional subcommand; defaults to Settings
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file (discovered from the current directory if not specified)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format: human, json
    #[arg(long, default_value = "human")]
    pub format: String,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the resolved settings (default)
    Settings,
    /// Print the runner metadata
    Metadata,
    /// Run a timed no-op and print the timing value it received
    Probe {
        /// Benchmark name to log
        #[arg(default_value = "probe")]
        name: String,
    },
    /// Print a default mockperf.toml
    Init,
}

/// Run the mockperf CLI with the process arguments.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the mockperf CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => MockperfConfig::load(path)?,
        None => MockperfConfig::discover()?.unwrap_or_default(),
    };

    let filter = if cli.verbose {
        "mockperf=debug".to_string()
    } else {
        config.logging.filter.clone()
    };
    // A second initialization (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let format: OutputFormat = cli
        .format
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let output = render(cli.command.as_ref(), &config, format)?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .context("Failed to write output")?;
    Ok(())
}

/// Produce the output for one command without touching the terminal
pub fn render(
    command: Option<&Commands>,
    config: &MockperfConfig,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let output = match command {
        None | Some(Commands::Settings) => {
            let runner = config.build_runner();
            format_settings(runner.parse_args(), format)?
        }
        Some(Commands::Metadata) => {
            let runner = config.build_runner();
            format_metadata(runner.metadata(), format)?
        }
        Some(Commands::Probe { name }) => {
            let runner = config.build_runner();
            let mut received = None;
            runner.run_timed(
                name,
                |(time,)| {
                    received = Some(time);
                    Ok::<_, Infallible>(())
                },
                (),
            )?;
            tracing::info!(benchmark = %name, ?received, "probe finished");
            match format {
                OutputFormat::Json => {
                    let value = serde_json::json!({ "benchmark": name, "time": received });
                    format!("{}\n", serde_json::to_string_pretty(&value)?)
                }
                OutputFormat::Human => match received {
                    Some(time) => format!("{}: received time {}\n", name, time),
                    None => format!("{}: benchmark was not called\n", name),
                },
            }
        }
        Some(Commands::Init) => MockperfConfig::default_toml(),
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["mockperf", "--format", "json", "probe", "bm"]).unwrap();
        assert_eq!(cli.format, "json");
        assert!(matches!(cli.command, Some(Commands::Probe { ref name }) if name == "bm"));

        let cli = Cli::try_parse_from(["mockperf"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_render_default_is_settings() {
        let config: MockperfConfig = toml::from_str(&MockperfConfig::default_toml()).unwrap();
        let out = render(None, &config, OutputFormat::Human).unwrap();
        assert_eq!(out, "num_points = 100\n");
    }

    #[test]
    fn test_render_probe() {
        let mut config = MockperfConfig::default();
        let out = render(
            Some(&Commands::Probe {
                name: "bm".to_string(),
            }),
            &config,
            OutputFormat::Human,
        )
        .unwrap();
        assert_eq!(out, "bm: received time 42\n");

        config.runner.sentinel = 5;
        let out = render(
            Some(&Commands::Probe {
                name: "bm".to_string(),
            }),
            &config,
            OutputFormat::Json,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["time"], 5);
        assert_eq!(value["benchmark"], "bm");
    }

    #[test]
    fn test_render_metadata_and_init() {
        let mut config = MockperfConfig::default();
        config
            .metadata
            .insert("description".to_string(), "inheritance".to_string());
        let out = render(Some(&Commands::Metadata), &config, OutputFormat::Human).unwrap();
        assert_eq!(out, "description: inheritance\n");

        let out = render(Some(&Commands::Init), &config, OutputFormat::Human).unwrap();
        assert_eq!(out, MockperfConfig::default_toml());
    }
}
