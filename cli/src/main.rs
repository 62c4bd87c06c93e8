//! `rataitosk`: compare two documents across semantic axes.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt};

mod commands;
mod output;

/// Default configuration file, read when present.
const DEFAULT_CONFIG_FILE: &str = "rataitosk.toml";

#[derive(Parser)]
#[command(name = "rataitosk")]
#[command(version)]
#[command(about = "Compare two documents across semantic axes")]
struct Cli {
    /// Configuration file (defaults to ./rataitosk.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two documents
    Compare {
        /// First document (defaults to the first PDF in the input directory)
        #[arg(long)]
        doc1: Option<PathBuf>,

        /// Second document (defaults to the second PDF in the input directory)
        #[arg(long)]
        doc2: Option<PathBuf>,

        /// What to produce
        #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
        output: OutputFormat,
    },
    /// List the axes in the registry
    Axes,
    /// Load the embedding provider and encode a probe sentence
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Write the report as an HTML page
    Html,
    /// Write the report as JSON
    Json,
    /// Write the HTML page and the JSON file side by side
    Both,
    /// Only print a summary to stdout
    Summary,
}

impl OutputFormat {
    pub fn writes_html(self) -> bool {
        matches!(self, Self::Html | Self::Both)
    }

    pub fn writes_json(self) -> bool {
        matches!(self, Self::Json | Self::Both)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match commands::load_config(cli.config.as_deref(), DEFAULT_CONFIG_FILE) {
        Ok(config) => match cli.command {
            Commands::Compare { doc1, doc2, output } => {
                commands::compare(&config, doc1, doc2, output).await
            }
            Commands::Axes => commands::axes(&config),
            Commands::Check => commands::check(&config).await,
        },
        Err(err) => Err(err),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
