//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::debug;

use crate::commands::{self, Context, Format};
use yamlgraft::config;
use yamlgraft::output::OutputConfig;

/// yamlgraft - Merge YAML documents without losing hand-written content
#[derive(Parser, Debug)]
#[command(name = "yamlgraft")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,

    /// Settings file (defaults to .yamlgraft.yaml in the working directory)
    #[arg(long, global = true, value_name = "PATH", env = "YAMLGRAFT_CONFIG")]
    config: Option<PathBuf>,

    /// Indentation width of written documents, 2 to 9
    #[arg(long, global = true, value_name = "N")]
    indent: Option<usize>,

    /// Format of warnings and reports
    #[arg(long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge one document into another
    Merge(commands::merge::MergeArgs),

    /// Keep only marked content or a key path of a document
    Filter(commands::filter::FilterArgs),

    /// Sort all mapping keys of a document
    Sort(commands::sort::SortArgs),

    /// Print the value found at a key path
    Get(commands::get::GetArgs),

    /// Set the value at a key path, creating missing keys
    Insert(commands::insert::InsertArgs),

    /// Merge several value files in order
    Combine(commands::combine::CombineArgs),

    /// Regenerate a directory of documents in parallel
    Batch(commands::batch::BatchArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        let cwd = std::env::current_dir()?;
        let mut settings = config::load(self.config.as_deref(), &cwd)?;
        if let Some(indent) = self.indent {
            config::validate_indent(indent)?;
            settings.indent = indent;
        }
        debug!("settings: {:?}", settings);

        let ctx = Context {
            settings,
            output: OutputConfig::from_env_and_flag(&self.color),
            format: self.format,
        };

        match self.command {
            Commands::Merge(args) => commands::merge::execute(args, &ctx),
            Commands::Filter(args) => commands::filter::execute(args, &ctx),
            Commands::Sort(args) => commands::sort::execute(args, &ctx),
            Commands::Get(args) => commands::get::execute(args, &ctx),
            Commands::Insert(args) => commands::insert::execute(args, &ctx),
            Commands::Combine(args) => commands::combine::execute(args, &ctx),
            Commands::Batch(args) => commands::batch::execute(args, &ctx),
        }
    }
}

/// `RUST_LOG` takes precedence over `--log-level`.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
