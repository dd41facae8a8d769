//! # Batch Command Implementation
//!
//! Regenerates every matching document under a directory in parallel. Each
//! file is reported on its own; the command fails if any file failed.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use yamlgraft::batch::{self, BatchOptions};
use yamlgraft::output::status;

use super::{Context, Format};

/// Regenerate a directory of documents in parallel
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Directory of freshly generated documents.
    #[arg(long, value_name = "DIR")]
    pub from_dir: PathBuf,

    /// Directory of documents to update.
    #[arg(long, value_name = "DIR")]
    pub into_dir: PathBuf,

    /// Only merge content carrying this marker. Overrides the settings file.
    #[arg(short, long)]
    pub marker: Option<String>,

    /// Glob selecting files relative to `--from-dir`. Overrides the settings file.
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Sort mapping keys of every result.
    #[arg(long)]
    pub sort: bool,

    /// Merge and report without writing any file.
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute the `batch` command.
pub fn execute(args: BatchArgs, ctx: &Context) -> Result<()> {
    let pattern = args.pattern.as_deref().unwrap_or(&ctx.settings.pattern);
    let jobs = batch::discover(&args.from_dir, &args.into_dir, pattern)?;
    log::info!("regenerating {} document(s)", jobs.len());

    let options = BatchOptions {
        marker: args.marker.or_else(|| ctx.settings.marker.clone()),
        indent: ctx.settings.indent,
        sort: args.sort || ctx.settings.sort,
        dry_run: args.dry_run,
    };
    let reports = batch::run(&jobs, &options);

    match ctx.format {
        Format::Text => {
            for report in &reports {
                println!(
                    "{} {}",
                    status(&ctx.output, report.is_ok()),
                    report.path.display()
                );
            }
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
    }

    batch::summarize(&reports)?;
    Ok(())
}
