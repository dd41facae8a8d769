//! # Merge Command Implementation
//!
//! Merges one document into another. With a marker only content tagged
//! `!Marker` or commented `# Marker` is carried over; everything else in the
//! target is left as written.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::{read_document, read_document_or_empty, write_output, Context};

/// Merge one document into another
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Document providing new content.
    #[arg(long, value_name = "FILE")]
    pub from: PathBuf,

    /// Document receiving the content. A missing file starts out empty.
    #[arg(long, value_name = "FILE")]
    pub into: PathBuf,

    /// Only merge content carrying this marker. Overrides the settings file.
    #[arg(short, long)]
    pub marker: Option<String>,

    /// Write the result here instead of back to `--into`. Use `-` for stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Sort mapping keys of the result.
    #[arg(long)]
    pub sort: bool,
}

/// Execute the `merge` command.
pub fn execute(args: MergeArgs, ctx: &Context) -> Result<()> {
    let from = read_document(&args.from)?;
    let mut into = read_document_or_empty(&args.into)?;

    let marker = args.marker.as_deref().or(ctx.settings.marker.as_deref());
    let result = match marker {
        Some(marker) => into.merge_selective(&from, marker),
        None => into.merge(&from),
    };
    ctx.report_merge(&args.into.display().to_string(), result)?;

    let text = ctx.render(&mut into, args.sort)?;
    let target = match args.output.as_deref() {
        Some(path) if path.as_os_str() == "-" => None,
        Some(path) => Some(path),
        None => Some(args.into.as_path()),
    };
    write_output(target, &text)
}
