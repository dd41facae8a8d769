//! # Filter Command Implementation
//!
//! Prints a document reduced either to the content carrying a marker or to
//! the subtree at a key path.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;

use yamlgraft::path::parse_key_path;

use super::{read_document, write_output, Context};

/// Keep only marked content or a key path of a document
#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Document to filter.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Keep content carrying this marker. Defaults to the settings file marker.
    #[arg(short, long, conflicts_with = "keys")]
    pub marker: Option<String>,

    /// Keep only the subtree at this dotted key path, e.g. `spec.containers.0`.
    #[arg(short, long)]
    pub keys: Option<String>,

    /// Overwrite the file instead of printing to stdout.
    #[arg(short, long)]
    pub in_place: bool,
}

/// Execute the `filter` command.
pub fn execute(args: FilterArgs, ctx: &Context) -> Result<()> {
    let mut doc = read_document(&args.file)?;

    if let Some(keys) = &args.keys {
        doc.filter_by_keys(&parse_key_path(keys))?;
    } else {
        let Some(marker) = args.marker.as_deref().or(ctx.settings.marker.as_deref()) else {
            bail!("either --marker or --keys is required");
        };
        doc.filter_by(marker)?;
    }

    let text = ctx.render(&mut doc, false)?;
    write_output(args.in_place.then_some(args.file.as_path()), &text)
}
