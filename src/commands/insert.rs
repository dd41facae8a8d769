//! # Insert Command Implementation
//!
//! Sets the value at a key path. An existing value is replaced; missing
//! mapping keys along the path are created next to their siblings.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use serde_yaml::Value;

use yamlgraft::path::parse_key_path;

use super::{read_document_or_empty, write_output, Context};

/// Set the value at a key path, creating missing keys
#[derive(Args, Debug)]
pub struct InsertArgs {
    /// Document to update. A missing file starts out empty.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Dotted key path, e.g. `metadata.labels.app`.
    #[arg(short, long)]
    pub keys: String,

    /// Value to insert, written as YAML (`3`, `"3"`, `[a, b]`, `{k: v}`).
    #[arg(short, long)]
    pub value: String,

    /// Overwrite the file instead of printing to stdout.
    #[arg(short, long)]
    pub in_place: bool,
}

/// Execute the `insert` command.
pub fn execute(args: InsertArgs, ctx: &Context) -> Result<()> {
    let value: Value = serde_yaml::from_str(&args.value)
        .with_context(|| format!("invalid value: {}", args.value))?;
    let mut doc = read_document_or_empty(&args.file)?;

    let result = doc.insert(&parse_key_path(&args.keys), &value);
    ctx.report_merge(&args.file.display().to_string(), result)?;

    let text = ctx.render(&mut doc, false)?;
    write_output(args.in_place.then_some(args.file.as_path()), &text)
}
