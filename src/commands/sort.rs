//! # Sort Command Implementation

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::{read_document, write_output, Context};

/// Sort all mapping keys of a document
#[derive(Args, Debug)]
pub struct SortArgs {
    /// Document to sort.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Overwrite the file instead of printing to stdout.
    #[arg(short, long)]
    pub in_place: bool,
}

/// Execute the `sort` command.
pub fn execute(args: SortArgs, ctx: &Context) -> Result<()> {
    let mut doc = read_document(&args.file)?;
    let text = ctx.render(&mut doc, true)?;
    write_output(args.in_place.then_some(args.file.as_path()), &text)
}
