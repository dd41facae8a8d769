//! # Get Command Implementation
//!
//! Prints the value at a key path as its own document, keeping tags and
//! comments of the selected subtree.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use yamlgraft::path::parse_key_path;

use super::{read_document, Context};

/// Print the value found at a key path
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Document to read.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Dotted key path, e.g. `spec.containers.0.image`. Empty selects the root.
    #[arg(short, long, default_value = "")]
    pub keys: String,
}

/// Execute the `get` command.
pub fn execute(args: GetArgs, ctx: &Context) -> Result<()> {
    let doc = read_document(&args.file)?;
    let mut selected = doc.select_sub_element(&parse_key_path(&args.keys))?;
    print!("{}", ctx.render(&mut selected, false)?);
    Ok(())
}
