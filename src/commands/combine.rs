//! # Combine Command Implementation
//!
//! Layers several documents, later files winning. By default documents are
//! merged node by node, which keeps tags and comments. `--append-sequences`
//! merges the plain data instead: sequences are appended rather than merged
//! by index, and formatting is not preserved.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use log::debug;
use serde_yaml::Value;

use yamlgraft::merge::merge_values;
use yamlgraft::Yaml;

use super::{read_document, write_output, Context};

/// Merge several documents in order
#[derive(Args, Debug)]
pub struct CombineArgs {
    /// Documents to combine, lowest precedence first.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Merge plain values, appending sequences instead of merging them by index.
    #[arg(long)]
    pub append_sequences: bool,

    /// Write the result here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Sort mapping keys of the result.
    #[arg(long)]
    pub sort: bool,
}

/// Execute the `combine` command.
pub fn execute(args: CombineArgs, ctx: &Context) -> Result<()> {
    let mut combined = if args.append_sequences {
        combine_values(&args.files)?
    } else {
        combine_documents(&args.files, ctx)?
    };
    let text = ctx.render(&mut combined, args.sort)?;
    write_output(args.output.as_deref(), &text)
}

fn combine_documents(files: &[PathBuf], ctx: &Context) -> Result<Yaml> {
    let mut combined = Yaml::empty();
    for file in files {
        debug!("combining {}", file.display());
        let doc = read_document(file)?;
        ctx.report_merge(&file.display().to_string(), combined.merge(&doc))?;
    }
    Ok(combined)
}

fn combine_values(files: &[PathBuf]) -> Result<Yaml> {
    let mut combined = Value::Null;
    for file in files {
        debug!("combining values of {}", file.display());
        let value = read_document(file)?.to_value()?;
        merge_values(&mut combined, &value)?;
    }
    Ok(Yaml::from_value(&combined)?)
}
