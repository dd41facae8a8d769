//! # CLI Command Implementations
//!
//! Each subcommand of the `yamlgraft` tool lives in its own file with:
//! - an `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`;
//! - an `execute` function that takes the parsed `Args` and the shared
//!   [`Context`] and calls into the `yamlgraft` library.

pub mod batch;
pub mod combine;
pub mod filter;
pub mod get;
pub mod insert;
pub mod merge;
pub mod sort;

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context as _, Result};
use clap::ValueEnum;
use serde::Serialize;

use yamlgraft::config::Settings;
use yamlgraft::output::{format_warning, OutputConfig};
use yamlgraft::{Warning, Yaml};

/// Output format of warnings and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

/// State shared by all commands.
#[derive(Debug)]
pub struct Context {
    pub settings: Settings,
    pub output: OutputConfig,
    pub format: Format,
}

#[derive(Serialize)]
struct WarningReport<'a> {
    source: &'a str,
    warnings: &'a [Warning],
}

impl Context {
    /// Text warnings go to stderr, JSON reports to stdout.
    pub fn report_warnings(&self, source: &str, warnings: &[Warning]) -> Result<()> {
        match self.format {
            Format::Text => {
                for warning in warnings {
                    eprintln!("{}", format_warning(&self.output, source, warning));
                }
            }
            Format::Json => {
                let report = WarningReport { source, warnings };
                println!("{}", serde_json::to_string(&report)?);
            }
        }
        Ok(())
    }

    /// Report the warnings of a merge, including those collected before a
    /// failure, then pass the outcome on.
    pub fn report_merge(
        &self,
        source: &str,
        result: yamlgraft::Result<Vec<Warning>>,
    ) -> Result<()> {
        match result {
            Ok(warnings) => self.report_warnings(source, &warnings),
            Err(err) => {
                self.report_warnings(source, err.warnings())?;
                Err(err.into())
            }
        }
    }

    /// Render `doc` with the configured indent. Keys are sorted first when
    /// `sort` is set or the settings file enables sorting.
    pub fn render(&self, doc: &mut Yaml, sort: bool) -> Result<String> {
        if sort || self.settings.sort {
            doc.sort();
        }
        Ok(doc.to_string_indent(self.settings.indent)?)
    }
}

/// Read and parse a document.
pub fn read_document(path: &Path) -> Result<Yaml> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Yaml::new(&bytes).with_context(|| format!("failed to parse {}", path.display()))
}

/// Like [`read_document`], but a missing file is an empty document.
pub fn read_document_or_empty(path: &Path) -> Result<Yaml> {
    match fs::metadata(path) {
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(Yaml::empty()),
        _ => read_document(path),
    }
}

/// Write text to `path`, or to stdout when no path is given.
pub fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}
