//! # Batch Regeneration
//!
//! Regenerates a whole tree of documents: every file under a source directory
//! that matches a glob is merged into the file at the same relative path under
//! a target directory.
//!
//! Jobs run in parallel on the `rayon` pool. Each job parses its own pair of
//! documents, so no tree is shared between threads. A failing job is reported
//! and never stops the others.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};
use rayon::prelude::*;
use serde::Serialize;
use walkdir::WalkDir;

use crate::codec::DEFAULT_INDENT;
use crate::document::Yaml;
use crate::error::{Error, Result};
use crate::merge::Warning;
use crate::path::glob_match;

/// One document to regenerate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchJob {
    /// Path relative to both directories, used for reporting.
    pub relative: PathBuf,
    pub from: PathBuf,
    pub into: PathBuf,
}

/// How a batch run merges and writes documents.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Selective merge marker; `None` merges everything.
    pub marker: Option<String>,
    pub indent: usize,
    pub sort: bool,
    /// Merge and report without writing any file.
    pub dry_run: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            marker: None,
            indent: DEFAULT_INDENT,
            sort: false,
            dry_run: false,
        }
    }
}

/// Outcome of a single job.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub path: PathBuf,
    pub warnings: Vec<Warning>,
    /// Error message when the job failed.
    pub error: Option<String>,
    /// Whether the merged document was written to disk.
    pub written: bool,
}

impl BatchReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Pair every file under `from_dir` matching `pattern` with the file at the
/// same relative path under `into_dir`. Jobs are sorted by path.
pub fn discover(from_dir: &Path, into_dir: &Path, pattern: &str) -> Result<Vec<BatchJob>> {
    let mut jobs = Vec::new();
    for entry in WalkDir::new(from_dir).sort_by_file_name() {
        let entry = entry.map_err(|err| Error::Io(err.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(from_dir) else {
            continue;
        };
        let normalized = relative.to_string_lossy().replace('\\', "/");
        if !glob_match(pattern, &normalized)? {
            debug!("skipping {}", normalized);
            continue;
        }
        jobs.push(BatchJob {
            relative: relative.to_path_buf(),
            from: entry.path().to_path_buf(),
            into: into_dir.join(relative),
        });
    }
    Ok(jobs)
}

/// Merge one document pair and write the result unless running dry.
///
/// A missing `into` file is treated as an empty document.
pub fn regenerate(job: &BatchJob, options: &BatchOptions) -> Result<(Vec<Warning>, bool)> {
    let from = Yaml::new(&fs::read(&job.from)?)?;
    let mut into = match fs::read(&job.into) {
        Ok(bytes) => Yaml::new(&bytes)?,
        Err(err) if err.kind() == ErrorKind::NotFound => Yaml::empty(),
        Err(err) => return Err(err.into()),
    };

    let warnings = match options.marker.as_deref() {
        Some(marker) => into.merge_selective(&from, marker)?,
        None => into.merge(&from)?,
    };
    if options.sort {
        into.sort();
    }
    let text = into.to_string_indent(options.indent)?;

    if options.dry_run {
        return Ok((warnings, false));
    }
    if let Some(parent) = job.into.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&job.into, text)?;
    info!("wrote {}", job.into.display());
    Ok((warnings, true))
}

/// Run all jobs in parallel. Reports come back in job order and warnings and
/// errors are logged once all jobs have finished.
pub fn run(jobs: &[BatchJob], options: &BatchOptions) -> Vec<BatchReport> {
    let reports: Vec<BatchReport> = jobs
        .par_iter()
        .map(|job| match regenerate(job, options) {
            Ok((warnings, written)) => BatchReport {
                path: job.relative.clone(),
                warnings,
                error: None,
                written,
            },
            Err(err) => BatchReport {
                path: job.relative.clone(),
                warnings: err.warnings().to_vec(),
                error: Some(err.to_string()),
                written: false,
            },
        })
        .collect();

    for report in &reports {
        for warning in &report.warnings {
            warn!("{}: {}", report.path.display(), warning);
        }
        if let Some(message) = &report.error {
            error!("{}: {}", report.path.display(), message);
        }
    }
    reports
}

/// Fails with [`Error::Batch`] when any report carries an error.
pub fn summarize(reports: &[BatchReport]) -> Result<()> {
    let failed = reports.iter().filter(|report| !report.is_ok()).count();
    if failed > 0 {
        return Err(Error::Batch {
            failed,
            total: reports.len(),
        });
    }
    Ok(())
}
