//! # Error Handling
//!
//! This module defines the centralized error type for `yamlgraft`. It uses the
//! `thiserror` library to build one `Error` enum that covers every failure mode
//! of the document engine and its surrounding tooling.
//!
//! ## Taxonomy
//!
//! - **Unsupported shape**: a from/into node kind pair that the merge
//!   classifier does not accept ([`Error::UnsupportedCombination`]).
//! - **Malformed input**: odd-length mapping content, non-scalar mapping keys
//!   and documents with more than one root ([`Error::OddMappingLength`],
//!   [`Error::NonScalarMapKey`], [`Error::DocumentWrongLength`]).
//! - **Unimplemented construct**: anchors and aliases
//!   ([`Error::AliasNotSupported`]).
//! - **Navigation**: key paths that do not resolve ([`Error::KeyNotPresent`],
//!   [`Error::UnknownNodeKind`]).
//!
//! Structural risks such as sequence length mismatches are not errors. They
//! are reported as [`crate::merge::Warning`]s next to a successful result.
//! A merge that fails after collecting warnings returns them inside
//! [`Error::MergeAborted`].
//!
//! The `Result` type alias is used to return `Result<T, Error>` from all
//! library functions.

use thiserror::Error;

use crate::merge::Warning;
use crate::node::Kind;

/// Main error type for yamlgraft operations
#[derive(Error, Debug)]
pub enum Error {
    /// The input could not be parsed as YAML.
    #[error("YAML parsing error: {message}")]
    Parse { message: String },

    /// A document tree could not be written back to text.
    #[error("YAML encoding error: {message}")]
    Encode { message: String },

    /// The merge classifier has no rule for this pair of node kinds.
    #[error("merge combination from {from} into {into} not supported")]
    UnsupportedCombination { from: Kind, into: Kind },

    /// Mapping content must consist of key/value pairs.
    #[error("illegal content length {length} found: content slice must be even for maps")]
    OddMappingLength { length: usize },

    /// A mapping key that is itself a mapping, sequence or alias.
    #[error("merge for non-scalar map keys is not implemented")]
    NonScalarMapKey,

    /// Anchors and aliases are not supported by merge, sieve or navigation.
    #[error("alias nodes are not supported: *{name}")]
    AliasNotSupported { name: String },

    /// Navigation reached a node that cannot be indexed by key.
    #[error("unknown node kind {kind}")]
    UnknownNodeKind { kind: Kind },

    /// Navigation did not find the requested key.
    #[error("key not present in node: {key:?}")]
    KeyNotPresent { key: String },

    /// A document node must wrap exactly one root value.
    #[error("document content must have length 1: found length {length}")]
    DocumentWrongLength { length: usize },

    /// A merge failed after collecting warnings. The target was not modified.
    #[error("{error}")]
    MergeAborted {
        warnings: Vec<Warning>,
        error: Box<Error>,
    },

    /// A value-level merge failed.
    #[error("Merge operation error: {operation} - {message}")]
    Merge { operation: String, message: String },

    /// An error occurred while parsing the configuration file.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A batch regeneration finished with failed documents.
    #[error("Batch error: {failed} of {total} documents failed")]
    Batch { failed: usize, total: usize },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A serde bridge error, wrapped from `serde_yaml::Error`.
    #[error("YAML value error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),
}

impl Error {
    /// Attach the warnings collected before `error`. Without warnings the
    /// error is returned as is.
    pub fn aborted(warnings: Vec<Warning>, error: Error) -> Self {
        if warnings.is_empty() {
            return error;
        }
        Error::MergeAborted {
            warnings,
            error: Box::new(error),
        }
    }

    /// Warnings collected before the failure, empty for other errors.
    pub fn warnings(&self) -> &[Warning] {
        match self {
            Error::MergeAborted { warnings, .. } => warnings,
            _ => &[],
        }
    }

    /// The error that stopped the operation.
    pub fn cause(&self) -> &Error {
        match self {
            Error::MergeAborted { error, .. } => error.cause(),
            _ => self,
        }
    }

    /// Errors raised while walking a key path that did not resolve. `insert`
    /// treats these as "path missing" and synthesizes the path instead.
    pub fn is_missing_path(&self) -> bool {
        matches!(
            self.cause(),
            Error::KeyNotPresent { .. } | Error::UnknownNodeKind { .. }
        )
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
