//! # yamlgraft
//!
//! Merges YAML documents node by node while keeping what people wrote by
//! hand: inline comments, type tags and any content marked for
//! preservation survive regeneration of machine-authored files.
//!
//! ## Quick Example
//!
//! ```
//! use yamlgraft::Yaml;
//!
//! // Previously generated file, `replicas` edited by hand
//! let mut into = Yaml::parse("replicas: 5\nimage: app:1.0\n").unwrap();
//! // Fresh output of the generator, marking what it owns
//! let from = Yaml::parse("replicas: 1\nimage: app:2.0 # Generated\n").unwrap();
//!
//! let warnings = into.merge_selective(&from, "Generated").unwrap();
//! assert!(warnings.is_empty());
//! assert_eq!(into.to_string(), "replicas: 5\nimage: app:2.0 # Generated\n");
//! ```
//!
//! ## Core Concepts
//!
//! - **Document tree (`node`, `document`)**: a parsed document is a tree of
//!   [`node::Node`]s owned by a [`Yaml`] value.
//! - **Codec (`codec`)**: parses text into the tree and writes it back with
//!   tags, anchors, styles and trailing comments intact.
//! - **Merge (`merge`)**: full and marker-selective merges of one document
//!   into another, reporting [`merge::Warning`]s for risky sequence merges.
//! - **Filtering and ordering (`sieve`, `sort`, `subnode`)**: reduce a
//!   document to marked content or a key path, sort keys, read and insert
//!   values by key path.
//! - **Batch (`batch`)**: regenerate a directory of documents in parallel.
//!
//! ## Markers
//!
//! A node is marked by `Marker` when its tag is exactly `!Marker` or its
//! trailing comment is exactly `# Marker`. Selective merges carry over only
//! marked content and everything below it.

pub mod batch;
pub mod codec;
pub mod config;
pub mod document;
pub mod error;
pub mod merge;
pub mod node;
pub mod output;
pub mod path;
mod sieve;
mod sort;
mod subnode;

pub use document::Yaml;
pub use error::{Error, Result};
pub use merge::Warning;

#[cfg(test)]
mod yaml_proptest;
