//! # Merge
//!
//! Node-level merging of two YAML documents and value-level merging of plain
//! `serde_yaml::Value` trees.
//!
//! - [`combination`]: which rule applies to a from/into kind pair
//! - [`yaml`]: the recursive document merge (full and marker-selective)
//! - [`values`]: append-style merge for value files without formatting
//!
//! Merges report structural risks as [`Warning`]s rather than errors.

pub mod combination;
pub mod values;
pub mod yaml;

use std::fmt;

use serde::Serialize;

pub use combination::Combination;
pub use values::merge_values;

/// A non-fatal anomaly found while merging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    /// Mapping keys and sequence indices leading to the anomaly.
    pub keys: Vec<String>,
    pub warning: String,
}

impl Warning {
    pub(crate) fn sequence_length(keys: &[String], from: usize, into: usize) -> Self {
        Self {
            keys: keys.to_vec(),
            warning: format!(
                "sequence length from ({}) does not match length into ({})",
                from, into
            ),
        }
    }

    /// Dotted rendering of [`Warning::keys`], `.` for the document root.
    pub fn path(&self) -> String {
        if self.keys.is_empty() {
            ".".to_string()
        } else {
            self.keys.join(".")
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path(), self.warning)
    }
}
