//! # Settings
//!
//! Optional `.yamlgraft.yaml` file holding defaults for the CLI. Every field
//! is optional; command-line flags override whatever the file sets.
//!
//! ```yaml
//! marker: HumanInput
//! indent: 2
//! sort: false
//! pattern: "**/*.yaml"
//! ```

use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::codec::{DEFAULT_INDENT, MAX_INDENT, MIN_INDENT};
use crate::error::{Error, Result};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = ".yamlgraft.yaml";

/// Default glob for batch discovery.
pub const DEFAULT_PATTERN: &str = "**/*.yaml";

/// Tool settings read from the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Marker used for selective merges and filtering.
    pub marker: Option<String>,
    /// Indentation width of written documents.
    pub indent: usize,
    /// Sort mapping keys before writing.
    pub sort: bool,
    /// Glob selecting documents for batch runs, relative to the source dir.
    pub pattern: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            marker: None,
            indent: DEFAULT_INDENT,
            sort: false,
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }
}

impl Settings {
    /// Check values that serde cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        validate_indent(self.indent)?;
        glob::Pattern::new(&self.pattern).map_err(|err| Error::ConfigParse {
            message: format!("invalid pattern '{}': {}", self.pattern, err),
            hint: Some("use a glob such as \"**/*.yaml\"".to_string()),
        })?;
        if self.marker.as_deref() == Some("") {
            return Err(Error::ConfigParse {
                message: "marker must not be empty".to_string(),
                hint: Some("remove the key to merge everything".to_string()),
            });
        }
        Ok(())
    }
}

/// Reject indentation widths the emitter cannot produce.
pub fn validate_indent(indent: usize) -> Result<()> {
    if (MIN_INDENT..=MAX_INDENT).contains(&indent) {
        Ok(())
    } else {
        Err(Error::ConfigParse {
            message: format!("indent {} out of range", indent),
            hint: Some(format!(
                "use a value between {} and {}",
                MIN_INDENT, MAX_INDENT
            )),
        })
    }
}

/// Parse settings from YAML text. Empty text yields the defaults.
pub fn parse(yaml_content: &str) -> Result<Settings> {
    if yaml_content.trim().is_empty() {
        return Ok(Settings::default());
    }
    let settings: Settings =
        serde_yaml::from_str(yaml_content).map_err(|err| Error::ConfigParse {
            message: err.to_string(),
            hint: Some("known keys are: marker, indent, sort, pattern".to_string()),
        })?;
    settings.validate()?;
    Ok(settings)
}

/// Read and parse a settings file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

/// Load settings from `explicit` if given, else from [`CONFIG_FILE`] in `dir`
/// when present, else the defaults.
pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Settings> {
    let path: PathBuf = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = dir.join(CONFIG_FILE);
            if !candidate.is_file() {
                debug!("no {} found, using defaults", CONFIG_FILE);
                return Ok(Settings::default());
            }
            candidate
        }
    };
    debug!("loading settings from {}", path.display());
    from_file(&path)
}
