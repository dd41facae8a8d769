//! # Output
//!
//! Text rendering of merge warnings and batch status for the CLI. Colour is
//! chosen by `--color` and, in `auto` mode, by `NO_COLOR`, `CLICOLOR`,
//! `CLICOLOR_FORCE`, `TERM` and whether stderr is a terminal.

use std::env;

use console::style;

use crate::merge::Warning;

/// Whether CLI output is coloured.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    /// `color_flag` is the `--color` value; anything but `always` or `never`
    /// means auto detection.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => auto_color(|name| env::var(name).ok())
                .unwrap_or_else(|| console::Term::stderr().features().colors_supported()),
        };
        Self { use_color }
    }

    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

/// Colour decided by environment variables alone, `None` when the terminal
/// has to decide.
fn auto_color(var: impl Fn(&str) -> Option<String>) -> Option<bool> {
    if var("NO_COLOR").is_some() || var("CLICOLOR").as_deref() == Some("0") {
        return Some(false);
    }
    if var("CLICOLOR_FORCE").is_some_and(|value| !value.is_empty() && value != "0") {
        return Some(true);
    }
    if var("TERM").as_deref() == Some("dumb") {
        return Some(false);
    }
    None
}

/// One line per warning, prefixed with `source` (usually a file name).
pub fn format_warning(config: &OutputConfig, source: &str, warning: &Warning) -> String {
    let label = if config.use_color {
        style("warning:").yellow().bold().force_styling(true).to_string()
    } else {
        "warning:".to_string()
    };
    let path = if config.use_color {
        style(warning.path()).cyan().force_styling(true).to_string()
    } else {
        warning.path()
    };
    format!("{} {} [{}] {}", label, source, path, warning.warning)
}

/// Short status marker, coloured when enabled.
pub fn status(config: &OutputConfig, ok: bool) -> String {
    match (ok, config.use_color) {
        (true, true) => style("ok").green().force_styling(true).to_string(),
        (true, false) => "ok".to_string(),
        (false, true) => style("FAILED").red().bold().force_styling(true).to_string(),
        (false, false) => "FAILED".to_string(),
    }
}
