//! YAML text codec.
//!
//! - [`parse`]: text to a [`crate::node::Node`] tree, keeping tags, styles,
//!   anchors and trailing comments.
//! - [`emit`]: tree back to text with a configurable indent.
//! - [`node_from_value`] / [`node_to_value`]: bridge to `serde_yaml::Value`.

mod emit;
mod parse;
pub(crate) mod scalar;
mod value;

pub use emit::{emit, MAX_INDENT, MIN_INDENT};
pub use parse::parse;
pub use value::{node_from_value, node_to_value, tagged};

/// Indentation used when no explicit width is configured.
pub const DEFAULT_INDENT: usize = 2;
