//! # YAML Documents
//!
//! [`Yaml`] owns one parsed document tree and is the type every engine
//! operation works on. Cloning a `Yaml` is a full deep copy; no node is ever
//! shared between two documents.

use std::fmt;
use std::io::Write;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_yaml::Value;

use crate::codec::{self, DEFAULT_INDENT};
use crate::error::{Error, Result};
use crate::node::{Kind, Node};

/// A parsed YAML document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Yaml {
    /// Root node, normally of kind [`Kind::Document`].
    pub node: Node,
}

impl Yaml {
    /// Parse a document from raw bytes.
    pub fn new(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes).map_err(|err| Error::Parse {
            message: format!("input is not valid UTF-8: {}", err),
        })?;
        Self::parse(text)
    }

    /// Parse a document from text. Only the first document of a stream is read.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(Self {
            node: codec::parse(text)?,
        })
    }

    /// A document with no content.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap an existing node tree. Non-document roots get a document wrapper.
    pub fn from_node(node: Node) -> Self {
        match node.kind {
            Kind::Document => Self { node },
            _ => Self {
                node: Node::document(node),
            },
        }
    }

    /// Whether the document (or its root collection) holds nothing.
    pub fn is_empty(&self) -> bool {
        is_empty_node(&self.node)
    }

    /// Build a document from any serializable value.
    pub fn from_value<T: Serialize>(value: &T) -> Result<Self> {
        let value = serde_yaml::to_value(value)?;
        Ok(Self::from_node(codec::node_from_value(&value)))
    }

    /// The document as a generic value, without formatting metadata.
    pub fn to_value(&self) -> Result<Value> {
        codec::node_to_value(&self.node)
    }

    /// Deserialize the document into `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_yaml::from_value(self.to_value()?)?)
    }

    /// Copy of the document keeping only `children[start..end]` of the root.
    pub fn partial_copy(&self, start: usize, end: usize) -> Self {
        Self {
            node: self.node.partial_copy(start, end),
        }
    }

    /// The root value beneath the document wrapper, if any.
    pub fn root(&self) -> Option<&Node> {
        match self.node.kind {
            Kind::Document => self.node.children.first(),
            _ => Some(&self.node),
        }
    }

    /// Write the document as YAML text.
    pub fn encode<W: Write>(&self, writer: &mut W, indent: usize) -> Result<()> {
        let text = codec::emit(&self.node, indent)?;
        writer.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Render the document as YAML text with the given indent.
    pub fn to_string_indent(&self, indent: usize) -> Result<String> {
        codec::emit(&self.node, indent)
    }
}

impl fmt::Display for Yaml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = codec::emit(&self.node, DEFAULT_INDENT).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl std::str::FromStr for Yaml {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Collections without children count as empty. A document wrapping an empty
/// collection is not empty: it still pins the root kind.
pub(crate) fn is_empty_node(node: &Node) -> bool {
    matches!(node.kind, Kind::Document | Kind::Mapping | Kind::Sequence)
        && node.children.is_empty()
}
