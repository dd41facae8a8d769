//! # Document Tree
//!
//! The in-memory representation of a parsed YAML document. A document is a
//! recursive tree of [`Node`]s; every level of the file is one node and the
//! levels are nested through [`Node::children`].
//!
//! ## Layout rules
//!
//! - A [`Kind::Mapping`] node stores its entries as alternating key/value
//!   nodes: keys at even positions, values at odd positions.
//! - A [`Kind::Document`] node holds exactly one child (the root value) once
//!   it is non-empty.
//! - [`Kind::Alias`] nodes are kept only so they can be reported; the merge,
//!   sieve and navigation logic refuses to traverse them.
//!
//! Source positions are advisory. They are ignored by equality so that a tree
//! compares equal to its own re-parsed encoding.

use std::fmt;

use crate::error::{Error, Result};

/// The five node variants of a YAML document tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Kind {
    /// Top level wrapper around the root value.
    #[default]
    Document,
    /// Ordered list of values.
    Sequence,
    /// Ordered key/value pairs.
    Mapping,
    /// A single string payload.
    Scalar,
    /// A reference to an anchored node (`*name`).
    Alias,
}

impl Kind {
    /// Human-readable name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Document => "Document",
            Kind::Sequence => "Sequence",
            Kind::Mapping => "Mapping",
            Kind::Scalar => "Scalar",
            Kind::Alias => "Alias",
        }
    }

    /// Numeric kind identifier, stable across releases.
    pub fn id(self) -> u8 {
        match self {
            Kind::Document => 1,
            Kind::Sequence => 2,
            Kind::Mapping => 4,
            Kind::Scalar => 8,
            Kind::Alias => 16,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id(), self.name())
    }
}

/// Presentation style of a node.
///
/// Scalars use the quoting/block styles, collections use [`Style::Flow`] or
/// the default block layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Style {
    /// Plain scalar or block collection.
    #[default]
    Default,
    /// `[a, b]` / `{k: v}`
    Flow,
    SingleQuoted,
    DoubleQuoted,
    /// `|` block scalar
    Literal,
    /// `>` block scalar
    Folded,
}

/// One element of a parsed YAML document.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub kind: Kind,
    pub style: Style,
    /// Short form of the type tag, e.g. `!HumanInput` or `!!str`. Empty when
    /// the node carries no explicit tag.
    pub tag: String,
    /// Scalar payload. For aliases this is the referenced anchor name.
    pub value: String,
    /// Anchor name without the leading `&`.
    pub anchor: String,
    /// Trailing comment including the leading `#`, e.g. `# HumanInput`.
    pub line_comment: String,
    pub children: Vec<Node>,
    /// 1-based source line, 0 when the node was synthesized.
    pub line: usize,
    /// 1-based source column, 0 when the node was synthesized.
    pub column: usize,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.style == other.style
            && self.tag == other.tag
            && self.value == other.value
            && self.anchor == other.anchor
            && self.line_comment == other.line_comment
            && self.children == other.children
    }
}

impl Eq for Node {}

impl Node {
    /// Create a plain scalar node.
    pub fn scalar(value: impl Into<String>) -> Self {
        Self {
            kind: Kind::Scalar,
            value: value.into(),
            ..Default::default()
        }
    }

    /// Create a block mapping from alternating key/value nodes.
    pub fn mapping(children: Vec<Node>) -> Self {
        Self {
            kind: Kind::Mapping,
            children,
            ..Default::default()
        }
    }

    /// Create a block sequence.
    pub fn sequence(children: Vec<Node>) -> Self {
        Self {
            kind: Kind::Sequence,
            children,
            ..Default::default()
        }
    }

    /// Wrap a root value into a document node.
    pub fn document(root: Node) -> Self {
        Self {
            kind: Kind::Document,
            children: vec![root],
            ..Default::default()
        }
    }

    /// Builder-style helper setting the tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Builder-style helper setting the trailing comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.line_comment = comment.into();
        self
    }

    /// Builder-style helper setting the presentation style.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn is_scalar(&self) -> bool {
        self.kind == Kind::Scalar
    }

    /// Whether the node carries `marker` either as a `!marker` tag or as a
    /// `# marker` trailing comment. Both forms must match exactly.
    pub fn is_marked_by(&self, marker: &str) -> bool {
        if self.tag.strip_prefix('!') == Some(marker) {
            return true;
        }
        self.line_comment.strip_prefix("# ") == Some(marker)
    }

    /// Deep copy of `children[start..end]` together with this node's own
    /// attributes. Out-of-range bounds are clamped.
    pub fn partial_copy(&self, start: usize, end: usize) -> Node {
        let end = end.min(self.children.len());
        let start = start.min(end);
        Node {
            kind: self.kind,
            style: self.style,
            tag: self.tag.clone(),
            value: self.value.clone(),
            anchor: self.anchor.clone(),
            line_comment: self.line_comment.clone(),
            children: self.children[start..end].to_vec(),
            line: self.line,
            column: self.column,
        }
    }

    /// Iterate over `(key, value)` pairs of a mapping node.
    pub fn pairs(&self) -> impl Iterator<Item = (&Node, &Node)> {
        self.children.chunks_exact(2).map(|pair| (&pair[0], &pair[1]))
    }

    /// Returns the first alias node found in a depth-first walk.
    pub fn find_alias(&self) -> Option<&Node> {
        if self.kind == Kind::Alias {
            return Some(self);
        }
        self.children.iter().find_map(Node::find_alias)
    }

    /// Fails with [`Error::AliasNotSupported`] if the tree contains an alias.
    pub fn ensure_no_alias(&self) -> Result<()> {
        match self.find_alias() {
            Some(alias) => Err(Error::AliasNotSupported {
                name: alias.value.clone(),
            }),
            None => Ok(()),
        }
    }
}
