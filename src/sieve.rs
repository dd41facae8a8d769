//! # Selective Filter
//!
//! Reduces a tree to the content that is selected by a marker, or that lies
//! on a given key path. A node survives when it carries the marker, when one
//! of its ancestors does, or when it sits below the end of the key path.
//! Collections that end up without children are removed from their parent.

use std::mem;

use crate::document::Yaml;
use crate::error::{Error, Result};
use crate::node::{Kind, Node};

/// Recursive filter. `marker` of `None` selects nothing by marker.
pub(crate) struct Sieve<'a> {
    marker: Option<&'a str>,
}

impl<'a> Sieve<'a> {
    pub(crate) fn new(marker: Option<&'a str>) -> Self {
        Self { marker }
    }

    fn selected(&self, node: &Node) -> bool {
        self.marker.is_some_and(|marker| node.is_marked_by(marker))
    }

    /// Filters `node` in place and reports whether it became removable.
    pub(crate) fn node(
        &self,
        node: &mut Node,
        parent_selected: bool,
        restrict: &[String],
    ) -> Result<bool> {
        match node.kind {
            Kind::Scalar => Ok(!(parent_selected || self.selected(node))),
            Kind::Mapping => self.mapping(node, parent_selected, restrict),
            Kind::Sequence => self.sequence(node, parent_selected, restrict),
            Kind::Document => self.document(node, parent_selected, restrict),
            Kind::Alias => Err(Error::AliasNotSupported {
                name: node.value.clone(),
            }),
        }
    }

    fn mapping(&self, node: &mut Node, parent_selected: bool, restrict: &[String]) -> Result<bool> {
        if parent_selected {
            return Ok(false);
        }
        if node.children.len() % 2 != 0 {
            return Err(Error::OddMappingLength {
                length: node.children.len(),
            });
        }
        let (restrict_key, child_restrict) = match restrict.split_first() {
            Some((key, rest)) => (Some(key), rest),
            None => (None, restrict),
        };
        // Reaching the last path segment selects everything beneath it.
        let parent_selected = self.selected(node) || restrict.len() == 1;

        let children = mem::take(&mut node.children);
        let mut kept = Vec::with_capacity(children.len());
        let mut entries = children.into_iter();
        while let (Some(key), Some(mut value)) = (entries.next(), entries.next()) {
            let on_path = restrict_key.is_none_or(|wanted| key.value == *wanted);
            let remove = !on_path || self.node(&mut value, parent_selected, child_restrict)?;
            if !remove {
                kept.push(key);
                kept.push(value);
            }
        }
        node.children = kept;
        Ok(node.children.is_empty())
    }

    fn sequence(&self, node: &mut Node, parent_selected: bool, restrict: &[String]) -> Result<bool> {
        if parent_selected {
            return Ok(false);
        }
        let parent_selected = self.selected(node);

        if !restrict.is_empty() {
            // Key paths never descend into sequences.
            node.children.clear();
            return Ok(true);
        }
        self.retain_children(node, parent_selected, restrict)
    }

    fn document(&self, node: &mut Node, parent_selected: bool, restrict: &[String]) -> Result<bool> {
        if parent_selected {
            return Ok(false);
        }
        let parent_selected = self.selected(node);
        self.retain_children(node, parent_selected, restrict)
    }

    fn retain_children(
        &self,
        node: &mut Node,
        parent_selected: bool,
        restrict: &[String],
    ) -> Result<bool> {
        let children = mem::take(&mut node.children);
        let mut kept = Vec::with_capacity(children.len());
        for mut child in children {
            if !self.node(&mut child, parent_selected, restrict)? {
                kept.push(child);
            }
        }
        node.children = kept;
        Ok(node.children.is_empty())
    }
}

impl Yaml {
    /// Keep only the content selected by `marker` (as `!marker` tag or
    /// `# marker` comment, on the node or an ancestor).
    ///
    /// An empty marker selects everything and leaves the document unchanged.
    /// On error the document is left untouched.
    pub fn filter_by(&mut self, marker: &str) -> Result<()> {
        if marker.is_empty() {
            return self.node.ensure_no_alias();
        }
        self.sift(Some(marker), &[])
    }

    /// Keep only the subtree reachable through `keys`. An empty path keeps
    /// the whole document.
    pub fn filter_by_keys(&mut self, keys: &[String]) -> Result<()> {
        if keys.is_empty() {
            return self.node.ensure_no_alias();
        }
        self.sift(None, keys)
    }

    fn sift(&mut self, marker: Option<&str>, keys: &[String]) -> Result<()> {
        let mut node = self.node.clone();
        let removed = Sieve::new(marker).node(&mut node, false, keys)?;
        self.node = if removed { Node::default() } else { node };
        Ok(())
    }
}
