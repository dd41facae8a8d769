//! YAML document merge
//!
//! Merges a `from` document into an `into` document node by node while
//! keeping tags and trailing comments intact.
//!
//! ## Rules
//!
//! - Mappings are merged on matching scalar keys; new keys are appended.
//! - Sequences are merged by position. A length difference is reported as a
//!   [`Warning`] since positional pairing may no longer line up.
//! - Scalars from `from` overwrite scalars in `into`.
//! - Any other kind pair replaces `into` with `from`.
//!
//! A selective merge only carries over `from` content that carries the marker
//! (`!Marker` tag or `# Marker` comment) on itself or on an ancestor.
//! Unselected content that already exists in `into` is left alone and
//! unselected content that is new is dropped.
//!
//! ## Example
//!
//! ```
//! use yamlgraft::Yaml;
//!
//! let mut into = Yaml::parse("key1: old\nkey2: old2\n").unwrap();
//! let from = Yaml::parse("key1: !M new\nkey3: new3\n").unwrap();
//! let warnings = into.merge_selective(&from, "M").unwrap();
//! assert!(warnings.is_empty());
//! assert_eq!(into.to_string(), "key1: !M new\nkey2: old2\n");
//! ```

use log::debug;

use super::{Combination, Warning};
use crate::document::{is_empty_node, Yaml};
use crate::error::{Error, Result};
use crate::node::{Kind, Node};
use crate::sieve::Sieve;

impl Yaml {
    /// Merge `from` into this document, carrying over everything.
    ///
    /// On error the document is left untouched. Warnings collected before
    /// the failure are kept in the error, see [`Error::warnings`].
    pub fn merge(&mut self, from: &Yaml) -> Result<Vec<Warning>> {
        self.merge_with(from, None)
    }

    /// Merge only the content of `from` selected by `marker`.
    ///
    /// An empty marker selects everything, which makes this a plain
    /// [`Yaml::merge`].
    pub fn merge_selective(&mut self, from: &Yaml, marker: &str) -> Result<Vec<Warning>> {
        let marker = (!marker.is_empty()).then_some(marker);
        self.merge_with(from, marker)
    }

    /// Parse `from` and merge it into this document.
    pub fn merge_bytes(&mut self, from: &[u8]) -> Result<Vec<Warning>> {
        let from = Yaml::new(from)?;
        self.merge(&from)
    }

    /// Parse `from` and merge its content selected by `marker`.
    pub fn merge_bytes_selective(&mut self, from: &[u8], marker: &str) -> Result<Vec<Warning>> {
        let from = Yaml::new(from)?;
        self.merge_selective(&from, marker)
    }

    fn merge_with(&mut self, from: &Yaml, marker: Option<&str>) -> Result<Vec<Warning>> {
        if is_empty_node(&from.node) {
            return Ok(Vec::new());
        }
        from.node.ensure_no_alias()?;
        self.node.ensure_no_alias()?;

        let mut merger = Merger::new(marker);
        let parent_selected = marker.is_none();

        if is_empty_node(&self.node) {
            debug!("merging into empty document");
            let mut seeded = Node::default();
            if let Some(content) = merger.new_content(&from.node, parent_selected)? {
                seeded.children = match content.kind {
                    Kind::Document => content.children,
                    _ => vec![content],
                };
            }
            self.node = seeded;
            return Ok(merger.warnings);
        }

        let mut into = self.node.clone();
        if let Err(error) = merger.merge(&from.node, &mut into, parent_selected, &[]) {
            return Err(Error::aborted(merger.warnings, error));
        }
        self.node = into;
        Ok(merger.warnings)
    }
}

/// State of one merge call: the selection marker and collected warnings.
pub(crate) struct Merger<'a> {
    marker: Option<&'a str>,
    pub(crate) warnings: Vec<Warning>,
}

impl<'a> Merger<'a> {
    pub(crate) fn new(marker: Option<&'a str>) -> Self {
        Self {
            marker,
            warnings: Vec::new(),
        }
    }

    fn selected(&self, node: &Node) -> bool {
        self.marker.is_some_and(|marker| node.is_marked_by(marker))
    }

    /// The part of `from` that survives selection, `None` if nothing does.
    fn new_content(&self, from: &Node, parent_selected: bool) -> Result<Option<Node>> {
        if parent_selected || self.selected(from) {
            return Ok(Some(from.clone()));
        }
        let mut selected = from.clone();
        let removed = Sieve::new(self.marker).node(&mut selected, false, &[])?;
        Ok((!removed).then_some(selected))
    }

    fn merge(
        &mut self,
        from: &Node,
        into: &mut Node,
        parent_selected: bool,
        keys: &[String],
    ) -> Result<()> {
        let combination = Combination::classify(from.kind, into.kind)?;
        debug!("{} at {:?}", combination, keys);

        match combination {
            Combination::ScalarIntoScalar => {
                self.merge_scalar(from, into, parent_selected);
                Ok(())
            }
            Combination::MappingIntoMapping => {
                self.merge_mappings(from, into, parent_selected, keys)
            }
            Combination::SequenceIntoSequence => {
                into.line_comment = from.line_comment.clone();
                into.tag = from.tag.clone();
                self.merge_sequences(from, into, parent_selected, keys)
            }
            Combination::DocumentIntoDocument => {
                for length in [from.children.len(), into.children.len()] {
                    if length != 1 {
                        return Err(Error::DocumentWrongLength { length });
                    }
                }
                self.merge(&from.children[0], &mut into.children[0], parent_selected, &[])
            }
            _ => self.merge_default(from, into, parent_selected, keys),
        }
    }

    fn merge_scalar(&self, from: &Node, into: &mut Node, parent_selected: bool) {
        if parent_selected || self.selected(from) {
            into.value = from.value.clone();
            into.tag = from.tag.clone();
            into.line_comment = from.line_comment.clone();
            into.style = from.style;
        }
    }

    /// Shape mismatch: the selected part of `from` replaces `into`.
    fn merge_default(
        &mut self,
        from: &Node,
        into: &mut Node,
        parent_selected: bool,
        keys: &[String],
    ) -> Result<()> {
        // Also raised when `into` is not a sequence.
        if from.kind == Kind::Sequence && from.children.len() != into.children.len() {
            self.warn_length(keys, from.children.len(), into.children.len());
        }
        if let Some(replacement) = self.new_content(from, parent_selected)? {
            *into = replacement;
        }
        Ok(())
    }

    fn merge_sequences(
        &mut self,
        from: &Node,
        into: &mut Node,
        parent_selected: bool,
        keys: &[String],
    ) -> Result<()> {
        let len_from = from.children.len();
        let len_into = into.children.len();
        if len_from != len_into {
            self.warn_length(keys, len_from, len_into);
        }

        for (i, from_element) in from.children.iter().enumerate() {
            if i >= len_into {
                if let Some(content) = self.new_content(from_element, parent_selected)? {
                    into.children.push(content);
                }
                continue;
            }
            let selected = parent_selected || self.selected(from_element);
            let path = child_path(keys, i.to_string());
            self.merge(from_element, &mut into.children[i], selected, &path)?;
        }
        Ok(())
    }

    fn merge_mappings(
        &mut self,
        from: &Node,
        into: &mut Node,
        parent_selected: bool,
        keys: &[String],
    ) -> Result<()> {
        for node in [&*from, &*into] {
            if node.children.len() % 2 != 0 {
                return Err(Error::OddMappingLength {
                    length: node.children.len(),
                });
            }
        }

        for i in (0..from.children.len()).step_by(2) {
            let from_key = read_key(&from.children[i])?;
            let from_value = &from.children[i + 1];

            let mut matched = None;
            for j in (0..into.children.len()).step_by(2) {
                if read_key(&into.children[j])? == from_key {
                    matched = Some(j);
                    break;
                }
            }

            match matched {
                Some(j) => {
                    into.line_comment = from.line_comment.clone();
                    into.tag = from.tag.clone();
                    let selected = parent_selected || self.selected(from_value);
                    let path = child_path(keys, from_key.to_string());
                    self.merge(from_value, &mut into.children[j + 1], selected, &path)?;
                }
                None if parent_selected || self.selected(from_value) => {
                    into.children.extend_from_slice(&from.children[i..i + 2]);
                }
                None => {
                    let mut pair = from.partial_copy(i, i + 2);
                    let removed = Sieve::new(self.marker).node(&mut pair, false, &[])?;
                    if !removed {
                        into.children.append(&mut pair.children);
                    }
                }
            }
        }
        Ok(())
    }

    fn warn_length(&mut self, keys: &[String], from: usize, into: usize) {
        let warning = Warning::sequence_length(keys, from, into);
        debug!("{}", warning);
        self.warnings.push(warning);
    }
}

fn read_key(node: &Node) -> Result<&str> {
    match node.kind {
        Kind::Scalar => Ok(&node.value),
        _ => Err(Error::NonScalarMapKey),
    }
}

fn child_path(keys: &[String], key: String) -> Vec<String> {
    let mut path = Vec::with_capacity(keys.len() + 1);
    path.extend_from_slice(keys);
    path.push(key);
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merged(into: &str, from: &str) -> (String, Vec<Warning>) {
        let mut into = Yaml::parse(into).unwrap();
        let from = Yaml::parse(from).unwrap();
        let warnings = into.merge(&from).unwrap();
        (into.to_string(), warnings)
    }

    fn merged_selective(into: &str, from: &str, marker: &str) -> (String, Vec<Warning>) {
        let mut into = Yaml::parse(into).unwrap();
        let from = Yaml::parse(from).unwrap();
        let warnings = into.merge_selective(&from, marker).unwrap();
        (into.to_string(), warnings)
    }

    #[test]
    fn test_basic_override_full() {
        let (out, warnings) = merged(
            "key1: old\nkey2: old2\n",
            "key1: !M new\nkey3: new3\n",
        );
        assert_eq!(out, "key1: !M new\nkey2: old2\nkey3: new3\n");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_basic_override_selective() {
        let (out, warnings) = merged_selective(
            "key1: old\nkey2: old2\n",
            "key1: !M new\nkey3: new3\n",
            "M",
        );
        assert_eq!(out, "key1: !M new\nkey2: old2\n");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_selective_unselected_scalar_is_kept() {
        let (out, _) = merged_selective("k: old # c\n", "k: new\n", "M");
        assert_eq!(out, "k: old # c\n");
    }

    #[test]
    fn test_empty_from_is_noop() {
        let (out, warnings) = merged("a: 1\n", "");
        assert_eq!(out, "a: 1\n");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_merge_into_empty_seeds_selected_content() {
        let (out, _) = merged("", "a: 1\nb: 2\n");
        assert_eq!(out, "a: 1\nb: 2\n");

        let (out, _) = merged_selective("", "a: !M 1\nb: 2\n", "M");
        assert_eq!(out, "a: !M 1\n");

        let (out, _) = merged_selective("", "a: 1\n", "M");
        assert_eq!(out, "");
    }

    #[test]
    fn test_sequence_length_warning() {
        let (out, warnings) = merged("- x\n- y\n- z\n", "- a\n- b\n");
        assert_eq!(out, "- a\n- b\n- z\n");
        assert_eq!(
            warnings,
            vec![Warning {
                keys: vec![],
                warning: "sequence length from (2) does not match length into (3)".to_string(),
            }]
        );
    }

    #[test]
    fn test_nested_sequence_warning_path() {
        let (_, warnings) = merged("k:\n  - a: [1]\n", "k:\n  - a: [1, 2]\n");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].keys, vec!["k", "0", "a"]);
    }

    #[test]
    fn test_shape_mismatch_replaces_and_warns_for_sequences() {
        let (out, warnings) = merged("k: scalar\n", "k:\n  - a\n  - b\n");
        assert_eq!(out, "k:\n  - a\n  - b\n");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].keys, vec!["k"]);
        assert!(warnings[0].warning.contains("from (2)"));
        assert!(warnings[0].warning.contains("into (0)"));
    }

    #[test]
    fn test_mapping_into_scalar_replaces() {
        let (out, warnings) = merged("k: v\n", "k:\n  a: 1\n");
        assert_eq!(out, "k:\n  a: 1\n");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_selected_sequence_element_propagates() {
        let (out, _) = merged_selective(
            "list:\n  - a: old\n    b: old\n",
            "list:\n  - !M\n    a: new\n    b: new\n",
            "M",
        );
        assert_eq!(out, "list:\n  - !M\n    a: new\n    b: new\n");
    }

    #[test]
    fn test_non_scalar_key_is_error() {
        let mut into = Yaml::parse("a: 1\n").unwrap();
        let from = Yaml::parse("? [x, y]\n: 1\n").unwrap();
        let err = into.merge(&from).unwrap_err();
        assert!(matches!(err, Error::NonScalarMapKey));
        assert!(err.to_string().contains("non-scalar map keys"));
        assert_eq!(into.to_string(), "a: 1\n");
    }

    #[test]
    fn test_failed_merge_keeps_earlier_warnings() {
        let mut into = Yaml::parse("l: [1]\nm:\n  x: 1\n").unwrap();
        let from = Yaml::parse("l: [1, 2]\nm:\n  ? [a]\n  : 1\n").unwrap();
        let before = into.clone();

        let err = into.merge(&from).unwrap_err();
        assert!(matches!(err, Error::MergeAborted { .. }));
        assert!(matches!(err.cause(), Error::NonScalarMapKey));
        assert_eq!(
            err.warnings(),
            &[Warning::sequence_length(&["l".to_string()], 2, 1)]
        );
        assert_eq!(into, before);
    }

    #[test]
    fn test_odd_mapping_is_error() {
        let broken = Node::document(Node::mapping(vec![Node::scalar("a")]));
        let mut into = Yaml::from_node(broken);
        let before = into.clone();
        let from = Yaml::parse("a: 1\n").unwrap();
        assert!(matches!(
            into.merge(&from),
            Err(Error::OddMappingLength { length: 1 })
        ));
        assert_eq!(into, before);

        let mut into = Yaml::parse("a: 1\n").unwrap();
        let from = Yaml::from_node(Node::document(Node::mapping(vec![
            Node::scalar("a"),
            Node::scalar("2"),
            Node::scalar("b"),
        ])));
        assert!(matches!(
            into.merge(&from),
            Err(Error::OddMappingLength { length: 3 })
        ));
        assert_eq!(into.to_string(), "a: 1\n");
    }

    #[test]
    fn test_document_with_two_roots_is_error() {
        let mut two_roots = Node::document(Node::scalar("first"));
        two_roots.children.push(Node::scalar("second"));

        let mut into = Yaml::parse("a: 1\n").unwrap();
        let before = into.clone();
        assert!(matches!(
            into.merge(&Yaml::from_node(two_roots.clone())),
            Err(Error::DocumentWrongLength { length: 2 })
        ));
        assert_eq!(into, before);

        let mut into = Yaml::from_node(two_roots);
        let before = into.clone();
        let from = Yaml::parse("a: 1\n").unwrap();
        assert!(matches!(
            into.merge(&from),
            Err(Error::DocumentWrongLength { length: 2 })
        ));
        assert_eq!(into, before);
    }

    #[test]
    fn test_alias_is_rejected_in_either_tree() {
        let mut into = Yaml::parse("a: &x 1\nb: *x\n").unwrap();
        let from = Yaml::parse("a: 2\n").unwrap();
        assert!(matches!(
            into.merge(&from),
            Err(Error::AliasNotSupported { .. })
        ));

        let mut into = Yaml::parse("a: 2\n").unwrap();
        let from = Yaml::parse("a: &x 1\nb: *x\n").unwrap();
        assert!(matches!(
            into.merge(&from),
            Err(Error::AliasNotSupported { .. })
        ));
    }

    #[test]
    fn test_merge_bytes() {
        let mut into = Yaml::parse("a: 1\n").unwrap();
        into.merge_bytes(b"b: 2\n").unwrap();
        assert_eq!(into.to_string(), "a: 1\nb: 2\n");

        into.merge_bytes_selective(b"c: 3\nd: 4 # keep\n", "keep")
            .unwrap();
        assert_eq!(into.to_string(), "a: 1\nb: 2\nd: 4 # keep\n");
    }

    #[test]
    fn test_merge_bytes_parse_error() {
        let mut into = Yaml::parse("a: 1\n").unwrap();
        assert!(matches!(
            into.merge_bytes(b"a: [1"),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn test_empty_marker_equals_full_merge() {
        let into = "a: 1\nlist: [1, 2]\n";
        let from = "a: 2\nb: 3\nlist: [4]\n";
        assert_eq!(merged(into, from), merged_selective(into, from, ""));
    }
}
