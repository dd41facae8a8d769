//! Deterministic key ordering.
//!
//! Mapping entries are sorted by key; sequences keep their element order but
//! their elements are sorted recursively.

use std::mem;

use crate::document::Yaml;
use crate::node::{Kind, Node};

impl Yaml {
    /// Sort every mapping in the document by key, recursively.
    ///
    /// # Panics
    ///
    /// Panics if a mapping has an odd number of children, which can only
    /// happen when the tree was built by hand incorrectly.
    pub fn sort(&mut self) {
        sort_node(&mut self.node);
    }
}

pub(crate) fn sort_node(node: &mut Node) {
    match node.kind {
        Kind::Mapping => sort_mapping(node),
        Kind::Sequence | Kind::Document => node.children.iter_mut().for_each(sort_node),
        Kind::Scalar | Kind::Alias => {}
    }
}

fn sort_mapping(node: &mut Node) {
    assert!(
        node.children.len() % 2 == 0,
        "illegal content length {} found: content slice must be even for maps",
        node.children.len()
    );

    let mut entries = mem::take(&mut node.children).into_iter();
    let mut pairs = Vec::new();
    while let (Some(key), Some(value)) = (entries.next(), entries.next()) {
        pairs.push((key, value));
    }
    pairs.sort_by(|(a, _), (b, _)| a.value.cmp(&b.value));

    for (key, mut value) in pairs {
        sort_node(&mut value);
        node.children.push(key);
        node.children.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_nested() {
        let mut doc = Yaml::parse("b: 1\na:\n  d: !T x # c\n  c: [z, y]\n").unwrap();
        doc.sort();
        assert_eq!(doc.to_string(), "a:\n  c: [z, y]\n  d: !T x # c\nb: 1\n");
    }

    #[test]
    fn test_sort_keeps_sequence_order() {
        let mut doc = Yaml::parse("- b: 1\n  a: 2\n- z\n- a\n").unwrap();
        doc.sort();
        assert_eq!(doc.to_string(), "- a: 2\n  b: 1\n- z\n- a\n");
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut doc = Yaml::parse("y: 1\nx:\n  q: 1\n  p: 2\n").unwrap();
        doc.sort();
        let once = doc.clone();
        doc.sort();
        assert_eq!(doc, once);
    }

    #[test]
    fn test_sort_is_stable_for_duplicate_keys() {
        let mut node = Node::mapping(vec![
            Node::scalar("k"),
            Node::scalar("first"),
            Node::scalar("a"),
            Node::scalar("0"),
            Node::scalar("k"),
            Node::scalar("second"),
        ]);
        sort_node(&mut node);
        let values: Vec<&str> = node.children.iter().map(|n| n.value.as_str()).collect();
        assert_eq!(values, vec!["a", "0", "k", "first", "k", "second"]);
    }

    #[test]
    #[should_panic(expected = "content slice must be even for maps")]
    fn test_sort_odd_mapping_panics() {
        let mut node = Node::mapping(vec![Node::scalar("a")]);
        sort_node(&mut node);
    }
}
