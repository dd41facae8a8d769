//! Property-based tests for the document engine.
//!
//! These tests use proptest to generate random document trees and verify
//! that invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::codec::{emit, parse};
    use crate::node::{Kind, Node};
    use crate::Yaml;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn scalar() -> impl Strategy<Value = Node> {
        ("[a-z][a-z0-9]{0,7}", prop::option::of(Just("!Keep"))).prop_map(|(value, tag)| {
            let node = Node::scalar(value);
            match tag {
                Some(tag) => node.with_tag(tag),
                None => node,
            }
        })
    }

    /// Trees of plain scalars and non-empty block collections with unique keys.
    fn tree() -> impl Strategy<Value = Node> {
        scalar().prop_recursive(4, 32, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 1..4).prop_map(Node::sequence),
                prop::collection::btree_map("[a-z]{1,6}", inner, 1..4).prop_map(mapping),
            ]
        })
    }

    fn mapping(entries: BTreeMap<String, Node>) -> Node {
        let children = entries
            .into_iter()
            .flat_map(|(key, value)| [Node::scalar(key), value])
            .collect();
        Node::mapping(children)
    }

    fn document() -> impl Strategy<Value = Yaml> {
        tree().prop_map(|root| Yaml::from_node(Node::document(root)))
    }

    fn is_sorted(node: &Node) -> bool {
        let keys_sorted = node.kind != Kind::Mapping
            || node
                .children
                .chunks(2)
                .collect::<Vec<_>>()
                .windows(2)
                .all(|pair| pair[0][0].value <= pair[1][0].value);
        keys_sorted && node.children.iter().all(is_sorted)
    }

    // ============================================================================
    // codec property tests
    // ============================================================================

    proptest! {
        /// Property: emitting a tree and parsing it back yields the same tree
        #[test]
        fn emit_then_parse_preserves_tree(doc in document(), indent in 2usize..=9) {
            let text = emit(&doc.node, indent).unwrap();
            let parsed = parse(&text).unwrap();
            prop_assert_eq!(parsed, doc.node, "emitted text:\n{}", text);
        }

        /// Property: emitting is a fixed point after one round trip
        #[test]
        fn emit_is_stable(doc in document()) {
            let first = doc.to_string();
            let second = Yaml::parse(&first).unwrap().to_string();
            prop_assert_eq!(first, second);
        }
    }

    // ============================================================================
    // sort property tests
    // ============================================================================

    proptest! {
        /// Property: sorting orders every mapping by key
        #[test]
        fn sort_orders_all_mappings(mut doc in document()) {
            doc.sort();
            prop_assert!(is_sorted(&doc.node));
        }

        /// Property: sorting is idempotent
        #[test]
        fn sort_is_idempotent(mut doc in document()) {
            doc.sort();
            let once = doc.clone();
            doc.sort();
            prop_assert_eq!(doc, once);
        }

        /// Property: sorting never changes the data a document carries
        #[test]
        fn sort_preserves_values(doc in document()) {
            let mut sorted = doc.clone();
            sorted.sort();
            prop_assert_eq!(sorted.to_value().unwrap(), doc.to_value().unwrap());
        }
    }

    // ============================================================================
    // merge property tests
    // ============================================================================

    proptest! {
        /// Property: a full merge into an empty document copies the source
        #[test]
        fn merge_into_empty_copies_source(from in document()) {
            let mut into = Yaml::empty();
            let warnings = into.merge(&from).unwrap();
            prop_assert!(warnings.is_empty());
            prop_assert_eq!(into, from);
        }

        /// Property: merging a document into itself changes nothing
        #[test]
        fn merge_with_self_is_identity(doc in document()) {
            let mut into = doc.clone();
            let warnings = into.merge(&doc).unwrap();
            prop_assert!(warnings.is_empty());
            prop_assert_eq!(into, doc);
        }

        /// Property: an empty marker behaves like a full merge
        #[test]
        fn empty_marker_is_full_merge(from in document(), into in document()) {
            let mut full = into.clone();
            let mut selective = into;
            let full_result = full.merge(&from).map_err(|err| err.to_string());
            let selective_result = selective
                .merge_selective(&from, "")
                .map_err(|err| err.to_string());
            prop_assert_eq!(full_result, selective_result);
            prop_assert_eq!(full, selective);
        }

        /// Property: content below a marked value merges exactly like a full merge
        #[test]
        fn marked_subtree_merges_fully(from in tree(), into in tree()) {
            let wrap = |value: Node| {
                Yaml::from_node(Node::document(Node::mapping(vec![Node::scalar("root"), value])))
            };
            let from = wrap(from.with_tag("!Keep"));
            let into = wrap(into);

            let mut full = into.clone();
            let mut selective = into;
            let full_result = full.merge(&from).map_err(|err| err.to_string());
            let selective_result = selective
                .merge_selective(&from, "Keep")
                .map_err(|err| err.to_string());
            prop_assert_eq!(full_result, selective_result);
            prop_assert_eq!(full, selective);
        }

        /// Property: a marker nothing carries leaves the target untouched
        #[test]
        fn unused_marker_changes_nothing(from in document(), into in document()) {
            let mut merged = into.clone();
            let _ = merged.merge_selective(&from, "Absent");
            prop_assert_eq!(merged, into);
        }
    }
}
