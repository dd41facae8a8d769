//! Conversion between [`Node`] trees and `serde_yaml::Value`.

use serde_yaml::value::{Tag, TaggedValue};
use serde_yaml::{Mapping, Value};

use crate::codec::scalar::{plain_string_allowed, resolve_plain, resolve_tagged};
use crate::error::{Error, Result};
use crate::node::{Kind, Node, Style};

/// Build a node tree (without a document wrapper) from a plain value.
///
/// Strings that would not read back as strings are double quoted, multi-line
/// strings become literal block scalars.
pub fn node_from_value(value: &Value) -> Node {
    match value {
        Value::Null => Node::scalar("null"),
        Value::Bool(b) => Node::scalar(b.to_string()),
        Value::Number(n) => Node::scalar(n.to_string()),
        Value::String(s) => {
            let style = if s.contains('\n') && !s.contains('\r') {
                Style::Literal
            } else if plain_string_allowed(s) {
                Style::Default
            } else {
                Style::DoubleQuoted
            };
            Node::scalar(s.clone()).with_style(style)
        }
        Value::Sequence(items) => Node::sequence(items.iter().map(node_from_value).collect()),
        Value::Mapping(map) => Node::mapping(
            map.iter()
                .flat_map(|(k, v)| [node_from_value(k), node_from_value(v)])
                .collect(),
        ),
        Value::Tagged(tagged) => node_from_value(&tagged.value).with_tag(tagged.tag.to_string()),
    }
}

/// Interpret a node tree as a plain value.
///
/// Plain scalars resolve through the core schema, quoted and block scalars
/// are strings. Local tags (`!Name`) are informational and do not change the
/// resolved value.
pub fn node_to_value(node: &Node) -> Result<Value> {
    match node.kind {
        Kind::Document => match node.children.len() {
            0 => Ok(Value::Null),
            1 => node_to_value(&node.children[0]),
            length => Err(Error::DocumentWrongLength { length }),
        },
        Kind::Scalar => Ok(scalar_value(node)),
        Kind::Sequence => node
            .children
            .iter()
            .map(node_to_value)
            .collect::<Result<Vec<_>>>()
            .map(Value::Sequence),
        Kind::Mapping => {
            if node.children.len() % 2 != 0 {
                return Err(Error::OddMappingLength {
                    length: node.children.len(),
                });
            }
            let mut map = Mapping::new();
            for (key, value) in node.pairs() {
                map.insert(node_to_value(key)?, node_to_value(value)?);
            }
            Ok(Value::Mapping(map))
        }
        Kind::Alias => Err(Error::AliasNotSupported {
            name: node.value.clone(),
        }),
    }
}

/// Wrap a value in a local tag, the way tagged nodes are exposed to serde.
pub fn tagged(tag: &str, value: Value) -> Value {
    Value::Tagged(Box::new(TaggedValue {
        tag: Tag::new(tag),
        value,
    }))
}

fn scalar_value(node: &Node) -> Value {
    match node.style {
        Style::Default | Style::Flow => {
            if node.tag.starts_with("!!") {
                resolve_tagged(&node.tag, &node.value)
            } else {
                resolve_plain(&node.value)
            }
        }
        _ => match node.tag.as_str() {
            "!!null" | "!!bool" | "!!int" | "!!float" => resolve_tagged(&node.tag, &node.value),
            _ => Value::String(node.value.clone()),
        },
    }
}
