//! Key-path navigation and insertion.

use log::debug;
use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::codec::node_from_value;
use crate::document::Yaml;
use crate::error::{Error, Result};
use crate::merge::Warning;
use crate::node::{Kind, Node};

impl Yaml {
    /// Copy of the node found by following `keys` through nested mappings.
    ///
    /// An empty path returns the whole document.
    pub fn select_sub_element(&self, keys: &[String]) -> Result<Yaml> {
        let node = navigate(&self.node, keys)?;
        Ok(Yaml::from_node(node.clone()))
    }

    /// Put `value` at `keys`.
    ///
    /// An existing node at the path is replaced. When the path is missing,
    /// the nested mapping `{keys[0]: {keys[1]: ... value}}` is built and
    /// merged into the document, so siblings along the path are kept.
    pub fn insert<T: Serialize + ?Sized>(
        &mut self,
        keys: &[String],
        value: &T,
    ) -> Result<Vec<Warning>> {
        let value = serde_yaml::to_value(value)?;

        let missing = match navigate_mut(&mut self.node, keys) {
            Ok(target) => {
                let replacement = node_from_value(&value);
                if target.kind == Kind::Document {
                    target.children = vec![replacement];
                } else {
                    *target = replacement;
                }
                return Ok(Vec::new());
            }
            Err(err) if err.is_missing_path() => err,
            Err(err) => return Err(err),
        };
        debug!("{}: building path {:?}", missing, keys);

        let nested = keys.iter().rev().fold(value, |inner, key| {
            let mut map = Mapping::new();
            map.insert(Value::String(key.clone()), inner);
            Value::Mapping(map)
        });
        self.merge(&Yaml::from_node(node_from_value(&nested)))
    }
}

fn navigate<'a>(node: &'a Node, keys: &[String]) -> Result<&'a Node> {
    let Some((key, rest)) = keys.split_first() else {
        return Ok(node);
    };
    match node.kind {
        Kind::Mapping => {
            let index = value_index(node, key)?;
            navigate(&node.children[index], rest)
        }
        Kind::Document => navigate(document_root(node, key)?, keys),
        kind => Err(Error::UnknownNodeKind { kind }),
    }
}

fn navigate_mut<'a>(node: &'a mut Node, keys: &[String]) -> Result<&'a mut Node> {
    let Some((key, rest)) = keys.split_first() else {
        return Ok(node);
    };
    match node.kind {
        Kind::Mapping => {
            let index = value_index(node, key)?;
            navigate_mut(&mut node.children[index], rest)
        }
        Kind::Document => {
            document_root(node, key)?;
            navigate_mut(&mut node.children[0], keys)
        }
        kind => Err(Error::UnknownNodeKind { kind }),
    }
}

/// Position of the value stored under `key`.
fn value_index(node: &Node, key: &str) -> Result<usize> {
    node.children
        .chunks_exact(2)
        .position(|pair| pair[0].value == key)
        .map(|pair| pair * 2 + 1)
        .ok_or_else(|| Error::KeyNotPresent {
            key: key.to_string(),
        })
}

/// The single root of a document. An empty document has no key at all.
fn document_root<'a>(node: &'a Node, key: &str) -> Result<&'a Node> {
    match node.children.as_slice() {
        [] => Err(Error::KeyNotPresent {
            key: key.to_string(),
        }),
        [root] => Ok(root),
        children => Err(Error::DocumentWrongLength {
            length: children.len(),
        }),
    }
}
