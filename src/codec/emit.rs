//! Block-style YAML writer for [`Node`] trees.
//!
//! Layout follows the common Go/Python conventions: mappings and sequences in
//! block style, sequences under a mapping key indented one level, compact
//! `- key: value` items, flow collections kept inline unless something inside
//! them carries a comment.

use crate::codec::scalar::{double_quote, plain_allowed, single_quote};
use crate::error::{Error, Result};
use crate::node::{Kind, Node, Style};

/// Smallest and largest accepted indentation width.
pub const MIN_INDENT: usize = 2;
pub const MAX_INDENT: usize = 9;

/// Serialize `node` with `indent` spaces per nesting level.
pub fn emit(node: &Node, indent: usize) -> Result<String> {
    if !(MIN_INDENT..=MAX_INDENT).contains(&indent) {
        return Err(Error::Encode {
            message: format!(
                "indent {} out of range: must be between {} and {}",
                indent, MIN_INDENT, MAX_INDENT
            ),
        });
    }

    let mut emitter = Emitter {
        out: String::new(),
        indent,
    };
    match node.kind {
        Kind::Document => match node.children.len() {
            0 => {}
            1 => emitter.root(&node.children[0])?,
            length => return Err(Error::DocumentWrongLength { length }),
        },
        _ => emitter.root(node)?,
    }
    Ok(emitter.out)
}

struct Emitter {
    out: String,
    indent: usize,
}

impl Emitter {
    fn root(&mut self, node: &Node) -> Result<()> {
        if is_block_collection(node) {
            let props = properties(node);
            if !props.is_empty() || !node.line_comment.is_empty() {
                self.out.push_str(&props);
                self.comment(&node.line_comment, !props.is_empty());
                self.out.push('\n');
            }
            return self.block_collection(node, 0, false);
        }
        if is_block_scalar(node) {
            self.block_scalar_header(node, &node.line_comment, false);
            return self.block_scalar_body(node, self.indent);
        }
        let text = self.inline(node, false)?;
        if text.is_empty() {
            self.out.push('~');
        } else {
            self.out.push_str(&text);
        }
        self.comment(&node.line_comment, true);
        self.out.push('\n');
        Ok(())
    }

    fn block_collection(&mut self, node: &Node, col: usize, inline_first: bool) -> Result<()> {
        match node.kind {
            Kind::Mapping => self.block_mapping(node, col, inline_first),
            _ => self.block_sequence(node, col, inline_first),
        }
    }

    fn block_mapping(&mut self, node: &Node, col: usize, mut inline_first: bool) -> Result<()> {
        if node.children.len() % 2 != 0 {
            return Err(Error::OddMappingLength {
                length: node.children.len(),
            });
        }
        for (key, value) in node.pairs() {
            if !inline_first {
                self.pad(col);
            }
            inline_first = false;

            let key_text = self.key(key)?;
            self.out.push_str(&key_text);
            self.out.push(':');

            let comment = if value.line_comment.is_empty() {
                &key.line_comment
            } else {
                &value.line_comment
            };
            self.entry_value(value, comment, col + self.indent)?;
        }
        Ok(())
    }

    fn block_sequence(&mut self, node: &Node, col: usize, mut inline_first: bool) -> Result<()> {
        for item in &node.children {
            if !inline_first {
                self.pad(col);
            }
            inline_first = false;
            self.out.push('-');

            if is_block_collection(item) && properties(item).is_empty() && item.line_comment.is_empty() {
                self.out.push(' ');
                self.block_collection(item, col + 2, true)?;
                continue;
            }
            self.entry_value(item, &item.line_comment, col + self.indent)?;
        }
        Ok(())
    }

    /// Writes everything after `key:` or `-` on the current line, plus any
    /// nested block content at `child_col`.
    fn entry_value(&mut self, value: &Node, comment: &str, child_col: usize) -> Result<()> {
        if is_block_collection(value) {
            let props = properties(value);
            if !props.is_empty() {
                self.out.push(' ');
                self.out.push_str(&props);
            }
            self.comment(comment, true);
            self.out.push('\n');
            return self.block_collection(value, child_col, false);
        }
        if is_block_scalar(value) {
            self.block_scalar_header(value, comment, true);
            return self.block_scalar_body(value, child_col);
        }
        let text = self.inline(value, false)?;
        if !text.is_empty() {
            self.out.push(' ');
            self.out.push_str(&text);
        }
        self.comment(comment, true);
        self.out.push('\n');
        Ok(())
    }

    fn block_scalar_header(&mut self, node: &Node, comment: &str, leading_space: bool) {
        if leading_space {
            self.out.push(' ');
        }
        let props = properties(node);
        if !props.is_empty() {
            self.out.push_str(&props);
            self.out.push(' ');
        }
        self.out
            .push(if use_folded(node) { '>' } else { '|' });
        let body = node.value.trim_end_matches('\n');
        if body.starts_with(' ') || body.starts_with('\n') {
            self.out.push_str(&self.indent.to_string());
        }
        match node.value.len() - body.len() {
            0 => self.out.push('-'),
            1 => {}
            _ => self.out.push('+'),
        }
        self.comment(comment, true);
        self.out.push('\n');
    }

    fn block_scalar_body(&mut self, node: &Node, col: usize) -> Result<()> {
        let body = node.value.trim_end_matches('\n');
        let trailing = node.value.len() - body.len();
        if !body.is_empty() {
            let folded = use_folded(node);
            for (i, line) in body.split('\n').enumerate() {
                if folded && i > 0 {
                    self.out.push('\n');
                }
                if !line.is_empty() {
                    self.pad(col);
                    self.out.push_str(line);
                }
                self.out.push('\n');
            }
        }
        for _ in 1..trailing {
            self.out.push('\n');
        }
        Ok(())
    }

    /// Single-line rendering: scalars, aliases and flow collections.
    fn inline(&self, node: &Node, flow: bool) -> Result<String> {
        let text = match node.kind {
            Kind::Alias => return Ok(format!("*{}", node.value)),
            Kind::Scalar => scalar_text(node, flow),
            Kind::Sequence => {
                let items = node
                    .children
                    .iter()
                    .map(|child| self.inline(child, true))
                    .collect::<Result<Vec<_>>>()?;
                format!("[{}]", items.join(", "))
            }
            Kind::Mapping => {
                if node.children.len() % 2 != 0 {
                    return Err(Error::OddMappingLength {
                        length: node.children.len(),
                    });
                }
                let entries = node
                    .pairs()
                    .map(|(key, value)| {
                        let value = self.inline(value, true)?;
                        let key = self.flow_key(key)?;
                        Ok(if value.is_empty() {
                            format!("{}:", key)
                        } else {
                            format!("{}: {}", key, value)
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                format!("{{{}}}", entries.join(", "))
            }
            Kind::Document => {
                return Err(Error::Encode {
                    message: "document node nested inside a document".to_string(),
                })
            }
        };

        let props = properties(node);
        Ok(match (props.is_empty(), text.is_empty()) {
            (true, _) => text,
            (false, true) => props,
            (false, false) => format!("{} {}", props, text),
        })
    }

    fn key(&self, key: &Node) -> Result<String> {
        self.key_text(key, false)
    }

    fn flow_key(&self, key: &Node) -> Result<String> {
        self.key_text(key, true)
    }

    fn key_text(&self, key: &Node, flow: bool) -> Result<String> {
        match key.kind {
            Kind::Scalar => {
                let text = match key.style {
                    Style::Literal | Style::Folded => double_quote(&key.value),
                    _ if key.value.contains('\n') => double_quote(&key.value),
                    _ if key.value.is_empty() && key.style == Style::Default => "\"\"".to_string(),
                    _ => scalar_text(key, flow),
                };
                let props = properties(key);
                Ok(if props.is_empty() {
                    text
                } else {
                    format!("{} {}", props, text)
                })
            }
            Kind::Alias => Ok(format!("*{} ", key.value)),
            _ => self.inline(key, true),
        }
    }

    fn comment(&mut self, comment: &str, leading_space: bool) {
        if comment.is_empty() {
            return;
        }
        if leading_space {
            self.out.push(' ');
        }
        self.out.push_str(comment);
    }

    fn pad(&mut self, col: usize) {
        self.out.extend(std::iter::repeat_n(' ', col));
    }
}

fn properties(node: &Node) -> String {
    match (node.anchor.is_empty(), node.tag.is_empty()) {
        (true, true) => String::new(),
        (false, true) => format!("&{}", node.anchor),
        (true, false) => node.tag.clone(),
        (false, false) => format!("&{} {}", node.anchor, node.tag),
    }
}

fn has_commented_descendant(node: &Node) -> bool {
    node.children
        .iter()
        .any(|child| !child.line_comment.is_empty() || has_commented_descendant(child))
}

fn is_block_collection(node: &Node) -> bool {
    matches!(node.kind, Kind::Mapping | Kind::Sequence)
        && !node.children.is_empty()
        && (node.style != Style::Flow || has_commented_descendant(node))
}

fn is_block_scalar(node: &Node) -> bool {
    node.kind == Kind::Scalar
        && matches!(node.style, Style::Literal | Style::Folded)
        && !node.value.contains('\r')
        && !node
            .value
            .chars()
            .any(|c| c.is_control() && c != '\n' && c != '\t')
}

/// Folded output only when every line folds back unchanged.
fn use_folded(node: &Node) -> bool {
    if node.style != Style::Folded {
        return false;
    }
    let body = node.value.trim_end_matches('\n');
    !body.is_empty()
        && body
            .split('\n')
            .all(|line| !line.starts_with(' ') && !line.starts_with('\t'))
        && !body.starts_with('\n')
}

fn scalar_text(node: &Node, flow: bool) -> String {
    let value = &node.value;
    match node.style {
        Style::SingleQuoted if !value.contains('\n') && !value.chars().any(char::is_control) => {
            single_quote(value)
        }
        Style::SingleQuoted | Style::DoubleQuoted | Style::Literal | Style::Folded => {
            double_quote(value)
        }
        Style::Default | Style::Flow => {
            if value.is_empty() {
                if flow {
                    "~".to_string()
                } else {
                    String::new()
                }
            } else if plain_allowed(value, flow) {
                value.clone()
            } else {
                double_quote(value)
            }
        }
    }
}
