//! Event-driven tree builder on top of `yaml-rust2`.
//!
//! The scanner drops comments, so trailing comments are recovered from the
//! source text and attached in a second pass. A comment on a line belongs to
//! the last node completed on that line: scalars and aliases complete where
//! they start, flow collections where their closing bracket sits. Block
//! collections never own a trailing comment.

use std::collections::HashMap;

use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser, Tag};
use yaml_rust2::scanner::{Marker, TScalarStyle};

use crate::error::{Error, Result};
use crate::node::{Kind, Node, Style};

/// Parse the first document of `input` into a [`Kind::Document`] node.
///
/// Empty input (or input holding only comments) yields an empty document.
pub fn parse(input: &str) -> Result<Node> {
    let source: Vec<char> = input.chars().collect();
    let lines = LineIndex::new(&source);

    let mut builder = TreeBuilder::new(&source, &lines);
    let mut parser = Parser::new_from_str(input);
    parser
        .load(&mut builder, false)
        .map_err(|err| Error::Parse {
            message: err.to_string(),
        })?;

    let TreeBuilder {
        root, completions, ..
    } = builder;

    let mut document = Node {
        kind: Kind::Document,
        line: 1,
        column: 1,
        ..Default::default()
    };
    if let Some(mut root) = root {
        let comments = trailing_comments(&source, &lines);
        if !comments.is_empty() {
            attach_comments(&mut root, &completions, &comments);
        }
        document.children.push(root);
    }
    Ok(document)
}

/// Start offsets (in chars) of every source line.
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &[char]) -> Self {
        let mut starts = vec![0];
        let mut i = 0;
        while i < source.len() {
            match source[i] {
                '\r' if source.get(i + 1) == Some(&'\n') => {
                    starts.push(i + 2);
                    i += 2;
                    continue;
                }
                '\n' | '\r' => starts.push(i + 1),
                _ => {}
            }
            i += 1;
        }
        Self { starts }
    }

    /// 0-based line containing char offset `index`.
    fn line_of(&self, index: usize) -> usize {
        self.starts.partition_point(|&start| start <= index).saturating_sub(1)
    }

    fn column_of(&self, index: usize) -> usize {
        index - self.starts[self.line_of(index)]
    }

    fn span(&self, line: usize, len: usize) -> (usize, usize) {
        let start = self.starts[line];
        let end = self.starts.get(line + 1).copied().unwrap_or(len);
        (start, end)
    }
}

struct TreeBuilder<'a> {
    source: &'a [char],
    lines: &'a LineIndex,
    stack: Vec<Node>,
    root: Option<Node>,
    anchors: HashMap<usize, String>,
    /// Comment-candidate line per node, in completion order.
    completions: Vec<Option<usize>>,
}

impl<'a> TreeBuilder<'a> {
    fn new(source: &'a [char], lines: &'a LineIndex) -> Self {
        Self {
            source,
            lines,
            stack: Vec::new(),
            root: None,
            anchors: HashMap::new(),
            completions: Vec::new(),
        }
    }

    fn positioned(&self, kind: Kind, marker: &Marker) -> Node {
        Node {
            kind,
            line: self.lines.line_of(marker.index()) + 1,
            column: self.lines.column_of(marker.index()) + 1,
            ..Default::default()
        }
    }

    fn complete(&mut self, node: Node, comment_line: Option<usize>) {
        self.completions.push(comment_line);
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.root = Some(node),
        }
    }

    fn register_anchor(&mut self, node: &mut Node, anchor_id: usize, marker: &Marker) {
        if anchor_id == 0 {
            return;
        }
        let name = self
            .anchor_name_at(marker.index())
            .unwrap_or_else(|| format!("anchor{}", anchor_id));
        self.anchors.insert(anchor_id, name.clone());
        node.anchor = name;
    }

    /// Walks the `&anchor` / `!tag` properties starting at `index` and returns
    /// the offset of the first content character together with the anchor name.
    fn skip_properties(&self, mut index: usize) -> (usize, Option<String>) {
        let mut anchor = None;
        loop {
            while index < self.source.len() && self.source[index].is_whitespace() {
                index += 1;
            }
            match self.source.get(index) {
                Some('&') => {
                    let start = index + 1;
                    index = self.token_end(start);
                    anchor = Some(self.source[start..index].iter().collect());
                }
                Some('!') => index = self.token_end(index),
                _ => return (index, anchor),
            }
        }
    }

    fn token_end(&self, mut index: usize) -> usize {
        while index < self.source.len() {
            let c = self.source[index];
            if c.is_whitespace() || matches!(c, ',' | '[' | ']' | '{' | '}') {
                break;
            }
            index += 1;
        }
        index
    }

    /// Anchor name of the node whose content starts at `index`. The parser
    /// marks the content, so the `&anchor` and `!tag` properties sit before
    /// it, possibly on an earlier line followed by a trailing comment.
    fn anchor_name_at(&self, index: usize) -> Option<String> {
        self.anchor_before(index)
            .or_else(|| self.skip_properties(index).1)
    }

    fn anchor_before(&self, index: usize) -> Option<String> {
        let mut end = index.min(self.source.len());
        loop {
            loop {
                while end > 0 && self.source[end - 1].is_whitespace() {
                    end -= 1;
                }
                if end == 0 {
                    return None;
                }
                let line = self.lines.line_of(end - 1);
                let (start, line_end) = self.lines.span(line, self.source.len());
                match comment_offset(&self.source[start..line_end]) {
                    Some(offset) if start + offset < end => end = start + offset,
                    _ => break,
                }
            }
            let mut start = end;
            while start > 0 {
                let c = self.source[start - 1];
                if c.is_whitespace() || matches!(c, ',' | '[' | '{') {
                    break;
                }
                start -= 1;
            }
            if start == end {
                return None;
            }
            match self.source[start] {
                '&' => return Some(self.source[start + 1..end].iter().collect()),
                '!' => end = start,
                _ => return None,
            }
        }
    }

    fn is_flow_at(&self, index: usize) -> bool {
        let (content, _) = self.skip_properties(index);
        matches!(self.source.get(content), Some('[') | Some('{'))
    }

    fn is_tilde_at(&self, index: usize) -> bool {
        let (content, _) = self.skip_properties(index);
        self.source.get(content) == Some(&'~')
    }

    fn alias_name_at(&self, index: usize) -> Option<String> {
        if self.source.get(index) != Some(&'*') {
            return None;
        }
        let end = self.token_end(index + 1);
        Some(self.source[index + 1..end].iter().collect())
    }

    fn start_collection(&mut self, kind: Kind, anchor_id: usize, tag: Option<Tag>, marker: &Marker) {
        let mut node = self.positioned(kind, marker);
        node.tag = short_tag(tag);
        if self.is_flow_at(marker.index()) {
            node.style = Style::Flow;
        }
        self.register_anchor(&mut node, anchor_id, marker);
        self.stack.push(node);
    }

    fn end_collection(&mut self, marker: &Marker) {
        if let Some(node) = self.stack.pop() {
            let comment_line = if node.style == Style::Flow {
                Some(self.lines.line_of(marker.index()))
            } else {
                None
            };
            self.complete(node, comment_line);
        }
    }
}

impl MarkedEventReceiver for TreeBuilder<'_> {
    fn on_event(&mut self, ev: Event, marker: Marker) {
        match ev {
            Event::Scalar(value, style, anchor_id, tag) => {
                let mut node = self.positioned(Kind::Scalar, &marker);
                // The parser reports a missing value as a plain `~`.
                node.value = if value == "~"
                    && style == TScalarStyle::Plain
                    && !self.is_tilde_at(marker.index())
                {
                    String::new()
                } else {
                    value
                };
                node.style = scalar_style(style);
                node.tag = short_tag(tag);
                self.register_anchor(&mut node, anchor_id, &marker);
                let line = self.lines.line_of(marker.index());
                self.complete(node, Some(line));
            }
            Event::SequenceStart(anchor_id, tag) => {
                self.start_collection(Kind::Sequence, anchor_id, tag, &marker)
            }
            Event::MappingStart(anchor_id, tag) => {
                self.start_collection(Kind::Mapping, anchor_id, tag, &marker)
            }
            Event::SequenceEnd | Event::MappingEnd => self.end_collection(&marker),
            Event::Alias(id) => {
                let mut node = self.positioned(Kind::Alias, &marker);
                node.value = self
                    .anchors
                    .get(&id)
                    .cloned()
                    .or_else(|| self.alias_name_at(marker.index()))
                    .unwrap_or_else(|| format!("anchor{}", id));
                let line = self.lines.line_of(marker.index());
                self.complete(node, Some(line));
            }
            _ => {}
        }
    }
}

fn scalar_style(style: TScalarStyle) -> Style {
    match style {
        TScalarStyle::Plain => Style::Default,
        TScalarStyle::SingleQuoted => Style::SingleQuoted,
        TScalarStyle::DoubleQuoted => Style::DoubleQuoted,
        TScalarStyle::Literal => Style::Literal,
        _ => Style::Folded,
    }
}

/// Shorthand form of a resolved tag: `!!str`, `!Local` or the verbatim tag.
fn short_tag(tag: Option<Tag>) -> String {
    match tag {
        None => String::new(),
        Some(tag) => match tag.handle.as_str() {
            "tag:yaml.org,2002:" | "!!" => format!("!!{}", tag.suffix),
            "!" => format!("!{}", tag.suffix),
            "" => format!("!<{}>", tag.suffix),
            handle => format!("{}{}", handle, tag.suffix),
        },
    }
}

/// Trailing `# ...` comments keyed by 0-based line.
fn trailing_comments(source: &[char], lines: &LineIndex) -> HashMap<usize, String> {
    let mut comments = HashMap::new();
    for line in 0..lines.starts.len() {
        let (start, end) = lines.span(line, source.len());
        let text = &source[start..end];
        if let Some(offset) = comment_offset(text) {
            let comment: String = text[offset..].iter().collect();
            comments.insert(line, comment.trim_end().to_string());
        }
    }
    comments
}

/// Offset of the first `#` that starts a comment on this line.
fn comment_offset(line: &[char]) -> Option<usize> {
    let mut in_single = false;
    let mut in_double = false;
    let mut i = 0;
    while i < line.len() {
        let c = line[i];
        let prev = if i == 0 { None } else { Some(line[i - 1]) };
        let opens = prev.is_none_or(|p| p.is_whitespace() || matches!(p, '[' | '{' | ','));
        if in_double {
            match c {
                '\\' => i += 1,
                '"' => in_double = false,
                _ => {}
            }
        } else if in_single {
            if c == '\'' {
                if line.get(i + 1) == Some(&'\'') {
                    i += 1;
                } else {
                    in_single = false;
                }
            }
        } else {
            match c {
                '#' if prev.is_none_or(char::is_whitespace) => return Some(i),
                '"' if opens => in_double = true,
                '\'' if opens => in_single = true,
                _ => {}
            }
        }
        i += 1;
    }
    None
}

fn attach_comments(
    root: &mut Node,
    completions: &[Option<usize>],
    comments: &HashMap<usize, String>,
) {
    let mut winners: HashMap<usize, usize> = HashMap::new();
    for (index, line) in completions.iter().enumerate() {
        if let Some(line) = line {
            if comments.contains_key(line) {
                winners.insert(*line, index);
            }
        }
    }
    let by_index: HashMap<usize, &String> = winners
        .into_iter()
        .filter_map(|(line, index)| comments.get(&line).map(|comment| (index, comment)))
        .collect();

    let mut counter = 0;
    assign_post_order(root, &mut counter, &by_index);
}

fn assign_post_order(node: &mut Node, counter: &mut usize, comments: &HashMap<usize, &String>) {
    for child in &mut node.children {
        assign_post_order(child, counter, comments);
    }
    if let Some(comment) = comments.get(counter) {
        node.line_comment = (*comment).clone();
    }
    *counter += 1;
}
