//! Key paths and file patterns.

use glob::{MatchOptions, Pattern};

use crate::error::{Error, Result};

/// Match a relative path against a glob pattern. `*` does not cross `/`.
pub fn glob_match(pattern: &str, path: &str) -> Result<bool> {
    let pattern = Pattern::new(pattern).map_err(Error::Glob)?;
    let options = MatchOptions {
        require_literal_separator: true,
        ..MatchOptions::default()
    };
    Ok(pattern.matches_with(path, options))
}

/// Parse a key path string into the ordered keys used for navigation.
///
/// Supports:
/// - Dot notation: `foo.bar.baz`
/// - Bracket notation: `foo["bar"]` or `foo['bar']`
/// - Sequence positions: `items[0]`, kept as the key `"0"`
/// - Escaped characters: `foo\.bar` (literal dot)
/// - Mixed: `servers[0].config["special.key"]`
///
/// # Examples
///
/// ```
/// use yamlgraft::path::parse_key_path;
///
/// let keys = parse_key_path("servers[0].host");
/// assert_eq!(keys, vec!["servers", "0", "host"]);
/// ```
pub fn parse_key_path(path: &str) -> Vec<String> {
    if path.trim().is_empty() || path == "." || path == "/" {
        return Vec::new();
    }

    let mut keys = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars().peekable();
    let mut escaped = false;

    while let Some(ch) = chars.next() {
        if escaped {
            current.push(ch);
            escaped = false;
            continue;
        }

        match ch {
            '\\' => escaped = true,
            '.' => {
                if !current.is_empty() {
                    keys.push(std::mem::take(&mut current));
                }
            }
            '[' => {
                if !current.is_empty() {
                    keys.push(std::mem::take(&mut current));
                }

                match chars.peek().copied() {
                    Some(quote @ ('"' | '\'')) => {
                        chars.next();
                        let mut key = String::new();
                        let mut bracket_escaped = false;

                        while let Some(ch) = chars.next() {
                            if bracket_escaped {
                                key.push(ch);
                                bracket_escaped = false;
                            } else if ch == '\\' {
                                bracket_escaped = true;
                            } else if ch == quote {
                                if chars.peek() == Some(&']') {
                                    chars.next();
                                    break;
                                }
                                key.push(ch);
                            } else {
                                key.push(ch);
                            }
                        }

                        keys.push(key);
                    }
                    _ => {
                        let mut bracket_content = String::new();
                        for next_ch in chars.by_ref() {
                            if next_ch == ']' {
                                break;
                            }
                            bracket_content.push(next_ch);
                        }

                        let trimmed = bracket_content.trim();
                        if let Ok(index) = trimmed.parse::<usize>() {
                            keys.push(index.to_string());
                        } else if !trimmed.is_empty() {
                            keys.push(trimmed.to_string());
                        }
                    }
                }
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        keys.push(current);
    }

    keys
}
