//! Field-path resolution over JSON values.
//!
//! A path is a sequence of segments separated by `.`. Bracket segments are
//! accepted as an alternative spelling, so `items.0.name`, `items[0].name` and
//! `items[0]["name"]` all address the same value. Quoted bracket segments may
//! contain dots.
//!
//! Array positions are plain decimal digits, so `+1` and `01` are not indices.
//!
//! Resolution is total: a missing key, an out-of-range index or a step into a
//! primitive yields [`Resolved::Missing`] instead of an error.

use itertools::Itertools;
use serde_json::Value;
use std::fmt;

/// The outcome of resolving a path against a value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'a> {
    Found(&'a Value),
    Missing,
}

impl<'a> Resolved<'a> {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolved::Found(_))
    }

    pub fn value(&self) -> Option<&'a Value> {
        match self {
            Resolved::Found(value) => Some(value),
            Resolved::Missing => None,
        }
    }
}

/// A parsed field path, reusable across many resolutions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parses a dot/bracket path. Parsing never fails; an unterminated bracket
    /// takes the rest of the input as its segment.
    pub fn parse(path: &str) -> Self {
        Self {
            segments: split_segments(path),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// `true` for the empty path, which resolves to the root value itself.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn resolve<'a>(&self, root: &'a Value) -> Resolved<'a> {
        let mut current = root;
        for segment in &self.segments {
            match step(current, segment) {
                Some(next) => current = next,
                None => return Resolved::Missing,
            }
        }
        Resolved::Found(current)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.iter().join("."))
    }
}

/// Resolves `path` against `root`.
///
/// ```
/// use bunki::path::{resolve, Resolved};
/// use serde_json::json;
///
/// let output = json!({ "result": { "data": [{ "name": "Ana" }] } });
/// assert_eq!(resolve(&output, "result.data.0.name"), Resolved::Found(&json!("Ana")));
/// assert_eq!(resolve(&output, "result.data.3.name"), Resolved::Missing);
/// ```
pub fn resolve<'a>(root: &'a Value, path: &str) -> Resolved<'a> {
    FieldPath::parse(path).resolve(root)
}

fn step<'a>(current: &'a Value, segment: &str) -> Option<&'a Value> {
    match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => array_index(segment).and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Plain decimal digits without a sign or leading zero.
fn array_index(segment: &str) -> Option<usize> {
    let canonical = !segment.is_empty()
        && segment.bytes().all(|b| b.is_ascii_digit())
        && (segment == "0" || !segment.starts_with('0'));
    canonical.then(|| segment.parse().ok()).flatten()
}

fn split_segments(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '.' => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
            '[' => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
                let quote = match chars.peek() {
                    Some(&q) if q == '"' || q == '\'' => {
                        chars.next();
                        Some(q)
                    }
                    _ => None,
                };
                let mut inner = String::new();
                match quote {
                    Some(q) => {
                        for c in chars.by_ref() {
                            if c == q {
                                break;
                            }
                            inner.push(c);
                        }
                        // Skip up to and including the closing bracket.
                        for c in chars.by_ref() {
                            if c == ']' {
                                break;
                            }
                        }
                        // Quoted keys are kept even when empty.
                        segments.push(inner);
                    }
                    None => {
                        for c in chars.by_ref() {
                            if c == ']' {
                                break;
                            }
                            inner.push(c);
                        }
                        let inner = inner.trim();
                        if !inner.is_empty() {
                            segments.push(inner.to_string());
                        }
                    }
                }
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dot_and_bracket_paths_are_equivalent() {
        assert_eq!(
            FieldPath::parse("items.0.name"),
            FieldPath::parse("items[0].name")
        );
        assert_eq!(
            FieldPath::parse("items.0.name"),
            FieldPath::parse("items[0][\"name\"]")
        );
    }

    #[test]
    fn test_quoted_bracket_keeps_dots() {
        let path = FieldPath::parse("headers['content.type']");
        assert_eq!(path.segments(), ["headers", "content.type"]);
    }

    #[test]
    fn test_empty_path_is_root() {
        let value = json!({"a": 1});
        assert!(FieldPath::parse("").is_root());
        assert_eq!(resolve(&value, ""), Resolved::Found(&value));
    }

    #[test]
    fn test_numeric_segment_on_object_is_a_key() {
        let value = json!({"0": "zero"});
        assert_eq!(resolve(&value, "0"), Resolved::Found(&json!("zero")));
    }

    #[test]
    fn test_steps_into_primitives_are_missing() {
        let value = json!({"a": "text", "b": null, "c": [1, 2]});
        assert_eq!(resolve(&value, "a.length"), Resolved::Missing);
        assert_eq!(resolve(&value, "b.x"), Resolved::Missing);
        assert_eq!(resolve(&value, "c.-1"), Resolved::Missing);
        assert_eq!(resolve(&value, "c.name"), Resolved::Missing);
    }

    #[test]
    fn test_array_index_must_be_plain_digits() {
        let value = json!({"c": [1, 2]});
        assert_eq!(resolve(&value, "c.1"), Resolved::Found(&json!(2)));
        assert_eq!(resolve(&value, "c[0]"), Resolved::Found(&json!(1)));
        assert_eq!(resolve(&value, "c.+1"), Resolved::Missing);
        assert_eq!(resolve(&value, "c.01"), Resolved::Missing);
        assert_eq!(resolve(&value, "c.00"), Resolved::Missing);

        // Object keys are matched literally.
        assert_eq!(resolve(&json!({"01": "a"}), "01"), Resolved::Found(&json!("a")));
    }

    #[test]
    fn test_unterminated_bracket_does_not_panic() {
        let value = json!({"a": {"b": 1}});
        assert_eq!(resolve(&value, "a[b"), Resolved::Found(&json!(1)));
    }

    #[test]
    fn test_display_joins_with_dots() {
        assert_eq!(FieldPath::parse("a[0]['b']").to_string(), "a.0.b");
    }
}
