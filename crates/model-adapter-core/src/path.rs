//! Dotted path resolution over JSON values
//!
//! A path such as `"c.cc.1.ccc"` addresses a value inside nested objects and
//! arrays. Segments are separated by `.`; a backslash before a dot keeps the
//! dot inside the segment, so `"a\\.b.c"` has the two segments `a.b` and `c`.
//! Segments made of ASCII digits index arrays positionally.
//!
//! Reads never fail: a missing intermediate resolves to `None`. Writes never
//! fail either: missing intermediates are created as empty objects.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use serde_json::{Map, Value};
use std::fmt;

/// A parsed, immutable dotted path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    raw: String,
    segments: Vec<String>,
}

impl Path {
    /// Parse a dotted path string
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let segments = parse_segments(&raw);
        Self { raw, segments }
    }

    /// Build a path from already split segments, escaping literal dots
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        Self {
            raw: format_segments(&segments),
            segments,
        }
    }

    /// The path as it was written
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The ordered segments of this path
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false for parsed paths; an empty string still has one segment
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The last segment, i.e. the key written by [`set`]
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Path of the container holding the last segment
    pub fn parent(&self) -> Option<Path> {
        if self.segments.len() < 2 {
            return None;
        }
        Some(Self::from_segments(
            self.segments[..self.segments.len() - 1].iter().cloned(),
        ))
    }

    /// Check whether `prefix` addresses this path or one of its ancestors
    pub fn starts_with(&self, prefix: &Path) -> bool {
        prefix.segments.len() <= self.segments.len()
            && self.segments[..prefix.segments.len()] == prefix.segments[..]
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for Path {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for Path {
    fn from(raw: String) -> Self {
        Self::parse(raw)
    }
}

/// Split a dotted path into segments, honoring backslash-escaped dots.
///
/// A raw segment ending in an odd number of backslashes is joined with the
/// following raw segment; the escaping backslash is consumed.
pub fn parse_segments(path: &str) -> Vec<String> {
    let parts: Vec<&str> = path.split('.').collect();
    let mut segments = Vec::with_capacity(parts.len());

    let mut i = 0;
    while i < parts.len() {
        let mut segment = parts[i].to_string();
        while trailing_backslashes(&segment) % 2 == 1 && i + 1 < parts.len() {
            segment.pop();
            segment.push('.');
            i += 1;
            segment.push_str(parts[i]);
        }
        segments.push(segment);
        i += 1;
    }

    segments
}

/// Escape literal dots in a segment
pub fn escape_segment(segment: &str) -> String {
    if !segment.contains('.') {
        return segment.to_string();
    }
    segment.replace('.', "\\.")
}

/// Join segments back into a dotted path string
pub fn format_segments(segments: &[String]) -> String {
    segments
        .iter()
        .map(|s| escape_segment(s))
        .collect::<Vec<_>>()
        .join(".")
}

fn trailing_backslashes(segment: &str) -> usize {
    segment.chars().rev().take_while(|c| *c == '\\').count()
}

/// Parse an array index segment (ASCII digits only)
pub fn parse_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

/// Most `null` slots a write may insert in front of a new array element
pub const MAX_ARRAY_GAP: usize = 1 << 16;

/// Mutable slot `index` of `items`, padding with `null` up to it.
///
/// Indices further than [`MAX_ARRAY_GAP`] past the end are refused.
fn array_slot_mut(items: &mut Vec<Value>, index: usize) -> Option<&mut Value> {
    if index >= items.len() {
        let gap = index - items.len();
        if gap > MAX_ARRAY_GAP {
            return None;
        }
        items.resize(index.checked_add(1)?, Value::Null);
    }
    items.get_mut(index)
}

fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

/// Resolve `path` inside `container`.
///
/// Returns `None` as soon as an intermediate is missing or not a container.
/// A `null` at the final segment is returned as `Some(&Value::Null)`.
pub fn get<'a>(container: &'a Value, path: &Path) -> Option<&'a Value> {
    let mut current = container;
    for segment in path.segments() {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(parse_index(segment)?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Resolve `path`, falling back only when the value is strictly absent.
///
/// Unlike the adapter default policy, a resolved `null` is returned as is.
pub fn get_or<'a>(container: &'a Value, path: &Path, fallback: &'a Value) -> &'a Value {
    get(container, path).unwrap_or(fallback)
}

/// Step into `segment`, creating an empty object when the slot is missing
/// or holds a non-container value.
fn child_container_mut<'a>(value: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
    let slot = match value {
        Value::Object(map) => map.entry(segment.to_string()).or_insert(Value::Null),
        Value::Array(items) => array_slot_mut(items, parse_index(segment)?)?,
        _ => return None,
    };

    if !is_container(slot) {
        *slot = Value::Object(Map::new());
    }
    Some(slot)
}

/// Resolve the container that holds the last segment of `path`.
///
/// For single-segment paths this is `root` itself. Missing intermediates are
/// created. Returns `None` when `root` (or an array on the way, addressed by
/// a non-index segment) cannot hold the path.
pub fn parent_container<'a>(root: &'a mut Value, path: &Path) -> Option<&'a mut Value> {
    if !is_container(root) {
        return None;
    }

    let segments = path.segments();
    let mut current = root;
    if segments.len() > 1 {
        for segment in &segments[..segments.len() - 1] {
            current = child_container_mut(current, segment)?;
        }
    }
    Some(current)
}

/// Assign `value` at `path`, creating intermediate objects as needed.
///
/// Writing into a non-container root, or into an array slot more than
/// [`MAX_ARRAY_GAP`] past its end, is a no-op.
pub fn set(container: &mut Value, path: &Path, value: Value) {
    let Some(last) = path.last() else {
        return;
    };
    let Some(parent) = parent_container(container, path) else {
        return;
    };

    match parent {
        Value::Object(map) => {
            map.insert(last.to_string(), value);
        }
        Value::Array(items) => {
            if let Some(index) = parse_index(last) {
                if let Some(slot) = array_slot_mut(items, index) {
                    *slot = value;
                }
            }
        }
        _ => {}
    }
}

/// Remove the value at `path` without creating anything.
///
/// Array slots cannot be removed without shifting their siblings, so they are
/// reset to `null` instead.
pub fn remove(container: &mut Value, path: &Path) -> Option<Value> {
    let last = path.last()?;
    let mut current = container;
    for segment in &path.segments()[..path.len() - 1] {
        current = match current {
            Value::Object(map) => map.get_mut(segment)?,
            Value::Array(items) => items.get_mut(parse_index(segment)?)?,
            _ => return None,
        };
    }

    match current {
        Value::Object(map) => map.shift_remove(last),
        Value::Array(items) => {
            let slot = items.get_mut(parse_index(last)?)?;
            Some(std::mem::replace(slot, Value::Null))
        }
        _ => None,
    }
}
