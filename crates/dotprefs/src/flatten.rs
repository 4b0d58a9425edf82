//! # Dot-Path Flattening
//!
//! The store keeps a flat map from dot-delimited paths to leaf values. This
//! module holds the two pure functions that convert between that flat shape
//! and the nested objects callers hand in (defaults, `set` values) and get
//! back (prefix lookups, `get_all`).
//!
//! ```text
//! {"window": {"width": 600, "height": 300}, "foo": "bar"}
//!                     │ flatten            ▲ unflatten
//!                     ▼                    │
//! [("window.width", 600), ("window.height", 300), ("foo", "bar")]
//! ```
//!
//! ## Leaf Rules
//!
//! - Scalars and `null` are leaves.
//! - Arrays are leaves. Their elements are never addressed by index.
//! - An empty object is a leaf (`{}`), so flattening never drops a property.
//!
//! Property names are joined verbatim, so a name like `""` or `"y."` yields a
//! path with an empty segment. Flattening does not filter those out; callers
//! check each path with [`is_valid_key`] before storing it.
//!
//! Both functions are total. `unflatten(flatten(d))` equals `d` for any object
//! built from non-empty objects, scalars and arrays.

use serde_json::{Map, Value};

pub const SEPARATOR: char = '.';

/// Flattens the properties of a nested object into ordered `(path, leaf)`
/// pairs. Anything other than an object flattens to nothing.
pub fn flatten(value: &Value) -> Vec<(String, Value)> {
    let mut out = Vec::new();
    if let Value::Object(map) = value {
        for (name, child) in map {
            flatten_into(name.clone(), child, &mut out);
        }
    }
    out
}

/// Flattens `value` as if it were stored under `prefix`.
///
/// A leaf value yields exactly one entry at `prefix` itself.
pub fn flatten_at(prefix: &str, value: &Value) -> Vec<(String, Value)> {
    let mut out = Vec::new();
    flatten_into(prefix.to_string(), value, &mut out);
    out
}

fn flatten_into(path: String, value: &Value, out: &mut Vec<(String, Value)>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (name, child) in map {
                flatten_into(format!("{path}{SEPARATOR}{name}"), child, out);
            }
        }
        _ => out.push((path, value.clone())),
    }
}

/// Rebuilds a nested object from flat entries.
///
/// With `prefix`, only entries strictly below `prefix` take part and the
/// prefix is stripped from their paths; `None` is returned when no entry
/// qualifies. Without a prefix every entry takes part and the result is
/// always an object, empty for an empty input.
///
/// When a path runs through a segment already holding a leaf, the leaf is
/// replaced by an object, so the later entry wins.
pub fn unflatten<'a, I>(entries: I, prefix: Option<&str>) -> Option<Value>
where
    I: IntoIterator<Item = (&'a str, &'a Value)>,
{
    let mut root = Map::new();
    let mut matched = false;

    for (key, value) in entries {
        let path = match prefix {
            Some(parent) => match strip_parent(key, parent) {
                Some(rest) => rest,
                None => continue,
            },
            None => key,
        };
        insert_path(&mut root, path, value.clone());
        matched = true;
    }

    match prefix {
        Some(_) if !matched => None,
        _ => Some(Value::Object(root)),
    }
}

fn insert_path(root: &mut Map<String, Value>, path: &str, value: Value) {
    let mut node = root;
    let mut segments = path.split(SEPARATOR).peekable();

    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            node.insert(segment.to_string(), value);
            return;
        }

        let slot = node
            .entry(segment)
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(next) = slot else {
            return;
        };
        node = next;
    }
}

/// Returns the remainder of `key` below `parent`, or `None` if `key` is not
/// a descendant. `"window.width"` below `"window"` is `"width"`.
pub fn strip_parent<'k>(key: &'k str, parent: &str) -> Option<&'k str> {
    key.strip_prefix(parent)?.strip_prefix(SEPARATOR)
}

/// True if `key` is `path` itself or lies below it.
pub fn is_within(key: &str, path: &str) -> bool {
    key == path || strip_parent(key, path).is_some()
}

/// A key is well formed when it is non-empty and has no empty segment.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && key.split(SEPARATOR).all(|segment| !segment.is_empty())
}

/// Proper ancestors of `key`, shortest first: `"a.b.c"` yields `"a"`, `"a.b"`.
pub fn ancestors(key: &str) -> impl Iterator<Item = &str> {
    key.match_indices(SEPARATOR).map(move |(idx, _)| &key[..idx])
}
