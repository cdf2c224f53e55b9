//! Dot-path access into untyped payload trees.
//!
//! External API bodies arrive as arbitrarily nested mappings and sequences
//! (`serde_json::Value`). Both the field map and the transforms address into
//! them with dot-delimited paths where a purely numeric segment indexes a
//! sequence and any other segment keys into a mapping.
//!
//! `get` never errors: a path that disagrees with the tree's shape at any
//! step is simply absent. `set` is the opposite trade-off: it creates (or
//! overwrites) intermediate mapping nodes so output assembly never has to
//! pre-build scaffolding. Callers own the tree they hand to `set`.

use serde_json::Value;

/// Read the value at `path`, or `None` if the tree is absent, ends early,
/// or its shape disagrees with a segment kind.
pub fn get<'a>(tree: &'a Value, path: &str) -> Option<&'a Value> {
    let mut node = tree;
    for segment in path.split('.') {
        node = match (as_index(segment), node) {
            (Some(idx), Value::Array(items)) => items.get(idx)?,
            (Some(_), _) => return None,
            (None, Value::Object(map)) => map.get(segment)?,
            (None, _) => return None,
        };
    }
    Some(node)
}

/// Write `value` at `path`, creating intermediate mapping nodes as needed.
///
/// An intermediate that exists but is not a mapping is replaced with an
/// empty mapping, destructively. The final segment always assigns.
pub fn set(tree: &mut Value, path: &str, value: Value) {
    let mut node = tree;
    let mut segments = path.split('.').peekable();
    while let Some(segment) = segments.next() {
        if !node.is_object() {
            *node = Value::Object(serde_json::Map::new());
        }
        let map = node.as_object_mut().expect("node was just made an object");
        if segments.peek().is_none() {
            map.insert(segment.to_string(), value);
            return;
        }
        node = map
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(serde_json::Map::new()));
    }
}

/// A segment of only ASCII digits is a sequence index.
fn as_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}
