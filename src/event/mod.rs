pub mod path;

use serde_json::{Map, Value};

use self::path::{Path, Segment};

pub const TAGS_FIELD: &str = "tags";

/// A structured event: a tree of fields the filter reads from and writes into.
///
/// The filter mutates the event in place; the caller owns it throughout.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub body: Value,
}

impl Event {
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    /// Resolve a path against the event, or `None` if any step is absent.
    pub fn get(&self, path: &Path) -> Option<&Value> {
        let mut current = &self.body;
        for segment in path.segments() {
            current = match segment {
                Segment::Key(key) => current.as_object()?.get(key)?,
                Segment::Index(index) => current.as_array()?.get(*index)?,
            };
        }
        Some(current)
    }

    /// Write a value at a path, creating intermediate containers as needed.
    ///
    /// A non-container value standing where a key or index must descend is
    /// replaced; sequences are padded with nulls up to a written index.
    pub fn set(&mut self, path: &Path, value: Value) {
        let (last, parents) = match path.segments().split_last() {
            Some(split) => split,
            None => return,
        };

        let mut current = &mut self.body;
        for segment in parents {
            current = match segment {
                Segment::Key(key) => {
                    if !current.is_object() {
                        *current = Value::Object(Map::new());
                    }
                    match current {
                        Value::Object(map) => map.entry(key.clone()).or_insert(Value::Null),
                        _ => return,
                    }
                }
                Segment::Index(index) => {
                    if !current.is_array() {
                        *current = Value::Array(Vec::new());
                    }
                    match current {
                        Value::Array(items) => {
                            while items.len() <= *index {
                                items.push(Value::Null);
                            }
                            &mut items[*index]
                        }
                        _ => return,
                    }
                }
            };
        }

        match last {
            Segment::Key(key) => {
                if !current.is_object() {
                    *current = Value::Object(Map::new());
                }
                if let Value::Object(map) = current {
                    map.insert(key.clone(), value);
                }
            }
            Segment::Index(index) => {
                if !current.is_array() {
                    *current = Value::Array(Vec::new());
                }
                if let Value::Array(items) = current {
                    while items.len() <= *index {
                        items.push(Value::Null);
                    }
                    items[*index] = value;
                }
            }
        }
    }

    /// Append a tag to the event's `tags` sequence.
    ///
    /// Creates the sequence when missing, wraps a pre-existing scalar value
    /// into a sequence, and never appends a duplicate.
    pub fn append_tag(&mut self, tag: &str) {
        let Value::Object(map) = &mut self.body else {
            return;
        };

        match map.get_mut(TAGS_FIELD) {
            None => {
                map.insert(
                    TAGS_FIELD.to_string(),
                    Value::Array(vec![Value::String(tag.to_string())]),
                );
            }
            Some(Value::Array(tags)) => {
                let already_tagged = tags
                    .iter()
                    .any(|t| t.as_str().map(|s| s == tag).unwrap_or(false));
                if !already_tagged {
                    tags.push(Value::String(tag.to_string()));
                }
            }
            Some(other) => {
                let existing = other.take();
                *other = Value::Array(vec![existing, Value::String(tag.to_string())]);
            }
        }
    }
}
