//! Defensive navigation over raw upstream entries
//!
//! Upstream entries are untyped JSON whose shape is not under our control.
//! [`Node`] wraps an optional borrowed [`Value`] and exposes total accessors:
//! a missing key, an out-of-range index, `null`, or a container of the wrong
//! type all produce an absent node instead of an error. Traversal code can
//! then chain steps freely and only check for a value at the leaves.

use serde_json::Value;

/// Borrowed view of a position inside a raw upstream document
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Node<'a> {
    value: Option<&'a Value>,
}

impl<'a> Node<'a> {
    /// Wrap a value; `null` is treated as absent
    pub fn new(value: &'a Value) -> Self {
        match value {
            Value::Null => Self::missing(),
            other => Self { value: Some(other) },
        }
    }

    /// A node that points at nothing
    pub fn missing() -> Self {
        Self { value: None }
    }

    /// Whether the node points at a non-null value
    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    /// Step into an object field
    pub fn field(&self, key: &str) -> Node<'a> {
        match self.value {
            Some(Value::Object(map)) => map.get(key).map(Node::new).unwrap_or_default(),
            _ => Node::missing(),
        }
    }

    /// Step into an array element
    pub fn index(&self, index: usize) -> Node<'a> {
        match self.value {
            Some(Value::Array(items)) => items.get(index).map(Node::new).unwrap_or_default(),
            _ => Node::missing(),
        }
    }

    /// Iterate array elements; yields nothing unless the node is an array
    pub fn items(&self) -> impl Iterator<Item = Node<'a>> + 'a {
        let items: &'a [Value] = match self.value {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        };
        items.iter().map(Node::new)
    }

    /// Number of array elements, zero for anything else
    pub fn len(&self) -> usize {
        match self.value {
            Some(Value::Array(items)) => items.len(),
            _ => 0,
        }
    }

    /// Whether the node is an empty or absent array
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The string payload, if this node is a JSON string
    pub fn as_str(&self) -> Option<&'a str> {
        self.value.and_then(Value::as_str)
    }

    /// Whether this node is a JSON object
    pub fn is_object(&self) -> bool {
        matches!(self.value, Some(Value::Object(_)))
    }
}

impl<'a> From<&'a Value> for Node<'a> {
    fn from(value: &'a Value) -> Self {
        Node::new(value)
    }
}
