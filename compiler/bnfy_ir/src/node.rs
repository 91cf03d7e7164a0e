//! The untyped AST shared by the grammar parser and generated parsers.
//!
//! A [`Node`] is a tagged record whose fields keep declaration order, so two
//! parsers that declare the same properties in the same order produce equal
//! trees. Field values are [`Value`]s: nothing, a token, a nested node, or a
//! list of values.
//!
//! Nodes serialize as JSON objects with the tag under `"tag"` followed by
//! the fields in order.
//!
//! Trees may nest as deeply as the parsed source does. Cloning, comparing
//! and serializing grow the stack as they descend, and dropping a node
//! tears its subtree down iteratively.

use serde::ser::{SerializeMap, SerializeSeq};
use bnfy_stack::ensure_sufficient_stack;
use serde::{Serialize, Serializer};

use crate::Token;

/// A field value.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Token(Token),
    Node(Box<Node>),
    List(Vec<Value>),
}

impl Value {
    /// `Null` or an empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::List(items) => items.is_empty(),
            Value::Token(_) | Value::Node(_) => false,
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Value::Token(token) => Some(token),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn into_node(self) -> Option<Node> {
        match self {
            Value::Node(node) => Some(*node),
            _ => None,
        }
    }
}

impl From<Token> for Value {
    fn from(token: Token) -> Self {
        Value::Token(token)
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Value::Node(Box::new(node))
    }
}

impl From<Option<Token>> for Value {
    fn from(token: Option<Token>) -> Self {
        token.map_or(Value::Null, Value::Token)
    }
}

/// A tagged record with ordered fields.
#[derive(Debug)]
pub struct Node {
    pub tag: String,
    pub fields: Vec<(String, Value)>,
}

impl Node {
    pub fn new(tag: impl Into<String>) -> Self {
        Node {
            tag: tag.into(),
            fields: Vec::new(),
        }
    }

    /// Builder form of [`Node::set`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Declare a field with its initial value: an empty list for list
    /// properties, `Null` otherwise.
    pub fn declare(&mut self, name: impl Into<String>, is_list: bool) {
        let initial = if is_list {
            Value::List(Vec::new())
        } else {
            Value::Null
        };
        self.set(name, initial);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Set a field, keeping its original position if it already exists.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Append to a list field, creating it (or replacing a `Null`) as needed.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some((_, Value::List(items))) => items.push(value),
            Some((_, slot)) => {
                let previous = std::mem::take(slot);
                let mut items = Vec::with_capacity(2);
                if !previous.is_empty() {
                    items.push(previous);
                }
                items.push(value);
                *slot = Value::List(items);
            }
            None => self.fields.push((name, Value::List(vec![value]))),
        }
    }

    /// Move a field's value out, leaving `Null` in its place.
    pub fn take(&mut self, name: &str) -> Value {
        self.fields
            .iter_mut()
            .find(|(field, _)| field == name)
            .map(|(_, value)| std::mem::take(value))
            .unwrap_or_default()
    }

    /// True if every field is `Null` or an empty list.
    pub fn is_empty(&self) -> bool {
        self.fields.iter().all(|(_, value)| value.is_empty())
    }

    /// Shorthand for a field holding a token.
    pub fn token(&self, name: &str) -> Option<&Token> {
        self.get(name).and_then(Value::as_token)
    }

    /// Shorthand for a field holding a node.
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.get(name).and_then(Value::as_node)
    }

    /// Shorthand for a list field. Missing fields read as empty.
    pub fn list(&self, name: &str) -> &[Value] {
        self.get(name).and_then(Value::as_list).unwrap_or_default()
    }
}

impl Clone for Node {
    fn clone(&self) -> Self {
        ensure_sufficient_stack(|| Node {
            tag: self.tag.clone(),
            fields: self.fields.clone(),
        })
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        ensure_sufficient_stack(|| self.tag == other.tag && self.fields == other.fields)
    }
}

impl Eq for Node {}

impl Drop for Node {
    fn drop(&mut self) {
        if self.fields.iter().all(|(_, value)| is_leaf(value)) {
            return;
        }
        // Children are detached before they drop, so each drop stays shallow.
        let mut pending: Vec<Value> = self.fields.drain(..).map(|(_, value)| value).collect();
        while let Some(value) = pending.pop() {
            match value {
                Value::Node(mut node) => {
                    pending.extend(node.fields.drain(..).map(|(_, value)| value));
                }
                Value::List(items) => pending.extend(items),
                Value::Null | Value::Token(_) => {}
            }
        }
    }
}

fn is_leaf(value: &Value) -> bool {
    matches!(value, Value::Null | Value::Token(_))
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ensure_sufficient_stack(|| {
            let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
            map.serialize_entry("tag", &self.tag)?;
            for (name, value) in &self.fields {
                map.serialize_entry(name, value)?;
            }
            map.end()
        })
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Token(token) => token.serialize(serializer),
            Value::Node(node) => node.serialize(serializer),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

#[cfg(test)]
mod tests;
