//! Tagged tree for opaque primitive structures
//!
//! Ciphertexts and transform keys come back from the primitive as nested
//! structures with raw bytes at arbitrary depth. Adapters build them as
//! [`Node`] trees and tag every binary field explicitly with
//! [`Node::Binary`]. There is no text scalar, so any string that shows up
//! in the serialized form was written from a binary leaf.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Number;

/// Non-binary leaf value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
}

/// A node in a primitive-native structure
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Raw bytes, hex-encoded on the wire
    Binary(Vec<u8>),
    Scalar(Scalar),
    List(Vec<Node>),
    /// Ordered mapping; insertion order is preserved through serialization
    Map(Vec<(String, Node)>),
}

impl Node {
    pub fn binary(bytes: impl Into<Vec<u8>>) -> Self {
        Node::Binary(bytes.into())
    }

    pub fn null() -> Self {
        Node::Scalar(Scalar::Null)
    }

    pub fn bool(b: bool) -> Self {
        Node::Scalar(Scalar::Bool(b))
    }

    pub fn number(n: impl Into<Number>) -> Self {
        Node::Scalar(Scalar::Number(n.into()))
    }

    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, Node)>) -> Self {
        Node::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Look up a key in a map node (first match)
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        match self {
            Node::Map(entries) => entries
                .iter_mut()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Insert or replace a map entry, keeping the original position on replace
    pub fn insert(&mut self, key: impl Into<String>, value: Node) -> bool {
        let key = key.into();
        match self {
            Node::Map(entries) => {
                if let Some(slot) = entries.iter_mut().find(|(k, _)| *k == key) {
                    slot.1 = value;
                } else {
                    entries.push((key, value));
                }
                true
            }
            _ => false,
        }
    }

    /// Remove a map entry, returning its value
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        match self {
            Node::Map(entries) => {
                let idx = entries.iter().position(|(k, _)| k == key)?;
                Some(entries.remove(idx).1)
            }
            _ => None,
        }
    }

    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            Node::Binary(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Node::Scalar(Scalar::Number(n)) => n.as_u64(),
            _ => None,
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Number(n) => n.serialize(serializer),
        }
    }
}

/// Binary leaves are written as lowercase hex strings
impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Binary(bytes) => serializer.serialize_str(&crate::hex_codec::encode(bytes)),
            Node::Scalar(s) => s.serialize(serializer),
            Node::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Node::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}
