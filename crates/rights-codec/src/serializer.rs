//! Structural serializer: `base64(JSON-with-hex-leaves)`
//!
//! Write path: walk the [`Node`] tree, emit binary leaves as hex strings,
//! serialize to JSON text, wrap with the configured [`TextEncoder`].
//!
//! Read path: unwrap the transport layer, parse JSON, and revive every
//! string as a hex-encoded binary leaf. Numbers, booleans and nulls pass
//! through at their original position; map order is preserved.

use crate::error::{CodecError, CodecResult};
use crate::hex_codec;
use crate::text_encoder::TextEncoder;
use crate::tree::{Node, Scalar};
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::Number;
use std::fmt;

/// Converts primitive structures to and from transport strings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StructuralSerializer {
    encoder: TextEncoder,
}

impl StructuralSerializer {
    pub fn new(encoder: TextEncoder) -> Self {
        Self { encoder }
    }

    pub fn encoder(&self) -> &TextEncoder {
        &self.encoder
    }

    pub fn stringify(&self, value: &Node) -> CodecResult<String> {
        let json = serde_json::to_vec(value)?;
        Ok(self.encoder.encode(&json))
    }

    pub fn parse(&self, transport: &str) -> CodecResult<Node> {
        let json = self.encoder.decode(transport)?;
        let wire: Wire = serde_json::from_slice(&json)?;
        revive(wire)
    }
}

/// JSON as parsed, before string leaves are revived as binary
enum Wire {
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    List(Vec<Wire>),
    Map(Vec<(String, Wire)>),
}

fn revive(wire: Wire) -> CodecResult<Node> {
    Ok(match wire {
        Wire::Null => Node::Scalar(Scalar::Null),
        Wire::Bool(b) => Node::Scalar(Scalar::Bool(b)),
        Wire::Number(n) => Node::Scalar(Scalar::Number(n)),
        Wire::Text(s) => Node::Binary(hex_codec::decode(&s)?),
        Wire::List(items) => Node::List(
            items
                .into_iter()
                .map(revive)
                .collect::<Result<_, CodecError>>()?,
        ),
        Wire::Map(entries) => Node::Map(
            entries
                .into_iter()
                .map(|(k, v)| revive(v).map(|node| (k, node)))
                .collect::<Result<_, CodecError>>()?,
        ),
    })
}

impl<'de> Deserialize<'de> for Wire {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(WireVisitor)
    }
}

struct WireVisitor;

impl<'de> Visitor<'de> for WireVisitor {
    type Value = Wire;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Wire, E> {
        Ok(Wire::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Wire, E> {
        Ok(Wire::Null)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Wire, E> {
        Ok(Wire::Bool(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Wire, E> {
        Ok(Wire::Number(v.into()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Wire, E> {
        Ok(Wire::Number(v.into()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Wire, E> {
        Number::from_f64(v)
            .map(Wire::Number)
            .ok_or_else(|| E::custom("non-finite number"))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Wire, E> {
        Ok(Wire::Text(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Wire, E> {
        Ok(Wire::Text(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Wire, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Wire::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Wire, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((k, v)) = map.next_entry::<String, Wire>()? {
            entries.push((k, v));
        }
        Ok(Wire::Map(entries))
    }
}
