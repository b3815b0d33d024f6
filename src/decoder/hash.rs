//! Purpose: Nested-object decoding through an embedded schema.
//! Exports: `Hash`.
//! Role: Anchors an embedded schema at a resolved child node.
//! Invariants: An absent anchor yields `Null`, not a map of absent fields;
//! only the top-level entry point always emits a map shape.
//! Invariants: The embedded schema reuses the caller's instance.

use serde_json::Value;

use crate::decoder::Decode;
use crate::node::XmlNode;
use crate::schema::Schema;

pub struct Hash<I> {
    path: String,
    schema: Schema<I>,
}

impl<I> Hash<I> {
    pub fn new(path: impl Into<String>, schema: Schema<I>) -> Self {
        Self {
            path: path.into(),
            schema,
        }
    }
}

impl<I: 'static> Decode<I> for Hash<I> {
    fn decode(&self, instance: &I, node: Option<XmlNode<'_, '_>>) -> Value {
        match node.and_then(|node| node.find_one(&self.path)) {
            None => Value::Null,
            Some(anchor) => Value::Object(self.schema.decode_within(instance, Some(anchor))),
        }
    }
}
