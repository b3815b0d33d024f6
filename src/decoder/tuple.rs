//! Purpose: Fixed-size positional aggregation from several paths.
//! Exports: `Tuple`.
//! Role: Resolves each path independently and decodes every position with
//! one shared element configuration.
//! Invariants: An absent scope propagates per-element absence, not failure.
//! Invariants: A bound combining transform replaces the whole tuple.

use serde_json::Value;

use crate::decoder::scalar::Scalar;
use crate::decoder::{Combine, Decode};
use crate::node::XmlNode;

pub struct Tuple<I> {
    paths: Vec<String>,
    element: Scalar<I>,
    combine: Option<Combine<I>>,
}

impl<I> Tuple<I> {
    pub fn new(paths: Vec<String>, element: Scalar<I>, combine: Option<Combine<I>>) -> Self {
        Self {
            paths,
            element,
            combine,
        }
    }
}

impl<I> Decode<I> for Tuple<I> {
    fn decode(&self, instance: &I, node: Option<XmlNode<'_, '_>>) -> Value {
        let values: Vec<Value> = self
            .paths
            .iter()
            .map(|path| {
                let target = node.and_then(|node| node.find_one(path));
                self.element.decode(instance, target)
            })
            .collect();
        match &self.combine {
            Some(combine) => combine(instance, &values),
            None => Value::Array(values),
        }
    }
}
