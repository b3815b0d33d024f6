//! Purpose: Composable decode strategies executed against document nodes.
//! Exports: `Decode`, `Kind`, `Transform`, `Combine`, decoder variants.
//! Role: Leaf layer of the engine; each variant implements one decode strategy.
//! Invariants: Decoders hold no decode-time mutable state.
//! Invariants: The instance reference passes through containment unchanged.

pub mod array;
pub mod hash;
pub mod proxy;
pub mod scalar;
pub mod tuple;

pub use scalar::Kind;

use serde_json::Value;

use crate::node::XmlNode;

/// One decode strategy. `node` is the scope node currently in effect
/// (`None` models an absent scope); `instance` is the canonical instance
/// shared by every transform in the schema tree.
pub trait Decode<I>: Send + Sync {
    fn decode(&self, instance: &I, node: Option<XmlNode<'_, '_>>) -> Value;
}

/// Transform bound to a scalar field; receives the coerced value, which may
/// be `Value::Null` when the resolved node carries no text.
pub type Transform<I> = Box<dyn Fn(&I, Value) -> Value + Send + Sync>;

/// Combining transform bound to a tuple field; receives the positional
/// element values and replaces the whole tuple with its result.
pub type Combine<I> = Box<dyn Fn(&I, &[Value]) -> Value + Send + Sync>;
