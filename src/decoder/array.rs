//! Purpose: Zero-or-more repetition of an inner decoder over matched nodes.
//! Exports: `Array`.
//! Role: Collects one value per matched node, in document order.
//! Invariants: An absent scope yields an empty array, never `Null`.

use serde_json::Value;

use crate::decoder::Decode;
use crate::node::XmlNode;

pub struct Array<I> {
    path: String,
    inner: Box<dyn Decode<I>>,
}

impl<I> Array<I> {
    pub fn new(path: impl Into<String>, inner: Box<dyn Decode<I>>) -> Self {
        Self {
            path: path.into(),
            inner,
        }
    }
}

impl<I> Decode<I> for Array<I> {
    fn decode(&self, instance: &I, node: Option<XmlNode<'_, '_>>) -> Value {
        let Some(scope) = node else {
            return Value::Array(Vec::new());
        };
        let items = scope
            .find_all(&self.path)
            .into_iter()
            .map(|child| self.inner.decode(instance, Some(child)))
            .collect();
        Value::Array(items)
    }
}

#[cfg(test)]
mod tests {
    use super::Array;
    use crate::decoder::Decode;
    use crate::decoder::scalar::{Kind, Scalar};
    use crate::node::{XmlNode, parse};
    use serde_json::json;

    fn badge_array() -> Array<()> {
        let element = Scalar::new(".", Kind::Integer);
        Array::new("Root/Ids/Id", Box::new(element))
    }

    #[test]
    fn collects_values_in_match_order() {
        let doc =
            parse("<Root><Ids><Id>1</Id><Id>3</Id><Id>7</Id></Ids></Root>").expect("parse");
        let root = XmlNode::document_root(&doc);
        assert_eq!(badge_array().decode(&(), Some(root)), json!([1, 3, 7]));
    }

    #[test]
    fn absent_scope_yields_empty_array() {
        assert_eq!(badge_array().decode(&(), None), json!([]));
    }

    #[test]
    fn unmatched_path_yields_empty_array() {
        let doc = parse("<Root/>").expect("parse");
        let root = XmlNode::document_root(&doc);
        assert_eq!(badge_array().decode(&(), Some(root)), json!([]));
    }
}
