//! Purpose: Path rescoping shim installed by `with`-scoped registration.
//! Exports: `ChildNodeProxy`.
//! Role: Relocates the scope node before delegating; contributes no key itself.
//! Invariants: An unresolved scope passes `None` through; the wrapped
//! decoder's own absence rule applies.

use serde_json::Value;

use crate::decoder::Decode;
use crate::node::XmlNode;

pub struct ChildNodeProxy<I> {
    path: String,
    inner: Box<dyn Decode<I>>,
}

impl<I> ChildNodeProxy<I> {
    pub fn new(path: impl Into<String>, inner: Box<dyn Decode<I>>) -> Self {
        Self {
            path: path.into(),
            inner,
        }
    }
}

impl<I> Decode<I> for ChildNodeProxy<I> {
    fn decode(&self, instance: &I, node: Option<XmlNode<'_, '_>>) -> Value {
        let child = node.and_then(|node| node.find_one(&self.path));
        self.inner.decode(instance, child)
    }
}

#[cfg(test)]
mod tests {
    use super::ChildNodeProxy;
    use crate::decoder::Decode;
    use crate::decoder::array::Array;
    use crate::decoder::scalar::{Kind, Scalar};
    use crate::node::{XmlNode, parse};
    use serde_json::{Value, json};

    #[test]
    fn rescopes_the_wrapped_decoder() {
        let doc = parse("<Root><Attributes><Age>25</Age></Attributes></Root>").expect("parse");
        let anchor = XmlNode::document_root(&doc).find_one("Root").expect("root");
        let scalar: Scalar<()> = Scalar::new("Age", Kind::Integer);
        let proxy = ChildNodeProxy::new("Attributes", Box::new(scalar));
        assert_eq!(proxy.decode(&(), Some(anchor)), json!(25));
    }

    #[test]
    fn unresolved_scope_defers_to_inner_absence_rule() {
        let doc = parse("<Root/>").expect("parse");
        let anchor = XmlNode::document_root(&doc).find_one("Root").expect("root");

        let scalar: Scalar<()> = Scalar::new("Age", Kind::Integer);
        let proxy = ChildNodeProxy::new("Attributes", Box::new(scalar));
        assert_eq!(proxy.decode(&(), Some(anchor)), Value::Null);

        let array: Array<()> = Array::new("Ids/Id", Box::new(Scalar::new(".", Kind::Integer)));
        let proxy = ChildNodeProxy::new("Attributes", Box::new(array));
        assert_eq!(proxy.decode(&(), Some(anchor)), json!([]));
    }
}
