//! Purpose: Leaf-value decoding with type coercion and optional transform.
//! Exports: `Scalar`, `Kind`.
//! Role: Decodes one node's text into a typed JSON value.
//! Invariants: An unresolved target is absent and the transform does not run.
//! Invariants: A resolved target with no text coerces to absent; the transform still runs.
//! Invariants: Numeric coercion is a best-effort leading-prefix parse, never an error.

use serde_json::{Number, Value};

use crate::decoder::{Decode, Transform};
use crate::node::XmlNode;

/// Target type for scalar coercion. Booleans are `true` only for the exact
/// texts `"true"` and `"1"`; an absent source stays absent, so absence and
/// `false` remain distinguishable.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Kind {
    String,
    Integer,
    Float,
    Boolean,
}

pub struct Scalar<I> {
    path: String,
    kind: Kind,
    transform: Option<Transform<I>>,
}

impl<I> Scalar<I> {
    pub fn new(path: impl Into<String>, kind: Kind) -> Self {
        Self {
            path: path.into(),
            kind,
            transform: None,
        }
    }

    pub fn with_transform(mut self, transform: Transform<I>) -> Self {
        self.transform = Some(transform);
        self
    }
}

impl<I> Decode<I> for Scalar<I> {
    fn decode(&self, instance: &I, node: Option<XmlNode<'_, '_>>) -> Value {
        let Some(target) = node.and_then(|node| node.find_one(&self.path)) else {
            return Value::Null;
        };
        let value = match target.text_value() {
            Some(text) => coerce(self.kind, &text),
            None => Value::Null,
        };
        match &self.transform {
            Some(transform) => transform(instance, value),
            None => value,
        }
    }
}

fn coerce(kind: Kind, text: &str) -> Value {
    match kind {
        Kind::String => Value::String(text.to_string()),
        Kind::Integer => Value::Number(Number::from(lenient_i64(text))),
        Kind::Float => Number::from_f64(lenient_f64(text))
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Kind::Boolean => Value::Bool(text == "true" || text == "1"),
    }
}

// Coercion policy: parse the longest leading numeric prefix after leading
// whitespace; anything unparseable (or non-finite) yields zero.
fn lenient_i64(text: &str) -> i64 {
    numeric_prefix(text.trim_start(), false).parse().unwrap_or(0)
}

fn lenient_f64(text: &str) -> f64 {
    let parsed: f64 = numeric_prefix(text.trim_start(), true)
        .parse()
        .unwrap_or(0.0);
    if parsed.is_finite() { parsed } else { 0.0 }
}

fn numeric_prefix(text: &str, fractional: bool) -> &str {
    let bytes = text.as_bytes();
    let mut end = 0;
    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return "";
    }
    if !fractional {
        return &text[..end];
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            end = frac_end;
        }
    }
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::{Kind, Scalar, coerce, lenient_f64, lenient_i64};
    use crate::decoder::Decode;
    use crate::node::{XmlNode, parse};
    use serde_json::{Value, json};

    #[test]
    fn integer_coercion_is_best_effort() {
        assert_eq!(lenient_i64("42"), 42);
        assert_eq!(lenient_i64("  -7"), -7);
        assert_eq!(lenient_i64("5.7"), 5);
        assert_eq!(lenient_i64("12abc"), 12);
        assert_eq!(lenient_i64("abc"), 0);
        assert_eq!(lenient_i64(""), 0);
    }

    #[test]
    fn float_coercion_is_best_effort() {
        assert_eq!(lenient_f64("5.7"), 5.7);
        assert_eq!(lenient_f64("-0.5units"), -0.5);
        assert_eq!(lenient_f64("1e3"), 1000.0);
        assert_eq!(lenient_f64("3."), 3.0);
        assert_eq!(lenient_f64("nope"), 0.0);
        assert_eq!(lenient_f64("1e9999"), 0.0);
    }

    #[test]
    fn boolean_coercion_accepts_exact_true_tokens_only() {
        assert_eq!(coerce(Kind::Boolean, "true"), json!(true));
        assert_eq!(coerce(Kind::Boolean, "1"), json!(true));
        assert_eq!(coerce(Kind::Boolean, "TRUE"), json!(false));
        assert_eq!(coerce(Kind::Boolean, "yes"), json!(false));
        assert_eq!(coerce(Kind::Boolean, ""), json!(false));
    }

    #[test]
    fn absent_target_skips_the_transform() {
        let doc = parse("<Root/>").expect("parse");
        let root = XmlNode::document_root(&doc);
        let scalar: Scalar<()> = Scalar::new("Root/Missing", Kind::Boolean)
            .with_transform(Box::new(|_, _| json!("transform ran")));
        assert_eq!(scalar.decode(&(), Some(root)), Value::Null);
    }

    #[test]
    fn transform_runs_on_textless_target() {
        let doc = parse("<Root><Empty/></Root>").expect("parse");
        let root = XmlNode::document_root(&doc);
        let scalar: Scalar<()> = Scalar::new("Root/Empty", Kind::String)
            .with_transform(Box::new(|_, value| match value {
                Value::Null => json!("was absent"),
                other => other,
            }));
        assert_eq!(scalar.decode(&(), Some(root)), json!("was absent"));
    }

    #[test]
    fn absent_boolean_stays_distinct_from_false() {
        let doc = parse("<Root><Flag>false</Flag></Root>").expect("parse");
        let root = XmlNode::document_root(&doc);
        let present: Scalar<()> = Scalar::new("Root/Flag", Kind::Boolean);
        let missing: Scalar<()> = Scalar::new("Root/Other", Kind::Boolean);
        assert_eq!(present.decode(&(), Some(root)), json!(false));
        assert_eq!(missing.decode(&(), Some(root)), Value::Null);
    }

    #[test]
    fn attribute_value_is_read_directly() {
        let doc = parse(r#"<Root><Item code="7x"/></Root>"#).expect("parse");
        let root = XmlNode::document_root(&doc);
        let scalar: Scalar<()> = Scalar::new("Root/Item/@code", Kind::Integer);
        assert_eq!(scalar.decode(&(), Some(root)), json!(7));
    }
}
