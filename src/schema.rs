//! Purpose: Schema declaration surface and top-level decode orchestration.
//! Exports: `Schema`, `SchemaBuilder`, `ScalarOptions`, `TupleOptions`, `HashOptions`.
//! Role: Builder layer that accumulates keyed decoders, resolves key and
//! plural-path inference, and runs a finished schema against documents.
//! Invariants: All inference and validation happens at definition time.
//! Invariants: A finished schema is immutable and holds no decode-time state.
//! Invariants: The top-level decode always returns a map, even when the
//! schema root cannot be resolved.

use std::fmt;

use serde_json::{Map, Value};

use crate::decoder::scalar::Scalar;
use crate::decoder::{Combine, Decode, Kind, Transform, array, hash, proxy, tuple};
use crate::error::{Error, ErrorKind};
use crate::infer::{infer_key, infer_plural_path};
use crate::node::{Document, XmlNode};

/// Immutable, declaration-ordered, key-unique set of decoders plus a root
/// path. Built once via [`Schema::build`] and safe to share across threads.
///
/// `I` is the canonical instance type: every transform declared anywhere in
/// the schema tree is called with the same `&I` the decode invocation was
/// given, however deeply the declaring field is nested.
pub struct Schema<I> {
    root: String,
    fields: Vec<(String, Box<dyn Decode<I>>)>,
}

impl<I: 'static> Schema<I> {
    /// Run a declaration body against a fresh builder. Fails fast on the
    /// first definition error (duplicate key, conflicting transforms).
    pub fn build(
        body: impl FnOnce(&mut SchemaBuilder<I>) -> Result<(), Error>,
    ) -> Result<Self, Error> {
        let mut builder = SchemaBuilder::new();
        body(&mut builder)?;
        Ok(builder.finish())
    }

    /// Decode one document. Always returns a mapping containing every
    /// declared key; when the root path resolves to nothing, each field
    /// falls back to its own absence rule (scalars/tuples/hashes to `Null`,
    /// arrays to `[]`).
    pub fn decode(&self, instance: &I, document: &Document<'_>) -> Map<String, Value> {
        self.decode_within(instance, Some(XmlNode::document_root(document)))
    }

    pub(crate) fn decode_within(
        &self,
        instance: &I,
        node: Option<XmlNode<'_, '_>>,
    ) -> Map<String, Value> {
        let scope = node.and_then(|node| node.find_one(&self.root));
        let mut out = Map::new();
        for (key, decoder) in &self.fields {
            out.insert(key.clone(), decoder.decode(instance, scope));
        }
        out
    }
}

impl<I> fmt::Debug for Schema<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.fields.iter().map(|(key, _)| key.as_str()).collect();
        f.debug_struct("Schema")
            .field("root", &self.root)
            .field("keys", &keys)
            .finish()
    }
}

/// Options for `scalar`/`scalars` declarations: target type, key override,
/// explicit repeated-child path (plural forms only), and transform.
pub struct ScalarOptions<I> {
    kind: Kind,
    key: Option<String>,
    items: Option<String>,
    transform: Option<Transform<I>>,
    transform_conflict: bool,
}

impl<I> ScalarOptions<I> {
    pub fn of(kind: Kind) -> Self {
        Self {
            kind,
            key: None,
            items: None,
            transform: None,
            transform_conflict: false,
        }
    }

    pub fn string() -> Self {
        Self::of(Kind::String)
    }

    pub fn integer() -> Self {
        Self::of(Kind::Integer)
    }

    pub fn float() -> Self {
        Self::of(Kind::Float)
    }

    pub fn boolean() -> Self {
        Self::of(Kind::Boolean)
    }

    /// Override the inferred output key.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Explicit repeated-child path for `scalars`, bypassing plural-path
    /// inference. Declaring this on a singular field is a definition error.
    pub fn items(mut self, path: impl Into<String>) -> Self {
        self.items = Some(path.into());
        self
    }

    /// Bind a transform. The transform runs with the canonical instance and
    /// the coerced value, which may be `Null`. Binding twice is a
    /// definition error.
    pub fn transform(mut self, f: impl Fn(&I, Value) -> Value + Send + Sync + 'static) -> Self {
        if self.transform.is_some() {
            self.transform_conflict = true;
        }
        self.transform = Some(Box::new(f));
        self
    }

    fn check_conflicts(&self, path: &str) -> Result<(), Error> {
        if self.transform_conflict {
            return Err(Error::new(ErrorKind::Usage)
                .with_message("transform bound more than once")
                .with_path(path));
        }
        Ok(())
    }
}

impl<I> Default for ScalarOptions<I> {
    fn default() -> Self {
        Self::string()
    }
}

/// Options for `tuple` declarations: shared element type and the optional
/// combining transform.
pub struct TupleOptions<I> {
    kind: Kind,
    combine: Option<Combine<I>>,
    combine_conflict: bool,
}

impl<I> TupleOptions<I> {
    pub fn of(kind: Kind) -> Self {
        Self {
            kind,
            combine: None,
            combine_conflict: false,
        }
    }

    pub fn string() -> Self {
        Self::of(Kind::String)
    }

    pub fn integer() -> Self {
        Self::of(Kind::Integer)
    }

    pub fn float() -> Self {
        Self::of(Kind::Float)
    }

    pub fn boolean() -> Self {
        Self::of(Kind::Boolean)
    }

    /// Bind the combining transform; its result replaces the whole tuple.
    /// Binding twice is a definition error.
    pub fn combine(mut self, f: impl Fn(&I, &[Value]) -> Value + Send + Sync + 'static) -> Self {
        if self.combine.is_some() {
            self.combine_conflict = true;
        }
        self.combine = Some(Box::new(f));
        self
    }
}

impl<I> Default for TupleOptions<I> {
    fn default() -> Self {
        Self::string()
    }
}

/// Options for `hash`/`hashes` declarations: key override and (for `hashes`)
/// an explicit repeated-child path.
#[derive(Clone, Debug, Default)]
pub struct HashOptions {
    key: Option<String>,
    items: Option<String>,
}

impl HashOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn items(mut self, path: impl Into<String>) -> Self {
        self.items = Some(path.into());
        self
    }
}

/// Accumulates keyed decoders for one schema. Obtained through
/// [`Schema::build`] and the nested declaration bodies.
pub struct SchemaBuilder<I> {
    root: String,
    fields: Vec<(String, Box<dyn Decode<I>>)>,
}

impl<I: 'static> SchemaBuilder<I> {
    fn new() -> Self {
        Self {
            root: ".".to_string(),
            fields: Vec::new(),
        }
    }

    /// Root path applied once, before any decoder runs, to relocate the
    /// effective starting node. Defaults to `"."`.
    pub fn set_root(&mut self, path: impl Into<String>) {
        self.root = path.into();
    }

    /// Declare a single leaf field. The key is inferred from the path
    /// unless overridden.
    pub fn scalar(&mut self, path: &str, options: ScalarOptions<I>) -> Result<(), Error> {
        options.check_conflicts(path)?;
        if options.items.is_some() {
            return Err(Error::new(ErrorKind::Usage)
                .with_message("items path only applies to plural declarations")
                .with_path(path));
        }
        let key = options.key.unwrap_or_else(|| infer_key(path));
        let mut decoder = Scalar::new(path, options.kind);
        if let Some(transform) = options.transform {
            decoder = decoder.with_transform(transform);
        }
        self.add_decoder(key, Box::new(decoder))
    }

    /// Declare a repeated leaf field. `path` addresses the repeating parent
    /// container; the repeated-child path is inferred by singularizing its
    /// last segment unless `options.items` supplies it explicitly. A bound
    /// transform runs once per matched element.
    pub fn scalars(&mut self, path: &str, options: ScalarOptions<I>) -> Result<(), Error> {
        options.check_conflicts(path)?;
        let key = options.key.unwrap_or_else(|| infer_key(path));
        let items = options.items.unwrap_or_else(|| infer_plural_path(path));
        let mut element = Scalar::new(".", options.kind);
        if let Some(transform) = options.transform {
            element = element.with_transform(transform);
        }
        let decoder = array::Array::new(items, Box::new(element));
        self.add_decoder(key, Box::new(decoder))
    }

    /// Declare a fixed-size positional field over several paths. The key is
    /// always explicit; element positions share one type.
    pub fn tuple(
        &mut self,
        paths: &[&str],
        key: &str,
        options: TupleOptions<I>,
    ) -> Result<(), Error> {
        if options.combine_conflict {
            return Err(Error::new(ErrorKind::Usage)
                .with_message("combining transform bound more than once")
                .with_key(key));
        }
        let paths = paths.iter().map(|path| (*path).to_string()).collect();
        let element = Scalar::new(".", options.kind);
        let decoder = tuple::Tuple::new(paths, element, options.combine);
        self.add_decoder(key.to_string(), Box::new(decoder))
    }

    /// Declare a nested object anchored at `path`, described by an embedded
    /// schema built from `body`.
    pub fn hash(
        &mut self,
        path: &str,
        options: HashOptions,
        body: impl FnOnce(&mut SchemaBuilder<I>) -> Result<(), Error>,
    ) -> Result<(), Error> {
        if options.items.is_some() {
            return Err(Error::new(ErrorKind::Usage)
                .with_message("items path only applies to plural declarations")
                .with_path(path));
        }
        let key = options.key.unwrap_or_else(|| infer_key(path));
        let mut nested = SchemaBuilder::new();
        body(&mut nested)?;
        let decoder = hash::Hash::new(path, nested.finish());
        self.add_decoder(key, Box::new(decoder))
    }

    /// Declare a repeated nested object. Plural-path inference follows the
    /// same rule as `scalars`.
    pub fn hashes(
        &mut self,
        path: &str,
        options: HashOptions,
        body: impl FnOnce(&mut SchemaBuilder<I>) -> Result<(), Error>,
    ) -> Result<(), Error> {
        let key = options.key.unwrap_or_else(|| infer_key(path));
        let items = options.items.unwrap_or_else(|| infer_plural_path(path));
        let mut nested = SchemaBuilder::new();
        body(&mut nested)?;
        let singular = hash::Hash::new(".", nested.finish());
        let decoder = array::Array::new(items, Box::new(singular));
        self.add_decoder(key, Box::new(decoder))
    }

    /// Scoped registration: every decoder declared in `body` is wrapped in
    /// a path-rescoping proxy and merged into this builder's namespace.
    /// `with` nests path resolution only; it introduces no output nesting.
    pub fn with(
        &mut self,
        path: &str,
        body: impl FnOnce(&mut SchemaBuilder<I>) -> Result<(), Error>,
    ) -> Result<(), Error> {
        let mut scoped = SchemaBuilder::new();
        body(&mut scoped)?;
        for (key, decoder) in scoped.fields {
            self.add_decoder(key, Box::new(proxy::ChildNodeProxy::new(path, decoder)))?;
        }
        Ok(())
    }

    fn add_decoder(&mut self, key: String, decoder: Box<dyn Decode<I>>) -> Result<(), Error> {
        if self.fields.iter().any(|(existing, _)| *existing == key) {
            return Err(Error::new(ErrorKind::Usage)
                .with_message("decoder already registered for key")
                .with_key(key));
        }
        self.fields.push((key, decoder));
        Ok(())
    }

    fn finish(self) -> Schema<I> {
        Schema {
            root: self.root,
            fields: self.fields,
        }
    }
}
