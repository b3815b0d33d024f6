//! Purpose: Declarative XML-to-JSON extraction schemas.
//! Exports: `Schema`, `SchemaBuilder`, declaration option structs, `decoder`, `node`, `error`.
//! Role: Library crate; a schema is declared once and run against any number of documents.
//! Invariants: Decoding is total for a well-formed schema; absence is `Value::Null`, never an error.
//! Invariants: Every transform in a schema tree runs against the caller's single instance reference.

pub mod decoder;
pub mod error;
pub mod infer;
pub mod node;
pub mod schema;

pub use decoder::{Decode, Kind};
pub use error::{Error, ErrorKind};
pub use node::{Document, XmlNode, parse};
pub use schema::{HashOptions, ScalarOptions, Schema, SchemaBuilder, TupleOptions};
