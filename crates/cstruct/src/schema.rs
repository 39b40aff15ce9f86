//! Declarative, uncompiled record descriptions.
//!
//! A [`Schema`] is a tree whose leaves are primitives, literals or
//! already-compiled models. Record fields are an ordered list: the order of
//! the list is the order of the bytes.
//!
//! ```
//! use cstruct::primitive::{int32, int8};
//! use cstruct::schema::{array_of, field, record};
//!
//! let schema = record([
//!     field("a", int32()),
//!     field("b", int8()),
//!     field("c", array_of(int32(), 3)),
//! ]);
//! let model = cstruct::compile(&schema).unwrap();
//! assert_eq!(model.size(), 17);
//! ```

use crate::model::Model;
use crate::primitive::Primitive;
use crate::value::Value;

/// A schema node.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    Primitive(Primitive),
    /// `base` repeated exactly `count` times.
    Array { base: Box<Schema>, count: usize },
    Record(Vec<(String, Schema)>),
    /// A zero-width field that always decodes to this value.
    Literal(Value),
    /// A model compiled earlier, embedded as-is.
    Compiled(Model),
}

/// A fixed-length array of `base`.
pub fn array_of(base: impl Into<Schema>, count: usize) -> Schema {
    Schema::Array {
        base: Box::new(base.into()),
        count,
    }
}

/// A record whose fields are laid out in iteration order.
pub fn record<I>(fields: I) -> Schema
where
    I: IntoIterator<Item = (String, Schema)>,
{
    Schema::Record(fields.into_iter().collect())
}

/// A `(name, node)` pair for [`record`].
pub fn field(name: impl Into<String>, node: impl Into<Schema>) -> (String, Schema) {
    (name.into(), node.into())
}

/// A constant that shows up in decoded output without occupying bytes.
pub fn literal(value: impl Into<Value>) -> Schema {
    Schema::Literal(value.into())
}

impl From<Primitive> for Schema {
    fn from(p: Primitive) -> Self {
        Schema::Primitive(p)
    }
}

impl From<Model> for Schema {
    fn from(m: Model) -> Self {
        Schema::Compiled(m)
    }
}

impl From<Value> for Schema {
    fn from(v: Value) -> Self {
        Schema::Literal(v)
    }
}

impl From<Vec<(String, Schema)>> for Schema {
    fn from(fields: Vec<(String, Schema)>) -> Self {
        Schema::Record(fields)
    }
}
