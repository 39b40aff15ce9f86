//! Declarative codec for packed little-endian C-style records.
//!
//! A [`Schema`] describes a record layout: primitives, fixed-length arrays,
//! nested records and zero-width literals. [`compile`] turns it into an
//! immutable [`Model`], and [`Layout`] wraps a model with `size`, `parse` and
//! `dump`.
//!
//! Layouts whose dimensions depend on data are built in two phases: parse a
//! fixed header, then compile a second schema from the values just read.
//!
//! ```
//! use cstruct::primitive::{fixed_string, uint16};
//! use cstruct::schema::{field, record};
//! use cstruct::{Layout, Value};
//!
//! let head = Layout::new(record([field("name_length", uint16())])).unwrap();
//! let mut input: &[u8] = &[5, 0, b'h', b'e', b'l', b'l', b'o'];
//! let mut read = |n: usize| {
//!     let (chunk, rest) = input.split_at(n.min(input.len()));
//!     input = rest;
//!     Ok::<_, std::io::Error>(chunk.to_vec())
//! };
//!
//! let h = head.parse(&mut read).unwrap();
//! let len = h.get("name_length").and_then(Value::as_u64).unwrap() as usize;
//! let body = Layout::new(record([field("filename", fixed_string(len))])).unwrap();
//! let b = body.parse(&mut read).unwrap();
//! assert_eq!(b.get("filename"), Some(&Value::from("hello")));
//! ```

pub mod compile;
pub mod error;
pub mod layout;
pub mod model;
pub mod primitive;
pub mod schema;
pub mod value;
pub mod zip;

pub use compile::compile;
pub use error::{CodecError, CompileError, Result};
pub use layout::Layout;
pub use model::{ArrayModel, Field, Model, RecordModel};
pub use primitive::Primitive;
pub use schema::Schema;
pub use value::Value;
