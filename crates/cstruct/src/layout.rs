//! The public entry point: a compiled layout with size, parse and dump.

use std::io;

use cstruct_buffers::{View, ViewMut};

use crate::compile::compile;
use crate::error::{CodecError, CompileError, Result};
use crate::model::Model;
use crate::schema::Schema;
use crate::value::Value;

/// A compiled record layout.
///
/// # Example
///
/// ```
/// use cstruct::primitive::{fixed_string, uint16};
/// use cstruct::schema::{field, record};
/// use cstruct::{Layout, Value};
///
/// let sig = Layout::new(record([
///     field("pk", fixed_string(2)),
///     field("type", uint16()),
/// ]))
/// .unwrap();
///
/// let value = Value::record([("pk", Value::from("PK")), ("type", Value::from(0x0403u16))]);
/// let bytes = sig.dump(&value).unwrap();
/// assert_eq!(bytes, vec![0x50, 0x4B, 0x03, 0x04]);
/// assert_eq!(sig.parse_bytes(&bytes).unwrap(), value);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    model: Model,
}

impl Layout {
    /// Compiles `schema`.
    pub fn new(schema: impl Into<Schema>) -> Result<Self, CompileError> {
        let model = compile(&schema.into())?;
        Ok(Self { model })
    }

    pub fn from_model(model: Model) -> Self {
        Self { model }
    }

    /// Total byte footprint of the layout.
    pub fn size(&self) -> usize {
        self.model.size()
    }

    /// The compiled tree, for embedding into other schemas.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Calls `read` once with [`Layout::size`] and decodes what it returns.
    ///
    /// A buffer shorter than the layout fails with [`CodecError::ShortRead`];
    /// retrying is up to the read function. Bytes past the layout are ignored.
    pub fn parse<F, B>(&self, read: F) -> Result<Value>
    where
        F: FnOnce(usize) -> io::Result<B>,
        B: AsRef<[u8]>,
    {
        let buffer = read(self.size())?;
        self.parse_bytes(buffer.as_ref())
    }

    /// Decodes a record from the start of `bytes`.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Value> {
        let size = self.size();
        if bytes.len() < size {
            return Err(CodecError::ShortRead {
                expected: size,
                actual: bytes.len(),
            });
        }
        if bytes.len() > size {
            tracing::debug!(size, supplied = bytes.len(), "ignoring trailing bytes");
        }
        tracing::trace!(size, "parsing record");
        self.model.parse(&View::new(&bytes[..size]), 0)
    }

    /// Encodes `value` into a fresh buffer of exactly [`Layout::size`] bytes.
    ///
    /// Nothing is returned on failure, so partial writes never escape.
    pub fn dump(&self, value: &Value) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; self.size()];
        tracing::trace!(size = buffer.len(), "dumping record");
        self.model.dump(value, &mut ViewMut::new(&mut buffer), 0)?;
        Ok(buffer)
    }
}

impl From<Layout> for Schema {
    fn from(layout: Layout) -> Self {
        Schema::Compiled(layout.model)
    }
}

impl From<Layout> for Model {
    fn from(layout: Layout) -> Self {
        layout.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{int8, uint32};
    use crate::schema::{field, record};
    use std::cell::Cell;

    fn pair() -> Layout {
        Layout::new(record([field("a", int8()), field("b", uint32())])).unwrap()
    }

    #[test]
    fn read_is_called_once_with_size() {
        let calls = Cell::new(0);
        let v = pair()
            .parse(|n| {
                calls.set(calls.get() + 1);
                assert_eq!(n, 5);
                Ok(vec![0xFF, 1, 0, 0, 0])
            })
            .unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!(v, Value::record([("a", Value::from(-1i8)), ("b", Value::from(1u32))]));
    }

    #[test]
    fn short_read() {
        let err = pair().parse(|_| Ok([0u8; 3])).unwrap_err();
        assert!(matches!(
            err,
            CodecError::ShortRead {
                expected: 5,
                actual: 3
            }
        ));
    }

    #[test]
    fn read_error_is_propagated() {
        let err = pair()
            .parse(|_| Err::<Vec<u8>, _>(io::Error::new(io::ErrorKind::BrokenPipe, "closed")))
            .unwrap_err();
        assert!(matches!(err, CodecError::Read(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let v = pair().parse_bytes(&[1, 2, 0, 0, 0, 9, 9]).unwrap();
        assert_eq!(v.get("b"), Some(&Value::from(2u32)));
    }

    #[test]
    fn dump_has_exact_size() {
        let bytes = pair()
            .dump(&Value::record([("a", Value::from(1i8)), ("b", Value::from(2u32))]))
            .unwrap();
        assert_eq!(bytes, vec![1, 2, 0, 0, 0]);
    }

    #[test]
    fn layout_embeds_as_schema() {
        let outer = Layout::new(record([field("head", pair()), field("tail", int8())])).unwrap();
        assert_eq!(outer.size(), 6);
        assert_eq!(outer.model().field_offset("tail"), Some(5));
    }
}
