//! Compiled layouts and the parse/dump engines.
//!
//! A [`Model`] is immutable once built. Children sit behind [`Arc`], so
//! cloning a model or sharing it across threads is cheap. Offsets are passed
//! down the recursion by value; nothing keeps a cursor between calls.

use std::collections::HashSet;
use std::sync::Arc;

use cstruct_buffers::{View, ViewMut};

use crate::error::{CodecError, CompileError, Result};
use crate::primitive::Primitive;
use crate::value::Value;

/// A compiled schema node.
#[derive(Debug, Clone, PartialEq)]
pub enum Model {
    Scalar(Primitive),
    Array(ArrayModel),
    Record(RecordModel),
    /// Zero bytes on the wire. Parses to the literal, dumps nothing.
    Constant(Value),
}

/// `count` consecutive elements of one base model.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayModel {
    base: Arc<Model>,
    count: usize,
    size: usize,
}

/// Named fields packed back to back with no padding.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordModel {
    fields: Arc<[Field]>,
    size: usize,
}

/// A record field and its byte offset from the start of the record.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub offset: usize,
    pub model: Model,
}

impl ArrayModel {
    pub fn base(&self) -> &Model {
        &self.base
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl RecordModel {
    /// Fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl Model {
    /// Builds an array model. Fails when `base.size() * count` overflows.
    pub fn array(base: Model, count: usize) -> Result<Self, CompileError> {
        let size = base
            .size()
            .checked_mul(count)
            .ok_or(CompileError::SizeOverflow)?;
        Ok(Model::Array(ArrayModel {
            base: Arc::new(base),
            count,
            size,
        }))
    }

    /// Builds a record model, assigning each field the offset right after the
    /// previous one.
    pub fn record(fields: Vec<(String, Model)>) -> Result<Self, CompileError> {
        let mut seen = HashSet::with_capacity(fields.len());
        let mut offset = 0usize;
        let mut laid_out = Vec::with_capacity(fields.len());
        for (name, model) in fields {
            if !seen.insert(name.clone()) {
                return Err(CompileError::DuplicateField(name));
            }
            let next = offset
                .checked_add(model.size())
                .ok_or(CompileError::SizeOverflow)?;
            laid_out.push(Field {
                name,
                offset,
                model,
            });
            offset = next;
        }
        Ok(Model::Record(RecordModel {
            fields: laid_out.into(),
            size: offset,
        }))
    }

    /// Number of bytes this model occupies. Depends only on the model.
    pub fn size(&self) -> usize {
        match self {
            Model::Scalar(p) => p.size(),
            Model::Array(a) => a.size,
            Model::Record(r) => r.size,
            Model::Constant(_) => 0,
        }
    }

    /// Byte offset of a top-level record field.
    pub fn field_offset(&self, name: &str) -> Option<usize> {
        match self {
            Model::Record(r) => r.field(name).map(|f| f.offset),
            _ => None,
        }
    }

    /// Decodes the bytes at `offset`.
    ///
    /// The view must hold at least `offset + self.size()` bytes; a shorter
    /// view fails with [`CodecError::OutOfRange`].
    pub fn parse(&self, view: &View<'_>, offset: usize) -> Result<Value> {
        match self {
            Model::Scalar(p) => p.parse(view, offset),
            Model::Array(a) => {
                let step = a.base.size();
                let mut items = Vec::with_capacity(a.count);
                for i in 0..a.count {
                    items.push(a.base.parse(view, offset.saturating_add(i * step))?);
                }
                Ok(Value::Array(items))
            }
            Model::Record(r) => {
                let mut out = indexmap::IndexMap::with_capacity(r.fields.len());
                for f in r.fields.iter() {
                    let v = f.model.parse(view, offset.saturating_add(f.offset))?;
                    out.insert(f.name.clone(), v);
                }
                Ok(Value::Record(out))
            }
            Model::Constant(v) => Ok(v.clone()),
        }
    }

    /// Encodes `value` at `offset`, touching only `offset..offset + self.size()`.
    ///
    /// On error, bytes written before the failing field stay in the buffer.
    /// Extra array elements and unknown record fields are ignored. Constant
    /// fields need not be present in `value`.
    pub fn dump(&self, value: &Value, view: &mut ViewMut<'_>, offset: usize) -> Result<()> {
        match self {
            Model::Scalar(p) => p.dump(value, view, offset),
            Model::Array(a) => {
                let items = value.as_array().ok_or_else(|| {
                    CodecError::ShapeMismatch(format!("expected array, found {}", value.kind()))
                })?;
                let step = a.base.size();
                for i in 0..a.count {
                    let item = items.get(i).ok_or_else(|| {
                        CodecError::ShapeMismatch(format!(
                            "array has {} element(s), layout needs {}",
                            items.len(),
                            a.count
                        ))
                    })?;
                    a.base.dump(item, view, offset.saturating_add(i * step))?;
                }
                Ok(())
            }
            Model::Record(r) => {
                let fields = value.as_record().ok_or_else(|| {
                    CodecError::ShapeMismatch(format!("expected record, found {}", value.kind()))
                })?;
                for f in r.fields.iter() {
                    if let Model::Constant(_) = f.model {
                        continue;
                    }
                    let v = fields.get(&f.name).ok_or_else(|| {
                        CodecError::ShapeMismatch(format!("missing field `{}`", f.name))
                    })?;
                    f.model.dump(v, view, offset.saturating_add(f.offset))?;
                }
                Ok(())
            }
            Model::Constant(_) => Ok(()),
        }
    }
}
