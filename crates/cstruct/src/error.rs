//! Error types for schema compilation and record encoding/decoding.

use cstruct_buffers::BufferError;
use thiserror::Error;

/// Errors raised while turning a schema into a model.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("duplicate field `{0}` in record")]
    DuplicateField(String),
    #[error("layout size overflows usize")]
    SizeOverflow,
}

/// Errors raised by parse and dump.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A dumped value does not fit the target primitive.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// The read function supplied fewer bytes than the layout needs.
    #[error("short read: expected {expected} byte(s), got {actual}")]
    ShortRead { expected: usize, actual: usize },
    #[error(transparent)]
    OutOfRange(#[from] BufferError),
    /// A dumped value is missing a record field or array element.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
    /// The input uses a feature this codec does not handle.
    #[error("unsupported: {0}")]
    Unsupported(String),
    #[error("read failed: {0}")]
    Read(#[from] std::io::Error),
    #[error(transparent)]
    Compile(#[from] CompileError),
}

pub type Result<T, E = CodecError> = std::result::Result<T, E>;
