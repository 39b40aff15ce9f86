//! Byte-level access primitives for cstruct.
//!
//! # Overview
//!
//! - [`View`] - Reads little-endian fixed-width values at absolute offsets
//! - [`ViewMut`] - Writes little-endian fixed-width values at absolute offsets
//! - [`Reader`] - Hands out consecutive chunks of a blob, one read at a time
//!
//! Every access is bounds checked and reports [`BufferError::OutOfRange`]
//! instead of panicking.
//!
//! # Example
//!
//! ```
//! use cstruct_buffers::{View, ViewMut};
//!
//! let mut data = [0u8; 6];
//! let mut view = ViewMut::new(&mut data);
//! view.set_u16(0, 0x0403).unwrap();
//! view.set_u32(2, 0xDEADBEEF).unwrap();
//! assert_eq!(data, [0x03, 0x04, 0xEF, 0xBE, 0xAD, 0xDE]);
//!
//! let view = View::new(&data);
//! assert_eq!(view.get_u16(0).unwrap(), 0x0403);
//! assert!(view.get_u32(4).is_err());
//! ```

mod reader;
mod strings;
mod view;

pub use reader::Reader;
pub use strings::{latin1_decode, latin1_units, ucs2_decode, ucs2_units};
pub use view::{View, ViewMut};

/// Error type for buffer operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// Attempted to access `width` bytes at `offset` in a buffer of `len` bytes.
    OutOfRange {
        offset: usize,
        width: usize,
        len: usize,
    },
}

impl std::fmt::Display for BufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferError::OutOfRange { offset, width, len } => write!(
                f,
                "access of {width} byte(s) at offset {offset} is out of range for buffer of {len} byte(s)"
            ),
        }
    }
}

impl std::error::Error for BufferError {}
