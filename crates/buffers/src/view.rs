//! Offset-addressed little-endian views over byte slices.

use crate::BufferError;

#[inline]
fn range(offset: usize, width: usize, len: usize) -> Result<std::ops::Range<usize>, BufferError> {
    match offset.checked_add(width) {
        Some(end) if end <= len => Ok(offset..end),
        _ => Err(BufferError::OutOfRange { offset, width, len }),
    }
}

macro_rules! getters {
    ($($name:ident => $ty:ty),* $(,)?) => {
        $(
            #[doc = concat!("Reads a little-endian `", stringify!($ty), "` at `offset`.")]
            #[inline]
            pub fn $name(&self, offset: usize) -> Result<$ty, BufferError> {
                let r = range(offset, std::mem::size_of::<$ty>(), self.uint8.len())?;
                let mut bytes = [0u8; std::mem::size_of::<$ty>()];
                bytes.copy_from_slice(&self.uint8[r]);
                Ok(<$ty>::from_le_bytes(bytes))
            }
        )*
    };
}

macro_rules! setters {
    ($($name:ident => $ty:ty),* $(,)?) => {
        $(
            #[doc = concat!("Writes `value` as a little-endian `", stringify!($ty), "` at `offset`.")]
            #[inline]
            pub fn $name(&mut self, offset: usize, value: $ty) -> Result<(), BufferError> {
                let r = range(offset, std::mem::size_of::<$ty>(), self.uint8.len())?;
                self.uint8[r].copy_from_slice(&value.to_le_bytes());
                Ok(())
            }
        )*
    };
}

/// A read-only view that decodes fixed-width values at absolute offsets.
///
/// The view never moves a cursor; callers pass the offset of every access.
///
/// # Example
///
/// ```
/// use cstruct_buffers::View;
///
/// let data = [0x50, 0x4B, 0x03, 0x04];
/// let view = View::new(&data);
/// assert_eq!(view.get_u8(0).unwrap(), b'P');
/// assert_eq!(view.get_u16(2).unwrap(), 0x0403);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
}

impl<'a> View<'a> {
    /// Creates a view over the given bytes.
    pub fn new(uint8: &'a [u8]) -> Self {
        Self { uint8 }
    }

    /// Returns `len` raw bytes starting at `offset`.
    pub fn bytes(&self, offset: usize, len: usize) -> Result<&'a [u8], BufferError> {
        let r = range(offset, len, self.uint8.len())?;
        Ok(&self.uint8[r])
    }

    /// Reads `count` little-endian 16-bit code units starting at `offset`.
    pub fn units16(&self, offset: usize, count: usize) -> Result<Vec<u16>, BufferError> {
        let width = count.checked_mul(2).ok_or(BufferError::OutOfRange {
            offset,
            width: usize::MAX,
            len: self.uint8.len(),
        })?;
        let r = range(offset, width, self.uint8.len())?;
        Ok(self.uint8[r]
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect())
    }

    getters! {
        get_u8 => u8,
        get_i8 => i8,
        get_u16 => u16,
        get_i16 => i16,
        get_u32 => u32,
        get_i32 => i32,
        get_u64 => u64,
        get_i64 => i64,
        get_f32 => f32,
        get_f64 => f64,
    }
}

/// A mutable view that encodes fixed-width values at absolute offsets.
///
/// Writes never grow the buffer. Anything that would land past the end
/// fails with [`BufferError::OutOfRange`] and leaves the buffer untouched.
#[derive(Debug)]
pub struct ViewMut<'a> {
    /// The underlying byte slice.
    pub uint8: &'a mut [u8],
}

impl<'a> ViewMut<'a> {
    /// Creates a mutable view over the given bytes.
    pub fn new(uint8: &'a mut [u8]) -> Self {
        Self { uint8 }
    }

    /// Copies `data` into the buffer at `offset`.
    pub fn set_bytes(&mut self, offset: usize, data: &[u8]) -> Result<(), BufferError> {
        let r = range(offset, data.len(), self.uint8.len())?;
        self.uint8[r].copy_from_slice(data);
        Ok(())
    }

    /// Sets `len` bytes starting at `offset` to `byte`.
    pub fn fill(&mut self, offset: usize, len: usize, byte: u8) -> Result<(), BufferError> {
        let r = range(offset, len, self.uint8.len())?;
        self.uint8[r].fill(byte);
        Ok(())
    }

    setters! {
        set_u8 => u8,
        set_i8 => i8,
        set_u16 => u16,
        set_i16 => i16,
        set_u32 => u32,
        set_i32 => i32,
        set_u64 => u64,
        set_i64 => i64,
        set_f32 => f32,
        set_f64 => f64,
    }
}
