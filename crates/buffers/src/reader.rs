//! Blob reader that hands out consecutive chunks.

/// A reader that serves consecutive byte chunks from a blob.
///
/// The reader maintains a cursor position. It is the natural backing for a
/// read function: each call to [`Reader::buf`] returns the next `n` bytes, or
/// fewer when the blob runs out.
///
/// # Example
///
/// ```
/// use cstruct_buffers::Reader;
///
/// let data = [0x01, 0x02, 0x03, 0x04, 0x05];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.buf(2), &[0x01, 0x02]);
/// assert_eq!(reader.buf(8), &[0x03, 0x04, 0x05]);
/// assert_eq!(reader.size(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader for the given byte slice.
    pub fn new(uint8: &'a [u8]) -> Self {
        Self { uint8, x: 0 }
    }

    /// Returns the number of remaining bytes.
    pub fn size(&self) -> usize {
        self.uint8.len() - self.x
    }

    /// Returns the next `size` bytes (or what is left) and advances the cursor.
    pub fn buf(&mut self, size: usize) -> &'a [u8] {
        let x = self.x;
        let end = x + size.min(self.size());
        self.x = end;
        &self.uint8[x..end]
    }
}
