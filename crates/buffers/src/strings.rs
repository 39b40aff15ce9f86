//! Code-unit conversions for fixed-length strings.
//!
//! Single-byte units map straight to code points with no UTF-8 decoding.
//! Two-byte units are UTF-16.

/// Converts bytes to a string, one character per byte (U+0000..=U+00FF).
///
/// # Example
///
/// ```
/// use cstruct_buffers::latin1_decode;
///
/// assert_eq!(latin1_decode(b"PK\0"), "PK\0");
/// assert_eq!(latin1_decode(&[0xE9]), "\u{e9}");
/// ```
pub fn latin1_decode(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Converts UTF-16 code units to a string.
///
/// Surrogate pairs combine into one character. An unpaired surrogate has no
/// code point of its own and becomes U+FFFD.
///
/// # Example
///
/// ```
/// use cstruct_buffers::{ucs2_decode, ucs2_units};
///
/// let units = [0xD83D, 0xDE00];
/// assert_eq!(ucs2_decode(&units), "\u{1F600}");
/// assert_eq!(ucs2_units(&ucs2_decode(&units)), units);
/// ```
pub fn ucs2_decode(units: &[u16]) -> String {
    char::decode_utf16(units.iter().copied())
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Converts a string to single-byte code units, keeping the low 8 bits of
/// each UTF-16 code unit. A character outside the Basic Multilingual Plane
/// therefore takes two bytes.
///
/// # Example
///
/// ```
/// use cstruct_buffers::latin1_units;
///
/// assert_eq!(latin1_units("AB"), vec![0x41, 0x42]);
/// assert_eq!(latin1_units("\u{141}"), vec![0x41]);
/// assert_eq!(latin1_units("\u{1F600}"), vec![0x3D, 0x00]);
/// ```
pub fn latin1_units(s: &str) -> Vec<u8> {
    s.encode_utf16().map(|u| u as u8).collect()
}

/// Converts a string to UTF-16 code units.
pub fn ucs2_units(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}
