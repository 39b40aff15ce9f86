//! Fixed-width scalar codecs.
//!
//! Every primitive has a fixed byte width and is encoded little-endian with
//! no alignment. Constructors mirror C type names:
//!
//! ```
//! use cstruct::primitive::{fixed_string, int32, uint16};
//!
//! assert_eq!(int32().size(), 4);
//! assert_eq!(uint16().size(), 2);
//! assert_eq!(fixed_string(5).size(), 5);
//! ```

use std::fmt;

use cstruct_buffers::{latin1_decode, latin1_units, ucs2_decode, ucs2_units, View, ViewMut};

use crate::error::{CodecError, Result};
use crate::value::Value;

/// An atomic scalar codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    /// `len` code units, one byte each, or two bytes each when `wide`.
    FixedString { len: usize, wide: bool },
}

pub fn int8() -> Primitive {
    Primitive::I8
}

pub fn uint8() -> Primitive {
    Primitive::U8
}

pub fn int16() -> Primitive {
    Primitive::I16
}

pub fn uint16() -> Primitive {
    Primitive::U16
}

pub fn int32() -> Primitive {
    Primitive::I32
}

pub fn uint32() -> Primitive {
    Primitive::U32
}

pub fn int64() -> Primitive {
    Primitive::I64
}

pub fn uint64() -> Primitive {
    Primitive::U64
}

pub fn float32() -> Primitive {
    Primitive::F32
}

pub fn float64() -> Primitive {
    Primitive::F64
}

/// A string of `len` single-byte characters.
pub fn fixed_string(len: usize) -> Primitive {
    Primitive::FixedString { len, wide: false }
}

/// A string of `len` two-byte code units.
pub fn wide_string(len: usize) -> Primitive {
    Primitive::FixedString { len, wide: true }
}

impl Primitive {
    /// Byte width, or `None` when a wide string's width does not fit in `usize`.
    pub fn checked_size(&self) -> Option<usize> {
        match *self {
            Primitive::I8 | Primitive::U8 => Some(1),
            Primitive::I16 | Primitive::U16 => Some(2),
            Primitive::I32 | Primitive::U32 | Primitive::F32 => Some(4),
            Primitive::I64 | Primitive::U64 | Primitive::F64 => Some(8),
            Primitive::FixedString { len, wide: false } => Some(len),
            Primitive::FixedString { len, wide: true } => len.checked_mul(2),
        }
    }

    /// Byte width of the encoded value.
    pub fn size(&self) -> usize {
        self.checked_size().unwrap_or(usize::MAX)
    }

    /// Decodes the value stored at `offset`.
    pub fn parse(&self, view: &View<'_>, offset: usize) -> Result<Value> {
        Ok(match *self {
            Primitive::I8 => Value::from(view.get_i8(offset)?),
            Primitive::U8 => Value::from(view.get_u8(offset)?),
            Primitive::I16 => Value::from(view.get_i16(offset)?),
            Primitive::U16 => Value::from(view.get_u16(offset)?),
            Primitive::I32 => Value::from(view.get_i32(offset)?),
            Primitive::U32 => Value::from(view.get_u32(offset)?),
            Primitive::I64 => Value::from(view.get_i64(offset)?),
            Primitive::U64 => Value::from(view.get_u64(offset)?),
            Primitive::F32 => Value::from(view.get_f32(offset)?),
            Primitive::F64 => Value::from(view.get_f64(offset)?),
            Primitive::FixedString { len, wide: false } => {
                Value::Str(latin1_decode(view.bytes(offset, len)?))
            }
            Primitive::FixedString { len, wide: true } => {
                Value::Str(ucs2_decode(&view.units16(offset, len)?))
            }
        })
    }

    /// Encodes `value` at `offset`.
    ///
    /// Integers are truncated to the field width in two's complement. Strings
    /// longer than the field are cut, shorter ones are zero-padded.
    pub fn dump(&self, value: &Value, view: &mut ViewMut<'_>, offset: usize) -> Result<()> {
        match *self {
            Primitive::I8 => view.set_i8(offset, int_bits(value)? as i8)?,
            Primitive::U8 => view.set_u8(offset, int_bits(value)? as u8)?,
            Primitive::I16 => view.set_i16(offset, int_bits(value)? as i16)?,
            Primitive::U16 => view.set_u16(offset, int_bits(value)? as u16)?,
            Primitive::I32 => view.set_i32(offset, int_bits(value)? as i32)?,
            Primitive::U32 => view.set_u32(offset, int_bits(value)? as u32)?,
            Primitive::I64 => view.set_i64(offset, int_bits(value)?)?,
            Primitive::U64 => view.set_u64(offset, int_bits(value)? as u64)?,
            Primitive::F32 => view.set_f32(offset, float(value)? as f32)?,
            Primitive::F64 => view.set_f64(offset, float(value)?)?,
            Primitive::FixedString { len, wide: false } => {
                let units = latin1_units(string(value)?);
                let n = units.len().min(len);
                view.fill(offset, len, 0)?;
                view.set_bytes(offset, &units[..n])?;
            }
            Primitive::FixedString { len, wide: true } => {
                let units = ucs2_units(string(value)?);
                view.fill(offset, self.size(), 0)?;
                for (i, unit) in units.into_iter().take(len).enumerate() {
                    view.set_u16(offset + i * 2, unit)?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::I8 => f.write_str("int8"),
            Primitive::U8 => f.write_str("uint8"),
            Primitive::I16 => f.write_str("int16"),
            Primitive::U16 => f.write_str("uint16"),
            Primitive::I32 => f.write_str("int32"),
            Primitive::U32 => f.write_str("uint32"),
            Primitive::I64 => f.write_str("int64"),
            Primitive::U64 => f.write_str("uint64"),
            Primitive::F32 => f.write_str("float32"),
            Primitive::F64 => f.write_str("float64"),
            Primitive::FixedString { len, wide: false } => write!(f, "fixed_string({len})"),
            Primitive::FixedString { len, wide: true } => write!(f, "wide_string({len})"),
        }
    }
}

fn int_bits(value: &Value) -> Result<i64> {
    match *value {
        Value::Int(i) => Ok(i),
        Value::UInt(u) => Ok(u as i64),
        _ => Err(mismatch("integer", value)),
    }
}

fn float(value: &Value) -> Result<f64> {
    value.as_f64().ok_or_else(|| mismatch("number", value))
}

fn string(value: &Value) -> Result<&str> {
    value.as_str().ok_or_else(|| mismatch("string", value))
}

fn mismatch(expected: &'static str, value: &Value) -> CodecError {
    CodecError::TypeMismatch {
        expected,
        found: value.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dump(p: Primitive, value: impl Into<Value>) -> Vec<u8> {
        let mut buf = vec![0xEE; p.size()];
        p.dump(&value.into(), &mut ViewMut::new(&mut buf), 0).unwrap();
        buf
    }

    fn parse(p: Primitive, bytes: &[u8]) -> Value {
        p.parse(&View::new(bytes), 0).unwrap()
    }

    #[test]
    fn sizes() {
        assert_eq!(int8().size(), 1);
        assert_eq!(uint8().size(), 1);
        assert_eq!(int16().size(), 2);
        assert_eq!(uint16().size(), 2);
        assert_eq!(int32().size(), 4);
        assert_eq!(uint32().size(), 4);
        assert_eq!(int64().size(), 8);
        assert_eq!(uint64().size(), 8);
        assert_eq!(float32().size(), 4);
        assert_eq!(float64().size(), 8);
        assert_eq!(fixed_string(10).size(), 10);
        assert_eq!(wide_string(10).size(), 20);
        assert_eq!(wide_string(usize::MAX).checked_size(), None);
    }

    #[test]
    fn integers_are_little_endian() {
        assert_eq!(dump(uint16(), 0x0403u16), vec![0x03, 0x04]);
        assert_eq!(dump(int32(), -2i32), vec![0xFE, 0xFF, 0xFF, 0xFF]);
        assert_eq!(parse(uint32(), &[0x01, 0x00, 0x00, 0x80]), Value::UInt(0x8000_0001));
        assert_eq!(parse(int16(), &[0xFF, 0xFF]), Value::Int(-1));
    }

    #[test]
    fn integers_wrap_to_width() {
        assert_eq!(dump(uint8(), 0x1FFu16), vec![0xFF]);
        assert_eq!(dump(int8(), 200u8), vec![0xC8]);
        assert_eq!(dump(uint16(), -1i32), vec![0xFF, 0xFF]);
    }

    #[test]
    fn floats_accept_any_number() {
        assert_eq!(parse(float32(), &dump(float32(), 3u8)), Value::Float(3.0));
        assert_eq!(parse(float64(), &dump(float64(), -0.5f64)), Value::Float(-0.5));
        let bytes = dump(float32(), 1.25f32);
        assert_eq!(bytes, 1.25f32.to_le_bytes().to_vec());
    }

    #[test]
    fn fixed_string_pads_with_nul() {
        let bytes = dump(fixed_string(5), "AB");
        assert_eq!(bytes, vec![0x41, 0x42, 0, 0, 0]);
        assert_eq!(parse(fixed_string(5), &bytes), Value::from("AB\0\0\0"));
    }

    #[test]
    fn fixed_string_truncates() {
        let bytes = dump(fixed_string(5), "ABCDEFG");
        assert_eq!(bytes, b"ABCDE".to_vec());
    }

    #[test]
    fn fixed_string_maps_bytes_to_code_points() {
        assert_eq!(parse(fixed_string(2), &[0xFF, 0x80]), Value::from("\u{ff}\u{80}"));
    }

    #[test]
    fn wide_string_roundtrip() {
        let p = wide_string(3);
        let bytes = dump(p, "Hi");
        assert_eq!(bytes, vec![0x48, 0, 0x69, 0, 0, 0]);
        assert_eq!(parse(p, &bytes), Value::from("Hi\0"));
        assert_eq!(dump(p, "ABCD"), vec![0x41, 0, 0x42, 0, 0x43, 0]);
    }

    #[test]
    fn wide_string_keeps_surrogate_pairs() {
        let bytes = [0x3D, 0xD8, 0x00, 0xDE];
        let v = parse(wide_string(2), &bytes);
        assert_eq!(v, Value::from("\u{1F600}"));
        assert_eq!(dump(wide_string(2), v), bytes.to_vec());
    }

    #[test]
    fn narrow_string_counts_utf16_units() {
        assert_eq!(dump(fixed_string(3), "\u{1F600}"), vec![0x3D, 0x00, 0x00]);
        assert_eq!(dump(fixed_string(1), "\u{1F600}A"), vec![0x3D]);
    }

    #[test]
    fn type_mismatch() {
        let mut buf = [0u8; 4];
        let err = fixed_string(4)
            .dump(&Value::from(1u8), &mut ViewMut::new(&mut buf), 0)
            .unwrap_err();
        assert!(matches!(
            err,
            CodecError::TypeMismatch {
                expected: "string",
                found: "unsigned integer"
            }
        ));
        let err = int32()
            .dump(&Value::from("x"), &mut ViewMut::new(&mut buf), 0)
            .unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { .. }));
        let err = int32()
            .dump(&Value::from(1.5f64), &mut ViewMut::new(&mut buf), 0)
            .unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { .. }));
    }

    #[test]
    fn out_of_range() {
        let mut buf = [0u8; 3];
        let err = int32()
            .dump(&Value::from(1i32), &mut ViewMut::new(&mut buf), 0)
            .unwrap_err();
        assert!(matches!(err, CodecError::OutOfRange(_)));
        let err = fixed_string(2).parse(&View::new(&buf), 2).unwrap_err();
        assert!(matches!(err, CodecError::OutOfRange(_)));
    }

    #[test]
    fn display() {
        assert_eq!(uint16().to_string(), "uint16");
        assert_eq!(fixed_string(4).to_string(), "fixed_string(4)");
        assert_eq!(wide_string(4).to_string(), "wide_string(4)");
    }
}
