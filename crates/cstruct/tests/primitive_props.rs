//! Round-trip properties for every primitive.

use cstruct::primitive::{
    fixed_string, float32, float64, int16, int32, int64, int8, uint16, uint32, uint64, uint8,
    wide_string,
};
use cstruct::{Layout, Primitive, Value};
use proptest::prelude::*;

fn round_trip(p: Primitive, v: Value) -> Value {
    let layout = Layout::new(p).unwrap();
    let bytes = layout.dump(&v).unwrap();
    assert_eq!(bytes.len(), p.size());
    layout.parse_bytes(&bytes).unwrap()
}

proptest! {
    #[test]
    fn signed_integers(a: i8, b: i16, c: i32, d: i64) {
        prop_assert_eq!(round_trip(int8(), a.into()), Value::from(a));
        prop_assert_eq!(round_trip(int16(), b.into()), Value::from(b));
        prop_assert_eq!(round_trip(int32(), c.into()), Value::from(c));
        prop_assert_eq!(round_trip(int64(), d.into()), Value::from(d));
    }

    #[test]
    fn unsigned_integers(a: u8, b: u16, c: u32, d: u64) {
        prop_assert_eq!(round_trip(uint8(), a.into()), Value::from(a));
        prop_assert_eq!(round_trip(uint16(), b.into()), Value::from(b));
        prop_assert_eq!(round_trip(uint32(), c.into()), Value::from(c));
        prop_assert_eq!(round_trip(uint64(), d.into()), Value::from(d));
    }

    #[test]
    fn floats(a in proptest::num::f32::NORMAL, b in proptest::num::f64::NORMAL) {
        prop_assert_eq!(round_trip(float32(), a.into()), Value::from(a));
        prop_assert_eq!(round_trip(float64(), b.into()), Value::from(b));
    }

    #[test]
    fn narrow_strings(s in "[\\x01-\\xff]{0,12}", len in 0usize..12) {
        let got = round_trip(fixed_string(len), Value::from(s.as_str()));
        let mut want: String = s.chars().take(len).collect();
        while want.chars().count() < len {
            want.push('\0');
        }
        prop_assert_eq!(got, Value::from(want));
    }

    #[test]
    fn wide_strings(s in "[\\x{1}-\\x{d7ff}]{0,12}", len in 0usize..12) {
        let got = round_trip(wide_string(len), Value::from(s.as_str()));
        let mut want: String = s.chars().take(len).collect();
        while want.chars().count() < len {
            want.push('\0');
        }
        prop_assert_eq!(got, Value::from(want));
    }

    #[test]
    fn wide_string_bytes_survive_parse_then_dump(s in any::<String>(), pad in 0usize..3) {
        let units: Vec<u16> = s.encode_utf16().collect();
        let mut bytes: Vec<u8> = units.iter().flat_map(|u| u.to_le_bytes()).collect();
        bytes.resize(bytes.len() + pad * 2, 0);

        let layout = Layout::new(wide_string(units.len() + pad)).unwrap();
        let parsed = layout.parse_bytes(&bytes).unwrap();
        prop_assert_eq!(layout.dump(&parsed).unwrap(), bytes);
    }
}
