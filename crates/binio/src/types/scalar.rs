// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Scalar types, scalar values and their byte codecs.

use crate::error::{BinioError, Result};
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::fmt;

/// Byte order used by the binary scalar codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endianness {
    /// Most significant byte first (network order).
    #[default]
    Big,
    /// Least significant byte first.
    Little,
}

impl Endianness {
    /// Parse `big`/`little` (case-insensitive, `be`/`le` accepted).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "big" | "be" | "big_endian" => Some(Self::Big),
            "little" | "le" | "little_endian" => Some(Self::Little),
            _ => None,
        }
    }
}

/// Fixed-size primitive layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Byte,
    UByte,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    Float,
    Double,
    /// Right-aligned, space padded decimal integer of the given width.
    AsciiInt(u8),
    /// Right-aligned, space padded decimal float of the given width.
    AsciiFloat(u8),
}

impl ScalarType {
    /// Size in bytes.
    pub fn size(self) -> usize {
        match self {
            Self::Byte | Self::UByte => 1,
            Self::Short | Self::UShort => 2,
            Self::Int | Self::UInt | Self::Float => 4,
            Self::Long | Self::ULong | Self::Double => 8,
            Self::AsciiInt(width) | Self::AsciiFloat(width) => width as usize,
        }
    }

    /// Schema name of the scalar.
    pub fn name(self) -> String {
        match self {
            Self::AsciiInt(width) => format!("ascii_int({})", width),
            Self::AsciiFloat(width) => format!("ascii_float({})", width),
            other => other.binary_name().to_string(),
        }
    }

    fn binary_name(self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::UByte => "ubyte",
            Self::Short => "short",
            Self::UShort => "ushort",
            Self::Int => "int",
            Self::UInt => "uint",
            Self::Long => "long",
            Self::ULong => "ulong",
            Self::Float => "float",
            Self::Double => "double",
            Self::AsciiInt(_) => "ascii_int",
            Self::AsciiFloat(_) => "ascii_float",
        }
    }

    /// Look up a scalar by its schema name (`int`, `ascii_float(12)`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        let scalar = match name {
            "byte" => Self::Byte,
            "ubyte" => Self::UByte,
            "short" => Self::Short,
            "ushort" => Self::UShort,
            "int" => Self::Int,
            "uint" => Self::UInt,
            "long" => Self::Long,
            "ulong" => Self::ULong,
            "float" => Self::Float,
            "double" => Self::Double,
            _ => {
                let (base, rest) = name.split_once('(')?;
                let width: u8 = rest.strip_suffix(')')?.trim().parse().ok()?;
                if width == 0 {
                    return None;
                }
                match base {
                    "ascii_int" => Self::AsciiInt(width),
                    "ascii_float" => Self::AsciiFloat(width),
                    _ => return None,
                }
            }
        };
        Some(scalar)
    }

    /// Integer scalars can drive the element count of a sequence.
    pub fn is_integer(self) -> bool {
        !matches!(self, Self::Float | Self::Double | Self::AsciiFloat(_))
    }

    /// Name of the `ScalarValue` variant this scalar decodes to.
    pub fn value_kind(self) -> &'static str {
        match self {
            Self::Byte => "i8",
            Self::UByte => "u8",
            Self::Short => "i16",
            Self::UShort => "u16",
            Self::Int => "i32",
            Self::UInt => "u32",
            Self::Long | Self::AsciiInt(_) => "i64",
            Self::ULong => "u64",
            Self::Float => "f32",
            Self::Double | Self::AsciiFloat(_) => "f64",
        }
    }

    /// Decode `bytes` (exactly `self.size()` long).
    pub fn decode(self, bytes: &[u8], order: Endianness) -> Result<ScalarValue> {
        debug_assert_eq!(bytes.len(), self.size());
        match self {
            Self::AsciiInt(_) => decode_ascii_int(bytes),
            Self::AsciiFloat(_) => decode_ascii_float(bytes),
            _ => Ok(match order {
                Endianness::Big => decode_binary::<BigEndian>(self, bytes),
                Endianness::Little => decode_binary::<LittleEndian>(self, bytes),
            }),
        }
    }

    /// Encode `value` into `out` (exactly `self.size()` long).
    pub fn encode(self, value: ScalarValue, out: &mut [u8], order: Endianness) -> Result<()> {
        debug_assert_eq!(out.len(), self.size());
        if value.kind() != self.value_kind() {
            return Err(BinioError::mismatch(
                format!("{} ({})", self.name(), self.value_kind()),
                value.kind(),
            ));
        }
        match (self, value) {
            (Self::AsciiInt(_), ScalarValue::I64(v)) => encode_ascii(&v.to_string(), out),
            (Self::AsciiFloat(width), ScalarValue::F64(v)) => {
                encode_ascii(&format_ascii_float(v, width as usize)?, out)
            }
            _ => {
                match order {
                    Endianness::Big => encode_binary::<BigEndian>(value, out),
                    Endianness::Little => encode_binary::<LittleEndian>(value, out),
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

fn decode_binary<B: ByteOrder>(ty: ScalarType, bytes: &[u8]) -> ScalarValue {
    match ty {
        ScalarType::Byte => ScalarValue::I8(bytes[0] as i8),
        ScalarType::UByte => ScalarValue::U8(bytes[0]),
        ScalarType::Short => ScalarValue::I16(B::read_i16(bytes)),
        ScalarType::UShort => ScalarValue::U16(B::read_u16(bytes)),
        ScalarType::Int => ScalarValue::I32(B::read_i32(bytes)),
        ScalarType::UInt => ScalarValue::U32(B::read_u32(bytes)),
        ScalarType::Long => ScalarValue::I64(B::read_i64(bytes)),
        ScalarType::ULong => ScalarValue::U64(B::read_u64(bytes)),
        ScalarType::Float => ScalarValue::F32(B::read_f32(bytes)),
        ScalarType::Double => ScalarValue::F64(B::read_f64(bytes)),
        ScalarType::AsciiInt(_) | ScalarType::AsciiFloat(_) => {
            unreachable!("{} is decoded as text, not through the binary codec", ty)
        }
    }
}

fn encode_binary<B: ByteOrder>(value: ScalarValue, out: &mut [u8]) {
    match value {
        ScalarValue::I8(v) => out[0] = v as u8,
        ScalarValue::U8(v) => out[0] = v,
        ScalarValue::I16(v) => B::write_i16(out, v),
        ScalarValue::U16(v) => B::write_u16(out, v),
        ScalarValue::I32(v) => B::write_i32(out, v),
        ScalarValue::U32(v) => B::write_u32(out, v),
        ScalarValue::I64(v) => B::write_i64(out, v),
        ScalarValue::U64(v) => B::write_u64(out, v),
        ScalarValue::F32(v) => B::write_f32(out, v),
        ScalarValue::F64(v) => B::write_f64(out, v),
    }
}

fn ascii_text(bytes: &[u8]) -> Result<&str> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| BinioError::InvalidValue("non-ASCII numeric field".into()))?;
    Ok(text.trim_matches(|c: char| c.is_ascii_whitespace() || c == '\0'))
}

fn decode_ascii_int(bytes: &[u8]) -> Result<ScalarValue> {
    let text = ascii_text(bytes)?;
    if text.is_empty() {
        return Ok(ScalarValue::I64(0));
    }
    text.parse::<i64>()
        .map(ScalarValue::I64)
        .map_err(|_| BinioError::InvalidValue(format!("'{}' is not an integer", text)))
}

fn decode_ascii_float(bytes: &[u8]) -> Result<ScalarValue> {
    let text = ascii_text(bytes)?;
    if text.is_empty() {
        return Ok(ScalarValue::F64(0.0));
    }
    // Fortran-style exponents ("1.5D+03") show up in older records.
    let normalized = text.replace(['D', 'd'], "E");
    normalized
        .parse::<f64>()
        .map(ScalarValue::F64)
        .map_err(|_| BinioError::InvalidValue(format!("'{}' is not a float", text)))
}

fn format_ascii_float(v: f64, width: usize) -> Result<String> {
    let plain = v.to_string();
    if plain.len() <= width {
        return Ok(plain);
    }
    for precision in (0..width).rev() {
        let sci = format!("{:.*E}", precision, v);
        if sci.len() <= width {
            return Ok(sci);
        }
    }
    Err(BinioError::InvalidValue(format!(
        "{} does not fit in {} characters",
        v, width
    )))
}

fn encode_ascii(text: &str, out: &mut [u8]) -> Result<()> {
    if text.len() > out.len() {
        return Err(BinioError::InvalidValue(format!(
            "'{}' does not fit in {} characters",
            text,
            out.len()
        )));
    }
    let pad = out.len() - text.len();
    out[..pad].fill(b' ');
    out[pad..].copy_from_slice(text.as_bytes());
    Ok(())
}

/// A decoded scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarValue {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
}

impl ScalarValue {
    /// Rust type name of the held value.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::I8(_) => "i8",
            Self::U8(_) => "u8",
            Self::I16(_) => "i16",
            Self::U16(_) => "u16",
            Self::I32(_) => "i32",
            Self::U32(_) => "u32",
            Self::I64(_) => "i64",
            Self::U64(_) => "u64",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
        }
    }

    /// Numeric value as `f64` (may lose precision for 64-bit integers).
    pub fn to_f64(&self) -> f64 {
        match *self {
            Self::I8(v) => v as f64,
            Self::U8(v) => v as f64,
            Self::I16(v) => v as f64,
            Self::U16(v) => v as f64,
            Self::I32(v) => v as f64,
            Self::U32(v) => v as f64,
            Self::I64(v) => v as f64,
            Self::U64(v) => v as f64,
            Self::F32(v) => v as f64,
            Self::F64(v) => v,
        }
    }

    /// Integer value as `i64`; `None` for floats and out-of-range `u64`.
    pub fn to_i64(&self) -> Option<i64> {
        match *self {
            Self::I8(v) => Some(v as i64),
            Self::U8(v) => Some(v as i64),
            Self::I16(v) => Some(v as i64),
            Self::U16(v) => Some(v as i64),
            Self::I32(v) => Some(v as i64),
            Self::U32(v) => Some(v as i64),
            Self::I64(v) => Some(v),
            Self::U64(v) => i64::try_from(v).ok(),
            Self::F32(_) | Self::F64(_) => None,
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I8(v) => write!(f, "{}", v),
            Self::U8(v) => write!(f, "{}", v),
            Self::I16(v) => write!(f, "{}", v),
            Self::U16(v) => write!(f, "{}", v),
            Self::I32(v) => write!(f, "{}", v),
            Self::U32(v) => write!(f, "{}", v),
            Self::I64(v) => write!(f, "{}", v),
            Self::U64(v) => write!(f, "{}", v),
            Self::F32(v) => write!(f, "{}", v),
            Self::F64(v) => write!(f, "{}", v),
        }
    }
}

/// Trait for extracting a Rust value from a `ScalarValue`.
pub trait FromScalar: Sized {
    fn from_scalar(value: ScalarValue) -> Result<Self>;
}

macro_rules! impl_scalar_conversions {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for ScalarValue {
            fn from(v: $ty) -> Self {
                Self::$variant(v)
            }
        }

        impl FromScalar for $ty {
            fn from_scalar(value: ScalarValue) -> Result<Self> {
                match value {
                    ScalarValue::$variant(v) => Ok(v),
                    other => Err(BinioError::mismatch(stringify!($ty), other.kind())),
                }
            }
        }
    };
}

impl_scalar_conversions!(i8, I8);
impl_scalar_conversions!(u8, U8);
impl_scalar_conversions!(i16, I16);
impl_scalar_conversions!(u16, U16);
impl_scalar_conversions!(i32, I32);
impl_scalar_conversions!(u32, U32);
impl_scalar_conversions!(i64, I64);
impl_scalar_conversions!(u64, U64);
impl_scalar_conversions!(f32, F32);
impl_scalar_conversions!(f64, F64);

impl FromScalar for ScalarValue {
    fn from_scalar(value: ScalarValue) -> Result<Self> {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_sizes() {
        assert_eq!(ScalarType::Byte.size(), 1);
        assert_eq!(ScalarType::UShort.size(), 2);
        assert_eq!(ScalarType::Float.size(), 4);
        assert_eq!(ScalarType::Double.size(), 8);
        assert_eq!(ScalarType::AsciiInt(6).size(), 6);
    }

    #[test]
    fn test_names_parse_back() {
        for ty in [
            ScalarType::Byte,
            ScalarType::ULong,
            ScalarType::Double,
            ScalarType::AsciiInt(6),
            ScalarType::AsciiFloat(16),
        ] {
            assert_eq!(ScalarType::from_name(&ty.name()), Some(ty));
        }
        assert_eq!(ScalarType::from_name("ascii_int(0)"), None);
        assert_eq!(ScalarType::from_name("quad"), None);
    }

    #[test]
    fn test_binary_endianness() {
        let mut out = [0u8; 4];
        ScalarType::Int
            .encode(ScalarValue::I32(0x0102_0304), &mut out, Endianness::Big)
            .unwrap();
        assert_eq!(out, [1, 2, 3, 4]);
        ScalarType::Int
            .encode(ScalarValue::I32(0x0102_0304), &mut out, Endianness::Little)
            .unwrap();
        assert_eq!(out, [4, 3, 2, 1]);
        assert_eq!(
            ScalarType::UInt.decode(&[0, 0, 1, 0], Endianness::Big).unwrap(),
            ScalarValue::U32(256)
        );
    }

    #[test]
    fn test_encode_rejects_wrong_kind() {
        let mut out = [0u8; 8];
        let err = ScalarType::Double
            .encode(ScalarValue::I32(1), &mut out, Endianness::Big)
            .unwrap_err();
        assert!(matches!(err, BinioError::TypeMismatch { .. }));
    }

    #[test]
    fn test_ascii_int() {
        let mut out = [0u8; 6];
        ScalarType::AsciiInt(6)
            .encode(ScalarValue::I64(-42), &mut out, Endianness::Big)
            .unwrap();
        assert_eq!(&out, b"   -42");
        assert_eq!(
            ScalarType::AsciiInt(6).decode(&out, Endianness::Big).unwrap(),
            ScalarValue::I64(-42)
        );
        assert_eq!(
            ScalarType::AsciiInt(4).decode(b"    ", Endianness::Big).unwrap(),
            ScalarValue::I64(0)
        );
        let err = ScalarType::AsciiInt(2)
            .encode(ScalarValue::I64(1234), &mut [0u8; 2], Endianness::Big)
            .unwrap_err();
        assert!(matches!(err, BinioError::InvalidValue(_)));
    }

    #[test]
    fn test_ascii_float() {
        assert_eq!(
            ScalarType::AsciiFloat(10)
                .decode(b"  1.5D+03 ", Endianness::Big)
                .unwrap(),
            ScalarValue::F64(1500.0)
        );
        let mut out = [0u8; 8];
        ScalarType::AsciiFloat(8)
            .encode(ScalarValue::F64(0.25), &mut out, Endianness::Big)
            .unwrap();
        assert_eq!(&out, b"    0.25");
        // too many digits for the plain form falls back to scientific
        ScalarType::AsciiFloat(8)
            .encode(ScalarValue::F64(123_456_789.0), &mut out, Endianness::Big)
            .unwrap();
        let back = ScalarType::AsciiFloat(8)
            .decode(&out, Endianness::Big)
            .unwrap()
            .to_f64();
        assert!((back - 123_456_789.0).abs() / 123_456_789.0 < 1e-3);
        assert!(ScalarType::AsciiFloat(4)
            .decode(b"abcd", Endianness::Big)
            .is_err());
    }

    #[test]
    fn test_from_scalar_is_strict() {
        assert_eq!(f64::from_scalar(ScalarValue::F64(2.5)).unwrap(), 2.5);
        assert!(f64::from_scalar(ScalarValue::F32(2.5)).is_err());
        assert_eq!(ScalarValue::U64(u64::MAX).to_i64(), None);
        assert_eq!(ScalarValue::U16(7).to_i64(), Some(7));
    }

    #[test]
    fn test_decode_routes_by_kind() {
        let binary = [
            ScalarType::Byte,
            ScalarType::UByte,
            ScalarType::Short,
            ScalarType::UShort,
            ScalarType::Int,
            ScalarType::UInt,
            ScalarType::Long,
            ScalarType::ULong,
            ScalarType::Float,
            ScalarType::Double,
        ];
        for order in [Endianness::Big, Endianness::Little] {
            for ty in binary {
                let value = ty.decode(&vec![0u8; ty.size()], order).unwrap();
                assert_eq!(value.kind(), ty.value_kind(), "{}", ty);
            }
            let text = ScalarType::AsciiInt(3).decode(b" 42", order).unwrap();
            assert_eq!(text, ScalarValue::I64(42));
            let text = ScalarType::AsciiFloat(4).decode(b" 2.5", order).unwrap();
            assert_eq!(text, ScalarValue::F64(2.5));
        }
    }

}
