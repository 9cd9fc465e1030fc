use core::fmt;

use serde::{Deserialize, Serialize};

/// Data type of a scale or zero-point value.
#[derive(
    Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum DType {
    /// No data type was provided.
    #[default]
    Undefined,
    /// 64-bit floating point.
    F64,
    /// 32-bit floating point.
    F32,
    /// 16-bit floating point.
    F16,
    /// Brain floating point.
    BF16,
    /// 8-bit float with 4 exponent and 3 mantissa bits.
    E4M3,
    /// 8-bit float with 5 exponent and 2 mantissa bits.
    E5M2,
    /// 64-bit signed integer.
    I64,
    /// 32-bit signed integer.
    I32,
    /// 16-bit signed integer.
    I16,
    /// 8-bit signed integer.
    I8,
    /// 4-bit signed integer.
    I4,
    /// 64-bit unsigned integer.
    U64,
    /// 32-bit unsigned integer.
    U32,
    /// 16-bit unsigned integer.
    U16,
    /// 8-bit unsigned integer.
    U8,
    /// 4-bit unsigned integer.
    U4,
    /// Boolean.
    Bool,
}

impl DType {
    /// Stable numeric code used by the binary encoding.
    pub fn to_code(self) -> u32 {
        match self {
            DType::Undefined => 0,
            DType::F64 => 1,
            DType::F32 => 2,
            DType::F16 => 3,
            DType::BF16 => 4,
            DType::E4M3 => 5,
            DType::E5M2 => 6,
            DType::I64 => 7,
            DType::I32 => 8,
            DType::I16 => 9,
            DType::I8 => 10,
            DType::I4 => 11,
            DType::U64 => 12,
            DType::U32 => 13,
            DType::U16 => 14,
            DType::U8 => 15,
            DType::U4 => 16,
            DType::Bool => 17,
        }
    }

    /// Inverse of [`DType::to_code`]. Returns `None` for unknown codes.
    pub fn from_code(code: u32) -> Option<Self> {
        let dtype = match code {
            0 => DType::Undefined,
            1 => DType::F64,
            2 => DType::F32,
            3 => DType::F16,
            4 => DType::BF16,
            5 => DType::E4M3,
            6 => DType::E5M2,
            7 => DType::I64,
            8 => DType::I32,
            9 => DType::I16,
            10 => DType::I8,
            11 => DType::I4,
            12 => DType::U64,
            13 => DType::U32,
            14 => DType::U16,
            15 => DType::U8,
            16 => DType::U4,
            17 => DType::Bool,
            _ => return None,
        };
        Some(dtype)
    }

    /// Returns `true` if the data type is a floating point type.
    pub fn is_float(&self) -> bool {
        matches!(
            self,
            DType::F64 | DType::F32 | DType::F16 | DType::BF16 | DType::E4M3 | DType::E5M2
        )
    }

    /// Returns `true` if the data type is an integer type, signed or not.
    pub fn is_int(&self) -> bool {
        matches!(
            self,
            DType::I64
                | DType::I32
                | DType::I16
                | DType::I8
                | DType::I4
                | DType::U64
                | DType::U32
                | DType::U16
                | DType::U8
                | DType::U4
        )
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DType::Undefined => "undef",
            DType::F64 => "f64",
            DType::F32 => "f32",
            DType::F16 => "f16",
            DType::BF16 => "bf16",
            DType::E4M3 => "f8_e4m3",
            DType::E5M2 => "f8_e5m2",
            DType::I64 => "s64",
            DType::I32 => "s32",
            DType::I16 => "s16",
            DType::I8 => "s8",
            DType::I4 => "s4",
            DType::U64 => "u64",
            DType::U32 => "u32",
            DType::U16 => "u16",
            DType::U8 => "u8",
            DType::U4 => "u4",
            DType::Bool => "bool",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_bijective() {
        for code in 0..18 {
            let dtype = DType::from_code(code).unwrap();
            assert_eq!(dtype.to_code(), code);
        }
        assert_eq!(DType::from_code(18), None);
    }

    #[test]
    fn should_classify_dtypes() {
        assert!(DType::F32.is_float());
        assert!(!DType::F32.is_int());
        assert!(DType::I32.is_int());
        assert!(!DType::Undefined.is_float() && !DType::Undefined.is_int());
    }
}
