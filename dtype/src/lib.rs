//! Element data types for tensor shapes.
//!
//! A [`DataType`] describes the scalar stored at each element of a tensor.
//! The lowering pass only needs its width (for byte-size checks) and a
//! stable textual form for IR dumps.


/// Scalar element type of a tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[derive(strum::Display, strum::EnumString, strum::EnumIter, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum DataType {
    #[strum(serialize = "boolean")]
    Bool,

    #[strum(serialize = "i8")]
    Int8,
    #[strum(serialize = "i16")]
    Int16,
    #[strum(serialize = "i32")]
    Int32,
    #[strum(serialize = "i64")]
    Int64,

    #[strum(serialize = "u8")]
    UInt8,
    #[strum(serialize = "u16")]
    UInt16,
    #[strum(serialize = "u32")]
    UInt32,
    #[strum(serialize = "u64")]
    UInt64,

    #[strum(serialize = "fp16")]
    Float16,
    #[strum(serialize = "fp32")]
    #[default]
    Float32,
    #[strum(serialize = "fp64")]
    Float64,

    /// Opaque random-number-generator state.
    Prng,
}

impl DataType {
    /// Width of one element in bytes.
    pub const fn bytes(&self) -> u64 {
        match self {
            Self::Bool => 1,
            Self::Int8 => 1,
            Self::Int16 => 2,
            Self::Int32 => 4,
            Self::Int64 => 8,
            Self::UInt8 => 1,
            Self::UInt16 => 2,
            Self::UInt32 => 4,
            Self::UInt64 => 8,
            Self::Float16 => 2,
            Self::Float32 => 4,
            Self::Float64 => 8,
            Self::Prng => 12,
        }
    }

    pub const fn is_signed(&self) -> bool {
        matches!(self, Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64)
    }

    pub const fn is_unsigned(&self) -> bool {
        matches!(self, Self::UInt8 | Self::UInt16 | Self::UInt32 | Self::UInt64)
    }

    pub const fn is_int(&self) -> bool {
        self.is_signed() || self.is_unsigned()
    }

    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float16 | Self::Float32 | Self::Float64)
    }
}
