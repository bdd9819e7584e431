//! Value families and the type filter used by the unpacker

use std::fmt;

/// Semantic family of a wire value.
///
/// Used both as the caller's type filter (input to [`Unpacker::decode`]) and as
/// the concrete classification reported back. Families are grouped: `Integer`
/// names the whole integer group, `U16` one member of it. A filter is satisfied
/// by any family of the same group.
///
/// [`Unpacker::decode`]: crate::Unpacker::decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Family {
    /// No constraint (filter only)
    #[default]
    Any = 0x00,
    /// Nil
    Nil = 0x10,
    /// Boolean
    Bool = 0x20,
    /// Any integer (filter only), from `i64::MIN` up to `u64::MAX`
    Integer = 0x30,
    /// Signed 8-bit integer
    S8 = 0x31,
    /// Unsigned 8-bit integer
    U8 = 0x32,
    /// Signed 16-bit integer
    S16 = 0x33,
    /// Unsigned 16-bit integer
    U16 = 0x34,
    /// Signed 32-bit integer
    S32 = 0x35,
    /// Unsigned 32-bit integer
    U32 = 0x36,
    /// Signed 64-bit integer
    S64 = 0x37,
    /// Unsigned 64-bit integer
    U64 = 0x38,
    /// Either float width (filter only)
    Float = 0x40,
    /// IEEE 754 single precision
    Single = 0x41,
    /// IEEE 754 double precision
    Double = 0x42,
    /// UTF-8 string
    Str = 0x50,
    /// Opaque binary
    Bin = 0x60,
    /// Array header
    Array = 0x70,
    /// Map header
    Map = 0x80,
}

impl Family {
    const GROUP_MASK: u8 = 0xF0;

    /// Convert from byte
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Self::Any),
            0x10 => Some(Self::Nil),
            0x20 => Some(Self::Bool),
            0x30 => Some(Self::Integer),
            0x31 => Some(Self::S8),
            0x32 => Some(Self::U8),
            0x33 => Some(Self::S16),
            0x34 => Some(Self::U16),
            0x35 => Some(Self::S32),
            0x36 => Some(Self::U32),
            0x37 => Some(Self::S64),
            0x38 => Some(Self::U64),
            0x40 => Some(Self::Float),
            0x41 => Some(Self::Single),
            0x42 => Some(Self::Double),
            0x50 => Some(Self::Str),
            0x60 => Some(Self::Bin),
            0x70 => Some(Self::Array),
            0x80 => Some(Self::Map),
            _ => None,
        }
    }

    /// Convert to byte
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Group this family belongs to (`U16` -> `Integer`, `Double` -> `Float`).
    #[must_use]
    pub const fn group(self) -> Self {
        match self.as_u8() & Self::GROUP_MASK {
            0x10 => Self::Nil,
            0x20 => Self::Bool,
            0x30 => Self::Integer,
            0x40 => Self::Float,
            0x50 => Self::Str,
            0x60 => Self::Bin,
            0x70 => Self::Array,
            0x80 => Self::Map,
            _ => Self::Any,
        }
    }

    /// Whether a value of family `found` passes this filter.
    #[must_use]
    pub const fn accepts(self, found: Self) -> bool {
        matches!(self, Self::Any)
            || self.as_u8() & Self::GROUP_MASK == found.as_u8() & Self::GROUP_MASK
    }

    /// Check if this is an integer family
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(self.group(), Self::Integer)
    }

    /// Check if this is a signed integer family
    #[must_use]
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::S8 | Self::S16 | Self::S32 | Self::S64)
    }

    /// Check if the family is an aggregate header (array or map)
    #[must_use]
    pub const fn is_aggregate(self) -> bool {
        matches!(self, Self::Array | Self::Map)
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Any => "any",
            Self::Nil => "nil",
            Self::Bool => "bool",
            Self::Integer => "integer",
            Self::S8 => "int8",
            Self::U8 => "uint8",
            Self::S16 => "int16",
            Self::U16 => "uint16",
            Self::S32 => "int32",
            Self::U32 => "uint32",
            Self::S64 => "int64",
            Self::U64 => "uint64",
            Self::Float => "float",
            Self::Single => "float32",
            Self::Double => "float64",
            Self::Str => "str",
            Self::Bin => "bin",
            Self::Array => "array",
            Self::Map => "map",
        };
        write!(f, "{name}")
    }
}
