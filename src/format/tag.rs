//! MessagePack tag bytes and tag classification
//!
//! # Wire Format
//!
//! ```text
//! 0x00..=0x7F  positive fixint   value = tag
//! 0x80..=0x8F  fixmap            count = tag & 0x0F
//! 0x90..=0x9F  fixarray          count = tag & 0x0F
//! 0xA0..=0xBF  fixstr            len   = tag & 0x1F
//! 0xC0         nil
//! 0xC2 / 0xC3  false / true
//! 0xC4..=0xC6  bin8/16/32        1/2/4-byte length prefix
//! 0xCA / 0xCB  float32 / float64
//! 0xCC..=0xCF  uint8/16/32/64
//! 0xD0..=0xD3  int8/16/32/64
//! 0xD9..=0xDB  str8/16/32        1/2/4-byte length prefix
//! 0xDC / 0xDD  array16 / array32 2/4-byte count prefix
//! 0xDE / 0xDF  map16 / map32     2/4-byte count prefix
//! 0xE0..=0xFF  negative fixint   value = sign-extend(tag & 0x1F)
//! ```
//!
//! Extension tags (`0xC7..=0xC9`, `0xD4..=0xD8`) and the reserved `0xC1` are
//! not recognized.

use super::Family;

/// Positive fixint range start
pub const POSITIVE_FIXINT: u8 = 0x00;
/// Fixmap range start
pub const FIXMAP: u8 = 0x80;
/// Fixarray range start
pub const FIXARRAY: u8 = 0x90;
/// Fixstr range start
pub const FIXSTR: u8 = 0xA0;
/// Nil
pub const NIL: u8 = 0xC0;
/// Boolean false
pub const FALSE: u8 = 0xC2;
/// Boolean true
pub const TRUE: u8 = 0xC3;
/// Binary, 8-bit length
pub const BIN8: u8 = 0xC4;
/// Binary, 16-bit length
pub const BIN16: u8 = 0xC5;
/// Binary, 32-bit length
pub const BIN32: u8 = 0xC6;
/// IEEE 754 single
pub const FLOAT32: u8 = 0xCA;
/// IEEE 754 double
pub const FLOAT64: u8 = 0xCB;
/// Unsigned 8-bit integer
pub const U8: u8 = 0xCC;
/// Unsigned 16-bit integer
pub const U16: u8 = 0xCD;
/// Unsigned 32-bit integer
pub const U32: u8 = 0xCE;
/// Unsigned 64-bit integer
pub const U64: u8 = 0xCF;
/// Signed 8-bit integer
pub const S8: u8 = 0xD0;
/// Signed 16-bit integer
pub const S16: u8 = 0xD1;
/// Signed 32-bit integer
pub const S32: u8 = 0xD2;
/// Signed 64-bit integer
pub const S64: u8 = 0xD3;
/// String, 8-bit length
pub const STR8: u8 = 0xD9;
/// String, 16-bit length
pub const STR16: u8 = 0xDA;
/// String, 32-bit length
pub const STR32: u8 = 0xDB;
/// Array, 16-bit count
pub const ARRAY16: u8 = 0xDC;
/// Array, 32-bit count
pub const ARRAY32: u8 = 0xDD;
/// Map, 16-bit count
pub const MAP16: u8 = 0xDE;
/// Map, 32-bit count
pub const MAP32: u8 = 0xDF;
/// Negative fixint range start
pub const NEGATIVE_FIXINT: u8 = 0xE0;

/// Byte width of a length prefix or of a fixed-size numeric payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Width {
    /// 1 byte
    One = 1,
    /// 2 bytes
    Two = 2,
    /// 4 bytes
    Four = 4,
    /// 8 bytes
    Eight = 8,
}

impl Width {
    /// Number of bytes
    #[must_use]
    pub const fn bytes(self) -> usize {
        self as usize
    }

    /// Largest unsigned value representable in this many bytes
    #[must_use]
    pub const fn max_value(self) -> u64 {
        match self {
            Self::One => 0xFF,
            Self::Two => 0xFFFF,
            Self::Four => 0xFFFF_FFFF,
            Self::Eight => u64::MAX,
        }
    }

    /// Position of the width inside a 1/2/4/8 tag run (`U8`..=`U64`).
    const fn index(self) -> u8 {
        match self {
            Self::One => 0,
            Self::Two => 1,
            Self::Four => 2,
            Self::Eight => 3,
        }
    }
}

/// Unsigned integer tag for a payload width
#[must_use]
pub const fn uint(width: Width) -> u8 {
    U8 + width.index()
}

/// Signed integer tag for a payload width
#[must_use]
pub const fn sint(width: Width) -> u8 {
    S8 + width.index()
}

/// How the bytes following a tag are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Layout {
    /// Nothing follows the tag
    Empty,
    /// The value is carried by the tag byte itself
    Immediate(u8),
    /// Fixed-width big-endian numeric payload
    Scalar(Width),
    /// Length (or element count) embedded in the tag's low bits
    Embedded(u32),
    /// Big-endian length (or element count) prefix follows the tag
    Prefixed(Width),
}

/// Classification of a single tag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Format {
    pub family: Family,
    pub layout: Layout,
}

impl Format {
    const fn new(family: Family, layout: Layout) -> Self {
        Self { family, layout }
    }
}

/// Mask of the tag bits that hold an embedded length for `family`.
pub(crate) const fn embedded_mask(family: Family) -> u8 {
    match family {
        Family::Str => 0x1F,
        _ => 0x0F,
    }
}

/// Classify a tag byte; `None` for unknown, reserved and extension tags.
pub(crate) fn classify(tag: u8) -> Option<Format> {
    use Layout::{Embedded, Empty, Immediate, Prefixed, Scalar};

    let format = match tag {
        0x00..=0x7F => Format::new(Family::U8, Immediate(tag)),
        0x80..=0x8F => Format::new(Family::Map, Embedded(u32::from(tag & 0x0F))),
        0x90..=0x9F => Format::new(Family::Array, Embedded(u32::from(tag & 0x0F))),
        0xA0..=0xBF => Format::new(Family::Str, Embedded(u32::from(tag & 0x1F))),
        NIL => Format::new(Family::Nil, Empty),
        FALSE => Format::new(Family::Bool, Immediate(0)),
        TRUE => Format::new(Family::Bool, Immediate(1)),
        BIN8 => Format::new(Family::Bin, Prefixed(Width::One)),
        BIN16 => Format::new(Family::Bin, Prefixed(Width::Two)),
        BIN32 => Format::new(Family::Bin, Prefixed(Width::Four)),
        FLOAT32 => Format::new(Family::Single, Scalar(Width::Four)),
        FLOAT64 => Format::new(Family::Double, Scalar(Width::Eight)),
        U8 => Format::new(Family::U8, Scalar(Width::One)),
        U16 => Format::new(Family::U16, Scalar(Width::Two)),
        U32 => Format::new(Family::U32, Scalar(Width::Four)),
        U64 => Format::new(Family::U64, Scalar(Width::Eight)),
        S8 => Format::new(Family::S8, Scalar(Width::One)),
        S16 => Format::new(Family::S16, Scalar(Width::Two)),
        S32 => Format::new(Family::S32, Scalar(Width::Four)),
        S64 => Format::new(Family::S64, Scalar(Width::Eight)),
        STR8 => Format::new(Family::Str, Prefixed(Width::One)),
        STR16 => Format::new(Family::Str, Prefixed(Width::Two)),
        STR32 => Format::new(Family::Str, Prefixed(Width::Four)),
        ARRAY16 => Format::new(Family::Array, Prefixed(Width::Two)),
        ARRAY32 => Format::new(Family::Array, Prefixed(Width::Four)),
        MAP16 => Format::new(Family::Map, Prefixed(Width::Two)),
        MAP32 => Format::new(Family::Map, Prefixed(Width::Four)),
        // Two's complement of the tag byte is already the value.
        0xE0..=0xFF => Format::new(Family::S8, Immediate(tag)),
        _ => return None,
    };
    Some(format)
}
