//! Smallest-form selection for integers, strings, binaries and headers
//!
//! Every function here is total: each input maps to exactly one encoding.

use super::tag::{self, Width};

/// Largest value carried by a positive fixint
pub const POSITIVE_FIXINT_MAX: i64 = 0x7F;

/// Smallest value carried by a negative fixint
pub const NEGATIVE_FIXINT_MIN: i64 = -32;

/// Longest string that fits in a fixstr tag
pub const FIXSTR_MAX_LEN: u32 = 31;

/// Largest element count that fits in a fixmap/fixarray tag
pub const FIXCOLLECTION_MAX_LEN: u32 = 15;

/// Encoding chosen for an integer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntEncoding {
    /// Single byte, value carried by the tag itself
    Fixint,
    /// Unsigned payload of the given width
    Unsigned(Width),
    /// Signed (two's complement) payload of the given width
    Signed(Width),
}

impl IntEncoding {
    /// Tag byte for the encoding; `None` for fixints, whose tag is the value.
    #[must_use]
    pub const fn tag(self) -> Option<u8> {
        match self {
            Self::Fixint => None,
            Self::Unsigned(width) => Some(tag::uint(width)),
            Self::Signed(width) => Some(tag::sint(width)),
        }
    }

    /// Total encoded size in bytes
    #[must_use]
    pub const fn encoded_len(self) -> usize {
        match self {
            Self::Fixint => 1,
            Self::Unsigned(width) | Self::Signed(width) => 1 + width.bytes(),
        }
    }
}

/// Narrowest unsigned width whose range covers `value`.
#[must_use]
pub const fn uint_width(value: u64) -> Width {
    if value >> 8 == 0 {
        Width::One
    } else if value >> 16 == 0 {
        Width::Two
    } else if value >> 32 == 0 {
        Width::Four
    } else {
        Width::Eight
    }
}

/// Narrowest two's complement width whose range covers `value`.
///
/// A width of `n` bits holds `-(2^(n-1)) ..= 2^(n-1) - 1`, so `-128` is one
/// byte while `-129` needs two.
#[must_use]
pub const fn sint_width(value: i64) -> Width {
    if value >= i8::MIN as i64 && value <= i8::MAX as i64 {
        Width::One
    } else if value >= i16::MIN as i64 && value <= i16::MAX as i64 {
        Width::Two
    } else if value >= i32::MIN as i64 && value <= i32::MAX as i64 {
        Width::Four
    } else {
        Width::Eight
    }
}

/// Encoding for an unsigned value.
#[must_use]
pub const fn uint_encoding(value: u64) -> IntEncoding {
    if value <= POSITIVE_FIXINT_MAX as u64 {
        IntEncoding::Fixint
    } else {
        IntEncoding::Unsigned(uint_width(value))
    }
}

/// Encoding for a signed value. Non-negative values use the unsigned forms.
#[must_use]
pub const fn int_encoding(value: i64) -> IntEncoding {
    if value >= 0 {
        uint_encoding(value as u64)
    } else if value >= NEGATIVE_FIXINT_MIN {
        IntEncoding::Fixint
    } else {
        IntEncoding::Signed(sint_width(value))
    }
}

/// Tag and length-prefix width for a string of `len` bytes.
///
/// A prefix width of `None` means the length is embedded in the tag.
#[must_use]
pub const fn str_format(len: u32) -> (u8, Option<Width>) {
    if len <= FIXSTR_MAX_LEN {
        (tag::FIXSTR | len as u8, None)
    } else if len <= 0xFF {
        (tag::STR8, Some(Width::One))
    } else if len <= 0xFFFF {
        (tag::STR16, Some(Width::Two))
    } else {
        (tag::STR32, Some(Width::Four))
    }
}

/// Tag and length-prefix width for a binary of `len` bytes. Binaries have no
/// embedded-length form.
#[must_use]
pub const fn bin_format(len: u32) -> (u8, Width) {
    if len <= 0xFF {
        (tag::BIN8, Width::One)
    } else if len <= 0xFFFF {
        (tag::BIN16, Width::Two)
    } else {
        (tag::BIN32, Width::Four)
    }
}

/// Tag and count-prefix width for a map header of `count` entries.
#[must_use]
pub const fn map_format(count: u32) -> (u8, Option<Width>) {
    collection_format(count, tag::FIXMAP, tag::MAP16, tag::MAP32)
}

/// Tag and count-prefix width for an array header of `count` elements.
#[must_use]
pub const fn array_format(count: u32) -> (u8, Option<Width>) {
    collection_format(count, tag::FIXARRAY, tag::ARRAY16, tag::ARRAY32)
}

const fn collection_format(count: u32, fix: u8, wide16: u8, wide32: u8) -> (u8, Option<Width>) {
    if count <= FIXCOLLECTION_MAX_LEN {
        (fix | count as u8, None)
    } else if count <= 0xFFFF {
        (wide16, Some(Width::Two))
    } else {
        (wide32, Some(Width::Four))
    }
}
