//! Bounded output buffer and value encoder
//!
//! An [`OutputBuffer`] appends encoded values into a caller-owned byte region.
//! Every write is all-or-nothing: if the value does not fit, nothing is written
//! and the cursor stays where it was.

use tracing::trace;

use super::error::{Error, Result, record};
use crate::format::endian;
use crate::format::select::{self, IntEncoding};
use crate::format::tag::{self, Layout, Width};

/// Encoder writing into a fixed-capacity, caller-owned region.
///
/// ```rust
/// use msgpack_slice::OutputBuffer;
///
/// let mut storage = [0u8; 16];
/// let mut out = OutputBuffer::new(&mut storage);
/// out.write_u8(0x80)?;
/// assert_eq!(out.as_slice(), &[0xCC, 0x80]);
/// # Ok::<(), msgpack_slice::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct OutputBuffer<'a> {
    buf: Option<&'a mut [u8]>,
    len: usize,
}

impl<'a> OutputBuffer<'a> {
    /// Create an encoder over `region`; its length is the capacity.
    #[must_use]
    pub fn new(region: &'a mut [u8]) -> Self {
        Self {
            buf: Some(region),
            len: 0,
        }
    }

    /// Give the buffer a new backing region and reset the cursor.
    pub fn attach(&mut self, region: &'a mut [u8]) {
        self.buf = Some(region);
        self.len = 0;
    }

    /// Bytes written so far
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Check if nothing has been written
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total capacity (0 without storage)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.as_deref().map_or(0, <[u8]>::len)
    }

    /// Bytes still available
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.capacity() - self.len
    }

    /// The encoded bytes
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        self.buf.as_deref().map_or(&[], |buf| &buf[..self.len])
    }

    /// Rewind the cursor to the start of the region.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Write nil
    pub fn write_nil(&mut self) -> Result<()> {
        record(self.put_byte(tag::NIL))
    }

    /// Write a boolean
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        record(self.put_byte(if value { tag::TRUE } else { tag::FALSE }))
    }

    /// Write `true`
    pub fn write_true(&mut self) -> Result<()> {
        self.write_bool(true)
    }

    /// Write `false`
    pub fn write_false(&mut self) -> Result<()> {
        self.write_bool(false)
    }

    /// Write a signed integer in the smallest form that holds it.
    ///
    /// `[-32, 127]` becomes a single fixint byte; other non-negative values use
    /// the unsigned forms and other negative values the signed forms.
    pub fn write_integer(&mut self, value: i64) -> Result<()> {
        #[allow(clippy::cast_sign_loss)]
        let bits = value as u64;
        record(self.put_int(select::int_encoding(value), bits))
    }

    /// Write an unsigned integer in the smallest form that holds it.
    pub fn write_uint(&mut self, value: u64) -> Result<()> {
        record(self.put_int(select::uint_encoding(value), value))
    }

    /// Write a `uint8` (always two bytes, even for fixint-sized values)
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        record(self.put_scalar(tag::U8, u64::from(value), Width::One))
    }

    /// Write a `uint16`
    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        record(self.put_scalar(tag::U16, u64::from(value), Width::Two))
    }

    /// Write a `uint32`
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        record(self.put_scalar(tag::U32, u64::from(value), Width::Four))
    }

    /// Write a `uint64`
    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        record(self.put_scalar(tag::U64, value, Width::Eight))
    }

    /// Write an `int8`
    pub fn write_s8(&mut self, value: i8) -> Result<()> {
        record(self.put_signed(tag::S8, i64::from(value), Width::One))
    }

    /// Write an `int16`
    pub fn write_s16(&mut self, value: i16) -> Result<()> {
        record(self.put_signed(tag::S16, i64::from(value), Width::Two))
    }

    /// Write an `int32`
    pub fn write_s32(&mut self, value: i32) -> Result<()> {
        record(self.put_signed(tag::S32, i64::from(value), Width::Four))
    }

    /// Write an `int64`
    pub fn write_s64(&mut self, value: i64) -> Result<()> {
        record(self.put_signed(tag::S64, value, Width::Eight))
    }

    /// Write a `float32`
    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        record(self.put_scalar(tag::FLOAT32, u64::from(value.to_bits()), Width::Four))
    }

    /// Write a `float64`
    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        record(self.put_scalar(tag::FLOAT64, value.to_bits(), Width::Eight))
    }

    /// Write a string in the smallest form (fixstr, str8, str16, str32).
    pub fn write_str(&mut self, value: &str) -> Result<()> {
        record(self.put_str(value.as_bytes()))
    }

    /// Write a string as fixstr (at most 31 bytes)
    pub fn write_fixstr(&mut self, value: &str) -> Result<()> {
        record(self.put_fixed_form(tag::FIXSTR, value.as_bytes()))
    }

    /// Write a string as str8
    pub fn write_str8(&mut self, value: &str) -> Result<()> {
        record(self.put_fixed_form(tag::STR8, value.as_bytes()))
    }

    /// Write a string as str16
    pub fn write_str16(&mut self, value: &str) -> Result<()> {
        record(self.put_fixed_form(tag::STR16, value.as_bytes()))
    }

    /// Write a string as str32
    pub fn write_str32(&mut self, value: &str) -> Result<()> {
        record(self.put_fixed_form(tag::STR32, value.as_bytes()))
    }

    /// Write a binary in the smallest form (bin8, bin16, bin32).
    pub fn write_bin(&mut self, value: &[u8]) -> Result<()> {
        record(self.put_bin(value))
    }

    /// Write a binary as bin8
    pub fn write_bin8(&mut self, value: &[u8]) -> Result<()> {
        record(self.put_fixed_form(tag::BIN8, value))
    }

    /// Write a binary as bin16
    pub fn write_bin16(&mut self, value: &[u8]) -> Result<()> {
        record(self.put_fixed_form(tag::BIN16, value))
    }

    /// Write a binary as bin32
    pub fn write_bin32(&mut self, value: &[u8]) -> Result<()> {
        record(self.put_fixed_form(tag::BIN32, value))
    }

    /// Write a map header for `count` key/value pairs.
    ///
    /// The entries themselves follow as `2 * count` further writes.
    pub fn write_map(&mut self, count: u32) -> Result<()> {
        let (tag, prefix) = select::map_format(count);
        record(self.put_len_data(tag, prefix, count, &[]))
    }

    /// Write an array header for `count` elements.
    pub fn write_array(&mut self, count: u32) -> Result<()> {
        let (tag, prefix) = select::array_format(count);
        record(self.put_len_data(tag, prefix, count, &[]))
    }

    /// Write a tag that carries a length, then `data` if present.
    ///
    /// The prefix width follows from `tag`; for the embedded-length tags
    /// (fixstr, fixmap, fixarray) `len` is folded into the tag's low bits.
    /// `data` may only be absent for a zero length or an aggregate header.
    pub fn write_prefixed(&mut self, tag: u8, data: Option<&[u8]>, len: u32) -> Result<()> {
        record(self.put_prefixed(tag, data, len))
    }

    fn put_prefixed(&mut self, tag: u8, data: Option<&[u8]>, len: u32) -> Result<()> {
        let format = tag::classify(tag).ok_or_else(|| invalid("tag does not carry a length"))?;
        match data {
            None if len != 0 && !format.family.is_aggregate() => {
                return Err(invalid("missing data for non-zero length"));
            }
            Some(bytes) if bytes.len() != len as usize => {
                return Err(invalid("data length does not match len"));
            }
            _ => {}
        }

        let (tag, prefix) = match format.layout {
            Layout::Embedded(_) => {
                let mask = tag::embedded_mask(format.family);
                if len > u32::from(mask) {
                    return Err(invalid("length too large for embedded form"));
                }
                #[allow(clippy::cast_possible_truncation)]
                let folded = (tag & !mask) | len as u8;
                (folded, None)
            }
            Layout::Prefixed(width) => {
                if u64::from(len) > width.max_value() {
                    return Err(invalid("length too large for prefix width"));
                }
                (tag, Some(width))
            }
            Layout::Empty | Layout::Immediate(_) | Layout::Scalar(_) => {
                return Err(invalid("tag does not carry a length"));
            }
        };
        self.put_len_data(tag, prefix, len, data.unwrap_or(&[]))
    }

    fn put_fixed_form(&mut self, tag: u8, data: &[u8]) -> Result<()> {
        let len = payload_len(data)?;
        self.put_prefixed(tag, Some(data), len)
    }

    fn put_str(&mut self, data: &[u8]) -> Result<()> {
        let len = payload_len(data)?;
        let (tag, prefix) = select::str_format(len);
        self.put_len_data(tag, prefix, len, data)
    }

    fn put_bin(&mut self, data: &[u8]) -> Result<()> {
        let len = payload_len(data)?;
        let (tag, prefix) = select::bin_format(len);
        self.put_len_data(tag, Some(prefix), len, data)
    }

    fn put_int(&mut self, encoding: IntEncoding, bits: u64) -> Result<()> {
        match encoding {
            #[allow(clippy::cast_possible_truncation)]
            IntEncoding::Fixint => self.put_byte(bits as u8),
            IntEncoding::Unsigned(width) => self.put_scalar(tag::uint(width), bits, width),
            IntEncoding::Signed(width) => self.put_scalar(tag::sint(width), bits, width),
        }
    }

    fn put_signed(&mut self, tag: u8, value: i64, width: Width) -> Result<()> {
        #[allow(clippy::cast_sign_loss)]
        let bits = value as u64;
        self.put_scalar(tag, bits, width)
    }

    fn put_byte(&mut self, byte: u8) -> Result<()> {
        let out = self.claim(1)?;
        out[0] = byte;
        Ok(())
    }

    fn put_scalar(&mut self, tag: u8, bits: u64, width: Width) -> Result<()> {
        let out = self.claim(1 + width.bytes())?;
        out[0] = tag;
        endian::put_uint(&mut out[1..], bits);
        Ok(())
    }

    fn put_len_data(&mut self, tag: u8, prefix: Option<Width>, len: u32, data: &[u8]) -> Result<()> {
        let prefix_len = prefix.map_or(0, Width::bytes);
        let out = self.claim(1 + prefix_len + data.len())?;
        out[0] = tag;
        endian::put_uint(&mut out[1..=prefix_len], u64::from(len));
        out[1 + prefix_len..].copy_from_slice(data);
        Ok(())
    }

    /// Reserve `needed` bytes at the cursor, or fail without touching anything.
    fn claim(&mut self, needed: usize) -> Result<&mut [u8]> {
        let buf = self.buf.as_deref_mut().ok_or(Error::UninitializedStorage)?;
        let available = buf.len() - self.len;
        if needed > available {
            trace!(needed, available, "output buffer full");
            return Err(Error::OutputFull { needed, available });
        }
        let start = self.len;
        self.len += needed;
        Ok(&mut buf[start..start + needed])
    }
}

fn payload_len(data: &[u8]) -> Result<u32> {
    u32::try_from(data.len()).map_err(|_| invalid("payload longer than u32::MAX"))
}

fn invalid(reason: &'static str) -> Error {
    trace!(reason, "rejecting write");
    Error::InvalidParameters { reason }
}
