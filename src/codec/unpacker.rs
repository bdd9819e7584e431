//! Single-value unpacker over a borrowed byte slice
//!
//! [`Unpacker::decode`] reads exactly one value per call. Parsing runs on a
//! working copy of the cursor; the real cursor only moves when the call
//! succeeds, so a failed call always leaves it where it was.

use tracing::trace;

use super::error::{Error, Result, record};
use crate::format::endian;
use crate::format::tag::{self, Layout};
use crate::format::Family;

/// Classification and length of a decoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unpacked {
    /// Concrete family found on the wire
    pub family: Family,
    /// Payload length in bytes, or element count for array/map headers
    pub len: u32,
}

/// Cursor over a caller-owned input region.
///
/// ```rust
/// use msgpack_slice::{Family, Unpacker};
///
/// let input = [0xCD, 0xA5, 0x5A];
/// let mut unpacker = Unpacker::new(&input);
///
/// // Probe: learn the family and length without consuming the value.
/// let probe = unpacker.decode(None, Family::Any)?;
/// assert_eq!((probe.family, probe.len), (Family::U16, 2));
/// assert_eq!(unpacker.position(), 0);
///
/// let mut out = [0u8; 2];
/// unpacker.decode(Some(&mut out[..]), Family::Integer)?;
/// assert_eq!(u16::from_ne_bytes(out), 0xA55A);
/// assert!(unpacker.is_empty());
/// # Ok::<(), msgpack_slice::Error>(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct Unpacker<'a> {
    buf: Option<&'a [u8]>,
    pos: usize,
}

impl<'a> Unpacker<'a> {
    /// Create an unpacker positioned at the start of `input`.
    #[must_use]
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_position(input, 0)
    }

    /// Create an unpacker starting at `position` (clamped to the input length).
    #[must_use]
    pub fn with_position(input: &'a [u8], position: usize) -> Self {
        Self {
            buf: Some(input),
            pos: position.min(input.len()),
        }
    }

    /// Current read offset
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Total input length (0 without input)
    #[must_use]
    pub fn input_len(&self) -> usize {
        self.buf.map_or(0, <[u8]>::len)
    }

    /// Bytes not yet consumed
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.input_len() - self.pos
    }

    /// Check if all input has been consumed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Decode one value.
    ///
    /// With `dest` absent the call is a probe: it reports the family and
    /// payload length and leaves the cursor in place. With `dest` present the
    /// payload is copied into it (numbers in native byte order, strings and
    /// binaries verbatim) and the cursor moves past the value.
    ///
    /// Two kinds of value are consumed even by a probe, because they have no
    /// payload for a later call to read: nil, and array/map headers (whose
    /// `len` is the element count; the elements follow as further values).
    ///
    /// `filter` restricts the accepted family; any member of the filter's
    /// group passes (`Family::U8` accepts an `int64`).
    ///
    /// # Errors
    ///
    /// - [`Error::UninitializedStorage`] if the unpacker has no input
    /// - [`Error::EndOfInput`] if the tag, length prefix or payload is cut off
    /// - [`Error::UnknownTag`] for reserved and extension tags
    /// - [`Error::InvalidParameters`] if `dest` is present but empty
    /// - [`Error::UnexpectedType`] if the value does not pass `filter`
    /// - [`Error::OutputFull`] if `dest` is shorter than the payload
    ///
    /// The cursor is unchanged after every error.
    pub fn decode(&mut self, dest: Option<&mut [u8]>, filter: Family) -> Result<Unpacked> {
        record(self.unpack(dest, filter))
    }

    /// Family and length of the next value, without moving the cursor.
    pub fn peek(&mut self) -> Result<Unpacked> {
        let start = self.pos;
        let result = self.decode(None, Family::Any);
        self.pos = start;
        result
    }

    /// Consume a nil
    pub fn read_nil(&mut self) -> Result<()> {
        self.decode(None, Family::Nil).map(|_| ())
    }

    /// Consume a boolean
    pub fn read_bool(&mut self) -> Result<bool> {
        let mut raw = [0u8; 1];
        self.decode(Some(&mut raw[..]), Family::Bool)?;
        Ok(raw[0] != 0)
    }

    /// Consume an integer of any width that fits in `i64`.
    pub fn read_int(&mut self) -> Result<i64> {
        let start = self.pos;
        let (family, value) = self.read_integer()?;
        i64::try_from(value).or_else(|_| self.reject(start, Family::S64, family))
    }

    /// Consume a non-negative integer of any width.
    pub fn read_uint(&mut self) -> Result<u64> {
        let start = self.pos;
        let (family, value) = self.read_integer()?;
        u64::try_from(value).or_else(|_| self.reject(start, Family::U64, family))
    }

    /// Consume a `float32`
    pub fn read_f32(&mut self) -> Result<f32> {
        let start = self.pos;
        let mut raw = [0u8; 8];
        let unpacked = self.decode(Some(&mut raw[..]), Family::Single)?;
        if unpacked.family != Family::Single {
            return self.reject(start, Family::Single, unpacked.family);
        }
        Ok(f32::from_ne_bytes([raw[0], raw[1], raw[2], raw[3]]))
    }

    /// Consume a float of either width, widening `float32`.
    pub fn read_f64(&mut self) -> Result<f64> {
        let mut raw = [0u8; 8];
        let unpacked = self.decode(Some(&mut raw[..]), Family::Float)?;
        Ok(match unpacked.family {
            Family::Single => f64::from(f32::from_ne_bytes([raw[0], raw[1], raw[2], raw[3]])),
            _ => f64::from_ne_bytes(raw),
        })
    }

    /// Consume a string into `dest` and return it as `&str`.
    ///
    /// `dest` must be non-empty. Invalid UTF-8 is rejected and not consumed.
    pub fn read_str<'b>(&mut self, dest: &'b mut [u8]) -> Result<&'b str> {
        let start = self.pos;
        let unpacked = self.decode(Some(&mut *dest), Family::Str)?;
        let dest: &'b [u8] = dest;
        let bytes = &dest[..unpacked.len as usize];
        std::str::from_utf8(bytes).or_else(|err| {
            self.pos = start;
            trace!(offset = start, valid_up_to = err.valid_up_to(), "string is not UTF-8");
            record(Err(Error::InvalidUtf8 {
                valid_up_to: err.valid_up_to(),
            }))
        })
    }

    /// Consume a binary into `dest` and return the filled part.
    pub fn read_bin<'b>(&mut self, dest: &'b mut [u8]) -> Result<&'b [u8]> {
        let unpacked = self.decode(Some(&mut *dest), Family::Bin)?;
        let dest: &'b [u8] = dest;
        Ok(&dest[..unpacked.len as usize])
    }

    /// Consume a map header and return its entry count.
    pub fn read_map_len(&mut self) -> Result<u32> {
        self.decode(None, Family::Map).map(|unpacked| unpacked.len)
    }

    /// Consume an array header and return its element count.
    pub fn read_array_len(&mut self) -> Result<u32> {
        self.decode(None, Family::Array).map(|unpacked| unpacked.len)
    }

    fn read_integer(&mut self) -> Result<(Family, i128)> {
        let mut raw = [0u8; 8];
        let unpacked = self.decode(Some(&mut raw[..]), Family::Integer)?;
        Ok((unpacked.family, native_integer(unpacked.family, &raw)))
    }

    /// Undo a committed decode whose value the typed reader cannot return.
    fn reject<T>(&mut self, start: usize, expected: Family, found: Family) -> Result<T> {
        self.pos = start;
        trace!(offset = start, %expected, %found, "value out of range for reader");
        record(Err(Error::UnexpectedType { expected, found }))
    }

    fn unpack(&mut self, dest: Option<&mut [u8]>, filter: Family) -> Result<Unpacked> {
        let input = self.buf.ok_or(Error::UninitializedStorage)?;
        let start = self.pos;
        let mut cursor = Cursor { input, pos: start };

        let tag = cursor.byte()?;
        let format = tag::classify(tag).ok_or_else(|| {
            trace!(tag, offset = start, "unknown tag");
            Error::UnknownTag { tag, offset: start }
        })?;
        let family = format.family;

        if family != Family::Nil && dest.as_deref().is_some_and(<[u8]>::is_empty) {
            return Err(Error::InvalidParameters {
                reason: "destination has zero capacity",
            });
        }

        let len = match format.layout {
            Layout::Empty => 0,
            Layout::Immediate(_) => 1,
            #[allow(clippy::cast_possible_truncation)]
            Layout::Scalar(width) => width.bytes() as u32,
            Layout::Embedded(len) => len,
            #[allow(clippy::cast_possible_truncation)]
            Layout::Prefixed(width) => endian::get_uint(cursor.take(width.bytes())?) as u32,
        };

        if !filter.accepts(family) {
            trace!(offset = start, expected = %filter, found = %family, "type filter rejected value");
            return Err(Error::UnexpectedType {
                expected: filter,
                found: family,
            });
        }

        let unpacked = Unpacked { family, len };
        match (format.layout, dest) {
            (Layout::Empty, _) => {}
            _ if family.is_aggregate() => {}
            (Layout::Immediate(value), Some(dest)) => dest[0] = value,
            (_, None) => return Ok(unpacked),
            (layout, Some(dest)) => {
                let needed = len as usize;
                if dest.len() < needed {
                    trace!(needed, available = dest.len(), "destination too small");
                    return Err(Error::OutputFull {
                        needed,
                        available: dest.len(),
                    });
                }
                let payload = cursor.take(needed)?;
                if matches!(layout, Layout::Scalar(_)) {
                    endian::normalize(&mut dest[..needed], payload);
                } else {
                    dest[..needed].copy_from_slice(payload);
                }
            }
        }

        self.pos = cursor.pos;
        Ok(unpacked)
    }
}

/// Working read position; dropped without effect when a decode fails.
struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, needed: usize) -> Result<&'a [u8]> {
        let available = self.input.len().saturating_sub(self.pos);
        if needed > available {
            trace!(needed, available, offset = self.pos, "end of input");
            return Err(Error::EndOfInput { needed, available });
        }
        let bytes = &self.input[self.pos..self.pos + needed];
        self.pos += needed;
        Ok(bytes)
    }

    fn byte(&mut self) -> Result<u8> {
        self.take(1).map(|bytes| bytes[0])
    }
}

/// Widen an integer the unpacker stored in native order.
fn native_integer(family: Family, raw: &[u8; 8]) -> i128 {
    let [b0, b1, b2, b3, ..] = *raw;
    match family {
        Family::S8 => i128::from(i8::from_ne_bytes([b0])),
        Family::S16 => i128::from(i16::from_ne_bytes([b0, b1])),
        Family::U16 => i128::from(u16::from_ne_bytes([b0, b1])),
        Family::S32 => i128::from(i32::from_ne_bytes([b0, b1, b2, b3])),
        Family::U32 => i128::from(u32::from_ne_bytes([b0, b1, b2, b3])),
        Family::S64 => i128::from(i64::from_ne_bytes(*raw)),
        Family::U64 => i128::from(u64::from_ne_bytes(*raw)),
        _ => i128::from(b0),
    }
}
