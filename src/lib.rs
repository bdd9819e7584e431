//! Allocation-free MessagePack codec over caller-owned buffers
//!
//! This library encodes typed values into a fixed-capacity output region and
//! decodes them back one value at a time from a borrowed byte slice. It never
//! allocates: all storage belongs to the caller.
//!
//! # Quick Start
//!
//! ```rust
//! use msgpack_slice::{Family, OutputBuffer, Unpacker};
//!
//! let mut storage = [0u8; 64];
//! let mut out = OutputBuffer::new(&mut storage);
//! out.write_map(1)?;
//! out.write_str("age")?;
//! out.write_integer(30)?;
//! let len = out.len();
//!
//! let mut unpacker = Unpacker::new(&storage[..len]);
//! assert_eq!(unpacker.read_map_len()?, 1);
//!
//! let mut key = [0u8; 8];
//! assert_eq!(unpacker.read_str(&mut key)?, "age");
//! assert_eq!(unpacker.peek()?.family, Family::U8);
//! assert_eq!(unpacker.read_int()?, 30);
//! # Ok::<(), msgpack_slice::Error>(())
//! ```
//!
//! # Features
//!
//! - **No allocation** - encoder and unpacker borrow caller memory
//! - **Atomic writes** - a write that does not fit leaves the buffer untouched
//! - **Rewinding reads** - a failed decode never moves the read cursor
//! - **Probe reads** - learn a value's family and length without consuming it
//!
//! Extension types are not supported, and arrays and maps are decoded as
//! headers only: the caller reads the elements with further calls.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod codec;
pub mod format;

pub use codec::{
    Error, ErrorCode, OutputBuffer, Result, Unpacked, Unpacker, last_error, last_error_message,
};
pub use format::{
    FIXCOLLECTION_MAX_LEN, FIXSTR_MAX_LEN, Family, NEGATIVE_FIXINT_MIN, POSITIVE_FIXINT_MAX,
    Width, tag,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
