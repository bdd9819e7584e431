//! Encoder and unpacker over caller-owned memory
//!
//! Neither side allocates. The caller supplies the output region for
//! [`OutputBuffer`] and the input slice for [`Unpacker`]; both borrow it for
//! their whole lifetime.

mod buffer;
mod error;
mod unpacker;

pub use buffer::OutputBuffer;
pub use error::{Error, ErrorCode, Result, last_error, last_error_message};
pub use unpacker::{Unpacked, Unpacker};
