//! MessagePack wire format
//!
//! Tag bytes, value families, smallest-form selection and byte-order
//! normalization. Nothing in this module touches a buffer cursor.

pub mod endian;
pub mod select;
pub mod tag;
mod types;

pub use select::{FIXCOLLECTION_MAX_LEN, FIXSTR_MAX_LEN, NEGATIVE_FIXINT_MIN, POSITIVE_FIXINT_MAX};
pub use tag::Width;
pub use types::Family;
