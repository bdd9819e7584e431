//! Byte-order normalization between host and wire (big-endian) order

/// Copy `src` into `dst`, converting between native and big-endian order.
///
/// The conversion is its own inverse, so the same routine serves the encoder
/// (native to wire) and the unpacker (wire to native). Both slices must have
/// the same length.
#[inline]
pub fn normalize(dst: &mut [u8], src: &[u8]) {
    debug_assert_eq!(dst.len(), src.len(), "endian copy length mismatch");
    if cfg!(target_endian = "big") {
        dst.copy_from_slice(src);
    } else {
        for (out, byte) in dst.iter_mut().zip(src.iter().rev()) {
            *out = *byte;
        }
    }
}

/// Store the low `dst.len()` bytes of `value` in wire order.
#[inline]
pub fn put_uint(dst: &mut [u8], value: u64) {
    let width = dst.len();
    debug_assert!(width <= 8);
    let native = value.to_ne_bytes();
    let low = if cfg!(target_endian = "big") {
        &native[8 - width..]
    } else {
        &native[..width]
    };
    normalize(dst, low);
}

/// Load an unsigned value of `src.len()` bytes stored in wire order.
#[inline]
pub fn get_uint(src: &[u8]) -> u64 {
    let width = src.len();
    debug_assert!(width <= 8);
    let mut native = [0u8; 8];
    let low = if cfg!(target_endian = "big") {
        &mut native[8 - width..]
    } else {
        &mut native[..width]
    };
    normalize(low, src);
    u64::from_ne_bytes(native)
}
