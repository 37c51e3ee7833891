//! Byte-walk kernels over MSB-first packed buffers.
//!
//! Bit 0 of a buffer is the most significant bit of byte 0. A value of
//! `width` bits starting at bit `pos` is stored most-significant bit first and
//! may start and end anywhere inside a byte.

/// Largest value representable in `width` bits.
#[inline]
pub const fn max_value(width: u32) -> u64 {
    if width >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

/// Exact number of bytes needed for `length` values of `width` bits, or
/// `None` if the bit count overflows `usize`.
#[inline]
pub const fn byte_len(length: usize, width: u32) -> Option<usize> {
    match length.checked_mul(width as usize) {
        Some(bits) => Some(bits.div_ceil(8)),
        None => None,
    }
}

/// Masks selecting the bits of one byte that belong to the current value.
///
/// `offset` is how many leading bits of the byte belong to earlier values,
/// `remaining` how many bits of the value are still to be visited. Returns
/// `(taken, trailing, mask)`: the number of value bits in this byte, the
/// number of low bits after them, and the mask covering exactly those
/// `taken` bits.
#[inline(always)]
fn byte_span(offset: u32, remaining: u32) -> (u32, u32, u8) {
    let available = 8 - offset;
    let taken = remaining.min(available);
    let trailing = available - taken;
    let mask = (0xFFu8 >> offset) & (0xFFu8 << trailing);
    (taken, trailing, mask)
}

/// Reads the `width`-bit value starting at bit `bit_pos`.
///
/// # Panics
///
/// Panics if the value extends past the end of `slice`.
pub fn get_bits(slice: &[u8], bit_pos: usize, width: u32) -> u64 {
    debug_assert!(width <= u64::BITS);

    let mut byte = bit_pos / 8;
    let mut offset = (bit_pos % 8) as u32;
    let mut remaining = width;
    let mut value = 0u64;

    while remaining > 0 {
        let (taken, trailing, mask) = byte_span(offset, remaining);
        let chunk = (slice[byte] & mask) >> trailing;
        value = (value << taken) | u64::from(chunk);

        remaining -= taken;
        offset = 0;
        byte += 1;
    }

    value
}

/// Writes the low `width` bits of `value` starting at bit `bit_pos`.
///
/// Higher bits of `value` are discarded. Bits of neighbouring values that
/// share a byte with this one are preserved.
///
/// # Panics
///
/// Panics if the value extends past the end of `slice`.
pub fn set_bits(slice: &mut [u8], bit_pos: usize, width: u32, value: u64) {
    debug_assert!(width <= u64::BITS);

    let value = value & max_value(width);
    let mut byte = bit_pos / 8;
    let mut offset = (bit_pos % 8) as u32;
    let mut remaining = width;

    while remaining > 0 {
        let (taken, trailing, mask) = byte_span(offset, remaining);
        remaining -= taken;

        // next `taken` most significant bits still to be written
        let chunk = (value >> remaining) as u8 & (0xFFu8 >> (8 - taken));
        slice[byte] = (slice[byte] & !mask) | (chunk << trailing);

        offset = 0;
        byte += 1;
    }
}
