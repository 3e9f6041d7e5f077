// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Variable-length encoding of 32-bit integers.
//!
//! A value is split into groups of 7 bits, starting from the least significant bits. Each group
//! is emitted as one byte, least significant group first. Every byte except the last one has
//! its most significant bit set to signal that more bytes follow. The encoding is minimal:
//! exactly enough bytes are emitted to cover all set bits, and zero encodes as a single `0x00`.
//!
//! | value range          | encoded length |
//! |----------------------|----------------|
//! | `0 ..= 2^7 - 1`      | 1              |
//! | `2^7 ..= 2^14 - 1`   | 2              |
//! | `2^14 ..= 2^21 - 1`  | 3              |
//! | `2^21 ..= 2^28 - 1`  | 4              |
//! | `2^28 ..= 2^32 - 1`  | 5              |
//!
//! The functions here operate on plain byte slices at a caller-tracked offset. Nothing advances
//! implicitly; each function reports how many bytes it wrote or read.
//!
//! ```
//! use wirebuf::varint;
//!
//! let mut bytes = [0_u8; 8];
//!
//! let written = varint::encode_u32(&mut bytes, 2, 300).unwrap();
//! assert_eq!(written, 2);
//! assert_eq!(&bytes[2..4], &[0xAC, 0x02]);
//!
//! assert_eq!(varint::decode_u32(&bytes, 2).unwrap(), (300, 2));
//! ```

use crate::{Error, Result, bounds};

/// The maximum number of bytes a 32-bit value can occupy when encoded.
pub const MAX_ENCODED_LEN: usize = 5;

const CONTINUATION: u8 = 0x80;
const PAYLOAD: u8 = 0x7F;
const GROUP_BITS: u32 = 7;

/// Returns the number of bytes that `value` occupies when encoded.
///
/// ```
/// use wirebuf::varint::encoded_len;
///
/// assert_eq!(encoded_len(0), 1);
/// assert_eq!(encoded_len(127), 1);
/// assert_eq!(encoded_len(128), 2);
/// assert_eq!(encoded_len(u32::MAX), 5);
/// ```
#[must_use]
#[inline]
pub const fn encoded_len(value: u32) -> usize {
    // Zero still needs one byte, so we count it as if it had one significant bit.
    let significant_bits = u32::BITS - (value | 1).leading_zeros();
    significant_bits.div_ceil(GROUP_BITS) as usize
}

/// Encodes `value` into `dst` starting at `offset`.
///
/// Returns the number of bytes written. Bytes after the encoded value are not touched.
///
/// # Errors
///
/// Returns [`Error::OutOfBounds`] if the encoded value does not fit into `dst` at `offset`.
/// Nothing is written in that case.
pub fn encode_u32(dst: &mut [u8], offset: usize, value: u32) -> Result<usize> {
    let len = encoded_len(value);
    let dst = bounds::span_mut(dst, offset, len)?;

    write_groups(dst, value);
    Ok(len)
}

/// Encodes `value` into `dst` starting at `offset`, without bounds checking.
///
/// Returns the number of bytes written.
///
/// # Safety
///
/// The caller must guarantee that `offset + encoded_len(value) <= dst.len()`.
#[inline]
pub unsafe fn encode_u32_unchecked(dst: &mut [u8], offset: usize, value: u32) -> usize {
    let len = encoded_len(value);
    debug_assert!(
        offset.checked_add(len).is_some_and(|end| end <= dst.len()),
        "varint of {len} bytes at offset {offset} does not fit into {} bytes",
        dst.len()
    );

    // SAFETY: The caller guarantees that the encoded value fits into `dst` at `offset`.
    let dst = unsafe { dst.get_unchecked_mut(offset..offset + len) };

    write_groups(dst, value);
    len
}

/// Decodes a value starting at `offset` in `src`.
///
/// Returns the decoded value and the number of bytes it occupied. Bytes after the terminating
/// byte are not inspected. Payload bits of the fifth byte that do not fit into 32 bits are
/// discarded.
///
/// # Errors
///
/// * [`Error::MalformedVarint`] if the fifth byte still has its continuation bit set.
/// * [`Error::OutOfBounds`] if `src` ends before the terminating byte.
pub fn decode_u32(src: &[u8], offset: usize) -> Result<(u32, usize)> {
    let available = src.get(offset..).unwrap_or_default();

    let mut value = 0_u32;

    for (index, &byte) in available.iter().take(MAX_ENCODED_LEN).enumerate() {
        value |= group_value(byte, index);

        if byte & CONTINUATION == 0 {
            return Ok((value, index + 1));
        }
    }

    if available.len() >= MAX_ENCODED_LEN {
        Err(Error::MalformedVarint { offset })
    } else {
        // We ran out of input while the last byte we saw still promised more.
        Err(Error::out_of_bounds(offset, available.len() + 1, src.len()))
    }
}

/// Decodes a value starting at `offset` in `src`, without bounds or format checking.
///
/// Returns the decoded value and the number of bytes it occupied. If the fifth byte still has
/// its continuation bit set, decoding stops there and reports five bytes.
///
/// # Safety
///
/// The caller must guarantee that `src` contains the complete encoded value at `offset`,
/// i.e. that a byte without the continuation bit, or the fifth byte, lies within `src`.
#[must_use]
#[inline]
pub unsafe fn decode_u32_unchecked(src: &[u8], offset: usize) -> (u32, usize) {
    let mut value = 0_u32;

    for index in 0..MAX_ENCODED_LEN {
        debug_assert!(
            offset + index < src.len(),
            "varint at offset {offset} runs past the end of {} bytes",
            src.len()
        );

        // SAFETY: The caller guarantees that every byte up to the terminating one is in bounds.
        let byte = unsafe { *src.get_unchecked(offset + index) };
        value |= group_value(byte, index);

        if byte & CONTINUATION == 0 {
            return (value, index + 1);
        }
    }

    (value, MAX_ENCODED_LEN)
}

/// Encodes a non-negative `i32` into `dst` starting at `offset`.
///
/// Negative values are encoded as their two's complement bit pattern, which always takes
/// [`MAX_ENCODED_LEN`] bytes, and decode back to the same negative value via
/// [`decode_positive_i32()`].
///
/// # Errors
///
/// Returns [`Error::OutOfBounds`] if the encoded value does not fit into `dst` at `offset`.
#[inline]
pub fn encode_positive_i32(dst: &mut [u8], offset: usize, value: i32) -> Result<usize> {
    encode_u32(dst, offset, value.cast_unsigned())
}

/// Decodes a value written by [`encode_positive_i32()`].
///
/// # Errors
///
/// Same as [`decode_u32()`].
#[inline]
pub fn decode_positive_i32(src: &[u8], offset: usize) -> Result<(i32, usize)> {
    decode_u32(src, offset).map(|(value, len)| (value.cast_signed(), len))
}

/// Fills `dst`, whose length must be `encoded_len(value)`, with the groups of `value`.
#[inline]
fn write_groups(dst: &mut [u8], mut value: u32) {
    let last = dst.len().saturating_sub(1);

    for (index, slot) in dst.iter_mut().enumerate() {
        #[expect(clippy::cast_possible_truncation, reason = "masked to 7 bits")]
        let group = (value & u32::from(PAYLOAD)) as u8;
        value >>= GROUP_BITS;

        *slot = if index == last { group } else { group | CONTINUATION };
    }

    debug_assert_eq!(value, 0, "destination too short for value");
}

#[inline]
fn group_value(byte: u8, index: usize) -> u32 {
    // Bits of the fifth group beyond the 32nd are shifted out and discarded.
    u32::from(byte & PAYLOAD) << (GROUP_BITS as usize * index)
}
