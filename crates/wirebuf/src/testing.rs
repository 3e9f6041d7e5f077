// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Shared data for tests and benchmarks of code that uses this wire format.

use crate::Buffer;

/// Known-good encodings of variable-length `u32` values at every length class boundary.
///
/// Any conforming implementation of the format must produce exactly these bytes.
pub const VARINT_WIRE_VECTORS: &[(u32, &[u8])] = &[
    (0, &[0x00]),
    (1, &[0x01]),
    (127, &[0x7F]),
    (128, &[0x80, 0x01]),
    (300, &[0xAC, 0x02]),
    (16_383, &[0xFF, 0x7F]),
    (16_384, &[0x80, 0x80, 0x01]),
    (2_097_151, &[0xFF, 0xFF, 0x7F]),
    (2_097_152, &[0x80, 0x80, 0x80, 0x01]),
    (268_435_455, &[0xFF, 0xFF, 0xFF, 0x7F]),
    (268_435_456, &[0x80, 0x80, 0x80, 0x80, 0x01]),
    (u32::MAX, &[0xFF, 0xFF, 0xFF, 0xFF, 0x0F]),
];

/// Non-negative `i32` values at the edges of each length class, with their encoded length.
pub const POSITIVE_VARINT_BOUNDARIES: &[(i32, usize)] = &[
    (1, 1),
    (1 << 6, 1),
    (1 << 7, 2),
    (1 << 13, 2),
    (1 << 14, 3),
    (1 << 20, 3),
    (1 << 21, 4),
    (1 << 27, 4),
    (1 << 28, 5),
    (1 << 30, 5),
];

/// Creates a buffer of `len` bytes that all have the varint continuation bit set.
///
/// A varint decoder that reads past the end of what was written will run into these bytes and
/// produce a wrong value, which makes stale-byte bugs visible.
#[must_use]
pub fn patterned(len: usize) -> Buffer {
    #[expect(clippy::cast_possible_truncation, reason = "reduced modulo 251 first")]
    let data = (0..len).map(|i| (i % 251) as u8 | 0x80).collect::<Vec<_>>();

    Buffer::from(data)
}
