// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
#![cfg(feature = "test-util")]

//! Byte-exact compatibility of both storage variants with the reference wire vectors.

use wirebuf::testing::{POSITIVE_VARINT_BOUNDARIES, VARINT_WIRE_VECTORS, patterned};
use wirebuf::{Buffer, BufferView, ReadBytes, WriteBytes, varint};

#[test]
fn owned_buffer_emits_reference_bytes() {
    let mut buf = patterned(16);

    for &(value, expected) in VARINT_WIRE_VECTORS {
        for offset in [0, 7, 16 - expected.len()] {
            let written = buf.put_var_u32(offset, value).unwrap();

            assert_eq!(buf.get_slice(offset, written).unwrap(), expected);
            assert_eq!(buf.get_var_u32(offset).unwrap(), (value, written));
        }
    }
}

#[test]
fn borrowed_view_emits_reference_bytes() {
    let mut storage = patterned(16).into_vec();

    for &(value, expected) in VARINT_WIRE_VECTORS {
        let mut view = BufferView::new(&mut storage);
        let written = view.put_var_u32(3, value).unwrap();

        assert_eq!(written, expected.len());
        assert_eq!(view.get_var_u32(3).unwrap(), (value, written));
        assert_eq!(&storage[3..3 + written], expected);
    }
}

#[test]
fn stale_continuation_bytes_never_leak() {
    // Every byte of the patterned buffer has its continuation bit set, so a decoder that reads
    // beyond the written span would produce a different value or run out of bytes.
    let mut buf = patterned(64);

    for offset in 0..32 {
        for &(value, expected_len) in POSITIVE_VARINT_BOUNDARIES {
            assert_eq!(buf.put_positive_varint32(offset, value).unwrap(), expected_len);
            assert_eq!(buf.get_positive_varint32(offset).unwrap(), (value, expected_len));
        }
    }
}

#[test]
fn unchecked_codec_agrees_with_checked() {
    let mut checked = patterned(32);
    let mut unchecked = patterned(32);

    let mut checked_offset = 0;
    let mut unchecked_offset = 0;

    for &(value, _) in VARINT_WIRE_VECTORS.iter().take(6) {
        checked_offset += checked.put_var_u32(checked_offset, value).unwrap();

        // SAFETY: Six values of at most 3 bytes each fit into 32 bytes.
        unchecked_offset += unsafe { unchecked.put_var_u32_unchecked(unchecked_offset, value) };
    }

    assert_eq!(checked_offset, unchecked_offset);
    assert_eq!(checked, unchecked);

    let mut offset = 0;
    for &(value, expected) in VARINT_WIRE_VECTORS.iter().take(6) {
        // SAFETY: We are reading back exactly what was written above.
        let (read, len) = unsafe { unchecked.get_var_u32_unchecked(offset) };

        assert_eq!(read, value);
        assert_eq!(len, expected.len());
        offset += len;
    }
}

#[test]
fn fixed_width_layout_is_little_endian() {
    let mut storage = [0_u8; 30];

    {
        let mut view = BufferView::new(&mut storage);
        view.put(0, 0x0102_u16).unwrap();
        view.put(2, 0x0304_0506_u32).unwrap();
        view.put(6, 0x0708_090A_0B0C_0D0E_u64).unwrap();
        view.put(14, -2_i32).unwrap();
        view.put(18, 1.0_f32).unwrap();
        view.put(22, -2.0_f64).unwrap();
    }

    assert_eq!(
        storage,
        [
            0x02, 0x01, // u16
            0x06, 0x05, 0x04, 0x03, // u32
            0x0E, 0x0D, 0x0C, 0x0B, 0x0A, 0x09, 0x08, 0x07, // u64
            0xFE, 0xFF, 0xFF, 0xFF, // i32
            0x00, 0x00, 0x80, 0x3F, // f32
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xC0, // f64
        ]
    );
}

#[test]
fn encoded_len_predicts_written_len() {
    let mut buf = Buffer::allocate(varint::MAX_ENCODED_LEN).unwrap();

    for &(value, _) in VARINT_WIRE_VECTORS {
        assert_eq!(buf.put_var_u32(0, value).unwrap(), varint::encoded_len(value));
    }
}
