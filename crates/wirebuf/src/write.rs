// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! We separate out the mutation accessors for ease of maintenance.

use num_traits::ToBytes;

use crate::{ReadBytes, Result, bounds, varint};

/// Offset-addressed write access to a contiguous range of bytes.
///
/// Writes patch bytes in place. They never change the number of addressable bytes and never
/// allocate; grow the owning [`Buffer`][crate::Buffer] explicitly before writing past its end.
///
/// As with [`ReadBytes`], every accessor comes in a checked form and an `unsafe`
/// `_unchecked` form, and fixed-width values are always written in little-endian byte order.
pub trait WriteBytes: ReadBytes {
    /// The addressable bytes, for writing.
    fn as_bytes_mut(&mut self) -> &mut [u8];

    /// Writes a number of type `T` in little-endian representation at `offset`.
    ///
    /// # Example
    ///
    /// ```
    /// use wirebuf::{Buffer, ReadBytes, WriteBytes};
    ///
    /// let mut buf = Buffer::allocate(8).unwrap();
    ///
    /// buf.put(0, 0x1234_u16).unwrap();
    /// buf.put(2, 1.5_f32).unwrap();
    ///
    /// assert_eq!(buf.get_slice(0, 2).unwrap(), &[0x34, 0x12]);
    /// assert_eq!(buf.get::<f32>(2).unwrap(), 1.5);
    /// assert!(buf.put(6, 0_u32).is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`][crate::Error::OutOfBounds] if
    /// `offset + size_of::<T>()` exceeds the addressable bytes. Nothing is written in that case.
    #[inline]
    fn put<T: ToBytes>(&mut self, offset: usize, value: T) -> Result<()> {
        let bytes = value.to_le_bytes();
        let src = bytes.as_ref();

        bounds::span_mut(self.as_bytes_mut(), offset, src.len())?.copy_from_slice(src);
        Ok(())
    }

    /// Writes a number of type `T` in little-endian representation at `offset`,
    /// without bounds checking.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that `offset + size_of::<T>()` does not exceed the
    /// addressable bytes.
    #[inline]
    unsafe fn put_unchecked<T: ToBytes>(&mut self, offset: usize, value: T) {
        let bytes = value.to_le_bytes();
        let src = bytes.as_ref();
        let dst = self.as_bytes_mut();

        debug_assert!(
            offset.checked_add(src.len()).is_some_and(|end| end <= dst.len()),
            "write of {} bytes at offset {offset} exceeds {} bytes",
            src.len(),
            dst.len()
        );

        // SAFETY: The caller guarantees that the value fits into the addressable bytes.
        let dst = unsafe { dst.get_unchecked_mut(offset..offset + src.len()) };
        dst.copy_from_slice(src);
    }

    /// Writes a byte at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`][crate::Error::OutOfBounds] if `offset` is not addressable.
    #[inline]
    fn put_byte(&mut self, offset: usize, value: u8) -> Result<()> {
        self.put(offset, value)
    }

    /// Writes a byte at `offset`, without bounds checking.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that `offset` is less than the number of addressable bytes.
    #[inline]
    unsafe fn put_byte_unchecked(&mut self, offset: usize, value: u8) {
        // SAFETY: Forwarding the caller's guarantee.
        unsafe { self.put_unchecked(offset, value) }
    }

    /// Writes a boolean as one byte (`0` or `1`) at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`][crate::Error::OutOfBounds] if `offset` is not addressable.
    #[inline]
    fn put_bool(&mut self, offset: usize, value: bool) -> Result<()> {
        self.put_byte(offset, u8::from(value))
    }

    /// Copies `src` into the addressable bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`][crate::Error::OutOfBounds] if `src` does not fit at
    /// `offset`. Nothing is written in that case.
    #[inline]
    fn put_slice(&mut self, offset: usize, src: &[u8]) -> Result<()> {
        bounds::span_mut(self.as_bytes_mut(), offset, src.len())?.copy_from_slice(src);
        Ok(())
    }

    /// Encodes `value` as a variable-length `u32` at `offset`.
    ///
    /// Returns the number of bytes written. See [`varint`] for the format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`][crate::Error::OutOfBounds] if the encoded value does not
    /// fit at `offset`. Nothing is written in that case.
    #[inline]
    fn put_var_u32(&mut self, offset: usize, value: u32) -> Result<usize> {
        varint::encode_u32(self.as_bytes_mut(), offset, value)
    }

    /// Encodes `value` as a variable-length `u32` at `offset`, without bounds checking.
    ///
    /// Returns the number of bytes written.
    ///
    /// # Example
    ///
    /// ```
    /// use wirebuf::{Buffer, WriteBytes, varint};
    ///
    /// let values = [1_u32, 200, 70_000];
    ///
    /// // Worst case for every value, so no write below can go out of bounds.
    /// let mut buf = Buffer::allocate(values.len() * varint::MAX_ENCODED_LEN).unwrap();
    ///
    /// let mut offset = 0;
    /// for value in values {
    ///     // SAFETY: We allocated MAX_ENCODED_LEN bytes for every value.
    ///     offset += unsafe { buf.put_var_u32_unchecked(offset, value) };
    /// }
    ///
    /// assert_eq!(offset, 1 + 2 + 3);
    /// ```
    ///
    /// # Safety
    ///
    /// The caller must guarantee that `offset + varint::encoded_len(value)` does not exceed
    /// the addressable bytes. Reserving [`varint::MAX_ENCODED_LEN`] bytes is always enough.
    #[inline]
    unsafe fn put_var_u32_unchecked(&mut self, offset: usize, value: u32) -> usize {
        // SAFETY: Forwarding the caller's guarantee.
        unsafe { varint::encode_u32_unchecked(self.as_bytes_mut(), offset, value) }
    }

    /// Encodes a non-negative `i32` as a variable-length integer at `offset`.
    ///
    /// Returns the number of bytes written, between 1 and [`varint::MAX_ENCODED_LEN`].
    /// Negative values are encoded as their two's complement bit pattern and always take
    /// five bytes; they decode back to the same negative value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`][crate::Error::OutOfBounds] if the encoded value does not
    /// fit at `offset`. Nothing is written in that case.
    #[inline]
    fn put_positive_varint32(&mut self, offset: usize, value: i32) -> Result<usize> {
        varint::encode_positive_i32(self.as_bytes_mut(), offset, value)
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    struct Scratch([u8; 8]);

    impl ReadBytes for Scratch {
        fn as_bytes(&self) -> &[u8] {
            &self.0
        }
    }

    impl WriteBytes for Scratch {
        fn as_bytes_mut(&mut self) -> &mut [u8] {
            &mut self.0
        }
    }

    #[test]
    fn little_endian_layout() {
        let mut scratch = Scratch([0; 8]);

        scratch.put(0, 0xDEAD_BEEF_u32).unwrap();
        scratch.put(4, -2_i16).unwrap();
        scratch.put(6, 0x0102_u16).unwrap();

        assert_eq!(scratch.0, [0xEF, 0xBE, 0xAD, 0xDE, 0xFE, 0xFF, 0x02, 0x01]);
    }

    #[test]
    fn float_bits_are_preserved() {
        let mut scratch = Scratch([0; 8]);

        scratch.put(0, std::f64::consts::PI).unwrap();
        assert_eq!(scratch.get::<f64>(0).unwrap().to_bits(), std::f64::consts::PI.to_bits());

        scratch.put(3, f32::NAN).unwrap();
        assert_eq!(scratch.get::<f32>(3).unwrap().to_bits(), f32::NAN.to_bits());
    }

    #[test]
    fn out_of_bounds_writes_nothing() {
        let mut scratch = Scratch([0xAA; 8]);

        assert!(matches!(
            scratch.put(5, 0_u32),
            Err(Error::OutOfBounds {
                offset: 5,
                len: 4,
                buffer_len: 8
            })
        ));
        assert!(matches!(scratch.put_slice(7, &[1, 2]), Err(Error::OutOfBounds { .. })));
        assert!(matches!(scratch.put_byte(8, 1), Err(Error::OutOfBounds { .. })));
        assert!(matches!(scratch.put_var_u32(6, 1 << 14), Err(Error::OutOfBounds { .. })));

        assert_eq!(scratch.0, [0xAA; 8]);
    }

    #[test]
    fn unchecked_writes() {
        let mut scratch = Scratch([0; 8]);

        // SAFETY: Bytes 0..4 are within the 8 bytes of scratch space.
        unsafe { scratch.put_unchecked(0, 0x0807_0605_u32) };

        // SAFETY: Byte 4 is within the scratch space.
        unsafe { scratch.put_byte_unchecked(4, 0x09) };

        // SAFETY: The two encoded bytes land on bytes 5..7.
        let written = unsafe { scratch.put_var_u32_unchecked(5, 300) };
        assert_eq!(written, 2);

        assert_eq!(scratch.0, [0x05, 0x06, 0x07, 0x08, 0x09, 0xAC, 0x02, 0x00]);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "write of 4 bytes at offset 2 exceeds 4 bytes")]
    fn unchecked_write_past_end_panics_in_debug() {
        let mut scratch = Scratch([0; 8]);
        let mut view = crate::BufferView::new(&mut scratch.0[..4]);

        // SAFETY: Deliberately violated; debug builds assert the contract before touching memory.
        unsafe { view.put_unchecked(2, 0_u32) };
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "varint of 5 bytes at offset 2 does not fit into 4 bytes")]
    fn unchecked_varint_past_end_panics_in_debug() {
        let mut scratch = Scratch([0; 8]);
        let mut view = crate::BufferView::new(&mut scratch.0[..4]);

        // SAFETY: Deliberately violated; debug builds assert the contract before touching memory.
        _ = unsafe { view.put_var_u32_unchecked(2, u32::MAX) };
    }

    #[test]
    fn bools_and_slices() {
        let mut scratch = Scratch([0xFF; 8]);

        scratch.put_bool(0, false).unwrap();
        scratch.put_bool(1, true).unwrap();
        scratch.put_slice(2, b"abc").unwrap();

        assert_eq!(&scratch.0[..5], &[0x00, 0x01, b'a', b'b', b'c']);
        assert!(!scratch.get_bool(0).unwrap());
        assert!(scratch.get_bool(1).unwrap());
    }

    #[test]
    fn positive_varint_round_trip() {
        let mut scratch = Scratch([0; 8]);

        assert_eq!(scratch.put_positive_varint32(1, 1 << 27).unwrap(), 4);
        assert_eq!(scratch.get_positive_varint32(1).unwrap(), (1 << 27, 4));

        assert_eq!(scratch.put_positive_varint32(3, -7).unwrap(), 5);
        assert_eq!(scratch.get_positive_varint32(3).unwrap(), (-7, 5));
    }
}
