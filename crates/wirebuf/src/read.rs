// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! We separate out the read accessors for ease of maintenance.

use std::ops::RangeBounds;

use num_traits::FromBytes;

use crate::{Result, bounds, text, varint};

/// Offset-addressed read access to a contiguous range of bytes.
///
/// Fixed-width values are always read in little-endian byte order, so the same bytes decode to
/// the same values on every machine and in every implementation of this wire format.
///
/// Every accessor comes in two forms:
///
/// * A checked form, which validates that the access fits into the addressable bytes and
///   returns [`Error::OutOfBounds`][crate::Error::OutOfBounds] if it does not.
/// * An `unsafe` `_unchecked` form for hot paths where the surrounding logic has already
///   established the bound. Calling it out of bounds is undefined behavior.
///
/// Implemented by both [`Buffer`][crate::Buffer] and [`BufferView`][crate::BufferView].
pub trait ReadBytes {
    /// The addressable bytes.
    fn as_bytes(&self) -> &[u8];

    /// Reads a number of type `T` in little-endian representation at `offset`.
    ///
    /// # Example
    ///
    /// ```
    /// use wirebuf::{Buffer, ReadBytes};
    ///
    /// let buf = Buffer::from(vec![0x34, 0x12, 0xEF, 0xBE, 0xAD, 0xDE]);
    ///
    /// assert_eq!(buf.get::<u16>(0).unwrap(), 0x1234);
    /// assert_eq!(buf.get::<u32>(2).unwrap(), 0xDEAD_BEEF);
    /// assert!(buf.get::<u32>(3).is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`][crate::Error::OutOfBounds] if
    /// `offset + size_of::<T>()` exceeds the addressable bytes.
    #[inline]
    fn get<T: FromBytes>(&self, offset: usize) -> Result<T>
    where
        T::Bytes: Sized + Default,
    {
        let src = bounds::span(self.as_bytes(), offset, size_of::<T::Bytes>())?;
        Ok(decode_le(src))
    }

    /// Reads a number of type `T` in little-endian representation at `offset`,
    /// without bounds checking.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that `offset + size_of::<T>()` does not exceed the
    /// addressable bytes.
    #[inline]
    unsafe fn get_unchecked<T: FromBytes>(&self, offset: usize) -> T
    where
        T::Bytes: Sized + Default,
    {
        let bytes = self.as_bytes();
        let width = size_of::<T::Bytes>();

        debug_assert!(
            offset.checked_add(width).is_some_and(|end| end <= bytes.len()),
            "read of {width} bytes at offset {offset} exceeds {} bytes",
            bytes.len()
        );

        // SAFETY: The caller guarantees that the value lies within the addressable bytes.
        let src = unsafe { bytes.get_unchecked(offset..offset + width) };
        decode_le(src)
    }

    /// Reads the byte at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`][crate::Error::OutOfBounds] if `offset` is not addressable.
    #[inline]
    fn get_byte(&self, offset: usize) -> Result<u8> {
        self.get(offset)
    }

    /// Reads the byte at `offset`, without bounds checking.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that `offset` is less than the number of addressable bytes.
    #[inline]
    unsafe fn get_byte_unchecked(&self, offset: usize) -> u8 {
        // SAFETY: Forwarding the caller's guarantee.
        unsafe { self.get_unchecked(offset) }
    }

    /// Reads a boolean stored as one byte at `offset`. Any non-zero byte reads as `true`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`][crate::Error::OutOfBounds] if `offset` is not addressable.
    #[inline]
    fn get_bool(&self, offset: usize) -> Result<bool> {
        self.get_byte(offset).map(|byte| byte != 0)
    }

    /// Borrows `len` bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`][crate::Error::OutOfBounds] if the range exceeds the
    /// addressable bytes.
    #[inline]
    fn get_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        bounds::span(self.as_bytes(), offset, len)
    }

    /// Copies `dst.len()` bytes starting at `offset` into `dst`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`][crate::Error::OutOfBounds] if the range exceeds the
    /// addressable bytes. `dst` is not modified in that case.
    #[inline]
    fn copy_to_slice(&self, offset: usize, dst: &mut [u8]) -> Result<()> {
        let src = bounds::span(self.as_bytes(), offset, dst.len())?;
        dst.copy_from_slice(src);
        Ok(())
    }

    /// Decodes a variable-length `u32` at `offset`.
    ///
    /// Returns the value and the number of bytes it occupied. See [`varint`] for the format.
    ///
    /// # Errors
    ///
    /// * [`Error::MalformedVarint`][crate::Error::MalformedVarint] if the fifth byte still has
    ///   its continuation bit set.
    /// * [`Error::OutOfBounds`][crate::Error::OutOfBounds] if the addressable bytes end before
    ///   the terminating byte.
    #[inline]
    fn get_var_u32(&self, offset: usize) -> Result<(u32, usize)> {
        varint::decode_u32(self.as_bytes(), offset)
    }

    /// Decodes a variable-length `u32` at `offset`, without bounds or format checking.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that the complete encoded value lies within the
    /// addressable bytes.
    #[inline]
    unsafe fn get_var_u32_unchecked(&self, offset: usize) -> (u32, usize) {
        // SAFETY: Forwarding the caller's guarantee.
        unsafe { varint::decode_u32_unchecked(self.as_bytes(), offset) }
    }

    /// Decodes a non-negative `i32` written by
    /// [`put_positive_varint32()`][crate::WriteBytes::put_positive_varint32] at `offset`.
    ///
    /// Returns the value and the number of bytes it occupied.
    ///
    /// # Example
    ///
    /// ```
    /// use wirebuf::{Buffer, ReadBytes, WriteBytes};
    ///
    /// let mut buf = Buffer::allocate(16).unwrap();
    ///
    /// let written = buf.put_positive_varint32(4, 1 << 20).unwrap();
    /// assert_eq!(written, 3);
    ///
    /// assert_eq!(buf.get_positive_varint32(4).unwrap(), (1 << 20, 3));
    /// ```
    ///
    /// # Errors
    ///
    /// Same as [`get_var_u32()`][Self::get_var_u32].
    #[inline]
    fn get_positive_varint32(&self, offset: usize) -> Result<(i32, usize)> {
        varint::decode_positive_i32(self.as_bytes(), offset)
    }

    /// Materializes a range of bytes as text, mapping each byte to the character with the same
    /// code point. No encoding validation is performed.
    ///
    /// Pass `..` to materialize all addressable bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use wirebuf::{Buffer, ReadBytes};
    ///
    /// let buf = Buffer::from(b"hello, world".to_vec());
    ///
    /// assert_eq!(buf.to_latin1_string(..).unwrap(), "hello, world");
    /// assert_eq!(buf.to_latin1_string(7..).unwrap(), "world");
    /// assert_eq!(buf.to_latin1_string(0..5).unwrap(), "hello");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`][crate::Error::OutOfBounds] if the range exceeds the
    /// addressable bytes.
    fn to_latin1_string(&self, range: impl RangeBounds<usize>) -> Result<String> {
        bounds::range(self.as_bytes(), range).map(text::latin1)
    }

    /// Renders a range of bytes as lowercase hex.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`][crate::Error::OutOfBounds] if the range exceeds the
    /// addressable bytes.
    fn to_hex(&self, range: impl RangeBounds<usize>) -> Result<String> {
        bounds::range(self.as_bytes(), range).map(text::hex)
    }
}

/// Decodes a little-endian `T` from a slice of exactly `size_of::<T::Bytes>()` bytes.
#[inline]
fn decode_le<T: FromBytes>(src: &[u8]) -> T
where
    T::Bytes: Sized + Default,
{
    let mut raw = T::Bytes::default();
    raw.as_mut().copy_from_slice(src);
    T::from_le_bytes(&raw)
}
