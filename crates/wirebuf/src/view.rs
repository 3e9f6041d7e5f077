// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::{self, Debug};

use crate::text::HexPreview;
use crate::{ReadBytes, WriteBytes};

/// A non-owning, randomly addressable view over bytes owned by someone else.
///
/// The view offers the same [`ReadBytes`] and [`WriteBytes`] accessors as an owned
/// [`Buffer`][crate::Buffer] but cannot grow: its length is fixed to the length of the
/// borrowed slice.
///
/// The view is only valid while the external owner lends out the bytes, which the `'a`
/// lifetime ties to the borrow it was created from.
///
/// # Example
///
/// ```
/// use wirebuf::{BufferView, ReadBytes, WriteBytes};
///
/// let mut frame = [0_u8; 12];
///
/// // The view borrows `frame` until it goes out of scope.
/// let mut view = BufferView::new(&mut frame);
/// view.put(0, 7_u32).unwrap();
/// let len = view.put_var_u32(4, 1 << 21).unwrap();
///
/// assert_eq!(view.get_var_u32(4).unwrap(), (1 << 21, len));
/// assert_eq!(&frame[..4], &[7, 0, 0, 0]);
/// ```
#[derive(PartialEq, Eq, Hash)]
pub struct BufferView<'a> {
    data: &'a mut [u8],
}

impl<'a> BufferView<'a> {
    /// Creates a view over `data`, which stays borrowed for the lifetime of the view.
    #[must_use]
    #[inline]
    pub fn new(data: &'a mut [u8]) -> Self {
        Self { data }
    }

    /// The number of addressable bytes.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether there are no addressable bytes.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The addressable bytes.
    #[must_use]
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        self.data
    }

    /// Ends the view, handing back the borrowed bytes.
    #[must_use]
    pub fn into_inner(self) -> &'a mut [u8] {
        self.data
    }
}

impl ReadBytes for BufferView<'_> {
    #[inline]
    fn as_bytes(&self) -> &[u8] {
        self.data
    }
}

impl WriteBytes for BufferView<'_> {
    #[inline]
    fn as_bytes_mut(&mut self) -> &mut [u8] {
        self.data
    }
}

impl<'a> From<&'a mut [u8]> for BufferView<'a> {
    fn from(data: &'a mut [u8]) -> Self {
        Self::new(data)
    }
}

impl Debug for BufferView<'_> {
    #[cfg_attr(test, mutants::skip)] // Debug output is not an API contract.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferView")
            .field("len", &self.len())
            .field("data", &HexPreview(self.data))
            .finish()
    }
}
