// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Range validation shared by all checked accessors.

use std::ops::{Bound, RangeBounds};

use crate::{Error, Result};

/// Returns the `len` bytes starting at `offset`, or an out-of-bounds error.
#[inline]
pub(crate) fn span(bytes: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    offset
        .checked_add(len)
        .and_then(|end| bytes.get(offset..end))
        .ok_or_else(|| Error::out_of_bounds(offset, len, bytes.len()))
}

/// Returns the `len` bytes starting at `offset` for writing, or an out-of-bounds error.
#[inline]
pub(crate) fn span_mut(bytes: &mut [u8], offset: usize, len: usize) -> Result<&mut [u8]> {
    let buffer_len = bytes.len();

    offset
        .checked_add(len)
        .and_then(|end| bytes.get_mut(offset..end))
        .ok_or_else(|| Error::out_of_bounds(offset, len, buffer_len))
}

/// Resolves an arbitrary range against the addressable bytes.
pub(crate) fn range(bytes: &[u8], range: impl RangeBounds<usize>) -> Result<&[u8]> {
    let start = match range.start_bound() {
        Bound::Included(&start) => Some(start),
        Bound::Excluded(&start) => start.checked_add(1),
        Bound::Unbounded => Some(0),
    };

    let end = match range.end_bound() {
        Bound::Included(&end) => end.checked_add(1),
        Bound::Excluded(&end) => Some(end),
        Bound::Unbounded => Some(bytes.len()),
    };

    match (start, end) {
        (Some(start), Some(end)) if start <= end => span(bytes, start, end - start),
        (start, end) => Err(Error::out_of_bounds(
            start.unwrap_or(usize::MAX),
            end.unwrap_or(usize::MAX).saturating_sub(start.unwrap_or(0)),
            bytes.len(),
        )),
    }
}
