// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::TryReserveError;

use thiserror::Error;

/// An error raised by a fallible buffer or varint operation.
///
/// Only the checked accessors return this type. The `_unchecked` accessors have no error path;
/// violating their contract is undefined behavior.
///
/// # Thread safety
///
/// This type is thread-safe.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Backing storage of the requested size could not be obtained.
    ///
    /// The buffer is left unchanged when this is returned.
    #[error("failed to allocate buffer storage for {requested} bytes")]
    Allocation {
        /// The capacity that was requested, in bytes.
        requested: usize,

        /// The reason the allocator refused the request.
        #[source]
        source: TryReserveError,
    },

    /// An access of `len` bytes at `offset` does not fit into the addressable bytes
    /// of the buffer.
    #[error("access of {len} bytes at offset {offset} is out of bounds for buffer of {buffer_len} bytes")]
    OutOfBounds {
        /// The offset at which the access starts.
        offset: usize,

        /// The number of bytes the access needed.
        len: usize,

        /// The number of addressable bytes in the buffer.
        buffer_len: usize,
    },

    /// A varint starting at `offset` still had its continuation bit set on the last byte that
    /// a 32-bit value may occupy.
    #[error("malformed varint at offset {offset}: continuation bit set after {max_len} bytes", max_len = crate::varint::MAX_ENCODED_LEN)]
    MalformedVarint {
        /// The offset at which the varint starts.
        offset: usize,
    },
}

impl Error {
    pub(crate) const fn out_of_bounds(offset: usize, len: usize, buffer_len: usize) -> Self {
        Self::OutOfBounds { offset, len, buffer_len }
    }
}

/// A specialized `Result` for buffer operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: Send, Sync, std::error::Error);

    #[test]
    fn out_of_bounds_message() {
        let e = Error::out_of_bounds(14, 4, 16);

        assert_eq!(
            e.to_string(),
            "access of 4 bytes at offset 14 is out of bounds for buffer of 16 bytes"
        );
    }

    #[test]
    fn malformed_varint_message() {
        let e = Error::MalformedVarint { offset: 3 };

        assert_eq!(
            e.to_string(),
            "malformed varint at offset 3: continuation bit set after 5 bytes"
        );
    }

    #[test]
    fn allocation_error_exposes_source() {
        let source = Vec::<u8>::new().try_reserve_exact(usize::MAX).unwrap_err();
        let e = Error::Allocation {
            requested: usize::MAX,
            source,
        };

        assert!(std::error::Error::source(&e).is_some());
        assert!(e.to_string().starts_with("failed to allocate buffer storage"));
    }
}
