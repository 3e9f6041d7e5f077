// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::{self, Debug};

use nm::{Event, Magnitude};
use tracing::{Level, event};

use crate::text::HexPreview;
use crate::{BufferView, Error, ReadBytes, Result, WriteBytes};

/// A contiguous, randomly addressable region of bytes that exclusively owns its storage.
///
/// A buffer has a length, which is the number of addressable bytes, and a capacity, which is the
/// amount of storage allocated for it. The length never exceeds the capacity. All offset-addressed
/// reads and writes operate on the addressable bytes only; use [`ReadBytes`] and [`WriteBytes`]
/// to access them.
///
/// Storage is zero-filled when allocated and whenever the length grows, so a new buffer reads as
/// all zeroes.
///
/// Writes never reallocate. The buffer only grows when explicitly asked to via
/// [`reserve()`][Self::reserve], [`grow()`][Self::grow] or [`resize()`][Self::resize].
///
/// # Example
///
/// ```
/// use wirebuf::{Buffer, ReadBytes, WriteBytes};
///
/// let mut buf = Buffer::allocate(16).unwrap();
///
/// buf.put(0, 0xCAFE_u16).unwrap();
/// let varint_len = buf.put_positive_varint32(2, 1 << 14).unwrap();
///
/// assert_eq!(buf.get::<u16>(0).unwrap(), 0xCAFE);
/// assert_eq!(buf.get_positive_varint32(2).unwrap(), (1 << 14, varint_len));
/// ```
///
/// # Thread safety
///
/// This type is thread-safe. Mutation requires exclusive access.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Buffer {
    data: Vec<u8>,
}

impl Buffer {
    /// Creates an empty buffer without allocating.
    #[must_use]
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Allocates a buffer of exactly `len` addressable bytes, all zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if the storage cannot be obtained.
    pub fn allocate(len: usize) -> Result<Self> {
        Self::with_capacity(len, len)
    }

    /// Allocates a buffer of `len` addressable bytes, all zero, with storage for at least
    /// `capacity` bytes.
    ///
    /// A `capacity` smaller than `len` is treated as `len`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if the storage cannot be obtained.
    pub fn with_capacity(len: usize, capacity: usize) -> Result<Self> {
        let capacity = capacity.max(len);

        let mut data = Vec::new();
        try_reserve(&mut data, capacity)?;
        data.resize(len, 0);

        ALLOCATED_SIZE.with(|e| e.observe(capacity));

        Ok(Self { data })
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

    /// The number of bytes of allocated storage. Never less than [`len()`][Self::len].
    #[must_use]
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Ensures there is storage for at least `additional` bytes beyond the current length.
    ///
    /// The length does not change.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if the storage cannot be obtained. The buffer is left
    /// unchanged in that case.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        if additional <= self.capacity() - self.len() {
            return Ok(());
        }

        self.reserve_exact(additional)
    }

    /// Ensures there is storage for at least `min_capacity` bytes in total.
    ///
    /// Existing contents are preserved and the length does not change. Never shrinks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if the storage cannot be obtained. The buffer is left
    /// unchanged in that case.
    pub fn grow(&mut self, min_capacity: usize) -> Result<()> {
        if min_capacity <= self.capacity() {
            return Ok(());
        }

        self.reserve_exact(min_capacity - self.len())
    }

    fn reserve_exact(&mut self, additional: usize) -> Result<()> {
        let previous = self.capacity();

        try_reserve(&mut self.data, additional)?;

        event!(
            Level::DEBUG,
            previous_capacity = previous,
            capacity = self.capacity(),
            "buffer storage grown"
        );
        GROWN_CAPACITY.with(|e| e.observe(self.capacity()));

        Ok(())
    }

    /// Changes the number of addressable bytes to `new_len`.
    ///
    /// Bytes added at the end are zero. Grows the storage if necessary; shrinking the length
    /// keeps the storage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if the storage cannot be obtained. The buffer is left
    /// unchanged in that case.
    pub fn resize(&mut self, new_len: usize) -> Result<()> {
        self.grow(new_len)?;
        self.data.resize(new_len, 0);
        Ok(())
    }

    /// Shortens the buffer to `len` addressable bytes. Has no effect if `len` is not less than
    /// the current length.
    pub fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
    }

    /// Removes all addressable bytes, keeping the storage.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// The addressable bytes.
    #[must_use]
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// The addressable bytes, for writing.
    #[must_use]
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Borrows the addressable bytes as a [`BufferView`].
    ///
    /// The view is valid for as long as this buffer is mutably borrowed.
    #[must_use]
    #[inline]
    pub fn view(&mut self) -> BufferView<'_> {
        BufferView::new(&mut self.data)
    }

    /// Consumes the buffer, returning its storage.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

impl ReadBytes for Buffer {
    #[inline]
    fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl WriteBytes for Buffer {
    #[inline]
    fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl From<Vec<u8>> for Buffer {
    /// Takes ownership of the storage of a `Vec<u8>`. Its length becomes the number of
    /// addressable bytes. Never copies.
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl From<Buffer> for Vec<u8> {
    fn from(buffer: Buffer) -> Self {
        buffer.into_vec()
    }
}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl AsMut<[u8]> for Buffer {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl Debug for Buffer {
    #[cfg_attr(test, mutants::skip)] // Debug output is not an API contract.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("data", &HexPreview(&self.data))
            .finish()
    }
}

/// Ensures `data` has storage for at least `additional` bytes beyond its length.
fn try_reserve(data: &mut Vec<u8>, additional: usize) -> Result<()> {
    data.try_reserve_exact(additional).map_err(|source| {
        let requested = data.len().saturating_add(additional);
        event!(Level::WARN, requested, error = %source, "buffer storage allocation failed");

        Error::Allocation { requested, source }
    })
}

// Histogram buckets for buffer capacities, from typical small messages up to large payloads.
const CAPACITY_BUCKETS: &[Magnitude] = &[0, 16, 64, 256, 1024, 4096, 16_384, 65_536, 262_144, 1_048_576];

thread_local! {
    static ALLOCATED_SIZE: Event = Event::builder()
        .name("wirebuf_buffer_allocated_size")
        .histogram(CAPACITY_BUCKETS)
        .build();

    static GROWN_CAPACITY: Event = Event::builder()
        .name("wirebuf_buffer_grown_capacity")
        .histogram(CAPACITY_BUCKETS)
        .build();
}
