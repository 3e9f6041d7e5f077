// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Randomly addressable byte buffers with a portable wire encoding.
//!
//! This crate provides the byte container that a serializer writes values into and reads
//! values out of. Unlike an append-only stream, every access names an explicit offset, so a
//! serializer can reserve space for a header, write the body and come back to patch the header.
//!
//! Two encodings are offered:
//!
//! * Fixed-width numbers (`u8..u128`, `i8..i128`, `f32`, `f64`), always stored little-endian.
//! * Variable-length 32-bit integers ([`varint`]), which store small values in fewer bytes.
//!
//! Both produce exactly the same bytes as any other implementation of this format, on any machine.
//!
//! # Storage
//!
//! Bytes live either in a [`Buffer`], which owns its storage and can grow on request, or in a
//! [`BufferView`], which borrows storage owned by someone else. Both offer the same accessors via
//! the [`ReadBytes`] and [`WriteBytes`] traits.
//!
//! ```
//! use wirebuf::{Buffer, ReadBytes, WriteBytes};
//!
//! let mut buf = Buffer::allocate(32).unwrap();
//!
//! // Leave room for a 4-byte length header, then write the body.
//! let mut offset = 4;
//! offset += buf.put_positive_varint32(offset, 1000).unwrap();
//! buf.put(offset, 3.25_f64).unwrap();
//! offset += size_of::<f64>();
//!
//! // Patch the header now that the body length is known.
//! buf.put(0, (offset - 4) as u32).unwrap();
//!
//! assert_eq!(buf.get::<u32>(0).unwrap(), 10);
//! assert_eq!(buf.get_positive_varint32(4).unwrap(), (1000, 2));
//! assert_eq!(buf.get::<f64>(6).unwrap(), 3.25);
//! ```
//!
//! # Checked and unchecked access
//!
//! Every accessor validates that the access fits into the addressable bytes and returns
//! [`Error::OutOfBounds`] otherwise. For hot serialization loops that have already established
//! the bound, each accessor also has an `unsafe` `_unchecked` twin that skips validation.
//! Calling an unchecked accessor out of bounds is undefined behavior; debug builds assert
//! the contract. See [`WriteBytes::put_var_u32_unchecked()`] for an example.
//!
//! # Growing
//!
//! Writes never allocate. A [`Buffer`] only grows when asked to via [`Buffer::reserve()`],
//! [`Buffer::grow()`] or [`Buffer::resize()`], all of which report allocation failure as
//! [`Error::Allocation`] instead of aborting.
//!
//! # Text
//!
//! [`ReadBytes::to_latin1_string()`] materializes a byte range as a string, mapping each
//! byte to the character with the same code point, and [`ReadBytes::to_hex()`] renders
//! a range for diagnostics.

#![doc(html_logo_url = "https://media.githubusercontent.com/media/microsoft/oxidizer/refs/heads/main/crates/wirebuf/logo.png")]
#![doc(html_favicon_url = "https://media.githubusercontent.com/media/microsoft/oxidizer/refs/heads/main/crates/wirebuf/favicon.ico")]

mod bounds;
mod buffer;
mod error;
mod read;
mod text;
mod view;
mod write;

pub mod varint;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use buffer::Buffer;
pub use error::{Error, Result};
pub use read::ReadBytes;
pub use view::BufferView;
pub use write::WriteBytes;
