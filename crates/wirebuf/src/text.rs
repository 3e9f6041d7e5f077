// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Rendering of byte ranges as text, for materialization and debugging.

use std::fmt::{self, Debug, Write};

/// How many bytes a `Debug` rendering shows before eliding the rest.
const DEBUG_PREVIEW_LEN: usize = 32;

/// Interprets each byte as the character with the same code point (ISO-8859-1).
///
/// No validation is performed; every byte sequence is accepted.
pub(crate) fn latin1(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

/// Renders bytes as lowercase hex pairs without separators.
pub(crate) fn hex(bytes: &[u8]) -> String {
    let mut result = String::with_capacity(bytes.len() * 2);

    for byte in bytes {
        // Writing into a String cannot fail.
        _ = write!(result, "{byte:02x}");
    }

    result
}

/// Renders a bounded hex preview of the bytes, for `Debug` implementations.
pub(crate) struct HexPreview<'a>(pub(crate) &'a [u8]);

impl Debug for HexPreview<'_> {
    #[cfg_attr(test, mutants::skip)] // Debug output is not an API contract.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = self.0.get(..DEBUG_PREVIEW_LEN).unwrap_or(self.0);

        for (index, byte) in shown.iter().enumerate() {
            if index > 0 {
                f.write_char(' ')?;
            }

            write!(f, "{byte:02x}")?;
        }

        if shown.len() < self.0.len() {
            write!(f, " .. (+{} bytes)", self.0.len() - shown.len())?;
        }

        Ok(())
    }
}
