//! Utility functions.

use std::borrow::Cow;

/// Decode exported HTML bytes to a string.
///
/// Tries UTF-8 first (handles a BOM automatically via encoding_rs), then
/// falls back to Windows-1252, which covers legacy exports that are not
/// valid UTF-8. Uses `Cow<str>` to avoid allocation for valid UTF-8 input.
pub(crate) fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);
    if !malformed {
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}
