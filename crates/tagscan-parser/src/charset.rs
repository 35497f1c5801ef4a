//! Character encoding detection for document bytes.
//!
//! A byte order mark wins, then a `charset` declared in a `<meta>` tag within
//! the first 1024 bytes. Undeclared documents are UTF-8 when they decode
//! cleanly and windows-1252 otherwise.

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

const PRESCAN_LIMIT: usize = 1024;

/// The encoding `bytes` should be decoded with.
#[must_use]
pub fn detect(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }
    if let Some(encoding) = declared(&bytes[..bytes.len().min(PRESCAN_LIMIT)]) {
        return encoding;
    }
    if std::str::from_utf8(bytes).is_ok() {
        UTF_8
    } else {
        WINDOWS_1252
    }
}

/// Decode `bytes` with the detected encoding. Malformed sequences become
/// U+FFFD; decoding never fails.
#[must_use]
pub fn decode(bytes: &[u8]) -> (Cow<'_, str>, &'static Encoding) {
    let encoding = detect(bytes);
    let (text, _) = encoding.decode_with_bom_removal(bytes);
    (text, encoding)
}

/// First recognised `charset` of a `<meta>` tag in `head`.
fn declared(head: &[u8]) -> Option<&'static Encoding> {
    let lower = head.to_ascii_lowercase();
    let mut rest = lower.as_slice();

    while let Some(start) = find(rest, b"<meta") {
        let tag = &rest[start..];
        let end = tag.iter().position(|&b| b == b'>').unwrap_or(tag.len());
        if let Some(encoding) = charset_in(&tag[..end]) {
            // UTF-16 labels in markup mean the bytes are really ASCII-compatible.
            return Some(encoding.output_encoding());
        }
        rest = &tag[end..];
    }

    None
}

/// Value of `charset=` inside one tag, covering both `<meta charset=x>` and
/// `<meta http-equiv content="text/html; charset=x">`.
fn charset_in(tag: &[u8]) -> Option<&'static Encoding> {
    let at = find(tag, b"charset")? + b"charset".len();
    let value = tag[at..].trim_ascii_start().strip_prefix(b"=")?.trim_ascii_start();
    let value = value
        .strip_prefix(b"\"")
        .or_else(|| value.strip_prefix(b"'"))
        .unwrap_or(value);
    let len = value
        .iter()
        .position(|&b| matches!(b, b'"' | b'\'' | b';' | b'/') || b.is_ascii_whitespace())
        .unwrap_or(value.len());
    Encoding::for_label(&value[..len])
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
