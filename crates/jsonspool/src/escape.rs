//! JSON string escaping primitives.
//!
//! The string chunk writer scans each chunk with [`first_escape`]; chunks
//! with nothing to escape are copied straight into the output buffer, and
//! chunks containing an escapable character are transformed into a scratch
//! buffer with [`escape_into`] first. The scratch is sized for the worst
//! case (six output bytes per input byte), so the transform always consumes
//! the whole chunk; a shortfall would be a sizing defect, not a runtime
//! condition.

use alloc::vec::Vec;

/// Worst-case output bytes per input byte of the escape transform.
///
/// A one-byte control character can become `\u00XX` (six bytes). Non-ASCII
/// characters under `escape_non_ascii` expand less per input byte: a
/// three-byte BMP character becomes six bytes (x2) and a four-byte
/// supplementary character becomes a twelve-byte surrogate pair (x3).
pub(crate) const MAX_EXPANSION: usize = 6;

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Whether `ch` must be transformed under the active policy.
#[inline]
fn needs_escape(ch: char, escape_non_ascii: bool) -> bool {
    matches!(ch, '"' | '\\' | '\u{0000}'..='\u{001f}') || (escape_non_ascii && !ch.is_ascii())
}

/// Byte index of the first character in `s` requiring escaping, if any.
pub(crate) fn first_escape(s: &str, escape_non_ascii: bool) -> Option<usize> {
    if escape_non_ascii {
        s.char_indices()
            .find(|&(_, ch)| needs_escape(ch, true))
            .map(|(i, _)| i)
    } else {
        // Everything the default policy escapes is a single ASCII byte.
        s.bytes().position(|b| b < 0x20 || b == b'"' || b == b'\\')
    }
}

/// Appends the escape sequence (or the character itself) for `ch` to `dst`.
fn push_escaped(dst: &mut Vec<u8>, ch: char, escape_non_ascii: bool) {
    match ch {
        '"' => dst.extend_from_slice(b"\\\""),
        '\\' => dst.extend_from_slice(b"\\\\"),
        '\u{0008}' => dst.extend_from_slice(b"\\b"),
        '\u{000c}' => dst.extend_from_slice(b"\\f"),
        '\n' => dst.extend_from_slice(b"\\n"),
        '\r' => dst.extend_from_slice(b"\\r"),
        '\t' => dst.extend_from_slice(b"\\t"),
        _ if (ch as u32) < 0x20 => push_unicode_escape(dst, ch as u32),
        _ if escape_non_ascii && !ch.is_ascii() => {
            let code = ch as u32;
            if code <= 0xffff {
                push_unicode_escape(dst, code);
            } else {
                // Encode supplementary-plane characters as a surrogate pair.
                let v = code - 0x1_0000;
                push_unicode_escape(dst, 0xd800 + (v >> 10));
                push_unicode_escape(dst, 0xdc00 + (v & 0x3ff));
            }
        }
        _ => {
            let mut tmp = [0u8; 4];
            dst.extend_from_slice(ch.encode_utf8(&mut tmp).as_bytes());
        }
    }
}

fn push_unicode_escape(dst: &mut Vec<u8>, code: u32) {
    debug_assert!(code <= 0xffff);
    dst.extend_from_slice(b"\\u");
    dst.push(HEX[((code >> 12) & 0xf) as usize]);
    dst.push(HEX[((code >> 8) & 0xf) as usize]);
    dst.push(HEX[((code >> 4) & 0xf) as usize]);
    dst.push(HEX[(code & 0xf) as usize]);
}

/// Runs the escape transform over all of `s`, appending to `dst`.
///
/// The caller reserves `dst` for worst-case expansion up front, so the
/// transform always consumes the whole input.
pub(crate) fn escape_into(dst: &mut Vec<u8>, s: &str, escape_non_ascii: bool) {
    dst.reserve(s.len() * MAX_EXPANSION);
    for ch in s.chars() {
        push_escaped(dst, ch, escape_non_ascii);
    }
}

/// Rounds `idx` up to the nearest character boundary of `s`.
///
/// A chunk boundary must never fall inside a multi-byte UTF-8 sequence;
/// rounding up (rather than down) also guarantees that a nonzero budget
/// always makes progress, even when it is smaller than one character.
pub(crate) fn ceil_char_boundary(s: &str, mut idx: usize) -> usize {
    if idx >= s.len() {
        return s.len();
    }
    while !s.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec::Vec};

    use super::*;

    fn escape_str(s: &str, non_ascii: bool) -> String {
        let mut out = Vec::new();
        escape_into(&mut out, s, non_ascii);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn plain_ascii_has_no_escapes() {
        assert_eq!(first_escape("hello world", false), None);
        assert_eq!(escape_str("hello", false), "hello");
    }

    #[test]
    fn reserved_characters() {
        assert_eq!(first_escape("ab\"cd", false), Some(2));
        assert_eq!(escape_str("a\"b\\c", false), "a\\\"b\\\\c");
        assert_eq!(escape_str("\n\r\t\u{8}\u{c}", false), "\\n\\r\\t\\b\\f");
        assert_eq!(escape_str("\u{1}", false), "\\u0001");
    }

    #[test]
    fn non_ascii_passthrough_by_default() {
        assert_eq!(first_escape("héllo", false), None);
        assert_eq!(escape_str("héllo", false), "héllo");
    }

    #[test]
    fn non_ascii_escaped_on_request() {
        assert_eq!(first_escape("héllo", true), Some(1));
        assert_eq!(escape_str("é", true), "\\u00e9");
        // Supplementary plane: surrogate pair.
        assert_eq!(escape_str("\u{1f600}", true), "\\ud83d\\ude00");
    }

    #[test]
    fn boundary_rounds_up_through_multibyte() {
        let s = "aé"; // 'é' spans bytes 1..3
        assert_eq!(ceil_char_boundary(s, 0), 0);
        assert_eq!(ceil_char_boundary(s, 2), 3);
        assert_eq!(ceil_char_boundary(s, 5), 3);
    }
}
