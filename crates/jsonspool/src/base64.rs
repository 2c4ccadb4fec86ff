//! Incremental Base64 encoding primitives.
//!
//! Base64 consumes input in 3-byte groups and emits 4 output bytes per group.
//! The chunk writer feeds whole groups through [`encode_groups`] and carries
//! 0–2 leftover bytes forward between calls; [`encode_final`] emits the
//! padded tail group once the value ends. Neither function can partially
//! fail: destination sizing is the caller's invariant and is debug-asserted.

/// Standard Base64 alphabet (RFC 4648, with `=` padding).
const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Encodes as many whole 3-byte groups as fit both `src` and `dst`.
///
/// Returns `(consumed, written)`: the number of source bytes consumed (a
/// multiple of 3) and output bytes written (a multiple of 4).
pub(crate) fn encode_groups(src: &[u8], dst: &mut [u8]) -> (usize, usize) {
    let groups = core::cmp::min(src.len() / 3, dst.len() / 4);
    for g in 0..groups {
        let [a, b, c] = [src[g * 3], src[g * 3 + 1], src[g * 3 + 2]];
        let out = &mut dst[g * 4..g * 4 + 4];
        out[0] = ALPHABET[(a >> 2) as usize];
        out[1] = ALPHABET[(((a & 0x03) << 4) | (b >> 4)) as usize];
        out[2] = ALPHABET[(((b & 0x0f) << 2) | (c >> 6)) as usize];
        out[3] = ALPHABET[(c & 0x3f) as usize];
    }
    (groups * 3, groups * 4)
}

/// Encodes the final 1- or 2-byte group with `=` padding.
///
/// Returns the number of output bytes written (0 or 4). An empty `src`
/// produces no output; three or more bytes belong in [`encode_groups`].
pub(crate) fn encode_final(src: &[u8], dst: &mut [u8]) -> usize {
    debug_assert!(src.len() <= 2, "final group must be 0-2 bytes");
    if src.is_empty() {
        return 0;
    }
    debug_assert!(dst.len() >= 4, "final group needs 4 output bytes");
    let a = src[0];
    dst[0] = ALPHABET[(a >> 2) as usize];
    if src.len() == 1 {
        dst[1] = ALPHABET[((a & 0x03) << 4) as usize];
        dst[2] = b'=';
    } else {
        let b = src[1];
        dst[1] = ALPHABET[(((a & 0x03) << 4) | (b >> 4)) as usize];
        dst[2] = ALPHABET[((b & 0x0f) << 2) as usize];
    }
    dst[3] = b'=';
    4
}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec};

    use super::*;

    fn encode_all(src: &[u8]) -> String {
        let mut dst = vec![0u8; src.len().div_ceil(3) * 4];
        let (consumed, written) = encode_groups(src, &mut dst);
        let tail = encode_final(&src[consumed..], &mut dst[written..]);
        dst.truncate(written + tail);
        String::from_utf8(dst).unwrap()
    }

    #[test]
    fn rfc4648_vectors() {
        assert_eq!(encode_all(b""), "");
        assert_eq!(encode_all(b"f"), "Zg==");
        assert_eq!(encode_all(b"fo"), "Zm8=");
        assert_eq!(encode_all(b"foo"), "Zm9v");
        assert_eq!(encode_all(b"foob"), "Zm9vYg==");
        assert_eq!(encode_all(b"fooba"), "Zm9vYmE=");
        assert_eq!(encode_all(b"foobar"), "Zm9vYmFy");
    }

    #[test]
    fn groups_bounded_by_destination() {
        let mut dst = [0u8; 7]; // room for one group only
        let (consumed, written) = encode_groups(b"abcdef", &mut dst);
        assert_eq!((consumed, written), (3, 4));
        assert_eq!(&dst[..4], b"YWJj");
    }

    #[test]
    fn empty_final_group_writes_nothing() {
        let mut dst = [0u8; 4];
        assert_eq!(encode_final(&[], &mut dst), 0);
    }
}
