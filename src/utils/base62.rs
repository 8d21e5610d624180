//! Base62 encoding for short codes.
//!
//! Short codes are derived from database row ids, so the mapping must be
//! deterministic and reversible. The alphabet ordering is part of the
//! persisted data format: changing it would invalidate every code already
//! issued.

/// Fixed alphabet: digits, lowercase, uppercase.
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const BASE: u64 = 62;

/// Errors that can occur while decoding a short code.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("invalid character '{0}' in short code")]
    InvalidCharacter(char),

    #[error("empty short code")]
    Empty,

    #[error("short code value exceeds 64 bits")]
    Overflow,
}

/// Encodes a non-negative integer as a Base62 string.
///
/// `encode(0)` yields `"0"`, never an empty string. Larger ids produce
/// longer codes; the output never has a leading `'0'` except for the
/// single-character zero case, so the mapping is injective.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(encode(0), "0");
/// assert_eq!(encode(61), "Z");
/// assert_eq!(encode(62), "10");
/// ```
pub fn encode(mut n: u64) -> String {
    if n == 0 {
        return (ALPHABET[0] as char).to_string();
    }

    let mut buf = Vec::with_capacity(11);
    while n > 0 {
        buf.push(ALPHABET[(n % BASE) as usize]);
        n /= BASE;
    }
    buf.reverse();

    // Only alphabet bytes are pushed, all ASCII.
    String::from_utf8_lossy(&buf).into_owned()
}

/// Decodes a Base62 string back to the integer it was encoded from.
///
/// Exact inverse of [`encode`]: `decode(encode(n)) == n` for all `n`.
///
/// # Errors
///
/// - [`CodecError::InvalidCharacter`] for any character outside the alphabet
/// - [`CodecError::Empty`] for the empty string (never produced by encode)
/// - [`CodecError::Overflow`] when the value does not fit in a `u64`
pub fn decode(s: &str) -> Result<u64, CodecError> {
    if s.is_empty() {
        return Err(CodecError::Empty);
    }

    let mut n: u64 = 0;
    for c in s.chars() {
        let digit = char_value(c).ok_or(CodecError::InvalidCharacter(c))?;
        n = n
            .checked_mul(BASE)
            .and_then(|v| v.checked_add(digit))
            .ok_or(CodecError::Overflow)?;
    }
    Ok(n)
}

/// Returns `true` when every character of `s` belongs to the alphabet.
///
/// Cheap pre-check used by the resolve path: a code containing a foreign
/// character can never have been issued, so the lookup can be skipped.
pub fn is_well_formed(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| char_value(c).is_some())
}

fn char_value(c: char) -> Option<u64> {
    match c {
        '0'..='9' => Some(c as u64 - '0' as u64),
        'a'..='z' => Some(c as u64 - 'a' as u64 + 10),
        'A'..='Z' => Some(c as u64 - 'A' as u64 + 36),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_zero_yields_single_character() {
        assert_eq!(encode(0), "0");
    }

    #[test]
    fn test_encode_single_digit_values() {
        assert_eq!(encode(1), "1");
        assert_eq!(encode(9), "9");
        assert_eq!(encode(10), "a");
        assert_eq!(encode(35), "z");
        assert_eq!(encode(36), "A");
        assert_eq!(encode(61), "Z");
    }

    #[test]
    fn test_encode_base_boundary() {
        assert_eq!(encode(62), "10");
        assert_eq!(encode(63), "11");
        assert_eq!(encode(62 * 62), "100");
    }

    #[test]
    fn test_encode_large_value() {
        assert_eq!(encode(u64::MAX), "lYGhA16ahyf");
    }

    #[test]
    fn test_decode_single_characters() {
        assert_eq!(decode("0"), Ok(0));
        assert_eq!(decode("9"), Ok(9));
        assert_eq!(decode("a"), Ok(10));
        assert_eq!(decode("z"), Ok(35));
        assert_eq!(decode("A"), Ok(36));
        assert_eq!(decode("Z"), Ok(61));
    }

    #[test]
    fn test_decode_multi_character() {
        assert_eq!(decode("10"), Ok(62));
        assert_eq!(decode("100"), Ok(62 * 62));
    }

    #[test]
    fn test_roundtrip_sequential_ids() {
        for n in 0..5_000 {
            assert_eq!(decode(&encode(n)), Ok(n), "roundtrip failed for {n}");
        }
    }

    #[test]
    fn test_roundtrip_boundary_values() {
        for n in [
            0,
            1,
            61,
            62,
            63,
            62 * 62 - 1,
            62 * 62,
            i64::MAX as u64,
            u64::MAX - 1,
            u64::MAX,
        ] {
            assert_eq!(decode(&encode(n)), Ok(n), "roundtrip failed for {n}");
        }
    }

    #[test]
    fn test_decode_rejects_invalid_character() {
        assert_eq!(decode("abc!"), Err(CodecError::InvalidCharacter('!')));
        assert_eq!(decode("with space"), Err(CodecError::InvalidCharacter(' ')));
        assert_eq!(decode("favicon.ico"), Err(CodecError::InvalidCharacter('.')));
    }

    #[test]
    fn test_decode_rejects_empty_string() {
        assert_eq!(decode(""), Err(CodecError::Empty));
    }

    #[test]
    fn test_decode_rejects_overflow() {
        // One past u64::MAX's encoding.
        assert_eq!(decode("lYGhA16ahyg"), Err(CodecError::Overflow));
        assert_eq!(decode("zzzzzzzzzzzz"), Err(CodecError::Overflow));
    }

    #[test]
    fn test_encode_never_has_leading_zero() {
        for n in 1..2_000 {
            assert!(!encode(n).starts_with('0'), "leading zero for {n}");
        }
    }

    #[test]
    fn test_is_well_formed() {
        assert!(is_well_formed("0"));
        assert!(is_well_formed("abcXYZ019"));
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("abc-def"));
        assert!(!is_well_formed("favicon.ico"));
    }
}
