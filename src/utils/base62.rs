//! Base62 short code codec and random code sampling.
//!
//! The alphabet order is part of the data format: sequential codes already
//! handed out decode back to their counter values only under this exact order.

use rand::Rng;

/// Digits, then lowercase, then uppercase. Index 0 is `'0'`.
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Radix of the encoding.
pub const BASE: u64 = ALPHABET.len() as u64;

/// Errors returned by [`decode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Base62Error {
    #[error("invalid base62 character: {0:?}")]
    InvalidCharacter(char),

    #[error("empty base62 string")]
    Empty,

    #[error("base62 value does not fit in u64")]
    Overflow,
}

/// Encodes a non-negative integer.
///
/// # Examples
///
/// ```
/// use linkfold::utils::base62::encode;
///
/// assert_eq!(encode(0), "0");
/// assert_eq!(encode(61), "Z");
/// assert_eq!(encode(62), "10");
/// ```
pub fn encode(mut value: u64) -> String {
    if value == 0 {
        return (ALPHABET[0] as char).to_string();
    }

    let mut digits = Vec::with_capacity(11);
    while value > 0 {
        digits.push(ALPHABET[(value % BASE) as usize]);
        value /= BASE;
    }
    digits.reverse();

    digits.into_iter().map(char::from).collect()
}

/// Decodes a base62 string back into its integer value.
///
/// # Errors
///
/// - [`Base62Error::Empty`] for an empty input
/// - [`Base62Error::InvalidCharacter`] for any character outside [`ALPHABET`]
/// - [`Base62Error::Overflow`] if the value exceeds `u64::MAX`
pub fn decode(code: &str) -> Result<u64, Base62Error> {
    if code.is_empty() {
        return Err(Base62Error::Empty);
    }

    code.chars().try_fold(0u64, |acc, c| {
        let digit = digit_value(c).ok_or(Base62Error::InvalidCharacter(c))?;
        acc.checked_mul(BASE)
            .and_then(|v| v.checked_add(digit))
            .ok_or(Base62Error::Overflow)
    })
}

/// Returns true if every character of `code` belongs to [`ALPHABET`].
pub fn is_base62(code: &str) -> bool {
    !code.is_empty() && code.chars().all(|c| digit_value(c).is_some())
}

fn digit_value(c: char) -> Option<u64> {
    let v = match c {
        '0'..='9' => c as u64 - '0' as u64,
        'a'..='z' => c as u64 - 'a' as u64 + 10,
        'A'..='Z' => c as u64 - 'A' as u64 + 36,
        _ => return None,
    };
    Some(v)
}

/// Draws `length` symbols uniformly and independently from [`ALPHABET`].
///
/// Uses the thread-local CSPRNG (ChaCha, reseeded from the OS), so codes are
/// not predictable from previously issued ones.
pub fn random_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}
