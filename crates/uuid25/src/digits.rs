//! Digit decoding and encoding.
//!
//! Converts between strings of digit characters and arrays of digit values. Arrays are
//! big-endian: the most significant digit comes first.

use crate::{Uuid25Error, Uuid25Result, HEX_LEN, UUID25_LEN};

/// Marks a byte that is not a digit character in any base.
const INVALID: u8 = 0x7f;

/// ASCII code to digit value. `0-9` map to `0..=9`, `A-Z` and `a-z` map to `10..=35`.
#[rustfmt::skip]
const DECODE_MAP: [u8; 128] = [
    0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f,
    0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f,
    0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f,
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f,
    0x7f, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18,
    0x19, 0x1a, 0x1b, 0x1c, 0x1d, 0x1e, 0x1f, 0x20, 0x21, 0x22, 0x23, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f,
    0x7f, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18,
    0x19, 0x1a, 0x1b, 0x1c, 0x1d, 0x1e, 0x1f, 0x20, 0x21, 0x22, 0x23, 0x7f, 0x7f, 0x7f, 0x7f, 0x7f,
];

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";
const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Decodes `digit_chars` into digit values in `base`.
///
/// Letters are accepted in either case. The returned array has one value per input byte.
///
/// # Panics
///
/// Panics if `base` is not in `2..=36`.
///
/// # Errors
///
/// Returns [`Uuid25Error::Parse`] if any byte is not a digit character or is not a digit in
/// `base` (for example `g` in base 16).
pub fn decode_digit_chars(digit_chars: &str, base: u32) -> Uuid25Result<Vec<u8>> {
    assert!((2..=36).contains(&base), "invalid base");

    digit_chars
        .bytes()
        .map(|b| {
            let value = DECODE_MAP.get(usize::from(b)).copied().unwrap_or(INVALID);
            if u32::from(value) < base {
                Ok(value)
            } else {
                Err(Uuid25Error::Parse)
            }
        })
        .collect()
}

/// Encodes digit values as a lowercase string.
///
/// Only the two layouts produced by the codec are supported: 32 digits in base 16 and 25
/// digits in base 36.
///
/// # Panics
///
/// Panics if the length of `digit_values` does not match `base`, or if a value is not a
/// digit in `base`. Both indicate a bug in the caller, not bad input.
pub fn encode_digit_values(digit_values: &[u8], base: u32) -> String {
    let alphabet: &[u8] = match (base, digit_values.len()) {
        (16, HEX_LEN) => &HEX_DIGITS[..],
        (36, UUID25_LEN) => &BASE36_DIGITS[..],
        _ => panic!("invalid length of digit value array"),
    };

    digit_values
        .iter()
        .map(|&e| {
            let c = alphabet.get(usize::from(e)).expect("invalid digit value");
            char::from(*c)
        })
        .collect()
}
