//! Arbitrary-precision base conversion over digit arrays.
//!
//! Numbers are held as big-endian arrays of digit values (`u8`), so any base up to 256 can be
//! represented without going through a fixed-width integer type.

/// Errors reported by [`convert_base`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// A source digit is not less than the source base.
    #[error("invalid src digit {digit} for base {base}")]
    InvalidDigit { digit: u8, base: u32 },
    /// The value does not fit in the requested number of destination digits.
    #[error("destination too small")]
    DestinationTooSmall,
}

/// Converts `src`, a big-endian number in `src_base`, into `dst_size` big-endian digits in
/// `dst_base`, zero-padded on the left.
///
/// An empty `src` is the value zero.
///
/// Source digits are consumed in words of several digits at a time, where a word is as long as
/// possible while every intermediate product still fits in a `u64`. Each word costs one
/// multiply-and-add pass over the destination, and a pass stops as soon as the carry is used up
/// and the rest of the destination is known to be zero.
///
/// # Panics
///
/// Panics if `src_base` or `dst_base` is not in `2..=256`.
///
/// # Errors
///
/// - [`ConvertError::InvalidDigit`] if a digit of `src` is not less than `src_base`.
/// - [`ConvertError::DestinationTooSmall`] if the value needs more than `dst_size` digits.
pub fn convert_base(
    src: &[u8],
    src_base: u32,
    dst_base: u32,
    dst_size: usize,
) -> Result<Vec<u8>, ConvertError> {
    assert!(
        (2..=256).contains(&src_base) && (2..=256).contains(&dst_base),
        "invalid base"
    );

    let src_base_u64 = u64::from(src_base);
    let dst_base_u64 = u64::from(dst_base);
    let (word_len, word_base) = word_size(src_base_u64, dst_base_u64);

    let mut dst = vec![0u8; dst_size];
    if src.is_empty() {
        return Ok(dst);
    }
    if dst_size == 0 {
        return Err(ConvertError::DestinationTooSmall);
    }

    // Lowest index written so far; everything to its left is still zero.
    let mut dst_used = dst_size - 1;

    // The leading word is short when the source length is not a multiple of `word_len`.
    let head_len = match src.len() % word_len {
        0 => word_len.min(src.len()),
        n => n,
    };
    let (head, tail) = src.split_at(head_len);

    for word in std::iter::once(head).chain(tail.chunks(word_len)) {
        let mut carry = 0u64;
        for &digit in word {
            if u32::from(digit) >= src_base {
                return Err(ConvertError::InvalidDigit {
                    digit,
                    base: src_base,
                });
            }
            carry = carry * src_base_u64 + u64::from(digit);
        }

        // dst = dst * word_base + carry, right to left.
        for i in (0..dst_size).rev() {
            carry += u64::from(dst[i]) * word_base;
            dst[i] = (carry % dst_base_u64) as u8;
            carry /= dst_base_u64;

            if carry == 0 && i <= dst_used {
                dst_used = i;
                break;
            }
        }

        if carry != 0 {
            return Err(ConvertError::DestinationTooSmall);
        }
    }

    Ok(dst)
}

/// Returns the number of source digits per word and `src_base` raised to that number.
///
/// The carry in [`convert_base`] stays below `word_base`, so the largest intermediate value is
/// `word_base * dst_base - 1`, which must not exceed `u64::MAX`.
fn word_size(src_base: u64, dst_base: u64) -> (usize, u64) {
    let mut word_len = 1;
    let mut word_base = src_base;
    while word_base <= u64::MAX / (src_base * dst_base) {
        word_len += 1;
        word_base *= src_base;
    }
    (word_len, word_base)
}
