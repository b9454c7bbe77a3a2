//! UUID25 codec.
//!
//! Converts between the canonical textual forms of a 128-bit UUID and a fixed-length,
//! 25-character, lowercase base-36 string ("UUID25").
//!
//! ## UUID25 form
//! - Length: 25
//! - Characters: `0-9` and `a-z` only
//! - Zero-padded on the left
//! - Largest value: `f5lxx1zz5pnorynqglhzmsp33` (`2^128 - 1`)
//! - Example: `3ud3gtvgolimgu9lah6aie99o` (for `40eb9860-cf3e-45e2-a90e-b82236ac806c`)
//!
//! Because the encoding is fixed-length and the alphabet is ordered the same way as digit
//! values, sorting UUID25 strings as plain strings sorts the underlying 128-bit values. A
//! time-ordered UUID (v7) therefore yields a UUID25 that can be indexed and sorted directly,
//! which is what makes it useful as a primary-key value.
//!
//! This crate provides:
//! - Two strict functions, [`encode`] (hyphenated UUID to UUID25) and [`decode`] (UUID25 to
//!   hyphenated UUID).
//! - A validated wrapper type ([`Uuid25`]) that accepts any of the three textual layouts and
//!   can be formatted back to each of them.
//!
//! Nothing here generates UUIDs. Values come from an external generator (for example
//! [`uuid::Uuid::now_v7`]) and are only converted.
//!
//! ## Example
//! ```
//! let id = uuid25::encode("40eb9860-cf3e-45e2-a90e-b82236ac806c")?;
//! assert_eq!(id, "3ud3gtvgolimgu9lah6aie99o");
//! assert_eq!(uuid25::decode(&id)?, "40eb9860-cf3e-45e2-a90e-b82236ac806c");
//! # Ok::<(), uuid25::Uuid25Error>(())
//! ```

mod codec;
mod convert;
mod digits;

// Re-export public types
pub use codec::{decode, encode, Uuid25};
pub use convert::{convert_base, ConvertError};
pub use digits::{decode_digit_chars, encode_digit_values};

/// Re-exported for convenience.
pub use ::uuid::Uuid;

/// The UUID25 form of `2^128 - 1`.
pub const UUID25_MAX: &str = "f5lxx1zz5pnorynqglhzmsp33";

/// Length of a UUID25 string.
pub const UUID25_LEN: usize = 25;

/// Length of a UUID as 32 hex digits without hyphens.
pub const HEX_LEN: usize = 32;

/// Length of a hyphenated UUID (`8-4-4-4-12`).
pub const HYPHENATED_LEN: usize = 36;

/// Error type for UUID25 operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Uuid25Error {
    /// Wrong length, wrong layout, or a character outside the expected alphabet.
    #[error("could not parse a UUID string")]
    Parse,
    /// A well-formed 25-character value larger than `2^128 - 1`.
    #[error("128-bit overflow")]
    Overflow,
}

/// Result type for UUID25 operations.
pub type Uuid25Result<T> = Result<T, Uuid25Error>;
