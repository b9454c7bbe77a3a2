//! UUID25 parsing and formatting.
//!
//! Composes the digit decoder, the base converter and the digit encoder to move between the
//! hyphenated UUID layout, the 32-digit hex layout and the 25-digit base-36 layout. All three
//! describe the same unsigned 128-bit value.

use crate::convert::{convert_base, ConvertError};
use crate::digits::{decode_digit_chars, encode_digit_values};
use crate::{Uuid25Error, Uuid25Result, HEX_LEN, HYPHENATED_LEN, UUID25_LEN, UUID25_MAX};
use chrono::{DateTime, Utc};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Byte offsets of the hyphens in the `8-4-4-4-12` layout.
const HYPHEN_POSITIONS: [usize; 4] = [8, 13, 18, 23];

impl From<ConvertError> for Uuid25Error {
    fn from(err: ConvertError) -> Self {
        match err {
            ConvertError::InvalidDigit { .. } => Uuid25Error::Parse,
            ConvertError::DestinationTooSmall => Uuid25Error::Overflow,
        }
    }
}

/// Converts a hyphenated UUID (`xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`) to its UUID25 form.
///
/// Hex digits are accepted in either case; the output is always lowercase.
///
/// # Errors
///
/// Returns [`Uuid25Error::Parse`] if `uuid_string` is not exactly 36 characters in the
/// hyphenated layout.
pub fn encode(uuid_string: &str) -> Uuid25Result<String> {
    if uuid_string.len() != HYPHENATED_LEN {
        tracing::debug!(len = uuid_string.len(), "rejected UUID: wrong length");
        return Err(Uuid25Error::Parse);
    }
    let hex = strip_hyphens(uuid_string)?;
    hex_to_uuid25(&hex)
}

/// Converts a UUID25 string to the hyphenated UUID layout.
///
/// # Errors
///
/// - [`Uuid25Error::Parse`] if `uuid25_string` is not 25 characters of `0-9a-z`.
/// - [`Uuid25Error::Overflow`] if the value is larger than `2^128 - 1`.
pub fn decode(uuid25_string: &str) -> Uuid25Result<String> {
    let hex = uuid25_to_hex(uuid25_string)?;
    Ok(hyphenate(&hex))
}

/// Checks the layout and the magnitude of a UUID25 string.
fn check_uuid25(input: &str) -> Uuid25Result<()> {
    if input.len() != UUID25_LEN {
        tracing::debug!(len = input.len(), "rejected UUID25: wrong length");
        return Err(Uuid25Error::Parse);
    }
    if !input
        .bytes()
        .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'z'))
    {
        tracing::debug!("rejected UUID25: not lowercase base 36");
        return Err(Uuid25Error::Parse);
    }
    // Same length and an alphabet ordered like its digit values, so string order is
    // numeric order.
    if input > UUID25_MAX {
        tracing::debug!("rejected UUID25: 128-bit overflow");
        return Err(Uuid25Error::Overflow);
    }
    Ok(())
}

/// Removes the hyphens from a 36-character UUID after checking the `8-4-4-4-12` layout.
fn strip_hyphens(input: &str) -> Uuid25Result<String> {
    let well_formed = input.bytes().enumerate().all(|(i, b)| {
        if HYPHEN_POSITIONS.contains(&i) {
            b == b'-'
        } else {
            b.is_ascii_hexdigit()
        }
    });
    if !well_formed {
        tracing::debug!("rejected UUID: not in 8-4-4-4-12 hex layout");
        return Err(Uuid25Error::Parse);
    }
    Ok(input.chars().filter(|&c| c != '-').collect())
}

/// Inserts hyphens into 32 hex digits.
fn hyphenate(hex: &str) -> String {
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}

fn hex_to_uuid25(hex: &str) -> Uuid25Result<String> {
    let src = decode_digit_chars(hex, 16)?;
    let dst = convert_base(&src, 16, 36, UUID25_LEN)?;
    Ok(encode_digit_values(&dst, 36))
}

fn uuid25_to_hex(input: &str) -> Uuid25Result<String> {
    check_uuid25(input)?;
    let src = decode_digit_chars(input, 36)?;
    let dst = convert_base(&src, 36, 16, HEX_LEN)?;
    Ok(encode_digit_values(&dst, 16))
}

/// A validated UUID25 value (25 lowercase base-36 characters, at most `2^128 - 1`).
///
/// Once constructed, the contained string is always a valid UUID25, so formatting it back to
/// any other layout cannot fail.
///
/// # Construction
/// - [`Uuid25::parse`] accepts any of the three textual layouts.
/// - [`Uuid25::parse_uuid25`], [`Uuid25::parse_hex`] and [`Uuid25::parse_hyphenated`] accept
///   exactly one layout each.
/// - `From<Uuid>` converts a value produced by the `uuid` crate.
///
/// # Ordering
/// `Ord` compares the UUID25 strings, which gives the same order as comparing the underlying
/// 128-bit values.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uuid25(String);

impl Uuid25 {
    /// UUID25 form of the nil UUID.
    pub const NIL_STR: &'static str = "0000000000000000000000000";

    /// UUID25 form of the max UUID (`ffffffff-ffff-ffff-ffff-ffffffffffff`).
    pub const MAX_STR: &'static str = UUID25_MAX;

    /// The nil UUID.
    pub fn nil() -> Self {
        Self(Self::NIL_STR.to_owned())
    }

    /// The max UUID.
    pub fn max() -> Self {
        Self(Self::MAX_STR.to_owned())
    }

    /// Parses a UUID in any supported layout:
    ///
    /// - 25 lowercase base-36 characters (`3ud3gtvgolimgu9lah6aie99o`)
    /// - 32 hex characters (`40eb9860cf3e45e2a90eb82236ac806c`)
    /// - 36-character hyphenated hex (`40eb9860-cf3e-45e2-a90e-b82236ac806c`)
    ///
    /// Hex input is case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`Uuid25Error::Parse`] for any other input, or [`Uuid25Error::Overflow`] for a
    /// 25-character value larger than `2^128 - 1`.
    pub fn parse(input: &str) -> Uuid25Result<Self> {
        match input.len() {
            UUID25_LEN => Self::parse_uuid25(input),
            HEX_LEN => Self::parse_hex(input),
            HYPHENATED_LEN => Self::parse_hyphenated(input),
            _ => {
                tracing::debug!(len = input.len(), "rejected UUID: unsupported length");
                Err(Uuid25Error::Parse)
            }
        }
    }

    /// Parses the 25-character base-36 layout.
    pub fn parse_uuid25(input: &str) -> Uuid25Result<Self> {
        check_uuid25(input)?;
        Ok(Self(input.to_owned()))
    }

    /// Parses the 32-character hex layout.
    pub fn parse_hex(input: &str) -> Uuid25Result<Self> {
        if input.len() != HEX_LEN {
            tracing::debug!(len = input.len(), "rejected hex UUID: wrong length");
            return Err(Uuid25Error::Parse);
        }
        hex_to_uuid25(input).map(Self)
    }

    /// Parses the 36-character hyphenated layout.
    pub fn parse_hyphenated(input: &str) -> Uuid25Result<Self> {
        encode(input).map(Self)
    }

    /// Returns the 25-character form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the value as 32 lowercase hex characters without hyphens.
    pub fn to_hex(&self) -> String {
        // SAFETY: the wrapped string passed check_uuid25 on construction
        uuid25_to_hex(&self.0).expect("Uuid25 always holds a valid UUID25 string")
    }

    /// Returns the value in the hyphenated layout.
    pub fn to_hyphenated(&self) -> String {
        hyphenate(&self.to_hex())
    }

    /// Returns the value as a [`Uuid`].
    pub fn to_uuid(&self) -> Uuid {
        let digits = decode_digit_chars(&self.0, 36)
            .and_then(|src| convert_base(&src, 36, 256, 16).map_err(Uuid25Error::from))
            .expect("Uuid25 always holds a valid UUID25 string");
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&digits);
        Uuid::from_bytes(bytes)
    }

    /// Returns the creation time embedded in a time-based UUID (version 1, 6 or 7).
    ///
    /// Returns `None` for other versions, including the nil and max UUIDs.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let (secs, nanos) = self.to_uuid().get_timestamp()?.to_unix();
        DateTime::<Utc>::from_timestamp(i64::try_from(secs).ok()?, nanos)
    }
}

impl From<Uuid> for Uuid25 {
    fn from(uuid: Uuid) -> Self {
        // 16 bytes is 128 bits, which always fits in 25 base-36 digits
        let dst = convert_base(uuid.as_bytes(), 256, 36, UUID25_LEN)
            .expect("128-bit value fits in 25 base-36 digits");
        Self(encode_digit_values(&dst, 36))
    }
}

impl From<&Uuid25> for Uuid {
    fn from(value: &Uuid25) -> Self {
        value.to_uuid()
    }
}

impl From<Uuid25> for String {
    fn from(value: Uuid25) -> Self {
        value.0
    }
}

impl fmt::Display for Uuid25 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Uuid25 {
    type Err = Uuid25Error;

    /// Equivalent to [`Uuid25::parse`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid25::parse(s)
    }
}

impl AsRef<str> for Uuid25 {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Uuid25 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Uuid25 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Uuid25::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// (hyphenated, UUID25)
    const VECTORS: &[(&str, &str)] = &[
        (
            "00000000-0000-0000-0000-000000000000",
            "0000000000000000000000000",
        ),
        (
            "00000000-0000-0000-0000-000000000001",
            "0000000000000000000000001",
        ),
        (
            "40eb9860-cf3e-45e2-a90e-b82236ac806c",
            "3ud3gtvgolimgu9lah6aie99o",
        ),
        (
            "550e8400-e29b-41d4-a716-446655440000",
            "51a37iakuf5nuuphr0fx89og0",
        ),
        (
            "01890a5d-ac96-774b-bcce-b302099a8057",
            "039srkj01e44uynszf2f2njh3",
        ),
        (
            "f81d4fae-7dec-11d0-a765-00a0c91e6bf6",
            "eoswzolg3bsx0zn8otq1p8oom",
        ),
        (
            "ffffffff-ffff-ffff-ffff-ffffffffffff",
            "f5lxx1zz5pnorynqglhzmsp33",
        ),
    ];

    /// Deterministic xorshift values spread across the whole 128-bit range.
    fn sample_values(count: usize) -> Vec<u128> {
        let mut state = 0x9e37_79b9_7f4a_7c15_f39c_c060_5ced_c834u128;
        (0..count)
            .map(|i| {
                state ^= state << 23;
                state ^= state >> 17;
                state ^= state << 41;
                // Vary the magnitude so short values are covered too
                state >> (i % 128)
            })
            .collect()
    }

    fn hyphenated(value: u128) -> String {
        Uuid::from_u128(value).hyphenated().to_string()
    }

    #[test]
    fn test_encode_known_vectors() {
        for (uuid, expected) in VECTORS {
            assert_eq!(encode(uuid).unwrap(), *expected, "uuid: {}", uuid);
        }
    }

    #[test]
    fn test_decode_known_vectors() {
        for (expected, uuid25) in VECTORS {
            assert_eq!(decode(uuid25).unwrap(), *expected, "uuid25: {}", uuid25);
        }
    }

    #[test]
    fn test_round_trip_from_hyphenated() {
        for value in sample_values(500) {
            let uuid = hyphenated(value);
            let encoded = encode(&uuid).unwrap();
            assert_eq!(encoded.len(), UUID25_LEN);
            let decoded = decode(&encoded).unwrap();
            assert_eq!(decoded.len(), HYPHENATED_LEN);
            assert_eq!(decoded, uuid);
        }
    }

    #[test]
    fn test_round_trip_from_uuid25() {
        let alphabet = b"0123456789abcdefghijklmnopqrstuvwxyz";
        for value in sample_values(500) {
            // Build a base-36 string from the sample, then clamp it below MAX by forcing the
            // leading digit into 0..=e
            let mut s: Vec<u8> = (0..UUID25_LEN)
                .map(|i| alphabet[((value >> (i * 5 % 120)) % 36) as usize])
                .collect();
            s[0] = alphabet[(value % 15) as usize];
            let s = String::from_utf8(s).unwrap();

            assert_eq!(encode(&decode(&s).unwrap()).unwrap(), s);
        }
        assert_eq!(encode(&decode(UUID25_MAX).unwrap()).unwrap(), UUID25_MAX);
    }

    #[test]
    fn test_encode_preserves_order() {
        let mut values = sample_values(300);
        values.sort_unstable();
        let encoded: Vec<String> = values
            .iter()
            .map(|&v| encode(&hyphenated(v)).unwrap())
            .collect();

        for (pair, values) in encoded.windows(2).zip(values.windows(2)) {
            if values[0] < values[1] {
                assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
            }
        }
    }

    #[test]
    fn test_time_ordered_uuids_sort_as_strings() {
        let uuids: Vec<Uuid> = (0..200).map(|_| Uuid::now_v7()).collect();

        let mut by_value = uuids.clone();
        by_value.sort_by_key(|u| u.as_u128());
        let mut by_string: Vec<Uuid25> = uuids.into_iter().map(Uuid25::from).collect();
        by_string.sort();

        let by_value: Vec<Uuid25> = by_value.into_iter().map(Uuid25::from).collect();
        assert_eq!(by_string, by_value);
    }

    #[test]
    fn test_overflow_boundary() {
        assert_eq!(
            decode("f5lxx1zz5pnorynqglhzmsp33").unwrap(),
            "ffffffff-ffff-ffff-ffff-ffffffffffff"
        );
        assert_eq!(
            decode("f5lxx1zz5pnorynqglhzmsp34"),
            Err(Uuid25Error::Overflow)
        );
        assert_eq!(
            decode("zzzzzzzzzzzzzzzzzzzzzzzzz"),
            Err(Uuid25Error::Overflow)
        );
        assert_eq!(
            decode("g000000000000000000000000"),
            Err(Uuid25Error::Overflow)
        );
    }

    #[test]
    fn test_overflow_message() {
        let err = decode("f5lxx1zz5pnorynqglhzmsp34").unwrap_err();
        assert_eq!(err.to_string(), "128-bit overflow");
    }

    #[test]
    fn test_encode_rejects_malformed_input() {
        for input in [
            "",
            "not-a-uuid",
            "40eb9860cf3e45e2a90eb82236ac806c",
            "40eb9860-cf3e-45e2-a90e-b82236ac806",
            "40eb9860-cf3e-45e2-a90e-b82236ac806c0",
            "40eb9860-cf3e-45e2-a90e-b82236ac806g",
            "40eb9860-cf3e-45e2-a90eb-82236ac806c",
            "40eb9860_cf3e_45e2_a90e_b82236ac806c",
            "{0eb9860-cf3e-45e2-a90e-b82236ac806}",
            "40eb9860-cf3e-45e2-a90e-b82236ac80\u{e9}",
        ] {
            assert_eq!(encode(input), Err(Uuid25Error::Parse), "input: {:?}", input);
        }
    }

    #[test]
    fn test_parse_error_message() {
        let err = encode("not-a-uuid").unwrap_err();
        assert_eq!(err.to_string(), "could not parse a UUID string");
    }

    #[test]
    fn test_decode_rejects_malformed_input() {
        for input in [
            "",
            "3ud3gtvgolimgu9lah6aie99",
            "3ud3gtvgolimgu9lah6aie99o0",
            "3ud3gtvgolimgu9lah6aie99Z",
            "3ud3gtvgolimgu9lah6aie99!",
            "3UD3GTVGOLIMGU9LAH6AIE99O",
            "3ud3gtvgolimgu9lah6aie9-o",
            "40eb9860-cf3e-45e2-a90e-b82236ac806c",
        ] {
            assert_eq!(decode(input), Err(Uuid25Error::Parse), "input: {:?}", input);
        }
    }

    #[test]
    fn test_malformed_characters_take_precedence_over_overflow() {
        assert_eq!(
            decode("zzzzzzzzzzzzzzzzzzzzzzzz!"),
            Err(Uuid25Error::Parse)
        );
    }

    #[test]
    fn test_zero_value() {
        assert_eq!(
            encode("00000000-0000-0000-0000-000000000000").unwrap(),
            "0000000000000000000000000"
        );
        assert_eq!(
            decode("0000000000000000000000000").unwrap(),
            "00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_encode_accepts_uppercase_hex() {
        assert_eq!(
            encode("40EB9860-CF3E-45E2-A90E-B82236AC806C").unwrap(),
            "3ud3gtvgolimgu9lah6aie99o"
        );
        assert_eq!(
            encode("40eb9860-CF3E-45e2-A90e-b82236ac806C").unwrap(),
            "3ud3gtvgolimgu9lah6aie99o"
        );
    }

    #[test]
    fn test_parse_accepts_all_layouts() {
        let expected = "3ud3gtvgolimgu9lah6aie99o";
        for input in [
            "3ud3gtvgolimgu9lah6aie99o",
            "40eb9860cf3e45e2a90eb82236ac806c",
            "40EB9860CF3E45E2A90EB82236AC806C",
            "40eb9860-cf3e-45e2-a90e-b82236ac806c",
        ] {
            assert_eq!(Uuid25::parse(input).unwrap().as_str(), expected);
        }
    }

    #[test]
    fn test_parse_rejects_other_layouts() {
        assert_eq!(Uuid25::parse(""), Err(Uuid25Error::Parse));
        assert_eq!(
            Uuid25::parse("{40eb9860-cf3e-45e2-a90e-b82236ac806c}"),
            Err(Uuid25Error::Parse)
        );
        assert_eq!(
            Uuid25::parse("40eb9860cf3e45e2a90eb82236ac806x"),
            Err(Uuid25Error::Parse)
        );
        assert_eq!(
            Uuid25::parse("f5lxx1zz5pnorynqglhzmsp34"),
            Err(Uuid25Error::Overflow)
        );
    }

    #[test]
    fn test_single_layout_parsers_are_strict() {
        assert!(Uuid25::parse_uuid25("40eb9860cf3e45e2a90eb82236ac806c").is_err());
        assert!(Uuid25::parse_hex("3ud3gtvgolimgu9lah6aie99o").is_err());
        assert!(Uuid25::parse_hex("40eb9860-cf3e-45e2-a90e-b82236ac806c").is_err());
        assert!(Uuid25::parse_hyphenated("40eb9860cf3e45e2a90eb82236ac806c").is_err());
    }

    #[test]
    fn test_formats_every_layout() {
        let id = Uuid25::parse("3ud3gtvgolimgu9lah6aie99o").unwrap();

        assert_eq!(id.to_string(), "3ud3gtvgolimgu9lah6aie99o");
        assert_eq!(id.to_hex(), "40eb9860cf3e45e2a90eb82236ac806c");
        assert_eq!(id.to_hyphenated(), "40eb9860-cf3e-45e2-a90e-b82236ac806c");
        assert_eq!(
            id.to_uuid(),
            Uuid::parse_str("40eb9860-cf3e-45e2-a90e-b82236ac806c").unwrap()
        );
    }

    #[test]
    fn test_from_uuid_matches_encode() {
        for value in sample_values(200) {
            let uuid = Uuid::from_u128(value);
            let id = Uuid25::from(uuid);

            assert_eq!(id.as_str(), encode(&hyphenated(value)).unwrap());
            assert_eq!(id.to_uuid(), uuid);
            assert_eq!(Uuid::from(&id), uuid);
        }
    }

    #[test]
    fn test_nil_and_max() {
        assert_eq!(Uuid25::from(Uuid::nil()), Uuid25::nil());
        assert_eq!(Uuid25::from(Uuid::from_u128(u128::MAX)), Uuid25::max());
        assert!(Uuid25::nil() < Uuid25::max());
        assert_eq!(Uuid25::max().to_hex(), "f".repeat(32));
    }

    #[test]
    fn test_timestamp_from_v7() {
        let id = Uuid25::parse("01890a5d-ac96-774b-bcce-b302099a8057").unwrap();
        let ts = id.timestamp().unwrap();

        assert_eq!(ts.timestamp_millis(), 1_688_096_058_518);
        assert_eq!(
            ts.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            "2023-06-30T03:34:18.518Z"
        );
    }

    #[test]
    fn test_timestamp_absent_for_random_uuid() {
        let id = Uuid25::parse("40eb9860-cf3e-45e2-a90e-b82236ac806c").unwrap();
        assert!(id.timestamp().is_none());
        assert!(Uuid25::nil().timestamp().is_none());
        assert!(Uuid25::max().timestamp().is_none());
    }

    #[test]
    fn test_from_str() {
        let parsed: Uuid25 = "40eb9860-cf3e-45e2-a90e-b82236ac806c".parse().unwrap();
        assert_eq!(parsed.as_ref(), "3ud3gtvgolimgu9lah6aie99o");

        let result: Result<Uuid25, _> = "not-a-uuid".parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_hash_consistency() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let a = Uuid25::parse("40eb9860-cf3e-45e2-a90e-b82236ac806c").unwrap();
        let b = Uuid25::parse("3ud3gtvgolimgu9lah6aie99o").unwrap();

        let mut hasher1 = DefaultHasher::new();
        let mut hasher2 = DefaultHasher::new();
        a.hash(&mut hasher1);
        b.hash(&mut hasher2);

        assert_eq!(hasher1.finish(), hasher2.finish());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let id = Uuid25::parse("3ud3gtvgolimgu9lah6aie99o").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"3ud3gtvgolimgu9lah6aie99o\"");

        let back: Uuid25 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        let from_hyphenated: Uuid25 =
            serde_json::from_str("\"40eb9860-cf3e-45e2-a90e-b82236ac806c\"").unwrap();
        assert_eq!(from_hyphenated, id);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_rejects_invalid() {
        let result: Result<Uuid25, _> = serde_json::from_str("\"f5lxx1zz5pnorynqglhzmsp34\"");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("128-bit overflow"));
    }
}
