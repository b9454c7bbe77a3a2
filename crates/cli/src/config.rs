//! CLI runtime configuration.
//!
//! Resolved once at startup from command-line flags and the environment, then passed into the
//! command handlers. Handlers never read environment variables themselves.

use std::fmt;
use std::str::FromStr;

/// Environment variable holding the default output layout for `decode`.
pub const DECODE_FORMAT_ENV: &str = "UUID25_DECODE_FORMAT";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid UUID25_DECODE_FORMAT value '{0}' (expected 'hyphenated' or 'hex')")]
    InvalidDecodeFormat(String),
}

/// Output layout for decoded UUIDs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum DecodeFormat {
    /// `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`
    #[default]
    Hyphenated,
    /// 32 hex digits without hyphens
    Hex,
}

impl FromStr for DecodeFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hyphenated" => Ok(Self::Hyphenated),
            "hex" => Ok(Self::Hex),
            _ => Err(ConfigError::InvalidDecodeFormat(s.to_owned())),
        }
    }
}

impl fmt::Display for DecodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hyphenated => f.write_str("hyphenated"),
            Self::Hex => f.write_str("hex"),
        }
    }
}

/// CLI configuration resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    decode_format: DecodeFormat,
}

impl CliConfig {
    /// Resolve the configuration.
    ///
    /// `flag` (from `--format`) wins over `env_value` (from [`DECODE_FORMAT_ENV`]). With neither,
    /// decoded UUIDs are hyphenated.
    pub fn resolve(
        flag: Option<DecodeFormat>,
        env_value: Option<String>,
    ) -> Result<Self, ConfigError> {
        let decode_format = match (flag, env_value) {
            (Some(format), _) => format,
            (None, Some(value)) => value.parse()?,
            (None, None) => DecodeFormat::default(),
        };
        Ok(Self { decode_format })
    }

    pub fn decode_format(&self) -> DecodeFormat {
        self.decode_format
    }
}
