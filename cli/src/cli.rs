//! # CLI Interface
//!
//! Defines the command-line argument structure for `age-passgen` using
//! `clap` derive, plus the parsers for the values clap can't handle on its
//! own (the mixed word/number entropy levels).

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

use passgen_core::{InputMode, StrengthLevel};

use crate::logging::LogFormat;

const AFTER_HELP: &str = "\
Works like age-keygen, except the identity is derived from what you type
instead of from fresh randomness: the same input always yields the same key.

Input types:
  password  free-form passphrase, hashed with SHA-256 (default)
  hash      a hex-encoded 32-byte digest, surrounding whitespace ignored
  raw       exactly 32 bytes of key material, used as-is

Entropy levels (password input only) set the minimum passphrase length:
  high    (or 4)  44 bytes
  medium  (or 3)  22 bytes (default)
  low     (or 2)  12 bytes
  verylow (or 1)   8 bytes
  stupid          no limit

The check counts bytes and nothing else. Passing it does not make a
passphrase strong.

Piped input is used verbatim, trailing newline included, unless
--trim-newline is given.";

/// Regenerate an age identity from a memorable secret.
///
/// Reads a passphrase (or a hash, or raw key bytes) from the terminal,
/// stdin or a file, and prints the corresponding age X25519 identity.
#[derive(Parser, Debug)]
#[command(
    name = "age-passgen",
    about = "Derive a deterministic age identity from a passphrase",
    version,
    after_help = AFTER_HELP
)]
pub struct PassgenCli {
    /// Write the result to the file at path OUTPUT.
    ///
    /// The file is created with mode 0600 on Unix. The public key is echoed
    /// to stderr.
    #[arg(long, short = 'o', value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Print stripped keys (without comments or trailing newline).
    #[arg(long)]
    pub raw_output: bool,

    /// Required passphrase strength: stupid, verylow, low, medium, high or 1-4.
    #[arg(
        long,
        env = "AGE_PASSGEN_ENTROPY_LEVEL",
        default_value = "medium",
        value_parser = parse_entropy_level,
        value_name = "LEVEL"
    )]
    pub entropy_level: StrengthLevel,

    /// How to interpret the input.
    #[arg(
        long,
        env = "AGE_PASSGEN_INPUT_TYPE",
        value_enum,
        default_value_t = InputType::Password,
        value_name = "TYPE"
    )]
    pub input_type: InputType,

    /// Read the input from FILE instead of the terminal or stdin.
    #[arg(long, short = 'i', value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Strip one trailing newline (`\n` or `\r\n`) from the input.
    #[arg(long)]
    pub trim_newline: bool,

    /// Increase log verbosity (-v info, -vv debug). Logs go to stderr.
    #[arg(long, short = 'v', action = ArgAction::Count)]
    pub verbose: u8,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl PassgenCli {
    /// Default `tracing` filter for the selected verbosity. `RUST_LOG`
    /// still wins when set.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "age_passgen=info,passgen_core=info",
            _ => "age_passgen=debug,passgen_core=debug",
        }
    }
}

/// Command-line names for the input modes.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    /// Free-form passphrase.
    Password,
    /// Hex-encoded 32-byte digest.
    Hash,
    /// Exactly 32 raw bytes.
    Raw,
}

impl From<InputType> for InputMode {
    fn from(input_type: InputType) -> Self {
        match input_type {
            InputType::Password => InputMode::Passphrase,
            InputType::Hash => InputMode::HexHash,
            InputType::Raw => InputMode::RawBytes,
        }
    }
}

/// Parse `--entropy-level`.
///
/// Numbers 1 to 4 map to `verylow` through `high`. `0` is refused on purpose:
/// turning the check off has to be spelled `stupid`.
pub fn parse_entropy_level(s: &str) -> Result<StrengthLevel, String> {
    if let Ok(n) = s.parse::<i64>() {
        return match n {
            0 => Err("no such entropy level `0`, try `stupid`".to_string()),
            1..=4 => StrengthLevel::from_ordinal(n as usize)
                .ok_or_else(|| format!("no entropy level numbered `{n}`")),
            _ => Err(format!(
                "wrong entropy level `{n}`, level should be within range 1 to 4"
            )),
        };
    }
    StrengthLevel::from_word(s)
        .ok_or_else(|| format!("no such entropy level: `{s}` (maybe mistyped?)"))
}
