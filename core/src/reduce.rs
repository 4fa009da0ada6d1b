//! # Input Reduction
//!
//! Three ways in, one way out. Whatever the user handed us, this module turns
//! it into a 32-byte [`Scalar`] or explains precisely why it couldn't.
//!
//! ```text
//! Passphrase  --entropy gate--> SHA-256(bytes) --+
//! HexHash     --trim, hex-decode, len == 32------+--> Scalar
//! RawBytes    --len == 32------------------------+
//! ```
//!
//! ## Newlines
//!
//! Passphrase bytes are hashed verbatim. If the bytes came from a pipe they
//! probably end in `\n`, and that `\n` is part of the passphrase as far as
//! this module is concerned. Stripping it is the caller's decision, made
//! before calling [`reduce`]. Hex input is different: whitespace around a
//! hex string carries no meaning, so it is trimmed here.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::crypto::hash::hash_to_scalar;
use crate::crypto::keys::Scalar;
use crate::entropy::{self, StrengthLevel};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A hex hash could not be turned into a scalar.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedHash {
    /// Not hex at all, or an odd number of digits.
    #[error("unable to decode hash: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// Valid hex, wrong size.
    #[error(
        "wrong length of hash (maybe it is not a hash at all): expected {expected} bytes, got {got}"
    )]
    WrongLength {
        /// Always [`SCALAR_LENGTH`](crate::config::SCALAR_LENGTH).
        expected: usize,
        /// Decoded length in bytes.
        got: usize,
    },
}

/// Reasons an input could not be reduced to a scalar.
///
/// None of these variants carry input bytes. Lengths are fine to report;
/// contents are not.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReductionError {
    /// The passphrase is shorter than the selected strength level allows.
    #[error(
        "passphrase too short for strength level `{level}`: {length} bytes, at least {required} required"
    )]
    WeakInput {
        /// Level the passphrase was checked against.
        level: StrengthLevel,
        /// Length of the rejected passphrase.
        length: usize,
        /// Minimum length for `level`.
        required: usize,
    },

    /// Hex-hash input was not a 32-byte hex digest.
    #[error(transparent)]
    MalformedHash(#[from] MalformedHash),

    /// Raw input was not exactly 32 bytes.
    #[error("wrong amount of raw input: expected {expected} bytes, got {got}")]
    WrongLength {
        /// Always [`SCALAR_LENGTH`](crate::config::SCALAR_LENGTH).
        expected: usize,
        /// Number of bytes received.
        got: usize,
    },
}

// ---------------------------------------------------------------------------
// InputMode
// ---------------------------------------------------------------------------

/// How the raw input bytes should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// Free-form human text. Gated, then hashed with SHA-256.
    #[default]
    Passphrase,
    /// A hex-encoded 32-byte digest computed elsewhere.
    HexHash,
    /// Exactly 32 bytes of key material, used as-is.
    RawBytes,
}

impl InputMode {
    /// Whether the entropy gate applies to this mode.
    pub fn is_gated(self) -> bool {
        matches!(self, InputMode::Passphrase)
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputMode::Passphrase => "passphrase",
            InputMode::HexHash => "hex hash",
            InputMode::RawBytes => "raw bytes",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Reduction
// ---------------------------------------------------------------------------

/// Reduce `material` to a scalar according to `mode`.
///
/// `level` only matters for [`InputMode::Passphrase`]; the other modes
/// ignore it.
///
/// # Example
///
/// ```
/// use passgen_core::entropy::StrengthLevel;
/// use passgen_core::reduce::{reduce, InputMode};
///
/// let hex = "00".repeat(32);
/// let scalar = reduce(InputMode::HexHash, hex.as_bytes(), StrengthLevel::High).unwrap();
/// assert!(scalar.is_zero());
/// ```
pub fn reduce(
    mode: InputMode,
    material: &[u8],
    level: StrengthLevel,
) -> Result<Scalar, ReductionError> {
    tracing::debug!(%mode, length = material.len(), "reducing input");
    match mode {
        InputMode::Passphrase => reduce_passphrase(material, level),
        InputMode::HexHash => reduce_hex_hash(material),
        InputMode::RawBytes => reduce_raw(material),
    }
}

/// Gate the passphrase, then hash it.
pub fn reduce_passphrase(material: &[u8], level: StrengthLevel) -> Result<Scalar, ReductionError> {
    if !entropy::validate(material, level) {
        return Err(ReductionError::WeakInput {
            level,
            length: material.len(),
            required: level.min_length(),
        });
    }
    Ok(hash_to_scalar(material))
}

/// Trim, hex-decode and length-check a digest.
pub fn reduce_hex_hash(material: &[u8]) -> Result<Scalar, ReductionError> {
    let trimmed = trim_ascii_whitespace(material);
    let decoded = zeroize::Zeroizing::new(hex::decode(trimmed).map_err(MalformedHash::from)?);
    Scalar::try_from_slice(&decoded).map_err(|e| {
        MalformedHash::WrongLength {
            expected: e.expected,
            got: e.got,
        }
        .into()
    })
}

/// Length-check raw key material. No hashing, no trimming.
pub fn reduce_raw(material: &[u8]) -> Result<Scalar, ReductionError> {
    Scalar::try_from_slice(material).map_err(|e| ReductionError::WrongLength {
        expected: e.expected,
        got: e.got,
    })
}

impl ReductionError {
    /// Length of the rejected input, when the error knows it.
    pub fn input_length(&self) -> Option<usize> {
        match self {
            ReductionError::WeakInput { length, .. } => Some(*length),
            ReductionError::MalformedHash(MalformedHash::WrongLength { got, .. }) => Some(*got),
            ReductionError::MalformedHash(MalformedHash::InvalidHex(_)) => None,
            ReductionError::WrongLength { got, .. } => Some(*got),
        }
    }
}

fn trim_ascii_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SCALAR_LENGTH;
    use rand::RngCore;

    const PASSPHRASE: &[u8] = b"correct horse battery staple plus extra";

    #[test]
    fn passphrase_is_hashed_with_sha256() {
        let scalar = reduce(InputMode::Passphrase, PASSPHRASE, StrengthLevel::Medium).unwrap();
        assert_eq!(
            hex::encode(scalar.as_bytes()),
            "e9e93dd25b79750989a966af7995a8c350842758253d428e5220bca6ffb99305"
        );
    }

    #[test]
    fn weak_passphrase_is_rejected_with_lengths() {
        let err = reduce(InputMode::Passphrase, b"hunter2", StrengthLevel::VeryLow).unwrap_err();
        assert_eq!(
            err,
            ReductionError::WeakInput {
                level: StrengthLevel::VeryLow,
                length: 7,
                required: 8,
            }
        );
        assert_eq!(err.input_length(), Some(7));
    }

    #[test]
    fn unrestricted_hashes_empty_passphrase() {
        let scalar = reduce(InputMode::Passphrase, b"", StrengthLevel::Unrestricted).unwrap();
        assert_eq!(
            hex::encode(scalar.as_bytes()),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn passphrase_reduction_is_deterministic() {
        let a = reduce(InputMode::Passphrase, PASSPHRASE, StrengthLevel::Medium).unwrap();
        let b = reduce(InputMode::Passphrase, PASSPHRASE, StrengthLevel::Medium).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn hex_hash_roundtrips_random_digests() {
        let mut rng = rand::thread_rng();
        for _ in 0..16 {
            let mut digest = [0u8; SCALAR_LENGTH];
            rng.fill_bytes(&mut digest);
            let encoded = hex::encode(digest);
            let scalar =
                reduce(InputMode::HexHash, encoded.as_bytes(), StrengthLevel::High).unwrap();
            assert_eq!(scalar.as_bytes(), &digest);
        }
    }

    #[test]
    fn hex_hash_tolerates_whitespace_and_upper_case() {
        let digest = [0xABu8; SCALAR_LENGTH];
        let encoded = format!("  {}\r\n", hex::encode_upper(digest));
        let scalar = reduce_hex_hash(encoded.as_bytes()).unwrap();
        assert_eq!(scalar.as_bytes(), &digest);
    }

    #[test]
    fn trim_handles_blank_and_padded_input() {
        assert_eq!(trim_ascii_whitespace(b""), b"");
        assert_eq!(trim_ascii_whitespace(b" \t\n"), b"");
        assert_eq!(trim_ascii_whitespace(b"\tab cd\n"), b"ab cd");
    }

    #[test]
    fn blank_hex_input_is_a_zero_length_hash() {
        let err = reduce_hex_hash(b"  \n").unwrap_err();
        assert_eq!(err.input_length(), Some(0));
    }

    #[test]
    fn hex_hash_reports_wrong_length() {
        for len in [0usize, 16, 31, 33, 64] {
            let encoded = hex::encode(vec![0u8; len]);
            let err = reduce_hex_hash(encoded.as_bytes()).unwrap_err();
            assert_eq!(
                err,
                ReductionError::MalformedHash(MalformedHash::WrongLength {
                    expected: SCALAR_LENGTH,
                    got: len,
                })
            );
            assert!(err.to_string().contains(&format!("got {len}")));
        }
    }

    #[test]
    fn hex_hash_rejects_non_hex() {
        let mut encoded = hex::encode([0u8; SCALAR_LENGTH]);
        encoded.replace_range(10..11, "g");
        let err = reduce_hex_hash(encoded.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ReductionError::MalformedHash(MalformedHash::InvalidHex(_))
        ));
        assert_eq!(err.input_length(), None);
    }

    #[test]
    fn hex_hash_rejects_odd_digit_count() {
        let err = reduce_hex_hash(b"abc").unwrap_err();
        assert!(matches!(
            err,
            ReductionError::MalformedHash(MalformedHash::InvalidHex(hex::FromHexError::OddLength))
        ));
    }

    #[test]
    fn raw_bytes_pass_through_unchanged() {
        let mut material = [0u8; SCALAR_LENGTH];
        rand::thread_rng().fill_bytes(&mut material);
        let scalar = reduce(InputMode::RawBytes, &material, StrengthLevel::High).unwrap();
        assert_eq!(scalar.as_bytes(), &material);
    }

    #[test]
    fn raw_bytes_reject_every_other_length() {
        for len in (0..=64).filter(|&l| l != SCALAR_LENGTH) {
            let err = reduce(InputMode::RawBytes, &vec![0u8; len], StrengthLevel::High).unwrap_err();
            assert_eq!(
                err,
                ReductionError::WrongLength {
                    expected: SCALAR_LENGTH,
                    got: len,
                }
            );
        }
    }

    #[test]
    fn raw_bytes_are_not_trimmed() {
        // A trailing newline makes it 33 bytes, which is an error, not a trim.
        let mut material = vec![b'k'; SCALAR_LENGTH];
        material.push(b'\n');
        assert!(reduce_raw(&material).is_err());
    }

    #[test]
    fn only_passphrase_mode_is_gated() {
        assert!(InputMode::Passphrase.is_gated());
        assert!(!InputMode::HexHash.is_gated());
        assert!(!InputMode::RawBytes.is_gated());
    }
}
