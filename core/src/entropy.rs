//! # Entropy Gate
//!
//! A length-only floor for passphrase input.
//!
//! Let's be honest about what this is: a heuristic. `aaaaaaaaaaaaaaaaaaaaaa`
//! passes the `Medium` gate just as well as a 22-character diceware phrase.
//! Character diversity is not inspected, dictionaries are not consulted.
//! It stops the most obvious mistakes (a four-letter PIN as the root of an
//! age identity) and nothing more. Passing the gate is not a strength
//! guarantee and should never be presented as one.
//!
//! Hash and raw-byte inputs skip the gate entirely: their length is fixed
//! at 32 bytes and says nothing about how they were produced.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{STRENGTH_THRESHOLDS, STRENGTH_WORDS};

/// Minimum passphrase length policy.
///
/// | Level          | Word      | Number | Minimum bytes |
/// |----------------|-----------|--------|---------------|
/// | `Unrestricted` | `stupid`  | none   | 0             |
/// | `VeryLow`      | `verylow` | 1      | 8             |
/// | `Low`          | `low`     | 2      | 12            |
/// | `Medium`       | `medium`  | 3      | 22            |
/// | `High`         | `high`    | 4      | 44            |
///
/// `Unrestricted` has no number on purpose: it should take a word that
/// reads like a warning to turn the gate off.
///
/// Serialized with the same words, so a config file and the command line
/// share one vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthLevel {
    /// No floor at all, empty input included. An escape hatch, not a mode.
    #[serde(rename = "stupid")]
    Unrestricted,
    VeryLow,
    Low,
    #[default]
    Medium,
    High,
}

impl StrengthLevel {
    /// Every level, weakest first.
    pub const ALL: [StrengthLevel; 5] = [
        StrengthLevel::Unrestricted,
        StrengthLevel::VeryLow,
        StrengthLevel::Low,
        StrengthLevel::Medium,
        StrengthLevel::High,
    ];

    /// Ordinal position, 0 for `Unrestricted` up to 4 for `High`. Matches the
    /// numeric form accepted on the command line for levels 1 to 4.
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Look a level up by ordinal. `None` above 4.
    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::ALL.get(ordinal).copied()
    }

    /// Look a level up by its command-line word (`stupid`, `verylow`, ...).
    /// Exact, lowercase match only.
    pub fn from_word(word: &str) -> Option<Self> {
        STRENGTH_WORDS
            .iter()
            .position(|w| *w == word)
            .and_then(Self::from_ordinal)
    }

    /// The command-line word for this level.
    pub fn word(self) -> &'static str {
        STRENGTH_WORDS[self.ordinal()]
    }

    /// Minimum accepted passphrase length in bytes.
    pub fn min_length(self) -> usize {
        STRENGTH_THRESHOLDS[self.ordinal()]
    }
}

impl fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.word())
    }
}

/// Check `material` against the floor of `level`.
///
/// Returns `true` iff `material.len() >= level.min_length()`. Lengths are in
/// bytes, not characters, so multi-byte UTF-8 counts for more.
///
/// Never errors. Deciding what a `false` means is the caller's job.
///
/// # Example
///
/// ```
/// use passgen_core::entropy::{validate, StrengthLevel};
///
/// assert!(validate(b"twelve bytes", StrengthLevel::Low));
/// assert!(!validate(b"short", StrengthLevel::Low));
/// assert!(validate(b"", StrengthLevel::Unrestricted));
/// ```
pub fn validate(material: &[u8], level: StrengthLevel) -> bool {
    material.len() >= level.min_length()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_match_levels() {
        assert_eq!(StrengthLevel::Unrestricted.min_length(), 0);
        assert_eq!(StrengthLevel::VeryLow.min_length(), 8);
        assert_eq!(StrengthLevel::Low.min_length(), 12);
        assert_eq!(StrengthLevel::Medium.min_length(), 22);
        assert_eq!(StrengthLevel::High.min_length(), 44);
    }

    #[test]
    fn boundary_is_inclusive_for_every_level() {
        for level in StrengthLevel::ALL {
            let threshold = level.min_length();
            assert!(validate(&vec![b'x'; threshold], level), "{level}");
            assert!(validate(&vec![b'x'; threshold + 1], level), "{level}");
            if threshold > 0 {
                assert!(!validate(&vec![b'x'; threshold - 1], level), "{level}");
            }
        }
    }

    #[test]
    fn unrestricted_accepts_empty_input() {
        assert!(validate(b"", StrengthLevel::Unrestricted));
    }

    #[test]
    fn only_length_is_inspected() {
        // Zero diversity still passes. That's the documented weakness.
        assert!(validate(&[b'a'; 22], StrengthLevel::Medium));
    }

    #[test]
    fn length_is_counted_in_bytes() {
        // Four characters, eight bytes.
        let material = "ßßßß".as_bytes();
        assert_eq!(material.len(), 8);
        assert!(validate(material, StrengthLevel::VeryLow));
    }

    #[test]
    fn ordinal_and_word_roundtrip() {
        for (i, level) in StrengthLevel::ALL.into_iter().enumerate() {
            assert_eq!(level.ordinal(), i);
            assert_eq!(StrengthLevel::from_ordinal(i), Some(level));
            assert_eq!(StrengthLevel::from_word(level.word()), Some(level));
        }
        assert_eq!(StrengthLevel::from_ordinal(5), None);
        assert_eq!(StrengthLevel::from_word("Medium"), None);
        assert_eq!(StrengthLevel::from_word("extreme"), None);
    }

    #[test]
    fn default_is_medium() {
        assert_eq!(StrengthLevel::default(), StrengthLevel::Medium);
    }

    #[test]
    fn serde_uses_command_line_words() {
        for level in StrengthLevel::ALL {
            let json = serde_json::to_string(&level).unwrap();
            assert_eq!(json, format!("\"{}\"", level.word()));
            let back: StrengthLevel = serde_json::from_str(&json).unwrap();
            assert_eq!(back, level);
        }
        assert!(serde_json::from_str::<StrengthLevel>("\"very_low\"").is_err());
    }
}
