//! # Secret Scalars
//!
//! A [`Scalar`] is the 32 bytes that become an X25519 private key. Every
//! input mode (passphrase, hex hash, raw bytes) ends up here, so this is the
//! single type downstream code has to trust.
//!
//! ## Security considerations
//!
//! - Scalar bytes are zeroized on drop.
//! - `Debug` never prints them. Not even partially.
//! - There is no `Clone`. A second copy of a private key is a second thing
//!   to protect, so if you need one, ask for the bytes explicitly.
//! - Exactly [`SCALAR_LENGTH`] bytes or nothing. A slice of any other length
//!   is rejected, never truncated or padded.

use std::fmt;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::config::SCALAR_LENGTH;

/// A slice of the wrong length was offered as a scalar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid scalar length: expected {expected} bytes, got {got}")]
pub struct ScalarLengthError {
    /// Always [`SCALAR_LENGTH`].
    pub expected: usize,
    /// Length of the offending slice.
    pub got: usize,
}

/// A 32-byte X25519 secret scalar, stored exactly as it was produced.
///
/// No clamping happens here. The X25519 function clamps internally, and the
/// age identity encoding carries the unclamped bytes, so storing anything
/// else would change the encoded secret key.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Scalar([u8; SCALAR_LENGTH]);

impl Scalar {
    /// Wrap an owned array. Infallible because the length is in the type.
    pub fn from_bytes(bytes: [u8; SCALAR_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Copy a slice into a scalar, failing unless it is exactly
    /// [`SCALAR_LENGTH`] bytes long.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, ScalarLengthError> {
        if slice.len() != SCALAR_LENGTH {
            return Err(ScalarLengthError {
                expected: SCALAR_LENGTH,
                got: slice.len(),
            });
        }
        let mut bytes = [0u8; SCALAR_LENGTH];
        bytes.copy_from_slice(slice);
        Ok(Self(bytes))
    }

    /// Borrow the raw scalar bytes.
    ///
    /// **Handle with care.** These bytes are the private key.
    pub fn as_bytes(&self) -> &[u8; SCALAR_LENGTH] {
        &self.0
    }

    /// `true` for the all-zero scalar.
    ///
    /// Zero still yields a usable public point (X25519 sets bit 254 while
    /// clamping), but it is the one scalar every attacker tries first.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }
}

impl TryFrom<&[u8]> for Scalar {
    type Error = ScalarLengthError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        Self::try_from_slice(slice)
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        // Only tests compare scalars; nothing here runs on attacker timing.
        self.0 == other.0
    }
}

impl Eq for Scalar {}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Scalar(<redacted>)")
    }
}
