//! # X25519 Identity Derivation
//!
//! `scalar -> X25519(scalar, 9) -> public point`. That's the whole algorithm.
//!
//! ## Trusted construction
//!
//! age's own identity constructor only hands out freshly random keys or
//! parses existing ones. Here the scalar comes from a passphrase hash, so
//! there is no "fresh random" to speak of. [`Identity::from_scalar`] is the
//! plain constructor that fills the gap: take a scalar that already passed
//! [`crate::reduce`], multiply the base point, keep both halves. No memory
//! layout games, no wrapper around a foreign type.
//!
//! The scalar is stored verbatim. Clamping (clear the low three bits, clear
//! bit 255, set bit 254) happens inside the X25519 function and nowhere else,
//! which is exactly what every age implementation does with the bytes it
//! decodes from an `AGE-SECRET-KEY-1...` string.
//!
//! ## Degenerate scalars
//!
//! The all-zero scalar is accepted. After clamping it becomes 2^254, which
//! is a perfectly ordinary point multiplier, so the public key is valid. It
//! is also the first key anyone would try. We log a warning and move on:
//! rejecting it would make one specific input irreproducible. Callers that
//! want to refuse it can check [`Scalar::is_zero`] themselves.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use x25519_dalek::{x25519, X25519_BASEPOINT_BYTES};
use zeroize::Zeroizing;

use crate::config::PUBLIC_KEY_LENGTH;
use crate::crypto::keys::Scalar;
use crate::identity::encoding::{self, EncodingError};

/// Errors from [`derive`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerivationError {
    /// The scalar was not exactly 32 bytes. Unreachable through
    /// [`crate::reduce`]; seeing this means a caller skipped it.
    #[error("invalid X25519 secret scalar: expected {expected} bytes, got {got}")]
    InvalidScalarLength {
        /// Always [`SCALAR_LENGTH`](crate::config::SCALAR_LENGTH).
        expected: usize,
        /// Length that was actually supplied.
        got: usize,
    },
}

/// An X25519 key pair in age's sense: a secret scalar and the public point
/// derived from it.
///
/// The public half is never accepted as input. Every constructor computes
/// it from the secret, so the two can't disagree.
pub struct Identity {
    secret: Scalar,
    public: [u8; PUBLIC_KEY_LENGTH],
}

impl Identity {
    /// Derive the public point for `secret` and bundle the two.
    ///
    /// # Example
    ///
    /// ```
    /// use passgen_core::crypto::Scalar;
    /// use passgen_core::identity::Identity;
    ///
    /// let identity = Identity::from_scalar(Scalar::from_bytes([0x42; 32]));
    /// assert_eq!(
    ///     identity.recipient(),
    ///     "age1zvkyg2lqzraa2lnjvqej32nkuu0ues2s82hzrye869xeexvn73equnujwj"
    /// );
    /// ```
    pub fn from_scalar(secret: Scalar) -> Self {
        if secret.is_zero() {
            tracing::warn!("deriving an identity from the all-zero scalar");
        }
        let public = x25519(*secret.as_bytes(), X25519_BASEPOINT_BYTES);
        Self { secret, public }
    }

    /// The secret scalar. **Never log this.**
    pub fn secret(&self) -> &Scalar {
        &self.secret
    }

    /// The public point (Montgomery u-coordinate, little-endian).
    pub fn public_key(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.public
    }

    /// The `age1...` recipient string for this identity.
    pub fn recipient(&self) -> String {
        encoding::encode_recipient(&self.public)
    }

    /// The `AGE-SECRET-KEY-1...` string for this identity, wiped on drop.
    pub fn to_secret_string(&self) -> Zeroizing<String> {
        encoding::encode_secret(&self.secret)
    }
}

impl PartialEq for Identity {
    /// Identities are equal when their public points are. Equal public
    /// points mean equal clamped scalars, which is all X25519 can observe.
    fn eq(&self, other: &Self) -> bool {
        self.public == other.public
    }
}

impl Eq for Identity {}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Public half only.
        write!(f, "Identity({})", self.recipient())
    }
}

impl FromStr for Identity {
    type Err = EncodingError;

    /// Parse an `AGE-SECRET-KEY-1...` string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        encoding::parse_identity(s)
    }
}

/// Derive an identity from a scalar given as a slice.
///
/// The slice must be exactly 32 bytes; anything else is an
/// [`DerivationError::InvalidScalarLength`]. When you already hold a
/// [`Scalar`], use [`Identity::from_scalar`], which can't fail.
pub fn derive(scalar: &[u8]) -> Result<Identity, DerivationError> {
    let secret = Scalar::try_from_slice(scalar).map_err(|e| {
        tracing::error!(got = e.got, "scalar length invariant violated");
        DerivationError::InvalidScalarLength {
            expected: e.expected,
            got: e.got,
        }
    })?;
    Ok(Identity::from_scalar(secret))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SCALAR_LENGTH;

    fn from_hex(s: &str) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&hex::decode(s).unwrap());
        out
    }

    #[test]
    fn rfc7748_alice_public_key() {
        let identity = derive(&from_hex(
            "77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a",
        ))
        .unwrap();
        assert_eq!(
            hex::encode(identity.public_key()),
            "8520f0098930a754748b7ddcb43ef75a0dbf3a0d26381af4eba4a98eaa9b4e6a"
        );
    }

    #[test]
    fn rfc7748_bob_public_key() {
        let identity = derive(&from_hex(
            "5dab087e624a8a4b79e17f8b83800ee66f3bb1292618b6fd1c2f8b27ff88e0eb",
        ))
        .unwrap();
        assert_eq!(
            hex::encode(identity.public_key()),
            "de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dadfc7e146f882b4f"
        );
    }

    #[test]
    fn zero_and_one_collapse_under_clamping() {
        // Clamping clears the low three bits, so 0 and 1 multiply the base
        // point by the same value.
        let mut one = [0u8; SCALAR_LENGTH];
        one[0] = 1;
        let zero = derive(&[0u8; SCALAR_LENGTH]).unwrap();
        let one = derive(&one).unwrap();
        assert_eq!(zero.public_key(), one.public_key());
        assert_eq!(
            hex::encode(zero.public_key()),
            "2fe57da347cd62431528daac5fbb290730fff684afc4cfc2ed90995f58cb3b74"
        );
    }

    #[test]
    fn secret_is_stored_unclamped() {
        let mut bytes = [0xFFu8; SCALAR_LENGTH];
        bytes[0] = 0x07;
        let identity = Identity::from_scalar(Scalar::from_bytes(bytes));
        assert_eq!(identity.secret().as_bytes(), &bytes);
    }

    #[test]
    fn derivation_is_deterministic() {
        let a = derive(&[9u8; SCALAR_LENGTH]).unwrap();
        let b = derive(&[9u8; SCALAR_LENGTH]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.recipient(), b.recipient());
    }

    #[test]
    fn derive_rejects_wrong_lengths() {
        for len in [0, 31, 33] {
            let err = derive(&vec![1u8; len]).unwrap_err();
            assert_eq!(
                err,
                DerivationError::InvalidScalarLength {
                    expected: SCALAR_LENGTH,
                    got: len,
                }
            );
        }
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let identity = Identity::from_scalar(Scalar::from_bytes([0x42; SCALAR_LENGTH]));
        let debug_str = format!("{:?}", identity);
        assert!(debug_str.starts_with("Identity(age1"));
        assert!(!debug_str.contains("AGE-SECRET-KEY"));
        assert!(!debug_str.contains("4242"));
    }
}
