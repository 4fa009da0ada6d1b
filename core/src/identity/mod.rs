//! # Identity Module
//!
//! From scalar to key file, in two layers:
//!
//! 1. **x25519** — [`Identity`]: the secret scalar plus the public point
//!    derived from it with X25519. Construction is deterministic and can't
//!    fail once you hold a [`Scalar`](crate::crypto::Scalar).
//! 2. **encoding** — age's Bech32 text forms (`age1...` recipients and
//!    `AGE-SECRET-KEY-1...` identities) and the `age-keygen`-style key file
//!    around them.
//!
//! ## Design Decisions
//!
//! - X25519 comes from `x25519-dalek`'s bare `x25519` function rather than
//!   `StaticSecret`, because we need the exact bytes we were given stored
//!   back out, unclamped, in the secret key string.
//! - Bech32 (not Bech32m), via the `bech32` crate. Same choice age made.

pub mod encoding;
pub mod x25519;

pub use encoding::{
    encode, encode_at, parse_identity, parse_recipient, EncodeOptions, EncodedIdentity,
    EncodingError,
};
pub use x25519::{derive, DerivationError, Identity};
