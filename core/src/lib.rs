// Copyright (c) 2026 age-passgen contributors. MIT License.
// See LICENSE for details.

//! # passgen-core — Deterministic age Identities
//!
//! Turn something you can remember into an age X25519 identity, and get the
//! very same identity back every time you type it again. No key file to back
//! up, no randomness anywhere in the pipeline.
//!
//! ```text
//! raw bytes --reduce--> Scalar --derive--> Identity --encode--> key file text
//!              |
//!              +-- entropy gate (passphrase mode only)
//! ```
//!
//! ## Modules
//!
//! - **config** — Format constants and strength thresholds.
//! - **crypto** — SHA-256 and the zeroizing [`Scalar`](crypto::Scalar) type.
//! - **entropy** — The length-only passphrase gate.
//! - **reduce** — Passphrase / hex hash / raw bytes to a scalar.
//! - **identity** — X25519 derivation and age's Bech32 text format.
//! - **error** — The crate-wide [`Error`].
//!
//! ## Example
//!
//! ```
//! use passgen_core::entropy::StrengthLevel;
//! use passgen_core::identity::{encode, EncodeOptions};
//! use passgen_core::reduce::InputMode;
//!
//! let identity = passgen_core::generate(
//!     InputMode::Passphrase,
//!     b"correct horse battery staple plus extra",
//!     StrengthLevel::Medium,
//! )
//! .unwrap();
//!
//! let text = encode(&identity, EncodeOptions { verbose: false }).to_string();
//! assert!(text.starts_with("AGE-SECRET-KEY-1"));
//! ```
//!
//! ## What this is not
//!
//! A passphrase-derived key is only as strong as the passphrase. The entropy
//! gate counts bytes; it can't tell a diceware phrase from a keyboard smash
//! of the same length.

pub mod config;
pub mod crypto;
pub mod entropy;
pub mod error;
pub mod identity;
pub mod reduce;

pub use entropy::StrengthLevel;
pub use error::{Error, Result};
pub use identity::{EncodeOptions, EncodedIdentity, Identity};
pub use reduce::InputMode;

/// Reduce `material` and derive its identity in one call.
///
/// Equivalent to [`reduce::reduce`] followed by [`Identity::from_scalar`].
pub fn generate(mode: InputMode, material: &[u8], level: StrengthLevel) -> Result<Identity> {
    let scalar = reduce::reduce(mode, material, level)?;
    let identity = Identity::from_scalar(scalar);
    tracing::info!(%mode, %level, recipient = %identity.recipient(), "identity derived");
    Ok(identity)
}
