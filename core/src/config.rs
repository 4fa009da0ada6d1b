//! # Constants
//!
//! Every magic number the derivation pipeline depends on lives here. Most of
//! them are dictated by age's X25519 identity format, so changing one breaks
//! interoperability with every age implementation out there. Don't.

// ---------------------------------------------------------------------------
// Curve Parameters
// ---------------------------------------------------------------------------

/// Width of an X25519 scalar in bytes. Also the width of the SHA-256 digest,
/// which is why a passphrase hash can be used directly as a scalar.
pub const SCALAR_LENGTH: usize = 32;

/// Width of an X25519 public point (a Montgomery u-coordinate) in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Hash applied to passphrase input. Listed for `--help` and log output only.
pub const PASSPHRASE_HASH: &str = "SHA-256";

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Bech32 HRP of an age X25519 recipient (`age1...`).
pub const RECIPIENT_HRP: &str = "age";

/// Bech32 HRP of an age X25519 identity. The encoded identity is upper-cased
/// as a whole, so on the wire it reads `AGE-SECRET-KEY-1...`.
pub const IDENTITY_HRP: &str = "age-secret-key-";

/// Comment prefix for the creation timestamp line of a key file.
pub const CREATED_COMMENT: &str = "# created: ";

/// Comment prefix for the public key line of a key file.
pub const PUBLIC_KEY_COMMENT: &str = "# public key: ";

// ---------------------------------------------------------------------------
// Strength Levels
// ---------------------------------------------------------------------------

/// Minimum passphrase lengths in bytes, indexed by strength level:
/// unrestricted, very low, low, medium, high.
pub const STRENGTH_THRESHOLDS: [usize; 5] = [0, 8, 12, 22, 44];

/// Words accepted for each strength level, same indexing as
/// [`STRENGTH_THRESHOLDS`].
pub const STRENGTH_WORDS: [&str; 5] = ["stupid", "verylow", "low", "medium", "high"];
