//! # Passphrase Hashing
//!
//! SHA-256 is the one hash in this crate. It turns a passphrase of any length
//! into exactly [`SCALAR_LENGTH`] bytes, which then serve as the X25519
//! secret scalar.
//!
//! ## Compatibility
//!
//! Existing identities were derived with a single unsalted SHA-256, and the
//! same passphrase must keep producing the same key. Any other KDF would be
//! a different derivation scheme with different outputs. The entropy gate in
//! [`crate::entropy`] is the only brake on weak input.

use sha2::{Digest, Sha256};

use crate::config::SCALAR_LENGTH;
use crate::crypto::keys::Scalar;

/// Compute the SHA-256 digest of `data` as a fixed-size array.
///
/// # Example
///
/// ```
/// use passgen_core::crypto::sha256;
///
/// let digest = sha256(b"age");
/// assert_eq!(digest.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; SCALAR_LENGTH] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; SCALAR_LENGTH];
    output.copy_from_slice(&result);
    output
}

/// Hash passphrase bytes straight into a [`Scalar`].
///
/// The bytes are hashed exactly as given: no trimming, no Unicode
/// normalization. Identical bytes in, identical scalar out.
pub fn hash_to_scalar(passphrase: &[u8]) -> Scalar {
    Scalar::from_bytes(sha256(passphrase))
}
