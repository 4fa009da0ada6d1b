//! # Cryptographic Primitives
//!
//! Thin wrappers over audited crates. SHA-256 comes from `sha2`, X25519 from
//! `x25519-dalek`; nothing in here does its own arithmetic.

pub mod hash;
pub mod keys;

pub use hash::{hash_to_scalar, sha256};
pub use keys::{Scalar, ScalarLengthError};
