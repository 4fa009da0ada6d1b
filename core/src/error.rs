//! Crate-wide error type.
//!
//! Each stage has its own error enum; [`Error`] wraps them so callers that
//! run the whole pipeline can use a single `?`.

use thiserror::Error;

use crate::identity::{DerivationError, EncodingError};
use crate::reduce::ReductionError;

/// Any failure from the derivation pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Reduction(#[from] ReductionError),

    #[error(transparent)]
    Derivation(#[from] DerivationError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

/// Shorthand used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
