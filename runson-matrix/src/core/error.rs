//! Failures of matrix construction.

use thiserror::Error;

/// Why a matrix could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    #[error("unknown runner {runner:?}: no arm64 counterpart (known: {known})")]
    UnknownRunner { runner: String, known: String },
}

pub type MatrixResult<T> = Result<T, MatrixError>;
