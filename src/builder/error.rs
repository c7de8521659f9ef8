//! Build errors for document and transition builders.

use crate::codec::DepthError;
use crate::error::DecodeError;
use thiserror::Error;

/// Errors that can occur when building documents and transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Transition source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,

    #[error("Transition symbol not specified. Call .symbol(name)")]
    MissingSymbol,

    #[error("Guard cannot be encoded readably: {0}")]
    GuardTooDeep(#[from] DepthError),

    #[error("Invalid alphabet: {0}")]
    InvalidAlphabet(#[from] DecodeError),
}
