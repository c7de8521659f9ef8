//! Decode errors for compound attributes and alphabets.

use std::fmt;
use thiserror::Error;

/// The two symbol partitions of an [`Alphabet`](crate::core::Alphabet).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Partition {
    Inputs,
    Outputs,
}

impl Partition {
    /// The wrapper element name used by the format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inputs => "inputs",
            Self::Outputs => "outputs",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while decoding a document or one of its compound attributes.
///
/// Any of these makes the whole document unparsed; there is no partial result.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// A delimited list had an empty token (e.g. `a,,b`).
    #[error("Malformed list '{text}': token {token} is empty")]
    MalformedList { text: String, token: usize },

    /// A guard expression did not match the grammar.
    #[error("Malformed guard at position {position} near '{fragment}': {reason}")]
    MalformedGuard {
        position: usize,
        fragment: String,
        reason: String,
    },

    /// A symbol name occurred twice within one alphabet partition.
    #[error("Duplicate symbol '{name}' in {partition}")]
    DuplicateSymbol { name: String, partition: Partition },

    /// A guard variable name that is not `[A-Za-z][A-Za-z0-9_]*` or is a
    /// reserved word.
    #[error("Invalid identifier '{name}'")]
    InvalidIdentifier { name: String },

    /// A register value that is not an integer.
    #[error("Malformed value '{value}' for register '{name}'")]
    MalformedRegister { name: String, value: String },
}

impl DecodeError {
    pub(crate) fn guard(
        position: usize,
        fragment: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedGuard {
            position,
            fragment: fragment.into(),
            reason: reason.into(),
        }
    }
}
