//! Core data model of the interchange format.
//!
//! This module contains plain values only:
//! - Guard expression trees over validated identifiers
//! - Alphabets of input and output symbols
//! - Transitions and their assignments
//! - The document aggregating all of the above
//!
//! Nothing here performs I/O or evaluates guards.

mod alphabet;
mod document;
mod guard;
mod identifier;
mod transition;

pub use alphabet::{Alphabet, Symbol};
pub use document::{Document, Location, Register};
pub use guard::{GuardExpr, Operand, Relation};
pub use identifier::{Identifier, KEYWORDS};
pub use transition::{Assignment, Transition};
