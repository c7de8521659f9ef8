//! Automatawiki: interchange format for guarded register automata
//!
//! Documents describe symbolic transition systems: an alphabet of input and
//! output symbols, and transitions carrying parameters, a boolean guard and
//! ordered assignments. The element/attribute tree is read and written by an
//! external structural binder; this crate owns the typed model and the
//! codecs for the two attributes that pack structured values into a string.
//!
//! # Core Concepts
//!
//! - **Codecs**: `params` lists and `guard` expressions, canonical both ways
//! - **Model**: `Alphabet`, `Transition`, `Document` (with its locations
//!   and registers) as plain values
//! - **Records**: the binder-facing string form of the model
//!
//! # Example
//!
//! ```rust
//! use automatawiki::record::{DocumentRecord, TransitionRecord};
//! use automatawiki::core::{Document, GuardExpr};
//!
//! let record = TransitionRecord {
//!     from: "s0".into(),
//!     to: "s1".into(),
//!     symbol: "in1".into(),
//!     params: Some("x".into()),
//!     guard: Some("x > 0".into()),
//!     assignments: None,
//! };
//!
//! let mut document = DocumentRecord::default();
//! document.transitions.transitions.push(record.clone());
//!
//! let decoded = Document::from_record(document).unwrap();
//! assert_ne!(decoded.transitions[0].guard, GuardExpr::True);
//! assert_eq!(decoded.transitions[0].to_record(), record);
//! ```

pub mod builder;
pub mod codec;
pub mod core;
pub mod error;
mod log;
pub mod record;
mod relabel;

// Re-export commonly used types
pub use crate::codec::{AttributeCodec, DepthError, GuardCodec, GuardSyntax, ListCodec};
pub use crate::core::{
    Alphabet, Assignment, Document, GuardExpr, Identifier, Location, Operand, Register, Relation,
    Symbol, Transition,
};
pub use crate::error::{DecodeError, Partition};
