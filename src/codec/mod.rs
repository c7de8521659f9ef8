//! Codecs for compound attributes.
//!
//! A structural binder hands every attribute over as a plain string. Most
//! of them are opaque; two are not:
//! - `params`: a comma separated list, see [`ListCodec`]
//! - `guard`: a boolean expression, see [`GuardCodec`]
//!
//! Both directions are pure. Encoding is total; decoding fails with a
//! [`DecodeError`] on anything outside the grammar.

pub mod guard;
pub mod list;

pub use guard::{DepthError, GuardCodec, GuardSyntax};
pub use list::ListCodec;

use crate::error::DecodeError;

/// A pair of pure functions a binder calls instead of passing a raw
/// attribute string through.
pub trait AttributeCodec {
    /// The structured value carried by the attribute.
    type Value;

    /// Render `value` in canonical form.
    fn encode(&self, value: &Self::Value) -> String;

    /// Parse attribute text back into a value.
    fn decode(&self, text: &str) -> Result<Self::Value, DecodeError>;
}
