//! Builder API for assembling documents to encode.
//!
//! Decoding produces documents in one go; encoding usually builds them up
//! piece by piece. These builders validate what the plain constructors
//! cannot: required transition fields and alphabet uniqueness.

pub mod document;
pub mod error;
pub mod transition;

pub use document::DocumentBuilder;
pub use error::BuildError;
pub use transition::TransitionBuilder;

use crate::core::{GuardExpr, Transition};

/// Create an unguarded transition without parameters.
///
/// # Example
///
/// ```
/// use automatawiki::builder::simple_transition;
///
/// let transition = simple_transition("s0", "s1", "tick");
/// assert!(transition.is_unguarded());
/// ```
pub fn simple_transition(
    from: impl Into<String>,
    to: impl Into<String>,
    symbol: impl Into<String>,
) -> Transition {
    Transition::new(from, to, symbol)
}

/// Create a transition over `params` with a guard.
///
/// # Example
///
/// ```
/// use automatawiki::builder::guarded_transition;
/// use automatawiki::core::{GuardExpr, Operand, Relation};
///
/// let transition = guarded_transition(
///     "s0",
///     "s1",
///     "put",
///     ["x"],
///     GuardExpr::compare(Operand::var("x").unwrap(), Relation::Ge, 0i64),
/// );
/// assert_eq!(transition.guard.to_string(), "x >= 0");
/// ```
pub fn guarded_transition<I, P>(
    from: impl Into<String>,
    to: impl Into<String>,
    symbol: impl Into<String>,
    params: I,
    guard: GuardExpr,
) -> Transition
where
    I: IntoIterator<Item = P>,
    P: Into<String>,
{
    Transition {
        params: params.into_iter().map(Into::into).collect(),
        guard,
        ..Transition::new(from, to, symbol)
    }
}
