//! Labeled, guarded transitions.

use super::guard::GuardExpr;
use serde::{Deserialize, Serialize};

/// A single variable update. The expression is kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub target: String,
    pub expression: String,
}

impl Assignment {
    pub fn new(target: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            expression: expression.into(),
        }
    }
}

/// An edge `from --symbol(params) [guard] / assignments--> to`.
///
/// State names and the symbol are not checked against anything here; that
/// is up to whoever consumes the document. Assignments apply in order.
///
/// # Example
///
/// ```rust
/// use automatawiki::core::Transition;
///
/// let transition = Transition::new("s0", "s1", "in1");
/// assert!(transition.guard.is_true());
/// assert!(transition.params.is_empty());
/// assert!(transition.assignments.is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Source state
    pub from: String,
    /// Target state
    pub to: String,
    /// Name of the symbol labelling this edge
    pub symbol: String,
    /// Local names for the symbol's parameters, positional
    pub params: Vec<String>,
    /// Defaults to [`GuardExpr::True`]
    pub guard: GuardExpr,
    pub assignments: Vec<Assignment>,
}

impl Transition {
    /// An unguarded transition without parameters or assignments.
    pub fn new(from: impl Into<String>, to: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            symbol: symbol.into(),
            params: Vec::new(),
            guard: GuardExpr::True,
            assignments: Vec::new(),
        }
    }

    /// Whether the transition fires unconditionally.
    pub fn is_unguarded(&self) -> bool {
        self.guard.is_true()
    }
}
