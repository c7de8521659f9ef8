//! Builder for constructing transitions.

use crate::builder::error::BuildError;
use crate::codec::GuardCodec;
use crate::core::{Assignment, GuardExpr, Transition};

/// Builder for constructing transitions with a fluent API.
#[derive(Clone, Debug, Default)]
pub struct TransitionBuilder {
    from: Option<String>,
    to: Option<String>,
    symbol: Option<String>,
    params: Vec<String>,
    guard: Option<GuardExpr>,
    assignments: Vec<Assignment>,
}

impl TransitionBuilder {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source state (required).
    pub fn from(mut self, state: impl Into<String>) -> Self {
        self.from = Some(state.into());
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: impl Into<String>) -> Self {
        self.to = Some(state.into());
        self
    }

    /// Set the symbol labelling the edge (required).
    pub fn symbol(mut self, name: impl Into<String>) -> Self {
        self.symbol = Some(name.into());
        self
    }

    /// Append one local parameter name.
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.params.push(name.into());
        self
    }

    /// Append several local parameter names.
    pub fn params<I, P>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.params.extend(names.into_iter().map(Into::into));
        self
    }

    /// Set the guard (optional, defaults to `true`).
    pub fn guard(mut self, guard: GuardExpr) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Append an assignment. Assignments run in the order they are added.
    pub fn assign(mut self, target: impl Into<String>, expression: impl Into<String>) -> Self {
        self.assignments.push(Assignment::new(target, expression));
        self
    }

    /// Build the transition.
    ///
    /// Rejects a guard the default codec would not read back, see
    /// [`GuardCodec::check_depth`].
    pub fn build(self) -> Result<Transition, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;
        let symbol = self.symbol.ok_or(BuildError::MissingSymbol)?;
        let guard = self.guard.unwrap_or_default();
        GuardCodec::new().check_depth(&guard)?;

        Ok(Transition {
            from,
            to,
            symbol,
            params: self.params,
            guard,
            assignments: self.assignments,
        })
    }
}
