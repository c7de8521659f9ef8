//! Renaming a transition's local parameter names to its symbol's formals.
//!
//! A transition may call its symbol's parameters anything (`params="a,b"`
//! for a symbol declared with `p1, p2`). Relabeling rewrites the transition
//! so it uses the declared names throughout: in `params`, in guard
//! variables and in assignments.

use crate::core::{Assignment, Document, Identifier, Transition};
use crate::error::DecodeError;
use crate::log::trace;
use std::collections::HashMap;

impl Document {
    /// Relabel `transition` against this document's alphabet.
    ///
    /// Local names are paired with the symbol's formal parameters by
    /// position; a name without a partner maps to itself. Returns `None`
    /// when the transition's symbol is not declared.
    ///
    /// Fails with `InvalidIdentifier` when a local name a guard could use is
    /// paired with a formal name a guard cannot hold.
    ///
    /// # Example
    ///
    /// ```rust
    /// use automatawiki::core::{Alphabet, Document, Symbol, Transition};
    ///
    /// let alphabet = Alphabet::new(vec![Symbol::with_params("put", ["p"])], vec![]).unwrap();
    /// let document = Document::new(alphabet);
    ///
    /// let mut transition = Transition::new("s0", "s1", "put");
    /// transition.params = vec!["v".into()];
    /// transition.guard = "v > 0".parse().unwrap();
    ///
    /// let relabeled = document.relabel(&transition).unwrap().unwrap();
    /// assert_eq!(relabeled.params, vec!["p"]);
    /// assert_eq!(relabeled.guard.to_string(), "p > 0");
    /// ```
    pub fn relabel(&self, transition: &Transition) -> Result<Option<Transition>, DecodeError> {
        let Some(symbol) = self.alphabet.symbol(&transition.symbol) else {
            return Ok(None);
        };
        let naming: HashMap<&str, &str> = transition
            .params
            .iter()
            .map(String::as_str)
            .zip(symbol.params.iter().map(String::as_str))
            .collect();
        trace!("Relabeling '{}' with {naming:?}", transition.symbol);

        // Names that are not identifiers never occur in a guard.
        let guard_naming = naming
            .iter()
            .filter_map(|(local, formal)| Some((Identifier::new(*local).ok()?, *formal)))
            .map(|(local, formal)| Ok((local, Identifier::new(formal)?)))
            .collect::<Result<HashMap<_, _>, DecodeError>>()?;

        let rename = |name: &String| {
            naming
                .get(name.as_str())
                .map_or_else(|| name.clone(), |formal| formal.to_string())
        };
        Ok(Some(Transition {
            from: transition.from.clone(),
            to: transition.to.clone(),
            symbol: transition.symbol.clone(),
            params: symbol.params.clone(),
            guard: transition.guard.relabel(&guard_naming),
            assignments: transition
                .assignments
                .iter()
                .map(|assignment| Assignment {
                    target: rename(&assignment.target),
                    expression: naming
                        .get(assignment.expression.trim())
                        .map_or_else(|| assignment.expression.clone(), |formal| formal.to_string()),
                })
                .collect(),
        }))
    }

    /// Relabel every transition, skipping those with undeclared symbols.
    pub fn relabeled(&self) -> Result<Vec<Transition>, DecodeError> {
        let mut relabeled = Vec::with_capacity(self.transitions.len());
        for transition in &self.transitions {
            relabeled.extend(self.relabel(transition)?);
        }
        Ok(relabeled)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{Alphabet, Assignment, Document, GuardExpr, Symbol, Transition};
    use crate::error::DecodeError;

    fn document() -> Document {
        let alphabet = Alphabet::new(
            vec![Symbol::with_params("put", ["p1", "p2"])],
            vec![Symbol::with_params("ok", Vec::<String>::new())],
        )
        .unwrap();
        Document::new(alphabet)
    }

    fn put(params: &[&str]) -> Transition {
        Transition {
            params: params.iter().map(|p| p.to_string()).collect(),
            ..Transition::new("s0", "s1", "put")
        }
    }

    #[test]
    fn params_take_the_declared_names() {
        let relabeled = document().relabel(&put(&["a", "b"])).unwrap().unwrap();
        assert_eq!(relabeled.params, vec!["p1", "p2"]);
    }

    #[test]
    fn guard_variables_are_renamed() {
        let mut transition = put(&["a", "b"]);
        transition.guard = "a < b and b != r".parse().unwrap();

        let relabeled = document().relabel(&transition).unwrap().unwrap();

        assert_eq!(relabeled.guard.to_string(), "p1 < p2 and p2 != r");
    }

    #[test]
    fn assignments_are_renamed() {
        let mut transition = put(&["a", "b"]);
        transition.assignments = vec![
            Assignment::new("r", "a"),
            Assignment::new("b", "r"),
            Assignment::new("s", "a + 1"),
        ];

        let relabeled = document().relabel(&transition).unwrap().unwrap();

        assert_eq!(relabeled.assignments[0], Assignment::new("r", "p1"));
        assert_eq!(relabeled.assignments[1], Assignment::new("p2", "r"));
        assert_eq!(relabeled.assignments[2], Assignment::new("s", "a + 1"));
    }

    #[test]
    fn unpaired_names_are_kept() {
        let mut transition = put(&["a"]);
        transition.guard = GuardExpr::var("z").unwrap();

        let relabeled = document().relabel(&transition).unwrap().unwrap();

        assert_eq!(relabeled.params, vec!["p1", "p2"]);
        assert_eq!(relabeled.guard, GuardExpr::var("z").unwrap());
    }

    #[test]
    fn undeclared_symbol_is_not_relabeled() {
        let transition = Transition::new("s0", "s1", "missing");
        assert_eq!(document().relabel(&transition), Ok(None));
    }

    #[test]
    fn relabeled_skips_undeclared_symbols() {
        let mut document = document();
        document.push(put(&["x", "y"]));
        document.push(Transition::new("s1", "s0", "missing"));
        document.push(Transition::new("s1", "s0", "ok"));

        let relabeled = document.relabeled().unwrap();

        assert_eq!(relabeled.len(), 2);
        assert_eq!(relabeled[1].symbol, "ok");
    }

    #[test]
    fn formal_names_unusable_in_guards_are_rejected() {
        let alphabet = Alphabet::new(vec![Symbol::with_params("put", ["not"])], vec![]).unwrap();
        let document = Document::new(alphabet);

        let mut transition = put(&["a"]);
        transition.guard = GuardExpr::var("a").unwrap();

        assert_eq!(
            document.relabel(&transition),
            Err(DecodeError::InvalidIdentifier { name: "not".into() })
        );
    }

    #[test]
    fn local_names_that_are_not_identifiers_still_relabel() {
        let mut transition = put(&["a b", "c"]);
        transition.assignments = vec![Assignment::new("a b", "c")];

        let relabeled = document().relabel(&transition).unwrap().unwrap();

        assert_eq!(relabeled.params, vec!["p1", "p2"]);
        assert_eq!(relabeled.assignments, vec![Assignment::new("p1", "p2")]);
    }
}
