//! Input and output symbols of an automaton.

use crate::error::{DecodeError, Partition};
use std::collections::HashSet;

/// A named symbol with its ordered formal parameters.
///
/// Symbols are opaque names within one document; two documents never
/// share symbol identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub name: String,
    /// Formal parameter names, in positional order.
    pub params: Vec<String>,
}

impl Symbol {
    /// A symbol without parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    /// A symbol with formal parameters.
    pub fn with_params<I, P>(name: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            name: name.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Symbols split into inputs and outputs.
///
/// Names are unique within each partition. The partitions are independent
/// namespaces, so one name may be both an input and an output. Order is kept
/// as given.
///
/// # Example
///
/// ```rust
/// use automatawiki::core::{Alphabet, Symbol};
/// use automatawiki::error::{DecodeError, Partition};
///
/// let alphabet = Alphabet::new(vec![Symbol::new("req")], vec![Symbol::new("req")]).unwrap();
/// assert_eq!(alphabet.inputs().len(), 1);
///
/// let err = Alphabet::new(vec!["x".into(), "x".into()], vec![]).unwrap_err();
/// assert_eq!(
///     err,
///     DecodeError::DuplicateSymbol { name: "x".into(), partition: Partition::Inputs }
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Alphabet {
    inputs: Vec<Symbol>,
    outputs: Vec<Symbol>,
}

impl Alphabet {
    /// Build an alphabet, failing on the first duplicate name in a partition.
    pub fn new(inputs: Vec<Symbol>, outputs: Vec<Symbol>) -> Result<Self, DecodeError> {
        check_unique(&inputs, Partition::Inputs)?;
        check_unique(&outputs, Partition::Outputs)?;
        Ok(Self { inputs, outputs })
    }

    pub fn inputs(&self) -> &[Symbol] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Symbol] {
        &self.outputs
    }

    pub fn partition(&self, partition: Partition) -> &[Symbol] {
        match partition {
            Partition::Inputs => &self.inputs,
            Partition::Outputs => &self.outputs,
        }
    }

    /// Inputs followed by outputs.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.inputs.iter().chain(&self.outputs)
    }

    /// Look a symbol up by name, inputs first.
    pub fn symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols().find(|symbol| symbol.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty() && self.outputs.is_empty()
    }

    pub fn into_parts(self) -> (Vec<Symbol>, Vec<Symbol>) {
        (self.inputs, self.outputs)
    }
}

fn check_unique(symbols: &[Symbol], partition: Partition) -> Result<(), DecodeError> {
    let mut seen = HashSet::with_capacity(symbols.len());
    for symbol in symbols {
        if !seen.insert(symbol.name.as_str()) {
            return Err(DecodeError::DuplicateSymbol {
                name: symbol.name.clone(),
                partition,
            });
        }
    }
    Ok(())
}
