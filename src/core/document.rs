//! The top-level interchange unit.

use super::alphabet::Alphabet;
use super::transition::Transition;

/// A control location (state) of the automaton.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Location {
    pub name: String,
    pub initial: bool,
}

impl Location {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initial: false,
        }
    }

    /// A location the automaton may start in.
    pub fn initial(name: impl Into<String>) -> Self {
        Self {
            initial: true,
            ..Self::new(name)
        }
    }
}

/// A register and the value it holds before the first transition.
///
/// The same shape serves globals and constants; which one a register is
/// depends on the list it sits in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Register {
    pub name: String,
    /// The declared data type, `int` in practice. Kept verbatim.
    pub data_type: Option<String>,
    pub value: i64,
}

impl Register {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            data_type: None,
            value,
        }
    }

    pub fn with_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }
}

/// An alphabet, registers, locations and transitions, all in document order.
///
/// No deduplication or reordering happens here, and the only lookups are
/// linear scans. A decoded document is complete; a failed decode yields no
/// document at all.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    pub alphabet: Alphabet,
    pub constants: Vec<Register>,
    pub globals: Vec<Register>,
    pub locations: Vec<Location>,
    pub transitions: Vec<Transition>,
}

impl Document {
    /// A document with no registers, locations or transitions yet.
    pub fn new(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            ..Self::default()
        }
    }

    /// Append a transition, keeping insertion order.
    pub fn push(&mut self, transition: Transition) {
        self.transitions.push(transition);
    }

    /// Names of the locations marked initial.
    pub fn initial_locations(&self) -> impl Iterator<Item = &str> {
        self.locations
            .iter()
            .filter(|location| location.initial)
            .map(|location| location.name.as_str())
    }

    /// Globals followed by constants.
    pub fn registers(&self) -> impl Iterator<Item = &Register> {
        self.globals.iter().chain(&self.constants)
    }

    /// Transitions leaving `location`, in document order.
    pub fn transitions_from<'a>(
        &'a self,
        location: &'a str,
    ) -> impl Iterator<Item = &'a Transition> {
        self.transitions.iter().filter(move |t| t.from == location)
    }
}
