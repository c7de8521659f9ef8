//! Builder for assembling documents on the encode side.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::{Alphabet, Document, Location, Register, Symbol, Transition};

/// Collects symbols, registers, locations and transitions, then validates
/// them into a [`Document`].
#[derive(Clone, Debug, Default)]
pub struct DocumentBuilder {
    inputs: Vec<Symbol>,
    outputs: Vec<Symbol>,
    constants: Vec<Register>,
    globals: Vec<Register>,
    locations: Vec<Location>,
    transitions: Vec<Transition>,
}

impl DocumentBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an input symbol.
    pub fn input(mut self, symbol: impl Into<Symbol>) -> Self {
        self.inputs.push(symbol.into());
        self
    }

    /// Declare an output symbol.
    pub fn output(mut self, symbol: impl Into<Symbol>) -> Self {
        self.outputs.push(symbol.into());
        self
    }

    /// Declare a constant register.
    pub fn constant(mut self, register: Register) -> Self {
        self.constants.push(register);
        self
    }

    /// Declare a global register.
    pub fn global(mut self, register: Register) -> Self {
        self.globals.push(register);
        self
    }

    /// Declare a location.
    pub fn location(mut self, name: impl Into<String>) -> Self {
        self.locations.push(Location::new(name));
        self
    }

    /// Declare a location the automaton starts in.
    pub fn initial_location(mut self, name: impl Into<String>) -> Self {
        self.locations.push(Location::initial(name));
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: impl IntoIterator<Item = Transition>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Build the document.
    /// Returns an error if an alphabet partition repeats a symbol name.
    pub fn build(self) -> Result<Document, BuildError> {
        let alphabet = Alphabet::new(self.inputs, self.outputs)?;
        Ok(Document {
            alphabet,
            constants: self.constants,
            globals: self.globals,
            locations: self.locations,
            transitions: self.transitions,
        })
    }
}
