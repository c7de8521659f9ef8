//! Binder-facing records.
//!
//! These mirror the document's element/attribute tree with compound
//! attributes and register values still strings. A structural binder (any
//! serde-driven XML reader or writer) fills or consumes them; decoding turns
//! them into the typed [`core`](crate::core) values, running the
//! compound-attribute codecs on `params` and `guard`.
//!
//! ```text
//! alphabet
//!   inputs / outputs        wrapper elements
//!     symbol @name
//!       param @name
//! constants?
//!   constant @name @type? value
//! globals?
//!   variable @name @type? value
//! locations?
//!   location @name @initial?
//! transitions
//!   transition @from @to @symbol @params?
//!     guard?                absent means `true`
//!     assignments?
//!       assign @target @expression
//! ```

use crate::codec::{list, GuardCodec};
use crate::core::{Alphabet, Assignment, Document, Location, Register, Symbol, Transition};
use crate::error::DecodeError;
use crate::log::{debug, trace};
use serde::{Deserialize, Serialize};

/// A formal symbol parameter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamRecord {
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolRecord {
    pub name: String,
    #[serde(rename = "param", default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<ParamRecord>,
}

/// The `inputs` / `outputs` wrapper element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolsRecord {
    #[serde(rename = "symbol", default)]
    pub symbols: Vec<SymbolRecord>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlphabetRecord {
    pub inputs: SymbolsRecord,
    pub outputs: SymbolsRecord,
}

/// The `assignments` wrapper element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentsRecord {
    #[serde(rename = "assign", default)]
    pub assigns: Vec<Assignment>,
}

/// One transition with its compound attributes still encoded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub from: String,
    pub to: String,
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guard: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignments: Option<AssignmentsRecord>,
}

/// The `transitions` wrapper element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionsRecord {
    #[serde(rename = "transition", default)]
    pub transitions: Vec<TransitionRecord>,
}

/// A `constant` or `variable` element; `value` is its text content.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRecord {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    pub value: String,
}

/// The `constants` wrapper element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantsRecord {
    #[serde(rename = "constant", default)]
    pub constants: Vec<RegisterRecord>,
}

impl ConstantsRecord {
    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }
}

/// The `globals` wrapper element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalsRecord {
    #[serde(rename = "variable", default)]
    pub variables: Vec<RegisterRecord>,
}

impl GlobalsRecord {
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub initial: bool,
}

fn is_false(flag: &bool) -> bool {
    !flag
}

/// The `locations` wrapper element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationsRecord {
    #[serde(rename = "location", default)]
    pub locations: Vec<LocationRecord>,
}

impl LocationsRecord {
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

/// The root element. Empty register and location lists are left out.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub alphabet: AlphabetRecord,
    #[serde(default, skip_serializing_if = "ConstantsRecord::is_empty")]
    pub constants: ConstantsRecord,
    #[serde(default, skip_serializing_if = "GlobalsRecord::is_empty")]
    pub globals: GlobalsRecord,
    #[serde(default, skip_serializing_if = "LocationsRecord::is_empty")]
    pub locations: LocationsRecord,
    #[serde(default)]
    pub transitions: TransitionsRecord,
}

impl Location {
    pub fn from_record(record: LocationRecord) -> Self {
        Self {
            name: record.name,
            initial: record.initial,
        }
    }

    pub fn to_record(&self) -> LocationRecord {
        LocationRecord {
            name: self.name.clone(),
            initial: self.initial,
        }
    }
}

impl Register {
    /// Fails with `MalformedRegister` unless the value is an `i64`.
    pub fn from_record(record: RegisterRecord) -> Result<Self, DecodeError> {
        let value = record.value.trim().parse::<i64>().map_err(|_| {
            DecodeError::MalformedRegister {
                name: record.name.clone(),
                value: record.value.clone(),
            }
        })?;
        Ok(Self {
            name: record.name,
            data_type: record.data_type,
            value,
        })
    }

    pub fn to_record(&self) -> RegisterRecord {
        RegisterRecord {
            name: self.name.clone(),
            data_type: self.data_type.clone(),
            value: self.value.to_string(),
        }
    }
}

impl Symbol {
    pub fn from_record(record: SymbolRecord) -> Self {
        Self {
            name: record.name,
            params: record.params.into_iter().map(|p| p.name).collect(),
        }
    }

    pub fn to_record(&self) -> SymbolRecord {
        SymbolRecord {
            name: self.name.clone(),
            params: self
                .params
                .iter()
                .map(|name| ParamRecord { name: name.clone() })
                .collect(),
        }
    }
}

impl Alphabet {
    /// Fails with `DuplicateSymbol` if a partition repeats a name.
    pub fn from_record(record: AlphabetRecord) -> Result<Self, DecodeError> {
        let symbols = |wrapper: SymbolsRecord| -> Vec<Symbol> {
            wrapper.symbols.into_iter().map(Symbol::from_record).collect()
        };
        Alphabet::new(symbols(record.inputs), symbols(record.outputs))
    }

    pub fn to_record(&self) -> AlphabetRecord {
        let wrap = |symbols: &[Symbol]| SymbolsRecord {
            symbols: symbols.iter().map(Symbol::to_record).collect(),
        };
        AlphabetRecord {
            inputs: wrap(self.inputs()),
            outputs: wrap(self.outputs()),
        }
    }
}

impl Transition {
    /// Decode with the default guard codec.
    pub fn from_record(record: TransitionRecord) -> Result<Self, DecodeError> {
        Self::from_record_with(record, &GuardCodec::new())
    }

    /// Decode `params` through the list codec and `guard` through `codec`.
    ///
    /// A missing `params` attribute is an empty list and a missing `guard`
    /// is `true`. A present but malformed one is an error.
    pub fn from_record_with(
        record: TransitionRecord,
        codec: &GuardCodec,
    ) -> Result<Self, DecodeError> {
        let params = match record.params {
            Some(text) => list::decode(&text)?,
            None => Vec::new(),
        };
        let guard = match record.guard {
            Some(text) => codec.decode(&text)?,
            None => Default::default(),
        };
        let assignments = record
            .assignments
            .map(|wrapper| wrapper.assigns)
            .unwrap_or_default();

        Ok(Self {
            from: record.from,
            to: record.to,
            symbol: record.symbol,
            params,
            guard,
            assignments,
        })
    }

    /// Encode with the default guard codec.
    pub fn to_record(&self) -> TransitionRecord {
        self.to_record_with(&GuardCodec::new())
    }

    /// Empty `params`, a `true` guard and no assignments are left out, so
    /// decoding the record gives the same defaults back.
    pub fn to_record_with(&self, codec: &GuardCodec) -> TransitionRecord {
        TransitionRecord {
            from: self.from.clone(),
            to: self.to.clone(),
            symbol: self.symbol.clone(),
            params: (!self.params.is_empty()).then(|| list::encode(self.params.as_slice())),
            guard: (!self.guard.is_true()).then(|| codec.encode(&self.guard)),
            assignments: (!self.assignments.is_empty()).then(|| AssignmentsRecord {
                assigns: self.assignments.clone(),
            }),
        }
    }
}

impl Document {
    /// Decode with the default guard codec.
    pub fn from_record(record: DocumentRecord) -> Result<Self, DecodeError> {
        Self::from_record_with(record, &GuardCodec::new())
    }

    /// Decode the alphabet, the registers, then every transition in order.
    /// The first failure aborts the whole document.
    pub fn from_record_with(
        record: DocumentRecord,
        codec: &GuardCodec,
    ) -> Result<Self, DecodeError> {
        let alphabet = Alphabet::from_record(record.alphabet)?;
        debug!(
            "Decoding document with {} input(s), {} output(s), {} location(s), {} transition(s)",
            alphabet.inputs().len(),
            alphabet.outputs().len(),
            record.locations.locations.len(),
            record.transitions.transitions.len()
        );

        let registers = |records: Vec<RegisterRecord>| {
            records
                .into_iter()
                .map(Register::from_record)
                .collect::<Result<Vec<_>, _>>()
        };
        let constants = registers(record.constants.constants)?;
        let globals = registers(record.globals.variables)?;
        let locations = record
            .locations
            .locations
            .into_iter()
            .map(Location::from_record)
            .collect();

        let transitions = record
            .transitions
            .transitions
            .into_iter()
            .enumerate()
            .map(|(_index, transition)| {
                trace!(
                    "--> Transition #{_index} '{}' -> '{}' on '{}'",
                    transition.from,
                    transition.to,
                    transition.symbol
                );
                Transition::from_record_with(transition, codec).inspect_err(|_err| {
                    debug!("Transition #{_index} rejected: {_err}");
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            alphabet,
            constants,
            globals,
            locations,
            transitions,
        })
    }

    /// Encode with the default guard codec.
    pub fn to_record(&self) -> DocumentRecord {
        self.to_record_with(&GuardCodec::new())
    }

    pub fn to_record_with(&self, codec: &GuardCodec) -> DocumentRecord {
        debug!(
            "Encoding document with {} transition(s)",
            self.transitions.len()
        );
        DocumentRecord {
            alphabet: self.alphabet.to_record(),
            constants: ConstantsRecord {
                constants: self.constants.iter().map(Register::to_record).collect(),
            },
            globals: GlobalsRecord {
                variables: self.globals.iter().map(Register::to_record).collect(),
            },
            locations: LocationsRecord {
                locations: self.locations.iter().map(Location::to_record).collect(),
            },
            transitions: TransitionsRecord {
                transitions: self
                    .transitions
                    .iter()
                    .map(|transition| transition.to_record_with(codec))
                    .collect(),
            },
        }
    }
}

impl TryFrom<DocumentRecord> for Document {
    type Error = DecodeError;

    fn try_from(record: DocumentRecord) -> Result<Self, Self::Error> {
        Document::from_record(record)
    }
}

impl From<Document> for DocumentRecord {
    fn from(document: Document) -> Self {
        document.to_record()
    }
}

impl TryFrom<TransitionRecord> for Transition {
    type Error = DecodeError;

    fn try_from(record: TransitionRecord) -> Result<Self, Self::Error> {
        Transition::from_record(record)
    }
}

impl From<&Transition> for TransitionRecord {
    fn from(transition: &Transition) -> Self {
        transition.to_record()
    }
}

/// Refuses guards the `Deserialize` impl would not read back, see
/// [`GuardCodec::check_depth`].
impl Serialize for Document {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let codec = GuardCodec::new();
        for transition in &self.transitions {
            codec
                .check_depth(&transition.guard)
                .map_err(<S::Error as serde::ser::Error>::custom)?;
        }
        self.to_record_with(&codec).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = DocumentRecord::deserialize(deserializer)?;
        Document::from_record(record).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::guard::DEFAULT_MAX_DEPTH;
    use crate::core::{GuardExpr, Operand, Relation};
    use crate::error::Partition;

    fn record(params: Option<&str>, guard: Option<&str>) -> TransitionRecord {
        TransitionRecord {
            from: "s0".into(),
            to: "s1".into(),
            symbol: "in1".into(),
            params: params.map(Into::into),
            guard: guard.map(Into::into),
            assignments: None,
        }
    }

    #[test]
    fn missing_guard_decodes_to_true() {
        let transition = Transition::from_record(record(None, None)).unwrap();

        assert_eq!(transition.guard, GuardExpr::True);
        assert!(transition.params.is_empty());
        assert!(transition.assignments.is_empty());
    }

    #[test]
    fn empty_guard_is_not_a_missing_guard() {
        let result = Transition::from_record(record(None, Some("")));
        assert!(matches!(result, Err(DecodeError::MalformedGuard { .. })));
    }

    #[test]
    fn compound_attributes_are_decoded() {
        let transition = Transition::from_record(record(Some("x, y"), Some("x > y"))).unwrap();

        assert_eq!(transition.params, vec!["x", "y"]);
        let (x, y) = (Operand::var("x").unwrap(), Operand::var("y").unwrap());
        assert_eq!(transition.guard, GuardExpr::compare(x, Relation::Gt, y));
    }

    #[test]
    fn explicit_empty_params_are_an_empty_list() {
        let transition = Transition::from_record(record(Some(""), None)).unwrap();
        assert!(transition.params.is_empty());
    }

    #[test]
    fn malformed_params_fail_the_transition() {
        let result = Transition::from_record(record(Some("a,,b"), None));
        assert!(matches!(result, Err(DecodeError::MalformedList { .. })));
    }

    #[test]
    fn defaults_are_left_out_when_encoding() {
        let record = Transition::new("s0", "s1", "in1").to_record();

        assert_eq!(record.params, None);
        assert_eq!(record.guard, None);
        assert_eq!(record.assignments, None);
    }

    #[test]
    fn assignments_keep_their_order() {
        let mut input = record(None, None);
        input.assignments = Some(AssignmentsRecord {
            assigns: vec![Assignment::new("y", "x"), Assignment::new("x", "y")],
        });

        let transition = Transition::from_record(input.clone()).unwrap();

        assert_eq!(transition.assignments[0].target, "y");
        assert_eq!(transition.assignments[1].target, "x");
        assert_eq!(transition.to_record(), input);
    }

    #[test]
    fn symbol_params_round_trip_through_records() {
        let symbol = Symbol::with_params("put", ["p1", "p2"]);
        let record = symbol.to_record();

        assert_eq!(record.params.len(), 2);
        assert_eq!(Symbol::from_record(record), symbol);
    }

    #[test]
    fn duplicate_symbol_fails_the_document() {
        let record = DocumentRecord {
            alphabet: AlphabetRecord {
                inputs: SymbolsRecord {
                    symbols: vec![
                        SymbolRecord {
                            name: "x".into(),
                            params: vec![],
                        },
                        SymbolRecord {
                            name: "x".into(),
                            params: vec![],
                        },
                    ],
                },
                outputs: SymbolsRecord::default(),
            },
            ..DocumentRecord::default()
        };

        assert_eq!(
            Document::from_record(record),
            Err(DecodeError::DuplicateSymbol {
                name: "x".into(),
                partition: Partition::Inputs,
            })
        );
    }

    #[test]
    fn one_bad_transition_fails_the_document() {
        let record = DocumentRecord {
            transitions: TransitionsRecord {
                transitions: vec![record(None, Some("a")), record(None, Some("(a"))],
            },
            ..DocumentRecord::default()
        };

        assert!(matches!(
            Document::from_record(record),
            Err(DecodeError::MalformedGuard { position: 0, .. })
        ));
    }

    #[test]
    fn configured_codec_controls_guard_spelling() {
        let codec = GuardCodec::new().with_syntax(crate::codec::GuardSyntax::Symbolic);
        let transition = Transition::from_record_with(record(None, Some("a and not b")), &codec)
            .unwrap();

        assert_eq!(
            transition.to_record_with(&codec).guard.as_deref(),
            Some("a && !b")
        );
    }

    #[test]
    fn explicit_defaults_are_written_back_as_absent() {
        let input = record(Some(""), Some("true"));

        let transition = Transition::from_record(input).unwrap();

        assert!(transition.params.is_empty());
        assert!(transition.is_unguarded());
        assert_eq!(transition.to_record(), record(None, None));
    }

    #[test]
    fn registers_and_locations_round_trip() {
        let register = |name: &str, data_type: Option<&str>, value: &str| RegisterRecord {
            name: name.into(),
            data_type: data_type.map(Into::into),
            value: value.into(),
        };
        let location = |name: &str, initial: bool| LocationRecord {
            name: name.into(),
            initial,
        };
        let input = DocumentRecord {
            constants: ConstantsRecord {
                constants: vec![register("c0", Some("int"), "-3")],
            },
            globals: GlobalsRecord {
                variables: vec![register("r1", Some("int"), "0"), register("r2", None, "9")],
            },
            locations: LocationsRecord {
                locations: vec![location("l0", true), location("l1", false)],
            },
            ..DocumentRecord::default()
        };

        let document = Document::from_record(input.clone()).unwrap();

        assert_eq!(document.constants, vec![Register::new("c0", -3).with_type("int")]);
        assert_eq!(document.globals[1], Register::new("r2", 9));
        assert_eq!(document.locations, vec![Location::initial("l0"), Location::new("l1")]);
        assert_eq!(document.to_record(), input);
    }

    #[test]
    fn malformed_register_value_fails_the_document() {
        let mut input = DocumentRecord::default();
        input.globals.variables.push(RegisterRecord {
            name: "r1".into(),
            data_type: Some("int".into()),
            value: "zero".into(),
        });

        assert_eq!(
            Document::from_record(input),
            Err(DecodeError::MalformedRegister {
                name: "r1".into(),
                value: "zero".into(),
            })
        );
    }

    #[test]
    fn serialization_refuses_guards_too_deep_to_read_back() {
        let guard = (0..=DEFAULT_MAX_DEPTH).fold(GuardExpr::True, |g, _| GuardExpr::not(g));
        let mut document = Document::default();
        document.push(Transition {
            guard,
            ..Transition::new("s0", "s1", "a")
        });

        assert!(serde_json::to_string(&document).is_err());
    }
}
