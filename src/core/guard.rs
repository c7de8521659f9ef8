//! Guard expressions over transition parameters.
//!
//! A guard is a closed boolean expression tree. This crate only stores and
//! (de)serializes guards; it never evaluates them.

use super::identifier::Identifier;
use crate::codec::guard as codec;
use crate::error::DecodeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// One side of a comparison.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    /// A parameter or register name.
    Variable(Identifier),
    /// A signed integer constant.
    Literal(i64),
}

impl Operand {
    /// Fails with `InvalidIdentifier` if `name` is not a variable name.
    pub fn var(name: impl Into<String>) -> Result<Self, DecodeError> {
        Identifier::new(name).map(Self::Variable)
    }

    pub fn literal(value: i64) -> Self {
        Self::Literal(value)
    }
}

impl From<Identifier> for Operand {
    fn from(name: Identifier) -> Self {
        Self::Variable(name)
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Self::Literal(value)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variable(name) => f.write_str(name.as_str()),
            Self::Literal(value) => write!(f, "{value}"),
        }
    }
}

/// Comparison operators understood by the guard grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Relation {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Relation {
    /// Every relation, in a fixed order.
    pub const ALL: [Relation; 6] = [
        Relation::Eq,
        Relation::Ne,
        Relation::Lt,
        Relation::Le,
        Relation::Gt,
        Relation::Ge,
    ];

    /// The textual operator token.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Boolean predicate guarding a transition.
///
/// The variant set is closed. `True` is the value of a transition that has
/// no guard at all. Variables are [`Identifier`]s, so every tree encodes to
/// text that decodes back to it (within the codec's nesting limit, see
/// [`depth`](Self::depth)).
///
/// # Example
///
/// ```rust
/// use automatawiki::core::{GuardExpr, Identifier, Relation};
///
/// let x = Identifier::new("x").unwrap();
/// let guard = GuardExpr::and(
///     GuardExpr::not(GuardExpr::var("a").unwrap()),
///     GuardExpr::compare(x, Relation::Gt, 0i64),
/// );
///
/// assert_eq!(guard.to_string(), "not a and x > 0");
/// assert_eq!("not a and x > 0".parse::<GuardExpr>().unwrap(), guard);
/// assert_eq!(guard.variables(), vec!["a", "x"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum GuardExpr {
    /// Unconditionally satisfied.
    #[default]
    True,
    /// A boolean parameter used directly as a condition.
    Var(Identifier),
    /// `left op right`.
    Comparison {
        left: Operand,
        op: Relation,
        right: Operand,
    },
    And(Box<GuardExpr>, Box<GuardExpr>),
    Or(Box<GuardExpr>, Box<GuardExpr>),
    Not(Box<GuardExpr>),
}

impl GuardExpr {
    /// Fails with `InvalidIdentifier` if `name` is not a variable name.
    pub fn var(name: impl Into<String>) -> Result<Self, DecodeError> {
        Identifier::new(name).map(Self::Var)
    }

    pub fn compare(left: impl Into<Operand>, op: Relation, right: impl Into<Operand>) -> Self {
        Self::Comparison {
            left: left.into(),
            op,
            right: right.into(),
        }
    }

    pub fn and(left: GuardExpr, right: GuardExpr) -> Self {
        Self::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: GuardExpr, right: GuardExpr) -> Self {
        Self::Or(Box::new(left), Box::new(right))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(inner: GuardExpr) -> Self {
        Self::Not(Box::new(inner))
    }

    /// Whether this is the unconditional guard.
    pub fn is_true(&self) -> bool {
        matches!(self, Self::True)
    }

    /// Binding strength of the outermost node: `Or` < `And` < `Not` < atoms.
    pub(crate) fn precedence(&self) -> u8 {
        match self {
            Self::Or(..) => 1,
            Self::And(..) => 2,
            Self::Not(_) => 3,
            Self::True | Self::Var(_) | Self::Comparison { .. } => 4,
        }
    }

    /// How deeply the canonical encoding nests parentheses and negations.
    ///
    /// A codec decodes its own output back exactly when this is at most its
    /// [`max_depth`](crate::codec::GuardCodec::max_depth).
    pub fn depth(&self) -> usize {
        codec::nesting(self)
    }

    /// Variable names referenced by this guard, in first-use order.
    pub fn variables(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables<'a>(&'a self, names: &mut Vec<&'a str>) {
        fn push<'a>(names: &mut Vec<&'a str>, name: &'a str) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        match self {
            Self::True => {}
            Self::Var(name) => push(names, name.as_str()),
            Self::Comparison { left, right, .. } => {
                for operand in [left, right] {
                    if let Operand::Variable(name) = operand {
                        push(names, name.as_str());
                    }
                }
            }
            Self::And(left, right) | Self::Or(left, right) => {
                left.collect_variables(names);
                right.collect_variables(names);
            }
            Self::Not(inner) => inner.collect_variables(names),
        }
    }

    /// Rename variables through `naming`; names it does not mention are kept.
    pub fn relabel(&self, naming: &HashMap<Identifier, Identifier>) -> GuardExpr {
        let rename = |name: &Identifier| naming.get(name).unwrap_or(name).clone();
        let operand = |operand: &Operand| match operand {
            Operand::Variable(name) => Operand::Variable(rename(name)),
            Operand::Literal(value) => Operand::Literal(*value),
        };
        match self {
            Self::True => Self::True,
            Self::Var(name) => Self::Var(rename(name)),
            Self::Comparison { left, op, right } => Self::Comparison {
                left: operand(left),
                op: *op,
                right: operand(right),
            },
            Self::And(left, right) => Self::and(left.relabel(naming), right.relabel(naming)),
            Self::Or(left, right) => Self::or(left.relabel(naming), right.relabel(naming)),
            Self::Not(inner) => Self::not(inner.relabel(naming)),
        }
    }
}

impl fmt::Display for GuardExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::encode(self))
    }
}

impl FromStr for GuardExpr {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        codec::decode(s)
    }
}

/// Guards nesting deeper than [`DEFAULT_MAX_DEPTH`](codec::DEFAULT_MAX_DEPTH)
/// are refused, since the default codec could not read them back.
impl Serialize for GuardExpr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        codec::check_depth(self, codec::DEFAULT_MAX_DEPTH)
            .map_err(<S::Error as serde::ser::Error>::custom)?;
        serializer.serialize_str(&codec::encode(self))
    }
}

impl<'de> Deserialize<'de> for GuardExpr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        codec::decode(&text).map_err(serde::de::Error::custom)
    }
}
