//! Validated variable names.

use crate::error::DecodeError;
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Words the guard grammar reserves for itself.
pub const KEYWORDS: [&str; 4] = ["true", "and", "or", "not"];

/// A name a guard can refer to: `[A-Za-z][A-Za-z0-9_]*`, not a keyword.
///
/// Every identifier encodes to text that decodes back to the same name, so
/// guard trees built from identifiers always survive a round trip.
///
/// # Example
///
/// ```rust
/// use automatawiki::core::Identifier;
///
/// let name = Identifier::new("p1").unwrap();
/// assert_eq!(name.as_str(), "p1");
///
/// assert!(Identifier::new("true").is_err());
/// assert!(Identifier::new("x y").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    /// Fails with `InvalidIdentifier` unless `name` is a usable variable name.
    pub fn new(name: impl Into<String>) -> Result<Self, DecodeError> {
        let name = name.into();
        if is_identifier(&name) {
            Ok(Self(name))
        } else {
            Err(DecodeError::InvalidIdentifier { name })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

fn is_identifier(name: &str) -> bool {
    let mut bytes = name.bytes();
    let starts_alphabetic = bytes.next().is_some_and(|b| b.is_ascii_alphabetic());
    starts_alphabetic
        && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
        && !KEYWORDS.contains(&name)
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Identifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Identifier {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl FromStr for Identifier {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Identifier {
    type Error = DecodeError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl TryFrom<String> for Identifier {
    type Error = DecodeError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl From<Identifier> for String {
    fn from(name: Identifier) -> Self {
        name.0
    }
}
