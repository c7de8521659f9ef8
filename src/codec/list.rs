//! Comma separated string lists, as used by the `params` attribute.

use super::AttributeCodec;
use crate::error::DecodeError;

/// The fixed list delimiter. Tokens cannot contain it; there is no escaping.
pub const DELIMITER: char = ',';

/// Codec for ordered token lists packed into one attribute.
///
/// `""` and `[]` correspond to each other; every other input must consist
/// of non-empty tokens separated by commas. Whitespace around tokens is
/// dropped when decoding.
///
/// # Example
///
/// ```rust
/// use automatawiki::codec::{AttributeCodec, ListCodec};
///
/// assert_eq!(ListCodec.decode("x, y").unwrap(), vec!["x", "y"]);
/// assert!(ListCodec.decode("").unwrap().is_empty());
/// assert_eq!(ListCodec.encode(&vec!["x".to_string(), "y".to_string()]), "x,y");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListCodec;

impl AttributeCodec for ListCodec {
    type Value = Vec<String>;

    fn encode(&self, value: &Vec<String>) -> String {
        encode(value.as_slice())
    }

    fn decode(&self, text: &str) -> Result<Vec<String>, DecodeError> {
        decode(text)
    }
}

/// Join `items` with the delimiter. The caller guarantees no item contains it.
pub fn encode<S: AsRef<str>>(items: &[S]) -> String {
    let mut out = String::new();
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            out.push(DELIMITER);
        }
        out.push_str(item.as_ref());
    }
    out
}

/// Split `text` on the delimiter and trim each token.
pub fn decode(text: &str) -> Result<Vec<String>, DecodeError> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    text.split(DELIMITER)
        .map(str::trim)
        .enumerate()
        .map(|(token, item)| {
            if item.is_empty() {
                Err(DecodeError::MalformedList {
                    text: text.to_string(),
                    token,
                })
            } else {
                Ok(item.to_string())
            }
        })
        .collect()
}
