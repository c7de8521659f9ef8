//! Textual guard expressions, as used by the `guard` element.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! or      := and ( ("or" | "||") and )*
//! and     := unary ( ("and" | "&&") unary )*
//! unary   := ("not" | "!") unary | primary
//! primary := "true" | "(" or ")" | operand relation operand | variable
//! operand := variable | literal
//! relation:= "==" | "!=" | "<" | "<=" | ">" | ">="
//! ```
//!
//! `and`/`or` associate to the left. Variables match `[A-Za-z][A-Za-z0-9_]*`
//! minus the keywords, literals match `-?[0-9]+` and fit an `i64`.

use super::AttributeCodec;
use crate::core::{GuardExpr, Identifier, Operand, Relation};
use crate::error::DecodeError;

/// Nesting depth accepted by [`GuardCodec::new`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Spelling of the boolean combinators in encoded output.
///
/// Decoding always accepts both spellings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GuardSyntax {
    /// `not a and b or c`
    #[default]
    Keyword,
    /// `!a && b || c`, as found in existing AutomataWiki files.
    Symbolic,
}

impl GuardSyntax {
    fn and(&self) -> &'static str {
        match self {
            Self::Keyword => " and ",
            Self::Symbolic => " && ",
        }
    }

    fn or(&self) -> &'static str {
        match self {
            Self::Keyword => " or ",
            Self::Symbolic => " || ",
        }
    }

    fn not(&self) -> &'static str {
        match self {
            Self::Keyword => "not ",
            Self::Symbolic => "!",
        }
    }
}

/// Parser and printer for guard expressions.
///
/// Encoding emits the canonical form: left-associative chains with the
/// fewest parentheses the precedence `not > and > or` allows. Encoding a
/// decoded guard again is a fixed point.
///
/// # Example
///
/// ```rust
/// use automatawiki::codec::{GuardCodec, GuardSyntax};
///
/// let codec = GuardCodec::new();
/// let guard = codec.decode("((a and b)) or not (x > 0)").unwrap();
/// assert_eq!(codec.encode(&guard), "a and b or not x > 0");
///
/// let symbolic = GuardCodec::new().with_syntax(GuardSyntax::Symbolic);
/// assert_eq!(symbolic.encode(&guard), "a && b || !x > 0");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuardCodec {
    syntax: GuardSyntax,
    max_depth: usize,
}

impl Default for GuardCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl GuardCodec {
    /// Keyword syntax, [`DEFAULT_MAX_DEPTH`] nesting.
    pub fn new() -> Self {
        Self {
            syntax: GuardSyntax::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Spelling used by [`encode`](Self::encode).
    pub fn with_syntax(mut self, syntax: GuardSyntax) -> Self {
        self.syntax = syntax;
        self
    }

    /// Reject input nesting parentheses and negations deeper than `max`.
    ///
    /// Parsing recurses on nesting, so this bounds stack usage. Encoded
    /// guards decode back as long as their [`depth`](GuardExpr::depth) is
    /// within `max`.
    pub fn with_max_depth(mut self, max: usize) -> Self {
        self.max_depth = max;
        self
    }

    pub fn syntax(&self) -> GuardSyntax {
        self.syntax
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Render `expr` in canonical form. Never fails.
    ///
    /// The output decodes back to `expr` whenever `expr.depth()` is within
    /// [`max_depth`](Self::max_depth); see [`check_depth`](Self::check_depth).
    pub fn encode(&self, expr: &GuardExpr) -> String {
        let mut out = String::new();
        self.write_expr(expr, &mut out);
        out
    }

    /// Whether [`decode`](Self::decode) would accept the encoding of `expr`.
    pub fn check_depth(&self, expr: &GuardExpr) -> Result<(), DepthError> {
        check_depth(expr, self.max_depth)
    }

    /// Parse `text` into a guard. Empty text is an error, not `true`.
    pub fn decode(&self, text: &str) -> Result<GuardExpr, DecodeError> {
        let tokens = tokenize(text)?;
        if tokens.is_empty() {
            return Err(DecodeError::guard(0, text, "empty guard"));
        }

        let mut parser = Parser {
            text,
            tokens,
            pos: 0,
            depth: 0,
            max_depth: self.max_depth,
        };
        let expr = parser.parse_or()?;
        match parser.advance() {
            None => Ok(expr),
            Some(Lexeme {
                token: Token::RParen,
                start,
                end,
            }) => Err(DecodeError::guard(start, &text[start..end], "unmatched ')'")),
            Some(lexeme) => Err(DecodeError::guard(
                lexeme.start,
                text[lexeme.start..].trim_end(),
                "unexpected trailing input",
            )),
        }
    }

    fn write_expr(&self, expr: &GuardExpr, out: &mut String) {
        match expr {
            GuardExpr::True => out.push_str(TRUE),
            GuardExpr::Var(name) => out.push_str(name.as_str()),
            GuardExpr::Comparison { left, op, right } => {
                out.push_str(&left.to_string());
                out.push(' ');
                out.push_str(op.symbol());
                out.push(' ');
                out.push_str(&right.to_string());
            }
            GuardExpr::Not(inner) => {
                out.push_str(self.syntax.not());
                self.write_child(inner, expr.precedence(), false, out);
            }
            GuardExpr::And(left, right) => {
                self.write_child(left, expr.precedence(), false, out);
                out.push_str(self.syntax.and());
                self.write_child(right, expr.precedence(), true, out);
            }
            GuardExpr::Or(left, right) => {
                self.write_child(left, expr.precedence(), false, out);
                out.push_str(self.syntax.or());
                self.write_child(right, expr.precedence(), true, out);
            }
        }
    }

    fn write_child(&self, child: &GuardExpr, parent: u8, right: bool, out: &mut String) {
        if needs_parens(child, parent, right) {
            out.push('(');
            self.write_expr(child, out);
            out.push(')');
        } else {
            self.write_expr(child, out);
        }
    }
}

impl AttributeCodec for GuardCodec {
    type Value = GuardExpr;

    fn encode(&self, value: &GuardExpr) -> String {
        GuardCodec::encode(self, value)
    }

    fn decode(&self, text: &str) -> Result<GuardExpr, DecodeError> {
        GuardCodec::decode(self, text)
    }
}

/// Children binding looser than their parent get parentheses, as do right
/// operands of equal strength (chains are left-associative).
fn needs_parens(child: &GuardExpr, parent: u8, right: bool) -> bool {
    let precedence = child.precedence();
    precedence < parent || (right && precedence == parent)
}

/// Nesting of the canonical encoding, counted the way the parser does: one
/// level per `not` and per `(`.
pub(crate) fn nesting(expr: &GuardExpr) -> usize {
    let child = |node: &GuardExpr, right: bool| {
        usize::from(needs_parens(node, expr.precedence(), right)) + nesting(node)
    };
    match expr {
        GuardExpr::True | GuardExpr::Var(_) | GuardExpr::Comparison { .. } => 0,
        GuardExpr::Not(inner) => 1 + child(inner, false),
        GuardExpr::And(left, right) | GuardExpr::Or(left, right) => {
            child(left, false).max(child(right, true))
        }
    }
}

/// A guard nests deeper than a codec is willing to decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("guard nests {depth} levels deep, the limit is {max}")]
pub struct DepthError {
    pub depth: usize,
    pub max: usize,
}

pub(crate) fn check_depth(expr: &GuardExpr, max: usize) -> Result<(), DepthError> {
    let depth = nesting(expr);
    if depth > max {
        return Err(DepthError { depth, max });
    }
    Ok(())
}

/// Encode with the default codec.
pub fn encode(expr: &GuardExpr) -> String {
    GuardCodec::new().encode(expr)
}

/// Decode with the default codec.
pub fn decode(text: &str) -> Result<GuardExpr, DecodeError> {
    GuardCodec::new().decode(text)
}

const TRUE: &str = "true";

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    True,
    And,
    Or,
    Not,
    LParen,
    RParen,
    Rel(Relation),
    Ident(Identifier),
    Int(i64),
}

/// A token with its byte range in the source text.
#[derive(Clone, Debug)]
struct Lexeme {
    token: Token,
    start: usize,
    end: usize,
}

fn tokenize(text: &str) -> Result<Vec<Lexeme>, DecodeError> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let start = i;
        let c = bytes[i];
        let next = bytes.get(i + 1).copied();

        let token = match c {
            b if b.is_ascii_whitespace() => {
                i += 1;
                continue;
            }
            b'(' => {
                i += 1;
                Token::LParen
            }
            b')' => {
                i += 1;
                Token::RParen
            }
            b'&' if next == Some(b'&') => {
                i += 2;
                Token::And
            }
            b'|' if next == Some(b'|') => {
                i += 2;
                Token::Or
            }
            b'!' if next == Some(b'=') => {
                i += 2;
                Token::Rel(Relation::Ne)
            }
            b'!' => {
                i += 1;
                Token::Not
            }
            b'=' if next == Some(b'=') => {
                i += 2;
                Token::Rel(Relation::Eq)
            }
            b'<' if next == Some(b'=') => {
                i += 2;
                Token::Rel(Relation::Le)
            }
            b'<' => {
                i += 1;
                Token::Rel(Relation::Lt)
            }
            b'>' if next == Some(b'=') => {
                i += 2;
                Token::Rel(Relation::Ge)
            }
            b'>' => {
                i += 1;
                Token::Rel(Relation::Gt)
            }
            b'-' if next.is_some_and(|n| n.is_ascii_digit()) => {
                i += 1;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                literal(text, start, i)?
            }
            b if b.is_ascii_digit() => {
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                literal(text, start, i)?
            }
            b if b.is_ascii_alphabetic() => {
                while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                    i += 1;
                }
                match &text[start..i] {
                    TRUE => Token::True,
                    "and" => Token::And,
                    "or" => Token::Or,
                    "not" => Token::Not,
                    name => Token::Ident(Identifier::new(name)?),
                }
            }
            b'&' | b'|' | b'=' => {
                return Err(DecodeError::guard(
                    start,
                    &text[start..start + 1],
                    "unknown operator",
                ));
            }
            _ => {
                let fragment: String = text[start..].chars().take(1).collect();
                return Err(DecodeError::guard(start, fragment, "unexpected character"));
            }
        };

        tokens.push(Lexeme {
            token,
            start,
            end: i,
        });
    }

    Ok(tokens)
}

fn literal(text: &str, start: usize, end: usize) -> Result<Token, DecodeError> {
    let digits = &text[start..end];
    digits
        .parse::<i64>()
        .map(Token::Int)
        .map_err(|_| DecodeError::guard(start, digits, "integer literal out of range"))
}

/// Recursive-descent parser over a token stream.
struct Parser<'a> {
    text: &'a str,
    tokens: Vec<Lexeme>,
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|lexeme| &lexeme.token)
    }

    fn advance(&mut self) -> Option<Lexeme> {
        let lexeme = self.tokens.get(self.pos).cloned();
        if lexeme.is_some() {
            self.pos += 1;
        }
        lexeme
    }

    fn parse_or(&mut self) -> Result<GuardExpr, DecodeError> {
        let mut lhs = self.parse_and()?;
        while self.peek() == Some(&Token::Or) {
            self.advance();
            let rhs = self.parse_and()?;
            lhs = GuardExpr::or(lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<GuardExpr, DecodeError> {
        let mut lhs = self.parse_unary()?;
        while self.peek() == Some(&Token::And) {
            self.advance();
            let rhs = self.parse_unary()?;
            lhs = GuardExpr::and(lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<GuardExpr, DecodeError> {
        if self.peek() != Some(&Token::Not) {
            return self.parse_primary();
        }
        let not = self.advance();
        self.enter(not.as_ref())?;
        let inner = self.parse_unary()?;
        self.depth -= 1;
        Ok(GuardExpr::not(inner))
    }

    fn parse_primary(&mut self) -> Result<GuardExpr, DecodeError> {
        let Some(lexeme) = self.advance() else {
            return Err(self.unexpected_end("expected a condition"));
        };

        match lexeme.token {
            Token::True => Ok(GuardExpr::True),
            Token::LParen => {
                self.enter(Some(&lexeme))?;
                let inner = self.parse_or()?;
                match self.advance() {
                    Some(Lexeme {
                        token: Token::RParen,
                        ..
                    }) => {
                        self.depth -= 1;
                        Ok(inner)
                    }
                    Some(other) => Err(self.error_at(&other, "expected ')'")),
                    None => Err(DecodeError::guard(
                        lexeme.start,
                        self.text[lexeme.start..].trim_end(),
                        "unclosed parenthesis",
                    )),
                }
            }
            Token::Ident(name) => match self.parse_relation() {
                Some(op) => Ok(GuardExpr::Comparison {
                    left: Operand::Variable(name),
                    op,
                    right: self.parse_operand()?,
                }),
                None => Ok(GuardExpr::Var(name)),
            },
            Token::Int(value) => match self.parse_relation() {
                Some(op) => Ok(GuardExpr::Comparison {
                    left: Operand::Literal(value),
                    op,
                    right: self.parse_operand()?,
                }),
                None => Err(self.error_at(&lexeme, "literal must be compared")),
            },
            Token::RParen => Err(self.error_at(&lexeme, "unmatched ')'")),
            _ => Err(self.error_at(&lexeme, "expected a condition")),
        }
    }

    fn parse_relation(&mut self) -> Option<Relation> {
        match self.peek() {
            Some(Token::Rel(op)) => {
                let op = *op;
                self.advance();
                Some(op)
            }
            _ => None,
        }
    }

    fn parse_operand(&mut self) -> Result<Operand, DecodeError> {
        match self.advance() {
            Some(Lexeme {
                token: Token::Ident(name),
                ..
            }) => Ok(Operand::Variable(name)),
            Some(Lexeme {
                token: Token::Int(value),
                ..
            }) => Ok(Operand::Literal(value)),
            Some(other) => Err(self.error_at(&other, "expected a variable or literal")),
            None => Err(self.unexpected_end("expected a variable or literal")),
        }
    }

    fn enter(&mut self, at: Option<&Lexeme>) -> Result<(), DecodeError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            let start = at.map_or(self.text.len(), |lexeme| lexeme.start);
            return Err(DecodeError::guard(
                start,
                self.text[start..].trim_end(),
                format!("nesting deeper than {}", self.max_depth),
            ));
        }
        Ok(())
    }

    fn error_at(&self, lexeme: &Lexeme, reason: &str) -> DecodeError {
        DecodeError::guard(lexeme.start, &self.text[lexeme.start..lexeme.end], reason)
    }

    fn unexpected_end(&self, reason: &str) -> DecodeError {
        DecodeError::guard(
            self.text.len(),
            "",
            format!("unexpected end of guard, {reason}"),
        )
    }
}
