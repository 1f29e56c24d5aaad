use std::ops::Range;

use logos::Logos;

use crate::{
    interpreter::value::core::Value,
    util::bytes::{parse_binary_digits, parse_hex_digits},
};

/// Represents a literal-level token inside raw expression text.
///
/// Only numbers, byte literals and identifiers are recognized; every other
/// character (operators, parentheses, placeholders) is a lexer error that
/// callers skip. Identifiers are lexed so that digits inside them, such as
/// in `x1`, are never mistaken for numbers.
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum LiteralToken {
    /// Numeric literal tokens, such as `3.14`, `.5`, `2.0` or `2.1e-10`.
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", parse_float)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_float)]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", parse_float)]
    Real(f64),
    /// Integer literal tokens, such as `42`. Literals too large for `i64`
    /// become floating-point values.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(Value),
    /// Hexadecimal byte literals, such as `0x1F`.
    #[regex(r"0[xX][0-9a-fA-F]+", parse_hex)]
    Hex(Vec<u8>),
    /// Binary byte literals, such as `0b1010`.
    #[regex(r"0[bB][01]+", parse_binary)]
    Binary(Vec<u8>),
    /// Identifier tokens; parameter, function or named-constant names such as
    /// `x`, `sqrt` or `π`.
    #[regex(r"[\p{L}_][\p{L}\p{N}_]*")]
    Identifier,
}

impl LiteralToken {
    /// The constant value a literal token stands for.
    #[must_use]
    pub fn value(&self) -> Option<Value> {
        match self {
            Self::Real(r) => Some(Value::Numeric(*r)),
            Self::Integer(value) => Some(value.clone()),
            Self::Hex(bytes) | Self::Binary(bytes) => Some(Value::ByteArray(bytes.clone())),
            Self::Identifier => None,
        }
    }
}

/// A token found by [`literals`], with its byte span in the scanned text.
pub type SpannedLiteral = (Result<LiteralToken, ()>, Range<usize>);

/// Lexes `text` from byte offset `from`, reporting spans relative to `text`.
///
/// # Example
/// ```
/// use mathex::interpreter::lexer::{literals, LiteralToken};
///
/// let tokens = literals("x1+0x0F", 0).filter_map(|(token, span)| token.ok().map(|t| (t, span)))
///                                     .collect::<Vec<_>>();
/// assert_eq!(tokens, vec![(LiteralToken::Identifier, 0..2), (LiteralToken::Hex(vec![0x0F]), 3..7)]);
/// ```
pub fn literals(text: &str, from: usize) -> impl Iterator<Item = SpannedLiteral> + '_ {
    let rest = text.get(from..).unwrap_or_default();
    LiteralToken::lexer(rest).spanned()
                             .map(move |(token, span)| (token, span.start + from..span.end + from))
}

/// Returns `true` if the whole of `text` is one identifier.
///
/// # Example
/// ```
/// use mathex::interpreter::lexer::is_identifier;
///
/// assert!(is_identifier("speed_2"));
/// assert!(is_identifier("π"));
/// assert!(!is_identifier("2x"));
/// assert!(!is_identifier("a b"));
/// ```
#[must_use]
pub fn is_identifier(text: &str) -> bool {
    let mut lexer = LiteralToken::lexer(text);
    matches!(lexer.next(), Some(Ok(LiteralToken::Identifier))) && lexer.span() == (0..text.len())
}

/// Parses a floating-point literal from the current token slice.
fn parse_float(lex: &logos::Lexer<LiteralToken>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses an integer literal from the current token slice, falling back to a
/// floating-point value when it does not fit into an `i64`.
fn parse_integer(lex: &logos::Lexer<LiteralToken>) -> Option<Value> {
    let slice = lex.slice();
    slice.parse::<i64>()
         .map(Value::Integer)
         .ok()
         .or_else(|| slice.parse::<f64>().ok().map(Value::Numeric))
}

/// Parses the digits after `0x`.
fn parse_hex(lex: &logos::Lexer<LiteralToken>) -> Option<Vec<u8>> {
    lex.slice().get(2..).and_then(parse_hex_digits)
}

/// Parses the digits after `0b`.
fn parse_binary(lex: &logos::Lexer<LiteralToken>) -> Option<Vec<u8>> {
    lex.slice().get(2..).and_then(parse_binary_digits)
}
