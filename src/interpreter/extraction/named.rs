use std::f64::consts::{E, PI};

use crate::interpreter::{
    definition::MathDefinition,
    extraction::core::{inside_placeholder, ConstantExtractor, Extraction},
    lexer::{literals, LiteralToken},
    value::core::Value,
};

/// Extracts the named constants `pi`, `π`, `e`, `true` and `false`.
///
/// Only whole identifiers match, and not when followed by an open
/// parenthesis, so a function called `e` stays callable.
///
/// # Example
/// ```
/// use mathex::interpreter::{
///     definition::MathDefinition,
///     extraction::{core::{ConstantExtractor, Extraction}, named::NamedConstantExtractor},
///     value::core::Value,
/// };
///
/// let definition = MathDefinition::default();
/// assert_eq!(NamedConstantExtractor.find("speed & true", 0, &definition),
///            Extraction::Found { start: 8, end: 12, value: Value::Boolean(true) });
/// assert_eq!(NamedConstantExtractor.find("e(1) + energy", 0, &definition), Extraction::None);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NamedConstantExtractor;

impl NamedConstantExtractor {
    /// The value of a named constant.
    #[must_use]
    pub fn lookup(name: &str) -> Option<Value> {
        match name {
            "pi" | "π" => Some(Value::Numeric(PI)),
            "e" => Some(Value::Numeric(E)),
            "true" => Some(Value::Boolean(true)),
            "false" => Some(Value::Boolean(false)),
            _ => None,
        }
    }
}

impl ConstantExtractor for NamedConstantExtractor {
    fn name(&self) -> &str {
        "named constant"
    }

    fn priority(&self) -> i32 {
        20
    }

    fn find(&self, text: &str, from: usize, definition: &MathDefinition) -> Extraction {
        for (token, span) in literals(text, from) {
            if token != Ok(LiteralToken::Identifier) || inside_placeholder(text, span.start) {
                continue;
            }
            let Some(value) = Self::lookup(&text[span.clone()]) else {
                continue;
            };
            if text[span.end..].trim_start().starts_with(definition.open_parenthesis.as_str()) {
                continue;
            }
            return Extraction::Found { start: span.start,
                                       end: span.end,
                                       value };
        }
        Extraction::None
    }
}
