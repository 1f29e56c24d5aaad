use crate::interpreter::{
    definition::MathDefinition,
    extraction::core::{inside_placeholder, ConstantExtractor, Extraction},
    lexer::{literals, LiteralToken},
};

/// Extracts numeric and byte literals using the literal lexer.
///
/// Decimal integers become integers (or floating-point numbers when they do
/// not fit into an `i64`), decimals and scientific notation become
/// floating-point numbers, and `0x`/`0b` literals become byte arrays.
/// Digits inside identifiers such as `x1` are left alone.
///
/// # Example
/// ```
/// use mathex::interpreter::{
///     definition::MathDefinition,
///     extraction::{core::{ConstantExtractor, Extraction}, number::NumberExtractor},
///     value::core::Value,
/// };
///
/// let definition = MathDefinition::default();
/// assert_eq!(NumberExtractor.find("x1 * 2.5e1", 0, &definition),
///            Extraction::Found { start: 5, end: 10, value: Value::Numeric(25.0) });
/// assert_eq!(NumberExtractor.find("0b1_", 0, &definition),
///            Extraction::Found { start: 0, end: 3, value: Value::from(vec![1_u8]) });
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberExtractor;

impl ConstantExtractor for NumberExtractor {
    fn name(&self) -> &str {
        "number"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn find(&self, text: &str, from: usize, _definition: &MathDefinition) -> Extraction {
        for (token, span) in literals(text, from) {
            if inside_placeholder(text, span.start) {
                continue;
            }
            match token {
                Ok(LiteralToken::Identifier) => {},
                Ok(token) => {
                    return match token.value() {
                        Some(value) => Extraction::Found { start: span.start,
                                                           end: span.end,
                                                           value },
                        None => Extraction::Malformed { at: span.start },
                    };
                },
                Err(()) => {
                    if text[span.clone()].starts_with(|c: char| c.is_ascii_digit()) {
                        return Extraction::Malformed { at: span.start };
                    }
                },
            }
        }
        Extraction::None
    }
}
