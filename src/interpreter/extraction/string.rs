use crate::interpreter::{
    definition::MathDefinition,
    extraction::core::{inside_placeholder, ConstantExtractor, Extraction},
    value::core::Value,
};

/// Extracts quoted string literals.
///
/// The escape character followed by the delimiter or by itself stands for
/// that character; before any other character it is kept verbatim. A
/// delimiter without a closing partner is malformed.
///
/// # Example
/// ```
/// use mathex::interpreter::{
///     definition::MathDefinition,
///     extraction::{core::{ConstantExtractor, Extraction}, string::StringExtractor},
///     value::core::Value,
/// };
///
/// let found = StringExtractor.find(r#"1 + "say \"hi\"""#, 0, &MathDefinition::default());
/// assert_eq!(found, Extraction::Found { start: 4, end: 16, value: Value::from(r#"say "hi""#) });
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StringExtractor;

impl ConstantExtractor for StringExtractor {
    fn name(&self) -> &str {
        "string"
    }

    fn priority(&self) -> i32 {
        0
    }

    fn find(&self, text: &str, from: usize, definition: &MathDefinition) -> Extraction {
        let delimiter = definition.string_delimiter;
        let escape = definition.escape_character;
        let Some(rest) = text.get(from..) else {
            return Extraction::None;
        };

        let Some(start) = rest.char_indices()
                              .map(|(i, _)| from + i)
                              .find(|i| text[*i..].starts_with(delimiter) && !inside_placeholder(text, *i))
        else {
            return Extraction::None;
        };

        let mut value = String::new();
        let mut chars = text[start + delimiter.len_utf8()..].char_indices().peekable();
        while let Some((offset, c)) = chars.next() {
            if c == escape
               && let Some((_, next)) = chars.peek().copied()
               && (next == delimiter || next == escape)
            {
                value.push(next);
                chars.next();
                continue;
            }
            if c == delimiter {
                let end = start + delimiter.len_utf8() + offset + c.len_utf8();
                return Extraction::Found { start,
                                           end,
                                           value: Value::String(value) };
            }
            value.push(c);
        }

        Extraction::Malformed { at: start }
    }
}
