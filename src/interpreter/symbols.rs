use std::collections::HashMap;

use tracing::trace;

use crate::{
    error::ParseError,
    interpreter::{
        definition::MathDefinition,
        extraction::core::PlaceholderGenerator,
        lexer::is_identifier,
        parser::core::{ParseResult, MAX_NESTING},
        service::CancellationToken,
    },
};

/// A parenthesised sub-expression or function call replaced by a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    /// The placeholder, such as `⟨item0001⟩`.
    pub name:             String,
    /// For a group, the text between the parentheses; for a call, the whole
    /// `name(args)` text. Nested groups are already placeholders.
    pub expression:       String,
    /// Whether the entry is a function call.
    pub is_function_call: bool,
}

/// Sub-expressions of one expression, keyed by placeholder.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    entries:       HashMap<String, SymbolEntry>,
    by_expression: HashMap<(bool, String), String>,
    names:         PlaceholderGenerator,
}

impl SymbolTable {
    /// An empty table for an expression whose original text is `original`.
    #[must_use]
    pub fn new(original: &str) -> Self {
        Self { entries:       HashMap::new(),
               by_expression: HashMap::new(),
               names:         PlaceholderGenerator::new("item", original), }
    }

    /// Registers a sub-expression and returns its placeholder. Identical
    /// sub-expressions share one entry.
    pub fn register(&mut self, expression: &str, is_function_call: bool) -> String {
        let key = (is_function_call, expression.trim().to_string());
        if let Some(name) = self.by_expression.get(&key) {
            return name.clone();
        }
        let name = self.names.next_name();
        trace!(placeholder = %name, expression = key.1.as_str(), is_function_call, "extracted symbol");
        self.entries.insert(name.clone(),
                            SymbolEntry { name:             name.clone(),
                                          expression:       key.1.clone(),
                                          is_function_call, });
        self.by_expression.insert(key, name.clone());
        name
    }

    /// Looks up a placeholder.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SymbolEntry> {
        self.entries.get(name)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no sub-expression was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Replaces every parenthesised group and function call in `text` with a
/// placeholder, innermost first, and returns the remaining top-level text.
///
/// An identifier directly before an open parenthesis (whitespace allowed)
/// makes the group a function call; its arguments stay in the entry text,
/// separated by the parameter separator.
///
/// # Errors
/// Returns [`ParseError::UnbalancedParentheses`] for an open parenthesis
/// without a partner or a stray close parenthesis, and
/// [`ParseError::NestingTooDeep`] for groups nested more than
/// [`MAX_NESTING`] levels.
///
/// # Example
/// ```
/// use mathex::interpreter::{definition::MathDefinition, symbols::{extract_symbols, SymbolTable}};
///
/// let definition = MathDefinition::default();
/// let mut symbols = SymbolTable::new("");
/// let root = extract_symbols("min(a, (b+c)) * (b+c)", &mut symbols, &definition, None).unwrap();
///
/// assert_eq!(root, "⟨item0002⟩ * ⟨item0001⟩");
/// assert_eq!(symbols.get("⟨item0002⟩").unwrap().expression, "min(a, ⟨item0001⟩)");
/// assert!(extract_symbols("(1+2", &mut symbols, &definition, None).is_err());
/// ```
pub fn extract_symbols(text: &str,
                       symbols: &mut SymbolTable,
                       definition: &MathDefinition,
                       cancellation: Option<&CancellationToken>)
                       -> ParseResult<String> {
    extract_nested(text, symbols, definition, cancellation, 0)
}

fn extract_nested(text: &str,
                  symbols: &mut SymbolTable,
                  definition: &MathDefinition,
                  cancellation: Option<&CancellationToken>,
                  depth: usize)
                  -> ParseResult<String> {
    if depth > MAX_NESTING {
        return Err(ParseError::NestingTooDeep { limit: MAX_NESTING });
    }
    let open = definition.open_parenthesis.as_str();
    let close = definition.close_parenthesis.as_str();
    let mut result = text.to_string();

    loop {
        if cancellation.is_some_and(CancellationToken::is_cancelled) {
            return Err(ParseError::Cancelled);
        }
        let Some(start) = result.find(open) else {
            break;
        };
        if result[..start].contains(close) {
            return Err(ParseError::UnbalancedParentheses { text: text.to_string() });
        }
        let inner_start = start + open.len();
        let end = find_matching(&result, inner_start, open, close)
                  .ok_or_else(|| ParseError::UnbalancedParentheses { text: text.to_string() })?;
        let inner = extract_nested(&result[inner_start..end], symbols, definition, cancellation, depth + 1)?;

        let (replace_from, name) = match function_name_before(&result, start) {
            Some((name_start, name)) => {
                let call = format!("{name}{open}{inner}{close}");
                (name_start, symbols.register(&call, true))
            },
            None => (start, symbols.register(&inner, false)),
        };
        result.replace_range(replace_from..end + close.len(), &name);
    }

    if result.contains(close) {
        return Err(ParseError::UnbalancedParentheses { text: text.to_string() });
    }
    Ok(result)
}

/// Finds the close token matching an open token whose content starts at
/// byte offset `from`.
fn find_matching(text: &str, from: usize, open: &str, close: &str) -> Option<usize> {
    let mut depth = 0_usize;
    let mut index = from;
    while index < text.len() {
        let rest = &text[index..];
        if rest.starts_with(close) {
            if depth == 0 {
                return Some(index);
            }
            depth -= 1;
            index += close.len();
        } else if rest.starts_with(open) {
            depth += 1;
            index += open.len();
        } else {
            index += rest.chars().next().map_or(1, char::len_utf8);
        }
    }
    None
}

/// Returns the start offset and text of an identifier directly before byte
/// offset `open_at`, skipping whitespace.
fn function_name_before(text: &str, open_at: usize) -> Option<(usize, &str)> {
    let before = text[..open_at].trim_end();
    let name_start = before.char_indices()
                           .rev()
                           .take_while(|(_, c)| c.is_alphanumeric() || *c == '_')
                           .last()
                           .map(|(i, _)| i)?;
    let name = &before[name_start..];
    is_identifier(name).then_some((name_start, name))
}
