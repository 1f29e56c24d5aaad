use std::{collections::HashMap, fmt};

use tracing::trace;

use crate::{
    error::ParseError,
    interpreter::{definition::MathDefinition, service::CancellationToken, value::core::Value},
};

/// Opens every generated placeholder.
pub const PLACEHOLDER_OPEN: char = '⟨';
/// Closes every generated placeholder.
pub const PLACEHOLDER_CLOSE: char = '⟩';

/// Generates placeholder names that never occur in the original text.
#[derive(Debug, Clone)]
pub struct PlaceholderGenerator {
    prefix:    &'static str,
    counter:   usize,
    forbidden: String,
}

impl PlaceholderGenerator {
    /// Creates a generator for names like `⟨const0001⟩` avoiding any text in
    /// `forbidden`.
    #[must_use]
    pub fn new(prefix: &'static str, forbidden: &str) -> Self {
        Self { prefix,
               counter: 0,
               forbidden: forbidden.to_string() }
    }

    /// Returns the next unused name.
    ///
    /// # Example
    /// ```
    /// use mathex::interpreter::extraction::core::PlaceholderGenerator;
    ///
    /// let mut names = PlaceholderGenerator::new("item", "⟨item0001⟩ + 1");
    /// assert_eq!(names.next_name(), "⟨item0002⟩");
    /// ```
    pub fn next_name(&mut self) -> String {
        loop {
            self.counter += 1;
            let candidate = format!("{PLACEHOLDER_OPEN}{}{:04}{PLACEHOLDER_CLOSE}", self.prefix, self.counter);
            if !self.forbidden.contains(&candidate) {
                return candidate;
            }
        }
    }
}

/// Returns `true` if byte offset `at` of `text` lies inside a placeholder.
#[must_use]
pub fn inside_placeholder(text: &str, at: usize) -> bool {
    let before = text.get(..at).unwrap_or_default();
    match (before.rfind(PLACEHOLDER_OPEN), before.rfind(PLACEHOLDER_CLOSE)) {
        (Some(open), Some(close)) => open > close,
        (Some(_), None) => true,
        _ => false,
    }
}

/// Constants extracted from one expression, keyed by placeholder name.
///
/// Identical literal text, and distinct literals with equal values, share one
/// placeholder.
#[derive(Debug, Clone)]
pub struct ConstantsTable {
    values:     HashMap<String, Value>,
    literals:   HashMap<String, String>,
    by_literal: HashMap<String, String>,
    by_value:   HashMap<Value, String>,
    names:      PlaceholderGenerator,
}

impl ConstantsTable {
    /// An empty table for an expression whose original text is `original`.
    #[must_use]
    pub fn new(original: &str) -> Self {
        Self { values:     HashMap::new(),
               literals:   HashMap::new(),
               by_literal: HashMap::new(),
               by_value:   HashMap::new(),
               names:      PlaceholderGenerator::new("const", original), }
    }

    /// Registers `literal` with its `value` and returns its placeholder.
    ///
    /// # Example
    /// ```
    /// use mathex::interpreter::{extraction::core::ConstantsTable, value::core::Value};
    ///
    /// let mut constants = ConstantsTable::new("2 + 2.0 + 2");
    /// let first = constants.register("2", Value::Integer(2));
    /// assert_eq!(constants.register("2", Value::Integer(2)), first);
    /// assert_ne!(constants.register("2.0", Value::Numeric(2.0)), first);
    /// assert_eq!(constants.len(), 2);
    /// ```
    pub fn register(&mut self, literal: &str, value: Value) -> String {
        if let Some(name) = self.by_literal.get(literal) {
            return name.clone();
        }
        let name = match self.by_value.get(&value) {
            Some(name) => name.clone(),
            None => {
                let name = self.names.next_name();
                self.values.insert(name.clone(), value.clone());
                self.literals.insert(name.clone(), literal.to_string());
                self.by_value.insert(value, name.clone());
                name
            },
        };
        self.by_literal.insert(literal.to_string(), name.clone());
        name
    }

    /// Returns the value behind a placeholder.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// The literal text first registered under a placeholder.
    #[must_use]
    pub fn literal(&self, name: &str) -> Option<&str> {
        self.literals.get(name).map(String::as_str)
    }

    /// Number of distinct constants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Outcome of one extractor search.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// No further candidate in the text.
    None,
    /// A literal was found at `start..end`.
    Found {
        /// Byte offset of the literal.
        start: usize,
        /// Byte offset just past the literal.
        end:   usize,
        /// Its value.
        value: Value,
    },
    /// Something at `at` looked like a literal but is malformed.
    ///
    /// The driver skips one character and searches again.
    Malformed {
        /// Byte offset of the malformed candidate.
        at: usize,
    },
}

/// Recognizes one kind of literal in raw expression text.
///
/// Extractors run in ascending [`ConstantExtractor::priority`]; built-in
/// extractors use priorities 0 to 20.
pub trait ConstantExtractor: Send + Sync {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    /// Ordering key; lower runs first.
    fn priority(&self) -> i32 {
        100
    }

    /// Finds the first literal starting at or after byte offset `from`.
    ///
    /// Text inside placeholders must be ignored.
    fn find(&self, text: &str, from: usize, definition: &MathDefinition) -> Extraction;
}

impl fmt::Debug for dyn ConstantExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConstantExtractor({})", self.name())
    }
}

/// Turns a sub-expression that nothing else recognized into a constant.
///
/// Interpreters see the text with operator symbols restored, for example
/// `12 kg`.
pub trait ConstantInterpreter: Send + Sync {
    /// Returns the constant `text` denotes, if any.
    fn interpret(&self, text: &str) -> Option<Value>;
}

impl fmt::Debug for dyn ConstantInterpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ConstantInterpreter")
    }
}

/// Runs every extractor over `text` and returns the text with all literals
/// replaced by placeholders.
///
/// Each extractor is invoked repeatedly; after a substitution it restarts
/// right after the inserted placeholder.
///
/// # Errors
/// Returns [`ParseError::Cancelled`] if `cancellation` fires between two
/// extractor invocations.
pub fn extract_constants(text: &str,
                         extractors: &[&dyn ConstantExtractor],
                         constants: &mut ConstantsTable,
                         definition: &MathDefinition,
                         cancellation: Option<&CancellationToken>)
                         -> Result<String, ParseError> {
    let mut text = text.to_string();

    for extractor in extractors {
        let mut cursor = 0;
        loop {
            if cancellation.is_some_and(CancellationToken::is_cancelled) {
                return Err(ParseError::Cancelled);
            }
            match extractor.find(&text, cursor, definition) {
                Extraction::None => break,
                Extraction::Found { start, end, value } => {
                    let Some(literal) = text.get(start..end).filter(|_| start >= cursor && end > start) else {
                        return Err(ParseError::Extraction { details: format!("extractor '{}' returned an invalid span {start}..{end}",
                                                                             extractor.name()) });
                    };
                    let name = constants.register(literal, value);
                    trace!(extractor = extractor.name(), literal, placeholder = %name, "extracted constant");
                    text.replace_range(start..end, &name);
                    cursor = start + name.len();
                },
                Extraction::Malformed { at } => {
                    let skip = text.get(at..)
                                   .and_then(|rest| rest.chars().next())
                                   .map_or(1, char::len_utf8);
                    trace!(extractor = extractor.name(), at, "skipped malformed literal");
                    cursor = (at + skip).max(cursor + 1);
                    if cursor > text.len() {
                        break;
                    }
                },
            }
        }
    }

    Ok(text)
}
