use std::collections::HashMap;

use crate::{
    ast::{BinaryOperator, UnaryOperator},
    interpreter::definition::MathDefinition,
};

/// First character of the private-use range used for operator markers.
const FIRST_MARKER: u32 = 0xE000;

/// Operator symbols of a [`MathDefinition`] and the marker character each is
/// rewritten to.
///
/// Rewriting happens once, longest symbol first at every position, so that
/// `<=` is never read as `<` followed by `=`.
///
/// # Example
/// ```
/// use mathex::{
///     ast::BinaryOperator,
///     interpreter::{definition::MathDefinition, parser::operators::OperatorMarkers},
/// };
///
/// let markers = OperatorMarkers::new(&MathDefinition::default());
/// let marked = markers.mark("a<=b<c");
/// let ops = marked.chars().filter_map(|c| markers.binary(c)).collect::<Vec<_>>();
///
/// assert_eq!(ops, [BinaryOperator::LessThanOrEqual, BinaryOperator::LessThan]);
/// assert_eq!(markers.restore(&marked), "a<=b<c");
/// ```
#[derive(Debug, Clone)]
pub struct OperatorMarkers {
    symbols: Vec<(String, char)>,
    binary:  HashMap<char, BinaryOperator>,
    unary:   HashMap<char, UnaryOperator>,
    restore: HashMap<char, String>,
}

impl OperatorMarkers {
    /// Assigns one marker per distinct operator symbol.
    #[must_use]
    pub fn new(definition: &MathDefinition) -> Self {
        let symbols = definition.operator_symbols()
                                .into_iter()
                                .zip(FIRST_MARKER..)
                                .filter_map(|(symbol, code)| char::from_u32(code).map(|marker| (symbol.to_string(), marker)))
                                .collect::<Vec<_>>();
        let marker_of = |symbol: &str| symbols.iter().find(|(s, _)| s == symbol).map(|(_, marker)| *marker);

        let binary = BinaryOperator::LEVELS.iter()
                                           .flat_map(|level| level.iter())
                                           .filter_map(|op| marker_of(definition.binary_symbol(*op)).map(|m| (m, *op)))
                                           .collect();
        let unary = UnaryOperator::ALL.iter()
                                      .filter_map(|op| marker_of(definition.unary_symbol(*op)).map(|m| (m, *op)))
                                      .collect();
        let restore = symbols.iter().map(|(symbol, marker)| (*marker, symbol.clone())).collect();

        Self { symbols,
               binary,
               unary,
               restore }
    }

    /// Rewrites every operator symbol in `text` to its marker.
    #[must_use]
    pub fn mark(&self, text: &str) -> String {
        let mut marked = String::with_capacity(text.len());
        let mut index = 0;
        while let Some(rest) = text.get(index..).filter(|rest| !rest.is_empty()) {
            if let Some((symbol, marker)) = self.symbols.iter().find(|(symbol, _)| rest.starts_with(symbol.as_str())) {
                marked.push(*marker);
                index += symbol.len();
            } else if let Some(c) = rest.chars().next() {
                marked.push(c);
                index += c.len_utf8();
            }
        }
        marked
    }

    /// Rewrites markers back to their symbols.
    #[must_use]
    pub fn restore(&self, text: &str) -> String {
        text.chars().fold(String::with_capacity(text.len()), |mut restored, c| {
                        match self.restore.get(&c) {
                            Some(symbol) => restored.push_str(symbol),
                            None => restored.push(c),
                        }
                        restored
                    })
    }

    /// The binary operator a marker stands for.
    #[must_use]
    pub fn binary(&self, c: char) -> Option<BinaryOperator> {
        self.binary.get(&c).copied()
    }

    /// The unary operator a marker stands for.
    #[must_use]
    pub fn unary(&self, c: char) -> Option<UnaryOperator> {
        self.unary.get(&c).copied()
    }

    /// Returns `true` if `c` is any operator marker.
    #[must_use]
    pub fn is_marker(&self, c: char) -> bool {
        self.restore.contains_key(&c)
    }
}
