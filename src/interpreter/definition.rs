use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    ast::{BinaryOperator, UnaryOperator},
    interpreter::extraction::core::{PLACEHOLDER_CLOSE, PLACEHOLDER_OPEN},
};

/// Errors in a user supplied [`MathDefinition`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    /// A token was configured as an empty string.
    #[error("Token '{token}' must not be empty.")]
    EmptyToken {
        /// The configuration field.
        token: &'static str,
    },
    /// Two different roles share the same symbol.
    #[error("Symbol '{symbol}' is used for more than one purpose.")]
    DuplicateSymbol {
        /// The ambiguous symbol.
        symbol: String,
    },
    /// A token uses characters reserved for placeholders or identifiers.
    #[error("Symbol '{symbol}' contains reserved characters.")]
    ReservedCharacter {
        /// The offending symbol.
        symbol: String,
    },
}

/// The lexical tokens of the expression language.
///
/// Every field has a default, so a JSON file only needs to list the tokens it
/// changes:
///
/// ```
/// use mathex::interpreter::definition::MathDefinition;
///
/// let definition: MathDefinition = serde_json::from_str(r#"{ "powerSymbol": "**", "parameterSeparator": ";" }"#).unwrap();
/// assert_eq!(definition.power_symbol, "**");
/// assert_eq!(definition.add_symbol, "+");
/// assert!(definition.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MathDefinition {
    /// Opens a group or an argument list.
    pub open_parenthesis:                String,
    /// Closes a group or an argument list.
    pub close_parenthesis:               String,
    /// Separates function arguments.
    pub parameter_separator:             String,
    /// Delimits string literals.
    pub string_delimiter:                char,
    /// Escapes a delimiter or itself inside string literals.
    pub escape_character:                char,
    /// `+`
    pub add_symbol:                      String,
    /// `-`, also used for unary negation.
    pub subtract_symbol:                 String,
    /// `*`
    pub multiply_symbol:                 String,
    /// `/`
    pub divide_symbol:                   String,
    /// `%`
    pub modulo_symbol:                   String,
    /// `^`
    pub power_symbol:                    String,
    /// `<<`
    pub left_shift_symbol:               String,
    /// `>>`
    pub right_shift_symbol:              String,
    /// `=`
    pub equals_symbol:                   String,
    /// `!=`
    pub not_equals_symbol:               String,
    /// `<`
    pub less_than_symbol:                String,
    /// `<=`
    pub less_than_or_equal_symbol:       String,
    /// `>`
    pub greater_than_symbol:             String,
    /// `>=`
    pub greater_than_or_equal_symbol:    String,
    /// `&`
    pub and_symbol:                      String,
    /// `|`
    pub or_symbol:                       String,
    /// `#`
    pub xor_symbol:                      String,
    /// `!`
    pub not_symbol:                      String,
}

impl Default for MathDefinition {
    fn default() -> Self {
        Self { open_parenthesis:             "(".into(),
               close_parenthesis:            ")".into(),
               parameter_separator:          ",".into(),
               string_delimiter:             '"',
               escape_character:             '\\',
               add_symbol:                   "+".into(),
               subtract_symbol:              "-".into(),
               multiply_symbol:              "*".into(),
               divide_symbol:                "/".into(),
               modulo_symbol:                "%".into(),
               power_symbol:                 "^".into(),
               left_shift_symbol:            "<<".into(),
               right_shift_symbol:           ">>".into(),
               equals_symbol:                "=".into(),
               not_equals_symbol:            "!=".into(),
               less_than_symbol:             "<".into(),
               less_than_or_equal_symbol:    "<=".into(),
               greater_than_symbol:          ">".into(),
               greater_than_or_equal_symbol: ">=".into(),
               and_symbol:                   "&".into(),
               or_symbol:                    "|".into(),
               xor_symbol:                   "#".into(),
               not_symbol:                   "!".into(), }
    }
}

impl MathDefinition {
    /// The symbol of a binary operator.
    #[must_use]
    pub fn binary_symbol(&self, op: BinaryOperator) -> &str {
        match op {
            BinaryOperator::Or => &self.or_symbol,
            BinaryOperator::Xor => &self.xor_symbol,
            BinaryOperator::And => &self.and_symbol,
            BinaryOperator::Equals => &self.equals_symbol,
            BinaryOperator::NotEquals => &self.not_equals_symbol,
            BinaryOperator::LessThan => &self.less_than_symbol,
            BinaryOperator::LessThanOrEqual => &self.less_than_or_equal_symbol,
            BinaryOperator::GreaterThan => &self.greater_than_symbol,
            BinaryOperator::GreaterThanOrEqual => &self.greater_than_or_equal_symbol,
            BinaryOperator::LeftShift => &self.left_shift_symbol,
            BinaryOperator::RightShift => &self.right_shift_symbol,
            BinaryOperator::Add => &self.add_symbol,
            BinaryOperator::Subtract => &self.subtract_symbol,
            BinaryOperator::Multiply => &self.multiply_symbol,
            BinaryOperator::Divide => &self.divide_symbol,
            BinaryOperator::Modulo => &self.modulo_symbol,
            BinaryOperator::Power => &self.power_symbol,
        }
    }

    /// The symbol of a unary operator.
    #[must_use]
    pub fn unary_symbol(&self, op: UnaryOperator) -> &str {
        match op {
            UnaryOperator::Negate => &self.subtract_symbol,
            UnaryOperator::Not => &self.not_symbol,
        }
    }

    /// Checks that every token is usable and unambiguous.
    ///
    /// Only the subtraction symbol may double as a unary operator; any other
    /// shared symbol is rejected.
    ///
    /// # Example
    /// ```
    /// use mathex::interpreter::definition::{DefinitionError, MathDefinition};
    ///
    /// let definition = MathDefinition { xor_symbol: "|".into(), ..MathDefinition::default() };
    /// assert_eq!(definition.validate(), Err(DefinitionError::DuplicateSymbol { symbol: "|".into() }));
    /// ```
    pub fn validate(&self) -> Result<(), DefinitionError> {
        let structural = [("openParenthesis", &self.open_parenthesis),
                          ("closeParenthesis", &self.close_parenthesis),
                          ("parameterSeparator", &self.parameter_separator)];
        let mut seen = HashSet::new();

        for (token, symbol) in structural {
            check_symbol(token, symbol)?;
            if !seen.insert(symbol.as_str()) {
                return Err(DefinitionError::DuplicateSymbol { symbol: symbol.clone() });
            }
        }
        for level in BinaryOperator::LEVELS {
            for op in level {
                let symbol = self.binary_symbol(*op);
                check_symbol(op.name(), symbol)?;
                if !seen.insert(symbol) {
                    return Err(DefinitionError::DuplicateSymbol { symbol: symbol.to_string() });
                }
            }
        }
        check_symbol("not", &self.not_symbol)?;
        if !seen.insert(&self.not_symbol) {
            return Err(DefinitionError::DuplicateSymbol { symbol: self.not_symbol.clone() });
        }
        for c in [self.string_delimiter, self.escape_character] {
            if seen.iter().any(|symbol| symbol.contains(c)) {
                return Err(DefinitionError::DuplicateSymbol { symbol: c.to_string() });
            }
        }
        Ok(())
    }

    /// Every distinct operator symbol, longest first.
    #[must_use]
    pub fn operator_symbols(&self) -> Vec<&str> {
        let mut symbols = BinaryOperator::LEVELS.iter()
                                                .flat_map(|level| level.iter())
                                                .map(|op| self.binary_symbol(*op))
                                                .chain(UnaryOperator::ALL.iter().map(|op| self.unary_symbol(*op)))
                                                .collect::<Vec<_>>();
        symbols.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        symbols.dedup();
        symbols
    }
}

fn check_symbol(token: &'static str, symbol: &str) -> Result<(), DefinitionError> {
    if symbol.is_empty() {
        return Err(DefinitionError::EmptyToken { token });
    }
    let reserved = |c: char| {
        c.is_alphanumeric()
        || c.is_whitespace()
        || c == '_'
        || c == '.'
        || c == PLACEHOLDER_OPEN
        || c == PLACEHOLDER_CLOSE
        || ('\u{E000}'..='\u{F8FF}').contains(&c)
    };
    if symbol.chars().any(reserved) {
        return Err(DefinitionError::ReservedCharacter { symbol: symbol.to_string() });
    }
    Ok(())
}
