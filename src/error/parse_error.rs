use crate::error::EngineError;

/// Represents all errors that can occur during extraction or parsing.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The text could not be resolved into any node.
    #[error("Expression '{text}' is not recognized.")]
    NotRecognized {
        /// The text that failed to resolve.
        text: String,
    },
    /// Parentheses do not pair up.
    #[error("Unbalanced parentheses in '{text}'.")]
    UnbalancedParentheses {
        /// The text containing the unmatched parenthesis.
        text: String,
    },
    /// A literal looked like a candidate but could not be interpreted.
    #[error("Extraction failed: {details}.")]
    Extraction {
        /// What went wrong.
        details: String,
    },
    /// The operands of a node cannot be unified into any value type.
    #[error("Expression is not valid logically: {details}.")]
    LogicallyInvalid {
        /// Which node rejected its operands and why.
        details: String,
    },
    /// A function with that name and arity does not exist.
    #[error("Unknown function '{name}' taking {arity} argument(s).")]
    UnknownFunction {
        /// The name used in the call.
        name:  String,
        /// Number of arguments supplied.
        arity: usize,
    },
    /// Operators or parentheses are nested deeper than the parser follows.
    #[error("Expression nests deeper than {limit} levels.")]
    NestingTooDeep {
        /// The maximum supported depth.
        limit: usize,
    },
    /// The cancellation token was triggered.
    #[error("Interpretation was cancelled.")]
    Cancelled,
    /// The engine itself is inconsistent.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl ParseError {
    /// Builds a [`ParseError::LogicallyInvalid`] value.
    pub fn logical(details: impl Into<String>) -> Self {
        Self::LogicallyInvalid { details: details.into() }
    }

    /// Builds a [`ParseError::NotRecognized`] value.
    pub fn not_recognized(text: impl Into<String>) -> Self {
        Self::NotRecognized { text: text.into() }
    }

    /// Returns `true` if the error must propagate instead of letting the
    /// parser try another candidate.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::NestingTooDeep { .. } | Self::Engine(_))
    }
}
