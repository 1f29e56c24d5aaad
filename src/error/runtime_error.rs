use crate::{error::EngineError, interpreter::value::kind::SupportedValueType};

/// Represents all errors that can occur while computing an expression.
///
/// A runtime error only fails the single `compute` call that produced it;
/// the compiled evaluator stays usable for subsequent calls.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// Integer division or modulo by zero.
    #[error("Division by zero.")]
    DivisionByZero,
    /// Integer arithmetic overflowed.
    #[error("Integer overflow while trying to compute result.")]
    Overflow,
    /// A value cannot be represented in the requested type.
    #[error("Cannot convert {from} value '{value}' to {to}.")]
    InvalidCast {
        /// Rendering of the value.
        value: String,
        /// The type of the value.
        from:  SupportedValueType,
        /// The type that was required.
        to:    SupportedValueType,
    },
    /// A function argument was outside the function's domain.
    #[error("Invalid argument: {details}.")]
    InvalidArgument {
        /// Details about why the argument is invalid.
        details: String,
    },
    /// The number of positional values does not match the parameter count.
    #[error("Expected {expected} parameter value(s), found {found}.")]
    ParameterCountMismatch {
        /// Number of parameters of the expression.
        expected: usize,
        /// Number of values supplied.
        found:    usize,
    },
    /// A data finder did not provide a referenced parameter.
    #[error("No value supplied for parameter '{name}'.")]
    MissingParameter {
        /// The parameter name.
        name: String,
    },
    /// The supplied parameter types make the expression invalid.
    #[error("Parameter types are incompatible with the expression: {details}.")]
    TypeMismatch {
        /// Details from type resolution.
        details: String,
    },
    /// The engine itself is inconsistent.
    #[error(transparent)]
    Engine(#[from] EngineError),
}
