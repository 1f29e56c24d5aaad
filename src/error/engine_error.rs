use crate::interpreter::value::kind::SupportedValueType;

/// Internal inconsistencies of the mathematics engine.
///
/// Any of these means an invariant of type resolution or code generation was
/// violated. They are propagated to the caller instead of being treated as an
/// unrecognized expression.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A node was asked for a type its cost table does not contain.
    #[error("Mathematics engine fault: node '{node}' has no cost entry for {requested}.")]
    MissingCost {
        /// Rendering of the offending node.
        node:      String,
        /// The type that was requested.
        requested: SupportedValueType,
    },
    /// A constant was asked for a representation it did not precompute.
    #[error("Mathematics engine fault: constant '{constant}' has no {requested} view.")]
    MissingView {
        /// The constant value.
        constant:  String,
        /// The type that was requested.
        requested: SupportedValueType,
    },
    /// A cost table referenced an operation signature that does not exist.
    #[error("Mathematics engine fault: '{operation}' has no signature #{index}.")]
    UnknownSignature {
        /// The operator or function name.
        operation: String,
        /// The signature index.
        index:     usize,
    },
    /// Code generation reached a parameter that was never bound to a type.
    #[error("Mathematics engine fault: parameter '{name}' was not bound before code generation.")]
    UnboundParameter {
        /// The parameter name.
        name: String,
    },
    /// An operation received operands that match none of its signatures.
    #[error("Mathematics engine fault: '{operation}' cannot be applied to {operands}.")]
    OperandMismatch {
        /// The operator or function name.
        operation: String,
        /// Types of the received operands.
        operands:  String,
    },
}
