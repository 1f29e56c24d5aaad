use crate::interpreter::value::kind::{
    SupportableValueType,
    SupportedValueType::{self, Boolean, ByteArray, Integer, Numeric, String},
};

/// One way of executing an operation: the operand types it consumes, the type
/// it produces, and what it costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    /// Operand types, one per operand.
    pub inputs: &'static [SupportedValueType],
    /// Result type.
    pub output: SupportedValueType,
    /// Cost of the operation itself.
    pub cost:   u32,
}

impl Signature {
    /// Creates a signature.
    #[must_use]
    pub const fn new(inputs: &'static [SupportedValueType], output: SupportedValueType, cost: u32) -> Self {
        Self { inputs,
               output,
               cost }
    }

    /// Number of operands.
    #[must_use]
    pub const fn arity(&self) -> usize {
        self.inputs.len()
    }
}

/// Union of the types accepted at operand `position` by any of `signatures`.
///
/// # Example
/// ```
/// use mathex::{
///     ast::BinaryOperator,
///     interpreter::{resolution::signature::accepted_at, value::kind::SupportableValueType},
/// };
///
/// let accepted = accepted_at(BinaryOperator::Multiply.signatures(), 0);
/// assert_eq!(accepted, SupportableValueType::INTEGER | SupportableValueType::NUMERIC);
/// ```
#[must_use]
pub fn accepted_at(signatures: &[Signature], position: usize) -> SupportableValueType {
    signatures.iter()
              .filter_map(|signature| signature.inputs.get(position).copied())
              .collect()
}

const fn sig(inputs: &'static [SupportedValueType], output: SupportedValueType, cost: u32) -> Signature {
    Signature::new(inputs, output, cost)
}

/// `+`: integer and floating-point addition, byte stitching, concatenation.
pub const ADD: &[Signature] = &[sig(&[Integer, Integer], Integer, 1),
                                sig(&[Numeric, Numeric], Numeric, 1),
                                sig(&[ByteArray, ByteArray], ByteArray, 3),
                                sig(&[String, String], String, 5)];

/// `-`, `*` and `%`.
pub const INTEGER_OR_NUMERIC: &[Signature] =
    &[sig(&[Integer, Integer], Integer, 1), sig(&[Numeric, Numeric], Numeric, 1)];

/// `/` never truncates.
pub const DIVIDE: &[Signature] = &[sig(&[Numeric, Numeric], Numeric, 2)];

/// `^`
pub const POWER: &[Signature] = &[sig(&[Numeric, Numeric], Numeric, 3)];

/// `<<` and `>>`
pub const SHIFT: &[Signature] = &[sig(&[Integer, Integer], Integer, 1)];

/// `&`, `|` and `#`.
pub const BITWISE: &[Signature] = &[sig(&[Integer, Integer], Integer, 1),
                                    sig(&[Boolean, Boolean], Boolean, 1),
                                    sig(&[ByteArray, ByteArray], ByteArray, 2)];

/// `=` and `!=`.
pub const EQUALITY: &[Signature] = &[sig(&[Integer, Integer], Boolean, 1),
                                     sig(&[Numeric, Numeric], Boolean, 1),
                                     sig(&[Boolean, Boolean], Boolean, 1),
                                     sig(&[ByteArray, ByteArray], Boolean, 2),
                                     sig(&[String, String], Boolean, 3)];

/// `<`, `<=`, `>` and `>=`.
pub const ORDERING: &[Signature] = &[sig(&[Integer, Integer], Boolean, 1),
                                     sig(&[Numeric, Numeric], Boolean, 1),
                                     sig(&[String, String], Boolean, 3)];

/// Unary `-`.
pub const NEGATE: &[Signature] = &[sig(&[Integer], Integer, 1), sig(&[Numeric], Numeric, 1)];

/// Unary `!`.
pub const NOT: &[Signature] =
    &[sig(&[Integer], Integer, 1), sig(&[Boolean], Boolean, 1), sig(&[ByteArray], ByteArray, 2)];
