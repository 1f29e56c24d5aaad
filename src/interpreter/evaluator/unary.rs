use crate::{
    ast::UnaryOperator,
    error::{EngineError, RuntimeError},
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Applies a unary operator to an operand already converted to one of the
/// operator's input types.
///
/// - `-` negates integers (checked) and floating-point numbers.
/// - `!` is logical not on booleans and a bitwise complement on integers and
///   byte arrays.
///
/// # Example
/// ```
/// use mathex::{
///     ast::UnaryOperator,
///     interpreter::{evaluator::unary::apply_unary, value::core::Value},
/// };
///
/// assert_eq!(apply_unary(UnaryOperator::Negate, Value::Integer(4)).unwrap(), Value::Integer(-4));
/// assert_eq!(apply_unary(UnaryOperator::Not, Value::from(vec![0x0F_u8])).unwrap(),
///            Value::from(vec![0xF0_u8]));
/// ```
pub fn apply_unary(op: UnaryOperator, operand: Value) -> EvalResult<Value> {
    match (op, operand) {
        (UnaryOperator::Negate, Value::Integer(n)) => n.checked_neg().map(Value::Integer).ok_or(RuntimeError::Overflow),
        (UnaryOperator::Negate, Value::Numeric(r)) => Ok(Value::Numeric(-r)),
        (UnaryOperator::Not, Value::Integer(n)) => Ok(Value::Integer(!n)),
        (UnaryOperator::Not, Value::Boolean(b)) => Ok(Value::Boolean(!b)),
        (UnaryOperator::Not, Value::ByteArray(bytes)) => Ok(Value::ByteArray(bytes.iter().map(|b| !b).collect())),
        (op, operand) => Err(EngineError::OperandMismatch { operation: op.name().to_string(),
                                                            operands:  operand.value_type().to_string(), }.into()),
    }
}
