use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::{binary::core::operand_mismatch, core::EvalResult},
        value::core::Value,
    },
    util::bytes::bytewise,
};

/// Evaluates `&`, `|` and `#`.
///
/// Booleans combine logically, integers bitwise, and byte arrays byte by
/// byte after left-padding the shorter operand with zeros.
///
/// # Example
/// ```
/// use mathex::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::bitwise::apply_bitwise, value::core::Value},
/// };
///
/// let r = apply_bitwise(BinaryOperator::Xor, Value::Boolean(true), Value::Boolean(true));
/// assert_eq!(r.unwrap(), Value::Boolean(false));
///
/// let r = apply_bitwise(BinaryOperator::Or, Value::Integer(0b1010), Value::Integer(0b0101));
/// assert_eq!(r.unwrap(), Value::Integer(0b1111));
/// ```
pub fn apply_bitwise(op: BinaryOperator, left: Value, right: Value) -> EvalResult<Value> {
    use BinaryOperator as Op;

    match (op, &left, &right) {
        (Op::And, Value::Boolean(a), Value::Boolean(b)) => Ok(Value::Boolean(*a && *b)),
        (Op::Or, Value::Boolean(a), Value::Boolean(b)) => Ok(Value::Boolean(*a || *b)),
        (Op::Xor, Value::Boolean(a), Value::Boolean(b)) => Ok(Value::Boolean(a ^ b)),
        (Op::And, Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a & b)),
        (Op::Or, Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a | b)),
        (Op::Xor, Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a ^ b)),
        (Op::And, Value::ByteArray(a), Value::ByteArray(b)) => Ok(Value::ByteArray(bytewise(a, b, |x, y| x & y))),
        (Op::Or, Value::ByteArray(a), Value::ByteArray(b)) => Ok(Value::ByteArray(bytewise(a, b, |x, y| x | y))),
        (Op::Xor, Value::ByteArray(a), Value::ByteArray(b)) => Ok(Value::ByteArray(bytewise(a, b, |x, y| x ^ y))),
        _ => Err(operand_mismatch(op, &left, &right).into()),
    }
}
