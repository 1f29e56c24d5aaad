use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::{binary::core::operand_mismatch, core::EvalResult},
        value::core::Value,
    },
    util::{bytes::stitch, num::shift_amount},
};

/// Evaluates arithmetic operators and shifts.
///
/// Integer arithmetic is checked: overflow and division by zero are runtime
/// errors. Floating-point arithmetic follows IEEE 754, so `1.0 / 0.0` is
/// infinity.
///
/// # Example
/// ```
/// use mathex::{
///     ast::BinaryOperator,
///     error::RuntimeError,
///     interpreter::{evaluator::binary::arithmetic::apply_arithmetic, value::core::Value},
/// };
///
/// let r = apply_arithmetic(BinaryOperator::Modulo, Value::Integer(7), Value::Integer(4));
/// assert_eq!(r.unwrap(), Value::Integer(3));
///
/// let r = apply_arithmetic(BinaryOperator::Modulo, Value::Integer(5), Value::Integer(0));
/// assert_eq!(r, Err(RuntimeError::DivisionByZero));
/// ```
pub fn apply_arithmetic(op: BinaryOperator, left: Value, right: Value) -> EvalResult<Value> {
    use BinaryOperator as Op;
    use Value::{ByteArray, Integer, Numeric, String};

    match (op, &left, &right) {
        (Op::Add, Integer(a), Integer(b)) => checked(a.checked_add(*b)),
        (Op::Subtract, Integer(a), Integer(b)) => checked(a.checked_sub(*b)),
        (Op::Multiply, Integer(a), Integer(b)) => checked(a.checked_mul(*b)),
        (Op::Modulo, Integer(_), Integer(0)) => Err(RuntimeError::DivisionByZero),
        (Op::Modulo, Integer(a), Integer(b)) => checked(a.checked_rem(*b)),
        (Op::LeftShift, Integer(a), Integer(b)) => Ok(Integer(a << shift_amount(*b)?)),
        (Op::RightShift, Integer(a), Integer(b)) => Ok(Integer(a >> shift_amount(*b)?)),

        (Op::Add, Numeric(a), Numeric(b)) => Ok(Numeric(a + b)),
        (Op::Subtract, Numeric(a), Numeric(b)) => Ok(Numeric(a - b)),
        (Op::Multiply, Numeric(a), Numeric(b)) => Ok(Numeric(a * b)),
        (Op::Divide, Numeric(a), Numeric(b)) => Ok(Numeric(a / b)),
        (Op::Modulo, Numeric(a), Numeric(b)) => Ok(Numeric(a % b)),
        (Op::Power, Numeric(a), Numeric(b)) => Ok(Numeric(a.powf(*b))),

        (Op::Add, ByteArray(a), ByteArray(b)) => Ok(ByteArray(stitch(a, b))),
        (Op::Add, String(a), String(b)) => Ok(String(format!("{a}{b}"))),

        _ => Err(operand_mismatch(op, &left, &right).into()),
    }
}

fn checked(result: Option<i64>) -> EvalResult<Value> {
    result.map(Value::Integer).ok_or(RuntimeError::Overflow)
}
