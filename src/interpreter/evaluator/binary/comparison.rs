use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::{binary::core::operand_mismatch, core::EvalResult},
        value::{core::Value, tolerance::Tolerance},
    },
    util::num::i64_to_f64_checked,
};

/// Maps a comparison operator onto an inclusive interval `[lo, hi]` of values
/// considered equal to the right operand.
///
/// Equality holds inside the interval; `<` and `>` require the left operand
/// to lie strictly outside it.
#[must_use]
pub fn within<T: PartialOrd>(op: BinaryOperator, left: &T, lo: &T, hi: &T) -> bool {
    match op {
        BinaryOperator::Equals => lo <= left && left <= hi,
        BinaryOperator::NotEquals => !(lo <= left && left <= hi),
        BinaryOperator::LessThan => left < lo,
        BinaryOperator::LessThanOrEqual => left <= hi,
        BinaryOperator::GreaterThan => left > hi,
        BinaryOperator::GreaterThanOrEqual => left >= lo,
        _ => false,
    }
}

/// Evaluates a comparison of two operands of the same type.
///
/// Without tolerance, integers, floating-point numbers and strings are
/// ordered naturally; booleans and byte arrays support equality only. With a
/// tolerance, numeric operands are compared against the interval it builds
/// around the right operand. An integer range applies to integers; the
/// floating-point policies apply to both.
///
/// # Example
/// ```
/// use mathex::{
///     ast::BinaryOperator,
///     interpreter::{
///         evaluator::binary::comparison::apply_comparison,
///         value::{core::Value, tolerance::Tolerance},
///     },
/// };
///
/// let loose = Tolerance::range(0.25, 0.25);
/// let r = apply_comparison(BinaryOperator::Equals, &Value::Numeric(2.0), &Value::Numeric(2.25), Some(&loose));
/// assert!(r.unwrap());
///
/// let r = apply_comparison(BinaryOperator::Equals, &Value::Numeric(2.0), &Value::Numeric(2.25), None);
/// assert!(!r.unwrap());
/// ```
pub fn apply_comparison(op: BinaryOperator,
                        left: &Value,
                        right: &Value,
                        tolerance: Option<&Tolerance>)
                        -> EvalResult<bool> {
    let tolerance = tolerance.filter(|t| !t.is_empty());

    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => {
            if let Some(tolerance) = tolerance {
                if let Some((lo, hi)) = tolerance.integer_interval(*b) {
                    return Ok(within(op, a, &lo, &hi));
                }
                if let Some((lo, hi)) = tolerance.numeric_interval(i64_to_f64_checked(*b)?) {
                    return Ok(within(op, &i64_to_f64_checked(*a)?, &lo, &hi));
                }
            }
            Ok(within(op, a, b, b))
        },
        (Value::Numeric(a), Value::Numeric(b)) => {
            if let Some((lo, hi)) = tolerance.and_then(|t| t.numeric_interval(*b)) {
                return Ok(within(op, a, &lo, &hi));
            }
            Ok(within(op, a, b, b))
        },
        (Value::String(a), Value::String(b)) => Ok(within(op, a, b, b)),
        (Value::Boolean(a), Value::Boolean(b)) if is_equality(op) => Ok(within(op, a, b, b)),
        (Value::ByteArray(a), Value::ByteArray(b)) if is_equality(op) => Ok(within(op, a, b, b)),
        _ => Err(operand_mismatch(op, left, right).into()),
    }
}

const fn is_equality(op: BinaryOperator) -> bool {
    matches!(op, BinaryOperator::Equals | BinaryOperator::NotEquals)
}
