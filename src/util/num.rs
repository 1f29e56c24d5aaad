use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::kind::SupportedValueType},
};

/// Largest signed integer exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_I64_INT: i64 = 9_007_199_254_740_991;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `RuntimeError::InvalidCast` if the value exceeds
/// `MAX_SAFE_I64_INT` in absolute value.
///
/// ## Example
/// ```
/// use mathex::util::num::{MAX_SAFE_I64_INT, i64_to_f64_checked};
///
/// assert_eq!(i64_to_f64_checked(42).unwrap(), 42.0);
/// assert!(i64_to_f64_checked(MAX_SAFE_I64_INT + 1).is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked(value: i64) -> EvalResult<f64> {
    if value.unsigned_abs() > MAX_SAFE_I64_INT.unsigned_abs() {
        return Err(RuntimeError::InvalidCast { value: value.to_string(),
                                               from:  SupportedValueType::Integer,
                                               to:    SupportedValueType::Numeric, });
    }
    Ok(value as f64)
}

/// Safely converts an `f64` to `i64` if the value is finite, within range, and
/// not fractional.
///
/// Truncation is never applied: `2.5` is rejected rather than turned into `2`.
///
/// ## Errors
/// Returns `RuntimeError::InvalidCast` for non-finite, out-of-range, or
/// fractional values.
///
/// ## Example
/// ```
/// use mathex::{error::RuntimeError, util::num::f64_to_i64_checked};
///
/// assert_eq!(f64_to_i64_checked(1000.0).unwrap(), 1000);
/// assert!(matches!(f64_to_i64_checked(1.5), Err(RuntimeError::InvalidCast { .. })));
/// assert!(f64_to_i64_checked(1e20).is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_i64_checked(value: f64) -> EvalResult<i64> {
    let invalid = || RuntimeError::InvalidCast { value: value.to_string(),
                                                 from:  SupportedValueType::Numeric,
                                                 to:    SupportedValueType::Integer, };
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(invalid());
    }
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    if value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return Err(invalid());
    }
    Ok(value as i64)
}

/// Converts a shift amount into the `u32` expected by `checked_shl` and
/// `checked_shr`.
///
/// ## Errors
/// Returns `RuntimeError::InvalidArgument` for negative amounts or amounts of
/// 64 and above.
pub fn shift_amount(value: i64) -> EvalResult<u32> {
    match u32::try_from(value) {
        Ok(amount) if amount < 64 => Ok(amount),
        _ => Err(RuntimeError::InvalidArgument { details: format!("shift amount {value} is outside 0..64") }),
    }
}
