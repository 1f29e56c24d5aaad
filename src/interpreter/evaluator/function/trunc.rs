use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::EvalResult,
            function::core::{integer_arg, mismatch, numeric_arg},
        },
        resolution::signature::Signature,
        value::{
            core::Value,
            kind::SupportedValueType::{Integer, Numeric},
        },
    },
};

/// Integers are already whole; floating-point numbers are rounded.
pub const ROUNDING: &[Signature] = &[Signature::new(&[Integer], Integer, 0), Signature::new(&[Numeric], Numeric, 1)];

/// `round(x, digits)`.
pub const ROUND_DIGITS: &[Signature] = &[Signature::new(&[Numeric, Integer], Numeric, 2)];

/// Applies one of the rounding functions to a numeric value.
///
/// Integers are returned unchanged. `round` rounds half away from zero.
///
/// # Example
/// ```
/// use mathex::interpreter::{evaluator::function::trunc::unary_round, value::core::Value};
///
/// assert_eq!(unary_round("floor", &[Value::Numeric(-1.5)]).unwrap(), Value::Numeric(-2.0));
/// assert_eq!(unary_round("ceiling", &[Value::Numeric(1.2)]).unwrap(), Value::Numeric(2.0));
/// assert_eq!(unary_round("round", &[Value::Numeric(2.5)]).unwrap(), Value::Numeric(3.0));
/// assert_eq!(unary_round("trunc", &[Value::Integer(-5)]).unwrap(), Value::Integer(-5));
/// ```
pub fn unary_round(name: &str, args: &[Value]) -> EvalResult<Value> {
    match args {
        [Value::Integer(n)] => Ok(Value::Integer(*n)),
        [Value::Numeric(r)] => {
            let rounded = match name {
                "floor" => r.floor(),
                "ceiling" => r.ceil(),
                "round" => r.round(),
                _ => r.trunc(),
            };
            Ok(Value::Numeric(rounded))
        },
        _ => Err(mismatch(name, args).into()),
    }
}

/// Rounds to a number of decimal digits, which must lie in `0..=15`.
///
/// # Example
/// ```
/// use mathex::interpreter::{evaluator::function::trunc::round_digits, value::core::Value};
///
/// let r = round_digits(&[Value::Numeric(3.14159), Value::Integer(2)]).unwrap();
/// assert_eq!(r, Value::Numeric(3.14));
/// ```
pub fn round_digits(args: &[Value]) -> EvalResult<Value> {
    let x = numeric_arg("round", args, 0)?;
    let digits = integer_arg("round", args, 1)?;
    let Ok(digits @ 0..=15) = i32::try_from(digits) else {
        return Err(RuntimeError::InvalidArgument { details: format!("cannot round to {digits} digits") });
    };
    let scale = 10_f64.powi(digits);
    Ok(Value::Numeric((x * scale).round() / scale))
}
