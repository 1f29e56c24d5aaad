use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, function::core::mismatch},
        resolution::signature::Signature,
        value::{
            core::Value,
            kind::SupportedValueType::{Integer, Numeric},
        },
    },
};

/// Two integers or two floating-point numbers.
pub const PAIR: &[Signature] = &[Signature::new(&[Integer, Integer], Integer, 1), Signature::new(&[Numeric, Numeric], Numeric, 1)];

/// Three integers or three floating-point numbers.
pub const TRIPLE: &[Signature] =
    &[Signature::new(&[Integer, Integer, Integer], Integer, 1), Signature::new(&[Numeric, Numeric, Numeric], Numeric, 1)];

/// Computes the minimum or maximum of two numeric values.
///
/// The operation is selected by the `name` parameter, which must be `"min"` or
/// `"max"`. Both arguments have the same type: type resolution has already
/// converted them.
///
/// # Example
/// ```
/// use mathex::interpreter::{evaluator::function::min_max::min_max, value::core::Value};
///
/// let r = min_max("min", &[Value::Integer(3), Value::Integer(7)]).unwrap();
/// assert_eq!(r, 3.into());
///
/// let r = min_max("max", &[Value::Numeric(2.5), Value::Numeric(1.0)]).unwrap();
/// assert_eq!(r, 2.5.into());
/// ```
pub fn min_max(name: &str, args: &[Value]) -> EvalResult<Value> {
    let pick_min = name == "min";
    match args {
        [Value::Integer(a), Value::Integer(b)] => Ok(Value::Integer(if pick_min { *a.min(b) } else { *a.max(b) })),
        [Value::Numeric(a), Value::Numeric(b)] => Ok(Value::Numeric(if pick_min { a.min(*b) } else { a.max(*b) })),
        _ => Err(mismatch(name, args).into()),
    }
}

/// Restricts a value to the inclusive range `[lo, hi]`.
///
/// # Example
/// ```
/// use mathex::interpreter::{evaluator::function::min_max::clamp, value::core::Value};
///
/// let r = clamp(&[Value::Integer(12), Value::Integer(0), Value::Integer(10)]).unwrap();
/// assert_eq!(r, Value::Integer(10));
///
/// assert!(clamp(&[Value::Integer(1), Value::Integer(5), Value::Integer(0)]).is_err());
/// ```
pub fn clamp(args: &[Value]) -> EvalResult<Value> {
    match args {
        [Value::Integer(x), Value::Integer(lo), Value::Integer(hi)] => {
            check_bounds(lo, hi)?;
            Ok(Value::Integer(*x.clamp(lo, hi)))
        },
        [Value::Numeric(x), Value::Numeric(lo), Value::Numeric(hi)] => {
            check_bounds(lo, hi)?;
            Ok(Value::Numeric(x.clamp(*lo, *hi)))
        },
        _ => Err(mismatch("clamp", args).into()),
    }
}

fn check_bounds<T: PartialOrd + std::fmt::Display>(lo: &T, hi: &T) -> EvalResult<()> {
    if lo <= hi {
        Ok(())
    } else {
        Err(RuntimeError::InvalidArgument { details: format!("clamp bounds {lo} > {hi}") })
    }
}
