use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::EvalResult,
            function::core::{mismatch, numeric_arg},
        },
        resolution::signature::Signature,
        value::{
            core::Value,
            kind::SupportedValueType::{Integer, Numeric},
        },
    },
};

/// One integer or one floating-point argument, result of the same type.
pub const INTEGER_OR_NUMERIC: &[Signature] = &[Signature::new(&[Integer], Integer, 1), Signature::new(&[Numeric], Numeric, 1)];

/// One floating-point argument.
pub const NUMERIC: &[Signature] = &[Signature::new(&[Numeric], Numeric, 3)];

/// Two floating-point arguments.
pub const NUMERIC_PAIR: &[Signature] = &[Signature::new(&[Numeric, Numeric], Numeric, 3)];

/// Applies a unary `f64` function to the single floating-point argument.
///
/// # Example
/// ```
/// use mathex::interpreter::{evaluator::function::builtin::sin, value::core::Value};
///
/// let x = Value::Numeric(std::f64::consts::PI / 2.0);
/// assert_eq!(sin(&[x]).unwrap(), Value::Numeric(1.0));
/// ```
macro_rules! numeric_builtin {
    ($fname:ident, $real_fn:ident) => {
        pub fn $fname(args: &[Value]) -> EvalResult<Value> {
            Ok(Value::Numeric(numeric_arg(stringify!($fname), args, 0)?.$real_fn()))
        }
    };
}

numeric_builtin!(sin, sin);
numeric_builtin!(cos, cos);
numeric_builtin!(tan, tan);
numeric_builtin!(asin, asin);
numeric_builtin!(acos, acos);
numeric_builtin!(atan, atan);
numeric_builtin!(sinh, sinh);
numeric_builtin!(cosh, cosh);
numeric_builtin!(tanh, tanh);

/// Absolute value. Integers stay integers; `abs` of the minimum integer
/// overflows.
///
/// # Example
/// ```
/// use mathex::interpreter::{evaluator::function::builtin::abs, value::core::Value};
///
/// assert_eq!(abs(&[Value::Integer(-3)]).unwrap(), Value::Integer(3));
/// assert_eq!(abs(&[Value::Numeric(-0.5)]).unwrap(), Value::Numeric(0.5));
/// ```
pub fn abs(args: &[Value]) -> EvalResult<Value> {
    match args {
        [Value::Integer(n)] => n.checked_abs().map(Value::Integer).ok_or(RuntimeError::Overflow),
        [Value::Numeric(r)] => Ok(Value::Numeric(r.abs())),
        _ => Err(mismatch("abs", args).into()),
    }
}

/// Returns `-1`, `0` or `1` according to the sign of the argument.
///
/// # Example
/// ```
/// use mathex::interpreter::{evaluator::function::builtin::sign, value::core::Value};
///
/// assert_eq!(sign(&[Value::Integer(-7)]).unwrap(), Value::Integer(-1));
/// assert_eq!(sign(&[Value::Numeric(0.0)]).unwrap(), Value::Numeric(0.0));
/// ```
pub fn sign(args: &[Value]) -> EvalResult<Value> {
    match args {
        [Value::Integer(n)] => Ok(Value::Integer(n.signum())),
        [Value::Numeric(r)] if *r == 0.0 || r.is_nan() => Ok(Value::Numeric(*r)),
        [Value::Numeric(r)] => Ok(Value::Numeric(r.signum())),
        _ => Err(mismatch("sign", args).into()),
    }
}

/// Square root. Negative arguments are outside the domain.
///
/// # Example
/// ```
/// use mathex::interpreter::{evaluator::function::builtin::sqrt, value::core::Value};
///
/// assert_eq!(sqrt(&[Value::Numeric(9.0)]).unwrap(), Value::Numeric(3.0));
/// assert!(sqrt(&[Value::Numeric(-1.0)]).is_err());
/// ```
pub fn sqrt(args: &[Value]) -> EvalResult<Value> {
    let x = numeric_arg("sqrt", args, 0)?;
    if x < 0.0 {
        return Err(RuntimeError::InvalidArgument { details: format!("sqrt of negative number {x}") });
    }
    Ok(Value::Numeric(x.sqrt()))
}

/// Four-quadrant arctangent of `y / x`.
pub fn atan2(args: &[Value]) -> EvalResult<Value> {
    let y = numeric_arg("atan2", args, 0)?;
    let x = numeric_arg("atan2", args, 1)?;
    Ok(Value::Numeric(y.atan2(x)))
}
