use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, function::core::numeric_arg},
        value::core::Value,
    },
};

/// Natural logarithm.
///
/// Non-positive arguments are outside the domain.
///
/// # Example
/// ```
/// use mathex::interpreter::{evaluator::function::log::ln, value::core::Value};
///
/// assert_eq!(ln(&[Value::Numeric(1.0)]).unwrap(), Value::Numeric(0.0));
/// assert!(ln(&[Value::Numeric(0.0)]).is_err());
/// ```
pub fn ln(args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Numeric(positive("ln", numeric_arg("ln", args, 0)?)?.ln()))
}

/// Decimal logarithm.
pub fn lg(args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Numeric(positive("lg", numeric_arg("lg", args, 0)?)?.log10()))
}

/// `e` raised to the argument.
pub fn exp(args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Numeric(numeric_arg("exp", args, 0)?.exp()))
}

/// `pow(x, y)`: `x` raised to `y`, like the `^` operator.
pub fn pow(args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Numeric(numeric_arg("pow", args, 0)?.powf(numeric_arg("pow", args, 1)?)))
}

/// Computes the logarithm of a value with respect to a given base.
///
/// `log(value, base) = ln(value) / ln(base)`. A base of one would divide by
/// zero.
///
/// # Example
/// ```
/// use mathex::interpreter::{evaluator::function::log::log, value::core::Value};
///
/// let r = log(&[Value::Numeric(8.0), Value::Numeric(2.0)]).unwrap();
/// assert_eq!(r, Value::Numeric(3.0));
///
/// assert!(log(&[Value::Numeric(8.0), Value::Numeric(1.0)]).is_err());
/// ```
pub fn log(args: &[Value]) -> EvalResult<Value> {
    let value = positive("log", numeric_arg("log", args, 0)?)?;
    let base = positive("log", numeric_arg("log", args, 1)?)?;

    if base == 1.0 {
        return Err(RuntimeError::DivisionByZero);
    }
    if base == 2.0 {
        return Ok(Value::Numeric(value.log2()));
    }
    if base == 10.0 {
        return Ok(Value::Numeric(value.log10()));
    }
    Ok(Value::Numeric(value.ln() / base.ln()))
}

fn positive(name: &str, x: f64) -> EvalResult<f64> {
    if x > 0.0 {
        Ok(x)
    } else {
        Err(RuntimeError::InvalidArgument { details: format!("{name} of non-positive number {x}") })
    }
}
