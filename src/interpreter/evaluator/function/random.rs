use std::sync::Mutex;

use once_cell::sync::Lazy;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::EvalResult,
            function::core::{integer_arg, numeric_arg},
        },
        resolution::signature::Signature,
        value::{
            core::Value,
            kind::SupportedValueType::{Integer, Numeric},
        },
    },
};

/// `random()`.
pub const NUMERIC_NONE: &[Signature] = &[Signature::new(&[], Numeric, 1)];

/// `random(max)`.
pub const NUMERIC_MAX: &[Signature] = &[Signature::new(&[Numeric], Numeric, 1)];

/// `randomint()`.
pub const INTEGER_NONE: &[Signature] = &[Signature::new(&[], Integer, 1)];

/// `randomint(max)`.
pub const INTEGER_MAX: &[Signature] = &[Signature::new(&[Integer], Integer, 1)];

/// `randomint(min, max)`.
pub const INTEGER_RANGE: &[Signature] = &[Signature::new(&[Integer, Integer], Integer, 1)];

/// Generator shared by every evaluator.
static GENERATOR: Lazy<Mutex<StdRng>> = Lazy::new(|| Mutex::new(StdRng::from_entropy()));

fn with_generator<T>(draw: impl FnOnce(&mut StdRng) -> T) -> T {
    let mut generator = GENERATOR.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    draw(&mut generator)
}

/// A floating-point number in `[0, 1)`, or `[0, max)` when `max` is given.
///
/// # Example
/// ```
/// use mathex::interpreter::{evaluator::function::random::random, value::core::Value};
///
/// let Value::Numeric(r) = random(&[Value::Numeric(10.0)]).unwrap() else { panic!() };
/// assert!((0.0..10.0).contains(&r));
/// ```
pub fn random(args: &[Value]) -> EvalResult<Value> {
    let max = if args.is_empty() { 1.0 } else { numeric_arg("random", args, 0)? };
    if !(max.is_finite() && max > 0.0) {
        return Err(RuntimeError::InvalidArgument { details: format!("random upper bound {max} must be positive") });
    }
    Ok(Value::Numeric(with_generator(|generator| generator.gen_range(0.0..max))))
}

/// A non-negative integer below `i32::MAX`, below `max`, or in `[min, max)`.
///
/// # Example
/// ```
/// use mathex::interpreter::{evaluator::function::random::random_int, value::core::Value};
///
/// let Value::Integer(n) = random_int(&[Value::Integer(3), Value::Integer(6)]).unwrap() else { panic!() };
/// assert!((3..6).contains(&n));
///
/// assert!(random_int(&[Value::Integer(6), Value::Integer(6)]).is_err());
/// ```
pub fn random_int(args: &[Value]) -> EvalResult<Value> {
    let (min, max) = match args.len() {
        0 => (0, i64::from(i32::MAX)),
        1 => (0, integer_arg("randomint", args, 0)?),
        _ => (integer_arg("randomint", args, 0)?, integer_arg("randomint", args, 1)?),
    };
    if min >= max {
        return Err(RuntimeError::InvalidArgument { details: format!("randomint range {min}..{max} is empty") });
    }
    Ok(Value::Integer(with_generator(|generator| generator.gen_range(min..max))))
}
