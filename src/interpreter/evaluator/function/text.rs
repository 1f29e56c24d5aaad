use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::EvalResult,
            function::core::{integer_arg, text_arg},
        },
        resolution::signature::Signature,
        value::{
            core::Value,
            kind::SupportedValueType::{Integer, String},
        },
    },
};

/// `strlen(s)`.
pub const STRLEN: &[Signature] = &[Signature::new(&[String], Integer, 1)];

/// One string in, one string out.
pub const TEXT: &[Signature] = &[Signature::new(&[String], String, 1)];

/// `substr(s, start)`.
pub const SUBSTR_FROM: &[Signature] = &[Signature::new(&[String, Integer], String, 2)];

/// `substr(s, start, length)`.
pub const SUBSTR_RANGE: &[Signature] = &[Signature::new(&[String, Integer, Integer], String, 2)];

/// `replace(s, what, with)`.
pub const REPLACE: &[Signature] = &[Signature::new(&[String, String, String], String, 3)];

/// Number of characters in a string.
///
/// # Example
/// ```
/// use mathex::interpreter::{evaluator::function::text::strlen, value::core::Value};
///
/// assert_eq!(strlen(&[Value::from("héllo")]).unwrap(), Value::Integer(5));
/// ```
pub fn strlen(args: &[Value]) -> EvalResult<Value> {
    let count = text_arg("strlen", args, 0)?.chars().count();
    i64::try_from(count).map(Value::Integer).map_err(|_| RuntimeError::Overflow)
}

/// Removes leading and trailing whitespace.
pub fn trim(args: &[Value]) -> EvalResult<Value> {
    Ok(Value::from(text_arg("trim", args, 0)?.trim()))
}

/// Lower-cases a string.
pub fn lower(args: &[Value]) -> EvalResult<Value> {
    Ok(Value::String(text_arg("lower", args, 0)?.to_lowercase()))
}

/// Upper-cases a string.
pub fn upper(args: &[Value]) -> EvalResult<Value> {
    Ok(Value::String(text_arg("upper", args, 0)?.to_uppercase()))
}

/// Extracts a substring by character position.
///
/// With two arguments the rest of the string from `start` is returned; with
/// three, `length` characters. Positions past the end are invalid arguments.
///
/// # Example
/// ```
/// use mathex::interpreter::{evaluator::function::text::substr, value::core::Value};
///
/// let r = substr(&[Value::from("abalaportocala"), Value::Integer(2)]).unwrap();
/// assert_eq!(r, Value::from("alaportocala"));
///
/// let r = substr(&[Value::from("abalaportocala"), Value::Integer(2), Value::Integer(3)]).unwrap();
/// assert_eq!(r, Value::from("ala"));
///
/// assert!(substr(&[Value::from("abc"), Value::Integer(4)]).is_err());
/// ```
pub fn substr(args: &[Value]) -> EvalResult<Value> {
    let text = text_arg("substr", args, 0)?;
    let total = text.chars().count();
    let start = position("substr start", integer_arg("substr", args, 1)?, total)?;

    let length = if args.len() > 2 {
        position("substr length", integer_arg("substr", args, 2)?, total - start)?
    } else {
        total - start
    };

    Ok(Value::String(text.chars().skip(start).take(length).collect()))
}

/// Replaces every occurrence of `what` with `with`.
///
/// # Example
/// ```
/// use mathex::interpreter::{evaluator::function::text::replace, value::core::Value};
///
/// let r = replace(&[Value::from("a-b-c"), Value::from("-"), Value::from("+")]).unwrap();
/// assert_eq!(r, Value::from("a+b+c"));
/// ```
pub fn replace(args: &[Value]) -> EvalResult<Value> {
    let text = text_arg("replace", args, 0)?;
    let what = text_arg("replace", args, 1)?;
    let with = text_arg("replace", args, 2)?;
    if what.is_empty() {
        return Err(RuntimeError::InvalidArgument { details: "replace pattern is empty".to_string() });
    }
    Ok(Value::String(text.replace(what, with)))
}

/// Converts `value` to an index not beyond `limit`.
fn position(what: &str, value: i64, limit: usize) -> EvalResult<usize> {
    usize::try_from(value).ok()
                          .filter(|index| *index <= limit)
                          .ok_or_else(|| RuntimeError::InvalidArgument { details: format!("{what} {value} is outside 0..={limit}") })
}
