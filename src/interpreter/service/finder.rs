use std::collections::HashMap;

use crate::interpreter::value::core::Value;

/// Supplies parameter values by name, on demand.
///
/// Only parameters the expression still references after folding are
/// requested.
pub trait DataFinder {
    /// Returns the value of `name`, or `None` if it is unknown.
    fn try_get_data(&self, name: &str) -> Option<Value>;
}

impl DataFinder for HashMap<String, Value> {
    fn try_get_data(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl DataFinder for HashMap<&str, Value> {
    fn try_get_data(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

/// Adapts a closure into a [`DataFinder`].
///
/// # Example
/// ```
/// use mathex::{
///     interpreter::{service::FinderFn, value::core::Value},
///     ExpressionParsingService,
/// };
///
/// let service = ExpressionParsingService::new();
/// let expression = service.interpret("width * height");
/// let finder = FinderFn(|name: &str| match name {
///     "width" => Some(Value::Integer(3)),
///     "height" => Some(Value::Integer(4)),
///     _ => None,
/// });
/// assert_eq!(expression.compute_with_finder(None, &finder), Ok(Value::Integer(12)));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FinderFn<F>(pub F);

impl<F> DataFinder for FinderFn<F> where F: Fn(&str) -> Option<Value>
{
    fn try_get_data(&self, name: &str) -> Option<Value> {
        (self.0)(name)
    }
}
