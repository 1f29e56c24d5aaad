use std::hash::{Hash, Hasher};

use ordered_float::OrderedFloat;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::kind::SupportedValueType},
    util::{
        bytes::{bytes_to_f64, bytes_to_i64, format_hex},
        num::{f64_to_i64_checked, i64_to_f64_checked},
    },
};

/// Represents a runtime value.
///
/// This enum models the five value kinds that can appear as constants,
/// parameter values, and results of computed expressions.
#[derive(Debug, Clone)]
pub enum Value {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A double precision floating-point number.
    Numeric(f64),
    /// A boolean value, produced by comparisons and logical operators.
    Boolean(bool),
    /// A binary value, written as `0x...` or `0b...` literals.
    ByteArray(Vec<u8>),
    /// A text value, written between string delimiters.
    String(String),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Numeric(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::ByteArray(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Self::ByteArray(v.to_vec())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Numeric(a), Self::Numeric(b)) => OrderedFloat(*a) == OrderedFloat(*b),
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::ByteArray(a), Self::ByteArray(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value_type().hash(state);
        match self {
            Self::Integer(n) => n.hash(state),
            Self::Numeric(r) => OrderedFloat(*r).hash(state),
            Self::Boolean(b) => b.hash(state),
            Self::ByteArray(bytes) => bytes.hash(state),
            Self::String(text) => text.hash(state),
        }
    }
}

impl Value {
    /// Returns the type tag of this value.
    ///
    /// # Example
    /// ```
    /// use mathex::interpreter::{value::core::Value, value::kind::SupportedValueType};
    ///
    /// assert_eq!(Value::from(2.5).value_type(), SupportedValueType::Numeric);
    /// assert_eq!(Value::from("a").value_type(), SupportedValueType::String);
    /// ```
    #[must_use]
    pub const fn value_type(&self) -> SupportedValueType {
        match self {
            Self::Integer(_) => SupportedValueType::Integer,
            Self::Numeric(_) => SupportedValueType::Numeric,
            Self::Boolean(_) => SupportedValueType::Boolean,
            Self::ByteArray(_) => SupportedValueType::ByteArray,
            Self::String(_) => SupportedValueType::String,
        }
    }

    fn invalid_cast(&self, to: SupportedValueType) -> RuntimeError {
        RuntimeError::InvalidCast { value: self.to_string(),
                                    from: self.value_type(),
                                    to }
    }

    /// Converts the value into `target`, following the conversion matrix.
    ///
    /// Conversions that lose information are rejected instead of truncated: a
    /// fractional number never becomes an integer, and a byte array longer
    /// than eight bytes never becomes a number.
    ///
    /// # Parameters
    /// - `target`: The type to convert into.
    ///
    /// # Returns
    /// - `Ok(Value)`: The converted value (a clone when already `target`).
    /// - `Err(RuntimeError::InvalidCast)`: If no exact conversion exists.
    ///
    /// # Example
    /// ```
    /// use mathex::interpreter::{value::core::Value, value::kind::SupportedValueType};
    ///
    /// let x = Value::Integer(10);
    /// assert_eq!(x.convert_to(SupportedValueType::Numeric).unwrap(), Value::Numeric(10.0));
    /// assert_eq!(x.convert_to(SupportedValueType::String).unwrap(), Value::from("10"));
    ///
    /// let fractional = Value::Numeric(1.5);
    /// assert!(fractional.convert_to(SupportedValueType::Integer).is_err());
    /// ```
    pub fn convert_to(&self, target: SupportedValueType) -> EvalResult<Self> {
        use SupportedValueType as T;

        if self.value_type() == target {
            return Ok(self.clone());
        }

        match (self, target) {
            (Self::Integer(n), T::Numeric) => Ok(Self::Numeric(i64_to_f64_checked(*n)?)),
            (Self::Integer(n), T::ByteArray) => Ok(Self::ByteArray(n.to_be_bytes().to_vec())),
            (Self::Numeric(r), T::Integer) => Ok(Self::Integer(f64_to_i64_checked(*r)?)),
            (Self::Numeric(r), T::ByteArray) => Ok(Self::ByteArray(r.to_be_bytes().to_vec())),
            (Self::Boolean(b), T::ByteArray) => Ok(Self::ByteArray(vec![u8::from(*b)])),
            (Self::ByteArray(bytes), T::Integer) => Ok(Self::Integer(bytes_to_i64(bytes)?)),
            (Self::ByteArray(bytes), T::Numeric) => Ok(Self::Numeric(bytes_to_f64(bytes)?)),
            (_, T::String) => Ok(Self::String(self.to_string())),
            _ => Err(self.invalid_cast(target)),
        }
    }

    /// Returns the value as an `i64`, converting if necessary.
    pub fn to_integer(&self) -> EvalResult<i64> {
        match self.convert_to(SupportedValueType::Integer)? {
            Self::Integer(n) => Ok(n),
            _ => Err(self.invalid_cast(SupportedValueType::Integer)),
        }
    }

    /// Returns the value as an `f64`, converting if necessary.
    pub fn to_numeric(&self) -> EvalResult<f64> {
        match self.convert_to(SupportedValueType::Numeric)? {
            Self::Numeric(r) => Ok(r),
            _ => Err(self.invalid_cast(SupportedValueType::Numeric)),
        }
    }

    /// Returns the value as a `bool`. Only booleans qualify.
    ///
    /// Meant for the implementations of registered functions, whose
    /// arguments already have the types of the chosen signature.
    pub fn to_boolean(&self) -> EvalResult<bool> {
        match self {
            Self::Boolean(b) => Ok(*b),
            _ => Err(self.invalid_cast(SupportedValueType::Boolean)),
        }
    }

    /// Returns the value as bytes, converting if necessary.
    pub fn to_bytes(&self) -> EvalResult<Vec<u8>> {
        match self.convert_to(SupportedValueType::ByteArray)? {
            Self::ByteArray(bytes) => Ok(bytes),
            _ => Err(self.invalid_cast(SupportedValueType::ByteArray)),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Numeric(r) => write!(f, "{r}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::ByteArray(bytes) => f.write_str(&format_hex(bytes)),
            Self::String(text) => f.write_str(text),
        }
    }
}
