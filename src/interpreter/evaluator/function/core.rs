use std::{collections::HashMap, fmt, sync::Arc};

use crate::{
    error::{EngineError, RegistrationError},
    interpreter::{
        evaluator::{
            core::EvalResult,
            function::{builtin, log, min_max, random, text, trunc},
        },
        resolution::signature::Signature,
        value::core::Value,
    },
};

/// Highest supported number of function arguments.
pub const MAX_ARITY: usize = 3;

/// Type alias for builtin function handlers.
///
/// A builtin receives its arguments already converted to the input types of
/// the signature selected during type resolution.
type BuiltinFn = fn(&[Value]) -> EvalResult<Value>;

/// Shared implementation of a function.
pub type FunctionImpl = Arc<dyn Fn(&[Value]) -> EvalResult<Value> + Send + Sync>;

/// A named function with one or more typed signatures of equal arity.
pub struct FunctionDefinition {
    name:           String,
    signatures:     &'static [Signature],
    implementation: FunctionImpl,
    deterministic:  bool,
}

impl FunctionDefinition {
    /// Creates a deterministic function.
    ///
    /// # Example
    /// ```
    /// use mathex::interpreter::{
    ///     evaluator::function::core::FunctionDefinition,
    ///     resolution::signature::Signature,
    ///     value::{core::Value, kind::SupportedValueType},
    /// };
    ///
    /// const TWICE: &[Signature] = &[Signature::new(&[SupportedValueType::Integer], SupportedValueType::Integer, 1)];
    ///
    /// let twice = FunctionDefinition::new("twice", TWICE, |args: &[Value]| Ok(Value::Integer(args[0].to_integer()? * 2)))
    ///     .unwrap();
    /// assert_eq!(twice.arity(), 1);
    /// ```
    pub fn new(name: impl Into<String>,
               signatures: &'static [Signature],
               implementation: impl Fn(&[Value]) -> EvalResult<Value> + Send + Sync + 'static)
               -> Result<Self, RegistrationError> {
        let name = name.into();
        let valid_name = name.chars().next().is_some_and(|c| c.is_alphabetic() || c == '_')
                         && name.chars().all(|c| c.is_alphanumeric() || c == '_');
        if !valid_name {
            return Err(RegistrationError::InvalidName { name });
        }
        let Some(first) = signatures.first() else {
            return Err(RegistrationError::NoSignatures { name });
        };
        if signatures.iter().any(|signature| signature.arity() != first.arity()) {
            return Err(RegistrationError::InconsistentArity { name });
        }
        if first.arity() > MAX_ARITY {
            return Err(RegistrationError::UnsupportedArity { name,
                                                             arity: first.arity() });
        }

        Ok(Self { name,
                  signatures,
                  implementation: Arc::new(implementation),
                  deterministic: true })
    }

    /// Marks the function as non-deterministic so calls are re-evaluated on
    /// every computation and never folded.
    #[must_use]
    pub const fn non_deterministic(mut self) -> Self {
        self.deterministic = false;
        self
    }

    /// The function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of arguments.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.signatures.first().map_or(0, Signature::arity)
    }

    /// The typed signatures, in preference order.
    #[must_use]
    pub const fn signatures(&self) -> &'static [Signature] {
        self.signatures
    }

    /// The implementation.
    #[must_use]
    pub const fn implementation(&self) -> &FunctionImpl {
        &self.implementation
    }

    /// Returns `false` for functions such as `random`.
    #[must_use]
    pub const fn is_deterministic(&self) -> bool {
        self.deterministic
    }
}

impl fmt::Debug for FunctionDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionDefinition")
         .field("name", &self.name)
         .field("signatures", &self.signatures)
         .field("deterministic", &self.deterministic)
         .finish_non_exhaustive()
    }
}

/// Defines builtin functions by generating a lookup table.
///
/// Each entry provides:
/// - a string name,
/// - the typed signatures, whose arity selects the overload,
/// - a function pointer implementing the builtin,
/// - optionally `deterministic: false`.
///
/// The same name may appear once per arity.
macro_rules! builtin_functions {
    (@deterministic) => { true };
    (@deterministic $value:expr) => { $value };
    (
        $(
            $name:literal => {
                signatures: $signatures:expr,
                func: $func:expr
                $(, deterministic: $deterministic:expr)? $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:          &'static str,
            signatures:    &'static [Signature],
            func:          BuiltinFn,
            deterministic: bool,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef {
                    name:          $name,
                    signatures:    $signatures,
                    func:          $func,
                    deterministic: builtin_functions!(@deterministic $($deterministic)?),
                },
            )*
        ];
    };
}

builtin_functions! {
    "abs"       => { signatures: builtin::INTEGER_OR_NUMERIC, func: builtin::abs },
    "sign"      => { signatures: builtin::INTEGER_OR_NUMERIC, func: builtin::sign },
    "sqrt"      => { signatures: builtin::NUMERIC, func: builtin::sqrt },
    "sin"       => { signatures: builtin::NUMERIC, func: builtin::sin },
    "cos"       => { signatures: builtin::NUMERIC, func: builtin::cos },
    "tan"       => { signatures: builtin::NUMERIC, func: builtin::tan },
    "asin"      => { signatures: builtin::NUMERIC, func: builtin::asin },
    "acos"      => { signatures: builtin::NUMERIC, func: builtin::acos },
    "atan"      => { signatures: builtin::NUMERIC, func: builtin::atan },
    "sinh"      => { signatures: builtin::NUMERIC, func: builtin::sinh },
    "cosh"      => { signatures: builtin::NUMERIC, func: builtin::cosh },
    "tanh"      => { signatures: builtin::NUMERIC, func: builtin::tanh },
    "atan2"     => { signatures: builtin::NUMERIC_PAIR, func: builtin::atan2 },
    "exp"       => { signatures: builtin::NUMERIC, func: log::exp },
    "ln"        => { signatures: builtin::NUMERIC, func: log::ln },
    "lg"        => { signatures: builtin::NUMERIC, func: log::lg },
    "log"       => { signatures: builtin::NUMERIC_PAIR, func: log::log },
    "pow"       => { signatures: builtin::NUMERIC_PAIR, func: log::pow },
    "floor"     => { signatures: trunc::ROUNDING, func: |args| trunc::unary_round("floor", args) },
    "ceiling"   => { signatures: trunc::ROUNDING, func: |args| trunc::unary_round("ceiling", args) },
    "round"     => { signatures: trunc::ROUNDING, func: |args| trunc::unary_round("round", args) },
    "trunc"     => { signatures: trunc::ROUNDING, func: |args| trunc::unary_round("trunc", args) },
    "round"     => { signatures: trunc::ROUND_DIGITS, func: trunc::round_digits },
    "min"       => { signatures: min_max::PAIR, func: |args| min_max::min_max("min", args) },
    "max"       => { signatures: min_max::PAIR, func: |args| min_max::min_max("max", args) },
    "clamp"     => { signatures: min_max::TRIPLE, func: min_max::clamp },
    "strlen"    => { signatures: text::STRLEN, func: text::strlen },
    "trim"      => { signatures: text::TEXT, func: text::trim },
    "lower"     => { signatures: text::TEXT, func: text::lower },
    "upper"     => { signatures: text::TEXT, func: text::upper },
    "substr"    => { signatures: text::SUBSTR_FROM, func: text::substr },
    "substr"    => { signatures: text::SUBSTR_RANGE, func: text::substr },
    "replace"   => { signatures: text::REPLACE, func: text::replace },
    "random"    => { signatures: random::NUMERIC_NONE, func: random::random, deterministic: false },
    "random"    => { signatures: random::NUMERIC_MAX, func: random::random, deterministic: false },
    "randomint" => { signatures: random::INTEGER_NONE, func: random::random_int, deterministic: false },
    "randomint" => { signatures: random::INTEGER_MAX, func: random::random_int, deterministic: false },
    "randomint" => { signatures: random::INTEGER_RANGE, func: random::random_int, deterministic: false },
}

/// Functions callable from expressions, keyed by name and arity.
///
/// # Example
/// ```
/// use mathex::interpreter::evaluator::function::core::FunctionRegistry;
///
/// let registry = FunctionRegistry::with_builtins();
/// assert!(registry.lookup("round", 1).is_some());
/// assert!(registry.lookup("round", 2).is_some());
/// assert!(registry.lookup("round", 3).is_none());
/// assert!(registry.is_function_name("substr"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    by_arity: [HashMap<String, Arc<FunctionDefinition>>; MAX_ARITY + 1],
}

impl FunctionRegistry {
    /// A registry containing every built-in function.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::default();
        for builtin in BUILTIN_TABLE {
            let arity = builtin.signatures.first().map_or(0, Signature::arity);
            let definition = FunctionDefinition { name:           builtin.name.to_string(),
                                                  signatures:     builtin.signatures,
                                                  implementation: Arc::new(builtin.func),
                                                  deterministic:  builtin.deterministic, };
            registry.by_arity[arity].insert(builtin.name.to_string(), Arc::new(definition));
        }
        registry
    }

    /// Adds a function, replacing any function with the same name and arity.
    pub fn register(&mut self, definition: FunctionDefinition) {
        let arity = definition.arity();
        self.by_arity[arity].insert(definition.name.clone(), Arc::new(definition));
    }

    /// Finds the function called `name` taking `arity` arguments.
    #[must_use]
    pub fn lookup(&self, name: &str, arity: usize) -> Option<Arc<FunctionDefinition>> {
        self.by_arity.get(arity).and_then(|table| table.get(name)).cloned()
    }

    /// Returns `true` if any arity of `name` exists.
    #[must_use]
    pub fn is_function_name(&self, name: &str) -> bool {
        self.by_arity.iter().any(|table| table.contains_key(name))
    }

    /// Iterates over every registered function.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<FunctionDefinition>> {
        self.by_arity.iter().flat_map(HashMap::values)
    }
}

/// Returns argument `index` of a call of `name`.
pub(crate) fn arg<'a>(name: &str, args: &'a [Value], index: usize) -> EvalResult<&'a Value> {
    args.get(index).ok_or_else(|| mismatch(name, args).into())
}

/// Returns argument `index` as a floating-point number.
pub(crate) fn numeric_arg(name: &str, args: &[Value], index: usize) -> EvalResult<f64> {
    match arg(name, args, index)? {
        Value::Numeric(r) => Ok(*r),
        _ => Err(mismatch(name, args).into()),
    }
}

/// Returns argument `index` as an integer.
pub(crate) fn integer_arg(name: &str, args: &[Value], index: usize) -> EvalResult<i64> {
    match arg(name, args, index)? {
        Value::Integer(n) => Ok(*n),
        _ => Err(mismatch(name, args).into()),
    }
}

/// Returns argument `index` as a string slice.
pub(crate) fn text_arg<'a>(name: &str, args: &'a [Value], index: usize) -> EvalResult<&'a str> {
    match arg(name, args, index)? {
        Value::String(text) => Ok(text.as_str()),
        _ => Err(mismatch(name, args).into()),
    }
}

/// Error for arguments matching none of the function's signatures.
pub(crate) fn mismatch(name: &str, args: &[Value]) -> EngineError {
    EngineError::OperandMismatch { operation: name.to_string(),
                                   operands:  args.iter()
                                                  .map(|value| value.value_type().to_string())
                                                  .collect::<Vec<_>>()
                                                  .join(", "), }
}
