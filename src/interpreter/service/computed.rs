use std::{
    collections::{BTreeSet, HashMap},
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

use tracing::debug;

use crate::{
    ast::Node,
    error::{EngineError, ParseError, RuntimeError},
    interpreter::{
        definition::MathDefinition,
        evaluator::core::{EvalResult, Evaluator, Frame},
        parameters::ParameterContext,
        parser::core::ParsedExpression,
        resolution::refine::{node_costs, refine},
        service::finder::DataFinder,
        value::{core::Value, kind::SupportedValueType, tolerance::Tolerance},
    },
};

/// Bound type of every parameter slot plus whether the result is rendered as
/// text. Identifies one compiled evaluator.
type EvaluatorKey = (Vec<Option<SupportedValueType>>, bool);

/// A parameter value supplied positionally, either directly or on demand.
#[derive(Clone)]
pub enum ParameterValue {
    /// A value known up front.
    Immediate(Value),
    /// A callback invoked only if the expression references the parameter.
    Deferred(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl ParameterValue {
    /// Wraps a callback.
    pub fn deferred(callback: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        Self::Deferred(Arc::new(callback))
    }

    fn resolve(&self) -> Value {
        match self {
            Self::Immediate(value) => value.clone(),
            Self::Deferred(callback) => callback(),
        }
    }
}

impl From<Value> for ParameterValue {
    fn from(value: Value) -> Self {
        Self::Immediate(value)
    }
}

impl fmt::Debug for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immediate(value) => f.debug_tuple("Immediate").field(value).finish(),
            Self::Deferred(_) => f.write_str("Deferred"),
        }
    }
}

/// The result of interpreting one expression text.
///
/// A recognized expression holds its typed AST and compiles evaluators on
/// demand, one per combination of parameter value types. Evaluators are
/// immutable once built, so one expression can be computed from many threads
/// at once.
///
/// Computing an unrecognized expression is not an error: it returns the
/// initial text as a [`Value::String`]. The exception is a text whose parse
/// hit an [`EngineError`]; computing it reports that fault.
///
/// # Example
/// ```
/// use mathex::{interpreter::value::core::Value, ExpressionParsingService};
///
/// let service = ExpressionParsingService::new();
///
/// let expression = service.interpret("y + x");
/// assert_eq!(expression.parameter_names(), ["y", "x"]);
/// assert_eq!(expression.compute(None, &[Value::Integer(10), Value::Integer(3)]), Ok(Value::Integer(13)));
///
/// let broken = service.interpret("(1+2");
/// assert!(!broken.recognized_correctly());
/// assert_eq!(broken.compute(None, &[]), Ok(Value::from("(1+2")));
/// ```
pub struct ComputedExpression {
    initial:    String,
    definition: Arc<MathDefinition>,
    parsed:     Option<ParsedExpression>,
    referenced: BTreeSet<String>,
    fault:      Option<EngineError>,
    evaluators: RwLock<HashMap<EvaluatorKey, Arc<Evaluator>>>,
}

impl ComputedExpression {
    pub(crate) fn recognized(initial: &str, definition: Arc<MathDefinition>, parsed: ParsedExpression) -> Self {
        let mut referenced = BTreeSet::new();
        parsed.root.collect_parameters(&mut referenced);
        Self { initial: initial.to_string(),
               definition,
               parsed: Some(parsed),
               referenced,
               fault: None,
               evaluators: RwLock::default() }
    }

    pub(crate) fn unrecognized(initial: &str, definition: Arc<MathDefinition>) -> Self {
        Self { initial: initial.to_string(),
               definition,
               parsed: None,
               referenced: BTreeSet::new(),
               fault: None,
               evaluators: RwLock::default() }
    }

    pub(crate) fn faulted(initial: &str, definition: Arc<MathDefinition>, fault: EngineError) -> Self {
        Self { fault: Some(fault),
               ..Self::unrecognized(initial, definition) }
    }

    /// Returns `true` if the text was parsed into an expression.
    #[must_use]
    pub const fn recognized_correctly(&self) -> bool {
        self.parsed.is_some()
    }

    /// The engine fault that stopped the parse, if any.
    #[must_use]
    pub const fn engine_fault(&self) -> Option<&EngineError> {
        self.fault.as_ref()
    }

    /// The text as it was passed to the service.
    #[must_use]
    pub fn initial_expression(&self) -> &str {
        &self.initial
    }

    /// Parameter names in order of first appearance, which is also the order
    /// of positional values.
    #[must_use]
    pub fn parameter_names(&self) -> Vec<&str> {
        self.parsed
            .as_ref()
            .map(|parsed| parsed.parameters.names().collect())
            .unwrap_or_default()
    }

    /// Returns `true` if the whole expression folded into one constant.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.root().is_some_and(Node::is_constant)
    }

    /// The typed AST, if the text was recognized.
    #[must_use]
    pub fn root(&self) -> Option<&Node> {
        self.parsed.as_ref().map(|parsed| &parsed.root)
    }

    /// Computes the expression with one value per parameter, in the order of
    /// [`ComputedExpression::parameter_names`].
    ///
    /// # Errors
    /// [`RuntimeError::ParameterCountMismatch`] if the number of values is
    /// wrong, [`RuntimeError::TypeMismatch`] if a value type cannot be used,
    /// and any failure of the computation itself. [`RuntimeError::Engine`]
    /// if parsing the text hit an engine fault.
    pub fn compute(&self, tolerance: Option<&Tolerance>, values: &[Value]) -> EvalResult<Value> {
        self.check_fault()?;
        let Some(parsed) = &self.parsed else {
            return Ok(Value::String(self.initial.clone()));
        };
        check_count(parsed, values.len())?;
        self.run(parsed, values.iter().cloned().map(Some).collect(), tolerance, false)
    }

    /// Like [`ComputedExpression::compute`], but deferred values are only
    /// resolved for parameters the expression references.
    ///
    /// # Errors
    /// See [`ComputedExpression::compute`].
    pub fn compute_lazy(&self, tolerance: Option<&Tolerance>, values: &[ParameterValue]) -> EvalResult<Value> {
        self.check_fault()?;
        let Some(parsed) = &self.parsed else {
            return Ok(Value::String(self.initial.clone()));
        };
        check_count(parsed, values.len())?;
        let slots = parsed.parameters
                          .iter()
                          .zip(values)
                          .map(|(parameter, value)| self.is_referenced(parameter).then(|| value.resolve()))
                          .collect();
        self.run(parsed, slots, tolerance, false)
    }

    /// Computes the expression, pulling each referenced parameter from
    /// `finder`.
    ///
    /// # Errors
    /// [`RuntimeError::MissingParameter`] if `finder` has no value for a
    /// referenced parameter, otherwise as [`ComputedExpression::compute`].
    pub fn compute_with_finder(&self, tolerance: Option<&Tolerance>, finder: &dyn DataFinder) -> EvalResult<Value> {
        self.check_fault()?;
        let Some(parsed) = &self.parsed else {
            return Ok(Value::String(self.initial.clone()));
        };
        let mut slots = Vec::with_capacity(parsed.parameters.len());
        for parameter in parsed.parameters.iter() {
            if !self.is_referenced(parameter) {
                slots.push(None);
                continue;
            }
            let value = finder.try_get_data(parameter.name())
                              .ok_or_else(|| RuntimeError::MissingParameter { name: parameter.name().to_string() })?;
            slots.push(Some(value));
        }
        self.run(parsed, slots, tolerance, false)
    }

    /// Computes the expression and renders the result as text.
    ///
    /// The root is compiled at [`SupportedValueType::String`], so the
    /// conversion happens inside the evaluator.
    ///
    /// # Errors
    /// See [`ComputedExpression::compute`].
    pub fn compute_to_string(&self, tolerance: Option<&Tolerance>, values: &[Value]) -> EvalResult<String> {
        self.check_fault()?;
        let Some(parsed) = &self.parsed else {
            return Ok(self.initial.clone());
        };
        check_count(parsed, values.len())?;
        match self.run(parsed, values.iter().cloned().map(Some).collect(), tolerance, true)? {
            Value::String(text) => Ok(text),
            other => Ok(other.to_string()),
        }
    }

    fn check_fault(&self) -> EvalResult<()> {
        match &self.fault {
            Some(fault) => Err(RuntimeError::Engine(fault.clone())),
            None => Ok(()),
        }
    }

    fn is_referenced(&self, parameter: &ParameterContext) -> bool {
        self.referenced.contains(parameter.name())
    }

    fn run(&self,
           parsed: &ParsedExpression,
           slots: Vec<Option<Value>>,
           tolerance: Option<&Tolerance>,
           as_text: bool)
           -> EvalResult<Value> {
        let values = slots.into_iter()
                          .zip(parsed.parameters.iter())
                          .map(|(slot, parameter)| slot.map(|value| admit(parameter, value)).transpose())
                          .collect::<EvalResult<Vec<_>>>()?;
        let key = (values.iter().map(|slot| slot.as_ref().map(Value::value_type)).collect(), as_text);
        let evaluator = self.evaluator(parsed, key)?;
        evaluator.evaluate(&Frame { values,
                                    tolerance: tolerance.copied() })
    }

    fn evaluator(&self, parsed: &ParsedExpression, key: EvaluatorKey) -> EvalResult<Arc<Evaluator>> {
        if let Some(evaluator) = self.evaluators
                                     .read()
                                     .unwrap_or_else(PoisonError::into_inner)
                                     .get(&key)
        {
            return Ok(Arc::clone(evaluator));
        }

        debug!(expression = %self.initial, types = ?key.0, as_text = key.1, "compiling evaluator");
        let built = Arc::new(build_evaluator(parsed, &key)?);
        debug!(expression = %self.initial, output = %built.output_type(), "compiled evaluator");
        let mut evaluators = self.evaluators.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(evaluators.entry(key).or_insert(built)))
    }
}

impl fmt::Debug for ComputedExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComputedExpression")
         .field("initial", &self.initial)
         .field("root", &self.root())
         .finish_non_exhaustive()
    }
}

impl fmt::Display for ComputedExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root() {
            Some(root) => f.write_str(&root.render(&self.definition)),
            None => f.write_str(&self.initial),
        }
    }
}

fn check_count(parsed: &ParsedExpression, found: usize) -> EvalResult<()> {
    let expected = parsed.parameters.len();
    if expected != found {
        return Err(RuntimeError::ParameterCountMismatch { expected, found });
    }
    Ok(())
}

/// Converts `value` into a type `parameter` accepts, preferring the cheapest
/// conversion.
fn admit(parameter: &ParameterContext, value: Value) -> EvalResult<Value> {
    let accepted = parameter.possible_types();
    let from = value.value_type();
    if accepted.contains(from) {
        return Ok(value);
    }
    let target = accepted.iter()
                         .filter_map(|to| from.conversion_cost(to).map(|cost| (to, cost)))
                         .min_by_key(|(_, cost)| *cost)
                         .map(|(to, _)| to)
                         .ok_or_else(|| RuntimeError::TypeMismatch { details: format!("parameter '{}' must be {accepted}, found {from}",
                                                                                      parameter.name()) })?;
    value.convert_to(target)
}

/// Binds every supplied parameter to its value type, re-resolves the costs of
/// a copy of the tree and compiles it.
fn build_evaluator(parsed: &ParsedExpression, (types, as_text): &EvaluatorKey) -> EvalResult<Evaluator> {
    let mismatch = |error: ParseError| RuntimeError::TypeMismatch { details: error.to_string() };

    let mut registry = parsed.parameters.clone();
    let names = parsed.parameters.names().map(str::to_string).collect::<Vec<_>>();
    for (name, ty) in names.iter().zip(types) {
        if let (Some(ty), Some(context)) = (ty, registry.get_mut(name)) {
            context.determine_strongly(*ty).map_err(mismatch)?;
        }
    }

    let mut root = parsed.root.clone();
    refine(&mut root, &registry).map_err(mismatch)?;

    let output = if *as_text {
        SupportedValueType::String
    } else {
        node_costs(&root, &registry).cheapest()
                                    .map(|(ty, _)| ty)
                                    .ok_or_else(|| RuntimeError::TypeMismatch { details: format!("'{root}' cannot produce any value") })?
    };
    Ok(Evaluator::build(&root, output, &registry)?)
}
