use std::{
    collections::HashMap,
    sync::{Arc, Mutex, OnceLock, PoisonError},
};

use tracing::{debug, error};

use crate::{
    error::ParseError,
    interpreter::{
        definition::{DefinitionError, MathDefinition},
        evaluator::function::core::{FunctionDefinition, FunctionRegistry},
        extraction::core::{ConstantExtractor, ConstantInterpreter},
        parser::core::{parse_expression, ParserSettings},
        service::{cancellation::CancellationToken, computed::ComputedExpression},
    },
};

type CacheSlot = Arc<OnceLock<Arc<ComputedExpression>>>;

/// Interprets expression texts into [`ComputedExpression`]s.
///
/// The service owns the grammar, the function registry and the custom
/// extension points. Every distinct text is compiled at most once; later
/// calls with the same text return the cached expression, even when they
/// race. Registering an extension clears the cache.
///
/// # Example
/// ```
/// use std::sync::Arc;
///
/// use mathex::{interpreter::value::core::Value, ExpressionParsingService};
///
/// let service = ExpressionParsingService::new();
/// let first = service.interpret("2 + 3 * 4");
/// let second = service.interpret("2 + 3 * 4");
///
/// assert!(Arc::ptr_eq(&first, &second));
/// assert_eq!(first.compute(None, &[]), Ok(Value::Integer(14)));
/// ```
#[derive(Debug)]
pub struct ExpressionParsingService {
    definition:   Arc<MathDefinition>,
    functions:    FunctionRegistry,
    extractors:   Vec<Arc<dyn ConstantExtractor>>,
    interpreters: Vec<Arc<dyn ConstantInterpreter>>,
    cache:        Mutex<HashMap<String, CacheSlot>>,
}

impl Default for ExpressionParsingService {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionParsingService {
    /// A service using the default grammar and the built-in functions.
    #[must_use]
    pub fn new() -> Self {
        Self { definition:   Arc::new(MathDefinition::default()),
               functions:    FunctionRegistry::with_builtins(),
               extractors:   Vec::new(),
               interpreters: Vec::new(),
               cache:        Mutex::default(), }
    }

    /// A service using a custom grammar.
    ///
    /// # Errors
    /// Returns a [`DefinitionError`] if the grammar is ambiguous.
    ///
    /// # Example
    /// ```
    /// use mathex::{
    ///     interpreter::{definition::MathDefinition, value::core::Value},
    ///     ExpressionParsingService,
    /// };
    ///
    /// let definition = MathDefinition { power_symbol: "**".to_string(),
    ///                                   parameter_separator: ";".to_string(),
    ///                                   ..MathDefinition::default() };
    /// let service = ExpressionParsingService::with_definition(definition).unwrap();
    ///
    /// assert_eq!(service.interpret("max(2 ** 3; 5)").compute(None, &[]), Ok(Value::Numeric(8.0)));
    /// ```
    pub fn with_definition(definition: MathDefinition) -> Result<Self, DefinitionError> {
        definition.validate()?;
        Ok(Self { definition: Arc::new(definition),
                  ..Self::new() })
    }

    /// The grammar in use.
    #[must_use]
    pub fn definition(&self) -> &MathDefinition {
        &self.definition
    }

    /// The callable functions.
    #[must_use]
    pub const fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    /// Interprets `text`, returning the cached result if it was seen before.
    ///
    /// Failing to recognize the text is not an error; the returned expression
    /// reports it through [`ComputedExpression::recognized_correctly`].
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn interpret(&self, text: &str) -> Arc<ComputedExpression> {
        let slot = {
            let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(cache.entry(text.to_string()).or_default())
        };
        Arc::clone(slot.get_or_init(|| {
                           debug!("cache miss");
                           Arc::new(self.compile(text, None))
                       }))
    }

    /// Interprets `text`, giving up once `cancellation` fires.
    ///
    /// A cancelled interpretation yields an unrecognized expression and is
    /// not cached. A completed one is cached as by
    /// [`ExpressionParsingService::interpret`].
    ///
    /// # Example
    /// ```
    /// use mathex::{interpreter::service::CancellationToken, ExpressionParsingService};
    ///
    /// let service = ExpressionParsingService::new();
    /// let token = CancellationToken::new();
    /// token.cancel();
    ///
    /// assert!(!service.interpret_with_cancellation("1 + 2", &token).recognized_correctly());
    /// assert!(service.interpret("1 + 2").recognized_correctly());
    /// ```
    pub fn interpret_with_cancellation(&self, text: &str, cancellation: &CancellationToken) -> Arc<ComputedExpression> {
        let cached = self.cache
                         .lock()
                         .unwrap_or_else(PoisonError::into_inner)
                         .get(text)
                         .and_then(|slot| slot.get().cloned());
        if let Some(expression) = cached {
            return expression;
        }

        let expression = Arc::new(self.compile(text, Some(cancellation)));
        if cancellation.is_cancelled() {
            debug!(text, "interpretation cancelled");
            return expression;
        }

        let slot = {
            let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(cache.entry(text.to_string()).or_default())
        };
        Arc::clone(slot.get_or_init(|| expression))
    }

    /// Adds a custom literal extractor.
    pub fn register_constant_extractor(&mut self, extractor: impl ConstantExtractor + 'static) {
        self.extractors.push(Arc::new(extractor));
        self.extractors.sort_by_key(|extractor| extractor.priority());
        self.clear_cache();
    }

    /// Adds a custom interpreter of otherwise unrecognized text.
    pub fn register_constant_interpreter(&mut self, interpreter: impl ConstantInterpreter + 'static) {
        self.interpreters.push(Arc::new(interpreter));
        self.clear_cache();
    }

    /// Adds a function, replacing a built-in of the same name and arity.
    ///
    /// # Example
    /// ```
    /// use mathex::{
    ///     interpreter::{
    ///         evaluator::function::core::FunctionDefinition,
    ///         resolution::signature::Signature,
    ///         value::{core::Value, kind::SupportedValueType::Numeric},
    ///     },
    ///     ExpressionParsingService,
    /// };
    ///
    /// const HYPOT: &[Signature] = &[Signature::new(&[Numeric, Numeric], Numeric, 2)];
    ///
    /// let mut service = ExpressionParsingService::new();
    /// service.register_function(FunctionDefinition::new("hypot", HYPOT, |args: &[Value]| {
    ///            Ok(Value::Numeric(args[0].to_numeric()?.hypot(args[1].to_numeric()?)))
    ///        }).unwrap());
    ///
    /// assert_eq!(service.interpret("hypot(3, 4)").compute(None, &[]), Ok(Value::Numeric(5.0)));
    /// ```
    pub fn register_function(&mut self, function: FunctionDefinition) {
        self.functions.register(function);
        self.clear_cache();
    }

    /// Forgets every cached expression.
    pub fn clear_cache(&self) {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    fn compile(&self, text: &str, cancellation: Option<&CancellationToken>) -> ComputedExpression {
        let settings = ParserSettings { definition:   &self.definition,
                                        functions:    &self.functions,
                                        extractors:   &self.extractors,
                                        interpreters: &self.interpreters, };

        match parse_expression(text, settings, cancellation) {
            Ok(parsed) => ComputedExpression::recognized(text, Arc::clone(&self.definition), parsed),
            Err(ParseError::Engine(fault)) => {
                error!(text, %fault, "mathematics engine fault");
                ComputedExpression::faulted(text, Arc::clone(&self.definition), fault)
            },
            Err(failure) => {
                debug!(text, %failure, "expression not recognized");
                ComputedExpression::unrecognized(text, Arc::clone(&self.definition))
            },
        }
    }
}
