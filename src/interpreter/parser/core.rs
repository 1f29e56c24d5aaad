use std::{collections::HashSet, sync::Arc};

use tracing::trace;

use crate::{
    ast::{Node, ParameterNode},
    error::ParseError,
    interpreter::{
        definition::MathDefinition,
        evaluator::function::core::FunctionRegistry,
        extraction::{
            core::{extract_constants, inside_placeholder, ConstantExtractor, ConstantInterpreter, ConstantsTable,
                   PLACEHOLDER_CLOSE, PLACEHOLDER_OPEN},
            named::NamedConstantExtractor,
            number::NumberExtractor,
            string::StringExtractor,
        },
        lexer::{literals, LiteralToken},
        parameters::ParameterRegistry,
        parser::operators::OperatorMarkers,
        resolution::refine::refine,
        service::CancellationToken,
        symbols::{extract_symbols, SymbolTable},
        value::kind::SupportableValueType,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// How deeply operators, groups and calls may nest before parsing gives up.
pub const MAX_NESTING: usize = 128;

/// Everything configurable about parsing, shared by all compilations of one
/// service.
#[derive(Debug, Clone, Copy)]
pub struct ParserSettings<'a> {
    /// Lexical tokens.
    pub definition:   &'a MathDefinition,
    /// Callable functions.
    pub functions:    &'a FunctionRegistry,
    /// Custom literal extractors, run after the built-in ones of lower
    /// priority.
    pub extractors:   &'a [Arc<dyn ConstantExtractor>],
    /// Custom interpreters of otherwise unrecognized text.
    pub interpreters: &'a [Arc<dyn ConstantInterpreter>],
}

/// The result of a successful parse.
#[derive(Debug, Clone)]
pub struct ParsedExpression {
    /// The typed, folded root node.
    pub root:       Node,
    /// The parameters in order of first appearance.
    pub parameters: ParameterRegistry,
}

/// State of one compilation, discarded after the AST is built.
#[derive(Debug)]
pub struct ParsingContext<'a> {
    /// Shared configuration.
    pub settings:     ParserSettings<'a>,
    /// Polled between pipeline steps and symbol resolutions.
    pub cancellation: Option<&'a CancellationToken>,
    /// Operator marker assignment.
    pub markers:      OperatorMarkers,
    /// Extracted constants.
    pub constants:    ConstantsTable,
    /// Extracted groups and calls.
    pub symbols:      SymbolTable,
    /// Parameters and their type constraints.
    pub parameters:   ParameterRegistry,
    /// Texts that failed to resolve, with the parameter masks they failed
    /// under.
    failures:         HashSet<(String, Vec<SupportableValueType>)>,
    /// Current nesting of [`ParsingContext::resolve`].
    depth:            usize,
}

/// Compiles `text` into a typed AST.
///
/// The pipeline is: constant extraction, operator rewriting, parameter
/// registration in textual order, symbol extraction, and recursive
/// resolution of the remaining top-level text.
///
/// # Errors
/// Any [`ParseError`]; the caller treats all but engine errors as "not
/// recognized".
///
/// # Example
/// ```
/// use mathex::interpreter::{
///     definition::MathDefinition,
///     evaluator::function::core::FunctionRegistry,
///     parser::core::{parse_expression, ParserSettings},
///     value::core::Value,
/// };
///
/// let definition = MathDefinition::default();
/// let functions = FunctionRegistry::with_builtins();
/// let settings = ParserSettings { definition: &definition, functions: &functions, extractors: &[], interpreters: &[] };
///
/// let parsed = parse_expression("y + x * 2", settings, None).unwrap();
/// assert_eq!(parsed.parameters.names().collect::<Vec<_>>(), ["y", "x"]);
///
/// let parsed = parse_expression("2 + 3", settings, None).unwrap();
/// assert_eq!(parsed.root.as_constant(), Some(&Value::Integer(5)));
/// ```
pub fn parse_expression(text: &str,
                        settings: ParserSettings<'_>,
                        cancellation: Option<&CancellationToken>)
                        -> ParseResult<ParsedExpression> {
    let mut context = ParsingContext::new(text, settings, cancellation);

    let mut extractors: Vec<&dyn ConstantExtractor> = vec![&StringExtractor, &NumberExtractor, &NamedConstantExtractor];
    for extractor in settings.extractors {
        extractors.push(&**extractor);
    }
    extractors.sort_by_key(|extractor| extractor.priority());

    let extracted = extract_constants(text, &extractors, &mut context.constants, settings.definition, cancellation)?;
    let marked = context.markers.mark(&extracted);
    context.register_parameters(&marked);
    let top_level = extract_symbols(&marked, &mut context.symbols, settings.definition, cancellation)?;
    trace!(top_level = %context.markers.restore(&top_level), "extracted symbols");

    let mut root = context.resolve(&top_level)?;
    refine(&mut root, &context.parameters)?;

    Ok(ParsedExpression { root,
                          parameters: context.parameters })
}

impl<'a> ParsingContext<'a> {
    /// A fresh context for compiling `text`.
    #[must_use]
    pub fn new(text: &str, settings: ParserSettings<'a>, cancellation: Option<&'a CancellationToken>) -> Self {
        Self { settings,
               cancellation,
               markers: OperatorMarkers::new(settings.definition),
               constants: ConstantsTable::new(text),
               symbols: SymbolTable::new(text),
               parameters: ParameterRegistry::default(),
               failures: HashSet::new(),
               depth: 0 }
    }

    /// Fails with [`ParseError::Cancelled`] once cancellation was requested.
    pub fn check_cancelled(&self) -> ParseResult<()> {
        if self.cancellation.is_some_and(CancellationToken::is_cancelled) {
            return Err(ParseError::Cancelled);
        }
        Ok(())
    }

    /// Registers every free identifier of `text` as a parameter, in textual
    /// order.
    ///
    /// Function names (identifiers followed by an open parenthesis),
    /// placeholders, and identifiers a constant interpreter recognizes are
    /// skipped.
    fn register_parameters(&mut self, text: &str) {
        let open = self.settings.definition.open_parenthesis.as_str();
        for (token, span) in literals(text, 0) {
            if token != Ok(LiteralToken::Identifier) || inside_placeholder(text, span.start) {
                continue;
            }
            if text[span.end..].trim_start().starts_with(open) {
                continue;
            }
            let name = &text[span];
            if self.settings.interpreters.iter().any(|interpreter| interpreter.interpret(name).is_some()) {
                continue;
            }
            self.parameters.register(name);
        }
    }

    /// Resolves a symbol text into a node.
    ///
    /// The text is tried, in order, as a constant placeholder, a symbol
    /// placeholder, a parameter, a custom constant, a binary operation and a
    /// unary operation.
    ///
    /// A text that failed once under the current parameter masks fails again
    /// without being re-examined.
    ///
    /// # Errors
    /// [`ParseError::NotRecognized`] if nothing applies; the errors of the
    /// failed candidates are not reported. [`ParseError::NestingTooDeep`]
    /// once more than [`MAX_NESTING`] resolutions are open.
    pub fn resolve(&mut self, text: &str) -> ParseResult<Node> {
        self.check_cancelled()?;
        let text = text.trim();
        if text.is_empty() {
            return Err(ParseError::not_recognized(text));
        }
        if self.depth >= MAX_NESTING {
            return Err(ParseError::NestingTooDeep { limit: MAX_NESTING });
        }

        let key = (text.to_string(), self.parameters.masks());
        if self.failures.contains(&key) {
            return Err(ParseError::not_recognized(self.source_text(text)));
        }

        self.depth += 1;
        let result = self.resolve_uncached(text);
        self.depth -= 1;

        if matches!(&result, Err(e) if !e.is_fatal()) {
            self.failures.insert(key);
        }
        result
    }

    fn resolve_uncached(&mut self, text: &str) -> ParseResult<Node> {
        if let Some(value) = self.constants.get(text) {
            return Ok(Node::constant(value.clone()));
        }
        if let Some(entry) = self.symbols.get(text).cloned() {
            return if entry.is_function_call {
                self.resolve_call(&entry.expression)
            } else {
                self.resolve(&entry.expression)
            };
        }
        if let Some(parameter) = self.parameters.get(text) {
            return Ok(Node::Parameter(ParameterNode { name:  parameter.name().to_string(),
                                                      order: parameter.order(), }));
        }
        if let Some(node) = self.interpret_constant(text) {
            return Ok(node);
        }
        if let Some(node) = self.resolve_binary(text)? {
            return Ok(node);
        }
        if let Some(node) = self.resolve_unary(text)? {
            return Ok(node);
        }

        Err(ParseError::not_recognized(self.source_text(text)))
    }

    /// Offers `text` to the custom constant interpreters.
    fn interpret_constant(&self, text: &str) -> Option<Node> {
        if self.settings.interpreters.is_empty() {
            return None;
        }
        let source = self.source_text(text);
        self.settings
            .interpreters
            .iter()
            .find_map(|interpreter| interpreter.interpret(source.trim()))
            .map(Node::constant)
    }

    /// Expands placeholders and markers back into the text as written.
    #[must_use]
    pub fn source_text(&self, text: &str) -> String {
        let definition = self.settings.definition;
        let mut expanded = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(open) = rest.find(PLACEHOLDER_OPEN) {
            expanded.push_str(&rest[..open]);
            let candidate = &rest[open..];
            let Some(close) = candidate.find(PLACEHOLDER_CLOSE) else {
                expanded.push_str(candidate);
                rest = "";
                break;
            };
            let name = &candidate[..close + PLACEHOLDER_CLOSE.len_utf8()];
            if let Some(literal) = self.constants.literal(name) {
                expanded.push_str(literal);
            } else if let Some(entry) = self.symbols.get(name) {
                let inner = self.source_text(&entry.expression);
                if entry.is_function_call {
                    expanded.push_str(&inner);
                } else {
                    expanded.push_str(&definition.open_parenthesis);
                    expanded.push_str(&inner);
                    expanded.push_str(&definition.close_parenthesis);
                }
            } else {
                expanded.push_str(name);
            }
            rest = &candidate[name.len()..];
        }
        expanded.push_str(rest);

        self.markers.restore(&expanded)
    }
}
