/// Cooperative cancellation of an interpretation.
pub mod cancellation;
/// A compiled expression and its computation entry points.
///
/// `ComputedExpression` keeps the typed AST of one source text and compiles
/// one evaluator per combination of parameter value types, caching each.
pub mod computed;
/// The expression parsing service.
///
/// Owns the configuration (math definition, functions, custom extractors and
/// interpreters) and caches compiled expressions by source text.
pub mod core;
/// Pull-based parameter sources.
pub mod finder;

pub use self::{
    cancellation::CancellationToken,
    computed::{ComputedExpression, ParameterValue},
    core::ExpressionParsingService,
    finder::{DataFinder, FinderFn},
};
