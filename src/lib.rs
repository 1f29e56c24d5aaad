//! # mathex
//!
//! mathex is a mathematical expression interpreter written in Rust.
//! It extracts literals from an expression text, parses it into a typed AST,
//! unifies the value types of its operands with a cost-based conversion
//! strategy, folds constant subtrees, and compiles the result into
//! evaluators that can be computed repeatedly with different parameters.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the structure of parsed expressions.
///
/// This module declares the `Node` enum and related types that represent a
/// parsed expression as a typed tree. The AST is built by the parser,
/// simplified by constant folding, and compiled by the evaluator.
///
/// # Responsibilities
/// - Defines constant, parameter, unary, binary and call nodes.
/// - Attaches a cost table to every operation node.
/// - Renders nodes back into expression text.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while extracting,
/// parsing, or computing an expression, as well as faults of the engine
/// itself and failures to register a custom function.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (parser, evaluator, engine).
/// - Carries the offending text or values for context.
/// - Supports integration with standard error handling traits and reporting
///   utilities.
pub mod error;
/// Orchestrates the entire process of expression interpretation.
///
/// This module ties together extraction, lexing, parsing, type resolution,
/// code generation, value representations, and the public service that
/// caches compiled expressions.
///
/// # Responsibilities
/// - Coordinates all core components: extractors, parser, resolver and
///   evaluator.
/// - Provides entry points for interpreting and computing expressions.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion and byte arrays.
///
/// This module provides reusable helpers and conversion routines that are used
/// throughout the extractors, the parser, and the evaluator.
///
/// # Responsibilities
/// - Safely convert between `i64` and `f64` without silent data loss.
/// - Parse, render and combine byte arrays.
pub mod util;

use once_cell::sync::Lazy;

pub use crate::interpreter::{
    definition::MathDefinition,
    service::{CancellationToken, ComputedExpression, DataFinder, ExpressionParsingService, ParameterValue},
    value::{core::Value, kind::SupportedValueType, tolerance::Tolerance},
};
use crate::error::RuntimeError;

static DEFAULT_SERVICE: Lazy<ExpressionParsingService> = Lazy::new(ExpressionParsingService::new);

/// Interprets and computes `text` with a shared default service.
///
/// `values` are the parameter values in order of first appearance. An
/// expression that cannot be recognized computes to its own text.
///
/// # Errors
/// Returns a [`RuntimeError`] if the computation fails.
///
/// # Examples
/// ```
/// use mathex::{compute, Value};
///
/// assert_eq!(compute("2 + 3 * 4", &[]), Ok(Value::Integer(14)));
/// assert_eq!(compute("x / 4", &[Value::Integer(2)]), Ok(Value::Numeric(0.5)));
///
/// // Integer division by zero is a runtime failure.
/// assert!(compute("x % 0", &[Value::Integer(5)]).is_err());
/// ```
pub fn compute(text: &str, values: &[Value]) -> Result<Value, RuntimeError> {
    DEFAULT_SERVICE.interpret(text).compute(None, values)
}
