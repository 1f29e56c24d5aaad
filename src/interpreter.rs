/// The configurable lexical tokens of the expression language.
///
/// A `MathDefinition` names the parentheses, the argument separator, the
/// string delimiter and escape character, and the symbol of every operator.
/// It can be loaded from JSON.
pub mod definition;
/// The evaluator module turns typed AST nodes into executable closures.
///
/// The code generator compiles each node at the value type its parent
/// requested, using the signature chosen during type resolution. The same
/// generator folds constant subtrees while parsing.
///
/// # Responsibilities
/// - Implements every operator and built-in function on `Value`s.
/// - Applies tolerances to comparisons.
/// - Reports runtime errors such as division by zero or invalid casts.
pub mod evaluator;
/// Replaces literals in raw expression text with placeholders.
///
/// Strings, numbers, byte arrays and named constants are recognized by
/// prioritized extractors; custom extractors can be registered.
pub mod extraction;
/// The lexer module recognizes literals inside raw expression text.
///
/// The `logos` lexer finds numeric, hexadecimal and binary literals and
/// identifiers. Extraction uses it to locate constants and the parser to
/// locate parameter names.
pub mod lexer;
/// External parameters and their type constraints.
pub mod parameters;
/// The parser module resolves placeholder text into a typed AST.
///
/// Operators are located by precedence level and position, and every
/// candidate split is type checked as it is built. A candidate that fails is
/// abandoned and the next one is tried.
///
/// # Responsibilities
/// - Registers parameters in order of first appearance.
/// - Resolves groups, function calls, binary and unary operations.
/// - Rejects logically invalid operand combinations.
pub mod parser;
/// Cost-based type resolution.
///
/// Signatures describe what every operation accepts and produces; cost
/// tables record the cheapest way for a node to produce each value type.
pub mod resolution;
/// The public entry points: the parsing service and computed expressions.
pub mod service;
/// Extraction of parenthesized groups and function calls.
pub mod symbols;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the value kinds used during computation: integers,
/// floating-point numbers, booleans, byte arrays and strings. It also
/// provides the conversions between them and the tolerance policies used by
/// comparisons.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements conversions and their costs.
/// - Provides tolerance intervals for relaxed comparisons.
pub mod value;
