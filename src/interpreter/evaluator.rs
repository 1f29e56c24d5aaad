/// Binary operator evaluation logic.
///
/// Handles arithmetic, shifts, logical and bitwise operators, and tolerant
/// comparisons on operands already unified to a common type.
pub mod binary;

/// Code generation and compiled evaluators.
///
/// Turns a typed AST into a tree of closures, one per node, each producing
/// its value in the type its parent asked for.
pub mod core;

/// Function evaluation.
///
/// Holds the function registry, the built-in function table, and the
/// implementations of built-in functions.
pub mod function;

/// Constant folding.
pub mod simplify;

/// Unary operator evaluation logic.
///
/// Implements negation and logical/bitwise not.
pub mod unary;
