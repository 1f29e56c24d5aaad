/// Binary operator parsing.
///
/// Scans a symbol text for binary operators, loosest level first and
/// rightmost occurrence first, and builds typed binary nodes.
pub mod binary;

/// The parsing context and the recursive `resolve` entry point.
///
/// Contains the compilation pipeline from raw text to a typed AST.
pub mod core;

/// Function call parsing.
///
/// Splits call arguments and binds the call to a registered function by name
/// and arity.
pub mod function;

/// Operator symbol rewriting.
///
/// Maps every configured operator symbol onto a single marker character.
pub mod operators;

/// Unary operator parsing.
///
/// Handles prefix negation and not.
pub mod unary;
