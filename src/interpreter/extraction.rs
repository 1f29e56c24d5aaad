/// The extraction driver, the constants table and the extension traits.
///
/// Extraction replaces literal text with placeholders before parsing, so the
/// parser only ever sees placeholders, operators, parentheses and
/// identifiers.
pub mod core;
/// Named constants such as `pi` and `true`.
pub mod named;
/// Decimal, floating-point, hexadecimal and binary literals.
pub mod number;
/// Quoted string literals.
pub mod string;
