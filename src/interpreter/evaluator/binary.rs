/// Integer and floating-point arithmetic, concatenation and byte stitching.
pub mod arithmetic;
/// Logical and bitwise `&`, `|` and `#`.
pub mod bitwise;
/// Equality and ordering, with optional tolerance.
pub mod comparison;
/// Dispatch of binary operators.
pub mod core;
