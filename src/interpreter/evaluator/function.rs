/// Single-argument numeric builtins: trigonometry, `abs`, `sqrt`, `sign`.
pub mod builtin;
/// Function definitions, the registry, and the built-in table.
pub mod core;
/// Logarithms and exponentials.
pub mod log;
/// `min`, `max` and `clamp`.
pub mod min_max;
/// Pseudo-random numbers. These functions are never folded.
pub mod random;
/// String functions.
pub mod text;
/// Rounding: `floor`, `ceiling`, `round`, `trunc`.
pub mod trunc;
