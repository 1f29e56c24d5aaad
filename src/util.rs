/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between integer and
/// floating-point types without risking silent data loss or rounding errors.
/// All functions return a `Result`, which is `Ok` if the conversion is lossless
/// and an `InvalidCast` error otherwise.
pub mod num;
/// Byte array helpers.
///
/// Parsing of hexadecimal and binary digit strings into big-endian byte
/// arrays, the inverse hex rendering, and the bytewise operations shared by
/// constant folding and generated evaluators.
pub mod bytes;
