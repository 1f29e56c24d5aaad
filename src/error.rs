/// Parsing errors.
///
/// Defines the failures that can occur while extracting literals, splitting
/// symbols, or resolving a symbol into a node. A parse error never reaches the
/// caller of [`crate::ExpressionParsingService::interpret`]; it marks one parse
/// candidate as failed, and an expression without any successful candidate is
/// reported as not recognized.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while computing a compiled
/// expression. Runtime errors include division by zero, overflow, invalid
/// casts between value types, and wrongly supplied parameters.
pub mod runtime_error;
/// Engine errors.
///
/// Broken internal invariants of the mathematics engine, such as a cost table
/// entry that should exist but does not. These are defects and are never
/// swallowed as an ordinary parse failure.
pub mod engine_error;
/// Function registration errors.
pub mod registration_error;

pub use engine_error::EngineError;
pub use parse_error::ParseError;
pub use registration_error::RegistrationError;
pub use runtime_error::RuntimeError;
