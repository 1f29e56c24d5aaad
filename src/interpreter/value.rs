/// Value type tags and the conversion-cost matrix.
///
/// Defines `SupportedValueType` (one of the five value kinds), the
/// `SupportableValueType` bitmask used while types are still undecided, and
/// the fixed pairwise conversion costs that drive type unification.
pub mod kind;
/// Tolerance policies for relaxed comparisons.
///
/// A `Tolerance` widens equality and ordering checks between numeric operands
/// by an integer range, a floating-point range, a proportion, or a
/// percentage.
pub mod tolerance;

pub mod core;
