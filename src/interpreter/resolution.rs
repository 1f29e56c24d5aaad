/// Cost tables and the cheapest-signature search.
///
/// Every typed node carries a `CostTable`: for each of the five value types,
/// the cheapest total cost of producing the node's result in that type and
/// the operation signature achieving it.
pub mod cost;
/// Re-computation of cost tables once parameters are bound.
pub mod refine;
/// Operand/result type combinations of operators.
pub mod signature;
