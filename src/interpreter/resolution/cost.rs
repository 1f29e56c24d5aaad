use std::fmt;

use crate::interpreter::{
    resolution::signature::Signature,
    value::kind::{SupportableValueType, SupportedValueType},
};

/// The cheapest known way of producing a node's result in one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cost {
    /// Accumulated cost of the whole subtree, conversions included.
    pub total:     u32,
    /// Index of the signature in the operation's table.
    pub signature: usize,
}

/// Per-type cost of a node, indexed by [`SupportedValueType::index`].
///
/// A missing entry means the node cannot produce that type at all.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct CostTable([Option<Cost>; 5]);

impl CostTable {
    /// A table in which every type in `types` costs nothing.
    ///
    /// Used for parameters whose type is still open.
    #[must_use]
    pub fn free(types: SupportableValueType) -> Self {
        let mut table = Self::default();
        for ty in types.iter() {
            table.offer(ty, 0, 0);
        }
        table
    }

    /// The table of a value known to be of type `from`.
    ///
    /// # Example
    /// ```
    /// use mathex::interpreter::{resolution::cost::CostTable, value::kind::SupportedValueType as T};
    ///
    /// let table = CostTable::converted_from(T::Integer);
    /// assert_eq!(table.total(T::Integer), Some(0));
    /// assert_eq!(table.total(T::Numeric), Some(1));
    /// assert_eq!(table.total(T::Boolean), None);
    /// ```
    #[must_use]
    pub fn converted_from(from: SupportedValueType) -> Self {
        let mut table = Self::default();
        for to in SupportedValueType::ALL {
            if let Some(cost) = from.conversion_cost(to) {
                table.offer(to, cost, 0);
            }
        }
        table
    }

    /// Returns the entry for `ty`.
    #[must_use]
    pub const fn get(&self, ty: SupportedValueType) -> Option<Cost> {
        self.0[ty.index()]
    }

    /// Returns the total cost of producing `ty`.
    #[must_use]
    pub fn total(&self, ty: SupportedValueType) -> Option<u32> {
        self.get(ty).map(|cost| cost.total)
    }

    /// Records a candidate; kept only if strictly cheaper than the current one.
    pub fn offer(&mut self, ty: SupportedValueType, total: u32, signature: usize) {
        let slot = &mut self.0[ty.index()];
        if slot.is_none_or(|current| current.total > total) {
            *slot = Some(Cost { total, signature });
        }
    }

    /// The set of types this node can produce.
    #[must_use]
    pub fn possible_types(&self) -> SupportableValueType {
        SupportedValueType::ALL.into_iter()
                               .filter(|ty| self.get(*ty).is_some())
                               .collect()
    }

    /// Returns `true` if no type can be produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    /// The cheapest producible type; ties go to the earlier type.
    #[must_use]
    pub fn cheapest(&self) -> Option<(SupportedValueType, Cost)> {
        SupportedValueType::ALL.into_iter()
                               .filter_map(|ty| self.get(ty).map(|cost| (ty, cost)))
                               .min_by_key(|(_, cost)| cost.total)
    }
}

impl fmt::Debug for CostTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for ty in SupportedValueType::ALL {
            if let Some(cost) = self.get(ty) {
                map.entry(&ty, &cost.total);
            }
        }
        map.finish()
    }
}

/// Finds, for every output type, the cheapest signature applicable to the
/// operand tables.
///
/// The cost of a signature is the operands' costs at its input types, plus
/// the operation's own cost, plus converting its result to the output type.
/// Signatures are tried in table order so ties go to the earlier one.
///
/// # Example
/// ```
/// use mathex::{
///     ast::BinaryOperator,
///     interpreter::{
///         resolution::cost::{combine, CostTable},
///         value::kind::SupportedValueType as T,
///     },
/// };
///
/// let integer = CostTable::converted_from(T::Integer);
/// let numeric = CostTable::converted_from(T::Numeric);
/// let table = combine(BinaryOperator::Add.signatures(), &[integer, numeric]);
///
/// // 1 (integer to numeric) + 0 + 1 (numeric addition)
/// assert_eq!(table.total(T::Numeric), Some(2));
/// assert_eq!(table.cheapest().map(|(ty, _)| ty), Some(T::Numeric));
/// ```
#[must_use]
pub fn combine(signatures: &[Signature], operands: &[CostTable]) -> CostTable {
    let mut table = CostTable::default();

    for (index, signature) in signatures.iter().enumerate() {
        if signature.arity() != operands.len() {
            continue;
        }
        let Some(inputs) = signature.inputs
                                    .iter()
                                    .zip(operands)
                                    .map(|(ty, operand)| operand.total(*ty))
                                    .try_fold(0_u32, |sum, cost| cost.map(|c| sum.saturating_add(c)))
        else {
            continue;
        };
        let base = inputs.saturating_add(signature.cost);

        for to in SupportedValueType::ALL {
            if let Some(conversion) = signature.output.conversion_cost(to) {
                table.offer(to, base.saturating_add(conversion), index);
            }
        }
    }

    table
}
