use std::{
    fmt,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not},
};

use serde::{Deserialize, Serialize};

/// One of the five value kinds an expression can produce.
///
/// The declaration order is also the preference order used to break ties
/// between equally cheap type assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SupportedValueType {
    /// A 64-bit signed integer.
    Integer,
    /// A double precision floating-point number.
    Numeric,
    /// `true` or `false`.
    Boolean,
    /// A binary blob, written as `0x...` or `0b...` literals.
    ByteArray,
    /// A text value.
    String,
}

/// Conversion costs, indexed `[from][to]`. `None` means no conversion exists.
///
/// Numeric to Integer only succeeds at runtime for exactly integral values;
/// ByteArray to Integer requires at most eight bytes and ByteArray to Numeric
/// exactly eight.
const CONVERSION_COSTS: [[Option<u32>; 5]; 5] = [
    // to: Integer   Numeric   Boolean  ByteArray String
    [Some(0), Some(1), None, Some(2), Some(10)],  // from Integer
    [Some(20), Some(0), None, Some(2), Some(10)], // from Numeric
    [None, None, Some(0), Some(2), Some(10)],     // from Boolean
    [Some(5), Some(5), None, Some(0), Some(10)],  // from ByteArray
    [None, None, None, None, Some(0)],            // from String
];

impl SupportedValueType {
    /// Every value type, in preference order.
    pub const ALL: [Self; 5] = [Self::Integer,
                                Self::Numeric,
                                Self::Boolean,
                                Self::ByteArray,
                                Self::String];

    /// Position of this type in [`SupportedValueType::ALL`] and in cost tables.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Integer => 0,
            Self::Numeric => 1,
            Self::Boolean => 2,
            Self::ByteArray => 3,
            Self::String => 4,
        }
    }

    /// The single-type mask for this type.
    #[must_use]
    pub const fn mask(self) -> SupportableValueType {
        SupportableValueType(1 << self.index())
    }

    /// Returns the cost of converting a value of this type into `to`, or
    /// `None` when no conversion exists.
    ///
    /// # Example
    /// ```
    /// use mathex::interpreter::value::kind::SupportedValueType;
    ///
    /// assert_eq!(SupportedValueType::Integer.conversion_cost(SupportedValueType::Integer), Some(0));
    /// assert_eq!(SupportedValueType::Integer.conversion_cost(SupportedValueType::Numeric), Some(1));
    /// assert_eq!(SupportedValueType::String.conversion_cost(SupportedValueType::Integer), None);
    /// ```
    #[must_use]
    pub const fn conversion_cost(self, to: Self) -> Option<u32> {
        CONVERSION_COSTS[self.index()][to.index()]
    }
}

impl fmt::Display for SupportedValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Integer => "integer",
            Self::Numeric => "numeric",
            Self::Boolean => "boolean",
            Self::ByteArray => "byte array",
            Self::String => "string",
        };
        f.write_str(name)
    }
}

/// A set of value types a node could still resolve to.
///
/// # Example
/// ```
/// use mathex::interpreter::value::kind::{SupportableValueType, SupportedValueType};
///
/// let numbers = SupportableValueType::INTEGER | SupportableValueType::NUMERIC;
/// assert!(numbers.contains(SupportedValueType::Numeric));
/// assert!(!numbers.contains(SupportedValueType::String));
/// assert_eq!((numbers & SupportableValueType::NUMERIC).single(), Some(SupportedValueType::Numeric));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SupportableValueType(u8);

impl SupportableValueType {
    /// No type at all.
    pub const NONE: Self = Self(0);
    /// Integer only.
    pub const INTEGER: Self = Self(1);
    /// Numeric only.
    pub const NUMERIC: Self = Self(1 << 1);
    /// Boolean only.
    pub const BOOLEAN: Self = Self(1 << 2);
    /// Byte array only.
    pub const BYTE_ARRAY: Self = Self(1 << 3);
    /// String only.
    pub const STRING: Self = Self(1 << 4);
    /// Every type.
    pub const ALL: Self = Self(0b1_1111);

    /// Returns `true` if `ty` belongs to the set.
    #[must_use]
    pub const fn contains(self, ty: SupportedValueType) -> bool {
        self.0 & ty.mask().0 != 0
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the only member of the set, if it has exactly one.
    #[must_use]
    pub fn single(self) -> Option<SupportedValueType> {
        let mut members = self.iter();
        match (members.next(), members.next()) {
            (Some(ty), None) => Some(ty),
            _ => None,
        }
    }

    /// Iterates the members in preference order.
    pub fn iter(self) -> impl Iterator<Item = SupportedValueType> {
        SupportedValueType::ALL.into_iter().filter(move |ty| self.contains(*ty))
    }
}

impl From<SupportedValueType> for SupportableValueType {
    fn from(ty: SupportedValueType) -> Self {
        ty.mask()
    }
}

impl FromIterator<SupportedValueType> for SupportableValueType {
    fn from_iter<I: IntoIterator<Item = SupportedValueType>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, |acc, ty| acc | ty.mask())
    }
}

impl BitOr for SupportableValueType {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for SupportableValueType {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for SupportableValueType {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for SupportableValueType {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Not for SupportableValueType {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0 & Self::ALL.0)
    }
}

impl fmt::Debug for SupportableValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for SupportableValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("nothing");
        }
        for (index, ty) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{ty}")?;
        }
        Ok(())
    }
}
