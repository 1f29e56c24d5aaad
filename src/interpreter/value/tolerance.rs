use serde::{Deserialize, Serialize};

/// A relaxation policy for comparisons between numeric operands.
///
/// The tolerance is applied around the right-hand operand of a comparison:
/// `left = right` holds when `left` lies inside the acceptance interval built
/// around `right`. At most one policy is consulted, in this order:
/// integer range (integer comparisons only), floating range, proportional,
/// percentage.
///
/// # Example
/// ```
/// use mathex::interpreter::value::tolerance::Tolerance;
///
/// let tolerance = Tolerance::range(0.5, 0.25);
/// assert_eq!(tolerance.numeric_interval(2.0), Some((1.5, 2.25)));
/// assert!(Tolerance::default().is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Tolerance {
    /// How far below an integer right-hand operand still counts as equal.
    pub integer_range_lower_bound: Option<i64>,
    /// How far above an integer right-hand operand still counts as equal.
    pub integer_range_upper_bound: Option<i64>,
    /// How far below a numeric right-hand operand still counts as equal.
    pub range_lower_bound:         Option<f64>,
    /// How far above a numeric right-hand operand still counts as equal.
    pub range_upper_bound:         Option<f64>,
    /// A factor `p >= 1`; values within `[right / p, right * p]` are equal.
    pub proportional:              Option<f64>,
    /// A fraction `p` in `[0, 1]`; values within `right * (1 ± p)` are equal.
    pub percentage:                Option<f64>,
}

impl Tolerance {
    /// Builds a floating-point range tolerance.
    #[must_use]
    pub const fn range(lower: f64, upper: f64) -> Self {
        Self { range_lower_bound: Some(lower),
               range_upper_bound: Some(upper),
               ..Self::empty() }
    }

    /// Builds an integer range tolerance.
    #[must_use]
    pub const fn integer_range(lower: i64, upper: i64) -> Self {
        Self { integer_range_lower_bound: Some(lower),
               integer_range_upper_bound: Some(upper),
               ..Self::empty() }
    }

    /// Builds a proportional tolerance.
    #[must_use]
    pub const fn proportional(factor: f64) -> Self {
        Self { proportional: Some(factor),
               ..Self::empty() }
    }

    /// Builds a percentage tolerance.
    #[must_use]
    pub const fn percentage(fraction: f64) -> Self {
        Self { percentage: Some(fraction),
               ..Self::empty() }
    }

    /// A tolerance that relaxes nothing.
    #[must_use]
    pub const fn empty() -> Self {
        Self { integer_range_lower_bound: None,
               integer_range_upper_bound: None,
               range_lower_bound:         None,
               range_upper_bound:         None,
               proportional:              None,
               percentage:                None, }
    }

    /// Returns `true` if no policy is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.integer_range_lower_bound.is_none()
        && self.integer_range_upper_bound.is_none()
        && self.range_lower_bound.is_none()
        && self.range_upper_bound.is_none()
        && self.proportional.is_none()
        && self.percentage.is_none()
    }

    /// The inclusive interval of values considered equal to an integer
    /// `expected`, when an integer range is configured.
    #[must_use]
    pub fn integer_interval(&self, expected: i64) -> Option<(i64, i64)> {
        if self.integer_range_lower_bound.is_none() && self.integer_range_upper_bound.is_none() {
            return None;
        }
        let lower = self.integer_range_lower_bound.unwrap_or(0).abs();
        let upper = self.integer_range_upper_bound.unwrap_or(0).abs();
        Some((expected.saturating_sub(lower), expected.saturating_add(upper)))
    }

    /// The inclusive interval of values considered equal to `expected`.
    #[must_use]
    pub fn numeric_interval(&self, expected: f64) -> Option<(f64, f64)> {
        if self.range_lower_bound.is_some() || self.range_upper_bound.is_some() {
            let lower = self.range_lower_bound.unwrap_or(0.0).abs();
            let upper = self.range_upper_bound.unwrap_or(0.0).abs();
            return Some((expected - lower, expected + upper));
        }
        if let Some(factor) = self.proportional
           && factor >= 1.0
        {
            return Some(ordered(expected / factor, expected * factor));
        }
        if let Some(fraction) = self.percentage
           && (0.0..=1.0).contains(&fraction)
        {
            return Some(ordered(expected * (1.0 - fraction), expected * (1.0 + fraction)));
        }
        None
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}
