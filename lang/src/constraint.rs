//! Range and simple constraints over index polynomials, and solved bounds.

use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;

use crate::polynomial::Polynomial;

/// `0 <= poly < range`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RangeConstraint {
    pub poly: Polynomial,
    pub range: i64,
}

impl RangeConstraint {
    pub fn new(poly: Polynomial, range: i64) -> Self {
        Self { poly, range }
    }

    /// The two one-sided forms: `-poly <= 0` and `poly <= range - 1`.
    pub fn to_simple(&self) -> [SimpleConstraint; 2] {
        [SimpleConstraint::new(-self.poly.clone(), 0), SimpleConstraint::new(self.poly.clone(), self.range - 1)]
    }
}

impl fmt::Display for RangeConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0 <= {} < {}", self.poly, self.range)
    }
}

/// `poly <= rhs`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimpleConstraint {
    pub poly: Polynomial,
    pub rhs: i64,
}

impl SimpleConstraint {
    pub fn new(poly: Polynomial, rhs: i64) -> Self {
        Self { poly, rhs }
    }
}

impl fmt::Display for SimpleConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <= {}", self.poly, self.rhs)
    }
}

/// Inclusive integer range of one index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bound {
    pub min: i64,
    pub max: i64,
}

impl Bound {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Number of values in the range.
    pub const fn range(&self) -> u64 {
        (self.max - self.min + 1) as u64
    }

    pub const fn is_degenerate(&self) -> bool {
        self.min == self.max
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Solved bounds, ordered by index name.
pub type IndexBounds = BTreeMap<String, Bound>;

/// Render a constraint list on one line for diagnostics.
pub fn constraints_to_string<T: fmt::Display>(constraints: &[T]) -> String {
    format!("[{}]", constraints.iter().join(", "))
}
