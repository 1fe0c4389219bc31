//! Exact rational numbers for index polynomials.
//!
//! Values are normalized to lowest terms on construction and the
//! denominator is always positive, so structural equality is numeric
//! equality.
//!
//! ```rust
//! use ferrotile_lang::rational::Rational;
//!
//! let half = Rational::new(1, 2);
//! assert_eq!(half + Rational::new(1, 3), Rational::new(5, 6));
//! assert_eq!(Rational::new(6, -9), Rational::new(-2, 3));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// `num / denom` in lowest terms with `denom > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    num: i64,
    denom: i64,
}

impl Rational {
    pub const ZERO: Self = Rational { num: 0, denom: 1 };
    pub const ONE: Self = Rational { num: 1, denom: 1 };

    /// Create a normalized rational.
    ///
    /// # Panics
    ///
    /// Panics if `denom == 0`. Arithmetic panics when a normalized result
    /// does not fit in `i64`.
    pub fn new(num: i64, denom: i64) -> Self {
        assert!(denom != 0, "rational with zero denominator");
        Self::normalize(num as i128, denom as i128)
    }

    pub const fn integer(n: i64) -> Self {
        Rational { num: n, denom: 1 }
    }

    fn normalize(num: i128, denom: i128) -> Self {
        if num == 0 {
            return Self::ZERO;
        }
        let g = gcd(num.unsigned_abs(), denom.unsigned_abs()) as i128;
        let sign = if denom < 0 { -1 } else { 1 };
        let num = i64::try_from(sign * num / g).expect("rational numerator overflows i64");
        let denom = i64::try_from(sign * denom / g).expect("rational denominator overflows i64");
        Rational { num, denom }
    }

    pub const fn numer(self) -> i64 {
        self.num
    }

    pub const fn denom(self) -> i64 {
        self.denom
    }

    pub const fn is_zero(self) -> bool {
        self.num == 0
    }

    pub const fn is_integer(self) -> bool {
        self.denom == 1
    }

    /// Largest integer not greater than this value.
    pub fn floor(self) -> i64 {
        self.num.div_euclid(self.denom)
    }

    /// Smallest integer not less than this value.
    pub fn ceil(self) -> i64 {
        -(-self.num).div_euclid(self.denom)
    }

    pub fn abs(self) -> Self {
        Rational { num: self.num.abs(), denom: self.denom }
    }
}

/// Greatest common divisor by Euclid's algorithm.
fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let temp = b;
        b = a % b;
        a = temp;
    }
    a
}

impl Default for Rational {
    fn default() -> Self {
        Rational::ZERO
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Rational::integer(n)
    }
}

impl Add for Rational {
    type Output = Rational;

    fn add(self, rhs: Rational) -> Rational {
        let num = self.num as i128 * rhs.denom as i128 + rhs.num as i128 * self.denom as i128;
        Rational::normalize(num, self.denom as i128 * rhs.denom as i128)
    }
}

impl Sub for Rational {
    type Output = Rational;

    fn sub(self, rhs: Rational) -> Rational {
        self + (-rhs)
    }
}

impl Mul for Rational {
    type Output = Rational;

    fn mul(self, rhs: Rational) -> Rational {
        Rational::normalize(self.num as i128 * rhs.num as i128, self.denom as i128 * rhs.denom as i128)
    }
}

impl Div for Rational {
    type Output = Rational;

    fn div(self, rhs: Rational) -> Rational {
        assert!(!rhs.is_zero(), "rational division by zero");
        Rational::normalize(self.num as i128 * rhs.denom as i128, self.denom as i128 * rhs.num as i128)
    }
}

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational { num: -self.num, denom: self.denom }
    }
}

impl AddAssign for Rational {
    fn add_assign(&mut self, rhs: Rational) {
        *self = *self + rhs;
    }
}

impl SubAssign for Rational {
    fn sub_assign(&mut self, rhs: Rational) {
        *self = *self - rhs;
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.num as i128 * other.denom as i128).cmp(&(other.num as i128 * self.denom as i128))
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom == 1 { write!(f, "{}", self.num) } else { write!(f, "{}/{}", self.num, self.denom) }
    }
}
