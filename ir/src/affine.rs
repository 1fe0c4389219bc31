//! Integer affine expressions over named loop indices.
//!
//! An [`Affine`] is `constant + Σ coeff·index`. It is the only form used for
//! memory accesses and block constraints in the IR. Coefficients are kept
//! nonzero: any operation that cancels a term removes it from the map, so an
//! empty map always means a pure constant.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// `constant + Σ coeff·index` with integer coefficients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Affine {
    constant: i64,
    terms: BTreeMap<String, i64>,
}

impl Affine {
    /// A pure constant expression.
    pub fn from_const(value: i64) -> Self {
        Self { constant: value, terms: BTreeMap::new() }
    }

    /// A single index with coefficient 1.
    pub fn index(name: impl Into<String>) -> Self {
        Self::term(name, 1)
    }

    /// A single scaled index. A zero coefficient yields the constant 0.
    pub fn term(name: impl Into<String>, coeff: i64) -> Self {
        let mut affine = Self::default();
        affine.add_term(name, coeff);
        affine
    }

    /// The constant offset.
    pub fn constant(&self) -> i64 {
        self.constant
    }

    /// Index coefficients, ordered by index name.
    pub fn terms(&self) -> &BTreeMap<String, i64> {
        &self.terms
    }

    /// Coefficient of `name`, 0 when absent.
    pub fn coeff(&self, name: &str) -> i64 {
        self.terms.get(name).copied().unwrap_or(0)
    }

    pub fn is_constant(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty() && self.constant == 0
    }

    /// The index name if this expression is exactly `1·index + 0`.
    pub fn as_unit_index(&self) -> Option<&str> {
        if self.constant != 0 || self.terms.len() != 1 {
            return None;
        }
        self.terms.iter().next().and_then(|(name, &coeff)| (coeff == 1).then_some(name.as_str()))
    }

    /// Add `coeff·name`, dropping the term if it cancels.
    pub fn add_term(&mut self, name: impl Into<String>, coeff: i64) {
        if coeff == 0 {
            return;
        }
        let name = name.into();
        let entry = self.terms.entry(name.clone()).or_insert(0);
        *entry += coeff;
        if *entry == 0 {
            self.terms.remove(&name);
        }
    }

    /// Evaluate the expression for concrete index values; missing indices read as 0.
    pub fn eval(&self, values: &BTreeMap<String, i64>) -> i64 {
        self.terms.iter().fold(self.constant, |acc, (name, coeff)| {
            acc + coeff * values.get(name).copied().unwrap_or(0)
        })
    }
}

impl From<i64> for Affine {
    fn from(value: i64) -> Self {
        Self::from_const(value)
    }
}

impl AddAssign<i64> for Affine {
    fn add_assign(&mut self, rhs: i64) {
        self.constant += rhs;
    }
}

impl SubAssign<i64> for Affine {
    fn sub_assign(&mut self, rhs: i64) {
        self.constant -= rhs;
    }
}

impl AddAssign<&Affine> for Affine {
    fn add_assign(&mut self, rhs: &Affine) {
        self.constant += rhs.constant;
        for (name, &coeff) in &rhs.terms {
            self.add_term(name.as_str(), coeff);
        }
    }
}

impl AddAssign for Affine {
    fn add_assign(&mut self, rhs: Affine) {
        *self += &rhs;
    }
}

impl SubAssign<&Affine> for Affine {
    fn sub_assign(&mut self, rhs: &Affine) {
        self.constant -= rhs.constant;
        for (name, &coeff) in &rhs.terms {
            self.add_term(name.as_str(), -coeff);
        }
    }
}

impl Add for Affine {
    type Output = Affine;

    fn add(mut self, rhs: Affine) -> Affine {
        self += &rhs;
        self
    }
}

impl Add<i64> for Affine {
    type Output = Affine;

    fn add(mut self, rhs: i64) -> Affine {
        self += rhs;
        self
    }
}

impl Sub for Affine {
    type Output = Affine;

    fn sub(mut self, rhs: Affine) -> Affine {
        self -= &rhs;
        self
    }
}

impl Sub<i64> for Affine {
    type Output = Affine;

    fn sub(mut self, rhs: i64) -> Affine {
        self -= rhs;
        self
    }
}

impl Mul<i64> for Affine {
    type Output = Affine;

    fn mul(self, rhs: i64) -> Affine {
        if rhs == 0 {
            return Affine::default();
        }
        Affine {
            constant: self.constant * rhs,
            terms: self.terms.into_iter().map(|(name, coeff)| (name, coeff * rhs)).collect(),
        }
    }
}

impl Neg for Affine {
    type Output = Affine;

    fn neg(self) -> Affine {
        self * -1i64
    }
}

impl fmt::Display for Affine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "{}", self.constant);
        }
        let mut first = true;
        for (name, &coeff) in &self.terms {
            let (sign, magnitude) = if coeff < 0 { ("-", -coeff) } else { ("+", coeff) };
            match (first, sign) {
                (true, "-") => write!(f, "-")?,
                (true, _) => {}
                (false, _) => write!(f, " {sign} ")?,
            }
            if magnitude == 1 {
                write!(f, "{name}")?;
            } else {
                write!(f, "{magnitude}*{name}")?;
            }
            first = false;
        }
        match self.constant {
            0 => Ok(()),
            c if c < 0 => write!(f, " - {}", -c),
            c => write!(f, " + {c}"),
        }
    }
}
