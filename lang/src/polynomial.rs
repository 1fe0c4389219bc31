//! Rational polynomials over index names.
//!
//! Index expressions in contractions are linear: a rational constant plus
//! rational multiples of index variables. Zero coefficients are never
//! stored.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::rational::Rational;

/// `constant + Σ coeff·index` with rational coefficients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Polynomial {
    constant: Rational,
    terms: BTreeMap<String, Rational>,
}

impl Polynomial {
    pub fn from_const(value: i64) -> Self {
        Self::from_rational(Rational::from(value))
    }

    pub fn from_rational(value: Rational) -> Self {
        Self { constant: value, terms: BTreeMap::new() }
    }

    /// A single index with coefficient 1.
    pub fn index(name: impl Into<String>) -> Self {
        Self::rational_term(name, Rational::ONE)
    }

    pub fn term(name: impl Into<String>, coeff: i64) -> Self {
        Self::rational_term(name, Rational::from(coeff))
    }

    pub fn rational_term(name: impl Into<String>, coeff: Rational) -> Self {
        let mut poly = Self::default();
        poly.add_term(name, coeff);
        poly
    }

    pub fn constant(&self) -> Rational {
        self.constant
    }

    pub fn terms(&self) -> &BTreeMap<String, Rational> {
        &self.terms
    }

    pub fn coeff(&self, name: &str) -> Rational {
        self.terms.get(name).copied().unwrap_or(Rational::ZERO)
    }

    pub fn is_constant(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of stored terms, counting a nonzero constant as one term.
    pub fn num_terms(&self) -> usize {
        self.terms.len() + usize::from(!self.constant.is_zero())
    }

    /// The same polynomial with its constant dropped.
    pub fn without_constant(&self) -> Self {
        Self { constant: Rational::ZERO, terms: self.terms.clone() }
    }

    pub fn add_term(&mut self, name: impl Into<String>, coeff: Rational) {
        if coeff.is_zero() {
            return;
        }
        let name = name.into();
        let entry = self.terms.entry(name.clone()).or_insert(Rational::ZERO);
        *entry += coeff;
        if entry.is_zero() {
            self.terms.remove(&name);
        }
    }

    pub fn add_const(&mut self, value: Rational) {
        self.constant += value;
    }

    /// Substitute concrete values; missing indices read as 0.
    pub fn eval(&self, values: &BTreeMap<String, i64>) -> Rational {
        self.terms.iter().fold(self.constant, |acc, (name, &coeff)| {
            acc + coeff * Rational::from(values.get(name).copied().unwrap_or(0))
        })
    }
}

impl From<i64> for Polynomial {
    fn from(value: i64) -> Self {
        Polynomial::from_const(value)
    }
}

impl Add for Polynomial {
    type Output = Polynomial;

    fn add(mut self, rhs: Polynomial) -> Polynomial {
        self.constant += rhs.constant;
        for (name, coeff) in rhs.terms {
            self.add_term(name, coeff);
        }
        self
    }
}

impl Add<i64> for Polynomial {
    type Output = Polynomial;

    fn add(mut self, rhs: i64) -> Polynomial {
        self.add_const(Rational::from(rhs));
        self
    }
}

impl Sub for Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: Polynomial) -> Polynomial {
        self + (-rhs)
    }
}

impl Sub<i64> for Polynomial {
    type Output = Polynomial;

    fn sub(mut self, rhs: i64) -> Polynomial {
        self.add_const(Rational::from(-rhs));
        self
    }
}

impl Mul<Rational> for Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Rational) -> Polynomial {
        if rhs.is_zero() {
            return Polynomial::default();
        }
        Polynomial {
            constant: self.constant * rhs,
            terms: self.terms.into_iter().map(|(name, coeff)| (name, coeff * rhs)).collect(),
        }
    }
}

impl Mul<i64> for Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: i64) -> Polynomial {
        self * Rational::from(rhs)
    }
}

impl Neg for Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        self * -1i64
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "{}", self.constant);
        }
        for (pos, (name, &coeff)) in self.terms.iter().enumerate() {
            let magnitude = coeff.abs();
            match (pos, coeff < Rational::ZERO) {
                (0, true) => write!(f, "-")?,
                (0, false) => {}
                (_, true) => write!(f, " - ")?,
                (_, false) => write!(f, " + ")?,
            }
            if magnitude == Rational::ONE {
                write!(f, "{name}")?;
            } else {
                write!(f, "{magnitude}*{name}")?;
            }
        }
        if self.constant < Rational::ZERO {
            write!(f, " - {}", -self.constant)
        } else if !self.constant.is_zero() {
            write!(f, " + {}", self.constant)
        } else {
            Ok(())
        }
    }
}
