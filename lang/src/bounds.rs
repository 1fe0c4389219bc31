//! Solving range constraints into per-index bounds.
//!
//! Bounds are found by interval propagation: every constraint
//! `0 <= Σ aᵢ·xᵢ + c < r` tightens each `xⱼ` using the current intervals of
//! the other indices, and passes repeat until nothing changes. Constraints
//! over a single index are captured exactly by the resulting bounds; the
//! multi-index ones that the bounding box does not already imply are
//! returned as residual [`SimpleConstraint`]s.
//!
//! Propagation cannot start on a system whose every constraint spans several
//! unbounded indices (`0 <= i + j < 4`, `0 <= i - j < 4`). Indices still open
//! after the first fixpoint are bounded by projecting the whole system onto
//! them with Fourier–Motzkin elimination, and propagation then resumes.

use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;
use snafu::ensure;

use crate::constraint::{Bound, IndexBounds, RangeConstraint, SimpleConstraint};
use crate::error::*;
use crate::polynomial::Polynomial;
use crate::rational::Rational;

/// Upper limit on propagation passes; well-formed contraction systems settle in a handful.
const MAX_PASSES: usize = 64;

#[derive(Debug, Clone, Copy, Default)]
struct Interval {
    min: Option<i64>,
    max: Option<i64>,
}

impl Interval {
    fn tighten(&mut self, other: Interval) {
        self.min = self.min.max(other.min);
        self.max = match (self.max, other.max) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
    }
}

/// Solve `constraints` into inclusive bounds plus residual constraints.
///
/// # Errors
///
/// [`Error::UnboundedIndex`] if some index is not bounded on both sides,
/// [`Error::EmptyRange`] if some index has no feasible value,
/// [`Error::Infeasible`] if the system has no solution at all.
pub fn compute_bounds(constraints: &[RangeConstraint]) -> Result<(IndexBounds, Vec<SimpleConstraint>)> {
    let mut intervals: BTreeMap<String, Interval> = constraints
        .iter()
        .flat_map(|c| c.poly.terms().keys().cloned())
        .map(|name| (name, Interval::default()))
        .collect();

    propagate_to_fixpoint(constraints, &mut intervals)?;

    let open: Vec<String> = intervals
        .iter()
        .filter(|(_, interval)| interval.min.is_none() || interval.max.is_none())
        .map(|(name, _)| name.clone())
        .collect();
    if !open.is_empty() {
        let system = inequality_system(constraints, &intervals);
        for name in open {
            let projected = project(&name, &system)?;
            let interval = intervals.entry(name.clone()).or_default();
            interval.tighten(projected);
            tracing::trace!(index = %name, min = ?interval.min, max = ?interval.max, "bounded by projection");
            if let (Some(min), Some(max)) = (interval.min, interval.max) {
                ensure!(min <= max, EmptyRangeSnafu { index: name.clone(), min, max });
            }
        }
        propagate_to_fixpoint(constraints, &mut intervals)?;
    }

    let mut bounds = IndexBounds::new();
    for (name, interval) in &intervals {
        let (Some(min), Some(max)) = (interval.min, interval.max) else {
            return UnboundedIndexSnafu { index: name.clone() }.fail();
        };
        bounds.insert(name.clone(), Bound::new(min, max));
    }

    let mut residual = Vec::new();
    for constraint in constraints.iter().filter(|c| c.poly.terms().len() > 1) {
        let (lo, hi) = poly_range(&constraint.poly, &bounds);
        if lo < Rational::ZERO {
            residual.push(SimpleConstraint::new(-constraint.poly.clone(), 0));
        }
        if hi > Rational::from(constraint.range - 1) {
            residual.push(SimpleConstraint::new(constraint.poly.clone(), constraint.range - 1));
        }
    }

    Ok((bounds, residual))
}

fn propagate_to_fixpoint(constraints: &[RangeConstraint], intervals: &mut BTreeMap<String, Interval>) -> Result<()> {
    for pass in 0..MAX_PASSES {
        let mut changed = false;
        for constraint in constraints {
            changed |= propagate(constraint, intervals)?;
        }
        if !changed {
            tracing::trace!(passes = pass + 1, "bounds propagation converged");
            break;
        }
    }
    Ok(())
}

/// Tighten every index of one constraint. Returns whether anything changed.
fn propagate(constraint: &RangeConstraint, intervals: &mut BTreeMap<String, Interval>) -> Result<bool> {
    let poly = &constraint.poly;
    let lo = -poly.constant();
    let hi = Rational::from(constraint.range - 1) - poly.constant();
    let mut changed = false;

    for (name, &coeff) in poly.terms() {
        let Some((rest_min, rest_max)) = rest_range(poly, name, intervals) else {
            continue;
        };
        // coeff·x ∈ [lo - rest_max, hi - rest_min]
        let (a, b) = ((lo - rest_max) / coeff, (hi - rest_min) / coeff);
        let (x_min, x_max) = if coeff > Rational::ZERO { (a, b) } else { (b, a) };

        let interval = intervals.entry(name.clone()).or_default();
        let new_min = x_min.ceil();
        let new_max = x_max.floor();
        if interval.min.is_none_or(|m| new_min > m) {
            interval.min = Some(new_min);
            changed = true;
        }
        if interval.max.is_none_or(|m| new_max < m) {
            interval.max = Some(new_max);
            changed = true;
        }
        if let (Some(min), Some(max)) = (interval.min, interval.max) {
            ensure!(min <= max, EmptyRangeSnafu { index: name.clone(), min, max });
        }
    }
    Ok(changed)
}

/// Every constraint and every known bound as a row `p <= 0`.
fn inequality_system(constraints: &[RangeConstraint], intervals: &BTreeMap<String, Interval>) -> Vec<Polynomial> {
    let mut rows: Vec<Polynomial> =
        constraints.iter().flat_map(RangeConstraint::to_simple).map(|c| c.poly - c.rhs).collect();
    for (name, interval) in intervals {
        if let Some(min) = interval.min {
            rows.push(Polynomial::index(name.as_str()) * -1 + min);
        }
        if let Some(max) = interval.max {
            rows.push(Polynomial::index(name.as_str()) - max);
        }
    }
    rows
}

/// Integer range of `target` over the rational solutions of `rows`, every
/// other index eliminated.
fn project(target: &str, rows: &[Polynomial]) -> Result<Interval> {
    let others: BTreeSet<String> =
        rows.iter().flat_map(|row| row.terms().keys()).filter(|name| name.as_str() != target).cloned().collect();

    let mut rows = rows.to_vec();
    for name in &others {
        let (mut upper, mut lower, mut rest) = (Vec::new(), Vec::new(), Vec::new());
        for row in rows {
            match row.coeff(name).cmp(&Rational::ZERO) {
                std::cmp::Ordering::Greater => upper.push(row),
                std::cmp::Ordering::Less => lower.push(row),
                std::cmp::Ordering::Equal => rest.push(row),
            }
        }
        // a·y + p <= 0 and b·y + q <= 0 with a > 0 > b give -b·p + a·q <= 0.
        for (up, low) in upper.iter().cartesian_product(&lower) {
            let combined = up.clone() * -low.coeff(name) + low.clone() * up.coeff(name);
            if !rest.contains(&combined) {
                rest.push(combined);
            }
        }
        rows = rest;
    }

    let mut interval = Interval::default();
    for row in &rows {
        let coeff = row.coeff(target);
        if coeff.is_zero() {
            ensure!(row.constant() <= Rational::ZERO, InfeasibleSnafu { index: target });
            continue;
        }
        let limit = -row.constant() / coeff;
        let bound = if coeff > Rational::ZERO {
            Interval { min: None, max: Some(limit.floor()) }
        } else {
            Interval { min: Some(limit.ceil()), max: None }
        };
        interval.tighten(bound);
    }
    Ok(interval)
}

/// Range of `poly` minus its constant and the `skip` term, if every other index is bounded.
fn rest_range(poly: &Polynomial, skip: &str, intervals: &BTreeMap<String, Interval>) -> Option<(Rational, Rational)> {
    let mut min = Rational::ZERO;
    let mut max = Rational::ZERO;
    for (name, &coeff) in poly.terms().iter().filter(|(name, _)| name.as_str() != skip) {
        let interval = intervals.get(name)?;
        let (lo, hi) = (Rational::from(interval.min?), Rational::from(interval.max?));
        if coeff > Rational::ZERO {
            min += coeff * lo;
            max += coeff * hi;
        } else {
            min += coeff * hi;
            max += coeff * lo;
        }
    }
    Some((min, max))
}

/// Range of `poly`, constant included, over the bounding box.
fn poly_range(poly: &Polynomial, bounds: &IndexBounds) -> (Rational, Rational) {
    let mut min = poly.constant();
    let mut max = poly.constant();
    for (name, &coeff) in poly.terms() {
        let Some(bound) = bounds.get(name) else { continue };
        let (lo, hi) = (Rational::from(bound.min), Rational::from(bound.max));
        if coeff > Rational::ZERO {
            min += coeff * lo;
            max += coeff * hi;
        } else {
            min += coeff * hi;
            max += coeff * lo;
        }
    }
    (min, max)
}
