//! Contraction analysis collaborators.
//!
//! Lowering a contraction needs a handful of numeric transforms over its
//! index polynomials and constraints. They are expressed as traits so a
//! full polyhedral implementation can be swapped in; [`BasicPasses`]
//! implements them for contractions whose accesses are already integral.

use std::collections::HashMap;

use ferrotile_ir::TensorShape;

use crate::bounds::compute_bounds;
use crate::constraint::{IndexBounds, RangeConstraint, SimpleConstraint};
use crate::contraction::Contraction;
use crate::error::Result;
use crate::polynomial::Polynomial;
use crate::rational::Rational;

/// Transforms applied to a contraction before its bounds are solved.
pub trait ContractionPasses {
    /// Constrain every index variable to integral values.
    fn constrain_integral(&self, contraction: &Contraction) -> Contraction;

    /// In-range constraints for every access, against `shapes` (one per spec).
    fn gather_constraints(&self, contraction: &Contraction, shapes: &[TensorShape]) -> Vec<RangeConstraint>;

    /// Simplify output polynomials that combine several indices.
    fn reduce_output_polynomials(&self, contraction: &Contraction, constraints: &[RangeConstraint]) -> Contraction;

    /// Collapse constraints that differ only by a constant.
    fn merge_parallel_constraints(&self, constraints: &mut Vec<RangeConstraint>);

    /// Remove fractional coefficients by introducing integral indices.
    fn defract(&self, contraction: &Contraction, constraints: &[RangeConstraint]) -> Contraction;
}

/// Turns range constraints into closed index bounds.
pub trait BoundsSolver {
    fn solve_bounds(&self, constraints: &[RangeConstraint]) -> Result<(IndexBounds, Vec<SimpleConstraint>)>;
}

/// Reference collaborators for integral contractions.
///
/// Polynomial reduction and defractionalization are identities here: a
/// contraction with fractional coefficients passes through unchanged and is
/// rejected when its accesses are integerized.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicPasses;

impl ContractionPasses for BasicPasses {
    fn constrain_integral(&self, contraction: &Contraction) -> Contraction {
        contraction.clone()
    }

    fn gather_constraints(&self, contraction: &Contraction, shapes: &[TensorShape]) -> Vec<RangeConstraint> {
        gather_constraints(contraction, shapes)
    }

    fn reduce_output_polynomials(&self, contraction: &Contraction, _constraints: &[RangeConstraint]) -> Contraction {
        contraction.clone()
    }

    fn merge_parallel_constraints(&self, constraints: &mut Vec<RangeConstraint>) {
        merge_parallel_constraints(constraints)
    }

    fn defract(&self, contraction: &Contraction, _constraints: &[RangeConstraint]) -> Contraction {
        contraction.clone()
    }
}

impl BoundsSolver for BasicPasses {
    fn solve_bounds(&self, constraints: &[RangeConstraint]) -> Result<(IndexBounds, Vec<SimpleConstraint>)> {
        compute_bounds(constraints)
    }
}

/// `0 <= poly < size` for every non-constant access polynomial, followed by
/// the contraction's own constraints.
pub fn gather_constraints(contraction: &Contraction, shapes: &[TensorShape]) -> Vec<RangeConstraint> {
    let mut constraints = Vec::new();
    for (spec, shape) in contraction.specs.iter().zip(shapes) {
        for (poly, dim) in spec.spec.iter().zip(&shape.dims) {
            if poly.is_constant() {
                continue;
            }
            constraints.push(RangeConstraint::new(poly.clone(), dim.size as i64));
        }
    }
    constraints.extend(contraction.constraints.iter().cloned());
    constraints
}

/// Intersect constraints whose polynomials differ only by an integer constant.
///
/// `0 <= q + c₁ < r₁` and `0 <= q + c₂ < r₂` become one constraint on `q`
/// covering the intersection of both ranges. The merged constraint takes the
/// position of the first one; order is otherwise preserved.
pub fn merge_parallel_constraints(constraints: &mut Vec<RangeConstraint>) {
    enum Slot {
        Merged { base: Polynomial, lo: i64, hi: i64 },
        Kept(RangeConstraint),
    }

    let mut slots: Vec<Slot> = Vec::with_capacity(constraints.len());
    let mut by_base: HashMap<Polynomial, usize> = HashMap::new();

    for constraint in constraints.drain(..) {
        let constant = constraint.poly.constant();
        if !constant.is_integer() {
            slots.push(Slot::Kept(constraint));
            continue;
        }
        // q ∈ [-c, r - 1 - c]
        let lo = -constant.numer();
        let hi = constraint.range - 1 - constant.numer();
        let base = constraint.poly.without_constant();
        match by_base.get(&base) {
            Some(&pos) => {
                if let Slot::Merged { lo: cur_lo, hi: cur_hi, .. } = &mut slots[pos] {
                    *cur_lo = (*cur_lo).max(lo);
                    *cur_hi = (*cur_hi).min(hi);
                }
            }
            None => {
                by_base.insert(base.clone(), slots.len());
                slots.push(Slot::Merged { base, lo, hi });
            }
        }
    }

    constraints.extend(slots.into_iter().map(|slot| match slot {
        Slot::Merged { base, lo, hi } => {
            let mut poly = base;
            poly.add_const(Rational::from(-lo));
            RangeConstraint::new(poly, hi - lo + 1)
        }
        Slot::Kept(constraint) => constraint,
    }));
}
