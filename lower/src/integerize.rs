//! Rational polynomial to integer affine conversion.

use ferrotile_ir::Affine;
use ferrotile_lang::{IndexBounds, Polynomial};
use snafu::{OptionExt, ensure};

use crate::error::*;

/// Convert `poly` into an affine expression over zero-based loop indices.
///
/// Each index `i` with bound `[min, max]` is rewritten as `min + i'` where
/// `i'` ranges over `0..=max - min`; the `c·min` part of every term is folded
/// into the constant. Indices whose bound is a single value disappear.
///
/// # Errors
///
/// [`Error::NonIntegerTerm`] for a fractional coefficient or constant,
/// [`Error::UnknownIndex`] for an index missing from `bounds`.
pub fn integerize(poly: &Polynomial, bounds: &IndexBounds) -> Result<Affine> {
    let constant = poly.constant();
    ensure!(constant.is_integer(), NonIntegerTermSnafu { term: "constant", coeff: constant });

    let mut result = Affine::from_const(constant.numer());
    for (name, &coeff) in poly.terms() {
        ensure!(coeff.is_integer(), NonIntegerTermSnafu { term: format!("'{name}'"), coeff });
        let bound = bounds.get(name).context(UnknownIndexSnafu { index: name.as_str() })?;
        let coeff = coeff.numer();
        result += coeff * bound.min;
        if !bound.is_degenerate() {
            result.add_term(name.as_str(), coeff);
        }
    }
    Ok(result)
}
