//! Contraction normalization ahead of bounds solving.

use ferrotile_ir::TensorShape;
use ferrotile_lang::constraint::constraints_to_string;
use ferrotile_lang::{Contraction, ContractionPasses, RangeConstraint, TensorSpec};
use snafu::ensure;
use tracing::trace;

use crate::error::*;

/// Whether the output access needs polynomial reduction before defractionalization.
///
/// True when some output polynomial has more than two terms, counting a
/// nonzero constant as a term, or exactly two terms and no constant.
pub fn is_fancy(output: &TensorSpec) -> bool {
    output.spec.iter().any(|poly| {
        let terms = poly.num_terms();
        terms > 2 || (terms == 2 && poly.constant().is_zero())
    })
}

/// Normalize `contraction` and collect its final range constraints.
///
/// `shapes` holds one shape per spec, output first.
pub fn compile_contraction<P>(
    contraction: &Contraction,
    shapes: &[TensorShape],
    passes: &P,
) -> Result<(Contraction, Vec<RangeConstraint>)>
where
    P: ContractionPasses + ?Sized,
{
    let specs = contraction.specs.len();
    ensure!((2..=4).contains(&specs), UnsupportedAritySnafu { specs });
    trace!(contraction = %contraction, "original");

    let integral = passes.constrain_integral(contraction);
    trace!(contraction = %integral, "index variables made integral");

    let fancy = contraction.output().is_some_and(is_fancy);
    let mut constraints = passes.gather_constraints(&integral, shapes);
    trace!(constraints = %constraints_to_string(&constraints), "gathered");

    let reduced = if fancy && !contraction.no_defract {
        let reduced = passes.reduce_output_polynomials(&integral, &constraints);
        constraints = passes.gather_constraints(&reduced, shapes);
        trace!(contraction = %reduced, constraints = %constraints_to_string(&constraints), "reduced");
        reduced
    } else {
        integral
    };

    passes.merge_parallel_constraints(&mut constraints);
    trace!(constraints = %constraints_to_string(&constraints), "merged parallel constraints");

    let defracted = passes.defract(&reduced, &constraints);
    trace!(contraction = %defracted, "defracted");

    // Defractionalization may introduce new parallel constraints.
    let mut constraints = passes.gather_constraints(&defracted, shapes);
    passes.merge_parallel_constraints(&mut constraints);
    Ok((defracted, constraints))
}
