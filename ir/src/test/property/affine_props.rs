//! Algebraic properties of affine expressions.

use proptest::prelude::*;

use super::generators::*;

proptest! {
    /// Coefficients stored in the map are never zero.
    #[test]
    fn coefficients_are_nonzero(a in arb_affine(), b in arb_affine()) {
        let sum = a.clone() + b.clone();
        let diff = a - b;
        prop_assert!(sum.terms().values().all(|&c| c != 0));
        prop_assert!(diff.terms().values().all(|&c| c != 0));
    }

    /// Evaluation is a homomorphism for addition and negation.
    #[test]
    fn eval_is_linear(a in arb_affine(), b in arb_affine(), values in arb_assignment()) {
        prop_assert_eq!((a.clone() + b.clone()).eval(&values), a.eval(&values) + b.eval(&values));
        prop_assert_eq!((-a.clone()).eval(&values), -a.eval(&values));
        prop_assert_eq!((a.clone() * 3).eval(&values), 3 * a.eval(&values));
    }

    /// Subtracting an expression from itself is the zero expression.
    #[test]
    fn self_difference_is_zero(a in arb_affine()) {
        prop_assert!((a.clone() - a).is_zero());
    }
}
