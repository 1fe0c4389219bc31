use std::collections::BTreeMap;

use ferrotile_lang::{Bound, IndexBounds, Polynomial};
use proptest::prelude::*;

use crate::integerize;

const NAMES: [&str; 3] = ["i", "j", "k"];

fn arb_poly() -> impl Strategy<Value = Polynomial> {
    (-20i64..20, prop::collection::vec(-4i64..=4, NAMES.len())).prop_map(|(constant, coeffs)| {
        NAMES.iter().zip(coeffs).fold(Polynomial::from_const(constant), |acc, (name, c)| acc + Polynomial::term(*name, c))
    })
}

fn arb_bounds() -> impl Strategy<Value = IndexBounds> {
    prop::collection::vec((-5i64..5, 0i64..4), NAMES.len()).prop_map(|ranges| {
        NAMES.iter().zip(ranges).map(|(name, (min, len))| (name.to_string(), Bound::new(min, min + len))).collect()
    })
}

proptest! {
    /// Evaluating the affine at zero-based indices matches the polynomial at the shifted values.
    #[test]
    fn integerize_preserves_values(poly in arb_poly(), bounds in arb_bounds(), picks in prop::collection::vec(0i64..4, NAMES.len())) {
        let affine = integerize(&poly, &bounds).unwrap();

        let mut zero_based = BTreeMap::new();
        let mut original = BTreeMap::new();
        for (name, pick) in NAMES.iter().zip(picks) {
            let bound = bounds[*name];
            let offset = pick.min(bound.max - bound.min);
            zero_based.insert(name.to_string(), offset);
            original.insert(name.to_string(), bound.min + offset);
        }

        let expected = poly.eval(&original);
        prop_assert!(expected.is_integer());
        prop_assert_eq!(affine.eval(&zero_based), expected.numer());
        for (name, bound) in &bounds {
            if bound.is_degenerate() {
                prop_assert_eq!(affine.coeff(name), 0);
            }
        }
    }

    /// With zero-based bounds the affine equals the polynomial term for term.
    #[test]
    fn integerize_zero_based_is_identity(poly in arb_poly()) {
        let bounds: IndexBounds = NAMES.iter().map(|name| (name.to_string(), Bound::new(0, 9))).collect();
        let affine = integerize(&poly, &bounds).unwrap();
        prop_assert_eq!(affine.constant(), poly.constant().numer());
        for name in NAMES {
            prop_assert_eq!(affine.coeff(name), poly.coeff(name).numer());
        }
    }
}
