//! Generators for property-based testing.

use proptest::prelude::*;

use crate::Affine;

/// Index names drawn from a small pool so terms collide often.
pub fn arb_index_name() -> impl Strategy<Value = String> {
    prop_oneof![Just("i".to_string()), Just("j".to_string()), Just("k".to_string()), Just("n".to_string())]
}

/// Generate an affine expression with small coefficients.
pub fn arb_affine() -> impl Strategy<Value = Affine> {
    (-50i64..=50, prop::collection::vec((arb_index_name(), -5i64..=5), 0..4)).prop_map(|(constant, terms)| {
        terms.into_iter().fold(Affine::from_const(constant), |acc, (name, coeff)| acc + Affine::term(name, coeff))
    })
}

/// Concrete values for every name in the pool.
pub fn arb_assignment() -> impl Strategy<Value = std::collections::BTreeMap<String, i64>> {
    (-20i64..=20, -20i64..=20, -20i64..=20, -20i64..=20).prop_map(|(i, j, k, n)| {
        [("i", i), ("j", j), ("k", k), ("n", n)].into_iter().map(|(name, v)| (name.to_string(), v)).collect()
    })
}
