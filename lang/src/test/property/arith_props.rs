use std::collections::BTreeMap;

use proptest::prelude::*;

use crate::{Polynomial, Rational};

fn arb_rational() -> impl Strategy<Value = Rational> {
    (-40i64..=40, 1i64..=12).prop_map(|(n, d)| Rational::new(n, d))
}

fn arb_polynomial() -> impl Strategy<Value = Polynomial> {
    let name = prop_oneof![Just("i"), Just("j"), Just("k")];
    (arb_rational(), prop::collection::vec((name, arb_rational()), 0..4)).prop_map(|(constant, terms)| {
        terms.into_iter().fold(Polynomial::from_rational(constant), |acc, (name, coeff)| {
            acc + Polynomial::rational_term(name, coeff)
        })
    })
}

proptest! {
    #[test]
    fn rational_is_normalized(n in -1000i64..1000, d in prop_oneof![-50i64..-1, 1i64..50]) {
        let r = Rational::new(n, d);
        prop_assert!(r.denom() > 0);
        prop_assert_eq!(r * Rational::from(d), Rational::from(n));
    }

    #[test]
    fn floor_and_ceil_bracket(r in arb_rational()) {
        prop_assert!(Rational::from(r.floor()) <= r);
        prop_assert!(Rational::from(r.ceil()) >= r);
        prop_assert!(r.ceil() - r.floor() <= 1);
    }

    #[test]
    fn polynomial_eval_is_linear(
        a in arb_polynomial(),
        b in arb_polynomial(),
        i in -10i64..10,
        j in -10i64..10,
        k in -10i64..10,
    ) {
        let values = BTreeMap::from([("i".to_string(), i), ("j".to_string(), j), ("k".to_string(), k)]);
        prop_assert_eq!((a.clone() + b.clone()).eval(&values), a.eval(&values) + b.eval(&values));
        prop_assert_eq!(a.clone() - a.clone(), Polynomial::default());
        prop_assert!((a + b).terms().values().all(|c| !c.is_zero()));
    }
}
