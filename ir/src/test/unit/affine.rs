use std::collections::BTreeMap;

use test_case::test_case;

use crate::Affine;

#[test]
fn test_constant_has_no_terms() {
    let c = Affine::from_const(7);
    assert!(c.is_constant());
    assert_eq!(c.constant(), 7);
    assert!(!c.is_zero());
    assert!(Affine::default().is_zero());
}

#[test]
fn test_cancelled_terms_are_removed() {
    let sum = Affine::index("i") + Affine::term("i", -1);
    assert!(sum.is_zero());
    assert!(sum.terms().is_empty());

    let zero_coeff = Affine::term("j", 0);
    assert!(zero_coeff.is_zero());
}

#[test]
fn test_arithmetic() {
    let a = Affine::term("i", 2) + Affine::index("j") + 3;
    let b = Affine::index("j") - 1;
    let diff = a.clone() - b;
    assert_eq!(diff.coeff("i"), 2);
    assert_eq!(diff.coeff("j"), 0);
    assert_eq!(diff.constant(), 4);

    let neg = -a;
    assert_eq!(neg.coeff("i"), -2);
    assert_eq!(neg.coeff("j"), -1);
    assert_eq!(neg.constant(), -3);

    assert!((Affine::index("k") * 0).is_zero());
}

#[test]
fn test_as_unit_index() {
    assert_eq!(Affine::index("i").as_unit_index(), Some("i"));
    assert_eq!((Affine::index("i") + 1).as_unit_index(), None);
    assert_eq!(Affine::term("i", 2).as_unit_index(), None);
    assert_eq!((Affine::index("i") + Affine::index("j")).as_unit_index(), None);
    assert_eq!(Affine::from_const(0).as_unit_index(), None);
}

#[test]
fn test_eval() {
    let expr = Affine::term("i", 4) + Affine::index("j") - 2;
    let values = BTreeMap::from([("i".to_string(), 3), ("j".to_string(), 5)]);
    assert_eq!(expr.eval(&values), 15);
}

#[test_case(Affine::from_const(0), "0"; "zero")]
#[test_case(Affine::from_const(-4), "-4"; "negative constant")]
#[test_case(Affine::index("i"), "i"; "unit index")]
#[test_case(Affine::term("i", -1) + 5, "-i + 5"; "negated index with offset")]
#[test_case(Affine::term("i", 2) + Affine::term("j", -3) - 1, "2*i - 3*j - 1"; "mixed")]
fn test_display(expr: Affine, expected: &str) {
    assert_eq!(expr.to_string(), expected);
}
