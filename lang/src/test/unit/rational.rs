use test_case::test_case;

use crate::Rational;

#[test]
fn test_normalization() {
    let r = Rational::new(6, -9);
    assert_eq!(r.numer(), -2);
    assert_eq!(r.denom(), 3);
    assert_eq!(Rational::new(0, -5), Rational::ZERO);
    assert!(Rational::new(4, 2).is_integer());
}

#[test]
fn test_arithmetic() {
    let half = Rational::new(1, 2);
    let third = Rational::new(1, 3);
    assert_eq!(half + third, Rational::new(5, 6));
    assert_eq!(half - third, Rational::new(1, 6));
    assert_eq!(half * third, Rational::new(1, 6));
    assert_eq!(half / third, Rational::new(3, 2));
    assert_eq!(-half, Rational::new(-1, 2));
}

#[test]
fn test_ordering() {
    assert!(Rational::new(1, 3) < Rational::new(1, 2));
    assert!(Rational::new(-1, 2) < Rational::ZERO);
    assert!(Rational::from(2) > Rational::new(3, 2));
}

#[test_case(Rational::new(7, 2), 3, 4; "positive fraction")]
#[test_case(Rational::new(-7, 2), -4, -3; "negative fraction")]
#[test_case(Rational::from(5), 5, 5; "integer")]
fn test_floor_ceil(value: Rational, floor: i64, ceil: i64) {
    assert_eq!(value.floor(), floor);
    assert_eq!(value.ceil(), ceil);
}

#[test_case(Rational::new(3, 4), "3/4"; "fraction")]
#[test_case(Rational::from(-2), "-2"; "integer")]
fn test_display(value: Rational, expected: &str) {
    assert_eq!(value.to_string(), expected);
}

#[test]
#[should_panic(expected = "zero denominator")]
fn test_zero_denominator_panics() {
    let _ = Rational::new(1, 0);
}
