use ferrotile_ir::Statement;
use ferrotile_lang::Op;

use crate::test::helpers::{lower, main_of, shapes, tensors};
use crate::{Error, RunInfo};

#[test]
fn test_reshape_forwards_first_input() {
    let info = RunInfo::builder()
        .program_name("p")
        .input_shapes(shapes(&[("A", &[2, 6])]))
        .output_shapes(shapes(&[("B", &[3, 4])]))
        .build();
    let bindings = tensors(&[("A", &[2, 6]), ("B", &[3, 4])]);
    let op = Op::function("B", "reshape", vec!["A".into(), "3".into(), "4".into()]);

    let root = lower(&info, vec![op], &bindings).unwrap();
    let main = main_of(&root);
    assert_eq!(main.stmts.len(), 1);
    let Statement::Special(special) = &main.stmts[0] else { panic!("expected a special") };
    assert_eq!(special.name, "reshape");
    assert_eq!(special.inputs, ["A"]);
    assert_eq!(special.outputs, ["B"]);
    assert_eq!(main.blocks().count(), 0);
    // Only the external declarations, nothing for the reshape.
    assert_eq!(main.refs.len(), 2);
}

#[test]
fn test_special_passes_everything_through() {
    let info = RunInfo::builder()
        .program_name("p")
        .input_shapes(shapes(&[("A", &[4, 3]), ("I", &[2])]))
        .output_shapes(shapes(&[("G", &[2, 3])]))
        .build();
    let bindings = tensors(&[("A", &[4, 3]), ("I", &[2]), ("G", &[2, 3])]);
    let op = Op::function("G", "gather", vec!["A".into(), "I".into()]).with_params(vec!["0".into()]);

    let root = lower(&info, vec![op], &bindings).unwrap();
    let specials: Vec<_> = main_of(&root).specials().collect();
    assert_eq!(specials.len(), 1);
    assert_eq!(specials[0].name, "gather");
    assert_eq!(specials[0].params, ["0"]);
    assert_eq!(specials[0].inputs, ["A", "I"]);
    assert_eq!(specials[0].outputs, ["G"]);
}

#[test]
fn test_reshape_without_input() {
    let info = RunInfo::builder().program_name("p").build();
    let bindings = tensors(&[("B", &[4])]);
    let err = lower(&info, vec![Op::function("B", "reshape", vec![])], &bindings).unwrap_err();
    assert!(matches!(err.innermost(), Error::MissingInput { .. }));
}
