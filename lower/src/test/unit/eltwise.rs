use ferrotile_ir::{Affine, ConstValue, RefDir, Statement, Tag};
use ferrotile_lang::{Binding, Op};

use crate::test::helpers::{f32_shape, lower, main_of, shapes, tensors};
use crate::{Error, RunInfo};

fn io(inputs: &[(&str, &[u64])], outputs: &[(&str, &[u64])]) -> RunInfo {
    RunInfo::builder().program_name("p").input_shapes(shapes(inputs)).output_shapes(shapes(outputs)).build()
}

#[test]
fn test_broadcast_add() {
    let info = io(&[("A", &[4, 1]), ("B", &[4, 8])], &[("C", &[4, 8])]);
    let bindings = tensors(&[("A", &[4, 1]), ("B", &[4, 8]), ("C", &[4, 8])]);
    let root = lower(&info, vec![Op::function("C", "add", vec!["A".into(), "B".into()])], &bindings).unwrap();

    let kernel = main_of(&root).blocks().next().unwrap();
    assert_eq!(kernel.name, "kernel_0");
    assert!(kernel.tags.contains(Tag::Kernel));
    assert!(kernel.tags.contains(Tag::Eltwise));
    assert!(kernel.has_tag("eltwise_add"));

    let idxs: Vec<_> = kernel.idxs.iter().map(|idx| (idx.name.as_str(), idx.range)).collect();
    assert_eq!(idxs, [("i1", 4), ("i2", 8)]);

    let a = kernel.ref_by_into("A").unwrap();
    assert_eq!(a.dir, RefDir::In);
    assert_eq!(a.access, [Affine::index("i1"), Affine::default()]);
    assert_eq!(a.shape, f32_shape(&[4, 1]).scalar_view());
    assert_eq!(kernel.ref_by_into("B").unwrap().access, [Affine::index("i1"), Affine::index("i2")]);

    let c = kernel.refs.last().unwrap();
    assert_eq!(c.dir, RefDir::Out);
    assert_eq!(c.into, "C");
    assert_eq!(c.agg_op, None);
    assert_eq!(c.access, [Affine::index("i1"), Affine::index("i2")]);

    let body: Vec<_> = kernel.stmts.iter().map(ToString::to_string).collect();
    assert_eq!(body, ["$A = load(A)", "$B = load(B)", "$C = add($A, $B)", "C = store($C)"]);
}

#[test]
fn test_lower_rank_input_aligns_trailing() {
    let info = io(&[("A", &[2, 3, 4]), ("B", &[4])], &[("C", &[2, 3, 4])]);
    let bindings = tensors(&[("A", &[2, 3, 4]), ("B", &[4]), ("C", &[2, 3, 4])]);
    let root = lower(&info, vec![Op::function("C", "mul", vec!["A".into(), "B".into()])], &bindings).unwrap();

    let kernel = main_of(&root).blocks().next().unwrap();
    assert_eq!(kernel.ref_by_into("B").unwrap().access, [Affine::index("i3")]);
}

#[test]
fn test_unit_indices_are_removed() {
    let info = io(&[("A", &[1, 8])], &[("B", &[1, 8])]);
    let bindings = tensors(&[("A", &[1, 8]), ("B", &[1, 8])]);
    let root = lower(&info, vec![Op::function("B", "exp", vec!["A".into()])], &bindings).unwrap();

    let kernel = main_of(&root).blocks().next().unwrap();
    let names: Vec<_> = kernel.idxs.iter().map(|idx| idx.name.as_str()).collect();
    assert_eq!(names, ["i2"]);
    assert!(kernel.idxs.iter().all(|idx| idx.range != 1));
    assert_eq!(kernel.refs.last().unwrap().access, [Affine::default(), Affine::index("i2")]);
}

#[test]
fn test_constant_inputs_are_inlined() {
    let info = io(&[("A", &[4])], &[("B", &[4])]);
    let mut bindings = tensors(&[("A", &[4]), ("B", &[4])]);
    bindings.insert("two".into(), Binding::IConst(2));
    let root = lower(&info, vec![Op::function("B", "mul", vec!["A".into(), "two".into()])], &bindings).unwrap();

    let kernel = main_of(&root).blocks().next().unwrap();
    assert!(kernel.ref_by_into("two").is_none());
    let Statement::Constant(constant) = &kernel.stmts[1] else { panic!("expected a constant") };
    assert_eq!(constant.name, "$two");
    assert_eq!(constant.value, ConstValue::Int(2));
    assert_eq!(kernel.stmts[2].to_string(), "$B = mul($A, $two)");
}

#[test]
fn test_tuple_input_is_unimplemented() {
    let info = io(&[], &[("B", &[4])]);
    let mut bindings = tensors(&[("B", &[4])]);
    bindings.insert("t".into(), Binding::Tuple(vec![Binding::IConst(1)]));
    let err = lower(&info, vec![Op::function("B", "ident", vec!["t".into()])], &bindings).unwrap_err();
    assert!(matches!(err.innermost(), Error::Unimplemented { .. }));
}

#[test]
fn test_higher_rank_input_is_unimplemented() {
    let info = io(&[("A", &[2, 4])], &[("B", &[4])]);
    let bindings = tensors(&[("A", &[2, 4]), ("B", &[4])]);
    let err = lower(&info, vec![Op::function("B", "exp", vec!["A".into()])], &bindings).unwrap_err();
    assert!(matches!(err.innermost(), Error::Unimplemented { .. }));
}

#[test]
fn test_unknown_input() {
    let info = io(&[], &[("B", &[4])]);
    let bindings = tensors(&[("B", &[4])]);
    let err = lower(&info, vec![Op::function("B", "exp", vec!["A".into()])], &bindings).unwrap_err();
    assert_eq!(*err.innermost(), Error::UnknownName { name: "A".into() });
    assert_eq!(err.to_string(), "failed to lower 'B = exp(A)': unknown name 'A'");
}
