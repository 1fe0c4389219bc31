use std::collections::BTreeSet;

use crate::RunInfo;
use crate::config::{DEFAULT_PROGRAM_NAME, default_program_name};
use crate::test::helpers::{f32_shape, shapes};

#[test]
fn test_builder() {
    let info = RunInfo::builder()
        .code("O = exp(I)")
        .program_name("net")
        .input_shapes(shapes(&[("I", &[4])]))
        .output_shapes(shapes(&[("O", &[4])]))
        .const_inputs(BTreeSet::from(["I".to_string()]))
        .build();
    assert_eq!(info.code, "O = exp(I)");
    assert_eq!(info.program_name, "net");
    assert!(info.is_const("I"));
    assert!(!info.is_const("O"));
    assert!(info.is_external("I"));
    assert!(info.is_external("O"));
    assert!(!info.is_external("T"));
}

#[test]
fn test_with_input_and_output() {
    let info = RunInfo::builder().program_name("p").build().with_input("A", f32_shape(&[2])).with_output("B", f32_shape(&[2]));
    assert_eq!(info.input_shapes.len(), 1);
    assert_eq!(info.output_shapes.len(), 1);
    assert!(info.const_inputs.is_empty());
}

#[test]
fn test_default_program_name_is_never_empty() {
    // The environment may or may not set a name; either way one is produced.
    let name = default_program_name();
    assert!(!name.is_empty());
    if std::env::var(crate::config::PROGRAM_NAME_ENV).is_err() {
        assert_eq!(name, DEFAULT_PROGRAM_NAME);
    }
}
