//! Values produced by binding a program to concrete shapes.

use std::collections::BTreeMap;
use std::fmt;

use ferrotile_ir::TensorShape;
use itertools::Itertools;

/// What a program name resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    Tensor(TensorShape),
    IConst(i64),
    FConst(f64),
    Tuple(Vec<Binding>),
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Tensor(shape) => write!(f, "{shape}"),
            Binding::IConst(value) => write!(f, "{value}"),
            Binding::FConst(value) => write!(f, "{value:?}"),
            Binding::Tuple(elems) => write!(f, "tuple({})", elems.iter().join(", ")),
        }
    }
}

/// Name → binding, ordered by name.
pub type Bindings = BTreeMap<String, Binding>;

/// Name → shape for program inputs or outputs, ordered by name.
pub type ShapeMap = BTreeMap<String, TensorShape>;
