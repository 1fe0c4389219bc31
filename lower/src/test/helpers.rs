//! Shared builders for lowering tests.

use ferrotile_ir::{Block, DataType, TensorShape};
use ferrotile_lang::error::ParseSnafu;
use ferrotile_lang::{
    AggregationOp, BasicPasses, Binding, Bindings, CombinationOp, Contraction, Frontend, Op, Polynomial, Program,
    ShapeMap, TensorSpec,
};
use snafu::ensure;

use crate::{Result, RunInfo, lower_program};

pub fn f32_shape(sizes: &[u64]) -> TensorShape {
    TensorShape::from_sizes(DataType::Float32, sizes)
}

pub fn idx(name: &str) -> Polynomial {
    Polynomial::index(name)
}

pub fn spec(id: &str, idxs: &[&str]) -> TensorSpec {
    TensorSpec::new(id, idxs.iter().map(|&name| idx(name)).collect())
}

pub fn shapes(entries: &[(&str, &[u64])]) -> ShapeMap {
    entries.iter().map(|&(name, sizes)| (name.to_string(), f32_shape(sizes))).collect()
}

/// Bindings for every tensor in `entries`.
pub fn tensors(entries: &[(&str, &[u64])]) -> Bindings {
    entries.iter().map(|&(name, sizes)| (name.to_string(), Binding::Tensor(f32_shape(sizes)))).collect()
}

/// `C[i, j] = +(A[i, k] * B[k, j])`
pub fn matmul() -> Contraction {
    Contraction::new(
        AggregationOp::Sum,
        CombinationOp::Multiply,
        vec![spec("C", &["i", "j"]), spec("A", &["i", "k"]), spec("B", &["k", "j"])],
    )
}

/// Run descriptor and bindings for `C(2, 3) = A(2, 5) · B(5, 3)`.
pub fn matmul_setup() -> (RunInfo, Bindings) {
    let info = RunInfo::builder()
        .program_name("matmul")
        .input_shapes(shapes(&[("A", &[2, 5]), ("B", &[5, 3])]))
        .output_shapes(shapes(&[("C", &[2, 3])]))
        .build();
    let bindings = tensors(&[("A", &[2, 5]), ("B", &[5, 3]), ("C", &[2, 3])]);
    (info, bindings)
}

pub fn lower(info: &RunInfo, ops: Vec<Op>, bindings: &Bindings) -> Result<Block> {
    lower_program(info, &Program::new(ops), bindings, &BasicPasses)
}

/// The `main` block of a lowered program.
pub fn main_of(root: &Block) -> &Block {
    root.blocks().next().expect("program has a main block")
}

/// Front end returning a fixed program and binding every external plus `temporaries`.
pub struct StubFrontend {
    pub program: Program,
    pub temporaries: Bindings,
}

impl Frontend for StubFrontend {
    fn parse(&self, code: &str) -> ferrotile_lang::Result<Program> {
        ensure!(!code.trim().is_empty(), ParseSnafu { reason: "empty program" });
        Ok(self.program.clone())
    }

    fn bind(&self, _program: &mut Program, inputs: &ShapeMap, outputs: &ShapeMap) -> ferrotile_lang::Result<Bindings> {
        let mut bindings = self.temporaries.clone();
        for (name, shape) in inputs.iter().chain(outputs) {
            bindings.insert(name.clone(), Binding::Tensor(shape.clone()));
        }
        Ok(bindings)
    }
}
