//! Per-op kernel construction.
//!
//! Contractions and elementwise functions become one kernel block each in
//! `main`; special ops and reshape become a single [`Special`] statement.
//!
//! [`Special`]: ferrotile_ir::Special

mod contraction;
mod eltwise;
mod special;

use ferrotile_ir::{Block, DataType, Intrinsic, Tag, TensorShape};
use ferrotile_lang::{AggregationOp, Binding, CombinationOp, Op};
use snafu::OptionExt;

use crate::error::*;
use crate::program::Lowering;

/// Name of the per-iteration scalar holding one element of `name`.
pub fn scalar_name(name: &str) -> String {
    format!("${name}")
}

/// Intrinsic applied when writes to one output element combine; empty for none.
pub fn agg_op_name(op: AggregationOp) -> &'static str {
    match op {
        AggregationOp::Sum => Intrinsic::SUM,
        AggregationOp::Max => Intrinsic::MAX,
        AggregationOp::Min => Intrinsic::MIN,
        AggregationOp::Prod => Intrinsic::PROD,
        AggregationOp::Assign => Intrinsic::ASSIGN,
        AggregationOp::None => "",
    }
}

pub fn combo_op_name(op: CombinationOp) -> Option<&'static str> {
    match op {
        CombinationOp::Multiply => Some(Intrinsic::MUL),
        CombinationOp::Plus => Some(Intrinsic::ADD),
        CombinationOp::Eq => Some(Intrinsic::EQ),
        CombinationOp::Cond => Some(Intrinsic::COND),
        CombinationOp::None => None,
    }
}

impl<P: ?Sized> Lowering<'_, P> {
    /// An empty kernel block for `op`, named after its future position in `main`.
    ///
    /// A `pid` attribute with a parameter overrides the generated name.
    pub(crate) fn new_kernel(&self, main: &Block, op: &Op) -> Block {
        let pid = op.attributes.iter().filter(|attr| attr.name == "pid").filter_map(|attr| attr.params.first()).last();
        let name = match pid {
            Some(pid) => pid.clone(),
            None => format!("kernel_{}", main.stmts.len()),
        };
        let mut kernel = Block::new(name);
        kernel.comments = op.to_string();
        kernel.set_tag(Tag::Kernel);
        kernel
    }

    pub(crate) fn binding(&self, name: &str) -> Result<&Binding> {
        self.bindings.get(name).context(UnknownNameSnafu { name })
    }

    /// Shape of a bound value; constants are rank 0.
    pub(crate) fn shape(&self, name: &str) -> Result<TensorShape> {
        match self.binding(name)? {
            Binding::Tensor(shape) => Ok(shape.clone()),
            Binding::IConst(_) => Ok(TensorShape::new(DataType::Int64, std::iter::empty())),
            Binding::FConst(_) => Ok(TensorShape::new(DataType::Float64, std::iter::empty())),
            Binding::Tuple(_) => UnimplementedSnafu { what: format!("shape of tuple '{name}'") }.fail(),
        }
    }

    /// The per-iteration view of `name`'s shape.
    pub(crate) fn scalar_shape(&self, name: &str) -> Result<TensorShape> {
        Ok(self.shape(name)?.scalar_view())
    }

    pub(crate) fn is_const(&self, name: &str) -> bool {
        self.run_info.is_const(name)
    }
}
