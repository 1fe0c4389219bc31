//! Deciding whether a contraction output must be initialized first.

use std::collections::BTreeSet;

use ferrotile_ir::{Block, Intrinsic, TensorShape};

/// Whether the output of `block` needs a zero/copy pass before the kernel runs.
///
/// The block's first refinement is taken as the output. Initialization is
/// skipped only when every output element is provably written: each
/// dimension is accessed by its own full-range loop index (or is a size-1
/// dimension accessed at 0), no constraint restricts the output indices
/// alone, and the kernel does not accumulate over indices beyond the output
/// ones. Anything else answers `true`.
pub fn needs_initialize(block: &Block, out_shape: &TensorShape) -> bool {
    let Some(output) = block.refs.first() else {
        return true;
    };

    let mut out_idxs = BTreeSet::new();
    for (pos, dim) in out_shape.dims.iter().enumerate() {
        let Some(access) = output.access.get(pos) else {
            return true;
        };
        if access.is_zero() && dim.size == 1 {
            continue;
        }
        let Some(idx) = access.as_unit_index() else {
            return true;
        };
        if !out_idxs.insert(idx) {
            return true;
        }
        match block.idx_by_name(idx) {
            Some(decl) if decl.range == dim.size => {}
            _ => return true,
        }
    }

    // Output-only constraints skip some output elements entirely.
    if block.constraints.iter().any(|con| con.terms().keys().all(|name| out_idxs.contains(name.as_str()))) {
        return true;
    }

    let accumulates = output.agg_op.as_deref().is_some_and(|op| !op.is_empty() && op != Intrinsic::ASSIGN);
    accumulates && block.idxs.iter().any(|idx| !out_idxs.contains(idx.name.as_str()))
}
