use ferrotile_ir::{Block, Constant, Index, Intrinsic, Load, RefDir, Refinement, Special, Store, Tag};
use ferrotile_lang::{Binding, BoundsSolver, Contraction, ContractionPasses, Op};
use snafu::ResultExt;
use tracing::{debug, warn};

use super::{agg_op_name, combo_op_name, scalar_name};
use crate::compile::compile_contraction;
use crate::error::*;
use crate::init::needs_initialize;
use crate::integerize::integerize;
use crate::program::Lowering;

impl<P> Lowering<'_, P>
where
    P: ContractionPasses + BoundsSolver + ?Sized,
{
    /// Lower a contraction into one kernel, preceded by an initialization
    /// special when not every output element is written exactly once.
    pub(crate) fn lower_contraction(&self, main: &mut Block, op: &Op, contraction: &Contraction) -> Result<()> {
        if self.shape(&op.output)?.byte_size() == 0 {
            debug!(op.output = %op.output, "contraction output has size 0; skipping");
            return Ok(());
        }

        let shapes = contraction.specs.iter().map(|spec| self.shape(&spec.id)).collect::<Result<Vec<_>>>()?;
        let (compiled, range_cons) = compile_contraction(contraction, &shapes, self.passes)?;
        let (bounds, simple_cons) = self
            .passes
            .solve_bounds(&range_cons)
            .inspect_err(|err| warn!(contraction = %compiled, error = %err, "unable to compute bounds for contraction"))
            .context(UnsatisfiableBoundsSnafu { contraction: compiled.to_string() })?;

        let mut kernel = self.new_kernel(main, op);
        kernel.set_tag(Tag::Contraction);
        let agg_op = agg_op_name(compiled.agg_op);
        kernel.add_label(format!("agg_op_{agg_op}"));

        let mut scalar_inputs = Vec::with_capacity(compiled.specs.len().saturating_sub(1));
        for (pos, spec) in compiled.specs.iter().enumerate() {
            let access = spec.spec.iter().map(|poly| integerize(poly, &bounds)).collect::<Result<Vec<_>>>()?;
            if pos == 0 {
                kernel.refs.push(
                    Refinement::builder()
                        .dir(RefDir::Out)
                        .from(spec.id.as_str())
                        .into(spec.id.as_str())
                        .access(access)
                        .shape(self.scalar_shape(&spec.id)?)
                        .maybe_agg_op((!agg_op.is_empty()).then_some(agg_op))
                        .build(),
                );
                continue;
            }

            let scalar = scalar_name(&spec.id);
            scalar_inputs.push(scalar.clone());
            match self.binding(&spec.id)? {
                Binding::IConst(value) => kernel.push(Constant::int(scalar, *value)),
                Binding::FConst(value) => kernel.push(Constant::float(scalar, *value)),
                _ => {
                    kernel.refs.push(
                        Refinement::builder()
                            .dir(RefDir::In)
                            .from(spec.id.as_str())
                            .into(spec.id.as_str())
                            .access(access)
                            .shape(self.scalar_shape(&spec.id)?)
                            .is_const(self.is_const(&spec.id))
                            .build(),
                    );
                    kernel.push(Load::new(spec.id.as_str(), scalar));
                }
            }
        }

        for (name, bound) in &bounds {
            let range = bound.range();
            if range > 1 {
                kernel.idxs.push(Index::new(name.as_str(), range));
            }
        }

        // poly <= rhs  ⇒  rhs - poly >= 0
        for constraint in &simple_cons {
            let lhs = integerize(&constraint.poly, &bounds)? - constraint.rhs;
            kernel.constraints.push(-lhs);
        }

        if needs_initialize(&kernel, &shapes[0]) {
            let init = match &compiled.use_default {
                None => Special { name: Special::ZERO.into(), outputs: vec![op.output.clone()], ..Default::default() },
                Some(default) => Special {
                    name: Special::COPY.into(),
                    inputs: vec![default.clone()],
                    outputs: vec![op.output.clone()],
                    ..Default::default()
                },
            };
            debug!(op.output = %op.output, init = %init.name, "output needs initialization");
            main.push(init);
        }

        let output = scalar_name(&op.output);
        match combo_op_name(compiled.comb_op) {
            Some(combo) if scalar_inputs.len() > 1 => {
                kernel.push(Intrinsic::new(combo, scalar_inputs, vec![output.clone()]));
                kernel.add_label(format!("comb_op_{combo}"));
            }
            _ => kernel.push(Intrinsic::new(Intrinsic::ASSIGN, scalar_inputs, vec![output.clone()])),
        }
        kernel.push(Store::new(output, op.output.as_str()));

        main.push(kernel);
        Ok(())
    }
}
