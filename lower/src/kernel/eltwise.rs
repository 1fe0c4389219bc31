use ferrotile_ir::{Affine, Block, Constant, Index, Intrinsic, Load, RefDir, Refinement, Store, Tag};
use ferrotile_lang::{Binding, FunctionCall, Op};

use super::scalar_name;
use crate::error::*;
use crate::program::Lowering;

impl<P: ?Sized> Lowering<'_, P> {
    /// Lower an elementwise function into one kernel over the output's dimensions.
    ///
    /// Tensor inputs broadcast against the output by trailing-dimension
    /// alignment: a missing leading dimension or a size-1 dimension is read
    /// at offset 0.
    pub(crate) fn lower_eltwise(&self, main: &mut Block, op: &Op, call: &FunctionCall) -> Result<()> {
        let mut kernel = self.new_kernel(main, op);
        kernel.set_tag(Tag::Eltwise);
        kernel.add_label(format!("eltwise_{}", call.name));

        let out_shape = self.shape(&op.output)?;
        let mut out_access = Vec::with_capacity(out_shape.rank());
        for (pos, dim) in out_shape.dims.iter().enumerate() {
            let idx = Index::new(format!("i{}", pos + 1), dim.size);
            out_access.push(if dim.size > 1 { Affine::index(idx.name.as_str()) } else { Affine::default() });
            kernel.idxs.push(idx);
        }

        for input in &op.inputs {
            let scalar = scalar_name(input);
            match self.binding(input)? {
                Binding::Tensor(shape) => {
                    let Some(offset) = out_shape.rank().checked_sub(shape.rank()) else {
                        return UnimplementedSnafu {
                            what: format!(
                                "broadcasting rank-{} input '{input}' to rank-{} output",
                                shape.rank(),
                                out_shape.rank()
                            ),
                        }
                        .fail();
                    };
                    let access = shape
                        .dims
                        .iter()
                        .zip(&kernel.idxs[offset..])
                        .map(|(dim, idx)| if dim.size > 1 { Affine::index(idx.name.as_str()) } else { Affine::default() })
                        .collect();
                    kernel.refs.push(
                        Refinement::builder()
                            .dir(RefDir::In)
                            .from(input.as_str())
                            .into(input.as_str())
                            .access(access)
                            .shape(shape.scalar_view())
                            .is_const(self.is_const(input))
                            .build(),
                    );
                    kernel.push(Load::new(input.as_str(), scalar));
                }
                Binding::IConst(value) => kernel.push(Constant::int(scalar, *value)),
                Binding::FConst(value) => kernel.push(Constant::float(scalar, *value)),
                Binding::Tuple(_) => {
                    return UnimplementedSnafu { what: format!("tuple input '{input}' to elementwise '{}'", call.name) }
                        .fail();
                }
            }
        }

        kernel.idxs.retain(|idx| idx.range != 1);

        kernel.refs.push(
            Refinement::builder()
                .dir(RefDir::Out)
                .from(op.output.as_str())
                .into(op.output.as_str())
                .access(out_access)
                .shape(out_shape.scalar_view())
                .build(),
        );

        let output = scalar_name(&op.output);
        let inputs = op.inputs.iter().map(|input| scalar_name(input)).collect();
        kernel.push(Intrinsic::new(call.name.as_str(), inputs, vec![output.clone()]));
        kernel.push(Store::new(output, op.output.as_str()));

        main.push(kernel);
        Ok(())
    }
}
