use ferrotile_ir::{Block, Special};
use ferrotile_lang::{FunctionCall, Op};
use snafu::OptionExt;

use crate::error::*;
use crate::program::Lowering;

impl<P: ?Sized> Lowering<'_, P> {
    /// Pass a special op through to `main` unchanged.
    pub(crate) fn lower_special(&self, main: &mut Block, op: &Op, call: &FunctionCall) {
        main.push(Special {
            name: call.name.clone(),
            params: call.params.clone(),
            inputs: op.inputs.clone(),
            outputs: vec![op.output.clone()],
        });
    }

    /// Reshape forwards only the tensor being reshaped; the remaining inputs describe the new shape.
    pub(crate) fn lower_reshape(&self, main: &mut Block, op: &Op, call: &FunctionCall) -> Result<()> {
        let source = op.inputs.first().context(MissingInputSnafu { op: op.to_string() })?;
        main.push(Special {
            name: call.name.clone(),
            params: call.params.clone(),
            inputs: vec![source.clone()],
            outputs: vec![op.output.clone()],
        });
        Ok(())
    }
}
