//! Program assembly: the root block, external declarations and op dispatch.

use ferrotile_ir::{Affine, Block, Intrinsic, RefDir, Refinement, Tag, TensorShape};
use ferrotile_lang::{Binding, Bindings, BoundsSolver, ContractionPasses, Frontend, Op, OpKind, Program, ShapeMap};
use snafu::ResultExt;
use tracing::{debug, info};

use crate::config::RunInfo;
use crate::error::*;

/// Working set of one lowering invocation. Everything it holds is read-only.
pub struct Lowering<'a, P: ?Sized> {
    pub(crate) run_info: &'a RunInfo,
    pub(crate) bindings: &'a Bindings,
    pub(crate) passes: &'a P,
}

impl<'a, P> Lowering<'a, P>
where
    P: ContractionPasses + BoundsSolver + ?Sized,
{
    pub fn new(run_info: &'a RunInfo, bindings: &'a Bindings, passes: &'a P) -> Self {
        Self { run_info, bindings, passes }
    }

    /// Lower every op of `program` into a fresh program block.
    pub fn run(self, program: &Program) -> Result<Block> {
        let run_info = self.run_info;
        info!(program = %run_info.program_name, ops = program.ops.len(), "lowering program");

        let mut root = Block::new(run_info.program_name.as_str());
        root.set_tag(Tag::Program);
        let mut main = Block::new("main");
        main.set_tag(Tag::Main);

        self.add_decls(&mut root, &mut main, &run_info.input_shapes, RefDir::In);
        self.add_decls(&mut root, &mut main, &run_info.output_shapes, RefDir::Out);

        for op in &program.ops {
            debug!(op.output = %op.output, op = %op, "processing op");
            self.lower_op(&mut main, op).context(OpSnafu { op: op.to_string() })?;
        }

        for (name, binding) in self.bindings {
            if run_info.is_external(name) {
                continue;
            }
            if let Binding::Tensor(shape) = binding {
                root.refs.push(self.decl(name, shape));
            }
        }

        debug!(kernels = main.blocks().count(), stmts = main.stmts.len(), "lowering done");
        root.push(main);
        Ok(root)
    }

    fn lower_op(&self, main: &mut Block, op: &Op) -> Result<()> {
        match &op.kind {
            OpKind::Contraction(contraction) => self.lower_contraction(main, op, contraction),
            OpKind::Function(call) if call.is_special() => {
                self.lower_special(main, op, call);
                Ok(())
            }
            OpKind::Function(call) if call.is_reshape() => self.lower_reshape(main, op, call),
            OpKind::Function(call) => self.lower_eltwise(main, op, call),
            // Constants are inlined where they are used.
            OpKind::Constant => Ok(()),
        }
    }

    /// Program-scope declaration plus main-scope `dir` refinement for each external.
    fn add_decls(&self, root: &mut Block, main: &mut Block, shapes: &ShapeMap, dir: RefDir) {
        for (name, shape) in shapes {
            root.refs.push(self.decl(name, shape));

            let access = vec![Affine::default(); shape.rank()];
            let refinement = match dir {
                RefDir::Out => Refinement::builder()
                    .dir(RefDir::Out)
                    .from(name.as_str())
                    .into(name.as_str())
                    .access(access)
                    .shape(shape.clone())
                    .agg_op(Intrinsic::ASSIGN)
                    .build(),
                _ => Refinement::builder()
                    .dir(dir)
                    .from(name.as_str())
                    .into(name.as_str())
                    .access(access)
                    .shape(shape.clone())
                    .is_const(self.run_info.is_const(name))
                    .build(),
            };
            main.refs.push(refinement);
        }
    }

    /// A direction-less declaration of a whole tensor.
    fn decl(&self, name: &str, shape: &TensorShape) -> Refinement {
        Refinement::builder()
            .dir(RefDir::None)
            .into(name)
            .access(vec![Affine::default(); shape.rank()])
            .shape(shape.clone())
            .is_const(self.run_info.is_const(name))
            .build()
    }
}

/// Lower an already parsed and bound program.
pub fn lower_program<P>(run_info: &RunInfo, program: &Program, bindings: &Bindings, passes: &P) -> Result<Block>
where
    P: ContractionPasses + BoundsSolver + ?Sized,
{
    Lowering::new(run_info, bindings, passes).run(program)
}

/// Parse, bind and lower `run_info.code`.
pub fn generate<F, P>(run_info: &RunInfo, frontend: &F, passes: &P) -> Result<Block>
where
    F: Frontend + ?Sized,
    P: ContractionPasses + BoundsSolver + ?Sized,
{
    let mut program = frontend.parse(&run_info.code).context(FrontendSnafu)?;
    let bindings =
        frontend.bind(&mut program, &run_info.input_shapes, &run_info.output_shapes).context(FrontendSnafu)?;
    lower_program(run_info, &program, &bindings, passes)
}
