//! Run descriptor for one lowering invocation.
//!
//! Supports both explicit construction through a bon builder and an
//! environment variable fallback for the program name.

use std::collections::BTreeSet;

use bon::bon;
use ferrotile_ir::TensorShape;
use ferrotile_lang::ShapeMap;

/// Environment variable consulted for the default program name.
pub const PROGRAM_NAME_ENV: &str = "FERROTILE_PROGRAM_NAME";

/// Program name used when neither the builder nor the environment sets one.
pub const DEFAULT_PROGRAM_NAME: &str = "program";

/// Everything one lowering needs besides its collaborators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunInfo {
    /// Source text handed to the front end.
    pub code: String,
    pub input_shapes: ShapeMap,
    pub output_shapes: ShapeMap,
    /// Name of the root program block.
    pub program_name: String,
    /// Inputs that stay read-only for the whole program.
    pub const_inputs: BTreeSet<String>,
}

#[bon]
impl RunInfo {
    /// Create a run descriptor with builder pattern.
    ///
    /// ```rust
    /// # use ferrotile_lower::RunInfo;
    /// let info = RunInfo::builder().code("C = exp(A)").program_name("net").build();
    /// assert_eq!(info.program_name, "net");
    /// ```
    #[builder]
    pub fn new(
        #[builder(into, default)] code: String,
        #[builder(default)] input_shapes: ShapeMap,
        #[builder(default)] output_shapes: ShapeMap,
        #[builder(into, default = default_program_name())] program_name: String,
        #[builder(default)] const_inputs: BTreeSet<String>,
    ) -> Self {
        Self { code, input_shapes, output_shapes, program_name, const_inputs }
    }

    pub fn is_const(&self, name: &str) -> bool {
        self.const_inputs.contains(name)
    }

    pub fn is_external(&self, name: &str) -> bool {
        self.input_shapes.contains_key(name) || self.output_shapes.contains_key(name)
    }

    pub fn with_input(mut self, name: impl Into<String>, shape: TensorShape) -> Self {
        self.input_shapes.insert(name.into(), shape);
        self
    }

    pub fn with_output(mut self, name: impl Into<String>, shape: TensorShape) -> Self {
        self.output_shapes.insert(name.into(), shape);
        self
    }
}

/// Program name from the environment.
///
/// # Environment Variables
///
/// * `FERROTILE_PROGRAM_NAME` - Root block name (default: `program`)
pub fn default_program_name() -> String {
    std::env::var(PROGRAM_NAME_ENV).ok().filter(|name| !name.is_empty()).unwrap_or_else(|| DEFAULT_PROGRAM_NAME.to_string())
}
