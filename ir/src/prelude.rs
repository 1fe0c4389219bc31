//! Common imports for building and inspecting IR trees.
//!
//! ```rust,ignore
//! use ferrotile_ir::prelude::*;
//! ```

pub use crate::affine::Affine;
pub use crate::block::{Block, Index, RefDir, Refinement, Statement, Tag};
pub use crate::block::{Constant, Intrinsic, Load, Special, Store};
pub use crate::shape::{TensorDimension, TensorShape};

pub use ferrotile_dtype::DataType;
