//! Block-structured intermediate representation.
//!
//! The IR is a tree of [`Block`]s. Each block is a loop nest over integer
//! indices that all range from 0; memory is reached through
//! [`Refinement`]s whose per-dimension accesses are [`Affine`]
//! expressions, and the body is a list of scalar [`Statement`]s.
//!
//! # Module Organization
//!
//! - [`affine`] - Integer affine expressions over index names
//! - [`shape`] - Tensor shapes (element type + strided dimensions)
//! - [`block`] - Blocks, refinements, statements and tags
//! - [`tree`] - ASCII tree rendering

pub mod affine;
pub mod block;
pub mod prelude;
pub mod shape;
pub mod tree;


pub use affine::Affine;
pub use block::{
    BankDimension, Block, ConstValue, Constant, Index, Intrinsic, Load, Location, RefDir, Refinement, Special,
    Statement, Store, Tag, Tags,
};
pub use shape::{TensorDimension, TensorShape};
pub use tree::render_tree;

pub use ferrotile_dtype::DataType;
