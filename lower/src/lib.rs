//! Lowering of bound tensor programs into the ferrotile block IR.
//!
//! The entry points are [`generate`], which parses and binds source text
//! through a [`Frontend`](ferrotile_lang::Frontend), and [`lower_program`]
//! for programs that are already bound. Both return the root program block:
//!
//! ```text
//! block program #program
//! ├── none A[0, 0] fp32(2:5, 5:1)
//! ├── none B[0, 0] fp32(5:3, 3:1)
//! ├── none C[0, 0] fp32(2:3, 3:1)
//! └── block main #main
//!     ├── in A[0, 0] fp32(2:5, 5:1)
//!     ├── in B[0, 0] fp32(5:3, 3:1)
//!     ├── out:assign C[0, 0] fp32(2:3, 3:1)
//!     ├── C = zero()
//!     └── block kernel_0 #kernel #contraction #agg_op_add #comb_op_mul [i:2, j:3, k:5] // C[i, j] = +(A[i, k] * B[k, j])
//!         ├── out:add C[i, j] fp32(1:3, 1:1)
//!         ├── in A[i, k] fp32(1:5, 1:1)
//!         ├── in B[k, j] fp32(1:3, 1:1)
//!         ├── $A = load(A)
//!         ├── $B = load(B)
//!         ├── $C = mul($A, $B)
//!         └── C = store($C)
//! ```
//!
//! # Module Organization
//!
//! - [`program`] - Program assembly and op dispatch
//! - [`kernel`] - Contraction, elementwise and special kernels
//! - [`compile`] - Contraction normalization
//! - [`integerize`] - Polynomial to affine conversion
//! - [`init`] - Output initialization analysis
//! - [`config`] - Run descriptor

pub mod compile;
pub mod config;
pub mod error;
pub mod init;
pub mod integerize;
pub mod kernel;
pub mod program;


pub use compile::{compile_contraction, is_fancy};
pub use config::RunInfo;
pub use error::{Error, Result};
pub use init::needs_initialize;
pub use integerize::integerize;
pub use program::{Lowering, generate, lower_program};
