//! Bound tensor-program model for ferrotile.
//!
//! This crate holds what the lowering pass consumes: programs made of
//! contractions and function calls, the bindings that resolve their names,
//! and the numeric collaborators used to analyze contractions.
//!
//! # Module Organization
//!
//! - [`rational`], [`polynomial`] - Exact index arithmetic
//! - [`contraction`] - Index contractions and their operators
//! - [`program`] - Ops and programs
//! - [`binding`] - Name bindings produced by the binder
//! - [`constraint`] - Range/simple constraints and solved bounds
//! - [`bounds`] - Interval-propagation bounds solver
//! - [`passes`] - Collaborator traits and their basic implementations
//! - [`frontend`] - Parser/binder seam

pub mod binding;
pub mod bounds;
pub mod constraint;
pub mod contraction;
pub mod error;
pub mod frontend;
pub mod passes;
pub mod polynomial;
pub mod program;
pub mod rational;


pub use binding::{Binding, Bindings, ShapeMap};
pub use constraint::{Bound, IndexBounds, RangeConstraint, SimpleConstraint};
pub use contraction::{AggregationOp, CombinationOp, Contraction, TensorSpec};
pub use error::{Error, Result};
pub use frontend::Frontend;
pub use passes::{BasicPasses, BoundsSolver, ContractionPasses};
pub use polynomial::Polynomial;
pub use program::{Attribute, FunctionCall, Op, OpKind, Program};
pub use rational::Rational;
