//! Parsing and binding seams.
//!
//! Turning source text into a [`Program`] and resolving its names to shapes
//! and constants happens outside this workspace. A [`Frontend`] connects
//! whichever implementation the caller uses.

use crate::binding::{Bindings, ShapeMap};
use crate::error::Result;
use crate::program::Program;

pub trait Frontend {
    /// Parse source text into a program.
    fn parse(&self, code: &str) -> Result<Program>;

    /// Resolve every name in `program` against the given input and output
    /// shapes. May annotate ops in place.
    fn bind(&self, program: &mut Program, inputs: &ShapeMap, outputs: &ShapeMap) -> Result<Bindings>;
}
