//! Index contractions.
//!
//! A contraction writes `out[p_0, …] agg= comb(in_1[…], in_2[…], …)` for every
//! integer assignment of its index variables that keeps all accesses in
//! range. Matrix multiply, convolution and reductions are all contractions.

use std::collections::BTreeSet;
use std::fmt;

use itertools::Itertools;

use crate::constraint::RangeConstraint;
use crate::polynomial::Polynomial;

/// How multiple writes to one output element combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(strum::Display, strum::AsRefStr)]
pub enum AggregationOp {
    #[default]
    #[strum(serialize = "")]
    None,
    #[strum(serialize = "+")]
    Sum,
    #[strum(serialize = ">")]
    Max,
    #[strum(serialize = "<")]
    Min,
    #[strum(serialize = "*")]
    Prod,
    #[strum(serialize = "=")]
    Assign,
}

/// How the inputs of one iteration combine into a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(strum::Display, strum::AsRefStr)]
pub enum CombinationOp {
    #[default]
    #[strum(serialize = "")]
    None,
    #[strum(serialize = "*")]
    Multiply,
    #[strum(serialize = "+")]
    Plus,
    #[strum(serialize = "==")]
    Eq,
    #[strum(serialize = "?")]
    Cond,
}

/// A tensor reference inside a contraction: one polynomial per dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TensorSpec {
    pub id: String,
    pub spec: Vec<Polynomial>,
}

impl TensorSpec {
    pub fn new(id: impl Into<String>, spec: Vec<Polynomial>) -> Self {
        Self { id: id.into(), spec }
    }
}

impl fmt::Display for TensorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.id, self.spec.iter().join(", "))
    }
}

/// An index contraction; `specs[0]` is the output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contraction {
    pub agg_op: AggregationOp,
    pub comb_op: CombinationOp,
    pub specs: Vec<TensorSpec>,
    /// Explicit user constraints, in addition to the in-range constraints of every access.
    pub constraints: Vec<RangeConstraint>,
    /// Value copied into the output before accumulation.
    pub use_default: Option<String>,
    pub no_defract: bool,
}

impl Contraction {
    pub fn new(agg_op: AggregationOp, comb_op: CombinationOp, specs: Vec<TensorSpec>) -> Self {
        Self { agg_op, comb_op, specs, ..Default::default() }
    }

    pub fn with_constraint(mut self, constraint: RangeConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn with_default(mut self, name: impl Into<String>) -> Self {
        self.use_default = Some(name.into());
        self
    }

    pub fn with_no_defract(mut self) -> Self {
        self.no_defract = true;
        self
    }

    pub fn output(&self) -> Option<&TensorSpec> {
        self.specs.first()
    }

    pub fn inputs(&self) -> &[TensorSpec] {
        self.specs.get(1..).unwrap_or_default()
    }

    /// Every index variable mentioned by an access or a user constraint.
    pub fn index_names(&self) -> BTreeSet<String> {
        let spec_terms = self.specs.iter().flat_map(|s| s.spec.iter());
        let cons_terms = self.constraints.iter().map(|c| &c.poly);
        spec_terms.chain(cons_terms).flat_map(|poly| poly.terms().keys().cloned()).collect()
    }
}

impl fmt::Display for Contraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(output) = self.output() else {
            return write!(f, "<empty contraction>");
        };
        let separator = match self.comb_op {
            CombinationOp::None => ", ".to_string(),
            op => format!(" {op} "),
        };
        write!(f, "{output} = {}({})", self.agg_op, self.inputs().iter().join(&separator))?;
        for constraint in &self.constraints {
            write!(f, ", {} < {}", constraint.poly, constraint.range)?;
        }
        if let Some(default) = &self.use_default {
            write!(f, " default {default}")?;
        }
        if self.no_defract {
            write!(f, " no_defract")?;
        }
        Ok(())
    }
}
