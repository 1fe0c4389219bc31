//! Parsed tensor programs: a flat list of operations.

use std::fmt;

use itertools::Itertools;

use crate::contraction::Contraction;

/// Function names lowered as opaque whole-tensor operations.
pub const SPECIAL_FUNCTIONS: &[&str] = &["gather", "scatter", "shape", "prng_step", "prng_state", "prng_value"];

/// Function name lowered by forwarding only its first input.
pub const RESHAPE: &str = "reshape";

/// A named attribute attached to an op, e.g. `pid("conv1")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub params: Vec<String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, params: Vec<String>) -> Self {
        Self { name: name.into(), params }
    }
}

/// A function call: elementwise, reshape or special.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionCall {
    pub name: String,
    pub params: Vec<String>,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), params: Vec::new() }
    }

    pub fn is_special(&self) -> bool {
        SPECIAL_FUNCTIONS.contains(&self.name.as_str())
    }

    pub fn is_reshape(&self) -> bool {
        self.name == RESHAPE
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpKind {
    Contraction(Contraction),
    Function(FunctionCall),
    Constant,
}

/// One program statement producing `output`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Op {
    pub output: String,
    pub inputs: Vec<String>,
    pub attributes: Vec<Attribute>,
    pub kind: OpKind,
}

impl Op {
    /// Contraction op; inputs are the ids of the non-output specs.
    pub fn contraction(contraction: Contraction) -> Self {
        let output = contraction.output().map(|spec| spec.id.clone()).unwrap_or_default();
        let inputs = contraction.inputs().iter().map(|spec| spec.id.clone()).collect();
        Self { output, inputs, attributes: Vec::new(), kind: OpKind::Contraction(contraction) }
    }

    pub fn function(output: impl Into<String>, name: impl Into<String>, inputs: Vec<String>) -> Self {
        Self {
            output: output.into(),
            inputs,
            attributes: Vec::new(),
            kind: OpKind::Function(FunctionCall::new(name)),
        }
    }

    /// Constant op; `literal` is kept as its only input.
    pub fn constant(output: impl Into<String>, literal: impl Into<String>) -> Self {
        Self { output: output.into(), inputs: vec![literal.into()], attributes: Vec::new(), kind: OpKind::Constant }
    }

    pub fn with_params(mut self, params: Vec<String>) -> Self {
        if let OpKind::Function(call) = &mut self.kind {
            call.params = params;
        }
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            OpKind::Contraction(contraction) => write!(f, "{contraction}"),
            OpKind::Function(call) => {
                write!(f, "{} = {}", self.output, call.name)?;
                if !call.params.is_empty() {
                    write!(f, "<{}>", call.params.iter().join(", "))?;
                }
                write!(f, "({})", self.inputs.iter().join(", "))
            }
            OpKind::Constant => write!(f, "{} = {}", self.output, self.inputs.iter().join(", ")),
        }
    }
}

/// A parsed program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub ops: Vec<Op>,
}

impl Program {
    pub fn new(ops: Vec<Op>) -> Self {
        Self { ops }
    }
}
