//! Blocks, refinements and statements.
//!
//! A [`Block`] is one loop nest: a list of indices, the constraints that
//! prune the iteration space, the refinements (typed views onto memory) the
//! body may touch, and the body itself. Blocks nest through
//! [`Statement::Block`]; every node is exclusively owned by its parent.

use std::collections::BTreeSet;
use std::fmt;

use bon::bon;
use itertools::Itertools;

use crate::affine::Affine;
use crate::shape::TensorShape;

// =========================================================================
// Tags
// =========================================================================

/// Well-known block tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(strum::Display, strum::EnumString, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Tag {
    Program,
    Main,
    Kernel,
    Contraction,
    Eltwise,
}

/// Tag set of a block: closed well-known tags plus data-dependent labels
/// such as `agg_op_add` or `eltwise_exp`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tags {
    known: BTreeSet<Tag>,
    labels: BTreeSet<String>,
}

impl Tags {
    pub fn insert(&mut self, tag: Tag) {
        self.known.insert(tag);
    }

    pub fn insert_label(&mut self, label: impl Into<String>) {
        let label = label.into();
        match label.parse::<Tag>() {
            Ok(tag) => {
                self.known.insert(tag);
            }
            Err(_) => {
                self.labels.insert(label);
            }
        }
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.known.contains(&tag)
    }

    /// Check a tag by its textual form, well-known or label.
    pub fn has(&self, name: &str) -> bool {
        match name.parse::<Tag>() {
            Ok(tag) => self.known.contains(&tag),
            Err(_) => self.labels.contains(name),
        }
    }

    pub fn len(&self) -> usize {
        self.known.len() + self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty() && self.labels.is_empty()
    }

    /// All tags as strings, well-known first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.known.iter().map(|tag| tag.as_ref()).chain(self.labels.iter().map(String::as_str))
    }
}

// =========================================================================
// Indices and refinements
// =========================================================================

/// A loop index declaration. Indices always range over `0..range`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Index {
    pub name: String,
    pub range: u64,
    /// Binding to an enclosing block's indices; zero for free loop indices.
    pub affine: Affine,
}

impl Index {
    pub fn new(name: impl Into<String>, range: u64) -> Self {
        Self { name: name.into(), range, affine: Affine::default() }
    }
}

/// Direction of data flow through a refinement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum RefDir {
    #[default]
    None,
    In,
    Out,
    #[strum(serialize = "inout")]
    InOut,
}

/// Placement of a refinement in a memory unit. Populated by later passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub name: String,
    pub unit: Affine,
}

/// Dimension used to spread a refinement across memory banks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BankDimension {
    pub dim_pos: usize,
}

/// A typed view of a named memory region inside a block.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Refinement {
    pub dir: RefDir,
    /// Name in the enclosing scope; empty for a fresh declaration.
    pub from: String,
    /// Name inside this block.
    pub into: String,
    /// Per-dimension offset for each iteration; one entry per shape dimension.
    pub access: Vec<Affine>,
    pub shape: TensorShape,
    /// Aggregation intrinsic applied on write.
    pub agg_op: Option<String>,
    pub location: Location,
    pub is_const: bool,
    pub offset: u64,
    pub bank_dim: Option<BankDimension>,
}

#[bon]
impl Refinement {
    #[builder]
    pub fn new(
        dir: RefDir,
        #[builder(into, default)] from: String,
        #[builder(into)] into: String,
        access: Vec<Affine>,
        shape: TensorShape,
        #[builder(into)] agg_op: Option<String>,
        #[builder(default)] location: Location,
        #[builder(default)] is_const: bool,
        #[builder(default)] offset: u64,
        bank_dim: Option<BankDimension>,
    ) -> Self {
        debug_assert_eq!(access.len(), shape.rank(), "refinement access must match shape rank");
        Self { dir, from, into, access, shape, agg_op, location, is_const, offset, bank_dim }
    }
}

// =========================================================================
// Statements
// =========================================================================

/// Literal value of a [`Constant`] statement.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstValue {
    Int(i64),
    Float(f64),
}

/// Read one element of a refinement into a scalar.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Load {
    pub from: String,
    pub into: String,
}

impl Load {
    pub fn new(from: impl Into<String>, into: impl Into<String>) -> Self {
        Self { from: from.into(), into: into.into() }
    }
}

/// Write a scalar into one element of a refinement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Store {
    pub from: String,
    pub into: String,
}

impl Store {
    pub fn new(from: impl Into<String>, into: impl Into<String>) -> Self {
        Self { from: from.into(), into: into.into() }
    }
}

/// Materialize a literal into a scalar.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constant {
    pub name: String,
    pub value: ConstValue,
}

impl Constant {
    pub fn int(name: impl Into<String>, value: i64) -> Self {
        Self { name: name.into(), value: ConstValue::Int(value) }
    }

    pub fn float(name: impl Into<String>, value: f64) -> Self {
        Self { name: name.into(), value: ConstValue::Float(value) }
    }
}

/// A scalar operation run once per iteration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Intrinsic {
    pub name: String,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

impl Intrinsic {
    pub const ASSIGN: &'static str = "assign";
    pub const SUM: &'static str = "add";
    pub const MAX: &'static str = "max";
    pub const MIN: &'static str = "min";
    pub const PROD: &'static str = "mul";
    pub const MUL: &'static str = "mul";
    pub const ADD: &'static str = "add";
    pub const EQ: &'static str = "eq";
    pub const COND: &'static str = "cond";

    pub fn new(name: impl Into<String>, inputs: Vec<String>, outputs: Vec<String>) -> Self {
        Self { name: name.into(), inputs, outputs }
    }
}

/// An opaque whole-tensor operation passed through without a loop nest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Special {
    pub name: String,
    pub params: Vec<String>,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

impl Special {
    pub const ZERO: &'static str = "zero";
    pub const COPY: &'static str = "copy";
}

/// One entry of a block body.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Statement {
    Block(Box<Block>),
    Load(Load),
    Store(Store),
    Constant(Constant),
    Intrinsic(Intrinsic),
    Special(Special),
}

impl Statement {
    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Statement::Block(block) => Some(block),
            _ => None,
        }
    }

    pub fn as_special(&self) -> Option<&Special> {
        match self {
            Statement::Special(special) => Some(special),
            _ => None,
        }
    }
}

impl From<Block> for Statement {
    fn from(block: Block) -> Self {
        Statement::Block(Box::new(block))
    }
}

impl From<Load> for Statement {
    fn from(load: Load) -> Self {
        Statement::Load(load)
    }
}

impl From<Store> for Statement {
    fn from(store: Store) -> Self {
        Statement::Store(store)
    }
}

impl From<Constant> for Statement {
    fn from(constant: Constant) -> Self {
        Statement::Constant(constant)
    }
}

impl From<Intrinsic> for Statement {
    fn from(intrinsic: Intrinsic) -> Self {
        Statement::Intrinsic(intrinsic)
    }
}

impl From<Special> for Statement {
    fn from(special: Special) -> Self {
        Statement::Special(special)
    }
}

// =========================================================================
// Block
// =========================================================================

/// One loop nest, or one of the program/main containers.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    pub name: String,
    /// Free-form description, usually the source op that produced the block.
    pub comments: String,
    pub tags: Tags,
    pub idxs: Vec<Index>,
    /// Each constraint means `expr >= 0`.
    pub constraints: Vec<Affine>,
    pub refs: Vec<Refinement>,
    pub stmts: Vec<Statement>,
}

impl Block {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    pub fn set_tag(&mut self, tag: Tag) {
        self.tags.insert(tag);
    }

    pub fn add_label(&mut self, label: impl Into<String>) {
        self.tags.insert_label(label);
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.has(name)
    }

    pub fn idx_by_name(&self, name: &str) -> Option<&Index> {
        self.idxs.iter().find(|idx| idx.name == name)
    }

    pub fn ref_by_into(&self, name: &str) -> Option<&Refinement> {
        self.refs.iter().find(|r| r.into == name)
    }

    pub fn push(&mut self, stmt: impl Into<Statement>) {
        self.stmts.push(stmt.into());
    }

    /// Direct child blocks in statement order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.stmts.iter().filter_map(Statement::as_block)
    }

    /// Direct child specials in statement order.
    pub fn specials(&self) -> impl Iterator<Item = &Special> {
        self.stmts.iter().filter_map(Statement::as_special)
    }
}

// =========================================================================
// Display
// =========================================================================

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.affine.is_zero() {
            write!(f, "{}:{}", self.name, self.range)
        } else {
            write!(f, "{}:{} = {}", self.name, self.range, self.affine)
        }
    }
}

impl fmt::Display for Refinement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dir)?;
        if let Some(agg_op) = &self.agg_op {
            write!(f, ":{agg_op}")?;
        }
        if self.is_const {
            write!(f, " const")?;
        }
        write!(f, " {}", self.into)?;
        if !self.from.is_empty() && self.from != self.into {
            write!(f, " = {}", self.from)?;
        }
        write!(f, "[{}] {}", self.access.iter().join(", "), self.shape)?;
        if self.offset != 0 {
            write!(f, " @{}", self.offset)?;
        }
        Ok(())
    }
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstValue::Int(value) => write!(f, "{value}"),
            ConstValue::Float(value) => write!(f, "{value:?}"),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Block(block) => write!(f, "block {}", block.name),
            Statement::Load(load) => write!(f, "{} = load({})", load.into, load.from),
            Statement::Store(store) => write!(f, "{} = store({})", store.into, store.from),
            Statement::Constant(constant) => write!(f, "{} = {}", constant.name, constant.value),
            Statement::Intrinsic(intr) => {
                write!(f, "{} = {}({})", intr.outputs.iter().join(", "), intr.name, intr.inputs.iter().join(", "))
            }
            Statement::Special(special) => {
                write!(f, "{} = {}", special.outputs.iter().join(", "), special.name)?;
                if !special.params.is_empty() {
                    write!(f, "<{}>", special.params.iter().join(", "))?;
                }
                write!(f, "({})", special.inputs.iter().join(", "))
            }
        }
    }
}
