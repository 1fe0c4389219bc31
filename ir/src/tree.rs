//! Tree visualization for blocks.
//!
//! Renders a [`Block`] and everything it owns as an ASCII tree, one line per
//! index, constraint, refinement and statement.

use std::borrow::Cow;
use std::io;

use itertools::Itertools;
use ptree::{Style, TreeItem};

use crate::block::{Block, Statement};

/// One node of the rendered tree.
#[derive(Clone)]
enum BlockTree<'a> {
    Block(&'a Block),
    Line(String),
}

impl<'a> BlockTree<'a> {
    fn from_statement(stmt: &'a Statement) -> Self {
        match stmt {
            Statement::Block(block) => BlockTree::Block(block),
            other => BlockTree::Line(other.to_string()),
        }
    }
}

impl TreeItem for BlockTree<'_> {
    type Child = Self;

    fn write_self<W: io::Write>(&self, f: &mut W, _style: &Style) -> io::Result<()> {
        match self {
            BlockTree::Block(block) => {
                write!(f, "block {}", block.name)?;
                if !block.tags.is_empty() {
                    write!(f, " #{}", block.tags.iter().join(" #"))?;
                }
                if !block.idxs.is_empty() {
                    write!(f, " [{}]", block.idxs.iter().join(", "))?;
                }
                if !block.comments.is_empty() {
                    write!(f, " // {}", block.comments)?;
                }
                Ok(())
            }
            BlockTree::Line(line) => write!(f, "{line}"),
        }
    }

    fn children(&self) -> Cow<'_, [Self::Child]> {
        let BlockTree::Block(block) = self else {
            return Cow::Borrowed(&[]);
        };
        let constraints = block.constraints.iter().map(|c| BlockTree::Line(format!("{c} >= 0")));
        let refs = block.refs.iter().map(|r| BlockTree::Line(r.to_string()));
        let stmts = block.stmts.iter().map(BlockTree::from_statement);
        Cow::Owned(constraints.chain(refs).chain(stmts).collect())
    }
}

/// Render a block tree as an ASCII string.
pub fn render_tree(block: &Block) -> String {
    let tree = BlockTree::Block(block);
    let mut buf = Vec::new();
    ptree::write_tree(&tree, &mut buf).expect("tree rendering failed");
    String::from_utf8(buf).expect("invalid utf8 in tree")
}

impl Block {
    /// ASCII tree rendering of this block; see [`render_tree`].
    pub fn tree(&self) -> String {
        render_tree(self)
    }
}
