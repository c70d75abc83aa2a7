//! Simplification of token trees.
//!
//! [`TokenTree::simplify`] performs at most one rewrite per call and reports whether it did
//! anything. The rewrites tried at each node, in order, are:
//!
//! 1. removing parens around an expression made of a single leaf (`(a)` becomes `a`);
//! 2. folding a binary operator applied to two numeric literals (`2 + 3` becomes `5`).
//!
//! If neither applies, the left flank is searched depth-first, then the right flank, then the
//! nodes in the middle; the first rewrite found anywhere ends the call. [`Simplifier`] drives
//! these single steps to a fixed point.
//!
//! Removing multiplications and divisions by one is deliberately not done: `x * 1.` changes the
//! type of an `int` expression, and the tree has no type information to tell.

mod driver;
mod options;

pub use driver::{Simplifier, SimplifyReport};
pub use options::{SimplifyOptions, SimplifyOptionsBuilder};

use crate::{
    error::Result,
    leaf::{Delim, Leaf, OpKind},
    tree::{Child, NodeId, TokenTree},
};
use tracing::trace;

impl TokenTree {
    /// Performs at most one rewrite in the subtree rooted at the given node, with every rewrite
    /// enabled. Returns true if the tree changed.
    pub fn simplify(&mut self, id: NodeId) -> Result<bool> {
        self.simplify_with(id, &SimplifyOptions::default())
    }

    /// Performs at most one of the enabled rewrites in the subtree rooted at the given node.
    /// Returns true if the tree changed.
    pub fn simplify_with(&mut self, id: NodeId, options: &SimplifyOptions) -> Result<bool> {
        if options.strip_parens && self.strip_parens(id)? {
            return Ok(true);
        }
        if options.fold_constants && self.fold_constants(id)? {
            return Ok(true);
        }

        let node = self.node(id)?;
        let children = node.left.iter()
            .chain(node.right.iter())
            .copied()
            .chain(node.middle.iter().filter_map(Child::as_node))
            .collect::<Vec<_>>();
        for child in children {
            if self.simplify_with(child, options)? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Returns true if the node reduces to the given delimiter.
    fn is_delim(&self, id: NodeId, delim: Delim) -> Result<bool> {
        Ok(self.single_child(id)?.leaf().and_then(Leaf::delim) == Some(delim))
    }

    /// Removes the parens of a group whose interior is a single leaf.
    fn strip_parens(&mut self, id: NodeId) -> Result<bool> {
        let node = self.node(id)?;
        let ([open], [middle], [close]) = (node.left.as_slice(), node.middle.as_slice(), node.right.as_slice()) else {
            return Ok(false);
        };
        let (open, close) = (*open, *close);
        if !self.is_delim(open, Delim::OpenParen)? || !self.is_delim(close, Delim::CloseParen)? {
            return Ok(false);
        }

        let atomic = match middle {
            Child::Leaf(_) => true,
            Child::Node(inner) => self.leaf_count(*inner)? == 1,
        };
        if !atomic {
            return Ok(false);
        }

        self.remove_from_parent(open)?;
        self.remove_from_parent(close)?;
        self.discard(open);
        self.discard(close);
        trace!(?id, "removed redundant parens");
        Ok(true)
    }

    /// Replaces a binary operator over two numeric literals with its result.
    fn fold_constants(&mut self, id: NodeId) -> Result<bool> {
        let node = self.node(id)?;
        let ([lhs], [Child::Leaf(op)], [rhs]) = (node.left.as_slice(), node.middle.as_slice(), node.right.as_slice()) else {
            return Ok(false);
        };
        let Some(op) = op.operator().filter(OpKind::is_binary) else {
            return Ok(false);
        };
        let (lhs, rhs) = (*lhs, *rhs);

        let (Some(left), Some(right)) = (self.single_child(lhs)?.leaf(), self.single_child(rhs)?.leaf()) else {
            return Ok(false);
        };
        let (Some(a), Some(b)) = (left.number()?, right.number()?) else {
            return Ok(false);
        };
        let Some(result) = op.apply(a, b) else {
            return Ok(false);
        };
        let folded = Leaf::from_number(result, left.span.start..right.span.end);

        self.remove_from_parent(lhs)?;
        self.remove_from_parent(rhs)?;
        self.discard(lhs);
        self.discard(rhs);
        trace!(?op, result = %folded, "folded constants");
        self.node_mut(id)?.middle = vec![Child::Leaf(folded)];
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{error::kind, leaf::{LeafKind, Number, Precision}, tree::Single};
    use super::*;

    fn step(tree: &mut TokenTree) -> bool {
        let root = tree.root().unwrap();
        tree.simplify(root).unwrap()
    }

    #[test]
    fn folds_integers() {
        let mut tree = TokenTree::parse("2 + 3").unwrap();
        assert!(step(&mut tree));
        assert_eq!(tree.to_string(), "5");

        let root = tree.root().unwrap();
        let leaf = tree.single_child(root).unwrap().leaf().unwrap().clone();
        assert_eq!(leaf.kind, LeafKind::Int);
        assert_eq!(leaf.span, 0..5);
        assert!(!step(&mut tree));
    }

    #[test]
    fn folds_mixed_as_float() {
        let mut tree = TokenTree::parse("2.0 + 3").unwrap();
        assert!(step(&mut tree));
        assert_eq!(tree.to_string(), "5.");

        let root = tree.root().unwrap();
        let leaf = tree.single_child(root).unwrap().leaf().unwrap().clone();
        assert_eq!(leaf.number().unwrap(), Some(Number::Float { value: 5.0, precision: Precision::Single }));
    }

    #[test]
    fn keeps_highest_precision() {
        let mut tree = TokenTree::parse("0.5lf * 3").unwrap();
        assert!(step(&mut tree));
        assert_eq!(tree.to_string(), "1.5lf");
    }

    #[test]
    fn unfoldable_operators() {
        for source in ["1 / 0", "1 < 2", "a + 2", "-2", "1 , 2", "1.5 % 2.0"] {
            let mut tree = TokenTree::parse(source).unwrap();
            assert!(!step(&mut tree), "{} should not fold", source);
        }
    }

    #[test]
    fn strips_atomic_parens() {
        let mut tree = TokenTree::parse("( a )").unwrap();
        assert!(step(&mut tree));
        assert_eq!(tree.to_string(), "a");
        assert!(!step(&mut tree));
    }

    #[test]
    fn keeps_compound_parens() {
        let mut tree = TokenTree::parse("( a + b )").unwrap();
        assert!(!step(&mut tree));
        assert_eq!(tree.to_string(), "(a+b)");
    }

    #[test]
    fn keeps_call_parens() {
        let mut tree = TokenTree::parse("f(x) + g[i]").unwrap();
        assert!(!step(&mut tree));
        assert_eq!(tree.to_string(), "f(x)+g[i]");
    }

    #[test]
    fn left_flank_first() {
        let mut tree = TokenTree::parse("(1 + 2) * (3 + 4)").unwrap();
        assert!(step(&mut tree));
        assert_eq!(tree.to_string(), "(3)*(3+4)");
        assert!(step(&mut tree));
        assert_eq!(tree.to_string(), "3*(3+4)");
    }

    #[test]
    fn disabled_rewrites() {
        let options = SimplifyOptions::default().into_builder().fold_constants(false).build();
        let mut tree = TokenTree::parse("(a) + 1 + 2").unwrap();
        let root = tree.root().unwrap();
        assert!(tree.simplify_with(root, &options).unwrap());
        assert!(!tree.simplify_with(root, &options).unwrap());
        assert_eq!(tree.to_string(), "a+1+2");

        let options = SimplifyOptionsBuilder::new().strip_parens(false).fold_constants(false).build();
        let mut tree = TokenTree::parse("(a)").unwrap();
        let root = tree.root().unwrap();
        assert!(!tree.simplify_with(root, &options).unwrap());
    }

    #[test]
    fn misclassified_literal_is_an_error() {
        let mut tree = TokenTree::parse("1 + 2").unwrap();
        let root = tree.root().unwrap();
        let rhs = tree.node(root).unwrap().right[0];
        tree.node_mut(rhs).unwrap().middle = vec![Child::Leaf(Leaf::new(LeafKind::Int, "zz", 4..5))];

        let err = tree.simplify(root).unwrap_err();
        assert!(err.is::<kind::NumericExtractionFailure>());
        assert!(matches!(tree.single_child(rhs).unwrap(), Single::Leaf(_)));
    }
}
