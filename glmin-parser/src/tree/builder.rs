//! Builds a [`TokenTree`] out of a flat sequence of leaves.
//!
//! The builder scans the sequence left to right with one depth counter for brackets and one for
//! parens. The first group that closes is split off into its own node and spliced back into the
//! sequence, and the scan starts over. Once a sequence has no groups left, it is split at the
//! loosest binding operator found outside of any group; each side is built recursively.

use crate::{
    error::{kind, Error, Result},
    leaf::{classify, Delim, Leaf, OpKind},
};
use super::{NodeId, Payload, Single, TokenTree};
use tracing::{debug, instrument, trace};

/// What the scan found at one position of the sequence.
enum Element {
    Delim(Delim),
    Operator(OpKind),
    Other,
}

impl TokenTree {
    /// Builds a tree from the given leaves.
    pub fn build(leaves: Vec<Leaf>) -> Result<Self> {
        let mut tree = Self::new();
        let root = tree.build_leaves(leaves)?;
        tree.set_root(root);
        Ok(tree)
    }

    /// Classifies the given source and builds a tree from the resulting leaves.
    pub fn parse(source: &str) -> Result<Self> {
        Self::build(classify(source)?)
    }

    /// Builds a subtree from the given leaves, returning [`None`] if there are no leaves.
    ///
    /// The subtree is not attached to anything, and the root of the tree is left unchanged.
    #[instrument(level = "debug", skip_all, fields(leaves = leaves.len()))]
    pub fn build_leaves(&mut self, leaves: Vec<Leaf>) -> Result<Option<NodeId>> {
        let list = leaves.into_iter()
            .map(|leaf| self.construct(leaf.into()))
            .collect::<Result<Vec<_>>>()?;
        self.build_list(list)
    }

    /// Inspects the node at one position of the sequence.
    fn element(&self, id: NodeId) -> Result<Element> {
        let leaf = match self.single_child(id)? {
            Single::Leaf(leaf) => leaf,
            _ => return Ok(Element::Other),
        };

        Ok(match (leaf.delim(), leaf.operator()) {
            (Some(delim), _) => Element::Delim(delim),
            (_, Some(op)) => Element::Operator(op),
            _ => Element::Other,
        })
    }

    fn build_list(&mut self, list: Vec<NodeId>) -> Result<Option<NodeId>> {
        if list.is_empty() {
            return Ok(None);
        }

        let mut brackets = 0;
        let mut parens = 0;
        let mut first_bracket = None;
        let mut first_paren = None;
        let mut split: Option<(usize, OpKind)> = None;

        for index in 0..list.len() {
            let id = list[index];
            match self.element(id)? {
                Element::Delim(delim) if delim.is_bracket() => {
                    let count = delim.update_bracket(brackets);
                    if count == brackets {
                        return Err(self.error_at(id, kind::BracketInconsistency { unclosed: false }));
                    }
                    brackets = count;

                    if brackets <= 0 {
                        let Some(first) = first_bracket else {
                            return Err(self.error_at(id, kind::BracketInconsistency { unclosed: false }));
                        };
                        return self.split_group(list, first, index);
                    } else if brackets == 1 && first_bracket.is_none() {
                        first_bracket = Some(index);
                    }
                },
                Element::Delim(delim) if delim.is_paren() => {
                    let count = delim.update_paren(parens);
                    if count == parens {
                        return Err(self.error_at(id, kind::ParenInconsistency { unclosed: false }));
                    }
                    parens = count;

                    if parens <= 0 {
                        let Some(first) = first_paren else {
                            return Err(self.error_at(id, kind::ParenInconsistency { unclosed: false }));
                        };
                        return self.split_group(list, first, index);
                    } else if parens == 1 && first_paren.is_none() {
                        first_paren = Some(index);
                    }
                },
                Element::Delim(_) => {
                    let lexeme = self.single_child(id)?
                        .leaf()
                        .map(|leaf| leaf.lexeme.clone())
                        .unwrap_or_default();
                    return Err(self.error_at(id, kind::UnexpectedDelimiter { lexeme }));
                },
                Element::Operator(op) if brackets <= 0 && parens <= 0 => {
                    // equal precedence keeps the leftmost operator
                    if split.map_or(true, |(_, best)| op.precedence() < best.precedence()) {
                        split = Some((index, op));
                    }
                },
                Element::Operator(_) | Element::Other => (),
            }
        }

        if let Some(first) = first_bracket.filter(|_| brackets > 0) {
            return Err(self.error_at(list[first], kind::BracketInconsistency { unclosed: true }));
        }
        if let Some(first) = first_paren.filter(|_| parens > 0) {
            return Err(self.error_at(list[first], kind::ParenInconsistency { unclosed: true }));
        }

        match split {
            Some((index, op)) => self.split_operator(list, index, op).map(Some),
            None => {
                trace!(len = list.len(), "no structure, wrapping sequence");
                self.construct(list.into()).map(Some)
            },
        }
    }

    /// Splits the sequence at the operator at `index`, building both sides recursively.
    fn split_operator(&mut self, mut list: Vec<NodeId>, index: usize, op: OpKind) -> Result<NodeId> {
        debug!(?op, index, "splitting at operator");
        let right_list = list.split_off(index + 1);
        let op_id = list.remove(index);
        let span = self.span(op_id);
        let lexeme = self.flatten(op_id)?.into_iter().map(|leaf| leaf.lexeme.as_str()).collect::<String>();
        let missing = |side| Error::new(
            span.clone().into_iter().collect(),
            kind::MissingOperand { operator: lexeme.clone(), side },
        );

        let left = self.build_list(list)?;
        let right = self.build_list(right_list)?;
        if left.is_none() && !op.allows_missing_left() {
            return Err(missing("left"));
        }
        if right.is_none() && !op.allows_missing_right() {
            return Err(missing("right"));
        }

        let node = self.construct(op_id.into())?;
        if let Some(left) = left {
            self.add_left(node, left)?;
        }
        if let Some(right) = right {
            self.add_right(node, right)?;
        }
        Ok(node)
    }

    /// Splits off the group from `first` to `last` (the opening and closing delimiters) into its
    /// own node, splices it back into the sequence, and builds the result.
    ///
    /// Names, types and field accesses directly in front of the opening delimiter are part of the
    /// group's left flank, so that `a.b[i]` and `vec3(x)` stay together.
    fn split_group(&mut self, mut list: Vec<NodeId>, first: usize, last: usize) -> Result<Option<NodeId>> {
        let mut start = first;
        while start > 0 && self.single_child(list[start - 1])?.leaf().is_some_and(Leaf::is_absorbable) {
            start -= 1;
        }
        trace!(start, first, last, "splitting group");

        let mut rest = list.split_off(last + 1);
        let close = list.remove(last);
        let interior = list.split_off(first + 1);
        let opener = list.split_off(start);

        if interior.is_empty() && self.single_child(close)?.leaf().and_then(Leaf::delim) == Some(Delim::CloseSquare) {
            let span = match (self.span(opener[opener.len() - 1]), self.span(close)) {
                (Some(open), Some(close)) => vec![open.start..close.end],
                _ => Vec::new(),
            };
            return Err(Error::new(span, kind::EmptyBrackets));
        }

        let left = if opener.len() > 1 {
            self.construct(opener.into())?
        } else {
            opener[0]
        };
        let middle = self.build_list(interior)?;
        let node = self.construct(middle.map_or(Payload::List(Vec::new()), Payload::Node))?;
        self.add_left(node, left)?;
        self.add_right(node, close)?;

        list.push(node);
        list.append(&mut rest);
        self.build_list(list)
    }
}
