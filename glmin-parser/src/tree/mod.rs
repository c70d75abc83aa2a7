//! The token tree: a ternary container used uniformly for leaves, operator applications and
//! bracket / paren groupings.
//!
//! Every node has a left flank, a middle and a right flank. Operator nodes hold the operator leaf
//! in the middle and their operands on the flanks; grouping nodes hold the opening delimiter (and
//! anything absorbed in front of it) on the left, the interior in the middle and the closing
//! delimiter on the right; plain nodes hold a single leaf or a run of children in the middle.
//!
//! Nodes live in a [`generational_arena::Arena`] owned by the [`TokenTree`] and are addressed by
//! [`NodeId`] handles. The parent handle of a node is bookkeeping only; ownership always flows
//! from the slot that holds the node.

pub mod builder;
pub mod fmt;
pub mod normalize;

use crate::{
    error::{kind, Error, Result},
    leaf::Leaf,
};
use generational_arena::{Arena, Index};
use std::ops::Range;
use tracing::instrument;

/// A handle to a node of a [`TokenTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Index);

/// An entry of a node's middle slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    /// A structural child node.
    Node(NodeId),

    /// An opaque leaf token.
    Leaf(Leaf),
}

impl Child {
    /// Returns the node handle of this child, if it is one.
    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Self::Node(id) => Some(*id),
            Self::Leaf(_) => None,
        }
    }
}

/// Content that can be wrapped into a new node or added to one of its slots.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Leaf(Leaf),
    Node(NodeId),
    List(Vec<Child>),
}

impl From<Leaf> for Payload {
    fn from(leaf: Leaf) -> Self {
        Self::Leaf(leaf)
    }
}

impl From<NodeId> for Payload {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl From<Child> for Payload {
    fn from(child: Child) -> Self {
        match child {
            Child::Node(id) => Self::Node(id),
            Child::Leaf(leaf) => Self::Leaf(leaf),
        }
    }
}

impl From<Vec<NodeId>> for Payload {
    fn from(ids: Vec<NodeId>) -> Self {
        Self::List(ids.into_iter().map(Child::Node).collect())
    }
}

/// What a node reduces to when seen through degenerate wrappers. See
/// [`TokenTree::single_child`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Single<'a> {
    /// The node is a genuine composite, or its only middle entry is this node.
    Node(NodeId),

    /// The node's only content is this leaf.
    Leaf(&'a Leaf),

    /// The node has several middle entries and no flanks.
    Many(&'a [Child]),
}

impl<'a> Single<'a> {
    /// Returns the leaf, if the node reduces to one.
    pub fn leaf(self) -> Option<&'a Leaf> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }
}

/// A node of the token tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    /// The node whose slot holds this node, if any.
    pub parent: Option<NodeId>,

    /// Left flank: the left operand, or the opening delimiter of a group.
    pub left: Vec<NodeId>,

    /// Middle: the operator, the interior of a group, or plain content.
    pub middle: Vec<Child>,

    /// Right flank: the right operand, or the closing delimiter of a group.
    pub right: Vec<NodeId>,
}

impl Node {
    /// Returns true if either flank holds a child.
    pub fn has_flanks(&self) -> bool {
        !self.left.is_empty() || !self.right.is_empty()
    }

    /// Returns the handles of all structural children, in left, middle, right order.
    pub fn children(&self) -> Vec<NodeId> {
        self.left.iter()
            .copied()
            .chain(self.middle.iter().filter_map(Child::as_node))
            .chain(self.right.iter().copied())
            .collect()
    }
}

/// An arena of token tree nodes, with an optional root.
#[derive(Debug, Clone, Default)]
pub struct TokenTree {
    arena: Arena<Node>,
    root: Option<NodeId>,
}

impl TokenTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the root node of the tree, if there is one.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Sets the root node of the tree.
    pub fn set_root(&mut self, root: Option<NodeId>) {
        self.root = root;
    }

    /// Returns the number of nodes allocated in the arena, reachable or not.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns true if the arena holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns the number of nodes reachable from the root.
    pub fn reachable(&self) -> usize {
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        let mut count = 0;
        while let Some(id) = stack.pop() {
            if let Some(node) = self.get(id) {
                count += 1;
                stack.extend(node.children());
            }
        }
        count
    }

    /// Returns the node with the given handle, if it is still alive.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(id.0)
    }

    /// Returns the node with the given handle.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.arena.get(id.0)
            .ok_or_else(|| Error::new(Vec::new(), kind::DanglingNode))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.arena.get_mut(id.0)
            .ok_or_else(|| Error::new(Vec::new(), kind::DanglingNode))
    }

    /// Builds an error pointing at the source covered by the given node.
    pub(crate) fn error_at(&self, id: NodeId, kind: impl crate::error::ErrorKind + 'static) -> Error {
        Error::new(self.span(id).into_iter().collect(), kind)
    }

    /// Returns the region of source code covered by the leaves of the node, or [`None`] if the
    /// node holds no leaves.
    pub fn span(&self, id: NodeId) -> Option<Range<usize>> {
        let mut span: Option<Range<usize>> = None;
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            let Some(node) = self.get(id) else { continue };
            for child in &node.middle {
                if let Child::Leaf(leaf) = child {
                    span = Some(match span {
                        Some(span) => span.start.min(leaf.span.start)..span.end.max(leaf.span.end),
                        None => leaf.span.clone(),
                    });
                }
            }
            stack.extend(node.children());
        }
        span
    }

    /// Wraps the payload into a new, parentless node.
    ///
    /// The payload is first reduced through degenerate wrappers: a node with no flanks and a
    /// single middle entry is replaced by that entry, repeatedly, and a one-element list is
    /// replaced by its element. Wrapper nodes consumed this way are freed. The new node never
    /// wraps a chain of single-child nodes.
    #[instrument(level = "trace", skip(self))]
    pub fn construct(&mut self, payload: Payload) -> Result<NodeId> {
        let payload = self.descend(payload)?;
        let id = NodeId(self.arena.insert(Node::default()));
        self.add_middle(id, payload)?;
        Ok(id)
    }

    /// Reduces a payload through degenerate wrappers, detaching every node it passes through from
    /// its parent.
    fn descend(&mut self, payload: Payload) -> Result<Payload> {
        match payload {
            Payload::Leaf(leaf) => Ok(Payload::Leaf(leaf)),
            Payload::Node(id) => {
                self.release(id)?;
                if matches!(self.single_child(id)?, Single::Node(single) if single == id) {
                    return Ok(Payload::Node(id));
                }

                let node = self.arena.remove(id.0)
                    .ok_or_else(|| Error::new(Vec::new(), kind::DanglingNode))?;
                self.descend(Payload::List(node.middle))
            },
            Payload::List(mut children) => {
                for child in &children {
                    if let Child::Node(id) = child {
                        self.node_mut(*id)?.parent = None;
                    }
                }

                if children.len() == 1 {
                    let child = children.remove(0);
                    self.descend(child.into())
                } else {
                    Ok(Payload::List(children))
                }
            },
        }
    }

    /// Detaches a node from its parent, if it is still held by it.
    fn release(&mut self, id: NodeId) -> Result<()> {
        if let Some(parent) = self.node(id)?.parent {
            if self.get(parent).is_some_and(|node| node.children().contains(&id)) {
                self.remove_child(parent, id)?;
            }
            self.node_mut(id)?.parent = None;
        }
        Ok(())
    }

    /// Records `parent` as the parent of `child`.
    ///
    /// Fails with [`kind::ParentConflict`] if the child is already attached to a different
    /// node.
    pub fn set_parent(&mut self, child: NodeId, parent: NodeId) -> Result<()> {
        match self.node(child)?.parent {
            Some(existing) if existing != parent => Err(self.error_at(child, kind::ParentConflict)),
            _ => {
                self.node_mut(child)?.parent = Some(parent);
                Ok(())
            },
        }
    }

    /// Adds the payload to the left flank of the node. Lists are added element by element.
    pub fn add_left(&mut self, id: NodeId, payload: impl Into<Payload>) -> Result<()> {
        for child in self.flank_children(payload.into(), "left")? {
            self.set_parent(child, id)?;
            self.node_mut(id)?.left.push(child);
        }
        Ok(())
    }

    /// Adds the payload to the right flank of the node. Lists are added element by element.
    pub fn add_right(&mut self, id: NodeId, payload: impl Into<Payload>) -> Result<()> {
        for child in self.flank_children(payload.into(), "right")? {
            self.set_parent(child, id)?;
            self.node_mut(id)?.right.push(child);
        }
        Ok(())
    }

    /// Adds the payload to the middle of the node. Leaves are stored as they are.
    pub fn add_middle(&mut self, id: NodeId, payload: impl Into<Payload>) -> Result<()> {
        let children = match payload.into() {
            Payload::Leaf(leaf) => vec![Child::Leaf(leaf)],
            Payload::Node(child) => vec![Child::Node(child)],
            Payload::List(children) => children,
        };

        for child in children {
            if let Child::Node(child) = child {
                self.set_parent(child, id)?;
            }
            self.node_mut(id)?.middle.push(child);
        }
        Ok(())
    }

    /// Checks that every element of the payload is a node, as flanks only hold nodes.
    fn flank_children(&self, payload: Payload, side: &'static str) -> Result<Vec<NodeId>> {
        let children = match payload {
            Payload::Node(id) => return Ok(vec![id]),
            Payload::Leaf(leaf) => vec![Child::Leaf(leaf)],
            Payload::List(children) => children,
        };

        children.into_iter()
            .map(|child| match child {
                Child::Node(id) => Ok(id),
                Child::Leaf(leaf) => Err(Error::new(vec![leaf.span], kind::InvalidChild { side })),
            })
            .collect()
    }

    /// Sees through a degenerate wrapper without changing the tree.
    ///
    /// A node with anything on its flanks is a genuine composite and is returned as itself.
    /// Otherwise, its single middle entry is returned, or [`Single::Many`] if there are several.
    pub fn single_child(&self, id: NodeId) -> Result<Single<'_>> {
        let node = self.node(id)?;
        if node.has_flanks() {
            if node.middle.is_empty() && (node.left.is_empty() || node.right.is_empty()) {
                return Err(self.error_at(id, kind::UnpairedFlank));
            }
            return Ok(Single::Node(id));
        }

        match node.middle.as_slice() {
            [] => Err(self.error_at(id, kind::EmptyNode)),
            [Child::Node(child)] => Ok(Single::Node(*child)),
            [Child::Leaf(leaf)] => Ok(Single::Leaf(leaf)),
            many => Ok(Single::Many(many)),
        }
    }

    /// Returns the leaves of the subtree in source order: left flank, then middle, then right
    /// flank.
    pub fn flatten(&self, id: NodeId) -> Result<Vec<&Leaf>> {
        let mut leaves = Vec::new();
        self.flatten_into(id, &mut leaves)?;
        Ok(leaves)
    }

    fn flatten_into<'a>(&'a self, id: NodeId, out: &mut Vec<&'a Leaf>) -> Result<()> {
        let node = self.node(id)?;
        for &child in &node.left {
            self.flatten_into(child, out)?;
        }
        for child in &node.middle {
            match child {
                Child::Node(child) if self.get(*child).is_some() => self.flatten_into(*child, out)?,
                Child::Leaf(leaf) if !leaf.lexeme.is_empty() => out.push(leaf),
                _ => return Err(self.error_at(id, kind::EmptyFlattenElement)),
            }
        }
        for &child in &node.right {
            self.flatten_into(child, out)?;
        }
        Ok(())
    }

    /// Returns the number of leaves in the subtree.
    pub fn leaf_count(&self, id: NodeId) -> Result<usize> {
        self.flatten(id).map(|leaves| leaves.len())
    }

    /// Detaches `child` from whichever slot of `id` holds it, searching the left flank, then the
    /// right flank, then the middle. The child's parent handle is cleared.
    ///
    /// Fails with [`kind::ChildNotFound`] without changing anything if no slot holds the child.
    pub fn remove_child(&mut self, id: NodeId, child: NodeId) -> Result<()> {
        let node = self.node_mut(id)?;
        if let Some(index) = node.left.iter().position(|&c| c == child) {
            node.left.remove(index);
        } else if let Some(index) = node.right.iter().position(|&c| c == child) {
            node.right.remove(index);
        } else if let Some(index) = node.middle.iter().position(|c| c.as_node() == Some(child)) {
            node.middle.remove(index);
        } else {
            return Err(self.error_at(id, kind::ChildNotFound));
        }

        if let Some(child) = self.arena.get_mut(child.0) {
            child.parent = None;
        }
        Ok(())
    }

    /// Detaches the node from its parent.
    pub fn remove_from_parent(&mut self, id: NodeId) -> Result<()> {
        match self.node(id)?.parent {
            Some(parent) => self.remove_child(parent, id),
            None => Err(self.error_at(id, kind::NoParent)),
        }
    }

    /// Frees a detached node and everything below it.
    pub fn discard(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.arena.remove(id.0) {
                stack.extend(node.children());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::leaf::{classify, LeafKind};
    use super::*;

    fn name(lexeme: &str, start: usize) -> Leaf {
        Leaf::new(LeafKind::Name, lexeme, start..start + lexeme.len())
    }

    fn lexemes(tree: &TokenTree, id: NodeId) -> Vec<String> {
        tree.flatten(id).unwrap().into_iter().map(|leaf| leaf.lexeme.clone()).collect()
    }

    #[test]
    fn construct_collapses_wrapper_chains() {
        let mut tree = TokenTree::new();
        let inner = tree.construct(name("a", 0).into()).unwrap();
        let outer = tree.construct(inner.into()).unwrap();
        let id = tree.construct(outer.into()).unwrap();

        assert_eq!(tree.single_child(id).unwrap(), Single::Leaf(&name("a", 0)));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn construct_keeps_composites() {
        let mut tree = TokenTree::new();
        let a = tree.construct(name("a", 0).into()).unwrap();
        let b = tree.construct(name("b", 2).into()).unwrap();
        let op = tree.construct(classify("a+b").unwrap().remove(1).into()).unwrap();
        tree.add_left(op, a).unwrap();
        tree.add_right(op, b).unwrap();

        let wrapper = tree.construct(op.into()).unwrap();
        assert_eq!(tree.single_child(wrapper).unwrap(), Single::Node(op));
        assert_eq!(tree.node(op).unwrap().parent, Some(wrapper));
        assert_eq!(lexemes(&tree, wrapper), vec!["a", "+", "b"]);
    }

    #[test]
    fn list_payload_flattens_in_order() {
        let mut tree = TokenTree::new();
        let ids = ["x", "y", "z"].iter().enumerate()
            .map(|(i, s)| tree.construct(name(s, i * 2).into()).unwrap())
            .collect::<Vec<_>>();
        let id = tree.construct(ids.clone().into()).unwrap();

        assert_eq!(lexemes(&tree, id), vec!["x", "y", "z"]);
        assert!(matches!(tree.single_child(id).unwrap(), Single::Many(children) if children.len() == 3));
        assert_eq!(tree.span(id), Some(0..5));
    }

    #[test]
    fn leaf_on_flank_is_invalid() {
        let mut tree = TokenTree::new();
        let id = tree.construct(name("a", 0).into()).unwrap();
        let err = tree.add_left(id, name("b", 2)).unwrap_err();
        assert!(err.is::<kind::InvalidChild>());
        assert_eq!(err.downcast_ref::<kind::InvalidChild>().unwrap().side, "left");
        assert!(tree.add_right(id, name("c", 4)).unwrap_err().is::<kind::InvalidChild>());
    }

    #[test]
    fn second_parent_conflicts() {
        let mut tree = TokenTree::new();
        let child = tree.construct(name("a", 0).into()).unwrap();
        let first = tree.construct(name("b", 2).into()).unwrap();
        let second = tree.construct(name("c", 4).into()).unwrap();

        tree.add_left(first, child).unwrap();
        tree.set_parent(child, first).unwrap();
        assert!(tree.add_left(second, child).unwrap_err().is::<kind::ParentConflict>());
    }

    #[test]
    fn remove_child_search_and_failure() {
        let mut tree = TokenTree::new();
        let parent = tree.construct(name("op", 2).into()).unwrap();
        let left = tree.construct(name("a", 0).into()).unwrap();
        let right = tree.construct(name("b", 5).into()).unwrap();
        let stranger = tree.construct(name("c", 7).into()).unwrap();
        tree.add_left(parent, left).unwrap();
        tree.add_right(parent, right).unwrap();

        let before = tree.node(parent).unwrap().clone();
        let err = tree.remove_child(parent, stranger).unwrap_err();
        assert!(err.is::<kind::ChildNotFound>());
        assert_eq!(tree.node(parent).unwrap(), &before);

        tree.remove_from_parent(right).unwrap();
        assert_eq!(tree.node(parent).unwrap().right, vec![]);
        assert_eq!(tree.node(right).unwrap().parent, None);
        assert!(tree.remove_from_parent(right).unwrap_err().is::<kind::NoParent>());
    }

    #[test]
    fn single_child_invariants() {
        let mut tree = TokenTree::new();
        let opener = tree.construct(name("a", 0).into()).unwrap();
        let empty = tree.construct(Payload::List(Vec::new())).unwrap();
        assert!(tree.single_child(empty).unwrap_err().is::<kind::EmptyNode>());

        tree.add_left(empty, opener).unwrap();
        assert!(tree.single_child(empty).unwrap_err().is::<kind::UnpairedFlank>());

        let closer = tree.construct(name("b", 1).into()).unwrap();
        tree.add_right(empty, closer).unwrap();
        assert_eq!(tree.single_child(empty).unwrap(), Single::Node(empty));
    }

    #[test]
    fn flatten_rejects_empty_elements() {
        let mut tree = TokenTree::new();
        let id = tree.construct(Leaf::new(LeafKind::Name, "", 0..0).into()).unwrap();
        assert!(tree.flatten(id).unwrap_err().is::<kind::EmptyFlattenElement>());

        let child = tree.construct(name("a", 0).into()).unwrap();
        let parent = tree.construct(Payload::List(vec![Child::Node(child), Child::Leaf(name("b", 2))])).unwrap();
        tree.discard(child);
        assert!(tree.flatten(parent).unwrap_err().is::<kind::EmptyFlattenElement>());
    }

    #[test]
    fn reachable_ignores_detached_nodes() {
        let mut tree = TokenTree::new();
        let root = tree.construct(name("op", 2).into()).unwrap();
        let left = tree.construct(name("a", 0).into()).unwrap();
        tree.add_left(root, left).unwrap();
        let right = tree.construct(name("b", 5).into()).unwrap();
        tree.add_right(root, right).unwrap();
        tree.set_root(Some(root));

        assert_eq!(tree.reachable(), 3);
        tree.remove_from_parent(right).unwrap();
        assert_eq!(tree.reachable(), 2);
        assert_eq!(tree.len(), 3);
        tree.discard(right);
        assert_eq!(tree.len(), 2);
    }
}
