use crate::error::{kind, Error, Result};
use super::{Child, NodeId, TokenTree};
use tracing::trace;

impl TokenTree {
    /// Collapses chains of single-child wrappers below (and including) the given node.
    ///
    /// A node with no flanks whose middle is exactly one child node takes over that child's
    /// content, and the child is freed. The handle of every surviving node is unchanged, and the
    /// flattened leaves of the subtree are the same before and after.
    ///
    /// Returns the number of wrappers that were collapsed.
    pub fn normalize(&mut self, id: NodeId) -> Result<usize> {
        let mut collapsed = 0;
        let mut stack = vec![id];

        while let Some(id) = stack.pop() {
            while let Some(inner) = self.sole_node(id)? {
                let inner = self.arena.remove(inner.0)
                    .ok_or_else(|| Error::new(Vec::new(), kind::DanglingNode))?;
                for child in inner.children() {
                    self.node_mut(child)?.parent = Some(id);
                }

                let node = self.node_mut(id)?;
                node.left = inner.left;
                node.middle = inner.middle;
                node.right = inner.right;
                collapsed += 1;
                trace!(?id, "collapsed wrapper");
            }

            stack.extend(self.node(id)?.children());
        }

        Ok(collapsed)
    }

    /// Returns the only child of a node that is nothing but a wrapper around another node.
    fn sole_node(&self, id: NodeId) -> Result<Option<NodeId>> {
        let node = self.node(id)?;
        if node.has_flanks() {
            return Ok(None);
        }

        match node.middle.as_slice() {
            [Child::Node(inner)] => Ok(Some(*inner)),
            _ => Ok(None),
        }
    }
}
