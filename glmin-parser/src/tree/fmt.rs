//! Text emission for token trees.

use crate::{error::Result, leaf::Leaf};
use std::fmt::{self, Display, Formatter, Write};
use super::{Child, NodeId, TokenTree};

/// Returns true if `next` must be separated from `prev` by a space, so that the two do not read
/// back as a different token.
pub fn needs_space(prev: &str, next: &str) -> bool {
    let (Some(a), Some(b)) = (prev.chars().last(), next.chars().next()) else {
        return false;
    };
    let word = |c: char| c.is_ascii_alphanumeric() || c == '_';

    (word(a) && word(b))
        || ((a.is_ascii_digit() || a == '.') && b == '.')
        || matches!((a, b), ('+', '+') | ('-', '-') | ('/', '/') | ('/', '*'))
}

/// Joins the minified text of the leaves, inserting a space only where two leaves would
/// otherwise merge.
pub fn join_minified<'a>(leaves: impl IntoIterator<Item = &'a Leaf>) -> String {
    let mut out = String::new();
    for leaf in leaves {
        let text = leaf.minified();
        if needs_space(&out, &text) {
            out.push(' ');
        }
        out.push_str(&text);
    }
    out
}

impl TokenTree {
    /// Returns the shortest text for the subtree.
    pub fn minify(&self, id: NodeId) -> Result<String> {
        Ok(join_minified(self.flatten(id)?))
    }

    /// Describes a single node in the form `Token(left:middle:right)`, where the middle is the
    /// quoted leaf if the node holds exactly one, and each slot is otherwise given as a count.
    pub fn describe(&self, id: NodeId) -> String {
        let Some(node) = self.get(id) else {
            return String::from("Token(<dangling>)");
        };

        match node.middle.as_slice() {
            [Child::Leaf(leaf)] => format!("Token({}:'{}':{})", node.left.len(), leaf.lexeme, node.right.len()),
            _ => format!("Token({}:{}:{})", node.left.len(), node.middle.len(), node.right.len()),
        }
    }

    /// Renders the structure of the subtree, one node per line.
    pub fn dump(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.dump_into(id, "", 0, &mut out);
        out
    }

    fn dump_into(&self, id: NodeId, label: &str, depth: usize, out: &mut String) {
        let _ = writeln!(out, "{:indent$}{}{}", "", label, self.describe(id), indent = depth * 2);
        let Some(node) = self.get(id) else { return };

        for &child in &node.left {
            self.dump_into(child, "left: ", depth + 1, out);
        }
        for child in &node.middle {
            match child {
                Child::Node(child) => self.dump_into(*child, "middle: ", depth + 1, out),
                Child::Leaf(leaf) if node.middle.len() > 1 => {
                    let _ = writeln!(out, "{:indent$}middle: '{}'", "", leaf.lexeme, indent = (depth + 1) * 2);
                },
                Child::Leaf(_) => (),
            }
        }
        for &child in &node.right {
            self.dump_into(child, "right: ", depth + 1, out);
        }
    }
}

/// Writes the minified text of the whole tree.
///
/// A tree that cannot be flattened fails with [`fmt::Error`], which makes
/// [`ToString::to_string`] panic. Use [`TokenTree::minify`] to get the underlying error instead.
impl Display for TokenTree {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.root() {
            Some(root) => write!(f, "{}", self.minify(root).map_err(|_| fmt::Error)?),
            None => Ok(()),
        }
    }
}
