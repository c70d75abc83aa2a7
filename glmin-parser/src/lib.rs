//! Expression tree builder and simplifier for GLSL source.
//!
//! Source text is split into tokens by the [`tokenizer`], classified into [`leaf`] tokens, and
//! built into a [`TokenTree`] that respects operator precedence and grouping. The tree is then
//! rewritten in place by the [`simplify`] module (constant folding and removal of redundant
//! parens) and emitted back as minified text.
//!
//! ```
//! use glmin_parser::{simplify::Simplifier, tree::TokenTree};
//!
//! let mut tree = TokenTree::parse("(2.0 * 0.5) + offset").unwrap();
//! Simplifier::default().run(&mut tree).unwrap();
//! assert_eq!(tree.to_string(), "1.+offset");
//! ```

pub mod error;
pub mod leaf;
pub mod simplify;
pub mod stmt;
pub mod tokenizer;
pub mod tree;

pub use tree::TokenTree;
