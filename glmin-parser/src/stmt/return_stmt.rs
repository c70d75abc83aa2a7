use crate::{
    error::{kind, Error, Result},
    leaf::{classify, Leaf, LeafKind},
    simplify::{Simplifier, SimplifyOptions, SimplifyReport},
    tree::{fmt::needs_space, TokenTree},
};
use std::fmt;

/// A `return` statement, such as `return (a + b) * 2;`.
///
/// The returned expression is held as a [`TokenTree`]; the keyword and terminator are kept as
/// leaves so that errors can point at them.
#[derive(Debug, Clone)]
pub struct ReturnStmt {
    /// The `return` keyword.
    pub keyword: Leaf,

    /// The returned expression. Empty for a bare `return;`.
    pub tree: TokenTree,

    /// The `;` ending the statement.
    pub terminator: Leaf,
}

impl ReturnStmt {
    /// Classifies and parses a `return` statement.
    pub fn parse(source: &str) -> Result<Self> {
        Self::from_leaves(classify(source)?)
    }

    /// Parses a `return` statement from its leaves.
    pub fn from_leaves(mut leaves: Vec<Leaf>) -> Result<Self> {
        let keyword = match leaves.first() {
            Some(leaf) if leaf.kind == LeafKind::Keyword && leaf.lexeme == "return" => leaves.remove(0),
            Some(leaf) => return Err(Error::new(vec![leaf.span.clone()], kind::ExpectedReturn)),
            None => return Err(Error::new(Vec::new(), kind::ExpectedReturn)),
        };

        let terminator = match leaves.pop() {
            Some(leaf) if leaf.kind == LeafKind::Semicolon => leaf,
            Some(leaf) => return Err(Error::new(vec![leaf.span], kind::MissingTerminator)),
            None => return Err(Error::new(vec![keyword.span], kind::MissingTerminator)),
        };

        Ok(Self {
            keyword,
            tree: TokenTree::build(leaves)?,
            terminator,
        })
    }

    /// Simplifies the returned expression to a fixed point.
    pub fn simplify(&mut self, options: SimplifyOptions) -> Result<SimplifyReport> {
        Simplifier::new(options).run(&mut self.tree)
    }

    /// Returns the shortest text for the statement.
    ///
    /// The keyword is only separated from the expression where the two would otherwise merge, so
    /// `return (a);` becomes `return(a);` while `return a;` keeps its space.
    pub fn minify(&self) -> Result<String> {
        let payload = match self.tree.root() {
            Some(root) => self.tree.minify(root)?,
            None => String::new(),
        };

        let separator = if needs_space(&self.keyword.lexeme, &payload) { " " } else { "" };
        Ok(format!("{}{}{}{}", self.keyword.lexeme, separator, payload, self.terminator.lexeme))
    }
}

/// A statement whose tree cannot be flattened fails with [`fmt::Error`], so
/// [`ToString::to_string`] panics on it. [`ReturnStmt::minify`] returns the error instead.
impl fmt::Display for ReturnStmt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.minify().map_err(|_| fmt::Error)?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn minified(source: &str) -> String {
        let mut stmt = ReturnStmt::parse(source).unwrap();
        stmt.simplify(SimplifyOptions::default()).unwrap();
        stmt.to_string()
    }

    #[test]
    fn name_payload_keeps_space() {
        assert_eq!(minified("return  color ;"), "return color;");
    }

    #[test]
    fn paren_payload_drops_space() {
        assert_eq!(minified("return (a + b) * 2;"), "return(a+b)*2;");
        assert_eq!(minified("return -x;"), "return-x;");
    }

    #[test]
    fn payload_is_simplified() {
        assert_eq!(minified("return (1.0 + 2.0) * x;"), "return 3.*x;");
        assert_eq!(minified("return ((v));"), "return v;");
    }

    #[test]
    fn bare_return() {
        let stmt = ReturnStmt::parse("return;").unwrap();
        assert_eq!(stmt.tree.root(), None);
        assert_eq!(stmt.to_string(), "return;");
    }

    #[test]
    fn missing_terminator() {
        let err = ReturnStmt::parse("return a").unwrap_err();
        assert!(err.is::<kind::MissingTerminator>());
        assert_eq!(err.spans, vec![7..8]);
    }

    #[test]
    fn expected_return() {
        let err = ReturnStmt::parse("a + b;").unwrap_err();
        assert!(err.is::<kind::ExpectedReturn>());
        assert_eq!(err.spans, vec![0..1]);
        assert!(ReturnStmt::parse("").unwrap_err().is::<kind::ExpectedReturn>());
    }
}
