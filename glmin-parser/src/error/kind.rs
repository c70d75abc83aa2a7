use ariadne::Fmt;
use glmin_attrs::ErrorKind;
use glmin_error::EXPR;

/// A value that is not a token tree node was supplied where a structural child was required.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot add a leaf token to the {} side of a node", self.side),
    labels = ["this leaf"],
    help = "only nodes may be placed on the left or right side; leaves belong in the middle",
)]
pub struct InvalidChild {
    /// The side the leaf was added to (`left` or `right`).
    pub side: &'static str,
}

/// A node was attached to a second parent while already attached to another.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "hierarchy inconsistency: node already has a different parent",
    labels = ["this node is already attached elsewhere"],
    help = "detach the node from its current parent before attaching it again",
)]
pub struct ParentConflict;

/// Removal was requested for a child that is not held by the node.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "could not remove child: it is not present in any slot",
    labels = ["this node was searched"],
)]
pub struct ChildNotFound;

/// A node was asked to detach from its parent, but has none.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "node has no parent to be removed from",
    labels = ["this node"],
)]
pub struct NoParent;

/// A node handle does not refer to a live node of the tree.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "node handle does not refer to a node in this tree")]
pub struct DanglingNode;

/// A bracket delimiter did not change the bracket depth, or brackets were not balanced.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "bracket inconsistency",
    labels = [if self.unclosed {
        format!("this {} is never closed", "`[`".fg(EXPR))
    } else {
        String::from("this bracket does not match the current nesting")
    }],
)]
pub struct BracketInconsistency {
    /// The bracket was opened but never closed.
    pub unclosed: bool,
}

/// A paren delimiter did not change the paren depth, or parens were not balanced.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "paren inconsistency",
    labels = [if self.unclosed {
        format!("this {} is never closed", "`(`".fg(EXPR))
    } else {
        String::from("this paren does not match the current nesting")
    }],
)]
pub struct ParenInconsistency {
    /// The paren was opened but never closed.
    pub unclosed: bool,
}

/// A delimiter that is neither a paren nor a bracket appeared inside an expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected delimiter `{}` in expression", self.lexeme),
    labels = ["here"],
    help = "blocks cannot appear inside expressions",
)]
pub struct UnexpectedDelimiter {
    /// The delimiter that was found.
    pub lexeme: String,
}

/// A pair of brackets with nothing between them.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing index expression inside brackets",
    labels = ["add an expression here"],
)]
pub struct EmptyBrackets;

/// An operator was missing a required operand.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("{} operand of operator `{}` is missing", self.side, self.operator),
    labels = ["this operator"],
    help = format!("add {} here", "an expression".fg(EXPR)),
)]
pub struct MissingOperand {
    /// The operator lacking an operand.
    pub operator: String,

    /// The side that was missing (`left` or `right`).
    pub side: &'static str,
}

/// A leaf flagged as numeric could not produce a numeric value.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("could not read a numeric value from `{}`", self.lexeme),
    labels = ["this literal"],
    help = "you should never see this error; the literal was misclassified",
)]
pub struct NumericExtractionFailure {
    /// The lexeme of the literal.
    pub lexeme: String,
}

/// A literal has the shape of a number, but no value can be read from it.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid numeric literal `{}`", self.lexeme),
    labels = ["this literal"],
    help = "octal literals use only the digits 0 to 7, and every literal must fit its type",
)]
pub struct InvalidLiteral {
    /// The lexeme of the literal.
    pub lexeme: String,
}

/// Flattening encountered an empty middle entry.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "empty element found during flatten",
    labels = ["inside this node"],
)]
pub struct EmptyFlattenElement;

/// A node holds content on only one flank and nothing in the middle.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "empty middle is only allowed if both left and right exist",
    labels = ["this node"],
)]
pub struct UnpairedFlank;

/// A node holds no content at all.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "token has no content")]
pub struct EmptyNode;

/// A character that does not belong to any token of the language.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown symbol `{}`", self.symbol),
    labels = ["I do not know what this is"],
)]
pub struct UnknownSymbol {
    /// The offending text.
    pub symbol: String,
}

/// A statement was not terminated with a semicolon.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing `;` at the end of the statement",
    labels = [format!("add {} after this", "`;`".fg(EXPR))],
)]
pub struct MissingTerminator;

/// A `return` statement was expected.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected `return`",
    labels = ["I expected to see `return` here"],
)]
pub struct ExpectedReturn;
