//! Leaf tokens: the atomic units placed in a token tree.
//!
//! The tokenizer only knows the shape of each lexeme. [`classify`] turns the raw tokens of an
//! expression into [`Leaf`]s, deciding along the way which names are type keywords and whether a
//! `-` or `++` is prefix, postfix or binary.

pub mod delim;
pub mod number;
pub mod op;

use crate::{
    error::{kind, Error, Result},
    tokenizer::{tokenize_complete, TokenKind},
};
use std::{fmt, ops::Range};

pub use delim::Delim;
pub use number::{Number, Precision};
pub use op::{OpKind, Precedence};

/// Names of the built-in GLSL types. A name in this list is classified as [`LeafKind::Type`].
pub const TYPE_NAMES: &[&str] = &[
    "void", "bool", "int", "uint", "float", "double",
    "vec2", "vec3", "vec4", "dvec2", "dvec3", "dvec4",
    "bvec2", "bvec3", "bvec4", "ivec2", "ivec3", "ivec4", "uvec2", "uvec3", "uvec4",
    "mat2", "mat3", "mat4", "mat2x2", "mat2x3", "mat2x4", "mat3x2", "mat3x3", "mat3x4",
    "mat4x2", "mat4x3", "mat4x4", "dmat2", "dmat3", "dmat4",
    "sampler1D", "sampler2D", "sampler3D", "samplerCube", "sampler2DShadow",
    "sampler2DArray", "isampler2D", "usampler2D", "image2D",
];

/// Statement and qualifier keywords. A name in this list is classified as [`LeafKind::Keyword`].
pub const KEYWORDS: &[&str] = &[
    "return", "if", "else", "for", "while", "do", "break", "continue", "discard", "switch",
    "case", "default", "const", "in", "out", "inout", "uniform", "attribute", "varying",
    "layout", "precision", "highp", "mediump", "lowp", "struct", "flat", "smooth",
];

/// The kind of a leaf token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LeafKind {
    /// An integer literal.
    Int,

    /// A floating-point literal.
    Float,

    /// An identifier.
    Name,

    /// A built-in type name, such as `vec3`.
    Type,

    /// A field access or swizzle, such as `.xyz`.
    Access,

    /// A statement or qualifier keyword, such as `return`.
    Keyword,

    /// An operator.
    Operator(OpKind),

    /// A paren, bracket or curly brace.
    Delim(Delim),

    /// The statement terminator `;`.
    Semicolon,
}

/// A single classified lexeme, together with the region of source it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    /// The kind of the leaf.
    pub kind: LeafKind,

    /// The text of the leaf, as written in the source.
    pub lexeme: String,

    /// The region of the source code that this leaf originated from.
    pub span: Range<usize>,
}

impl Leaf {
    /// Creates a new leaf.
    pub fn new(kind: LeafKind, lexeme: impl Into<String>, span: Range<usize>) -> Self {
        Self { kind, lexeme: lexeme.into(), span }
    }

    /// Creates a numeric literal leaf holding the given value.
    pub fn from_number(number: Number, span: Range<usize>) -> Self {
        let kind = if number.is_float() { LeafKind::Float } else { LeafKind::Int };
        Self::new(kind, number.minified(), span)
    }

    /// Returns true if the leaf can be part of the expression a bracket or paren group is applied
    /// to (`a.b[i]`, `vec3(...)`).
    pub fn is_absorbable(&self) -> bool {
        matches!(self.kind, LeafKind::Name | LeafKind::Type | LeafKind::Access)
    }

    /// Returns the operator of this leaf, if it is one.
    pub fn operator(&self) -> Option<OpKind> {
        match self.kind {
            LeafKind::Operator(op) => Some(op),
            _ => None,
        }
    }

    /// Returns the delimiter of this leaf, if it is one.
    pub fn delim(&self) -> Option<Delim> {
        match self.kind {
            LeafKind::Delim(delim) => Some(delim),
            _ => None,
        }
    }

    /// Extracts the numeric value of a literal leaf.
    ///
    /// Returns `Ok(None)` for leaves that are not numeric. A numeric leaf whose lexeme cannot be
    /// read is a classification defect, reported as [`kind::NumericExtractionFailure`].
    pub fn number(&self) -> Result<Option<Number>> {
        let number = match self.kind {
            LeafKind::Int => Number::parse_int(&self.lexeme),
            LeafKind::Float => Number::parse_float(&self.lexeme),
            _ => return Ok(None),
        };

        number.map(Some).ok_or_else(|| Error::new(
            vec![self.span.clone()],
            kind::NumericExtractionFailure { lexeme: self.lexeme.clone() },
        ))
    }

    /// Returns the text to emit for this leaf. Numeric literals are written in their shortest
    /// form; everything else is emitted as written.
    pub fn minified(&self) -> String {
        match self.number() {
            Ok(Some(number)) => number.minified(),
            _ => self.lexeme.clone(),
        }
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.lexeme)
    }
}

/// Returns true if a leaf of the given kind ends an operand, meaning a following `-` or `++` must
/// be binary or postfix.
fn ends_operand(kind: Option<LeafKind>) -> bool {
    matches!(
        kind,
        Some(LeafKind::Int | LeafKind::Float | LeafKind::Name | LeafKind::Access
            | LeafKind::Delim(Delim::CloseParen | Delim::CloseSquare)
            | LeafKind::Operator(OpKind::PostInc | OpKind::PostDec))
    )
}

/// Classifies a token kind that maps to exactly one operator.
fn operator_kind(kind: TokenKind) -> Option<OpKind> {
    Some(match kind {
        TokenKind::Comma => OpKind::Comma,
        TokenKind::Assign => OpKind::Assign,
        TokenKind::AddAssign => OpKind::AddAssign,
        TokenKind::SubAssign => OpKind::SubAssign,
        TokenKind::MulAssign => OpKind::MulAssign,
        TokenKind::DivAssign => OpKind::DivAssign,
        TokenKind::ModAssign => OpKind::ModAssign,
        TokenKind::ShlAssign => OpKind::ShlAssign,
        TokenKind::ShrAssign => OpKind::ShrAssign,
        TokenKind::AndAssign => OpKind::AndAssign,
        TokenKind::XorAssign => OpKind::XorAssign,
        TokenKind::OrAssign => OpKind::OrAssign,
        TokenKind::Question => OpKind::Question,
        TokenKind::Colon => OpKind::Colon,
        TokenKind::Or => OpKind::Or,
        TokenKind::Xor => OpKind::Xor,
        TokenKind::And => OpKind::And,
        TokenKind::BitOr => OpKind::BitOr,
        TokenKind::BitXor => OpKind::BitXor,
        TokenKind::BitAnd => OpKind::BitAnd,
        TokenKind::Eq => OpKind::Eq,
        TokenKind::NotEq => OpKind::NotEq,
        TokenKind::Less => OpKind::Less,
        TokenKind::Greater => OpKind::Greater,
        TokenKind::LessEq => OpKind::LessEq,
        TokenKind::GreaterEq => OpKind::GreaterEq,
        TokenKind::Shl => OpKind::Shl,
        TokenKind::Shr => OpKind::Shr,
        TokenKind::Mul => OpKind::Mul,
        TokenKind::Div => OpKind::Div,
        TokenKind::Mod => OpKind::Mod,
        TokenKind::Not => OpKind::Not,
        TokenKind::BitNot => OpKind::BitNot,
        _ => return None,
    })
}

/// Classifies the given source into leaf tokens, skipping whitespace and comments.
pub fn classify(source: &str) -> Result<Vec<Leaf>> {
    let mut leaves: Vec<Leaf> = Vec::new();

    for token in tokenize_complete(source).iter().filter(|token| !token.is_ignorable()) {
        let prev = leaves.last().map(|leaf| leaf.kind);
        let kind = match token.kind {
            TokenKind::Int if Number::parse_int(token.lexeme).is_some() => LeafKind::Int,
            TokenKind::Float if Number::parse_float(token.lexeme).is_some() => LeafKind::Float,
            TokenKind::Int | TokenKind::Float => return Err(Error::new(
                vec![token.span.clone()],
                kind::InvalidLiteral { lexeme: token.lexeme.to_owned() },
            )),
            TokenKind::Access => LeafKind::Access,
            TokenKind::Name if TYPE_NAMES.contains(&token.lexeme) => LeafKind::Type,
            TokenKind::Name if KEYWORDS.contains(&token.lexeme) => LeafKind::Keyword,
            TokenKind::Name => LeafKind::Name,
            TokenKind::Semicolon => LeafKind::Semicolon,
            TokenKind::OpenParen => LeafKind::Delim(Delim::OpenParen),
            TokenKind::CloseParen => LeafKind::Delim(Delim::CloseParen),
            TokenKind::OpenSquare => LeafKind::Delim(Delim::OpenSquare),
            TokenKind::CloseSquare => LeafKind::Delim(Delim::CloseSquare),
            TokenKind::OpenCurly => LeafKind::Delim(Delim::OpenCurly),
            TokenKind::CloseCurly => LeafKind::Delim(Delim::CloseCurly),
            TokenKind::Add if ends_operand(prev) => LeafKind::Operator(OpKind::Add),
            TokenKind::Add => LeafKind::Operator(OpKind::Plus),
            TokenKind::Sub if ends_operand(prev) => LeafKind::Operator(OpKind::Sub),
            TokenKind::Sub => LeafKind::Operator(OpKind::Neg),
            TokenKind::Increment if ends_operand(prev) => LeafKind::Operator(OpKind::PostInc),
            TokenKind::Increment => LeafKind::Operator(OpKind::PreInc),
            TokenKind::Decrement if ends_operand(prev) => LeafKind::Operator(OpKind::PostDec),
            TokenKind::Decrement => LeafKind::Operator(OpKind::PreDec),
            other => match operator_kind(other) {
                Some(op) => LeafKind::Operator(op),
                None => return Err(Error::new(
                    vec![token.span.clone()],
                    kind::UnknownSymbol { symbol: token.lexeme.to_owned() },
                )),
            },
        };

        leaves.push(Leaf::new(kind, token.lexeme, token.span.clone()));
    }

    Ok(leaves)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn kinds(source: &str) -> Vec<LeafKind> {
        classify(source).unwrap().into_iter().map(|leaf| leaf.kind).collect()
    }

    #[test]
    fn names_types_and_keywords() {
        assert_eq!(kinds("return vec3 color .rgb"), vec![
            LeafKind::Keyword,
            LeafKind::Type,
            LeafKind::Name,
            LeafKind::Access,
        ]);
    }

    #[test]
    fn unary_and_binary_minus() {
        assert_eq!(kinds("-a - -1"), vec![
            LeafKind::Operator(OpKind::Neg),
            LeafKind::Name,
            LeafKind::Operator(OpKind::Sub),
            LeafKind::Operator(OpKind::Neg),
            LeafKind::Int,
        ]);
        assert_eq!(kinds("(x)-(y)")[3], LeafKind::Operator(OpKind::Sub));
        assert_eq!(kinds("f(-x)")[2], LeafKind::Operator(OpKind::Neg));
    }

    #[test]
    fn prefix_and_postfix_increment() {
        assert_eq!(kinds("++i + j--"), vec![
            LeafKind::Operator(OpKind::PreInc),
            LeafKind::Name,
            LeafKind::Operator(OpKind::Add),
            LeafKind::Name,
            LeafKind::Operator(OpKind::PostDec),
        ]);
    }

    #[test]
    fn numeric_values() {
        let leaves = classify("3u 2.5lf x").unwrap();
        assert_eq!(leaves[0].number().unwrap(), Some(Number::Int { value: 3, unsigned: true }));
        assert_eq!(
            leaves[1].number().unwrap(),
            Some(Number::Float { value: 2.5, precision: Precision::Double }),
        );
        assert_eq!(leaves[2].number().unwrap(), None);
    }

    #[test]
    fn misclassified_number_fails() {
        let leaf = Leaf::new(LeafKind::Int, "abc", 4..7);
        let err = leaf.number().unwrap_err();
        assert!(err.is::<kind::NumericExtractionFailure>());
        assert_eq!(err.spans, vec![4..7]);
    }

    #[test]
    fn unreadable_literals_are_rejected() {
        let err = classify("1 + 09").unwrap_err();
        assert!(err.is::<kind::InvalidLiteral>());
        assert_eq!(err.spans, vec![4..6]);

        let err = classify("x * 99999999999999999999").unwrap_err();
        assert!(err.is::<kind::InvalidLiteral>());
        assert_eq!(err.spans, vec![4..24]);

        assert!(classify("1e400").unwrap_err().is::<kind::InvalidLiteral>());
        assert_eq!(kinds("07 + 0x7fffffff"), vec![
            LeafKind::Int,
            LeafKind::Operator(OpKind::Add),
            LeafKind::Int,
        ]);
    }

    #[test]
    fn unknown_symbol() {
        let err = classify("a $ b").unwrap_err();
        assert!(err.is::<kind::UnknownSymbol>());
        assert_eq!(err.spans, vec![2..3]);
    }

    #[test]
    fn spans_skip_comments() {
        let leaves = classify("a /* c */ * b").unwrap();
        assert_eq!(leaves.iter().map(|l| l.span.clone()).collect::<Vec<_>>(), vec![0..1, 10..11, 12..13]);
    }
}
