use logos::Logos;
use std::ops::Range;

/// The different kinds of tokens that can be produced by the tokenizer.
#[derive(Logos, Clone, Copy, Debug, PartialEq)]
pub enum TokenKind {
    #[regex(r"[\n\r]+")]
    NewLine,

    #[regex(r"[ \t]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    #[token("+=")]
    AddAssign,

    #[token("-=")]
    SubAssign,

    #[token("*=")]
    MulAssign,

    #[token("/=")]
    DivAssign,

    #[token("%=")]
    ModAssign,

    #[token("<<=")]
    ShlAssign,

    #[token(">>=")]
    ShrAssign,

    #[token("&=")]
    AndAssign,

    #[token("^=")]
    XorAssign,

    #[token("|=")]
    OrAssign,

    #[token("++")]
    Increment,

    #[token("--")]
    Decrement,

    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    Mul,

    #[token("/")]
    Div,

    #[token("%")]
    Mod,

    #[token("<<")]
    Shl,

    #[token(">>")]
    Shr,

    #[token("<")]
    Less,

    #[token(">")]
    Greater,

    #[token("<=")]
    LessEq,

    #[token(">=")]
    GreaterEq,

    #[token("==")]
    Eq,

    #[token("!=")]
    NotEq,

    #[token("&&")]
    And,

    #[token("||")]
    Or,

    #[token("^^")]
    Xor,

    #[token("&")]
    BitAnd,

    #[token("|")]
    BitOr,

    #[token("^")]
    BitXor,

    #[token("!")]
    Not,

    #[token("~")]
    BitNot,

    #[token("=")]
    Assign,

    #[token("?")]
    Question,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[token("[")]
    OpenSquare,

    #[token("]")]
    CloseSquare,

    #[token("{")]
    OpenCurly,

    #[token("}")]
    CloseCurly,

    #[regex(r"(0[xX][0-9a-fA-F]+|[0-9]+)[uU]?")]
    Int,

    #[regex(r"([0-9]+\.[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?(lf|LF|f|F)?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+(lf|LF|f|F)?")]
    Float,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Name,

    /// A field access or swizzle, such as `.xyz`.
    #[regex(r"\.[a-zA-Z_][a-zA-Z0-9_]*")]
    Access,

    #[regex(r".", priority = 0)]
    Symbol,
}

impl TokenKind {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::NewLine)
    }

    /// Returns true if the token carries no meaning for the expression (whitespace or comments).
    pub fn is_ignorable(self) -> bool {
        self.is_whitespace() || matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }
}

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// The region of the source code that this token originated from.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw lexeme that was parsed into this token.
    pub lexeme: &'source str,
}

impl Token<'_> {
    /// Returns true if the token carries no meaning for the expression.
    pub fn is_ignorable(&self) -> bool {
        self.kind.is_ignorable()
    }
}
