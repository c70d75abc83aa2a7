/// A grouping delimiter.
///
/// Parens and brackets each track their own nesting depth. Curly braces are classified so that
/// they can be rejected with a useful error, but never nest inside an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delim {
    OpenParen,
    CloseParen,
    OpenSquare,
    CloseSquare,
    OpenCurly,
    CloseCurly,
}

impl Delim {
    /// Returns true if this is a square bracket.
    pub fn is_bracket(self) -> bool {
        matches!(self, Self::OpenSquare | Self::CloseSquare)
    }

    /// Returns true if this is a parenthesis.
    pub fn is_paren(self) -> bool {
        matches!(self, Self::OpenParen | Self::CloseParen)
    }

    /// Applies this delimiter to a running bracket depth. Delimiters of other families leave the
    /// depth unchanged.
    pub fn update_bracket(self, count: i32) -> i32 {
        match self {
            Self::OpenSquare => count + 1,
            Self::CloseSquare => count - 1,
            _ => count,
        }
    }

    /// Applies this delimiter to a running paren depth. Delimiters of other families leave the
    /// depth unchanged.
    pub fn update_paren(self, count: i32) -> i32 {
        match self {
            Self::OpenParen => count + 1,
            Self::CloseParen => count - 1,
            _ => count,
        }
    }
}
