//! Operator kinds, their precedence and their arithmetic.

use super::number::{Number, Precision};

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
///
/// The tree builder splits a token sequence at the operator with the lowest precedence, since that
/// operator is evaluated last and therefore sits at the root of the expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precedence {
    /// Precedence of the sequence operator (`,`).
    Comma,

    /// Precedence of assignment (`=`, `+=`, `<<=`, ...).
    Assign,

    /// Precedence of the ternary selection (`?` and `:`).
    Ternary,

    /// Precedence of logical or (`||`).
    Or,

    /// Precedence of logical exclusive or (`^^`).
    Xor,

    /// Precedence of logical and (`&&`).
    And,

    /// Precedence of bitwise or (`|`).
    BitOr,

    /// Precedence of bitwise exclusive or (`^`).
    BitXor,

    /// Precedence of bitwise and (`&`).
    BitAnd,

    /// Precedence of equality (`==` and `!=`).
    Equality,

    /// Precedence of relational comparisons (`<`, `>`, `<=` and `>=`).
    Relational,

    /// Precedence of bitshifts (`<<` and `>>`).
    Shift,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`), division (`/`), and modulo (`%`), which separate
    /// factors.
    Factor,

    /// Precedence of prefix unary operators (`-`, `+`, `!`, `~`, `++`, `--`).
    Prefix,

    /// Precedence of postfix increment and decrement.
    Postfix,
}

impl PartialOrd for Precedence {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        let left = *self as u8;
        let right = *other as u8;
        left.partial_cmp(&right)
    }
}

/// The operation an operator leaf performs.
///
/// Whether `-`, `+`, `++` and `--` are prefix, postfix or binary is decided by the leaf
/// classifier from the surrounding tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Comma,
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    ShlAssign,
    ShrAssign,
    AndAssign,
    XorAssign,
    OrAssign,
    Question,
    Colon,
    Or,
    Xor,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Eq,
    NotEq,
    Less,
    Greater,
    LessEq,
    GreaterEq,
    Shl,
    Shr,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Plus,
    Neg,
    Not,
    BitNot,
    PreInc,
    PreDec,
    PostInc,
    PostDec,
}

impl OpKind {
    /// Returns the precedence of the operation.
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Comma => Precedence::Comma,
            Self::Assign | Self::AddAssign | Self::SubAssign | Self::MulAssign | Self::DivAssign
                | Self::ModAssign | Self::ShlAssign | Self::ShrAssign | Self::AndAssign
                | Self::XorAssign | Self::OrAssign => Precedence::Assign,
            Self::Question | Self::Colon => Precedence::Ternary,
            Self::Or => Precedence::Or,
            Self::Xor => Precedence::Xor,
            Self::And => Precedence::And,
            Self::BitOr => Precedence::BitOr,
            Self::BitXor => Precedence::BitXor,
            Self::BitAnd => Precedence::BitAnd,
            Self::Eq | Self::NotEq => Precedence::Equality,
            Self::Less | Self::Greater | Self::LessEq | Self::GreaterEq => Precedence::Relational,
            Self::Shl | Self::Shr => Precedence::Shift,
            Self::Add | Self::Sub => Precedence::Term,
            Self::Mul | Self::Div | Self::Mod => Precedence::Factor,
            Self::Plus | Self::Neg | Self::Not | Self::BitNot | Self::PreInc | Self::PreDec => Precedence::Prefix,
            Self::PostInc | Self::PostDec => Precedence::Postfix,
        }
    }

    /// Returns true if the operator may appear without a left operand.
    pub fn allows_missing_left(&self) -> bool {
        self.precedence() == Precedence::Prefix
    }

    /// Returns true if the operator may appear without a right operand.
    pub fn allows_missing_right(&self) -> bool {
        self.precedence() == Precedence::Postfix
    }

    /// Returns true if the operator takes an operand on both sides.
    pub fn is_binary(&self) -> bool {
        !self.allows_missing_left() && !self.allows_missing_right()
    }

    /// Evaluates the operator over two constant operands.
    ///
    /// If either operand is a float, both are evaluated as floats at the higher of the two
    /// precisions. Otherwise the operation is performed on 32-bit integers, unsigned if either
    /// operand is unsigned. Returns [`None`] if the operator has no constant evaluation, or if the
    /// result cannot be written as a literal (division by zero, overflow to infinity, ...).
    pub fn apply(&self, lhs: Number, rhs: Number) -> Option<Number> {
        match (lhs, rhs) {
            (Number::Int { value: a, unsigned: ua }, Number::Int { value: b, unsigned: ub }) => {
                self.apply_int(a, b, ua || ub)
            },
            _ => {
                let precision = lhs.precision().max(rhs.precision());
                self.apply_float(lhs.as_f64(), rhs.as_f64(), precision)
            },
        }
    }

    fn apply_int(&self, a: i64, b: i64, unsigned: bool) -> Option<Number> {
        let value = if unsigned {
            let (a, b) = (u32::try_from(a).ok()?, u32::try_from(b).ok()?);
            let value = match self {
                Self::Add => a.wrapping_add(b),
                Self::Sub => a.wrapping_sub(b),
                Self::Mul => a.wrapping_mul(b),
                Self::Div => a.checked_div(b)?,
                Self::Mod => a.checked_rem(b)?,
                Self::Shl => a.checked_shl(b)?,
                Self::Shr => a.checked_shr(b)?,
                Self::BitAnd => a & b,
                Self::BitOr => a | b,
                Self::BitXor => a ^ b,
                _ => return None,
            };
            i64::from(value)
        } else {
            let (a, b) = (i32::try_from(a).ok()?, i32::try_from(b).ok()?);
            let value = match self {
                Self::Add => a.wrapping_add(b),
                Self::Sub => a.wrapping_sub(b),
                Self::Mul => a.wrapping_mul(b),
                Self::Div => a.checked_div(b)?,
                Self::Mod => a.checked_rem(b)?,
                Self::Shl => a.checked_shl(u32::try_from(b).ok()?)?,
                Self::Shr => a.checked_shr(u32::try_from(b).ok()?)?,
                Self::BitAnd => a & b,
                Self::BitOr => a | b,
                Self::BitXor => a ^ b,
                _ => return None,
            };
            i64::from(value)
        };

        Some(Number::Int { value, unsigned })
    }

    fn apply_float(&self, a: f64, b: f64, precision: Precision) -> Option<Number> {
        if matches!(self, Self::Div) && b == 0.0 {
            return None;
        }

        let value = match precision {
            Precision::Single => {
                let (a, b) = (a as f32, b as f32);
                f64::from(match self {
                    Self::Add => a + b,
                    Self::Sub => a - b,
                    Self::Mul => a * b,
                    Self::Div => a / b,
                    _ => return None,
                })
            },
            Precision::Double => match self {
                Self::Add => a + b,
                Self::Sub => a - b,
                Self::Mul => a * b,
                Self::Div => a / b,
                _ => return None,
            },
        };

        value.is_finite().then_some(Number::Float { value, precision })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn int(value: i64) -> Number {
        Number::Int { value, unsigned: false }
    }

    fn float(value: f64) -> Number {
        Number::Float { value, precision: Precision::Single }
    }

    #[test]
    fn precedence_order() {
        assert!(Precedence::Comma < Precedence::Assign);
        assert!(Precedence::Term < Precedence::Factor);
        assert!(OpKind::Add.precedence() < OpKind::Mul.precedence());
        assert!(OpKind::Mul.precedence() < OpKind::Neg.precedence());
        assert_eq!(OpKind::Add.precedence(), OpKind::Sub.precedence());
    }

    #[test]
    fn operand_requirements() {
        assert!(OpKind::Neg.allows_missing_left());
        assert!(OpKind::PreInc.allows_missing_left());
        assert!(!OpKind::Sub.allows_missing_left());
        assert!(OpKind::PostDec.allows_missing_right());
        assert!(OpKind::Mul.is_binary());
        assert!(!OpKind::Not.is_binary());
    }

    #[test]
    fn integer_arithmetic() {
        assert_eq!(OpKind::Add.apply(int(2), int(3)), Some(int(5)));
        assert_eq!(OpKind::Div.apply(int(7), int(2)), Some(int(3)));
        assert_eq!(OpKind::Div.apply(int(-7), int(2)), Some(int(-3)));
        assert_eq!(OpKind::Shl.apply(int(1), int(4)), Some(int(16)));
        assert_eq!(OpKind::Div.apply(int(1), int(0)), None);
        assert_eq!(OpKind::Less.apply(int(1), int(2)), None);
        assert_eq!(OpKind::Add.apply(int(i64::from(i32::MAX)), int(1)), Some(int(i64::from(i32::MIN))));
    }

    #[test]
    fn unsigned_is_contagious() {
        let unsigned = Number::Int { value: 3, unsigned: true };
        assert_eq!(
            OpKind::Sub.apply(unsigned, int(1)),
            Some(Number::Int { value: 2, unsigned: true }),
        );
        assert_eq!(
            OpKind::Sub.apply(int(0), unsigned),
            Some(Number::Int { value: i64::from(u32::MAX - 2), unsigned: true }),
        );
    }

    #[test]
    fn mixed_arithmetic_is_float() {
        assert_eq!(OpKind::Add.apply(float(2.0), int(3)), Some(float(5.0)));
        assert_eq!(OpKind::Mul.apply(int(3), float(0.5)), Some(float(1.5)));
        assert_eq!(OpKind::Div.apply(float(1.0), float(0.0)), None);
        assert_eq!(OpKind::Mod.apply(float(1.0), float(2.0)), None);
    }

    #[test]
    fn precision_is_maximum() {
        let double = Number::Float { value: 0.25, precision: Precision::Double };
        assert_eq!(
            OpKind::Add.apply(float(0.5), double),
            Some(Number::Float { value: 0.75, precision: Precision::Double }),
        );
    }
}
