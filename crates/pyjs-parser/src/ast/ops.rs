//! Operator definitions for Python expressions.
//!
//! Binary arithmetic and bitwise operators are parsed with precedence
//! climbing and carry binding powers. Comparisons, boolean operators and
//! `**` have dedicated grammar levels and so carry none.

use crate::lexer::TokenKind;
use std::fmt;

/// Arithmetic and bitwise infix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Bitwise (lowest)
    BitOr,
    BitXor,
    BitAnd,
    LeftShift,
    RightShift,

    // Additive
    Add,
    Sub,

    // Multiplicative
    Mul,
    MatMul,
    Div,
    FloorDiv,
    Mod,

    // Power (highest, right-associative)
    Pow,
}

impl BinaryOp {
    /// Binding power as `(left, right)`; all of these are left-associative.
    ///
    /// `Pow` is parsed at its own level and never reaches the climbing loop.
    pub fn binding_power(&self) -> (u8, u8) {
        use BinaryOp::*;
        match self {
            BitOr => (1, 2),
            BitXor => (3, 4),
            BitAnd => (5, 6),
            LeftShift | RightShift => (7, 8),
            Add | Sub => (9, 10),
            Mul | MatMul | Div | FloorDiv | Mod => (11, 12),
            Pow => (13, 13),
        }
    }

    /// The infix operator a token stands for, excluding `**`.
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        use BinaryOp::*;
        Some(match kind {
            TokenKind::Pipe => BitOr,
            TokenKind::Caret => BitXor,
            TokenKind::Amp => BitAnd,
            TokenKind::LessLess => LeftShift,
            TokenKind::GreaterGreater => RightShift,
            TokenKind::Plus => Add,
            TokenKind::Minus => Sub,
            TokenKind::Star => Mul,
            TokenKind::At => MatMul,
            TokenKind::Slash => Div,
            TokenKind::SlashSlash => FloorDiv,
            TokenKind::Percent => Mod,
            _ => return None,
        })
    }

    /// The operator applied by an augmented assignment token such as `+=`.
    pub fn from_augmented_token(kind: TokenKind) -> Option<Self> {
        use BinaryOp::*;
        Some(match kind {
            TokenKind::PipeEqual => BitOr,
            TokenKind::CaretEqual => BitXor,
            TokenKind::AmpEqual => BitAnd,
            TokenKind::LessLessEqual => LeftShift,
            TokenKind::GreaterGreaterEqual => RightShift,
            TokenKind::PlusEqual => Add,
            TokenKind::MinusEqual => Sub,
            TokenKind::StarEqual => Mul,
            TokenKind::AtEqual => MatMul,
            TokenKind::SlashEqual => Div,
            TokenKind::SlashSlashEqual => FloorDiv,
            TokenKind::PercentEqual => Mod,
            TokenKind::StarStarEqual => Pow,
            _ => return None,
        })
    }

    /// Python spelling of the operator.
    pub fn as_str(&self) -> &'static str {
        use BinaryOp::*;
        match self {
            BitOr => "|",
            BitXor => "^",
            BitAnd => "&",
            LeftShift => "<<",
            RightShift => ">>",
            Add => "+",
            Sub => "-",
            Mul => "*",
            MatMul => "@",
            Div => "/",
            FloorDiv => "//",
            Mod => "%",
            Pow => "**",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `not`
    Not,
    /// `-`
    Neg,
    /// `+`
    Pos,
    /// `~`
    Invert,
}

impl UnaryOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Plus => Some(UnaryOp::Pos),
            TokenKind::Tilde => Some(UnaryOp::Invert),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Not => "not",
            UnaryOp::Neg => "-",
            UnaryOp::Pos => "+",
            UnaryOp::Invert => "~",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison operators. Python chains these: `a < b < c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    Is,
    IsNot,
    In,
    NotIn,
}

impl CompareOp {
    /// Single-token comparison operators. `is not` and `not in` need two
    /// tokens and are recognized by the parser.
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::EqualEqual => CompareOp::Eq,
            TokenKind::BangEqual => CompareOp::NotEq,
            TokenKind::Less => CompareOp::Lt,
            TokenKind::LessEqual => CompareOp::LtE,
            TokenKind::Greater => CompareOp::Gt,
            TokenKind::GreaterEqual => CompareOp::GtE,
            TokenKind::Is => CompareOp::Is,
            TokenKind::In => CompareOp::In,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::NotEq => "!=",
            CompareOp::Lt => "<",
            CompareOp::LtE => "<=",
            CompareOp::Gt => ">",
            CompareOp::GtE => ">=",
            CompareOp::Is => "is",
            CompareOp::IsNot => "is not",
            CompareOp::In => "in",
            CompareOp::NotIn => "not in",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Short-circuiting boolean operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoolOp {
    And,
    Or,
}

impl BoolOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoolOp::And => "and",
            BoolOp::Or => "or",
        }
    }
}
