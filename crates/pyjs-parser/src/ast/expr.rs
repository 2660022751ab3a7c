//! Expression nodes.
//!
//! Child expressions are arena references, so every node is `Copy` and the
//! whole tree lives exactly as long as the [`bumpalo::Bump`] it was parsed
//! into.
//!
//! # Expression Precedence
//!
//! From loosest to tightest:
//! 1. `lambda`
//! 2. `x if c else y`
//! 3. `or`
//! 4. `and`
//! 5. `not`
//! 6. comparisons (`<`, `==`, `in`, `is`, ...), chainable
//! 7. `|`, then `^`, then `&`
//! 8. `<<`, `>>`
//! 9. `+`, `-`
//! 10. `*`, `@`, `/`, `//`, `%`
//! 11. unary `-`, `+`, `~`
//! 12. `**` (right-associative)
//! 13. calls, subscripts, attribute access

use crate::ast::{BinaryOp, BoolOp, CompareOp, Ident, UnaryOp};
use pyjs_core::Span;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expr<'ast> {
    Literal(LiteralExpr<'ast>),
    Name(Ident<'ast>),
    Binary(&'ast BinaryExpr<'ast>),
    Unary(&'ast UnaryExpr<'ast>),
    BoolOp(&'ast BoolOpExpr<'ast>),
    Compare(&'ast CompareExpr<'ast>),
    Call(&'ast CallExpr<'ast>),
    Attribute(&'ast AttributeExpr<'ast>),
    Subscript(&'ast SubscriptExpr<'ast>),
    /// `lower:upper:step`; only appears as a subscript index.
    Slice(&'ast SliceExpr<'ast>),
    List(&'ast SequenceExpr<'ast>),
    Tuple(&'ast SequenceExpr<'ast>),
    Set(&'ast SequenceExpr<'ast>),
    Dict(&'ast DictExpr<'ast>),
    ListComp(&'ast ListCompExpr<'ast>),
    /// `body if test else orelse`
    IfElse(&'ast IfElseExpr<'ast>),
    Lambda(&'ast LambdaExpr<'ast>),
    /// `*value` in a call, display or assignment target.
    Starred(&'ast StarredExpr<'ast>),
    Yield(&'ast YieldExpr<'ast>),
    /// A parenthesized expression, kept so output can mirror source grouping.
    Paren(&'ast ParenExpr<'ast>),
}

impl<'ast> Expr<'ast> {
    pub fn span(&self) -> Span {
        match self {
            Self::Literal(e) => e.span,
            Self::Name(e) => e.span,
            Self::Binary(e) => e.span,
            Self::Unary(e) => e.span,
            Self::BoolOp(e) => e.span,
            Self::Compare(e) => e.span,
            Self::Call(e) => e.span,
            Self::Attribute(e) => e.span,
            Self::Subscript(e) => e.span,
            Self::Slice(e) => e.span,
            Self::List(e) => e.span,
            Self::Tuple(e) => e.span,
            Self::Set(e) => e.span,
            Self::Dict(e) => e.span,
            Self::ListComp(e) => e.span,
            Self::IfElse(e) => e.span,
            Self::Lambda(e) => e.span,
            Self::Starred(e) => e.span,
            Self::Yield(e) => e.span,
            Self::Paren(e) => e.span,
        }
    }

    /// Strip any number of enclosing parentheses.
    pub fn unparenthesized(&self) -> &Expr<'ast> {
        let mut expr = self;
        while let Expr::Paren(paren) = expr {
            expr = paren.expr;
        }
        expr
    }

    /// The bare name this expression is, if any.
    pub fn as_name(&self) -> Option<Ident<'ast>> {
        match self.unparenthesized() {
            Expr::Name(ident) => Some(*ident),
            _ => None,
        }
    }

    /// Whether this expression may appear on the left of `=`.
    pub fn is_assignable(&self) -> bool {
        match self {
            Expr::Name(_) | Expr::Attribute(_) | Expr::Subscript(_) => true,
            Expr::Paren(p) => p.expr.is_assignable(),
            Expr::Starred(s) => s.value.is_assignable(),
            Expr::Tuple(seq) | Expr::List(seq) => seq.elements.iter().all(Expr::is_assignable),
            _ => false,
        }
    }
}

// ============================================================================
// Literals
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiteralExpr<'ast> {
    pub kind: LiteralKind<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralKind<'ast> {
    /// Integer literal as written (`0xff`, `1_000`).
    Int(&'ast str),
    /// Float literal as written.
    Float(&'ast str),
    /// Decoded text of one or more adjacent string literals.
    Str(&'ast str),
    /// Decoded bytes literal.
    Bytes(&'ast str),
    /// Raw body of an f-string; interpolations are not parsed.
    FString(&'ast str),
    Bool(bool),
    None,
    Ellipsis,
}

impl<'ast> LiteralExpr<'ast> {
    /// Integer value, for literals that are integers.
    pub fn as_int(&self) -> Option<i64> {
        match self.kind {
            LiteralKind::Int(raw) => parse_int(raw),
            _ => None,
        }
    }

    /// Numeric value for integer and float literals.
    pub fn as_number(&self) -> Option<f64> {
        match self.kind {
            LiteralKind::Int(raw) => parse_int(raw).map(|v| v as f64),
            LiteralKind::Float(raw) => raw.replace('_', "").parse().ok(),
            _ => None,
        }
    }
}

fn parse_int(raw: &str) -> Option<i64> {
    let digits = raw.replace('_', "");
    let lower = digits.to_ascii_lowercase();
    if let Some(hex) = lower.strip_prefix("0x") {
        i64::from_str_radix(hex, 16).ok()
    } else if let Some(oct) = lower.strip_prefix("0o") {
        i64::from_str_radix(oct, 8).ok()
    } else if let Some(bin) = lower.strip_prefix("0b") {
        i64::from_str_radix(bin, 2).ok()
    } else {
        lower.parse().ok()
    }
}

// ============================================================================
// Operators
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryExpr<'ast> {
    pub left: &'ast Expr<'ast>,
    pub op: BinaryOp,
    pub right: &'ast Expr<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnaryExpr<'ast> {
    pub op: UnaryOp,
    pub operand: &'ast Expr<'ast>,
    pub span: Span,
}

/// `a and b and c` is one node with three values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoolOpExpr<'ast> {
    pub op: BoolOp,
    pub values: &'ast [Expr<'ast>],
    pub span: Span,
}

/// `left op[0] comparators[0] op[1] comparators[1] ...`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompareExpr<'ast> {
    pub left: &'ast Expr<'ast>,
    pub ops: &'ast [CompareOp],
    pub comparators: &'ast [Expr<'ast>],
    pub span: Span,
}

// ============================================================================
// Calls and access
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallExpr<'ast> {
    pub callee: &'ast Expr<'ast>,
    pub args: &'ast [Argument<'ast>],
    pub span: Span,
}

impl<'ast> CallExpr<'ast> {
    pub fn positional(&self) -> impl Iterator<Item = &Argument<'ast>> {
        self.args.iter().filter(|arg| arg.name.is_none() && !arg.double_star)
    }

    pub fn has_keywords(&self) -> bool {
        self.args.iter().any(|arg| arg.name.is_some() || arg.double_star)
    }
}

/// One call argument: positional, `name=value`, `*value` (a starred value)
/// or `**value`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Argument<'ast> {
    pub name: Option<Ident<'ast>>,
    pub value: &'ast Expr<'ast>,
    pub double_star: bool,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeExpr<'ast> {
    pub value: &'ast Expr<'ast>,
    pub attr: Ident<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubscriptExpr<'ast> {
    pub value: &'ast Expr<'ast>,
    pub index: &'ast Expr<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceExpr<'ast> {
    pub lower: Option<&'ast Expr<'ast>>,
    pub upper: Option<&'ast Expr<'ast>>,
    pub step: Option<&'ast Expr<'ast>>,
    pub span: Span,
}

// ============================================================================
// Displays
// ============================================================================

/// Elements of a list, tuple or set display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceExpr<'ast> {
    pub elements: &'ast [Expr<'ast>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DictExpr<'ast> {
    pub entries: &'ast [DictEntry<'ast>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DictEntry<'ast> {
    pub key: Expr<'ast>,
    pub value: Expr<'ast>,
}

/// `[element for target in iter if condition ...]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListCompExpr<'ast> {
    pub element: &'ast Expr<'ast>,
    pub generators: &'ast [Comprehension<'ast>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comprehension<'ast> {
    pub target: &'ast Expr<'ast>,
    pub iter: &'ast Expr<'ast>,
    pub conditions: &'ast [Expr<'ast>],
    pub span: Span,
}

// ============================================================================
// Other
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IfElseExpr<'ast> {
    pub test: &'ast Expr<'ast>,
    pub body: &'ast Expr<'ast>,
    pub orelse: &'ast Expr<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LambdaExpr<'ast> {
    pub params: &'ast [Param<'ast>],
    pub body: &'ast Expr<'ast>,
    pub span: Span,
}

/// A function or lambda parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Param<'ast> {
    pub name: Ident<'ast>,
    pub annotation: Option<&'ast Expr<'ast>>,
    pub default: Option<&'ast Expr<'ast>>,
    pub kind: ParamKind,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Normal,
    /// `*args`
    VarArgs,
    /// `**kwargs`
    KwArgs,
    /// A bare `*` separating keyword-only parameters.
    KeywordOnlyMarker,
    /// A bare `/` ending positional-only parameters.
    PositionalOnlyMarker,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarredExpr<'ast> {
    pub value: &'ast Expr<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YieldExpr<'ast> {
    pub value: Option<&'ast Expr<'ast>>,
    /// `yield from`
    pub delegate: bool,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParenExpr<'ast> {
    pub expr: &'ast Expr<'ast>,
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(raw: &str) -> LiteralExpr<'_> {
        LiteralExpr {
            kind: LiteralKind::Int(raw),
            span: Span::new(1, 1, raw.len() as u32),
        }
    }

    #[test]
    fn integer_values_honor_radix_and_separators() {
        assert_eq!(int("42").as_int(), Some(42));
        assert_eq!(int("1_000").as_int(), Some(1000));
        assert_eq!(int("0xFF").as_int(), Some(255));
        assert_eq!(int("0o17").as_int(), Some(15));
        assert_eq!(int("0b101").as_int(), Some(5));
    }

    #[test]
    fn float_number_value() {
        let lit = LiteralExpr {
            kind: LiteralKind::Float("2.5"),
            span: Span::default(),
        };
        assert_eq!(lit.as_number(), Some(2.5));
        assert_eq!(lit.as_int(), None);
    }

    #[test]
    fn paren_helpers() {
        let name = Expr::Name(Ident::new("x", Span::new(1, 2, 1)));
        let paren = ParenExpr {
            expr: &name,
            span: Span::new(1, 1, 3),
        };
        let wrapped = Expr::Paren(&paren);

        assert_eq!(wrapped.as_name().map(|i| i.name), Some("x"));
        assert!(wrapped.is_assignable());
        assert_eq!(wrapped.unparenthesized().span(), Span::new(1, 2, 1));
    }

    #[test]
    fn literals_are_not_assignable() {
        let lit = Expr::Literal(int("1"));
        assert!(!lit.is_assignable());
    }
}
