//! Expression translator.
//!
//! The [`ExprTranslator`] turns expression nodes into JavaScript expression
//! text. Every result is an [`Emitted`] carrying the JavaScript precedence of
//! its outermost operator, so operands are parenthesized only when the
//! surrounding operator binds tighter. Parentheses written in the source are
//! kept as they are.
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use pyjs_compiler::{ExprTranslator, TranslationContext};
//! use pyjs_parser::Parser;
//!
//! let arena = Bump::new();
//! let expr = Parser::expression("abs(-3) ** 2", &arena).unwrap();
//! let mut ctx = TranslationContext::default();
//! let code = ExprTranslator::new(&mut ctx).code(expr).unwrap();
//! assert_eq!(code, "Math.pow(Math.abs(-3), 2)");
//! ```

mod binary;
mod calls;
mod collections;
mod identifiers;
mod lambda;
mod literals;
mod member;
mod ternary;
mod unary;

pub(crate) use calls::translate_arguments;
pub use identifiers::check_identifier;
pub use lambda::{declare_params, translate_params};
pub use literals::quote;
pub use member::is_negative_literal;

use pyjs_core::TranslateError;
use pyjs_parser::ast::{CallExpr, Expr};

use crate::context::TranslationContext;

pub(crate) type Result<T> = std::result::Result<T, TranslateError>;

// ============================================================================
// Precedence
// ============================================================================

/// JavaScript operator precedence, loosest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Arrow functions and anything else at assignment level.
    Assignment,
    Conditional,
    LogicalOr,
    LogicalAnd,
    BitOr,
    BitXor,
    BitAnd,
    Equality,
    Relational,
    Shift,
    Additive,
    Multiplicative,
    Exponent,
    Unary,
    /// Calls, member access and `new` with arguments.
    Postfix,
    Primary,
}

impl Precedence {
    /// The next tighter level, used for right operands of
    /// left-associative operators.
    pub fn next(self) -> Self {
        use Precedence::*;
        match self {
            Assignment => Conditional,
            Conditional => LogicalOr,
            LogicalOr => LogicalAnd,
            LogicalAnd => BitOr,
            BitOr => BitXor,
            BitXor => BitAnd,
            BitAnd => Equality,
            Equality => Relational,
            Relational => Shift,
            Shift => Additive,
            Additive => Multiplicative,
            Multiplicative => Exponent,
            Exponent => Unary,
            Unary => Postfix,
            Postfix | Primary => Primary,
        }
    }
}

/// Translated expression text and the precedence of its outermost operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emitted {
    pub code: String,
    pub precedence: Precedence,
}

impl Emitted {
    pub fn new(code: impl Into<String>, precedence: Precedence) -> Self {
        Self {
            code: code.into(),
            precedence,
        }
    }

    pub fn primary(code: impl Into<String>) -> Self {
        Self::new(code, Precedence::Primary)
    }

    /// The code, parenthesized if it binds looser than `min`.
    pub fn wrap_below(self, min: Precedence) -> String {
        if self.precedence < min {
            format!("({})", self.code)
        } else {
            self.code
        }
    }
}

// ============================================================================
// ExprTranslator
// ============================================================================

/// Translates expressions against the scopes of a [`TranslationContext`].
pub struct ExprTranslator<'a> {
    ctx: &'a mut TranslationContext,
}

impl<'a> ExprTranslator<'a> {
    pub fn new(ctx: &'a mut TranslationContext) -> Self {
        Self { ctx }
    }

    /// Translate an expression in a reading position.
    ///
    /// Every name it references must resolve.
    pub fn translate<'ast>(&mut self, expr: &Expr<'ast>) -> Result<Emitted> {
        let span = expr.span();
        match expr {
            Expr::Literal(lit) => literals::translate_literal(lit),
            Expr::Name(ident) => identifiers::translate_name(self, ident),
            Expr::Binary(bin) => binary::translate_binary(self, bin),
            Expr::Unary(un) => unary::translate_unary(self, un),
            Expr::BoolOp(bool_op) => binary::translate_bool_op(self, bool_op),
            Expr::Compare(cmp) => binary::translate_compare(self, cmp),
            Expr::Call(call) => calls::translate_call(self, call),
            Expr::Attribute(attr) => member::translate_attribute(self, attr),
            Expr::Subscript(sub) => member::translate_subscript(self, sub),
            Expr::List(seq) | Expr::Tuple(seq) => collections::translate_array(self, seq),
            Expr::Set(seq) => collections::translate_set(self, seq),
            Expr::Dict(dict) => collections::translate_dict(self, dict),
            Expr::ListComp(comp) => collections::translate_list_comp(self, comp),
            Expr::IfElse(if_else) => ternary::translate_conditional(self, if_else),
            Expr::Lambda(lambda) => lambda::translate_lambda(self, lambda),
            Expr::Paren(paren) => {
                let inner = self.translate(paren.expr)?;
                Ok(Emitted::primary(format!("({})", inner.code)))
            }
            Expr::Slice(_) => Err(TranslateError::unsupported("slice outside a subscript", span)),
            Expr::Starred(_) => Err(TranslateError::unsupported("starred expression", span)),
            Expr::Yield(y) if y.delegate => Err(TranslateError::unsupported("yield from", span)),
            Expr::Yield(_) => Err(TranslateError::unsupported("yield", span)),
        }
    }

    /// Translate and keep only the text.
    pub fn code<'ast>(&mut self, expr: &Expr<'ast>) -> Result<String> {
        Ok(self.translate(expr)?.code)
    }

    /// Translate an operand, parenthesizing it if it binds looser than `min`.
    pub fn operand<'ast>(&mut self, expr: &Expr<'ast>, min: Precedence) -> Result<String> {
        Ok(self.translate(expr)?.wrap_below(min))
    }

    /// Translate an attribute or subscript assignment target.
    ///
    /// Plain names are binding positions and are handled by the statement
    /// translator, which declares them instead of resolving them.
    pub fn target<'ast>(&mut self, expr: &Expr<'ast>) -> Result<String> {
        member::translate_target(self, expr)
    }

    /// The call, if `expr` calls the built-in `range`.
    pub fn builtin_range<'ast>(&self, expr: &Expr<'ast>) -> Option<&'ast CallExpr<'ast>> {
        match expr {
            Expr::Call(call)
                if matches!(call.callee, Expr::Name(n) if n.name == "range")
                    && self.ctx.scopes.is_builtin("range") =>
            {
                Some(*call)
            }
            _ => None,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{translate, translate_with};
    use super::*;

    #[test]
    fn precedence_ordering() {
        assert!(Precedence::Assignment < Precedence::Conditional);
        assert!(Precedence::Additive < Precedence::Multiplicative);
        assert_eq!(Precedence::Additive.next(), Precedence::Multiplicative);
        assert_eq!(Precedence::Primary.next(), Precedence::Primary);
    }

    #[test]
    fn wrap_below_only_when_looser() {
        let sum = Emitted::new("a + b", Precedence::Additive);
        assert_eq!(sum.clone().wrap_below(Precedence::Multiplicative), "(a + b)");
        assert_eq!(sum.wrap_below(Precedence::Additive), "a + b");
    }

    #[test]
    fn source_parentheses_are_kept() {
        assert_eq!(translate(&["a", "b", "c"], "(a + b) * c"), "(a + b) * c");
        assert_eq!(translate(&["a"], "(a)"), "(a)");
    }

    #[test]
    fn unsupported_forms() {
        let err = translate_with(&["xs"], "xs[1:2, 3]").unwrap_err();
        assert!(err.is_unsupported());
    }
}
