//! Unary operators.

use pyjs_parser::ast::{UnaryExpr, UnaryOp};

use super::{Emitted, ExprTranslator, Precedence, Result};

pub(super) fn translate_unary(t: &mut ExprTranslator<'_>, un: &UnaryExpr<'_>) -> Result<Emitted> {
    let symbol = match un.op {
        UnaryOp::Not => "!",
        UnaryOp::Neg => "-",
        UnaryOp::Pos => "+",
        UnaryOp::Invert => "~",
    };
    let operand = t.operand(un.operand, Precedence::Unary)?;

    // `- -x` must not collapse into the decrement operator.
    let code = if matches!(un.op, UnaryOp::Neg | UnaryOp::Pos) && operand.starts_with(symbol) {
        format!("{symbol}({operand})")
    } else {
        format!("{symbol}{operand}")
    };
    Ok(Emitted::new(code, Precedence::Unary))
}
