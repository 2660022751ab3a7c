//! Binary, boolean and comparison operators.
//!
//! - Arithmetic and bitwise operators map one to one, except `**`, which
//!   becomes `Math.pow(a, b)`, and `//`, which becomes `/`
//! - `and` / `or` become `&&` / `||`
//! - Chained comparisons are split into `&&`-joined pairs
//! - `in` / `not in` become `includes` calls on the container

use pyjs_core::TranslateError;
use pyjs_parser::ast::{BinaryExpr, BinaryOp, BoolOp, BoolOpExpr, CompareExpr, CompareOp, Expr};

use super::{Emitted, ExprTranslator, Precedence, Result};
use crate::maps;

fn precedence_of(op: BinaryOp) -> Precedence {
    match op {
        BinaryOp::BitOr => Precedence::BitOr,
        BinaryOp::BitXor => Precedence::BitXor,
        BinaryOp::BitAnd => Precedence::BitAnd,
        BinaryOp::LeftShift | BinaryOp::RightShift => Precedence::Shift,
        BinaryOp::Add | BinaryOp::Sub => Precedence::Additive,
        BinaryOp::Mul | BinaryOp::MatMul | BinaryOp::Div | BinaryOp::FloorDiv | BinaryOp::Mod => {
            Precedence::Multiplicative
        }
        BinaryOp::Pow => Precedence::Exponent,
    }
}

pub(super) fn translate_binary(
    t: &mut ExprTranslator<'_>,
    bin: &BinaryExpr<'_>,
) -> Result<Emitted> {
    if bin.op == BinaryOp::Pow {
        let base = t.operand(bin.left, Precedence::Assignment)?;
        let exponent = t.operand(bin.right, Precedence::Assignment)?;
        return Ok(Emitted::new(
            format!("Math.pow({base}, {exponent})"),
            Precedence::Postfix,
        ));
    }

    let Some(symbol) = maps::binary_op(bin.op) else {
        return Err(TranslateError::unsupported(
            format!("operator '{}'", bin.op),
            bin.span,
        ));
    };

    let precedence = precedence_of(bin.op);
    let left = t.operand(bin.left, precedence)?;
    let right = t.operand(bin.right, precedence.next())?;
    Ok(Emitted::new(format!("{left} {symbol} {right}"), precedence))
}

pub(super) fn translate_bool_op(
    t: &mut ExprTranslator<'_>,
    bool_op: &BoolOpExpr<'_>,
) -> Result<Emitted> {
    let (symbol, precedence) = match bool_op.op {
        BoolOp::And => (" && ", Precedence::LogicalAnd),
        BoolOp::Or => (" || ", Precedence::LogicalOr),
    };

    let values = bool_op
        .values
        .iter()
        .map(|value| t.operand(value, precedence))
        .collect::<Result<Vec<_>>>()?;
    Ok(Emitted::new(values.join(symbol), precedence))
}

pub(super) fn translate_compare(
    t: &mut ExprTranslator<'_>,
    cmp: &CompareExpr<'_>,
) -> Result<Emitted> {
    if let ([op], [right]) = (cmp.ops, cmp.comparators) {
        return compare_pair(t, cmp.left, *op, right);
    }

    // Middle operands are repeated in the output, so only side-effect free
    // ones are accepted.
    let middles = &cmp.comparators[..cmp.comparators.len().saturating_sub(1)];
    if let Some(complex) = middles
        .iter()
        .find(|e| !matches!(e.unparenthesized(), Expr::Name(_) | Expr::Literal(_)))
    {
        return Err(TranslateError::unsupported(
            "chained comparison with a complex middle operand",
            complex.span(),
        ));
    }

    let mut parts = Vec::with_capacity(cmp.ops.len());
    let mut left = cmp.left;
    for (op, right) in cmp.ops.iter().zip(cmp.comparators) {
        let pair = compare_pair(t, left, *op, right)?;
        parts.push(pair.wrap_below(Precedence::LogicalAnd.next()));
        left = right;
    }
    Ok(Emitted::new(parts.join(" && "), Precedence::LogicalAnd))
}

fn compare_pair(
    t: &mut ExprTranslator<'_>,
    left: &Expr<'_>,
    op: CompareOp,
    right: &Expr<'_>,
) -> Result<Emitted> {
    match op {
        CompareOp::In | CompareOp::NotIn => {
            let container = t.operand(right, Precedence::Postfix)?;
            let item = t.operand(left, Precedence::Assignment)?;
            let call = format!("{container}.includes({item})");
            if op == CompareOp::In {
                Ok(Emitted::new(call, Precedence::Postfix))
            } else {
                Ok(Emitted::new(format!("!{call}"), Precedence::Unary))
            }
        }
        _ => {
            let Some(symbol) = maps::comparison_op(op) else {
                return Err(TranslateError::unsupported(
                    format!("comparison '{op}'"),
                    left.span(),
                ));
            };
            let precedence = match op {
                CompareOp::Eq | CompareOp::NotEq | CompareOp::Is | CompareOp::IsNot => {
                    Precedence::Equality
                }
                _ => Precedence::Relational,
            };
            let lhs = t.operand(left, precedence)?;
            let rhs = t.operand(right, precedence.next())?;
            Ok(Emitted::new(format!("{lhs} {symbol} {rhs}"), precedence))
        }
    }
}
