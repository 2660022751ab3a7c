//! Attribute access, indexing and slicing.

use pyjs_core::TranslateError;
use pyjs_parser::ast::{AttributeExpr, Expr, LiteralKind, SubscriptExpr, UnaryOp};

use super::calls::{check_super, is_super};
use super::{Emitted, ExprTranslator, Precedence, Result};

/// Whether `expr` is a negated numeric literal such as `-1`.
pub fn is_negative_literal(expr: &Expr<'_>) -> bool {
    match expr.unparenthesized() {
        Expr::Unary(un) if un.op == UnaryOp::Neg => matches!(
            un.operand,
            Expr::Literal(lit) if matches!(lit.kind, LiteralKind::Int(_) | LiteralKind::Float(_))
        ),
        _ => false,
    }
}

/// Receiver text for `.` access. Integer literals need parentheses so the
/// dot is not read as a decimal point.
fn receiver(t: &mut ExprTranslator<'_>, value: &Expr<'_>) -> Result<String> {
    let code = t.operand(value, Precedence::Postfix)?;
    if matches!(value, Expr::Literal(lit) if matches!(lit.kind, LiteralKind::Int(_))) {
        Ok(format!("({code})"))
    } else {
        Ok(code)
    }
}

pub(super) fn translate_attribute(
    t: &mut ExprTranslator<'_>,
    attr: &AttributeExpr<'_>,
) -> Result<Emitted> {
    if let Expr::Call(inner) = attr.value
        && is_super(inner)
    {
        check_super(t, attr.span)?;
        return Ok(Emitted::new(
            format!("super.{}", attr.attr.name),
            Precedence::Postfix,
        ));
    }

    let value = receiver(t, attr.value)?;
    Ok(Emitted::new(
        format!("{value}.{}", attr.attr.name),
        Precedence::Postfix,
    ))
}

pub(super) fn translate_subscript(
    t: &mut ExprTranslator<'_>,
    sub: &SubscriptExpr<'_>,
) -> Result<Emitted> {
    let value = receiver(t, sub.value)?;

    let code = match sub.index {
        Expr::Slice(slice) => {
            if slice.step.is_some() {
                return Err(TranslateError::unsupported("slice with a step", slice.span));
            }
            let lower = match slice.lower {
                Some(lower) => t.operand(lower, Precedence::Assignment)?,
                None => "0".to_string(),
            };
            match slice.upper {
                Some(upper) => {
                    let upper = t.operand(upper, Precedence::Assignment)?;
                    format!("{value}.slice({lower}, {upper})")
                }
                None => format!("{value}.slice({lower})"),
            }
        }
        Expr::Tuple(_) => {
            return Err(TranslateError::unsupported(
                "tuple subscript",
                sub.index.span(),
            ));
        }
        index if is_negative_literal(index) => {
            format!("{value}.at({})", t.code(index)?)
        }
        index => format!("{value}[{}]", t.operand(index, Precedence::Assignment)?),
    };

    Ok(Emitted::new(code, Precedence::Postfix))
}

/// Attribute and subscript targets of an assignment.
pub(super) fn translate_target(t: &mut ExprTranslator<'_>, target: &Expr<'_>) -> Result<String> {
    match target {
        Expr::Attribute(attr) => Ok(translate_attribute(t, attr)?.code),
        Expr::Subscript(sub) => match sub.index {
            Expr::Slice(_) => Err(TranslateError::unsupported(
                "slice assignment",
                target.span(),
            )),
            index if is_negative_literal(index) => Err(TranslateError::unsupported(
                "assignment to a negative index",
                target.span(),
            )),
            _ => translate_subscript(t, sub).map(|e| e.code),
        },
        Expr::Paren(paren) => translate_target(t, paren.expr),
        _ => Err(TranslateError::unsupported(
            "assignment to this kind of target",
            target.span(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{translate, translate_with};

    #[test]
    fn attributes() {
        assert_eq!(translate(&["obj"], "obj.field"), "obj.field");
        assert_eq!(translate(&["obj"], "obj.a.b"), "obj.a.b");
        assert_eq!(translate(&[], "(1).real"), "(1).real");
        assert!(translate_with(&[], "obj.field").unwrap_err().is_unbound_name());
    }

    #[test]
    fn indexing() {
        assert_eq!(translate(&["xs", "i"], "xs[i + 1]"), "xs[i + 1]");
        assert_eq!(translate(&["xs"], "xs[-1]"), "xs.at(-1)");
        assert_eq!(translate(&["d"], "d['key']"), "d[\"key\"]");
    }

    #[test]
    fn slicing() {
        assert_eq!(translate(&["xs"], "xs[1:3]"), "xs.slice(1, 3)");
        assert_eq!(translate(&["xs"], "xs[2:]"), "xs.slice(2)");
        assert_eq!(translate(&["xs", "n"], "xs[:n]"), "xs.slice(0, n)");
        assert_eq!(translate(&["xs"], "xs[:]"), "xs.slice(0)");
        assert!(translate_with(&["xs"], "xs[::2]").unwrap_err().is_unsupported());
    }

    #[test]
    fn calls_on_results() {
        assert_eq!(translate(&["s"], "s.strip().split(',')"), "s.strip().split(\",\")");
    }
}
