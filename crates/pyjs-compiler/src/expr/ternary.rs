//! Conditional expressions.

use pyjs_parser::ast::IfElseExpr;

use super::{Emitted, ExprTranslator, Precedence, Result};

/// `body if test else orelse` becomes `test ? body : orelse`.
pub(super) fn translate_conditional(
    t: &mut ExprTranslator<'_>,
    if_else: &IfElseExpr<'_>,
) -> Result<Emitted> {
    let test = t.operand(if_else.test, Precedence::LogicalOr)?;
    let body = t.operand(if_else.body, Precedence::Assignment)?;
    let orelse = t.operand(if_else.orelse, Precedence::Assignment)?;
    Ok(Emitted::new(
        format!("{test} ? {body} : {orelse}"),
        Precedence::Conditional,
    ))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::translate;

    #[test]
    fn reorders_operands() {
        assert_eq!(translate(&["a", "b", "c"], "a if c else b"), "c ? a : b");
    }

    #[test]
    fn nested_conditionals() {
        assert_eq!(
            translate(&["a", "b", "c", "x", "y"], "a if x else b if y else c"),
            "x ? a : y ? b : c"
        );
        assert_eq!(
            translate(&["a", "b", "x"], "(a if x else b) + 1"),
            "(x ? a : b) + 1"
        );
    }
}
