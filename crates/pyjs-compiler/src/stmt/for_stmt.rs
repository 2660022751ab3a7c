//! `for` loops.
//!
//! A loop over the built-in `range` becomes a counting loop:
//!
//! ```text
//! for i in range(2, 10, 2):    for (let i = 2; i < 10; i += 2) {
//! ```
//!
//! Any other iterable becomes `for (let x of iterable)`.
//!
//! A loop variable the enclosing block already declared is assigned by the
//! header instead, so its last value outlives the loop. Otherwise the `let`
//! in the header ends the binding with the loop.

use pyjs_core::TranslateError;
use pyjs_parser::ast::{CallExpr, Expr, ForStmt, UnaryOp};

use super::{Result, StmtTranslator};
use crate::expr::{Precedence, check_identifier, is_negative_literal};
use crate::scope::SymbolKind;

impl StmtTranslator<'_> {
    pub(super) fn translate_for<'ast>(&mut self, for_stmt: &ForStmt<'ast>) -> Result<Vec<String>> {
        if let Some(else_body) = &for_stmt.else_body {
            return Err(TranslateError::unsupported("for ... else", else_body.span));
        }
        let Some(target) = for_stmt.target.as_name() else {
            return Err(TranslateError::unsupported(
                "for loop with several targets",
                for_stmt.target.span(),
            ));
        };
        check_identifier(target.name, target.span)?;

        let var = target.name;
        let declared = self.ctx.is_let_bound(var);
        let binding = if declared { "" } else { "let " };
        let range = self.expr().builtin_range(for_stmt.iter);
        let header = match range {
            Some(call) => {
                let (start, cmp, stop, step) = self.range_header(call)?;
                format!("for ({binding}{var} = {start}; {var} {cmp} {stop}; {var} += {step})")
            }
            None => {
                let iter = self.expr().code(for_stmt.iter)?;
                format!("for ({binding}{var} of {iter})")
            }
        };

        self.ctx.declare(var, SymbolKind::Variable);
        let body = self.block(&for_stmt.body, &[var]);
        if !declared {
            self.ctx.scopes.forget(var);
        }
        Ok(self.braced(header, body?))
    }

    /// Start, comparison, stop and step of a counting loop.
    fn range_header<'ast>(
        &mut self,
        call: &CallExpr<'ast>,
    ) -> Result<(String, &'static str, String, String)> {
        if call.has_keywords() || call.args.iter().any(|a| matches!(a.value, Expr::Starred(_))) {
            return Err(TranslateError::unsupported(
                "range() with keyword or starred arguments",
                call.span,
            ));
        }

        let bounds: Vec<&Expr<'ast>> = call.args.iter().map(|arg| arg.value).collect();
        let (start, stop, step) = match bounds.as_slice() {
            [stop] => (None, *stop, None),
            [start, stop] => (Some(*start), *stop, None),
            [start, stop, step] => (Some(*start), *stop, Some(*step)),
            _ => {
                return Err(TranslateError::unsupported(
                    format!("range() with {} arguments", bounds.len()),
                    call.span,
                ));
            }
        };

        let cmp = match (start.map_or(Some(0.0), numeric_value), numeric_value(stop)) {
            (Some(from), Some(to)) if from < to => "<",
            (Some(_), Some(_)) => ">",
            _ if step.is_some_and(is_negative_literal) => ">",
            _ => "<",
        };

        let start = match start {
            Some(start) => self.expr().code(start)?,
            None => "0".to_string(),
        };
        let stop = self.expr().operand(stop, Precedence::Relational.next())?;
        let step = match step {
            Some(step) => self.expr().code(step)?,
            None => "1".to_string(),
        };
        Ok((start, cmp, stop, step))
    }
}

/// Value of a numeric literal, possibly negated.
fn numeric_value(expr: &Expr<'_>) -> Option<f64> {
    match expr.unparenthesized() {
        Expr::Literal(lit) => lit.as_number(),
        Expr::Unary(un) if un.op == UnaryOp::Neg => numeric_value(un.operand).map(|v| -v),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{run, run_with};

    #[test]
    fn range_with_one_argument() {
        assert_eq!(
            run(&[], "for i in range(5):\n    print(i)\n"),
            "for (let i = 0; i < 5; i += 1) {\n    console.log(i);\n}"
        );
    }

    #[test]
    fn range_with_start_and_step() {
        assert_eq!(
            run(&[], "for i in range(2, 10, 2):\n    pass\n"),
            "for (let i = 2; i < 10; i += 2) {}"
        );
        assert_eq!(
            run(&[], "for i in range(10, 0, -1):\n    pass\n"),
            "for (let i = 10; i > 0; i += -1) {}"
        );
    }

    #[test]
    fn non_literal_bounds_use_the_step_sign() {
        assert_eq!(
            run(&["n"], "for i in range(n):\n    pass\n"),
            "for (let i = 0; i < n; i += 1) {}"
        );
        assert_eq!(
            run(&["n"], "for i in range(n, 0, -2):\n    pass\n"),
            "for (let i = n; i > 0; i += -2) {}"
        );
        assert_eq!(
            run(&["a", "b"], "for i in range(a, a + b):\n    pass\n"),
            "for (let i = a; i < a + b; i += 1) {}"
        );
    }

    #[test]
    fn iterables_use_for_of() {
        assert_eq!(
            run(&["items"], "for item in items:\n    print(item)\n"),
            "for (let item of items) {\n    console.log(item);\n}"
        );
    }

    #[test]
    fn loop_variable_is_declared() {
        assert_eq!(
            run(&["xs"], "for x in xs:\n    x = x * 2\n"),
            "for (let x of xs) {\n    x = x * 2;\n}"
        );
        assert_eq!(
            run(&["xs"], "for x in xs:\n    pass\nx = 0\n"),
            "for (let x of xs) {}\nlet x = 0;"
        );
    }

    #[test]
    fn declared_loop_variables_keep_their_last_value() {
        assert_eq!(
            run(&["xs"], "x = None\nfor x in xs:\n    pass\nprint(x)\n"),
            "let x = null;\nfor (x of xs) {}\nconsole.log(x);"
        );
        assert_eq!(
            run(&[], "def f(i):\n    for i in range(3):\n        pass\n    return i\n"),
            "function f(i) {\n    for (i = 0; i < 3; i += 1) {}\n    return i;\n}"
        );
    }

    #[test]
    fn header_bound_loop_variables_end_with_the_loop() {
        let source = "for i in range(3):\n    pass\nprint(i)\n";
        assert!(run_with(&[], source).unwrap_err().is_unbound_name());
    }

    #[test]
    fn unsupported_loops() {
        assert!(
            run_with(&["ps"], "for a, b in ps:\n    pass\n")
                .unwrap_err()
                .is_unsupported()
        );
        assert!(
            run_with(&["xs"], "for x in xs:\n    pass\nelse:\n    pass\n")
                .unwrap_err()
                .is_unsupported()
        );
        assert!(
            run_with(&[], "for i in range(1, 2, 3, 4):\n    pass\n")
                .unwrap_err()
                .is_unsupported()
        );
    }

    #[test]
    fn shadowed_range_is_an_ordinary_iterable() {
        assert_eq!(
            run(&[], "def range(n):\n    return []\nfor i in range(3):\n    pass\n"),
            "function range(n) {\n    return [];\n}\nfor (let i of range(3)) {}"
        );
    }
}
