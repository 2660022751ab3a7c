//! Blocks and clause layout.

use pyjs_parser::ast::{Block, Expr, LiteralKind, Stmt};

use super::{Result, StmtTranslator};

impl StmtTranslator<'_> {
    /// Translate a suite into indented lines.
    ///
    /// The suite gets its own JavaScript block; `lets` are names the block
    /// header already declares, such as parameters or a loop variable.
    pub(super) fn block<'ast>(
        &mut self,
        block: &Block<'ast>,
        lets: &[&str],
    ) -> Result<Vec<String>> {
        self.suite(block.stmts, lets)
    }

    /// [`block`](Self::block) over a bare statement list.
    pub(super) fn suite<'ast>(
        &mut self,
        stmts: &[Stmt<'ast>],
        lets: &[&str],
    ) -> Result<Vec<String>> {
        self.ctx.open_block();
        for name in lets {
            self.ctx.record_let(name);
        }

        let lines = self.statements(stmts);
        self.ctx.close_block();
        Ok(self.indented(lines?))
    }

    fn statements<'ast>(&mut self, stmts: &[Stmt<'ast>]) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        for stmt in stmts {
            lines.extend(self.translate(stmt)?);
        }
        Ok(lines)
    }

    /// Indent every line by one level.
    pub(super) fn indented(&self, lines: Vec<String>) -> Vec<String> {
        let unit = self.ctx.indent_unit();
        lines
            .into_iter()
            .map(|line| format!("{unit}{line}"))
            .collect()
    }

    /// Lay out `header { body }` clauses that share closing and opening
    /// braces, as in `if (a) { .. } else { .. }`.
    ///
    /// Bodies must already be indented. A lone clause with an empty body
    /// collapses to `header {}`.
    pub(super) fn clauses(&self, parts: Vec<(String, Vec<String>)>) -> Vec<String> {
        if let [(header, body)] = parts.as_slice()
            && body.is_empty()
        {
            return vec![format!("{header} {{}}")];
        }

        let mut lines = Vec::new();
        for (i, (header, body)) in parts.into_iter().enumerate() {
            if i == 0 {
                lines.push(format!("{header} {{"));
            } else {
                lines.push(format!("}} {header} {{"));
            }
            lines.extend(body);
        }
        lines.push("}".to_string());
        lines
    }

    pub(super) fn braced(&self, header: String, body: Vec<String>) -> Vec<String> {
        self.clauses(vec![(header, body)])
    }
}

/// Statements of a function or class body without a leading docstring.
pub(super) fn strip_docstring<'s, 'ast>(stmts: &'s [Stmt<'ast>]) -> &'s [Stmt<'ast>] {
    match stmts {
        [Stmt::Expr(first), rest @ ..] if is_str_literal(first.expr) => rest,
        _ => stmts,
    }
}

fn is_str_literal(expr: &Expr<'_>) -> bool {
    matches!(expr, Expr::Literal(lit) if matches!(lit.kind, LiteralKind::Str(_)))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::run;

    #[test]
    fn nested_blocks_indent_per_level() {
        assert_eq!(
            run(&["a", "b"], "if a:\n    if b:\n        a = 1\n"),
            "if (a) {\n    if (b) {\n        a = 1;\n    }\n}"
        );
    }

    #[test]
    fn empty_bodies_collapse() {
        assert_eq!(run(&["a"], "if a:\n    pass\n"), "if (a) {}");
        assert_eq!(
            run(&["a"], "if a:\n    pass\nelse:\n    pass\n"),
            "if (a) {\n} else {\n}"
        );
    }

    #[test]
    fn docstrings_are_dropped_from_definitions() {
        assert_eq!(
            run(&[], "def f():\n    \"\"\"Doc.\"\"\"\n    return 1\n"),
            "function f() {\n    return 1;\n}"
        );
        assert_eq!(run(&[], "'module text'\n"), "\"module text\";");
    }

    #[test]
    fn inline_suites() {
        assert_eq!(
            run(&["a"], "if a: a = 2; a = 3\n"),
            "if (a) {\n    a = 2;\n    a = 3;\n}"
        );
    }
}
