//! `while` loops.

use pyjs_core::TranslateError;
use pyjs_parser::ast::WhileStmt;

use super::{Result, StmtTranslator};

impl StmtTranslator<'_> {
    pub(super) fn translate_while<'ast>(
        &mut self,
        while_stmt: &WhileStmt<'ast>,
    ) -> Result<Vec<String>> {
        if let Some(else_body) = &while_stmt.else_body {
            return Err(TranslateError::unsupported("while ... else", else_body.span));
        }

        let test = self.expr().code(while_stmt.test)?;
        let body = self.block(&while_stmt.body, &[])?;
        Ok(self.braced(format!("while ({test})"), body))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{run, run_with};

    #[test]
    fn loop_with_body() {
        assert_eq!(
            run(&["n"], "while n > 0:\n    n -= 1\n    continue\n"),
            "while (n > 0) {\n    n -= 1;\n    continue;\n}"
        );
    }

    #[test]
    fn else_clause_is_unsupported() {
        let source = "while n:\n    n -= 1\nelse:\n    pass\n";
        assert!(run_with(&["n"], source).unwrap_err().is_unsupported());
    }
}
