//! `if` / `elif` / `else` chains.
//!
//! - `if c: ..` becomes `if (c) { .. }`
//! - each `elif c: ..` adds `else if (c) { .. }`
//! - a trailing `else: ..` adds `else { .. }`

use pyjs_parser::ast::IfStmt;

use super::{Result, StmtTranslator};

impl StmtTranslator<'_> {
    pub(super) fn translate_if<'ast>(&mut self, if_stmt: &IfStmt<'ast>) -> Result<Vec<String>> {
        let mut parts = Vec::with_capacity(if_stmt.branches.len() + 1);

        for (i, branch) in if_stmt.branches.iter().enumerate() {
            let test = self.expr().code(branch.test)?;
            let body = self.block(&branch.body, &[])?;
            let header = if i == 0 {
                format!("if ({test})")
            } else {
                format!("else if ({test})")
            };
            parts.push((header, body));
        }

        if let Some(else_body) = &if_stmt.else_body {
            let body = self.block(else_body, &[])?;
            parts.push(("else".to_string(), body));
        }

        Ok(self.clauses(parts))
    }
}
