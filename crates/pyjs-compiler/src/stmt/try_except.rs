//! `try` / `except` / `finally`.
//!
//! JavaScript has a single untyped `catch`, so typed handlers become an
//! `instanceof` dispatch inside it:
//!
//! ```text
//! try:                          try {
//!     risky()                       risky();
//! except TypeError:             } catch (e) {
//!     fix()                         if (e instanceof TypeError) {
//! except Exception as err:              fix();
//!     log(err)                      } else {
//!                                       let err = e;
//!                                       log(err);
//!                                   }
//!                               }
//! ```
//!
//! A handler whose classes all map to the generic `Error` catches
//! everything when it is the last one. Without such a handler, unmatched
//! errors are re-thrown.

use pyjs_core::TranslateError;
use pyjs_parser::ast::{ExceptHandler, Expr, Ident, TryStmt};

use super::{Result, StmtTranslator};
use crate::expr::{Precedence, check_identifier};
use crate::maps::{exception_constructor, is_builtin_exception};
use crate::scope::SymbolKind;

impl StmtTranslator<'_> {
    pub(super) fn translate_try<'ast>(
        &mut self,
        try_stmt: &TryStmt<'ast>,
    ) -> Result<Vec<String>> {
        if let Some(else_body) = &try_stmt.else_body {
            return Err(TranslateError::unsupported("try ... else", else_body.span));
        }

        let body = self.block(&try_stmt.body, &[])?;
        let mut parts = vec![("try".to_string(), body)];
        if !try_stmt.handlers.is_empty() {
            parts.push(self.catch_clause(try_stmt.handlers)?);
        }
        if let Some(finally_body) = &try_stmt.finally_body {
            let body = self.block(finally_body, &[])?;
            parts.push(("finally".to_string(), body));
        }
        Ok(self.clauses(parts))
    }

    fn catch_clause<'ast>(
        &mut self,
        handlers: &[ExceptHandler<'ast>],
    ) -> Result<(String, Vec<String>)> {
        let param = handlers
            .iter()
            .find_map(|handler| handler.alias)
            .map_or("e", |alias| alias.name);

        let mut branches = Vec::with_capacity(handlers.len());
        for (i, handler) in handlers.iter().enumerate() {
            let last = i + 1 == handlers.len();
            let condition = match handler.exc_type {
                None if !last => {
                    return Err(TranslateError::unsupported(
                        "bare 'except' before other handlers",
                        handler.span,
                    ));
                }
                None => None,
                Some(exc_type) => {
                    let classes = self.exception_classes(exc_type)?;
                    if last && classes.iter().all(|class| class == "Error") {
                        None
                    } else {
                        let tests: Vec<_> = classes
                            .iter()
                            .map(|class| format!("{param} instanceof {class}"))
                            .collect();
                        Some(tests.join(" || "))
                    }
                }
            };
            branches.push((condition, handler));
        }

        let header = format!("catch ({param})");
        if let [(None, handler)] = branches.as_slice() {
            let body = self.handler_body(handler, param)?;
            return Ok((header, body));
        }

        let mut parts = Vec::with_capacity(branches.len() + 1);
        let mut catches_all = false;
        for (i, (condition, handler)) in branches.into_iter().enumerate() {
            let body = self.handler_body(handler, param)?;
            let branch = match condition {
                Some(test) if i == 0 => format!("if ({test})"),
                Some(test) => format!("else if ({test})"),
                None => {
                    catches_all = true;
                    "else".to_string()
                }
            };
            parts.push((branch, body));
        }
        if !catches_all {
            let rethrow = self.indented(vec![format!("throw {param};")]);
            parts.push(("else".to_string(), rethrow));
        }

        let dispatch = self.clauses(parts);
        Ok((header, self.indented(dispatch)))
    }

    /// A handler body with its alias bound to the caught value.
    ///
    /// The alias lives in the current scope and is dropped when the handler
    /// ends, so other names the handler assigns survive it.
    fn handler_body<'ast>(
        &mut self,
        handler: &ExceptHandler<'ast>,
        param: &str,
    ) -> Result<Vec<String>> {
        let alias = handler.alias.map_or(param, |alias| alias.name);
        if let Some(ident) = handler.alias {
            check_identifier(ident.name, ident.span)?;
        }

        self.ctx.declare(alias, SymbolKind::Variable);
        self.ctx.push_handler(alias);
        let body = self.block(&handler.body, &[alias, param]);
        self.ctx.pop_handler();
        self.ctx.scopes.forget(alias);

        let mut lines = Vec::new();
        if alias != param {
            lines.extend(self.indented(vec![format!("let {alias} = {param};")]));
        }
        lines.extend(body?);
        Ok(lines)
    }

    /// Constructors an `except` clause tests against.
    fn exception_classes<'ast>(&mut self, exc_type: &Expr<'ast>) -> Result<Vec<String>> {
        match exc_type.unparenthesized() {
            Expr::Tuple(seq) => seq
                .elements
                .iter()
                .map(|element| self.exception_class(element))
                .collect(),
            _ => Ok(vec![self.exception_class(exc_type)?]),
        }
    }

    fn exception_class<'ast>(&mut self, expr: &Expr<'ast>) -> Result<String> {
        match expr.unparenthesized() {
            Expr::Name(ident) => self.exception_name(ident),
            _ => self.expr().operand(expr, Precedence::Relational.next()),
        }
    }

    /// A bound name is kept as written; a Python exception class maps to
    /// its JavaScript counterpart.
    pub(super) fn exception_name(&self, ident: &Ident<'_>) -> Result<String> {
        if self.ctx.scopes.is_bound(ident.name) {
            Ok(ident.name.to_string())
        } else if is_builtin_exception(ident.name) {
            Ok(exception_constructor(ident.name).to_string())
        } else {
            Err(TranslateError::UnboundName {
                name: ident.name.to_string(),
                span: ident.span,
            })
        }
    }
}
