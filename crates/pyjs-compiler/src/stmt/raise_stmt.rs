//! `raise` and `assert`.

use pyjs_core::TranslateError;
use pyjs_parser::ast::{AssertStmt, Expr, Ident, RaiseStmt};

use super::{Result, StmtTranslator};
use crate::expr::translate_arguments;
use crate::maps::is_builtin_exception;
use crate::scope::SymbolKind;

impl StmtTranslator<'_> {
    /// `raise E(args)` becomes `throw new E(args);` with `E` mapped to a
    /// JavaScript constructor. A bare `raise` re-throws the exception of the
    /// innermost handler.
    pub(super) fn translate_raise<'ast>(&mut self, raise: &RaiseStmt<'ast>) -> Result<Vec<String>> {
        if let Some(cause) = raise.cause {
            return Err(TranslateError::unsupported("raise ... from", cause.span()));
        }

        let Some(exc) = raise.exc else {
            return match self.ctx.current_exception() {
                Some(name) => Ok(vec![format!("throw {name};")]),
                None => Err(TranslateError::unsupported(
                    "bare 'raise' outside an except block",
                    raise.span,
                )),
            };
        };

        let thrown = match exc.unparenthesized() {
            Expr::Call(call) => match call.callee {
                Expr::Name(ident) if self.is_exception_class(ident) => {
                    let class = self.exception_name(ident)?;
                    let args = translate_arguments(&mut self.expr(), call.args)?;
                    format!("new {class}({args})")
                }
                _ => self.expr().code(exc)?,
            },
            Expr::Name(ident) if self.is_exception_class(ident) => {
                format!("new {}()", self.exception_name(ident)?)
            }
            _ => self.expr().code(exc)?,
        };
        Ok(vec![format!("throw {thrown};")])
    }

    /// `assert test, msg` becomes a guarded `throw new Error(msg)`.
    pub(super) fn translate_assert<'ast>(
        &mut self,
        assert: &AssertStmt<'ast>,
    ) -> Result<Vec<String>> {
        let test = self.expr().code(assert.test)?;
        let msg = match assert.msg {
            Some(msg) => self.expr().code(msg)?,
            None => String::new(),
        };
        let body = self.indented(vec![format!("throw new Error({msg});")]);
        Ok(self.braced(format!("if (!({test}))"), body))
    }

    /// A user class, or a Python exception class that user code has not
    /// rebound.
    fn is_exception_class(&self, ident: &Ident<'_>) -> bool {
        match self.ctx.scopes.lookup(ident.name) {
            Some(kind) => kind == SymbolKind::Class,
            None => is_builtin_exception(ident.name),
        }
    }
}
