//! Statement translator.
//!
//! The [`StmtTranslator`] turns statement nodes into lines of JavaScript,
//! handling:
//! - Assignments, with `let` for first bindings
//! - `if`/`elif`/`else` chains, `while` and `for` loops
//! - `try`/`except`/`finally`, `raise` and `assert`
//! - Function and class definitions
//!
//! Every statement yields its lines relative to its own nesting level; a
//! block indents the lines of its statements by one level.
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use pyjs_compiler::{StmtTranslator, TranslationContext};
//! use pyjs_parser::Parser;
//!
//! let arena = Bump::new();
//! let module = Parser::parse("x = 5\n", &arena).unwrap();
//! let mut ctx = TranslationContext::default();
//! let lines = StmtTranslator::new(&mut ctx).translate(&module.body()[0]).unwrap();
//! assert_eq!(lines, vec!["let x = 5;".to_string()]);
//! ```

mod assign;
mod block;
mod class_def;
mod for_stmt;
mod function_def;
mod hoist;
mod if_stmt;
mod raise_stmt;
mod try_except;
mod while_stmt;

use pyjs_core::TranslateError;
use pyjs_parser::ast::{ExprStmt, Stmt};

use crate::context::TranslationContext;
use crate::expr::ExprTranslator;
use crate::unit::DeclKind;

type Result<T> = std::result::Result<T, TranslateError>;

/// Translates statements against a [`TranslationContext`].
pub struct StmtTranslator<'a> {
    ctx: &'a mut TranslationContext,
}

impl<'a> StmtTranslator<'a> {
    pub fn new(ctx: &'a mut TranslationContext) -> Self {
        Self { ctx }
    }

    /// Translate one statement into unindented lines.
    ///
    /// `pass` yields no lines. A compound statement is preceded by a `let`
    /// for the names its blocks bind first.
    pub fn translate<'ast>(&mut self, stmt: &Stmt<'ast>) -> Result<Vec<String>> {
        let mut lines: Vec<String> = self.hoisted_declaration(stmt).into_iter().collect();
        lines.extend(self.translate_stmt(stmt)?);
        Ok(lines)
    }

    fn translate_stmt<'ast>(&mut self, stmt: &Stmt<'ast>) -> Result<Vec<String>> {
        let span = stmt.span();
        match stmt {
            Stmt::Expr(expr_stmt) => self.translate_expr_stmt(expr_stmt),
            Stmt::Assign(assign) => self.translate_assign(assign),
            Stmt::AugAssign(aug) => self.translate_aug_assign(aug),
            Stmt::AnnAssign(ann) => self.translate_ann_assign(ann),
            Stmt::Return(ret) => match ret.value {
                Some(value) => Ok(vec![format!("return {};", self.expr().code(value)?)]),
                None => Ok(vec!["return;".to_string()]),
            },
            Stmt::If(if_stmt) => self.translate_if(if_stmt),
            Stmt::While(while_stmt) => self.translate_while(while_stmt),
            Stmt::For(for_stmt) => self.translate_for(for_stmt),
            Stmt::Try(try_stmt) => self.translate_try(try_stmt),
            Stmt::FunctionDef(def) => self.translate_function(def),
            Stmt::ClassDef(class) => self.translate_class(class),
            Stmt::Raise(raise) => self.translate_raise(raise),
            Stmt::Assert(assert) => self.translate_assert(assert),
            Stmt::Pass(_) => Ok(Vec::new()),
            Stmt::Break(_) => Ok(vec!["break;".to_string()]),
            Stmt::Continue(_) => Ok(vec!["continue;".to_string()]),
            Stmt::Import(import) if import.module.is_some() => {
                Err(TranslateError::unsupported("from ... import", span))
            }
            Stmt::Import(_) => Err(TranslateError::unsupported("import", span)),
            Stmt::Global(_) => Err(TranslateError::unsupported("global", span)),
            Stmt::Nonlocal(_) => Err(TranslateError::unsupported("nonlocal", span)),
            Stmt::Delete(_) => Err(TranslateError::unsupported("del", span)),
            Stmt::With(_) => Err(TranslateError::unsupported("with", span)),
        }
    }

    /// Translate a top-level statement together with its declaration kind.
    pub fn translate_tagged<'ast>(&mut self, stmt: &Stmt<'ast>) -> Result<(DeclKind, Vec<String>)> {
        let kind = match stmt {
            Stmt::ClassDef(_) => DeclKind::ClassDecl,
            Stmt::FunctionDef(_) => DeclKind::FunctionDecl,
            _ => DeclKind::Other,
        };
        Ok((kind, self.translate(stmt)?))
    }

    fn translate_expr_stmt<'ast>(&mut self, expr_stmt: &ExprStmt<'ast>) -> Result<Vec<String>> {
        let code = self.expr().code(expr_stmt.expr)?;
        // A leading brace would open a block instead of an object.
        if code.starts_with('{') {
            Ok(vec![format!("({code});")])
        } else {
            Ok(vec![format!("{code};")])
        }
    }

    fn expr(&mut self) -> ExprTranslator<'_> {
        ExprTranslator::new(self.ctx)
    }
}
