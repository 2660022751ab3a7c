//! Statement nodes.
//!
//! Compound statements own their suites as [`Block`]s. Optional clauses such
//! as `else` and `finally` are `Option<Block>` so translators can tell an
//! absent clause from an empty one structurally.

use crate::ast::expr::{Argument, Expr, Param};
use crate::ast::{BinaryOp, Ident};
use pyjs_core::Span;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stmt<'ast> {
    /// An expression evaluated for its effect.
    Expr(ExprStmt<'ast>),
    /// `a = b = value`
    Assign(&'ast AssignStmt<'ast>),
    /// `target op= value`
    AugAssign(&'ast AugAssignStmt<'ast>),
    /// `target: annotation [= value]`
    AnnAssign(&'ast AnnAssignStmt<'ast>),
    Return(ReturnStmt<'ast>),
    If(&'ast IfStmt<'ast>),
    While(&'ast WhileStmt<'ast>),
    For(&'ast ForStmt<'ast>),
    Try(&'ast TryStmt<'ast>),
    FunctionDef(&'ast FunctionDef<'ast>),
    ClassDef(&'ast ClassDef<'ast>),
    Raise(RaiseStmt<'ast>),
    Assert(AssertStmt<'ast>),
    Import(&'ast ImportStmt<'ast>),
    Global(NamesStmt<'ast>),
    Nonlocal(NamesStmt<'ast>),
    Delete(DeleteStmt<'ast>),
    With(&'ast WithStmt<'ast>),
    Pass(Span),
    Break(Span),
    Continue(Span),
}

impl<'ast> Stmt<'ast> {
    pub fn span(&self) -> Span {
        match self {
            Self::Expr(s) => s.span,
            Self::Assign(s) => s.span,
            Self::AugAssign(s) => s.span,
            Self::AnnAssign(s) => s.span,
            Self::Return(s) => s.span,
            Self::If(s) => s.span,
            Self::While(s) => s.span,
            Self::For(s) => s.span,
            Self::Try(s) => s.span,
            Self::FunctionDef(s) => s.span,
            Self::ClassDef(s) => s.span,
            Self::Raise(s) => s.span,
            Self::Assert(s) => s.span,
            Self::Import(s) => s.span,
            Self::Global(s) => s.span,
            Self::Nonlocal(s) => s.span,
            Self::Delete(s) => s.span,
            Self::With(s) => s.span,
            Self::Pass(span) | Self::Break(span) | Self::Continue(span) => *span,
        }
    }
}

/// An indented suite (or the simple statements following a colon).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block<'ast> {
    pub stmts: &'ast [Stmt<'ast>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExprStmt<'ast> {
    pub expr: &'ast Expr<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssignStmt<'ast> {
    /// One entry per `=`; `a = b = 1` has two targets.
    pub targets: &'ast [Expr<'ast>],
    pub value: &'ast Expr<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AugAssignStmt<'ast> {
    pub target: &'ast Expr<'ast>,
    pub op: BinaryOp,
    pub value: &'ast Expr<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnAssignStmt<'ast> {
    pub target: &'ast Expr<'ast>,
    pub annotation: &'ast Expr<'ast>,
    pub value: Option<&'ast Expr<'ast>>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnStmt<'ast> {
    pub value: Option<&'ast Expr<'ast>>,
    pub span: Span,
}

/// `if` / `elif`* / `else`?
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IfStmt<'ast> {
    /// The `if` branch followed by each `elif`, in source order.
    pub branches: &'ast [IfBranch<'ast>],
    pub else_body: Option<Block<'ast>>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IfBranch<'ast> {
    pub test: &'ast Expr<'ast>,
    pub body: Block<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhileStmt<'ast> {
    pub test: &'ast Expr<'ast>,
    pub body: Block<'ast>,
    pub else_body: Option<Block<'ast>>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForStmt<'ast> {
    pub target: &'ast Expr<'ast>,
    pub iter: &'ast Expr<'ast>,
    pub body: Block<'ast>,
    pub else_body: Option<Block<'ast>>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TryStmt<'ast> {
    pub body: Block<'ast>,
    pub handlers: &'ast [ExceptHandler<'ast>],
    pub else_body: Option<Block<'ast>>,
    pub finally_body: Option<Block<'ast>>,
    pub span: Span,
}

/// `except [type [as alias]]: body`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExceptHandler<'ast> {
    pub exc_type: Option<&'ast Expr<'ast>>,
    pub alias: Option<Ident<'ast>>,
    pub body: Block<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FunctionDef<'ast> {
    pub name: Ident<'ast>,
    pub params: &'ast [Param<'ast>],
    pub returns: Option<&'ast Expr<'ast>>,
    pub body: Block<'ast>,
    pub decorators: &'ast [Expr<'ast>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassDef<'ast> {
    pub name: Ident<'ast>,
    /// Base classes and class keywords such as `metaclass=`.
    pub bases: &'ast [Argument<'ast>],
    pub body: Block<'ast>,
    pub decorators: &'ast [Expr<'ast>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaiseStmt<'ast> {
    pub exc: Option<&'ast Expr<'ast>>,
    pub cause: Option<&'ast Expr<'ast>>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssertStmt<'ast> {
    pub test: &'ast Expr<'ast>,
    pub msg: Option<&'ast Expr<'ast>>,
    pub span: Span,
}

/// Both `import a.b as c` and `from .m import x as y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImportStmt<'ast> {
    /// The `from` module, absent for plain `import`.
    pub module: Option<&'ast str>,
    /// Leading dots of a relative `from` import.
    pub level: u32,
    pub names: &'ast [ImportAlias<'ast>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImportAlias<'ast> {
    /// Dotted name, or `*`.
    pub name: &'ast str,
    pub alias: Option<Ident<'ast>>,
    pub span: Span,
}

impl<'ast> ImportAlias<'ast> {
    /// The name this import binds in the importing scope.
    pub fn bound_name(&self) -> &'ast str {
        match self.alias {
            Some(alias) => alias.name,
            None => self.name.split('.').next().unwrap_or(self.name),
        }
    }
}

/// `global a, b` / `nonlocal a, b`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NamesStmt<'ast> {
    pub names: &'ast [Ident<'ast>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeleteStmt<'ast> {
    pub targets: &'ast [Expr<'ast>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WithStmt<'ast> {
    pub items: &'ast [WithItem<'ast>],
    pub body: Block<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WithItem<'ast> {
    pub context: Expr<'ast>,
    pub target: Option<Expr<'ast>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_alias_bound_name() {
        let plain = ImportAlias {
            name: "os.path",
            alias: None,
            span: Span::default(),
        };
        assert_eq!(plain.bound_name(), "os");

        let aliased = ImportAlias {
            name: "numpy",
            alias: Some(Ident::new("np", Span::default())),
            span: Span::default(),
        };
        assert_eq!(aliased.bound_name(), "np");
    }

    #[test]
    fn keyword_statement_spans() {
        let span = Span::new(4, 9, 5);
        assert_eq!(Stmt::Break(span).span(), span);
        assert_eq!(Stmt::Pass(span).span(), span);
    }
}
