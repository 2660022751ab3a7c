//! Syntax tree for the supported Python subset.
//!
//! This module provides:
//! - node definitions for statements and expressions
//! - the [`Parser`] that builds them from source text
//!
//! All nodes are allocated in a caller-supplied [`bumpalo::Bump`] and borrow
//! from it.
//!
//! # Example
//!
//! ```
//! use pyjs_parser::ast::{Parser, Stmt};
//! use bumpalo::Bump;
//!
//! let arena = Bump::new();
//! let module = Parser::parse("x = 5\n", &arena).unwrap();
//! assert!(matches!(module.body()[0], Stmt::Assign(_)));
//! ```

pub mod expr;
pub mod ops;
pub mod stmt;

mod expr_parser;
mod literal;
mod parser;
mod stmt_parser;

pub use pyjs_core::{ParseError, ParseErrorKind, ParseErrors};

pub use expr::*;
pub use ops::*;
pub use parser::{MAX_NESTING_DEPTH, Parser};
pub use stmt::*;

use pyjs_core::Span;

/// A parsed source file.
#[derive(Debug, Clone, Copy)]
pub struct Module<'ast> {
    body: &'ast [Stmt<'ast>],
    span: Span,
}

impl<'ast> Module<'ast> {
    pub(crate) fn new(body: &'ast [Stmt<'ast>], span: Span) -> Self {
        Self { body, span }
    }

    /// Top-level statements in source order.
    pub fn body(&self) -> &'ast [Stmt<'ast>] {
        self.body
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

/// An identifier with its location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ident<'ast> {
    pub name: &'ast str,
    pub span: Span,
}

impl<'ast> Ident<'ast> {
    pub fn new(name: &'ast str, span: Span) -> Self {
        Self { name, span }
    }
}
