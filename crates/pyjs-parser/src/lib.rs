//! Lexer and parser for the Python subset accepted by pyjs.
//!
//! This crate provides:
//! - Indentation-aware tokenization (`Newline`, `Indent` and `Dedent` tokens)
//! - Arena-allocated syntax tree definitions
//! - A recursive-descent parser with precedence climbing for expressions
//!
//! # Example
//!
//! ```
//! use pyjs_parser::Parser;
//! use bumpalo::Bump;
//!
//! let arena = Bump::new();
//! let source = "def square(n):\n    return n * n\n\nprint(square(4))\n";
//!
//! match Parser::parse(source, &arena) {
//!     Ok(module) => println!("parsed {} statements", module.body().len()),
//!     Err(errors) => eprintln!("syntax errors: {}", errors),
//! }
//! ```

pub mod ast;
pub mod lexer;

pub use ast::{Module, Parser};
pub use lexer::{Lexer, Token, TokenKind};
pub use pyjs_core::Span;
