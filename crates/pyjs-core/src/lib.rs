//! Shared types for the pyjs translator.
//!
//! This crate holds the pieces every phase agrees on:
//!
//! - [`Span`] for source locations
//! - the error taxonomy for parsing ([`ParseError`], [`ParseErrors`]) and
//!   translation ([`TranslateError`])

pub mod error;
pub mod span;

pub use error::{LexError, ParseError, ParseErrorKind, ParseErrors, TranslateError};
pub use span::Span;
