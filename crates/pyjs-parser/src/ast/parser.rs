//! Parser state and token-level helpers.

use bumpalo::Bump;
use bumpalo::collections::Vec as BVec;
use pyjs_core::Span;

use crate::ast::expr::Expr;
use crate::ast::stmt::Stmt;
use crate::ast::{Module, ParseError, ParseErrorKind, ParseErrors};
use crate::lexer::{Lexer, Token, TokenKind};

/// How deeply expressions and blocks may nest.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Recursive-descent parser over a fully lexed token buffer.
///
/// Parsing stops at the first syntax error, which matches how Python itself
/// reports them. Nesting deeper than [`MAX_NESTING_DEPTH`] is a syntax error.
pub struct Parser<'ast> {
    pub(super) tokens: Vec<Token<'ast>>,
    pub(super) position: usize,
    pub(super) arena: &'ast Bump,
    depth: usize,
}

impl<'ast> Parser<'ast> {
    /// Parse a complete source file.
    pub fn parse(source: &str, arena: &'ast Bump) -> Result<Module<'ast>, ParseErrors> {
        #[cfg(feature = "profiling")]
        profiling::scope!("Parser::parse");

        let mut parser = Self::new(source, arena)?;
        parser.parse_module().map_err(ParseErrors::from)
    }

    /// Parse a single expression, which must make up the entire input.
    pub fn expression(source: &str, arena: &'ast Bump) -> Result<&'ast Expr<'ast>, ParseErrors> {
        let mut parser = Self::new(source, arena)?;
        let expr = parser.parse_expr_list()?;
        parser.eat(TokenKind::Newline);
        if !parser.is_eof() {
            let token = *parser.peek();
            return Err(ParseError::unexpected_token(token.span, token.kind.description()).into());
        }
        Ok(expr)
    }

    /// Parse exactly one statement, which may be compound.
    pub fn statement(source: &str, arena: &'ast Bump) -> Result<&'ast Stmt<'ast>, ParseErrors> {
        let mut parser = Self::new(source, arena)?;
        let module = parser.parse_module()?;
        match module.body() {
            [stmt] => Ok(stmt),
            [] => Err(ParseError::new(
                ParseErrorKind::UnexpectedEof,
                module.span(),
                "expected a statement",
            )
            .into()),
            [_, extra, ..] => Err(ParseError::unexpected_token(extra.span(), "statement").into()),
        }
    }

    fn new(source: &str, arena: &'ast Bump) -> Result<Self, ParseErrors> {
        let (tokens, lex_errors) = Lexer::new(source, arena).tokenize();
        if !lex_errors.is_empty() {
            let mut errors = ParseErrors::new();
            for error in lex_errors {
                errors.push(error.into());
            }
            return Err(errors);
        }
        Ok(Self {
            tokens,
            position: 0,
            arena,
            depth: 0,
        })
    }

    fn parse_module(&mut self) -> Result<Module<'ast>, ParseError> {
        let start = self.peek().span;
        let mut body = BVec::new_in(self.arena);

        while !self.is_eof() {
            if self.eat(TokenKind::Newline).is_some() {
                continue;
            }
            if self.check(TokenKind::Indent) {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedIndent,
                    self.peek().span,
                    "unexpected indent",
                ));
            }
            self.parse_statement(&mut body)?;
        }

        let span = start.to(self.peek().span);
        Ok(Module::new(body.into_bump_slice(), span))
    }

    // =========================================
    // Token helpers
    // =========================================

    #[inline]
    pub(super) fn peek(&self) -> &Token<'ast> {
        self.peek_nth(0)
    }

    /// Look `n` tokens ahead; past the end this keeps returning `Eof`.
    pub(super) fn peek_nth(&self, n: usize) -> &Token<'ast> {
        let index = (self.position + n).min(self.tokens.len().saturating_sub(1));
        &self.tokens[index]
    }

    pub(super) fn advance(&mut self) -> Token<'ast> {
        let token = *self.peek();
        if token.kind != TokenKind::Eof {
            self.position += 1;
        }
        token
    }

    #[inline]
    pub(super) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    #[inline]
    pub(super) fn is_eof(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    pub(super) fn eat(&mut self, kind: TokenKind) -> Option<Token<'ast>> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    pub(super) fn expect(&mut self, kind: TokenKind) -> Result<Token<'ast>, ParseError> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        let found = *self.peek();
        let kind_of_error = if found.kind == TokenKind::Eof {
            ParseErrorKind::UnexpectedEof
        } else {
            ParseErrorKind::ExpectedToken
        };
        Err(ParseError::new(
            kind_of_error,
            found.span,
            format!("expected {}, found {}", kind.description(), found.kind.description()),
        ))
    }

    /// Run `parse` one nesting level deeper.
    pub(super) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::new(
                ParseErrorKind::InvalidSyntax,
                self.peek().span,
                "too many nested expressions or blocks",
            ));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    pub(super) fn alloc_expr(&self, expr: Expr<'ast>) -> &'ast Expr<'ast> {
        self.arena.alloc(expr)
    }

    /// Span of the most recently consumed token.
    pub(super) fn previous_span(&self) -> Span {
        self.position
            .checked_sub(1)
            .map(|i| self.tokens[i].span)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Stmt;

    #[test]
    fn empty_module() {
        let arena = Bump::new();
        let module = Parser::parse("", &arena).unwrap();
        assert!(module.body().is_empty());

        let module = Parser::parse("\n# comment only\n\n", &arena).unwrap();
        assert!(module.body().is_empty());
    }

    #[test]
    fn single_statement_entry_point() {
        let arena = Bump::new();
        let stmt = Parser::statement("while x:\n    x = x - 1\n", &arena).unwrap();
        assert!(matches!(stmt, Stmt::While(_)));

        assert!(Parser::statement("", &arena).is_err());
        assert!(Parser::statement("a = 1\nb = 2\n", &arena).is_err());
    }

    #[test]
    fn deep_nesting_is_a_syntax_error() {
        let arena = Bump::new();
        let depth = 10_000;
        let source = format!("x = {}1{}\n", "(".repeat(depth), ")".repeat(depth));
        let errors = Parser::parse(&source, &arena).unwrap_err();
        assert_eq!(errors.first().map(|e| e.kind), Some(ParseErrorKind::InvalidSyntax));

        let unary = format!("x = {}1\n", "-".repeat(depth));
        assert!(Parser::parse(&unary, &arena).is_err());
        let negations = format!("x = {}y\n", "not ".repeat(depth));
        assert!(Parser::parse(&negations, &arena).is_err());

        let mut blocks = String::new();
        for level in 0..200 {
            blocks.push_str(&format!("{}if x:\n", " ".repeat(level)));
        }
        blocks.push_str(&format!("{}pass\n", " ".repeat(200)));
        assert!(Parser::parse(&blocks, &arena).is_err());
    }

    #[test]
    fn moderate_nesting_parses() {
        let arena = Bump::new();
        let depth = 30;
        let source = format!("x = {}1{}\n", "(".repeat(depth), ")".repeat(depth));
        assert!(Parser::parse(&source, &arena).is_ok());
    }

    #[test]
    fn lexer_errors_are_reported() {
        let arena = Bump::new();
        let errors = Parser::parse("x = 'open\n", &arena).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().map(|e| e.kind), Some(ParseErrorKind::InvalidSyntax));
    }

    #[test]
    fn unexpected_indent_at_top_level() {
        let arena = Bump::new();
        let errors = Parser::parse("x = 1\n    y = 2\n", &arena).unwrap_err();
        assert_eq!(
            errors.first().map(|e| e.kind),
            Some(ParseErrorKind::UnexpectedIndent)
        );
    }

    #[test]
    fn expression_entry_point() {
        let arena = Bump::new();
        let expr = Parser::expression("a + b", &arena).unwrap();
        assert!(matches!(expr, Expr::Binary(_)));

        assert!(Parser::expression("a b", &arena).is_err());
    }

    #[test]
    fn statements_are_kept_in_order() {
        let arena = Bump::new();
        let module = Parser::parse("a = 1\nb = 2; c = 3\n", &arena).unwrap();
        assert_eq!(module.body().len(), 3);
        assert!(module.body().iter().all(|s| matches!(s, Stmt::Assign(_))));
    }

    #[test]
    fn peek_past_end_stays_on_eof() {
        let arena = Bump::new();
        let parser = Parser::new("x", &arena).unwrap();
        assert_eq!(parser.peek_nth(50).kind, TokenKind::Eof);
    }
}
