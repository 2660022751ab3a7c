//! Expression parsing.
//!
//! Boolean, `not` and comparison levels are plain recursive descent; the
//! bitwise and arithmetic levels below them use precedence climbing driven
//! by [`BinaryOp::binding_power`].

use bumpalo::collections::Vec as BVec;
use pyjs_core::Span;

use super::literal::{StringFlavor, decode_string};
use super::parser::Parser;
use crate::ast::expr::*;
use crate::ast::{BinaryOp, BoolOp, CompareOp, Ident, ParseError, ParseErrorKind, UnaryOp};
use crate::lexer::TokenKind;

impl<'ast> Parser<'ast> {
    /// Parse a full expression (`test` in the Python grammar).
    pub(super) fn parse_expr(&mut self) -> Result<&'ast Expr<'ast>, ParseError> {
        self.nested(Self::parse_test)
    }

    fn parse_test(&mut self) -> Result<&'ast Expr<'ast>, ParseError> {
        if self.check(TokenKind::Lambda) {
            return self.parse_lambda();
        }

        let body = self.parse_or()?;
        if self.eat(TokenKind::If).is_none() {
            return Ok(body);
        }

        let test = self.parse_or()?;
        self.expect(TokenKind::Else)?;
        let orelse = self.parse_expr()?;
        let span = body.span().to(orelse.span());
        Ok(self.alloc_expr(Expr::IfElse(self.arena.alloc(IfElseExpr {
            test,
            body,
            orelse,
            span,
        }))))
    }

    /// Comma-separated expressions; more than one (or a trailing comma)
    /// forms a tuple.
    pub(super) fn parse_expr_list(&mut self) -> Result<&'ast Expr<'ast>, ParseError> {
        let first = self.parse_star_or_expr()?;
        if !self.check(TokenKind::Comma) {
            return Ok(first);
        }

        let mut elements = BVec::new_in(self.arena);
        elements.push(*first);
        while self.eat(TokenKind::Comma).is_some() {
            if !self.starts_expression() {
                break;
            }
            elements.push(*self.parse_star_or_expr()?);
        }

        let span = first.span().to(self.previous_span());
        Ok(self.alloc_expr(Expr::Tuple(self.arena.alloc(SequenceExpr {
            elements: elements.into_bump_slice(),
            span,
        }))))
    }

    /// Assignment-style targets up to `in`, as used by `for` heads.
    pub(super) fn parse_target_list(&mut self) -> Result<&'ast Expr<'ast>, ParseError> {
        let first = self.parse_star_target()?;
        if !self.check(TokenKind::Comma) {
            return Ok(first);
        }

        let mut elements = BVec::new_in(self.arena);
        elements.push(*first);
        while self.eat(TokenKind::Comma).is_some() {
            if self.check(TokenKind::In) {
                break;
            }
            elements.push(*self.parse_star_target()?);
        }

        let span = first.span().to(self.previous_span());
        Ok(self.alloc_expr(Expr::Tuple(self.arena.alloc(SequenceExpr {
            elements: elements.into_bump_slice(),
            span,
        }))))
    }

    pub(super) fn parse_star_target(&mut self) -> Result<&'ast Expr<'ast>, ParseError> {
        let target = if let Some(star) = self.eat(TokenKind::Star) {
            let value = self.parse_bitwise(0)?;
            let span = star.span.to(value.span());
            self.alloc_expr(Expr::Starred(self.arena.alloc(StarredExpr { value, span })))
        } else {
            self.parse_bitwise(0)?
        };

        if !target.is_assignable() {
            return Err(ParseError::new(
                ParseErrorKind::InvalidTarget,
                target.span(),
                "cannot assign to expression",
            ));
        }
        Ok(target)
    }

    fn parse_star_or_expr(&mut self) -> Result<&'ast Expr<'ast>, ParseError> {
        match self.eat(TokenKind::Star) {
            Some(star) => {
                let value = self.parse_bitwise(0)?;
                let span = star.span.to(value.span());
                Ok(self.alloc_expr(Expr::Starred(self.arena.alloc(StarredExpr { value, span }))))
            }
            None => self.parse_expr(),
        }
    }

    /// Whether the current token can begin an expression.
    pub(super) fn starts_expression(&self) -> bool {
        use TokenKind::*;
        matches!(
            self.peek().kind,
            Identifier
                | IntLiteral
                | FloatLiteral
                | StringLiteral
                | True
                | False
                | None
                | Ellipsis
                | LeftParen
                | LeftBracket
                | LeftBrace
                | Minus
                | Plus
                | Tilde
                | Not
                | Lambda
                | Star
                | Await
        )
    }

    // =========================================
    // Boolean and comparison levels
    // =========================================

    fn parse_or(&mut self) -> Result<&'ast Expr<'ast>, ParseError> {
        let first = self.parse_and()?;
        if !self.check(TokenKind::Or) {
            return Ok(first);
        }

        let mut values = BVec::new_in(self.arena);
        values.push(*first);
        while self.eat(TokenKind::Or).is_some() {
            values.push(*self.parse_and()?);
        }
        Ok(self.bool_op(BoolOp::Or, values))
    }

    fn parse_and(&mut self) -> Result<&'ast Expr<'ast>, ParseError> {
        let first = self.parse_not()?;
        if !self.check(TokenKind::And) {
            return Ok(first);
        }

        let mut values = BVec::new_in(self.arena);
        values.push(*first);
        while self.eat(TokenKind::And).is_some() {
            values.push(*self.parse_not()?);
        }
        Ok(self.bool_op(BoolOp::And, values))
    }

    fn bool_op(&self, op: BoolOp, values: BVec<'ast, Expr<'ast>>) -> &'ast Expr<'ast> {
        let values = values.into_bump_slice();
        let span = match (values.first(), values.last()) {
            (Some(first), Some(last)) => first.span().to(last.span()),
            _ => self.previous_span(),
        };
        self.alloc_expr(Expr::BoolOp(self.arena.alloc(BoolOpExpr { op, values, span })))
    }

    fn parse_not(&mut self) -> Result<&'ast Expr<'ast>, ParseError> {
        let Some(not) = self.eat(TokenKind::Not) else {
            return self.parse_comparison();
        };
        let operand = self.nested(Self::parse_not)?;
        let span = not.span.to(operand.span());
        Ok(self.alloc_expr(Expr::Unary(self.arena.alloc(UnaryExpr {
            op: UnaryOp::Not,
            operand,
            span,
        }))))
    }

    fn parse_comparison(&mut self) -> Result<&'ast Expr<'ast>, ParseError> {
        let left = self.parse_bitwise(0)?;
        let mut ops = BVec::new_in(self.arena);
        let mut comparators = BVec::new_in(self.arena);

        loop {
            let op = match self.peek().kind {
                TokenKind::Not if self.peek_nth(1).kind == TokenKind::In => {
                    self.advance();
                    self.advance();
                    CompareOp::NotIn
                }
                TokenKind::Is => {
                    self.advance();
                    if self.eat(TokenKind::Not).is_some() {
                        CompareOp::IsNot
                    } else {
                        CompareOp::Is
                    }
                }
                kind => match CompareOp::from_token(kind) {
                    Some(op) => {
                        self.advance();
                        op
                    }
                    None => break,
                },
            };
            ops.push(op);
            comparators.push(*self.parse_bitwise(0)?);
        }

        if ops.is_empty() {
            return Ok(left);
        }

        let comparators = comparators.into_bump_slice();
        let span = comparators
            .last()
            .map(|last| left.span().to(last.span()))
            .unwrap_or_else(|| left.span());
        Ok(self.alloc_expr(Expr::Compare(self.arena.alloc(CompareExpr {
            left,
            ops: ops.into_bump_slice(),
            comparators,
            span,
        }))))
    }

    // =========================================
    // Arithmetic levels
    // =========================================

    /// Precedence climbing over bitwise, shift, additive and
    /// multiplicative operators.
    pub(super) fn parse_bitwise(&mut self, min_bp: u8) -> Result<&'ast Expr<'ast>, ParseError> {
        let mut lhs = self.parse_unary()?;

        while let Some(op) = BinaryOp::from_token(self.peek().kind) {
            let (l_bp, r_bp) = op.binding_power();
            if l_bp < min_bp {
                break;
            }
            self.advance();
            let rhs = self.parse_bitwise(r_bp)?;
            let span = lhs.span().to(rhs.span());
            lhs = self.alloc_expr(Expr::Binary(self.arena.alloc(BinaryExpr {
                left: lhs,
                op,
                right: rhs,
                span,
            })));
        }

        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<&'ast Expr<'ast>, ParseError> {
        let Some(op) = UnaryOp::from_token(self.peek().kind) else {
            return self.parse_power();
        };
        let token = self.advance();
        let operand = self.nested(Self::parse_unary)?;
        let span = token.span.to(operand.span());
        Ok(self.alloc_expr(Expr::Unary(self.arena.alloc(UnaryExpr { op, operand, span }))))
    }

    /// `primary ['**' unary]`; right-associative through `parse_unary`.
    fn parse_power(&mut self) -> Result<&'ast Expr<'ast>, ParseError> {
        let base = self.parse_primary()?;
        if self.eat(TokenKind::StarStar).is_none() {
            return Ok(base);
        }
        let exponent = self.parse_unary()?;
        let span = base.span().to(exponent.span());
        Ok(self.alloc_expr(Expr::Binary(self.arena.alloc(BinaryExpr {
            left: base,
            op: BinaryOp::Pow,
            right: exponent,
            span,
        }))))
    }

    // =========================================
    // Primary expressions
    // =========================================

    fn parse_primary(&mut self) -> Result<&'ast Expr<'ast>, ParseError> {
        let mut expr = self.parse_atom()?;

        loop {
            expr = match self.peek().kind {
                TokenKind::LeftParen => self.parse_call(expr)?,
                TokenKind::LeftBracket => self.parse_subscript(expr)?,
                TokenKind::Dot => {
                    self.advance();
                    let attr = self.expect_ident()?;
                    let span = expr.span().to(attr.span);
                    self.alloc_expr(Expr::Attribute(self.arena.alloc(AttributeExpr {
                        value: expr,
                        attr,
                        span,
                    })))
                }
                _ => break,
            };
        }

        Ok(expr)
    }

    fn parse_atom(&mut self) -> Result<&'ast Expr<'ast>, ParseError> {
        let token = *self.peek();

        let literal = |kind| Expr::Literal(LiteralExpr {
            kind,
            span: token.span,
        });

        match token.kind {
            TokenKind::Identifier => {
                self.advance();
                Ok(self.alloc_expr(Expr::Name(Ident::new(token.lexeme, token.span))))
            }
            TokenKind::IntLiteral => {
                self.advance();
                Ok(self.alloc_expr(literal(LiteralKind::Int(token.lexeme))))
            }
            TokenKind::FloatLiteral => {
                self.advance();
                Ok(self.alloc_expr(literal(LiteralKind::Float(token.lexeme))))
            }
            TokenKind::True => {
                self.advance();
                Ok(self.alloc_expr(literal(LiteralKind::Bool(true))))
            }
            TokenKind::False => {
                self.advance();
                Ok(self.alloc_expr(literal(LiteralKind::Bool(false))))
            }
            TokenKind::None => {
                self.advance();
                Ok(self.alloc_expr(literal(LiteralKind::None)))
            }
            TokenKind::Ellipsis => {
                self.advance();
                Ok(self.alloc_expr(literal(LiteralKind::Ellipsis)))
            }
            TokenKind::StringLiteral => self.parse_strings(),
            TokenKind::LeftParen => self.parse_paren(),
            TokenKind::LeftBracket => self.parse_list(),
            TokenKind::LeftBrace => self.parse_brace(),
            TokenKind::Await | TokenKind::Async => Err(ParseError::new(
                ParseErrorKind::NotImplemented,
                token.span,
                "async code is not supported",
            )),
            TokenKind::Eof => Err(ParseError::new(
                ParseErrorKind::UnexpectedEof,
                token.span,
                "expected expression, found end of file",
            )),
            _ => Err(ParseError::expected_expression(
                token.span,
                token.kind.description(),
            )),
        }
    }

    /// One or more adjacent string tokens, concatenated.
    fn parse_strings(&mut self) -> Result<&'ast Expr<'ast>, ParseError> {
        let first = *self.peek();
        let mut span = first.span;
        let mut value = String::new();
        let mut flavor = None;

        while self.check(TokenKind::StringLiteral) {
            let token = self.advance();
            let decoded = decode_string(token.lexeme)
                .map_err(|(kind, message)| ParseError::new(kind, token.span, message))?;

            let is_bytes = decoded.flavor == StringFlavor::Bytes;
            if flavor.is_some_and(|f: StringFlavor| (f == StringFlavor::Bytes) != is_bytes) {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidLiteral,
                    token.span,
                    "cannot mix bytes and nonbytes literals",
                ));
            }
            flavor = match (flavor, decoded.flavor) {
                (Some(StringFlavor::Format), _) | (_, StringFlavor::Format) => {
                    Some(StringFlavor::Format)
                }
                (_, f) => Some(f),
            };

            value.push_str(&decoded.value);
            span = span.to(token.span);
        }

        let text = self.arena.alloc_str(&value);
        let kind = match flavor {
            Some(StringFlavor::Bytes) => LiteralKind::Bytes(text),
            Some(StringFlavor::Format) => LiteralKind::FString(text),
            _ => LiteralKind::Str(text),
        };
        Ok(self.alloc_expr(Expr::Literal(LiteralExpr { kind, span })))
    }

    fn parse_paren(&mut self) -> Result<&'ast Expr<'ast>, ParseError> {
        let open = self.expect(TokenKind::LeftParen)?;

        if let Some(close) = self.eat(TokenKind::RightParen) {
            return Ok(self.alloc_expr(Expr::Tuple(self.arena.alloc(SequenceExpr {
                elements: &[],
                span: open.span.to(close.span),
            }))));
        }

        let first = if self.check(TokenKind::Yield) {
            self.parse_yield()?
        } else {
            self.parse_star_or_expr()?
        };

        if self.check(TokenKind::For) {
            return Err(ParseError::new(
                ParseErrorKind::NotImplemented,
                self.peek().span,
                "generator expressions are not supported",
            ));
        }

        if !self.check(TokenKind::Comma) {
            let close = self.expect(TokenKind::RightParen)?;
            return Ok(self.alloc_expr(Expr::Paren(self.arena.alloc(ParenExpr {
                expr: first,
                span: open.span.to(close.span),
            }))));
        }

        let mut elements = BVec::new_in(self.arena);
        elements.push(*first);
        while self.eat(TokenKind::Comma).is_some() {
            if self.check(TokenKind::RightParen) {
                break;
            }
            elements.push(*self.parse_star_or_expr()?);
        }
        let close = self.expect(TokenKind::RightParen)?;
        Ok(self.alloc_expr(Expr::Tuple(self.arena.alloc(SequenceExpr {
            elements: elements.into_bump_slice(),
            span: open.span.to(close.span),
        }))))
    }

    fn parse_list(&mut self) -> Result<&'ast Expr<'ast>, ParseError> {
        let open = self.expect(TokenKind::LeftBracket)?;
        let mut elements = BVec::new_in(self.arena);

        if !self.check(TokenKind::RightBracket) {
            let first = self.parse_star_or_expr()?;

            if self.check(TokenKind::For) {
                let generators = self.parse_comprehension_clauses()?;
                let close = self.expect(TokenKind::RightBracket)?;
                return Ok(self.alloc_expr(Expr::ListComp(self.arena.alloc(ListCompExpr {
                    element: first,
                    generators,
                    span: open.span.to(close.span),
                }))));
            }

            elements.push(*first);
            while self.eat(TokenKind::Comma).is_some() {
                if self.check(TokenKind::RightBracket) {
                    break;
                }
                elements.push(*self.parse_star_or_expr()?);
            }
        }

        let close = self.expect(TokenKind::RightBracket)?;
        Ok(self.alloc_expr(Expr::List(self.arena.alloc(SequenceExpr {
            elements: elements.into_bump_slice(),
            span: open.span.to(close.span),
        }))))
    }

    /// `{}` dict or `{a, b}` set display.
    fn parse_brace(&mut self) -> Result<&'ast Expr<'ast>, ParseError> {
        let open = self.expect(TokenKind::LeftBrace)?;

        if let Some(close) = self.eat(TokenKind::RightBrace) {
            return Ok(self.alloc_expr(Expr::Dict(self.arena.alloc(DictExpr {
                entries: &[],
                span: open.span.to(close.span),
            }))));
        }

        if self.check(TokenKind::StarStar) {
            return Err(ParseError::new(
                ParseErrorKind::NotImplemented,
                self.peek().span,
                "dictionary unpacking is not supported",
            ));
        }

        let first = self.parse_star_or_expr()?;

        if self.eat(TokenKind::Colon).is_none() {
            if self.check(TokenKind::For) {
                return Err(ParseError::new(
                    ParseErrorKind::NotImplemented,
                    self.peek().span,
                    "set comprehensions are not supported",
                ));
            }
            let mut elements = BVec::new_in(self.arena);
            elements.push(*first);
            while self.eat(TokenKind::Comma).is_some() {
                if self.check(TokenKind::RightBrace) {
                    break;
                }
                elements.push(*self.parse_star_or_expr()?);
            }
            let close = self.expect(TokenKind::RightBrace)?;
            return Ok(self.alloc_expr(Expr::Set(self.arena.alloc(SequenceExpr {
                elements: elements.into_bump_slice(),
                span: open.span.to(close.span),
            }))));
        }

        let value = self.parse_expr()?;
        if self.check(TokenKind::For) {
            return Err(ParseError::new(
                ParseErrorKind::NotImplemented,
                self.peek().span,
                "dict comprehensions are not supported",
            ));
        }

        let mut entries = BVec::new_in(self.arena);
        entries.push(DictEntry {
            key: *first,
            value: *value,
        });
        while self.eat(TokenKind::Comma).is_some() {
            if self.check(TokenKind::RightBrace) {
                break;
            }
            let key = self.parse_expr()?;
            self.expect(TokenKind::Colon)?;
            let value = self.parse_expr()?;
            entries.push(DictEntry {
                key: *key,
                value: *value,
            });
        }

        let close = self.expect(TokenKind::RightBrace)?;
        Ok(self.alloc_expr(Expr::Dict(self.arena.alloc(DictExpr {
            entries: entries.into_bump_slice(),
            span: open.span.to(close.span),
        }))))
    }

    /// `for target in iter [if cond]*` clauses of a comprehension.
    fn parse_comprehension_clauses(&mut self) -> Result<&'ast [Comprehension<'ast>], ParseError> {
        let mut generators = BVec::new_in(self.arena);

        while let Some(for_token) = self.eat(TokenKind::For) {
            let target = self.parse_target_list()?;
            self.expect(TokenKind::In)?;
            let iter = self.parse_or()?;

            let mut conditions = BVec::new_in(self.arena);
            while self.eat(TokenKind::If).is_some() {
                conditions.push(*self.parse_or()?);
            }

            generators.push(Comprehension {
                target,
                iter,
                conditions: conditions.into_bump_slice(),
                span: for_token.span.to(self.previous_span()),
            });
        }

        Ok(generators.into_bump_slice())
    }

    // =========================================
    // Trailers
    // =========================================

    fn parse_call(&mut self, callee: &'ast Expr<'ast>) -> Result<&'ast Expr<'ast>, ParseError> {
        let (args, close) = self.parse_arguments()?;
        Ok(self.alloc_expr(Expr::Call(self.arena.alloc(CallExpr {
            callee,
            args,
            span: callee.span().to(close),
        }))))
    }

    /// A parenthesized argument list. Also used for class bases.
    /// Returns the arguments and the span of the closing parenthesis.
    pub(super) fn parse_arguments(&mut self) -> Result<(&'ast [Argument<'ast>], Span), ParseError> {
        self.expect(TokenKind::LeftParen)?;
        let mut args = BVec::new_in(self.arena);
        let mut seen_keyword = false;

        while !self.check(TokenKind::RightParen) {
            let start = self.peek().span;

            let arg = if self.eat(TokenKind::StarStar).is_some() {
                seen_keyword = true;
                let value = self.parse_expr()?;
                Argument {
                    name: Option::None,
                    value,
                    double_star: true,
                    span: start.to(value.span()),
                }
            } else if self.check(TokenKind::Identifier)
                && self.peek_nth(1).kind == TokenKind::Equal
            {
                seen_keyword = true;
                let name = self.expect_ident()?;
                self.advance();
                let value = self.parse_expr()?;
                Argument {
                    name: Some(name),
                    value,
                    double_star: false,
                    span: start.to(value.span()),
                }
            } else {
                let value = self.parse_star_or_expr()?;
                if self.check(TokenKind::For) {
                    return Err(ParseError::new(
                        ParseErrorKind::NotImplemented,
                        self.peek().span,
                        "generator expressions are not supported",
                    ));
                }
                if seen_keyword && !matches!(value, Expr::Starred(_)) {
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidSyntax,
                        value.span(),
                        "positional argument follows keyword argument",
                    ));
                }
                Argument {
                    name: Option::None,
                    value,
                    double_star: false,
                    span: value.span(),
                }
            };
            args.push(arg);

            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }

        let close = self.expect(TokenKind::RightParen)?;
        Ok((args.into_bump_slice(), close.span))
    }

    fn parse_subscript(&mut self, value: &'ast Expr<'ast>) -> Result<&'ast Expr<'ast>, ParseError> {
        self.expect(TokenKind::LeftBracket)?;

        let first = self.parse_slice_item()?;
        let index = if self.check(TokenKind::Comma) {
            let mut elements = BVec::new_in(self.arena);
            elements.push(*first);
            while self.eat(TokenKind::Comma).is_some() {
                if self.check(TokenKind::RightBracket) {
                    break;
                }
                elements.push(*self.parse_slice_item()?);
            }
            let span = first.span().to(self.previous_span());
            self.alloc_expr(Expr::Tuple(self.arena.alloc(SequenceExpr {
                elements: elements.into_bump_slice(),
                span,
            })))
        } else {
            first
        };

        let close = self.expect(TokenKind::RightBracket)?;
        Ok(self.alloc_expr(Expr::Subscript(self.arena.alloc(SubscriptExpr {
            value,
            index,
            span: value.span().to(close.span),
        }))))
    }

    fn parse_slice_item(&mut self) -> Result<&'ast Expr<'ast>, ParseError> {
        let start = self.peek().span;
        let lower = if self.check(TokenKind::Colon) {
            Option::None
        } else {
            let expr = self.parse_expr()?;
            if !self.check(TokenKind::Colon) {
                return Ok(expr);
            }
            Some(expr)
        };

        self.expect(TokenKind::Colon)?;
        let upper = self.parse_optional_slice_bound()?;
        let step = if self.eat(TokenKind::Colon).is_some() {
            self.parse_optional_slice_bound()?
        } else {
            Option::None
        };

        Ok(self.alloc_expr(Expr::Slice(self.arena.alloc(SliceExpr {
            lower,
            upper,
            step,
            span: start.to(self.previous_span()),
        }))))
    }

    fn parse_optional_slice_bound(&mut self) -> Result<Option<&'ast Expr<'ast>>, ParseError> {
        if self.starts_expression() {
            self.parse_expr().map(Some)
        } else {
            Ok(Option::None)
        }
    }

    // =========================================
    // Lambda, yield and parameters
    // =========================================

    fn parse_lambda(&mut self) -> Result<&'ast Expr<'ast>, ParseError> {
        let keyword = self.expect(TokenKind::Lambda)?;
        let params = self.parse_params(TokenKind::Colon, false)?;
        self.expect(TokenKind::Colon)?;
        let body = self.parse_expr()?;
        let span = keyword.span.to(body.span());
        Ok(self.alloc_expr(Expr::Lambda(self.arena.alloc(LambdaExpr { params, body, span }))))
    }

    pub(super) fn parse_yield(&mut self) -> Result<&'ast Expr<'ast>, ParseError> {
        let keyword = self.expect(TokenKind::Yield)?;
        let (value, delegate) = if self.eat(TokenKind::From).is_some() {
            (Some(self.parse_expr()?), true)
        } else if self.starts_expression() {
            (Some(self.parse_expr_list()?), false)
        } else {
            (Option::None, false)
        };
        let span = match value {
            Some(value) => keyword.span.to(value.span()),
            Option::None => keyword.span,
        };
        Ok(self.alloc_expr(Expr::Yield(self.arena.alloc(YieldExpr {
            value,
            delegate,
            span,
        }))))
    }

    /// Parameters up to (not including) `end`. Annotations are only
    /// accepted in `def` headers, since `:` ends a lambda's parameters.
    pub(super) fn parse_params(
        &mut self,
        end: TokenKind,
        annotations: bool,
    ) -> Result<&'ast [Param<'ast>], ParseError> {
        let mut params = BVec::new_in(self.arena);
        let mut seen_default = false;
        let mut keyword_only = false;

        while !self.check(end) {
            let start = self.peek().span;

            let param = if self.eat(TokenKind::Star).is_some() {
                keyword_only = true;
                if self.check(TokenKind::Identifier) {
                    let name = self.expect_ident()?;
                    let annotation = self.parse_param_annotation(annotations)?;
                    Param {
                        name,
                        annotation,
                        default: Option::None,
                        kind: ParamKind::VarArgs,
                        span: start.to(name.span),
                    }
                } else {
                    Param {
                        name: Ident::new("*", start),
                        annotation: Option::None,
                        default: Option::None,
                        kind: ParamKind::KeywordOnlyMarker,
                        span: start,
                    }
                }
            } else if self.eat(TokenKind::StarStar).is_some() {
                let name = self.expect_ident()?;
                let annotation = self.parse_param_annotation(annotations)?;
                Param {
                    name,
                    annotation,
                    default: Option::None,
                    kind: ParamKind::KwArgs,
                    span: start.to(name.span),
                }
            } else if self.eat(TokenKind::Slash).is_some() {
                Param {
                    name: Ident::new("/", start),
                    annotation: Option::None,
                    default: Option::None,
                    kind: ParamKind::PositionalOnlyMarker,
                    span: start,
                }
            } else {
                let name = self.expect_ident()?;
                let annotation = self.parse_param_annotation(annotations)?;
                let default = if self.eat(TokenKind::Equal).is_some() {
                    Some(self.parse_expr()?)
                } else {
                    Option::None
                };

                if default.is_some() {
                    seen_default = true;
                } else if seen_default && !keyword_only {
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidParameters,
                        name.span,
                        "non-default argument follows default argument",
                    ));
                }

                Param {
                    name,
                    annotation,
                    default,
                    kind: ParamKind::Normal,
                    span: start.to(self.previous_span()),
                }
            };
            params.push(param);

            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }

        Ok(params.into_bump_slice())
    }

    fn parse_param_annotation(
        &mut self,
        annotations: bool,
    ) -> Result<Option<&'ast Expr<'ast>>, ParseError> {
        if annotations && self.eat(TokenKind::Colon).is_some() {
            self.parse_expr().map(Some)
        } else {
            Ok(Option::None)
        }
    }

    pub(super) fn expect_ident(&mut self) -> Result<Ident<'ast>, ParseError> {
        let token = *self.peek();
        if token.kind == TokenKind::Identifier {
            self.advance();
            Ok(Ident::new(token.lexeme, token.span))
        } else {
            Err(ParseError::expected_identifier(
                token.span,
                token.kind.description(),
            ))
        }
    }
}
