//! Statement parsing.

use bumpalo::collections::Vec as BVec;
use pyjs_core::Span;

use super::parser::Parser;
use crate::ast::expr::{Argument, Expr};
use crate::ast::stmt::*;
use crate::ast::{BinaryOp, Ident, ParseError, ParseErrorKind};
use crate::lexer::TokenKind;

impl<'ast> Parser<'ast> {
    /// Parse one logical line (or compound statement) into `out`.
    ///
    /// Simple statements separated by `;` each produce their own entry.
    pub(super) fn parse_statement(
        &mut self,
        out: &mut BVec<'ast, Stmt<'ast>>,
    ) -> Result<(), ParseError> {
        match self.peek().kind {
            TokenKind::If => out.push(self.parse_if()?),
            TokenKind::While => out.push(self.parse_while()?),
            TokenKind::For => out.push(self.parse_for()?),
            TokenKind::Try => out.push(self.parse_try()?),
            TokenKind::With => out.push(self.parse_with()?),
            TokenKind::Def => out.push(self.parse_function(&[])?),
            TokenKind::Class => out.push(self.parse_class(&[])?),
            TokenKind::At => out.push(self.parse_decorated()?),
            TokenKind::Async => {
                return Err(ParseError::new(
                    ParseErrorKind::NotImplemented,
                    self.peek().span,
                    "async code is not supported",
                ));
            }
            TokenKind::Indent => {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedIndent,
                    self.peek().span,
                    "unexpected indent",
                ));
            }
            _ => self.parse_simple_statements(out)?,
        }
        Ok(())
    }

    fn parse_simple_statements(
        &mut self,
        out: &mut BVec<'ast, Stmt<'ast>>,
    ) -> Result<(), ParseError> {
        loop {
            out.push(self.parse_small_statement()?);
            if self.eat(TokenKind::Semicolon).is_none() {
                break;
            }
            if self.check(TokenKind::Newline) || self.is_eof() {
                break;
            }
        }

        if self.eat(TokenKind::Newline).is_none() && !self.is_eof() {
            let token = *self.peek();
            return Err(ParseError::new(
                ParseErrorKind::ExpectedToken,
                token.span,
                format!("expected end of statement, found {}", token.kind.description()),
            ));
        }
        Ok(())
    }

    /// `: NEWLINE INDENT stmt+ DEDENT`, or `: simple_stmt` on the same line.
    fn parse_block(&mut self) -> Result<Block<'ast>, ParseError> {
        self.nested(Self::parse_suite)
    }

    fn parse_suite(&mut self) -> Result<Block<'ast>, ParseError> {
        let colon = self.expect(TokenKind::Colon)?;
        let mut stmts = BVec::new_in(self.arena);

        if self.eat(TokenKind::Newline).is_none() {
            self.parse_simple_statements(&mut stmts)?;
        } else {
            if self.eat(TokenKind::Indent).is_none() {
                return Err(ParseError::new(
                    ParseErrorKind::ExpectedBlock,
                    self.peek().span,
                    "expected an indented block",
                ));
            }
            while !self.check(TokenKind::Dedent) && !self.is_eof() {
                if self.eat(TokenKind::Newline).is_some() {
                    continue;
                }
                self.parse_statement(&mut stmts)?;
            }
            self.eat(TokenKind::Dedent);
        }

        let span = match stmts.first() {
            Some(first) => first.span().to(self.previous_span()),
            None => colon.span,
        };
        Ok(Block {
            stmts: stmts.into_bump_slice(),
            span,
        })
    }

    fn parse_else_block(&mut self) -> Result<Option<Block<'ast>>, ParseError> {
        if self.eat(TokenKind::Else).is_some() {
            self.parse_block().map(Some)
        } else {
            Ok(None)
        }
    }

    // =========================================
    // Compound statements
    // =========================================

    fn parse_if(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let keyword = self.expect(TokenKind::If)?;
        let mut branches = BVec::new_in(self.arena);

        let test = self.parse_expr()?;
        let body = self.parse_block()?;
        branches.push(IfBranch {
            test,
            body,
            span: keyword.span.to(self.previous_span()),
        });

        while let Some(elif) = self.eat(TokenKind::Elif) {
            let test = self.parse_expr()?;
            let body = self.parse_block()?;
            branches.push(IfBranch {
                test,
                body,
                span: elif.span.to(self.previous_span()),
            });
        }

        let else_body = self.parse_else_block()?;
        let span = keyword.span.to(self.previous_span());
        Ok(Stmt::If(self.arena.alloc(IfStmt {
            branches: branches.into_bump_slice(),
            else_body,
            span,
        })))
    }

    fn parse_while(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let keyword = self.expect(TokenKind::While)?;
        let test = self.parse_expr()?;
        let body = self.parse_block()?;
        let else_body = self.parse_else_block()?;
        let span = keyword.span.to(self.previous_span());
        Ok(Stmt::While(self.arena.alloc(WhileStmt {
            test,
            body,
            else_body,
            span,
        })))
    }

    fn parse_for(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let keyword = self.expect(TokenKind::For)?;
        let target = self.parse_target_list()?;
        self.expect(TokenKind::In)?;
        let iter = self.parse_expr_list()?;
        let body = self.parse_block()?;
        let else_body = self.parse_else_block()?;
        let span = keyword.span.to(self.previous_span());
        Ok(Stmt::For(self.arena.alloc(ForStmt {
            target,
            iter,
            body,
            else_body,
            span,
        })))
    }

    fn parse_try(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let keyword = self.expect(TokenKind::Try)?;
        let body = self.parse_block()?;

        let mut handlers = BVec::new_in(self.arena);
        while let Some(except) = self.eat(TokenKind::Except) {
            if self.check(TokenKind::Star) {
                return Err(ParseError::new(
                    ParseErrorKind::NotImplemented,
                    self.peek().span,
                    "exception groups are not supported",
                ));
            }

            let exc_type = if self.check(TokenKind::Colon) {
                None
            } else {
                Some(self.parse_expr()?)
            };
            let alias = if self.eat(TokenKind::As).is_some() {
                Some(self.expect_ident()?)
            } else {
                None
            };
            let body = self.parse_block()?;
            handlers.push(ExceptHandler {
                exc_type,
                alias,
                body,
                span: except.span.to(self.previous_span()),
            });
        }

        let else_body = if self.check(TokenKind::Else) {
            if handlers.is_empty() {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidSyntax,
                    self.peek().span,
                    "'else' requires at least one 'except' clause",
                ));
            }
            self.parse_else_block()?
        } else {
            None
        };

        let finally_body = if self.eat(TokenKind::Finally).is_some() {
            Some(self.parse_block()?)
        } else {
            None
        };

        if handlers.is_empty() && finally_body.is_none() {
            return Err(ParseError::new(
                ParseErrorKind::InvalidSyntax,
                self.peek().span,
                "expected 'except' or 'finally' block",
            ));
        }

        let span = keyword.span.to(self.previous_span());
        Ok(Stmt::Try(self.arena.alloc(TryStmt {
            body,
            handlers: handlers.into_bump_slice(),
            else_body,
            finally_body,
            span,
        })))
    }

    fn parse_with(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let keyword = self.expect(TokenKind::With)?;
        let mut items = BVec::new_in(self.arena);

        loop {
            let context = self.parse_expr()?;
            let target = if self.eat(TokenKind::As).is_some() {
                Some(*self.parse_star_target()?)
            } else {
                None
            };
            items.push(WithItem {
                context: *context,
                target,
            });
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }

        let body = self.parse_block()?;
        let span = keyword.span.to(self.previous_span());
        Ok(Stmt::With(self.arena.alloc(WithStmt {
            items: items.into_bump_slice(),
            body,
            span,
        })))
    }

    fn parse_decorated(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let mut decorators = BVec::new_in(self.arena);
        while self.eat(TokenKind::At).is_some() {
            decorators.push(*self.parse_expr()?);
            self.expect(TokenKind::Newline)?;
        }
        let decorators = decorators.into_bump_slice();

        match self.peek().kind {
            TokenKind::Def => self.parse_function(decorators),
            TokenKind::Class => self.parse_class(decorators),
            TokenKind::Async => Err(ParseError::new(
                ParseErrorKind::NotImplemented,
                self.peek().span,
                "async code is not supported",
            )),
            _ => Err(ParseError::new(
                ParseErrorKind::InvalidSyntax,
                self.peek().span,
                "expected function or class definition after decorator",
            )),
        }
    }

    fn parse_function(&mut self, decorators: &'ast [Expr<'ast>]) -> Result<Stmt<'ast>, ParseError> {
        let keyword = self.expect(TokenKind::Def)?;
        let name = self.expect_ident()?;

        self.expect(TokenKind::LeftParen)?;
        let params = self.parse_params(TokenKind::RightParen, true)?;
        self.expect(TokenKind::RightParen)?;

        let returns = if self.eat(TokenKind::Arrow).is_some() {
            Some(self.parse_expr()?)
        } else {
            None
        };

        let body = self.parse_block()?;
        let start = decorators.first().map_or(keyword.span, Expr::span);
        let span = start.to(self.previous_span());
        Ok(Stmt::FunctionDef(self.arena.alloc(FunctionDef {
            name,
            params,
            returns,
            body,
            decorators,
            span,
        })))
    }

    fn parse_class(&mut self, decorators: &'ast [Expr<'ast>]) -> Result<Stmt<'ast>, ParseError> {
        let keyword = self.expect(TokenKind::Class)?;
        let name = self.expect_ident()?;

        let bases: &'ast [Argument<'ast>] = if self.check(TokenKind::LeftParen) {
            self.parse_arguments()?.0
        } else {
            &[]
        };

        let body = self.parse_block()?;
        let start = decorators.first().map_or(keyword.span, Expr::span);
        let span = start.to(self.previous_span());
        Ok(Stmt::ClassDef(self.arena.alloc(ClassDef {
            name,
            bases,
            body,
            decorators,
            span,
        })))
    }

    // =========================================
    // Simple statements
    // =========================================

    fn parse_small_statement(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let token = *self.peek();
        match token.kind {
            TokenKind::Pass => {
                self.advance();
                Ok(Stmt::Pass(token.span))
            }
            TokenKind::Break => {
                self.advance();
                Ok(Stmt::Break(token.span))
            }
            TokenKind::Continue => {
                self.advance();
                Ok(Stmt::Continue(token.span))
            }
            TokenKind::Return => {
                self.advance();
                let value = if self.starts_expression() {
                    Some(self.parse_expr_list()?)
                } else {
                    None
                };
                Ok(Stmt::Return(ReturnStmt {
                    value,
                    span: token.span.to(self.previous_span()),
                }))
            }
            TokenKind::Raise => {
                self.advance();
                let exc = if self.starts_expression() {
                    Some(self.parse_expr()?)
                } else {
                    None
                };
                let cause = if exc.is_some() && self.eat(TokenKind::From).is_some() {
                    Some(self.parse_expr()?)
                } else {
                    None
                };
                Ok(Stmt::Raise(RaiseStmt {
                    exc,
                    cause,
                    span: token.span.to(self.previous_span()),
                }))
            }
            TokenKind::Assert => {
                self.advance();
                let test = self.parse_expr()?;
                let msg = if self.eat(TokenKind::Comma).is_some() {
                    Some(self.parse_expr()?)
                } else {
                    None
                };
                Ok(Stmt::Assert(AssertStmt {
                    test,
                    msg,
                    span: token.span.to(self.previous_span()),
                }))
            }
            TokenKind::Global | TokenKind::Nonlocal => {
                self.advance();
                let names = self.parse_name_list()?;
                let stmt = NamesStmt {
                    names,
                    span: token.span.to(self.previous_span()),
                };
                Ok(if token.kind == TokenKind::Global {
                    Stmt::Global(stmt)
                } else {
                    Stmt::Nonlocal(stmt)
                })
            }
            TokenKind::Del => {
                self.advance();
                let targets = match self.parse_expr_list()? {
                    Expr::Tuple(seq) => seq.elements,
                    single => std::slice::from_ref(single),
                };
                if let Some(bad) = targets.iter().find(|t| !t.is_assignable()) {
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidTarget,
                        bad.span(),
                        "cannot delete expression",
                    ));
                }
                Ok(Stmt::Delete(DeleteStmt {
                    targets,
                    span: token.span.to(self.previous_span()),
                }))
            }
            TokenKind::Import => self.parse_import(),
            TokenKind::From => self.parse_from_import(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_name_list(&mut self) -> Result<&'ast [Ident<'ast>], ParseError> {
        let mut names = BVec::new_in(self.arena);
        names.push(self.expect_ident()?);
        while self.eat(TokenKind::Comma).is_some() {
            names.push(self.expect_ident()?);
        }
        Ok(names.into_bump_slice())
    }

    /// Right-hand side of an assignment, which may be a bare `yield`.
    fn parse_assigned_value(&mut self) -> Result<&'ast Expr<'ast>, ParseError> {
        if self.check(TokenKind::Yield) {
            self.parse_yield()
        } else {
            self.parse_expr_list()
        }
    }

    fn parse_expression_statement(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let first = self.parse_assigned_value()?;
        let start = first.span();

        // target: annotation [= value]
        if self.eat(TokenKind::Colon).is_some() {
            if !matches!(first, Expr::Name(_) | Expr::Attribute(_) | Expr::Subscript(_)) {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidTarget,
                    first.span(),
                    "only single target (not tuple) can be annotated",
                ));
            }
            let annotation = self.parse_expr()?;
            let value = if self.eat(TokenKind::Equal).is_some() {
                Some(self.parse_assigned_value()?)
            } else {
                None
            };
            return Ok(Stmt::AnnAssign(self.arena.alloc(AnnAssignStmt {
                target: first,
                annotation,
                value,
                span: start.to(self.previous_span()),
            })));
        }

        // target op= value
        if let Some(op) = BinaryOp::from_augmented_token(self.peek().kind) {
            if !matches!(first, Expr::Name(_) | Expr::Attribute(_) | Expr::Subscript(_)) {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidTarget,
                    first.span(),
                    "illegal expression for augmented assignment",
                ));
            }
            self.advance();
            let value = self.parse_assigned_value()?;
            return Ok(Stmt::AugAssign(self.arena.alloc(AugAssignStmt {
                target: first,
                op,
                value,
                span: start.to(self.previous_span()),
            })));
        }

        if !self.check(TokenKind::Equal) {
            return Ok(Stmt::Expr(ExprStmt {
                expr: first,
                span: start,
            }));
        }

        // a = b = value
        let mut targets = BVec::new_in(self.arena);
        let mut value = first;
        while self.eat(TokenKind::Equal).is_some() {
            if !value.is_assignable() {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidTarget,
                    value.span(),
                    "cannot assign to expression",
                ));
            }
            targets.push(*value);
            value = self.parse_assigned_value()?;
        }

        Ok(Stmt::Assign(self.arena.alloc(AssignStmt {
            targets: targets.into_bump_slice(),
            value,
            span: start.to(self.previous_span()),
        })))
    }

    // =========================================
    // Imports
    // =========================================

    fn parse_dotted_name(&mut self) -> Result<(&'ast str, Span), ParseError> {
        let first = self.expect_ident()?;
        if !self.check(TokenKind::Dot) {
            return Ok((first.name, first.span));
        }

        let mut name = String::from(first.name);
        let mut span = first.span;
        while self.eat(TokenKind::Dot).is_some() {
            let part = self.expect_ident()?;
            name.push('.');
            name.push_str(part.name);
            span = span.to(part.span);
        }
        Ok((self.arena.alloc_str(&name), span))
    }

    fn parse_alias(
        &mut self,
        name: &'ast str,
        span: Span,
    ) -> Result<ImportAlias<'ast>, ParseError> {
        let alias = if self.eat(TokenKind::As).is_some() {
            Some(self.expect_ident()?)
        } else {
            None
        };
        Ok(ImportAlias {
            name,
            alias,
            span: span.to(self.previous_span()),
        })
    }

    fn parse_import(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let keyword = self.expect(TokenKind::Import)?;
        let mut names = BVec::new_in(self.arena);

        loop {
            let (name, span) = self.parse_dotted_name()?;
            names.push(self.parse_alias(name, span)?);
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }

        Ok(Stmt::Import(self.arena.alloc(ImportStmt {
            module: None,
            level: 0,
            names: names.into_bump_slice(),
            span: keyword.span.to(self.previous_span()),
        })))
    }

    fn parse_from_import(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let keyword = self.expect(TokenKind::From)?;

        let mut level = 0;
        loop {
            if self.eat(TokenKind::Dot).is_some() {
                level += 1;
            } else if self.eat(TokenKind::Ellipsis).is_some() {
                level += 3;
            } else {
                break;
            }
        }

        let module = if self.check(TokenKind::Identifier) {
            Some(self.parse_dotted_name()?.0)
        } else if level == 0 {
            return Err(ParseError::expected_identifier(
                self.peek().span,
                self.peek().kind.description(),
            ));
        } else {
            None
        };

        self.expect(TokenKind::Import)?;

        let mut names = BVec::new_in(self.arena);
        if let Some(star) = self.eat(TokenKind::Star) {
            names.push(ImportAlias {
                name: "*",
                alias: None,
                span: star.span,
            });
        } else {
            let parenthesized = self.eat(TokenKind::LeftParen).is_some();
            loop {
                let name = self.expect_ident()?;
                names.push(self.parse_alias(name.name, name.span)?);
                if self.eat(TokenKind::Comma).is_none() {
                    break;
                }
                if parenthesized && self.check(TokenKind::RightParen) {
                    break;
                }
            }
            if parenthesized {
                self.expect(TokenKind::RightParen)?;
            }
        }

        Ok(Stmt::Import(self.arena.alloc(ImportStmt {
            module,
            level,
            names: names.into_bump_slice(),
            span: keyword.span.to(self.previous_span()),
        })))
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use bumpalo::Bump;

    fn parse<'a>(arena: &'a Bump, source: &str) -> &'a [Stmt<'a>] {
        Parser::parse(source, arena).unwrap().body()
    }

    fn error_kind(source: &str) -> Option<ParseErrorKind> {
        let arena = Bump::new();
        Parser::parse(source, &arena)
            .err()
            .and_then(|errors| errors.first().map(|e| e.kind))
    }

    #[test]
    fn assignment_forms() {
        let arena = Bump::new();
        let body = parse(&arena, "x = 1\na = b = 2\nx += 3\ny: int = 4\nz: str\n");
        assert_eq!(body.len(), 5);

        let Stmt::Assign(chain) = body[1] else {
            panic!("expected assignment");
        };
        assert_eq!(chain.targets.len(), 2);

        assert!(matches!(body[2], Stmt::AugAssign(a) if a.op == BinaryOp::Add));
        assert!(matches!(body[3], Stmt::AnnAssign(a) if a.value.is_some()));
        assert!(matches!(body[4], Stmt::AnnAssign(a) if a.value.is_none()));
    }

    #[test]
    fn tuple_assignment_targets() {
        let arena = Bump::new();
        let body = parse(&arena, "a, b = 1, 2\n");
        let Stmt::Assign(assign) = body[0] else {
            panic!("expected assignment");
        };
        assert!(matches!(assign.targets[0], Expr::Tuple(_)));
        assert!(matches!(assign.value, Expr::Tuple(_)));
    }

    #[test]
    fn invalid_targets() {
        assert_eq!(error_kind("f() = 1\n"), Some(ParseErrorKind::InvalidTarget));
        assert_eq!(error_kind("1 += 1\n"), Some(ParseErrorKind::InvalidTarget));
        assert_eq!(error_kind("a, b: int = 1\n"), Some(ParseErrorKind::InvalidTarget));
    }

    #[test]
    fn if_elif_else() {
        let arena = Bump::new();
        let source = "if a:\n    x = 1\nelif b:\n    x = 2\nelse:\n    x = 3\n";
        let Stmt::If(stmt) = parse(&arena, source)[0] else {
            panic!("expected if");
        };
        assert_eq!(stmt.branches.len(), 2);
        assert!(stmt.else_body.is_some());
    }

    #[test]
    fn inline_suites() {
        let arena = Bump::new();
        let body = parse(&arena, "if x: y = 1; z = 2\nwhile True: pass\n");
        let Stmt::If(stmt) = body[0] else {
            panic!("expected if");
        };
        assert_eq!(stmt.branches[0].body.stmts.len(), 2);
        assert!(matches!(body[1], Stmt::While(_)));
    }

    #[test]
    fn loops_with_else() {
        let arena = Bump::new();
        let source = "for i, v in items:\n    pass\nelse:\n    done()\nwhile x:\n    break\n";
        let body = parse(&arena, source);
        let Stmt::For(stmt) = body[0] else {
            panic!("expected for");
        };
        assert!(matches!(stmt.target, Expr::Tuple(_)));
        assert!(stmt.else_body.is_some());
        assert!(matches!(body[1], Stmt::While(w) if w.else_body.is_none()));
    }

    #[test]
    fn nested_blocks_dedent_correctly() {
        let arena = Bump::new();
        let source = "def f():\n    if a:\n        return 1\n    return 2\nx = f()\n";
        let body = parse(&arena, source);
        assert_eq!(body.len(), 2);
        let Stmt::FunctionDef(func) = body[0] else {
            panic!("expected def");
        };
        assert_eq!(func.body.stmts.len(), 2);
    }

    #[test]
    fn function_signature() {
        let arena = Bump::new();
        let source = "@cache\ndef f(a, b: int = 1, *args, key=None, **kw) -> int:\n    pass\n";
        let Stmt::FunctionDef(func) = parse(&arena, source)[0] else {
            panic!("expected def");
        };
        assert_eq!(func.name.name, "f");
        assert_eq!(func.decorators.len(), 1);
        assert!(func.returns.is_some());
        let kinds: Vec<ParamKind> = func.params.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            [
                ParamKind::Normal,
                ParamKind::Normal,
                ParamKind::VarArgs,
                ParamKind::Normal,
                ParamKind::KwArgs
            ]
        );
        assert!(func.params[1].annotation.is_some());
    }

    #[test]
    fn non_default_after_default() {
        assert_eq!(
            error_kind("def f(a=1, b):\n    pass\n"),
            Some(ParseErrorKind::InvalidParameters)
        );
    }

    #[test]
    fn class_with_bases() {
        let arena = Bump::new();
        let source = "\
class Dog(Animal):
    sound = 'woof'
    def speak(self):
        return self.sound
";
        let Stmt::ClassDef(class) = parse(&arena, source)[0] else {
            panic!("expected class");
        };
        assert_eq!(class.name.name, "Dog");
        assert_eq!(class.bases.len(), 1);
        assert_eq!(class.body.stmts.len(), 2);

        let Stmt::ClassDef(bare) = parse(&arena, "class A:\n    pass\n")[0] else {
            panic!("expected class");
        };
        assert!(bare.bases.is_empty());
    }

    #[test]
    fn try_clauses() {
        let arena = Bump::new();
        let source = "\
try:
    a()
except ValueError as e:
    b()
except:
    c()
else:
    d()
finally:
    f()
";
        let Stmt::Try(stmt) = parse(&arena, source)[0] else {
            panic!("expected try");
        };
        assert_eq!(stmt.handlers.len(), 2);
        assert_eq!(stmt.handlers[0].alias.map(|a| a.name), Some("e"));
        assert!(stmt.handlers[1].exc_type.is_none());
        assert!(stmt.else_body.is_some());
        assert!(stmt.finally_body.is_some());
    }

    #[test]
    fn try_requires_handler_or_finally() {
        assert_eq!(
            error_kind("try:\n    a()\nx = 1\n"),
            Some(ParseErrorKind::InvalidSyntax)
        );
    }

    #[test]
    fn keyword_statements() {
        let arena = Bump::new();
        let source = "\
raise ValueError('x') from err
raise
assert x, 'msg'
global a, b
del xs[0], y
";
        let body = parse(&arena, source);
        assert!(matches!(body[0], Stmt::Raise(r) if r.cause.is_some()));
        assert!(matches!(body[1], Stmt::Raise(r) if r.exc.is_none()));
        assert!(matches!(body[2], Stmt::Assert(a) if a.msg.is_some()));
        assert!(matches!(body[3], Stmt::Global(g) if g.names.len() == 2));
        assert!(matches!(body[4], Stmt::Delete(d) if d.targets.len() == 2));
    }

    #[test]
    fn imports() {
        let arena = Bump::new();
        let source = "import os.path as p, sys\nfrom ..pkg import (a, b as c,)\nfrom m import *\n";
        let body = parse(&arena, source);

        let Stmt::Import(plain) = body[0] else {
            panic!("expected import");
        };
        assert!(plain.module.is_none());
        assert_eq!(plain.names[0].name, "os.path");
        assert_eq!(plain.names[0].bound_name(), "p");
        assert_eq!(plain.names[1].bound_name(), "sys");

        let Stmt::Import(from) = body[1] else {
            panic!("expected import");
        };
        assert_eq!(from.level, 2);
        assert_eq!(from.module, Some("pkg"));
        assert_eq!(from.names.len(), 2);

        assert!(matches!(body[2], Stmt::Import(i) if i.names[0].name == "*"));
    }

    #[test]
    fn with_statement() {
        let arena = Bump::new();
        let Stmt::With(stmt) = parse(&arena, "with open(p) as f, lock:\n    f.read()\n")[0] else {
            panic!("expected with");
        };
        assert_eq!(stmt.items.len(), 2);
        assert!(stmt.items[0].target.is_some());
        assert!(stmt.items[1].target.is_none());
    }

    #[test]
    fn block_errors() {
        assert_eq!(error_kind("if x:\npass\n"), Some(ParseErrorKind::ExpectedBlock));
        assert_eq!(
            error_kind("def f():\n    x = 1\n        y = 2\n"),
            Some(ParseErrorKind::UnexpectedIndent)
        );
        assert_eq!(error_kind("x = 1 2\n"), Some(ParseErrorKind::ExpectedToken));
        assert_eq!(error_kind("async def f():\n    pass\n"), Some(ParseErrorKind::NotImplemented));
    }

    #[test]
    fn decorator_must_precede_definition() {
        assert_eq!(error_kind("@deco\nx = 1\n"), Some(ParseErrorKind::InvalidSyntax));
    }

    #[test]
    fn yield_statements() {
        let arena = Bump::new();
        let body = parse(&arena, "def g():\n    yield 1\n    x = yield\n")[0];
        let Stmt::FunctionDef(func) = body else {
            panic!("expected def");
        };
        assert!(matches!(func.body.stmts[0], Stmt::Expr(e) if matches!(e.expr, Expr::Yield(_))));
        assert!(matches!(func.body.stmts[1], Stmt::Assign(a) if matches!(a.value, Expr::Yield(_))));
    }
}
