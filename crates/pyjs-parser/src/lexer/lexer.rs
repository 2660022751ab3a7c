//! Indentation-aware lexer for Python source.
//!
//! The [`Lexer`] turns source text into [`Token`]s, synthesizing `Newline`,
//! `Indent` and `Dedent` tokens from line structure the way the Python
//! tokenizer does:
//!
//! - blank and comment-only lines produce nothing
//! - line breaks inside `()`, `[]` and `{}` are ignored
//! - a backslash at the end of a line joins it with the next
//! - at end of input any open blocks are closed with `Dedent`s
//!
//! Lexemes are copied into the arena, so the source can be dropped once
//! lexing completes.

use std::collections::VecDeque;

use bumpalo::Bump;
use pyjs_core::{LexError, Span};

use super::cursor::{Cursor, is_ident_continue, is_ident_start};
use super::token::{Token, TokenKind, lookup_keyword};

const TAB_WIDTH: u32 = 8;

pub struct Lexer<'src, 'ast> {
    cursor: Cursor<'src>,
    arena: &'ast Bump,
    /// Tokens already scanned but not yet handed out (runs of `Dedent`).
    pending: VecDeque<Token<'ast>>,
    /// Column widths of the enclosing indented blocks; always starts with 0.
    indents: Vec<u32>,
    /// Open bracket characters, innermost last.
    brackets: Vec<char>,
    at_line_start: bool,
    last_kind: Option<TokenKind>,
    errors: Vec<LexError>,
}

impl<'src, 'ast> Lexer<'src, 'ast> {
    pub fn new(source: &'src str, arena: &'ast Bump) -> Self {
        Self {
            cursor: Cursor::new(source),
            arena,
            pending: VecDeque::new(),
            indents: vec![0],
            brackets: Vec::new(),
            at_line_start: true,
            last_kind: None,
            errors: Vec::new(),
        }
    }

    /// Take accumulated errors, leaving an empty vec.
    pub fn take_errors(&mut self) -> Vec<LexError> {
        std::mem::take(&mut self.errors)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Consume and return the next token. Returns `Eof` forever once the
    /// input is exhausted.
    pub fn next_token(&mut self) -> Token<'ast> {
        let token = self.produce();
        self.last_kind = Some(token.kind);
        token
    }

    /// Lex the whole input into a vector ending with `Eof`.
    pub fn tokenize(mut self) -> (Vec<Token<'ast>>, Vec<LexError>) {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            tokens.push(token);
            if token.kind == TokenKind::Eof {
                break;
            }
        }
        (tokens, self.errors)
    }

    fn produce(&mut self) -> Token<'ast> {
        if let Some(token) = self.pending.pop_front() {
            return token;
        }

        if self.at_line_start && self.brackets.is_empty() {
            self.at_line_start = false;
            if let Some(token) = self.scan_indentation() {
                return token;
            }
        }

        self.scan_token()
    }

    // =========================================
    // Layout
    // =========================================

    /// Measure the indentation of the next logical line and emit `Indent` or
    /// `Dedent` tokens for it. Blank and comment-only lines are skipped.
    fn scan_indentation(&mut self) -> Option<Token<'ast>> {
        if self.cursor.check_str("\u{FEFF}") {
            self.cursor.advance();
        }

        let width = loop {
            let mut width = 0;
            while let Some(c) = self.cursor.peek() {
                match c {
                    ' ' => width += 1,
                    '\t' => width = (width / TAB_WIDTH + 1) * TAB_WIDTH,
                    '\x0c' => width = 0,
                    _ => break,
                }
                self.cursor.advance();
            }

            match self.cursor.peek() {
                Some('#') => {
                    self.skip_comment();
                }
                Some('\r') | Some('\n') => {}
                Some(_) => break width,
                None => return None,
            }
            self.eat_line_break();
        };

        let line = self.cursor.line();
        let col = self.cursor.column();
        let current = self.indents.last().copied().unwrap_or(0);

        if width > current {
            self.indents.push(width);
            return Some(self.synthetic(TokenKind::Indent, line, col));
        }

        while self.indents.last().is_some_and(|&top| top > width) {
            self.indents.pop();
            let dedent = self.synthetic(TokenKind::Dedent, line, col);
            self.pending.push_back(dedent);
        }

        if self.indents.last().copied().unwrap_or(0) != width {
            self.errors.push(LexError::InconsistentDedent {
                span: Span::point(line, col),
            });
            // Treat the line as if it started the nearest enclosing block.
            self.indents.push(width);
        }

        self.pending.pop_front()
    }

    fn skip_comment(&mut self) {
        self.cursor.eat_while(|c| c != '\n' && c != '\r');
    }

    fn eat_line_break(&mut self) -> bool {
        if self.cursor.eat('\r') {
            self.cursor.eat('\n');
            true
        } else {
            self.cursor.eat('\n')
        }
    }

    /// Skip spaces, comments and backslash continuations within a line.
    fn skip_trivia(&mut self) {
        loop {
            match self.cursor.peek() {
                Some(' ' | '\t' | '\x0c') => {
                    self.cursor.advance();
                }
                Some('#') => self.skip_comment(),
                Some('\\')
                    if matches!(self.cursor.peek_nth(1), Some('\n' | '\r')) =>
                {
                    self.cursor.advance();
                    self.eat_line_break();
                }
                _ => break,
            }
        }
    }

    // =========================================
    // Token scanning
    // =========================================

    fn scan_token(&mut self) -> Token<'ast> {
        loop {
            self.skip_trivia();

            let start_line = self.cursor.line();
            let start_col = self.cursor.column();
            let start_offset = self.cursor.offset();

            let Some(c) = self.cursor.peek() else {
                return self.scan_eof();
            };

            return match c {
                '\r' | '\n' => {
                    self.eat_line_break();
                    if !self.brackets.is_empty() {
                        continue;
                    }
                    self.at_line_start = true;
                    if matches!(
                        self.last_kind,
                        None | Some(TokenKind::Newline | TokenKind::Indent | TokenKind::Dedent)
                    ) {
                        // A line holding only a continuation produces nothing.
                        if let Some(token) = self.scan_indentation() {
                            return token;
                        }
                        self.at_line_start = false;
                        continue;
                    }
                    let span = Span::point(start_line, start_col);
                    Token::new(TokenKind::Newline, self.arena.alloc_str("\n"), span)
                }
                '"' | '\'' => self.scan_string(start_line, start_col, start_offset),
                c if c.is_ascii_digit() => self.scan_number(start_line, start_col, start_offset),
                '.' if self.cursor.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) => {
                    self.scan_number(start_line, start_col, start_offset)
                }
                c if is_ident_start(c) => {
                    self.scan_identifier(start_line, start_col, start_offset)
                }
                _ => self.scan_operator(start_line, start_col, start_offset),
            };
        }
    }

    /// Close the final logical line and any open blocks, then report `Eof`.
    fn scan_eof(&mut self) -> Token<'ast> {
        let line = self.cursor.line();
        let col = self.cursor.column();

        if let Some(open) = self.brackets.pop() {
            self.brackets.clear();
            self.errors.push(LexError::UnmatchedBracket {
                ch: open,
                span: Span::point(line, col),
            });
        }

        if matches!(
            self.last_kind,
            Some(kind) if !matches!(
                kind,
                TokenKind::Newline | TokenKind::Indent | TokenKind::Dedent | TokenKind::Eof
            )
        ) {
            return self.synthetic(TokenKind::Newline, line, col);
        }

        if self.indents.len() > 1 {
            self.indents.pop();
            return self.synthetic(TokenKind::Dedent, line, col);
        }

        self.synthetic(TokenKind::Eof, line, col)
    }

    fn synthetic(&self, kind: TokenKind, line: u32, col: u32) -> Token<'ast> {
        Token::new(kind, self.arena.alloc_str(""), Span::point(line, col))
    }

    fn make_token(
        &self,
        kind: TokenKind,
        start_line: u32,
        start_col: u32,
        start_offset: u32,
    ) -> Token<'ast> {
        let text = self.cursor.slice_from(start_offset);
        let span = Span::new(start_line, start_col, text.len() as u32);
        Token::new(kind, self.arena.alloc_str(text), span)
    }

    fn make_error(&mut self, error: LexError) -> Token<'ast> {
        let span = error.span();
        self.errors.push(error);
        Token::new(TokenKind::Error, self.arena.alloc_str(""), span)
    }

    // =========================================
    // Strings
    // =========================================

    /// Scan a string body. The cursor sits on the opening quote; any prefix
    /// letters were already consumed and belong to the token.
    fn scan_string(&mut self, start_line: u32, start_col: u32, start_offset: u32) -> Token<'ast> {
        let Some(quote) = self.cursor.advance() else {
            return self.scan_eof();
        };

        let triple = if quote == '"' {
            self.cursor.eat_str("\"\"")
        } else {
            self.cursor.eat_str("''")
        };

        loop {
            match self.cursor.peek() {
                None => break,
                Some('\n' | '\r') if !triple => break,
                Some('\\') => {
                    self.cursor.advance();
                    if self.cursor.peek() == Some('\r') {
                        self.eat_line_break();
                    } else {
                        self.cursor.advance();
                    }
                }
                Some(c) if c == quote => {
                    self.cursor.advance();
                    if !triple {
                        return self.make_token(
                            TokenKind::StringLiteral,
                            start_line,
                            start_col,
                            start_offset,
                        );
                    }
                    let mut closing = String::with_capacity(2);
                    closing.push(quote);
                    closing.push(quote);
                    if self.cursor.eat_str(&closing) {
                        return self.make_token(
                            TokenKind::StringLiteral,
                            start_line,
                            start_col,
                            start_offset,
                        );
                    }
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }

        let len = self.cursor.offset() - start_offset;
        self.make_error(LexError::UnterminatedString {
            span: Span::new(start_line, start_col, len),
        })
    }

    // =========================================
    // Numbers
    // =========================================

    fn scan_number(&mut self, start_line: u32, start_col: u32, start_offset: u32) -> Token<'ast> {
        if self.cursor.peek() == Some('0') {
            let radix = match self.cursor.peek_nth(1) {
                Some('x' | 'X') => Some(16),
                Some('o' | 'O') => Some(8),
                Some('b' | 'B') => Some(2),
                _ => None,
            };
            if let Some(radix) = radix {
                self.cursor.advance();
                self.cursor.advance();
                let digits = self.cursor.eat_while(|c| c.is_digit(radix) || c == '_');
                if digits.trim_matches('_').is_empty() {
                    let len = self.cursor.offset() - start_offset;
                    return self.make_error(LexError::InvalidNumber {
                        span: Span::new(start_line, start_col, len),
                        detail: "expected digits after radix prefix".to_string(),
                    });
                }
                return self.finish_number(
                    TokenKind::IntLiteral,
                    start_line,
                    start_col,
                    start_offset,
                );
            }
        }

        let mut kind = TokenKind::IntLiteral;
        self.consume_decimal_digits();

        if self.cursor.peek() == Some('.') {
            self.cursor.advance();
            self.consume_decimal_digits();
            kind = TokenKind::FloatLiteral;
        }

        if matches!(self.cursor.peek(), Some('e' | 'E'))
            && (self.cursor.peek_nth(1).is_some_and(|c| c.is_ascii_digit())
                || (matches!(self.cursor.peek_nth(1), Some('+' | '-'))
                    && self.cursor.peek_nth(2).is_some_and(|c| c.is_ascii_digit())))
        {
            self.cursor.advance();
            if matches!(self.cursor.peek(), Some('+' | '-')) {
                self.cursor.advance();
            }
            self.consume_decimal_digits();
            kind = TokenKind::FloatLiteral;
        }

        self.finish_number(kind, start_line, start_col, start_offset)
    }

    fn finish_number(
        &mut self,
        kind: TokenKind,
        start_line: u32,
        start_col: u32,
        start_offset: u32,
    ) -> Token<'ast> {
        if self.cursor.check(|c| c == 'j' || c == 'J') {
            self.cursor.advance();
            let len = self.cursor.offset() - start_offset;
            return self.make_error(LexError::InvalidNumber {
                span: Span::new(start_line, start_col, len),
                detail: "complex literals are not supported".to_string(),
            });
        }
        if self.cursor.check(is_ident_start) {
            self.cursor.eat_while(is_ident_continue);
            let len = self.cursor.offset() - start_offset;
            return self.make_error(LexError::InvalidNumber {
                span: Span::new(start_line, start_col, len),
                detail: "invalid digit in numeric literal".to_string(),
            });
        }
        self.make_token(kind, start_line, start_col, start_offset)
    }

    fn consume_decimal_digits(&mut self) {
        self.cursor.eat_while(|c| c.is_ascii_digit() || c == '_');
    }

    // =========================================
    // Identifiers and keywords
    // =========================================

    fn scan_identifier(
        &mut self,
        start_line: u32,
        start_col: u32,
        start_offset: u32,
    ) -> Token<'ast> {
        let word = self.cursor.eat_while(is_ident_continue);

        if self.cursor.check(|c| c == '"' || c == '\'') && is_string_prefix(word) {
            return self.scan_string(start_line, start_col, start_offset);
        }

        let kind = lookup_keyword(word).unwrap_or(TokenKind::Identifier);
        self.make_token(kind, start_line, start_col, start_offset)
    }

    // =========================================
    // Operators
    // =========================================

    fn scan_operator(&mut self, start_line: u32, start_col: u32, start_offset: u32) -> Token<'ast> {
        let Some(c) = self.cursor.advance() else {
            return self.scan_eof();
        };
        let next = self.cursor.peek();

        let kind = match (c, next) {
            ('(' | '[' | '{', _) => {
                self.brackets.push(c);
                match c {
                    '(' => TokenKind::LeftParen,
                    '[' => TokenKind::LeftBracket,
                    _ => TokenKind::LeftBrace,
                }
            }
            (')' | ']' | '}', _) => {
                let expected = match c {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                if self.brackets.last() == Some(&expected) {
                    self.brackets.pop();
                } else {
                    return self.make_error(LexError::UnmatchedBracket {
                        ch: c,
                        span: Span::new(start_line, start_col, 1),
                    });
                }
                match c {
                    ')' => TokenKind::RightParen,
                    ']' => TokenKind::RightBracket,
                    _ => TokenKind::RightBrace,
                }
            }
            (',', _) => TokenKind::Comma,
            (';', _) => TokenKind::Semicolon,
            ('~', _) => TokenKind::Tilde,

            ('.', Some('.')) if self.cursor.peek_nth(1) == Some('.') => {
                self.cursor.advance();
                self.cursor.advance();
                TokenKind::Ellipsis
            }
            ('.', _) => TokenKind::Dot,

            (':', Some('=')) => {
                self.cursor.advance();
                TokenKind::ColonEqual
            }
            (':', _) => TokenKind::Colon,

            ('+', Some('=')) => {
                self.cursor.advance();
                TokenKind::PlusEqual
            }
            ('+', _) => TokenKind::Plus,

            ('-', Some('=')) => {
                self.cursor.advance();
                TokenKind::MinusEqual
            }
            ('-', Some('>')) => {
                self.cursor.advance();
                TokenKind::Arrow
            }
            ('-', _) => TokenKind::Minus,

            ('*', Some('*')) => {
                self.cursor.advance();
                if self.cursor.eat('=') {
                    TokenKind::StarStarEqual
                } else {
                    TokenKind::StarStar
                }
            }
            ('*', Some('=')) => {
                self.cursor.advance();
                TokenKind::StarEqual
            }
            ('*', _) => TokenKind::Star,

            ('/', Some('/')) => {
                self.cursor.advance();
                if self.cursor.eat('=') {
                    TokenKind::SlashSlashEqual
                } else {
                    TokenKind::SlashSlash
                }
            }
            ('/', Some('=')) => {
                self.cursor.advance();
                TokenKind::SlashEqual
            }
            ('/', _) => TokenKind::Slash,

            ('%', Some('=')) => {
                self.cursor.advance();
                TokenKind::PercentEqual
            }
            ('%', _) => TokenKind::Percent,

            ('@', Some('=')) => {
                self.cursor.advance();
                TokenKind::AtEqual
            }
            ('@', _) => TokenKind::At,

            ('=', Some('=')) => {
                self.cursor.advance();
                TokenKind::EqualEqual
            }
            ('=', _) => TokenKind::Equal,

            ('!', Some('=')) => {
                self.cursor.advance();
                TokenKind::BangEqual
            }

            ('<', Some('=')) => {
                self.cursor.advance();
                TokenKind::LessEqual
            }
            ('<', Some('<')) => {
                self.cursor.advance();
                if self.cursor.eat('=') {
                    TokenKind::LessLessEqual
                } else {
                    TokenKind::LessLess
                }
            }
            ('<', _) => TokenKind::Less,

            ('>', Some('=')) => {
                self.cursor.advance();
                TokenKind::GreaterEqual
            }
            ('>', Some('>')) => {
                self.cursor.advance();
                if self.cursor.eat('=') {
                    TokenKind::GreaterGreaterEqual
                } else {
                    TokenKind::GreaterGreater
                }
            }
            ('>', _) => TokenKind::Greater,

            ('&', Some('=')) => {
                self.cursor.advance();
                TokenKind::AmpEqual
            }
            ('&', _) => TokenKind::Amp,

            ('|', Some('=')) => {
                self.cursor.advance();
                TokenKind::PipeEqual
            }
            ('|', _) => TokenKind::Pipe,

            ('^', Some('=')) => {
                self.cursor.advance();
                TokenKind::CaretEqual
            }
            ('^', _) => TokenKind::Caret,

            _ => {
                let len = self.cursor.offset() - start_offset;
                return self.make_error(LexError::UnexpectedChar {
                    ch: c,
                    span: Span::new(start_line, start_col, len),
                });
            }
        };

        self.make_token(kind, start_line, start_col, start_offset)
    }
}

impl<'src, 'ast> Iterator for Lexer<'src, 'ast> {
    type Item = Token<'ast>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}

fn is_string_prefix(word: &str) -> bool {
    matches!(
        word.to_ascii_lowercase().as_str(),
        "r" | "u" | "b" | "f" | "br" | "rb" | "fr" | "rf"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use TokenKind::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let arena = Bump::new();
        Lexer::new(source, &arena).map(|t| t.kind).collect()
    }

    fn lexemes(source: &str) -> Vec<(TokenKind, String)> {
        let arena = Bump::new();
        Lexer::new(source, &arena)
            .map(|t| (t.kind, t.lexeme.to_string()))
            .collect()
    }

    // =========================================
    // Layout
    // =========================================

    #[test]
    fn empty_source() {
        assert!(kinds("").is_empty());
        assert!(kinds("\n\n   \n# only a comment\n").is_empty());
    }

    #[test]
    fn final_newline_is_synthesized() {
        assert_eq!(kinds("x"), vec![Identifier, Newline]);
        assert_eq!(kinds("x\n"), vec![Identifier, Newline]);
    }

    #[test]
    fn indent_and_dedent() {
        let source = "if x:\n    y\nz\n";
        assert_eq!(
            kinds(source),
            vec![
                If, Identifier, Colon, Newline, Indent, Identifier, Newline, Dedent, Identifier,
                Newline
            ]
        );
    }

    #[test]
    fn nested_blocks_close_at_eof() {
        let source = "def f():\n    while x:\n        pass";
        let tokens = kinds(source);
        assert_eq!(&tokens[tokens.len() - 3..], &[Newline, Dedent, Dedent]);
    }

    #[test]
    fn multiple_dedents_on_one_line() {
        let source = "if a:\n    if b:\n        c\nd\n";
        let tokens = kinds(source);
        let dedents = tokens.iter().filter(|&&k| k == Dedent).count();
        assert_eq!(dedents, 2);
        assert_eq!(tokens.last(), Some(&Newline));
    }

    #[test]
    fn blank_and_comment_lines_do_not_affect_indentation() {
        let source = "if a:\n\n    # note\n    b\n";
        assert_eq!(
            kinds(source),
            vec![If, Identifier, Colon, Newline, Indent, Identifier, Newline, Dedent]
        );
    }

    #[test]
    fn brackets_join_lines() {
        let source = "total = add(1,\n          2)\n";
        assert_eq!(
            kinds(source),
            vec![
                Identifier, Equal, Identifier, LeftParen, IntLiteral, Comma, IntLiteral,
                RightParen, Newline
            ]
        );
    }

    #[test]
    fn backslash_joins_lines() {
        assert_eq!(
            kinds("x = 1 + \\\n    2\n"),
            vec![Identifier, Equal, IntLiteral, Plus, IntLiteral, Newline]
        );
    }

    #[test]
    fn inconsistent_dedent_is_reported() {
        let arena = Bump::new();
        let (_, errors) = Lexer::new("if a:\n        b\n    c\n", &arena).tokenize();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], LexError::InconsistentDedent { .. }));
    }

    // =========================================
    // Literals
    // =========================================

    #[test]
    fn numbers() {
        assert_eq!(
            lexemes("42 3.14 .5 1e10 2.5e-3 0xff 0b1010 0o17 1_000")
                .into_iter()
                .filter(|(k, _)| *k != Newline)
                .collect::<Vec<_>>(),
            vec![
                (IntLiteral, "42".to_string()),
                (FloatLiteral, "3.14".to_string()),
                (FloatLiteral, ".5".to_string()),
                (FloatLiteral, "1e10".to_string()),
                (FloatLiteral, "2.5e-3".to_string()),
                (IntLiteral, "0xff".to_string()),
                (IntLiteral, "0b1010".to_string()),
                (IntLiteral, "0o17".to_string()),
                (IntLiteral, "1_000".to_string()),
            ]
        );
    }

    #[test]
    fn complex_literal_is_an_error() {
        let arena = Bump::new();
        let (tokens, errors) = Lexer::new("3j", &arena).tokenize();
        assert_eq!(tokens[0].kind, Error);
        assert!(matches!(errors[0], LexError::InvalidNumber { .. }));
    }

    #[test]
    fn strings_keep_quotes_and_prefix() {
        assert_eq!(
            lexemes(r#"'a' "b" r'\d' b"x" f"{y}""#)
                .into_iter()
                .filter(|(k, _)| *k == StringLiteral)
                .map(|(_, s)| s)
                .collect::<Vec<_>>(),
            vec!["'a'", "\"b\"", r"r'\d'", "b\"x\"", "f\"{y}\""]
        );
    }

    #[test]
    fn triple_quoted_string_spans_lines() {
        let source = "\"\"\"first\nsecond\"\"\"\nx\n";
        let tokens = lexemes(source);
        assert_eq!(tokens[0], (StringLiteral, "\"\"\"first\nsecond\"\"\"".to_string()));
        assert_eq!(tokens[2].0, Identifier);
    }

    #[test]
    fn escaped_quote_does_not_close_string() {
        let tokens = lexemes(r#"'it\'s'"#);
        assert_eq!(tokens[0], (StringLiteral, r"'it\'s'".to_string()));
    }

    #[test]
    fn unterminated_string() {
        let arena = Bump::new();
        let (tokens, errors) = Lexer::new("'abc\n", &arena).tokenize();
        assert_eq!(tokens[0].kind, Error);
        assert!(matches!(errors[0], LexError::UnterminatedString { .. }));
    }

    // =========================================
    // Keywords and operators
    // =========================================

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(
            kinds("def define not_ None is"),
            vec![Def, Identifier, Identifier, None, Is, Newline]
        );
    }

    #[test]
    fn operators() {
        assert_eq!(
            kinds("** // **= //= -> := != <= >>= ..."),
            vec![
                StarStar,
                SlashSlash,
                StarStarEqual,
                SlashSlashEqual,
                Arrow,
                ColonEqual,
                BangEqual,
                LessEqual,
                GreaterGreaterEqual,
                Ellipsis,
                Newline
            ]
        );
    }

    #[test]
    fn unexpected_character() {
        let arena = Bump::new();
        let (tokens, errors) = Lexer::new("a ? b", &arena).tokenize();
        assert_eq!(tokens[1].kind, Error);
        assert_eq!(
            errors[0],
            LexError::UnexpectedChar {
                ch: '?',
                span: Span::new(1, 3, 1)
            }
        );
    }

    #[test]
    fn unmatched_closing_bracket() {
        let arena = Bump::new();
        let (_, errors) = Lexer::new("x)\n", &arena).tokenize();
        assert!(matches!(errors[0], LexError::UnmatchedBracket { ch: ')', .. }));
    }

    #[test]
    fn spans_are_one_indexed() {
        let arena = Bump::new();
        let tokens: Vec<_> = Lexer::new("x = 10\n", &arena).collect();
        assert_eq!(tokens[0].span, Span::new(1, 1, 1));
        assert_eq!(tokens[2].span, Span::new(1, 5, 2));
    }
}
