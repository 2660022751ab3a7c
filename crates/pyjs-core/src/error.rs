//! Error types shared by every phase of translation.
//!
//! ## Error Hierarchy
//!
//! ```text
//! LexError         - tokenization failures (folded into ParseError)
//! ParseError       - syntax errors, with a ParseErrorKind
//! ParseErrors      - every syntax error found in one source file
//! TranslateError   - semantic failures while emitting JavaScript
//! ```
//!
//! Pre-check diagnostics are plain strings and are wrapped by the facade
//! crate, since they never carry structured data past the service boundary.

use thiserror::Error;

use crate::Span;

// ============================================================================
// Lexer Errors
// ============================================================================

/// Errors raised while turning source text into tokens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("unexpected character '{ch}' at {span}")]
    UnexpectedChar { ch: char, span: Span },

    #[error("unterminated string at {span}")]
    UnterminatedString { span: Span },

    #[error("invalid number at {span}: {detail}")]
    InvalidNumber { span: Span, detail: String },

    /// A dedent landed on a column no enclosing block started at.
    #[error("unindent does not match any outer indentation level at {span}")]
    InconsistentDedent { span: Span },

    #[error("unmatched '{ch}' at {span}")]
    UnmatchedBracket { ch: char, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedChar { span, .. } => *span,
            LexError::UnterminatedString { span } => *span,
            LexError::InvalidNumber { span, .. } => *span,
            LexError::InconsistentDedent { span } => *span,
            LexError::UnmatchedBracket { span, .. } => *span,
        }
    }
}

// ============================================================================
// Parse Errors
// ============================================================================

/// Categories of syntax errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    // Token-level errors
    ExpectedToken,
    UnexpectedToken,
    UnexpectedEof,

    // Expression errors
    ExpectedExpression,
    InvalidExpression,

    // Statement errors
    ExpectedStatement,
    /// A compound statement header was not followed by an indented suite.
    ExpectedBlock,
    UnexpectedIndent,
    InvalidIndentation,
    /// Assignment to something that cannot be assigned to.
    InvalidTarget,

    // Declaration errors
    ExpectedIdentifier,
    InvalidParameters,

    // Lexical errors
    InvalidSyntax,
    InvalidEscapeSequence,
    InvalidLiteral,

    /// Valid Python the parser does not model.
    NotImplemented,
}

impl ParseErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseErrorKind::ExpectedToken => "expected token",
            ParseErrorKind::UnexpectedToken => "unexpected token",
            ParseErrorKind::UnexpectedEof => "unexpected end of file",
            ParseErrorKind::ExpectedExpression => "expected expression",
            ParseErrorKind::InvalidExpression => "invalid expression",
            ParseErrorKind::ExpectedStatement => "expected statement",
            ParseErrorKind::ExpectedBlock => "expected an indented block",
            ParseErrorKind::UnexpectedIndent => "unexpected indent",
            ParseErrorKind::InvalidIndentation => "invalid indentation",
            ParseErrorKind::InvalidTarget => "invalid assignment target",
            ParseErrorKind::ExpectedIdentifier => "expected identifier",
            ParseErrorKind::InvalidParameters => "invalid parameters",
            ParseErrorKind::InvalidSyntax => "invalid syntax",
            ParseErrorKind::InvalidEscapeSequence => "invalid escape sequence",
            ParseErrorKind::InvalidLiteral => "invalid literal",
            ParseErrorKind::NotImplemented => "not implemented",
        }
    }
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A syntax error with location and context.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at {span}: {message}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    pub message: String,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
        }
    }

    pub fn expected_token(span: Span, expected: &str, found: &str) -> Self {
        Self::new(
            ParseErrorKind::ExpectedToken,
            span,
            format!("expected {expected}, found {found}"),
        )
    }

    pub fn unexpected_token(span: Span, token: &str) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedToken,
            span,
            format!("unexpected token: {token}"),
        )
    }

    pub fn expected_identifier(span: Span, found: &str) -> Self {
        Self::new(
            ParseErrorKind::ExpectedIdentifier,
            span,
            format!("expected identifier, found {found}"),
        )
    }

    pub fn expected_expression(span: Span, found: &str) -> Self {
        Self::new(
            ParseErrorKind::ExpectedExpression,
            span,
            format!("expected expression, found {found}"),
        )
    }

    /// Render the error with the offending source line and a caret.
    pub fn display_with_source(&self, source: &str) -> String {
        let mut output = String::new();
        let line = self.span.line;
        let column = self.span.col.max(1);

        output.push_str(&format!("Error at {}:{}: {}\n", line, column, self.kind));
        if !self.message.is_empty() {
            output.push_str(&format!("  {}\n", self.message));
        }

        if let Some(line_text) = source.lines().nth((line as usize).saturating_sub(1)) {
            output.push_str("  |\n");
            output.push_str(&format!("{:>3} | {}\n", line, line_text));
            let indent = " ".repeat(column as usize - 1);
            let pointer = if self.span.len <= 1 {
                "^".to_string()
            } else {
                "^".to_string() + &"~".repeat((self.span.len - 1) as usize)
            };
            output.push_str(&format!("  | {}{}\n", indent, pointer));
        }

        output
    }
}

impl From<LexError> for ParseError {
    fn from(error: LexError) -> Self {
        let kind = match error {
            LexError::InconsistentDedent { .. } => ParseErrorKind::InvalidIndentation,
            LexError::InvalidNumber { .. } => ParseErrorKind::InvalidLiteral,
            _ => ParseErrorKind::InvalidSyntax,
        };
        ParseError::new(kind, error.span(), error.to_string())
    }
}

/// Every syntax error found while parsing one source file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseErrors {
    errors: Vec<ParseError>,
}

impl ParseErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn push(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParseError> {
        self.errors.iter()
    }

    pub fn first(&self) -> Option<&ParseError> {
        self.errors.first()
    }

    pub fn into_vec(self) -> Vec<ParseError> {
        self.errors
    }
}

impl IntoIterator for ParseErrors {
    type Item = ParseError;
    type IntoIter = std::vec::IntoIter<ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParseErrors {
    type Item = &'a ParseError;
    type IntoIter = std::slice::Iter<'a, ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl From<ParseError> for ParseErrors {
    fn from(error: ParseError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl std::fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseErrors {}

// ============================================================================
// Translation Errors
// ============================================================================

/// Semantic failures raised while emitting JavaScript.
///
/// Any of these aborts the whole translation; no partial output is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TranslateError {
    /// A name was referenced without being bound in any active scope.
    #[error("at {span}: '{name}' does not exist in any scope")]
    UnboundName { name: String, span: Span },

    /// An annotated assignment's declared type disagrees with its value.
    #[error("at {span}: type mismatch: declared '{declared}' but value is '{found}'")]
    TypeMismatch {
        declared: String,
        found: String,
        span: Span,
    },

    /// A construct outside the translatable subset.
    #[error("at {span}: unsupported construct: {construct}")]
    UnsupportedConstruct { construct: String, span: Span },
}

impl TranslateError {
    pub fn unsupported(construct: impl Into<String>, span: Span) -> Self {
        TranslateError::UnsupportedConstruct {
            construct: construct.into(),
            span,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            TranslateError::UnboundName { span, .. } => *span,
            TranslateError::TypeMismatch { span, .. } => *span,
            TranslateError::UnsupportedConstruct { span, .. } => *span,
        }
    }

    pub fn is_unbound_name(&self) -> bool {
        matches!(self, TranslateError::UnboundName { .. })
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, TranslateError::TypeMismatch { .. })
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, TranslateError::UnsupportedConstruct { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_error_display() {
        let err = LexError::UnexpectedChar {
            ch: '$',
            span: Span::new(1, 5, 1),
        };
        assert_eq!(err.to_string(), "unexpected character '$' at 1:5");
    }

    #[test]
    fn lex_error_becomes_parse_error() {
        let err: ParseError = LexError::InconsistentDedent {
            span: Span::point(4, 3),
        }
        .into();
        assert_eq!(err.kind, ParseErrorKind::InvalidIndentation);
        assert_eq!(err.span, Span::point(4, 3));
        assert!(err.message.contains("unindent"));
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::expected_token(Span::new(2, 8, 1), "':'", "newline");
        assert_eq!(
            err.to_string(),
            "expected token at 2:8: expected ':', found newline"
        );
    }

    #[test]
    fn parse_error_with_source() {
        let source = "x = 1\nif x\n    pass\n";
        let err = ParseError::expected_token(Span::new(2, 5, 1), "':'", "newline");
        let rendered = err.display_with_source(source);

        assert!(rendered.starts_with("Error at 2:5: expected token\n"));
        assert!(rendered.contains("  2 | if x\n"));
        assert!(rendered.contains("  |     ^\n"));
    }

    #[test]
    fn parse_errors_collection() {
        let mut errors = ParseErrors::new();
        assert!(errors.is_empty());

        errors.push(ParseError::unexpected_token(Span::new(1, 1, 1), "')'"));
        errors.push(ParseError::expected_identifier(Span::new(3, 5, 1), "'('"));

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.first().map(|e| e.span.line), Some(1));
        assert_eq!(errors.to_string().lines().count(), 2);
    }

    #[test]
    fn translate_error_display() {
        let err = TranslateError::UnboundName {
            name: "j".to_string(),
            span: Span::new(3, 11, 1),
        };
        assert_eq!(err.to_string(), "at 3:11: 'j' does not exist in any scope");
        assert!(err.is_unbound_name());

        let err = TranslateError::TypeMismatch {
            declared: "Number".to_string(),
            found: "String".to_string(),
            span: Span::new(1, 1, 1),
        };
        assert_eq!(
            err.to_string(),
            "at 1:1: type mismatch: declared 'Number' but value is 'String'"
        );
    }

    #[test]
    fn translate_error_span() {
        let span = Span::new(7, 2, 6);
        let err = TranslateError::unsupported("import statement", span);
        assert_eq!(err.span(), span);
        assert!(err.is_unsupported());
        assert!(!err.is_type_mismatch());
    }
}
