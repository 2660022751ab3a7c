//! Literal translation.

use pyjs_core::TranslateError;
use pyjs_parser::ast::{LiteralExpr, LiteralKind};

use super::{Emitted, Result};

pub(super) fn translate_literal(lit: &LiteralExpr<'_>) -> Result<Emitted> {
    let code = match lit.kind {
        LiteralKind::Int(raw) | LiteralKind::Float(raw) => raw.to_string(),
        LiteralKind::Str(text) => quote(text),
        LiteralKind::Bool(true) => "true".to_string(),
        LiteralKind::Bool(false) => "false".to_string(),
        LiteralKind::None => "null".to_string(),
        LiteralKind::Bytes(_) => {
            return Err(TranslateError::unsupported("bytes literal", lit.span));
        }
        LiteralKind::FString(_) => {
            return Err(TranslateError::unsupported("f-string", lit.span));
        }
        LiteralKind::Ellipsis => {
            return Err(TranslateError::unsupported("Ellipsis", lit.span));
        }
    };
    Ok(Emitted::primary(code))
}

/// Render `text` as a double-quoted JavaScript string literal.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\u{b}' => out.push_str("\\v"),
            '\0' => out.push_str("\\x00"),
            '\u{2028}' | '\u{2029}' => out.push_str(&format!("\\u{:04x}", c as u32)),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{translate, translate_with};
    use super::*;

    #[test]
    fn keywords() {
        assert_eq!(translate(&[], "True"), "true");
        assert_eq!(translate(&[], "False"), "false");
        assert_eq!(translate(&[], "None"), "null");
    }

    #[test]
    fn numbers_are_verbatim() {
        assert_eq!(translate(&[], "42"), "42");
        assert_eq!(translate(&[], "3.14"), "3.14");
        assert_eq!(translate(&[], "0xff"), "0xff");
        assert_eq!(translate(&[], "1e-3"), "1e-3");
    }

    #[test]
    fn strings_are_requoted() {
        assert_eq!(translate(&[], "'hello'"), "\"hello\"");
        assert_eq!(translate(&[], "'say \"hi\"'"), "\"say \\\"hi\\\"\"");
        assert_eq!(translate(&[], "'a' 'b'"), "\"ab\"");
        assert_eq!(translate(&[], "'line\\n'"), "\"line\\n\"");
    }

    #[test]
    fn quote_escapes_control_characters() {
        assert_eq!(quote("a\tb"), "\"a\\tb\"");
        assert_eq!(quote("back\\slash"), "\"back\\\\slash\"");
        assert_eq!(quote("\u{1}"), "\"\\u0001\"");
        assert_eq!(quote("\u{2028}"), "\"\\u2028\"");
        assert_eq!(quote("é"), "\"é\"");
    }

    #[test]
    fn unsupported_literals() {
        assert!(translate_with(&[], "b'raw'").unwrap_err().is_unsupported());
        assert!(translate_with(&[], "f'{x}'").unwrap_err().is_unsupported());
        assert!(translate_with(&[], "...").unwrap_err().is_unsupported());
    }
}
