//! Decoding of string literal tokens.

use pyjs_core::ParseErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StringFlavor {
    Text,
    Bytes,
    Format,
}

/// A decoded string token.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DecodedString {
    pub flavor: StringFlavor,
    pub value: String,
}

/// Split a string token into its prefix flags and body, then process escape
/// sequences unless the literal is raw. F-string bodies are returned as
/// written.
pub(crate) fn decode_string(lexeme: &str) -> Result<DecodedString, (ParseErrorKind, String)> {
    let quote_at = lexeme
        .find(['"', '\''])
        .ok_or((ParseErrorKind::InvalidLiteral, "missing quote".to_string()))?;
    let (prefix, quoted) = lexeme.split_at(quote_at);
    let prefix = prefix.to_ascii_lowercase();

    let raw = prefix.contains('r');
    let flavor = if prefix.contains('b') {
        StringFlavor::Bytes
    } else if prefix.contains('f') {
        StringFlavor::Format
    } else {
        StringFlavor::Text
    };

    let delimiter = if quoted.starts_with("\"\"\"") || quoted.starts_with("'''") {
        3
    } else {
        1
    };
    if quoted.len() < delimiter * 2 {
        return Err((ParseErrorKind::InvalidLiteral, "unterminated string".to_string()));
    }
    let body = &quoted[delimiter..quoted.len() - delimiter];

    let value = if raw || flavor == StringFlavor::Format {
        body.to_string()
    } else {
        unescape(body)?
    };

    Ok(DecodedString { flavor, value })
}

fn unescape(body: &str) -> Result<String, (ParseErrorKind, String)> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let Some(escape) = chars.next() else {
            out.push('\\');
            break;
        };

        match escape {
            '\n' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\x0b'),
            '0'..='7' => {
                let mut value = escape.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.push(char_from(value)?);
            }
            'x' => out.push(hex_escape(&mut chars, 2)?),
            'u' => out.push(hex_escape(&mut chars, 4)?),
            'U' => out.push(hex_escape(&mut chars, 8)?),
            'N' => {
                return Err((
                    ParseErrorKind::NotImplemented,
                    "named unicode escapes are not supported".to_string(),
                ));
            }
            other => {
                // Unknown escapes are kept verbatim, as Python does.
                out.push('\\');
                out.push(other);
            }
        }
    }

    Ok(out)
}

fn hex_escape(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    digits: usize,
) -> Result<char, (ParseErrorKind, String)> {
    let mut value = 0u32;
    for _ in 0..digits {
        let digit = chars.next().and_then(|c| c.to_digit(16)).ok_or((
            ParseErrorKind::InvalidEscapeSequence,
            format!("truncated escape: expected {digits} hex digits"),
        ))?;
        value = value * 16 + digit;
    }
    char_from(value)
}

fn char_from(value: u32) -> Result<char, (ParseErrorKind, String)> {
    char::from_u32(value).ok_or((
        ParseErrorKind::InvalidEscapeSequence,
        format!("escape value {value:#x} is not a valid character"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lexeme: &str) -> String {
        decode_string(lexeme).unwrap().value
    }

    #[test]
    fn plain_quotes() {
        assert_eq!(text("'hello'"), "hello");
        assert_eq!(text("\"hello\""), "hello");
        assert_eq!(text("''"), "");
    }

    #[test]
    fn triple_quotes() {
        assert_eq!(text("'''a\nb'''"), "a\nb");
        assert_eq!(text("\"\"\"say \"hi\"\"\"\""), "say \"hi\"");
    }

    #[test]
    fn escapes() {
        assert_eq!(text(r"'a\tb\n'"), "a\tb\n");
        assert_eq!(text(r"'it\'s'"), "it's");
        assert_eq!(text(r"'\x41é\101'"), "AéA");
        assert_eq!(text(r"'\d'"), r"\d");
    }

    #[test]
    fn line_continuation_inside_string() {
        assert_eq!(text("'ab\\\ncd'"), "abcd");
    }

    #[test]
    fn raw_strings_keep_backslashes() {
        assert_eq!(text(r"r'\n'"), r"\n");
        assert_eq!(text(r"R'\d+'"), r"\d+");
    }

    #[test]
    fn flavors() {
        assert_eq!(decode_string("b'x'").unwrap().flavor, StringFlavor::Bytes);
        assert_eq!(decode_string("rb'x'").unwrap().flavor, StringFlavor::Bytes);
        let fstring = decode_string("f'{a}\\n'").unwrap();
        assert_eq!(fstring.flavor, StringFlavor::Format);
        assert_eq!(fstring.value, "{a}\\n");
    }

    #[test]
    fn bad_escapes() {
        let (kind, _) = decode_string(r"'\x4'").unwrap_err();
        assert_eq!(kind, ParseErrorKind::InvalidEscapeSequence);
        let (kind, _) = decode_string(r"'\N{DASH}'").unwrap_err();
        assert_eq!(kind, ParseErrorKind::NotImplemented);
    }
}
