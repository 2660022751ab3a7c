//! pyjs - translate a subset of Python into JavaScript.
//!
//! This crate ties the workspace together:
//! - [`translate`] parses and translates source text in one call
//! - [`check`] runs the static pre-check and returns pyflakes-style lines
//! - [`service`] exposes both as an HTTP `POST /compile` endpoint
//!
//! # Example
//!
//! ```
//! let js = pyjs::translate("for i in range(3):\n    print(i)\n").unwrap();
//! assert_eq!(js, "for (let i = 0; i < 3; i += 1) {\n    console.log(i);\n}\n");
//! ```

pub mod service;

use bumpalo::Bump;
use thiserror::Error;

pub use pyjs_compiler::precheck::Diagnostic;
pub use pyjs_compiler::{DeclKind, TranslateOptions, TranslatedUnit, Translator};
pub use pyjs_core::{ParseError, ParseErrorKind, ParseErrors, Span, TranslateError};
pub use pyjs_parser::Parser;

/// Everything that can go wrong between source text and JavaScript.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Parse(#[from] ParseErrors),

    #[error(transparent)]
    Translate(#[from] TranslateError),

    /// The pre-check rejected the source; translation was not attempted.
    #[error("{}", diagnostics.join("\n"))]
    PreCheck { diagnostics: Vec<String> },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Parse and translate `source` with default options.
pub fn translate(source: &str) -> Result<String> {
    translate_with(source, TranslateOptions::default())
}

/// Parse and translate `source`.
pub fn translate_with(source: &str, options: TranslateOptions) -> Result<String> {
    let arena = Bump::new();
    let module = Parser::parse(source, &arena)?;
    Ok(Translator::with_options(options).translate(&module)?)
}

/// Run the pre-check. Empty means no issues.
pub fn check(source: &str) -> Vec<String> {
    pyjs_compiler::precheck::check(source)
}

/// Pre-check, then translate. Diagnostics become [`Error::PreCheck`].
pub fn check_and_translate(source: &str, options: TranslateOptions) -> Result<String> {
    let diagnostics = check(source);
    if !diagnostics.is_empty() {
        return Err(Error::PreCheck { diagnostics });
    }
    translate_with(source, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_reports_each_error_kind() {
        assert!(matches!(translate("x = (\n"), Err(Error::Parse(_))));
        assert!(matches!(translate("print(y)\n"), Err(Error::Translate(_))));
    }

    #[test]
    fn pre_check_blocks_translation() {
        let err = check_and_translate("print(y)\n", TranslateOptions::default()).unwrap_err();
        match err {
            Error::PreCheck { diagnostics } => {
                assert_eq!(diagnostics, vec!["<input>:1:7: undefined name 'y'".to_string()]);
            }
            other => panic!("expected pre-check failure, got {other:?}"),
        }
    }

    #[test]
    fn pre_check_error_displays_every_line() {
        let err = Error::PreCheck {
            diagnostics: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(err.to_string(), "a\nb");
    }
}
