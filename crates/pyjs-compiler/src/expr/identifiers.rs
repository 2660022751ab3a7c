//! Name references.

use pyjs_core::{Span, TranslateError};
use pyjs_parser::ast::Ident;

use super::{Emitted, ExprTranslator, Result};

/// JavaScript reserved words that are ordinary identifiers in Python.
const RESERVED: &[&str] = &[
    "arguments",
    "case",
    "catch",
    "const",
    "debugger",
    "default",
    "delete",
    "do",
    "enum",
    "eval",
    "export",
    "extends",
    "function",
    "implements",
    "instanceof",
    "interface",
    "let",
    "new",
    "package",
    "private",
    "protected",
    "public",
    "static",
    "super",
    "switch",
    "this",
    "throw",
    "typeof",
    "var",
    "void",
];

/// Reject names that cannot be spelled as JavaScript identifiers.
pub fn check_identifier(name: &str, span: Span) -> Result<()> {
    if RESERVED.contains(&name) {
        return Err(TranslateError::unsupported(
            format!("identifier '{name}' is reserved in JavaScript"),
            span,
        ));
    }
    Ok(())
}

pub(super) fn translate_name(t: &mut ExprTranslator<'_>, ident: &Ident<'_>) -> Result<Emitted> {
    if t.ctx.is_receiver(ident.name) {
        return Ok(Emitted::primary("this"));
    }
    if t.ctx.is_hidden_receiver(ident.name) && !t.ctx.scopes.is_bound(ident.name) {
        return Err(TranslateError::unsupported(
            format!("method receiver '{}' inside a nested function", ident.name),
            ident.span,
        ));
    }
    t.ctx.resolve(ident.name, ident.span)?;
    Ok(Emitted::primary(ident.name))
}
