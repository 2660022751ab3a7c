//! Call translation.
//!
//! Calls to built-ins that still hold their built-in binding are rewritten:
//! - `print(...)` becomes `console.log(...)`
//! - `abs(...)` and `round(...)` become `Math.abs(...)` and `Math.round(...)`
//! - `range(...)` outside a `for` head becomes an `Array.from` expression
//!
//! Calling a class constructs it with `new`. Keyword arguments are grouped
//! into one trailing object literal.

use pyjs_core::{Span, TranslateError};
use pyjs_parser::ast::{Argument, AttributeExpr, CallExpr, Expr};

use super::{Emitted, ExprTranslator, Precedence, Result};
use crate::scope::SymbolKind;

pub(super) fn translate_call(t: &mut ExprTranslator<'_>, call: &CallExpr<'_>) -> Result<Emitted> {
    if let Expr::Attribute(attr) = call.callee
        && let Expr::Call(inner) = attr.value
        && is_super(inner)
    {
        return translate_super_call(t, call, attr);
    }

    if let Expr::Name(name) = call.callee {
        if name.name == "super" && !t.ctx.scopes.is_bound("super") {
            return Err(TranslateError::unsupported(
                "super() outside an attribute call",
                call.span,
            ));
        }

        if t.ctx.scopes.is_builtin(name.name) {
            let rewritten = match name.name {
                "print" => {
                    if call.has_keywords() {
                        return Err(TranslateError::unsupported(
                            "keyword arguments to print",
                            call.span,
                        ));
                    }
                    Some("console.log")
                }
                "abs" => Some("Math.abs"),
                "round" => Some("Math.round"),
                "range" => return range_array(t, call),
                _ => None,
            };
            if let Some(callee) = rewritten {
                let args = translate_arguments(t, call.args)?;
                return Ok(Emitted::new(format!("{callee}({args})"), Precedence::Postfix));
            }
        }

        if !t.ctx.is_receiver(name.name)
            && t.ctx.resolve(name.name, name.span)? == SymbolKind::Class
        {
            let args = translate_arguments(t, call.args)?;
            return Ok(Emitted::new(
                format!("new {}({args})", name.name),
                Precedence::Postfix,
            ));
        }
    }

    let callee = t.operand(call.callee, Precedence::Postfix)?;
    let args = translate_arguments(t, call.args)?;
    Ok(Emitted::new(format!("{callee}({args})"), Precedence::Postfix))
}

/// Whether `call` is a bare `super()`.
pub(super) fn is_super(call: &CallExpr<'_>) -> bool {
    matches!(call.callee, Expr::Name(n) if n.name == "super") && call.args.is_empty()
}

/// `super().__init__(...)` and `super().method(...)`.
fn translate_super_call(
    t: &mut ExprTranslator<'_>,
    call: &CallExpr<'_>,
    attr: &AttributeExpr<'_>,
) -> Result<Emitted> {
    check_super(t, call.span)?;
    let args = translate_arguments(t, call.args)?;
    let code = if attr.attr.name == "__init__" {
        format!("super({args})")
    } else {
        format!("super.{}({args})", attr.attr.name)
    };
    Ok(Emitted::new(code, Precedence::Postfix))
}

/// `super()` is only meaningful inside a method of a class with a base.
pub(super) fn check_super(t: &ExprTranslator<'_>, span: Span) -> Result<()> {
    match t.ctx.class() {
        Some(class) if class.has_base => Ok(()),
        Some(_) => Err(TranslateError::unsupported(
            "super() in a class without a base",
            span,
        )),
        None => Err(TranslateError::unsupported("super() outside a method", span)),
    }
}

/// Render call arguments, grouping keyword arguments into one trailing
/// object literal.
pub(crate) fn translate_arguments(
    t: &mut ExprTranslator<'_>,
    args: &[Argument<'_>],
) -> Result<String> {
    let mut positional = Vec::with_capacity(args.len());
    let mut keywords = Vec::new();

    for arg in args {
        if arg.double_star {
            return Err(TranslateError::unsupported("**kwargs argument", arg.span));
        }
        if matches!(arg.value, Expr::Starred(_)) {
            return Err(TranslateError::unsupported("*args argument", arg.span));
        }

        let value = t.operand(arg.value, Precedence::Assignment)?;
        match arg.name {
            Some(name) => keywords.push(format!("{}: {value}", name.name)),
            None => positional.push(value),
        }
    }

    if !keywords.is_empty() {
        positional.push(format!("{{ {} }}", keywords.join(", ")));
    }
    Ok(positional.join(", "))
}

/// `range(...)` as an array: `Array.from({ length: n }, (_, i) => ...)`.
pub(super) fn range_array(t: &mut ExprTranslator<'_>, call: &CallExpr<'_>) -> Result<Emitted> {
    let bounds = range_bounds(t, call)?;
    let code = match bounds.as_slice() {
        [stop] => format!("Array.from({{ length: {stop} }}, (_, i) => i)"),
        [start, stop] => {
            let index = fresh_index(&[start]);
            format!("Array.from({{ length: {stop} - {start} }}, (_, {index}) => {start} + {index})")
        }
        [start, stop, step] => {
            let index = fresh_index(&[start, step]);
            format!(
                "Array.from({{ length: Math.max(0, Math.ceil(({stop} - {start}) / {step})) }}, \
                 (_, {index}) => {start} + {index} * {step})"
            )
        }
        _ => {
            return Err(TranslateError::unsupported(
                format!("range() with {} arguments", bounds.len()),
                call.span,
            ));
        }
    };
    Ok(Emitted::new(code, Precedence::Postfix))
}

/// Positional `range` arguments, each rendered tight enough to sit inside
/// arithmetic.
fn range_bounds(t: &mut ExprTranslator<'_>, call: &CallExpr<'_>) -> Result<Vec<String>> {
    if call.has_keywords() || call.args.iter().any(|a| matches!(a.value, Expr::Starred(_))) {
        return Err(TranslateError::unsupported(
            "range() with keyword or starred arguments",
            call.span,
        ));
    }
    call.args
        .iter()
        .map(|arg| t.operand(arg.value, Precedence::Multiplicative.next()))
        .collect()
}

/// An index parameter name that does not occur in `parts`.
fn fresh_index(parts: &[&String]) -> &'static str {
    const CANDIDATES: &[&str] = &["i", "j", "k", "idx", "index"];
    CANDIDATES
        .iter()
        .copied()
        .find(|name| !parts.iter().any(|part| mentions(part, name)))
        .unwrap_or("_index")
}

fn mentions(code: &str, name: &str) -> bool {
    code.split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
        .any(|word| word == name)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{translate, translate_with};
    use super::*;

    #[test]
    fn print_becomes_console_log() {
        assert_eq!(translate(&[], "print()"), "console.log()");
        assert_eq!(translate(&["a", "b"], "print(a, b)"), "console.log(a, b)");
        assert!(
            translate_with(&["a"], "print(a, sep='')")
                .unwrap_err()
                .is_unsupported()
        );
    }

    #[test]
    fn math_builtins() {
        assert_eq!(translate(&["x"], "abs(x)"), "Math.abs(x)");
        assert_eq!(translate(&["x"], "round(x)"), "Math.round(x)");
    }

    #[test]
    fn user_functions_pass_through() {
        assert_eq!(translate(&["f", "a"], "f(a, 1)"), "f(a, 1)");
        assert_eq!(translate(&["obj"], "obj.method()"), "obj.method()");
        assert!(translate_with(&[], "g()").unwrap_err().is_unbound_name());
    }

    #[test]
    fn keyword_arguments_become_trailing_object() {
        assert_eq!(
            translate(&["f", "x"], "f(x, a=1, b=2)"),
            "f(x, { a: 1, b: 2 })"
        );
    }

    #[test]
    fn splat_arguments_are_unsupported() {
        assert!(translate_with(&["f", "xs"], "f(*xs)").unwrap_err().is_unsupported());
        assert!(translate_with(&["f", "kw"], "f(**kw)").unwrap_err().is_unsupported());
    }

    #[test]
    fn range_outside_a_loop() {
        assert_eq!(translate(&["n"], "range(n)"), "Array.from({ length: n }, (_, i) => i)");
        assert_eq!(
            translate(&["i"], "range(i, 5)"),
            "Array.from({ length: 5 - i }, (_, j) => i + j)"
        );
        assert!(translate_with(&[], "range()").unwrap_err().is_unsupported());
    }

    #[test]
    fn super_outside_a_method() {
        let err = translate_with(&[], "super().__init__()").unwrap_err();
        assert!(err.is_unsupported());
    }

    #[test]
    fn fresh_index_avoids_collisions() {
        let start = "i".to_string();
        let step = "j + k".to_string();
        assert_eq!(fresh_index(&[&start, &step]), "idx");
        let plain = "start".to_string();
        assert_eq!(fresh_index(&[&plain]), "i");
    }
}
