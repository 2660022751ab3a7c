//! Displays and list comprehensions.

use pyjs_core::TranslateError;
use pyjs_parser::ast::{DictExpr, Expr, ListCompExpr, LiteralKind, SequenceExpr};

use super::calls::range_array;
use super::identifiers::check_identifier;
use super::literals::quote;
use super::{Emitted, ExprTranslator, Precedence, Result};
use crate::scope::SymbolKind;

fn elements(t: &mut ExprTranslator<'_>, seq: &SequenceExpr<'_>) -> Result<String> {
    let items = seq
        .elements
        .iter()
        .map(|e| t.operand(e, Precedence::Assignment))
        .collect::<Result<Vec<_>>>()?;
    Ok(items.join(", "))
}

/// Lists and tuples both become arrays.
pub(super) fn translate_array(
    t: &mut ExprTranslator<'_>,
    seq: &SequenceExpr<'_>,
) -> Result<Emitted> {
    Ok(Emitted::primary(format!("[{}]", elements(t, seq)?)))
}

pub(super) fn translate_set(t: &mut ExprTranslator<'_>, seq: &SequenceExpr<'_>) -> Result<Emitted> {
    Ok(Emitted::new(
        format!("new Set([{}])", elements(t, seq)?),
        Precedence::Postfix,
    ))
}

pub(super) fn translate_dict(t: &mut ExprTranslator<'_>, dict: &DictExpr<'_>) -> Result<Emitted> {
    if dict.entries.is_empty() {
        return Ok(Emitted::primary("{}"));
    }

    let mut entries = Vec::with_capacity(dict.entries.len());
    for entry in dict.entries {
        let key = match entry.key.unparenthesized() {
            Expr::Literal(lit) => match lit.kind {
                LiteralKind::Str(text) => quote(text),
                LiteralKind::Int(raw) | LiteralKind::Float(raw) => raw.to_string(),
                _ => format!("[{}]", t.code(&entry.key)?),
            },
            _ => format!("[{}]", t.code(&entry.key)?),
        };
        let value = t.operand(&entry.value, Precedence::Assignment)?;
        entries.push(format!("{key}: {value}"));
    }
    Ok(Emitted::primary(format!("{{ {} }}", entries.join(", "))))
}

/// `[e for x in xs if c]` becomes `xs.filter((x) => c).map((x) => e)`.
///
/// The `.map` is left out when it would return the loop variable unchanged
/// after a filter.
pub(super) fn translate_list_comp(
    t: &mut ExprTranslator<'_>,
    comp: &ListCompExpr<'_>,
) -> Result<Emitted> {
    let [generator] = comp.generators else {
        return Err(TranslateError::unsupported(
            "list comprehension with several 'for' clauses",
            comp.span,
        ));
    };
    let Some(target) = generator.target.as_name() else {
        return Err(TranslateError::unsupported(
            "list comprehension with a destructuring target",
            generator.target.span(),
        ));
    };
    check_identifier(target.name, target.span)?;

    let iterable = match t.builtin_range(generator.iter) {
        Some(call) => range_array(t, call)?.code,
        None => t.operand(generator.iter, Precedence::Postfix)?,
    };

    t.ctx.scopes.enter();
    t.ctx.scopes.shadow(target.name, SymbolKind::Variable);
    let parts = comprehension_parts(t, comp.element, generator.conditions);
    t.ctx.scopes.exit();
    let (element, filter) = parts?;

    let var = target.name;
    let mut code = iterable;
    if let Some(filter) = &filter {
        code.push_str(&format!(".filter(({var}) => {filter})"));
    }
    let identity = comp.element.as_name().is_some_and(|n| n.name == var);
    if !(identity && filter.is_some()) {
        code.push_str(&format!(".map(({var}) => {element})"));
    }
    Ok(Emitted::new(code, Precedence::Postfix))
}

/// Element and joined filter conditions, translated with the loop variable
/// in scope.
fn comprehension_parts(
    t: &mut ExprTranslator<'_>,
    element: &Expr<'_>,
    conditions: &[Expr<'_>],
) -> Result<(String, Option<String>)> {
    let element = t.translate(element)?;
    let element = if element.code.starts_with('{') {
        format!("({})", element.code)
    } else {
        element.wrap_below(Precedence::Assignment)
    };

    let filter = match conditions {
        [] => None,
        [single] => Some(t.operand(single, Precedence::Assignment)?),
        several => {
            let parts = several
                .iter()
                .map(|c| t.operand(c, Precedence::LogicalAnd))
                .collect::<Result<Vec<_>>>()?;
            Some(parts.join(" && "))
        }
    };
    Ok((element, filter))
}
