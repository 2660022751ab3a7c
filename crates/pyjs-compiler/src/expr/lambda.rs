//! Lambdas and parameter lists.
//!
//! Parameter rendering is shared with function and method definitions.

use pyjs_core::TranslateError;
use pyjs_parser::ast::{LambdaExpr, Param, ParamKind};

use super::identifiers::check_identifier;
use super::{Emitted, ExprTranslator, Precedence, Result};
use crate::context::TranslationContext;
use crate::scope::SymbolKind;

/// Render a parameter list.
///
/// Defaults are translated in the current scope, before the parameters
/// themselves are declared, matching when Python evaluates them.
pub fn translate_params(t: &mut ExprTranslator<'_>, params: &[Param<'_>]) -> Result<Vec<String>> {
    let mut rendered = Vec::with_capacity(params.len());
    for param in params {
        let name = param.name.name;
        match param.kind {
            ParamKind::Normal => {
                check_identifier(name, param.name.span)?;
                match param.default {
                    Some(default) => {
                        let value = t.operand(default, Precedence::Assignment)?;
                        rendered.push(format!("{name} = {value}"));
                    }
                    None => rendered.push(name.to_string()),
                }
            }
            ParamKind::VarArgs => {
                check_identifier(name, param.name.span)?;
                rendered.push(format!("...{name}"));
            }
            ParamKind::KwArgs => {
                return Err(TranslateError::unsupported("**kwargs parameter", param.span));
            }
            ParamKind::KeywordOnlyMarker => {
                return Err(TranslateError::unsupported(
                    "keyword-only parameters",
                    param.span,
                ));
            }
            ParamKind::PositionalOnlyMarker => {
                return Err(TranslateError::unsupported(
                    "positional-only parameters",
                    param.span,
                ));
            }
        }
    }
    Ok(rendered)
}

/// Bind every parameter as a variable of the current scope.
pub fn declare_params(ctx: &mut TranslationContext, params: &[Param<'_>]) {
    for param in params {
        ctx.declare(param.name.name, SymbolKind::Variable);
    }
}

pub(super) fn translate_lambda(
    t: &mut ExprTranslator<'_>,
    lambda: &LambdaExpr<'_>,
) -> Result<Emitted> {
    let params = translate_params(t, lambda.params)?;

    t.ctx.scopes.enter();
    for param in lambda.params {
        t.ctx.scopes.shadow(param.name.name, SymbolKind::Variable);
    }
    let body = t.translate(lambda.body);
    t.ctx.scopes.exit();

    let body = body?;
    let body = if body.code.starts_with('{') {
        format!("({})", body.code)
    } else {
        body.wrap_below(Precedence::Assignment)
    };
    Ok(Emitted::new(
        format!("({}) => {body}", params.join(", ")),
        Precedence::Assignment,
    ))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{translate, translate_with};

    #[test]
    fn arrow_functions() {
        assert_eq!(translate(&[], "lambda x: x * 2"), "(x) => x * 2");
        assert_eq!(translate(&[], "lambda: 0"), "() => 0");
        assert_eq!(translate(&[], "lambda a, b=1: a + b"), "(a, b = 1) => a + b");
        assert_eq!(translate(&[], "lambda *rest: rest"), "(...rest) => rest");
    }

    #[test]
    fn parameters_are_scoped_to_the_body() {
        assert!(translate_with(&[], "(lambda x: x, x)").unwrap_err().is_unbound_name());
    }

    #[test]
    fn parameters_shadow_outer_names() {
        assert_eq!(translate(&["x"], "(lambda x: x + 1, x)"), "[(x) => x + 1, x]");
    }

    #[test]
    fn object_bodies_are_wrapped() {
        assert_eq!(translate(&[], "lambda k: {'key': k}"), "(k) => ({ \"key\": k })");
    }

    #[test]
    fn lambda_as_an_argument() {
        assert_eq!(
            translate(&["xs"], "xs.map(lambda v: v + 1)"),
            "xs.map((v) => v + 1)"
        );
    }
}
