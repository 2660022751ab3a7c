//! Plain, annotated and augmented assignment.

use pyjs_core::TranslateError;
use pyjs_parser::ast::{
    AnnAssignStmt, AssignStmt, AugAssignStmt, BinaryOp, Expr, Ident, LiteralKind,
};

use super::{Result, StmtTranslator};
use crate::expr::{Precedence, check_identifier, is_negative_literal};
use crate::maps::{binary_op, literal_type, type_tag};
use crate::scope::SymbolKind;

impl StmtTranslator<'_> {
    /// `name = value` declares `name`; attribute and subscript targets are
    /// assigned in place.
    pub(super) fn translate_assign<'ast>(
        &mut self,
        assign: &AssignStmt<'ast>,
    ) -> Result<Vec<String>> {
        let [target] = assign.targets else {
            return Err(TranslateError::unsupported(
                "assignment to several targets",
                assign.span,
            ));
        };
        let value = self.expr().code(assign.value)?;
        let line = self.assignment(target, value)?;
        Ok(vec![line])
    }

    /// `name: T = value` checks literal values against the annotation, then
    /// behaves like a plain assignment.
    pub(super) fn translate_ann_assign<'ast>(
        &mut self,
        ann: &AnnAssignStmt<'ast>,
    ) -> Result<Vec<String>> {
        let Some(value) = ann.value else {
            let Some(name) = ann.target.as_name() else {
                return Err(TranslateError::unsupported(
                    "annotation without a value on an attribute or item",
                    ann.span,
                ));
            };
            check_identifier(name.name, name.span)?;
            return Ok(vec![self.declare_variable(name, None)]);
        };

        check_annotation(ann.annotation, value)?;
        let value = self.expr().code(value)?;
        let line = self.assignment(ann.target, value)?;
        Ok(vec![line])
    }

    /// `x op= v`; the target must already be bound.
    pub(super) fn translate_aug_assign<'ast>(
        &mut self,
        aug: &AugAssignStmt<'ast>,
    ) -> Result<Vec<String>> {
        let target = match aug.target.unparenthesized() {
            Expr::Name(_) => self.expr().code(aug.target)?,
            Expr::Attribute(_) | Expr::Subscript(_) => self.expr().target(aug.target)?,
            _ => {
                return Err(TranslateError::unsupported(
                    "augmented assignment to this kind of target",
                    aug.span,
                ));
            }
        };

        let line = match aug.op {
            BinaryOp::Pow => {
                let value = self.expr().code(aug.value)?;
                format!("{target} = Math.pow({target}, {value});")
            }
            op => {
                let Some(symbol) = binary_op(op) else {
                    return Err(TranslateError::unsupported(
                        format!("operator '{}='", op.as_str()),
                        aug.span,
                    ));
                };
                let value = self.expr().operand(aug.value, Precedence::Assignment)?;
                format!("{target} {symbol}= {value};")
            }
        };
        Ok(vec![line])
    }

    /// One assignment line for an already translated value.
    fn assignment<'ast>(&mut self, target: &Expr<'ast>, value: String) -> Result<String> {
        match target.unparenthesized() {
            Expr::Name(name) => {
                check_identifier(name.name, name.span)?;
                Ok(self.declare_variable(*name, Some(value)))
            }
            Expr::Tuple(_) | Expr::List(_) => Err(TranslateError::unsupported(
                "destructuring assignment",
                target.span(),
            )),
            Expr::Starred(_) => Err(TranslateError::unsupported(
                "starred assignment",
                target.span(),
            )),
            _ => {
                let target = self.expr().target(target)?;
                Ok(format!("{target} = {value};"))
            }
        }
    }

    /// Bind `name` as a variable, with `let` unless the current block can
    /// already see a declaration of it.
    fn declare_variable(&mut self, name: Ident<'_>, value: Option<String>) -> String {
        let fresh = !self.ctx.is_let_bound(name.name);
        self.ctx.declare(name.name, SymbolKind::Variable);
        self.ctx.record_let(name.name);

        match (fresh, value) {
            (true, Some(value)) => format!("let {} = {value};", name.name),
            (true, None) => format!("let {};", name.name),
            (false, Some(value)) => format!("{} = {value};", name.name),
            (false, None) => format!("{} = undefined;", name.name),
        }
    }
}

/// Fail with [`TranslateError::TypeMismatch`] when both the annotation and a
/// literal value have known types that disagree.
pub(super) fn check_annotation(annotation: &Expr<'_>, value: &Expr<'_>) -> Result<()> {
    let declared = match annotation.unparenthesized() {
        Expr::Name(ident) => ident.name,
        Expr::Literal(lit) if lit.kind == LiteralKind::None => "None",
        _ => return Ok(()),
    };
    let Some(declared_tag) = type_tag(declared) else {
        return Ok(());
    };

    let literal = match value.unparenthesized() {
        Expr::Literal(lit) => lit.kind,
        Expr::Unary(un) if is_negative_literal(value) => match un.operand {
            Expr::Literal(lit) => lit.kind,
            _ => return Ok(()),
        },
        _ => return Ok(()),
    };
    let Some((found, found_tag)) = literal_type(&literal) else {
        return Ok(());
    };

    if declared_tag == found_tag {
        Ok(())
    } else {
        Err(TranslateError::TypeMismatch {
            declared: declared.to_string(),
            found: found.to_string(),
            span: value.span(),
        })
    }
}
