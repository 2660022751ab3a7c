//! Class definitions.
//!
//! ```text
//! class Dog(Animal):                 class Dog extends Animal {
//!     legs = 4                           static legs = 4;
//!     def __init__(self, name):          constructor(name) {
//!         super().__init__(name)             super(name);
//!     def speak(self):                   }
//!         return self.name               speak() {
//!                                            return this.name;
//!                                        }
//!                                    }
//! ```

use pyjs_core::TranslateError;
use pyjs_parser::ast::{AnnAssignStmt, AssignStmt, ClassDef, Expr, FunctionDef, ParamKind, Stmt};

use super::assign::check_annotation;
use super::block::strip_docstring;
use super::{Result, StmtTranslator};
use crate::context::ClassContext;
use crate::expr::{Precedence, check_identifier};
use crate::scope::SymbolKind;

impl StmtTranslator<'_> {
    pub(super) fn translate_class<'ast>(&mut self, class: &ClassDef<'ast>) -> Result<Vec<String>> {
        if let Some(decorator) = class.decorators.first() {
            return Err(TranslateError::unsupported("decorator", decorator.span()));
        }
        let name = class.name.name;
        check_identifier(name, class.name.span)?;

        let base = self.class_base(class)?;
        self.ctx.declare_block_scoped(name, SymbolKind::Class);

        let context = ClassContext {
            name: name.to_string(),
            has_base: base.is_some(),
        };
        self.ctx.scopes.enter();
        let members = self.class_members(class.body.stmts, &context);
        self.ctx.scopes.exit();
        let members = self.indented(members?);

        let header = match base {
            Some(base) => format!("class {name} extends {base}"),
            None => format!("class {name}"),
        };
        Ok(self.braced(header, members))
    }

    /// The single base class, if any. `object` counts as no base.
    fn class_base<'ast>(&mut self, class: &ClassDef<'ast>) -> Result<Option<String>> {
        let mut bases = Vec::with_capacity(class.bases.len());
        for arg in class.bases {
            if arg.name.is_some() || arg.double_star {
                return Err(TranslateError::unsupported("class keyword argument", arg.span));
            }
            if matches!(arg.value, Expr::Starred(_)) {
                return Err(TranslateError::unsupported("starred base class", arg.span));
            }
            bases.push(arg.value);
        }

        match bases.as_slice() {
            [] => Ok(None),
            [base] => match base.unparenthesized() {
                Expr::Name(ident)
                    if ident.name == "object" && !self.ctx.scopes.is_bound("object") =>
                {
                    Ok(None)
                }
                Expr::Name(ident) => self.exception_name(ident).map(Some),
                _ => self.expr().operand(base, Precedence::Postfix).map(Some),
            },
            _ => Err(TranslateError::unsupported("multiple inheritance", class.span)),
        }
    }

    fn class_members<'ast>(
        &mut self,
        stmts: &[Stmt<'ast>],
        class: &ClassContext,
    ) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        for stmt in strip_docstring(stmts) {
            match stmt {
                Stmt::Pass(_) => {}
                Stmt::FunctionDef(def) => lines.extend(self.translate_method(def, class)?),
                Stmt::Assign(assign) => lines.push(self.static_field(assign)?),
                Stmt::AnnAssign(ann) => lines.push(self.static_annotated_field(ann)?),
                other => {
                    return Err(TranslateError::unsupported(
                        "statement in a class body",
                        other.span(),
                    ));
                }
            }
        }
        Ok(lines)
    }

    /// Methods drop their receiver parameter, which is spelled `this` in the
    /// body. `__init__` becomes the constructor.
    fn translate_method<'ast>(
        &mut self,
        def: &FunctionDef<'ast>,
        class: &ClassContext,
    ) -> Result<Vec<String>> {
        if let Some(decorator) = def.decorators.first() {
            return Err(TranslateError::unsupported("decorator", decorator.span()));
        }
        let Some((receiver, params)) = def.params.split_first() else {
            return Err(TranslateError::unsupported(
                "method without a receiver parameter",
                def.span,
            ));
        };
        if receiver.kind != ParamKind::Normal || receiver.default.is_some() {
            return Err(TranslateError::unsupported(
                "method without a receiver parameter",
                receiver.span,
            ));
        }

        let name = match def.name.name {
            "__init__" => "constructor",
            name => name,
        };

        let saved = self.ctx.enter_method(class.clone(), receiver.name.name);
        let callable = self.callable(params, def.body.stmts);
        self.ctx.leave_method(saved);
        let (params, body) = callable?;

        Ok(self.braced(format!("{name}({})", params.join(", ")), body))
    }

    fn static_field<'ast>(&mut self, assign: &AssignStmt<'ast>) -> Result<String> {
        let [target] = assign.targets else {
            return Err(TranslateError::unsupported(
                "assignment to several targets",
                assign.span,
            ));
        };
        let value = self.expr().code(assign.value)?;
        self.static_line(target, Some(value))
    }

    fn static_annotated_field<'ast>(&mut self, ann: &AnnAssignStmt<'ast>) -> Result<String> {
        let value = match ann.value {
            Some(value) => {
                check_annotation(ann.annotation, value)?;
                Some(self.expr().code(value)?)
            }
            None => None,
        };
        self.static_line(ann.target, value)
    }

    fn static_line<'ast>(&mut self, target: &Expr<'ast>, value: Option<String>) -> Result<String> {
        let Some(ident) = target.as_name() else {
            return Err(TranslateError::unsupported(
                "class attribute that is not a plain name",
                target.span(),
            ));
        };
        check_identifier(ident.name, ident.span)?;
        self.ctx.declare(ident.name, SymbolKind::Variable);

        Ok(match value {
            Some(value) => format!("static {} = {value};", ident.name),
            None => format!("static {};", ident.name),
        })
    }
}
