//! Python to JavaScript translator.
//!
//! Turns a parsed [`Module`] into JavaScript source text in one pass.
//!
//! ## Architecture
//!
//! - **Translation**: every top-level statement is translated in order
//!   against a fresh [`TranslationContext`], producing one tagged fragment
//! - **Reordering**: class fragments are emitted first, then functions, then
//!   all other code
//!
//! ## Modules
//!
//! - [`context`]: Per-translation state (scopes, enclosing class, handlers)
//! - [`expr`]: Expression translator with precedence-aware parenthesization
//! - [`maps`]: Operator, type and exception name tables
//! - [`precheck`]: Static checks in pyflakes format
//! - [`scope`]: Lexical scope stack
//! - [`stmt`]: Statement translator for control flow and declarations
//! - [`unit`]: Top-level fragments and declaration reordering

pub mod context;
pub mod expr;
pub mod maps;
pub mod precheck;
pub mod scope;
pub mod stmt;
pub mod unit;

pub use context::{ClassContext, MethodState, TranslateOptions, TranslationContext};
pub use expr::{Emitted, ExprTranslator, Precedence};
pub use precheck::Diagnostic;
pub use scope::{ScopeStack, SymbolKind};
pub use stmt::StmtTranslator;
pub use unit::{DeclKind, Fragment, TranslatedUnit};

// Re-export TranslateError from core for convenience
pub use pyjs_core::TranslateError;

use pyjs_parser::ast::Module;
use tracing::debug;

/// The main translator entry point.
///
/// # Example
///
/// ```
/// use bumpalo::Bump;
/// use pyjs_compiler::Translator;
/// use pyjs_parser::Parser;
///
/// let arena = Bump::new();
/// let module = Parser::parse("x = 5\ndef f():\n    pass\n", &arena).unwrap();
/// let js = Translator::new().translate(&module).unwrap();
/// assert_eq!(js, "function f() {}\nlet x = 5;\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Translator {
    options: TranslateOptions,
}

impl Translator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TranslateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TranslateOptions {
        &self.options
    }

    /// Translate a whole module. The first error aborts the translation.
    pub fn translate(&self, module: &Module<'_>) -> Result<String, TranslateError> {
        #[cfg(feature = "profiling")]
        profiling::scope!("Translator::translate");

        let unit = self.translate_unit(module)?;
        Ok(unit.reorder().render())
    }

    /// Translate a module into tagged fragments in source order.
    pub fn translate_unit(&self, module: &Module<'_>) -> Result<TranslatedUnit, TranslateError> {
        let mut ctx = TranslationContext::new(self.options.clone());
        let mut translator = StmtTranslator::new(&mut ctx);
        let mut unit = TranslatedUnit::new();

        for stmt in module.body() {
            let (kind, lines) = translator.translate_tagged(stmt)?;
            debug!(line = stmt.span().line, ?kind, "translated statement");
            if lines.is_empty() {
                continue;
            }
            unit.push(kind, lines.join("\n"));
        }

        Ok(unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use pyjs_parser::Parser;

    fn translate(source: &str) -> Result<String, TranslateError> {
        let arena = Bump::new();
        let module = Parser::parse(source, &arena).expect("test source should parse");
        Translator::new().translate(&module)
    }

    #[test]
    fn empty_module() {
        assert_eq!(translate("").unwrap(), "");
        assert_eq!(translate("pass\n").unwrap(), "");
    }

    #[test]
    fn simple_assignment() {
        assert_eq!(translate("x = 5\n").unwrap(), "let x = 5;\n");
    }

    #[test]
    fn declarations_move_to_the_front() {
        let source = "\
a = 1
class A:
    pass
def f():
    return a
b = 2
";
        assert_eq!(
            translate(source).unwrap(),
            "class A {}\nfunction f() {\n    return a;\n}\nlet a = 1;\nlet b = 2;\n"
        );
    }

    #[test]
    fn range_loop() {
        assert_eq!(
            translate("for i in range(5):\n    print(i)\n").unwrap(),
            "for (let i = 0; i < 5; i += 1) {\n    console.log(i);\n}\n"
        );
    }

    #[test]
    fn exception_handler() {
        let source = "\
try:
    x = 1
except Exception as e:
    print(e)
";
        assert_eq!(
            translate(source).unwrap(),
            "let x;\ntry {\n    x = 1;\n} catch (e) {\n    console.log(e);\n}\n"
        );
    }

    #[test]
    fn print_calls() {
        assert_eq!(translate("print()\n").unwrap(), "console.log();\n");
        assert_eq!(
            translate("a = 1\nb = 2\nprint(a, b)\n").unwrap(),
            "let a = 1;\nlet b = 2;\nconsole.log(a, b);\n"
        );
    }

    #[test]
    fn elif_chain() {
        let source = "\
x = 3
if x < 1:
    print(1)
elif x < 2:
    print(2)
elif x < 3:
    print(3)
else:
    print(4)
";
        let js = translate(source).unwrap();
        assert_eq!(js.matches("else if").count(), 2);
        assert_eq!(js.matches("} else {").count(), 1);
    }

    #[test]
    fn errors_abort_without_output() {
        assert!(translate("print(missing)\n").unwrap_err().is_unbound_name());
        assert!(translate("x: int = 'a'\n").unwrap_err().is_type_mismatch());
        assert!(translate("import os\n").unwrap_err().is_unsupported());
    }

    #[test]
    fn translations_are_independent() {
        let arena = Bump::new();
        let translator = Translator::new();
        let first = Parser::parse("x = 1\n", &arena).unwrap();
        let second = Parser::parse("print(x)\n", &arena).unwrap();

        assert!(translator.translate(&first).is_ok());
        assert!(translator.translate(&second).unwrap_err().is_unbound_name());
    }

    #[test]
    fn indentation_is_configurable() {
        let arena = Bump::new();
        let module = Parser::parse("def f():\n    return 1\n", &arena).unwrap();
        let translator = Translator::with_options(TranslateOptions { indent: 2 });
        assert_eq!(
            translator.translate(&module).unwrap(),
            "function f() {\n  return 1;\n}\n"
        );
    }

    #[test]
    fn outer_binding_is_replaced() {
        // Assigning in the function rebinds `x` there; the module-level
        // binding is gone once the function ends.
        let source = "\
x = 1
def f():
    x = 2
    return x
print(x)
";
        assert!(translate(source).unwrap_err().is_unbound_name());

        let source = "x = 1\ndef f():\n    return x\nprint(x)\n";
        assert_eq!(
            translate(source).unwrap(),
            "function f() {\n    return x;\n}\nlet x = 1;\nconsole.log(x);\n"
        );
    }
}
