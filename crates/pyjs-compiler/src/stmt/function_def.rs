//! Function definitions.

use pyjs_core::TranslateError;
use pyjs_parser::ast::{FunctionDef, Param, Stmt};

use super::block::strip_docstring;
use super::{Result, StmtTranslator};
use crate::expr::{check_identifier, declare_params, translate_params};
use crate::scope::SymbolKind;

impl StmtTranslator<'_> {
    /// `def name(params): body` becomes `function name(params) { body }`.
    ///
    /// The name is bound in the enclosing scope before the body is entered,
    /// so the function can call itself. A `def` inside a branch or loop body
    /// is only visible in that block. A `def` nested in a method has its own
    /// `this`, so the method receiver is out of reach there.
    pub(super) fn translate_function<'ast>(
        &mut self,
        def: &FunctionDef<'ast>,
    ) -> Result<Vec<String>> {
        if let Some(decorator) = def.decorators.first() {
            return Err(TranslateError::unsupported("decorator", decorator.span()));
        }
        let name = def.name.name;
        check_identifier(name, def.name.span)?;

        self.ctx.declare_block_scoped(name, SymbolKind::Function);

        let saved = self.ctx.enter_function();
        let callable = self.callable(def.params, def.body.stmts);
        self.ctx.leave_method(saved);
        let (params, body) = callable?;
        Ok(self.braced(format!("function {name}({})", params.join(", ")), body))
    }

    /// Parameters and body of a function or method, translated in a fresh
    /// scope.
    pub(super) fn callable<'ast>(
        &mut self,
        params: &[Param<'ast>],
        body: &[Stmt<'ast>],
    ) -> Result<(Vec<String>, Vec<String>)> {
        let rendered = translate_params(&mut self.expr(), params)?;

        self.ctx.scopes.enter();
        declare_params(self.ctx, params);
        let names: Vec<&str> = params.iter().map(|param| param.name.name).collect();
        let body = self.suite(strip_docstring(body), &names);
        self.ctx.scopes.exit();

        Ok((rendered, body?))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{run, run_with};

    #[test]
    fn plain_function() {
        assert_eq!(
            run(&[], "def add(a, b):\n    return a + b\n"),
            "function add(a, b) {\n    return a + b;\n}"
        );
        assert_eq!(run(&[], "def noop():\n    pass\n"), "function noop() {}");
    }

    #[test]
    fn defaults_and_rest_parameters() {
        assert_eq!(
            run(&[], "def f(a, b=2, *rest):\n    return rest\n"),
            "function f(a, b = 2, ...rest) {\n    return rest;\n}"
        );
    }

    #[test]
    fn annotations_are_dropped() {
        assert_eq!(
            run(&[], "def f(a: int) -> int:\n    return a\n"),
            "function f(a) {\n    return a;\n}"
        );
    }

    #[test]
    fn parameters_can_be_reassigned() {
        assert_eq!(
            run(&[], "def f(n):\n    n = n + 1\n    return n\n"),
            "function f(n) {\n    n = n + 1;\n    return n;\n}"
        );
    }

    #[test]
    fn recursion_resolves() {
        let source = "def fact(n):\n    if n <= 1:\n        return 1\n    return n * fact(n - 1)\n";
        assert_eq!(
            run(&[], source),
            "\
function fact(n) {
    if (n <= 1) {
        return 1;
    }
    return n * fact(n - 1);
}"
        );
    }

    #[test]
    fn locals_do_not_escape() {
        let source = "def f():\n    local = 1\nprint(local)\n";
        assert!(run_with(&[], source).unwrap_err().is_unbound_name());
    }

    #[test]
    fn function_is_callable_after_definition() {
        assert_eq!(
            run(&[], "def f():\n    pass\nf()\n"),
            "function f() {}\nf();"
        );
    }

    #[test]
    fn nested_functions_cannot_reach_the_method_receiver() {
        let source = "\
class Box:
    def get(self):
        def inner():
            return self.x
        return inner()
";
        let err = run_with(&[], source).unwrap_err();
        assert!(err.is_unsupported(), "{err:?}");

        let source = "\
class Box:
    def get(self):
        def inner(self):
            return self.x
        return inner(self)
";
        assert_eq!(
            run(&[], source),
            "\
class Box {
    get() {
        function inner(self) {
            return self.x;
        }
        return inner(this);
    }
}"
        );
    }

    #[test]
    fn functions_defined_in_a_branch_stay_in_it() {
        let source = "if c:\n    def f():\n        pass\n    f()\nf()\n";
        assert!(run_with(&["c"], source).unwrap_err().is_unbound_name());
    }

    #[test]
    fn unsupported_signatures() {
        for source in [
            "def f(**kw):\n    pass\n",
            "def f(a, *, b):\n    pass\n",
            "def f(a, /, b):\n    pass\n",
            "@wrap\ndef f():\n    pass\n",
        ] {
            let err = run_with(&["wrap"], source).unwrap_err();
            assert!(err.is_unsupported(), "{source}");
        }
    }

    #[test]
    fn reserved_names_are_rejected() {
        assert!(
            run_with(&[], "def delete(x):\n    pass\n")
                .unwrap_err()
                .is_unsupported()
        );
        assert!(
            run_with(&[], "def f(new):\n    pass\n")
                .unwrap_err()
                .is_unsupported()
        );
    }
}
