//! Static checks run before translation.
//!
//! The checker reports problems in the pyflakes line format:
//!
//! ```text
//! <input>:3:7: undefined name 'totl'
//! ```
//!
//! It detects:
//! - syntax errors, after which nothing else is checked
//! - undefined names, using Python's scoping rules
//! - `return`, `yield`, `break` and `continue` in the wrong place
//! - duplicate parameter names
//! - unused imports
//!
//! Every name bound anywhere in a scope counts as defined throughout that
//! scope. Function and lambda bodies are checked after the module body, so a
//! function sees module-level names bound after its definition.
//!
//! # Example
//!
//! ```
//! use pyjs_compiler::precheck;
//!
//! assert!(precheck::check("x = 1\nprint(x)\n").is_empty());
//! assert_eq!(
//!     precheck::check("print(y)\n"),
//!     vec!["<input>:1:7: undefined name 'y'".to_string()]
//! );
//! ```

use std::fmt;

use bumpalo::Bump;
use pyjs_parser::Parser;
use pyjs_parser::ast::{
    Argument, Block, ClassDef, Comprehension, ExceptHandler, Expr, FunctionDef, ImportStmt,
    LambdaExpr, Param, ParamKind, Stmt,
};
use pyjs_core::Span;
use rustc_hash::FxHashSet;
use tracing::debug;

/// One problem found in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: u32,
    pub col: u32,
    pub message: String,
}

impl Diagnostic {
    fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            line: span.line,
            col: span.col,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<input>:{}:{}: {}", self.line, self.col, self.message)
    }
}

/// Check `source`, returning diagnostics sorted by position.
pub fn diagnostics(source: &str) -> Vec<Diagnostic> {
    #[cfg(feature = "profiling")]
    profiling::scope!("precheck::diagnostics");

    let arena = Bump::new();
    let module = match Parser::parse(source, &arena) {
        Ok(module) => module,
        Err(errors) => {
            return errors
                .first()
                .map(|error| vec![Diagnostic::new(error.span, error.message.clone())])
                .unwrap_or_default();
        }
    };

    let mut checker = Checker::new();
    checker.check_module(module.body());
    let mut found = checker.finish();
    found.sort_by_key(|d| (d.line, d.col));
    debug!(count = found.len(), "pre-check finished");
    found
}

/// Check `source` and render each diagnostic as a line. Empty means the
/// source may be translated.
pub fn check(source: &str) -> Vec<String> {
    diagnostics(source).iter().map(ToString::to_string).collect()
}

// ============================================================================
// Scopes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScopeKind {
    Module,
    Class,
    Function,
    Lambda,
    Comprehension,
}

#[derive(Debug)]
struct ImportBinding<'ast> {
    name: &'ast str,
    display: String,
    span: Span,
    used: bool,
}

#[derive(Debug)]
struct Scope<'ast> {
    kind: ScopeKind,
    names: FxHashSet<&'ast str>,
    imports: Vec<ImportBinding<'ast>>,
}

impl<'ast> Scope<'ast> {
    fn new(kind: ScopeKind) -> Self {
        Self {
            kind,
            names: FxHashSet::default(),
            imports: Vec::new(),
        }
    }
}

/// A function or lambda body waiting to be checked, with the scope chain it
/// was defined in.
enum Deferred<'ast> {
    Function(Vec<usize>, &'ast FunctionDef<'ast>),
    Lambda(Vec<usize>, &'ast LambdaExpr<'ast>),
}

struct Checker<'ast> {
    /// Every scope ever opened; `stack` holds indices into it.
    scopes: Vec<Scope<'ast>>,
    stack: Vec<usize>,
    deferred: Vec<Deferred<'ast>>,
    diagnostics: Vec<Diagnostic>,
    loop_depth: usize,
    star_import: bool,
}

impl<'ast> Checker<'ast> {
    fn new() -> Self {
        let mut module = Scope::new(ScopeKind::Module);
        module.names.extend(MODULE_DUNDERS.iter().copied());
        Self {
            scopes: vec![module],
            stack: vec![0],
            deferred: Vec::new(),
            diagnostics: Vec::new(),
            loop_depth: 0,
            star_import: false,
        }
    }

    fn check_module(&mut self, body: &'ast [Stmt<'ast>]) {
        self.collect(body);
        self.statements(body);

        let mut next = 0;
        while next < self.deferred.len() {
            let saved_stack = std::mem::take(&mut self.stack);
            let saved_loops = std::mem::replace(&mut self.loop_depth, 0);
            match &self.deferred[next] {
                Deferred::Function(stack, def) => {
                    let (stack, def) = (stack.clone(), *def);
                    self.stack = stack;
                    self.push_scope(ScopeKind::Function);
                    self.bind_params(def.params);
                    self.collect(def.body.stmts);
                    self.statements(def.body.stmts);
                }
                Deferred::Lambda(stack, lambda) => {
                    let (stack, lambda) = (stack.clone(), *lambda);
                    self.stack = stack;
                    self.push_scope(ScopeKind::Lambda);
                    self.bind_params(lambda.params);
                    self.expr(lambda.body);
                }
            }
            self.stack = saved_stack;
            self.loop_depth = saved_loops;
            next += 1;
        }
    }

    fn finish(mut self) -> Vec<Diagnostic> {
        for scope in &self.scopes {
            for import in scope.imports.iter().filter(|import| !import.used) {
                self.diagnostics.push(Diagnostic::new(
                    import.span,
                    format!("'{}' imported but unused", import.display),
                ));
            }
        }
        self.diagnostics
    }

    fn push_scope(&mut self, kind: ScopeKind) {
        self.scopes.push(Scope::new(kind));
        self.stack.push(self.scopes.len() - 1);
    }

    fn pop_scope(&mut self) {
        self.stack.pop();
    }

    fn current(&mut self) -> &mut Scope<'ast> {
        let index = self.stack.last().copied().unwrap_or(0);
        &mut self.scopes[index]
    }

    fn current_kind(&self) -> ScopeKind {
        let index = self.stack.last().copied().unwrap_or(0);
        self.scopes[index].kind
    }

    fn in_function(&self) -> bool {
        self.stack.iter().rev().any(|&index| {
            matches!(self.scopes[index].kind, ScopeKind::Function | ScopeKind::Lambda)
        }) && self.current_kind() != ScopeKind::Class
    }

    fn bind(&mut self, name: &'ast str) {
        self.current().names.insert(name);
    }

    fn report(&mut self, span: Span, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::new(span, message));
    }

    /// Resolve a read of `name`, marking a matching import as used.
    fn load(&mut self, name: &'ast str, span: Span) {
        let innermost = self.stack.len().saturating_sub(1);
        for (depth, &index) in self.stack.iter().enumerate().rev() {
            let scope = &mut self.scopes[index];
            if scope.kind == ScopeKind::Class && depth != innermost {
                continue;
            }
            if scope.names.contains(name) {
                if let Some(import) = scope.imports.iter_mut().rev().find(|i| i.name == name) {
                    import.used = true;
                }
                return;
            }
        }

        if BUILTINS.contains(&name) || self.star_import {
            return;
        }
        if name == "__class__" && self.in_function() {
            return;
        }
        self.report(span, format!("undefined name '{name}'"));
    }

    // =========================================================================
    // Binding collection
    // =========================================================================

    /// Bind every name the statements bind in the current scope, without
    /// entering nested function or class bodies.
    fn collect(&mut self, stmts: &'ast [Stmt<'ast>]) {
        for stmt in stmts {
            match *stmt {
                Stmt::Assign(assign) => {
                    for target in assign.targets {
                        self.collect_target(target);
                    }
                }
                Stmt::AugAssign(aug) => self.collect_target(aug.target),
                Stmt::AnnAssign(ann) if ann.value.is_some() => self.collect_target(ann.target),
                Stmt::If(if_stmt) => {
                    for branch in if_stmt.branches {
                        self.collect(branch.body.stmts);
                    }
                    self.collect_optional(if_stmt.else_body);
                }
                Stmt::While(while_stmt) => {
                    self.collect(while_stmt.body.stmts);
                    self.collect_optional(while_stmt.else_body);
                }
                Stmt::For(for_stmt) => {
                    self.collect_target(for_stmt.target);
                    self.collect(for_stmt.body.stmts);
                    self.collect_optional(for_stmt.else_body);
                }
                Stmt::Try(try_stmt) => {
                    self.collect(try_stmt.body.stmts);
                    for handler in try_stmt.handlers {
                        if let Some(alias) = handler.alias {
                            self.bind(alias.name);
                        }
                        self.collect(handler.body.stmts);
                    }
                    self.collect_optional(try_stmt.else_body);
                    self.collect_optional(try_stmt.finally_body);
                }
                Stmt::With(with) => {
                    for item in with.items {
                        if let Some(target) = &item.target {
                            self.collect_target(target);
                        }
                    }
                    self.collect(with.body.stmts);
                }
                Stmt::FunctionDef(def) => self.bind(def.name.name),
                Stmt::ClassDef(class) => self.bind(class.name.name),
                Stmt::Import(import) => {
                    for alias in import.names.iter().filter(|alias| alias.name != "*") {
                        self.bind(alias.bound_name());
                    }
                }
                Stmt::Global(names) | Stmt::Nonlocal(names) => {
                    for ident in names.names {
                        self.bind(ident.name);
                    }
                }
                _ => {}
            }
        }
    }

    fn collect_optional(&mut self, block: Option<Block<'ast>>) {
        if let Some(block) = block {
            self.collect(block.stmts);
        }
    }

    fn collect_target(&mut self, target: &'ast Expr<'ast>) {
        match *target {
            Expr::Name(ident) => self.bind(ident.name),
            Expr::Tuple(seq) | Expr::List(seq) => {
                for element in seq.elements {
                    self.collect_target(element);
                }
            }
            Expr::Starred(starred) => self.collect_target(starred.value),
            Expr::Paren(paren) => self.collect_target(paren.expr),
            _ => {}
        }
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn statements(&mut self, stmts: &'ast [Stmt<'ast>]) {
        for stmt in stmts {
            self.statement(stmt);
        }
    }

    fn block(&mut self, block: &Block<'ast>) {
        self.statements(block.stmts);
    }

    fn loop_body(&mut self, block: &Block<'ast>) {
        self.loop_depth += 1;
        self.block(block);
        self.loop_depth -= 1;
    }

    fn statement(&mut self, stmt: &'ast Stmt<'ast>) {
        match *stmt {
            Stmt::Expr(expr_stmt) => self.expr(expr_stmt.expr),
            Stmt::Assign(assign) => {
                self.expr(assign.value);
                for target in assign.targets {
                    self.store(target);
                }
            }
            Stmt::AugAssign(aug) => {
                self.expr(aug.value);
                match aug.target.unparenthesized() {
                    Expr::Name(ident) => self.load(ident.name, ident.span),
                    _ => {}
                }
                self.store(aug.target);
            }
            Stmt::AnnAssign(ann) => {
                self.expr(ann.annotation);
                if let Some(value) = ann.value {
                    self.expr(value);
                    self.store(ann.target);
                } else if !matches!(ann.target.unparenthesized(), Expr::Name(_)) {
                    self.store(ann.target);
                }
            }
            Stmt::Return(ret) => {
                if !self.in_function() {
                    self.report(ret.span, "'return' outside function");
                }
                if let Some(value) = ret.value {
                    self.expr(value);
                }
            }
            Stmt::If(if_stmt) => {
                for branch in if_stmt.branches {
                    self.expr(branch.test);
                    self.block(&branch.body);
                }
                if let Some(else_body) = &if_stmt.else_body {
                    self.block(else_body);
                }
            }
            Stmt::While(while_stmt) => {
                self.expr(while_stmt.test);
                self.loop_body(&while_stmt.body);
                if let Some(else_body) = &while_stmt.else_body {
                    self.block(else_body);
                }
            }
            Stmt::For(for_stmt) => {
                self.expr(for_stmt.iter);
                self.store(for_stmt.target);
                self.loop_body(&for_stmt.body);
                if let Some(else_body) = &for_stmt.else_body {
                    self.block(else_body);
                }
            }
            Stmt::Try(try_stmt) => {
                self.block(&try_stmt.body);
                for handler in try_stmt.handlers {
                    self.handler(handler);
                }
                if let Some(else_body) = &try_stmt.else_body {
                    self.block(else_body);
                }
                if let Some(finally_body) = &try_stmt.finally_body {
                    self.block(finally_body);
                }
            }
            Stmt::FunctionDef(def) => self.function_def(def),
            Stmt::ClassDef(class) => self.class_def(class),
            Stmt::Raise(raise) => {
                if let Some(exc) = raise.exc {
                    self.expr(exc);
                }
                if let Some(cause) = raise.cause {
                    self.expr(cause);
                }
            }
            Stmt::Assert(assert) => {
                self.expr(assert.test);
                if let Some(msg) = assert.msg {
                    self.expr(msg);
                }
            }
            Stmt::Import(import) => self.import(import),
            Stmt::Global(names) | Stmt::Nonlocal(names) => {
                for ident in names.names {
                    self.bind(ident.name);
                }
            }
            Stmt::Delete(del) => {
                for target in del.targets {
                    self.delete(target);
                }
            }
            Stmt::With(with) => {
                for item in with.items {
                    self.expr(&item.context);
                    if let Some(target) = &item.target {
                        self.store(target);
                    }
                }
                self.block(&with.body);
            }
            Stmt::Pass(_) => {}
            Stmt::Break(span) => {
                if self.loop_depth == 0 {
                    self.report(span, "'break' outside loop");
                }
            }
            Stmt::Continue(span) => {
                if self.loop_depth == 0 {
                    self.report(span, "'continue' not properly in loop");
                }
            }
        }
    }

    fn handler(&mut self, handler: &'ast ExceptHandler<'ast>) {
        if let Some(exc_type) = handler.exc_type {
            self.expr(exc_type);
        }
        if let Some(alias) = handler.alias {
            self.bind(alias.name);
        }
        self.block(&handler.body);
    }

    fn function_def(&mut self, def: &'ast FunctionDef<'ast>) {
        for decorator in def.decorators {
            self.expr(decorator);
        }
        self.params(def.params, def.span);
        if let Some(returns) = def.returns {
            self.expr(returns);
        }
        self.bind(def.name.name);
        self.deferred.push(Deferred::Function(self.stack.clone(), def));
    }

    fn class_def(&mut self, class: &'ast ClassDef<'ast>) {
        for decorator in class.decorators {
            self.expr(decorator);
        }
        self.arguments(class.bases);

        let saved_loops = std::mem::replace(&mut self.loop_depth, 0);
        self.push_scope(ScopeKind::Class);
        self.current().names.extend(["__module__", "__qualname__"]);
        self.collect(class.body.stmts);
        self.block(&class.body);
        self.pop_scope();
        self.loop_depth = saved_loops;

        self.bind(class.name.name);
    }

    /// Defaults and annotations, which belong to the enclosing scope, plus
    /// the duplicate-name check.
    fn params(&mut self, params: &'ast [Param<'ast>], span: Span) {
        let mut seen = FxHashSet::default();
        for param in params {
            if let Some(default) = param.default {
                self.expr(default);
            }
            if let Some(annotation) = param.annotation {
                self.expr(annotation);
            }
            let name = param.name.name;
            if is_named(param) && !seen.insert(name) {
                self.report(
                    span,
                    format!("duplicate argument '{name}' in function definition"),
                );
            }
        }
    }

    fn bind_params(&mut self, params: &'ast [Param<'ast>]) {
        for param in params.iter().filter(|param| is_named(param)) {
            self.bind(param.name.name);
        }
    }

    fn import(&mut self, import: &'ast ImportStmt<'ast>) {
        let from = import.module.map(|module| {
            let dots = ".".repeat(import.level as usize);
            format!("{dots}{module}")
        });
        let from = match (from, import.level) {
            (Some(from), _) => Some(from),
            (None, 0) => None,
            (None, level) => Some(".".repeat(level as usize)),
        };

        for alias in import.names {
            if alias.name == "*" {
                self.star_import = true;
                let module = from.as_deref().unwrap_or_default();
                self.report(
                    import.span,
                    format!("'from {module} import *' used; unable to detect undefined names"),
                );
                continue;
            }

            let bound = alias.bound_name();
            let full = match &from {
                Some(module) if module.ends_with('.') => format!("{module}{}", alias.name),
                Some(module) => format!("{module}.{}", alias.name),
                None => alias.name.to_string(),
            };
            let display = match alias.alias {
                Some(alias) => format!("{full} as {}", alias.name),
                None => full,
            };

            self.bind(bound);
            if from.as_deref() == Some("__future__") {
                continue;
            }
            let span = import.span;
            self.current().imports.push(ImportBinding {
                name: bound,
                display,
                span,
                used: false,
            });
        }
    }

    // =========================================================================
    // Targets
    // =========================================================================

    fn store(&mut self, target: &'ast Expr<'ast>) {
        match target {
            Expr::Name(ident) => self.bind(ident.name),
            Expr::Tuple(seq) | Expr::List(seq) => {
                for element in seq.elements {
                    self.store(element);
                }
            }
            Expr::Starred(starred) => self.store(starred.value),
            Expr::Paren(paren) => self.store(paren.expr),
            Expr::Attribute(attr) => self.expr(attr.value),
            Expr::Subscript(sub) => {
                self.expr(sub.value);
                self.expr(sub.index);
            }
            other => self.expr(other),
        }
    }

    fn delete(&mut self, target: &'ast Expr<'ast>) {
        match target {
            Expr::Name(ident) => self.load(ident.name, ident.span),
            Expr::Tuple(seq) | Expr::List(seq) => {
                for element in seq.elements {
                    self.delete(element);
                }
            }
            Expr::Paren(paren) => self.delete(paren.expr),
            other => self.expr(other),
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn expr(&mut self, expr: &'ast Expr<'ast>) {
        match *expr {
            Expr::Literal(_) => {}
            Expr::Name(ident) => self.load(ident.name, ident.span),
            Expr::Binary(bin) => {
                self.expr(bin.left);
                self.expr(bin.right);
            }
            Expr::Unary(un) => self.expr(un.operand),
            Expr::BoolOp(bool_op) => self.exprs(bool_op.values),
            Expr::Compare(cmp) => {
                self.expr(cmp.left);
                self.exprs(cmp.comparators);
            }
            Expr::Call(call) => {
                self.expr(call.callee);
                self.arguments(call.args);
            }
            Expr::Attribute(attr) => self.expr(attr.value),
            Expr::Subscript(sub) => {
                self.expr(sub.value);
                self.expr(sub.index);
            }
            Expr::Slice(slice) => {
                for part in [slice.lower, slice.upper, slice.step].into_iter().flatten() {
                    self.expr(part);
                }
            }
            Expr::List(seq) | Expr::Tuple(seq) | Expr::Set(seq) => self.exprs(seq.elements),
            Expr::Dict(dict) => {
                for entry in dict.entries {
                    self.expr(&entry.key);
                    self.expr(&entry.value);
                }
            }
            Expr::ListComp(comp) => self.comprehension(comp.generators, comp.element),
            Expr::IfElse(if_else) => {
                self.expr(if_else.test);
                self.expr(if_else.body);
                self.expr(if_else.orelse);
            }
            Expr::Lambda(lambda) => {
                self.params(lambda.params, lambda.span);
                self.deferred.push(Deferred::Lambda(self.stack.clone(), lambda));
            }
            Expr::Starred(starred) => self.expr(starred.value),
            Expr::Yield(y) => {
                if !self.in_function() {
                    self.report(y.span, "'yield' outside function");
                }
                if let Some(value) = y.value {
                    self.expr(value);
                }
            }
            Expr::Paren(paren) => self.expr(paren.expr),
        }
    }

    fn exprs(&mut self, exprs: &'ast [Expr<'ast>]) {
        for expr in exprs {
            self.expr(expr);
        }
    }

    fn arguments(&mut self, args: &'ast [Argument<'ast>]) {
        for arg in args {
            self.expr(arg.value);
        }
    }

    /// The first iterable is evaluated outside; everything else runs in the
    /// comprehension's own scope.
    fn comprehension(
        &mut self,
        generators: &'ast [Comprehension<'ast>],
        element: &'ast Expr<'ast>,
    ) {
        let Some((first, rest)) = generators.split_first() else {
            return;
        };
        self.expr(first.iter);

        self.push_scope(ScopeKind::Comprehension);
        self.store(first.target);
        self.exprs(first.conditions);
        for generator in rest {
            self.expr(generator.iter);
            self.store(generator.target);
            self.exprs(generator.conditions);
        }
        self.expr(element);
        self.pop_scope();
    }
}

/// Bare `*` and `/` markers bind nothing.
fn is_named(param: &Param<'_>) -> bool {
    !matches!(
        param.kind,
        ParamKind::KeywordOnlyMarker | ParamKind::PositionalOnlyMarker
    )
}

const MODULE_DUNDERS: &[&str] = &["__file__", "__builtins__", "__annotations__", "__path__"];

/// Names defined by Python's `builtins` module.
const BUILTINS: &[&str] = &[
    "ArithmeticError",
    "AssertionError",
    "AttributeError",
    "BaseException",
    "BaseExceptionGroup",
    "BlockingIOError",
    "BrokenPipeError",
    "BufferError",
    "BytesWarning",
    "ChildProcessError",
    "ConnectionAbortedError",
    "ConnectionError",
    "ConnectionRefusedError",
    "ConnectionResetError",
    "DeprecationWarning",
    "EOFError",
    "Ellipsis",
    "EncodingWarning",
    "EnvironmentError",
    "Exception",
    "ExceptionGroup",
    "False",
    "FileExistsError",
    "FileNotFoundError",
    "FloatingPointError",
    "FutureWarning",
    "GeneratorExit",
    "IOError",
    "ImportError",
    "ImportWarning",
    "IndentationError",
    "IndexError",
    "InterruptedError",
    "IsADirectoryError",
    "KeyError",
    "KeyboardInterrupt",
    "LookupError",
    "MemoryError",
    "ModuleNotFoundError",
    "NameError",
    "None",
    "NotADirectoryError",
    "NotImplemented",
    "NotImplementedError",
    "OSError",
    "OverflowError",
    "PendingDeprecationWarning",
    "PermissionError",
    "ProcessLookupError",
    "RecursionError",
    "ReferenceError",
    "ResourceWarning",
    "RuntimeError",
    "RuntimeWarning",
    "StopAsyncIteration",
    "StopIteration",
    "SyntaxError",
    "SyntaxWarning",
    "SystemError",
    "SystemExit",
    "TabError",
    "TimeoutError",
    "True",
    "TypeError",
    "UnboundLocalError",
    "UnicodeDecodeError",
    "UnicodeEncodeError",
    "UnicodeError",
    "UnicodeTranslateError",
    "UnicodeWarning",
    "UserWarning",
    "ValueError",
    "Warning",
    "ZeroDivisionError",
    "__build_class__",
    "__debug__",
    "__doc__",
    "__import__",
    "__loader__",
    "__name__",
    "__package__",
    "__spec__",
    "abs",
    "aiter",
    "all",
    "anext",
    "any",
    "ascii",
    "bin",
    "bool",
    "breakpoint",
    "bytearray",
    "bytes",
    "callable",
    "chr",
    "classmethod",
    "compile",
    "complex",
    "copyright",
    "credits",
    "delattr",
    "dict",
    "dir",
    "divmod",
    "enumerate",
    "eval",
    "exec",
    "exit",
    "filter",
    "float",
    "format",
    "frozenset",
    "getattr",
    "globals",
    "hasattr",
    "hash",
    "help",
    "hex",
    "id",
    "input",
    "int",
    "isinstance",
    "issubclass",
    "iter",
    "len",
    "license",
    "list",
    "locals",
    "map",
    "max",
    "memoryview",
    "min",
    "next",
    "object",
    "oct",
    "open",
    "ord",
    "pow",
    "print",
    "property",
    "quit",
    "range",
    "repr",
    "reversed",
    "round",
    "set",
    "setattr",
    "slice",
    "sorted",
    "staticmethod",
    "str",
    "sum",
    "super",
    "tuple",
    "type",
    "vars",
    "zip",
];
