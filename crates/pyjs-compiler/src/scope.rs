//! Lexical scope tracking for translation.
//!
//! This module provides [`ScopeStack`], a nested symbol table recording which
//! names are bound, and as what, at each level of nesting. It handles:
//! - Entering and exiting function, handler, lambda and comprehension scopes
//! - Rebinding: declaring a name removes any existing binding first
//! - Shadowing for comprehension and lambda variables, which never leak
//! - Remembering which names still refer to the pre-seeded built-ins

use pyjs_core::{Span, TranslateError};
use rustc_hash::FxHashSet;

/// Functions available before any user code runs.
pub const BUILTIN_FUNCTIONS: &[&str] = &["print", "range", "abs", "round"];

// ============================================================================
// Types
// ============================================================================

/// What a name is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Variable,
    Function,
    Class,
}

/// Bindings introduced at one nesting level.
///
/// A name appears in at most one of the three sets.
#[derive(Debug, Default, Clone)]
pub struct ScopeFrame {
    variables: FxHashSet<String>,
    functions: FxHashSet<String>,
    classes: FxHashSet<String>,
}

impl ScopeFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<SymbolKind> {
        if self.variables.contains(name) {
            Some(SymbolKind::Variable)
        } else if self.functions.contains(name) {
            Some(SymbolKind::Function)
        } else if self.classes.contains(name) {
            Some(SymbolKind::Class)
        } else {
            None
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    fn insert(&mut self, name: &str, kind: SymbolKind) {
        self.remove(name);
        let set = match kind {
            SymbolKind::Variable => &mut self.variables,
            SymbolKind::Function => &mut self.functions,
            SymbolKind::Class => &mut self.classes,
        };
        set.insert(name.to_string());
    }

    fn remove(&mut self, name: &str) -> bool {
        self.variables.remove(name) | self.functions.remove(name) | self.classes.remove(name)
    }

    pub fn len(&self) -> usize {
        self.variables.len() + self.functions.len() + self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// ScopeStack
// ============================================================================

/// Nested symbol table, innermost frame last.
///
/// The global frame is created with the stack, pre-seeded with
/// [`BUILTIN_FUNCTIONS`], and never popped.
#[derive(Debug, Clone)]
pub struct ScopeStack {
    frames: Vec<ScopeFrame>,
    /// Built-ins that have not been redeclared by user code.
    builtins: FxHashSet<String>,
}

impl ScopeStack {
    pub fn new() -> Self {
        let mut global = ScopeFrame::new();
        for name in BUILTIN_FUNCTIONS {
            global.insert(name, SymbolKind::Function);
        }
        Self {
            frames: vec![global],
            builtins: BUILTIN_FUNCTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Push a fresh, empty frame.
    pub fn enter(&mut self) {
        self.frames.push(ScopeFrame::new());
    }

    /// Pop the innermost frame and everything declared in it.
    ///
    /// Exiting with only the global frame left is a no-op.
    pub fn exit(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Number of active frames, including the global one.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Bind `name` in the innermost frame.
    ///
    /// An existing binding anywhere in the stack is removed first, so
    /// declaring a name that an outer frame already holds replaces the outer
    /// binding; once the inner frame exits the name is unbound.
    pub fn declare(&mut self, name: &str, kind: SymbolKind) {
        for frame in &mut self.frames {
            frame.remove(name);
        }
        self.builtins.remove(name);
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name, kind);
        }
    }

    /// Bind `name` in the innermost frame, leaving outer bindings alone.
    ///
    /// Used for comprehension targets and lambda parameters; the outer
    /// binding is visible again once the frame exits.
    pub fn shadow(&mut self, name: &str, kind: SymbolKind) {
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name, kind);
        }
    }

    /// Drop the innermost binding of `name`, if any.
    pub fn forget(&mut self, name: &str) {
        if let Some(frame) = self.frames.iter_mut().rev().find(|frame| frame.contains(name)) {
            frame.remove(name);
        }
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.frames.iter().any(|frame| frame.contains(name))
    }

    /// Kind of the innermost binding of `name`.
    pub fn lookup(&self, name: &str) -> Option<SymbolKind> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }

    /// Fail with [`TranslateError::UnboundName`] unless `name` is bound.
    pub fn resolve(&self, name: &str, span: Span) -> Result<SymbolKind, TranslateError> {
        self.lookup(name).ok_or_else(|| TranslateError::UnboundName {
            name: name.to_string(),
            span,
        })
    }

    pub fn is_declared_in_current(&self, name: &str) -> bool {
        self.frames.last().is_some_and(|frame| frame.contains(name))
    }

    /// Whether `name` still refers to the built-in of that name.
    pub fn is_builtin(&self, name: &str) -> bool {
        self.builtins.contains(name)
            && self.frames.iter().rposition(|frame| frame.contains(name)) == Some(0)
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_frame_is_seeded_with_builtins() {
        let scopes = ScopeStack::new();
        assert_eq!(scopes.depth(), 1);
        for name in BUILTIN_FUNCTIONS {
            assert_eq!(scopes.lookup(name), Some(SymbolKind::Function));
            assert!(scopes.is_builtin(name));
        }
        assert!(!scopes.is_bound("len"));
    }

    #[test]
    fn declare_and_resolve() {
        let mut scopes = ScopeStack::new();
        scopes.declare("x", SymbolKind::Variable);
        assert!(scopes.is_bound("x"));
        assert_eq!(scopes.resolve("x", Span::default()), Ok(SymbolKind::Variable));

        let err = scopes.resolve("y", Span::new(2, 5, 1)).unwrap_err();
        assert_eq!(
            err,
            TranslateError::UnboundName {
                name: "y".to_string(),
                span: Span::new(2, 5, 1),
            }
        );
    }

    #[test]
    fn exit_drops_only_inner_bindings() {
        let mut scopes = ScopeStack::new();
        scopes.declare("outer", SymbolKind::Variable);
        scopes.enter();
        scopes.declare("inner", SymbolKind::Function);
        assert!(scopes.is_bound("outer"));
        assert!(scopes.is_bound("inner"));

        scopes.exit();
        assert!(scopes.is_bound("outer"));
        assert!(!scopes.is_bound("inner"));
    }

    #[test]
    fn global_frame_is_never_popped() {
        let mut scopes = ScopeStack::new();
        scopes.exit();
        scopes.exit();
        assert_eq!(scopes.depth(), 1);
        assert!(scopes.is_bound("print"));
    }

    #[test]
    fn inner_declaration_replaces_outer_binding() {
        let mut scopes = ScopeStack::new();
        scopes.declare("x", SymbolKind::Variable);
        scopes.enter();
        scopes.declare("x", SymbolKind::Variable);
        assert!(scopes.is_declared_in_current("x"));
        scopes.exit();

        // The outer binding was moved into the inner frame and is gone now.
        assert!(!scopes.is_bound("x"));
    }

    #[test]
    fn redeclaring_changes_kind() {
        let mut scopes = ScopeStack::new();
        scopes.declare("thing", SymbolKind::Class);
        scopes.declare("thing", SymbolKind::Function);
        assert_eq!(scopes.lookup("thing"), Some(SymbolKind::Function));
    }

    #[test]
    fn shadowing_a_builtin() {
        let mut scopes = ScopeStack::new();
        scopes.declare("print", SymbolKind::Function);
        assert!(scopes.is_bound("print"));
        assert!(!scopes.is_builtin("print"));
        assert!(scopes.is_builtin("abs"));
    }

    #[test]
    fn shadowing_keeps_the_outer_binding() {
        let mut scopes = ScopeStack::new();
        scopes.declare("x", SymbolKind::Function);
        scopes.enter();
        scopes.shadow("x", SymbolKind::Variable);
        scopes.shadow("print", SymbolKind::Variable);
        assert_eq!(scopes.lookup("x"), Some(SymbolKind::Variable));
        assert!(!scopes.is_builtin("print"));
        scopes.exit();

        assert_eq!(scopes.lookup("x"), Some(SymbolKind::Function));
        assert!(scopes.is_builtin("print"));
    }

    #[test]
    fn forget_drops_the_innermost_binding() {
        let mut scopes = ScopeStack::new();
        scopes.declare("e", SymbolKind::Variable);
        scopes.forget("e");
        assert!(!scopes.is_bound("e"));

        scopes.forget("missing");
        assert!(scopes.is_bound("print"));
    }

    #[test]
    fn current_frame_membership() {
        let mut scopes = ScopeStack::new();
        scopes.declare("a", SymbolKind::Variable);
        scopes.enter();
        assert!(!scopes.is_declared_in_current("a"));
        scopes.declare("b", SymbolKind::Variable);
        assert!(scopes.is_declared_in_current("b"));
    }
}
