//! Per-translation state.
//!
//! A [`TranslationContext`] is created for every call to
//! [`Translator::translate`](crate::Translator::translate) and threaded through
//! the statement and expression translators. Nothing is shared between
//! translations.

use pyjs_core::{Span, TranslateError};
use rustc_hash::FxHashSet;

use crate::scope::{ScopeStack, SymbolKind};

/// Output formatting options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Spaces per nesting level.
    pub indent: usize,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self { indent: 4 }
    }
}

/// The class whose body is being translated.
#[derive(Debug, Clone)]
pub struct ClassContext {
    pub name: String,
    pub has_base: bool,
}

/// Receiver state saved by [`TranslationContext::enter_method`] and
/// [`TranslationContext::enter_function`].
#[derive(Debug, Clone)]
pub struct MethodState {
    class: Option<ClassContext>,
    receiver: Option<String>,
    hidden_receiver: Option<String>,
}

/// One open JavaScript block.
#[derive(Debug)]
struct OpenBlock {
    /// Scope depth the block belongs to.
    depth: usize,
    /// Names given a `let` (or a declaration) in the block.
    lets: FxHashSet<String>,
    /// Bindings that end with the block, such as a class defined in a branch.
    scoped: Vec<String>,
}

impl OpenBlock {
    fn new(depth: usize) -> Self {
        Self {
            depth,
            lets: FxHashSet::default(),
            scoped: Vec::new(),
        }
    }
}

/// Mutable state threaded through one translation.
#[derive(Debug)]
pub struct TranslationContext {
    pub scopes: ScopeStack,
    options: TranslateOptions,
    indent_unit: String,
    /// Set while translating a method body.
    class: Option<ClassContext>,
    /// Name of the method receiver (usually `self`), spelled `this`.
    receiver: Option<String>,
    /// Receiver of an enclosing method, out of reach of a nested `def`.
    hidden_receiver: Option<String>,
    /// Names bound to the caught exception by enclosing handlers.
    handlers: Vec<String>,
    blocks: Vec<OpenBlock>,
}

impl TranslationContext {
    pub fn new(options: TranslateOptions) -> Self {
        let indent_unit = " ".repeat(options.indent);
        let scopes = ScopeStack::new();
        let blocks = vec![OpenBlock::new(scopes.depth())];
        Self {
            scopes,
            options,
            indent_unit,
            class: None,
            receiver: None,
            hidden_receiver: None,
            handlers: Vec::new(),
            blocks,
        }
    }

    pub fn options(&self) -> &TranslateOptions {
        &self.options
    }

    /// One level of indentation.
    pub fn indent_unit(&self) -> &str {
        &self.indent_unit
    }

    // =========================================================================
    // Scope shortcuts
    // =========================================================================

    pub fn declare(&mut self, name: &str, kind: SymbolKind) {
        self.scopes.declare(name, kind);
    }

    pub fn resolve(&self, name: &str, span: Span) -> Result<SymbolKind, TranslateError> {
        self.scopes.resolve(name, span)
    }

    // =========================================================================
    // Emitted blocks
    // =========================================================================

    /// Start a JavaScript block belonging to the current scope.
    pub fn open_block(&mut self) {
        self.blocks.push(OpenBlock::new(self.scopes.depth()));
    }

    /// Close the innermost block, dropping the bindings that end with it.
    /// The top-level block is never closed.
    pub fn close_block(&mut self) {
        if self.blocks.len() > 1
            && let Some(block) = self.blocks.pop()
        {
            for name in &block.scoped {
                self.scopes.forget(name);
            }
        }
    }

    /// Note that `name` is declared by the innermost block.
    pub fn record_let(&mut self, name: &str) {
        if let Some(block) = self.blocks.last_mut() {
            block.lets.insert(name.to_string());
        }
    }

    /// Whether assigning `name` can reuse a declaration visible from the
    /// innermost block without leaving the current scope.
    pub fn is_let_bound(&self, name: &str) -> bool {
        let depth = self.scopes.depth();
        self.blocks
            .iter()
            .rev()
            .take_while(|block| block.depth == depth)
            .any(|block| block.lets.contains(name))
    }

    /// Whether the innermost block is nested inside the body of the current
    /// function or module, as a branch or loop body is.
    pub fn in_nested_block(&self) -> bool {
        let depth = self.scopes.depth();
        self.blocks
            .iter()
            .rev()
            .take_while(|block| block.depth == depth)
            .nth(1)
            .is_some()
    }

    /// Declare `name` for the innermost block only. Once the block closes
    /// the name is unbound again, as it is in the emitted JavaScript.
    pub fn declare_block_scoped(&mut self, name: &str, kind: SymbolKind) {
        self.declare(name, kind);
        self.record_let(name);
        if self.in_nested_block()
            && let Some(block) = self.blocks.last_mut()
        {
            block.scoped.push(name.to_string());
        }
    }

    // =========================================================================
    // Methods and handlers
    // =========================================================================

    pub fn class(&self) -> Option<&ClassContext> {
        self.class.as_ref()
    }

    pub fn is_receiver(&self, name: &str) -> bool {
        self.receiver.as_deref() == Some(name)
    }

    /// Whether `name` is the receiver of a method enclosing the current
    /// `def`, whose `this` is not the method's.
    pub fn is_hidden_receiver(&self, name: &str) -> bool {
        self.hidden_receiver.as_deref() == Some(name)
    }

    fn save(&self) -> MethodState {
        MethodState {
            class: self.class.clone(),
            receiver: self.receiver.clone(),
            hidden_receiver: self.hidden_receiver.clone(),
        }
    }

    /// Enter a method of `class` whose receiver parameter is `receiver`.
    ///
    /// Returns the previous state for [`leave_method`](Self::leave_method).
    pub fn enter_method(&mut self, class: ClassContext, receiver: &str) -> MethodState {
        let saved = self.save();
        self.class = Some(class);
        self.receiver = Some(receiver.to_string());
        saved
    }

    /// Enter a plain function. Inside it there is no class and no receiver.
    pub fn enter_function(&mut self) -> MethodState {
        let saved = self.save();
        self.class = None;
        if let Some(receiver) = self.receiver.take() {
            self.hidden_receiver = Some(receiver);
        }
        saved
    }

    pub fn leave_method(&mut self, previous: MethodState) {
        self.class = previous.class;
        self.receiver = previous.receiver;
        self.hidden_receiver = previous.hidden_receiver;
    }

    pub fn push_handler(&mut self, name: &str) {
        self.handlers.push(name.to_string());
    }

    pub fn pop_handler(&mut self) {
        self.handlers.pop();
    }

    /// The caught exception a bare `raise` re-throws.
    pub fn current_exception(&self) -> Option<&str> {
        self.handlers.last().map(String::as_str)
    }
}

impl Default for TranslationContext {
    fn default() -> Self {
        Self::new(TranslateOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indent_unit_follows_options() {
        let ctx = TranslationContext::new(TranslateOptions { indent: 2 });
        assert_eq!(ctx.indent_unit(), "  ");
        assert_eq!(TranslationContext::default().indent_unit(), "    ");
    }

    #[test]
    fn method_state_is_restored() {
        let mut ctx = TranslationContext::default();
        let saved = ctx.enter_method(
            ClassContext {
                name: "Dog".to_string(),
                has_base: true,
            },
            "self",
        );
        assert!(ctx.is_receiver("self"));
        assert!(ctx.class().is_some_and(|c| c.has_base));

        ctx.leave_method(saved);
        assert!(!ctx.is_receiver("self"));
        assert!(ctx.class().is_none());
    }

    #[test]
    fn functions_hide_the_method_receiver() {
        let mut ctx = TranslationContext::default();
        let method = ctx.enter_method(
            ClassContext {
                name: "Counter".to_string(),
                has_base: false,
            },
            "self",
        );
        let function = ctx.enter_function();
        assert!(!ctx.is_receiver("self"));
        assert!(ctx.is_hidden_receiver("self"));
        assert!(ctx.class().is_none());

        ctx.leave_method(function);
        assert!(ctx.is_receiver("self"));
        assert!(!ctx.is_hidden_receiver("self"));
        ctx.leave_method(method);
        assert!(!ctx.is_receiver("self"));
    }

    #[test]
    fn let_bindings_follow_blocks() {
        let mut ctx = TranslationContext::default();
        ctx.record_let("x");
        ctx.open_block();
        assert!(ctx.is_let_bound("x"));
        ctx.record_let("y");
        ctx.close_block();
        assert!(!ctx.is_let_bound("y"));

        ctx.scopes.enter();
        ctx.open_block();
        assert!(!ctx.is_let_bound("x"));
        ctx.close_block();
        ctx.scopes.exit();
        assert!(ctx.is_let_bound("x"));
    }

    #[test]
    fn block_scoped_declarations_end_with_their_block() {
        let mut ctx = TranslationContext::default();
        assert!(!ctx.in_nested_block());
        ctx.declare_block_scoped("Top", SymbolKind::Class);

        ctx.open_block();
        assert!(ctx.in_nested_block());
        ctx.declare_block_scoped("Inner", SymbolKind::Class);
        assert!(ctx.scopes.is_bound("Inner"));
        ctx.close_block();

        assert!(!ctx.scopes.is_bound("Inner"));
        assert!(ctx.scopes.is_bound("Top"));
    }

    #[test]
    fn handler_stack() {
        let mut ctx = TranslationContext::default();
        assert_eq!(ctx.current_exception(), None);
        ctx.push_handler("e");
        ctx.push_handler("inner");
        assert_eq!(ctx.current_exception(), Some("inner"));
        ctx.pop_handler();
        assert_eq!(ctx.current_exception(), Some("e"));
    }
}
