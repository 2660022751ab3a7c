//! Top-level fragments and declaration reordering.
//!
//! Every top-level statement is tagged with a [`DeclKind`] when it is
//! translated. Reordering groups the fragments by tag, classes first, then
//! functions, then everything else, without looking at the emitted text.

/// Classification of a top-level fragment. The variant order is the output
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeclKind {
    ClassDecl,
    FunctionDecl,
    Other,
}

/// The JavaScript for one top-level statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub kind: DeclKind,
    pub code: String,
}

/// Translated top-level statements in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslatedUnit {
    fragments: Vec<Fragment>,
}

impl TranslatedUnit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: DeclKind, code: impl Into<String>) {
        self.fragments.push(Fragment {
            kind,
            code: code.into(),
        });
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Group fragments as classes, functions, then the rest, keeping the
    /// relative order within each group.
    pub fn reorder(mut self) -> Self {
        // `sort_by_key` is stable.
        self.fragments.sort_by_key(|fragment| fragment.kind);
        self
    }

    /// The program text: fragments separated by newlines, with a trailing
    /// newline unless there is nothing to emit.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for fragment in &self.fragments {
            out.push_str(&fragment.code);
            out.push('\n');
        }
        out
    }
}
