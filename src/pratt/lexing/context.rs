//! Lexer contexts and the context stack
//!
//!     A context is a named tokenization mode. Grammars register contexts up front and get
//!     a [`ContextId`] back; a context can suppress symbols so that, inside it, the lexer
//!     falls back to shorter punctuators or treats a keyword as a plain name. The classic
//!     case is `>>` inside a generic argument list, where it has to come out as two `>`.
//!
//!     Contexts are activated through a [`ContextStack`]. Its bottom entry is the default
//!     context and is never popped; only the top entry is active. Opening a context returns
//!     a [`ContextGuard`] that pops it again when dropped, so release happens on every exit
//!     path of the code that opened it. Releases must be strictly LIFO. Releasing an entry
//!     that is not on top is recorded as a [`ParseError::ContextMismatch`]; the parser
//!     escalates it once the parse finishes.
//!
//!     Every push and pop bumps the stack's generation. The lexer compares generations to
//!     find out that its look-ahead was lexed under another context and must be redone.

use crate::pratt::error::ParseError;
use crate::pratt::symbol::Symbol;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// Handle of a registered lexer context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(usize);

impl ContextId {
    pub const DEFAULT: ContextId = ContextId(0);

    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

/// A named tokenization mode
#[derive(Debug, Clone)]
pub struct LexerContext {
    name: String,
    suppressed: HashSet<Symbol>,
    suppressed_compounds: Vec<String>,
}

impl LexerContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            suppressed: HashSet::new(),
            suppressed_compounds: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stop recognising `symbol` while this context is active.
    pub fn suppress(&mut self, symbol: Symbol) {
        self.suppressed.insert(symbol);
    }

    /// Stop recognising every punctuator that starts with `text` and is longer than it.
    pub fn suppress_compounds_of(&mut self, text: impl Into<String>) {
        self.suppressed_compounds.push(text.into());
    }

    pub fn suppresses(&self, symbol: &Symbol) -> bool {
        if self.suppressed.contains(symbol) {
            return true;
        }
        let text = symbol.punctuator();
        self.suppressed_compounds
            .iter()
            .any(|prefix| text.len() > prefix.len() && text.starts_with(prefix.as_str()))
    }
}

#[derive(Debug)]
struct Entry {
    guard: u64,
    context: ContextId,
    name: String,
}

#[derive(Debug)]
struct StackState {
    entries: Vec<Entry>,
    next_guard: u64,
    generation: u64,
    mismatch: Option<ParseError>,
}

/// The per-parse stack of active contexts
#[derive(Debug, Clone)]
pub struct ContextStack {
    state: Rc<RefCell<StackState>>,
}

impl ContextStack {
    /// A stack holding only the default context.
    pub fn new(default_name: impl Into<String>) -> Self {
        let entries = vec![Entry {
            guard: 0,
            context: ContextId::DEFAULT,
            name: default_name.into(),
        }];
        Self {
            state: Rc::new(RefCell::new(StackState {
                entries,
                next_guard: 1,
                generation: 0,
                mismatch: None,
            })),
        }
    }

    pub fn active(&self) -> ContextId {
        self.state
            .borrow()
            .entries
            .last()
            .map(|entry| entry.context)
            .unwrap_or(ContextId::DEFAULT)
    }

    pub fn depth(&self) -> usize {
        self.state.borrow().entries.len()
    }

    pub fn generation(&self) -> u64 {
        self.state.borrow().generation
    }

    /// Push `context`; the returned guard pops it.
    pub fn push(&self, context: ContextId, name: &str) -> ContextGuard {
        let mut state = self.state.borrow_mut();
        let guard = state.next_guard;
        state.next_guard += 1;
        state.generation += 1;
        state.entries.push(Entry {
            guard,
            context,
            name: name.to_string(),
        });
        tracing::trace!(context = name, depth = state.entries.len(), "opened lexer context");
        ContextGuard {
            stack: self.clone(),
            guard,
            context,
            released: false,
        }
    }

    fn release(&self, guard: u64) -> Result<(), ParseError> {
        let mut state = self.state.borrow_mut();
        let Some(index) = state.entries.iter().rposition(|entry| entry.guard == guard) else {
            return Ok(());
        };
        state.generation += 1;
        let is_top = index + 1 == state.entries.len();
        let entry = state.entries.remove(index);
        tracing::trace!(context = %entry.name, depth = state.entries.len(), "closed lexer context");
        if is_top {
            return Ok(());
        }
        let active = state
            .entries
            .last()
            .map(|top| top.name.clone())
            .unwrap_or_default();
        let error = ParseError::ContextMismatch {
            released: entry.name,
            active,
        };
        if state.mismatch.is_none() {
            state.mismatch = Some(error.clone());
        }
        Err(error)
    }

    /// The first out-of-order release, if any, leaving it recorded.
    pub fn mismatch(&self) -> Option<ParseError> {
        self.state.borrow().mismatch.clone()
    }
}

/// Scoped activation of a lexer context
///
/// Dropping the guard pops its context. Use [`ContextGuard::close`] to release early and
/// observe an out-of-order release directly.
#[must_use = "the context is popped as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ContextGuard {
    stack: ContextStack,
    guard: u64,
    context: ContextId,
    released: bool,
}

impl ContextGuard {
    pub fn context(&self) -> ContextId {
        self.context
    }

    pub fn close(mut self) -> Result<(), ParseError> {
        self.released = true;
        self.stack.release(self.guard)
    }
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        if !self.released {
            self.released = true;
            // Recorded on the stack when out of order
            let _ = self.stack.release(self.guard);
        }
    }
}
