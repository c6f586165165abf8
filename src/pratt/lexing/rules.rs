//! Lexer rules
//!
//! The grammar-specific half of tokenization: registered punctuators and keywords, the
//! comment syntax and the registered contexts. Rules are assembled while a grammar is
//! configured and are only read afterwards.

use super::base_tokenization::is_identifier;
use super::context::{ContextId, LexerContext};
use crate::pratt::symbol::{Predefined, Symbol};
use std::collections::HashMap;

pub const DEFAULT_CONTEXT: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockComment {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone)]
pub struct LexerRules {
    predefined: Predefined,
    /// Longest first, so the first match is the longest one
    punctuators: Vec<(String, Symbol)>,
    keywords: HashMap<String, Symbol>,
    line_comment: Option<String>,
    block_comment: Option<BlockComment>,
    contexts: Vec<LexerContext>,
}

impl LexerRules {
    pub fn new(predefined: Predefined) -> Self {
        Self {
            predefined,
            punctuators: Vec::new(),
            keywords: HashMap::new(),
            line_comment: None,
            block_comment: None,
            contexts: vec![LexerContext::new(DEFAULT_CONTEXT)],
        }
    }

    pub fn predefined(&self) -> &Predefined {
        &self.predefined
    }

    /// Register `symbol` as a keyword when `text` looks like a name, otherwise as a
    /// punctuator. Registering the same text again is a no-op.
    pub fn register(&mut self, text: &str, symbol: Symbol) {
        if text.is_empty() {
            return;
        }
        if is_identifier(text) {
            self.keywords.insert(text.to_string(), symbol);
            return;
        }
        if self.punctuators.iter().any(|(existing, _)| existing == text) {
            return;
        }
        let at = self
            .punctuators
            .iter()
            .position(|(existing, _)| existing.len() < text.len())
            .unwrap_or(self.punctuators.len());
        self.punctuators.insert(at, (text.to_string(), symbol));
    }

    pub fn is_keyword(&self, text: &str) -> bool {
        self.keywords.contains_key(text)
    }

    pub fn punctuators(&self) -> impl Iterator<Item = &str> {
        self.punctuators.iter().map(|(text, _)| text.as_str())
    }

    pub fn set_line_comment(&mut self, marker: Option<String>) {
        self.line_comment = marker.filter(|m| !m.is_empty());
    }

    pub fn set_block_comment(&mut self, comment: Option<BlockComment>) {
        self.block_comment = comment.filter(|c| !c.start.is_empty() && !c.end.is_empty());
    }

    pub fn add_context(&mut self, name: impl Into<String>) -> ContextId {
        self.contexts.push(LexerContext::new(name));
        ContextId::new(self.contexts.len() - 1)
    }

    pub fn find_context(&self, name: &str) -> Option<ContextId> {
        self.contexts
            .iter()
            .position(|context| context.name() == name)
            .map(ContextId::new)
    }

    /// The context for `id`; unknown ids resolve to the default context.
    pub fn context(&self, id: ContextId) -> &LexerContext {
        match self.contexts.get(id.index()) {
            Some(context) => context,
            None => &self.contexts[ContextId::DEFAULT.index()],
        }
    }

    pub fn context_mut(&mut self, id: ContextId) -> Option<&mut LexerContext> {
        self.contexts.get_mut(id.index())
    }

    /// Offset of the first byte at or after `from` that is not whitespace or a comment.
    pub fn skip_trivia(&self, source: &str, mut from: usize) -> usize {
        loop {
            let rest = &source[from..];
            let trimmed = rest.trim_start();
            from += rest.len() - trimmed.len();

            if let Some(marker) = &self.line_comment {
                if trimmed.starts_with(marker.as_str()) {
                    from += trimmed.find('\n').unwrap_or(trimmed.len());
                    continue;
                }
            }
            if let Some(comment) = &self.block_comment {
                if let Some(body) = trimmed.strip_prefix(comment.start.as_str()) {
                    from += comment.start.len();
                    from += match body.find(comment.end.as_str()) {
                        Some(end) => end + comment.end.len(),
                        None => body.len(),
                    };
                    continue;
                }
            }
            return from;
        }
    }

    /// The longest punctuator at the start of `rest` that `context` does not suppress.
    pub fn longest_punctuator(&self, rest: &str, context: &LexerContext) -> Option<(&Symbol, usize)> {
        self.punctuators
            .iter()
            .find(|(text, symbol)| rest.starts_with(text.as_str()) && !context.suppresses(symbol))
            .map(|(text, symbol)| (symbol, text.len()))
    }

    pub fn keyword(&self, text: &str, context: &LexerContext) -> Option<&Symbol> {
        self.keywords
            .get(text)
            .filter(|symbol| !context.suppresses(symbol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pratt::symbol::SymbolTable;

    fn rules_with(texts: &[&str]) -> (SymbolTable, LexerRules) {
        let mut table = SymbolTable::new();
        let mut rules = LexerRules::new(table.predefined().clone());
        for text in texts {
            let symbol = table.intern(text);
            rules.register(text, symbol);
        }
        (table, rules)
    }

    #[test]
    fn test_punctuators_longest_first() {
        let (_, rules) = rules_with(&["<", "<<=", "<="]);
        let order: Vec<_> = rules.punctuators().collect();
        assert_eq!(order, vec!["<<=", "<=", "<"]);
    }

    #[test]
    fn test_longest_match_respects_context() {
        let (table, mut rules) = rules_with(&[">", ">>"]);
        let default = rules.context(ContextId::DEFAULT).clone();
        let (symbol, len) = rules.longest_punctuator(">>1", &default).unwrap();
        assert_eq!((symbol.punctuator(), len), (">>", 2));

        let id = rules.add_context("typename");
        rules.context_mut(id).unwrap().suppress_compounds_of(">");
        let (symbol, len) = rules.longest_punctuator(">>1", rules.context(id)).unwrap();
        assert_eq!(symbol, &table.get(">").unwrap());
        assert_eq!(len, 1);
    }

    #[test]
    fn test_identifier_like_texts_are_keywords() {
        let (_, rules) = rules_with(&["if", "+"]);
        assert!(rules.is_keyword("if"));
        assert!(!rules.is_keyword("+"));
        assert_eq!(rules.punctuators().count(), 1);
    }

    #[test]
    fn test_skip_trivia_with_comments() {
        let (_, mut rules) = rules_with(&[]);
        rules.set_line_comment(Some("//".to_string()));
        rules.set_block_comment(Some(BlockComment {
            start: "/*".to_string(),
            end: "*/".to_string(),
        }));
        let source = "  // note\n /* a\n b */ x";
        assert_eq!(&source[rules.skip_trivia(source, 0)..], "x");
        // Unterminated block comment runs to the end
        assert_eq!(rules.skip_trivia("/* open", 0), 7);
    }

    #[test]
    fn test_find_context_and_unknown_id() {
        let (_, mut rules) = rules_with(&[]);
        let id = rules.add_context("typename");
        assert_eq!(rules.find_context("typename"), Some(id));
        assert_eq!(rules.find_context(DEFAULT_CONTEXT), Some(ContextId::DEFAULT));
        assert_eq!(rules.context(ContextId::new(42)).name(), DEFAULT_CONTEXT);
    }
}
