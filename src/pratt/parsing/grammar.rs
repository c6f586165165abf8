//! Grammar configuration
//!
//! A [`Grammar`] is everything a parse needs to know about a language: the interned
//! symbols, the lexer rules, the parselets with their precedences and whether documents
//! are statement lists. It is built once through `&mut self` registration calls and read
//! through `&self` afterwards; a finished grammar is `Send + Sync`, so one instance can
//! drive any number of concurrent parses.
//!
//! Registering a parselet by text also teaches the lexer the text: identifier-like texts
//! become keywords, everything else a punctuator. The predefined `#...` symbols name
//! token classes and are never registered as text.

use super::parser::{ParseOutcome, Parser};
use super::presets::GrammarPresets;
use super::registry::{InfixParselet, ParseletRegistry, PrefixParselet};
use crate::pratt::diagnostics::SourceDocument;
use crate::pratt::error::ParseResult;
use crate::pratt::lexing::{BlockComment, ContextId, Lexer, LexerRules};
use crate::pratt::symbol::{Predefined, Symbol, SymbolTable};
use crate::pratt::token::Token;

#[derive(Debug, Clone)]
pub struct Grammar {
    symbols: SymbolTable,
    rules: LexerRules,
    registry: ParseletRegistry,
    statement_separator: Option<Symbol>,
}

impl Grammar {
    /// An empty grammar: only the predefined symbols, no parselets.
    pub fn new() -> Self {
        let symbols = SymbolTable::new();
        let rules = LexerRules::new(symbols.predefined().clone());
        Self {
            symbols,
            rules,
            registry: ParseletRegistry::new(),
            statement_separator: None,
        }
    }

    /// A grammar with every preset installed, parsing single expressions.
    pub fn expression_grammar() -> Self {
        let mut grammar = Self::new();
        grammar.add_common_literals();
        grammar.add_arithmetic_operators();
        grammar.add_logical_operators();
        grammar.add_bitwise_operators();
        grammar.add_assignment();
        grammar.add_conditional();
        grammar.add_grouping();
        grammar.add_blocks();
        grammar
    }

    /// Intern `text` and register it with the lexer.
    pub fn symbol(&mut self, text: &str) -> Symbol {
        let symbol = self.symbols.intern(text);
        if !self.symbols.predefined().contains(&symbol) {
            self.rules.register(text, symbol.clone());
        }
        symbol
    }

    pub fn get_symbol(&self, text: &str) -> Option<Symbol> {
        self.symbols.get(text)
    }

    pub fn predefined(&self) -> &Predefined {
        self.symbols.predefined()
    }

    pub fn register_prefix(&mut self, text: &str, parselet: impl PrefixParselet + 'static) -> Symbol {
        let symbol = self.symbol(text);
        self.registry.register_prefix(symbol.clone(), parselet);
        symbol
    }

    pub fn register_infix(
        &mut self,
        text: &str,
        precedence: u32,
        parselet: impl InfixParselet + 'static,
    ) -> Symbol {
        let symbol = self.symbol(text);
        self.registry
            .register_infix(symbol.clone(), precedence, parselet);
        symbol
    }

    pub fn register_postfix(
        &mut self,
        text: &str,
        precedence: u32,
        parselet: impl InfixParselet + 'static,
    ) -> Symbol {
        let symbol = self.symbol(text);
        self.registry
            .register_postfix(symbol.clone(), precedence, parselet);
        symbol
    }

    /// Register a named lexer context, or return the existing one with that name.
    pub fn register_context(&mut self, name: &str) -> ContextId {
        match self.rules.find_context(name) {
            Some(id) => id,
            None => self.rules.add_context(name),
        }
    }

    pub fn context_id(&self, name: &str) -> Option<ContextId> {
        self.rules.find_context(name)
    }

    /// Stop recognising `text` while `context` is active.
    pub fn suppress_in_context(&mut self, context: ContextId, text: &str) {
        let symbol = self.symbols.intern(text);
        match self.rules.context_mut(context) {
            Some(lexer_context) => lexer_context.suppress(symbol),
            None => tracing::warn!(context = context.index(), text, "unknown lexer context"),
        }
    }

    /// Stop recognising punctuators that extend `text` while `context` is active.
    pub fn suppress_compounds_in_context(&mut self, context: ContextId, text: &str) {
        match self.rules.context_mut(context) {
            Some(lexer_context) => lexer_context.suppress_compounds_of(text),
            None => tracing::warn!(context = context.index(), text, "unknown lexer context"),
        }
    }

    pub fn set_line_comment(&mut self, marker: &str) {
        self.rules.set_line_comment(Some(marker.to_string()));
    }

    pub fn set_block_comment(&mut self, start: &str, end: &str) {
        self.rules.set_block_comment(Some(BlockComment {
            start: start.to_string(),
            end: end.to_string(),
        }));
    }

    /// Parse documents as statement lists separated by `text`.
    pub fn set_statement_separator(&mut self, text: &str) -> Symbol {
        let symbol = self.symbol(text);
        self.statement_separator = Some(symbol.clone());
        symbol
    }

    pub fn statement_separator(&self) -> Option<&Symbol> {
        self.statement_separator.as_ref()
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn rules(&self) -> &LexerRules {
        &self.rules
    }

    pub fn registry(&self) -> &ParseletRegistry {
        &self.registry
    }

    pub fn parser(&self, document: SourceDocument) -> Parser<'_> {
        Parser::new(self, document)
    }

    pub fn parse(&self, document: SourceDocument) -> ParseResult<ParseOutcome> {
        self.parser(document).parse()
    }

    pub fn parse_str(&self, filename: &str, source: &str) -> ParseResult<ParseOutcome> {
        self.parse(SourceDocument::new(filename, source))
    }

    /// Lex `source` in the default context, end of input included.
    pub fn tokenize(&self, source: &str) -> Vec<Token> {
        Lexer::new(&self.rules, source).tokenize()
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::new()
    }
}
