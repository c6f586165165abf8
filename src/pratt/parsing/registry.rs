//! Parselet registry and precedence table
//!
//! A symbol has at most one prefix parselet and at most one trailing parselet. Infix and
//! postfix rules share the trailing slot: both take the already parsed left operand, they
//! differ only in whether they parse a right operand. Registering again replaces what was
//! there.

use super::parser::Parser;
use crate::pratt::ast::AstNode;
use crate::pratt::symbol::Symbol;
use crate::pratt::token::Token;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A rule for tokens that start an expression
pub trait PrefixParselet: Send + Sync {
    fn parse(&self, parser: &mut Parser<'_>, token: Token) -> AstNode;
}

/// A rule for tokens that follow a complete left operand
pub trait InfixParselet: Send + Sync {
    fn parse(&self, parser: &mut Parser<'_>, left: AstNode, token: Token) -> AstNode;
}

struct PrefixFn<F>(F);

impl<F> PrefixParselet for PrefixFn<F>
where
    F: Fn(&mut Parser<'_>, Token) -> AstNode + Send + Sync,
{
    fn parse(&self, parser: &mut Parser<'_>, token: Token) -> AstNode {
        (self.0)(parser, token)
    }
}

struct InfixFn<F>(F);

impl<F> InfixParselet for InfixFn<F>
where
    F: Fn(&mut Parser<'_>, AstNode, Token) -> AstNode + Send + Sync,
{
    fn parse(&self, parser: &mut Parser<'_>, left: AstNode, token: Token) -> AstNode {
        (self.0)(parser, left, token)
    }
}

/// Adapt a closure into a prefix parselet.
pub fn prefix_fn<F>(f: F) -> impl PrefixParselet
where
    F: Fn(&mut Parser<'_>, Token) -> AstNode + Send + Sync,
{
    PrefixFn(f)
}

/// Adapt a closure into an infix or postfix parselet.
pub fn infix_fn<F>(f: F) -> impl InfixParselet
where
    F: Fn(&mut Parser<'_>, AstNode, Token) -> AstNode + Send + Sync,
{
    InfixFn(f)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixity {
    Infix,
    Postfix,
}

#[derive(Clone)]
pub struct TrailingRule {
    pub fixity: Fixity,
    pub parselet: Arc<dyn InfixParselet>,
}

impl fmt::Debug for TrailingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrailingRule")
            .field("fixity", &self.fixity)
            .finish_non_exhaustive()
    }
}

/// Binding powers of trailing symbols
#[derive(Debug, Clone, Default)]
pub struct PrecedenceTable {
    powers: HashMap<Symbol, u32>,
}

impl PrecedenceTable {
    pub fn set(&mut self, symbol: Symbol, precedence: u32) {
        if precedence == 0 {
            tracing::warn!(
                symbol = %symbol,
                "precedence 0 registered; the rule can never bind"
            );
        }
        self.powers.insert(symbol, precedence);
    }

    /// The binding power of `symbol`, 0 when it has none.
    pub fn get(&self, symbol: &Symbol) -> u32 {
        self.powers.get(symbol).copied().unwrap_or(0)
    }
}

#[derive(Default, Clone)]
pub struct ParseletRegistry {
    prefix: HashMap<Symbol, Arc<dyn PrefixParselet>>,
    trailing: HashMap<Symbol, TrailingRule>,
    precedence: PrecedenceTable,
}

impl ParseletRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_prefix(&mut self, symbol: Symbol, parselet: impl PrefixParselet + 'static) {
        tracing::trace!(symbol = %symbol, "registered prefix parselet");
        self.prefix.insert(symbol, Arc::new(parselet));
    }

    pub fn register_infix(
        &mut self,
        symbol: Symbol,
        precedence: u32,
        parselet: impl InfixParselet + 'static,
    ) {
        self.register_trailing(symbol, precedence, Fixity::Infix, Arc::new(parselet));
    }

    pub fn register_postfix(
        &mut self,
        symbol: Symbol,
        precedence: u32,
        parselet: impl InfixParselet + 'static,
    ) {
        self.register_trailing(symbol, precedence, Fixity::Postfix, Arc::new(parselet));
    }

    fn register_trailing(
        &mut self,
        symbol: Symbol,
        precedence: u32,
        fixity: Fixity,
        parselet: Arc<dyn InfixParselet>,
    ) {
        tracing::trace!(symbol = %symbol, precedence, ?fixity, "registered trailing parselet");
        self.precedence.set(symbol.clone(), precedence);
        self.trailing.insert(symbol, TrailingRule { fixity, parselet });
    }

    pub fn prefix(&self, symbol: &Symbol) -> Option<&dyn PrefixParselet> {
        self.prefix.get(symbol).map(|parselet| parselet.as_ref())
    }

    pub fn trailing(&self, symbol: &Symbol) -> Option<&TrailingRule> {
        self.trailing.get(symbol)
    }

    /// Binding power of `symbol` as a trailing operator; 0 when it has no trailing rule.
    pub fn trailing_precedence(&self, symbol: &Symbol) -> u32 {
        if self.trailing.contains_key(symbol) {
            self.precedence.get(symbol)
        } else {
            0
        }
    }

    pub fn precedence(&self) -> &PrecedenceTable {
        &self.precedence
    }
}

impl fmt::Debug for ParseletRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseletRegistry")
            .field("prefix", &self.prefix.keys().collect::<Vec<_>>())
            .field("trailing", &self.trailing)
            .field("precedence", &self.precedence)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pratt::symbol::SymbolTable;

    #[test]
    fn test_missing_lookup_is_none() {
        let mut table = SymbolTable::new();
        let registry = ParseletRegistry::new();
        let plus = table.intern("+");
        assert!(registry.prefix(&plus).is_none());
        assert!(registry.trailing(&plus).is_none());
        assert_eq!(registry.trailing_precedence(&plus), 0);
    }

    #[test]
    fn test_trailing_slot_is_shared() {
        let mut table = SymbolTable::new();
        let bang = table.intern("!");
        let mut registry = ParseletRegistry::new();
        registry.register_infix(bang.clone(), 10, infix_fn(|_, left, _| left));
        registry.register_postfix(bang.clone(), 30, infix_fn(|_, left, _| left));

        let rule = registry.trailing(&bang).unwrap();
        assert_eq!(rule.fixity, Fixity::Postfix);
        assert_eq!(registry.trailing_precedence(&bang), 30);
    }

    #[test]
    fn test_prefix_and_trailing_coexist() {
        let mut table = SymbolTable::new();
        let minus = table.intern("-");
        let mut registry = ParseletRegistry::new();
        registry.register_prefix(minus.clone(), prefix_fn(|_, _| AstNode::name("neg")));
        registry.register_infix(minus.clone(), 70, infix_fn(|_, left, _| left));
        assert!(registry.prefix(&minus).is_some());
        assert_eq!(registry.trailing(&minus).unwrap().fixity, Fixity::Infix);
    }

    #[test]
    fn test_registry_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ParseletRegistry>();
    }
}
