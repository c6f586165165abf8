//! The parser engine
//!
//!     A [`Parser`] drives one parse of one [`SourceDocument`]. It owns the lexer and the
//!     document being filled with messages and borrows the grammar, which stays read-only
//!     for the whole parse.
//!
//! Precedence Climbing
//!
//!     [`Parser::parse_expression`] consumes one token and runs its prefix parselet to get
//!     a left operand. Then, for as long as the next token has a trailing rule whose
//!     precedence is strictly greater than the minimum it was called with, it consumes that
//!     token and runs the trailing parselet with the current left operand. Parselets call
//!     back into `parse_expression` for their operands, which is where associativity is
//!     decided: a left-associative operator recurses with its own precedence, a
//!     right-associative one with its precedence minus one.
//!
//! Recovery
//!
//!     Local problems never stop the parse. A token with no prefix parselet, or a missing
//!     expected token, is recorded as an error message on the document and an `Invalid`
//!     node takes the place of what was expected. Every call to `parse_expression`
//!     consumes at least one token, and end of input has no trailing rule, so parsing
//!     always terminates.
//!
//!     Breaking the context stack is not local: [`Parser::parse`] reports it as `Err`.

use super::grammar::Grammar;
use crate::pratt::ast::{AstNode, SourceRange};
use crate::pratt::diagnostics::SourceDocument;
use crate::pratt::error::{ParseError, ParseResult};
use crate::pratt::lexing::{ContextGuard, ContextId, Lexer};
use crate::pratt::symbol::{Predefined, Symbol};
use crate::pratt::token::Token;
use tracing::{debug, trace};

/// A finished parse: the tree and the document with its messages
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub tree: AstNode,
    pub document: SourceDocument,
}

impl ParseOutcome {
    pub fn has_errors(&self) -> bool {
        self.document.has_errors()
    }
}

pub struct Parser<'g> {
    grammar: &'g Grammar,
    lexer: Lexer<'g>,
    document: SourceDocument,
    previous: Option<Token>,
}

impl<'g> Parser<'g> {
    pub fn new(grammar: &'g Grammar, document: SourceDocument) -> Self {
        let lexer = Lexer::new(grammar.rules(), document.shared_source());
        Self {
            grammar,
            lexer,
            document,
            previous: None,
        }
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    pub fn predefined(&self) -> &'g Predefined {
        self.grammar.predefined()
    }

    /// Look up a symbol the grammar interned, by its text.
    pub fn symbol(&self, text: &str) -> Option<Symbol> {
        self.grammar.get_symbol(text)
    }

    pub fn document(&self) -> &SourceDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut SourceDocument {
        &mut self.document
    }

    /// Parse the whole document.
    ///
    /// With a statement separator configured the tree is a `Block` of statements,
    /// otherwise it is a single expression and anything after it is reported.
    pub fn parse(mut self) -> ParseResult<ParseOutcome> {
        debug!(filename = %self.document.filename, "parsing document");
        let grammar = self.grammar;
        let tree = match grammar.statement_separator() {
            Some(separator) => self.parse_statements(separator),
            None => self.parse_single(),
        };

        if let Some(mismatch) = self.lexer.contexts().mismatch() {
            return Err(mismatch);
        }
        let depth = self.lexer.contexts().depth();
        if depth != 1 {
            return Err(ParseError::UnbalancedContexts { depth });
        }

        debug!(
            filename = %self.document.filename,
            messages = self.document.messages().len(),
            "parsed document"
        );
        Ok(ParseOutcome {
            tree,
            document: self.document,
        })
    }

    fn parse_single(&mut self) -> AstNode {
        let tree = self.parse_expression(0);
        if !self.is_at_end() {
            let token = self.look_ahead(0).clone();
            self.report_unexpected("end of input", &token);
            while !self.is_at_end() {
                self.consume();
            }
        }
        tree
    }

    fn parse_statements(&mut self, separator: &Symbol) -> AstNode {
        let start = self.look_ahead(0).range.clone();
        let mut statements = Vec::new();
        loop {
            while self.match_symbol(separator) {}
            if self.is_at_end() {
                break;
            }
            statements.push(self.parse_expression(0));
            if !self.match_symbol(separator) && !self.is_at_end() {
                let token = self.look_ahead(0).clone();
                self.report_unexpected(&format!("`{}`", separator.punctuator()), &token);
            }
        }
        let range = self.range_from(&start);
        AstNode::block(statements).with_range(range)
    }

    /// Parse an expression whose trailing operators bind tighter than `min_precedence`.
    pub fn parse_expression(&mut self, min_precedence: u32) -> AstNode {
        let grammar = self.grammar;
        let registry = grammar.registry();

        let token = self.consume();
        let mut left = match registry.prefix(&token.kind) {
            Some(parselet) => {
                trace!(symbol = %token.kind, "prefix parselet");
                parselet.parse(self, token)
            }
            None => self.missing_prefix(token),
        };

        loop {
            let kind = self.look_ahead(0).kind.clone();
            if registry.trailing_precedence(&kind) <= min_precedence {
                break;
            }
            let Some(rule) = registry.trailing(&kind) else {
                break;
            };
            let token = self.consume();
            trace!(symbol = %token.kind, fixity = ?rule.fixity, "trailing parselet");
            left = rule.parselet.parse(self, left, token);
        }
        left
    }

    fn missing_prefix(&mut self, token: Token) -> AstNode {
        let error = if token.is(&self.predefined().invalid) {
            ParseError::InvalidLexeme {
                text: token.text.clone(),
                range: token.range.clone(),
            }
        } else {
            ParseError::UnexpectedToken {
                expected: "an expression".to_string(),
                found: token.describe(),
                range: token.range.clone(),
            }
        };
        self.report(error);
        AstNode::invalid(token.text).with_range(token.range)
    }

    /// Consume and return the next token.
    pub fn consume(&mut self) -> Token {
        let token = self.lexer.next_token();
        trace!(token = %token, "consumed");
        self.previous = Some(token.clone());
        token
    }

    /// Consume the next token, recording an error when it is not `expected`.
    ///
    /// The token is returned and passed over either way.
    pub fn consume_expected(&mut self, expected: &Symbol) -> Token {
        if !self.is_match(expected) {
            let token = self.look_ahead(0).clone();
            self.report_unexpected(&format!("`{}`", expected.punctuator()), &token);
        }
        self.consume()
    }

    /// The `k`-th upcoming token, without consuming it.
    pub fn look_ahead(&mut self, k: usize) -> &Token {
        self.lexer.peek(k)
    }

    pub fn is_match(&mut self, symbol: &Symbol) -> bool {
        self.look_ahead(0).is(symbol)
    }

    /// Consume the next token if it is `symbol`.
    pub fn match_symbol(&mut self, symbol: &Symbol) -> bool {
        if self.is_match(symbol) {
            self.consume();
            true
        } else {
            false
        }
    }

    pub fn is_at_end(&mut self) -> bool {
        self.lexer.is_at_end()
    }

    /// The last consumed token.
    pub fn previous(&self) -> Option<&Token> {
        self.previous.as_ref()
    }

    /// Activate lexer context `id` until the guard is dropped.
    pub fn open_context(&mut self, id: ContextId) -> ContextGuard {
        self.lexer.open_context(id)
    }

    /// The range from `start` through the end of the last consumed token.
    pub fn range_from(&self, start: &SourceRange) -> SourceRange {
        match &self.previous {
            Some(last) => start.cover(&last.range),
            None => start.clone(),
        }
    }

    /// Parse `item (separator item)*` up to and including `terminator`.
    ///
    /// A trailing separator before the terminator is accepted. Stops at end of input,
    /// reporting the missing terminator.
    pub fn parse_separated(&mut self, separator: &Symbol, terminator: &Symbol) -> Vec<AstNode> {
        let mut items = Vec::new();
        if !self.is_match(terminator) {
            loop {
                items.push(self.parse_expression(0));
                if !self.match_symbol(separator) || self.is_match(terminator) || self.is_at_end() {
                    break;
                }
            }
        }
        self.consume_expected(terminator);
        items
    }

    /// Record a recoverable error on the document.
    pub fn report(&mut self, error: ParseError) {
        debug!(code = error.code(), %error, "recorded parse error");
        self.document.record(&error);
    }

    pub fn report_unexpected(&mut self, expected: &str, found: &Token) {
        self.report(ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: found.describe(),
            range: found.range.clone(),
        });
    }
}
