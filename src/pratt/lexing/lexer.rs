//! The on-demand lexer
//!
//!     Tokens are produced lazily and buffered for look-ahead. Each token is lexed under
//!     the context active at the moment it is produced. Opening or closing a context bumps
//!     the stack generation; the next `peek`/`next` notices, drops the buffer and re-lexes
//!     from the end of the last consumed token. Look-ahead therefore always reflects the
//!     active context, and consumed tokens are never revisited.
//!
//!     At a given position, after skipping whitespace and comments, the lexer takes the
//!     longer of the longest unsuppressed punctuator and the base lexeme. Ties go to the
//!     lexeme, so `ifx` is a name even with `if` registered. Input matching neither is a
//!     single-character `#invalid` token.

use super::base_tokenization::{lexeme_at, Lexeme};
use super::context::{ContextGuard, ContextId, ContextStack};
use super::rules::LexerRules;
use crate::pratt::ast::range::SourceLocation;
use crate::pratt::token::Token;
use std::collections::VecDeque;
use std::sync::Arc;

pub struct Lexer<'r> {
    rules: &'r LexerRules,
    source: Arc<str>,
    location: SourceLocation,
    /// End of the last consumed token
    position: usize,
    buffer: VecDeque<Token>,
    buffered_generation: u64,
    contexts: ContextStack,
}

impl<'r> Lexer<'r> {
    pub fn new(rules: &'r LexerRules, source: impl Into<Arc<str>>) -> Self {
        let source = source.into();
        let location = SourceLocation::new(&source);
        let contexts = ContextStack::new(rules.context(ContextId::DEFAULT).name());
        let buffered_generation = contexts.generation();
        Self {
            rules,
            source,
            location,
            position: 0,
            buffer: VecDeque::new(),
            buffered_generation,
            contexts,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    pub fn contexts(&self) -> &ContextStack {
        &self.contexts
    }

    /// Make `id` the active context until the returned guard is dropped.
    pub fn open_context(&mut self, id: ContextId) -> ContextGuard {
        let name = self.rules.context(id).name().to_string();
        self.contexts.push(id, &name)
    }

    /// The `k`-th upcoming token (0-based), without consuming anything.
    pub fn peek(&mut self, k: usize) -> &Token {
        self.sync_context();
        while self.buffer.len() <= k {
            let start = self
                .buffer
                .back()
                .map(|token| token.range.span.end)
                .unwrap_or(self.position);
            let token = self.lex_at(start);
            self.buffer.push_back(token);
        }
        &self.buffer[k]
    }

    /// Consume and return the next token. Repeats end of input forever.
    pub fn next_token(&mut self) -> Token {
        self.peek(0);
        match self.buffer.pop_front() {
            Some(token) => {
                self.position = token.range.span.end;
                token
            }
            None => self.lex_at(self.position),
        }
    }

    pub fn is_at_end(&mut self) -> bool {
        let eof = self.rules.predefined().eof.clone();
        self.peek(0).is(&eof)
    }

    /// Consume every remaining token, end of input included.
    pub fn tokenize(mut self) -> Vec<Token> {
        let eof = self.rules.predefined().eof.clone();
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.is(&eof);
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    fn sync_context(&mut self) {
        let generation = self.contexts.generation();
        if generation != self.buffered_generation {
            self.buffer.clear();
            self.buffered_generation = generation;
        }
    }

    fn lex_at(&self, from: usize) -> Token {
        let predefined = self.rules.predefined();
        let context = self.rules.context(self.contexts.active());
        let begin = self.rules.skip_trivia(&self.source, from);
        let rest = &self.source[begin..];

        if rest.is_empty() {
            return Token::new(predefined.eof.clone(), "", self.location.range(begin..begin));
        }

        let punctuator = self.rules.longest_punctuator(rest, context);
        let lexeme = lexeme_at(rest);

        let (kind, len) = match (lexeme, punctuator) {
            (Some((_, len)), Some((symbol, longest))) if longest > len => {
                (symbol.clone(), longest)
            }
            (Some((lexeme, len)), _) => {
                let kind = match lexeme {
                    Lexeme::Number => predefined.number.clone(),
                    Lexeme::String => predefined.string.clone(),
                    Lexeme::Name => self
                        .rules
                        .keyword(&rest[..len], context)
                        .unwrap_or(&predefined.name)
                        .clone(),
                };
                (kind, len)
            }
            (None, Some((symbol, len))) => (symbol.clone(), len),
            (None, None) => {
                let len = rest.chars().next().map_or(1, char::len_utf8);
                (predefined.invalid.clone(), len)
            }
        };

        let end = begin + len;
        Token::new(kind, &self.source[begin..end], self.location.range(begin..end))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields tokens up to, not including, end of input.
    fn next(&mut self) -> Option<Token> {
        let eof = self.rules.predefined().eof.clone();
        let token = self.next_token();
        if token.is(&eof) {
            None
        } else {
            Some(token)
        }
    }
}
