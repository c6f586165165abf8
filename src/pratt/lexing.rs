//! Lexing
//!
//!     Turns source text into [`Token`](crate::pratt::token::Token)s on demand. The lexer
//!     is built from three pieces:
//!
//!         1. Base tokenization with logos. See [base_tokenization](base_tokenization).
//!            Recognises the grammar-independent classes: numbers, names, strings.
//!
//!         2. Lexer rules. See [rules](rules). The punctuators and keywords a grammar
//!            registered, its comment syntax and its named contexts.
//!
//!         3. The context stack. See [context](context). Sub-grammars that need
//!            different lexical rules (generic argument lists, for instance) push a
//!            context for their duration through a scoped guard.
//!
//!     The [lexer](lexer) combines them: longest match between the registered punctuators
//!     and the base lexeme, under whichever context is on top of the stack.
//!
//!     Lexing never fails. Unrecognised input becomes an `#invalid` token and the end of
//!     input is a repeatable `#eof` token; what to do about either is the parser's call.

pub mod base_tokenization;
pub mod context;
pub mod lexer;
pub mod rules;

pub use context::{ContextGuard, ContextId, ContextStack, LexerContext};
pub use lexer::Lexer;
pub use rules::{BlockComment, LexerRules};
