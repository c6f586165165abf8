//! Error types for lexing and parsing
//!
//! Parse errors come in two classes. Local errors (`UnexpectedToken`, `InvalidLexeme`)
//! are recorded as error messages on the document and parsing carries on with an
//! `Invalid` node in place of the expected one. Context stack errors (`ContextMismatch`,
//! `UnbalancedContexts`) mean a parselet broke the scoped-release contract of the lexer
//! context stack; lexing after that is unreliable, so they are returned as `Err` from
//! [`Parser::parse`](crate::pratt::parsing::Parser::parse).

use crate::pratt::ast::range::SourceRange;
use thiserror::Error;

/// The result of a whole-document parse.
pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An expected symbol was absent, or no prefix rule exists for a token
    #[error("unexpected {found}, expected {expected}")]
    UnexpectedToken {
        expected: String,
        found: String,
        range: SourceRange,
    },

    /// The lexer could not classify input under the active context
    #[error("invalid input `{text}`")]
    InvalidLexeme { text: String, range: SourceRange },

    /// A lexer context was released while another one was on top of the stack
    #[error("lexer context `{released}` released while `{active}` was active")]
    ContextMismatch { released: String, active: String },

    /// The context stack did not return to its default entry
    #[error("lexer context stack left with {depth} entries after parsing")]
    UnbalancedContexts { depth: usize },
}

impl ParseError {
    /// Stable identifier used as the message code when the error is recorded.
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::UnexpectedToken { .. } => "unexpected-token",
            ParseError::InvalidLexeme { .. } => "invalid-lexeme",
            ParseError::ContextMismatch { .. } => "context-mismatch",
            ParseError::UnbalancedContexts { .. } => "unbalanced-contexts",
        }
    }

    pub fn range(&self) -> Option<&SourceRange> {
        match self {
            ParseError::UnexpectedToken { range, .. } | ParseError::InvalidLexeme { range, .. } => {
                Some(range)
            }
            ParseError::ContextMismatch { .. } | ParseError::UnbalancedContexts { .. } => None,
        }
    }

    /// Whether the error can be recorded as a message while parsing continues.
    pub fn is_recoverable(&self) -> bool {
        self.range().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_token_display() {
        let err = ParseError::UnexpectedToken {
            expected: "`)`".to_string(),
            found: "end of input".to_string(),
            range: SourceRange::default(),
        };
        assert_eq!(err.to_string(), "unexpected end of input, expected `)`");
        assert_eq!(err.code(), "unexpected-token");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_context_errors_are_not_recoverable() {
        let err = ParseError::ContextMismatch {
            released: "typename".to_string(),
            active: "default".to_string(),
        };
        assert!(!err.is_recoverable());
        assert_eq!(
            err.to_string(),
            "lexer context `typename` released while `default` was active"
        );
        assert!(!ParseError::UnbalancedContexts { depth: 2 }.is_recoverable());
    }
}
