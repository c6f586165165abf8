//! Tokens produced by the lexer
//!
//!     A token is the unit the parser consumes: the interned [`Symbol`] naming its kind,
//!     the exact source text it was lexed from, and its [`SourceRange`]. Tokens are
//!     immutable once produced. Ranges of successive tokens never overlap and increase
//!     monotonically; the end-of-input token has an empty range at the end of the source
//!     and repeats for as long as it is requested.

use crate::pratt::ast::range::SourceRange;
use crate::pratt::symbol::Symbol;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: Symbol,
    pub text: String,
    pub range: SourceRange,
}

impl Token {
    pub fn new(kind: Symbol, text: impl Into<String>, range: SourceRange) -> Self {
        Self {
            kind,
            text: text.into(),
            range,
        }
    }

    pub fn is(&self, kind: &Symbol) -> bool {
        &self.kind == kind
    }

    /// How the token reads in a diagnostic: its text, or its kind when it has none.
    pub fn describe(&self) -> String {
        if self.text.is_empty() {
            match self.kind.punctuator() {
                crate::pratt::symbol::EOF => "end of input".to_string(),
                other => other.to_string(),
            }
        } else {
            format!("`{}`", self.text)
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}` @ {}", self.kind, self.text, self.range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pratt::ast::range::SourceLocation;
    use crate::pratt::symbol::SymbolTable;

    #[test]
    fn test_describe_eof() {
        let table = SymbolTable::new();
        let range = SourceLocation::new("").range(0..0);
        let eof = Token::new(table.predefined().eof.clone(), "", range);
        assert_eq!(eof.describe(), "end of input");
    }

    #[test]
    fn test_describe_text() {
        let mut table = SymbolTable::new();
        let plus = table.intern("+");
        let token = Token::new(plus.clone(), "+", SourceLocation::new("+").range(0..1));
        assert!(token.is(&plus));
        assert_eq!(token.describe(), "`+`");
        assert_eq!(token.to_string(), "+ `+` @ 0:0..0:1");
    }
}
