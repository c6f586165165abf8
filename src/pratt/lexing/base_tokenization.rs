//! Base tokenization
//!
//!     The grammar-independent token classes, recognised with logos. The lexer asks for
//!     the lexeme at its current position and weighs it against the longest registered
//!     punctuator, so this module only has to answer "which class starts here, and how
//!     long is it".
//!
//!     Numbers are digit runs with an optional fraction. The fraction is taken by hand
//!     after the logos match so that `1.` followed by a non-digit stays a number and a
//!     punctuator (member access, ranges) instead of failing the whole match.

use logos::Logos;

/// Token classes every grammar shares
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lexeme {
    #[regex(r"[0-9]+")]
    Number,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Name,

    // Double-quoted, backslash escapes, no raw newlines
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,
}

/// The lexeme starting at the beginning of `rest`, with its byte length.
pub fn lexeme_at(rest: &str) -> Option<(Lexeme, usize)> {
    let mut lexer = Lexeme::lexer(rest);
    match lexer.next() {
        Some(Ok(lexeme)) if lexer.span().start == 0 => {
            let mut len = lexer.span().end;
            if lexeme == Lexeme::Number {
                len += fraction_len(&rest[len..]);
            }
            Some((lexeme, len))
        }
        _ => None,
    }
}

fn fraction_len(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'.' || !bytes[1].is_ascii_digit() {
        return 0;
    }
    1 + bytes[1..].iter().take_while(|b| b.is_ascii_digit()).count()
}

/// True when `text` has the shape of a name, which makes a registered symbol a keyword.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Resolve the escapes of a string lexeme, without its surrounding quotes.
pub fn unescape(text: &str) -> String {
    let inner = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text);
    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            value.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => value.push('\n'),
            Some('t') => value.push('\t'),
            Some('r') => value.push('\r'),
            Some('0') => value.push('\0'),
            Some(other) => value.push(other),
            None => value.push('\\'),
        }
    }
    value
}
