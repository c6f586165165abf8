//! # pratt
//!
//! A toolkit for building operator-precedence (Pratt) parsers.
//!
//! The engine is language agnostic: a host registers token symbols and parselets on a
//! [`Grammar`](pratt::parsing::Grammar), and the engine turns source text into an AST of
//! range-tagged [`AstNode`](pratt::ast::AstNode)s plus a list of diagnostics.
//!
//! File Layout
//!
//! src/pratt
//!   ├── symbol, token     Interned token kinds and the tokens carrying them
//!   ├── lexing            Context-sensitive lexer over a logos base tokenizer
//!   ├── parsing           Registry, precedence climbing engine, standard parselets
//!   ├── ast               Node model, source ranges, snapshots
//!   ├── visitor           Variant-keyed visitor framework and the printer
//!   ├── diagnostics       Source documents and their messages
//!   └── formats, config   Output formats and layered configuration
//!
//! For test helpers shared by unit and integration tests, see the
//! [testing module](pratt::testing).

#![allow(rustdoc::invalid_html_tags)]

pub mod pratt;
