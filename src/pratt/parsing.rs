//! Parsing
//!
//!     The engine and everything registered on it:
//!
//!         - [registry]: the prefix and trailing parselet slots plus the precedence table.
//!         - [grammar]: the configuration surface tying symbols, lexer rules and parselets
//!           together.
//!         - [parser]: precedence climbing over the registered parselets, with recovery.
//!         - [parselets], [presets], [typename]: ready-made rules and operator sets.
//!
//!     A typical host builds a grammar once and parses many documents with it:
//!
//!         let mut grammar = Grammar::new();
//!         grammar.add_common_literals().add_arithmetic_operators().add_grouping();
//!         let outcome = grammar.parse_str("input.expr", "1 + 2 * x")?;
//!
//!     Custom rules are either types implementing [`PrefixParselet`] / [`InfixParselet`]
//!     or closures adapted with [`prefix_fn`] / [`infix_fn`].

pub mod grammar;
pub mod parselets;
pub mod parser;
pub mod presets;
pub mod registry;
pub mod typename;

pub use grammar::Grammar;
pub use parser::{ParseOutcome, Parser};
pub use presets::{precedence, GrammarPresets};
pub use registry::{
    infix_fn, prefix_fn, Fixity, InfixParselet, ParseletRegistry, PrecedenceTable, PrefixParselet,
};
pub use typename::{GenericDelimiters, TypeNameParser};
