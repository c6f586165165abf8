//! Grammar presets
//!
//! Conventional operator sets, installed on a [`Grammar`] through the
//! [`GrammarPresets`] extension trait. Each preset only adds rules, so they compose in
//! any order and hosts can override individual symbols afterwards (last registration
//! wins).

use super::grammar::Grammar;
use super::parselets::{
    AssignParselet, BinaryOperatorParselet, BlockParselet, BooleanParselet, CallParselet,
    ConditionalParselet, GroupParselet, NameParselet, NumberParselet, PostfixOperatorParselet,
    PrefixOperatorParselet, StringParselet,
};
use crate::pratt::symbol::{NAME, NUMBER, STRING};

/// Binding powers used by the presets, loosest first
pub mod precedence {
    pub const ASSIGNMENT: u32 = 10;
    pub const CONDITIONAL: u32 = 20;
    pub const LOGICAL_OR: u32 = 30;
    pub const LOGICAL_AND: u32 = 40;
    pub const BITWISE: u32 = 45;
    pub const EQUALITY: u32 = 50;
    pub const COMPARISON: u32 = 60;
    pub const SHIFT: u32 = 65;
    pub const SUM: u32 = 70;
    pub const PRODUCT: u32 = 80;
    pub const EXPONENT: u32 = 90;
    pub const PREFIX: u32 = 100;
    pub const POSTFIX: u32 = 110;
    pub const CALL: u32 = 120;
}

pub trait GrammarPresets {
    /// Names, numbers, strings, `true` and `false`.
    fn add_common_literals(&mut self) -> &mut Self;
    /// Prefix `-` `+`, `+ - * / %`, right-associative `^` and postfix `!`.
    fn add_arithmetic_operators(&mut self) -> &mut Self;
    /// Prefix `!`, `&& ||`, equality and comparison operators.
    fn add_logical_operators(&mut self) -> &mut Self;
    /// `& |`, shifts `<< >>` and prefix `~`.
    fn add_bitwise_operators(&mut self) -> &mut Self;
    /// `name = value`.
    fn add_assignment(&mut self) -> &mut Self;
    /// `condition ? then : else`.
    fn add_conditional(&mut self) -> &mut Self;
    /// Parenthesized groups and calls with comma-separated arguments.
    fn add_grouping(&mut self) -> &mut Self;
    /// Braced blocks of `;`-separated statements.
    fn add_blocks(&mut self) -> &mut Self;
}

impl GrammarPresets for Grammar {
    fn add_common_literals(&mut self) -> &mut Self {
        self.register_prefix(NAME, NameParselet);
        self.register_prefix(NUMBER, NumberParselet);
        self.register_prefix(STRING, StringParselet);
        self.register_prefix("true", BooleanParselet { value: true });
        self.register_prefix("false", BooleanParselet { value: false });
        self
    }

    fn add_arithmetic_operators(&mut self) -> &mut Self {
        for op in ["-", "+"] {
            self.register_prefix(op, PrefixOperatorParselet { precedence: precedence::PREFIX });
        }
        for op in ["+", "-"] {
            self.register_infix(op, precedence::SUM, BinaryOperatorParselet::left(precedence::SUM));
        }
        for op in ["*", "/", "%"] {
            self.register_infix(
                op,
                precedence::PRODUCT,
                BinaryOperatorParselet::left(precedence::PRODUCT),
            );
        }
        self.register_infix(
            "^",
            precedence::EXPONENT,
            BinaryOperatorParselet::right(precedence::EXPONENT),
        );
        self.register_postfix("!", precedence::POSTFIX, PostfixOperatorParselet);
        self
    }

    fn add_logical_operators(&mut self) -> &mut Self {
        self.register_prefix("!", PrefixOperatorParselet { precedence: precedence::PREFIX });
        let levels = [
            ("||", precedence::LOGICAL_OR),
            ("&&", precedence::LOGICAL_AND),
            ("==", precedence::EQUALITY),
            ("!=", precedence::EQUALITY),
            ("<", precedence::COMPARISON),
            (">", precedence::COMPARISON),
            ("<=", precedence::COMPARISON),
            (">=", precedence::COMPARISON),
        ];
        for (op, power) in levels {
            self.register_infix(op, power, BinaryOperatorParselet::left(power));
        }
        self
    }

    fn add_bitwise_operators(&mut self) -> &mut Self {
        self.register_prefix("~", PrefixOperatorParselet { precedence: precedence::PREFIX });
        for (op, power) in [
            ("&", precedence::BITWISE),
            ("|", precedence::BITWISE),
            ("<<", precedence::SHIFT),
            (">>", precedence::SHIFT),
        ] {
            self.register_infix(op, power, BinaryOperatorParselet::left(power));
        }
        self
    }

    fn add_assignment(&mut self) -> &mut Self {
        self.register_infix(
            "=",
            precedence::ASSIGNMENT,
            AssignParselet { precedence: precedence::ASSIGNMENT },
        );
        self
    }

    fn add_conditional(&mut self) -> &mut Self {
        let colon = self.symbol(":");
        self.register_infix(
            "?",
            precedence::CONDITIONAL,
            ConditionalParselet {
                colon,
                precedence: precedence::CONDITIONAL,
            },
        );
        self
    }

    fn add_grouping(&mut self) -> &mut Self {
        let close = self.symbol(")");
        let separator = self.symbol(",");
        self.register_prefix("(", GroupParselet { close: close.clone() });
        self.register_infix("(", precedence::CALL, CallParselet { close, separator });
        self
    }

    fn add_blocks(&mut self) -> &mut Self {
        let terminator = self.symbol("}");
        let separator = self.symbol(";");
        self.register_prefix("{", BlockParselet { separator, terminator });
        self
    }
}
