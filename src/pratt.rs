//! Main module for pratt library functionality

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod formats;
pub mod lexing;
pub mod parsing;
pub mod symbol;
pub mod testing;
pub mod token;
pub mod visitor;
