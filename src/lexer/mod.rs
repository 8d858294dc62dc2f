//! Lexical analysis for minipascal
//!
//! Converts source text into tokens on demand, one token per pull.

mod scanner;
mod token;

pub use scanner::{tokenize, Lexer};
pub use token::{Token, TokenKind};
