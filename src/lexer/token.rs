use crate::runtime::Number;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A single token from the source code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The type of token
    pub kind: TokenKind,
    /// Lexeme, present only for identifiers and numeric literals
    pub value: Option<String>,
    /// Value of a numeric literal, checked when the token was scanned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal: Option<Number>,
}

impl Token {
    /// Creates a token, keeping `value` only for kinds that carry a lexeme
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        let value = if kind.carries_value() {
            Some(value.into())
        } else {
            None
        };
        Token {
            kind,
            value,
            literal: None,
        }
    }

    /// Creates a numeric literal token with its lexeme and value
    pub fn number(lexeme: impl Into<String>, literal: Number) -> Self {
        let kind = if literal.is_integer() {
            TokenKind::IntegerConst
        } else {
            TokenKind::RealConst
        };
        Token {
            kind,
            value: Some(lexeme.into()),
            literal: Some(literal),
        }
    }

    /// Creates a token that carries no lexeme
    pub fn bare(kind: TokenKind) -> Self {
        Token {
            kind,
            value: None,
            literal: None,
        }
    }

    /// Lexeme of the token, or an empty string for bare tokens
    pub fn lexeme(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "Token({}, {})", self.kind, value),
            None => write!(f, "Token({})", self.kind),
        }
    }
}

/// All possible token types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Keywords
    /// PROGRAM keyword
    Program,
    /// VAR keyword
    Var,
    /// BEGIN keyword
    Begin,
    /// END keyword
    End,
    /// INTEGER type name
    Integer,
    /// REAL type name
    Real,
    /// DIV keyword (integer division)
    IntegerDiv,

    // Literals and names
    /// Identifier, original case preserved in the token value
    Identifier,
    /// Integer literal
    IntegerConst,
    /// Real literal
    RealConst,

    // Separators
    /// Dot (.)
    Dot,
    /// Assignment (:=)
    Assign,
    /// Semicolon (;)
    Semicolon,
    /// Left parenthesis (
    LeftParen,
    /// Right parenthesis )
    RightParen,
    /// Colon (:)
    Colon,
    /// Comma (,)
    Comma,

    // Operators
    /// Plus operator (+)
    Plus,
    /// Minus operator (-)
    Minus,
    /// Star operator (*)
    Mul,
    /// Slash operator (/), real division
    FloatDiv,

    // Special
    /// End of input marker
    Eof,
}

lazy_static! {
    /// Reserved words, keyed by their lowercase spelling
    static ref RESERVED_WORDS: HashMap<&'static str, TokenKind> = {
        let mut words = HashMap::new();
        words.insert("program", TokenKind::Program);
        words.insert("var", TokenKind::Var);
        words.insert("begin", TokenKind::Begin);
        words.insert("end", TokenKind::End);
        words.insert("div", TokenKind::IntegerDiv);
        words.insert("integer", TokenKind::Integer);
        words.insert("real", TokenKind::Real);
        words
    };
}

impl TokenKind {
    /// Check if token is a keyword
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Program
                | TokenKind::Var
                | TokenKind::Begin
                | TokenKind::End
                | TokenKind::Integer
                | TokenKind::Real
                | TokenKind::IntegerDiv
        )
    }

    /// Whether tokens of this kind carry a lexeme
    pub fn carries_value(&self) -> bool {
        matches!(
            self,
            TokenKind::Identifier | TokenKind::IntegerConst | TokenKind::RealConst
        )
    }

    /// Look up a reserved word, ignoring case
    pub fn keyword(word: &str) -> Option<TokenKind> {
        RESERVED_WORDS.get(word.to_ascii_lowercase().as_str()).copied()
    }

    /// Diagnostic name of the kind
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Program => "Program",
            TokenKind::Var => "Var",
            TokenKind::Begin => "Begin",
            TokenKind::End => "End",
            TokenKind::Integer => "Integer",
            TokenKind::Real => "Real",
            TokenKind::IntegerDiv => "Div",
            TokenKind::Identifier => "Identifier",
            TokenKind::IntegerConst => "IntegerConstant",
            TokenKind::RealConst => "RealConstant",
            TokenKind::Dot => "Dot",
            TokenKind::Assign => "Assign",
            TokenKind::Semicolon => "Semicolon",
            TokenKind::LeftParen => "LeftParen",
            TokenKind::RightParen => "RightParen",
            TokenKind::Colon => "Colon",
            TokenKind::Comma => "Comma",
            TokenKind::Plus => "Plus",
            TokenKind::Minus => "Minus",
            TokenKind::Mul => "Mul",
            TokenKind::FloatDiv => "FloatDiv",
            TokenKind::Eof => "EndOfFile",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
