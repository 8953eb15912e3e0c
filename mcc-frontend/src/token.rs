//! Token definitions for the MiniC language
//!
//! The token set is deliberately small: identifiers, integer literals,
//! the `int` and `return` keywords, and the handful of operators and
//! punctuation the grammar knows about. `/` and `,` are recognized by
//! the lexer even though no production consumes them.

use mcc_common::SourceSpan;
use serde::{Deserialize, Serialize};
use std::fmt;

/// MiniC token kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    /// Identifier, carrying the source text
    Id(String),
    /// Integer literal, carrying the parsed value
    IntConst(i32),

    // Keywords
    Int,
    Return,

    // Operators
    Assign, // =
    Plus,   // +
    Minus,  // -
    Star,   // *
    Slash,  // /

    // Punctuation
    Comma,      // ,
    Semicolon,  // ;
    LeftParen,  // (
    RightParen, // )
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Id(name) => write!(f, "identifier '{}'", name),
            TokenKind::IntConst(value) => write!(f, "integer constant '{}'", value),
            TokenKind::Int => write!(f, "'int'"),
            TokenKind::Return => write!(f, "'return'"),
            TokenKind::Assign => write!(f, "'='"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::LeftParen => write!(f, "'('"),
            TokenKind::RightParen => write!(f, "')'"),
        }
    }
}

/// A token with its source span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: SourceSpan,
}

impl Token {
    pub fn new(kind: TokenKind, span: SourceSpan) -> Self {
        Self { kind, span }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_kind_display() {
        assert_eq!(format!("{}", TokenKind::Id("abc".to_string())), "identifier 'abc'");
        assert_eq!(format!("{}", TokenKind::IntConst(42)), "integer constant '42'");
        assert_eq!(format!("{}", TokenKind::Semicolon), "';'");
    }
}
