//! MiniC Lexer
//!
//! Tokenizes MiniC source code into a stream of tokens. Identifiers are
//! registered in the symbol table as they are seen; their types are
//! filled in later by the semantic analyzer.

use crate::symtab::SymbolTable;
use crate::token::{Token, TokenKind};
use mcc_common::{CompilerError, SourceLocation, SourceSpan};

/// MiniC Lexer
pub struct Lexer<'a> {
    chars: Vec<char>,
    position: usize,
    filename: &'a str,
    line: u32,
    column: u32,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer over a source string
    pub fn new(source: &str, filename: &'a str) -> Self {
        Self {
            chars: source.chars().collect(),
            position: 0,
            filename,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the whole input, registering identifiers in `symbols`
    pub fn tokenize(&mut self, symbols: &mut SymbolTable) -> Result<Vec<Token>, CompilerError> {
        let mut tokens = Vec::new();

        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
                continue;
            }

            let start = self.location();
            let kind = self.next_kind(c, symbols)?;
            let end = self.location();
            tokens.push(Token::new(kind, SourceSpan::new(start, end)));
        }

        log::debug!("lexed {} tokens from {}", tokens.len(), self.filename);
        Ok(tokens)
    }

    fn next_kind(
        &mut self,
        c: char,
        symbols: &mut SymbolTable,
    ) -> Result<TokenKind, CompilerError> {
        if c.is_ascii_alphabetic() || c == '_' {
            return Ok(self.read_word(symbols));
        }
        if c.is_ascii_digit() {
            return self.read_number();
        }

        let location = self.location();
        self.advance();
        match c {
            '=' => Ok(TokenKind::Assign),
            '+' => Ok(TokenKind::Plus),
            '-' => Ok(TokenKind::Minus),
            '*' => Ok(TokenKind::Star),
            '/' => Ok(TokenKind::Slash),
            ',' => Ok(TokenKind::Comma),
            ';' => Ok(TokenKind::Semicolon),
            '(' => Ok(TokenKind::LeftParen),
            ')' => Ok(TokenKind::RightParen),
            _ => Err(CompilerError::lex_error(
                format!("unexpected character '{}'", c),
                location,
            )),
        }
    }

    /// Read an identifier or keyword
    fn read_word(&mut self, symbols: &mut SymbolTable) -> TokenKind {
        let mut word = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                word.push(c);
                self.advance();
            } else {
                break;
            }
        }

        match word.as_str() {
            "int" => TokenKind::Int,
            "return" => TokenKind::Return,
            _ => {
                if !symbols.has(&word) {
                    symbols.add(&word);
                }
                TokenKind::Id(word)
            }
        }
    }

    /// Read an integer literal
    fn read_number(&mut self) -> Result<TokenKind, CompilerError> {
        let location = self.location();
        let mut digits = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                digits.push(c);
                self.advance();
            } else {
                break;
            }
        }

        let value = digits.parse::<i32>().map_err(|_| {
            CompilerError::lex_error(format!("integer constant '{}' out of range", digits), location)
        })?;
        Ok(TokenKind::IntConst(value))
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.position += 1;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn location(&self) -> SourceLocation {
        SourceLocation::new(self.filename, self.line, self.column)
    }
}
