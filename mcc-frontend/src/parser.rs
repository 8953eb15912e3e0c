//! MiniC shift/reduce parser
//!
//! The parser walks the token stream and publishes shift, reduce and
//! accept events to a set of registered [`ActionObserver`]s. Events are
//! emitted in the order a bottom-up parse of this grammar produces
//! them: every token is shifted in input order, and each production's
//! reduce fires immediately after the last event of its right-hand
//! side. The observers (semantic analyzer, IR generator) keep their own
//! stacks in lockstep with these events and never see the tokens any
//! other way.

use crate::grammar::Production;
use crate::symtab::SymbolTable;
use crate::token::{Token, TokenKind};
use mcc_common::{CompilerError, SourceLocation};
use std::collections::VecDeque;
use thiserror::Error;

/// Parser status handed to observers on every event.
///
/// Carries the exclusive symbol-table borrow for the duration of the
/// parse; observers that need the table (the semantic analyzer) reach
/// it through here instead of holding their own reference.
pub struct ParseContext<'a> {
    pub symbols: &'a mut SymbolTable,
}

/// Observer of the parser's shift/reduce event stream
pub trait ActionObserver {
    fn on_shift(
        &mut self,
        ctx: &mut ParseContext<'_>,
        token: &Token,
    ) -> Result<(), CompilerError>;

    fn on_reduce(
        &mut self,
        ctx: &mut ParseContext<'_>,
        production: Production,
    ) -> Result<(), CompilerError>;

    fn on_accept(&mut self, ctx: &mut ParseContext<'_>) -> Result<(), CompilerError>;
}

/// Parse error types specific to the parser
#[derive(Error, Debug, Clone)]
pub enum ParseError {
    #[error("expected {expected}, found {}", .found.kind)]
    UnexpectedToken { expected: String, found: Token },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEndOfFile { expected: String, location: SourceLocation },
}

impl From<ParseError> for CompilerError {
    fn from(err: ParseError) -> Self {
        let location = match &err {
            ParseError::UnexpectedToken { found, .. } => found.span.start.clone(),
            ParseError::UnexpectedEndOfFile { location, .. } => location.clone(),
        };
        CompilerError::parse_error(err.to_string(), location)
    }
}

/// Event fan-out to the registered observers
struct Events<'c, 'o, 's> {
    ctx: ParseContext<'c>,
    observers: &'o mut [&'s mut dyn ActionObserver],
}

impl Events<'_, '_, '_> {
    fn shift(&mut self, token: &Token) -> Result<(), CompilerError> {
        log::debug!("shift {}", token.kind);
        for observer in self.observers.iter_mut() {
            observer.on_shift(&mut self.ctx, token)?;
        }
        Ok(())
    }

    fn reduce(&mut self, production: Production) -> Result<(), CompilerError> {
        log::debug!("reduce {}", production);
        for observer in self.observers.iter_mut() {
            observer.on_reduce(&mut self.ctx, production)?;
        }
        Ok(())
    }

    fn accept(&mut self) -> Result<(), CompilerError> {
        log::debug!("accept");
        for observer in self.observers.iter_mut() {
            observer.on_accept(&mut self.ctx)?;
        }
        Ok(())
    }
}

/// MiniC Parser
pub struct Parser {
    tokens: VecDeque<Token>,
    last_location: SourceLocation,
}

impl Parser {
    /// Create a new parser over a token stream
    pub fn new(tokens: Vec<Token>) -> Self {
        let last_location = tokens
            .last()
            .map(|t| t.span.end.clone())
            .unwrap_or_else(SourceLocation::dummy);
        Self {
            tokens: tokens.into(),
            last_location,
        }
    }

    /// Run the parse, publishing events to `observers`
    pub fn parse(
        mut self,
        symbols: &mut SymbolTable,
        observers: &mut [&mut dyn ActionObserver],
    ) -> Result<(), CompilerError> {
        let mut events = Events {
            ctx: ParseContext { symbols },
            observers,
        };

        self.parse_stmt_list(&mut events)?;
        if let Some(found) = self.tokens.pop_front() {
            return Err(ParseError::UnexpectedToken {
                expected: "end of input".to_string(),
                found,
            }
            .into());
        }
        events.reduce(Production::Program)?;
        events.accept()
    }

    fn parse_stmt_list(&mut self, events: &mut Events<'_, '_, '_>) -> Result<(), CompilerError> {
        self.parse_stmt(events)?;
        self.expect_shift(TokenKind::Semicolon, "statement", events)?;

        if self.at_statement_start() {
            self.parse_stmt_list(events)?;
            events.reduce(Production::StmtListCons)
        } else {
            events.reduce(Production::StmtListLast)
        }
    }

    fn parse_stmt(&mut self, events: &mut Events<'_, '_, '_>) -> Result<(), CompilerError> {
        match self.peek_kind() {
            Some(TokenKind::Int) => {
                self.shift_next(events)?;
                events.reduce(Production::DeclInt)?;
                self.expect_shift(TokenKind::Id(String::new()), "declaration", events)?;
                events.reduce(Production::Declare)
            }
            Some(TokenKind::Id(_)) => {
                self.shift_next(events)?;
                self.expect_shift(TokenKind::Assign, "assignment", events)?;
                self.parse_expr(events)?;
                events.reduce(Production::Assign)
            }
            Some(TokenKind::Return) => {
                self.shift_next(events)?;
                self.parse_expr(events)?;
                events.reduce(Production::Return)
            }
            _ => Err(self.unexpected("a statement")),
        }
    }

    fn parse_expr(&mut self, events: &mut Events<'_, '_, '_>) -> Result<(), CompilerError> {
        self.parse_term(events)?;
        events.reduce(Production::ExprFromTerm)?;

        loop {
            match self.peek_kind() {
                Some(TokenKind::Plus) => {
                    self.shift_next(events)?;
                    self.parse_term(events)?;
                    events.reduce(Production::AddExpr)?;
                }
                Some(TokenKind::Minus) => {
                    self.shift_next(events)?;
                    self.parse_term(events)?;
                    events.reduce(Production::SubExpr)?;
                }
                _ => return Ok(()),
            }
        }
    }

    fn parse_term(&mut self, events: &mut Events<'_, '_, '_>) -> Result<(), CompilerError> {
        self.parse_factor(events)?;
        events.reduce(Production::TermFromFactor)?;

        while matches!(self.peek_kind(), Some(TokenKind::Star)) {
            self.shift_next(events)?;
            self.parse_factor(events)?;
            events.reduce(Production::MulTerm)?;
        }
        Ok(())
    }

    fn parse_factor(&mut self, events: &mut Events<'_, '_, '_>) -> Result<(), CompilerError> {
        match self.peek_kind() {
            Some(TokenKind::Id(_)) => {
                self.shift_next(events)?;
                events.reduce(Production::FactorFromId)
            }
            Some(TokenKind::IntConst(_)) => {
                self.shift_next(events)?;
                events.reduce(Production::FactorFromConst)
            }
            Some(TokenKind::LeftParen) => {
                self.shift_next(events)?;
                self.parse_expr(events)?;
                self.expect_shift(TokenKind::RightParen, "parenthesized expression", events)?;
                events.reduce(Production::Parenthesized)
            }
            _ => Err(self.unexpected("an expression")),
        }
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.tokens.front().map(|t| &t.kind)
    }

    fn at_statement_start(&self) -> bool {
        matches!(
            self.peek_kind(),
            Some(TokenKind::Int) | Some(TokenKind::Id(_)) | Some(TokenKind::Return)
        )
    }

    /// Consume the next token and publish the shift event
    fn shift_next(&mut self, events: &mut Events<'_, '_, '_>) -> Result<Token, CompilerError> {
        match self.tokens.pop_front() {
            Some(token) => {
                events.shift(&token)?;
                Ok(token)
            }
            None => Err(ParseError::UnexpectedEndOfFile {
                expected: "a token".to_string(),
                location: self.last_location.clone(),
            }
            .into()),
        }
    }

    /// Shift the next token if it matches `kind`, else report an error
    fn expect_shift(
        &mut self,
        kind: TokenKind,
        context: &str,
        events: &mut Events<'_, '_, '_>,
    ) -> Result<Token, CompilerError> {
        match self.tokens.front() {
            Some(token)
                if std::mem::discriminant(&token.kind) == std::mem::discriminant(&kind) =>
            {
                self.shift_next(events)
            }
            Some(token) => Err(ParseError::UnexpectedToken {
                expected: format!("{} in {}", kind, context),
                found: token.clone(),
            }
            .into()),
            None => Err(ParseError::UnexpectedEndOfFile {
                expected: format!("{} in {}", kind, context),
                location: self.last_location.clone(),
            }
            .into()),
        }
    }

    fn unexpected(&self, expected: &str) -> CompilerError {
        match self.tokens.front() {
            Some(token) => ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: token.clone(),
            }
            .into(),
            None => ParseError::UnexpectedEndOfFile {
                expected: expected.to_string(),
                location: self.last_location.clone(),
            }
            .into(),
        }
    }
}
