//! Semantic analysis: declared-type propagation
//!
//! The analyzer observes the parse and keeps two stacks, one of tokens
//! and one of types, in lockstep with the parser's symbol stack. The
//! only semantic information in the language is the `int` on a
//! declaration: `D -> int` carries the type up one level, and
//! `S -> D id` writes it onto the identifier's symbol-table entry.

use crate::grammar::Production;
use crate::parser::{ActionObserver, ParseContext};
use crate::symtab::SourceType;
use crate::token::{Token, TokenKind};
use mcc_common::CompilerError;

/// Type-propagating parse observer
#[derive(Default)]
pub struct SemanticAnalyzer {
    token_stack: Vec<Option<Token>>,
    type_stack: Vec<Option<SourceType>>,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    fn pop_slot(&mut self) -> Result<(Option<Token>, Option<SourceType>), CompilerError> {
        match (self.token_stack.pop(), self.type_stack.pop()) {
            (Some(token), Some(ty)) => Ok((token, ty)),
            _ => Err(CompilerError::InternalError {
                message: "semantic stack underflow".to_string(),
            }),
        }
    }

    fn push_placeholder(&mut self) {
        self.token_stack.push(None);
        self.type_stack.push(None);
    }

    fn reduce_declaration(&mut self, ctx: &mut ParseContext<'_>) -> Result<(), CompilerError> {
        // S -> D id: the id slot carries the token, the D slot the type
        let (id_token, _) = self.pop_slot()?;
        let (_, declared_type) = self.pop_slot()?;

        let name = match id_token.as_ref().map(|t| &t.kind) {
            Some(TokenKind::Id(name)) => name.clone(),
            _ => {
                return Err(CompilerError::InternalError {
                    message: "declaration reduced without an identifier on the stack".to_string(),
                })
            }
        };
        let ty = declared_type.ok_or_else(|| CompilerError::InternalError {
            message: "declaration reduced without a type on the stack".to_string(),
        })?;

        let entry = ctx.symbols.get_mut(&name).ok_or_else(|| {
            CompilerError::semantic_error(format!("undeclared identifier '{}'", name))
        })?;
        if entry.ty.is_some() {
            return Err(CompilerError::semantic_error(format!(
                "identifier '{}' is declared twice",
                name
            )));
        }
        entry.ty = Some(ty);
        log::debug!("declared '{}' as {}", name, ty);

        self.push_placeholder();
        Ok(())
    }
}

impl ActionObserver for SemanticAnalyzer {
    fn on_shift(
        &mut self,
        _ctx: &mut ParseContext<'_>,
        token: &Token,
    ) -> Result<(), CompilerError> {
        self.token_stack.push(Some(token.clone()));
        // Only the 'int' keyword carries a type
        if token.kind == TokenKind::Int {
            self.type_stack.push(Some(SourceType::Int));
        } else {
            self.type_stack.push(None);
        }
        Ok(())
    }

    fn on_reduce(
        &mut self,
        ctx: &mut ParseContext<'_>,
        production: Production,
    ) -> Result<(), CompilerError> {
        match production {
            Production::Declare => self.reduce_declaration(ctx),
            Production::DeclInt => {
                // D -> int: carry the type through the reduction
                let (_, ty) = self.pop_slot()?;
                self.token_stack.push(None);
                self.type_stack.push(ty);
                Ok(())
            }
            _ => {
                for _ in 0..production.rhs_len() {
                    self.pop_slot()?;
                }
                self.push_placeholder();
                Ok(())
            }
        }
    }

    fn on_accept(&mut self, _ctx: &mut ParseContext<'_>) -> Result<(), CompilerError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;
    use crate::symtab::SymbolTable;
    use pretty_assertions::assert_eq;

    fn analyze(source: &str) -> Result<SymbolTable, CompilerError> {
        let mut symbols = SymbolTable::new();
        let tokens = Lexer::new(source, "test.mc").tokenize(&mut symbols)?;
        let mut analyzer = SemanticAnalyzer::new();
        {
            let mut observers: Vec<&mut dyn ActionObserver> = vec![&mut analyzer];
            Parser::new(tokens).parse(&mut symbols, &mut observers)?;
        }
        Ok(symbols)
    }

    #[test]
    fn test_declaration_sets_type() {
        let symbols = analyze("int a; return a;").unwrap();
        assert_eq!(symbols.get("a").unwrap().ty, Some(SourceType::Int));
    }

    #[test]
    fn test_multiple_declarations() {
        let symbols = analyze("int a; int b; a = 1; b = a; return b;").unwrap();
        assert_eq!(symbols.get("a").unwrap().ty, Some(SourceType::Int));
        assert_eq!(symbols.get("b").unwrap().ty, Some(SourceType::Int));
    }

    #[test]
    fn test_undeclared_use_keeps_entry_untyped() {
        // Assignment to an undeclared name parses; only the declaration
        // production writes types, so the entry stays untyped.
        let symbols = analyze("a = 1; return a;").unwrap();
        assert_eq!(symbols.get("a").unwrap().ty, None);
    }

    #[test]
    fn test_double_declaration_is_an_error() {
        let err = analyze("int a; int a; return a;").unwrap_err();
        assert!(matches!(err, CompilerError::SemanticError { .. }));
        assert!(format!("{}", err).contains("declared twice"));
    }

    #[test]
    fn test_stack_discipline_across_expressions() {
        // Deep expression nesting must pop exactly as many slots as it
        // pushed; a depth mismatch would surface as an internal error.
        let result = analyze("int a; a = ((1 + 2) * (3 - 4)) * a; return a;");
        assert!(result.is_ok());
    }
}
