//! MiniC Compiler - Frontend
//!
//! This crate covers everything up to intermediate code: tokens and the
//! lexer, the symbol table, the grammar's productions, the shift/reduce
//! parser that drives registered [`ActionObserver`]s, and the semantic
//! analyzer that propagates declared types into the symbol table.

pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod semantic;
pub mod symtab;
pub mod token;

pub use grammar::Production;
pub use lexer::Lexer;
pub use parser::{ActionObserver, ParseContext, Parser};
pub use semantic::SemanticAnalyzer;
pub use symtab::{SourceType, SymbolTable};
pub use token::{Token, TokenKind};
