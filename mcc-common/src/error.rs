//! Error handling for the MiniC compiler
//!
//! Every phase reports failure through [`CompilerError`]. All variants
//! are fatal: the pipeline aborts at the first error and never emits a
//! partial artifact.

use crate::source_loc::SourceLocation;
use thiserror::Error;

/// Main compiler error type that encompasses all phases of compilation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompilerError {
    #[error("Lexical error at {location}: {message}")]
    LexError {
        location: SourceLocation,
        message: String,
    },

    #[error("Parse error at {location}: {message}")]
    ParseError {
        location: SourceLocation,
        message: String,
    },

    #[error("Semantic error: {message}")]
    SemanticError { message: String },

    #[error("IR generation error: {message}")]
    IrError { message: String },

    #[error("Code generation error: {message}")]
    CodegenError { message: String },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("Internal compiler error: {message}")]
    InternalError { message: String },
}

impl CompilerError {
    /// Create a lexer error
    pub fn lex_error(message: String, location: SourceLocation) -> Self {
        CompilerError::LexError { location, message }
    }

    /// Create a parse error
    pub fn parse_error(message: String, location: SourceLocation) -> Self {
        CompilerError::ParseError { location, message }
    }

    /// Create a semantic error
    pub fn semantic_error(message: String) -> Self {
        CompilerError::SemanticError { message }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for CompilerError {
    fn from(err: std::io::Error) -> Self {
        CompilerError::IoError {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CompilerError::lex_error(
            "unexpected character '@'".to_string(),
            SourceLocation::new("prog.mc", 2, 5),
        );
        assert_eq!(
            format!("{}", err),
            "Lexical error at prog.mc:2:5: unexpected character '@'"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: CompilerError = io.into();
        assert!(matches!(err, CompilerError::IoError { .. }));
    }
}
