//! MiniC Compiler - Common Types and Utilities
//!
//! This crate contains the shared types and error definitions used
//! across all phases of the MiniC compiler.

pub mod error;
pub mod source_loc;

pub use error::CompilerError;
pub use source_loc::{SourceLocation, SourceSpan};
