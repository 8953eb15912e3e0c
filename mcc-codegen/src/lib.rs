//! MiniC Compiler - Code Generation Backend
//!
//! This crate handles the final phase of compilation: generating RISC-V
//! assembly from the IR instruction sequence. It includes:
//!
//! - The register model (scratch, argument and extended-scratch classes)
//! - On-the-fly register allocation with a steal policy
//! - Per-opcode instruction lowering to assembly text

pub mod asmgen;
pub mod reg;
pub mod regalloc;

pub use asmgen::AssemblyGenerator;
pub use reg::Reg;
pub use regalloc::RegisterFile;

use mcc_common::CompilerError;
use mcc_ir::{Instruction, Opcode};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodegenError {
    #[error("no free register and no stealable variable for '{0}'")]
    RegisterExhausted(String),

    #[error("invalid operand combination for {opcode}: {message}")]
    InvalidOperandCombination { opcode: Opcode, message: String },

    #[error("invalid register number: {0}")]
    InvalidRegisterNumber(u8),
}

impl From<CodegenError> for CompilerError {
    fn from(err: CodegenError) -> Self {
        CompilerError::CodegenError {
            message: err.to_string(),
        }
    }
}

/// Main entry point for code generation
pub fn generate_assembly(instructions: &[Instruction]) -> Result<String, CodegenError> {
    let mut generator = AssemblyGenerator::new();
    generator.load_ir(instructions.to_vec());
    generator.run()?;
    Ok(generator.into_assembly())
}
