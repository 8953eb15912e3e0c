//! Assembly generation
//!
//! One linear pass over the instruction sequence, resolving registers
//! on the fly and appending one assembly line per lowered operation.
//! The sequence is a single basic block with one exit: lowering stops
//! after the first RET, and anything beyond it is unreachable.

use crate::reg::RETURN_REG;
use crate::regalloc::RegisterFile;
use crate::CodegenError;
use mcc_ir::{Instruction, Opcode, Value, Variable};

/// Reserved variable name used to materialize immediate-first SUB/MUL
/// operands. The lexer cannot produce an identifier starting with '.',
/// so it never collides with a user variable.
const SCRATCH_NAME: &str = ".imm";

/// Lowers IR to RISC-V assembly text, allocating registers as it goes
#[derive(Default)]
pub struct AssemblyGenerator {
    instructions: Vec<Instruction>,
    registers: RegisterFile,
    output: String,
}

impl AssemblyGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the instruction sequence produced by the frontend
    pub fn load_ir(&mut self, instructions: Vec<Instruction>) {
        self.instructions = instructions;
    }

    /// Lower the loaded sequence into assembly text
    pub fn run(&mut self) -> Result<(), CodegenError> {
        self.output.push_str(".text\n");

        for index in 0..self.instructions.len() {
            let ins = self.instructions[index].clone();
            log::debug!("lowering {}", ins);
            match ins.kind() {
                Opcode::Add => self.lower_add(&ins)?,
                Opcode::Sub => self.lower_sub_mul(&ins, "sub")?,
                Opcode::Mul => self.lower_sub_mul(&ins, "mul")?,
                Opcode::Mov => self.lower_mov(&ins)?,
                Opcode::Ret => {
                    self.lower_ret(&ins)?;
                    // Single basic block with one exit: everything past
                    // the first RET is unreachable
                    break;
                }
            }
        }
        Ok(())
    }

    /// The generated assembly text
    pub fn assembly(&self) -> &str {
        &self.output
    }

    pub fn into_assembly(self) -> String {
        self.output
    }

    fn push_line(&mut self, line: String) {
        self.output.push_str("    ");
        self.output.push_str(&line);
        self.output.push('\n');
    }

    /// Resolve the destination register; always done before the sources
    fn dest_reg(&mut self, ins: &Instruction) -> Result<String, CodegenError> {
        let result = ins
            .result()
            .ok_or_else(|| CodegenError::InvalidOperandCombination {
                opcode: ins.kind(),
                message: "missing result".to_string(),
            })?;
        let reg = self.registers.acquire(result, &self.instructions)?;
        Ok(reg.to_string())
    }

    /// Operand as emission text: a register name for variables, the
    /// literal for immediates
    fn operand_text(&mut self, value: &Value) -> Result<String, CodegenError> {
        match value {
            Value::Var(var) => {
                let reg = self.registers.acquire(var, &self.instructions)?;
                Ok(reg.to_string())
            }
            Value::Imm(imm) => Ok(imm.to_string()),
        }
    }

    fn check_operand_count(ins: &Instruction, expected: usize) -> Result<(), CodegenError> {
        if ins.operands().len() != expected {
            return Err(CodegenError::InvalidOperandCombination {
                opcode: ins.kind(),
                message: format!(
                    "expected {} operands, found {}",
                    expected,
                    ins.operands().len()
                ),
            });
        }
        Ok(())
    }

    fn lower_add(&mut self, ins: &Instruction) -> Result<(), CodegenError> {
        Self::check_operand_count(ins, 2)?;
        let dest = self.dest_reg(ins)?;
        let src1 = self.operand_text(&ins.operands()[0])?;
        let src2 = self.operand_text(&ins.operands()[1])?;

        match (
            ins.operands()[0].is_immediate(),
            ins.operands()[1].is_immediate(),
        ) {
            (true, true) => Err(CodegenError::InvalidOperandCombination {
                opcode: Opcode::Add,
                message: "both operands are immediate".to_string(),
            }),
            // Addition commutes, so an immediate always becomes the addi
            // offset with the variable operand as the base register
            (true, false) => {
                self.push_line(format!("addi {}, {}, {}", dest, src2, src1));
                Ok(())
            }
            (false, true) => {
                self.push_line(format!("addi {}, {}, {}", dest, src1, src2));
                Ok(())
            }
            (false, false) => {
                self.push_line(format!("add {}, {}, {}", dest, src1, src2));
                Ok(())
            }
        }
    }

    /// SUB and MUL share a shape: no immediate encoding, and the first
    /// operand position cannot hold a constant at all, so an
    /// immediate-first operand is materialized through a scratch
    /// register with li.
    ///
    /// TODO: materialize right-hand immediates too; as emitted, a
    /// literal lands in a position where the encoding expects a
    /// register name.
    fn lower_sub_mul(&mut self, ins: &Instruction, mnemonic: &str) -> Result<(), CodegenError> {
        Self::check_operand_count(ins, 2)?;
        let dest = self.dest_reg(ins)?;
        let src1 = self.operand_text(&ins.operands()[0])?;
        let src2 = self.operand_text(&ins.operands()[1])?;

        if ins.operands()[0].is_immediate() {
            let scratch = self
                .registers
                .acquire(&Variable::named(SCRATCH_NAME), &self.instructions)?;
            self.push_line(format!("li {}, {}", scratch, src1));
            self.push_line(format!("{} {}, {}, {}", mnemonic, dest, scratch, src2));
        } else {
            self.push_line(format!("{} {}, {}, {}", mnemonic, dest, src1, src2));
        }
        Ok(())
    }

    fn lower_mov(&mut self, ins: &Instruction) -> Result<(), CodegenError> {
        Self::check_operand_count(ins, 1)?;
        let dest = self.dest_reg(ins)?;

        match &ins.operands()[0] {
            Value::Imm(imm) => self.push_line(format!("li {}, {}", dest, imm)),
            Value::Var(var) => {
                let src = self.registers.acquire(var, &self.instructions)?;
                self.push_line(format!("mv {}, {}", dest, src));
            }
        }
        Ok(())
    }

    /// Place the return value in a0. No control transfer is emitted:
    /// the artifact is a fragment, not a full procedure.
    fn lower_ret(&mut self, ins: &Instruction) -> Result<(), CodegenError> {
        if let Some(value) = ins.operands().first() {
            match value {
                Value::Var(var) => {
                    let src = self.registers.acquire(var, &self.instructions)?;
                    self.push_line(format!("mv {}, {}", RETURN_REG, src));
                }
                Value::Imm(imm) => {
                    self.push_line(format!("li {}, {}", RETURN_REG, imm));
                }
            }
        }
        Ok(())
    }
}
