//! IR value and instruction model
//!
//! Values are either variables (user-declared names or compiler
//! temporaries) or signed integer immediates. Instructions are
//! immutable once created: an opcode, an ordered operand list, and an
//! optional result (absent only for RET). The sequence is append-only
//! during generation and read-only during code generation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An IR variable: a stable name, user-declared or compiler-generated
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variable {
    Named(String),
    Temp(u32),
}

impl Variable {
    pub fn named(name: impl Into<String>) -> Self {
        Variable::Named(name.into())
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variable::Named(name) => write!(f, "{}", name),
            Variable::Temp(id) => write!(f, "t{}", id),
        }
    }
}

/// An IR operand
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    Var(Variable),
    Imm(i32),
}

impl Value {
    pub fn is_immediate(&self) -> bool {
        matches!(self, Value::Imm(_))
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Value::Var(var) => Some(var),
            Value::Imm(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Var(var) => write!(f, "{}", var),
            Value::Imm(value) => write!(f, "{}", value),
        }
    }
}

impl From<Variable> for Value {
    fn from(var: Variable) -> Self {
        Value::Var(var)
    }
}

/// IR opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Opcode {
    Add,
    Sub,
    Mul,
    Mov,
    Ret,
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::Mov => "MOV",
            Opcode::Ret => "RET",
        };
        write!(f, "{}", name)
    }
}

/// A three-address instruction, immutable once created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    kind: Opcode,
    result: Option<Variable>,
    operands: Vec<Value>,
}

impl Instruction {
    /// Build an instruction directly. The opcode-specific constructors
    /// below are preferred; this exists for callers assembling IR
    /// programmatically.
    pub fn new(kind: Opcode, result: Option<Variable>, operands: Vec<Value>) -> Self {
        Self {
            kind,
            result,
            operands,
        }
    }

    pub fn add(result: Variable, lhs: Value, rhs: Value) -> Self {
        Self {
            kind: Opcode::Add,
            result: Some(result),
            operands: vec![lhs, rhs],
        }
    }

    pub fn sub(result: Variable, lhs: Value, rhs: Value) -> Self {
        Self {
            kind: Opcode::Sub,
            result: Some(result),
            operands: vec![lhs, rhs],
        }
    }

    pub fn mul(result: Variable, lhs: Value, rhs: Value) -> Self {
        Self {
            kind: Opcode::Mul,
            result: Some(result),
            operands: vec![lhs, rhs],
        }
    }

    pub fn mov(target: Variable, source: Value) -> Self {
        Self {
            kind: Opcode::Mov,
            result: Some(target),
            operands: vec![source],
        }
    }

    pub fn ret(value: Value) -> Self {
        Self {
            kind: Opcode::Ret,
            result: None,
            operands: vec![value],
        }
    }

    pub fn kind(&self) -> Opcode {
        self.kind
    }

    pub fn result(&self) -> Option<&Variable> {
        self.result.as_ref()
    }

    pub fn operands(&self) -> &[Value] {
        &self.operands
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        let mut first = true;
        if let Some(result) = &self.result {
            write!(f, " {}", result)?;
            first = false;
        }
        for operand in &self.operands {
            if first {
                write!(f, " {}", operand)?;
                first = false;
            } else {
                write!(f, ", {}", operand)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_value_display() {
        assert_eq!(format!("{}", Value::Var(Variable::named("a"))), "a");
        assert_eq!(format!("{}", Value::Var(Variable::Temp(3))), "t3");
        assert_eq!(format!("{}", Value::Imm(-7)), "-7");
    }

    #[test]
    fn test_instruction_display() {
        let add = Instruction::add(Variable::Temp(0), Value::Imm(1), Value::Var(Variable::named("a")));
        assert_eq!(format!("{}", add), "ADD t0, 1, a");

        let mov = Instruction::mov(Variable::named("a"), Value::Var(Variable::Temp(0)));
        assert_eq!(format!("{}", mov), "MOV a, t0");

        let ret = Instruction::ret(Value::Var(Variable::named("a")));
        assert_eq!(format!("{}", ret), "RET a");
    }

    #[test]
    fn test_ret_has_no_result() {
        let ret = Instruction::ret(Value::Imm(1));
        assert_eq!(ret.result(), None);
        assert_eq!(ret.operands(), &[Value::Imm(1)]);
    }
}
