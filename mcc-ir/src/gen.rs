//! Syntax-directed IR generation
//!
//! [`IrGenerator`] observes the parser's shift/reduce events and keeps
//! a semantic stack of value slots in lockstep with the parser's own
//! symbol stack: every shift pushes exactly one slot, every reduce pops
//! RHS-many slots and pushes one. Identifier and literal shifts push
//! real values; structural tokens push empty placeholders. Arithmetic
//! reductions draw a fresh temporary and append an instruction.

use crate::ir::{Instruction, Value, Variable};
use mcc_frontend::grammar::Production;
use mcc_frontend::parser::{ActionObserver, ParseContext};
use mcc_frontend::token::{Token, TokenKind};
use mcc_common::CompilerError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IrGenError {
    #[error("semantic stack underflow while reducing {0}")]
    StackUnderflow(Production),

    #[error("expected a value on the semantic stack while reducing {0}")]
    MissingValue(Production),

    #[error("assignment target is not a variable")]
    InvalidAssignTarget,
}

impl From<IrGenError> for CompilerError {
    fn from(err: IrGenError) -> Self {
        CompilerError::IrError {
            message: err.to_string(),
        }
    }
}

/// Parse observer that builds the IR instruction sequence
#[derive(Default)]
pub struct IrGenerator {
    instructions: Vec<Instruction>,
    stack: Vec<Option<Value>>,
    next_temp: u32,
}

impl IrGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The instructions generated so far
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Consume the generator, yielding the finished sequence
    pub fn into_instructions(self) -> Vec<Instruction> {
        self.instructions
    }

    /// Current semantic stack depth; equals the parser's stack depth
    /// after every event
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    fn fresh_temp(&mut self) -> Variable {
        let temp = Variable::Temp(self.next_temp);
        self.next_temp += 1;
        temp
    }

    fn pop_slot(&mut self, production: Production) -> Result<Option<Value>, IrGenError> {
        self.stack
            .pop()
            .ok_or(IrGenError::StackUnderflow(production))
    }

    fn pop_value(&mut self, production: Production) -> Result<Value, IrGenError> {
        self.pop_slot(production)?
            .ok_or(IrGenError::MissingValue(production))
    }

    fn emit(&mut self, instruction: Instruction) {
        log::debug!("emit {}", instruction);
        self.instructions.push(instruction);
    }

    fn reduce_assignment(&mut self) -> Result<(), IrGenError> {
        let expression = self.pop_value(Production::Assign)?;
        self.pop_slot(Production::Assign)?; // '='
        let target = match self.pop_value(Production::Assign)? {
            Value::Var(var) => var,
            Value::Imm(_) => return Err(IrGenError::InvalidAssignTarget),
        };
        self.emit(Instruction::mov(target, expression));
        self.stack.push(None);
        Ok(())
    }

    fn reduce_return(&mut self) -> Result<(), IrGenError> {
        let value = self.pop_value(Production::Return)?;
        self.pop_slot(Production::Return)?; // 'return'
        self.emit(Instruction::ret(value));
        self.stack.push(None);
        Ok(())
    }

    fn reduce_arithmetic(
        &mut self,
        production: Production,
        build: fn(Variable, Value, Value) -> Instruction,
    ) -> Result<(), IrGenError> {
        let rhs = self.pop_value(production)?;
        self.pop_slot(production)?; // operator
        let lhs = self.pop_value(production)?;

        let temp = self.fresh_temp();
        // Source order matters: SUB is not commutative
        self.emit(build(temp.clone(), lhs, rhs));
        self.stack.push(Some(Value::Var(temp)));
        Ok(())
    }

    fn reduce_parenthesized(&mut self) -> Result<(), IrGenError> {
        self.pop_slot(Production::Parenthesized)?; // ')'
        let value = self.pop_value(Production::Parenthesized)?;
        self.pop_slot(Production::Parenthesized)?; // '('
        self.stack.push(Some(value));
        Ok(())
    }
}

impl ActionObserver for IrGenerator {
    fn on_shift(
        &mut self,
        _ctx: &mut ParseContext<'_>,
        token: &Token,
    ) -> Result<(), CompilerError> {
        // Only identifiers and literals carry a runtime value; keywords,
        // operators and punctuation are structural and push placeholders.
        let slot = match &token.kind {
            TokenKind::Id(name) => Some(Value::Var(Variable::named(name.clone()))),
            TokenKind::IntConst(value) => Some(Value::Imm(*value)),
            TokenKind::Int
            | TokenKind::Return
            | TokenKind::Assign
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Star
            | TokenKind::Slash
            | TokenKind::Comma
            | TokenKind::Semicolon
            | TokenKind::LeftParen
            | TokenKind::RightParen => None,
        };
        self.stack.push(slot);
        Ok(())
    }

    fn on_reduce(
        &mut self,
        _ctx: &mut ParseContext<'_>,
        production: Production,
    ) -> Result<(), CompilerError> {
        match production {
            Production::Program
            | Production::StmtListCons
            | Production::StmtListLast
            | Production::Declare
            | Production::DeclInt => {
                for _ in 0..production.rhs_len() {
                    self.pop_slot(production)?;
                }
                self.stack.push(None);
                Ok(())
            }
            Production::Assign => Ok(self.reduce_assignment()?),
            Production::Return => Ok(self.reduce_return()?),
            Production::AddExpr => Ok(self.reduce_arithmetic(production, Instruction::add)?),
            Production::SubExpr => Ok(self.reduce_arithmetic(production, Instruction::sub)?),
            Production::MulTerm => Ok(self.reduce_arithmetic(production, Instruction::mul)?),
            // Unit productions pass the value through untouched
            Production::ExprFromTerm | Production::TermFromFactor => Ok(()),
            Production::Parenthesized => Ok(self.reduce_parenthesized()?),
            Production::FactorFromId | Production::FactorFromConst => {
                let value = self.pop_value(production)?;
                self.stack.push(Some(value));
                Ok(())
            }
        }
    }

    fn on_accept(&mut self, _ctx: &mut ParseContext<'_>) -> Result<(), CompilerError> {
        log::debug!("ir generation finished: {} instructions", self.instructions.len());
        Ok(())
    }
}
