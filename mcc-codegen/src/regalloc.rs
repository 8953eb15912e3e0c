//! Register allocation
//!
//! On-the-fly allocation over a single basic block. A variable gets the
//! first free register in allocation-priority order; once everything is
//! occupied, the allocator steals the register of the first assigned
//! variable with no remaining operand reference anywhere in the
//! program. There is no spill-to-memory fallback: if every assigned
//! variable is still referenced, allocation fails.

use crate::reg::{Reg, ALLOCATION_ORDER};
use crate::CodegenError;
use mcc_ir::{Instruction, Variable};
use std::collections::HashMap;

/// Whether `var` appears as an operand anywhere in the program.
///
/// This is the steal test: a coarse whole-program "is this name ever
/// read" scan, not a precise liveness interval. Result positions do not
/// count as references.
pub fn is_referenced(var: &Variable, program: &[Instruction]) -> bool {
    program
        .iter()
        .any(|ins| ins.operands().iter().any(|op| op.as_variable() == Some(var)))
}

/// Variable-to-register mapping, live for one code generation run
///
/// The two maps are kept in sync and form a partial bijection: each
/// assigned register maps to exactly one variable and vice versa.
#[derive(Debug, Default)]
pub struct RegisterFile {
    var_to_reg: HashMap<Variable, Reg>,
    reg_to_var: HashMap<Reg, Variable>,
}

impl RegisterFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// The register currently assigned to `var`, if any
    pub fn lookup(&self, var: &Variable) -> Option<Reg> {
        self.var_to_reg.get(var).copied()
    }

    /// The variable currently holding `reg`, if any
    pub fn owner(&self, reg: Reg) -> Option<&Variable> {
        self.reg_to_var.get(&reg)
    }

    /// Number of registers currently assigned
    pub fn assigned_count(&self) -> usize {
        self.var_to_reg.len()
    }

    /// Get a register for `var`, allocating or stealing if necessary.
    ///
    /// Repeated calls for the same variable return the same register
    /// until it is stolen; a variable is never proactively moved.
    pub fn acquire(
        &mut self,
        var: &Variable,
        program: &[Instruction],
    ) -> Result<Reg, CodegenError> {
        if let Some(reg) = self.lookup(var) {
            return Ok(reg);
        }

        // First fit: scratch, then argument, then extended scratch
        for reg in ALLOCATION_ORDER {
            if !self.reg_to_var.contains_key(&reg) {
                self.bind(var.clone(), reg);
                return Ok(reg);
            }
        }

        // Steal the first register whose owner is never read again
        for reg in ALLOCATION_ORDER {
            let owner = match self.reg_to_var.get(&reg) {
                Some(owner) => owner.clone(),
                None => continue,
            };
            if !is_referenced(&owner, program) {
                log::debug!("stealing {} from '{}' for '{}'", reg, owner, var);
                self.var_to_reg.remove(&owner);
                self.bind(var.clone(), reg);
                return Ok(reg);
            }
        }

        Err(CodegenError::RegisterExhausted(var.to_string()))
    }

    fn bind(&mut self, var: Variable, reg: Reg) {
        self.var_to_reg.insert(var.clone(), reg);
        self.reg_to_var.insert(reg, var);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcc_ir::Value;
    use pretty_assertions::assert_eq;

    fn var(name: &str) -> Variable {
        Variable::named(name)
    }

    #[test]
    fn test_first_fit_crosses_classes() {
        let mut regs = RegisterFile::new();
        let program = [];

        assert_eq!(regs.acquire(&var("a"), &program).unwrap(), Reg::T0);
        assert_eq!(regs.acquire(&var("b"), &program).unwrap(), Reg::T1);
        assert_eq!(regs.acquire(&var("c"), &program).unwrap(), Reg::T2);
        // Scratch class full: the argument class is next
        assert_eq!(regs.acquire(&var("d"), &program).unwrap(), Reg::A0);
        assert_eq!(regs.acquire(&var("e"), &program).unwrap(), Reg::A1);
    }

    #[test]
    fn test_lookup_is_stable() {
        let mut regs = RegisterFile::new();
        let program = [];

        let first = regs.acquire(&var("a"), &program).unwrap();
        regs.acquire(&var("b"), &program).unwrap();
        let again = regs.acquire(&var("a"), &program).unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn test_extended_scratch_is_last() {
        let mut regs = RegisterFile::new();
        let program = [];

        for i in 0..11 {
            regs.acquire(&var(&format!("v{}", i)), &program).unwrap();
        }
        assert_eq!(regs.acquire(&var("w"), &program).unwrap(), Reg::T3);
    }

    #[test]
    fn test_steals_first_dead_variable() {
        let mut regs = RegisterFile::new();
        // Only v1 is ever read
        let program = [Instruction::ret(Value::Var(var("v1")))];

        for i in 0..15 {
            regs.acquire(&var(&format!("v{}", i)), &program).unwrap();
        }
        assert_eq!(regs.assigned_count(), 15);

        // v0 holds t0 and is dead, so it is the first steal candidate
        let stolen = regs.acquire(&var("w"), &program).unwrap();
        assert_eq!(stolen, Reg::T0);
        assert_eq!(regs.lookup(&var("v0")), None);
        assert_eq!(regs.owner(Reg::T0), Some(&var("w")));
        assert_eq!(regs.assigned_count(), 15);
    }

    #[test]
    fn test_live_variables_are_not_stolen() {
        let mut regs = RegisterFile::new();
        // v0 is read later, v1 is not
        let program = [Instruction::ret(Value::Var(var("v0")))];

        for i in 0..15 {
            regs.acquire(&var(&format!("v{}", i)), &program).unwrap();
        }

        // v0 holds t0 but is live; the steal must take v1's t1 instead
        let stolen = regs.acquire(&var("w"), &program).unwrap();
        assert_eq!(stolen, Reg::T1);
        assert_eq!(regs.lookup(&var("v0")), Some(Reg::T0));
    }

    #[test]
    fn test_exhaustion_when_everything_is_live() {
        let mut regs = RegisterFile::new();
        let program: Vec<Instruction> = (0..15)
            .map(|i| Instruction::mov(var("sink"), Value::Var(var(&format!("v{}", i)))))
            .collect();

        for i in 0..15 {
            regs.acquire(&var(&format!("v{}", i)), &program).unwrap();
        }

        let err = regs.acquire(&var("w"), &program).unwrap_err();
        assert_eq!(err, CodegenError::RegisterExhausted("w".to_string()));
    }

    #[test]
    fn test_mapping_stays_bijective() {
        let mut regs = RegisterFile::new();
        let program = [];

        for i in 0..15 {
            regs.acquire(&var(&format!("v{}", i)), &program).unwrap();
        }

        // Every assigned register has exactly one owner that maps back
        for reg in ALLOCATION_ORDER {
            let owner = regs.owner(reg).cloned().unwrap();
            assert_eq!(regs.lookup(&owner), Some(reg));
        }
    }

    #[test]
    fn test_result_positions_are_not_references() {
        let program = [Instruction::mov(var("a"), Value::Imm(1))];
        assert!(!is_referenced(&var("a"), &program));

        let program = [Instruction::mov(var("b"), Value::Var(var("a")))];
        assert!(is_referenced(&var("a"), &program));
    }
}
