//! RISC-V register model
//!
//! The allocatable budget is three fixed classes, consulted in a fixed
//! priority order: scratch (t0-t2, x5-x7), argument (a0-a7, x10-x17)
//! and extended scratch (t3-t6, x28-x31). `a0` doubles as the return
//! value register.

use crate::CodegenError;
use std::fmt;

/// An allocatable RISC-V register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reg {
    // Scratch class
    T0, T1, T2,
    // Argument class
    A0, A1, A2, A3, A4, A5, A6, A7,
    // Extended-scratch class
    T3, T4, T5, T6,
}

/// All allocatable registers in allocation-priority order
pub const ALLOCATION_ORDER: [Reg; 15] = [
    Reg::T0, Reg::T1, Reg::T2,
    Reg::A0, Reg::A1, Reg::A2, Reg::A3, Reg::A4, Reg::A5, Reg::A6, Reg::A7,
    Reg::T3, Reg::T4, Reg::T5, Reg::T6,
];

/// Register holding the return value
pub const RETURN_REG: Reg = Reg::A0;

impl Reg {
    /// The register's number in the RISC-V integer register file
    pub fn number(self) -> u8 {
        match self {
            Reg::T0 => 5,
            Reg::T1 => 6,
            Reg::T2 => 7,
            Reg::A0 => 10,
            Reg::A1 => 11,
            Reg::A2 => 12,
            Reg::A3 => 13,
            Reg::A4 => 14,
            Reg::A5 => 15,
            Reg::A6 => 16,
            Reg::A7 => 17,
            Reg::T3 => 28,
            Reg::T4 => 29,
            Reg::T5 => 30,
            Reg::T6 => 31,
        }
    }

    /// Map a register number back to an allocatable register
    pub fn from_number(number: u8) -> Result<Reg, CodegenError> {
        match number {
            5 => Ok(Reg::T0),
            6 => Ok(Reg::T1),
            7 => Ok(Reg::T2),
            10 => Ok(Reg::A0),
            11 => Ok(Reg::A1),
            12 => Ok(Reg::A2),
            13 => Ok(Reg::A3),
            14 => Ok(Reg::A4),
            15 => Ok(Reg::A5),
            16 => Ok(Reg::A6),
            17 => Ok(Reg::A7),
            28 => Ok(Reg::T3),
            29 => Ok(Reg::T4),
            30 => Ok(Reg::T5),
            31 => Ok(Reg::T6),
            _ => Err(CodegenError::InvalidRegisterNumber(number)),
        }
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let number = self.number();
        match self {
            Reg::T0 | Reg::T1 | Reg::T2 => write!(f, "t{}", number - 5),
            Reg::A0 | Reg::A1 | Reg::A2 | Reg::A3 | Reg::A4 | Reg::A5 | Reg::A6 | Reg::A7 => {
                write!(f, "a{}", number - 10)
            }
            Reg::T3 | Reg::T4 | Reg::T5 | Reg::T6 => write!(f, "t{}", number - 25),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_register_display() {
        assert_eq!(format!("{}", Reg::T0), "t0");
        assert_eq!(format!("{}", Reg::T2), "t2");
        assert_eq!(format!("{}", Reg::A0), "a0");
        assert_eq!(format!("{}", Reg::A7), "a7");
        assert_eq!(format!("{}", Reg::T3), "t3");
        assert_eq!(format!("{}", Reg::T6), "t6");
    }

    #[test]
    fn test_number_round_trip() {
        for reg in ALLOCATION_ORDER {
            assert_eq!(Reg::from_number(reg.number()).unwrap(), reg);
        }
    }

    #[test]
    fn test_invalid_register_numbers() {
        for number in [0u8, 1, 4, 8, 9, 18, 27, 32, 255] {
            let err = Reg::from_number(number).unwrap_err();
            assert_eq!(err, CodegenError::InvalidRegisterNumber(number));
        }
    }

    #[test]
    fn test_allocation_order_is_scratch_then_argument_then_extended() {
        assert_eq!(ALLOCATION_ORDER[0], Reg::T0);
        assert_eq!(ALLOCATION_ORDER[3], Reg::A0);
        assert_eq!(ALLOCATION_ORDER[11], Reg::T3);
        assert_eq!(ALLOCATION_ORDER.len(), 15);
    }
}
