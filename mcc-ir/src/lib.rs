//! MiniC Compiler - Intermediate Representation
//!
//! Three-address IR bridging the frontend and the code generator, and
//! the syntax-directed generator that builds it while observing the
//! parser's shift/reduce events.

pub mod gen;
pub mod ir;

pub use gen::{IrGenError, IrGenerator};
pub use ir::{Instruction, Opcode, Value, Variable};
