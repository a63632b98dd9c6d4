//! Instruction-stream model for compiled method bodies.
//!
//! A method body is a [`Sequence`] of [`Instruction`]s. Branch-target labels
//! and exception-region markers ride on each instruction's [`Metadata`]
//! rather than in a side table, so rewriting an instruction's opcode or
//! operand never has to remember to carry them over.

pub mod error;
pub mod instruction;
pub mod opcode;
pub mod sequence;

pub use error::{IrError, Result};
pub use instruction::{
    ExceptionMarker, FieldRef, Instruction, Label, Metadata, MethodRef, Operand, TypeRef,
};
pub use opcode::{Opcode, OpcodeFlags};
pub use sequence::Sequence;
