use std::fmt;

use cachepatch_ir::{FieldRef, Instruction, MethodRef, Opcode, Operand};

use crate::{MatchError, Result};

/// A test applied to one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// Any instruction with this opcode, regardless of operand.
    Opcode(Opcode),
    /// Exactly this opcode and operand.
    Exact(Opcode, Operand),
    /// `LoadConst` of this value.
    LoadsConst(i64),
    /// `LoadField` of this field.
    LoadsField(FieldRef),
    /// `Call` or `CallVirt` of this method.
    Calls(MethodRef),
}

impl Predicate {
    pub fn accepts(&self, insn: &Instruction) -> bool {
        match *self {
            Predicate::Opcode(op) => insn.opcode == op,
            Predicate::Exact(op, operand) => insn.opcode == op && insn.operand == operand,
            Predicate::LoadsConst(v) => insn.as_const() == Some(v),
            Predicate::LoadsField(field) => {
                insn.opcode == Opcode::LoadField && insn.operand == Operand::Field(field)
            }
            Predicate::Calls(method) => {
                matches!(insn.opcode, Opcode::Call | Opcode::CallVirt)
                    && insn.operand == Operand::Method(method)
            }
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Opcode(op) => write!(f, "{op} *"),
            Predicate::Exact(op, Operand::None) => write!(f, "{op}"),
            Predicate::Exact(op, operand) => write!(f, "{op} {operand}"),
            Predicate::LoadsConst(v) => write!(f, "ldc {v}"),
            Predicate::LoadsField(field) => write!(f, "ldfld field#{}", field.0),
            Predicate::Calls(method) => write!(f, "call* method#{}", method.0),
        }
    }
}

/// A non-empty, ordered list of predicates matched against contiguous
/// instructions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    predicates: Vec<Predicate>,
}

impl Pattern {
    pub fn new(predicates: Vec<Predicate>) -> Result<Self> {
        if predicates.is_empty() {
            return Err(MatchError::EmptyPattern);
        }
        Ok(Self { predicates })
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Always `false`; construction rejects empty patterns.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Whether the pattern matches `window` exactly (same length, every
    /// predicate accepting its counterpart).
    pub fn matches(&self, window: &[Instruction]) -> bool {
        window.len() == self.predicates.len()
            && self
                .predicates
                .iter()
                .zip(window)
                .all(|(pred, insn)| pred.accepts(insn))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pred) in self.predicates.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{pred}")?;
        }
        Ok(())
    }
}
