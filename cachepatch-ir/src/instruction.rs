use std::fmt;

use crate::Opcode;

/// Host-resolved identity of a field. Only compared, never dereferenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldRef(pub u32);

/// Host-resolved identity of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodRef(pub u32);

/// Host-resolved identity of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeRef(pub u32);

/// A branch target. Defined by attaching it to an instruction's
/// [`Metadata`], referenced through [`Operand::Label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(pub u32);

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// The operand of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operand {
    #[default]
    None,
    /// Signed integer constant.
    Int(i64),
    Field(FieldRef),
    Method(MethodRef),
    Type(TypeRef),
    /// Target of a branch or leave.
    Label(Label),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::None => Ok(()),
            Operand::Int(v) => write!(f, "{v}"),
            Operand::Field(r) => write!(f, "field#{}", r.0),
            Operand::Method(r) => write!(f, "method#{}", r.0),
            Operand::Type(r) => write!(f, "type#{}", r.0),
            Operand::Label(l) => write!(f, "{l}"),
        }
    }
}

/// Boundary of a protected (exception-handling) region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExceptionMarker {
    BeginTry,
    /// Start of a handler catching the given type.
    BeginCatch(TypeRef),
    BeginFinally,
    BeginFault,
    EndBlock,
}

/// Side-band markers attached to one instruction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Metadata {
    /// Labels other instructions may jump to; all resolve to this position.
    pub labels: Vec<Label>,
    /// Exception-region boundaries starting or ending here, in order.
    pub exception_markers: Vec<ExceptionMarker>,
}

impl Metadata {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.exception_markers.is_empty()
    }
}

/// One step of a method body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub operand: Operand,
    pub metadata: Metadata,
}

impl Instruction {
    pub fn new(opcode: Opcode, operand: Operand) -> Self {
        Self {
            opcode,
            operand,
            metadata: Metadata::default(),
        }
    }

    pub fn simple(opcode: Opcode) -> Self {
        Self::new(opcode, Operand::None)
    }

    pub fn load_const(value: i64) -> Self {
        Self::new(Opcode::LoadConst, Operand::Int(value))
    }

    pub fn load_field(field: FieldRef) -> Self {
        Self::new(Opcode::LoadField, Operand::Field(field))
    }

    pub fn call(method: MethodRef) -> Self {
        Self::new(Opcode::Call, Operand::Method(method))
    }

    pub fn branch(opcode: Opcode, target: Label) -> Self {
        Self::new(opcode, Operand::Label(target))
    }

    /// Attach a label, making this instruction a branch target.
    pub fn with_label(mut self, label: Label) -> Self {
        self.metadata.labels.push(label);
        self
    }

    pub fn with_marker(mut self, marker: ExceptionMarker) -> Self {
        self.metadata.exception_markers.push(marker);
        self
    }

    /// The integer constant, if this is a `LoadConst`.
    pub fn as_const(&self) -> Option<i64> {
        match (self.opcode, self.operand) {
            (Opcode::LoadConst, Operand::Int(v)) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for label in &self.metadata.labels {
            write!(f, "{label}: ")?;
        }
        for marker in &self.metadata.exception_markers {
            write!(f, "[{marker:?}] ")?;
        }
        match self.operand {
            Operand::None => write!(f, "{}", self.opcode),
            operand => write!(f, "{} {operand}", self.opcode),
        }
    }
}
