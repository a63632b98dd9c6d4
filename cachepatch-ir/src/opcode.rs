use std::fmt;

bitflags::bitflags! {
    /// Static properties of an [`Opcode`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct OpcodeFlags: u16 {
        const LOAD = 1 << 0;
        const STORE = 1 << 1;
        const CALL = 1 << 2;
        const BRANCH = 1 << 3;
        const CONDITIONAL = 1 << 4;
        const RETURN = 1 << 5;
        const THROW = 1 << 6;
        /// Leaves a protected region; carries a label operand like a branch.
        const LEAVE = 1 << 7;
    }
}

/// Operation tag of an [`Instruction`](crate::Instruction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Nop,
    /// Push an integer constant.
    LoadConst,
    /// Push the value of a field.
    LoadField,
    StoreField,
    /// Push a method argument by position.
    LoadArg,
    LoadLocal,
    StoreLocal,
    Call,
    CallVirt,
    NewObj,
    /// Push a runtime type handle.
    LoadToken,
    Dup,
    Pop,
    Branch,
    BranchTrue,
    BranchFalse,
    Leave,
    Return,
    Throw,
    EndFinally,
}

impl Opcode {
    pub const ALL: [Opcode; 20] = [
        Opcode::Nop,
        Opcode::LoadConst,
        Opcode::LoadField,
        Opcode::StoreField,
        Opcode::LoadArg,
        Opcode::LoadLocal,
        Opcode::StoreLocal,
        Opcode::Call,
        Opcode::CallVirt,
        Opcode::NewObj,
        Opcode::LoadToken,
        Opcode::Dup,
        Opcode::Pop,
        Opcode::Branch,
        Opcode::BranchTrue,
        Opcode::BranchFalse,
        Opcode::Leave,
        Opcode::Return,
        Opcode::Throw,
        Opcode::EndFinally,
    ];

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Nop => "nop",
            Opcode::LoadConst => "ldc",
            Opcode::LoadField => "ldfld",
            Opcode::StoreField => "stfld",
            Opcode::LoadArg => "ldarg",
            Opcode::LoadLocal => "ldloc",
            Opcode::StoreLocal => "stloc",
            Opcode::Call => "call",
            Opcode::CallVirt => "callvirt",
            Opcode::NewObj => "newobj",
            Opcode::LoadToken => "ldtoken",
            Opcode::Dup => "dup",
            Opcode::Pop => "pop",
            Opcode::Branch => "br",
            Opcode::BranchTrue => "brtrue",
            Opcode::BranchFalse => "brfalse",
            Opcode::Leave => "leave",
            Opcode::Return => "ret",
            Opcode::Throw => "throw",
            Opcode::EndFinally => "endfinally",
        }
    }

    pub fn flags(self) -> OpcodeFlags {
        match self {
            Opcode::LoadConst
            | Opcode::LoadField
            | Opcode::LoadArg
            | Opcode::LoadLocal
            | Opcode::LoadToken => OpcodeFlags::LOAD,
            Opcode::StoreField | Opcode::StoreLocal => OpcodeFlags::STORE,
            Opcode::Call | Opcode::CallVirt | Opcode::NewObj => OpcodeFlags::CALL,
            Opcode::Branch => OpcodeFlags::BRANCH,
            Opcode::BranchTrue | Opcode::BranchFalse => {
                OpcodeFlags::BRANCH | OpcodeFlags::CONDITIONAL
            }
            Opcode::Leave => OpcodeFlags::LEAVE,
            Opcode::Return => OpcodeFlags::RETURN,
            Opcode::Throw => OpcodeFlags::THROW,
            Opcode::Nop | Opcode::Dup | Opcode::Pop | Opcode::EndFinally => OpcodeFlags::empty(),
        }
    }

    /// Whether this opcode transfers control to a label operand.
    pub fn has_label_operand(self) -> bool {
        self.flags()
            .intersects(OpcodeFlags::BRANCH | OpcodeFlags::LEAVE)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
