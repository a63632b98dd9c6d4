#![allow(dead_code)]

use cachepatch_ir::*;
use cachepatch_match::{Pattern, Predicate};

pub const FIELD_X: FieldRef = FieldRef(10);
pub const FIELD_Y: FieldRef = FieldRef(11);
pub const COMPUTE: MethodRef = MethodRef(20);

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// `ldfld field; ldc 1; ldc -1; call COMPUTE`
pub fn uncached_call(field: FieldRef) -> Vec<Instruction> {
    vec![
        Instruction::load_field(field),
        Instruction::load_const(1),
        Instruction::load_const(-1),
        Instruction::call(COMPUTE),
    ]
}

pub fn uncached_call_pattern() -> Pattern {
    Pattern::new(vec![
        Predicate::LoadsField(FIELD_X),
        Predicate::LoadsConst(1),
        Predicate::LoadsConst(-1),
        Predicate::Calls(COMPUTE),
    ])
    .unwrap()
}
