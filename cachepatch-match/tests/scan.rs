mod common;

use cachepatch_ir::*;
use cachepatch_match::*;
use common::*;

#[test]
fn empty_pattern_is_rejected() {
    assert_eq!(Pattern::new(vec![]), Err(MatchError::EmptyPattern));
}

#[test]
fn match_cursor_sits_on_last_instruction() {
    init_logging();
    let seq = Sequence::new(uncached_call(FIELD_X));
    let cursor = scan(&seq, &uncached_call_pattern());
    assert_eq!(cursor.index(), Some(3));
    assert_eq!(cursor.sequence_len(), 4);
}

#[test]
fn field_mismatch_is_no_match() {
    let seq = Sequence::new(uncached_call(FIELD_Y));
    let cursor = scan(&seq, &uncached_call_pattern());
    assert!(!cursor.is_valid());
    assert_eq!(cursor.index(), None);
}

#[test]
fn pattern_longer_than_sequence() {
    let seq = Sequence::new(uncached_call(FIELD_X)[1..].to_vec());
    assert!(!scan(&seq, &uncached_call_pattern()).is_valid());
}

#[test]
fn empty_sequence_never_matches() {
    let pattern = Pattern::new(vec![Predicate::Opcode(Opcode::Nop)]).unwrap();
    assert!(!scan(&Sequence::default(), &pattern).is_valid());
}

#[test]
fn first_match_wins() {
    let mut insns = vec![Instruction::simple(Opcode::LoadArg)];
    insns.extend(uncached_call(FIELD_Y));
    insns.extend(uncached_call(FIELD_X));
    insns.push(Instruction::simple(Opcode::Pop));
    insns.extend(uncached_call(FIELD_X));
    let seq = Sequence::new(insns);

    let pattern = uncached_call_pattern();
    let cursor = scan(&seq, &pattern);
    let end = cursor.index().unwrap();
    assert_eq!(end, 8);

    // Every predicate accepts the instruction it lines up with.
    let start = end + 1 - pattern.len();
    for (pred, insn) in pattern.predicates().iter().zip(&seq.instructions()[start..=end]) {
        assert!(pred.accepts(insn), "{pred} rejected {insn}");
    }
    // No earlier end position matches.
    for e in pattern.len() - 1..end {
        let window = &seq.instructions()[e + 1 - pattern.len()..=e];
        assert!(!pattern.matches(window), "earlier match ending at {e}");
    }
}

#[test]
fn overlapping_candidates_pick_lowest_end() {
    let seq: Sequence = [5, 5, 5, 5].into_iter().map(Instruction::load_const).collect();
    let pattern = Pattern::new(vec![Predicate::LoadsConst(5), Predicate::LoadsConst(5)]).unwrap();
    assert_eq!(scan(&seq, &pattern).index(), Some(1));
}

#[test]
fn opcode_predicate_ignores_operand() {
    let seq = Sequence::new(vec![
        Instruction::load_const(3),
        Instruction::new(Opcode::StoreLocal, Operand::Int(0)),
        Instruction::new(Opcode::StoreLocal, Operand::Int(4)),
    ]);
    let any_store = Pattern::new(vec![Predicate::Opcode(Opcode::StoreLocal)]).unwrap();
    assert_eq!(scan(&seq, &any_store).index(), Some(1));

    let exact = Pattern::new(vec![Predicate::Exact(Opcode::StoreLocal, Operand::Int(4))]).unwrap();
    assert_eq!(scan(&seq, &exact).index(), Some(2));
}

#[test]
fn calls_accepts_virtual_dispatch_only_for_same_method() {
    let pred = Predicate::Calls(COMPUTE);
    assert!(pred.accepts(&Instruction::new(Opcode::CallVirt, Operand::Method(COMPUTE))));
    assert!(!pred.accepts(&Instruction::call(MethodRef(21))));
    assert!(!pred.accepts(&Instruction::new(Opcode::NewObj, Operand::Method(COMPUTE))));
}

#[test]
fn loads_const_does_not_match_other_int_operands() {
    let pred = Predicate::LoadsConst(1);
    assert!(!pred.accepts(&Instruction::new(Opcode::LoadArg, Operand::Int(1))));
}

#[test]
fn scanning_leaves_sequence_untouched() {
    let seq = Sequence::new(uncached_call(FIELD_X));
    let before = seq.clone();
    let _ = scan(&seq, &uncached_call_pattern());
    assert_eq!(seq, before);
}

#[test]
fn constructed_pattern_is_never_empty() {
    let pattern = Pattern::new(vec![Predicate::Opcode(Opcode::Return)]).unwrap();
    assert!(!pattern.is_empty());
    assert_eq!(pattern.len(), 1);
}

#[test]
fn pattern_display() {
    assert_eq!(
        uncached_call_pattern().to_string(),
        "ldfld field#10; ldc 1; ldc -1; call* method#20"
    );
}
