use cachepatch_ir::{Opcode, Operand, Sequence};

use crate::{Cursor, MatchError, Result};

/// Rewrite the opcode and operand of the instruction at `cursor`.
///
/// Only those two fields are assigned; the instruction's metadata (labels and
/// exception markers) is left exactly as it was. Returns the previous opcode
/// and operand.
pub fn replace_opcode_and_operand(
    seq: &mut Sequence,
    cursor: Cursor,
    opcode: Opcode,
    operand: Operand,
) -> Result<(Opcode, Operand)> {
    let index = cursor.resolve(seq)?;
    let insn = seq.get_mut(index).ok_or(MatchError::InvalidCursor)?;

    let old = (insn.opcode, insn.operand);
    insn.opcode = opcode;
    insn.operand = operand;
    log::debug!(
        "rewrote [{index}] {} {} -> {opcode} {operand}",
        old.0,
        old.1
    );
    Ok(old)
}
