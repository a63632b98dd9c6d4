use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

use crate::{Instruction, IrError, Label, Operand, Result};

/// An ordered method body.
///
/// Elements can be rewritten in place through [`get_mut`](Self::get_mut) but
/// the sequence is never reordered, so positions (and the labels attached to
/// them) stay stable across edits.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequence {
    instructions: Vec<Instruction>,
}

impl Sequence {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Instruction> {
        self.instructions.get_mut(index)
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    pub fn into_instructions(self) -> Vec<Instruction> {
        self.instructions
    }

    /// Map from every defined label to the index of the instruction carrying it.
    ///
    /// A label defined more than once maps to its first definition; use
    /// [`validate`](Self::validate) to reject such bodies.
    pub fn labels(&self) -> BTreeMap<Label, usize> {
        let mut map = BTreeMap::new();
        for (i, insn) in self.instructions.iter().enumerate() {
            for &label in &insn.metadata.labels {
                map.entry(label).or_insert(i);
            }
        }
        map
    }

    /// `(index, target)` for every instruction that transfers control to a label.
    pub fn branch_targets(&self) -> Vec<(usize, Label)> {
        self.instructions
            .iter()
            .enumerate()
            .filter_map(|(i, insn)| match insn.operand {
                Operand::Label(l) if insn.opcode.has_label_operand() => Some((i, l)),
                _ => None,
            })
            .collect()
    }

    /// Check that labels are defined once and every branch resolves.
    pub fn validate(&self) -> Result<()> {
        let mut defined: BTreeMap<Label, usize> = BTreeMap::new();
        for (i, insn) in self.instructions.iter().enumerate() {
            for &label in &insn.metadata.labels {
                if let Some(&first) = defined.get(&label) {
                    return Err(IrError::DuplicateLabel {
                        label,
                        first,
                        second: i,
                    });
                }
                defined.insert(label, i);
            }
        }

        for (i, insn) in self.instructions.iter().enumerate() {
            if !insn.opcode.has_label_operand() {
                continue;
            }
            let Operand::Label(label) = insn.operand else {
                return Err(IrError::MissingBranchTarget(i));
            };
            if !defined.contains_key(&label) {
                return Err(IrError::UndefinedLabel { index: i, label });
            }
        }
        Ok(())
    }
}

impl From<Vec<Instruction>> for Sequence {
    fn from(instructions: Vec<Instruction>) -> Self {
        Self::new(instructions)
    }
}

impl FromIterator<Instruction> for Sequence {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Index<usize> for Sequence {
    type Output = Instruction;

    fn index(&self, index: usize) -> &Instruction {
        &self.instructions[index]
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, insn) in self.instructions.iter().enumerate() {
            writeln!(f, "{i:>4}  {insn}")?;
        }
        Ok(())
    }
}
