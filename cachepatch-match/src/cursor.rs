use cachepatch_ir::Sequence;

use crate::{MatchError, Pattern, Result};

/// A position within a [`Sequence`], or the absence of one.
///
/// A cursor remembers the length of the sequence it was produced against so
/// that using it on a body of a different length is caught. Bodies of equal
/// length are indistinguishable to the cursor; pair it with the sequence it
/// came from. Edits never change length, so a cursor stays usable on its own
/// body after an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct Cursor {
    index: Option<usize>,
    len: usize,
}

impl Cursor {
    /// A cursor at `index` in a sequence of `len` instructions.
    /// Out-of-range positions yield an invalid cursor.
    pub fn at(index: usize, len: usize) -> Self {
        Self {
            index: (index < len).then_some(index),
            len,
        }
    }

    pub fn invalid(len: usize) -> Self {
        Self { index: None, len }
    }

    pub fn is_valid(&self) -> bool {
        self.index.is_some()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Length of the sequence this cursor was produced against.
    pub fn sequence_len(&self) -> usize {
        self.len
    }

    /// Reposition relative to the current index.
    ///
    /// Moving an invalid cursor is an error. Moving a valid cursor out of
    /// bounds yields an invalid cursor.
    pub fn move_by(self, offset: isize) -> Result<Cursor> {
        let index = self.index.ok_or(MatchError::InvalidCursor)?;
        Ok(match index.checked_add_signed(offset) {
            Some(next) => Cursor::at(next, self.len),
            None => Cursor::invalid(self.len),
        })
    }

    /// The index this cursor targets within `seq`.
    pub(crate) fn resolve(&self, seq: &Sequence) -> Result<usize> {
        let index = self.index.ok_or(MatchError::InvalidCursor)?;
        if seq.len() != self.len {
            return Err(MatchError::StaleCursor {
                expected: self.len,
                actual: seq.len(),
            });
        }
        Ok(index)
    }
}

/// Find the first position at which `pattern` ends.
///
/// Candidates are tried in increasing end index, so the returned cursor
/// points at the last instruction of the lowest-ending match. No match (or a
/// pattern longer than the sequence) yields an invalid cursor.
pub fn scan(seq: &Sequence, pattern: &Pattern) -> Cursor {
    let insns = seq.instructions();
    let width = pattern.len();
    if width > insns.len() {
        log::trace!("pattern of {width} longer than sequence of {}", insns.len());
        return Cursor::invalid(insns.len());
    }

    match insns.windows(width).position(|window| pattern.matches(window)) {
        Some(start) => {
            let end = start + width - 1;
            log::debug!("pattern [{pattern}] matched ending at {end}");
            Cursor::at(end, insns.len())
        }
        None => Cursor::invalid(insns.len()),
    }
}
