//! Structural matching over instruction sequences and in-place edits that
//! keep branch labels and exception-region markers intact.
//!
//! ```
//! use cachepatch_ir::{FieldRef, Instruction, MethodRef, Opcode, Operand, Sequence};
//! use cachepatch_match::{Pattern, Predicate, replace_opcode_and_operand, scan};
//!
//! let mut body = Sequence::new(vec![
//!     Instruction::load_field(FieldRef(1)),
//!     Instruction::load_const(1),
//!     Instruction::load_const(-1),
//!     Instruction::call(MethodRef(2)),
//! ]);
//! let pattern = Pattern::new(vec![
//!     Predicate::LoadsField(FieldRef(1)),
//!     Predicate::LoadsConst(1),
//!     Predicate::LoadsConst(-1),
//!     Predicate::Calls(MethodRef(2)),
//! ])?;
//!
//! let cursor = scan(&body, &pattern);
//! assert_eq!(cursor.index(), Some(3));
//! let cursor = cursor.move_by(-1)?;
//! replace_opcode_and_operand(&mut body, cursor, Opcode::LoadConst, Operand::Int(60))?;
//! assert_eq!(body[2].as_const(), Some(60));
//! # Ok::<(), cachepatch_match::MatchError>(())
//! ```

pub mod cursor;
pub mod editor;
pub mod error;
pub mod pattern;

pub use cursor::{Cursor, scan};
pub use editor::replace_opcode_and_operand;
pub use error::{MatchError, Result};
pub use pattern::{Pattern, Predicate};
