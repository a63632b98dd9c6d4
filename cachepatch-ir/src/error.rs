use thiserror::Error;

use crate::Label;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IrError {
    #[error("branch at index {index} targets undefined label {label}")]
    UndefinedLabel { index: usize, label: Label },

    #[error("label {label} defined at both index {first} and index {second}")]
    DuplicateLabel {
        label: Label,
        first: usize,
        second: usize,
    },

    #[error("branch at index {0} has no label operand")]
    MissingBranchTarget(usize),
}

pub type Result<T> = std::result::Result<T, IrError>;
