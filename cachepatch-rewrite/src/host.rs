//! Interfaces the host runtime provides to the rewriter.

use cachepatch_ir::{FieldRef, MethodRef, Sequence};

use crate::Symbol;

/// Loads and installs method bodies.
pub trait MethodBodies {
    /// The current body of `method`, or `None` if it has none (abstract,
    /// native, or not loaded).
    fn instruction_sequence(&self, method: MethodRef) -> Option<Sequence>;
    fn set_instruction_sequence(&mut self, method: MethodRef, seq: Sequence);
}

/// Resolves symbolic references into comparable identities.
pub trait SymbolResolver {
    fn resolve_field(&self, symbol: &Symbol) -> Option<FieldRef>;
    fn resolve_method(&self, symbol: &Symbol) -> Option<MethodRef>;
}

/// Queries about the running configuration.
pub trait Environment {
    /// Whether the named feature (e.g. an optional expansion) is loaded.
    fn is_feature_defined(&self, name: &str) -> bool;
    /// Whether another component already provides the named behaviour.
    fn is_other_provider_active(&self, name: &str) -> bool;
}

/// Sink for unexpected conditions. Expected skips are never reported here.
pub trait Diagnostics {
    fn report_error(&self, message: &str);
}

/// Forwards diagnostics to the `log` facade at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn report_error(&self, message: &str) {
        log::error!("{message}");
    }
}
