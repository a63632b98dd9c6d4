//! Turns uncached calls of a derived computation into cached ones.
//!
//! Method bodies that compute a target with staleness disabled are located
//! by pattern and have the staleness argument rewritten to a positive tick
//! count. The computation is enabled in the cache first so the rewritten
//! calls actually hit it.

pub mod config;
pub mod error;
pub mod host;
pub mod rewriter;

pub use config::{RewriteConfig, Symbol};
pub use error::{ConfigError, RewriteError};
pub use host::{Diagnostics, Environment, LogDiagnostics, MethodBodies, SymbolResolver};
pub use rewriter::{ApplyReport, PatchSummary, Rewriter, SkipReason, rewrite_staleness};
