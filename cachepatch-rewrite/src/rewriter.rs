use cachepatch_cache::{CacheControl, ComputationId};
use cachepatch_ir::{FieldRef, MethodRef, Opcode, Operand, Sequence};
use cachepatch_match::{Pattern, Predicate, replace_opcode_and_operand, scan};

use crate::error::Result;
use crate::host::{Diagnostics, Environment, MethodBodies, SymbolResolver};
use crate::{RewriteConfig, Symbol};

/// Why a rewrite was not attempted. Both are expected configurations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The computation's feature is not loaded.
    FeatureUndefined(String),
    /// Another provider already caches this computation.
    ProviderActive(String),
}

/// Per-method results of an applied rewrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchSummary {
    pub patched: Vec<Symbol>,
    /// Methods whose body did not contain the expected call idiom.
    pub unmatched: Vec<Symbol>,
    /// Methods the host could not resolve or supply a body for.
    pub unavailable: Vec<Symbol>,
}

impl PatchSummary {
    pub fn is_complete(&self) -> bool {
        self.unmatched.is_empty() && self.unavailable.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyReport {
    Skipped(SkipReason),
    Applied(PatchSummary),
}

/// Build the pattern for `ldfld field; ldc flag; ldc disabled; call compute`.
fn uncached_call_pattern(
    field: FieldRef,
    compute: MethodRef,
    flag_constant: i64,
    disabled_staleness: i64,
) -> Result<Pattern> {
    Ok(Pattern::new(vec![
        Predicate::LoadsField(field),
        Predicate::LoadsConst(flag_constant),
        Predicate::LoadsConst(disabled_staleness),
        Predicate::Calls(compute),
    ])?)
}

/// Rewrite the staleness argument of the first call matched by `pattern`.
///
/// The staleness constant is the instruction just before the call that ends
/// the match. Returns `false` (leaving `seq` untouched) when nothing matches.
pub fn rewrite_staleness(seq: &mut Sequence, pattern: &Pattern, stale_after: i64) -> Result<bool> {
    let cursor = scan(seq, pattern);
    if !cursor.is_valid() {
        return Ok(false);
    }
    let cursor = cursor.move_by(-1)?;
    let labels = seq.labels();
    replace_opcode_and_operand(seq, cursor, Opcode::LoadConst, Operand::Int(stale_after))?;
    debug_assert_eq!(seq.labels(), labels, "edit moved a label");
    Ok(true)
}

/// Applies a [`RewriteConfig`] against a host.
pub struct Rewriter<'h> {
    bodies: &'h mut dyn MethodBodies,
    symbols: &'h dyn SymbolResolver,
    env: &'h dyn Environment,
    diagnostics: &'h dyn Diagnostics,
    cache: &'h dyn CacheControl,
}

impl<'h> Rewriter<'h> {
    pub fn new(
        bodies: &'h mut dyn MethodBodies,
        symbols: &'h dyn SymbolResolver,
        env: &'h dyn Environment,
        diagnostics: &'h dyn Diagnostics,
        cache: &'h dyn CacheControl,
    ) -> Self {
        Self {
            bodies,
            symbols,
            env,
            diagnostics,
            cache,
        }
    }

    /// Run the rewrite described by `config`.
    ///
    /// Absent features and already-active providers skip silently. A method
    /// whose body lacks the expected idiom gets one diagnostic and is left
    /// unmodified; the remaining methods are still processed. An invalid
    /// `config` is rejected before anything is touched.
    pub fn apply(&mut self, config: &RewriteConfig) -> Result<ApplyReport> {
        config.validate()?;

        if let Some(reason) = self.skip_reason(config) {
            log::info!("{}: not rewriting ({reason:?})", config.computation);
            return Ok(ApplyReport::Skipped(reason));
        }

        self.cache.enable(ComputationId(config.computation_id));

        let mut summary = PatchSummary::default();
        let Some(pattern) = self.resolve_pattern(config)? else {
            for symbol in &config.methods {
                self.diagnostics.report_error(&format!(
                    "{}: cannot resolve {} or {}; {symbol} not rewritten",
                    config.computation, config.computation_field, config.compute_method
                ));
                summary.unmatched.push(symbol.clone());
            }
            return Ok(ApplyReport::Applied(summary));
        };

        for symbol in &config.methods {
            let Some(method) = self.symbols.resolve_method(symbol) else {
                log::warn!("{}: method {symbol} not found", config.computation);
                summary.unavailable.push(symbol.clone());
                continue;
            };
            let Some(mut seq) = self.bodies.instruction_sequence(method) else {
                log::warn!("{}: method {symbol} has no body", config.computation);
                summary.unavailable.push(symbol.clone());
                continue;
            };

            if rewrite_staleness(&mut seq, &pattern, config.stale_after)? {
                log::debug!(
                    "{}: {symbol} now caches for {} ticks",
                    config.computation,
                    config.stale_after
                );
                summary.patched.push(symbol.clone());
            } else {
                self.diagnostics.report_error(&format!(
                    "{}: expected call [{pattern}] not found in {symbol}",
                    config.computation
                ));
                summary.unmatched.push(symbol.clone());
            }
            self.bodies.set_instruction_sequence(method, seq);
        }

        log::info!(
            "{}: rewrote {}/{} methods",
            config.computation,
            summary.patched.len(),
            config.methods.len()
        );
        Ok(ApplyReport::Applied(summary))
    }

    fn skip_reason(&self, config: &RewriteConfig) -> Option<SkipReason> {
        let feature = config.feature_name();
        if !self.env.is_feature_defined(feature) {
            return Some(SkipReason::FeatureUndefined(feature.to_string()));
        }
        config
            .conflicting_providers
            .iter()
            .find(|p| self.env.is_other_provider_active(p))
            .map(|p| SkipReason::ProviderActive(p.clone()))
    }

    fn resolve_pattern(&self, config: &RewriteConfig) -> Result<Option<Pattern>> {
        let field = self.symbols.resolve_field(&config.computation_field);
        let compute = self.symbols.resolve_method(&config.compute_method);
        let (Some(field), Some(compute)) = (field, compute) else {
            return Ok(None);
        };
        uncached_call_pattern(
            field,
            compute,
            config.flag_constant,
            config.disabled_staleness,
        )
        .map(Some)
    }
}
