use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A symbolic member reference, written `Owner::name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol {
    pub owner: String,
    pub name: String,
}

impl Symbol {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl FromStr for Symbol {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s.rsplit_once("::") {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() => {
                Ok(Symbol::new(owner, name))
            }
            _ => Err(ConfigError::BadSymbol(s.to_string())),
        }
    }
}

impl TryFrom<String> for Symbol {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, ConfigError> {
        s.parse()
    }
}

impl From<Symbol> for String {
    fn from(sym: Symbol) -> String {
        sym.to_string()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.owner, self.name)
    }
}

fn default_flag_constant() -> i64 {
    1
}

fn default_disabled_staleness() -> i64 {
    -1
}

fn default_stale_after() -> i64 {
    60
}

/// What to rewrite and where.
///
/// ```yaml
/// computation: MarketValue
/// computation_id: 12
/// feature: Trade
/// conflicting_providers: [OtherStatCache]
/// computation_field: StatDefOf::MarketValue
/// compute_method: StatExtension::GetStatValue
/// methods:
///   - TradeUtility::PlayerSellableNow
/// stale_after: 60
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RewriteConfig {
    /// Name of the computation, used in logs and as the default feature name.
    pub computation: String,
    pub computation_id: u32,
    /// Host feature that must be defined for the rewrite to apply.
    /// Defaults to `computation`.
    #[serde(default)]
    pub feature: Option<String>,
    /// Other providers that, when active, already cache this computation.
    #[serde(default)]
    pub conflicting_providers: Vec<String>,
    /// Field loaded to name the computation at the call site.
    pub computation_field: Symbol,
    /// Method performing the computation.
    pub compute_method: Symbol,
    pub methods: Vec<Symbol>,
    /// Constant pushed between the field load and the staleness argument.
    #[serde(default = "default_flag_constant")]
    pub flag_constant: i64,
    /// Staleness argument meaning "do not cache".
    #[serde(default = "default_disabled_staleness")]
    pub disabled_staleness: i64,
    /// Ticks a cached value stays fresh after the rewrite.
    #[serde(default = "default_stale_after")]
    pub stale_after: i64,
}

impl RewriteConfig {
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stale_after <= 0 {
            return Err(ConfigError::NonPositiveStaleAfter(self.stale_after));
        }
        if self.stale_after == self.disabled_staleness {
            return Err(ConfigError::StaleAfterIsSentinel(self.stale_after));
        }
        Ok(())
    }

    pub fn feature_name(&self) -> &str {
        self.feature.as_deref().unwrap_or(&self.computation)
    }
}
