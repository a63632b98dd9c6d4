use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("symbol {0:?} is not of the form `Owner::name`")]
    BadSymbol(String),

    #[error("stale_after must be positive, got {0}")]
    NonPositiveStaleAfter(i64),

    #[error("stale_after {0} equals the disabled-staleness sentinel")]
    StaleAfterIsSentinel(i64),
}

#[derive(Debug, Error)]
pub enum RewriteError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Match(#[from] cachepatch_match::MatchError),
}

pub type Result<T> = std::result::Result<T, RewriteError>;
