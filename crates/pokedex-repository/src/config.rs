//! Repository configuration.

use std::env;

/// Built-in page size when neither the caller nor the environment says.
pub const DEFAULT_LIMIT: u64 = 10;

/// Environment variable consulted by [`RepositoryConfig::from_env`].
pub const DEFAULT_LIMIT_VAR: &str = "POKEDEX_DEFAULT_LIMIT";

/// Read once at repository construction.
#[derive(Debug, Clone)]
pub struct RepositoryConfig {
    /// Page size used when a list query does not specify a limit.
    pub default_limit: u64,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
        }
    }
}

impl RepositoryConfig {
    /// Reads `POKEDEX_DEFAULT_LIMIT`; falls back to the built-in default
    /// when the variable is unset, unparseable or zero.
    pub fn from_env() -> Self {
        let default_limit = env::var(DEFAULT_LIMIT_VAR)
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_LIMIT);
        Self { default_limit }
    }
}
