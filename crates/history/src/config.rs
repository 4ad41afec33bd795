//! History configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default maximum number of undoable records.
pub const DEFAULT_LIMIT: usize = 100;

/// Default coalescing window for repeated edits, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Options for a [`HistoryReducer`](crate::HistoryReducer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum length of the past stack. Oldest records are evicted first.
    pub limit: usize,
    /// Same-type, similar edits closer together than this merge into one record.
    pub debounce_ms: u64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { limit: DEFAULT_LIMIT, debounce_ms: DEFAULT_DEBOUNCE_MS }
    }
}

impl HistoryConfig {
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce_ms = u64::try_from(debounce.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = HistoryConfig::default();
        assert_eq!(config.limit, 100);
        assert_eq!(config.debounce(), Duration::from_millis(500));
    }

    #[test]
    fn builder() {
        let config = HistoryConfig::default()
            .with_limit(5)
            .with_debounce(Duration::from_secs(1));
        assert_eq!(config, HistoryConfig { limit: 5, debounce_ms: 1_000 });
    }

    #[test]
    fn huge_debounce_saturates() {
        let config = HistoryConfig::default().with_debounce(Duration::MAX);
        assert_eq!(config.debounce_ms, u64::MAX);
    }

    #[test]
    fn deserialize_partial_toml() {
        let config: HistoryConfig = toml::from_str("limit = 20").unwrap();
        assert_eq!(config, HistoryConfig { limit: 20, debounce_ms: DEFAULT_DEBOUNCE_MS });
        let config: HistoryConfig = toml::from_str("").unwrap();
        assert_eq!(config, HistoryConfig::default());
    }
}
