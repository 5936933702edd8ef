//! # Registry Configuration
//!
//! Tunables for the registration path.

use serde::{Deserialize, Serialize};

/// Registry configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Upper bound on signatories per document. `None` means unbounded.
    #[serde(default)]
    pub max_signatories: Option<usize>,
}

impl RegistryConfig {
    /// Create a config for testing (small, explicit limits).
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            max_signatories: Some(8),
        }
    }

    /// Returns a copy with the signatory limit set.
    #[must_use]
    pub fn with_max_signatories(mut self, max: usize) -> Self {
        self.max_signatories = Some(max);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_unbounded() {
        let config = RegistryConfig::default();
        assert_eq!(config.max_signatories, None);
    }

    #[test]
    fn test_testing_config() {
        let config = RegistryConfig::for_testing();
        assert_eq!(config.max_signatories, Some(8));
        assert_eq!(config.with_max_signatories(2).max_signatories, Some(2));
    }

    #[test]
    fn test_missing_field_deserializes_to_default() {
        let config: RegistryConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RegistryConfig::default());
    }
}
