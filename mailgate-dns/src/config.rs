use serde::{Deserialize, Serialize};

/// Configuration for the live DNS resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsConfig {
    /// DNS query timeout in seconds (default: 5)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts per query before giving up (default: 2)
    #[serde(default = "default_attempts")]
    pub attempts: usize,
}

const fn default_timeout_secs() -> u64 {
    5
}

const fn default_attempts() -> usize {
    2
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            attempts: default_attempts(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_from_empty_ron() {
        let config: DnsConfig = ron::from_str("()").unwrap();
        assert_eq!(config, DnsConfig::default());
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.attempts, 2);
    }

    #[test]
    fn partial_override() {
        let config: DnsConfig = ron::from_str("(timeout_secs: 1)").unwrap();
        assert_eq!(config.timeout_secs, 1);
        assert_eq!(config.attempts, 2);
    }
}
