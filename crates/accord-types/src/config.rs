//! Configuration types for the runtime, the exchange and the proxy registry.

use serde::{Deserialize, Serialize};

use crate::{AccordError, Result, constants};

/// Parameters of the simulated chain the contracts run on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Chain identifier, part of every order's EIP-712 domain.
    pub chain_id: u64,
    /// Block timestamp at genesis, in seconds since the UNIX epoch.
    pub genesis_timestamp: u64,
}

impl ChainConfig {
    /// A local chain starting at the current wall-clock time.
    #[must_use]
    pub fn local() -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            chain_id: constants::DEFAULT_CHAIN_ID,
            genesis_timestamp: u64::try_from(now).unwrap_or_default(),
        }
    }

    /// A local chain pinned to a fixed genesis time (deterministic tests).
    #[must_use]
    pub fn at(genesis_timestamp: u64) -> Self {
        Self {
            chain_id: constants::DEFAULT_CHAIN_ID,
            genesis_timestamp,
        }
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self::local()
    }
}

/// EIP-712 domain parameters of an exchange deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            name: constants::DEFAULT_EXCHANGE_NAME.to_string(),
            version: constants::DEFAULT_EXCHANGE_VERSION.to_string(),
            chain_id: constants::DEFAULT_CHAIN_ID,
        }
    }
}

/// Proxy registry parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Seconds that must strictly elapse between `start_grant` and `finish_grant`.
    pub grant_delay_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            grant_delay_secs: constants::DEFAULT_GRANT_DELAY_SECS,
        }
    }
}

/// Top-level configuration: one chain, one exchange domain, one registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccordConfig {
    pub chain: ChainConfig,
    pub exchange: ExchangeConfig,
    pub registry: RegistryConfig,
}

impl AccordConfig {
    /// Parse and validate a JSON configuration document.
    ///
    /// # Errors
    /// `Serialization` on malformed JSON, `Configuration` on inconsistent values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Cross-field consistency checks.
    ///
    /// # Errors
    /// `Configuration` describing the first inconsistency found.
    pub fn validate(&self) -> Result<()> {
        if self.exchange.name.is_empty() || self.exchange.version.is_empty() {
            return Err(AccordError::Configuration(
                "exchange domain name and version must be non-empty".into(),
            ));
        }
        if self.exchange.chain_id != self.chain.chain_id {
            return Err(AccordError::Configuration(format!(
                "exchange chain id {} does not match chain id {}",
                self.exchange.chain_id, self.chain.chain_id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_consistent() {
        let cfg = AccordConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.exchange.name, "Wyvern Exchange");
        assert_eq!(cfg.exchange.version, "3.1");
        assert_eq!(cfg.registry.grant_delay_secs, 1_209_600);
    }

    #[test]
    fn from_json_fills_missing_sections() {
        let cfg = AccordConfig::from_json(
            r#"{ "chain": { "chain_id": 31337, "genesis_timestamp": 1000 },
                 "registry": { "grant_delay_secs": 60 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.chain.genesis_timestamp, 1000);
        assert_eq!(cfg.registry.grant_delay_secs, 60);
        assert_eq!(cfg.exchange, ExchangeConfig::default());
    }

    #[test]
    fn chain_id_mismatch_rejected() {
        let err = AccordConfig::from_json(
            r#"{ "chain": { "chain_id": 1 }, "exchange": { "chain_id": 5 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, AccordError::Configuration(_)));
    }

    #[test]
    fn malformed_json_is_serialization_error() {
        let err = AccordConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, AccordError::Serialization(_)));
    }

    #[test]
    fn empty_domain_name_rejected() {
        let mut cfg = AccordConfig::default();
        cfg.exchange.name.clear();
        assert!(cfg.validate().is_err());
    }
}
