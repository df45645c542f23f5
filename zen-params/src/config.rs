//! Configuration for shielded parameter assembly.

use serde::{Deserialize, Serialize};

use zen_chain::transaction::{HashEngine, TransactionIdentifier};

use crate::oracle::SCALING_FACTOR_METHOD;

/// Configuration for shielded parameter assembly.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// The hash engine used to identify transactions.
    ///
    /// `"sha256"` on most networks, `"sm3"` on networks that use the SM2
    /// signature scheme.
    pub crypto_engine: HashEngine,

    /// The signature of the pool contract method that returns its scaling
    /// factor.
    pub scaling_factor_method: String,
}

impl Config {
    /// Returns a transaction identifier that uses the configured hash engine.
    pub fn transaction_identifier(&self) -> TransactionIdentifier {
        TransactionIdentifier::new(self.crypto_engine)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crypto_engine: HashEngine::default(),
            scaling_factor_method: SCALING_FACTOR_METHOD.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use zen_chain::transaction::HashEngine;

    use super::Config;

    #[test]
    fn config_defaults() -> color_eyre::Result<()> {
        let _init_guard = zen_test::init();

        let config: Config = serde_json::from_str("{}")?;
        assert_eq!(config, Config::default());
        assert_eq!(config.crypto_engine, HashEngine::Sha256);
        assert_eq!(config.scaling_factor_method, "scalingFactor()");

        Ok(())
    }

    #[test]
    fn config_engine_selection() -> color_eyre::Result<()> {
        let _init_guard = zen_test::init();

        let config: Config = serde_json::from_str(r#"{ "crypto_engine": "sm3" }"#)?;
        assert_eq!(config.transaction_identifier().engine(), HashEngine::Sm3);

        Ok(())
    }

    #[test]
    fn config_rejects_unknown_fields() {
        let _init_guard = zen_test::init();

        let result = serde_json::from_str::<Config>(r#"{ "checkpoint_sync": true }"#);
        assert!(result.is_err());
    }
}
