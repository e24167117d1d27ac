//! Issuer configuration
//!
//! Loaded from environment variables with development defaults. Mock mode
//! (the default) runs the whole pipeline against the in-memory ledger and
//! store; real mode requires operator credentials and service endpoints.

use std::env;

use certmint_common::{AccountId, Error, Result, TokenId};
use certmint_ledger::{OperatorContext, OperatorKey};

#[derive(Debug, Clone)]
pub struct IssuerConfig {
    /// Network name, used in explorer URLs ("testnet", "mainnet")
    pub network: String,

    /// Treasury account; required outside mock mode
    pub operator_account: Option<AccountId>,

    /// Treasury private key (either supported encoding)
    pub operator_key: Option<OperatorKey>,

    /// Collection id, persisted out-of-band after the one-time registration
    pub collection_token: Option<TokenId>,

    /// Collection display name and symbol, used only at registration
    pub collection_name: String,
    pub collection_symbol: String,

    /// Secret behind the platform signature
    pub signing_secret: String,

    /// Base of the verification URL embedded in certificate QR codes
    pub verify_base_url: String,

    /// Ledger explorer base URL
    pub explorer_base_url: String,

    /// Upper bound on any single transaction fee, in tinybars
    pub max_fee_tinybars: u64,

    /// Public mirror node base URL
    pub mirror_base_url: String,

    /// File-storage service endpoints; required outside mock mode
    pub storage_api_url: Option<String>,
    pub storage_gateway_url: Option<String>,

    /// Run against the in-memory ledger and store
    pub mock_mode: bool,
}

impl IssuerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env if present (local development)
        dotenvy::dotenv().ok();

        // Parse failures here are configuration errors: the value came from
        // the deployment environment, not from a caller.
        let operator_account = match env::var("OPERATOR_ACCOUNT_ID") {
            Ok(s) => Some(s.parse::<AccountId>().map_err(|e| {
                Error::Configuration(format!("invalid OPERATOR_ACCOUNT_ID: {e}"))
            })?),
            Err(_) => None,
        };
        let operator_key = match env::var("OPERATOR_PRIVATE_KEY") {
            Ok(s) => Some(OperatorKey::parse(&s)?),
            Err(_) => None,
        };
        let collection_token = match env::var("COLLECTION_TOKEN_ID") {
            Ok(s) => Some(s.parse::<TokenId>().map_err(|e| {
                Error::Configuration(format!("invalid COLLECTION_TOKEN_ID: {e}"))
            })?),
            Err(_) => None,
        };

        let config = Self {
            network: env::var("CERTMINT_NETWORK").unwrap_or_else(|_| "testnet".to_string()),
            operator_account,
            operator_key,
            collection_token,
            collection_name: env::var("COLLECTION_NAME")
                .unwrap_or_else(|_| "Web3versity Course Certificates".to_string()),
            collection_symbol: env::var("COLLECTION_SYMBOL")
                .unwrap_or_else(|_| "W3VC".to_string()),
            signing_secret: env::var("PLATFORM_SIGNING_SECRET")
                .unwrap_or_else(|_| "dev-signing-secret".to_string()),
            verify_base_url: env::var("VERIFY_BASE_URL")
                .unwrap_or_else(|_| "https://web3versity.app/verify".to_string()),
            explorer_base_url: env::var("EXPLORER_BASE_URL")
                .unwrap_or_else(|_| "https://hashscan.io".to_string()),
            max_fee_tinybars: env::var("MAX_FEE_TINYBARS")
                .unwrap_or_else(|_| "5000000000".to_string())
                .parse()
                .map_err(|_| Error::Configuration("invalid MAX_FEE_TINYBARS".into()))?,
            mirror_base_url: env::var("MIRROR_BASE_URL")
                .unwrap_or_else(|_| "https://testnet.mirrornode.hedera.com".to_string()),
            storage_api_url: env::var("STORAGE_API_URL").ok(),
            storage_gateway_url: env::var("STORAGE_GATEWAY_URL").ok(),
            mock_mode: env::var("MOCK_MODE")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .map_err(|_| Error::Configuration("invalid MOCK_MODE (expected true/false)".into()))?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Configuration for tests and mock deployments: funded mock operator,
    /// collection unset until registered.
    pub fn mock() -> Self {
        Self {
            network: "testnet".into(),
            operator_account: Some(AccountId::new(0, 0, 2)),
            operator_key: Some(
                OperatorKey::parse(
                    "91132178e72057a1d7528025956fe39b0b847f200ab59b2fdd367017f3087137",
                )
                .expect("static test key parses"),
            ),
            collection_token: None,
            collection_name: "Web3versity Course Certificates".into(),
            collection_symbol: "W3VC".into(),
            signing_secret: "dev-signing-secret".into(),
            verify_base_url: "https://web3versity.app/verify".into(),
            explorer_base_url: "https://hashscan.io".into(),
            max_fee_tinybars: 5_000_000_000,
            mirror_base_url: "https://testnet.mirrornode.hedera.com".into(),
            storage_api_url: None,
            storage_gateway_url: None,
            mock_mode: true,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.max_fee_tinybars == 0 {
            return Err(Error::Configuration("MAX_FEE_TINYBARS must be greater than 0".into()));
        }
        if !self.mock_mode {
            if self.operator_account.is_none() || self.operator_key.is_none() {
                return Err(Error::Configuration(
                    "OPERATOR_ACCOUNT_ID and OPERATOR_PRIVATE_KEY are required when MOCK_MODE=false"
                        .into(),
                ));
            }
            if self.storage_api_url.is_none() || self.storage_gateway_url.is_none() {
                return Err(Error::Configuration(
                    "STORAGE_API_URL and STORAGE_GATEWAY_URL are required when MOCK_MODE=false"
                        .into(),
                ));
            }
        }
        Ok(())
    }

    /// Operator context, or the configuration error issuance must stop on
    pub fn operator(&self) -> Result<OperatorContext> {
        match (&self.operator_account, &self.operator_key) {
            (Some(account), Some(key)) => Ok(OperatorContext::new(*account, key.clone())),
            _ => Err(Error::Configuration(
                "operator credentials are not configured".into(),
            )),
        }
    }

    /// Collection id, or the configuration error issuance must stop on
    pub fn collection(&self) -> Result<TokenId> {
        self.collection_token.ok_or_else(|| {
            Error::Configuration(
                "COLLECTION_TOKEN_ID is not set; run the collection registration once and persist the returned id"
                    .into(),
            )
        })
    }

    /// Explorer URL for one certificate token
    pub fn explorer_url(&self, token_id: TokenId, serial: u64) -> String {
        format!(
            "{}/{}/token/{}/{}",
            self.explorer_base_url, self.network, token_id, serial
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_config_has_operator_but_no_collection() {
        let config = IssuerConfig::mock();
        assert!(config.operator().is_ok());
        assert!(matches!(config.collection(), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_explorer_url_shape() {
        let mut config = IssuerConfig::mock();
        config.collection_token = Some(TokenId::new(0, 0, 5001));
        assert_eq!(
            config.explorer_url(TokenId::new(0, 0, 5001), 7),
            "https://hashscan.io/testnet/token/0.0.5001/7"
        );
    }

    #[test]
    fn test_malformed_env_ids_are_configuration_errors() {
        // The only test in this crate that touches the environment
        env::set_var("OPERATOR_ACCOUNT_ID", "not-an-account");
        let err = IssuerConfig::from_env().unwrap_err();
        assert_eq!(err.kind(), "configuration");
        env::remove_var("OPERATOR_ACCOUNT_ID");

        env::set_var("COLLECTION_TOKEN_ID", "0.0");
        let err = IssuerConfig::from_env().unwrap_err();
        assert_eq!(err.kind(), "configuration");
        env::remove_var("COLLECTION_TOKEN_ID");
    }

    #[test]
    fn test_real_mode_requires_credentials() {
        let mut config = IssuerConfig::mock();
        config.mock_mode = false;
        config.operator_key = None;
        assert!(config.validate().is_err());
    }
}
