use std::str::FromStr;

use alloy::{primitives::Address, signers::local::PrivateKeySigner};
use url::Url;

use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub struct Config {
    pub ethereum_http_rpc_url: Url,
    pub ethereum_ws_rpc_url: Option<Url>,
    pub wallet_private_key: PrivateKeySigner,
    pub token_address: Address,
    pub paymaster_address: Address,
    pub aggregator_address: Address,
    pub escrow_address: Address,
    pub stake_viewer_address: Address,
}

pub struct ConfigBuilder {
    ethereum_http_rpc_url: Option<String>,
    ethereum_ws_rpc_url: Option<String>,
    wallet_private_key: Option<String>,
    token_address: Option<String>,
    paymaster_address: Option<String>,
    aggregator_address: Option<String>,
    escrow_address: Option<String>,
    stake_viewer_address: Option<String>,
}

impl ConfigBuilder {
    fn empty() -> Self {
        Self {
            ethereum_http_rpc_url: None,
            ethereum_ws_rpc_url: None,
            wallet_private_key: None,
            token_address: None,
            paymaster_address: None,
            aggregator_address: None,
            escrow_address: None,
            stake_viewer_address: None,
        }
    }

    pub fn ethereum_http_rpc_url(mut self, ethereum_http_rpc_url: String) -> Self {
        self.ethereum_http_rpc_url = Some(ethereum_http_rpc_url);
        self
    }

    /// Required for live event watching; read and transact calls go over HTTP.
    pub fn ethereum_ws_rpc_url(mut self, ethereum_ws_rpc_url: String) -> Self {
        self.ethereum_ws_rpc_url = Some(ethereum_ws_rpc_url);
        self
    }

    pub fn wallet_private_key(mut self, wallet_private_key: String) -> Self {
        self.wallet_private_key = Some(wallet_private_key);
        self
    }

    pub fn token_address(mut self, token_address: String) -> Self {
        self.token_address = Some(token_address);
        self
    }

    pub fn paymaster_address(mut self, paymaster_address: String) -> Self {
        self.paymaster_address = Some(paymaster_address);
        self
    }

    pub fn aggregator_address(mut self, aggregator_address: String) -> Self {
        self.aggregator_address = Some(aggregator_address);
        self
    }

    pub fn escrow_address(mut self, escrow_address: String) -> Self {
        self.escrow_address = Some(escrow_address);
        self
    }

    pub fn stake_viewer_address(mut self, stake_viewer_address: String) -> Self {
        self.stake_viewer_address = Some(stake_viewer_address);
        self
    }

    pub fn from_env(mut self) -> Self {
        if let Ok(v) = std::env::var("PAYGATE_ETHEREUM_HTTP_RPC_URL") {
            self = self.ethereum_http_rpc_url(v);
        }
        if let Ok(v) = std::env::var("PAYGATE_ETHEREUM_WS_RPC_URL") {
            self = self.ethereum_ws_rpc_url(v);
        }
        if let Ok(v) = std::env::var("PAYGATE_WALLET_PRIVATE_KEY") {
            self = self.wallet_private_key(v);
        }
        if let Ok(v) = std::env::var("PAYGATE_TOKEN_ADDRESS") {
            self = self.token_address(v);
        }
        if let Ok(v) = std::env::var("PAYGATE_PAYMASTER_ADDRESS") {
            self = self.paymaster_address(v);
        }
        if let Ok(v) = std::env::var("PAYGATE_AGGREGATOR_ADDRESS") {
            self = self.aggregator_address(v);
        }
        if let Ok(v) = std::env::var("PAYGATE_ESCROW_ADDRESS") {
            self = self.escrow_address(v);
        }
        if let Ok(v) = std::env::var("PAYGATE_STAKE_VIEWER_ADDRESS") {
            self = self.stake_viewer_address(v);
        }
        self
    }

    pub fn build(self) -> Result<Config, ConfigError> {
        let ethereum_http_rpc_url =
            Self::required(self.ethereum_http_rpc_url, "ethereum_http_rpc_url")?;
        let ethereum_http_rpc_url = parse_url("ethereum_http_rpc_url", &ethereum_http_rpc_url)?;

        let wallet_private_key = Self::required(self.wallet_private_key, "wallet_private_key")?;
        let wallet_private_key = parse_private_key("wallet_private_key", &wallet_private_key)?;

        let ethereum_ws_rpc_url = match self.ethereum_ws_rpc_url {
            Some(raw) => Some(parse_url("ethereum_ws_rpc_url", &raw)?),
            None => None,
        };

        let token_address = Self::required_address(self.token_address, "token_address")?;
        let paymaster_address =
            Self::required_address(self.paymaster_address, "paymaster_address")?;
        let aggregator_address =
            Self::required_address(self.aggregator_address, "aggregator_address")?;
        let escrow_address = Self::required_address(self.escrow_address, "escrow_address")?;
        let stake_viewer_address =
            Self::required_address(self.stake_viewer_address, "stake_viewer_address")?;

        Ok(Config {
            ethereum_http_rpc_url,
            ethereum_ws_rpc_url,
            wallet_private_key,
            token_address,
            paymaster_address,
            aggregator_address,
            escrow_address,
            stake_viewer_address,
        })
    }

    fn required(value: Option<String>, field: &str) -> Result<String, ConfigError> {
        value.ok_or_else(|| ConfigError::Missing(field.to_string()))
    }

    fn required_address(value: Option<String>, field: &str) -> Result<Address, ConfigError> {
        let raw = Self::required(value, field)?;
        parse_address(field, &raw)
    }
}

fn parse_url(field: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidValue(format!("{field}: invalid URL: {e}")))
}

fn parse_address(field: &str, raw: &str) -> Result<Address, ConfigError> {
    Address::from_str(raw)
        .map_err(|e| ConfigError::InvalidValue(format!("{field}: invalid address: {e}")))
}

fn parse_private_key(field: &str, raw: &str) -> Result<PrivateKeySigner, ConfigError> {
    PrivateKeySigner::from_str(raw)
        .map_err(|e| ConfigError::InvalidValue(format!("{field}: invalid private key: {e}")))
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::empty().ethereum_http_rpc_url("http://localhost:8545/".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VALID_PRIVATE_KEY: &str =
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const VALID_TOKEN: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
    const VALID_PAYMASTER: &str = "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512";
    const VALID_AGGREGATOR: &str = "0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0";
    const VALID_ESCROW: &str = "0xCf7Ed3AccA5a467e9e704C703E8D87F634fB0Fc9";
    const VALID_STAKE_VIEWER: &str = "0xDc64a140Aa3E981100a9becA4E685f962f0cF6C9";
    const VALID_HTTP_RPC_URL: &str = "http://localhost:8545/";
    const VALID_WS_RPC_URL: &str = "ws://localhost:8546/";

    fn builder_with_addresses() -> ConfigBuilder {
        ConfigBuilder::default()
            .token_address(VALID_TOKEN.to_string())
            .paymaster_address(VALID_PAYMASTER.to_string())
            .aggregator_address(VALID_AGGREGATOR.to_string())
            .escrow_address(VALID_ESCROW.to_string())
            .stake_viewer_address(VALID_STAKE_VIEWER.to_string())
    }

    #[test]
    fn test_default_builder() {
        let builder = ConfigBuilder::default();
        assert_eq!(
            builder.ethereum_http_rpc_url,
            Some("http://localhost:8545/".to_string())
        );
        assert!(builder.ethereum_ws_rpc_url.is_none());
        assert!(builder.wallet_private_key.is_none());
        assert!(builder.token_address.is_none());
    }

    #[test]
    fn test_build_with_required_fields() {
        let config = builder_with_addresses()
            .wallet_private_key(VALID_PRIVATE_KEY.to_string())
            .build();

        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.ethereum_http_rpc_url.as_str(), VALID_HTTP_RPC_URL);
        assert_eq!(
            config.wallet_private_key,
            parse_private_key("wallet_private_key", VALID_PRIVATE_KEY)
                .expect("Invalid private key")
        );
        assert!(config.ethereum_ws_rpc_url.is_none());
        assert_eq!(config.token_address.to_string(), VALID_TOKEN);
        assert_eq!(config.escrow_address.to_string(), VALID_ESCROW);
    }

    #[test]
    fn test_build_with_ws_url() {
        let config = builder_with_addresses()
            .wallet_private_key(VALID_PRIVATE_KEY.to_string())
            .ethereum_ws_rpc_url(VALID_WS_RPC_URL.to_string())
            .build();

        assert!(config.is_ok());
        assert_eq!(
            config.unwrap().ethereum_ws_rpc_url.unwrap().as_str(),
            VALID_WS_RPC_URL
        );
    }

    #[test]
    fn test_build_missing_wallet_private_key() {
        let config = builder_with_addresses().build();

        assert!(config.is_err());
        match config.unwrap_err() {
            ConfigError::Missing(field) => assert_eq!(field, "wallet_private_key"),
            _ => panic!("Expected Missing error"),
        }
    }

    #[test]
    fn test_build_missing_contract_address() {
        let config = ConfigBuilder::default()
            .wallet_private_key(VALID_PRIVATE_KEY.to_string())
            .build();

        assert!(config.is_err());
        match config.unwrap_err() {
            ConfigError::Missing(field) => assert_eq!(field, "token_address"),
            _ => panic!("Expected Missing error"),
        }
    }

    #[test]
    fn test_build_invalid_rpc_url() {
        let config = builder_with_addresses()
            .ethereum_http_rpc_url("not-a-valid-url".to_string())
            .wallet_private_key(VALID_PRIVATE_KEY.to_string())
            .build();

        assert!(config.is_err());
        match config.unwrap_err() {
            ConfigError::InvalidValue(msg) => assert!(msg.contains("invalid URL")),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_build_invalid_wallet_private_key() {
        let config = builder_with_addresses()
            .wallet_private_key("not-a-valid-key".to_string())
            .build();

        assert!(config.is_err());
        match config.unwrap_err() {
            ConfigError::InvalidValue(msg) => assert!(msg.contains("invalid private key")),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_build_invalid_contract_address() {
        let config = builder_with_addresses()
            .wallet_private_key(VALID_PRIVATE_KEY.to_string())
            .escrow_address("not-a-valid-address".to_string())
            .build();

        assert!(config.is_err());
        match config.unwrap_err() {
            ConfigError::InvalidValue(msg) => assert!(msg.contains("invalid address")),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_invalid_value_error_names_the_field() {
        let config = builder_with_addresses()
            .wallet_private_key(VALID_PRIVATE_KEY.to_string())
            .aggregator_address("0xnope".to_string())
            .build();

        match config.unwrap_err() {
            ConfigError::InvalidValue(msg) => assert!(msg.starts_with("aggregator_address:")),
            _ => panic!("Expected InvalidValue error"),
        }

        let config = builder_with_addresses()
            .wallet_private_key(VALID_PRIVATE_KEY.to_string())
            .ethereum_ws_rpc_url("not a url".to_string())
            .build();

        match config.unwrap_err() {
            ConfigError::InvalidValue(msg) => assert!(msg.starts_with("ethereum_ws_rpc_url:")),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    #[serial]
    fn test_from_env_with_all_vars() {
        unsafe {
            std::env::set_var("PAYGATE_ETHEREUM_HTTP_RPC_URL", VALID_HTTP_RPC_URL);
            std::env::set_var("PAYGATE_ETHEREUM_WS_RPC_URL", VALID_WS_RPC_URL);
            std::env::set_var("PAYGATE_WALLET_PRIVATE_KEY", VALID_PRIVATE_KEY);
            std::env::set_var("PAYGATE_TOKEN_ADDRESS", VALID_TOKEN);
            std::env::set_var("PAYGATE_PAYMASTER_ADDRESS", VALID_PAYMASTER);
            std::env::set_var("PAYGATE_AGGREGATOR_ADDRESS", VALID_AGGREGATOR);
            std::env::set_var("PAYGATE_ESCROW_ADDRESS", VALID_ESCROW);
            std::env::set_var("PAYGATE_STAKE_VIEWER_ADDRESS", VALID_STAKE_VIEWER);
        }

        let config = ConfigBuilder::default().from_env().build();

        // Clean up
        unsafe {
            std::env::remove_var("PAYGATE_ETHEREUM_HTTP_RPC_URL");
            std::env::remove_var("PAYGATE_ETHEREUM_WS_RPC_URL");
            std::env::remove_var("PAYGATE_WALLET_PRIVATE_KEY");
            std::env::remove_var("PAYGATE_TOKEN_ADDRESS");
            std::env::remove_var("PAYGATE_PAYMASTER_ADDRESS");
            std::env::remove_var("PAYGATE_AGGREGATOR_ADDRESS");
            std::env::remove_var("PAYGATE_ESCROW_ADDRESS");
            std::env::remove_var("PAYGATE_STAKE_VIEWER_ADDRESS");
        }

        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.ethereum_http_rpc_url.as_str(), VALID_HTTP_RPC_URL);
        assert_eq!(config.ethereum_ws_rpc_url.unwrap().as_str(), VALID_WS_RPC_URL);
        assert_eq!(config.paymaster_address.to_string(), VALID_PAYMASTER);
        assert_eq!(config.aggregator_address.to_string(), VALID_AGGREGATOR);
        assert_eq!(config.stake_viewer_address.to_string(), VALID_STAKE_VIEWER);
    }

    #[test]
    #[serial]
    fn test_from_env_override() {
        unsafe {
            std::env::set_var("PAYGATE_ETHEREUM_HTTP_RPC_URL", "http://env-url:3000/");
        }

        let config = builder_with_addresses()
            .ethereum_http_rpc_url(VALID_HTTP_RPC_URL.to_string())
            .from_env()
            .wallet_private_key(VALID_PRIVATE_KEY.to_string())
            .build();

        // Clean up
        unsafe {
            std::env::remove_var("PAYGATE_ETHEREUM_HTTP_RPC_URL");
        }

        assert!(config.is_ok());
        let config = config.unwrap();
        // from_env should override the earlier value
        assert_eq!(config.ethereum_http_rpc_url.as_str(), "http://env-url:3000/");
    }
}
