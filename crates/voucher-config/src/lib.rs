//! Configuration module for the voucher issuance system.
//!
//! Loads issuer and signer settings from TOML and validates them before any
//! key material is parsed or any voucher is signed. The signer section keeps
//! an opaque implementation-specific table that the chosen signer factory
//! validates itself.
//!
//! ```toml
//! [issuer]
//! contract_address = "0xabcdabcdabcdabcdabcdabcdabcdabcdabcdabcd"
//! chain_id = 4
//!
//! [signer]
//! implementation = "local"
//! config = { private_key = "0x..." }
//! ```

use alloy_primitives::Address;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		ConfigError::Parse(err.message().to_string())
	}
}

/// Top-level configuration for a voucher issuer deployment.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	/// Domain settings for the issuer instance.
	pub issuer: IssuerConfig,
	/// Signing backend selection and its backend-specific settings.
	pub signer: SignerConfig,
}

/// Settings that determine the EIP-712 signing domain.
#[derive(Debug, Clone, Deserialize)]
pub struct IssuerConfig {
	/// Address of the contract that will verify voucher signatures.
	pub contract_address: String,
	/// Chain the verifying contract is deployed on. Never defaulted: a
	/// wrong value here is undetectable locally and only shows up as
	/// rejected claims on chain.
	pub chain_id: u64,
	/// Overrides the protocol name baked into the verifying contract.
	pub domain_name: Option<String>,
	/// Overrides the protocol version baked into the verifying contract.
	pub domain_version: Option<String>,
}

impl IssuerConfig {
	/// Parses the configured contract address.
	pub fn verifying_contract(&self) -> Result<Address, ConfigError> {
		self.contract_address.parse::<Address>().map_err(|e| {
			ConfigError::Validation(format!(
				"Invalid contract_address '{}': {}",
				self.contract_address, e
			))
		})
	}
}

/// Signing backend configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SignerConfig {
	/// Name of the signer implementation to use, e.g. "local".
	pub implementation: String,
	/// Implementation-specific settings, validated by the chosen factory.
	#[serde(default = "empty_table")]
	pub config: toml::Value,
}

fn empty_table() -> toml::Value {
	toml::Value::Table(Default::default())
}

impl Config {
	/// Loads and validates configuration from a TOML file.
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
		let content = std::fs::read_to_string(path)?;
		content.parse()
	}

	/// Validates the configuration values.
	fn validate(&self) -> Result<(), ConfigError> {
		self.issuer.verifying_contract()?;
		if self.issuer.chain_id == 0 {
			return Err(ConfigError::Validation(
				"issuer.chain_id must be non-zero".to_string(),
			));
		}
		if self.signer.implementation.is_empty() {
			return Err(ConfigError::Validation(
				"signer.implementation must not be empty".to_string(),
			));
		}
		Ok(())
	}
}

impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let config: Config = toml::from_str(s)?;
		config.validate()?;
		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	const VALID_CONFIG: &str = r#"
		[issuer]
		contract_address = "0xabcdabcdabcdabcdabcdabcdabcdabcdabcdabcd"
		chain_id = 4

		[signer]
		implementation = "local"
		config = { private_key = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80" }
	"#;

	#[test]
	fn parses_valid_config() {
		let config: Config = VALID_CONFIG.parse().unwrap();
		assert_eq!(config.issuer.chain_id, 4);
		assert_eq!(config.signer.implementation, "local");
		assert!(config.issuer.verifying_contract().is_ok());
		assert!(config.signer.config.get("private_key").is_some());
	}

	#[test]
	fn rejects_malformed_contract_address() {
		let toml = VALID_CONFIG.replace(
			"0xabcdabcdabcdabcdabcdabcdabcdabcdabcdabcd",
			"not-an-address",
		);
		let err = toml.parse::<Config>().unwrap_err();
		assert!(matches!(err, ConfigError::Validation(_)));
	}

	#[test]
	fn rejects_zero_chain_id() {
		let toml = VALID_CONFIG.replace("chain_id = 4", "chain_id = 0");
		let err = toml.parse::<Config>().unwrap_err();
		assert!(matches!(err, ConfigError::Validation(_)));
	}

	#[test]
	fn signer_config_table_defaults_to_empty() {
		let toml = r#"
			[issuer]
			contract_address = "0xabcdabcdabcdabcdabcdabcdabcdabcdabcdabcd"
			chain_id = 1

			[signer]
			implementation = "local"
		"#;
		let config: Config = toml.parse().unwrap();
		assert!(config.signer.config.as_table().unwrap().is_empty());
	}

	#[test]
	fn loads_from_file() {
		let mut file = NamedTempFile::new().unwrap();
		file.write_all(VALID_CONFIG.as_bytes()).unwrap();

		let config = Config::from_file(file.path()).unwrap();
		assert_eq!(config.issuer.chain_id, 4);
	}

	#[test]
	fn missing_file_is_an_io_error() {
		let err = Config::from_file("/nonexistent/voucher.toml").unwrap_err();
		assert!(matches!(err, ConfigError::Io(_)));
	}
}
