//! Local signer backed by an in-process secp256k1 private key.
//!
//! Intended for development and test deployments; production issuers would
//! plug a remote or hardware-backed implementation into the same interface.

use alloy_primitives::{Address, Bytes};
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use voucher_types::{eip712, ImplementationRegistry, SecretString, SigningDomain, VoucherFields};

use crate::{SignerError, SignerFactory, SignerInterface};

/// Signer that holds its key in process memory.
pub struct LocalSigner {
	signer: PrivateKeySigner,
}

impl std::fmt::Debug for LocalSigner {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		// Never print the inner signer; it holds the private key.
		f.debug_struct("LocalSigner")
			.field("address", &self.signer.address())
			.finish_non_exhaustive()
	}
}

impl LocalSigner {
	/// Creates a local signer from a hex-encoded private key.
	///
	/// Accepts the key with or without a `0x` prefix. The key only ever
	/// exists inside the `SecretString` and the parsed signer.
	pub fn new(private_key: &SecretString) -> Result<Self, SignerError> {
		let signer: PrivateKeySigner = private_key.with_exposed(|key| {
			key.parse()
				.map_err(|_| SignerError::InvalidKey("invalid private key format".to_string()))
		})?;
		Ok(Self { signer })
	}

	/// Returns the signer address without going through the async interface.
	pub fn local_address(&self) -> Address {
		self.signer.address()
	}
}

#[async_trait]
impl SignerInterface for LocalSigner {
	async fn address(&self) -> Result<Address, SignerError> {
		Ok(self.signer.address())
	}

	async fn sign_typed_data(
		&self,
		domain: &SigningDomain,
		fields: &VoucherFields,
	) -> Result<Bytes, SignerError> {
		let digest = eip712::signing_digest(domain, fields);
		let signature = self
			.signer
			.sign_hash(&digest)
			.await
			.map_err(|e| SignerError::SigningFailed(e.to_string()))?;
		Ok(Bytes::from(signature.as_bytes().to_vec()))
	}
}

/// Factory function to create a local signer from configuration.
fn create_local_signer(config: &toml::Value) -> Result<Box<dyn SignerInterface>, SignerError> {
	let private_key = config
		.get("private_key")
		.and_then(|v| v.as_str())
		.ok_or_else(|| SignerError::Implementation("private_key is required".to_string()))?;

	let signer = LocalSigner::new(&SecretString::from(private_key))?;
	tracing::info!(address = %signer.local_address(), "Local signer initialized");
	Ok(Box::new(signer))
}

/// Registry for the local signer implementation.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "local";
	type Factory = SignerFactory;

	fn factory() -> Self::Factory {
		create_local_signer
	}
}

impl crate::SignerRegistry for Registry {}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::{address, Signature, U256};

	// Well-known development key (hardhat/anvil account 0).
	const TEST_PRIVATE_KEY: &str =
		"0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
	const TEST_ADDRESS: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");

	fn test_domain() -> SigningDomain {
		SigningDomain {
			name: "Webaverse-voucher".to_string(),
			version: "1".to_string(),
			chain_id: 4,
			verifying_contract: address!("abcdabcdabcdabcdabcdabcdabcdabcdabcdabcd"),
		}
	}

	#[tokio::test]
	async fn address_matches_known_key() {
		let signer = LocalSigner::new(&SecretString::from(TEST_PRIVATE_KEY)).unwrap();
		assert_eq!(signer.address().await.unwrap(), TEST_ADDRESS);
	}

	#[tokio::test]
	async fn signature_recovers_to_signer_address() {
		let signer = LocalSigner::new(&SecretString::from(TEST_PRIVATE_KEY)).unwrap();
		let domain = test_domain();
		let fields = VoucherFields::new(U256::from(1u64), U256::from(1u64));

		let bytes = signer.sign_typed_data(&domain, &fields).await.unwrap();
		assert_eq!(bytes.len(), 65);

		let signature = Signature::try_from(bytes.as_ref()).unwrap();
		let digest = eip712::signing_digest(&domain, &fields);
		let recovered = signature.recover_address_from_prehash(&digest).unwrap();
		assert_eq!(recovered, TEST_ADDRESS);
	}

	#[test]
	fn rejects_malformed_private_key() {
		let err = LocalSigner::new(&SecretString::from("not-a-key")).unwrap_err();
		assert!(matches!(err, SignerError::InvalidKey(_)));
	}

	#[test]
	fn factory_requires_private_key() {
		let config = toml::Value::Table(Default::default());
		let err = create_local_signer(&config).unwrap_err();
		assert!(matches!(err, SignerError::Implementation(_)));
	}

	#[test]
	fn factory_builds_signer_from_config() {
		let mut table = toml::value::Table::new();
		table.insert(
			"private_key".to_string(),
			toml::Value::String(TEST_PRIVATE_KEY.to_string()),
		);
		assert!(create_local_signer(&toml::Value::Table(table)).is_ok());
	}
}
