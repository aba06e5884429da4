//! Voucher issuer module for the voucher issuance system.
//!
//! The issuer turns `(tokenId, nonce, expiry)` into a signed voucher a
//! verifying contract can redeem later: it assembles the EIP-712 signing
//! domain once per instance, builds the voucher payload and delegates to the
//! configured signer backend for the signature. Nonce consumption and expiry
//! enforcement live in the verifying contract, not here.

use std::sync::{Arc, OnceLock};

use alloy_primitives::{Address, U256};
use thiserror::Error;
use voucher_config::Config;
use voucher_signer::{SignerError, SignerService};
use voucher_types::{SignedVoucher, SigningDomain, VoucherFields};

/// Protocol name the default verifying contract was deployed with.
/// Must match the constant in the smart contract.
pub const SIGNING_DOMAIN_NAME: &str = "Webaverse-voucher";
/// Protocol version the default verifying contract was deployed with.
pub const SIGNING_DOMAIN_VERSION: &str = "1";

/// Errors that can occur while issuing vouchers.
#[derive(Debug, Error)]
pub enum IssuerError {
	/// The signing backend failed; surfaced verbatim, never retried here.
	#[error("Signing failed: {0}")]
	Signing(#[from] SignerError),
	/// The issuer could not be built from configuration.
	#[error("Configuration error: {0}")]
	Config(String),
}

/// Creates and signs vouchers for one verifying contract on one chain.
///
/// The issuer owns two immutable inputs set at construction, the verifying
/// contract address and the signing capability, plus an explicit chain id.
/// If the target chain changes, build a new issuer; the cached domain is
/// never invalidated.
pub struct VoucherIssuer {
	verifying_contract: Address,
	chain_id: u64,
	domain_name: String,
	domain_version: String,
	signer: Arc<SignerService>,
	domain: OnceLock<SigningDomain>,
}

impl std::fmt::Debug for VoucherIssuer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		// `signer` holds a `Box<dyn SignerInterface>` with no `Debug` bound.
		f.debug_struct("VoucherIssuer")
			.field("verifying_contract", &self.verifying_contract)
			.field("chain_id", &self.chain_id)
			.field("domain_name", &self.domain_name)
			.field("domain_version", &self.domain_version)
			.finish_non_exhaustive()
	}
}

impl VoucherIssuer {
	/// Creates an issuer targeting a deployed instance of the verifying
	/// contract, with the default domain name and version.
	pub fn new(verifying_contract: Address, chain_id: u64, signer: Arc<SignerService>) -> Self {
		Self {
			verifying_contract,
			chain_id,
			domain_name: SIGNING_DOMAIN_NAME.to_string(),
			domain_version: SIGNING_DOMAIN_VERSION.to_string(),
			signer,
			domain: OnceLock::new(),
		}
	}

	/// Overrides the domain name and version, for contracts deployed with
	/// constants other than the defaults.
	pub fn with_domain(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
		self.domain_name = name.into();
		self.domain_version = version.into();
		self
	}

	/// Builds an issuer from configuration, resolving the signer backend
	/// through the implementation registry.
	pub fn from_config(config: &Config) -> Result<Self, IssuerError> {
		let factory = voucher_signer::get_all_implementations()
			.into_iter()
			.find(|(name, _)| *name == config.signer.implementation)
			.map(|(_, factory)| factory)
			.ok_or_else(|| {
				IssuerError::Config(format!(
					"Unknown signer implementation: {}",
					config.signer.implementation
				))
			})?;
		// No signing happens here; a backend that cannot be built is a
		// configuration problem, not a signing failure.
		let implementation =
			factory(&config.signer.config).map_err(|e| IssuerError::Config(e.to_string()))?;

		let verifying_contract = config
			.issuer
			.verifying_contract()
			.map_err(|e| IssuerError::Config(e.to_string()))?;

		let mut issuer = Self::new(
			verifying_contract,
			config.issuer.chain_id,
			Arc::new(SignerService::new(implementation)),
		);
		if let Some(name) = &config.issuer.domain_name {
			issuer.domain_name = name.clone();
		}
		if let Some(version) = &config.issuer.domain_version {
			issuer.domain_version = version.clone();
		}
		Ok(issuer)
	}

	/// Creates and signs a voucher with no expiry.
	pub async fn create_voucher(
		&self,
		token_id: impl Into<U256>,
		nonce: impl Into<U256>,
	) -> Result<SignedVoucher, IssuerError> {
		self.create_voucher_with_expiry(token_id, nonce, U256::ZERO)
			.await
	}

	/// Creates and signs a voucher.
	///
	/// Pure apart from the one-time domain cache write: the same inputs and
	/// key material always produce a signature that recovers to the same
	/// signer address. Any signing failure propagates immediately and no
	/// partial voucher is returned; retrying is always safe for the caller.
	pub async fn create_voucher_with_expiry(
		&self,
		token_id: impl Into<U256>,
		nonce: impl Into<U256>,
		expiry: impl Into<U256>,
	) -> Result<SignedVoucher, IssuerError> {
		let fields = VoucherFields::new(token_id, nonce).with_expiry(expiry);
		let domain = self.signing_domain();
		let signature = self.signer.sign_typed_data(domain, &fields).await?;

		tracing::debug!(
			token_id = %fields.token_id,
			nonce = %fields.nonce,
			expiry = %fields.expiry,
			"Voucher signed"
		);
		Ok(fields.into_signed(signature))
	}

	/// Returns the signing domain for this issuer, computing it on first use.
	///
	/// Idempotent: repeated calls return the identical cached value. The
	/// computation is pure, so a race between concurrent first callers
	/// resolves to a single stored value.
	pub fn signing_domain(&self) -> &SigningDomain {
		self.domain.get_or_init(|| {
			tracing::debug!(
				chain_id = self.chain_id,
				verifying_contract = %self.verifying_contract,
				"Computing signing domain"
			);
			SigningDomain {
				name: self.domain_name.clone(),
				version: self.domain_version.clone(),
				chain_id: self.chain_id,
				verifying_contract: self.verifying_contract,
			}
		})
	}
}
