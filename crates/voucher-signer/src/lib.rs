//! Signing capability module for the voucher issuance system.
//!
//! This module defines the interface the issuer uses to obtain EIP-712
//! signatures without ever touching key material, together with a service
//! wrapper and the registry of available signer backends. The bundled
//! `local` implementation signs with an in-process secp256k1 key; remote
//! or hardware-backed signers plug in through the same interface.

use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;
use thiserror::Error;
use voucher_types::{ImplementationRegistry, SigningDomain, VoucherFields};

/// Re-export implementations
pub mod implementations {
	pub mod local;
}

/// Errors that can occur during signing operations.
#[derive(Debug, Error)]
pub enum SignerError {
	/// The backend failed to produce a signature.
	#[error("Signing failed: {0}")]
	SigningFailed(String),
	/// A cryptographic key is invalid or malformed.
	#[error("Invalid key: {0}")]
	InvalidKey(String),
	/// The signer implementation could not be constructed or used.
	#[error("Implementation error: {0}")]
	Implementation(String),
}

/// Trait defining the interface for signer implementations.
///
/// Implementations hold key material (or a handle to a remote holder of key
/// material) and produce EIP-712 signatures over voucher payloads. The
/// issuer depends only on this trait and never sees a private key.
#[async_trait]
pub trait SignerInterface: Send + Sync {
	/// Returns the address of the key this signer controls.
	///
	/// Operators use this to populate the verifying contract's
	/// authorized-signer allowlist.
	async fn address(&self) -> Result<Address, SignerError>;

	/// Signs the EIP-712 digest of a voucher payload under the given domain.
	///
	/// Returns the 65-byte `r || s || v` signature. Failures from the
	/// underlying backend are surfaced verbatim; nothing is retried here.
	async fn sign_typed_data(
		&self,
		domain: &SigningDomain,
		fields: &VoucherFields,
	) -> Result<Bytes, SignerError>;
}

impl std::fmt::Debug for dyn SignerInterface {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str("dyn SignerInterface")
	}
}

/// Type alias for signer factory functions.
///
/// Each implementation provides a factory that builds it from its
/// configuration table.
pub type SignerFactory = fn(&toml::Value) -> Result<Box<dyn SignerInterface>, SignerError>;

/// Registry trait for signer implementations.
pub trait SignerRegistry: ImplementationRegistry<Factory = SignerFactory> {}

/// Get all registered signer implementations.
///
/// Returns (name, factory) tuples for every available backend; the name is
/// matched against `signer.implementation` in configuration.
pub fn get_all_implementations() -> Vec<(&'static str, SignerFactory)> {
	use implementations::local;

	vec![(local::Registry::NAME, local::Registry::factory())]
}

/// Service that wraps a signer implementation.
///
/// This is the handle the issuer holds; it delegates every call to the
/// underlying implementation.
pub struct SignerService {
	implementation: Box<dyn SignerInterface>,
}

impl SignerService {
	/// Creates a new SignerService around the given implementation.
	pub fn new(implementation: Box<dyn SignerInterface>) -> Self {
		Self { implementation }
	}

	/// Returns the address of the managed signing key.
	pub async fn address(&self) -> Result<Address, SignerError> {
		self.implementation.address().await
	}

	/// Signs a voucher payload under the given domain.
	pub async fn sign_typed_data(
		&self,
		domain: &SigningDomain,
		fields: &VoucherFields,
	) -> Result<Bytes, SignerError> {
		self.implementation.sign_typed_data(domain, fields).await
	}
}
