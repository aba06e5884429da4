//! EIP-712 signing domain for voucher issuance.
//!
//! The domain binds every signature to one protocol name, version, verifying
//! contract and chain. All four fields must match what the verifying contract
//! uses to recompute its domain separator, otherwise signature recovery on
//! chain yields an address that is not on the authorized-signer list.

use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

use crate::eip712;

/// The scope within which a voucher signature is valid.
///
/// One `SigningDomain` is shared by all vouchers an issuer produces for a
/// given contract/chain pair. Two domains are interchangeable only if all
/// four fields are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningDomain {
	/// Protocol name the verifying contract was deployed with.
	pub name: String,
	/// Protocol version the verifying contract was deployed with.
	pub version: String,
	/// Chain the verifying contract lives on.
	pub chain_id: u64,
	/// Address of the contract that will check signatures.
	pub verifying_contract: Address,
}

impl SigningDomain {
	/// Computes the domain separator hash for this domain.
	///
	/// This is the value the verifying contract recomputes on chain before
	/// performing signature recovery.
	pub fn separator(&self) -> B256 {
		eip712::domain_separator(self)
	}
}
