//! Voucher payload and signed voucher types.
//!
//! `VoucherFields` is the unsigned payload that gets struct-hashed and signed;
//! `SignedVoucher` is the payload plus its signature, the only artifact this
//! system hands to callers. Field names in the serialized form match the
//! verifying contract's struct definition (`tokenId`, `nonce`, `expiry`,
//! `signature`).

use alloy_primitives::{Bytes, B256, U256};
use serde::{Deserialize, Serialize};

use crate::eip712;

/// The unsigned voucher payload.
///
/// All three fields are `uint256` in the EIP-712 type schema, so the 256-bit
/// non-negative range is enforced by the type rather than checked at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherFields {
	/// Identifier of the token the voucher authorizes minting or claiming.
	pub token_id: U256,
	/// Single-use replay-protection value; consumed by the verifying
	/// contract on a successful claim and never valid again.
	pub nonce: U256,
	/// Time or block bound after which the voucher must be rejected.
	/// Zero means the voucher never expires.
	pub expiry: U256,
}

impl VoucherFields {
	/// Creates a payload with no expiry.
	pub fn new(token_id: impl Into<U256>, nonce: impl Into<U256>) -> Self {
		Self {
			token_id: token_id.into(),
			nonce: nonce.into(),
			expiry: U256::ZERO,
		}
	}

	/// Sets the expiry bound.
	pub fn with_expiry(mut self, expiry: impl Into<U256>) -> Self {
		self.expiry = expiry.into();
		self
	}

	/// Computes the EIP-712 struct hash of this payload.
	pub fn struct_hash(&self) -> B256 {
		eip712::voucher_struct_hash(self)
	}

	/// Merges a signature into the payload, producing the final voucher.
	pub fn into_signed(self, signature: Bytes) -> SignedVoucher {
		SignedVoucher {
			token_id: self.token_id,
			nonce: self.nonce,
			expiry: self.expiry,
			signature,
		}
	}
}

/// A voucher payload plus the signature over its structured hash.
///
/// Immutable once created; validity is decided entirely by the verifying
/// contract at redemption time. Serializes to JSON with `0x`-prefixed hex
/// values, suitable for transport to whatever process submits the redeeming
/// transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedVoucher {
	/// Identifier of the token the voucher authorizes minting or claiming.
	pub token_id: U256,
	/// Single-use replay-protection value.
	pub nonce: U256,
	/// Expiry bound; zero means no expiry.
	pub expiry: U256,
	/// 65-byte `r || s || v` signature over the EIP-712 digest.
	pub signature: Bytes,
}

impl SignedVoucher {
	/// Returns the unsigned payload these signature bytes commit to.
	pub fn fields(&self) -> VoucherFields {
		VoucherFields {
			token_id: self.token_id,
			nonce: self.nonce,
			expiry: self.expiry,
		}
	}
}
