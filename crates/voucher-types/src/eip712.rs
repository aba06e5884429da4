//! EIP-712 hashing utilities for voucher signing.
//!
//! These helpers produce the digest the verifying contract recomputes on
//! chain: `keccak256(0x19 || 0x01 || domainSeparator || structHash)`. The
//! type strings below are part of the wire contract; changing a field name,
//! a field order or a type name changes every hash and silently invalidates
//! every signature, so they must match the contract byte for byte.

use alloy_primitives::{keccak256, Address, B256, U256};

use crate::{SigningDomain, VoucherFields};

/// Canonical encoding of the signing domain type.
pub const DOMAIN_TYPE: &str =
	"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// Canonical encoding of the voucher struct type.
pub const NFT_VOUCHER_TYPE: &str = "NFTVoucher(uint256 tokenId,uint256 nonce,uint256 expiry)";

/// Computes the EIP-712 domain separator:
/// `keccak256(abi.encode(typeHash, nameHash, versionHash, chainId, verifyingContract))`.
pub fn domain_separator(domain: &SigningDomain) -> B256 {
	let mut enc = AbiWordEncoder::new();
	enc.push_b256(&keccak256(DOMAIN_TYPE.as_bytes()));
	enc.push_b256(&keccak256(domain.name.as_bytes()));
	enc.push_b256(&keccak256(domain.version.as_bytes()));
	enc.push_u256(U256::from(domain.chain_id));
	enc.push_address(&domain.verifying_contract);
	keccak256(enc.finish())
}

/// Computes the EIP-712 struct hash of a voucher payload.
pub fn voucher_struct_hash(fields: &VoucherFields) -> B256 {
	let mut enc = AbiWordEncoder::new();
	enc.push_b256(&keccak256(NFT_VOUCHER_TYPE.as_bytes()));
	enc.push_u256(fields.token_id);
	enc.push_u256(fields.nonce);
	enc.push_u256(fields.expiry);
	keccak256(enc.finish())
}

/// Computes the final signing digest:
/// `keccak256(0x19 || 0x01 || domainSeparator || structHash)`.
pub fn signing_digest(domain: &SigningDomain, fields: &VoucherFields) -> B256 {
	let mut preimage = Vec::with_capacity(2 + 32 + 32);
	preimage.extend_from_slice(&[0x19, 0x01]);
	preimage.extend_from_slice(domain_separator(domain).as_slice());
	preimage.extend_from_slice(voucher_struct_hash(fields).as_slice());
	keccak256(preimage)
}

/// Minimal ABI encoder for the static types appearing in voucher hashing.
///
/// Every pushed value occupies exactly one 32-byte word: hashes verbatim,
/// integers big-endian, addresses left-padded with zeros.
#[derive(Default)]
pub struct AbiWordEncoder {
	buf: Vec<u8>,
}

impl AbiWordEncoder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push_b256(&mut self, word: &B256) {
		self.buf.extend_from_slice(word.as_slice());
	}

	pub fn push_u256(&mut self, value: U256) {
		self.buf.extend_from_slice(&value.to_be_bytes::<32>());
	}

	pub fn push_address(&mut self, address: &Address) {
		let mut word = [0u8; 32];
		word[12..].copy_from_slice(address.as_slice());
		self.buf.extend_from_slice(&word);
	}

	pub fn finish(self) -> Vec<u8> {
		self.buf
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::address;
	use alloy_sol_types::{sol, Eip712Domain, SolStruct};
	use std::borrow::Cow;

	sol! {
		struct NFTVoucher {
			uint256 tokenId;
			uint256 nonce;
			uint256 expiry;
		}
	}

	fn test_domain() -> SigningDomain {
		SigningDomain {
			name: "Webaverse-voucher".to_string(),
			version: "1".to_string(),
			chain_id: 4,
			verifying_contract: address!("abcdabcdabcdabcdabcdabcdabcdabcdabcdabcd"),
		}
	}

	fn reference_domain(domain: &SigningDomain) -> Eip712Domain {
		Eip712Domain::new(
			Some(Cow::Owned(domain.name.clone())),
			Some(Cow::Owned(domain.version.clone())),
			Some(U256::from(domain.chain_id)),
			Some(domain.verifying_contract),
			None,
		)
	}

	#[test]
	fn voucher_type_string_matches_contract_schema() {
		assert_eq!(
			NFT_VOUCHER_TYPE,
			"NFTVoucher(uint256 tokenId,uint256 nonce,uint256 expiry)"
		);
	}

	#[test]
	fn domain_separator_matches_reference_implementation() {
		let domain = test_domain();
		assert_eq!(
			domain_separator(&domain),
			reference_domain(&domain).separator()
		);
	}

	#[test]
	fn struct_hash_matches_reference_implementation() {
		let fields = VoucherFields::new(U256::from(1u64), U256::from(1u64));
		let reference = NFTVoucher {
			tokenId: fields.token_id,
			nonce: fields.nonce,
			expiry: fields.expiry,
		};
		assert_eq!(voucher_struct_hash(&fields), reference.eip712_hash_struct());
	}

	#[test]
	fn signing_digest_matches_reference_implementation() {
		let domain = test_domain();
		let fields = VoucherFields::new(U256::from(7u64), U256::from(3u64))
			.with_expiry(U256::from(1_700_000_000u64));
		let reference = NFTVoucher {
			tokenId: fields.token_id,
			nonce: fields.nonce,
			expiry: fields.expiry,
		};
		assert_eq!(
			signing_digest(&domain, &fields),
			reference.eip712_signing_hash(&reference_domain(&domain))
		);
	}

	#[test]
	fn digest_is_sensitive_to_every_field() {
		let domain = test_domain();
		let base = VoucherFields::new(U256::from(1u64), U256::from(1u64));
		let digest = signing_digest(&domain, &base);

		let variants = [
			VoucherFields::new(U256::from(2u64), U256::from(1u64)),
			VoucherFields::new(U256::from(1u64), U256::from(2u64)),
			VoucherFields::new(U256::from(1u64), U256::from(1u64)).with_expiry(U256::from(1u64)),
		];
		for variant in variants {
			assert_ne!(digest, signing_digest(&domain, &variant));
		}

		let other_contract = SigningDomain {
			verifying_contract: address!("0000000000000000000000000000000000000001"),
			..test_domain()
		};
		assert_ne!(digest, signing_digest(&other_contract, &base));

		let other_chain = SigningDomain {
			chain_id: 1,
			..test_domain()
		};
		assert_ne!(digest, signing_digest(&other_chain, &base));
	}
}
