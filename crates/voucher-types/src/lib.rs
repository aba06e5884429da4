//! Common types module for the voucher issuance system.
//!
//! This module defines the core data types shared across the voucher crates:
//! the EIP-712 signing domain, the voucher payload and its signed form, the
//! hashing utilities that produce the digest a verifying contract recomputes,
//! and supporting types for secrets and implementation registration.

/// EIP-712 signing domain tied to one verifying contract and chain.
pub mod domain;
/// EIP-712 hashing utilities: type strings, word encoder, digest computation.
pub mod eip712;
/// Registry trait for self-registering signer implementations.
pub mod registry;
/// Secure string type for private keys and other secrets.
pub mod secret_string;
/// Voucher payload and signed voucher types.
pub mod voucher;

// Re-export all types for convenient access
pub use domain::SigningDomain;
pub use eip712::{
	signing_digest, voucher_struct_hash, AbiWordEncoder, DOMAIN_TYPE, NFT_VOUCHER_TYPE,
};
pub use registry::ImplementationRegistry;
pub use secret_string::SecretString;
pub use voucher::{SignedVoucher, VoucherFields};
