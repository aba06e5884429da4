//! Registry trait for self-registering implementations.
//!
//! Signer backends register themselves under the name used in configuration
//! files, together with a factory that builds them from their config table.

/// Base trait for implementation registries.
///
/// Each pluggable backend provides a `Registry` struct implementing this
/// trait, declaring the configuration name it answers to and the factory
/// that constructs it.
pub trait ImplementationRegistry {
	/// The name used in configuration files to reference this implementation,
	/// e.g. "local" for `signer.implementation = "local"`.
	const NAME: &'static str;

	/// The factory function type this implementation provides.
	type Factory;

	/// Returns the factory that creates instances of this implementation.
	fn factory() -> Self::Factory;
}
