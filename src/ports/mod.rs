//! Ports (traits) for PKCS#11 token operations
//!
//! The samples depend on these abstractions, not on the concrete cryptoki
//! adapter, so the same use case runs against a real token or an in-memory
//! fake. Session capabilities are split by concern the way PKCS#11 groups
//! its functions.

mod authenticator;
mod cipher;
mod key_pair_generator;
mod object_store;
mod signer;
mod token_library;

pub use authenticator::Authenticator;
pub use cipher::Cipher;
pub use key_pair_generator::KeyPairGenerator;
pub use object_store::ObjectStore;
pub use signer::Signer;
pub use token_library::TokenLibrary;

/// Combined trait for all session operations
///
/// A session handle typically implements this.
pub trait TokenSession: Authenticator + ObjectStore + KeyPairGenerator + Signer + Cipher {}

// Blanket implementation for types that implement all operation traits
impl<T> TokenSession for T where T: Authenticator + ObjectStore + KeyPairGenerator + Signer + Cipher {}
