//! Adapters - concrete implementations of ports (traits)

mod cryptoki_token;

#[cfg(test)]
pub mod fake_token;

// Re-export for convenience
pub use cryptoki_token::{CryptokiLibrary, CryptokiSession};
