//! Rutoken PKCS#11 samples
//!
//! Short programs driving a Rutoken device through its vendor PKCS#11
//! library: key pair generation on a PINPad, GOST R 34.10-2012 signing,
//! RSA encryption, secret key removal and journal retrieval.
//!
//! The [`api`] functions load the library named in a [`SampleConfig`] and run
//! one sample each. The [`use_cases`] functions are generic over
//! [`ports::TokenLibrary`] and can be driven by any implementation.

mod adapters;
pub mod api;
pub mod config;
pub mod error;
mod logic;
pub mod model;
pub mod ports;
pub mod use_cases;

pub use adapters::{CryptokiLibrary, CryptokiSession};
pub use config::SampleConfig;
pub use error::{SampleError, SampleResult};
pub use logic::hex_dump;
