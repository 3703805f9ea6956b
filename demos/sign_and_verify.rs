//! Sign the sample message on a Rutoken and print the signature
//!
//! Run with: cargo run --example sign_and_verify
//!
//! The token must hold the GOST R 34.10-2012 (256 bits) sample key pair.
//! Set RUTOKEN_PKCS11_LIBRARY to load a library other than the platform
//! default.

use std::io;
use std::path::PathBuf;

use rutoken_samples::{api, SampleConfig};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let library = std::env::var_os("RUTOKEN_PKCS11_LIBRARY").map(PathBuf::from);
    let config = SampleConfig::from_parts(library, None, true)?;

    let mut progress = io::sink();
    match api::sign_gost2012_256(&config, &mut progress) {
        Ok(signature) => {
            println!("Signature: {}", hex::encode(&signature));
            Ok(())
        }
        Err(e) => {
            println!("{}", e.failure_message());
            Err(e.into())
        }
    }
}
