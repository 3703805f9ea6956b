//! Use cases (orchestration)
//!
//! One function per sample program. Each drives the token through the ports,
//! writes progress lines to the given writer and returns a typed outcome.

mod create_gost_key_pair;
mod delete_secret_keys;
mod enc_dec_rsa;
mod journal;
mod session;
mod sign_gost;

pub use create_gost_key_pair::{create_gost2001_key_pair, GeneratedKeyPair};
pub use delete_secret_keys::delete_gost28147_keys;
pub use enc_dec_rsa::{encrypt_decrypt_rsa, RsaRoundTrip};
pub use journal::read_journal;
pub use sign_gost::sign_gost2012_256;
