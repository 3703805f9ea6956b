use std::io::Write;

use crate::adapters::CryptokiLibrary;
use crate::config::SampleConfig;
use crate::error::SampleResult;
use crate::use_cases::{
    create_gost2001_key_pair as create_gost2001_key_pair_use_case,
    delete_gost28147_keys as delete_gost28147_keys_use_case,
    encrypt_decrypt_rsa as encrypt_decrypt_rsa_use_case, read_journal as read_journal_use_case,
    sign_gost2012_256 as sign_gost2012_256_use_case,
};

pub use crate::model::*;
pub use crate::use_cases::{GeneratedKeyPair, RsaRoundTrip};

fn open_library(config: &SampleConfig, out: &mut impl Write) -> SampleResult<CryptokiLibrary> {
    writeln!(out, "Library initialization")?;
    CryptokiLibrary::open(config)
}

pub fn create_gost2001_key_pair(
    config: &SampleConfig,
    out: &mut impl Write,
) -> SampleResult<GeneratedKeyPair> {
    let library = open_library(config, out)?;
    create_gost2001_key_pair_use_case(&library, &config.user_pin, out)
}

pub fn sign_gost2012_256(config: &SampleConfig, out: &mut impl Write) -> SampleResult<Vec<u8>> {
    let library = open_library(config, out)?;
    sign_gost2012_256_use_case(&library, &config.user_pin, out)
}

pub fn encrypt_decrypt_rsa(
    config: &SampleConfig,
    out: &mut impl Write,
) -> SampleResult<RsaRoundTrip> {
    let library = open_library(config, out)?;
    encrypt_decrypt_rsa_use_case(&library, &config.user_pin, out)
}

pub fn delete_gost28147_keys(config: &SampleConfig, out: &mut impl Write) -> SampleResult<usize> {
    let library = open_library(config, out)?;
    delete_gost28147_keys_use_case(&library, &config.user_pin, out)
}

pub fn read_journal(config: &SampleConfig, out: &mut impl Write) -> SampleResult<Vec<u8>> {
    let library = open_library(config, out)?;
    read_journal_use_case(&library, &config.user_pin, out)
}
