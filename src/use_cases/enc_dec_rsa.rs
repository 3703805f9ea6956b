//! Encrypt and decrypt with an RSA key pair (`CKM_RSA_PKCS`)

use std::io::Write;

use tracing::info;

use crate::error::SampleResult;
use crate::logic::{ensure, hex_dump};
use crate::model::sample_constants::{RSA_KEY_PAIR_ID, RSA_SOURCE_DATA};
use crate::model::{KeyType, Mechanism, ObjectAttribute, ObjectClass, Pin, Template};
use crate::ports::{Cipher, ObjectStore, TokenLibrary};
use crate::use_cases::session::{find_usable_slot, with_user_session};

fn rsa_key_template(class: ObjectClass) -> Template {
    Template::new(vec![
        ObjectAttribute::Class(class),
        ObjectAttribute::Id(RSA_KEY_PAIR_ID.to_vec()),
        ObjectAttribute::KeyType(KeyType::Rsa),
    ])
}

pub fn public_key_template() -> Template {
    rsa_key_template(ObjectClass::PublicKey)
}

pub fn private_key_template() -> Template {
    rsa_key_template(ObjectClass::PrivateKey)
}

/// Buffers produced by a round trip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaRoundTrip {
    pub ciphertext: Vec<u8>,
    pub plaintext: Vec<u8>,
}

/// Encrypt the sample plaintext with the public key and decrypt it back
///
/// # Errors
///
/// Returns errors if:
/// - The token rejects `CKM_RSA_PKCS` for the key
/// - Either half of the key pair is missing
/// - The decrypted buffer differs from the source
pub fn encrypt_decrypt_rsa<L, W>(library: &L, pin: &Pin, out: &mut W) -> SampleResult<RsaRoundTrip>
where
    L: TokenLibrary,
    W: Write,
{
    let slot = find_usable_slot(library, out)?;

    with_user_session(library, slot, pin, out, |session, out| {
        writeln!(out, "Getting public key...")?;
        let public_keys = session.find_objects(&public_key_template())?;
        ensure(!public_keys.is_empty(), "No public keys found")?;

        writeln!(out, "Encrypting...")?;
        let ciphertext = session.encrypt(Mechanism::RsaPkcs, public_keys[0], RSA_SOURCE_DATA)?;
        writeln!(out, " Encrypting buffer is:")?;
        write!(out, "{}", hex_dump(&ciphertext))?;
        writeln!(out, "Encryption has been completed successfully")?;

        writeln!(out, "Getting private key...")?;
        let private_keys = session.find_objects(&private_key_template())?;
        ensure(!private_keys.is_empty(), "No private keys found")?;

        writeln!(out, "Decrypting...")?;
        let plaintext = session.decrypt(Mechanism::RsaPkcs, private_keys[0], &ciphertext)?;
        writeln!(out, " Decrypted buffer is:")?;
        write!(out, "{}", hex_dump(&plaintext))?;
        writeln!(out, "Decryption has been completed successfully")?;

        ensure(
            plaintext == RSA_SOURCE_DATA,
            "Source data and decrypted data are not equal",
        )?;
        writeln!(out, "Source data and decrypted data are equal")?;

        info!("RSA round trip of {} bytes", plaintext.len());
        Ok(RsaRoundTrip {
            ciphertext,
            plaintext,
        })
    })
}
