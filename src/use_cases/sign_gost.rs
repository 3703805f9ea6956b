//! Sign with GOST R 34.10-2012 (256 bits), hashing on the token
//!
//! Uses the key pair identified by [`GOST256_KEY_PAIR_ID_1`], which has to
//! be created on the token beforehand. The message goes to the token as is;
//! the GOST R 34.11-2012 digest is computed inside the device.

use std::io::Write;

use tracing::info;

use crate::error::SampleResult;
use crate::logic::{ensure, hex_dump};
use crate::model::sample_constants::{GOST256_KEY_PAIR_ID_1, GOST3411_SOURCE_DATA};
use crate::model::{Mechanism, ObjectAttribute, ObjectClass, Pin, Template};
use crate::ports::{ObjectStore, Signer, TokenLibrary};
use crate::use_cases::session::{find_usable_slot, require_mechanism, with_user_session};

const SIGN_MECHANISM: Mechanism = Mechanism::GostR3410WithGostR3411_12_256;

/// Search template for the signing key
pub fn private_key_template() -> Template {
    Template::new(vec![
        ObjectAttribute::Id(GOST256_KEY_PAIR_ID_1.to_vec()),
        ObjectAttribute::Class(ObjectClass::PrivateKey),
    ])
}

/// Search template for the verification key
pub fn public_key_template() -> Template {
    Template::new(vec![
        ObjectAttribute::Id(GOST256_KEY_PAIR_ID_1.to_vec()),
        ObjectAttribute::Class(ObjectClass::PublicKey),
    ])
}

/// Sign the sample message and verify the signature on the token
///
/// # Returns
///
/// The signature bytes
///
/// # Errors
///
/// Returns errors if:
/// - The token does not support `CKM_GOSTR3410_WITH_GOSTR3411_12_256`
/// - The private or the public key of the sample pair is missing
/// - Signing or verification fails
pub fn sign_gost2012_256<L, W>(library: &L, pin: &Pin, out: &mut W) -> SampleResult<Vec<u8>>
where
    L: TokenLibrary,
    W: Write,
{
    let slot = find_usable_slot(library, out)?;
    require_mechanism(library, slot, SIGN_MECHANISM, out)?;

    with_user_session(library, slot, pin, out, |session, out| {
        writeln!(out, "Getting signing key...")?;
        let private_keys = session.find_objects(&private_key_template())?;
        ensure(!private_keys.is_empty(), "No private keys found")?;

        writeln!(out, "Signing data...")?;
        let signature = session.sign(SIGN_MECHANISM, private_keys[0], GOST3411_SOURCE_DATA)?;

        writeln!(out, " Signature buffer is:")?;
        write!(out, "{}", hex_dump(&signature))?;
        writeln!(out, "Data has been signed successfully")?;

        writeln!(out, "Getting public key...")?;
        let public_keys = session.find_objects(&public_key_template())?;
        ensure(!public_keys.is_empty(), "No public keys found")?;

        writeln!(out, "Verifying signature...")?;
        session.verify(SIGN_MECHANISM, public_keys[0], GOST3411_SOURCE_DATA, &signature)?;
        writeln!(out, "Verifying has been completed successfully")?;

        info!("Signature of {} bytes verified", signature.len());
        Ok(signature)
    })
}
