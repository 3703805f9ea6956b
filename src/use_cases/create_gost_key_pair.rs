//! Create GOST R 34.10-2001 key pair on a Rutoken PINPad
//!
//! The private key requires PIN entry and confirmation on the PINPad
//! screen for every signing operation. Other samples find the pair
//! through [`GOST_KEY_PAIR_ID_1`].

use std::io::Write;

use tracing::info;

use crate::error::SampleResult;
use crate::logic::ensure;
use crate::model::sample_constants::{
    GOST_KEY_PAIR_ID_1, GOST_PRIVATE_KEY_LABEL_1, GOST_PUBLIC_KEY_LABEL_1, GOST_R3410_PARAMETERS,
    GOST_R3411_PARAMETERS,
};
use crate::model::{
    KeyType, Mechanism, ObjectAttribute, ObjectClass, ObjectHandle, Pin, Template, TokenFamily,
};
use crate::ports::{KeyPairGenerator, TokenLibrary};
use crate::use_cases::session::{find_usable_slot, require_mechanism, with_user_session};

/// Template for the GOST R 34.10-2001 public key
pub fn public_key_template() -> Template {
    Template::new(vec![
        ObjectAttribute::Class(ObjectClass::PublicKey),
        ObjectAttribute::Label(GOST_PUBLIC_KEY_LABEL_1.to_vec()),
        // Must match the private key
        ObjectAttribute::Id(GOST_KEY_PAIR_ID_1.to_vec()),
        ObjectAttribute::KeyType(KeyType::GostR3410),
        ObjectAttribute::Token(true),
        // Readable without login
        ObjectAttribute::Private(false),
        ObjectAttribute::GostR3410Params(GOST_R3410_PARAMETERS.to_vec()),
        ObjectAttribute::GostR3411Params(GOST_R3411_PARAMETERS.to_vec()),
    ])
}

/// Template for the GOST R 34.10-2001 private key
pub fn private_key_template() -> Template {
    Template::new(vec![
        ObjectAttribute::Class(ObjectClass::PrivateKey),
        ObjectAttribute::Label(GOST_PRIVATE_KEY_LABEL_1.to_vec()),
        ObjectAttribute::Id(GOST_KEY_PAIR_ID_1.to_vec()),
        ObjectAttribute::KeyType(KeyType::GostR3410),
        ObjectAttribute::Token(true),
        ObjectAttribute::Private(true),
        ObjectAttribute::VendorKeyConfirmOp(true),
        ObjectAttribute::VendorKeyPinEnter(true),
        ObjectAttribute::GostR3410Params(GOST_R3410_PARAMETERS.to_vec()),
        ObjectAttribute::GostR3411Params(GOST_R3411_PARAMETERS.to_vec()),
    ])
}

/// Handles of a freshly generated key pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratedKeyPair {
    pub public_key: ObjectHandle,
    pub private_key: ObjectHandle,
}

/// Generate the sample GOST R 34.10-2001 key pair on a PINPad
///
/// # Errors
///
/// Returns errors if:
/// - No token is present, or the token is not a PINPad
/// - The token does not support `CKM_GOSTR3410_KEY_PAIR_GEN`
/// - Login or key generation fails
pub fn create_gost2001_key_pair<L, W>(
    library: &L,
    pin: &Pin,
    out: &mut W,
) -> SampleResult<GeneratedKeyPair>
where
    L: TokenLibrary,
    W: Write,
{
    let slot = find_usable_slot(library, out)?;

    writeln!(out, "Checking token type")?;
    let token_info = library.token_info(slot)?;
    ensure(
        token_info.family() == TokenFamily::PinPad,
        "Device in slot 0 is not Rutoken PINPad",
    )?;

    require_mechanism(library, slot, Mechanism::GostR3410KeyPairGen, out)?;

    with_user_session(library, slot, pin, out, |session, out| {
        writeln!(out, "Generating GOST R 34.10-2001 key pair...")?;
        let (public_key, private_key) = session.generate_key_pair(
            Mechanism::GostR3410KeyPairGen,
            &public_key_template(),
            &private_key_template(),
        )?;
        ensure(public_key.is_valid(), "Invalid public key handle")?;
        ensure(private_key.is_valid(), "Invalid private key handle")?;

        info!(
            "GOST R 34.10-2001 key pair generated: public {}, private {}",
            public_key, private_key
        );
        writeln!(out, "Generating has been completed successfully")?;

        Ok(GeneratedKeyPair {
            public_key,
            private_key,
        })
    })
}
