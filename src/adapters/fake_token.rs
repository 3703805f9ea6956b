//! In-memory token for exercising the samples without hardware
//!
//! Signatures and ciphertexts are derived from a per-key secret with SHA-256.
//! They only need to be deterministic and key-dependent; they are not GOST
//! or RSA.

use crate::error::{SampleError, SampleResult, TokenError};
use crate::model::{
    KeyType, Mechanism, MechanismCode, ObjectAttribute, ObjectClass, ObjectHandle, Pin, SlotId,
    Template, TokenInfo,
};
use crate::ports::{Authenticator, Cipher, KeyPairGenerator, ObjectStore, Signer, TokenLibrary};
use rand::rng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::cell::RefCell;
use std::rc::Rc;

/// Failure reported the way the cryptoki adapter reports it
fn call_error(function: &str, rv: &str) -> SampleError {
    SampleError::Token(TokenError::call(function, rv))
}

#[derive(Debug, Clone)]
pub struct FakeObject {
    pub handle: ObjectHandle,
    pub attributes: Template,
    secret: [u8; 32],
}

impl FakeObject {
    fn key_type(&self) -> Option<KeyType> {
        self.attributes.attributes().iter().find_map(|attribute| match attribute {
            ObjectAttribute::KeyType(key_type) => Some(*key_type),
            _ => None,
        })
    }

    fn is_private(&self) -> bool {
        matches!(
            self.attributes.get(ObjectAttribute::Private(true).code()),
            Some(ObjectAttribute::Private(true))
        )
    }
}

#[derive(Debug, Clone)]
pub struct FakeToken {
    pub info: TokenInfo,
    pub pin: Pin,
    pub mechanisms: Vec<MechanismCode>,
    pub objects: Vec<FakeObject>,
    pub logged_in: bool,
    pub logout_calls: usize,
    pub opened_sessions: usize,
    /// Key pair half reported as `CK_INVALID_HANDLE` after generation
    pub invalid_generated: Option<ObjectClass>,
    /// Flip the first byte of every decrypted buffer
    pub corrupt_decryption: bool,
    next_handle: u64,
}

impl FakeToken {
    pub fn new(model: &str) -> Self {
        Self {
            info: TokenInfo {
                label: "Rutoken".to_string(),
                manufacturer: "Aktiv Co.".to_string(),
                model: model.to_string(),
                serial_number: "0000000001".to_string(),
            },
            pin: Pin::default(),
            mechanisms: vec![
                Mechanism::RsaPkcs.code(),
                Mechanism::GostR3410KeyPairGen.code(),
                Mechanism::GostR3410WithGostR3411_12_256.code(),
            ],
            objects: Vec::new(),
            logged_in: false,
            logout_calls: 0,
            opened_sessions: 0,
            invalid_generated: None,
            corrupt_decryption: false,
            next_handle: 1,
        }
    }

    pub fn ecp() -> Self {
        Self::new("Rutoken ECP")
    }

    pub fn pinpad() -> Self {
        Self::new("Rutoken PINPad")
    }

    pub fn without_mechanism(mut self, mechanism: Mechanism) -> Self {
        self.mechanisms.retain(|code| *code != mechanism.code());
        self
    }

    pub fn with_invalid_generated(mut self, class: ObjectClass) -> Self {
        self.invalid_generated = Some(class);
        self
    }

    pub fn with_corrupt_decryption(mut self) -> Self {
        self.corrupt_decryption = true;
        self
    }

    /// Store a public/private key pair sharing `id`
    pub fn with_key_pair(mut self, id: &[u8], key_type: KeyType) -> Self {
        let secret = random_secret();
        for class in [ObjectClass::PublicKey, ObjectClass::PrivateKey] {
            let attributes = Template::new(vec![
                ObjectAttribute::Class(class),
                ObjectAttribute::Id(id.to_vec()),
                ObjectAttribute::KeyType(key_type),
                ObjectAttribute::Token(true),
                ObjectAttribute::Private(class == ObjectClass::PrivateKey),
            ]);
            self.insert(attributes, secret);
        }
        self
    }

    pub fn with_object(mut self, attributes: Template) -> Self {
        self.insert(attributes, random_secret());
        self
    }

    pub fn count_matching(&self, template: &Template) -> usize {
        self.objects
            .iter()
            .filter(|object| template.matches(&object.attributes))
            .count()
    }

    fn insert(&mut self, attributes: Template, secret: [u8; 32]) -> ObjectHandle {
        let handle = ObjectHandle::new(self.next_handle);
        self.next_handle += 1;
        self.objects.push(FakeObject {
            handle,
            attributes,
            secret,
        });
        handle
    }

    fn object(&self, method: &str, handle: ObjectHandle) -> SampleResult<&FakeObject> {
        self.objects
            .iter()
            .find(|object| object.handle == handle)
            .ok_or_else(|| call_error(method, "ObjectHandleInvalid"))
    }

    fn require_login(&self, method: &str) -> SampleResult<()> {
        if self.logged_in {
            Ok(())
        } else {
            Err(call_error(method, "UserNotLoggedIn"))
        }
    }

    fn require_mechanism(&self, method: &str, mechanism: Mechanism) -> SampleResult<()> {
        if self.mechanisms.contains(&mechanism.code()) {
            Ok(())
        } else {
            Err(call_error(method, "MechanismInvalid"))
        }
    }

    /// Key usable by `mechanism` in the role given by `class`
    fn key(
        &self,
        method: &str,
        mechanism: Mechanism,
        handle: ObjectHandle,
        class: ObjectClass,
    ) -> SampleResult<&FakeObject> {
        self.require_mechanism(method, mechanism)?;
        let object = self.object(method, handle)?;
        let expected_type = match mechanism {
            Mechanism::RsaPkcs => KeyType::Rsa,
            Mechanism::GostR3410KeyPairGen | Mechanism::GostR3410WithGostR3411_12_256 => {
                KeyType::GostR3410
            }
        };
        if object.key_type() != Some(expected_type) {
            return Err(call_error(method, "KeyTypeInconsistent"));
        }
        if object.attributes.class() != Some(class) {
            return Err(call_error(method, "KeyFunctionNotPermitted"));
        }
        Ok(object)
    }
}

fn random_secret() -> [u8; 32] {
    let mut secret = [0u8; 32];
    rng().fill_bytes(&mut secret);
    secret
}

fn fake_signature(secret: &[u8; 32], data: &[u8]) -> Vec<u8> {
    let mut signature = Sha256::new()
        .chain_update(secret)
        .chain_update(data)
        .finalize()
        .to_vec();
    signature.extend(Sha256::new().chain_update(data).chain_update(secret).finalize());
    signature
}

fn keystream_xor(secret: &[u8; 32], data: &[u8]) -> Vec<u8> {
    let pad = Sha256::digest(secret);
    data.iter()
        .zip(pad.iter().cycle())
        .map(|(byte, key)| byte ^ key)
        .collect()
}

#[derive(Debug, Clone)]
pub struct FakeLibrary {
    pub token: Option<Rc<RefCell<FakeToken>>>,
}

impl FakeLibrary {
    pub fn new(token: FakeToken) -> Self {
        Self {
            token: Some(Rc::new(RefCell::new(token))),
        }
    }

    pub fn empty() -> Self {
        Self { token: None }
    }

    /// Shared view of the token state for assertions
    pub fn token(&self) -> Rc<RefCell<FakeToken>> {
        Rc::clone(self.token.as_ref().expect("fake library has no token"))
    }

    fn present(&self, slot: SlotId) -> SampleResult<&Rc<RefCell<FakeToken>>> {
        match &self.token {
            Some(token) if slot == SlotId(0) => Ok(token),
            _ => Err(call_error("GetTokenInfo", "SlotIdInvalid")),
        }
    }
}

impl TokenLibrary for FakeLibrary {
    type Session = FakeSession;

    fn usable_slot(&self) -> SampleResult<SlotId> {
        match self.token {
            Some(_) => Ok(SlotId(0)),
            None => Err(SampleError::Token(TokenError::NoSlots)),
        }
    }

    fn token_info(&self, slot: SlotId) -> SampleResult<TokenInfo> {
        Ok(self.present(slot)?.borrow().info.clone())
    }

    fn mechanism_list(&self, slot: SlotId) -> SampleResult<Vec<MechanismCode>> {
        Ok(self.present(slot)?.borrow().mechanisms.clone())
    }

    fn open_rw_session(&self, slot: SlotId) -> SampleResult<FakeSession> {
        let token = Rc::clone(self.present(slot)?);
        token.borrow_mut().opened_sessions += 1;
        Ok(FakeSession { token })
    }
}

#[derive(Debug)]
pub struct FakeSession {
    token: Rc<RefCell<FakeToken>>,
}

impl FakeSession {
    pub fn new(token: FakeToken) -> Self {
        Self {
            token: Rc::new(RefCell::new(token)),
        }
    }
}

impl Authenticator for FakeSession {
    fn login(&mut self, pin: &Pin) -> SampleResult<()> {
        let mut token = self.token.borrow_mut();
        if token.logged_in {
            return Err(call_error("Login", "UserAlreadyLoggedIn"));
        }
        if pin != &token.pin {
            return Err(call_error("Login", "PinIncorrect"));
        }
        token.logged_in = true;
        Ok(())
    }

    fn logout(&mut self) -> SampleResult<()> {
        let mut token = self.token.borrow_mut();
        token.logout_calls += 1;
        if !token.logged_in {
            return Err(call_error("Logout", "UserNotLoggedIn"));
        }
        token.logged_in = false;
        Ok(())
    }
}

impl ObjectStore for FakeSession {
    fn find_objects(&mut self, template: &Template) -> SampleResult<Vec<ObjectHandle>> {
        let token = self.token.borrow();
        Ok(token
            .objects
            .iter()
            .filter(|object| token.logged_in || !object.is_private())
            .filter(|object| template.matches(&object.attributes))
            .map(|object| object.handle)
            .collect())
    }

    fn destroy_object(&mut self, object: ObjectHandle) -> SampleResult<()> {
        let mut token = self.token.borrow_mut();
        token.require_login("DestroyObject")?;
        token.object("DestroyObject", object)?;
        token.objects.retain(|candidate| candidate.handle != object);
        Ok(())
    }
}

impl KeyPairGenerator for FakeSession {
    fn generate_key_pair(
        &mut self,
        mechanism: Mechanism,
        public_template: &Template,
        private_template: &Template,
    ) -> SampleResult<(ObjectHandle, ObjectHandle)> {
        let mut token = self.token.borrow_mut();
        token.require_login("GenerateKeyPair")?;
        token.require_mechanism("GenerateKeyPair", mechanism)?;
        if mechanism != Mechanism::GostR3410KeyPairGen {
            return Err(call_error("GenerateKeyPair", "MechanismInvalid"));
        }
        if public_template.class() != Some(ObjectClass::PublicKey)
            || private_template.class() != Some(ObjectClass::PrivateKey)
        {
            return Err(call_error("GenerateKeyPair", "TemplateInconsistent"));
        }

        let secret = random_secret();
        let public_key = token.insert(public_template.clone(), secret);
        let private_key = token.insert(private_template.clone(), secret);
        Ok(match token.invalid_generated {
            Some(ObjectClass::PublicKey) => (ObjectHandle::INVALID, private_key),
            Some(ObjectClass::PrivateKey) => (public_key, ObjectHandle::INVALID),
            _ => (public_key, private_key),
        })
    }
}

impl Signer for FakeSession {
    fn sign(
        &mut self,
        mechanism: Mechanism,
        key: ObjectHandle,
        data: &[u8],
    ) -> SampleResult<Vec<u8>> {
        let token = self.token.borrow();
        token.require_login("SignInit")?;
        let key = token.key("SignInit", mechanism, key, ObjectClass::PrivateKey)?;
        Ok(fake_signature(&key.secret, data))
    }

    fn verify(
        &mut self,
        mechanism: Mechanism,
        key: ObjectHandle,
        data: &[u8],
        signature: &[u8],
    ) -> SampleResult<()> {
        let token = self.token.borrow();
        let key = token.key("VerifyInit", mechanism, key, ObjectClass::PublicKey)?;
        if fake_signature(&key.secret, data) == signature {
            Ok(())
        } else {
            Err(call_error("Verify", "SignatureInvalid"))
        }
    }
}

impl Cipher for FakeSession {
    fn encrypt(
        &mut self,
        mechanism: Mechanism,
        key: ObjectHandle,
        data: &[u8],
    ) -> SampleResult<Vec<u8>> {
        let token = self.token.borrow();
        let key = token.key("EncryptInit", mechanism, key, ObjectClass::PublicKey)?;
        Ok(keystream_xor(&key.secret, data))
    }

    fn decrypt(
        &mut self,
        mechanism: Mechanism,
        key: ObjectHandle,
        data: &[u8],
    ) -> SampleResult<Vec<u8>> {
        let token = self.token.borrow();
        token.require_login("DecryptInit")?;
        let key = token.key("DecryptInit", mechanism, key, ObjectClass::PrivateKey)?;
        let mut plaintext = keystream_xor(&key.secret, data);
        if token.corrupt_decryption {
            if let Some(first) = plaintext.first_mut() {
                *first ^= 0xff;
            }
        }
        Ok(plaintext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract_tests_for;
    use crate::ports::contract_tests::session_contract;

    contract_tests_for!(
        fake_session_contract,
        make = || FakeSession::new(FakeToken::ecp()),
        tests = {
            test_login_success => session_contract::test_login_success,
            test_login_wrong_pin => session_contract::test_login_wrong_pin,
            test_find_without_match_is_empty => session_contract::test_find_without_match_is_empty,
            test_generate_key_pair_success => session_contract::test_generate_key_pair_success,
            test_repeated_search_returns_same_handles => session_contract::test_repeated_search_returns_same_handles,
            test_sign_and_verify => session_contract::test_sign_and_verify,
            test_verify_rejects_tampered_signature => session_contract::test_verify_rejects_tampered_signature,
            test_destroy_object => session_contract::test_destroy_object,
        }
    );

    #[test]
    fn test_private_objects_hidden_before_login() {
        let mut session =
            FakeSession::new(FakeToken::ecp().with_key_pair(b"rsa", KeyType::Rsa));
        let by_id = Template::new(vec![ObjectAttribute::Id(b"rsa".to_vec())]);

        assert_eq!(session.find_objects(&by_id).unwrap().len(), 1);
        session.login(&Pin::default()).unwrap();
        assert_eq!(session.find_objects(&by_id).unwrap().len(), 2);
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let mut session =
            FakeSession::new(FakeToken::ecp().with_key_pair(b"rsa", KeyType::Rsa));
        session.login(&Pin::default()).unwrap();
        let public_key = session
            .find_objects(&Template::new(vec![ObjectAttribute::Class(
                ObjectClass::PublicKey,
            )]))
            .unwrap()[0];
        let private_key = session
            .find_objects(&Template::new(vec![ObjectAttribute::Class(
                ObjectClass::PrivateKey,
            )]))
            .unwrap()[0];

        let ciphertext = session
            .encrypt(Mechanism::RsaPkcs, public_key, b"plaintext")
            .unwrap();
        assert_ne!(ciphertext, b"plaintext");
        let plaintext = session
            .decrypt(Mechanism::RsaPkcs, private_key, &ciphertext)
            .unwrap();
        assert_eq!(plaintext, b"plaintext");
    }

    #[test]
    fn test_sign_requires_login() {
        let mut session =
            FakeSession::new(FakeToken::ecp().with_key_pair(b"gost", KeyType::GostR3410));
        let result = session.sign(
            Mechanism::GostR3410WithGostR3411_12_256,
            ObjectHandle::new(2),
            b"data",
        );
        assert!(matches!(
            result.unwrap_err(),
            SampleError::Token(TokenError::Call { ref rv, .. }) if rv == "CKR_USER_NOT_LOGGED_IN"
        ));
    }

    #[test]
    fn test_sign_with_rsa_key_rejected() {
        let mut session =
            FakeSession::new(FakeToken::ecp().with_key_pair(b"rsa", KeyType::Rsa));
        session.login(&Pin::default()).unwrap();
        let result = session.sign(
            Mechanism::GostR3410WithGostR3411_12_256,
            ObjectHandle::new(2),
            b"data",
        );
        assert!(matches!(
            result.unwrap_err(),
            SampleError::Token(TokenError::Call { ref rv, .. }) if rv == "CKR_KEY_TYPE_INCONSISTENT"
        ));
    }

    #[test]
    fn test_empty_library_has_no_slot() {
        let library = FakeLibrary::empty();
        assert!(matches!(
            library.usable_slot().unwrap_err(),
            SampleError::Token(TokenError::NoSlots)
        ));
    }
}
