//! PKCS#11 implementation of the token ports
//!
//! This module loads the vendor library at run time through the cryptoki
//! crate and translates domain templates and mechanisms into cryptoki types.

use crate::config::SampleConfig;
use crate::error::{SampleError, SampleResult, TokenError};
use crate::model::{
    KeyType, Mechanism, MechanismCode, MechanismError, ObjectAttribute, ObjectClass,
    ObjectHandle, Pin, SlotId, Template, TokenInfo,
};
use crate::ports::{Authenticator, Cipher, KeyPairGenerator, ObjectStore, Signer, TokenLibrary};
use cryptoki::context::{CInitializeArgs, Pkcs11};
use cryptoki::mechanism::vendor_defined::VendorDefinedMechanism;
use cryptoki::mechanism::{Mechanism as CkMechanism, MechanismType};
use cryptoki::object::{
    Attribute, AttributeType, KeyType as CkKeyType, ObjectClass as CkObjectClass,
    ObjectHandle as CkObjectHandle,
};
use cryptoki::session::{Session, UserType};
use cryptoki::slot::Slot;
use cryptoki::types::AuthPin;
use std::collections::HashMap;
use tracing::{debug, info};

/// Vendor PKCS#11 library loaded and initialized through cryptoki
///
/// The library is finalized when the value is dropped.
#[derive(Debug)]
pub struct CryptokiLibrary {
    pkcs11: Pkcs11,
}

impl CryptokiLibrary {
    /// Load the library named in `config` and call `C_Initialize`
    pub fn open(config: &SampleConfig) -> SampleResult<Self> {
        let path = config.library_path.display().to_string();
        debug!("Loading PKCS#11 library from {}", path);

        let pkcs11 = Pkcs11::new(&config.library_path).map_err(|e| {
            SampleError::Token(TokenError::LibraryLoad {
                path: path.clone(),
                reason: e.to_string(),
            })
        })?;

        let init_args = if config.os_locking {
            CInitializeArgs::OsThreads
        } else {
            CInitializeArgs::NoThreads
        };
        pkcs11.initialize(init_args)?;

        info!("PKCS#11 library {} initialized", path);
        Ok(Self { pkcs11 })
    }

    fn slot(&self, slot: SlotId) -> SampleResult<Slot> {
        self.pkcs11
            .get_slots_with_token()?
            .into_iter()
            .find(|candidate| candidate.id() == slot.0)
            .ok_or(SampleError::Token(TokenError::SlotUnavailable { slot: slot.0 }))
    }
}

impl TokenLibrary for CryptokiLibrary {
    type Session = CryptokiSession;

    fn usable_slot(&self) -> SampleResult<SlotId> {
        let slots = self.pkcs11.get_slots_with_token()?;
        debug!("Slots with a token present: {}", slots.len());

        let slot = slots
            .first()
            .ok_or(SampleError::Token(TokenError::NoSlots))?;
        Ok(SlotId(slot.id()))
    }

    fn token_info(&self, slot: SlotId) -> SampleResult<TokenInfo> {
        let info = self.pkcs11.get_token_info(self.slot(slot)?)?;
        Ok(TokenInfo {
            label: info.label().to_string(),
            manufacturer: info.manufacturer_id().to_string(),
            model: info.model().to_string(),
            serial_number: info.serial_number().to_string(),
        })
    }

    fn mechanism_list(&self, slot: SlotId) -> SampleResult<Vec<MechanismCode>> {
        Ok(self
            .pkcs11
            .get_mechanism_list(self.slot(slot)?)?
            .into_iter()
            .map(|mechanism_type| MechanismCode(u64::from(*mechanism_type)))
            .collect())
    }

    fn open_rw_session(&self, slot: SlotId) -> SampleResult<CryptokiSession> {
        let session = self.pkcs11.open_rw_session(self.slot(slot)?)?;
        debug!("RW session opened in slot {}", slot);
        Ok(CryptokiSession::new(session))
    }
}

/// Read-write session on a token
///
/// Callers get session-local object handles, numbered from 1 in the order
/// objects are first seen, and resolved back to cryptoki handles on use.
/// The session is closed when the value is dropped.
#[derive(Debug)]
pub struct CryptokiSession {
    session: Session,
    handles: HashMap<ObjectHandle, CkObjectHandle>,
    known: HashMap<CkObjectHandle, ObjectHandle>,
    next_handle: u64,
}

impl CryptokiSession {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            handles: HashMap::new(),
            known: HashMap::new(),
            next_handle: 1,
        }
    }

    fn remember(&mut self, handle: CkObjectHandle) -> ObjectHandle {
        if let Some(domain) = self.known.get(&handle) {
            return *domain;
        }
        let domain = ObjectHandle::new(self.next_handle);
        self.next_handle += 1;
        self.handles.insert(domain, handle);
        self.known.insert(handle, domain);
        domain
    }

    fn resolve(&self, handle: ObjectHandle) -> SampleResult<CkObjectHandle> {
        self.handles.get(&handle).copied().ok_or(SampleError::Token(
            TokenError::InvalidHandle {
                handle: handle.value(),
            },
        ))
    }
}

impl Authenticator for CryptokiSession {
    fn login(&mut self, pin: &Pin) -> SampleResult<()> {
        let auth_pin = AuthPin::new(pin.as_str().to_string());
        self.session.login(UserType::User, Some(&auth_pin))?;
        debug!("User logged in");
        Ok(())
    }

    fn logout(&mut self) -> SampleResult<()> {
        self.session.logout()?;
        debug!("User logged out");
        Ok(())
    }
}

impl ObjectStore for CryptokiSession {
    fn find_objects(&mut self, template: &Template) -> SampleResult<Vec<ObjectHandle>> {
        let attributes = to_attributes(template);
        let found = self.session.find_objects(&attributes)?;
        debug!("Found {} objects", found.len());

        Ok(found
            .into_iter()
            .map(|handle| self.remember(handle))
            .collect())
    }

    fn destroy_object(&mut self, object: ObjectHandle) -> SampleResult<()> {
        let handle = self.resolve(object)?;
        self.session.destroy_object(handle)?;
        self.handles.remove(&object);
        self.known.remove(&handle);
        debug!("Object {} destroyed", object);
        Ok(())
    }
}

impl KeyPairGenerator for CryptokiSession {
    fn generate_key_pair(
        &mut self,
        mechanism: Mechanism,
        public_template: &Template,
        private_template: &Template,
    ) -> SampleResult<(ObjectHandle, ObjectHandle)> {
        debug!("Generating key pair with {}", mechanism.name());

        let (public_key, private_key) = self.session.generate_key_pair(
            &to_mechanism(mechanism)?,
            &to_attributes(public_template),
            &to_attributes(private_template),
        )?;

        info!("Key pair generated with {}", mechanism.name());
        Ok((self.remember(public_key), self.remember(private_key)))
    }
}

impl Signer for CryptokiSession {
    fn sign(
        &mut self,
        mechanism: Mechanism,
        key: ObjectHandle,
        data: &[u8],
    ) -> SampleResult<Vec<u8>> {
        let key = self.resolve(key)?;
        Ok(self.session.sign(&to_mechanism(mechanism)?, key, data)?)
    }

    fn verify(
        &mut self,
        mechanism: Mechanism,
        key: ObjectHandle,
        data: &[u8],
        signature: &[u8],
    ) -> SampleResult<()> {
        let key = self.resolve(key)?;
        Ok(self
            .session
            .verify(&to_mechanism(mechanism)?, key, data, signature)?)
    }
}

impl Cipher for CryptokiSession {
    fn encrypt(
        &mut self,
        mechanism: Mechanism,
        key: ObjectHandle,
        data: &[u8],
    ) -> SampleResult<Vec<u8>> {
        let key = self.resolve(key)?;
        Ok(self.session.encrypt(&to_mechanism(mechanism)?, key, data)?)
    }

    fn decrypt(
        &mut self,
        mechanism: Mechanism,
        key: ObjectHandle,
        data: &[u8],
    ) -> SampleResult<Vec<u8>> {
        let key = self.resolve(key)?;
        Ok(self.session.decrypt(&to_mechanism(mechanism)?, key, data)?)
    }
}

fn to_mechanism(mechanism: Mechanism) -> SampleResult<CkMechanism<'static>> {
    if mechanism.is_vendor_defined() {
        let mechanism_type = MechanismType::new_vendor_defined(mechanism.code().0 as _)
            .map_err(|e| MechanismError::Unrepresentable {
                name: mechanism.name(),
                reason: e.to_string(),
            })?;
        return Ok(CkMechanism::VendorDefined(VendorDefinedMechanism::new::<()>(
            mechanism_type,
            None,
        )));
    }

    match mechanism {
        Mechanism::RsaPkcs => Ok(CkMechanism::RsaPkcs),
        Mechanism::GostR3410KeyPairGen => Ok(CkMechanism::GostR3410KeyPairGen),
        Mechanism::GostR3410WithGostR3411_12_256 => Err(MechanismError::Unrepresentable {
            name: mechanism.name(),
            reason: "no standard cryptoki mechanism".to_string(),
        }
        .into()),
    }
}

fn to_class(class: ObjectClass) -> CkObjectClass {
    match class {
        ObjectClass::PublicKey => CkObjectClass::PUBLIC_KEY,
        ObjectClass::PrivateKey => CkObjectClass::PRIVATE_KEY,
        ObjectClass::SecretKey => CkObjectClass::SECRET_KEY,
    }
}

fn to_key_type(key_type: KeyType) -> CkKeyType {
    match key_type {
        KeyType::Rsa => CkKeyType::RSA,
        KeyType::GostR3410 => CkKeyType::GOSTR3410,
        KeyType::Gost28147 => CkKeyType::GOST28147,
    }
}

fn vendor_flag(code: u64, value: bool) -> Attribute {
    Attribute::VendorDefined((AttributeType::VendorDefined(code as _), vec![u8::from(value)]))
}

fn to_attribute(attribute: &ObjectAttribute) -> Attribute {
    match attribute {
        ObjectAttribute::Class(class) => Attribute::Class(to_class(*class)),
        ObjectAttribute::Id(id) => Attribute::Id(id.clone()),
        ObjectAttribute::Label(label) => Attribute::Label(label.clone()),
        ObjectAttribute::KeyType(key_type) => Attribute::KeyType(to_key_type(*key_type)),
        ObjectAttribute::Token(value) => Attribute::Token(*value),
        ObjectAttribute::Private(value) => Attribute::Private(*value),
        ObjectAttribute::GostR3410Params(params) => Attribute::GostR3410Params(params.clone()),
        ObjectAttribute::GostR3411Params(params) => Attribute::GostR3411Params(params.clone()),
        ObjectAttribute::VendorKeyConfirmOp(value) | ObjectAttribute::VendorKeyPinEnter(value) => {
            vendor_flag(attribute.code(), *value)
        }
    }
}

fn to_attributes(template: &Template) -> Vec<Attribute> {
    template.into_iter().map(to_attribute).collect()
}
