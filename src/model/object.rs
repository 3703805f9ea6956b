//! PKCS#11 object model: classes, key types, attributes and templates

use std::fmt;

/// `CKA_VENDOR_DEFINED`
const VENDOR_DEFINED: u64 = 0x8000_0000;

/// Handle of an object on the token, valid for the session that returned it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectHandle(u64);

impl ObjectHandle {
    /// `CK_INVALID_HANDLE`
    pub const INVALID: ObjectHandle = ObjectHandle(0);

    pub const fn new(handle: u64) -> Self {
        Self(handle)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Object class (`CKA_CLASS`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectClass {
    PublicKey,
    PrivateKey,
    SecretKey,
}

/// Key type (`CKA_KEY_TYPE`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    Rsa,
    /// GOST R 34.10-2001 and GOST R 34.10-2012 with 256-bit keys
    GostR3410,
    /// GOST 28147-89 symmetric key
    Gost28147,
}

/// One entry of an attribute template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectAttribute {
    Class(ObjectClass),
    Id(Vec<u8>),
    Label(Vec<u8>),
    KeyType(KeyType),
    /// Object is stored on the token rather than in the session
    Token(bool),
    /// Object is only accessible after login
    Private(bool),
    /// DER-encoded OID of the GOST R 34.10 parameter set
    GostR3410Params(Vec<u8>),
    /// DER-encoded OID of the GOST R 34.11 parameter set
    GostR3411Params(Vec<u8>),
    /// Operations with the key must be confirmed on the PINPad screen
    VendorKeyConfirmOp(bool),
    /// The PIN must be entered on the PINPad before each operation
    VendorKeyPinEnter(bool),
}

impl ObjectAttribute {
    pub const CKA_VENDOR_KEY_PIN_ENTER: u64 = VENDOR_DEFINED + 0x2000;
    pub const CKA_VENDOR_KEY_CONFIRM_OP: u64 = VENDOR_DEFINED + 0x2001;

    /// `CKA_*` attribute type
    pub fn code(&self) -> u64 {
        match self {
            ObjectAttribute::Class(_) => 0x0000,
            ObjectAttribute::Token(_) => 0x0001,
            ObjectAttribute::Private(_) => 0x0002,
            ObjectAttribute::Label(_) => 0x0003,
            ObjectAttribute::KeyType(_) => 0x0100,
            ObjectAttribute::Id(_) => 0x0102,
            ObjectAttribute::GostR3410Params(_) => 0x0250,
            ObjectAttribute::GostR3411Params(_) => 0x0251,
            ObjectAttribute::VendorKeyPinEnter(_) => Self::CKA_VENDOR_KEY_PIN_ENTER,
            ObjectAttribute::VendorKeyConfirmOp(_) => Self::CKA_VENDOR_KEY_CONFIRM_OP,
        }
    }
}

/// Ordered list of attributes describing an object to create or to search for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template(Vec<ObjectAttribute>);

impl Template {
    pub fn new(attributes: Vec<ObjectAttribute>) -> Self {
        Self(attributes)
    }

    pub fn attributes(&self) -> &[ObjectAttribute] {
        &self.0
    }

    pub fn get(&self, code: u64) -> Option<&ObjectAttribute> {
        self.0.iter().find(|attribute| attribute.code() == code)
    }

    pub fn class(&self) -> Option<ObjectClass> {
        self.0.iter().find_map(|attribute| match attribute {
            ObjectAttribute::Class(class) => Some(*class),
            _ => None,
        })
    }

    /// `C_FindObjects` rule: every attribute of `self` is present with an
    /// equal value in `object`
    pub fn matches(&self, object: &Template) -> bool {
        self.0
            .iter()
            .all(|wanted| object.get(wanted.code()) == Some(wanted))
    }
}

impl<'a> IntoIterator for &'a Template {
    type Item = &'a ObjectAttribute;
    type IntoIter = std::slice::Iter<'a, ObjectAttribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
