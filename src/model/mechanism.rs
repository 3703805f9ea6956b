//! Mechanisms used by the samples

use std::fmt;
use thiserror::Error;

/// `NSSCK_VENDOR_PKCS11_RU_TEAM`, the vendor prefix of the GOST 2012 mechanisms
const RU_TEAM: u64 = 0xD432_1000;

/// Raw mechanism type as reported by `C_GetMechanismList`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MechanismCode(pub u64);

impl fmt::Display for MechanismCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Cryptographic mechanism
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mechanism {
    /// PKCS #1 v1.5 RSA
    RsaPkcs,
    /// GOST R 34.10-2001 key pair generation
    GostR3410KeyPairGen,
    /// GOST R 34.10-2012 (256 bits) signature over a GOST R 34.11-2012
    /// (256 bits) digest computed on the token
    GostR3410WithGostR3411_12_256,
}

impl Mechanism {
    pub fn code(self) -> MechanismCode {
        MechanismCode(match self {
            Mechanism::RsaPkcs => 0x0001,
            Mechanism::GostR3410KeyPairGen => 0x1200,
            Mechanism::GostR3410WithGostR3411_12_256 => RU_TEAM | 0x008,
        })
    }

    /// PKCS#11 constant name
    pub fn name(self) -> &'static str {
        match self {
            Mechanism::RsaPkcs => "CKM_RSA_PKCS",
            Mechanism::GostR3410KeyPairGen => "CKM_GOSTR3410_KEY_PAIR_GEN",
            Mechanism::GostR3410WithGostR3411_12_256 => "CKM_GOSTR3410_WITH_GOSTR3411_12_256",
        }
    }

    /// Code lies in the `CKM_VENDOR_DEFINED` range
    pub fn is_vendor_defined(self) -> bool {
        self.code().0 >= 0x8000_0000
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MechanismError {
    #[error("Mechanism {name} cannot be passed to the library: {reason}")]
    Unrepresentable { name: &'static str, reason: String },
}
