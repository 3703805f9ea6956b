//! Identifiers, labels, algorithm parameters and data shared by the samples
//!
//! Objects created by one sample are found by the others through these
//! identifiers, so they must stay byte-for-byte stable.

/// `CKA_ID` of the first GOST R 34.10-2001 key pair
pub const GOST_KEY_PAIR_ID_1: &[u8] = b"GOST R 34.10-2001 sample key pair 1 ID (Aktiv Co.)";

/// `CKA_ID` of the first GOST R 34.10-2012 (256 bits) key pair
pub const GOST256_KEY_PAIR_ID_1: &[u8] =
    b"GOST R 34.10-2012 (256 bits) sample key pair 1 ID (Aktiv Co.)";

/// `CKA_ID` of the RSA key pair
pub const RSA_KEY_PAIR_ID: &[u8] = b"RSA sample key pair ID (Aktiv Co.)";

/// `CKA_ID` of the GOST 28147-89 secret keys
pub const GOST_SECRET_KEY_ID: &[u8] = b"GOST 28147-89 Secret Key ID (Aktiv Co.)";

pub const GOST_PUBLIC_KEY_LABEL_1: &[u8] = b"Sample GOST R 34.10-2001 Public Key 1 (Aktiv Co.)";

pub const GOST_PRIVATE_KEY_LABEL_1: &[u8] = b"Sample GOST R 34.10-2001 Private Key 1 (Aktiv Co.)";

/// OID 1.2.643.2.2.35.1, GOST R 34.10-2001 CryptoPro-A parameter set
pub const GOST_R3410_PARAMETERS: &[u8] = &[0x06, 0x07, 0x2a, 0x85, 0x03, 0x02, 0x02, 0x23, 0x01];

/// OID 1.2.643.2.2.30.1, GOST R 34.11-94 CryptoPro parameter set
pub const GOST_R3411_PARAMETERS: &[u8] = &[0x06, 0x07, 0x2a, 0x85, 0x03, 0x02, 0x02, 0x1e, 0x01];

/// Message hashed and signed on the token by the GOST R 34.10-2012 sample
pub const GOST3411_SOURCE_DATA: &[u8] = &[
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
    0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d, 0x1e, 0x1f,
    0x20, 0x21, 0x22, 0x23, 0x24, 0x25, 0x26, 0x27, 0x28, 0x29, 0x2a, 0x2b, 0x2c, 0x2d, 0x2e, 0x2f,
    0x30, 0x31, 0x32, 0x33, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39, 0x3a, 0x3b, 0x3c, 0x3d, 0x3e, 0x3f,
];

/// Plaintext for the RSA sample; fits in a PKCS #1 v1.5 block of a 512-bit key
pub const RSA_SOURCE_DATA: &[u8] = &[
    0x52, 0x75, 0x74, 0x6f, 0x6b, 0x65, 0x6e, 0x20, 0x52, 0x53, 0x41, 0x20, 0x73, 0x61, 0x6d, 0x70,
    0x6c, 0x65, 0x20, 0x64, 0x61, 0x74, 0x61, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08,
];
