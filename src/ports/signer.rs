//! Signer trait - capability to sign and verify data

use crate::error::SampleResult;
use crate::model::{Mechanism, ObjectHandle};

/// Capability to sign data with keys stored on the token
///
/// Signing mechanisms with internal hashing take the message itself;
/// the digest is computed on the device.
pub trait Signer {
    /// Sign `data` with the private key `key`
    ///
    /// # Returns
    ///
    /// The signature bytes
    ///
    /// # Errors
    ///
    /// Returns errors if:
    /// - The session is not authenticated
    /// - The key is not a private key usable with `mechanism`
    /// - The user rejected the operation on a PINPad
    fn sign(&mut self, mechanism: Mechanism, key: ObjectHandle, data: &[u8])
        -> SampleResult<Vec<u8>>;

    /// Verify `signature` over `data` with the public key `key`
    ///
    /// An invalid signature is reported as a `CKR_SIGNATURE_INVALID` call error.
    fn verify(
        &mut self,
        mechanism: Mechanism,
        key: ObjectHandle,
        data: &[u8],
        signature: &[u8],
    ) -> SampleResult<()>;
}
