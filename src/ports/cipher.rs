use crate::error::SampleResult;
use crate::model::{Mechanism, ObjectHandle};

/// Capability to encrypt and decrypt data on the token
pub trait Cipher {
    fn encrypt(&mut self, mechanism: Mechanism, key: ObjectHandle, data: &[u8])
        -> SampleResult<Vec<u8>>;

    fn decrypt(&mut self, mechanism: Mechanism, key: ObjectHandle, data: &[u8])
        -> SampleResult<Vec<u8>>;
}
