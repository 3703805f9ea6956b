//! KeyPairGenerator trait - capability to generate key pairs on the token

use crate::error::SampleResult;
use crate::model::{Mechanism, ObjectHandle, Template};

/// Capability to generate asymmetric key pairs inside the token
pub trait KeyPairGenerator {
    /// Generate a key pair
    ///
    /// # Arguments
    ///
    /// * `mechanism` - Key pair generation mechanism
    /// * `public_template` - Attributes of the public key object
    /// * `private_template` - Attributes of the private key object
    ///
    /// # Returns
    ///
    /// Handles of the public and the private key, in that order
    ///
    /// # Errors
    ///
    /// Returns errors if:
    /// - The session is not authenticated
    /// - The mechanism is not supported by the token
    /// - The templates are inconsistent with the mechanism
    fn generate_key_pair(
        &mut self,
        mechanism: Mechanism,
        public_template: &Template,
        private_template: &Template,
    ) -> SampleResult<(ObjectHandle, ObjectHandle)>;
}
