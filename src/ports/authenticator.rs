use crate::error::SampleResult;
use crate::model::Pin;

/// Capability to log the user in and out of a session
pub trait Authenticator {
    /// `C_Login` as `CKU_USER`
    fn login(&mut self, pin: &Pin) -> SampleResult<()>;

    /// `C_Logout`
    fn logout(&mut self) -> SampleResult<()>;
}
