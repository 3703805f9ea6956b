use super::TokenSession;
use crate::error::SampleResult;
use crate::model::{MechanismCode, SlotId, TokenInfo};

/// An initialized PKCS#11 library
///
/// Dropping the value finalizes the library.
pub trait TokenLibrary {
    type Session: TokenSession;

    /// First slot with a token present
    fn usable_slot(&self) -> SampleResult<SlotId>;

    fn token_info(&self, slot: SlotId) -> SampleResult<TokenInfo>;

    fn mechanism_list(&self, slot: SlotId) -> SampleResult<Vec<MechanismCode>>;

    /// Open a read-write session; closing happens when the session is dropped
    fn open_rw_session(&self, slot: SlotId) -> SampleResult<Self::Session>;
}
