//! Read the operation journal of a Rutoken PINPad
//!
//! The journal is returned by the vendor `C_EX_GetJournal` extension, which
//! is not part of the standard PKCS#11 function list. The sample runs the
//! shared flow up to login and then reports the operation as unavailable.

use std::io::Write;

use tracing::warn;

use crate::error::{SampleError, SampleResult};
use crate::model::Pin;
use crate::ports::TokenLibrary;
use crate::use_cases::session::{find_usable_slot, with_user_session};

pub fn read_journal<L, W>(library: &L, pin: &Pin, out: &mut W) -> SampleResult<Vec<u8>>
where
    L: TokenLibrary,
    W: Write,
{
    let slot = find_usable_slot(library, out)?;

    with_user_session(library, slot, pin, out, |_, out| {
        writeln!(out, "Acquiring journal...")?;
        warn!("Journal retrieval needs a vendor extension function");
        Err(SampleError::NotImplemented {
            operation: "C_EX_GetJournal".to_string(),
            reason: "vendor extension functions are not reachable through PKCS#11".to_string(),
        })
    })
}
