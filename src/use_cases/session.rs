//! Steps shared by every sample: slot discovery, capability checks and an
//! authenticated session that is always logged out

use std::io::Write;

use tracing::{debug, warn};

use crate::error::SampleResult;
use crate::logic::ensure;
use crate::model::{Mechanism, Pin, SlotId};
use crate::ports::{Authenticator, TokenLibrary};

/// First slot with a token present
pub(crate) fn find_usable_slot<L, W>(library: &L, out: &mut W) -> SampleResult<SlotId>
where
    L: TokenLibrary,
    W: Write,
{
    writeln!(out, "Checking tokens available")?;
    let slot = library.usable_slot()?;
    debug!("Using slot {}", slot);
    Ok(slot)
}

/// Fail unless the token in `slot` supports `mechanism`
pub(crate) fn require_mechanism<L, W>(
    library: &L,
    slot: SlotId,
    mechanism: Mechanism,
    out: &mut W,
) -> SampleResult<()>
where
    L: TokenLibrary,
    W: Write,
{
    writeln!(out, "Checking mechanisms available")?;
    let mechanisms = library.mechanism_list(slot)?;
    ensure(!mechanisms.is_empty(), " No mechanisms available")?;
    ensure(
        mechanisms.contains(&mechanism.code()),
        &format!(" {} isn`t supported!", mechanism.name()),
    )
}

/// Open a read-write session, log the user in and run `body`
///
/// Logout is attempted whether `body` succeeds or fails. When both fail the
/// error from `body` is returned. The session closes when it goes out of
/// scope.
pub(crate) fn with_user_session<L, W, T, F>(
    library: &L,
    slot: SlotId,
    pin: &Pin,
    out: &mut W,
    body: F,
) -> SampleResult<T>
where
    L: TokenLibrary,
    W: Write,
    F: FnOnce(&mut L::Session, &mut W) -> SampleResult<T>,
{
    writeln!(out, "Opening RW session")?;
    let mut session = library.open_rw_session(slot)?;

    writeln!(out, "User authentication")?;
    session.login(pin)?;

    let result = body(&mut session, out);
    let logout = session.logout();

    match (result, logout) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(logout_error)) => {
            warn!("Logout after failed operation also failed: {}", logout_error);
            Err(e)
        }
    }
}
