//! Delete the sample GOST 28147-89 secret keys

use std::io::Write;

use tracing::debug;

use crate::error::SampleResult;
use crate::model::sample_constants::GOST_SECRET_KEY_ID;
use crate::model::{KeyType, ObjectAttribute, Pin, Template};
use crate::ports::{ObjectStore, TokenLibrary};
use crate::use_cases::session::{find_usable_slot, with_user_session};

/// Search template for the secret keys to delete
pub fn secret_key_template() -> Template {
    Template::new(vec![
        ObjectAttribute::Id(GOST_SECRET_KEY_ID.to_vec()),
        ObjectAttribute::KeyType(KeyType::Gost28147),
    ])
}

/// Destroy every GOST 28147-89 key carrying the sample identifier
///
/// Finding nothing is not an error.
///
/// # Returns
///
/// Number of destroyed objects
pub fn delete_gost28147_keys<L, W>(library: &L, pin: &Pin, out: &mut W) -> SampleResult<usize>
where
    L: TokenLibrary,
    W: Write,
{
    let slot = find_usable_slot(library, out)?;

    with_user_session(library, slot, pin, out, |session, out| {
        writeln!(out, "Getting secret keys...")?;
        let keys = session.find_objects(&secret_key_template())?;

        if keys.is_empty() {
            writeln!(out, "No objects found")?;
            return Ok(0);
        }

        writeln!(out, "Destroying objects...")?;
        for (number, key) in keys.iter().enumerate() {
            writeln!(out, "   Object №{}", number + 1)?;
            debug!("Destroying object {}", key);
            session.destroy_object(*key)?;
        }
        writeln!(out, "Objects have been destroyed successfully")?;

        Ok(keys.len())
    })
}
