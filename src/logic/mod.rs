//! Small helpers shared by the samples

mod check;
mod hex_dump;

pub use check::ensure;
pub use hex_dump::hex_dump;
