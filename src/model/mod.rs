mod mechanism;
mod object;
mod pin;
pub mod sample_constants;
mod token;

pub use mechanism::{Mechanism, MechanismCode, MechanismError};
pub use object::{KeyType, ObjectAttribute, ObjectClass, ObjectHandle, Template};
pub use pin::{Pin, PinError};
pub use token::{SlotId, TokenFamily, TokenInfo};
