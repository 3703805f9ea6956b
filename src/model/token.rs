use std::fmt;

/// Slot identifier as returned by `C_GetSlotList`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub u64);

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Device family, derived from the model reported by the token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenFamily {
    /// Rutoken PINPad: PIN entry and confirmation on the device screen
    PinPad,
    /// Any other Rutoken ECP device
    Ecp,
}

/// Subset of `CK_TOKEN_INFO` the samples look at
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenInfo {
    pub label: String,
    pub manufacturer: String,
    pub model: String,
    pub serial_number: String,
}

impl TokenInfo {
    pub fn family(&self) -> TokenFamily {
        let model = self.model.to_ascii_lowercase();
        if model.contains("pinpad") || model.contains("pin pad") {
            TokenFamily::PinPad
        } else {
            TokenFamily::Ecp
        }
    }
}
