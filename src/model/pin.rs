use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// User PIN presented to the token on login
#[derive(Clone, PartialEq, Eq)]
pub struct Pin(String);

impl Pin {
    /// Factory user PIN of Rutoken devices
    pub const DEFAULT: &'static str = "12345678";

    pub const MIN_LENGTH: usize = 1;

    pub const MAX_LENGTH: usize = 32;

    pub fn new(pin: String) -> Result<Self, PinError> {
        if pin.len() < Self::MIN_LENGTH {
            return Err(PinError::Empty);
        }
        if pin.len() > Self::MAX_LENGTH {
            return Err(PinError::TooLong);
        }
        Ok(Self(pin))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Pin {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl FromStr for Pin {
    type Err = PinError;

    fn from_str(pin: &str) -> Result<Self, Self::Err> {
        Self::new(pin.to_string())
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pin([REDACTED])")
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinError {
    #[error("PIN must not be empty")]
    Empty,

    #[error("PIN must be at most {max} characters", max = Pin::MAX_LENGTH)]
    TooLong,
}
