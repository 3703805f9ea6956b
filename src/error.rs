//! Error types for the Rutoken samples
//!
//! Errors are organized hierarchically and use thiserror for implementation.
//! A sample aborts on the first error; the binary turns it into a single
//! diagnostic line via [`SampleError::failure_message`].

use thiserror::Error;

/// Result type alias for sample operations
pub type SampleResult<T> = Result<T, SampleError>;

/// Top-level error type for all sample operations
#[derive(Error, Debug)]
pub enum SampleError {
    /// PKCS#11 library or token errors
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// A sample precondition did not hold
    #[error("{0}")]
    Check(String),

    /// Domain validation errors
    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// The sample exists but its operation is not implemented
    #[error("{operation} is not implemented: {reason}")]
    NotImplemented { operation: String, reason: String },

    /// Console output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SampleError {
    pub fn check(message: impl Into<String>) -> Self {
        SampleError::Check(message.into())
    }

    /// Line printed by the top-level handler when a sample fails
    pub fn failure_message(&self) -> String {
        match self {
            SampleError::Token(TokenError::Call { method, rv }) => {
                format!("Operation failed [Method: {method}, RV: {rv}]")
            }
            SampleError::Check(message) => format!("Operation failed [Message: {message}]"),
            other => format!("Operation failed [Message: {other}]"),
        }
    }
}

/// Errors reported by the PKCS#11 library or the token behind it
#[derive(Error, Debug)]
pub enum TokenError {
    /// A PKCS#11 function returned something other than CKR_OK
    #[error("{method} failed with {rv}")]
    Call { method: String, rv: String },

    /// The vendor library could not be loaded or initialized
    #[error("Failed to load PKCS#11 library {path}: {reason}")]
    LibraryLoad { path: String, reason: String },

    /// No slot has a token inserted
    #[error("No available slots")]
    NoSlots,

    /// The slot disappeared between discovery and use
    #[error("Slot {slot} is not available")]
    SlotUnavailable { slot: u64 },

    /// The handle is unknown to the session
    #[error("Object handle {handle} is not valid in this session")]
    InvalidHandle { handle: u64 },

    /// Any other failure inside the cryptoki wrapper
    #[error("PKCS#11 library error: {0}")]
    Library(String),
}

/// Domain validation errors
#[derive(Error, Debug)]
pub enum DomainError {
    /// PIN validation error
    #[error("PIN validation error: {0}")]
    Pin(#[from] crate::model::PinError),

    /// Mechanism cannot be expressed through the library
    #[error("Mechanism error: {0}")]
    Mechanism(#[from] crate::model::MechanismError),
}

impl From<crate::model::PinError> for SampleError {
    fn from(err: crate::model::PinError) -> Self {
        SampleError::Domain(DomainError::Pin(err))
    }
}

impl From<crate::model::MechanismError> for SampleError {
    fn from(err: crate::model::MechanismError) -> Self {
        SampleError::Domain(DomainError::Mechanism(err))
    }
}

/// Convert cryptoki errors to our error type
impl From<cryptoki::error::Error> for TokenError {
    fn from(err: cryptoki::error::Error) -> Self {
        match err {
            cryptoki::error::Error::Pkcs11(rv, function) => {
                TokenError::call(&format!("{function:?}"), &format!("{rv:?}"))
            }
            other => TokenError::Library(other.to_string()),
        }
    }
}

impl TokenError {
    /// Call failure named the way PKCS#11 names it, `C_Login` and
    /// `CKR_PIN_INCORRECT` for `Login` and `PinIncorrect`
    pub(crate) fn call(function: &str, rv: &str) -> Self {
        TokenError::Call {
            method: format!("C_{function}"),
            rv: return_value_name(rv),
        }
    }
}

fn return_value_name(rv: &str) -> String {
    let mut name = String::from("CKR_");
    let mut previous: Option<char> = None;
    for c in rv.chars() {
        if c.is_ascii_uppercase()
            && previous.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit())
        {
            name.push('_');
        }
        name.push(c.to_ascii_uppercase());
        previous = Some(c);
    }
    name
}

impl From<cryptoki::error::Error> for SampleError {
    fn from(err: cryptoki::error::Error) -> Self {
        SampleError::Token(TokenError::from(err))
    }
}
