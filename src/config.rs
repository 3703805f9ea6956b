//! Sample configuration
//!
//! Which vendor library to load, which PIN to present and how to initialize
//! the library. The binary fills this from command-line flags and
//! environment variables; library users construct it directly.

use crate::model::Pin;
use std::path::PathBuf;
use thiserror::Error;

/// File name of the Rutoken ECP PKCS#11 library on this platform
#[cfg(target_os = "windows")]
pub const DEFAULT_LIBRARY: &str = "rtpkcs11ecp.dll";
#[cfg(target_os = "macos")]
pub const DEFAULT_LIBRARY: &str = "librtpkcs11ecp.dylib";
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub const DEFAULT_LIBRARY: &str = "librtpkcs11ecp.so";

/// Settings shared by every sample
#[derive(Debug, Clone)]
pub struct SampleConfig {
    /// Path or file name of the vendor PKCS#11 library
    pub library_path: PathBuf,
    /// User PIN presented on login
    pub user_pin: Pin,
    /// Let the library use OS locking primitives (`CKF_OS_LOCKING_OK`)
    pub os_locking: bool,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            library_path: PathBuf::from(DEFAULT_LIBRARY),
            user_pin: Pin::default(),
            os_locking: true,
        }
    }
}

impl SampleConfig {
    /// Build a configuration from optional overrides, keeping defaults for
    /// anything not given
    pub fn from_parts(
        library_path: Option<PathBuf>,
        user_pin: Option<&str>,
        os_locking: bool,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let library_path = match library_path {
            Some(path) if path.as_os_str().is_empty() => return Err(ConfigError::EmptyLibraryPath),
            Some(path) => path,
            None => defaults.library_path,
        };

        let user_pin = match user_pin {
            Some(pin) => pin.parse().map_err(ConfigError::InvalidPin)?,
            None => defaults.user_pin,
        };

        Ok(Self {
            library_path,
            user_pin,
            os_locking,
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PKCS#11 library path must not be empty")]
    EmptyLibraryPath,

    #[error("Invalid user PIN: {0}")]
    InvalidPin(crate::model::PinError),
}
