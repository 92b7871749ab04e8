//! Device error types

use core::fmt;

use mps2fb_core::ConfigError;
use mps2fb_hal::AllocError;

/// Errors returned while realizing a device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RealizeError {
    /// Configuration rejected
    Config(ConfigError),
    /// Framebuffer RAM could not be allocated
    Alloc(AllocError),
}

impl From<ConfigError> for RealizeError {
    fn from(e: ConfigError) -> Self {
        RealizeError::Config(e)
    }
}

impl From<AllocError> for RealizeError {
    fn from(e: AllocError) -> Self {
        RealizeError::Alloc(e)
    }
}

impl fmt::Display for RealizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RealizeError::Config(e) => write!(f, "invalid configuration: {}", e),
            RealizeError::Alloc(e) => write!(f, "framebuffer allocation failed: {}", e),
        }
    }
}

impl std::error::Error for RealizeError {}

/// Errors from loading a TOML configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLoadError {
    /// TOML syntax or shape error
    Toml(String),
    /// Device name longer than the name buffer
    NameTooLong,
    /// Parsed values rejected
    Config(ConfigError),
}

impl From<ConfigError> for ConfigLoadError {
    fn from(e: ConfigError) -> Self {
        ConfigLoadError::Config(e)
    }
}

impl From<toml::de::Error> for ConfigLoadError {
    fn from(e: toml::de::Error) -> Self {
        ConfigLoadError::Toml(e.to_string())
    }
}

impl fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigLoadError::Toml(msg) => write!(f, "TOML parse error: {}", msg),
            ConfigLoadError::NameTooLong => f.write_str("device name too long"),
            ConfigLoadError::Config(e) => write!(f, "invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for ConfigLoadError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_realize_error_from() {
        let e: RealizeError = ConfigError::ZeroRows.into();
        assert_eq!(e, RealizeError::Config(ConfigError::ZeroRows));

        let e: RealizeError = AllocError::OutOfMemory.into();
        assert_eq!(e.to_string(), "framebuffer allocation failed: out of host memory");
    }
}
