//! Configuration type definitions
//!
//! A device is configured once, before it is realized. Nothing in here
//! changes afterwards.

use core::fmt;

use heapless::String;
use mps2fb_protocol::PixelFormat;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum device name length
pub const MAX_NAME_LEN: usize = 32;

/// Default device name
pub const DEFAULT_NAME: &str = "mps2-fb";

const _: () = assert!(DEFAULT_NAME.len() <= MAX_NAME_LEN);

/// Default screen width in pixels
pub const DEFAULT_COLS: u32 = 640;

/// Default screen height in pixels
pub const DEFAULT_ROWS: u32 = 480;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Screen width is zero
    ZeroColumns,
    /// Screen height is zero
    ZeroRows,
    /// Framebuffer size does not fit the host address space
    FramebufferTooLarge,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroColumns => f.write_str("cols must be non-zero"),
            ConfigError::ZeroRows => f.write_str("rows must be non-zero"),
            ConfigError::FramebufferTooLarge => f.write_str("framebuffer size overflows"),
        }
    }
}

/// Device configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeviceConfig {
    /// Device name, also used for the framebuffer RAM region
    pub name: String<MAX_NAME_LEN>,
    /// Screen width in pixels
    pub cols: u32,
    /// Screen height in pixels
    pub rows: u32,
    /// Framebuffer memory layout
    pub format: PixelFormat,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_COLS, DEFAULT_ROWS)
    }
}

impl DeviceConfig {
    /// Create a config with the default name and direct 32bpp format
    pub fn new(cols: u32, rows: u32) -> Self {
        let mut name = String::new();
        // Fits, length asserted at compile time
        name.push_str(DEFAULT_NAME).ok();
        Self {
            name,
            cols,
            rows,
            format: PixelFormat::DirectRgba,
        }
    }

    /// Same config with a different pixel format
    pub fn with_format(mut self, format: PixelFormat) -> Self {
        self.format = format;
        self
    }

    /// Check the configuration can be realized
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cols == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        if self.rows == 0 {
            return Err(ConfigError::ZeroRows);
        }
        self.framebuffer_size().map(|_| ())
    }

    /// Size of the framebuffer RAM region in bytes
    pub fn framebuffer_size(&self) -> Result<usize, ConfigError> {
        self.format
            .region_size(self.cols, self.rows)
            .ok_or(ConfigError::FramebufferTooLarge)
    }
}
