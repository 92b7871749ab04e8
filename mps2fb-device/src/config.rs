//! TOML configuration loading
//!
//! Accepts a flat table:
//!
//! ```toml
//! name = "mps2-fb"
//! cols = 800
//! rows = 600
//! format = "packed2bpp_palette"
//! ```
//!
//! Missing keys keep their defaults.

use heapless::String as HString;
use serde::Deserialize;

use mps2fb_core::config::MAX_NAME_LEN;
use mps2fb_core::DeviceConfig;
use mps2fb_protocol::PixelFormat;

use crate::error::ConfigLoadError;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    name: Option<String>,
    cols: Option<u32>,
    rows: Option<u32>,
    format: Option<PixelFormat>,
}

/// Parse and validate a device configuration
pub fn load_toml(input: &str) -> Result<DeviceConfig, ConfigLoadError> {
    let raw: RawConfig = toml::from_str(input)?;
    let mut config = DeviceConfig::default();

    if let Some(name) = raw.name {
        let mut bounded: HString<MAX_NAME_LEN> = HString::new();
        bounded
            .push_str(&name)
            .map_err(|_| ConfigLoadError::NameTooLong)?;
        config.name = bounded;
    }
    if let Some(cols) = raw.cols {
        config.cols = cols;
    }
    if let Some(rows) = raw.rows {
        config.rows = rows;
    }
    if let Some(format) = raw.format {
        config.format = format;
    }

    config.validate()?;
    log::debug!(
        "loaded config {}: {}x{} {}",
        config.name.as_str(),
        config.cols,
        config.rows,
        config.format.name()
    );
    Ok(config)
}
