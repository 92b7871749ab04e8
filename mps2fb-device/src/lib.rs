//! MPS2 touch framebuffer device model
//!
//! Ties the board-agnostic pieces together into one device instance:
//!
//! - [`Mps2Fb`] - Device context with realize, reset, MMIO and input callbacks
//! - [`config::load_toml`] - Device configuration from a TOML table
//! - [`host`] - Heap-backed collaborators for hosts without their own
//!
//! The device owns no threads. The emulator calls into it from its device
//! lock; every callback runs to completion.

#![deny(unsafe_code)]

pub mod config;
pub mod device;
pub mod error;
pub mod host;

pub use config::load_toml;
pub use device::{Mps2Fb, Region, CONTROL_REGION_NAME};
pub use error::{ConfigLoadError, RealizeError};

pub use mps2fb_core::DeviceConfig;
pub use mps2fb_protocol::{Axis, Button, InputEvent, MultiTouchEvent, MultiTouchPhase, PixelFormat};
