//! Board-agnostic core of the MPS2 touch framebuffer
//!
//! This crate contains all device logic that does not depend on the
//! emulator hosting the device:
//!
//! - Touch slot table and mask bookkeeping
//! - Host input classification and coordinate scaling
//! - Interrupt gating and pulse generation
//! - Control region register file
//! - Device configuration types

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod input;
pub mod irq;
pub mod registers;
pub mod touch;

pub use config::{ConfigError, DeviceConfig};
pub use input::{AxisScaler, HandlerInfo, InputRouter};
pub use irq::InterruptNotifier;
pub use registers::RegisterFile;
pub use touch::{TouchPointTable, TouchSlot};
