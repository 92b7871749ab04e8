//! MPS2 touch framebuffer guest interface
//!
//! This crate defines everything the guest driver and the host input layer
//! agree on: the control-region register map, the bit layout of the
//! control and touch-mask words, the framebuffer pixel formats, and the
//! host input events consumed by the touch controller.
//!
//! # Control region
//!
//! ```text
//! 0x000 ┌──────────────────────────────┐
//!       │ CONTROL   bit0 = enable_irq  │ R/W
//! 0x004 ├──────────────────────────────┤
//!       │ TOUCH_MASK bit i = slot i    │ R
//! 0x008 ├──────────────────────────────┤
//!       │ slot 0: x | y | pressed | id │ R   (16 bytes per slot)
//!       │ ...                          │
//! 0x0A8 ├──────────────────────────────┤
//!       │ reserved (reads as zero)     │
//! 0xFFF └──────────────────────────────┘
//! ```
//!
//! All registers are 32 bits wide and little-endian.

#![no_std]
#![deny(unsafe_code)]

pub mod events;
pub mod format;
pub mod regs;

pub use events::{
    Axis, Button, InputEvent, MultiTouchEvent, MultiTouchPhase, ABS_MAX_RANGE,
};
pub use format::PixelFormat;
pub use regs::{
    ControlFlags, Register, SlotField, TouchMask, CONTROL_REGION_SIZE, MAX_SLOTS,
};
