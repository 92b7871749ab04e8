//! MPS2 touch framebuffer host abstraction layer
//!
//! This crate defines the traits through which the device model talks to
//! the emulator around it. The device never owns a bus, an interrupt
//! controller or a display window; it is handed implementations of these
//! traits at realize time.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Device model (mps2fb-device)           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  mps2fb-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┼───────────┐
//!         ▼           ▼           ▼
//! ┌────────────┐ ┌──────────┐ ┌───────────┐
//! │ IRQ router │ │ RAM / bus│ │  console  │
//! └────────────┘ └──────────┘ └───────────┘
//! ```
//!
//! # Traits
//!
//! - [`irq::InterruptLine`] - Single interrupt output wire
//! - [`memory::GuestRam`], [`memory::RamAllocator`] - Framebuffer backing memory
//! - [`console::Console`], [`console::DisplaySurface`] - Scanout target

#![no_std]
#![deny(unsafe_code)]

pub mod console;
pub mod irq;
pub mod memory;

// Re-export key traits at crate root for convenience
pub use console::{Console, DisplaySurface};
pub use irq::InterruptLine;
pub use memory::{AllocError, GuestRam, RamAllocator};
