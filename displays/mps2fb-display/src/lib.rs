//! Framebuffer scanout for the MPS2 touch framebuffer
//!
//! This crate provides:
//! - `FramebufferDescriptor` and `MemorySection` for the guest memory layout
//! - `RowConverter` implementations, one per `PixelFormat`
//! - `FramebufferPipeline`, which copies guest rows to the console surface
//!   on every display tick
//!
//! # Architecture
//!
//! The guest stores pixels into a RAM region. On each tick the pipeline
//! re-derives the memory section if it was invalidated, converts every
//! row into the console's 32-bit surface and reports the full screen as
//! changed. There is no partial-rectangle tracking.

#![no_std]
#![deny(unsafe_code)]

pub mod convert;
pub mod descriptor;
pub mod pipeline;

// Re-export key types
pub use convert::{converter_for, DirectCopy, PackedPalette, RowConverter};
pub use descriptor::{FramebufferDescriptor, MemorySection};
pub use pipeline::FramebufferPipeline;
