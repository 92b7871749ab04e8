//! Guest memory abstractions
//!
//! The framebuffer is a plain RAM region mapped into the guest's address
//! space. The device reads pixel rows out of it on every display tick.

use core::fmt;

/// Errors from RAM region allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AllocError {
    /// Not enough host memory for the requested size
    OutOfMemory,
    /// Requested size cannot be represented on this host
    SizeOverflow,
    /// Region name already registered with the bus
    NameInUse,
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocError::OutOfMemory => f.write_str("out of host memory"),
            AllocError::SizeOverflow => f.write_str("region size overflows host address space"),
            AllocError::NameInUse => f.write_str("region name already in use"),
        }
    }
}

/// A RAM region the guest can store pixels into
pub trait GuestRam {
    /// Region contents as seen by the device
    fn as_bytes(&self) -> &[u8];

    /// Mutable region contents, used by the bus for guest stores
    fn as_bytes_mut(&mut self) -> &mut [u8];

    /// Region size in bytes
    fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Check if the region is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Provider of RAM regions
///
/// Allocation happens once, when the device is realized.
pub trait RamAllocator {
    /// Region type handed back to the device
    type Ram: GuestRam;

    /// Allocate a zero-filled region of `size` bytes
    ///
    /// - `name`: Region name shown in the bus memory map
    fn alloc_ram(&mut self, name: &str, size: usize) -> Result<Self::Ram, AllocError>;
}
