//! Framebuffer geometry and memory mapping

use mps2fb_protocol::format::SURFACE_BYTES_PER_PIXEL;
use mps2fb_protocol::PixelFormat;

/// Framebuffer geometry as configured at realize time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FramebufferDescriptor {
    /// Width in pixels
    pub cols: u32,
    /// Height in pixels
    pub rows: u32,
    /// Bytes per pixel on the destination surface
    pub bytes_per_pixel: u32,
    /// Memory section must be recomputed before the next draw
    pub dirty: bool,
}

impl FramebufferDescriptor {
    /// Create a descriptor that needs mapping before its first draw
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            cols,
            rows,
            bytes_per_pixel: SURFACE_BYTES_PER_PIXEL,
            dirty: true,
        }
    }
}

/// Mapping of guest memory rows onto the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MemorySection {
    /// Offset of the first row in the RAM region
    pub offset: usize,
    /// Bytes between the starts of consecutive source rows
    pub src_stride: usize,
    /// Number of rows covered
    pub rows: u32,
}

impl MemorySection {
    /// Compute the section for a descriptor and pixel format
    ///
    /// Returns `None` if the stride overflows.
    pub fn compute(descriptor: &FramebufferDescriptor, format: PixelFormat) -> Option<Self> {
        Some(Self {
            offset: 0,
            src_stride: format.source_stride(descriptor.cols)? as usize,
            rows: descriptor.rows,
        })
    }

    /// Total bytes covered by the section
    pub fn len(&self) -> usize {
        self.src_stride.saturating_mul(self.rows as usize)
    }

    /// Check if the section covers no memory
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Source bytes of row `y` within `ram`
    pub fn row<'a>(&self, ram: &'a [u8], y: u32) -> Option<&'a [u8]> {
        if y >= self.rows {
            return None;
        }
        let start = self
            .offset
            .checked_add(self.src_stride.checked_mul(y as usize)?)?;
        let end = start.checked_add(self.src_stride)?;
        ram.get(start..end)
    }
}
