//! Framebuffer pixel formats
//!
//! The guest writes pixels into the framebuffer region in one of two
//! layouts. The host surface is always 32-bit xRGB8888.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bytes per pixel on the host surface
pub const SURFACE_BYTES_PER_PIXEL: u32 = 4;

/// Pixels packed into one byte in the 2bpp layout
pub const PACKED_PIXELS_PER_BYTE: u32 = 4;

/// Framebuffer memory layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PixelFormat {
    /// 32 bits per pixel, copied to the surface unchanged
    #[default]
    DirectRgba,
    /// 2 bits per pixel through a 4-entry grey palette, MSB pair first
    Packed2bppPalette,
}

impl PixelFormat {
    /// Bytes of guest memory per source row
    ///
    /// The packed layout rounds up so a trailing partial byte still has
    /// room. Returns `None` on overflow.
    pub fn source_stride(self, cols: u32) -> Option<u32> {
        match self {
            PixelFormat::DirectRgba => cols.checked_mul(SURFACE_BYTES_PER_PIXEL),
            PixelFormat::Packed2bppPalette => Some(cols.div_ceil(PACKED_PIXELS_PER_BYTE)),
        }
    }

    /// Size of the framebuffer region for a `cols` x `rows` screen
    pub fn region_size(self, cols: u32, rows: u32) -> Option<usize> {
        let stride = self.source_stride(cols)? as usize;
        stride.checked_mul(rows as usize)
    }

    /// Short name used in configuration files and logs
    pub fn name(self) -> &'static str {
        match self {
            PixelFormat::DirectRgba => "direct_rgba",
            PixelFormat::Packed2bppPalette => "packed2bpp_palette",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_stride() {
        assert_eq!(PixelFormat::DirectRgba.source_stride(640), Some(2560));
        assert_eq!(PixelFormat::DirectRgba.region_size(640, 480), Some(640 * 480 * 4));
    }

    #[test]
    fn test_packed_stride() {
        assert_eq!(PixelFormat::Packed2bppPalette.source_stride(640), Some(160));
        // Partial trailing byte
        assert_eq!(PixelFormat::Packed2bppPalette.source_stride(641), Some(161));
        assert_eq!(PixelFormat::Packed2bppPalette.region_size(8, 2), Some(4));
    }

    #[test]
    fn test_stride_overflow() {
        assert_eq!(PixelFormat::DirectRgba.source_stride(u32::MAX), None);
    }

    #[test]
    fn test_default_is_direct() {
        assert_eq!(PixelFormat::default(), PixelFormat::DirectRgba);
        assert_eq!(PixelFormat::default().name(), "direct_rgba");
    }
}
