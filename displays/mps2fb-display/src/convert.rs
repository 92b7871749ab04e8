//! Row converters
//!
//! One converter per pixel format. Each turns one source row of guest
//! memory into one destination row of 32-bit surface pixels.

use mps2fb_protocol::format::{PACKED_PIXELS_PER_BYTE, SURFACE_BYTES_PER_PIXEL};
use mps2fb_protocol::PixelFormat;

/// Palette entry for `00`
pub const PALETTE_WHITE: u32 = 0x00FF_FFFF;
/// Palette entry for `01`
pub const PALETTE_LIGHT_GREY: u32 = 0x00AA_AAAA;
/// Palette entry for `10`
pub const PALETTE_DARK_GREY: u32 = 0x0055_5555;
/// Palette entry for `11`
pub const PALETTE_BLACK: u32 = 0x0000_0000;

const BPP: usize = SURFACE_BYTES_PER_PIXEL as usize;

/// Converts one row of guest pixels into surface pixels
pub trait RowConverter {
    /// Draw `width` pixels from `src` into `dst`
    ///
    /// Pixels that do not fit either slice are skipped.
    fn draw_row(&self, dst: &mut [u8], src: &[u8], width: u32);
}

/// 32bpp rows, copied unchanged
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DirectCopy;

impl RowConverter for DirectCopy {
    fn draw_row(&self, dst: &mut [u8], src: &[u8], width: u32) {
        let len = (width as usize * BPP).min(src.len()).min(dst.len());
        dst[..len].copy_from_slice(&src[..len]);
    }
}

/// 2bpp rows expanded through a 4-entry palette
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PackedPalette {
    palette: [u32; 4],
}

impl PackedPalette {
    /// White to black grey ramp
    pub const GREY: Self = Self {
        palette: [
            PALETTE_WHITE,
            PALETTE_LIGHT_GREY,
            PALETTE_DARK_GREY,
            PALETTE_BLACK,
        ],
    };

    /// Surface colour for a 2-bit pixel value
    pub fn color(&self, index: u8) -> u32 {
        self.palette[(index & 0b11) as usize]
    }
}

impl Default for PackedPalette {
    fn default() -> Self {
        Self::GREY
    }
}

impl RowConverter for PackedPalette {
    fn draw_row(&self, dst: &mut [u8], src: &[u8], width: u32) {
        let per_byte = PACKED_PIXELS_PER_BYTE as usize;
        for (x, out) in dst.chunks_exact_mut(BPP).take(width as usize).enumerate() {
            let Some(&byte) = src.get(x / per_byte) else {
                break;
            };
            // Most significant pair is the leftmost pixel
            let shift = 6 - 2 * (x % per_byte);
            let color = self.color(byte >> shift);
            out.copy_from_slice(&color.to_le_bytes());
        }
    }
}

static DIRECT_COPY: DirectCopy = DirectCopy;
static PACKED_GREY: PackedPalette = PackedPalette::GREY;

/// Converter for a pixel format
pub fn converter_for(format: PixelFormat) -> &'static dyn RowConverter {
    match format {
        PixelFormat::DirectRgba => &DIRECT_COPY,
        PixelFormat::Packed2bppPalette => &PACKED_GREY,
    }
}
