//! Console and display surface abstractions
//!
//! The console owns the host window and its pixel buffer. The device only
//! writes rows into the surface and tells the console which rectangle
//! changed.

/// Host-side pixel buffer
///
/// Pixels are 32-bit xRGB8888, stored little-endian.
pub trait DisplaySurface {
    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;

    /// Mutable bytes of row `y`
    ///
    /// Returns `None` when `y` is outside the surface. The returned slice
    /// holds at least `width() * 4` bytes.
    fn row_mut(&mut self, y: u32) -> Option<&mut [u8]>;
}

/// Graphic console the device presents to
pub trait Console {
    /// Surface type owned by the console
    type Surface: DisplaySurface;

    /// Resize the console surface to `cols` x `rows` pixels
    fn resize(&mut self, cols: u32, rows: u32);

    /// Current surface to draw into
    fn surface_mut(&mut self) -> &mut Self::Surface;

    /// Mark a rectangle as changed so the backend presents it
    ///
    /// - `x`, `y`: Top-left corner in pixels
    /// - `w`, `h`: Size in pixels
    fn gfx_update(&mut self, x: u32, y: u32, w: u32, h: u32);
}
