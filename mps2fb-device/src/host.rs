//! Heap-backed host collaborators
//!
//! Ready-made implementations of the HAL traits for hosts that keep guest
//! RAM and the console surface in ordinary heap buffers.

use std::collections::BTreeSet;

use mps2fb_hal::{AllocError, Console, DisplaySurface, GuestRam, InterruptLine, RamAllocator};
use mps2fb_protocol::format::SURFACE_BYTES_PER_PIXEL;

/// Zero-filled RAM region on the heap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeapRam {
    bytes: Vec<u8>,
}

impl HeapRam {
    /// Allocate a zero-filled region
    ///
    /// Fails instead of aborting when the host cannot provide `size` bytes.
    pub fn try_new(size: usize) -> Result<Self, AllocError> {
        if size > isize::MAX as usize {
            return Err(AllocError::SizeOverflow);
        }
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(size)
            .map_err(|_| AllocError::OutOfMemory)?;
        bytes.resize(size, 0);
        Ok(Self { bytes })
    }
}

impl GuestRam for HeapRam {
    fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

/// Allocator handing out [`HeapRam`] regions under unique names
#[derive(Debug, Default)]
pub struct HeapAllocator {
    names: BTreeSet<String>,
    limit: Option<usize>,
}

impl HeapAllocator {
    /// Allocator without a size limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocator refusing regions larger than `limit` bytes
    pub fn with_limit(limit: usize) -> Self {
        Self {
            names: BTreeSet::new(),
            limit: Some(limit),
        }
    }

    /// Names of the regions handed out so far
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl RamAllocator for HeapAllocator {
    type Ram = HeapRam;

    fn alloc_ram(&mut self, name: &str, size: usize) -> Result<HeapRam, AllocError> {
        if self.limit.is_some_and(|limit| size > limit) {
            return Err(AllocError::OutOfMemory);
        }
        if self.names.contains(name) {
            return Err(AllocError::NameInUse);
        }
        let ram = HeapRam::try_new(size)?;
        self.names.insert(name.to_string());
        Ok(ram)
    }
}

/// xRGB8888 pixel buffer
#[derive(Debug, Clone, Default)]
pub struct BufferSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl BufferSurface {
    /// Black surface of `width` x `height` pixels
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * SURFACE_BYTES_PER_PIXEL as usize;
        Self {
            width,
            height,
            pixels: vec![0; len],
        }
    }

    /// Pixel value at (`x`, `y`)
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bpp = SURFACE_BYTES_PER_PIXEL as usize;
        let i = (y as usize * self.width as usize + x as usize) * bpp;
        let bytes = self.pixels.get(i..i + bpp)?;
        Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Raw surface bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }
}

impl DisplaySurface for BufferSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn row_mut(&mut self, y: u32) -> Option<&mut [u8]> {
        if y >= self.height {
            return None;
        }
        let stride = self.width as usize * SURFACE_BYTES_PER_PIXEL as usize;
        let start = y as usize * stride;
        self.pixels.get_mut(start..start + stride)
    }
}

/// Console drawing into a [`BufferSurface`]
///
/// Records every changed rectangle until drained.
#[derive(Debug, Clone, Default)]
pub struct BufferConsole {
    surface: BufferSurface,
    updates: Vec<(u32, u32, u32, u32)>,
}

impl BufferConsole {
    /// Console with an empty surface; realize resizes it
    pub fn new() -> Self {
        Self::default()
    }

    /// Current surface
    pub fn surface(&self) -> &BufferSurface {
        &self.surface
    }

    /// Changed rectangles since the last drain
    pub fn updates(&self) -> &[(u32, u32, u32, u32)] {
        &self.updates
    }

    /// Take the recorded rectangles
    pub fn drain_updates(&mut self) -> Vec<(u32, u32, u32, u32)> {
        std::mem::take(&mut self.updates)
    }
}

impl Console for BufferConsole {
    type Surface = BufferSurface;

    fn resize(&mut self, cols: u32, rows: u32) {
        self.surface = BufferSurface::new(cols, rows);
    }

    fn surface_mut(&mut self) -> &mut BufferSurface {
        &mut self.surface
    }

    fn gfx_update(&mut self, x: u32, y: u32, w: u32, h: u32) {
        self.updates.push((x, y, w, h));
    }
}

/// Interrupt line that remembers its level and counts edges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelLine {
    high: bool,
    rising: u32,
    falling: u32,
}

impl LevelLine {
    /// Line starting low
    pub fn new() -> Self {
        Self::default()
    }

    /// Current level
    pub fn is_high(&self) -> bool {
        self.high
    }

    /// Low-to-high transitions seen
    pub fn rising_edges(&self) -> u32 {
        self.rising
    }

    /// High-to-low transitions seen
    pub fn falling_edges(&self) -> u32 {
        self.falling
    }
}

impl InterruptLine for LevelLine {
    fn raise(&mut self) {
        if !self.high {
            self.rising += 1;
        }
        self.high = true;
    }

    fn lower(&mut self) {
        if self.high {
            self.falling += 1;
        }
        self.high = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_unique_names() {
        let mut alloc = HeapAllocator::new();
        let ram = alloc.alloc_ram("fb", 64).unwrap();
        assert_eq!(ram.len(), 64);
        assert!(ram.as_bytes().iter().all(|&b| b == 0));

        assert_eq!(alloc.alloc_ram("fb", 64), Err(AllocError::NameInUse));
        assert_eq!(alloc.names().collect::<Vec<_>>(), vec!["fb"]);
    }

    #[test]
    fn test_heap_ram_size_overflow() {
        assert_eq!(HeapRam::try_new(usize::MAX), Err(AllocError::SizeOverflow));
    }

    #[test]
    fn test_failed_alloc_keeps_name_free() {
        let mut alloc = HeapAllocator::new();
        assert_eq!(
            alloc.alloc_ram("fb", usize::MAX),
            Err(AllocError::SizeOverflow)
        );
        assert!(alloc.alloc_ram("fb", 8).is_ok());
    }

    #[test]
    fn test_allocator_limit() {
        let mut alloc = HeapAllocator::with_limit(16);
        assert_eq!(alloc.alloc_ram("big", 17), Err(AllocError::OutOfMemory));
        assert!(alloc.alloc_ram("small", 16).is_ok());
    }

    #[test]
    fn test_surface_rows() {
        let mut surface = BufferSurface::new(2, 2);
        surface
            .row_mut(1)
            .unwrap()
            .copy_from_slice(&[1, 0, 0, 0, 2, 0, 0, 0]);

        assert_eq!(surface.pixel(1, 1), Some(2));
        assert_eq!(surface.pixel(2, 0), None);
        assert!(surface.row_mut(2).is_none());
    }

    #[test]
    fn test_level_line_pulse() {
        let mut line = LevelLine::new();
        line.pulse();
        assert!(!line.is_high());
        assert_eq!(line.rising_edges(), 1);
        assert_eq!(line.falling_edges(), 1);
    }
}
