//! Framebuffer pipeline
//!
//! Driven by two console callbacks: `invalidate` marks the mapping stale,
//! `tick` redraws the whole screen.

use mps2fb_hal::{Console, DisplaySurface};
use mps2fb_protocol::PixelFormat;

use crate::convert::{converter_for, RowConverter};
use crate::descriptor::{FramebufferDescriptor, MemorySection};

/// Guest memory to console surface scanout
#[derive(Debug, Clone)]
pub struct FramebufferPipeline {
    descriptor: FramebufferDescriptor,
    format: PixelFormat,
    section: Option<MemorySection>,
}

impl FramebufferPipeline {
    /// Create a pipeline; the first tick maps memory before drawing
    pub fn new(cols: u32, rows: u32, format: PixelFormat) -> Self {
        Self {
            descriptor: FramebufferDescriptor::new(cols, rows),
            format,
            section: None,
        }
    }

    /// Current geometry and dirty flag
    pub fn descriptor(&self) -> &FramebufferDescriptor {
        &self.descriptor
    }

    /// Configured pixel format
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Current memory mapping, if computed
    pub fn section(&self) -> Option<&MemorySection> {
        self.section.as_ref()
    }

    /// Check if the mapping must be recomputed
    pub fn is_dirty(&self) -> bool {
        self.descriptor.dirty
    }

    /// Console asked for a full refresh
    pub fn invalidate(&mut self) {
        self.descriptor.dirty = true;
    }

    /// Recompute the memory mapping and clear the dirty flag
    pub fn on_geometry_change(&mut self) {
        self.section = MemorySection::compute(&self.descriptor, self.format);
        if self.section.is_none() {
            log::warn!(
                "framebuffer stride overflow for {} columns",
                self.descriptor.cols
            );
        }
        self.descriptor.dirty = false;
    }

    /// Redraw every row and report the full screen as changed
    ///
    /// Returns the number of rows drawn. Rows missing from `ram` or from
    /// the surface are skipped.
    pub fn tick<C: Console>(&mut self, ram: &[u8], console: &mut C) -> u32 {
        if self.descriptor.dirty {
            self.on_geometry_change();
        }
        let Some(section) = self.section else {
            return 0;
        };

        let converter: &dyn RowConverter = converter_for(self.format);
        let cols = self.descriptor.cols;
        let rows = self.descriptor.rows;
        let surface = console.surface_mut();

        // Clip to the console surface
        let width = cols.min(surface.width());
        let height = rows.min(surface.height());
        let dst_len = width as usize * self.descriptor.bytes_per_pixel as usize;

        let mut drawn = 0;
        for y in 0..height {
            let Some(src) = section.row(ram, y) else {
                break;
            };
            let Some(dst) = surface.row_mut(y) else {
                break;
            };
            let len = dst_len.min(dst.len());
            converter.draw_row(&mut dst[..len], src, width);
            drawn += 1;
        }

        console.gfx_update(0, 0, cols, rows);
        drawn
    }
}
