//! Coordinate scaling
//!
//! Host values live in `[0, ABS_MAX_RANGE)`. Device coordinates live in
//! `[0, cols)` and `[0, rows)`. Scaling is integer and truncates.

use mps2fb_protocol::{Axis, ABS_MAX_RANGE};

/// Largest accepted normalized value
pub const ABS_MAX_VALUE: i64 = ABS_MAX_RANGE as i64 - 1;

/// Maps normalized host values to device pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisScaler {
    cols: u32,
    rows: u32,
}

impl AxisScaler {
    /// Create a scaler for a `cols` x `rows` screen
    pub const fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows }
    }

    /// Pixel range of an axis
    pub fn range(&self, axis: Axis) -> u32 {
        match axis {
            Axis::X => self.cols,
            Axis::Y => self.rows,
        }
    }

    /// Scale a raw value on `axis` into device pixels
    ///
    /// Values outside `[0, ABS_MAX_RANGE - 1]` are clamped first.
    pub fn scale(&self, axis: Axis, value: i64) -> u32 {
        let value = value.clamp(0, ABS_MAX_VALUE) as u64;
        let range = self.range(axis) as u64;
        (value * range / ABS_MAX_RANGE as u64) as u32
    }
}
