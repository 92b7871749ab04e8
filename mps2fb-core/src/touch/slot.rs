//! A single tracked contact

use mps2fb_protocol::SlotField;

/// Track id of a slot with no contact
pub const RELEASED_TRACK_ID: i32 = -1;

/// One contact point as the guest sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchSlot {
    /// X coordinate in pixels
    pub x: u32,
    /// Y coordinate in pixels
    pub y: u32,
    /// Contact is down
    pub pressed: bool,
    /// Host tracking id, -1 when released
    pub track_id: i32,
}

impl Default for TouchSlot {
    fn default() -> Self {
        Self::released()
    }
}

impl TouchSlot {
    /// Slot at the origin with no contact
    pub const fn released() -> Self {
        Self {
            x: 0,
            y: 0,
            pressed: false,
            track_id: RELEASED_TRACK_ID,
        }
    }

    /// Register encoding of one field
    pub fn field(&self, field: SlotField) -> u32 {
        match field {
            SlotField::X => self.x,
            SlotField::Y => self.y,
            SlotField::Pressed => self.pressed as u32,
            SlotField::TrackId => self.track_id as u32,
        }
    }
}
