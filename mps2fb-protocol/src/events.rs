//! Host input events consumed by the touch controller
//!
//! Absolute and multi-touch values arrive normalized to
//! `[0, ABS_MAX_RANGE)`, independent of the host window size.

/// Exclusive upper bound of normalized absolute values
pub const ABS_MAX_RANGE: u32 = 0x8000;

// Event kind masks, one bit per `InputEvent` variant
pub const EVENT_MASK_KEY: u32 = 1 << 0;
pub const EVENT_MASK_BTN: u32 = 1 << 1;
pub const EVENT_MASK_REL: u32 = 1 << 2;
pub const EVENT_MASK_ABS: u32 = 1 << 3;
pub const EVENT_MASK_MTT: u32 = 1 << 4;

// Wire format values for multi-touch phases
const MTT_BEGIN: u8 = 0;
const MTT_UPDATE: u8 = 1;
const MTT_DATA: u8 = 2;
const MTT_END: u8 = 3;
const MTT_CANCEL: u8 = 4;

// Wire format values for axes
const AXIS_X: u8 = 0;
const AXIS_Y: u8 = 1;

/// Absolute axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Parse an axis from its wire format byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            AXIS_X => Some(Axis::X),
            AXIS_Y => Some(Axis::Y),
            _ => None,
        }
    }
}

/// Pointer buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Left,
    Middle,
    Right,
    WheelUp,
    WheelDown,
    Side,
    Extra,
}

/// Lifecycle phase of a multi-touch contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MultiTouchPhase {
    /// Contact appeared
    Begin,
    /// Contact moved
    Update,
    /// Axis sample for a contact
    Data,
    /// Contact lifted
    End,
    /// Contact aborted by the host
    Cancel,
}

impl MultiTouchPhase {
    /// Parse a phase from its wire format byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            MTT_BEGIN => Some(MultiTouchPhase::Begin),
            MTT_UPDATE => Some(MultiTouchPhase::Update),
            MTT_DATA => Some(MultiTouchPhase::Data),
            MTT_END => Some(MultiTouchPhase::End),
            MTT_CANCEL => Some(MultiTouchPhase::Cancel),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            MultiTouchPhase::Begin => MTT_BEGIN,
            MultiTouchPhase::Update => MTT_UPDATE,
            MultiTouchPhase::Data => MTT_DATA,
            MultiTouchPhase::End => MTT_END,
            MultiTouchPhase::Cancel => MTT_CANCEL,
        }
    }
}

/// One multi-touch sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MultiTouchEvent {
    /// Lifecycle phase
    pub phase: MultiTouchPhase,
    /// Host slot number (starts at 1)
    pub slot: i64,
    /// Host tracking id, -1 on release
    pub tracking_id: i64,
    /// Axis the value belongs to, if any
    pub axis: Option<Axis>,
    /// Normalized axis value
    pub value: i64,
}

impl MultiTouchEvent {
    /// Sample carrying an axis value
    pub fn data(slot: i64, tracking_id: i64, axis: Axis, value: i64) -> Self {
        Self {
            phase: MultiTouchPhase::Data,
            slot,
            tracking_id,
            axis: Some(axis),
            value,
        }
    }

    /// Release of a contact
    pub fn end(slot: i64, tracking_id: i64) -> Self {
        Self {
            phase: MultiTouchPhase::End,
            slot,
            tracking_id,
            axis: None,
            value: 0,
        }
    }

    /// Build from host wire fields
    ///
    /// Returns `None` when the phase byte is unknown. An unknown axis byte
    /// yields an event without axis information.
    pub fn from_wire(phase: u8, slot: i64, tracking_id: i64, axis: u8, value: i64) -> Option<Self> {
        Some(Self {
            phase: MultiTouchPhase::from_byte(phase)?,
            slot,
            tracking_id,
            axis: Axis::from_byte(axis),
            value,
        })
    }
}

/// Input event delivered by the host input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Keyboard key (not consumed by the touch controller)
    Key { code: u32, down: bool },
    /// Pointer button press or release
    Button { button: Button, down: bool },
    /// Relative pointer motion (not consumed by the touch controller)
    Relative { axis: Axis, delta: i32 },
    /// Absolute pointer position on one axis
    Absolute { axis: Axis, value: i32 },
    /// Multi-touch sample
    MultiTouch(MultiTouchEvent),
}

impl InputEvent {
    /// Event kind mask bit for this event
    pub fn kind_mask(&self) -> u32 {
        match self {
            InputEvent::Key { .. } => EVENT_MASK_KEY,
            InputEvent::Button { .. } => EVENT_MASK_BTN,
            InputEvent::Relative { .. } => EVENT_MASK_REL,
            InputEvent::Absolute { .. } => EVENT_MASK_ABS,
            InputEvent::MultiTouch(_) => EVENT_MASK_MTT,
        }
    }

    /// Returns true if this event is accepted by a handler with `mask`
    pub fn matches_mask(&self, mask: u32) -> bool {
        self.kind_mask() & mask != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_wire_values() {
        let phases = [
            MultiTouchPhase::Begin,
            MultiTouchPhase::Update,
            MultiTouchPhase::Data,
            MultiTouchPhase::End,
            MultiTouchPhase::Cancel,
        ];

        for phase in phases {
            assert_eq!(MultiTouchPhase::from_byte(phase.to_byte()), Some(phase));
        }
        assert_eq!(MultiTouchPhase::from_byte(5), None);
    }

    #[test]
    fn test_from_wire() {
        let event = MultiTouchEvent::from_wire(2, 1, 7, 1, 100).unwrap();
        assert_eq!(event, MultiTouchEvent::data(1, 7, Axis::Y, 100));

        // Unknown axis keeps the event but drops the axis
        let event = MultiTouchEvent::from_wire(2, 1, 7, 9, 100).unwrap();
        assert_eq!(event.axis, None);

        assert!(MultiTouchEvent::from_wire(0xFF, 1, 7, 0, 0).is_none());
    }

    #[test]
    fn test_kind_mask() {
        let btn = InputEvent::Button {
            button: Button::Left,
            down: true,
        };
        let key = InputEvent::Key { code: 30, down: true };
        let mask = EVENT_MASK_BTN | EVENT_MASK_ABS | EVENT_MASK_MTT;

        assert!(btn.matches_mask(mask));
        assert!(!key.matches_mask(mask));
        assert!(InputEvent::MultiTouch(MultiTouchEvent::end(1, -1)).matches_mask(mask));
    }
}
