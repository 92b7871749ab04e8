//! Input event router
//!
//! Decides which host events reach the touch table and how. Only the
//! left button, absolute X/Y and multi-touch samples are consumed;
//! everything else is counted and dropped.

use heapless::String;
use mps2fb_protocol::events::{EVENT_MASK_ABS, EVENT_MASK_BTN, EVENT_MASK_MTT};
use mps2fb_protocol::{Button, InputEvent, MultiTouchEvent, MultiTouchPhase};

use crate::touch::TouchPointTable;

/// Name the device registers its input handler under
pub const HANDLER_NAME: &str = "mps2-touchscreen";

/// Event kinds the handler subscribes to
pub const HANDLER_MASK: u32 = EVENT_MASK_BTN | EVENT_MASK_ABS | EVENT_MASK_MTT;

/// Maximum handler name length
pub const MAX_HANDLER_NAME_LEN: usize = 32;

const _: () = assert!(HANDLER_NAME.len() <= MAX_HANDLER_NAME_LEN);

/// Input handler registration details
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HandlerInfo {
    /// Handler name shown by the host input layer
    pub name: String<MAX_HANDLER_NAME_LEN>,
    /// Accepted event kinds
    pub mask: u32,
}

/// Routes host input events into a touch table
#[derive(Debug, Clone, Default)]
pub struct InputRouter {
    /// Events that were not consumed
    dropped: u32,
}

impl InputRouter {
    /// Create a new router
    pub fn new() -> Self {
        Self { dropped: 0 }
    }

    /// Registration details for the host input layer
    pub fn handler_info(&self) -> HandlerInfo {
        let mut name = String::new();
        // Fits, length asserted at compile time
        name.push_str(HANDLER_NAME).ok();
        HandlerInfo {
            name,
            mask: HANDLER_MASK,
        }
    }

    /// Number of events dropped so far
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Deliver one event
    ///
    /// Returns true if the touch state changed.
    pub fn route(&mut self, table: &mut TouchPointTable, event: &InputEvent) -> bool {
        if !event.matches_mask(HANDLER_MASK) {
            self.drop_event();
            return false;
        }

        match *event {
            InputEvent::MultiTouch(mt) => self.route_multitouch(table, &mt),
            InputEvent::Button { button, down } => {
                if button == Button::Left {
                    table.apply_button(down)
                } else {
                    self.drop_event();
                    false
                }
            }
            InputEvent::Absolute { axis, value } => table.apply_absolute(axis, value as i64),
            // Filtered by the handler mask above
            InputEvent::Key { .. } | InputEvent::Relative { .. } => false,
        }
    }

    /// Deliver a multi-touch sample still in host wire encoding
    ///
    /// Unknown phases are logged and dropped.
    pub fn route_wire_multitouch(
        &mut self,
        table: &mut TouchPointTable,
        phase: u8,
        slot: i64,
        tracking_id: i64,
        axis: u8,
        value: i64,
    ) -> bool {
        match MultiTouchEvent::from_wire(phase, slot, tracking_id, axis, value) {
            Some(mt) => self.route_multitouch(table, &mt),
            None => {
                log::warn!("unknown multi-touch type {}", phase);
                self.drop_event();
                false
            }
        }
    }

    fn route_multitouch(&mut self, table: &mut TouchPointTable, mt: &MultiTouchEvent) -> bool {
        if mt.phase == MultiTouchPhase::Data && mt.axis.is_none() {
            log::debug!("multi-touch data without axis on slot {}", mt.slot);
        }
        let sample = mt.axis.map(|axis| (axis, mt.value));
        let changed = table.apply_multitouch(mt.slot, mt.phase, mt.tracking_id, sample);
        let placeholder = matches!(mt.phase, MultiTouchPhase::Begin | MultiTouchPhase::Update);
        if !changed && !placeholder {
            // Slot outside the table
            self.drop_event();
        }
        changed
    }

    fn drop_event(&mut self) {
        self.dropped = self.dropped.saturating_add(1);
    }
}
