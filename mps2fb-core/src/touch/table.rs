//! Touch point table
//!
//! Owns every slot and the active mask. Each mutation builds the new slot
//! value first and then stores it together with its mask bit, so a
//! register read between two events always sees a consistent record.

use mps2fb_protocol::{Axis, MultiTouchPhase, TouchMask, MAX_SLOTS};

use super::slot::{TouchSlot, RELEASED_TRACK_ID};
use crate::input::AxisScaler;

/// Offset from host slot numbering (starts at 1) to table index
pub const MULTI_TOUCH_SLOT_OFFSET: i64 = -1;

/// Slot driven by the single-pointer path
pub const POINTER_SLOT: usize = 0;

/// Track id reported while the pointer button is held
const POINTER_TRACK_ID: i32 = 0;

/// Fixed-capacity contact table
#[derive(Debug, Clone)]
pub struct TouchPointTable {
    slots: [TouchSlot; MAX_SLOTS],
    mask: TouchMask,
    scaler: AxisScaler,
}

impl TouchPointTable {
    /// Create a table with every slot released
    pub fn new(scaler: AxisScaler) -> Self {
        Self {
            slots: [TouchSlot::released(); MAX_SLOTS],
            mask: TouchMask::empty(),
            scaler,
        }
    }

    /// Release every slot and clear the mask
    pub fn reset(&mut self) {
        self.slots = [TouchSlot::released(); MAX_SLOTS];
        self.mask.clear();
    }

    /// Get a slot by table index
    pub fn slot(&self, index: usize) -> Option<&TouchSlot> {
        self.slots.get(index)
    }

    /// All slots in index order
    pub fn slots(&self) -> &[TouchSlot; MAX_SLOTS] {
        &self.slots
    }

    /// Active slot mask
    pub fn mask(&self) -> TouchMask {
        self.mask
    }

    /// Scaler used for incoming axis values
    pub fn scaler(&self) -> AxisScaler {
        self.scaler
    }

    /// Map a host slot number to a table index
    ///
    /// Returns `None` when the index falls outside the table.
    pub fn slot_index(host_slot: i64) -> Option<usize> {
        let index = host_slot.checked_add(MULTI_TOUCH_SLOT_OFFSET)?;
        usize::try_from(index).ok().filter(|&i| i < MAX_SLOTS)
    }

    /// Apply one multi-touch sample
    ///
    /// - `slot_id`: Host slot number
    /// - `phase`: Contact lifecycle phase
    /// - `track_id`: Host tracking id
    /// - `sample`: Axis and raw normalized value, if the event carries one
    ///
    /// Returns true if the guest-visible state was touched.
    pub fn apply_multitouch(
        &mut self,
        slot_id: i64,
        phase: MultiTouchPhase,
        track_id: i64,
        sample: Option<(Axis, i64)>,
    ) -> bool {
        let Some(index) = Self::slot_index(slot_id) else {
            return false;
        };

        let mut slot = self.slots[index];
        match phase {
            // Placeholders: a contact is only claimed once DATA arrives
            MultiTouchPhase::Begin | MultiTouchPhase::Update => return false,
            MultiTouchPhase::Data => {
                slot.pressed = true;
                slot.track_id = clamp_track_id(track_id);
                if let Some((axis, value)) = sample {
                    let scaled = self.scaler.scale(axis, value);
                    match axis {
                        Axis::X => slot.x = scaled,
                        Axis::Y => slot.y = scaled,
                    }
                }
                log::trace!(
                    "touch data slot {} track {} -> ({}, {})",
                    index,
                    slot.track_id,
                    slot.x,
                    slot.y
                );
            }
            MultiTouchPhase::End | MultiTouchPhase::Cancel => {
                slot.pressed = false;
                slot.track_id = clamp_track_id(track_id);
                log::trace!("touch release slot {} track {}", index, slot.track_id);
            }
        }

        self.commit(index, slot);
        true
    }

    /// Apply a pointer button press or release to slot 0
    ///
    /// Returns true only if the pressed state flipped.
    pub fn apply_button(&mut self, down: bool) -> bool {
        let mut slot = self.slots[POINTER_SLOT];
        let was_pressed = slot.pressed;

        slot.pressed = down;
        slot.track_id = if down {
            POINTER_TRACK_ID
        } else {
            RELEASED_TRACK_ID
        };
        self.commit(POINTER_SLOT, slot);

        was_pressed != down
    }

    /// Apply an absolute pointer position on one axis to slot 0
    ///
    /// Returns true only if the coordinate changed.
    pub fn apply_absolute(&mut self, axis: Axis, value: i64) -> bool {
        let mut slot = self.slots[POINTER_SLOT];
        let scaled = self.scaler.scale(axis, value);

        let coord = match axis {
            Axis::X => &mut slot.x,
            Axis::Y => &mut slot.y,
        };
        if *coord == scaled {
            return false;
        }
        *coord = scaled;

        self.commit(POINTER_SLOT, slot);
        true
    }

    /// Store a slot and its mask bit in one step
    fn commit(&mut self, index: usize, slot: TouchSlot) {
        self.slots[index] = slot;
        self.mask.assign(index, slot.pressed);
        log::trace!("mask {:#06x}, {} active", self.mask.bits(), self.mask.count());
    }
}

fn clamp_track_id(track_id: i64) -> i32 {
    track_id.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TouchPointTable {
        TouchPointTable::new(AxisScaler::new(640, 480))
    }

    #[test]
    fn test_initial_state() {
        let table = table();
        assert!(table.mask().is_empty());
        for slot in table.slots() {
            assert!(!slot.pressed);
            assert_eq!(slot.track_id, -1);
        }
    }

    #[test]
    fn test_slot_index_mapping() {
        assert_eq!(TouchPointTable::slot_index(1), Some(0));
        assert_eq!(TouchPointTable::slot_index(10), Some(9));
        assert_eq!(TouchPointTable::slot_index(11), None);
        assert_eq!(TouchPointTable::slot_index(0), None);
        assert_eq!(TouchPointTable::slot_index(-5), None);
        assert_eq!(TouchPointTable::slot_index(i64::MIN), None);
    }

    #[test]
    fn test_data_presses_and_scales() {
        let mut table = table();
        let changed =
            table.apply_multitouch(1, MultiTouchPhase::Data, 5, Some((Axis::X, 16384)));

        assert!(changed);
        let slot = table.slot(0).unwrap();
        assert!(slot.pressed);
        assert_eq!(slot.track_id, 5);
        assert_eq!(slot.x, 320);
        assert!(table.mask().is_set(0));
    }

    #[test]
    fn test_data_truncates_toward_zero() {
        let mut table = table();
        table.apply_multitouch(1, MultiTouchPhase::Data, 5, Some((Axis::X, 16383)));
        assert_eq!(table.slot(0).unwrap().x, 319);
    }

    #[test]
    fn test_data_without_axis() {
        let mut table = table();
        table.apply_multitouch(2, MultiTouchPhase::Data, 3, Some((Axis::Y, 8192)));

        let changed = table.apply_multitouch(2, MultiTouchPhase::Data, 4, None);
        assert!(changed);

        let slot = table.slot(1).unwrap();
        assert_eq!(slot.y, 120);
        assert_eq!(slot.x, 0);
        assert_eq!(slot.track_id, 4);
        assert!(table.mask().is_set(1));
    }

    #[test]
    fn test_end_releases() {
        let mut table = table();
        table.apply_multitouch(1, MultiTouchPhase::Data, 5, Some((Axis::X, 100)));

        let changed = table.apply_multitouch(1, MultiTouchPhase::End, -1, None);
        assert!(changed);
        let slot = table.slot(0).unwrap();
        assert!(!slot.pressed);
        assert_eq!(slot.track_id, -1);
        assert!(!table.mask().is_set(0));
    }

    #[test]
    fn test_cancel_records_terminating_id() {
        let mut table = table();
        table.apply_multitouch(3, MultiTouchPhase::Data, 9, None);
        table.apply_multitouch(3, MultiTouchPhase::Cancel, 42, None);

        let slot = table.slot(2).unwrap();
        assert!(!slot.pressed);
        assert_eq!(slot.track_id, 42);
        assert!(!table.mask().is_set(2));
    }

    #[test]
    fn test_begin_update_are_noops() {
        let mut table = table();
        let before = table.clone();

        assert!(!table.apply_multitouch(1, MultiTouchPhase::Begin, 1, Some((Axis::X, 500))));
        assert!(!table.apply_multitouch(1, MultiTouchPhase::Update, 1, Some((Axis::Y, 500))));
        assert_eq!(table.slots(), before.slots());
        assert_eq!(table.mask(), before.mask());
    }

    #[test]
    fn test_out_of_range_slot_dropped() {
        let mut table = table();
        assert!(!table.apply_multitouch(11, MultiTouchPhase::Data, 1, Some((Axis::X, 10))));
        assert!(!table.apply_multitouch(0, MultiTouchPhase::Data, 1, Some((Axis::X, 10))));
        assert!(table.mask().is_empty());
    }

    #[test]
    fn test_button_changes_only_on_flip() {
        let mut table = table();

        assert!(table.apply_button(true));
        assert_eq!(table.slot(0).unwrap().track_id, 0);
        assert!(table.mask().is_set(0));

        // Repeated press reports no change
        assert!(!table.apply_button(true));

        assert!(table.apply_button(false));
        assert_eq!(table.slot(0).unwrap().track_id, -1);
        assert!(!table.mask().is_set(0));
        assert!(!table.apply_button(false));
    }

    #[test]
    fn test_absolute_changes_only_on_move() {
        let mut table = table();

        assert!(table.apply_absolute(Axis::X, 16384));
        assert_eq!(table.slot(0).unwrap().x, 320);
        assert!(!table.apply_absolute(Axis::X, 16384));

        // Different raw value mapping to the same pixel
        assert!(!table.apply_absolute(Axis::X, 16390));

        assert!(table.apply_absolute(Axis::Y, 32767));
        assert_eq!(table.slot(0).unwrap().y, 479);
    }

    #[test]
    fn test_absolute_does_not_press() {
        let mut table = table();
        table.apply_absolute(Axis::X, 1000);
        assert!(!table.slot(0).unwrap().pressed);
        assert!(table.mask().is_empty());
    }

    #[test]
    fn test_pointer_and_touch_share_slot_zero() {
        let mut table = table();

        table.apply_button(true);
        table.apply_multitouch(1, MultiTouchPhase::End, -1, None);
        assert!(!table.slot(0).unwrap().pressed);
        assert!(!table.mask().is_set(0));

        table.apply_multitouch(1, MultiTouchPhase::Data, 7, None);
        assert!(table.apply_button(false));
        assert_eq!(table.slot(0).unwrap().track_id, -1);
        assert!(!table.mask().is_set(0));
    }

    #[test]
    fn test_reset() {
        let mut table = table();
        table.apply_multitouch(4, MultiTouchPhase::Data, 2, Some((Axis::X, 20000)));
        table.apply_button(true);

        table.reset();
        assert!(table.mask().is_empty());
        assert_eq!(table.slot(3), Some(&TouchSlot::released()));
        assert_eq!(table.slot(0), Some(&TouchSlot::released()));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Button(bool),
            Absolute(Axis, i64),
            Touch(i64, MultiTouchPhase, i64, Option<(Axis, i64)>),
        }

        fn axis() -> impl Strategy<Value = Axis> {
            prop_oneof![Just(Axis::X), Just(Axis::Y)]
        }

        fn phase() -> impl Strategy<Value = MultiTouchPhase> {
            prop_oneof![
                Just(MultiTouchPhase::Begin),
                Just(MultiTouchPhase::Update),
                Just(MultiTouchPhase::Data),
                Just(MultiTouchPhase::End),
                Just(MultiTouchPhase::Cancel),
            ]
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                any::<bool>().prop_map(Op::Button),
                (axis(), -100i64..40_000).prop_map(|(a, v)| Op::Absolute(a, v)),
                (
                    -1i64..14,
                    phase(),
                    -1i64..20,
                    proptest::option::of((axis(), -100i64..40_000))
                )
                    .prop_map(|(s, p, t, sample)| Op::Touch(s, p, t, sample)),
            ]
        }

        proptest! {
            #[test]
            fn mask_matches_pressed(ops in proptest::collection::vec(op(), 0..64)) {
                let mut table = table();
                for op in ops {
                    match op {
                        Op::Button(down) => { table.apply_button(down); }
                        Op::Absolute(axis, value) => { table.apply_absolute(axis, value); }
                        Op::Touch(slot, phase, track, sample) => {
                            table.apply_multitouch(slot, phase, track, sample);
                        }
                    }
                    for (i, slot) in table.slots().iter().enumerate() {
                        prop_assert_eq!(table.mask().is_set(i), slot.pressed);
                        prop_assert!(slot.x < 640);
                        prop_assert!(slot.y < 480);
                    }
                }
            }

            #[test]
            fn data_then_end_toggles_bit(host_slot in 1i64..=10, track in 0i64..100) {
                let mut table = table();
                let index = (host_slot - 1) as usize;

                table.apply_multitouch(host_slot, MultiTouchPhase::Data, track, None);
                prop_assert!(table.mask().is_set(index));
                prop_assert!(table.slot(index).unwrap().pressed);

                table.apply_multitouch(host_slot, MultiTouchPhase::End, -1, None);
                prop_assert!(!table.mask().is_set(index));
                prop_assert!(!table.slot(index).unwrap().pressed);
            }
        }
    }
}
