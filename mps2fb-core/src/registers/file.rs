//! Register file
//!
//! Decodes guest accesses to the control region. Touch data is owned by
//! the host and only ever read here; the control word is the one register
//! the guest can change.
//!
//! No access ever faults. Anything that does not decode reads as zero and
//! is logged.

use mps2fb_protocol::regs::{merge_low_bytes, truncate, valid_access_size};
use mps2fb_protocol::{ControlFlags, Register};

use crate::touch::TouchPointTable;

/// Guest-visible control state
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterFile {
    control: ControlFlags,
}

impl RegisterFile {
    /// Create a register file with interrupts disabled
    pub fn new() -> Self {
        Self {
            control: ControlFlags::new(),
        }
    }

    /// Current control flags
    pub fn control(&self) -> ControlFlags {
        self.control
    }

    /// Clear the control word
    pub fn reset(&mut self) {
        self.control = ControlFlags::new();
    }

    /// Guest read of `size` bytes at `offset`
    pub fn read(&self, touch: &TouchPointTable, offset: u64, size: u32) -> u32 {
        if !valid_access_size(size) {
            log::warn!("invalid read size {} at {:#x}", size, offset);
            return 0;
        }

        let value = match Register::decode(offset) {
            Some(Register::Control) => self.control.bits(),
            Some(Register::TouchMask) => touch.mask().bits(),
            Some(Register::Slot { index, field }) => match touch.slot(index) {
                Some(slot) => slot.field(field),
                None => 0,
            },
            None => {
                log::warn!("unimplemented read at {:#x}", offset);
                return 0;
            }
        };

        truncate(value, size)
    }

    /// Guest write of `size` bytes at `offset`
    ///
    /// Only the control word is writable. A narrow write replaces the low
    /// bytes and keeps the rest.
    pub fn write(&mut self, offset: u64, size: u32, value: u32) {
        if !valid_access_size(size) {
            log::warn!("invalid write size {} at {:#x}", size, offset);
            return;
        }

        let Some(reg) = Register::decode(offset) else {
            log::warn!("unimplemented write at {:#x}", offset);
            return;
        };
        if !reg.is_guest_writable() {
            log::warn!("write to read-only register {:?} at {:#x}", reg, offset);
            return;
        }

        // Control is the only writable register
        let bits = merge_low_bytes(self.control.bits(), value, size);
        self.control = ControlFlags::from_bits(bits);
        log::debug!(
            "enable_irq {}, reserved {:#x}",
            self.control.enable_irq() as u8,
            self.control.reserved()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::AxisScaler;
    use mps2fb_protocol::regs::{slot_offset, REG_CONTROL, REG_TOUCH_MASK};
    use mps2fb_protocol::{Axis, MultiTouchPhase, SlotField};

    fn table() -> TouchPointTable {
        TouchPointTable::new(AxisScaler::new(640, 480))
    }

    #[test]
    fn test_control_roundtrip() {
        let mut regs = RegisterFile::new();
        let touch = table();

        regs.write(REG_CONTROL, 4, 1);
        assert_eq!(regs.read(&touch, REG_CONTROL, 4) & 1, 1);
        assert!(regs.control().enable_irq());

        regs.write(REG_CONTROL, 4, 0);
        assert!(!regs.control().enable_irq());
    }

    #[test]
    fn test_reserved_bits_stored() {
        let mut regs = RegisterFile::new();
        let touch = table();

        regs.write(REG_CONTROL, 4, 0xDEAD_BEEF);
        assert_eq!(regs.read(&touch, REG_CONTROL, 4), 0xDEAD_BEEF);
        assert!(regs.control().enable_irq());
    }

    #[test]
    fn test_narrow_control_write_keeps_upper_bytes() {
        let mut regs = RegisterFile::new();
        let touch = table();

        regs.write(REG_CONTROL, 4, 0xAABB_CC00);
        regs.write(REG_CONTROL, 1, 0x01);
        assert_eq!(regs.read(&touch, REG_CONTROL, 4), 0xAABB_CC01);
    }

    #[test]
    fn test_slot_reads() {
        let regs = RegisterFile::new();
        let mut touch = table();
        touch.apply_multitouch(3, MultiTouchPhase::Data, 17, Some((Axis::X, 16384)));
        touch.apply_multitouch(3, MultiTouchPhase::Data, 17, Some((Axis::Y, 8192)));

        assert_eq!(regs.read(&touch, slot_offset(2, SlotField::X), 4), 320);
        assert_eq!(regs.read(&touch, slot_offset(2, SlotField::Y), 4), 120);
        assert_eq!(regs.read(&touch, slot_offset(2, SlotField::Pressed), 4), 1);
        assert_eq!(regs.read(&touch, slot_offset(2, SlotField::TrackId), 4), 17);
        assert_eq!(regs.read(&touch, REG_TOUCH_MASK, 4), 1 << 2);
    }

    #[test]
    fn test_released_track_id_reads_all_ones() {
        let regs = RegisterFile::new();
        let touch = table();
        assert_eq!(
            regs.read(&touch, slot_offset(5, SlotField::TrackId), 4),
            0xFFFF_FFFF
        );
    }

    #[test]
    fn test_narrow_reads_truncate() {
        let regs = RegisterFile::new();
        let mut touch = table();
        touch.apply_multitouch(1, MultiTouchPhase::Data, 0x1234, Some((Axis::X, 32767)));

        assert_eq!(regs.read(&touch, slot_offset(0, SlotField::X), 1), 639 & 0xFF);
        assert_eq!(regs.read(&touch, slot_offset(0, SlotField::X), 2), 639);
        assert_eq!(regs.read(&touch, slot_offset(0, SlotField::TrackId), 1), 0x34);
    }

    #[test]
    fn test_unimplemented_reads_zero() {
        let regs = RegisterFile::new();
        let touch = table();

        assert_eq!(regs.read(&touch, 0x800, 4), 0);
        assert_eq!(regs.read(&touch, 0x09, 4), 0);
        assert_eq!(regs.read(&touch, REG_CONTROL, 0), 0);
        assert_eq!(regs.read(&touch, REG_CONTROL, 8), 0);
    }

    #[test]
    fn test_read_only_writes_ignored() {
        let mut regs = RegisterFile::new();
        let mut touch = table();
        touch.apply_button(true);

        let mask_before = regs.read(&touch, REG_TOUCH_MASK, 4);
        let x_before = regs.read(&touch, slot_offset(0, SlotField::X), 4);

        regs.write(REG_TOUCH_MASK, 4, 0);
        regs.write(slot_offset(0, SlotField::X), 4, 99);
        regs.write(0x800, 4, 1);

        assert_eq!(regs.read(&touch, REG_TOUCH_MASK, 4), mask_before);
        assert_eq!(regs.read(&touch, slot_offset(0, SlotField::X), 4), x_before);
        assert_eq!(regs.control(), ControlFlags::new());
    }

    #[test]
    fn test_invalid_size_write_dropped() {
        let mut regs = RegisterFile::new();
        regs.write(REG_CONTROL, 8, 1);
        assert!(!regs.control().enable_irq());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn writes_never_change_touch_registers(offset in 4u64..0x1000, value: u32, size in 1u32..=4) {
                let mut regs = RegisterFile::new();
                let mut touch = table();
                touch.apply_multitouch(2, MultiTouchPhase::Data, 3, Some((Axis::X, 1000)));

                let before = regs.read(&touch, offset, 4);
                regs.write(offset, size, value);
                prop_assert_eq!(regs.read(&touch, offset, 4), before);
                prop_assert_eq!(regs.control(), ControlFlags::new());
            }
        }
    }
}
