//! Control region register map
//!
//! Register layout:
//! - 0x00 CONTROL (4 bytes): bit 0 enables the touch interrupt, bits 1-31 reserved
//! - 0x04 TOUCH_MASK (4 bytes): bit i set while slot i is pressed
//! - 0x08 + 16*i: per-slot record (x, y, pressed, track_id), 4 bytes each
//!
//! Every other offset inside the 4 KiB region is reserved and reads as zero.

/// Size of the control region in bytes
pub const CONTROL_REGION_SIZE: u64 = 4096;

/// Control register offset
pub const REG_CONTROL: u64 = 0x00;

/// Touch mask register offset
pub const REG_TOUCH_MASK: u64 = 0x04;

/// First slot record offset
pub const POINT_BASE: u64 = 0x08;

/// Size of one slot record (4 fields of 4 bytes)
pub const POINT_STRIDE: u64 = 16;

// Field offsets inside a slot record
pub const POINT_X: u64 = 0;
pub const POINT_Y: u64 = 4;
pub const POINT_PRESSED: u64 = 8;
pub const POINT_TRACK_ID: u64 = 12;

/// Number of touch slots
pub const MAX_SLOTS: usize = 10;

/// Native register width in bytes
pub const REG_WIDTH: u32 = 4;

/// Control bit: raise an interrupt on touch state changes
pub const CONTROL_ENABLE_IRQ: u32 = 1 << 0;

/// Control bits with no defined meaning
pub const CONTROL_RESERVED_MASK: u32 = !CONTROL_ENABLE_IRQ;

/// Number of slot bits carried by the touch mask register
pub const TOUCH_MASK_BITS: usize = 16;

/// Bits of the touch mask register that carry slot state
pub const TOUCH_MASK_VALID: u32 = (1 << TOUCH_MASK_BITS) - 1;

const _: () = assert!(MAX_SLOTS <= TOUCH_MASK_BITS);
const _: () = assert!(POINT_BASE + POINT_STRIDE * MAX_SLOTS as u64 <= CONTROL_REGION_SIZE);

/// Field within a slot record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotField {
    /// X coordinate in pixels
    X,
    /// Y coordinate in pixels
    Y,
    /// 1 while the contact is down
    Pressed,
    /// Host tracking id, -1 when released
    TrackId,
}

impl SlotField {
    /// Byte offset of this field inside its slot record
    pub const fn offset(self) -> u64 {
        match self {
            SlotField::X => POINT_X,
            SlotField::Y => POINT_Y,
            SlotField::Pressed => POINT_PRESSED,
            SlotField::TrackId => POINT_TRACK_ID,
        }
    }

    fn from_offset(offset: u64) -> Option<Self> {
        match offset {
            POINT_X => Some(SlotField::X),
            POINT_Y => Some(SlotField::Y),
            POINT_PRESSED => Some(SlotField::Pressed),
            POINT_TRACK_ID => Some(SlotField::TrackId),
            _ => None,
        }
    }
}

/// A decoded register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Control flags
    Control,
    /// Active slot bitmask
    TouchMask,
    /// One field of one slot record
    Slot { index: usize, field: SlotField },
}

impl Register {
    /// Decode a byte offset into a register
    ///
    /// Returns `None` for reserved offsets and for offsets that are not
    /// aligned to a register boundary.
    pub fn decode(offset: u64) -> Option<Self> {
        match offset {
            REG_CONTROL => Some(Register::Control),
            REG_TOUCH_MASK => Some(Register::TouchMask),
            _ => {
                let rel = offset.checked_sub(POINT_BASE)?;
                let index = usize::try_from(rel / POINT_STRIDE).ok()?;
                if index >= MAX_SLOTS {
                    return None;
                }
                let field = SlotField::from_offset(rel % POINT_STRIDE)?;
                Some(Register::Slot { index, field })
            }
        }
    }

    /// Byte offset of this register
    pub const fn offset(self) -> u64 {
        match self {
            Register::Control => REG_CONTROL,
            Register::TouchMask => REG_TOUCH_MASK,
            Register::Slot { index, field } => slot_offset(index, field),
        }
    }

    /// Check if guest writes to this register have any effect
    pub fn is_guest_writable(&self) -> bool {
        matches!(self, Register::Control)
    }
}

/// Byte offset of `field` in slot `index`
pub const fn slot_offset(index: usize, field: SlotField) -> u64 {
    POINT_BASE + POINT_STRIDE * index as u64 + field.offset()
}

/// Check if an access size is supported by the control region
pub fn valid_access_size(size: u32) -> bool {
    (1..=REG_WIDTH).contains(&size)
}

/// Keep the low `size` bytes of a register value
pub fn truncate(value: u32, size: u32) -> u32 {
    if size >= REG_WIDTH {
        value
    } else {
        value & ((1u32 << (size * 8)) - 1)
    }
}

/// Replace the low `size` bytes of `old` with the low bytes of `value`
pub fn merge_low_bytes(old: u32, value: u32, size: u32) -> u32 {
    if size >= REG_WIDTH {
        value
    } else {
        let lane = (1u32 << (size * 8)) - 1;
        (old & !lane) | (value & lane)
    }
}

/// Control register contents
///
/// Only bit 0 has a meaning. The remaining bits are stored as written so
/// that a guest read-back returns what it wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlFlags(u32);

impl ControlFlags {
    /// Flags with every bit clear
    pub const fn new() -> Self {
        Self(0)
    }

    /// Build from a raw register value
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw register value
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Check if touch interrupts are enabled
    pub const fn enable_irq(self) -> bool {
        self.0 & CONTROL_ENABLE_IRQ != 0
    }

    /// Set or clear the interrupt enable bit, leaving reserved bits alone
    pub fn set_enable_irq(&mut self, enabled: bool) {
        if enabled {
            self.0 |= CONTROL_ENABLE_IRQ;
        } else {
            self.0 &= !CONTROL_ENABLE_IRQ;
        }
    }

    /// Reserved field (bits 1-31) shifted down to bit 0
    pub const fn reserved(self) -> u32 {
        (self.0 & CONTROL_RESERVED_MASK) >> 1
    }
}

/// Active-slot bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchMask(u16);

impl TouchMask {
    /// Mask with no slot active
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Register encoding (upper 16 bits always zero)
    pub const fn bits(self) -> u32 {
        self.0 as u32
    }

    /// Check if slot `index` is active
    pub fn is_set(self, index: usize) -> bool {
        index < TOUCH_MASK_BITS && self.0 & (1 << index) != 0
    }

    /// Set or clear the bit for slot `index`
    ///
    /// Indices beyond the mask width are ignored.
    pub fn assign(&mut self, index: usize, active: bool) {
        if index >= TOUCH_MASK_BITS {
            return;
        }
        if active {
            self.0 |= 1 << index;
        } else {
            self.0 &= !(1 << index);
        }
    }

    /// Number of active slots
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Check if no slot is active
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Clear every bit
    pub fn clear(&mut self) {
        self.0 = 0;
    }
}
