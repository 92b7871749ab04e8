//! Touch slot tracking
//!
//! Slot 0 is shared by the single-pointer path (mouse button plus absolute
//! axes) and the first multi-touch contact. Whichever path writes last wins.

pub mod slot;
pub mod table;

pub use slot::{TouchSlot, RELEASED_TRACK_ID};
pub use table::{TouchPointTable, MULTI_TOUCH_SLOT_OFFSET, POINTER_SLOT};
