//! Host input handling
//!
//! Classifies host events, scales normalized coordinates into device
//! pixels and feeds the touch table.

pub mod router;
pub mod scale;

pub use router::{HandlerInfo, InputRouter, HANDLER_MASK, HANDLER_NAME};
pub use scale::AxisScaler;
