//! Interrupt notifier
//!
//! Turns a "touch state changed" signal into a pulse on the device's
//! interrupt line when the guest has enabled interrupts. With interrupts
//! disabled the change stays visible in the registers for polling.

use mps2fb_hal::InterruptLine;
use mps2fb_protocol::ControlFlags;

/// Gates and counts touch interrupts
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptNotifier {
    /// Pulses emitted
    pulses: u32,
    /// Changes that found interrupts disabled
    suppressed: u32,
}

impl InterruptNotifier {
    /// Create a new notifier
    pub fn new() -> Self {
        Self {
            pulses: 0,
            suppressed: 0,
        }
    }

    /// Signal the result of one input event
    ///
    /// Emits at most one pulse per call. Returns true if the line pulsed.
    pub fn notify<L: InterruptLine + ?Sized>(
        &mut self,
        changed: bool,
        flags: ControlFlags,
        line: &mut L,
    ) -> bool {
        if !changed {
            return false;
        }
        if !flags.enable_irq() {
            self.suppressed = self.suppressed.saturating_add(1);
            return false;
        }

        line.pulse();
        self.pulses = self.pulses.saturating_add(1);
        true
    }

    /// Pulses emitted so far
    pub fn pulses(&self) -> u32 {
        self.pulses
    }

    /// State changes that did not raise an interrupt
    pub fn suppressed(&self) -> u32 {
        self.suppressed
    }
}
