//! Interrupt line abstraction
//!
//! The device owns exactly one output line. The framework behind the trait
//! routes it to the guest's interrupt controller.

/// A single interrupt output wire
///
/// Implementations forward level changes to whatever interrupt controller
/// the line is wired to.
pub trait InterruptLine {
    /// Drive the line high
    fn raise(&mut self);

    /// Drive the line low
    fn lower(&mut self);

    /// Set the line to a specific level
    fn set_level(&mut self, high: bool) {
        if high {
            self.raise();
        } else {
            self.lower();
        }
    }

    /// Emit an edge: raise then immediately lower
    ///
    /// Both level changes happen inside one call, so the guest can never
    /// observe the line held high between them.
    fn pulse(&mut self) {
        self.raise();
        self.lower();
    }
}

impl<T: InterruptLine + ?Sized> InterruptLine for &mut T {
    fn raise(&mut self) {
        (**self).raise();
    }

    fn lower(&mut self) {
        (**self).lower();
    }

    fn pulse(&mut self) {
        (**self).pulse();
    }
}

/// Line that is not connected to anything
///
/// Useful when the board wires the device without an interrupt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnconnectedLine;

impl InterruptLine for UnconnectedLine {
    fn raise(&mut self) {}

    fn lower(&mut self) {}
}
