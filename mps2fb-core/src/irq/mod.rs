//! Touch interrupt gating

pub mod notifier;

pub use notifier::InterruptNotifier;
