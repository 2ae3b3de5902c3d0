//! Outbound device events.
//!
//! Devices emit these through the [`EventSink`](super::ports::EventSink)
//! port instead of logging directly.  Adapters on the other side decide
//! what to do with them: log to the console, record them in a test, forward
//! them to the scheduling layer.

use crate::error::SwitchingError;
use crate::pins::Pin;

/// Structured events emitted by devices and the periodic toggler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceEvent {
    /// A device was commanded to a new logical state.
    StateChanged {
        device: String,
        pin: Pin,
        from: bool,
        to: bool,
        switch_count: u32,
    },

    /// A board-verified read found the physical line diverged.
    Desync(SwitchingError),

    /// A periodic toggler took ownership of a device.
    TogglerStarted {
        device: String,
        interval_ms: u64,
        runs: Option<u32>,
    },

    /// A periodic toggler finished, either by count or on a desync.
    TogglerStopped {
        device: String,
        toggles: u64,
        fault: Option<SwitchingError>,
    },
}
