//! Port traits: the boundary between device logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Switch / Valve / Manifold (domain)
//! ```
//!
//! ## Ownership notes
//!
//! - A **Board** is shared by every device that references it and is never
//!   owned by the core.  Devices hold it behind an `Arc`.
//! - The core performs no locking of its own.  At most one logical owner
//!   may command a given pin at a time; a board shared across threads must
//!   serialise access per pin (see [`GpioBoard`](crate::adapters::gpio_board::GpioBoard)).

use std::sync::Arc;

use crate::pins::Pin;

// ───────────────────────────────────────────────────────────────
// Board port (driven adapter: domain ↔ physical lines)
// ───────────────────────────────────────────────────────────────

/// Access to the physical lines of one controller board.
pub trait Board {
    /// Drive `pin` to `state`.
    ///
    /// Write failures are not reported here; they surface on the next
    /// verified read because the line will not match the command.
    fn set(&self, pin: Pin, state: bool);

    /// Read the current level of `pin`.
    fn value(&self, pin: Pin) -> Result<bool, BoardError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// Devices emit structured [`DeviceEvent`](super::events::DeviceEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&self, event: &super::events::DeviceEvent);
}

/// Sink handle shared by every device of an instrument.
pub type SharedSink = Arc<dyn EventSink + Send + Sync>;

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`Board::value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// The pin is not wired to this board.
    UnknownPin(Pin),
    /// The bus or pin driver reported a failure.
    IoError,
}

impl core::fmt::Display for BoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownPin(pin) => write!(f, "{} is not wired to this board", pin),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
