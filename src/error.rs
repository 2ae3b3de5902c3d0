//! Unified error types for the fluidics layer.
//!
//! A single `Error` enum that every subsystem converts into, so callers
//! driving manifolds from the outside see one uniform failure type.
//!
//! | Fault           | Raised by                          | Policy                         |
//! |-----------------|------------------------------------|--------------------------------|
//! | configuration   | `Manifold` construction, config    | always propagated, fatal       |
//! | range           | any `Manifold` index accessor      | always propagated              |
//! | state desync    | `Switch::value()`                  | propagated, except the toggler |
//! | precondition    | `PeriodicToggler::new`             | fails before any toggling      |

use core::fmt;

use crate::app::ports::BoardError;
use crate::pins::Pin;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Manifold size outside the fixed valid set.
    InvalidManifoldSize(usize),
    /// Index outside `[0, size)` on a manifold accessor.
    IndexOutOfRange { index: usize, size: usize },
    /// Commanded and physically observed state diverged.
    Switching(SwitchingError),
    /// Periodic toggler arguments rejected before the loop started.
    Precondition(PreconditionError),
    /// Instrument configuration is invalid.
    Config(ConfigError),
    /// A pin was claimed by more than one device.
    PinConflict(Pin),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidManifoldSize(size) => write!(
                f,
                "invalid manifold size: {size}, must be one of {:?}",
                crate::manifold::VALID_SIZES
            ),
            Self::IndexOutOfRange { index, size } => {
                write!(f, "index out of range: {index} (size {size})")
            }
            Self::Switching(e) => write!(f, "switching: {e}"),
            Self::Precondition(e) => write!(f, "precondition: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::PinConflict(pin) => write!(f, "pin {pin} claimed by more than one device"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// State-desync faults
// ---------------------------------------------------------------------------

/// Why a board-verified device refused to report a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesyncCause {
    /// The board reports a different level than the one last commanded.
    Mismatch { commanded: bool, observed: bool },
    /// The board could not be read at all.
    ReadbackFailed(BoardError),
}

impl fmt::Display for DesyncCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mismatch { commanded, observed } => {
                write!(f, "commanded {commanded}, board reads {observed}")
            }
            Self::ReadbackFailed(e) => write!(f, "readback failed: {e}"),
        }
    }
}

/// A device's cached state no longer matches the physical readback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchingError {
    pub device: String,
    pub pin: Pin,
    pub cause: DesyncCause,
}

impl fmt::Display for SwitchingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "switch ({}) on {} is not set: {}",
            self.device, self.pin, self.cause
        )
    }
}

impl std::error::Error for SwitchingError {}

impl From<SwitchingError> for Error {
    fn from(e: SwitchingError) -> Self {
        Self::Switching(e)
    }
}

// ---------------------------------------------------------------------------
// Precondition faults
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreconditionError {
    /// Toggle interval must be greater than zero.
    ZeroInterval,
    /// A bounded run must toggle at least once.
    ZeroCount,
}

impl fmt::Display for PreconditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroInterval => write!(f, "interval must be greater than 0"),
            Self::ZeroCount => write!(f, "must toggle at least once"),
        }
    }
}

impl From<PreconditionError> for Error {
    fn from(e: PreconditionError) -> Self {
        Self::Precondition(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration faults
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The document could not be parsed.
    Parse(String),
    /// An explicit pin table does not have one entry per device.
    PinCount { expected: usize, got: usize },
    /// A field failed range validation.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::PinCount { expected, got } => {
                write!(f, "pin table needs {expected} entries, {got} given")
            }
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
