//! Pin identities and pin enumeration.
//!
//! The core never interprets a pin number: a [`Pin`] is an opaque
//! identifier with equality semantics, bound to one physical line and owned
//! by exactly one device.  A [`PinMap`] is the board-family enumeration that
//! maps a manifold's logical slot index onto those identifiers.

use core::fmt;

use crate::error::{Error, Result};

/// Largest number of pins a single manifold can claim.
pub const MAX_MANIFOLD_PINS: usize = 20;

/// Opaque identity of one physical access line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pin(u8);

impl Pin {
    pub const fn new(number: u8) -> Self {
        Self(number)
    }

    pub const fn number(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPIO{}", self.0)
    }
}

/// Logical slot index -> [`Pin`] for one manifold.
///
/// Entries are unique; a pin appearing twice would let two devices drive
/// the same line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinMap {
    pins: heapless::Vec<Pin, MAX_MANIFOLD_PINS>,
}

impl PinMap {
    /// Slot `i` maps to pin `i`.
    pub fn sequential(len: usize) -> Result<Self> {
        if len > MAX_MANIFOLD_PINS {
            return Err(Error::InvalidManifoldSize(len));
        }
        let pins = (0..len).map(|i| Pin::new(i as u8)).collect();
        Ok(Self { pins })
    }

    /// Build a map from an explicit board table.
    pub fn from_table(table: &[u8]) -> Result<Self> {
        if table.len() > MAX_MANIFOLD_PINS {
            return Err(Error::InvalidManifoldSize(table.len()));
        }
        let mut pins = heapless::Vec::new();
        for &number in table {
            let pin = Pin::new(number);
            if pins.contains(&pin) {
                return Err(Error::PinConflict(pin));
            }
            // Capacity checked above.
            let _ = pins.push(pin);
        }
        Ok(Self { pins })
    }

    pub fn get(&self, index: usize) -> Option<Pin> {
        self.pins.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Pin> + '_ {
        self.pins.iter().copied()
    }
}
