//! In-memory board for host testing and simulation.
//!
//! Every write is stored per pin; reads return the stored level.  Pins that
//! were never written read LOW.  [`SimulatedBoard::force`] changes a line
//! behind the devices' backs to reproduce stuck contacts and bus faults.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, warn};

use crate::app::ports::{Board, BoardError};
use crate::pins::Pin;

#[derive(Debug, Default)]
struct Lines {
    levels: HashMap<Pin, bool>,
    writes: u64,
}

#[derive(Debug, Default)]
pub struct SimulatedBoard {
    lines: Mutex<Lines>,
    /// `None` accepts any pin.
    wired: Option<HashSet<Pin>>,
}

impl SimulatedBoard {
    /// A board that accepts every pin.
    pub fn new() -> Self {
        Self::default()
    }

    /// A board with only `pins` wired; other pins fail to read.
    pub fn with_pins(pins: impl IntoIterator<Item = Pin>) -> Self {
        Self {
            lines: Mutex::default(),
            wired: Some(pins.into_iter().collect()),
        }
    }

    /// Overwrite a line level without going through a device.
    pub fn force(&self, pin: Pin, level: bool) {
        debug!("sim board: forcing {} to {}", pin, level);
        self.lock().levels.insert(pin, level);
    }

    /// Total `set` calls accepted so far.
    pub fn writes(&self) -> u64 {
        self.lock().writes
    }

    fn is_wired(&self, pin: Pin) -> bool {
        self.wired.as_ref().is_none_or(|w| w.contains(&pin))
    }

    fn lock(&self) -> MutexGuard<'_, Lines> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Board for SimulatedBoard {
    fn set(&self, pin: Pin, state: bool) {
        if !self.is_wired(pin) {
            warn!("sim board: write to unwired {} dropped", pin);
            return;
        }
        let mut lines = self.lock();
        lines.levels.insert(pin, state);
        lines.writes += 1;
    }

    fn value(&self, pin: Pin) -> Result<bool, BoardError> {
        if !self.is_wired(pin) {
            return Err(BoardError::UnknownPin(pin));
        }
        Ok(self.lock().levels.get(&pin).copied().unwrap_or(false))
    }
}
