//! Mock board and event sink for integration tests.
//!
//! Records every board call so tests can assert on the full command
//! history without touching real GPIO registers.

use std::collections::HashMap;
use std::sync::Mutex;

use fluidics::app::events::DeviceEvent;
use fluidics::app::ports::{Board, BoardError, EventSink};
use fluidics::pins::Pin;

// ── Board call record ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardCall {
    Set { pin: Pin, state: bool },
    Read { pin: Pin },
}

// ── MockBoard ─────────────────────────────────────────────────

/// Board whose lines can be stuck at a level regardless of writes.
#[derive(Default)]
pub struct MockBoard {
    levels: Mutex<HashMap<Pin, bool>>,
    stuck: Mutex<HashMap<Pin, bool>>,
    pub calls: Mutex<Vec<BoardCall>>,
}

#[allow(dead_code)]
impl MockBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin `pin` at `level` until released.
    pub fn stick(&self, pin: Pin, level: bool) {
        self.stuck.lock().unwrap().insert(pin, level);
    }

    pub fn release(&self, pin: Pin) {
        self.stuck.lock().unwrap().remove(&pin);
    }

    pub fn calls(&self) -> Vec<BoardCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<(Pin, bool)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                BoardCall::Set { pin, state } => Some((pin, state)),
                BoardCall::Read { .. } => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl Board for MockBoard {
    fn set(&self, pin: Pin, state: bool) {
        self.calls.lock().unwrap().push(BoardCall::Set { pin, state });
        self.levels.lock().unwrap().insert(pin, state);
    }

    fn value(&self, pin: Pin) -> Result<bool, BoardError> {
        self.calls.lock().unwrap().push(BoardCall::Read { pin });
        if let Some(level) = self.stuck.lock().unwrap().get(&pin) {
            return Ok(*level);
        }
        Ok(self.levels.lock().unwrap().get(&pin).copied().unwrap_or(false))
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<DeviceEvent>>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DeviceEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: &DeviceEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
