//! Pump driver.
//!
//! A pump is a board-verified [`Switch`] with run/stop vocabulary.  The
//! readback check is inherited: a pump that was commanded on but whose
//! line reads low fails the next `value()` / `is_running()`.

use std::sync::Arc;

use log::info;

use crate::app::ports::{Board, SharedSink};
use crate::drivers::switch::Switch;
use crate::drivers::Switchable;
use crate::error::Result;
use crate::pins::Pin;

pub struct Pump<B: ?Sized> {
    switch: Switch<B>,
}

impl<B: Board + ?Sized> Pump<B> {
    pub fn new(name: impl Into<String>, pin: Pin, board: Arc<B>) -> Self {
        Self {
            switch: Switch::new(name, pin, board),
        }
    }

    pub fn with_sink(self, sink: SharedSink) -> Self {
        Self {
            switch: self.switch.with_sink(sink),
        }
    }

    pub fn on(&mut self) {
        self.set(true);
    }

    pub fn off(&mut self) {
        self.set(false);
    }

    /// Verified run state.
    pub fn is_running(&self) -> Result<bool> {
        self.switch.value()
    }
}

impl<B: Board + ?Sized> Switchable for Pump<B> {
    fn name(&self) -> &str {
        self.switch.name()
    }

    fn pin(&self) -> Pin {
        self.switch.pin()
    }

    fn set(&mut self, state: bool) {
        self.switch.set(state);
        if state {
            info!("Starting pump {} on {}", self.name(), self.pin());
        } else {
            info!("Stopping pump {} on {}", self.name(), self.pin());
        }
    }

    fn value(&self) -> Result<bool> {
        self.switch.value()
    }

    fn switch_count(&self) -> u32 {
        self.switch.switch_count()
    }
}
