//! `embedded-hal` board adapter.
//!
//! Wraps a set of [`StatefulOutputPin`]s, one per [`Pin`] identity, behind
//! the [`Board`] port.  Each line sits in its own mutex so a board shared
//! between threads still has a single writer per pin at any instant.
//!
//! Reads use `is_set_high()`, i.e. the driver's view of the output latch.
//! A write the driver rejected leaves the latch unchanged, so the next
//! verified read reports the divergence.

use std::sync::{Mutex, PoisonError};

use embedded_hal::digital::{Error as _, PinState, StatefulOutputPin};
use log::{error, warn};

use crate::app::ports::{Board, BoardError};
use crate::error::{Error, Result};
use crate::pins::Pin;

pub struct GpioBoard<P> {
    lines: Vec<(Pin, Mutex<P>)>,
}

impl<P: StatefulOutputPin> GpioBoard<P> {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Wire `line` as `pin`.  Each identity may be attached once.
    pub fn attach(&mut self, pin: Pin, line: P) -> Result<()> {
        if self.line(pin).is_some() {
            return Err(Error::PinConflict(pin));
        }
        self.lines.push((pin, Mutex::new(line)));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line(&self, pin: Pin) -> Option<&Mutex<P>> {
        self.lines.iter().find(|(p, _)| *p == pin).map(|(_, l)| l)
    }
}

impl<P: StatefulOutputPin> Default for GpioBoard<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: StatefulOutputPin> Board for GpioBoard<P> {
    fn set(&self, pin: Pin, state: bool) {
        let Some(line) = self.line(pin) else {
            warn!("gpio board: write to unwired {} dropped", pin);
            return;
        };
        let mut line = line.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = line.set_state(PinState::from(state)) {
            error!("gpio board: {} write failed: {:?}", pin, e.kind());
        }
    }

    fn value(&self, pin: Pin) -> core::result::Result<bool, BoardError> {
        let line = self.line(pin).ok_or(BoardError::UnknownPin(pin))?;
        let mut line = line.lock().unwrap_or_else(PoisonError::into_inner);
        line.is_set_high().map_err(|e| {
            error!("gpio board: {} read failed: {:?}", pin, e.kind());
            BoardError::IoError
        })
    }
}
