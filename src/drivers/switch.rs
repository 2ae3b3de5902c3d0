//! Board-verified switch.
//!
//! Caches the last commanded level and cross-checks it against a fresh
//! board read on every [`value`](Switchable::value).  A mismatch means the
//! physical line diverged from the command (stuck contact, bus fault) and
//! is reported as a [`SwitchingError`]; the cached state is never repaired
//! from the readback.

use std::sync::Arc;

use crate::adapters::log_sink::LogEventSink;
use crate::app::events::DeviceEvent;
use crate::app::ports::{Board, SharedSink};
use crate::drivers::Switchable;
use crate::error::{DesyncCause, Result, SwitchingError};
use crate::pins::Pin;

pub struct Switch<B: ?Sized> {
    name: String,
    pin: Pin,
    board: Arc<B>,
    state: bool,
    switch_count: u32,
    sink: SharedSink,
}

impl<B: Board + ?Sized> Switch<B> {
    /// Bind a switch to `pin` on `board`.  The board is not touched until
    /// the first `set`; the cached state starts OFF.
    pub fn new(name: impl Into<String>, pin: Pin, board: Arc<B>) -> Self {
        Self {
            name: name.into(),
            pin,
            board,
            state: false,
            switch_count: 0,
            sink: Arc::new(LogEventSink::new()),
        }
    }

    /// Replace the default log sink.
    pub fn with_sink(mut self, sink: SharedSink) -> Self {
        self.sink = sink;
        self
    }

    /// Last commanded level, without consulting the board.
    pub fn cached_state(&self) -> bool {
        self.state
    }

    pub fn board(&self) -> &Arc<B> {
        &self.board
    }

    fn desync(&self, cause: DesyncCause) -> SwitchingError {
        let err = SwitchingError {
            device: self.name.clone(),
            pin: self.pin,
            cause,
        };
        self.sink.emit(&DeviceEvent::Desync(err.clone()));
        err
    }
}

impl<B: Board + ?Sized> Switchable for Switch<B> {
    fn name(&self) -> &str {
        &self.name
    }

    fn pin(&self) -> Pin {
        self.pin
    }

    fn set(&mut self, state: bool) {
        let from = self.state;
        self.state = state;
        self.switch_count = self.switch_count.saturating_add(1);
        self.board.set(self.pin, state);
        self.sink.emit(&DeviceEvent::StateChanged {
            device: self.name.clone(),
            pin: self.pin,
            from,
            to: state,
            switch_count: self.switch_count,
        });
    }

    fn value(&self) -> Result<bool> {
        match self.board.value(self.pin) {
            Ok(observed) if observed == self.state => Ok(self.state),
            Ok(observed) => Err(self
                .desync(DesyncCause::Mismatch {
                    commanded: self.state,
                    observed,
                })
                .into()),
            Err(e) => Err(self.desync(DesyncCause::ReadbackFailed(e)).into()),
        }
    }

    fn switch_count(&self) -> u32 {
        self.switch_count
    }
}
