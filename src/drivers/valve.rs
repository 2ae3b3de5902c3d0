//! Policy-mapped binary valve.
//!
//! Two flow states (`OpenFlow` / `ClosedFlow`) mapped from the boolean
//! command.  The valve type fixes the rest position, which is also the
//! state the model assumes at construction.
//!
//! ## Readback
//!
//! A valve is a logical layer above its actuator and performs no board
//! readback: `value()` reports the commanded flow state.  Wrap a
//! [`Switch`](super::switch::Switch) when physical verification is needed.

use core::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::adapters::log_sink::LogEventSink;
use crate::app::events::DeviceEvent;
use crate::app::ports::SharedSink;
use crate::drivers::Switchable;
use crate::error::Result;
use crate::pins::Pin;

/// Rest position of a valve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValveType {
    NormallyOpen,
    NormallyClosed,
}

impl ValveType {
    /// Flow state when the actuator is at rest.
    pub const fn rest_state(self) -> ValveState {
        match self {
            Self::NormallyOpen => ValveState::OpenFlow,
            Self::NormallyClosed => ValveState::ClosedFlow,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValveState {
    OpenFlow,
    ClosedFlow,
}

impl ValveState {
    pub const fn from_command(open: bool) -> Self {
        if open { Self::OpenFlow } else { Self::ClosedFlow }
    }

    pub const fn is_open(self) -> bool {
        matches!(self, Self::OpenFlow)
    }
}

impl fmt::Display for ValveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenFlow => write!(f, "OPEN_FLOW"),
            Self::ClosedFlow => write!(f, "CLOSED_FLOW"),
        }
    }
}

pub struct Valve {
    name: String,
    pin: Pin,
    valve_type: ValveType,
    state: ValveState,
    switch_count: u32,
    sink: SharedSink,
}

impl Valve {
    pub fn new(name: impl Into<String>, pin: Pin, valve_type: ValveType) -> Self {
        Self {
            name: name.into(),
            pin,
            valve_type,
            state: valve_type.rest_state(),
            switch_count: 0,
            sink: Arc::new(LogEventSink::new()),
        }
    }

    pub fn normally_open(name: impl Into<String>, pin: Pin) -> Self {
        Self::new(name, pin, ValveType::NormallyOpen)
    }

    pub fn normally_closed(name: impl Into<String>, pin: Pin) -> Self {
        Self::new(name, pin, ValveType::NormallyClosed)
    }

    /// Replace the default log sink.
    pub fn with_sink(mut self, sink: SharedSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn open(&mut self) {
        self.set(true);
    }

    pub fn close(&mut self) {
        self.set(false);
    }

    pub fn state(&self) -> ValveState {
        self.state
    }

    pub fn valve_type(&self) -> ValveType {
        self.valve_type
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }
}

impl Switchable for Valve {
    fn name(&self) -> &str {
        &self.name
    }

    fn pin(&self) -> Pin {
        self.pin
    }

    fn set(&mut self, state: bool) {
        let from = self.state.is_open();
        self.state = ValveState::from_command(state);
        self.switch_count = self.switch_count.saturating_add(1);
        self.sink.emit(&DeviceEvent::StateChanged {
            device: self.name.clone(),
            pin: self.pin,
            from,
            to: state,
            switch_count: self.switch_count,
        });
    }

    fn value(&self) -> Result<bool> {
        Ok(self.state.is_open())
    }

    fn switch_count(&self) -> u32 {
        self.switch_count
    }
}

impl fmt::Display for Valve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.pin.number(), self.state.is_open())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_state_follows_type() {
        let nc = Valve::normally_closed("NC", Pin::new(0));
        assert_eq!(nc.state(), ValveState::ClosedFlow);
        assert_eq!(nc.value(), Ok(false));

        let no = Valve::normally_open("NO", Pin::new(1));
        assert_eq!(no.state(), ValveState::OpenFlow);
        assert_eq!(no.value(), Ok(true));
    }

    #[test]
    fn open_close_map_to_flow_states() {
        let mut v = Valve::normally_closed("reagent", Pin::new(5));
        v.open();
        assert_eq!(v.state(), ValveState::OpenFlow);
        v.close();
        assert_eq!(v.state(), ValveState::ClosedFlow);
        assert_eq!(v.switch_count(), 2);
    }

    #[test]
    fn toggle_counts_each_flip() {
        let mut v = Valve::normally_open("waste", Pin::new(2));
        assert_eq!(v.toggle(), Ok(false));
        assert_eq!(v.toggle(), Ok(true));
        assert_eq!(v.switch_count(), 2);
    }

    #[test]
    fn display_shows_pin_and_value() {
        let v = Valve::normally_open("x", Pin::new(7));
        assert_eq!(v.to_string(), "7[true]");
    }

    #[test]
    fn valve_type_serde_names() {
        let json = serde_json::to_string(&ValveType::NormallyClosed).unwrap();
        assert_eq!(json, "\"normally_closed\"");
    }
}
