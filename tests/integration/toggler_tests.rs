//! Integration tests for the periodic toggler on real sleeps and threads.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::mock_hw::{MockBoard, RecordingSink};

use fluidics::app::events::DeviceEvent;
use fluidics::app::ports::SharedSink;
use fluidics::drivers::Switchable;
use fluidics::drivers::switch::Switch;
use fluidics::drivers::valve::Valve;
use fluidics::error::{Error, PreconditionError};
use fluidics::pins::Pin;
use fluidics::toggler::{PeriodicToggler, ToggleOutcome, periodic_toggle, spawn_toggler};

#[test]
fn bounded_toggle_runs_count_cycles_at_interval() {
    let mut valve = Valve::normally_closed("Reagent 0", Pin::new(0));
    let before = valve.switch_count();
    let start = Instant::now();

    let report = periodic_toggle(&mut valve, Duration::from_millis(10), false, 3).unwrap();

    assert_eq!(report.toggles, 3);
    assert!(report.is_completed());
    assert_eq!(valve.switch_count(), before + 3);
    assert!(start.elapsed() >= Duration::from_millis(30));
}

#[test]
fn zero_interval_performs_no_toggles() {
    let mut valve = Valve::normally_open("Waste", Pin::new(1));
    assert_eq!(
        periodic_toggle(&mut valve, Duration::ZERO, true, 0),
        Err(Error::Precondition(PreconditionError::ZeroInterval))
    );
    assert_eq!(valve.switch_count(), 0);
    assert_eq!(valve.value(), Ok(true));
}

#[test]
fn zero_count_performs_no_toggles() {
    let mut valve = Valve::normally_open("Waste", Pin::new(1));
    assert!(periodic_toggle(&mut valve, Duration::from_millis(1), false, 0).is_err());
    assert_eq!(valve.switch_count(), 0);
}

#[test]
fn hosted_toggler_returns_device() {
    let board = Arc::new(MockBoard::new());
    let sink = Arc::new(RecordingSink::new());
    let shared: SharedSink = sink.clone();
    let sw = Switch::new("Gas 0", Pin::new(6), Arc::clone(&board)).with_sink(Arc::clone(&shared));
    let toggler = PeriodicToggler::times(Duration::from_millis(2), 4).unwrap();

    let (sw, report) = spawn_toggler("toggle-gas", sw, toggler, shared)
        .unwrap()
        .join()
        .unwrap();

    assert_eq!(report.unwrap().toggles, 4);
    assert_eq!(sw.switch_count(), 4);
    assert_eq!(sw.value(), Ok(false));
    assert!(matches!(
        sink.events().last(),
        Some(DeviceEvent::TogglerStopped { toggles: 4, fault: None, .. })
    ));
}

#[test]
fn hosted_toggler_stops_on_stuck_line() {
    let board = Arc::new(MockBoard::new());
    board.stick(Pin::new(6), false);
    let sink = Arc::new(RecordingSink::new());
    let shared: SharedSink = sink.clone();
    let sw = Switch::new("Gas 0", Pin::new(6), Arc::clone(&board)).with_sink(Arc::clone(&shared));
    let toggler = PeriodicToggler::forever(Duration::from_millis(1)).unwrap();

    let (sw, report) = spawn_toggler("toggle-stuck", sw, toggler, shared)
        .unwrap()
        .join()
        .unwrap();

    let report = report.unwrap();
    assert_eq!(report.toggles, 1);
    assert!(matches!(report.outcome, ToggleOutcome::Stopped(_)));
    assert!(sw.cached_state(), "commanded state is kept after the fault");
    assert!(matches!(
        sink.events().last(),
        Some(DeviceEvent::TogglerStopped { fault: Some(_), .. })
    ));
}
