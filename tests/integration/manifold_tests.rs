//! Integration tests for manifold operations against a recording board.

use std::sync::Arc;

use crate::mock_hw::{BoardCall, MockBoard, RecordingSink};

use fluidics::app::events::DeviceEvent;
use fluidics::app::ports::SharedSink;
use fluidics::drivers::Switchable;
use fluidics::drivers::switch::Switch;
use fluidics::error::{DesyncCause, Error};
use fluidics::manifold::Manifold;
use fluidics::pins::Pin;

fn make_manifold(size: usize) -> (Manifold<Switch<MockBoard>>, Arc<MockBoard>, Arc<RecordingSink>) {
    let board = Arc::new(MockBoard::new());
    let sink = Arc::new(RecordingSink::new());
    let shared: SharedSink = sink.clone();
    let manifold = Manifold::new(size, |slot| {
        Switch::new(slot.name, slot.pin, Arc::clone(&board)).with_sink(Arc::clone(&shared))
    })
    .unwrap();
    (manifold, board, sink)
}

// ── One-hot selection ─────────────────────────────────────────

#[test]
fn one_hot_closes_others_before_opening_target() {
    let (mut m, board, _sink) = make_manifold(8);
    m.set_all(true);
    board.clear_calls();

    m.set_one_hot(5).unwrap();

    let writes = board.writes();
    assert_eq!(writes.len(), 8, "exactly one command per device");
    assert_eq!(writes.last(), Some(&(Pin::new(5), true)));
    assert!(
        writes[..7].iter().all(|(_, state)| !state),
        "no line may be opened before the others are closed: {:?}",
        writes
    );
    let values = m.values().unwrap();
    for (i, v) in values.iter().enumerate() {
        assert_eq!(*v, i == 5);
    }
}

#[test]
fn one_hot_out_of_range_touches_nothing() {
    let (mut m, board, sink) = make_manifold(4);
    assert_eq!(
        m.set_one_hot(4),
        Err(Error::IndexOutOfRange { index: 4, size: 4 })
    );
    assert!(board.calls().is_empty());
    assert!(sink.events().is_empty());
}

#[test]
fn value_out_of_range_has_no_side_effect() {
    let (m, board, sink) = make_manifold(10);
    assert!(m.value(10).is_err());
    assert!(board.calls().is_empty());
    assert!(sink.events().is_empty());
}

// ── Events ────────────────────────────────────────────────────

#[test]
fn set_emits_structured_state_change() {
    let (mut m, _board, sink) = make_manifold(4);
    m.set(2, true).unwrap();
    m.set(2, false).unwrap();

    assert_eq!(
        sink.events(),
        vec![
            DeviceEvent::StateChanged {
                device: "Switch 2".into(),
                pin: Pin::new(2),
                from: false,
                to: true,
                switch_count: 1,
            },
            DeviceEvent::StateChanged {
                device: "Switch 2".into(),
                pin: Pin::new(2),
                from: true,
                to: false,
                switch_count: 2,
            },
        ]
    );
}

#[test]
fn stuck_line_reports_desync_event() {
    let (mut m, board, sink) = make_manifold(4);
    board.stick(Pin::new(1), false);
    m.set(1, true).unwrap();

    match m.value(1) {
        Err(Error::Switching(e)) => assert_eq!(
            e.cause,
            DesyncCause::Mismatch {
                commanded: true,
                observed: false
            }
        ),
        other => panic!("expected desync, got {:?}", other),
    }
    assert!(matches!(
        sink.events().last(),
        Some(DeviceEvent::Desync(e)) if e.pin == Pin::new(1)
    ));
}

// ── Bulk operations ───────────────────────────────────────────

#[test]
fn set_all_is_not_atomic_across_devices() {
    let (mut m, board, _sink) = make_manifold(4);
    board.stick(Pin::new(2), false);
    m.set_all(true);

    assert_eq!(m.value(0), Ok(true));
    assert_eq!(m.value(1), Ok(true));
    assert!(m.value(2).is_err());
    assert_eq!(m.value(3), Ok(true));
    assert!(m.values().is_err());
}

#[test]
fn toggle_all_recovers_after_line_released() {
    let (mut m, board, _sink) = make_manifold(4);
    m.set_all(false);
    board.stick(Pin::new(0), true);
    assert!(m.toggle_all().is_err());
    assert_eq!(m.device(1).unwrap().switch_count(), 1, "later devices untouched");

    board.release(Pin::new(0));
    m.toggle_all().unwrap();
    assert_eq!(m.values().unwrap(), vec![true; 4]);
}

#[test]
fn reads_go_to_the_board() {
    let (mut m, board, _sink) = make_manifold(4);
    m.set(3, true).unwrap();
    board.clear_calls();
    assert_eq!(m.value(3), Ok(true));
    assert_eq!(board.calls(), vec![BoardCall::Read { pin: Pin::new(3) }]);
}
