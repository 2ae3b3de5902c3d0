//! Port boundary of the fluidics core.
//!
//! Devices, manifolds and the periodic toggler only ever talk to the
//! outside world through the traits in [`ports`]: the [`Board`](ports::Board)
//! capability for pin access and the [`EventSink`](ports::EventSink) for
//! structured state reports.  Concrete implementations live in
//! [`crate::adapters`].

pub mod events;
pub mod ports;
