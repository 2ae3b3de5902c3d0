//! Fluidics hardware abstraction layer.
//!
//! Drives binary-state devices (valves, pumps, switches) grouped into
//! fixed-size manifolds that route reagents through the synthesis
//! instrument.  Pin access goes through the [`Board`](app::ports::Board)
//! port; nothing in this crate assumes a particular controller.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod manifold;
pub mod pins;
pub mod toggler;

pub use app::ports::{Board, EventSink};
pub use drivers::Switchable;
pub use error::{Error, Result};
pub use manifold::Manifold;
