//! Fuzz target: `InstrumentConfig` parsing
//!
//! Feeds arbitrary bytes to the JSON config loader and verifies:
//! - No panics under arbitrary input
//! - Any accepted config validates, and every manifold builds on a
//!   simulated board with exactly `size` devices
//!
//! cargo fuzz run fuzz_config

#![no_main]

use std::sync::Arc;

use fluidics::adapters::sim_board::SimulatedBoard;
use fluidics::config::InstrumentConfig;
use fluidics::toggler::log_sink;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    let Ok(config) = InstrumentConfig::from_json(text) else {
        return;
    };

    assert!(config.validate().is_ok(), "accepted config must validate");

    let board = Arc::new(SimulatedBoard::new());
    let sink = log_sink();
    for entry in &config.manifolds {
        let manifold = entry
            .build(&board, &sink)
            .expect("validated manifold must build");
        assert_eq!(manifold.size(), entry.size.get());
        assert_eq!(manifold.iter().count(), entry.size.get());
    }
});
