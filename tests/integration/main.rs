//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a subsystem against the
//! mock board and recording sink.  All tests run on the host with no real
//! hardware required.

mod manifold_tests;
mod mock_hw;
mod toggler_tests;
