//! Blocking delay for host and Linux controller builds.
//!
//! Implements [`DelayNs`] on top of `std::thread::sleep`, so the periodic
//! toggler can be driven by any `embedded-hal` delay provider and tests can
//! substitute a non-sleeping one.

use std::time::Duration;

use embedded_hal::delay::DelayNs;

#[derive(Debug, Clone, Copy, Default)]
pub struct StdDelay;

impl StdDelay {
    pub fn new() -> Self {
        Self
    }
}

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_us(&mut self, us: u32) {
        std::thread::sleep(Duration::from_micros(u64::from(us)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

/// Block for `interval` using `delay`, splitting it into chunks the
/// `DelayNs` API can express.
pub fn pause(delay: &mut impl DelayNs, interval: Duration) {
    let mut remaining_ms = interval.as_millis();
    while remaining_ms > 0 {
        let chunk = remaining_ms.min(u128::from(u32::MAX));
        delay.delay_ms(chunk as u32);
        remaining_ms -= chunk;
    }
    let sub_ms_ns = interval.subsec_nanos() % 1_000_000;
    if sub_ms_ns > 0 {
        delay.delay_ns(sub_ms_ns);
    }
}
