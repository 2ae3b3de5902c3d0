//! Periodic toggler.
//!
//! A blocking loop that owns one device and flips it at a fixed interval,
//! either a bounded number of times or until its hosting thread goes away.
//!
//! ```text
//!   ┌──────────┐   toggle    ┌────────┐   pause(interval)
//!   │  device  │ ◀────────── │  loop  │ ─────────────────┐
//!   └──────────┘             └────────┘ ◀────────────────┘
//! ```
//!
//! A switching error inside the loop ends it gracefully: the fault is
//! logged, reported to the sink, and returned in the [`ToggleReport`]
//! instead of propagating.  Any other error propagates unchanged.

use core::num::NonZeroU32;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use embedded_hal::delay::DelayNs;
use log::{debug, error, info};

use crate::adapters::delay::{StdDelay, pause};
use crate::adapters::log_sink::LogEventSink;
use crate::app::events::DeviceEvent;
use crate::app::ports::{EventSink, SharedSink};
use crate::drivers::Switchable;
use crate::error::{Error, PreconditionError, Result, SwitchingError};

/// How many cycles a toggler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleRuns {
    Forever,
    Count(NonZeroU32),
}

impl ToggleRuns {
    fn limit(self) -> Option<u32> {
        match self {
            Self::Forever => None,
            Self::Count(n) => Some(n.get()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Every requested cycle ran.
    Completed,
    /// The device failed its readback; the loop stopped.
    Stopped(SwitchingError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleReport {
    /// Successful toggles performed.
    pub toggles: u64,
    pub outcome: ToggleOutcome,
}

impl ToggleReport {
    pub fn is_completed(&self) -> bool {
        matches!(self.outcome, ToggleOutcome::Completed)
    }
}

/// Validated toggler parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodicToggler {
    interval: Duration,
    runs: ToggleRuns,
}

impl PeriodicToggler {
    /// `count` is ignored when `loop_forever` is set.
    pub fn new(interval: Duration, loop_forever: bool, count: u32) -> Result<Self> {
        if interval.is_zero() {
            return Err(PreconditionError::ZeroInterval.into());
        }
        let runs = if loop_forever {
            ToggleRuns::Forever
        } else {
            ToggleRuns::Count(NonZeroU32::new(count).ok_or(PreconditionError::ZeroCount)?)
        };
        Ok(Self { interval, runs })
    }

    pub fn forever(interval: Duration) -> Result<Self> {
        Self::new(interval, true, 0)
    }

    pub fn times(interval: Duration, count: u32) -> Result<Self> {
        Self::new(interval, false, count)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn runs(&self) -> ToggleRuns {
        self.runs
    }

    /// Run the loop on the calling thread.
    ///
    /// Each cycle toggles `device`, logs the resulting state, then blocks
    /// for the interval on `delay`.
    pub fn run<D: Switchable + ?Sized>(
        &self,
        device: &mut D,
        delay: &mut impl DelayNs,
        sink: &dyn EventSink,
    ) -> Result<ToggleReport> {
        let name = device.name().to_owned();
        sink.emit(&DeviceEvent::TogglerStarted {
            device: name.clone(),
            interval_ms: self.interval.as_millis() as u64,
            runs: self.runs.limit(),
        });

        let mut remaining = self.runs.limit();
        let mut toggles: u64 = 0;

        while remaining != Some(0) {
            match device.toggle() {
                Ok(state) => {
                    toggles += 1;
                    debug!("{} ({}) -> {}", name, device.pin(), state);
                }
                Err(Error::Switching(fault)) => {
                    error!("Toggler on {} stopped: {}", name, fault);
                    sink.emit(&DeviceEvent::TogglerStopped {
                        device: name,
                        toggles,
                        fault: Some(fault.clone()),
                    });
                    return Ok(ToggleReport {
                        toggles,
                        outcome: ToggleOutcome::Stopped(fault),
                    });
                }
                Err(other) => return Err(other),
            }
            if let Some(n) = remaining.as_mut() {
                *n -= 1;
            }
            pause(delay, self.interval);
        }

        sink.emit(&DeviceEvent::TogglerStopped {
            device: name,
            toggles,
            fault: None,
        });
        Ok(ToggleReport {
            toggles,
            outcome: ToggleOutcome::Completed,
        })
    }
}

/// Toggle `device` every `interval` on the calling thread, sleeping with
/// [`StdDelay`] and reporting through [`LogEventSink`].
pub fn periodic_toggle<D: Switchable + ?Sized>(
    device: &mut D,
    interval: Duration,
    loop_forever: bool,
    count: u32,
) -> Result<ToggleReport> {
    PeriodicToggler::new(interval, loop_forever, count)?.run(
        device,
        &mut StdDelay::new(),
        &LogEventSink::new(),
    )
}

/// Host a toggler on a dedicated named thread.
///
/// The thread owns `device` for the duration of the loop and hands it back
/// through the join handle together with the result.
pub fn spawn_toggler<D>(
    name: &str,
    mut device: D,
    toggler: PeriodicToggler,
    sink: SharedSink,
) -> std::io::Result<JoinHandle<(D, Result<ToggleReport>)>>
where
    D: Switchable + Send + 'static,
{
    info!(
        "Spawning toggler '{}' for {} every {:?}",
        name,
        device.name(),
        toggler.interval()
    );
    std::thread::Builder::new()
        .name(name.into())
        .spawn(move || {
            let result = toggler.run(&mut device, &mut StdDelay::new(), sink.as_ref());
            (device, result)
        })
}

/// Convenience for callers holding no sink of their own.
pub fn log_sink() -> SharedSink {
    Arc::new(LogEventSink::new())
}
