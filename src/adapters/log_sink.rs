//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured device events to the
//! `log` facade.  The host binary routes these to stderr; the scheduling
//! layer can plug its own sink instead.

use log::{error, info, warn};

use crate::app::events::DeviceEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`DeviceEvent`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&self, event: &DeviceEvent) {
        match event {
            DeviceEvent::StateChanged {
                device,
                pin,
                from,
                to,
                switch_count,
            } => {
                info!(
                    "SWITCH | {} ({}) {} -> {} | count={}",
                    device, pin, from, to, switch_count
                );
            }
            DeviceEvent::Desync(e) => {
                warn!("DESYNC | {}", e);
            }
            DeviceEvent::TogglerStarted {
                device,
                interval_ms,
                runs,
            } => match runs {
                Some(n) => info!("TOGGLE | {} every {}ms, {} times", device, interval_ms, n),
                None => info!("TOGGLE | {} every {}ms, forever", device, interval_ms),
            },
            DeviceEvent::TogglerStopped {
                device,
                toggles,
                fault: None,
            } => {
                info!("TOGGLE | {} done after {} toggles", device, toggles);
            }
            DeviceEvent::TogglerStopped {
                device,
                toggles,
                fault: Some(e),
            } => {
                error!("TOGGLE | {} stopped after {} toggles: {}", device, toggles, e);
            }
        }
    }
}
