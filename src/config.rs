//! Instrument configuration.
//!
//! Describes which manifolds exist, what kind of device sits in each slot,
//! which board pins they occupy, and how the periodic toggler is paced.
//! Loaded from JSON; every value is validated and rejected, never clamped.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::app::ports::{Board, SharedSink};
use crate::drivers::Switchable;
use crate::drivers::pump::Pump;
use crate::drivers::switch::Switch;
use crate::drivers::valve::{Valve, ValveType};
use crate::error::{ConfigError, Error, Result};
use crate::manifold::{Manifold, ManifoldSize};
use crate::pins::{Pin, PinMap};
use crate::toggler::PeriodicToggler;

/// Device kind populating every slot of a manifold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeviceKind {
    Valve { valve_type: ValveType },
    Switch,
    Pump,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifoldConfig {
    pub name: String,
    pub size: ManifoldSize,
    pub device: DeviceKind,
    /// Board pin per slot; slot `i` uses pin `i` when absent.
    #[serde(default)]
    pub pins: Option<Vec<u8>>,
}

impl ManifoldConfig {
    pub fn pin_map(&self) -> Result<PinMap> {
        match &self.pins {
            Some(table) => {
                if table.len() != self.size.get() {
                    return Err(ConfigError::PinCount {
                        expected: self.size.get(),
                        got: table.len(),
                    }
                    .into());
                }
                PinMap::from_table(table)
            }
            None => PinMap::sequential(self.size.get()),
        }
    }

    /// Construct the manifold described by this entry on `board`.
    pub fn build<B>(&self, board: &Arc<B>, sink: &SharedSink) -> Result<Manifold<Box<dyn Switchable + Send>>>
    where
        B: Board + Send + Sync + 'static,
    {
        let pins = self.pin_map()?;
        let prefix = &self.name;
        Manifold::with_pins(self.size.get(), &pins, |slot| -> Box<dyn Switchable + Send> {
            let name = format!("{prefix} {}", slot.index);
            match self.device {
                DeviceKind::Valve { valve_type } => {
                    Box::new(Valve::new(name, slot.pin, valve_type).with_sink(Arc::clone(sink)))
                }
                DeviceKind::Switch => Box::new(
                    Switch::new(name, slot.pin, Arc::clone(board)).with_sink(Arc::clone(sink)),
                ),
                DeviceKind::Pump => Box::new(
                    Pump::new(name, slot.pin, Arc::clone(board)).with_sink(Arc::clone(sink)),
                ),
            }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TogglerConfig {
    /// Interval between toggles (milliseconds).
    pub interval_ms: u64,
    /// Run until the host stops the thread; `count` is ignored.
    pub loop_forever: bool,
    /// Number of toggles for a bounded run.
    pub count: u32,
}

impl TogglerConfig {
    pub fn toggler(&self) -> Result<PeriodicToggler> {
        PeriodicToggler::new(
            Duration::from_millis(self.interval_ms),
            self.loop_forever,
            self.count,
        )
    }
}

impl Default for TogglerConfig {
    fn default() -> Self {
        Self {
            interval_ms: 500,
            loop_forever: false,
            count: 4,
        }
    }
}

/// Whole-instrument configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentConfig {
    pub manifolds: Vec<ManifoldConfig>,
    #[serde(default)]
    pub toggler: TogglerConfig,
}

impl Default for InstrumentConfig {
    fn default() -> Self {
        Self {
            manifolds: vec![ManifoldConfig {
                name: "Reagent".into(),
                size: ManifoldSize::EIGHT,
                device: DeviceKind::Valve {
                    valve_type: ValveType::NormallyClosed,
                },
                pins: None,
            }],
            toggler: TogglerConfig::default(),
        }
    }
}

impl InstrumentConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()).into())
    }

    /// Check pin tables, exclusive pin ownership across the instrument,
    /// and toggler preconditions.
    pub fn validate(&self) -> Result<()> {
        if self.manifolds.is_empty() {
            return Err(ConfigError::ValidationFailed("at least one manifold is required").into());
        }
        let mut names = HashSet::new();
        let mut claimed: HashSet<Pin> = HashSet::new();
        for manifold in &self.manifolds {
            if !names.insert(manifold.name.as_str()) {
                return Err(ConfigError::ValidationFailed("manifold names must be unique").into());
            }
            for pin in manifold.pin_map()?.iter() {
                if !claimed.insert(pin) {
                    return Err(Error::PinConflict(pin));
                }
            }
        }
        self.toggler.toggler()?;
        Ok(())
    }
}
