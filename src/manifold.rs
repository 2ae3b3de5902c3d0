//! Fixed-size manifolds of switchable devices.
//!
//! A manifold owns an ordered group of devices, indexed `0..size`, that
//! control parallel fluid lines (reagent inlets, waste outlets, gas lines).
//! Its size is validated once at construction and never changes.
//!
//! ## Bulk operations
//!
//! `set_all` and `toggle_all` command devices one at a time in index
//! order.  There is no atomicity across devices: a failure partway through
//! leaves a mixed state that the caller observes through `value()`.
//!
//! ## One-hot selection
//!
//! `set_one_hot` selects exactly one line.  It closes every other device
//! first (ascending index) and opens the target last, so two lines are
//! never commanded open at the same time during the transition.

use core::fmt;
use std::sync::Arc;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::app::ports::Board;
use crate::drivers::Switchable;
use crate::drivers::switch::Switch;
use crate::drivers::valve::{Valve, ValveType};
use crate::error::{ConfigError, Error, Result};
use crate::pins::{Pin, PinMap};

/// Manifold sizes the instrument supports.
pub const VALID_SIZES: [usize; 5] = [4, 8, 10, 16, 20];

/// A manifold size from [`VALID_SIZES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct ManifoldSize(usize);

impl ManifoldSize {
    pub const FOUR: Self = Self(4);
    pub const EIGHT: Self = Self(8);
    pub const TEN: Self = Self(10);
    pub const SIXTEEN: Self = Self(16);
    pub const TWENTY: Self = Self(20);

    pub fn new(size: usize) -> Result<Self> {
        if VALID_SIZES.contains(&size) {
            Ok(Self(size))
        } else {
            Err(Error::InvalidManifoldSize(size))
        }
    }

    pub const fn get(self) -> usize {
        self.0
    }
}

impl TryFrom<usize> for ManifoldSize {
    type Error = Error;

    fn try_from(size: usize) -> Result<Self> {
        Self::new(size)
    }
}

impl From<ManifoldSize> for usize {
    fn from(size: ManifoldSize) -> Self {
        size.0
    }
}

impl fmt::Display for ManifoldSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Construction parameters handed to the device factory for each slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub index: usize,
    pub pin: Pin,
    pub name: String,
}

pub struct Manifold<D> {
    size: ManifoldSize,
    devices: Vec<D>,
}

impl<D: Switchable> Manifold<D> {
    /// Build `size` devices, slot `i` on pin `i` named `"Switch i"`.
    pub fn new(size: usize, factory: impl FnMut(Slot) -> D) -> Result<Self> {
        let size = ManifoldSize::new(size)?;
        let pins = PinMap::sequential(size.get())?;
        Ok(Self::build(size, &pins, factory))
    }

    /// Build `size` devices on an explicit pin enumeration.
    pub fn with_pins(size: usize, pins: &PinMap, factory: impl FnMut(Slot) -> D) -> Result<Self> {
        let size = ManifoldSize::new(size)?;
        if pins.len() != size.get() {
            return Err(ConfigError::PinCount {
                expected: size.get(),
                got: pins.len(),
            }
            .into());
        }
        Ok(Self::build(size, pins, factory))
    }

    fn build(size: ManifoldSize, pins: &PinMap, mut factory: impl FnMut(Slot) -> D) -> Self {
        let devices = pins
            .iter()
            .enumerate()
            .map(|(index, pin)| {
                factory(Slot {
                    index,
                    pin,
                    name: format!("Switch {index}"),
                })
            })
            .collect();
        info!("Manifold: {} devices ready", size);
        Self { size, devices }
    }

    pub fn size(&self) -> usize {
        self.size.get()
    }

    fn check(&self, index: usize) -> Result<()> {
        if index < self.size() {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index,
                size: self.size(),
            })
        }
    }

    /// Set the device at `index` ON or OFF.
    pub fn set(&mut self, index: usize, state: bool) -> Result<()> {
        self.check(index)?;
        self.devices[index].set(state);
        Ok(())
    }

    /// Current value of the device at `index`.
    pub fn value(&self, index: usize) -> Result<bool> {
        self.check(index)?;
        self.devices[index].value()
    }

    pub fn device(&self, index: usize) -> Result<&D> {
        self.check(index)?;
        Ok(&self.devices[index])
    }

    pub fn device_mut(&mut self, index: usize) -> Result<&mut D> {
        self.check(index)?;
        Ok(&mut self.devices[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &D> {
        self.devices.iter()
    }

    /// Values of every device in index order; the first failure propagates.
    pub fn values(&self) -> Result<Vec<bool>> {
        self.devices.iter().map(Switchable::value).collect()
    }

    /// Command every device to `state`.
    pub fn set_all(&mut self, state: bool) {
        debug!("Manifold: set all {} to {}", self.size, state);
        for device in &mut self.devices {
            device.set(state);
        }
    }

    /// Toggle every device.  Stops at the first device that fails its
    /// readback; earlier devices stay toggled.
    pub fn toggle_all(&mut self) -> Result<()> {
        debug!("Manifold: toggle all {}", self.size);
        for device in &mut self.devices {
            device.toggle()?;
        }
        Ok(())
    }

    /// Turn the device at `index` ON and every other device OFF.
    ///
    /// An out-of-range index is rejected before any device is touched.
    pub fn set_one_hot(&mut self, index: usize) -> Result<()> {
        self.check(index)?;
        for (i, device) in self.devices.iter_mut().enumerate() {
            if i != index {
                device.set(false);
            }
        }
        self.devices[index].set(true);
        debug!("Manifold: line {} selected", index);
        Ok(())
    }

    pub fn into_devices(self) -> Vec<D> {
        self.devices
    }
}

impl Manifold<Valve> {
    /// A manifold of valves of one type, each at its rest position.
    pub fn of_valves(size: usize, valve_type: ValveType) -> Result<Self> {
        Self::new(size, |slot| Valve::new(slot.name, slot.pin, valve_type))
    }
}

impl<B: Board + ?Sized> Manifold<Switch<B>> {
    /// A manifold of board-verified switches sharing `board`.
    pub fn of_switches(size: usize, board: &Arc<B>) -> Result<Self> {
        Self::new(size, |slot| Switch::new(slot.name, slot.pin, Arc::clone(board)))
    }
}

impl<D: Switchable + fmt::Display> fmt::Display for Manifold<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, device) in self.devices.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{device}")?;
        }
        write!(f, "]")
    }
}
