//! Switchable device drivers.
//!
//! Every controllable binary device implements [`Switchable`]: command a
//! state, read the current state back, toggle.  Variants:
//!
//! | Driver   | Readback check | Backing                         |
//! |----------|----------------|---------------------------------|
//! | `Switch` | yes            | [`Board`](crate::app::ports::Board) line |
//! | `Pump`   | yes            | a `Switch`                      |
//! | `Valve`  | no             | logical state, type policy      |

pub mod pump;
pub mod switch;
pub mod valve;

use log::debug;

use crate::error::Result;
use crate::pins::Pin;

/// Capability contract of a controllable binary device.
pub trait Switchable {
    fn name(&self) -> &str;

    fn pin(&self) -> Pin;

    /// Command the device to `state`.
    ///
    /// Always succeeds at this level and issues exactly one board command.
    /// A failed write shows up on the next [`value`](Self::value).
    fn set(&mut self, state: bool);

    /// Current logical state.  Board-backed devices verify it against the
    /// physical line and fail with a switching error on divergence.
    fn value(&self) -> Result<bool>;

    /// Number of `set` commands issued since construction.
    fn switch_count(&self) -> u32;

    /// Flip the device.  Returns the new state.
    fn toggle(&mut self) -> Result<bool> {
        let next = !self.value()?;
        self.set(next);
        debug!("Toggled {} ({}) -> {}", self.name(), self.pin(), next);
        Ok(next)
    }
}

impl<D: Switchable + ?Sized> Switchable for Box<D> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn pin(&self) -> Pin {
        (**self).pin()
    }

    fn set(&mut self, state: bool) {
        (**self).set(state);
    }

    fn value(&self) -> Result<bool> {
        (**self).value()
    }

    fn switch_count(&self) -> u32 {
        (**self).switch_count()
    }

    fn toggle(&mut self) -> Result<bool> {
        (**self).toggle()
    }
}
