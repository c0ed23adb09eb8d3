//! Relay output driver.
//!
//! Drives the relay coil transistor through a plain GPIO output
//! (active-high). The driver is a dumb actuator: the activation debounce
//! upstream decides when to energise.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the real GPIO via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    Released,
    Energised,
}

pub struct RelayDriver {
    state: RelayState,
}

impl RelayDriver {
    pub fn new() -> Self {
        Self {
            state: RelayState::Released,
        }
    }

    pub fn set(&mut self, on: bool) {
        hw_init::gpio_write(pins::RELAY_GPIO, on);
        self.state = if on {
            RelayState::Energised
        } else {
            RelayState::Released
        };
    }

    pub fn release(&mut self) {
        self.set(false);
    }

    pub fn state(&self) -> RelayState {
        self.state
    }

    pub fn is_energised(&self) -> bool {
        matches!(self.state, RelayState::Energised)
    }
}
