//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the pressure sensor, button, relay, and indicator drivers,
//! exposing them through [`SensorPort`], [`ButtonPort`], and
//! [`ActuatorPort`]. This is the only module in the system that touches
//! actual hardware. On non-espidf targets, the underlying drivers use
//! cfg-gated simulation stubs.

use crate::app::ports::{ActuatorPort, ButtonPort, SensorPort};
use crate::drivers::button::ButtonDriver;
use crate::drivers::indicator::IndicatorLeds;
use crate::drivers::relay::RelayDriver;
use crate::error::SensorError;
use crate::sensors::pressure::PressureSensor;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    pressure: PressureSensor,
    button: ButtonDriver,
    relay: RelayDriver,
    leds: IndicatorLeds,
}

impl HardwareAdapter {
    pub fn new(
        pressure: PressureSensor,
        button: ButtonDriver,
        relay: RelayDriver,
        leds: IndicatorLeds,
    ) -> Self {
        Self {
            pressure,
            button,
            relay,
            leds,
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_pressure(&mut self) -> Result<u16, SensorError> {
        self.pressure.read()
    }
}

// ── ButtonPort implementation ─────────────────────────────────

impl ButtonPort for HardwareAdapter {
    fn is_pressed(&mut self) -> bool {
        self.button.is_pressed()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_relay(&mut self, on: bool) {
        self.relay.set(on);
    }

    fn set_status_led(&mut self, on: bool) {
        self.leds.set_status(on);
    }

    fn set_mode_led(&mut self, on: bool) {
        self.leds.set_mode(on);
    }

    fn relay_is_on(&self) -> bool {
        self.relay.is_energised()
    }

    fn all_off(&mut self) {
        self.relay.release();
        self.leds.off();
    }
}
