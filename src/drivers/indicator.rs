//! Indicator LED driver and per-mode blink patterns.
//!
//! Two discrete LEDs report the operating mode:
//!
//! | Mode        | Status LED                  | Mode LED                    |
//! |-------------|-----------------------------|-----------------------------|
//! | Normal      | pulse, low phase, then hold | off                         |
//! | Calibration | held on                     | pulse, low phase, then hold |
//!
//! The pattern is generated by blocking writes with fixed delays inside
//! [`Indicator::tick`], called once at the top of every control cycle —
//! the delays are part of the cycle's timing, not a background task.
//! Purely cosmetic; no other component reads indicator state.

use embedded_hal::delay::DelayNs;

use crate::app::ports::ActuatorPort;
use crate::config::SystemConfig;
use crate::drivers::hw_init;
use crate::fsm::StateId;
use crate::pins;

// ---------------------------------------------------------------------------
// Blink pattern
// ---------------------------------------------------------------------------

/// Per-mode blink sequencer. Stateless between cycles; the waveform is
/// emitted in full on every tick.
pub struct Indicator {
    pulse_ms: u32,
    blink_ms: u32,
}

impl Indicator {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            pulse_ms: config.indicator_pulse_ms,
            blink_ms: config.indicator_blink_ms,
        }
    }

    /// Emit one cycle of the blink pattern for `mode`.
    pub fn tick(
        &self,
        mode: StateId,
        hw: &mut impl ActuatorPort,
        delay: &mut impl DelayNs,
    ) {
        match mode {
            StateId::Normal => {
                hw.set_status_led(true);
                delay.delay_ms(self.pulse_ms);
                hw.set_status_led(false);
                delay.delay_ms(self.blink_ms);
                hw.set_status_led(true);
            }
            StateId::Calibration => {
                hw.set_status_led(true);
                hw.set_mode_led(true);
                delay.delay_ms(self.pulse_ms);
                hw.set_mode_led(false);
                delay.delay_ms(self.blink_ms);
                hw.set_mode_led(true);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// LED line driver
// ---------------------------------------------------------------------------

/// Direct GPIO driver for the two indicator lines.
///
/// ## Dual-target design
///
/// On ESP-IDF: drives the real GPIOs via hw_init.
/// On host/test: tracks state in-memory only.
pub struct IndicatorLeds {
    status: bool,
    mode: bool,
}

impl IndicatorLeds {
    pub fn new() -> Self {
        Self {
            status: false,
            mode: false,
        }
    }

    pub fn set_status(&mut self, on: bool) {
        hw_init::gpio_write(pins::STATUS_LED_GPIO, on);
        self.status = on;
    }

    pub fn set_mode(&mut self, on: bool) {
        hw_init::gpio_write(pins::MODE_LED_GPIO, on);
        self.mode = on;
    }

    pub fn off(&mut self) {
        self.set_status(false);
        self.set_mode(false);
    }

    pub fn status_is_on(&self) -> bool {
        self.status
    }

    pub fn mode_is_on(&self) -> bool {
        self.mode
    }
}
