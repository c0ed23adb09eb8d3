//! Operator button driver and long-press hold detection.
//!
//! ## Hardware
//!
//! Active-low momentary switch with external pull-up, read by level from
//! the control loop — no interrupts. The logic never drives a mode change
//! off a bounce: a transition requires the line to stay asserted for the
//! full configured iteration count.
//!
//! ## Hold detection
//!
//! [`HoldDetector`] counts consecutive poll iterations with the button
//! held. The pure [`step`](HoldDetector::step) form advances one
//! iteration at a time (unit-testable); the blocking
//! [`detect_hold`](HoldDetector::detect_hold) form polls the button port
//! with a fixed per-iteration delay until the count is reached or the
//! button releases. It returns at the iteration the count is reached —
//! the caller decides how to treat the still-held line (the service
//! latches the gesture until release so one press yields one gesture).

use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::delay::DelayNs;

use crate::app::ports::ButtonPort;
#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

/// Host-side injection point: simulated button level (true = pressed).
static SIM_BUTTON_PRESSED: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_pressed(pressed: bool) {
    SIM_BUTTON_PRESSED.store(pressed, Ordering::Relaxed);
}

// ---------------------------------------------------------------------------
// Level driver
// ---------------------------------------------------------------------------

/// Level-read driver for the active-low operator button.
pub struct ButtonDriver {
    gpio: i32,
}

impl ButtonDriver {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    /// GPIO pin this button is attached to.
    pub fn gpio(&self) -> i32 {
        self.gpio
    }

    /// True while the button is held (line low).
    #[cfg(target_os = "espidf")]
    pub fn is_pressed(&self) -> bool {
        !hw_init::gpio_read(self.gpio)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn is_pressed(&self) -> bool {
        SIM_BUTTON_PRESSED.load(Ordering::Relaxed)
    }
}

// ---------------------------------------------------------------------------
// Hold detection
// ---------------------------------------------------------------------------

/// Outcome of a single hold-poll iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldProgress {
    /// Button released before the count was reached; counter discarded.
    Released,
    /// Button still held, count not yet reached.
    Counting,
    /// Count reached this iteration.
    Reached,
}

/// Counts consecutive held iterations up to a configured target.
pub struct HoldDetector {
    count: u16,
}

impl HoldDetector {
    pub fn new() -> Self {
        Self { count: 0 }
    }

    /// Advance one poll iteration.
    ///
    /// The counter saturates at `target`, so `Reached` is reported on the
    /// target-th held iteration and on every held iteration after it.
    pub fn step(&mut self, pressed: bool, target: u16) -> HoldProgress {
        if !pressed {
            self.count = 0;
            return HoldProgress::Released;
        }
        self.count = self.count.saturating_add(1).min(target);
        if self.count >= target {
            HoldProgress::Reached
        } else {
            HoldProgress::Counting
        }
    }

    /// Blocking hold poll: spin on the button line, one iteration per
    /// `poll_interval_ms`, until the count reaches `target` (→ `true`)
    /// or the button releases first (→ `false`).
    ///
    /// The counter is reset at the start of every poll.
    pub fn detect_hold(
        &mut self,
        button: &mut impl ButtonPort,
        delay: &mut impl DelayNs,
        target: u16,
        poll_interval_ms: u32,
    ) -> bool {
        self.count = 0;
        loop {
            match self.step(button.is_pressed(), target) {
                HoldProgress::Released => return false,
                HoldProgress::Reached => return true,
                HoldProgress::Counting => delay.delay_ms(poll_interval_ms),
            }
        }
    }

    /// Iterations counted in the poll currently in progress.
    pub fn count(&self) -> u16 {
        self.count
    }
}
