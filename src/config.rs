//! System configuration parameters
//!
//! All tunable parameters for the Presstat monitor. These are build-time
//! constants — the only value that changes in the field is the pressure
//! threshold, which lives in NVS (see `app::threshold`).

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Control loop ---
    /// Outer control cycle period (milliseconds)
    pub cycle_period_ms: u32,

    // --- Activation debounce ---
    /// Consecutive above-threshold cycles required after first detection
    /// before the relay is asserted
    pub sense_debounce_depth: u8,

    // --- Button gestures ---
    /// Hold iterations to enter calibration mode from normal mode
    pub entry_hold_iterations: u16,
    /// Hold iterations to commit a calibration while in calibration mode
    pub commit_hold_iterations: u16,
    /// Per-iteration pacing of the hold-detection poll loop (milliseconds)
    pub gesture_poll_interval_ms: u32,

    // --- Indicator ---
    /// Indicator pulse width (milliseconds)
    pub indicator_pulse_ms: u32,
    /// Indicator low phase after the pulse (milliseconds)
    pub indicator_blink_ms: u32,

    // --- Sensor ---
    /// Full-scale raw reading of the pressure transducer (10-bit ADC)
    pub sensor_full_scale: u16,

    // --- Telemetry ---
    /// Control cycles between telemetry log lines
    pub telemetry_interval_cycles: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Control loop
            cycle_period_ms: 500,

            // Activation debounce
            sense_debounce_depth: 10,

            // Button gestures
            entry_hold_iterations: 1000,
            commit_hold_iterations: 500,
            gesture_poll_interval_ms: 1,

            // Indicator
            indicator_pulse_ms: 10,
            indicator_blink_ms: 500,

            // Sensor
            sensor_full_scale: 1023,

            // Telemetry
            telemetry_interval_cycles: 60,
        }
    }
}
