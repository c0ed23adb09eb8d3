//! GPIO / peripheral pin assignments for the Presstat main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers. Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Pressure transducer — Analog (ADC1)
// ---------------------------------------------------------------------------

/// Ratiometric pressure transducer — analog voltage via resistive divider.
/// ADC1 channel 4 (GPIO 5 on ESP32-S3).
pub const PRESSURE_ADC_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Relay output
// ---------------------------------------------------------------------------

/// Digital output driving the relay coil transistor (active HIGH).
pub const RELAY_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Indicator LEDs
// ---------------------------------------------------------------------------

/// Run/status LED — pulses once per control cycle in normal mode.
pub const STATUS_LED_GPIO: i32 = 11;
/// Mode LED — held while in calibration mode, pulses per cycle there.
pub const MODE_LED_GPIO: i32 = 12;

// ---------------------------------------------------------------------------
// Operator button (active-low with external pull-up)
// ---------------------------------------------------------------------------

/// Momentary push-button for calibration gestures. Pressed = logic LOW.
pub const BUTTON_GPIO: i32 = 16;
