//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to. It carries the per-cycle inputs (pressure sample, gesture
//! outcome), the cached threshold, the activation debounce state, and the
//! output commands the service applies after each tick.

use crate::config::SystemConfig;
use crate::control::hysteresis::ActivationHysteresis;

// ---------------------------------------------------------------------------
// Output commands (written by state handlers; applied by the service)
// ---------------------------------------------------------------------------

/// Commands that state handlers write to request output changes.
/// The service applies these to the actuator port each cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputCommands {
    /// Desired relay drive (true = energised).
    pub relay_on: bool,
    /// Desired calibration-mode LED level.
    pub mode_led: bool,
}

impl OutputCommands {
    /// Everything released — safe default.
    pub fn all_off() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct FsmContext {
    // -- Timing --
    /// Ticks elapsed since the current state was entered.
    pub ticks_in_state: u64,
    /// Monotonic total tick count.
    pub total_ticks: u64,

    // -- Per-cycle inputs (written by the service before each tick) --
    /// Latest raw pressure sample in `[0, 1023]`.
    pub sample: u16,
    /// False when the transducer read failed this cycle (fail-safe).
    pub sample_valid: bool,
    /// True when a qualifying button hold completed this cycle.
    pub hold_reached: bool,

    // -- Threshold cache --
    /// Activation threshold, mirrored from the `ThresholdStore` cache.
    pub threshold: u16,

    // -- Debounce state (owned here so the Normal handler can step it) --
    pub hysteresis: ActivationHysteresis,

    // -- Outputs --
    /// Commands to be applied to the outputs after the FSM tick.
    pub commands: OutputCommands,
    /// Set by the Calibration handler: sample to persist as the new
    /// threshold. Consumed by the service after the tick.
    pub pending_commit: Option<u16>,

    // -- Configuration --
    pub config: SystemConfig,
}

impl FsmContext {
    /// Create a new context with the given configuration.
    ///
    /// The threshold starts at full scale; the service overwrites it with
    /// the persisted value before the first tick.
    pub fn new(config: SystemConfig) -> Self {
        Self {
            ticks_in_state: 0,
            total_ticks: 0,
            sample: 0,
            sample_valid: false,
            hold_reached: false,
            threshold: crate::app::threshold::FULL_SCALE,
            hysteresis: ActivationHysteresis::new(config.sense_debounce_depth),
            commands: OutputCommands::all_off(),
            pending_commit: None,
            config,
        }
    }
}
