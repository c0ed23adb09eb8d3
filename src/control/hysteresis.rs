//! Activation debounce for the relay output.
//!
//! Converts a noisy instantaneous pressure reading into a debounced binary
//! relay command. The debounce is one-sided:
//!
//! ```text
//!  IDLE ──[sample ≥ threshold]──▶ DETECTED ──[N sustained cycles]──▶ ACTIVE
//!    ▲                               │                                 │
//!    └────────[sample < threshold]───┴─────────────────────────────────┘
//! ```
//!
//! Activation requires the full confirmation window (first detection plus
//! `depth` further consecutive above-threshold cycles); deactivation is
//! immediate on the first below-threshold sample. Slow to trigger, fast to
//! release — a transient spike must not energise the relay, but a pressure
//! drop releases it on the very next cycle.

/// Debounce phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationState {
    /// Below threshold; relay released.
    Idle,
    /// Above threshold, confirmation window running; relay still released.
    Detected,
    /// Confirmation complete; relay asserted while sustained.
    Active,
}

/// One-sided activation debounce.
pub struct ActivationHysteresis {
    state: ActivationState,
    sense_count: u8,
    depth: u8,
}

impl ActivationHysteresis {
    /// `depth` is the number of consecutive above-threshold cycles required
    /// after the first detection before the relay asserts.
    pub fn new(depth: u8) -> Self {
        Self {
            state: ActivationState::Idle,
            sense_count: 0,
            depth,
        }
    }

    /// Advance one control cycle. Returns the relay command for this cycle.
    pub fn step(&mut self, sample: u16, threshold: u16) -> bool {
        if sample >= threshold {
            match self.state {
                ActivationState::Idle => {
                    self.state = ActivationState::Detected;
                    self.sense_count = 0;
                }
                ActivationState::Detected => {
                    self.sense_count = self.sense_count.saturating_add(1);
                    if self.sense_count >= self.depth {
                        self.state = ActivationState::Active;
                    }
                }
                ActivationState::Active => {}
            }
        } else if self.state != ActivationState::Idle {
            self.state = ActivationState::Idle;
            self.sense_count = 0;
        }

        self.state == ActivationState::Active
    }

    /// Discard any detection in progress and release the relay command.
    pub fn reset(&mut self) {
        self.state = ActivationState::Idle;
        self.sense_count = 0;
    }

    /// Current debounce phase.
    pub fn state(&self) -> ActivationState {
        self.state
    }

    /// Cycles counted inside the current confirmation window.
    pub fn sense_count(&self) -> u8 {
        self.sense_count
    }
}
