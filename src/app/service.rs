//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the mode FSM, the activation debounce, the hold
//! detector, and the threshold cache. It exposes a clean,
//! hardware-agnostic API. All I/O flows through port traits injected at
//! call sites, making the entire service testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!  ButtonPort ──▶ │       AppService        │
//!                 │  FSM · Debounce · Hold  │
//! ActuatorPort ◀──│                         │◀─▶ StoragePort
//!                 └────────────────────────┘
//! ```
//!
//! One call to [`tick`](AppService::tick) is one control cycle. The cycle
//! is fully synchronous: the indicator blink, the gesture poll, and the
//! sensor conversion all run to completion inside it, in that order, so
//! every piece of state has exactly one writer at any instant.

use embedded_hal::delay::DelayNs;
use log::warn;

use crate::config::SystemConfig;
use crate::drivers::button::HoldDetector;
use crate::drivers::indicator::Indicator;
use crate::fsm::context::FsmContext;
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};

use super::events::{AppEvent, TelemetryData};
use super::ports::{ActuatorPort, ButtonPort, EventSink, SensorPort, StoragePort};
use super::threshold::ThresholdStore;

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    fsm: Fsm,
    ctx: FsmContext,
    threshold: ThresholdStore,
    hold: HoldDetector,
    indicator: Indicator,
    /// Set once a hold completes; held until the button releases, so one
    /// physical press can never fire two gestures.
    gesture_latched: bool,
    tick_count: u64,
}

impl AppService {
    /// Construct the service from configuration and the loaded threshold.
    ///
    /// Does **not** start the FSM — call [`start`](Self::start) next.
    pub fn new(config: SystemConfig, threshold: ThresholdStore) -> Self {
        let indicator = Indicator::new(&config);
        let mut ctx = FsmContext::new(config);
        ctx.threshold = threshold.current();
        let fsm = Fsm::new(build_state_table(), StateId::Normal);

        Self {
            fsm,
            ctx,
            threshold,
            hold: HoldDetector::new(),
            indicator,
            gesture_latched: false,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the FSM in Normal mode.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        log::info!(
            "AppService started in {:?}, threshold={}",
            self.fsm.current_state(),
            self.ctx.threshold
        );
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full control cycle:
    /// indicator → gesture → sample → FSM → commit → outputs.
    ///
    /// The `hw` parameter satisfies [`SensorPort`], [`ButtonPort`] **and**
    /// [`ActuatorPort`] — this avoids a multiple mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + ButtonPort + ActuatorPort),
        delay: &mut impl DelayNs,
        storage: &mut impl StoragePort,
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;
        let prev_mode = self.fsm.current_state();
        let prev_relay = self.ctx.commands.relay_on;

        // 1. Indicator blink for the mode we are in this cycle.
        self.indicator.tick(prev_mode, hw, delay);

        // 2. Gesture poll via ButtonPort (blocking while held).
        self.ctx.hold_reached = false;
        if hw.is_pressed() {
            if !self.gesture_latched {
                let target = match prev_mode {
                    StateId::Normal => self.ctx.config.entry_hold_iterations,
                    StateId::Calibration => self.ctx.config.commit_hold_iterations,
                };
                let poll_ms = self.ctx.config.gesture_poll_interval_ms;
                if self.hold.detect_hold(hw, delay, target, poll_ms) {
                    self.ctx.hold_reached = true;
                    self.gesture_latched = true;
                }
            }
        } else {
            self.gesture_latched = false;
        }

        // 3. Pressure sample via SensorPort — taken after the gesture
        // poll, so a calibration commit persists the reading at the
        // instant the hold completed.
        match hw.read_pressure() {
            Ok(raw) => {
                self.ctx.sample = raw;
                self.ctx.sample_valid = true;
            }
            Err(e) => {
                self.ctx.sample_valid = false;
                sink.emit(&AppEvent::SensorFault(e));
            }
        }

        // 4. FSM tick (pure state logic).
        self.fsm.tick(&mut self.ctx);

        // 5. Calibration commit, if the Calibration handler requested one.
        if let Some(value) = self.ctx.pending_commit.take() {
            match self.threshold.commit(storage, value) {
                Ok(()) => {
                    self.ctx.threshold = self.threshold.current();
                    sink.emit(&AppEvent::ThresholdCommitted(self.ctx.threshold));
                }
                Err(e) => {
                    // Last good threshold stays in force; the mode change
                    // back to Normal stands.
                    warn!("threshold commit failed: {e}");
                }
            }
        }

        // 6. Apply output commands via ActuatorPort.
        hw.set_relay(self.ctx.commands.relay_on);
        hw.set_mode_led(self.ctx.commands.mode_led);

        // 7. Emit edge events.
        let new_mode = self.fsm.current_state();
        if new_mode != prev_mode {
            sink.emit(&AppEvent::ModeChanged {
                from: prev_mode,
                to: new_mode,
            });
        }
        if self.ctx.commands.relay_on != prev_relay {
            sink.emit(&AppEvent::RelayChanged(self.ctx.commands.relay_on));
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a telemetry snapshot from the current context.
    pub fn build_telemetry(&self) -> TelemetryData {
        TelemetryData {
            mode: self.fsm.current_state(),
            sample: self.ctx.sample,
            sample_valid: self.ctx.sample_valid,
            threshold: self.ctx.threshold,
            relay_on: self.ctx.commands.relay_on,
            sense_count: self.ctx.hysteresis.sense_count(),
        }
    }

    /// Current operating mode.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Relay command as of the last completed cycle.
    pub fn relay_commanded(&self) -> bool {
        self.ctx.commands.relay_on
    }

    /// The threshold currently in force.
    pub fn current_threshold(&self) -> u16 {
        self.ctx.threshold
    }

    /// Total control cycles executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
