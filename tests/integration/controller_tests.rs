//! Integration tests for the AppService → FSM → outputs pipeline.
//!
//! These verify the full command chain from a scripted button press or
//! pressure sequence down to the recorded actuator calls, without any
//! real hardware.

use crate::mock_hw::{LogSink, MockDelay, MockHardware, MockNvs};

use presstat::app::service::AppService;
use presstat::app::threshold::ThresholdStore;
use presstat::config::SystemConfig;
use presstat::fsm::StateId;

/// Gate poll plus counted iterations for the Normal→Calibration hold.
const ENTRY_PRESS: u32 = 1001;
/// Gate poll plus counted iterations for the calibration commit hold.
const COMMIT_PRESS: u32 = 501;

struct Rig {
    app: AppService,
    hw: MockHardware,
    nvs: MockNvs,
    delay: MockDelay,
    sink: LogSink,
}

impl Rig {
    /// Boot with `threshold` already persisted in NVS.
    fn with_threshold(threshold: u16) -> Self {
        let mut nvs = MockNvs::new();
        let mut store = ThresholdStore::load(&nvs);
        store.commit(&mut nvs, threshold).unwrap();

        let mut app = AppService::new(SystemConfig::default(), ThresholdStore::load(&nvs));
        let mut sink = LogSink::new();
        app.start(&mut sink);

        Self {
            app,
            hw: MockHardware::new(),
            nvs,
            delay: MockDelay::new(),
            sink,
        }
    }

    fn cycle(&mut self) {
        self.app
            .tick(&mut self.hw, &mut self.delay, &mut self.nvs, &mut self.sink);
    }
}

// ── Boot ─────────────────────────────────────────────────────

#[test]
fn boot_loads_persisted_threshold() {
    let rig = Rig::with_threshold(600);
    assert_eq!(rig.app.current_threshold(), 600);
    assert_eq!(rig.app.state(), StateId::Normal);
}

#[test]
fn boot_without_stored_threshold_uses_full_scale() {
    let nvs = MockNvs::new();
    let app = AppService::new(SystemConfig::default(), ThresholdStore::load(&nvs));
    assert_eq!(app.current_threshold(), 1023);
}

// ── Gestures ─────────────────────────────────────────────────

#[test]
fn short_press_stays_in_normal() {
    let mut rig = Rig::with_threshold(600);
    rig.hw.press_for(400);
    rig.cycle();
    assert_eq!(rig.app.state(), StateId::Normal);
    assert!(!rig.sink.contains("ModeChanged"));
}

#[test]
fn commit_length_hold_is_not_enough_to_enter() {
    // 500 iterations qualifies a commit, not an entry — in Normal mode
    // it must be treated as a released-early press.
    let mut rig = Rig::with_threshold(600);
    rig.hw.press_for(COMMIT_PRESS);
    rig.cycle();
    assert_eq!(rig.app.state(), StateId::Normal);
}

#[test]
fn entry_hold_enters_calibration() {
    let mut rig = Rig::with_threshold(600);
    rig.hw.press_for(ENTRY_PRESS);
    rig.cycle();

    assert_eq!(rig.app.state(), StateId::Calibration);
    assert!(rig.hw.mode_led_on(), "mode LED asserts on entry");
    assert!(rig.sink.contains("ModeChanged"));
    // Entering calibration must not touch the stored threshold.
    assert_eq!(rig.app.current_threshold(), 600);
    assert_eq!(ThresholdStore::load(&rig.nvs).current(), 600);
}

#[test]
fn one_press_yields_one_gesture() {
    // Hold long past the entry target: the press that entered
    // calibration must not also count toward the commit hold.
    let mut rig = Rig::with_threshold(600);
    rig.hw.press_for(ENTRY_PRESS + 100);
    rig.cycle();
    assert_eq!(rig.app.state(), StateId::Calibration);

    // Button still held for the next cycles — latched, no commit.
    for _ in 0..3 {
        rig.cycle();
        assert_eq!(rig.app.state(), StateId::Calibration);
    }
    assert!(!rig.sink.contains("ThresholdCommitted"));
}

#[test]
fn commit_hold_commits_live_sample_and_returns_to_normal() {
    let mut rig = Rig::with_threshold(600);
    rig.hw.press_for(ENTRY_PRESS);
    rig.cycle();
    assert_eq!(rig.app.state(), StateId::Calibration);

    // Release cycle, then the commit press with the live reading at 800.
    rig.cycle();
    rig.hw.pressure = 800;
    rig.hw.press_for(COMMIT_PRESS);
    rig.cycle();

    assert_eq!(rig.app.state(), StateId::Normal);
    assert_eq!(rig.app.current_threshold(), 800);
    assert_eq!(ThresholdStore::load(&rig.nvs).current(), 800);
    assert!(rig.sink.contains("ThresholdCommitted(800)"));
    assert!(!rig.hw.mode_led_on(), "mode LED clears on commit");
}

#[test]
fn failed_commit_keeps_old_threshold() {
    let mut rig = Rig::with_threshold(600);
    rig.hw.press_for(ENTRY_PRESS);
    rig.cycle();
    rig.cycle(); // release

    rig.nvs.fail_writes = true;
    rig.hw.pressure = 800;
    rig.hw.press_for(COMMIT_PRESS);
    rig.cycle();

    // Mode change stands, threshold does not.
    assert_eq!(rig.app.state(), StateId::Normal);
    assert_eq!(rig.app.current_threshold(), 600);
    assert!(!rig.sink.contains("ThresholdCommitted"));
}

// ── Activation ───────────────────────────────────────────────

#[test]
fn relay_asserts_after_debounce_and_emits_event() {
    let mut rig = Rig::with_threshold(600);
    rig.hw.pressure = 610;

    for cycle in 1..=10 {
        rig.cycle();
        assert!(!rig.hw.relay_on(), "cycle {cycle} must not assert");
    }
    rig.cycle();
    assert!(rig.hw.relay_on(), "cycle 11 must assert");
    assert!(rig.sink.contains("RelayChanged(true)"));
}

#[test]
fn calibration_mode_suspends_activation() {
    let mut rig = Rig::with_threshold(600);
    rig.hw.press_for(ENTRY_PRESS);
    rig.cycle();
    assert_eq!(rig.app.state(), StateId::Calibration);

    // Pressure far above threshold for many cycles: no debounce runs in
    // calibration, so the relay stays released.
    rig.hw.pressure = 900;
    for _ in 0..20 {
        rig.cycle();
    }
    assert!(!rig.hw.relay_on());
}

#[test]
fn sensor_fault_releases_relay_and_reports() {
    let mut rig = Rig::with_threshold(600);
    rig.hw.pressure = 610;
    for _ in 0..11 {
        rig.cycle();
    }
    assert!(rig.hw.relay_on());

    rig.hw.sensor_fault = true;
    rig.cycle();

    assert!(!rig.hw.relay_on(), "unreadable transducer fails safe");
    assert!(rig.sink.contains("SensorFault"));
    assert!(rig.sink.contains("RelayChanged(false)"));

    // Recovery restarts the full confirmation window.
    rig.hw.sensor_fault = false;
    for cycle in 1..=10 {
        rig.cycle();
        assert!(!rig.hw.relay_on(), "cycle {cycle} after fault must not assert");
    }
    rig.cycle();
    assert!(rig.hw.relay_on());
}

// ── Cycle pacing ─────────────────────────────────────────────

#[test]
fn indicator_delays_account_into_the_cycle() {
    let mut rig = Rig::with_threshold(600);
    rig.cycle();
    // One normal-mode blink: 10 ms pulse + 500 ms low phase.
    assert_eq!(rig.delay.total_ms(), 510);
}

#[test]
fn gesture_poll_is_paced() {
    let mut rig = Rig::with_threshold(600);
    rig.hw.press_for(ENTRY_PRESS);
    rig.cycle();
    // Blink (510 ms) plus one pacing delay per counting iteration (999).
    assert_eq!(rig.delay.total_ms(), 510 + 999);
}
