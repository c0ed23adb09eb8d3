//! End-to-end operating scenarios, driven cycle by cycle.

use crate::mock_hw::{LogSink, MockDelay, MockHardware, MockNvs};

use presstat::app::service::AppService;
use presstat::app::threshold::ThresholdStore;
use presstat::config::SystemConfig;
use presstat::fsm::StateId;

fn boot(threshold: u16) -> (AppService, MockHardware, MockNvs, MockDelay, LogSink) {
    let mut nvs = MockNvs::new();
    let mut store = ThresholdStore::load(&nvs);
    store.commit(&mut nvs, threshold).unwrap();

    let mut app = AppService::new(SystemConfig::default(), ThresholdStore::load(&nvs));
    let mut sink = LogSink::new();
    app.start(&mut sink);
    (app, MockHardware::new(), nvs, MockDelay::new(), sink)
}

/// Boot with threshold 600; the transducer reads 610 for 11 consecutive
/// cycles. The relay must assert on the 11th cycle and stay asserted
/// while the pressure holds.
#[test]
fn sustained_overpressure_asserts_relay_on_eleventh_cycle() {
    let (mut app, mut hw, mut nvs, mut delay, mut sink) = boot(600);
    hw.pressure = 610;

    for cycle in 1..=10 {
        app.tick(&mut hw, &mut delay, &mut nvs, &mut sink);
        assert!(
            !hw.relay_on(),
            "cycle {cycle}: relay must stay released during confirmation"
        );
    }

    for cycle in 11..=20 {
        app.tick(&mut hw, &mut delay, &mut nvs, &mut sink);
        assert!(hw.relay_on(), "cycle {cycle}: relay must be asserted");
    }
}

/// Same as above, but the reading dips to 590 on cycle 7. The dip resets
/// the confirmation window, so the relay never asserts within the
/// scenario.
#[test]
fn transient_dip_prevents_activation() {
    let (mut app, mut hw, mut nvs, mut delay, mut sink) = boot(600);

    for cycle in 1..=15 {
        hw.pressure = if cycle == 7 { 590 } else { 610 };
        app.tick(&mut hw, &mut delay, &mut nvs, &mut sink);
        assert!(!hw.relay_on(), "cycle {cycle}: relay must never assert");
    }
}

/// Full calibration pass: a long hold enters calibration mode, a second
/// hold with the transducer reading 800 commits that value and returns
/// to normal mode. The new threshold then governs activation.
#[test]
fn calibration_commits_live_reading_as_new_threshold() {
    let (mut app, mut hw, mut nvs, mut delay, mut sink) = boot(600);

    // Entry gesture: one gate poll + 1000 counted iterations.
    hw.press_for(1001);
    app.tick(&mut hw, &mut delay, &mut nvs, &mut sink);
    assert_eq!(app.state(), StateId::Calibration);

    // Release, then the commit gesture with live pressure 800.
    app.tick(&mut hw, &mut delay, &mut nvs, &mut sink);
    hw.pressure = 800;
    hw.press_for(501);
    app.tick(&mut hw, &mut delay, &mut nvs, &mut sink);

    assert_eq!(app.state(), StateId::Normal);
    assert_eq!(app.current_threshold(), 800);
    assert_eq!(ThresholdStore::load(&nvs).current(), 800);

    // The committed threshold survives a reboot.
    let app2 = AppService::new(SystemConfig::default(), ThresholdStore::load(&nvs));
    assert_eq!(app2.current_threshold(), 800);

    // 790 is now below threshold: no activation.
    hw.pressure = 790;
    for _ in 0..15 {
        app.tick(&mut hw, &mut delay, &mut nvs, &mut sink);
        assert!(!hw.relay_on());
    }

    // 810 sustains the full window: activation.
    hw.pressure = 810;
    for _ in 1..=10 {
        app.tick(&mut hw, &mut delay, &mut nvs, &mut sink);
        assert!(!hw.relay_on());
    }
    app.tick(&mut hw, &mut delay, &mut nvs, &mut sink);
    assert!(hw.relay_on());
}
