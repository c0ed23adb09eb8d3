//! Presstat Firmware — Main Entry Point
//!
//! Hexagonal architecture around a single synchronous control loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  HardwareAdapter          LogEventSink       NvsAdapter      │
//! │  (Sensor+Button+Actuator) (EventSink)        (Storage)       │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ───────────────────    │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │              AppService (pure logic)                   │  │
//! │  │  Mode FSM · Activation debounce · Hold detector        │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! One loop iteration is one control cycle (≈500 ms plus the indicator
//! delays). No interrupts drive logic — the button is read by level and
//! the ADC conversion blocks inline, preserving strictly sequential
//! state mutation.
#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
pub mod config;
mod error;
mod pins;

pub mod app;
mod adapters;
mod control;
mod drivers;
pub mod fsm;
mod sensors;

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use embedded_hal::delay::DelayNs;
use log::info;

use adapters::hardware::HardwareAdapter;
use adapters::log_sink::LogEventSink;
use adapters::nvs::NvsAdapter;
use adapters::time::Esp32TimeAdapter;
use app::events::AppEvent;
use app::ports::EventSink;
use app::service::AppService;
use app::threshold::ThresholdStore;
use config::SystemConfig;
use drivers::button::ButtonDriver;
use drivers::indicator::IndicatorLeds;
use drivers::relay::RelayDriver;
use sensors::pressure::PressureSensor;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Presstat v{}                     ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = drivers::hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    let watchdog = drivers::watchdog::Watchdog::new(10_000);

    // ── 3. Load the persisted threshold from NVS ──────────────
    let mut nvs =
        NvsAdapter::new().map_err(|e| anyhow::anyhow!("NVS init failed: {e}"))?;
    let threshold = ThresholdStore::load(&nvs);

    // ── 4. Construct adapters ─────────────────────────────────
    let mut hw = HardwareAdapter::new(
        PressureSensor::new(drivers::hw_init::ADC1_CH_PRESSURE),
        ButtonDriver::new(pins::BUTTON_GPIO),
        RelayDriver::new(),
        IndicatorLeds::new(),
    );
    let mut delay = Esp32TimeAdapter::new();
    let mut sink = LogEventSink::new();

    // ── 5. Construct app service ──────────────────────────────
    let config = SystemConfig::default();
    let mut app = AppService::new(config.clone(), threshold);
    app.start(&mut sink);

    info!("System ready. Entering control loop.");

    // ── 6. Control loop ───────────────────────────────────────
    let mut telemetry_counter: u32 = 0;

    loop {
        app.tick(&mut hw, &mut delay, &mut nvs, &mut sink);

        telemetry_counter += 1;
        if telemetry_counter >= config.telemetry_interval_cycles {
            sink.emit(&AppEvent::Telemetry(app.build_telemetry()));
            telemetry_counter = 0;
        }

        // Feed watchdog on every iteration.
        watchdog.feed();

        // Wait out the remainder of the cycle.
        delay.delay_ms(config.cycle_period_ms);
    }
}
