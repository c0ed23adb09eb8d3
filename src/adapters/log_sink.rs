//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | mode={:?} | sample={}{} | threshold={} | relay={} | sense_count={}",
                    t.mode,
                    t.sample,
                    if t.sample_valid { "" } else { " (stale)" },
                    t.threshold,
                    if t.relay_on { "ON" } else { "off" },
                    t.sense_count,
                );
            }
            AppEvent::ModeChanged { from, to } => {
                info!("MODE | {:?} -> {:?}", from, to);
            }
            AppEvent::RelayChanged(on) => {
                info!("RELAY | {}", if *on { "energised" } else { "released" });
            }
            AppEvent::ThresholdCommitted(value) => {
                info!("CAL | threshold committed: {}", value);
            }
            AppEvent::SensorFault(e) => {
                warn!("SENSOR | read failed: {}", e);
            }
            AppEvent::Started(state) => {
                info!("START | initial_mode={:?}", state);
            }
        }
    }
}
