//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other
//! side decide what to do with them — today that means the serial log.

use crate::error::SensorError;
use crate::fsm::StateId;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),

    /// The controller switched between normal and calibration mode.
    ModeChanged { from: StateId, to: StateId },

    /// The relay command changed (true = energised).
    RelayChanged(bool),

    /// A new threshold was committed to non-volatile storage.
    ThresholdCommitted(u16),

    /// The pressure transducer could not be read this cycle.
    SensorFault(SensorError),

    /// The application service has started (carries initial mode).
    Started(StateId),
}

/// A point-in-time telemetry snapshot suitable for logging.
#[derive(Debug, Clone)]
pub struct TelemetryData {
    pub mode: StateId,
    pub sample: u16,
    pub sample_valid: bool,
    pub threshold: u16,
    pub relay_on: bool,
    pub sense_count: u8,
}
