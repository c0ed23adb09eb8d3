//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (the pressure sensor, the button line, the relay and
//! indicator outputs, NVS storage, event sinks) implement these traits.
//! The [`AppService`](super::service::AppService) consumes them via
//! generics, so the domain core never touches hardware directly.

use crate::error::SensorError;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per cycle to obtain the
/// raw 10-bit pressure reading.
pub trait SensorPort {
    /// Trigger a conversion and return the result in `[0, 1023]`.
    fn read_pressure(&mut self) -> Result<u16, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Button port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Level-read port for the operator button.
///
/// The line is active-low in hardware; adapters normalise it so that
/// `is_pressed()` returns `true` while the button is held.
pub trait ButtonPort {
    fn is_pressed(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command outputs.
pub trait ActuatorPort {
    /// Energise or release the relay (active-high drive).
    fn set_relay(&mut self, on: bool);

    /// Drive the run/status LED line.
    fn set_status_led(&mut self, on: bool);

    /// Drive the calibration-mode LED line.
    fn set_mode_led(&mut self, on: bool);

    /// Query the last commanded relay state.
    fn relay_is_on(&self) -> bool;

    /// Release the relay and blank both LEDs — safe shutdown.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (serial log today;
/// anything else would implement the same trait).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Storage port (driven adapter: domain ↔ NVS / flash)
// ───────────────────────────────────────────────────────────────

/// Persistent key-value storage for the calibration threshold.
///
/// - Keys are namespaced to prevent collisions between subsystems.
/// - Write operations MUST be atomic — no partial writes on power loss.
///   The ESP-IDF NVS API guarantees this natively; in-memory simulation
///   achieves it trivially.
pub trait StoragePort {
    /// Read a value. Returns the number of bytes written to `buf`.
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError>;

    /// Write a value atomically.
    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Delete a key. Returns `Ok(())` even if the key didn't exist.
    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError>;

    /// Check whether a key exists without reading it.
    fn exists(&self, namespace: &str, key: &str) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`StoragePort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Requested key does not exist.
    NotFound,
    /// Storage partition is full.
    Full,
    /// Generic I/O error.
    IoError,
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "key not found"),
            Self::Full => write!(f, "storage full"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
