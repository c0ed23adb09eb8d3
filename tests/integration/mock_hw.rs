//! Mock hardware adapter for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history without touching real GPIO registers. The button is scripted
//! as a countdown of `is_pressed()` polls that report "held" — exactly
//! how the blocking hold detector consumes the line.

use std::collections::HashMap;

use embedded_hal::delay::DelayNs;

use presstat::SensorError;
use presstat::app::ports::{
    ActuatorPort, ButtonPort, EventSink, SensorPort, StorageError, StoragePort,
};

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    SetRelay(bool),
    StatusLed(bool),
    ModeLed(bool),
    AllOff,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    /// Raw sample the next `read_pressure()` returns.
    pub pressure: u16,
    /// When set, `read_pressure()` fails with a conversion timeout.
    pub sensor_fault: bool,
    /// Remaining `is_pressed()` polls that report the button held.
    pub button_held_for: u32,
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            pressure: 0,
            sensor_fault: false,
            button_held_for: 0,
            calls: Vec::new(),
        }
    }

    /// Script a button press lasting `polls` consecutive level reads.
    pub fn press_for(&mut self, polls: u32) {
        self.button_held_for = polls;
    }

    pub fn relay_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::SetRelay(on) => Some(*on),
                ActuatorCall::AllOff => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn mode_led_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::ModeLed(on) => Some(*on),
                ActuatorCall::AllOff => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn read_pressure(&mut self) -> Result<u16, SensorError> {
        if self.sensor_fault {
            Err(SensorError::ConversionTimeout)
        } else {
            Ok(self.pressure)
        }
    }
}

impl ButtonPort for MockHardware {
    fn is_pressed(&mut self) -> bool {
        if self.button_held_for > 0 {
            self.button_held_for -= 1;
            true
        } else {
            false
        }
    }
}

impl ActuatorPort for MockHardware {
    fn set_relay(&mut self, on: bool) {
        self.calls.push(ActuatorCall::SetRelay(on));
    }

    fn set_status_led(&mut self, on: bool) {
        self.calls.push(ActuatorCall::StatusLed(on));
    }

    fn set_mode_led(&mut self, on: bool) {
        self.calls.push(ActuatorCall::ModeLed(on));
    }

    fn relay_is_on(&self) -> bool {
        self.relay_on()
    }

    fn all_off(&mut self) {
        self.calls.push(ActuatorCall::AllOff);
    }
}

// ── MockNvs ───────────────────────────────────────────────────

pub struct MockNvs {
    store: HashMap<String, Vec<u8>>,
    pub fail_writes: bool,
}

#[allow(dead_code)]
impl MockNvs {
    pub fn new() -> Self {
        Self {
            store: HashMap::new(),
            fail_writes: false,
        }
    }
}

impl Default for MockNvs {
    fn default() -> Self {
        Self::new()
    }
}

impl StoragePort for MockNvs {
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        let k = format!("{}::{}", namespace, key);
        match self.store.get(&k) {
            Some(v) => {
                let n = v.len().min(buf.len());
                buf[..n].copy_from_slice(&v[..n]);
                Ok(n)
            }
            None => Err(StorageError::NotFound),
        }
    }

    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::IoError);
        }
        let k = format!("{}::{}", namespace, key);
        self.store.insert(k, data.to_vec());
        Ok(())
    }

    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError> {
        self.store.remove(&format!("{}::{}", namespace, key));
        Ok(())
    }

    fn exists(&self, namespace: &str, key: &str) -> bool {
        self.store.contains_key(&format!("{}::{}", namespace, key))
    }
}

// ── MockDelay ────────────────────────────────────────────────

/// Delay port that only accounts time — tests never sleep.
pub struct MockDelay {
    pub total_ns: u64,
}

#[allow(dead_code)]
impl MockDelay {
    pub fn new() -> Self {
        Self { total_ns: 0 }
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl Default for MockDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

// ── LogSink ───────────────────────────────────────────────────

pub struct LogSink {
    pub events: Vec<String>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.events.iter().any(|e| e.contains(needle))
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &presstat::app::events::AppEvent) {
        self.events.push(format!("{:?}", event));
    }
}
