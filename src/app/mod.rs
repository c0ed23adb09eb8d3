//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the Presstat monitor:
//! mode orchestration, calibration gestures, activation debounce, and the
//! threshold persistence contract. All interaction with hardware happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
pub mod threshold;
