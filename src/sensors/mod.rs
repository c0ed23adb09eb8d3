//! Sensor subsystem.
//!
//! One transducer, one driver: the pressure sensor on ADC1. The hub
//! pattern the multi-sensor boards use collapses to a single module here.

pub mod pressure;
