//! Control algorithms.

pub mod hysteresis;
