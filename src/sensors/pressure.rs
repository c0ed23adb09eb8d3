//! Pressure transducer driver.
//!
//! Reads the analog output of a ratiometric pressure transducer through an
//! ESP32-S3 ADC channel and presents it as the right-justified 10-bit
//! reading the control logic works in ([0, 1023], full scale = supply
//! voltage).
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the oneshot ADC channel (initialised by hw_init).
//! On host/test: reads from a static `AtomicU16` for injection.

use core::sync::atomic::{AtomicU16, Ordering};

use crate::error::SensorError;
#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

static SIM_PRESSURE_ADC: AtomicU16 = AtomicU16::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_pressure_raw(raw: u16) {
    SIM_PRESSURE_ADC.store(raw, Ordering::Relaxed);
}

/// Full-scale 10-bit reading.
const FULL_SCALE_10BIT: u16 = 1023;

/// Shift from the 12-bit hardware result down to the 10-bit contract.
#[cfg(target_os = "espidf")]
const HW_TO_10BIT_SHIFT: u16 = 2;

pub struct PressureSensor {
    adc_channel: u32,
    total_reads: u32,
}

impl PressureSensor {
    pub fn new(adc_channel: u32) -> Self {
        Self {
            adc_channel,
            total_reads: 0,
        }
    }

    /// Trigger a conversion and return the 10-bit reading.
    ///
    /// The underlying oneshot read is bounded by the ADC driver; a
    /// conversion that never completes surfaces as
    /// [`SensorError::ConversionTimeout`] rather than hanging the loop.
    pub fn read(&mut self) -> Result<u16, SensorError> {
        self.total_reads = self.total_reads.saturating_add(1);
        let raw = self.read_adc()?;
        Ok(raw.min(FULL_SCALE_10BIT))
    }

    /// Conversions attempted since boot.
    pub fn total_reads(&self) -> u32 {
        self.total_reads
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> Result<u16, SensorError> {
        match hw_init::adc1_read(self.adc_channel) {
            Ok(raw12) => Ok(raw12 >> HW_TO_10BIT_SHIFT),
            Err(rc) if rc == esp_idf_svc::sys::ESP_ERR_TIMEOUT => {
                Err(SensorError::ConversionTimeout)
            }
            Err(_) => Err(SensorError::AdcReadFailed),
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> Result<u16, SensorError> {
        Ok(SIM_PRESSURE_ADC.load(Ordering::Relaxed))
    }
}
