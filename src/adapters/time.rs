//! ESP32 time adapter.
//!
//! Provides monotonic time queries and the blocking delays the control
//! loop, indicator, and gesture poll are paced by.
//!
//! - **`target_os = "espidf"`** — uptime wraps `esp_timer_get_time()`;
//!   delays delegate to [`esp_idf_hal::delay::Delay`], which busy-waits
//!   below its threshold and yields to FreeRTOS above it.
//! - **`not(target_os = "espidf")`** — `std::time::Instant` and
//!   `std::thread::sleep` for host-side testing and simulation.

use embedded_hal::delay::DelayNs;

/// Time adapter for the ESP32-S3 platform.
pub struct Esp32TimeAdapter {
    #[cfg(target_os = "espidf")]
    delay: esp_idf_hal::delay::Delay,
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for Esp32TimeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl Esp32TimeAdapter {
    pub fn new() -> Self {
        Self {
            #[cfg(target_os = "espidf")]
            delay: esp_idf_hal::delay::Delay::new_default(),
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Seconds since boot (monotonic).
    #[cfg(target_os = "espidf")]
    pub fn uptime_secs(&self) -> u64 {
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64 / 1_000_000
    }

    /// Seconds since boot (monotonic).
    #[cfg(not(target_os = "espidf"))]
    pub fn uptime_secs(&self) -> u64 {
        self.start.elapsed().as_secs()
    }

    /// Microseconds since boot (monotonic, wraps at `u64::MAX`).
    #[cfg(target_os = "espidf")]
    pub fn uptime_us(&self) -> u64 {
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64
    }

    /// Microseconds since boot (monotonic, wraps at `u64::MAX`).
    #[cfg(not(target_os = "espidf"))]
    pub fn uptime_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}

impl DelayNs for Esp32TimeAdapter {
    #[cfg(target_os = "espidf")]
    fn delay_ns(&mut self, ns: u32) {
        self.delay.delay_ns(ns);
    }

    #[cfg(not(target_os = "espidf"))]
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }
}
