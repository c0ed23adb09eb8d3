//! Task Watchdog Timer (TWDT) driver.
//!
//! Wraps the ESP-IDF TWDT API to reset the device if the control loop
//! stalls. The timeout must comfortably exceed the longest legitimate
//! cycle: indicator blink delays plus a full entry-hold poll plus the
//! outer sleep, roughly two seconds.
//!
//! The control loop must call `feed()` on every cycle.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

pub struct Watchdog {
    #[cfg(target_os = "espidf")]
    subscribed: bool,
}

impl Watchdog {
    /// Initialise the TWDT with the given timeout and subscribe the
    /// current task to it.
    #[cfg(target_os = "espidf")]
    pub fn new(timeout_ms: u32) -> Self {
        unsafe {
            let cfg = esp_task_wdt_config_t {
                timeout_ms,
                idle_core_mask: 0,
                trigger_panic: true,
            };
            let ret = esp_task_wdt_reconfigure(&cfg);
            if ret != ESP_OK {
                log::warn!(
                    "TWDT reconfigure returned {} (may already be configured)",
                    ret
                );
            }

            let ret = esp_task_wdt_add(core::ptr::null_mut());
            let subscribed = ret == ESP_OK;
            if subscribed {
                info!("Watchdog: subscribed ({}ms timeout, panic on trigger)", timeout_ms);
            } else {
                log::warn!("Watchdog: failed to subscribe ({})", ret);
            }

            Self { subscribed }
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new(timeout_ms: u32) -> Self {
        log::info!("Watchdog(sim): no-op ({}ms)", timeout_ms);
        Self {}
    }

    /// Feed the watchdog. Must be called at least once per timeout period.
    pub fn feed(&self) {
        #[cfg(target_os = "espidf")]
        {
            if self.subscribed {
                unsafe {
                    esp_task_wdt_reset();
                }
            }
        }
    }
}
