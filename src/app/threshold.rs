//! Threshold persistence.
//!
//! [`ThresholdStore`] owns the calibrated pressure threshold: a 10-bit
//! value loaded from NVS once at boot, cached in memory, and rewritten on
//! every calibration commit. The persisted record is a
//! postcard-serialised struct so the full 10-bit range survives a power
//! cycle.
//!
//! ## Fail-open policy
//!
//! A record that is missing, corrupted, or out of range loads as the
//! full-scale value (1023). A bad threshold must never under-protect:
//! full scale means the relay cannot assert until the transducer reads
//! maximum pressure, which is the conservative failure direction for an
//! autoclave interlock.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::ports::{StorageError, StoragePort};

/// NVS namespace for all Presstat keys.
const STORAGE_NAMESPACE: &str = "presstat";
/// Key holding the calibration record.
const THRESHOLD_KEY: &str = "threshold";

/// Highest representable transducer reading (10-bit ADC).
pub const FULL_SCALE: u16 = 1023;

/// On-flash calibration record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct CalibrationRecord {
    threshold: u16,
}

/// In-memory cache of the persisted threshold.
///
/// Invariant: `current()` is always in `[0, 1023]`, and equals the
/// persisted value immediately after any successful [`commit`].
///
/// [`commit`]: ThresholdStore::commit
pub struct ThresholdStore {
    cached: u16,
}

impl ThresholdStore {
    /// Load the persisted threshold, applying the fail-open policy.
    pub fn load(storage: &impl StoragePort) -> Self {
        let mut buf = [0u8; 16];
        let cached = match storage.read(STORAGE_NAMESPACE, THRESHOLD_KEY, &mut buf) {
            Ok(len) => match postcard::from_bytes::<CalibrationRecord>(&buf[..len]) {
                Ok(rec) if rec.threshold <= FULL_SCALE => {
                    info!("ThresholdStore: loaded threshold {}", rec.threshold);
                    rec.threshold
                }
                Ok(rec) => {
                    warn!(
                        "ThresholdStore: stored threshold {} out of range, using full scale",
                        rec.threshold
                    );
                    FULL_SCALE
                }
                Err(_) => {
                    warn!("ThresholdStore: record corrupted, using full scale");
                    FULL_SCALE
                }
            },
            Err(StorageError::NotFound) => {
                info!("ThresholdStore: no stored threshold, using full scale");
                FULL_SCALE
            }
            Err(e) => {
                warn!("ThresholdStore: read failed ({e}), using full scale");
                FULL_SCALE
            }
        };
        Self { cached }
    }

    /// Persist `value` and update the cache.
    ///
    /// The cache is only updated after the write succeeds, so a storage
    /// failure leaves the last good threshold in force.
    pub fn commit(
        &mut self,
        storage: &mut impl StoragePort,
        value: u16,
    ) -> Result<(), StorageError> {
        let value = value.min(FULL_SCALE);
        let rec = CalibrationRecord { threshold: value };
        let bytes = postcard::to_allocvec(&rec).map_err(|_| StorageError::IoError)?;
        storage.write(STORAGE_NAMESPACE, THRESHOLD_KEY, &bytes)?;
        self.cached = value;
        info!("ThresholdStore: committed threshold {}", value);
        Ok(())
    }

    /// The cached threshold.
    pub fn current(&self) -> u16 {
        self.cached
    }
}
