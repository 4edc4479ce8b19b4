//! Foil-sensor threshold store.
//!
//! Owns the leak-detection calibration state: the dry and wet baseline
//! readings and the derived decision threshold. The threshold is recomputed
//! to the dry/wet midpoint (floor division) whenever either baseline
//! changes; a direct [`set_threshold`](ThresholdStore::set_threshold)
//! override holds until the next calibration or reset.
//!
//! Every mutation completes — baseline write plus midpoint recompute —
//! before the method returns, so a caller holding a
//! [`ThresholdSnapshot`] never observes a new baseline paired with a stale
//! threshold. The loop is single-threaded today; a threaded port would wrap
//! the store in a mutex without changing any call site.

use log::info;

/// A consistent point-in-time copy of the calibration state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdSnapshot {
    pub dry: u16,
    pub wet: u16,
    pub threshold: u16,
}

/// Mutable calibration state shared by the main cycle and the control
/// endpoint.
pub struct ThresholdStore {
    dry: u16,
    wet: u16,
    threshold: u16,
}

impl ThresholdStore {
    /// Build a store from the power-on baselines; the threshold starts at
    /// their midpoint.
    pub fn new(dry: u16, wet: u16) -> Self {
        Self {
            dry,
            wet,
            threshold: midpoint(dry, wet),
        }
    }

    /// Consistent copy of the current state.
    pub fn snapshot(&self) -> ThresholdSnapshot {
        ThresholdSnapshot {
            dry: self.dry,
            wet: self.wet,
            threshold: self.threshold,
        }
    }

    /// Current decision threshold (readings below it count toward a leak).
    pub fn threshold(&self) -> u16 {
        self.threshold
    }

    /// Direct threshold override. Holds until the next calibration/reset.
    pub fn set_threshold(&mut self, value: u16) -> u16 {
        self.threshold = value;
        info!("Threshold updated to: {}", self.threshold);
        self.threshold
    }

    /// Recompute the threshold as the midpoint of the current baselines.
    pub fn reset_threshold(&mut self) -> u16 {
        self.threshold = midpoint(self.dry, self.wet);
        info!("Threshold reset to default: {}", self.threshold);
        self.threshold
    }

    /// Set the dry baseline from a freshly sampled reference reading and
    /// recompute the midpoint. Returns (dry, threshold).
    pub fn calibrate_dry(&mut self, reference: u16) -> (u16, u16) {
        self.dry = reference;
        self.threshold = midpoint(self.dry, self.wet);
        info!("Dry calibration: {}, new threshold: {}", self.dry, self.threshold);
        (self.dry, self.threshold)
    }

    /// Set the wet baseline from a freshly sampled reference reading and
    /// recompute the midpoint. Returns (wet, threshold).
    pub fn calibrate_wet(&mut self, reference: u16) -> (u16, u16) {
        self.wet = reference;
        self.threshold = midpoint(self.dry, self.wet);
        info!("Wet calibration: {}, new threshold: {}", self.wet, self.threshold);
        (self.wet, self.threshold)
    }
}

/// Floor midpoint of the two baselines, computed in u32 to avoid overflow.
fn midpoint(dry: u16, wet: u16) -> u16 {
    ((dry as u32 + wet as u32) / 2) as u16
}
