//! System configuration parameters
//!
//! All tunable parameters for the Leakguard rig. Calibration values that
//! change at runtime (dry/wet baselines, threshold) live in the
//! [`ThresholdStore`](crate::calibration::ThresholdStore); this struct only
//! carries their power-on defaults.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Sampling ---
    /// ADC reference voltage (volts).
    pub vcc: f32,
    /// Raw readings averaged into one stable reading.
    pub adc_samples: usize,
    /// Delay between consecutive raw readings (milliseconds).
    pub sample_delay_ms: u32,

    // --- Leak detection ---
    /// Consecutive below-threshold readings required to confirm a leak.
    pub leak_debounce_count: u32,
    /// Power-on dry baseline (raw ADC).
    pub foil_dry_default: u16,
    /// Power-on wet baseline (raw ADC).
    pub foil_wet_default: u16,

    // --- Temperature ---
    /// Overheat alarm limit (Celsius). Strictly above this is an alarm.
    pub temp_limit_c: f32,

    // --- Timing ---
    /// End-of-tick sleep in the normal branch (milliseconds).
    pub loop_delay_ms: u32,
    /// Overheat blink: bar-on duration (milliseconds).
    pub blink_on_ms: u32,
    /// Overheat blink: bar-off duration (milliseconds).
    pub blink_off_ms: u32,

    // --- Control endpoint ---
    /// TCP port for the HTTP control endpoint.
    pub http_port: u16,
    /// Receive timeout for an accepted connection (seconds).
    pub recv_timeout_secs: u64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Sampling
            vcc: 3.3,
            adc_samples: 20, // better noise rejection than the bare read
            sample_delay_ms: 10,

            // Leak detection
            leak_debounce_count: 3,
            foil_dry_default: 64_000,
            foil_wet_default: 40_000,

            // Temperature
            temp_limit_c: 50.0,

            // Timing
            loop_delay_ms: 2_000,
            blink_on_ms: 500,
            blink_off_ms: 100,

            // Control endpoint
            http_port: 80,
            recv_timeout_secs: 2,
        }
    }
}
