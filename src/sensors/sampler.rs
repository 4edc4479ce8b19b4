//! Trimmed-mean analog sampler.
//!
//! One stable reading per sensor per cycle: take `samples` sequential raw
//! readings separated by a short delay to decorrelate noise, sort them,
//! drop the extremes and floor-average the rest. This rejects isolated ADC
//! glitches without a full statistical filter.
//!
//! The inter-sample delay goes through [`hw_init::delay_ms`], which is a
//! no-op on host targets so simulation and tests run at full speed.

use heapless::Vec;

use crate::drivers::hw_init;

/// Upper bound on the sample window (heapless buffer capacity).
pub const MAX_SAMPLES: usize = 64;

/// Averaged-read configuration shared by both sensors.
#[derive(Debug, Clone, Copy)]
pub struct AnalogSampler {
    samples: usize,
    delay_ms: u32,
}

impl AnalogSampler {
    /// `samples` is clamped to `2..=MAX_SAMPLES`.
    pub fn new(samples: usize, delay_ms: u32) -> Self {
        Self {
            samples: samples.clamp(2, MAX_SAMPLES),
            delay_ms,
        }
    }

    /// Take one stable reading through `read` (one call per raw sample).
    pub fn sample(&self, mut read: impl FnMut() -> u16) -> u16 {
        let mut readings: Vec<u16, MAX_SAMPLES> = Vec::new();
        for _ in 0..self.samples {
            // Capacity is guaranteed by the constructor clamp.
            let _ = readings.push(read());
            hw_init::delay_ms(self.delay_ms);
        }
        trimmed_mean(&mut readings)
    }
}

/// Sort ascending, discard `max(1, n/10)` readings from each end (unless
/// that would consume half the window), floor-average the rest.
pub fn trimmed_mean(readings: &mut [u16]) -> u16 {
    readings.sort_unstable();

    let n = readings.len();
    let trim = (n / 10).max(1);
    let kept = if trim < n / 2 {
        &readings[trim..n - trim]
    } else {
        &readings[..]
    };

    let sum: u32 = kept.iter().map(|&r| r as u32).sum();
    (sum / kept.len() as u32) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_readings_return_that_value() {
        let mut readings = [4_321u16; 20];
        assert_eq!(trimmed_mean(&mut readings), 4_321);
    }

    #[test]
    fn twenty_samples_average_the_middle_sixteen() {
        // 1..=20: trim = 2, kept = 3..=18, floor-average = 168/16 = 10.
        let mut readings: [u16; 20] = core::array::from_fn(|i| (i + 1) as u16);
        assert_eq!(trimmed_mean(&mut readings), 10);
    }

    #[test]
    fn spike_is_rejected() {
        let mut readings = [500u16; 20];
        readings[7] = 65_535; // isolated ADC glitch
        assert_eq!(trimmed_mean(&mut readings), 500);
    }

    #[test]
    fn small_windows_skip_trimming() {
        // n = 2: trim = 1 is not < n/2 = 1, so both readings are kept.
        let mut readings = [10u16, 20u16];
        assert_eq!(trimmed_mean(&mut readings), 15);
    }

    #[test]
    fn output_within_input_range() {
        let mut readings = [100u16, 900, 42, 65_000, 800, 700, 650, 600, 550, 500];
        let lo = *readings.iter().min().unwrap();
        let hi = *readings.iter().max().unwrap();
        let avg = trimmed_mean(&mut readings);
        assert!(avg >= lo && avg <= hi);
    }

    #[test]
    fn sampler_drains_exactly_n_reads() {
        let sampler = AnalogSampler::new(20, 0);
        let mut calls = 0usize;
        let _ = sampler.sample(|| {
            calls += 1;
            1_000
        });
        assert_eq!(calls, 20);
    }

    #[test]
    fn sampler_clamps_oversized_window() {
        let sampler = AnalogSampler::new(10_000, 0);
        let mut calls = 0usize;
        let _ = sampler.sample(|| {
            calls += 1;
            0
        });
        assert_eq!(calls, MAX_SAMPLES);
    }
}
