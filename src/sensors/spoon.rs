//! Spoon-mounted temperature sensor.
//!
//! An analog probe clipped to a spoon, read through ADC1 and converted via
//! a fixed affine transfer function measured against a reference
//! thermometer: `T = 48.65 * V - 7`.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the real ADC channel via hw_init (left-aligned to
//! 16-bit full scale). On host/test: reads from a static `AtomicU16` for
//! injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(target_os = "espidf")]
use crate::pins;

use super::sampler::AnalogSampler;

#[cfg(not(target_os = "espidf"))]
static SIM_SPOON_ADC: AtomicU16 = AtomicU16::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_spoon_adc(raw: u16) {
    SIM_SPOON_ADC.store(raw, Ordering::Relaxed);
}

/// Slope of the measured transfer function (°C per volt).
const TEMP_SLOPE: f32 = 48.65;
/// Offset of the measured transfer function (°C).
const TEMP_OFFSET: f32 = -7.0;
/// Full-scale raw reading.
const ADC_MAX: f32 = 65_535.0;

/// Convert a stable raw reading to volts.
pub fn raw_to_voltage(raw: u16, vcc: f32) -> f32 {
    raw as f32 * vcc / ADC_MAX
}

/// Convert probe volts to degrees Celsius.
pub fn voltage_to_celsius(voltage: f32) -> f32 {
    TEMP_SLOPE * voltage + TEMP_OFFSET
}

pub struct SpoonSensor {
    sampler: AnalogSampler,
}

impl SpoonSensor {
    pub fn new(sampler: AnalogSampler) -> Self {
        Self { sampler }
    }

    /// One stable (trimmed-mean) raw reading.
    pub fn sample_raw(&self) -> u16 {
        self.sampler.sample(Self::read_adc)
    }

    #[cfg(target_os = "espidf")]
    fn read_adc() -> u16 {
        hw_init::adc1_read(pins::SPOON_ADC_CHANNEL)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc() -> u16 {
        SIM_SPOON_ADC.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_raw_is_minus_seven() {
        let c = voltage_to_celsius(raw_to_voltage(0, 3.3));
        assert!((c - (-7.0)).abs() < 0.001);
    }

    #[test]
    fn full_scale_maps_to_vcc() {
        let v = raw_to_voltage(65_535, 3.3);
        assert!((v - 3.3).abs() < 0.001);
    }

    #[test]
    fn transfer_function_matches_reference_points() {
        // 1.0 V → 41.65 °C per the measured curve.
        let c = voltage_to_celsius(1.0);
        assert!((c - 41.65).abs() < 0.001);
    }

    #[cfg(not(target_os = "espidf"))]
    #[test]
    fn sim_injection_reaches_the_sampler() {
        sim_set_spoon_adc(12_345);
        let sensor = SpoonSensor::new(AnalogSampler::new(20, 0));
        assert_eq!(sensor.sample_raw(), 12_345);
    }
}
