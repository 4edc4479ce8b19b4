//! Foil leak sensor.
//!
//! Two foil strips under the appliance, one tied to GND, the other pulled
//! to 3.3 V through 1 MΩ into ADC1. Liquid bridging the strips pulls the
//! node down, so a leak shows as a *smaller* raw reading. The raw value is
//! consumed by the [`LeakDebouncer`](crate::control::debounce::LeakDebouncer)
//! against the calibrated threshold.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the real ADC channel via hw_init. On host/test: reads
//! from a static `AtomicU16` for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(target_os = "espidf")]
use crate::pins;

use super::sampler::AnalogSampler;

#[cfg(not(target_os = "espidf"))]
static SIM_FOIL_ADC: AtomicU16 = AtomicU16::new(u16::MAX);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_foil_adc(raw: u16) {
    SIM_FOIL_ADC.store(raw, Ordering::Relaxed);
}

pub struct FoilSensor {
    sampler: AnalogSampler,
}

impl FoilSensor {
    pub fn new(sampler: AnalogSampler) -> Self {
        Self { sampler }
    }

    /// One stable (trimmed-mean) raw reading.
    pub fn sample_raw(&self) -> u16 {
        self.sampler.sample(Self::read_adc)
    }

    #[cfg(target_os = "espidf")]
    fn read_adc() -> u16 {
        hw_init::adc1_read(pins::FOIL_ADC_CHANNEL)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc() -> u16 {
        SIM_FOIL_ADC.load(Ordering::Relaxed)
    }
}
