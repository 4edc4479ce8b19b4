//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns both analog sensors and all indicator drivers, exposing them
//! through [`SensorPort`], [`IndicatorPort`] and [`DisplayPort`]. This is
//! the only module above the driver layer that touches hardware. On
//! non-espidf targets, the underlying drivers use cfg-gated simulation
//! stubs, so the adapter itself is target-agnostic.

use core::fmt::Write;

use heapless::String;

use crate::app::ports::{DisplayPort, IndicatorPort, SensorPort};
use crate::config::SystemConfig;
use crate::drivers::hw_init;
use crate::drivers::lcd::{DEG, Lcd};
use crate::drivers::leak_led::LeakLeds;
use crate::drivers::led_bar::LedBar;
use crate::pins;
use crate::sensors::foil::FoilSensor;
use crate::sensors::sampler::AnalogSampler;
use crate::sensors::spoon::SpoonSensor;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    spoon: SpoonSensor,
    foil: FoilSensor,
    bar: LedBar,
    leak_leds: LeakLeds,
    lcd: Lcd,
    blink_on_ms: u32,
    blink_off_ms: u32,
}

impl HardwareAdapter {
    pub fn new(config: &SystemConfig) -> Self {
        let sampler = AnalogSampler::new(config.adc_samples, config.sample_delay_ms);
        Self {
            spoon: SpoonSensor::new(sampler),
            foil: FoilSensor::new(sampler),
            bar: LedBar::new(),
            leak_leds: LeakLeds::new(),
            lcd: Lcd::new(),
            blink_on_ms: config.blink_on_ms,
            blink_off_ms: config.blink_off_ms,
        }
    }

    /// Shadow copy of the display (host inspection / tests).
    pub fn lcd(&self) -> &Lcd {
        &self.lcd
    }

    /// Currently lit bar segment count.
    pub fn bar_lit(&self) -> u8 {
        self.bar.lit()
    }

    /// Whether the red leak LED is on.
    pub fn leak_led_on(&self) -> bool {
        self.leak_leds.is_leak()
    }

    fn show_reading(&mut self, label: &str, celsius: f32) {
        let mut value: String<{ pins::LCD_COLS }> = String::new();
        let _ = write!(value, "{:.1} {}C", celsius, DEG);
        self.lcd.clear();
        self.lcd.move_to(0, 0);
        self.lcd.put_str(label);
        self.lcd.move_to(0, 1);
        self.lcd.put_str(&value);
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn sample_spoon(&mut self) -> u16 {
        self.spoon.sample_raw()
    }

    fn sample_foil(&mut self) -> u16 {
        self.foil.sample_raw()
    }
}

// ── IndicatorPort implementation ──────────────────────────────

impl IndicatorPort for HardwareAdapter {
    fn light_bar(&mut self, count: u8) {
        self.bar.light(count);
    }

    fn set_leak_leds(&mut self, leak: bool) {
        self.leak_leds.set(leak);
    }

    fn blink_bar(&mut self) {
        self.bar.light(pins::TEMP_BAR_GPIOS.len() as u8);
        hw_init::delay_ms(self.blink_on_ms);
        self.bar.all_off();
        hw_init::delay_ms(self.blink_off_ms);
    }
}

// ── DisplayPort implementation ────────────────────────────────

impl DisplayPort for HardwareAdapter {
    fn show_temperature(&mut self, celsius: f32) {
        self.show_reading("Lampotila:", celsius);
    }

    fn show_warning(&mut self, celsius: f32) {
        self.show_reading("VAROITUS!", celsius);
    }
}
