//! Temperature LED bar driver.
//!
//! Five discrete LEDs driven as a monotonic bar: lighting `count` means
//! LEDs 1..=count are on and the rest are off. The whole bar is rewritten
//! on every call — no partial updates.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the GPIOs via hw_init. On host/test: tracks state
//! in-memory only.

use crate::drivers::hw_init;
use crate::pins;

pub struct LedBar {
    lit: u8,
}

impl LedBar {
    pub fn new() -> Self {
        Self { lit: 0 }
    }

    /// Light the first `count` LEDs (0–5); anything above 5 saturates.
    pub fn light(&mut self, count: u8) {
        let count = count.min(pins::TEMP_BAR_GPIOS.len() as u8);
        for (i, pin) in pins::TEMP_BAR_GPIOS.iter().enumerate() {
            hw_init::gpio_set(*pin, (i as u8) < count);
        }
        self.lit = count;
    }

    pub fn all_off(&mut self) {
        self.light(0);
    }

    /// Currently lit segment count.
    pub fn lit(&self) -> u8 {
        self.lit
    }
}
