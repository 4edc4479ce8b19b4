//! Leak status LED pair.
//!
//! Green (dry) and red (leak confirmed) LEDs, always driven as opposites.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the GPIOs via hw_init. On host/test: tracks state
//! in-memory only.

use crate::drivers::hw_init;
use crate::pins;

pub struct LeakLeds {
    leak: bool,
}

impl LeakLeds {
    pub fn new() -> Self {
        Self { leak: false }
    }

    /// `true` lights the red leak LED, `false` the green ok LED.
    pub fn set(&mut self, leak: bool) {
        hw_init::gpio_set(pins::LED_LEAK_GPIO, leak);
        hw_init::gpio_set(pins::LED_OK_GPIO, !leak);
        self.leak = leak;
    }

    pub fn is_leak(&self) -> bool {
        self.leak
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leds_are_opposites() {
        let mut leds = LeakLeds::new();
        leds.set(true);
        assert!(leds.is_leak());
        leds.set(false);
        assert!(!leds.is_leak());
    }
}
