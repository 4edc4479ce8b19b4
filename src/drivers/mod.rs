//! Hardware drivers. Real peripheral access is cfg-gated to
//! `target_os = "espidf"`; host builds get in-memory shadows.

pub mod hw_init;
pub mod lcd;
pub mod leak_led;
pub mod led_bar;
