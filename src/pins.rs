//! GPIO / peripheral pin assignments for the Leakguard sensor board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers. Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Sensors — Analog (ADC1)
// ---------------------------------------------------------------------------

/// Spoon-mounted temperature sensor — analog voltage into ADC1.
/// ADC1 channel 6 (GPIO 7 on ESP32-S3).
pub const SPOON_ADC_GPIO: i32 = 7;
pub const SPOON_ADC_CHANNEL: u32 = 6;

/// Foil leak sensor — 1 MΩ pull-up to 3.3 V, other foil to GND.
/// Liquid contact pulls the node DOWN, so a wet reading is SMALLER.
/// ADC1 channel 5 (GPIO 6 on ESP32-S3).
pub const FOIL_ADC_GPIO: i32 = 6;
pub const FOIL_ADC_CHANNEL: u32 = 5;

// ---------------------------------------------------------------------------
// Temperature LED bar (index 0 = coldest, 4 = hottest before warning)
// ---------------------------------------------------------------------------

pub const TEMP_BAR_GPIOS: [i32; 5] = [1, 2, 3, 4, 5];

// ---------------------------------------------------------------------------
// Leak LEDs
// ---------------------------------------------------------------------------

/// Green — dry.
pub const LED_OK_GPIO: i32 = 10;
/// Red — leak confirmed.
pub const LED_LEAK_GPIO: i32 = 11;

// ---------------------------------------------------------------------------
// I²C character display (16x2, serial backpack at 0x3C)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 14;
pub const I2C_SCL_GPIO: i32 = 15;
pub const LCD_I2C_ADDR: u8 = 0x3C;
pub const LCD_COLS: usize = 16;
pub const LCD_ROWS: usize = 2;
