//! Temperature bucket classifier.
//!
//! Maps a temperature to the number of LED-bar segments to light (0–5) and
//! an overheat flag. The bar is monotonic: lighting bucket N means segments
//! 1..=N are lit.
//!
//! The 50 °C boundary is deliberate: 50.0 is still bucket 5; only strictly
//! above 50 is an overheat, which the main cycle renders as a full-bar
//! blink instead of the bucket count.

/// Classification result for one temperature reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempIndication {
    /// LED-bar segments to light (0 = coldest / off, 5 = hottest).
    pub bucket: u8,
    /// Strictly above the alarm limit.
    pub overheat: bool,
}

/// Classify a temperature in Celsius. First match wins.
pub fn classify(celsius: f32, limit_c: f32) -> TempIndication {
    let bucket = if celsius < 0.0 {
        0
    } else if celsius <= 10.0 {
        1
    } else if celsius <= 20.0 {
        2
    } else if celsius <= 30.0 {
        3
    } else if celsius <= 40.0 {
        4
    } else {
        5
    };

    TempIndication {
        bucket,
        overheat: celsius > limit_c,
    }
}
