//! Port traits — the boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (sensors, indicators, display, telemetry, event sinks)
//! implement these traits. The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core never touches hardware
//! directly — host tests inject mocks instead.

use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain one stable
/// (trimmed-mean averaged) reading per sensor. Blocking for the duration
/// of the sampling window (~200 ms on hardware).
pub trait SensorPort {
    /// Stable raw reading from the spoon temperature sensor.
    fn sample_spoon(&mut self) -> u16;

    /// Stable raw reading from the foil leak sensor.
    fn sample_foil(&mut self) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Indicator port (driven adapter: domain → LEDs)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the LED indicators.
pub trait IndicatorPort {
    /// Light the first `count` bar LEDs (0–5), rest off.
    fn light_bar(&mut self, count: u8);

    /// Drive the leak/ok LED pair (true = leak confirmed).
    fn set_leak_leds(&mut self, leak: bool);

    /// One overheat blink: full bar on, short hold, bar off, short hold.
    fn blink_bar(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → character display)
// ───────────────────────────────────────────────────────────────

/// Two-line character display: a label line and a value line.
pub trait DisplayPort {
    /// Normal-range display: temperature label + current reading.
    fn show_temperature(&mut self, celsius: f32);

    /// Overheat warning display.
    fn show_warning(&mut self, celsius: f32);
}

// ───────────────────────────────────────────────────────────────
// Telemetry port (driven adapter: domain → remote aggregation)
// ───────────────────────────────────────────────────────────────

/// Errors from [`TelemetryPort`] uploads. Always non-fatal — the main
/// cycle logs and discards them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryError {
    /// Connection or request construction failed.
    ConnectFailed,
    /// The remote endpoint answered with a non-success status.
    Rejected,
}

impl core::fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ConnectFailed => write!(f, "connect failed"),
            Self::Rejected => write!(f, "remote rejected upload"),
        }
    }
}

/// Best-effort upload of the latest reading.
pub trait TelemetryPort {
    fn upload(&mut self, temperature_c: f32, foil_raw: u16) -> Result<(), TelemetryError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port. Adapters
/// decide where they go (serial log today; MQTT or similar later).
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
