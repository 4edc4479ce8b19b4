//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them — log to serial today.

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The control loop has started.
    Started,

    /// Per-tick reading snapshot.
    Telemetry(TelemetryData),

    /// The debouncer confirmed a leak (transition into the alarm).
    LeakConfirmed { foil_raw: u16 },

    /// A previously confirmed leak cleared.
    LeakCleared { foil_raw: u16 },

    /// Temperature is above the alarm limit this tick.
    Overheat { temperature_c: f32 },
}

/// A point-in-time reading snapshot suitable for logging or transmission.
#[derive(Debug, Clone, Copy)]
pub struct TelemetryData {
    pub temperature_c: f32,
    pub spoon_raw: u16,
    pub foil_raw: u16,
    pub leak: bool,
}
