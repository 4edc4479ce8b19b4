//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! A future MQTT or similar adapter would implement the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | T={:.1}C | spoon={} | foil={} | leak={}",
                    t.temperature_c,
                    t.spoon_raw,
                    t.foil_raw,
                    if t.leak { "YES" } else { "NO" },
                );
            }
            AppEvent::LeakConfirmed { foil_raw } => {
                warn!("LEAK | confirmed, foil={}", foil_raw);
            }
            AppEvent::LeakCleared { foil_raw } => {
                info!("LEAK | cleared, foil={}", foil_raw);
            }
            AppEvent::Overheat { temperature_c } => {
                warn!("OVERHEAT | T={:.1}C", temperature_c);
            }
            AppEvent::Started => {
                info!("START | control loop running");
            }
        }
    }
}
