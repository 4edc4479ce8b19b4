//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements    | Connects to                  |
//! |-------------|---------------|------------------------------|
//! | `hardware`  | SensorPort    | ESP32 ADC (spoon, foil)      |
//! |             | IndicatorPort | ESP32 GPIO (bar + leak LEDs) |
//! |             | DisplayPort   | I²C character display        |
//! | `log_sink`  | EventSink     | Serial log output            |
//! | `telemetry` | TelemetryPort | ThingSpeak HTTP upload       |
//! | `wifi`      | —             | ESP-IDF WiFi STA             |

pub mod hardware;
pub mod log_sink;
pub mod telemetry;
pub mod wifi;
