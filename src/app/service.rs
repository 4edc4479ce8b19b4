//! Application service — one logical tick of the control loop.
//!
//! [`AppService`] owns the debouncer and the threshold store and runs the
//! sample → debounce → classify → indicate → upload sequence. All I/O
//! flows through port traits injected at call sites, making the entire
//! service testable with mock adapters.
//!
//! ```text
//!   SensorPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                  │          AppService          │
//! IndicatorPort ◀──│  sampler · debounce ·        │──▶ TelemetryPort
//!   DisplayPort ◀──│  classify · thresholds       │
//!                  └──────────────────────────────┘
//! ```
//!
//! The end-of-tick sleep lives in `main`, keyed off [`TickOutcome`]: the
//! overheat branch skips it so alarm feedback (blink + display) runs at
//! the fast tick rate.

use log::{info, warn};

use crate::calibration::{ThresholdSnapshot, ThresholdStore};
use crate::config::SystemConfig;
use crate::control::classify::classify;
use crate::control::debounce::{LeakDebouncer, LeakStatus};
use crate::sensors::spoon;

use super::events::{AppEvent, TelemetryData};
use super::ports::{DisplayPort, EventSink, IndicatorPort, SensorPort, TelemetryPort};

/// What one tick decided; `main` uses this to pick the inter-tick sleep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Normal range: bucket LEDs lit, full sleep before the next tick.
    Normal { bucket: u8, leak: bool },
    /// Above the alarm limit: warning shown, bar blinked, no sleep.
    Overheat { temperature_c: f32 },
}

/// The application service orchestrates all domain logic.
pub struct AppService {
    config: SystemConfig,
    thresholds: ThresholdStore,
    debouncer: LeakDebouncer,
    /// Whether the previous tick had a confirmed leak (edge detection).
    leak_active: bool,
    tick_count: u64,
}

impl AppService {
    pub fn new(config: SystemConfig) -> Self {
        let thresholds = ThresholdStore::new(config.foil_dry_default, config.foil_wet_default);
        let debouncer = LeakDebouncer::new(config.leak_debounce_count);
        Self {
            config,
            thresholds,
            debouncer,
            leak_active: false,
            tick_count: 0,
        }
    }

    /// Announce startup through the sink.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started);
        info!(
            "AppService started (threshold={}, debounce={})",
            self.thresholds.threshold(),
            self.debouncer.confirm_count()
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full cycle: sample both sensors, debounce, classify, drive
    /// the indicators and display, upload telemetry.
    ///
    /// The `hw` parameter satisfies the sensor, indicator **and** display
    /// ports — this avoids a triple mutable borrow while keeping the port
    /// boundary explicit. The control endpoint is polled by `main` before
    /// each call, never from inside the tick.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + IndicatorPort + DisplayPort),
        telemetry: &mut impl TelemetryPort,
        sink: &mut impl EventSink,
    ) -> TickOutcome {
        self.tick_count += 1;

        // 1. Spoon temperature
        let spoon_raw = hw.sample_spoon();
        let voltage = spoon::raw_to_voltage(spoon_raw, self.config.vcc);
        let temperature_c = spoon::voltage_to_celsius(voltage);

        // 2. Foil leak sensor, debounced against the live threshold
        let foil_raw = hw.sample_foil();
        let status = self.debouncer.update(foil_raw, self.thresholds.threshold());
        let leak = status == LeakStatus::Confirmed;

        hw.set_leak_leds(leak);
        self.log_leak(foil_raw, leak);

        if leak != self.leak_active {
            if leak {
                sink.emit(&AppEvent::LeakConfirmed { foil_raw });
            } else {
                sink.emit(&AppEvent::LeakCleared { foil_raw });
            }
            self.leak_active = leak;
        }

        let data = TelemetryData {
            temperature_c,
            spoon_raw,
            foil_raw,
            leak,
        };

        // 3. Overheat branch: warning + full-bar blink, then straight into
        // the next tick so the alarm stays responsive.
        if temperature_c > self.config.temp_limit_c {
            warn!(
                "!! OVERHEAT !! Temp: {:.1}C | Spoon RAW {} | Foil RAW {} | Leak: {}",
                temperature_c,
                spoon_raw,
                foil_raw,
                if leak { "YES" } else { "NO" }
            );
            sink.emit(&AppEvent::Overheat { temperature_c });

            hw.show_warning(temperature_c);
            hw.blink_bar();

            self.upload(telemetry, &data);
            sink.emit(&AppEvent::Telemetry(data));
            return TickOutcome::Overheat { temperature_c };
        }

        // 4. Normal range: bucket indication + reading display.
        let indication = classify(temperature_c, self.config.temp_limit_c);
        hw.light_bar(indication.bucket);

        info!(
            "Temp: {:.1}C | Spoon RAW {} | Foil RAW {} | Leak: {}",
            temperature_c,
            spoon_raw,
            foil_raw,
            if leak { "YES" } else { "NO" }
        );
        hw.show_temperature(temperature_c);

        self.upload(telemetry, &data);
        sink.emit(&AppEvent::Telemetry(data));

        TickOutcome::Normal {
            bucket: indication.bucket,
            leak,
        }
    }

    // ── Calibration surface (used by the control endpoint) ────

    /// Consistent copy of the calibration state.
    pub fn thresholds(&self) -> ThresholdSnapshot {
        self.thresholds.snapshot()
    }

    /// The overheat alarm limit, reported by `/status`.
    pub fn temp_limit_c(&self) -> f32 {
        self.config.temp_limit_c
    }

    /// Direct threshold override (holds until the next calibrate/reset).
    pub fn set_threshold(&mut self, value: u16) -> u16 {
        self.thresholds.set_threshold(value)
    }

    /// Recompute the threshold from the current dry/wet baselines.
    pub fn reset_threshold(&mut self) -> u16 {
        self.thresholds.reset_threshold()
    }

    /// Calibrate the dry baseline from a fresh reference reading.
    pub fn calibrate_dry(&mut self, reference: u16) -> (u16, u16) {
        self.thresholds.calibrate_dry(reference)
    }

    /// Calibrate the wet baseline from a fresh reference reading.
    pub fn calibrate_wet(&mut self, reference: u16) -> (u16, u16) {
        self.thresholds.calibrate_wet(reference)
    }

    // ── Queries ───────────────────────────────────────────────

    /// Total ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Whether the previous tick had a confirmed leak.
    pub fn leak_active(&self) -> bool {
        self.leak_active
    }

    // ── Internal ──────────────────────────────────────────────

    fn upload(&self, telemetry: &mut impl TelemetryPort, data: &TelemetryData) {
        if let Err(e) = telemetry.upload(data.temperature_c, data.foil_raw) {
            warn!("Telemetry upload failed: {}", e);
        }
    }

    fn log_leak(&self, foil_raw: u16, leak: bool) {
        if leak {
            warn!("!! Leak detected !! value: {} (confirmed)", foil_raw);
        } else if self.debouncer.consecutive() > 0 {
            info!(
                "Leak watch: {} (checking {}/{})",
                foil_raw,
                self.debouncer.consecutive(),
                self.debouncer.confirm_count()
            );
        } else {
            info!("Leak watch OK, value: {}", foil_raw);
        }
    }
}
