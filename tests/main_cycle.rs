//! Integration tests: AppService tick → indicators, display, telemetry.

use leakguard::app::events::AppEvent;
use leakguard::app::ports::{
    DisplayPort, EventSink, IndicatorPort, SensorPort, TelemetryError, TelemetryPort,
};
use leakguard::app::service::{AppService, TickOutcome};
use leakguard::config::SystemConfig;

// Raw readings chosen against the probe curve T = 48.65 * (raw * 3.3 / 65535) - 7.
const SPOON_RAW_23C: u16 = 12_451; // ≈ 23.5 °C → bucket 3
const SPOON_RAW_52C: u16 = 24_100; // ≈ 52.0 °C → overheat
const FOIL_DRY: u16 = 64_000;
const FOIL_WET: u16 = 30_000;

// ── Mock implementations ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
enum DisplayCall {
    Temperature(f32),
    Warning(f32),
}

struct MockHw {
    spoon_raw: u16,
    foil_raw: u16,
    bar_history: Vec<u8>,
    blink_count: u32,
    leak_led: bool,
    display: Vec<DisplayCall>,
}

impl MockHw {
    fn new(spoon_raw: u16, foil_raw: u16) -> Self {
        Self {
            spoon_raw,
            foil_raw,
            bar_history: Vec::new(),
            blink_count: 0,
            leak_led: false,
            display: Vec::new(),
        }
    }
}

impl SensorPort for MockHw {
    fn sample_spoon(&mut self) -> u16 {
        self.spoon_raw
    }
    fn sample_foil(&mut self) -> u16 {
        self.foil_raw
    }
}

impl IndicatorPort for MockHw {
    fn light_bar(&mut self, count: u8) {
        self.bar_history.push(count);
    }
    fn set_leak_leds(&mut self, leak: bool) {
        self.leak_led = leak;
    }
    fn blink_bar(&mut self) {
        self.blink_count += 1;
    }
}

impl DisplayPort for MockHw {
    fn show_temperature(&mut self, celsius: f32) {
        self.display.push(DisplayCall::Temperature(celsius));
    }
    fn show_warning(&mut self, celsius: f32) {
        self.display.push(DisplayCall::Warning(celsius));
    }
}

struct MockTelemetry {
    uploads: Vec<(f32, u16)>,
    fail: bool,
}

impl MockTelemetry {
    fn new() -> Self {
        Self {
            uploads: Vec::new(),
            fail: false,
        }
    }
}

impl TelemetryPort for MockTelemetry {
    fn upload(&mut self, temperature_c: f32, foil_raw: u16) -> Result<(), TelemetryError> {
        if self.fail {
            return Err(TelemetryError::ConnectFailed);
        }
        self.uploads.push((temperature_c, foil_raw));
        Ok(())
    }
}

#[derive(Default)]
struct MockSink {
    events: Vec<AppEvent>,
}

impl EventSink for MockSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

fn app() -> AppService {
    AppService::new(SystemConfig::default())
}

fn leak_confirmations(sink: &MockSink) -> usize {
    sink.events
        .iter()
        .filter(|e| matches!(e, AppEvent::LeakConfirmed { .. }))
        .count()
}

// ── Normal range ──────────────────────────────────────────────

#[test]
fn normal_tick_lights_bucket_and_uploads() {
    let mut app = app();
    let mut hw = MockHw::new(SPOON_RAW_23C, FOIL_DRY);
    let mut telemetry = MockTelemetry::new();
    let mut sink = MockSink::default();

    let outcome = app.tick(&mut hw, &mut telemetry, &mut sink);

    assert_eq!(
        outcome,
        TickOutcome::Normal {
            bucket: 3,
            leak: false
        }
    );
    assert_eq!(hw.bar_history, vec![3]);
    assert!(!hw.leak_led);
    assert_eq!(hw.blink_count, 0);

    let (temp, foil) = telemetry.uploads[0];
    assert!((temp - 23.5).abs() < 0.1);
    assert_eq!(foil, FOIL_DRY);

    assert!(matches!(hw.display[0], DisplayCall::Temperature(_)));
    assert!(
        sink.events
            .iter()
            .any(|e| matches!(e, AppEvent::Telemetry(_)))
    );
}

#[test]
fn telemetry_failure_does_not_disturb_the_tick() {
    let mut app = app();
    let mut hw = MockHw::new(SPOON_RAW_23C, FOIL_DRY);
    let mut telemetry = MockTelemetry::new();
    telemetry.fail = true;
    let mut sink = MockSink::default();

    let outcome = app.tick(&mut hw, &mut telemetry, &mut sink);

    assert!(matches!(outcome, TickOutcome::Normal { .. }));
    assert_eq!(hw.bar_history, vec![3]);
    assert_eq!(app.tick_count(), 1);
}

// ── Leak debounce across ticks ────────────────────────────────

#[test]
fn leak_requires_three_consecutive_wet_ticks() {
    let mut app = app();
    let mut hw = MockHw::new(SPOON_RAW_23C, FOIL_WET);
    let mut telemetry = MockTelemetry::new();
    let mut sink = MockSink::default();

    for expected_leak in [false, false, true] {
        let outcome = app.tick(&mut hw, &mut telemetry, &mut sink);
        assert_eq!(
            outcome,
            TickOutcome::Normal {
                bucket: 3,
                leak: expected_leak
            }
        );
        assert_eq!(hw.leak_led, expected_leak);
    }
    assert_eq!(leak_confirmations(&sink), 1);

    // Holding wet does not re-announce the leak.
    app.tick(&mut hw, &mut telemetry, &mut sink);
    assert_eq!(leak_confirmations(&sink), 1);

    // A dry reading clears immediately.
    hw.foil_raw = FOIL_DRY;
    let outcome = app.tick(&mut hw, &mut telemetry, &mut sink);
    assert_eq!(
        outcome,
        TickOutcome::Normal {
            bucket: 3,
            leak: false
        }
    );
    assert!(!hw.leak_led);
    assert!(
        sink.events
            .iter()
            .any(|e| matches!(e, AppEvent::LeakCleared { .. }))
    );
}

#[test]
fn intermittent_wet_reading_never_confirms() {
    let mut app = app();
    let mut hw = MockHw::new(SPOON_RAW_23C, FOIL_WET);
    let mut telemetry = MockTelemetry::new();
    let mut sink = MockSink::default();

    for foil in [FOIL_WET, FOIL_WET, FOIL_DRY, FOIL_WET, FOIL_WET] {
        hw.foil_raw = foil;
        let outcome = app.tick(&mut hw, &mut telemetry, &mut sink);
        assert!(matches!(outcome, TickOutcome::Normal { leak: false, .. }));
    }
    assert_eq!(leak_confirmations(&sink), 0);
}

// ── Overheat fast loop ────────────────────────────────────────

#[test]
fn overheat_tick_blinks_warns_and_still_uploads() {
    let mut app = app();
    let mut hw = MockHw::new(SPOON_RAW_52C, FOIL_DRY);
    let mut telemetry = MockTelemetry::new();
    let mut sink = MockSink::default();

    let outcome = app.tick(&mut hw, &mut telemetry, &mut sink);

    let TickOutcome::Overheat { temperature_c } = outcome else {
        panic!("expected overheat outcome, got {:?}", outcome);
    };
    assert!(temperature_c > 50.0);

    assert_eq!(hw.blink_count, 1);
    assert!(hw.bar_history.is_empty(), "no bucket indication in alarm");
    assert!(matches!(hw.display[0], DisplayCall::Warning(_)));
    assert_eq!(telemetry.uploads.len(), 1);
    assert!(
        sink.events
            .iter()
            .any(|e| matches!(e, AppEvent::Overheat { .. }))
    );
}

#[test]
fn alarm_clears_once_temperature_drops() {
    let mut app = app();
    let mut hw = MockHw::new(SPOON_RAW_52C, FOIL_DRY);
    let mut telemetry = MockTelemetry::new();
    let mut sink = MockSink::default();

    assert!(matches!(
        app.tick(&mut hw, &mut telemetry, &mut sink),
        TickOutcome::Overheat { .. }
    ));

    hw.spoon_raw = SPOON_RAW_23C;
    assert!(matches!(
        app.tick(&mut hw, &mut telemetry, &mut sink),
        TickOutcome::Normal { bucket: 3, .. }
    ));
    assert!(matches!(hw.display[1], DisplayCall::Temperature(_)));
}

/// Full stack on the host sim: injected ADC raws flow through the real
/// sampler, adapter and display shadow.
#[cfg(not(target_os = "espidf"))]
#[test]
fn injected_overheat_reading_reaches_the_display() {
    use leakguard::adapters::hardware::HardwareAdapter;
    use leakguard::sensors::spoon::sim_set_spoon_adc;

    sim_set_spoon_adc(SPOON_RAW_52C);

    let mut app = app();
    let mut hw = HardwareAdapter::new(&SystemConfig::default());
    let mut telemetry = MockTelemetry::new();
    let mut sink = MockSink::default();

    let outcome = app.tick(&mut hw, &mut telemetry, &mut sink);
    assert!(matches!(outcome, TickOutcome::Overheat { .. }));

    assert_eq!(hw.lcd().line(0), "VAROITUS!");
    assert!(hw.lcd().line(1).starts_with("52."));
    assert_eq!(hw.bar_lit(), 0, "alarm blink ends with the bar dark");
    // The sim foil default is full-scale dry.
    assert!(!hw.leak_led_on());
    assert_eq!(telemetry.uploads.len(), 1);
}

// ── Calibration interaction with the running loop ─────────────

#[test]
fn lowered_threshold_stops_confirming_borderline_readings() {
    let mut app = app();
    let mut hw = MockHw::new(SPOON_RAW_23C, FOIL_WET);
    let mut telemetry = MockTelemetry::new();
    let mut sink = MockSink::default();

    // 30 000 sits below the default 52 000 threshold.
    app.tick(&mut hw, &mut telemetry, &mut sink);

    // An operator override below the reading makes the same foil value dry
    // and resets the in-progress debounce.
    app.set_threshold(25_000);
    for _ in 0..3 {
        let outcome = app.tick(&mut hw, &mut telemetry, &mut sink);
        assert!(matches!(outcome, TickOutcome::Normal { leak: false, .. }));
    }
    assert_eq!(leak_confirmations(&sink), 0);
}
