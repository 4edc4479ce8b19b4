//! Leakguard Firmware — Main Entry Point
//!
//! Hexagonal architecture around a fixed-cadence control loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  HardwareAdapter        LogEventSink    ThingSpeakClient │
//! │  (Sensor+Indicator      (EventSink)     (Telemetry)      │
//! │   +Display)             WifiLink        ControlServer    │
//! │                                                          │
//! │  ───────────── Port Trait Boundary ─────────────────     │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │            AppService (pure logic)             │      │
//! │  │  sampler · debounce · classify · thresholds    │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Each iteration polls the control endpoint once (non-blocking), runs one
//! tick, then sleeps — unless the tick reported an overheat, in which case
//! the loop goes straight into the next tick so the alarm blink and
//! display refresh at the fast rate.
#![deny(unused_must_use)]

/// Build-time network provisioning; override via environment at build.
#[cfg(target_os = "espidf")]
const WIFI_SSID: &str = match option_env!("LEAKGUARD_WIFI_SSID") {
    Some(v) => v,
    None => "leakguard",
};
#[cfg(target_os = "espidf")]
const WIFI_PASSWORD: &str = match option_env!("LEAKGUARD_WIFI_PASSWORD") {
    Some(v) => v,
    None => "leakguard-setup",
};
#[cfg(target_os = "espidf")]
const THINGSPEAK_API_KEY: &str = match option_env!("LEAKGUARD_THINGSPEAK_KEY") {
    Some(v) => v,
    None => "CHANGEME0123456",
};

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use std::thread;
    use std::time::Duration;

    use esp_idf_hal::peripherals::Peripherals;
    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use esp_idf_svc::nvs::EspDefaultNvsPartition;
    use log::info;

    use leakguard::adapters::hardware::HardwareAdapter;
    use leakguard::adapters::log_sink::LogEventSink;
    use leakguard::adapters::telemetry::ThingSpeakClient;
    use leakguard::adapters::wifi::{self, WifiCredentials};
    use leakguard::app::service::{AppService, TickOutcome};
    use leakguard::config::SystemConfig;
    use leakguard::drivers::hw_init;
    use leakguard::server::ControlServer;

    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Leakguard v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    let config = SystemConfig::default();

    // ── 3. Network bring-up ───────────────────────────────────
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    let creds = WifiCredentials::new(WIFI_SSID, WIFI_PASSWORD)?;
    let wifi = wifi::connect(&creds, peripherals.modem, sysloop, nvs)?;

    info!("Control panel: http://{}:{}/", wifi.ip(), config.http_port);
    info!("  GET  /status");
    info!("  POST /set_threshold?value=<raw>");
    info!("  POST /reset_threshold");
    info!("  POST /calibrate_dry");
    info!("  POST /calibrate_wet");

    let mut server = ControlServer::bind(
        config.http_port,
        Duration::from_secs(config.recv_timeout_secs),
    )?;

    // ── 4. Construct adapters + application core ──────────────
    let mut hw = HardwareAdapter::new(&config);
    let mut telemetry = ThingSpeakClient::new(THINGSPEAK_API_KEY)?;
    let mut sink = LogEventSink::new();

    let loop_delay = Duration::from_millis(u64::from(config.loop_delay_ms));
    let mut app = AppService::new(config);
    app.start(&mut sink);

    // ── 5. Main cycle ─────────────────────────────────────────
    loop {
        server.poll(&mut app, &mut hw);

        match app.tick(&mut hw, &mut telemetry, &mut sink) {
            // Alarm feedback runs at the fast tick rate.
            TickOutcome::Overheat { .. } => continue,
            TickOutcome::Normal { .. } => thread::sleep(loop_delay),
        }
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!("the leakguard binary targets ESP-IDF; host builds use the library + tests");
}
