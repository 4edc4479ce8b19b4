//! ThingSpeak telemetry adapter.
//!
//! Implements [`TelemetryPort`] with a single GET per reading:
//! `field1` carries the temperature, `field2` the raw foil value (the
//! channel graphs the raw trend, leak confirmation stays on-device).
//! Uploads are best-effort; the main cycle logs failures and moves on.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: HTTPS via `EspHttpConnection` with the built-in CA bundle.
//! On host/test: records the last upload for inspection.

use heapless::String;
use log::info;

use crate::app::ports::{TelemetryError, TelemetryPort};
use crate::error::{Error, Result};

const UPDATE_URL: &str = "https://api.thingspeak.com/update";

pub struct ThingSpeakClient {
    api_key: String<32>,
    #[cfg(not(target_os = "espidf"))]
    last_upload: Option<(f32, u16)>,
}

impl ThingSpeakClient {
    pub fn new(api_key: &str) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config("ThingSpeak API key must not be empty"));
        }
        let api_key =
            String::try_from(api_key).map_err(|_| Error::Config("ThingSpeak API key too long"))?;
        Ok(Self {
            api_key,
            #[cfg(not(target_os = "espidf"))]
            last_upload: None,
        })
    }

    fn update_url(&self, temperature_c: f32, foil_raw: u16) -> std::string::String {
        format!(
            "{}?api_key={}&field1={:.2}&field2={}",
            UPDATE_URL, self.api_key, temperature_c, foil_raw
        )
    }

    /// Last recorded upload (host inspection / tests).
    #[cfg(not(target_os = "espidf"))]
    pub fn last_upload(&self) -> Option<(f32, u16)> {
        self.last_upload
    }

    #[cfg(target_os = "espidf")]
    fn platform_upload(
        &mut self,
        temperature_c: f32,
        foil_raw: u16,
    ) -> core::result::Result<u16, TelemetryError> {
        use embedded_svc::http::client::Client;
        use embedded_svc::http::{Method, Status};
        use esp_idf_svc::http::client::{Configuration, EspHttpConnection};

        let config = Configuration {
            crt_bundle_attach: Some(esp_idf_svc::sys::esp_crt_bundle_attach),
            timeout: Some(core::time::Duration::from_secs(5)),
            ..Default::default()
        };
        let connection =
            EspHttpConnection::new(&config).map_err(|_| TelemetryError::ConnectFailed)?;
        let mut client = Client::wrap(connection);

        let url = self.update_url(temperature_c, foil_raw);
        let request = client
            .request(Method::Get, &url, &[])
            .map_err(|_| TelemetryError::ConnectFailed)?;
        let response = request.submit().map_err(|_| TelemetryError::ConnectFailed)?;
        Ok(response.status())
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_upload(
        &mut self,
        temperature_c: f32,
        foil_raw: u16,
    ) -> core::result::Result<u16, TelemetryError> {
        self.last_upload = Some((temperature_c, foil_raw));
        info!("Telemetry(sim): {}", self.update_url(temperature_c, foil_raw));
        Ok(200)
    }
}

impl TelemetryPort for ThingSpeakClient {
    fn upload(
        &mut self,
        temperature_c: f32,
        foil_raw: u16,
    ) -> core::result::Result<(), TelemetryError> {
        let status = self.platform_upload(temperature_c, foil_raw)?;
        if !(200..300).contains(&status) {
            return Err(TelemetryError::Rejected);
        }
        info!("Telemetry uploaded (HTTP {})", status);
        Ok(())
    }
}
