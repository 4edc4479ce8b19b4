//! WiFi station adapter.
//!
//! Blocking STA association at boot: the control panel URL is only worth
//! printing once an IP lease exists, so startup waits for the netif to
//! come up before the main cycle starts.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the real WiFi stack through `BlockingWifi`. On
//! host/test: simulated association with a fixed lease, exercising the
//! same credential validation path.

use core::net::Ipv4Addr;

use heapless::String;
use log::info;

use crate::error::{Error, Result};

/// Station credentials, validated at construction.
#[derive(Debug, Clone)]
pub struct WifiCredentials {
    pub ssid: String<32>,
    pub password: String<64>,
}

impl WifiCredentials {
    /// An empty password selects an open network; otherwise WPA2 rules
    /// apply (8..=63 characters).
    pub fn new(ssid: &str, password: &str) -> Result<Self> {
        if ssid.is_empty() {
            return Err(Error::Config("WiFi SSID must not be empty"));
        }
        if !password.is_empty() && password.len() < 8 {
            return Err(Error::Config("WPA2 password must be at least 8 chars"));
        }
        let ssid = String::try_from(ssid).map_err(|_| Error::Config("WiFi SSID too long"))?;
        let password =
            String::try_from(password).map_err(|_| Error::Config("WiFi password too long"))?;
        Ok(Self { ssid, password })
    }
}

// ── ESP-IDF target ────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub use espidf::{WifiLink, connect};

#[cfg(target_os = "espidf")]
mod espidf {
    use esp_idf_hal::modem::Modem;
    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use esp_idf_svc::nvs::EspDefaultNvsPartition;
    use esp_idf_svc::wifi::{
        AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi,
    };
    use log::error;

    use super::*;
    use crate::error::CommsError;

    /// A live station association. Dropping it tears the connection down.
    pub struct WifiLink {
        wifi: BlockingWifi<EspWifi<'static>>,
        ip: Ipv4Addr,
    }

    impl WifiLink {
        pub fn ip(&self) -> Ipv4Addr {
            self.ip
        }

        pub fn is_connected(&self) -> bool {
            self.wifi.is_connected().unwrap_or(false)
        }
    }

    /// Associate with the configured network and wait for an IP lease.
    pub fn connect(
        creds: &WifiCredentials,
        modem: Modem,
        sysloop: EspSystemEventLoop,
        nvs: EspDefaultNvsPartition,
    ) -> Result<WifiLink> {
        info!("WiFi: connecting to '{}'", creds.ssid);

        let auth_method = if creds.password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };

        let attempt = || -> core::result::Result<WifiLink, esp_idf_svc::sys::EspError> {
            let esp_wifi = EspWifi::new(modem, sysloop.clone(), Some(nvs))?;
            let mut wifi = BlockingWifi::wrap(esp_wifi, sysloop)?;
            wifi.set_configuration(&Configuration::Client(ClientConfiguration {
                ssid: creds.ssid.clone(),
                password: creds.password.clone(),
                auth_method,
                ..Default::default()
            }))?;
            wifi.start()?;
            wifi.connect()?;
            wifi.wait_netif_up()?;
            let ip = wifi.wifi().sta_netif().get_ip_info()?.ip;
            Ok(WifiLink { wifi, ip })
        };

        match attempt() {
            Ok(link) => {
                info!("WiFi: connected, IP {}", link.ip);
                Ok(link)
            }
            Err(e) => {
                error!("WiFi: association failed ({})", e);
                Err(CommsError::WifiConnectFailed.into())
            }
        }
    }
}

// ── Host simulation ───────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
pub use sim::{WifiLink, connect};

#[cfg(not(target_os = "espidf"))]
mod sim {
    use super::*;

    const SIM_IP: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 50);

    pub struct WifiLink {
        ip: Ipv4Addr,
    }

    impl WifiLink {
        pub fn ip(&self) -> Ipv4Addr {
            self.ip
        }

        pub fn is_connected(&self) -> bool {
            true
        }
    }

    /// Simulated association: always succeeds with a fixed lease.
    pub fn connect(creds: &WifiCredentials) -> Result<WifiLink> {
        info!("WiFi(sim): connected to '{}', IP {}", creds.ssid, SIM_IP);
        Ok(WifiLink { ip: SIM_IP })
    }
}
